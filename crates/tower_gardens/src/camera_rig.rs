//! Camera rig that snaps between lane viewpoints
//!
//! The camera sits above the goal and only ever yaws. Switching lanes
//! starts a turn toward that lane's yaw at a fixed rate, in the direction
//! the player pressed; further switches are ignored until the turn lands.

use siege_engine::foundation::math::utils;

use crate::lanes::LaneTable;

#[derive(Debug, Clone, Copy)]
struct Turn {
    target: f32,
    positive: bool,
}

/// Yaw controller for the lane-watching camera
#[derive(Debug)]
pub struct CameraRig {
    yaw: f32,
    lane: usize,
    turn_speed: f32,
    turning: Option<Turn>,
}

impl CameraRig {
    /// Create a rig watching lane 0, already in position
    pub fn new(turn_speed: f32, table: &LaneTable) -> Self {
        Self {
            yaw: table.camera_yaw(0),
            lane: 0,
            turn_speed,
            turning: None,
        }
    }

    /// Lane the rig is watching (or turning toward)
    pub fn lane(&self) -> usize {
        self.lane
    }

    /// Current yaw in degrees, within [0, 360)
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Whether a turn is in flight
    pub fn is_turning(&self) -> bool {
        self.turning.is_some()
    }

    /// Begin turning to the next lane counter-clockwise
    pub fn turn_left(&mut self, table: &LaneTable) {
        if self.turning.is_some() {
            return;
        }
        self.lane = table.next_left(self.lane);
        self.turning = Some(Turn {
            target: table.camera_yaw(self.lane),
            positive: true,
        });
    }

    /// Begin turning to the next lane clockwise
    pub fn turn_right(&mut self, table: &LaneTable) {
        if self.turning.is_some() {
            return;
        }
        self.lane = table.next_right(self.lane);
        self.turning = Some(Turn {
            target: table.camera_yaw(self.lane),
            positive: false,
        });
    }

    /// Advance any in-flight turn and return the yaw to apply this frame
    pub fn update(&mut self, dt: f32) -> f32 {
        if let Some(turn) = self.turning {
            let step = self.turn_speed * dt;
            let remaining = if turn.positive {
                utils::wrap_degrees(turn.target - self.yaw)
            } else {
                utils::wrap_degrees(self.yaw - turn.target)
            };
            if remaining <= step {
                self.yaw = utils::wrap_degrees(turn.target);
                self.turning = None;
            } else if turn.positive {
                self.yaw = utils::wrap_degrees(self.yaw + step);
            } else {
                self.yaw = utils::wrap_degrees(self.yaw - step);
            }
        }
        self.yaw
    }
}
