//! Lane definitions for the four goblin approach paths
//!
//! Every lane is a straight run from its spawn point to the shared goal in
//! front of the tower, with a camera yaw that faces down it. Keeping the
//! lanes in one table means spawning, movement, and camera focus all index
//! the same data instead of branching per lane.

use rand::Rng;
use siege_engine::prelude::Vec3;

/// Number of approach lanes
pub const LANE_COUNT: usize = 4;

/// Shared goal position every lane converges on
pub fn goal_position() -> Vec3 {
    Vec3::new(12.76, -10.42, 1.0)
}

/// One approach path
#[derive(Debug, Clone, Copy)]
pub struct Lane {
    /// Display name
    pub name: &'static str,
    /// Where goblins on this lane appear
    pub spawn: [f32; 3],
    /// Camera yaw (degrees) that faces down this lane
    pub camera_yaw: f32,
}

/// The fixed four-lane layout around the tower
#[derive(Debug, Clone)]
pub struct LaneTable {
    lanes: [Lane; LANE_COUNT],
}

impl Default for LaneTable {
    fn default() -> Self {
        Self {
            lanes: [
                Lane {
                    name: "north",
                    spawn: [12.76, 11.0, 1.0],
                    camera_yaw: 0.0,
                },
                Lane {
                    name: "west",
                    spawn: [-9.0, -10.42, 1.0],
                    camera_yaw: 90.0,
                },
                Lane {
                    name: "south",
                    spawn: [12.76, -32.0, 1.0],
                    camera_yaw: 180.0,
                },
                Lane {
                    name: "east",
                    spawn: [35.0, -10.42, 1.0],
                    camera_yaw: 270.0,
                },
            ],
        }
    }
}

impl LaneTable {
    /// Number of lanes
    #[allow(clippy::unused_self)]
    pub fn len(&self) -> usize {
        LANE_COUNT
    }

    /// Always false; the table is fixed-size
    #[allow(clippy::unused_self)]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The lane at `index`, wrapping out-of-range indices
    pub fn lane(&self, index: usize) -> &Lane {
        &self.lanes[index % LANE_COUNT]
    }

    /// Spawn position for a lane
    pub fn spawn_position(&self, index: usize) -> Vec3 {
        let [x, y, z] = self.lane(index).spawn;
        Vec3::new(x, y, z)
    }

    /// Camera yaw facing down a lane
    pub fn camera_yaw(&self, index: usize) -> f32 {
        self.lane(index).camera_yaw
    }

    /// Pick a lane uniformly at random
    pub fn random_index(&self, rng: &mut impl Rng) -> usize {
        rng.gen_range(0..LANE_COUNT)
    }

    /// The lane to the left of `index` (A key)
    pub fn next_left(&self, index: usize) -> usize {
        (index + 1) % LANE_COUNT
    }

    /// The lane to the right of `index` (D key)
    pub fn next_right(&self, index: usize) -> usize {
        (index + LANE_COUNT - 1) % LANE_COUNT
    }
}
