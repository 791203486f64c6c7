//! Game-defined components

use serde::{Deserialize, Serialize};
use siege_engine::prelude::*;

/// Register every game component so scene files round-trip
pub fn register_game_components(types: &mut ComponentTypes) {
    types.register::<EnemyMovement>();
}

fn enabled_default() -> bool {
    true
}

/// Drives a goblin along its lane toward the goal
///
/// Requires a [`RigidBody`] sibling to push; without one the component
/// disables itself at awake. Reaching the goal trigger sets
/// [`reached_goal`](EnemyMovement::reached_goal), and the game harvests
/// those goblins once per frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyMovement {
    /// Movement speed, world units per second
    pub move_speed: f32,

    /// Base damage dealt on a breach
    pub damage: f32,

    /// World position the goblin walks toward
    pub target: Vec3,

    #[serde(skip, default = "enabled_default")]
    enabled: bool,

    #[serde(skip)]
    reached_goal: bool,
}

impl Default for EnemyMovement {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            damage: 10.0,
            target: Vec3::zeros(),
            enabled: true,
            reached_goal: false,
        }
    }
}

impl EnemyMovement {
    /// Create a movement script toward `target`
    pub fn new(move_speed: f32, damage: f32, target: Vec3) -> Self {
        Self {
            move_speed,
            damage,
            target,
            ..Self::default()
        }
    }

    /// Whether this goblin has entered the goal trigger
    pub fn reached_goal(&self) -> bool {
        self.reached_goal
    }
}

impl Component for EnemyMovement {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn awake(&mut self, ctx: &mut ComponentCtx<'_>) {
        if ctx.get::<RigidBody>().is_none() {
            log::warn!(
                "EnemyMovement on '{}' has no RigidBody to push; disabling",
                ctx.object_name()
            );
            self.enabled = false;
        }
    }

    fn update(&mut self, ctx: &mut ComponentCtx<'_>, _dt: f32) {
        let to_goal = self.target - ctx.transform().position;
        if to_goal.magnitude() < 1e-3 {
            return;
        }
        let velocity = to_goal.normalize() * self.move_speed;
        if let Some(body) = ctx.get_mut::<RigidBody>() {
            body.set_linear_velocity(velocity);
        }
    }

    fn on_trigger_enter(&mut self, ctx: &mut ComponentCtx<'_>, _other: GameObjectId) {
        log::debug!("Goblin '{}' reached the gate", ctx.object_name());
        self.reached_goal = true;
    }

    fn to_json(&self) -> Result<serde_json::Value, SceneError> {
        Ok(serde_json::to_value(self)?)
    }
}

impl ComponentFromJson for EnemyMovement {
    const TYPE_NAME: &'static str = "EnemyMovement";

    fn from_json(value: &serde_json::Value) -> Result<Self, SceneError> {
        Ok(serde_json::from_value(value.clone())?)
    }
}
