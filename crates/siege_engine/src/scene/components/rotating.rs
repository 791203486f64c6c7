//! Constant-rate rotation behaviour

use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec3;
use crate::scene::component::{Component, ComponentCtx};
use crate::scene::registry::ComponentFromJson;
use crate::scene::SceneError;

/// Spins the owning object at a fixed rate, degrees per second per axis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotatingBehaviour {
    /// Rotation speed around each axis, degrees per second
    pub rotation_speed: Vec3,
}

impl Default for RotatingBehaviour {
    fn default() -> Self {
        Self {
            rotation_speed: Vec3::new(0.0, 0.0, 90.0),
        }
    }
}

impl Component for RotatingBehaviour {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }

    fn update(&mut self, ctx: &mut ComponentCtx<'_>, dt: f32) {
        let transform = ctx.transform_mut();
        transform.rotation += self.rotation_speed * dt;
    }

    fn to_json(&self) -> Result<serde_json::Value, SceneError> {
        Ok(serde_json::to_value(self)?)
    }
}

impl ComponentFromJson for RotatingBehaviour {
    const TYPE_NAME: &'static str = "RotatingBehaviour";

    fn from_json(value: &serde_json::Value) -> Result<Self, SceneError> {
        Ok(serde_json::from_value(value.clone())?)
    }
}
