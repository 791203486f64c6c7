//! Trigger volume component

use serde::{Deserialize, Serialize};

use crate::physics::ColliderShape;
use crate::scene::component::Component;
use crate::scene::registry::ComponentFromJson;
use crate::scene::SceneError;

/// Non-physical collider raising enter events without impulse response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerVolume {
    /// The overlap region
    pub collider: ColliderShape,
}

impl TriggerVolume {
    /// Create a trigger volume with the given collider
    pub fn new(collider: ColliderShape) -> Self {
        Self { collider }
    }
}

impl Component for TriggerVolume {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }

    fn to_json(&self) -> Result<serde_json::Value, SceneError> {
        Ok(serde_json::to_value(self)?)
    }
}

impl ComponentFromJson for TriggerVolume {
    const TYPE_NAME: &'static str = "TriggerVolume";

    fn from_json(value: &serde_json::Value) -> Result<Self, SceneError> {
        Ok(serde_json::from_value(value.clone())?)
    }
}
