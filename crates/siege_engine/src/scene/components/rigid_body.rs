//! Rigid body component

use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec3;
use crate::physics::{BodyKind, ColliderShape};
use crate::scene::component::Component;
use crate::scene::registry::ComponentFromJson;
use crate::scene::SceneError;

/// Physical body backing the owning object
///
/// The scene mirrors this into the physics world before every step and
/// writes the stepped position back to the object's transform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RigidBody {
    /// Simulation behavior of this body
    pub kind: BodyKind,

    /// Collider attached to the body
    pub collider: ColliderShape,

    velocity: Vec3,
}

impl RigidBody {
    /// Create a body of the given kind with a collider
    pub fn new(kind: BodyKind, collider: ColliderShape) -> Self {
        Self {
            kind,
            collider,
            velocity: Vec3::zeros(),
        }
    }

    /// Create a static body (the original engine's default)
    pub fn new_static(collider: ColliderShape) -> Self {
        Self::new(BodyKind::Static, collider)
    }

    /// Current linear velocity
    pub fn linear_velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Set the linear velocity
    pub fn set_linear_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }
}

impl Component for RigidBody {
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

impl ComponentFromJson for RigidBody {
    const TYPE_NAME: &'static str = "RigidBody";

    fn from_json(value: &serde_json::Value) -> Result<Self, SceneError> {
        Ok(serde_json::from_value(value.clone())?)
    }
}
