//! Renderable mesh component

use serde::{Deserialize, Serialize};

use crate::scene::component::Component;
use crate::scene::registry::ComponentFromJson;
use crate::scene::SceneError;

/// Draws the owning object with a named mesh and material
///
/// Meshes and materials are resource-manager handles referenced by name;
/// an empty mesh name means "nothing to draw yet" and the render pass
/// skips the object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderComponent {
    mesh: String,
    material: String,
}

impl RenderComponent {
    /// Create a renderer for the given mesh and material names
    pub fn new(mesh: impl Into<String>, material: impl Into<String>) -> Self {
        Self {
            mesh: mesh.into(),
            material: material.into(),
        }
    }

    /// Name of the mesh resource
    pub fn mesh(&self) -> &str {
        &self.mesh
    }

    /// Name of the material resource
    pub fn material(&self) -> &str {
        &self.material
    }

    /// Point the renderer at a different mesh
    pub fn set_mesh(&mut self, mesh: impl Into<String>) {
        self.mesh = mesh.into();
    }

    /// Point the renderer at a different material
    pub fn set_material(&mut self, material: impl Into<String>) {
        self.material = material.into();
    }
}

impl Component for RenderComponent {
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

impl ComponentFromJson for RenderComponent {
    const TYPE_NAME: &'static str = "RenderComponent";

    fn from_json(value: &serde_json::Value) -> Result<Self, SceneError> {
        Ok(serde_json::from_value(value.clone())?)
    }
}
