//! Camera component

use serde::{Deserialize, Serialize};

use crate::foundation::math::{utils, Mat4};
use crate::scene::component::Component;
use crate::scene::registry::ComponentFromJson;
use crate::scene::SceneError;

/// Perspective camera attached to a game object
///
/// The view matrix is the inverse of the owning object's world transform;
/// the scene resolves that, the component only carries projection state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Vertical field of view, degrees
    pub fov_degrees: f32,

    /// Near clip plane distance
    pub near_plane: f32,

    /// Far clip plane distance
    pub far_plane: f32,

    /// Viewport aspect ratio (width / height)
    pub aspect: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            near_plane: 0.1,
            far_plane: 1000.0,
            aspect: 1.0,
        }
    }
}

impl Camera {
    /// Projection matrix for the current parameters
    pub fn projection(&self) -> Mat4 {
        Mat4::new_perspective(
            self.aspect,
            utils::deg_to_rad(self.fov_degrees),
            self.near_plane,
            self.far_plane,
        )
    }

    /// View matrix given the owning object's world transform
    pub fn view(world: &Mat4) -> Mat4 {
        world.try_inverse().unwrap_or_else(Mat4::identity)
    }

    /// Update the aspect ratio after a viewport resize
    pub fn resize_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }
}

impl Component for Camera {
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

impl ComponentFromJson for Camera {
    const TYPE_NAME: &'static str = "Camera";

    fn from_json(value: &serde_json::Value) -> Result<Self, SceneError> {
        Ok(serde_json::from_value(value.clone())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_resize_updates_aspect() {
        let mut camera = Camera::default();
        camera.resize_viewport(1600, 900);
        assert_relative_eq!(camera.aspect, 16.0 / 9.0);

        // Degenerate sizes are ignored
        camera.resize_viewport(0, 900);
        assert_relative_eq!(camera.aspect, 16.0 / 9.0);
    }

    #[test]
    fn test_view_inverts_world() {
        let world = Mat4::new_translation(&crate::foundation::math::Vec3::new(3.0, 0.0, 0.0));
        let view = Camera::view(&world);
        assert_relative_eq!(view * world, Mat4::identity(), epsilon = 1e-6);
    }
}
