//! Rendering seam
//!
//! The scene produces plain draw lists; backends consume them behind the
//! [`RenderBackend`] trait. The engine ships [`NullRenderer`] so gameplay,
//! serialization, and physics run headless (tests, CI, servers).

use crate::foundation::math::Mat4;
use crate::scene::Light;

/// Per-frame uniform data shared by every draw
#[derive(Debug, Clone)]
pub struct FrameUniforms {
    /// View matrix from the main camera
    pub view: Mat4,
    /// Projection matrix from the main camera
    pub projection: Mat4,
    /// Scene lights, at most [`Scene::MAX_LIGHTS`](crate::scene::Scene::MAX_LIGHTS)
    pub lights: Vec<Light>,
}

impl Default for FrameUniforms {
    fn default() -> Self {
        Self {
            view: Mat4::identity(),
            projection: Mat4::identity(),
            lights: Vec::new(),
        }
    }
}

/// One object to draw: a model matrix plus mesh and material names
#[derive(Debug, Clone)]
pub struct DrawItem {
    /// Object-to-world matrix
    pub model: Mat4,
    /// Mesh resource name
    pub mesh: String,
    /// Material resource name
    pub material: String,
}

/// Backend that consumes the scene's draw list each frame
pub trait RenderBackend {
    /// Render one frame
    fn render(&mut self, uniforms: &FrameUniforms, items: &[DrawItem]);
}

/// Backend that records but never draws
#[derive(Debug, Default)]
pub struct NullRenderer {
    frames: u64,
    draws: u64,
}

impl NullRenderer {
    /// Create a fresh recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames rendered so far
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Draw items submitted so far
    pub fn draw_count(&self) -> u64 {
        self.draws
    }
}

impl RenderBackend for NullRenderer {
    fn render(&mut self, _uniforms: &FrameUniforms, items: &[DrawItem]) {
        self.frames += 1;
        self.draws += items.len() as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_renderer_counts_frames_and_draws() {
        let mut renderer = NullRenderer::new();
        let uniforms = FrameUniforms::default();
        let items = vec![
            DrawItem {
                model: Mat4::identity(),
                mesh: "tower".to_string(),
                material: "stone".to_string(),
            },
            DrawItem {
                model: Mat4::identity(),
                mesh: "goblin".to_string(),
                material: "skin".to_string(),
            },
        ];

        renderer.render(&uniforms, &items);
        renderer.render(&uniforms, &[]);

        assert_eq!(renderer.frame_count(), 2);
        assert_eq!(renderer.draw_count(), 2);
    }
}
