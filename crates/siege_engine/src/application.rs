//! Application trait: the seam between the engine loop and a game

use crate::assets::ResourceManager;
use crate::config::ConfigError;
use crate::input::InputState;
use crate::scene::{Scene, SceneError};

/// Errors surfaced from application callbacks
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// A scene operation failed
    #[error("scene error: {0}")]
    Scene(#[from] SceneError),

    /// Loading or saving configuration failed
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Application-specific failure
    #[error("{0}")]
    Other(String),
}

/// Engine state handed to application callbacks
///
/// Borrows the engine's scene, input, and resources for the duration of one
/// callback; requesting quit takes effect at the next frame boundary.
pub struct EngineContext<'a> {
    /// The active scene
    pub scene: &'a mut Scene,
    /// Keyboard state for this frame
    pub input: &'a mut InputState,
    /// Shared asset stores
    pub resources: &'a mut ResourceManager,
    pub(crate) quit: &'a mut bool,
}

impl EngineContext<'_> {
    /// Stop the engine loop after the current frame
    pub fn request_quit(&mut self) {
        *self.quit = true;
    }
}

/// A game driven by the engine loop
///
/// The engine calls [`initialize`](Application::initialize) once before the
/// first frame, [`update`](Application::update) every frame before the
/// scene's own passes, and [`cleanup`](Application::cleanup) after the loop
/// exits.
pub trait Application {
    /// Build initial scene content and load resources
    fn initialize(&mut self, ctx: &mut EngineContext<'_>) -> Result<(), AppError>;

    /// Per-frame game logic, run before scene update and physics
    fn update(&mut self, ctx: &mut EngineContext<'_>, dt: f32) -> Result<(), AppError>;

    /// Teardown after the loop exits
    fn cleanup(&mut self, _ctx: &mut EngineContext<'_>) {}
}
