//! # Siege Engine
//!
//! A small component-based 3D engine with JSON scene serialization.
//!
//! ## Features
//!
//! - **Scene Graph**: Arena-backed game objects with parent/child links
//! - **Components**: One behavior/data unit per type per object, with
//!   awake/update/trigger lifecycle hooks
//! - **Serialization**: Whole-scene JSON save/load with type-tagged
//!   component blobs
//! - **Physics**: Built-in rigid bodies and trigger volumes
//! - **Headless**: The default render backend records instead of drawing,
//!   so games run in tests and CI
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use siege_engine::prelude::*;
//!
//! struct MyGame;
//!
//! impl Application for MyGame {
//!     fn initialize(&mut self, ctx: &mut EngineContext<'_>) -> Result<(), AppError> {
//!         let id = ctx.scene.create_game_object("spinner");
//!         ctx.scene.add_component(id, RotatingBehaviour::default())?;
//!         Ok(())
//!     }
//!
//!     fn update(&mut self, _ctx: &mut EngineContext<'_>, _dt: f32) -> Result<(), AppError> {
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     siege_engine::foundation::logging::init();
//!     let mut engine = Engine::new(EngineConfig::default());
//!     engine.run(&mut MyGame)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

pub mod application;
pub mod assets;
pub mod config;
pub mod engine;
pub mod foundation;
pub mod input;
pub mod physics;
pub mod render;
pub mod scene;

/// Commonly used types, ready for glob import
pub mod prelude {
    pub use crate::application::{AppError, Application, EngineContext};
    pub use crate::assets::{Material, MeshResource, ResourceManager, ShaderProgram, Texture2D};
    pub use crate::config::{Config, EngineConfig};
    pub use crate::engine::{Engine, EngineError};
    pub use crate::foundation::math::{Mat4, Transform, Vec3};
    pub use crate::input::{InputState, KeyCode};
    pub use crate::physics::{BodyKind, ColliderShape};
    pub use crate::render::{NullRenderer, RenderBackend};
    pub use crate::scene::components::{
        Camera, RenderComponent, RigidBody, RotatingBehaviour, TriggerVolume,
    };
    pub use crate::scene::{
        Component, ComponentCtx, ComponentFromJson, ComponentTypes, GameObject, GameObjectId,
        Light, Scene, SceneCommands, SceneError, SceneState,
    };
}
