//! The engine loop: timing, input, scene passes, and rendering

use std::sync::Arc;

use crate::application::{AppError, Application, EngineContext};
use crate::assets::ResourceManager;
use crate::config::EngineConfig;
use crate::foundation::time::Timer;
use crate::input::InputState;
use crate::render::{FrameUniforms, NullRenderer, RenderBackend};
use crate::scene::components::{self, Camera};
use crate::scene::{ComponentTypes, Scene, SceneError};

/// Errors that abort the engine loop
#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    /// An application callback failed
    #[error("application error: {0}")]
    App(#[from] AppError),

    /// A scene operation failed
    #[error("scene error: {0}")]
    Scene(#[from] SceneError),
}

/// Owns the frame loop and every engine subsystem
///
/// Frame order: input rollover, application update, scene update, physics,
/// render. The default backend is the [`NullRenderer`], so an engine runs
/// headless unless a real backend is installed.
pub struct Engine {
    config: EngineConfig,
    timer: Timer,
    input: InputState,
    scene: Scene,
    resources: ResourceManager,
    types: Arc<ComponentTypes>,
    backend: Box<dyn RenderBackend>,
    quit_requested: bool,
    edit_snapshot: Option<serde_json::Value>,
}

impl Engine {
    /// Create an engine with the built-in component types registered
    pub fn new(config: EngineConfig) -> Self {
        Self::with_types(config, ComponentTypes::new())
    }

    /// Create an engine whose registry also holds game-defined types
    ///
    /// The built-in component types are always added on top of `types`.
    pub fn with_types(config: EngineConfig, mut types: ComponentTypes) -> Self {
        components::register_engine_components(&mut types);
        let types = Arc::new(types);

        Self {
            config,
            timer: Timer::new(),
            input: InputState::new(),
            scene: Scene::new("untitled", Arc::clone(&types)),
            resources: ResourceManager::new(),
            types,
            backend: Box::new(NullRenderer::new()),
            quit_requested: false,
            edit_snapshot: None,
        }
    }

    /// Install a rendering backend, replacing the null renderer
    #[must_use]
    pub fn with_backend(mut self, backend: Box<dyn RenderBackend>) -> Self {
        self.backend = backend;
        self
    }

    /// Shared component registrations, for loading scenes outside the engine
    pub fn component_types(&self) -> Arc<ComponentTypes> {
        Arc::clone(&self.types)
    }

    /// The active scene
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable access to the active scene
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Replace the active scene (the old scene is dropped)
    pub fn set_scene(&mut self, scene: Scene) {
        log::info!("Switching to scene '{}'", scene.name());
        self.scene = scene;
    }

    /// Keyboard state, for tests and platform layers feeding events
    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    /// Shared asset stores
    pub fn resources_mut(&mut self) -> &mut ResourceManager {
        &mut self.resources
    }

    /// Frames completed so far
    pub fn frame_count(&self) -> u64 {
        self.timer.frame_count()
    }

    /// Snapshot the scene and start playing
    ///
    /// The serialized snapshot is held until [`exit_play_mode`](Self::exit_play_mode)
    /// puts the scene back exactly as it was, discarding gameplay mutations.
    pub fn enter_play_mode(&mut self) -> Result<(), SceneError> {
        if self.scene.is_playing() {
            return Ok(());
        }
        self.edit_snapshot = Some(self.scene.to_json()?);
        self.scene.play();
        log::info!("Entered play mode for scene '{}'", self.scene.name());
        Ok(())
    }

    /// Stop playing and restore the scene captured at play-mode entry
    pub fn exit_play_mode(&mut self) -> Result<(), SceneError> {
        let Some(snapshot) = self.edit_snapshot.take() else {
            self.scene.pause();
            return Ok(());
        };
        let mut restored = Scene::from_json(&snapshot, Arc::clone(&self.types))?;
        restored.awake();
        log::info!("Exited play mode, restored scene '{}'", restored.name());
        self.scene = restored;
        Ok(())
    }

    /// Run the loop until the application quits or `max_frames` elapse
    pub fn run(&mut self, app: &mut dyn Application) -> Result<(), EngineError> {
        log::info!("Starting '{}'", self.config.title);

        let mut ctx = EngineContext {
            scene: &mut self.scene,
            input: &mut self.input,
            resources: &mut self.resources,
            quit: &mut self.quit_requested,
        };
        app.initialize(&mut ctx)?;

        self.scene.awake();
        self.scene.play();

        loop {
            if self.quit_requested {
                break;
            }
            if self.config.max_frames > 0 && self.timer.frame_count() >= self.config.max_frames {
                break;
            }

            match self.config.fixed_timestep {
                Some(step) => self.timer.tick_fixed(step),
                None => self.timer.update(),
            }
            let dt = self.timer.delta_time();

            self.input.begin_frame();
            let mut ctx = EngineContext {
                scene: &mut self.scene,
                input: &mut self.input,
                resources: &mut self.resources,
                quit: &mut self.quit_requested,
            };
            app.update(&mut ctx, dt)?;

            self.scene.update(dt);
            self.scene.do_physics(dt);
            self.render_frame();
        }

        let mut ctx = EngineContext {
            scene: &mut self.scene,
            input: &mut self.input,
            resources: &mut self.resources,
            quit: &mut self.quit_requested,
        };
        app.cleanup(&mut ctx);
        log::info!(
            "Stopped '{}' after {} frames",
            self.config.title,
            self.timer.frame_count()
        );
        Ok(())
    }

    fn render_frame(&mut self) {
        let uniforms = self
            .scene
            .main_camera()
            .and_then(|id| {
                let world = self.scene.world_transform(id)?;
                let camera = self.scene.get_component::<Camera>(id)?;
                Some(FrameUniforms {
                    view: Camera::view(&world),
                    projection: camera.projection(),
                    lights: self.scene.lights().to_vec(),
                })
            })
            .unwrap_or_default();

        let items = self.scene.pre_render();
        self.backend.render(&uniforms, &items);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::scene::components::RotatingBehaviour;

    struct SpinnerApp {
        spinner_name: &'static str,
    }

    impl Application for SpinnerApp {
        fn initialize(&mut self, ctx: &mut EngineContext<'_>) -> Result<(), AppError> {
            let id = ctx.scene.create_game_object(self.spinner_name);
            ctx.scene.add_component(
                id,
                RotatingBehaviour {
                    rotation_speed: Vec3::new(0.0, 90.0, 0.0),
                },
            )?;
            Ok(())
        }

        fn update(&mut self, _ctx: &mut EngineContext<'_>, _dt: f32) -> Result<(), AppError> {
            Ok(())
        }
    }

    #[test]
    fn test_fixed_step_loop_runs_component_updates() {
        let config = EngineConfig {
            title: "test".to_string(),
            fixed_timestep: Some(0.1),
            max_frames: 10,
        };
        let mut engine = Engine::new(config);
        let mut app = SpinnerApp {
            spinner_name: "spinner",
        };
        engine.run(&mut app).unwrap();

        assert_eq!(engine.frame_count(), 10);
        let id = engine.scene().find_object_by_name("spinner").unwrap();
        let rotation = engine.scene().object(id).unwrap().rotation();
        approx::assert_relative_eq!(rotation.y, 90.0, epsilon = 1e-3);
    }

    struct QuitAfterThree {
        frames: u32,
    }

    impl Application for QuitAfterThree {
        fn initialize(&mut self, _ctx: &mut EngineContext<'_>) -> Result<(), AppError> {
            Ok(())
        }

        fn update(&mut self, ctx: &mut EngineContext<'_>, _dt: f32) -> Result<(), AppError> {
            self.frames += 1;
            if self.frames == 3 {
                ctx.request_quit();
            }
            Ok(())
        }
    }

    #[test]
    fn test_play_mode_round_trip_discards_gameplay_mutations() {
        let mut engine = Engine::new(EngineConfig::default());
        let id = engine.scene_mut().create_game_object("tower");
        engine
            .scene_mut()
            .object_mut(id)
            .unwrap()
            .set_position(Vec3::new(1.0, 0.0, 0.0));

        engine.enter_play_mode().unwrap();
        let id = engine.scene().find_object_by_name("tower").unwrap();
        engine
            .scene_mut()
            .object_mut(id)
            .unwrap()
            .set_position(Vec3::new(99.0, 0.0, 0.0));

        engine.exit_play_mode().unwrap();
        let id = engine.scene().find_object_by_name("tower").unwrap();
        assert_eq!(
            engine.scene().object(id).unwrap().position(),
            Vec3::new(1.0, 0.0, 0.0)
        );
        assert!(!engine.scene().is_playing());
    }

    #[test]
    fn test_quit_request_stops_the_loop() {
        let config = EngineConfig {
            title: "test".to_string(),
            fixed_timestep: Some(0.016),
            max_frames: 0,
        };
        let mut engine = Engine::new(config);
        let mut app = QuitAfterThree { frames: 0 };
        engine.run(&mut app).unwrap();
        assert_eq!(engine.frame_count(), 3);
    }
}
