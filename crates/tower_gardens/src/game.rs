//! The tower defense game: menu flow, lane camera, spawning, and breaches

use rand::rngs::StdRng;
use rand::SeedableRng;
use siege_engine::prelude::*;

use crate::camera_rig::CameraRig;
use crate::components::EnemyMovement;
use crate::config::GameConfig;
use crate::lanes::LaneTable;
use crate::menu::{MenuAction, MenuState};
use crate::scene_setup;

/// Exported next to the binary so the level can be inspected and re-loaded
const SCENE_EXPORT: &str = "tower_gardens_scene.json";
const MANIFEST_EXPORT: &str = "tower_gardens_manifest.json";

/// Application state for one session of Tower Gardens
pub struct TowerGardens {
    config: GameConfig,
    menu: MenuState,
    lanes: LaneTable,
    rig: CameraRig,
    rng: StdRng,
    spawn_timer: f32,
    spawn_serial: u32,
    base_health: f32,
    autopilot: bool,
    frame: u64,
    tapped: Vec<KeyCode>,
}

impl TowerGardens {
    /// Create a game driven by real input
    pub fn new(config: GameConfig) -> Self {
        let lanes = LaneTable::default();
        let rig = CameraRig::new(config.camera.turn_speed, &lanes);
        let base_health = config.gameplay.base_health;
        Self {
            config,
            menu: MenuState::new(),
            lanes,
            rig,
            rng: StdRng::from_entropy(),
            spawn_timer: 0.0,
            spawn_serial: 0,
            base_health,
            autopilot: false,
            frame: 0,
            tapped: Vec::new(),
        }
    }

    /// Create a game that plays itself, for headless runs
    pub fn demo(config: GameConfig) -> Self {
        let mut game = Self::new(config);
        game.autopilot = true;
        game
    }

    /// Goblins defeated this run
    pub fn score(&self) -> u32 {
        self.menu.score()
    }

    /// Remaining base hit points
    pub fn base_health(&self) -> f32 {
        self.base_health
    }

    fn tap(&mut self, input: &mut InputState, key: KeyCode) {
        input.set_key(key, true);
        self.tapped.push(key);
    }

    /// Scripted key taps so the demo exercises the menu and camera
    fn drive_autopilot(&mut self, input: &mut InputState) {
        for key in self.tapped.drain(..) {
            input.set_key(key, false);
        }
        match self.frame {
            30 => self.tap(input, KeyCode::Enter),
            f if f > 30 && f % 150 == 0 => self.tap(input, KeyCode::A),
            _ => {}
        }
    }

    fn start_run(&mut self, scene: &mut Scene) {
        self.base_health = self.config.gameplay.base_health;
        self.spawn_timer = 0.0;

        // Clear survivors from any previous run
        let mut leftovers = Vec::new();
        scene.each::<EnemyMovement>(|id, _| leftovers.push(id));
        for id in leftovers {
            scene.destroy_game_object(id);
        }
        scene.play();
    }

    fn update_camera(&mut self, ctx: &mut EngineContext<'_>, dt: f32) {
        if ctx.input.was_pressed(KeyCode::A) {
            self.rig.turn_left(&self.lanes);
        } else if ctx.input.was_pressed(KeyCode::D) {
            self.rig.turn_right(&self.lanes);
        }
        let yaw = self.rig.update(dt);
        if let Some(camera) = ctx.scene.main_camera() {
            if let Some(object) = ctx.scene.object_mut(camera) {
                object.set_rotation(Vec3::new(90.0, 0.0, yaw));
            }
        }
    }

    fn update_spawning(&mut self, scene: &mut Scene, dt: f32) -> Result<(), AppError> {
        self.spawn_timer += dt;
        if self.spawn_timer < self.config.gameplay.spawn_interval {
            return Ok(());
        }
        self.spawn_timer = 0.0;
        self.spawn_serial += 1;

        let lane = self.lanes.random_index(&mut self.rng);
        scene_setup::spawn_goblin(
            scene,
            self.lanes.spawn_position(lane),
            &self.config.gameplay,
            self.spawn_serial,
        )?;
        log::info!(
            "Goblin {} spawned on the {} lane",
            self.spawn_serial,
            self.lanes.lane(lane).name
        );
        Ok(())
    }

    /// Space smites the goblin closest to the gate
    fn update_smiting(&mut self, ctx: &mut EngineContext<'_>) {
        if !ctx.input.was_pressed(KeyCode::Space) {
            return;
        }
        let goal = crate::lanes::goal_position();
        let mut closest: Option<(GameObjectId, f32)> = None;
        ctx.scene.each::<EnemyMovement>(|id, _| {
            if let Some(object) = ctx.scene.object(id) {
                let distance = (object.position() - goal).magnitude();
                if closest.map_or(true, |(_, best)| distance < best) {
                    closest = Some((id, distance));
                }
            }
        });
        if let Some((id, _)) = closest {
            ctx.scene.destroy_game_object(id);
            self.menu.add_score(1);
            log::info!("Goblin smitten, score {}", self.menu.score());
        }
    }

    fn update_breaches(&mut self, scene: &mut Scene) {
        let mut breached = Vec::new();
        scene.each::<EnemyMovement>(|id, enemy| {
            if enemy.reached_goal() {
                breached.push((id, enemy.damage));
            }
        });
        for (id, damage) in breached {
            scene.destroy_game_object(id);
            self.base_health -= damage;
            log::info!("Gate breached, base health {:.0}", self.base_health);
        }
        if self.base_health <= 0.0 {
            self.menu.notify_defeat();
            scene.pause();
        }
    }
}

impl Application for TowerGardens {
    fn initialize(&mut self, ctx: &mut EngineContext<'_>) -> Result<(), AppError> {
        scene_setup::register_assets(ctx.resources);
        scene_setup::populate(ctx.scene, &self.lanes)?;

        if let Err(e) = ctx.scene.save(SCENE_EXPORT) {
            log::warn!("Could not export scene: {e}");
        }
        if let Err(e) = ctx.resources.save_manifest(MANIFEST_EXPORT) {
            log::warn!("Could not export asset manifest: {e}");
        }
        Ok(())
    }

    fn update(&mut self, ctx: &mut EngineContext<'_>, dt: f32) -> Result<(), AppError> {
        self.frame += 1;
        if self.autopilot {
            self.drive_autopilot(ctx.input);
        }

        match self.menu.apply_input(ctx.input) {
            MenuAction::StartRun => self.start_run(ctx.scene),
            MenuAction::Resume => ctx.scene.play(),
            MenuAction::Suspend => ctx.scene.pause(),
            MenuAction::Quit => {
                ctx.request_quit();
                return Ok(());
            }
            MenuAction::None => {}
        }

        if !self.menu.gameplay_active() {
            return Ok(());
        }

        self.update_camera(ctx, dt);
        self.update_spawning(ctx.scene, dt)?;
        self.update_smiting(ctx);
        self.update_breaches(ctx.scene);
        Ok(())
    }

    fn cleanup(&mut self, _ctx: &mut EngineContext<'_>) {
        log::info!(
            "Session over: score {}, base health {:.0}",
            self.menu.score(),
            self.base_health
        );
    }
}
