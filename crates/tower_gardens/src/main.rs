//! Tower Gardens: a four-lane tower defense demo on Siege Engine
//!
//! Runs headless on the engine's null renderer, playing itself for ten
//! simulated seconds, and exports the assembled level as JSON next to the
//! binary.

mod camera_rig;
mod components;
mod config;
mod game;
mod lanes;
mod menu;
mod scene_setup;

use siege_engine::prelude::*;

use crate::config::GameConfig;
use crate::game::TowerGardens;

const CONFIG_PATH: &str = "tower_gardens.toml";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    siege_engine::foundation::logging::init();

    let game_config = match GameConfig::load_from_file(CONFIG_PATH) {
        Ok(config) => config,
        Err(e) => {
            log::info!("No usable {CONFIG_PATH} ({e}), using defaults");
            GameConfig::default()
        }
    };

    let engine_config = EngineConfig {
        title: "Tower Gardens".to_string(),
        fixed_timestep: Some(1.0 / 60.0),
        max_frames: 600,
    };

    let mut types = ComponentTypes::new();
    components::register_game_components(&mut types);

    let mut engine = Engine::with_types(engine_config, types);
    let mut game = TowerGardens::demo(game_config);
    engine.run(&mut game)?;
    Ok(())
}
