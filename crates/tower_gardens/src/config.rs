//! Game configuration loaded from `tower_gardens.toml`

use serde::{Deserialize, Serialize};
use siege_engine::config::Config;

/// Top-level game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Gameplay settings
    pub gameplay: GameplayConfig,

    /// Camera settings
    pub camera: CameraConfig,
}

/// Gameplay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameplayConfig {
    /// Goblin movement speed, world units per second
    pub goblin_speed: f32,

    /// Base damage dealt by a goblin that reaches the goal
    pub goblin_damage: f32,

    /// Seconds between goblin spawns
    pub spawn_interval: f32,

    /// Base hit points; the run is lost when they reach zero
    pub base_health: f32,
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Yaw turn rate when switching lanes, degrees per second
    pub turn_speed: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            gameplay: GameplayConfig {
                goblin_speed: 2.0,
                goblin_damage: 10.0,
                spawn_interval: 4.0,
                base_health: 100.0,
            },
            camera: CameraConfig { turn_speed: 100.0 },
        }
    }
}

impl Config for GameConfig {}
