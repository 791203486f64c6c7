//! Configuration system

pub use serde::{Deserialize, Serialize};

/// Configuration trait
///
/// Any serde-serializable struct with a `Default` can be loaded from and
/// saved to `.toml` or `.ron` files by implementing this trait.
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Top-level engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Window/application title (informational in headless runs)
    pub title: String,

    /// Fixed timestep in seconds used when no real clock drives the loop.
    /// `None` means the wall-clock frame timer is used.
    pub fixed_timestep: Option<f32>,

    /// Stop after this many frames (0 = run until the application quits)
    pub max_frames: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            title: "Siege Engine".to_string(),
            fixed_timestep: None,
            max_frames: 0,
        }
    }
}

impl Config for EngineConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_config_toml_round_trip() {
        let config = EngineConfig {
            title: "test".to_string(),
            fixed_timestep: Some(0.016),
            max_frames: 100,
        };

        let path = std::env::temp_dir().join("siege_engine_config_test.toml");
        let path = path.to_str().unwrap().to_string();
        config.save_to_file(&path).unwrap();

        let loaded = EngineConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.title, "test");
        assert_eq!(loaded.max_frames, 100);
        assert_eq!(loaded.fixed_timestep, Some(0.016));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_unsupported_format_rejected() {
        let result = EngineConfig::load_from_file("config.yaml");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }
}
