//! # Application Configuration
//!
//! TOML configuration for the joystick host. The file lives at
//! `<config dir>/rovercontroller/config.toml` and is written with defaults on first start.
//! Every key is optional; missing keys fall back to [`AppConfig::default`].
//!
//! ```toml
//! [ui]
//! fps = 30
//! fullscreen = false
//!
//! [[sticks]]
//! id = 0
//! label = "Drive"
//!
//! [sticks.mapper]
//! distance_metric = "vertical_only"
//! hat_travel = "free"
//! clamp_output = false
//! ```

use color_eyre::{eyre::eyre, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::joystick::{MapperSettings, StickId};

const CONFIG_DIR: &str = "rovercontroller";
const CONFIG_FILE: &str = "config.toml";

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub ui: UiConfig,
    pub sticks: Vec<StickConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ui: UiConfig::default(),
            sticks: vec![StickConfig::new(0, "Drive"), StickConfig::new(1, "Steer")],
        }
    }
}

/// Window and repaint settings.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    /// Target repaints per second while idle
    pub fps: u8,
    pub fullscreen: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            fps: 30,
            fullscreen: false,
        }
    }
}

impl UiConfig {
    /// Delay between requested repaints; a zero fps is treated as 1.
    pub fn repaint_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(1000 / self.fps.max(1) as u64)
    }
}

/// One on-screen joystick.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct StickConfig {
    pub id: StickId,
    pub label: String,
    pub mapper: MapperSettings,
}

impl Default for StickConfig {
    fn default() -> Self {
        Self::new(0, "Stick")
    }
}

impl StickConfig {
    pub fn new(id: i32, label: &str) -> Self {
        Self {
            id: StickId(id),
            label: label.to_string(),
            mapper: MapperSettings::default(),
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| eyre!("Failed to parse config: {}", e))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| eyre!("Failed to serialize config: {}", e))
    }

    /// Reads the config at the default location, writing defaults first if it is missing.
    pub async fn load_or_create() -> Result<Self> {
        Self::load_or_create_at(&config_path()).await
    }

    pub async fn load_or_create_at(path: &Path) -> Result<Self> {
        let exists = tokio::fs::try_exists(path)
            .await
            .map_err(|e| eyre!("Failed to check config file {}: {}", path.display(), e))?;

        if !exists {
            info!("No config at {}, writing defaults", path.display());
            let config = Self::default();
            config.save_at(path).await?;
            return Ok(config);
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;
        let config = Self::from_toml_str(&content)?;
        if config.sticks.is_empty() {
            warn!("Config at {} defines no sticks", path.display());
        }
        debug!("Loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    pub async fn save_at(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| eyre!("Failed to create config directory: {}", e))?;
        }
        tokio::fs::write(path, self.to_toml_string()?)
            .await
            .map_err(|e| eyre!("Failed to write config file {}: {}", path.display(), e))?;
        Ok(())
    }
}

fn config_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| {
        warn!("Could not determine config directory, using current directory");
        PathBuf::from(".")
    });
    path.push(CONFIG_DIR);
    path.push(CONFIG_FILE);
    path
}
