//! Engine configuration.
//!
//! Holds world generation settings plus the parameters of the headless walk.
//! Configuration lives in a TOML file that is created with defaults on the
//! first run.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use terra_world::WorldConfig;
use tracing::{info, warn};

/// Configuration file name.
pub const CONFIG_FILE: &str = "terra.toml";

/// Default save file name.
const SAVE_FILE: &str = "terra_save.json";

/// Engine configuration parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === World Settings ===
    /// World seed (None = random)
    pub world_seed: Option<i32>,
    /// Resume from the save file when present
    pub load_saved: bool,
    /// Save file location
    pub save_path: PathBuf,

    // === Walk Settings ===
    /// Number of ticks to run
    pub ticks: u32,
    /// Simulated seconds per tick
    pub tick_seconds: f32,
    /// Focus speed in tiles per second
    pub move_speed: f32,
    /// Initial walk direction
    pub heading: Vec2,

    // === Generation ===
    /// Streaming, noise, and placement parameters
    pub world: WorldConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            // World
            world_seed: None,
            load_saved: true,
            save_path: PathBuf::from(SAVE_FILE),

            // Walk
            ticks: 600,
            tick_seconds: 1.0 / 60.0,
            move_speed: 48.0,
            heading: Vec2::X,

            world: WorldConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a specific path.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("Config file not found, using defaults");
                return Self::default();
            },
            Err(e) => {
                warn!("Failed to read config file {}: {e}", path.display());
                return Self::default();
            },
        };

        toml::from_str(&contents).map_or_else(
            |e| {
                warn!("Failed to parse config file {}: {e}", path.display());
                Self::default()
            },
            |config| {
                info!("Loaded config from {}", path.display());
                config
            },
        )
    }

    /// Loads configuration, writing the defaults out first if `path` is
    /// missing.
    ///
    /// A failed write is logged and the defaults are still returned.
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if path.exists() {
            return Self::load_from(path);
        }

        let config = Self::default();
        if let Err(e) = config.save_to(path) {
            warn!("Failed to write default config to {}: {e}", path.display());
        }
        config
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, contents)?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate and clamp configuration values to sensible ranges.
    pub fn validate(&mut self) {
        // Walk
        self.ticks = self.ticks.min(1_000_000);
        self.tick_seconds = self.tick_seconds.clamp(0.001, 1.0);
        self.move_speed = self.move_speed.clamp(0.0, 1024.0);
        self.heading = self.heading.normalize_or_zero();
        if self.heading == Vec2::ZERO {
            self.heading = Vec2::X;
        }

        // Streaming radii
        self.world.view_distance = self.world.view_distance.clamp(1, 16);
        self.world.unload_distance = self
            .world
            .unload_distance
            .clamp(self.world.view_distance, 32);
    }
}
