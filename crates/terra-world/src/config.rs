//! World configuration.
//!
//! All values are fixed once a streamer is constructed; there is no runtime
//! reconfiguration.

use serde::{Deserialize, Serialize};
use terra_common::ConfigError;

/// Default load radius in chunks.
pub const DEFAULT_VIEW_DISTANCE: u32 = 3;

/// Default unload radius in chunks (must be >= view distance).
pub const DEFAULT_UNLOAD_DISTANCE: u32 = 5;

/// Fractal noise parameters for one scalar field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    /// Number of octaves summed
    pub octaves: u32,
    /// Amplitude multiplier per octave
    pub persistence: f64,
    /// Frequency multiplier per octave
    pub lacunarity: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
        }
    }
}

/// Terrain, placement and streaming parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Chunks within this Chebyshev distance of the focus are loaded
    pub view_distance: u32,
    /// Chunks beyond this Chebyshev distance of the focus are evicted
    pub unload_distance: u32,
    /// Base frequency of the elevation field
    pub elevation_scale: f64,
    /// Base frequency of the moisture field
    pub moisture_scale: f64,
    /// Octave settings shared by both fields
    pub noise: NoiseConfig,
    /// Upper bound on houses per chunk as a fraction of its tiles
    pub house_density: f64,
    /// Minimum Euclidean spacing between houses of one chunk
    pub min_house_distance: f64,
    /// Rejection-sampling draws per house candidate
    pub max_placement_attempts: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            view_distance: DEFAULT_VIEW_DISTANCE,
            unload_distance: DEFAULT_UNLOAD_DISTANCE,
            elevation_scale: 0.05,
            moisture_scale: 0.08,
            noise: NoiseConfig::default(),
            house_density: 0.05,
            min_house_distance: 8.0,
            max_placement_attempts: 10,
        }
    }
}

impl WorldConfig {
    /// Checks every parameter, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.unload_distance < self.view_distance {
            return Err(ConfigError::UnloadBelowView {
                view: self.view_distance,
                unload: self.unload_distance,
            });
        }
        if self.noise.octaves == 0 {
            return Err(ConfigError::ZeroOctaves);
        }
        for (name, value) in [
            ("elevation_scale", self.elevation_scale),
            ("moisture_scale", self.moisture_scale),
            ("persistence", self.noise.persistence),
            ("lacunarity", self.noise.lacunarity),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositiveScale { name, value });
            }
        }
        if !(0.0..=1.0).contains(&self.house_density) {
            return Err(ConfigError::DensityOutOfRange(self.house_density));
        }
        if self.min_house_distance.is_nan() || self.min_house_distance < 0.0 {
            return Err(ConfigError::NegativeMinDistance(self.min_house_distance));
        }
        if self.max_placement_attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }
        Ok(())
    }
}
