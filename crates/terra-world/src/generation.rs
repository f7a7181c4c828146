//! Procedural terrain generation.
//!
//! The biome of a tile is a pure function of the world seed and the tile
//! coordinate: two fractal value-noise fields (elevation and moisture) are
//! sampled and thresholded. Both read the same seeded `noise::Value` source at
//! different offsets. No state is shared between samples, so chunks can be
//! generated in any order and always agree at their borders.

use noise::{NoiseFn, Value};
use serde::{Deserialize, Serialize};
use terra_common::WorldCoord;

use crate::config::{NoiseConfig, WorldConfig};

/// Elevation below this is water.
pub const WATER_LEVEL: f64 = 0.35;

/// Elevation above this may be snow.
pub const SNOW_LINE: f64 = 0.65;

/// Moisture below this turns high ground into snow.
pub const SNOW_MAX_MOISTURE: f64 = 0.4;

/// Offset between the elevation and moisture seeds.
const MOISTURE_SEED_OFFSET: i64 = 1000;

/// Sample-space offset per unit of seed.
const SEED_SPREAD: i64 = 1000;

/// Terrain classification of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BiomeType {
    /// Lakes and seas, never walkable.
    Water,
    /// Open land.
    Grass,
    /// Dry high ground.
    Snow,
}

impl BiomeType {
    /// Returns whether movement is allowed on this biome.
    #[must_use]
    pub const fn is_walkable(self) -> bool {
        !matches!(self, Self::Water)
    }

    /// Get all biomes.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Water, Self::Grass, Self::Snow]
    }
}

/// One fractal scalar field: octaves of value noise over a seeded offset.
#[derive(Debug, Clone, Copy)]
pub struct FractalField {
    /// Base noise, shared by every field of a world
    source: Value,
    /// Added to both coordinates before scaling
    offset: i64,
    /// Base frequency
    scale: f64,
    /// Octave settings
    noise: NoiseConfig,
}

impl FractalField {
    /// Creates a field whose sample space is shifted by `noise_seed * 1000`.
    #[must_use]
    pub fn new(source: Value, noise_seed: i64, scale: f64, noise: NoiseConfig) -> Self {
        Self {
            source,
            offset: noise_seed * SEED_SPREAD,
            scale,
            noise,
        }
    }

    /// Samples the field at a tile, normalized to `[0, 1]`.
    #[must_use]
    pub fn sample(&self, x: i64, y: i64) -> f64 {
        let base_x = x as f64 + self.offset as f64;
        let base_y = y as f64 + self.offset as f64;

        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut max_value = 0.0;

        for _ in 0..self.noise.octaves {
            let sample_x = base_x * self.scale * frequency;
            let sample_y = base_y * self.scale * frequency;
            // Value noise is in [-1, 1]
            let value = (self.source.get([sample_x, sample_y]) + 1.0) * 0.5;
            total += value.clamp(0.0, 1.0) * amplitude;
            max_value += amplitude;
            amplitude *= self.noise.persistence;
            frequency *= self.noise.lacunarity;
        }

        total / max_value
    }
}

/// Deterministic mapping from tile coordinate to biome.
#[derive(Debug, Clone, Copy)]
pub struct BiomeField {
    /// World seed
    seed: i32,
    /// Low-frequency elevation
    elevation: FractalField,
    /// Moisture, decorrelated from elevation by its seed offset
    moisture: FractalField,
}

impl BiomeField {
    /// Creates a field with default noise parameters.
    #[must_use]
    pub fn new(seed: i32) -> Self {
        Self::with_config(seed, &WorldConfig::default())
    }

    /// Creates a field using the noise settings of `config`.
    #[must_use]
    pub fn with_config(seed: i32, config: &WorldConfig) -> Self {
        let source = Value::new(seed as u32);
        let seed_wide = i64::from(seed);
        Self {
            seed,
            elevation: FractalField::new(source, seed_wide, config.elevation_scale, config.noise),
            moisture: FractalField::new(
                source,
                seed_wide + MOISTURE_SEED_OFFSET,
                config.moisture_scale,
                config.noise,
            ),
        }
    }

    /// Returns the world seed.
    #[must_use]
    pub const fn seed(&self) -> i32 {
        self.seed
    }

    /// Elevation at a tile, in `[0, 1]`.
    #[must_use]
    pub fn elevation(&self, x: i64, y: i64) -> f64 {
        self.elevation.sample(x, y)
    }

    /// Moisture at a tile, in `[0, 1]`.
    #[must_use]
    pub fn moisture(&self, x: i64, y: i64) -> f64 {
        self.moisture.sample(x, y)
    }

    /// Classifies a tile.
    #[must_use]
    pub fn classify(&self, x: i64, y: i64) -> BiomeType {
        let elevation = self.elevation(x, y);
        if elevation < WATER_LEVEL {
            return BiomeType::Water;
        }
        if elevation > SNOW_LINE && self.moisture(x, y) < SNOW_MAX_MOISTURE {
            return BiomeType::Snow;
        }
        BiomeType::Grass
    }

    /// Classifies the tile at `coord`.
    #[must_use]
    pub fn classify_coord(&self, coord: WorldCoord) -> BiomeType {
        self.classify(coord.x, coord.y)
    }

    /// Returns whether the tile at `coord` is walkable.
    #[must_use]
    pub fn is_walkable(&self, coord: WorldCoord) -> bool {
        self.classify_coord(coord).is_walkable()
    }
}

/// Classifies a tile with default noise parameters.
#[must_use]
pub fn classify(seed: i32, x: i64, y: i64) -> BiomeType {
    BiomeField::new(seed).classify(x, y)
}
