//! Error types for Terra.

use thiserror::Error;

/// Top-level error type for world operations.
#[derive(Debug, Error)]
pub enum WorldError {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Save/load errors
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

/// Configuration values rejected at construction time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Unload radius inside the load radius would thrash chunks at the edge
    #[error("unload distance {unload} must be >= view distance {view}")]
    UnloadBelowView {
        /// Configured view distance
        view: u32,
        /// Configured unload distance
        unload: u32,
    },

    /// Noise needs at least one octave
    #[error("noise octave count must be at least 1")]
    ZeroOctaves,

    /// Noise scale, persistence or lacunarity is not a positive finite number
    #[error("{name} must be positive and finite, got {value}")]
    NonPositiveScale {
        /// Parameter name
        name: &'static str,
        /// Rejected value
        value: f64,
    },

    /// House density outside `[0, 1]`
    #[error("house density must be within [0, 1], got {0}")]
    DensityOutOfRange(f64),

    /// Minimum spacing below zero
    #[error("minimum house distance must not be negative, got {0}")]
    NegativeMinDistance(f64),

    /// Placement needs at least one attempt per candidate
    #[error("max placement attempts must be at least 1")]
    ZeroAttempts,
}

/// Save data errors.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding or decoding failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Schema version mismatch
    #[error("Schema version mismatch: expected {expected}, got {actual}")]
    VersionMismatch {
        /// Expected version
        expected: String,
        /// Actual version found
        actual: String,
    },
}

/// Result type alias for world operations.
pub type WorldResult<T> = Result<T, WorldError>;
