//! # Terra World
//!
//! Procedural tile world for Terra.
//!
//! This crate handles:
//! - Deterministic biome classification from a seed
//! - Chunk generation and house placement
//! - Chunk streaming around a moving focus with pooled buffers
//! - Walkability queries
//! - Save state and session bootstrap

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod chunk;
pub mod config;
pub mod generation;
pub mod listener;
pub mod persistence;
pub mod placement;
pub mod pool;
pub mod session;
pub mod streaming;
pub mod walkability;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::chunk::*;
    pub use crate::config::*;
    pub use crate::generation::*;
    pub use crate::listener::*;
    pub use crate::persistence::*;
    pub use crate::placement::*;
    pub use crate::pool::*;
    pub use crate::session::*;
    pub use crate::streaming::*;
    pub use crate::walkability::*;
}

pub use prelude::*;
