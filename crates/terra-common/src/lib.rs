//! # Terra Common
//!
//! Common types shared by the Terra world crates:
//! - Coordinate types (world, chunk, local) and the chunk size constant
//! - Structure identifiers
//! - Version information for save schemas
//! - Common error types

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod coords;
pub mod error;
pub mod ids;
pub mod version;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::coords::*;
    pub use crate::error::*;
    pub use crate::ids::*;
    pub use crate::version::*;
}

pub use prelude::*;
