//! # Terra Engine
//!
//! Headless driver for the Terra tile world.
//!
//! Loads `terra.toml` (writing the defaults on first run), starts or resumes
//! a world, walks the focus for a fixed number of ticks while chunks stream
//! around it, then saves.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

mod config;
mod driver;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::EngineConfig;

/// Main entry point.
fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("terra=info".parse()?))
        .init();

    info!("Terra starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config::CONFIG_FILE.to_string());
    let mut config = EngineConfig::load_or_create(path);
    config.validate();

    let summary = driver::run(&config)?;
    info!(
        "Seed {} saved at focus ({:.1}, {:.1}); {} chunks streamed, {} ticks blocked",
        summary.seed,
        summary.focus.x,
        summary.focus.y,
        summary.stats.chunks_loaded,
        summary.blocked_ticks
    );

    info!("Terra shutdown complete");
    Ok(())
}
