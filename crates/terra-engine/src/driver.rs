//! Headless focus walk.
//!
//! Moves the focus through the world tick by tick, sliding along
//! unwalkable terrain the way a top-down player would.

use anyhow::Result;
use glam::Vec2;
use terra_world::{JsonFileStore, SessionOptions, StreamingStats, WorldSession};
use tracing::{debug, info};

use crate::config::EngineConfig;

/// How a single step resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Full step taken
    Moved,
    /// Only the horizontal component was walkable
    SlidX,
    /// Only the vertical component was walkable
    SlidY,
    /// Nothing was walkable, position unchanged
    Blocked,
}

/// Moves from `start` toward `desired`, sliding along blocked axes.
///
/// Tries the full step, then horizontal only, then vertical only.
pub fn slide_step(
    start: Vec2,
    desired: Vec2,
    is_walkable: impl Fn(Vec2) -> bool,
) -> (Vec2, StepOutcome) {
    if is_walkable(desired) {
        return (desired, StepOutcome::Moved);
    }

    let horizontal = Vec2::new(desired.x, start.y);
    if horizontal != start && is_walkable(horizontal) {
        return (horizontal, StepOutcome::SlidX);
    }

    let vertical = Vec2::new(start.x, desired.y);
    if vertical != start && is_walkable(vertical) {
        return (vertical, StepOutcome::SlidY);
    }

    (start, StepOutcome::Blocked)
}

/// Focus that walks along a heading.
#[derive(Debug, Clone, Copy)]
pub struct FocusWalker {
    /// Current position
    position: Vec2,
    /// Unit walk direction
    heading: Vec2,
    /// Tiles per second
    speed: f32,
}

impl FocusWalker {
    /// Creates a walker at `position`.
    #[must_use]
    pub fn new(position: Vec2, heading: Vec2, speed: f32) -> Self {
        Self {
            position,
            heading: heading.normalize_or_zero(),
            speed,
        }
    }

    /// Advances by `dt` seconds.
    ///
    /// When fully blocked the walker stays put and turns a quarter to the
    /// left for the next step.
    pub fn step(&mut self, dt: f32, is_walkable: impl Fn(Vec2) -> bool) -> StepOutcome {
        let desired = self.position + self.heading * self.speed * dt;
        let (position, outcome) = slide_step(self.position, desired, is_walkable);
        self.position = position;
        if outcome == StepOutcome::Blocked {
            self.heading = self.heading.perp();
        }
        outcome
    }

    /// Returns the current position.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Returns the walk direction.
    #[must_use]
    pub const fn heading(&self) -> Vec2 {
        self.heading
    }
}

/// What a run did.
#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    /// World seed used
    pub seed: i32,
    /// Final focus position
    pub focus: Vec2,
    /// Ticks that ended fully blocked
    pub blocked_ticks: u32,
    /// Streaming counters at the end of the run
    pub stats: StreamingStats,
}

/// Starts or resumes a world, walks the focus, and saves.
pub fn run(config: &EngineConfig) -> Result<RunSummary> {
    let store = JsonFileStore::new(&config.save_path);
    let options = SessionOptions {
        world_seed: config.world_seed,
        load_saved: config.load_saved,
    };
    let mut session = WorldSession::start(config.world.clone(), store, options)?;

    let mut walker = FocusWalker::new(session.focus(), config.heading, config.move_speed);
    let mut blocked_ticks = 0;
    for tick in 0..config.ticks {
        let outcome = walker.step(config.tick_seconds, |p| session.is_walkable(p));
        if outcome == StepOutcome::Blocked {
            blocked_ticks += 1;
        }
        if session.tick(walker.position()) {
            debug!(
                "Tick {}: focus ({:.1}, {:.1}), {} chunks loaded",
                tick,
                walker.position().x,
                walker.position().y,
                session.streamer().loaded_count()
            );
        }
    }

    let stats = session.streamer().stats();
    info!(
        "Walk finished at ({:.1}, {:.1}) after {} ticks ({} blocked)",
        walker.position().x,
        walker.position().y,
        config.ticks,
        blocked_ticks
    );
    info!(
        "Streaming: {} transitions, {} loaded, {} evicted, {} allocations, {} pool reuses, {} houses",
        stats.transitions,
        stats.chunks_loaded,
        stats.chunks_evicted,
        stats.allocations,
        stats.pool_reuses,
        stats.structures_placed
    );

    session.save()?;

    Ok(RunSummary {
        seed: session.seed(),
        focus: session.focus(),
        blocked_ticks,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slide_free_movement() {
        let (p, outcome) = slide_step(Vec2::ZERO, Vec2::new(1.0, 1.0), |_| true);
        assert_eq!(p, Vec2::new(1.0, 1.0));
        assert_eq!(outcome, StepOutcome::Moved);
    }

    #[test]
    fn test_slide_along_wall() {
        // Wall at x >= 5
        let walkable = |p: Vec2| p.x < 5.0;
        let (p, outcome) = slide_step(Vec2::new(4.5, 0.0), Vec2::new(5.5, 1.0), walkable);
        assert_eq!(p, Vec2::new(4.5, 1.0));
        assert_eq!(outcome, StepOutcome::SlidY);

        // Floor at y >= 5
        let walkable = |p: Vec2| p.y < 5.0;
        let (p, outcome) = slide_step(Vec2::new(0.0, 4.5), Vec2::new(1.0, 5.5), walkable);
        assert_eq!(p, Vec2::new(1.0, 4.5));
        assert_eq!(outcome, StepOutcome::SlidX);
    }

    #[test]
    fn test_blocked_stops_and_turns() {
        let mut walker = FocusWalker::new(Vec2::ZERO, Vec2::X, 10.0);
        let outcome = walker.step(0.1, |p| p == Vec2::ZERO);
        assert_eq!(outcome, StepOutcome::Blocked);
        assert_eq!(walker.position(), Vec2::ZERO);
        assert_eq!(walker.heading(), Vec2::Y);
    }

    #[test]
    fn test_walker_moves_along_heading() {
        let mut walker = FocusWalker::new(Vec2::ZERO, Vec2::new(2.0, 0.0), 10.0);
        walker.step(0.5, |_| true);
        assert_eq!(walker.position(), Vec2::new(5.0, 0.0));
    }

    #[test]
    fn test_run_saves_and_resumes() {
        let dir = tempfile::tempdir().expect("tempdir failed");
        let mut config = EngineConfig {
            world_seed: Some(12345),
            save_path: dir.path().join("save.json"),
            ticks: 120,
            ..Default::default()
        };
        config.validate();

        let first = run(&config).expect("first run failed");
        assert_eq!(first.seed, 12345);
        assert!(first.stats.transitions >= 1);
        assert!(config.save_path.exists());

        config.world_seed = Some(1);
        let second = run(&config).expect("second run failed");
        assert_eq!(second.seed, 12345);
    }
}
