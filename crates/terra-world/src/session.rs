//! Session bootstrap: config, save store, and streamer wired together.

use glam::Vec2;
use terra_common::WorldResult;
use tracing::{info, warn};

use crate::config::WorldConfig;
use crate::listener::{ChunkListener, NullListener};
use crate::persistence::{SaveData, SaveStore};
use crate::streaming::ChunkStreamer;

/// Upper bound (exclusive) for randomly chosen world seeds.
pub const RANDOM_SEED_LIMIT: i32 = 1_000_000;

/// How a session picks its seed and starting focus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionOptions {
    /// Seed for a new world, random when `None`
    pub world_seed: Option<i32>,
    /// Resume from the store when it holds a save
    pub load_saved: bool,
}

/// A running world: streamer, focus, save store, and listener.
#[derive(Debug)]
pub struct WorldSession<S: SaveStore, L: ChunkListener = NullListener> {
    /// Chunk streaming
    streamer: ChunkStreamer,
    /// Last focus passed to `tick`
    focus: Vec2,
    /// Save storage
    store: S,
    /// Event sink
    listener: L,
}

impl<S: SaveStore> WorldSession<S, NullListener> {
    /// Starts a session that discards listener events.
    pub fn start(config: WorldConfig, store: S, options: SessionOptions) -> WorldResult<Self> {
        Self::start_with_listener(config, store, NullListener, options)
    }
}

impl<S: SaveStore, L: ChunkListener> WorldSession<S, L> {
    /// Starts a session and runs the initial focus update.
    ///
    /// A save that cannot be read is logged and ignored; the session then
    /// starts a new world as if there were no save.
    pub fn start_with_listener(
        config: WorldConfig,
        store: S,
        mut listener: L,
        options: SessionOptions,
    ) -> WorldResult<Self> {
        let saved = if options.load_saved {
            match store.load() {
                Ok(saved) => saved,
                Err(e) => {
                    warn!("Ignoring unreadable save: {}", e);
                    None
                },
            }
        } else {
            None
        };

        let (seed, focus) = match saved {
            Some(data) => {
                info!("Resuming world with seed {}", data.world_seed);
                (data.world_seed, data.focus())
            },
            None => {
                let seed = options
                    .world_seed
                    .unwrap_or_else(|| fastrand::i32(0..RANDOM_SEED_LIMIT));
                info!("Starting new world with seed {}", seed);
                (seed, Vec2::ZERO)
            },
        };

        let mut streamer = ChunkStreamer::new(seed, config)?;
        streamer.on_focus_moved(focus, &mut listener);

        Ok(Self {
            streamer,
            focus,
            store,
            listener,
        })
    }

    /// Moves the focus and streams chunks around it.
    ///
    /// Returns `true` when the focus entered a new chunk.
    pub fn tick(&mut self, focus: Vec2) -> bool {
        self.focus = focus;
        self.streamer.on_focus_moved(focus, &mut self.listener)
    }

    /// Writes the seed and current focus to the store.
    pub fn save(&mut self) -> WorldResult<()> {
        let data = SaveData::new(self.streamer.seed(), self.focus);
        self.store.save(&data)?;
        Ok(())
    }

    /// Replaces the world with a fresh one at the origin and saves it.
    ///
    /// Chunks of the old world are reported cleared before the new world
    /// loads.
    pub fn new_game(&mut self, seed: i32) -> WorldResult<()> {
        let mut streamer = ChunkStreamer::new(seed, self.streamer.config().clone())?;
        for (coord, chunk) in self.streamer.active_chunks() {
            self.listener.on_chunk_cleared(*coord, chunk.structures());
        }

        info!("New game with seed {}", seed);
        self.focus = Vec2::ZERO;
        streamer.on_focus_moved(self.focus, &mut self.listener);
        self.streamer = streamer;
        self.save()
    }

    /// Returns whether the tile under `position` is walkable.
    #[must_use]
    pub fn is_walkable(&self, position: Vec2) -> bool {
        self.streamer.is_walkable(position)
    }

    /// Returns the streamer.
    #[must_use]
    pub const fn streamer(&self) -> &ChunkStreamer {
        &self.streamer
    }

    /// Returns the last focus position.
    #[must_use]
    pub const fn focus(&self) -> Vec2 {
        self.focus
    }

    /// Returns the world seed.
    #[must_use]
    pub const fn seed(&self) -> i32 {
        self.streamer.seed()
    }

    /// Returns the save store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Returns the listener.
    #[must_use]
    pub const fn listener(&self) -> &L {
        &self.listener
    }

    /// Returns the listener mutably.
    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listener::WorldEvent;
    use crate::persistence::{JsonFileStore, MemoryStore};
    use terra_common::{ChunkCoord, ConfigError, WorldError};

    fn options(seed: i32) -> SessionOptions {
        SessionOptions {
            world_seed: Some(seed),
            load_saved: true,
        }
    }

    #[test]
    fn test_start_new_world() {
        let session = WorldSession::start(WorldConfig::default(), MemoryStore::new(), options(42))
            .expect("start failed");
        assert_eq!(session.seed(), 42);
        assert_eq!(session.focus(), Vec2::ZERO);
        assert_eq!(session.streamer().loaded_count(), 49);
        assert_eq!(session.streamer().focus_chunk(), Some(ChunkCoord::new(0, 0)));
    }

    #[test]
    fn test_random_seed_in_range() {
        let session = WorldSession::start(
            WorldConfig::default(),
            MemoryStore::new(),
            SessionOptions::default(),
        )
        .expect("start failed");
        assert!((0..RANDOM_SEED_LIMIT).contains(&session.seed()));
    }

    #[test]
    fn test_resume_from_store() {
        let store = MemoryStore::with_data(SaveData::new(777, Vec2::new(100.0, -40.0)));
        let session =
            WorldSession::start(WorldConfig::default(), store, options(1)).expect("start failed");
        assert_eq!(session.seed(), 777);
        assert_eq!(session.focus(), Vec2::new(100.0, -40.0));
        assert_eq!(session.streamer().focus_chunk(), Some(ChunkCoord::new(3, -2)));
    }

    #[test]
    fn test_load_saved_disabled_ignores_save() {
        let store = MemoryStore::with_data(SaveData::new(777, Vec2::new(100.0, -40.0)));
        let opts = SessionOptions {
            world_seed: Some(5),
            load_saved: false,
        };
        let session = WorldSession::start(WorldConfig::default(), store, opts).expect("start failed");
        assert_eq!(session.seed(), 5);
        assert_eq!(session.focus(), Vec2::ZERO);
    }

    #[test]
    fn test_save_then_resume_through_file() {
        let dir = tempfile::tempdir().expect("tempdir failed");
        let path = dir.path().join("save.json");

        let mut session = WorldSession::start(
            WorldConfig::default(),
            JsonFileStore::new(&path),
            options(2024),
        )
        .expect("start failed");
        session.tick(Vec2::new(70.0, 5.0));
        session.save().expect("save failed");

        let resumed = WorldSession::start(
            WorldConfig::default(),
            JsonFileStore::new(&path),
            options(1),
        )
        .expect("resume failed");
        assert_eq!(resumed.seed(), 2024);
        assert_eq!(resumed.focus(), Vec2::new(70.0, 5.0));
        assert_eq!(resumed.streamer().focus_chunk(), Some(ChunkCoord::new(2, 0)));
    }

    #[test]
    fn test_unreadable_save_starts_fresh() {
        let dir = tempfile::tempdir().expect("tempdir failed");
        let path = dir.path().join("save.json");
        std::fs::write(&path, "{").expect("write failed");

        let session =
            WorldSession::start(WorldConfig::default(), JsonFileStore::new(&path), options(9))
                .expect("start failed");
        assert_eq!(session.seed(), 9);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = WorldConfig {
            view_distance: 4,
            unload_distance: 2,
            ..Default::default()
        };
        let result = WorldSession::start(config, MemoryStore::new(), options(1));
        assert!(matches!(
            result,
            Err(WorldError::Config(ConfigError::UnloadBelowView { .. }))
        ));
    }

    #[test]
    fn test_tick_tracks_focus() {
        let mut session = WorldSession::start(WorldConfig::default(), MemoryStore::new(), options(3))
            .expect("start failed");
        assert!(!session.tick(Vec2::new(10.0, 10.0)));
        assert_eq!(session.focus(), Vec2::new(10.0, 10.0));
        assert!(session.tick(Vec2::new(40.0, 10.0)));
        assert_eq!(session.streamer().focus_chunk(), Some(ChunkCoord::new(1, 0)));
    }

    #[test]
    fn test_new_game_resets_and_saves() {
        let mut session = WorldSession::start_with_listener(
            WorldConfig::default(),
            MemoryStore::new(),
            Vec::<WorldEvent>::new(),
            options(11),
        )
        .expect("start failed");
        session.tick(Vec2::new(500.0, 500.0));
        session.listener_mut().clear();

        session.new_game(99).expect("new game failed");
        assert_eq!(session.seed(), 99);
        assert_eq!(session.focus(), Vec2::ZERO);
        assert!(session.streamer().is_loaded(ChunkCoord::new(0, 0)));

        let cleared = session
            .listener()
            .iter()
            .filter(|e| matches!(e, WorldEvent::ChunkCleared { .. }))
            .count();
        assert_eq!(cleared, 49);

        let saved = session
            .store()
            .load()
            .expect("load failed")
            .expect("save missing");
        assert_eq!(saved.world_seed, 99);
        assert_eq!(saved.focus(), Vec2::ZERO);
    }
}
