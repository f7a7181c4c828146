//! World streaming and chunk management.
//!
//! The streamer keeps a square window of chunks around the focus loaded.
//! Work only happens when the focus crosses into a different chunk; within a
//! chunk, focus updates are free. Loading uses `view_distance`, eviction uses
//! the larger `unload_distance`, so walking back and forth over a chunk
//! border does not reload anything.

use ahash::AHashMap;
use glam::Vec2;
use terra_common::{ChunkCoord, WorldResult};
use tracing::{debug, info};

use crate::chunk::Chunk;
use crate::config::WorldConfig;
use crate::generation::BiomeField;
use crate::listener::ChunkListener;
use crate::placement::StructurePlacer;
use crate::pool::ChunkPool;
use crate::walkability::WalkabilityIndex;

/// Loaded chunks keyed by coordinate.
pub type ActiveChunks = AHashMap<ChunkCoord, Chunk>;

/// Running totals of streaming work.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamingStats {
    /// Focus updates that changed the focus chunk
    pub transitions: u64,
    /// Chunks generated and inserted
    pub chunks_loaded: u64,
    /// Chunks cleared and returned to the pool
    pub chunks_evicted: u64,
    /// Loads served from the pool
    pub pool_reuses: u64,
    /// Loads that had to construct a chunk
    pub allocations: u64,
    /// Structures placed on loaded chunks
    pub structures_placed: u64,
}

/// Owns the loaded chunks and drives generation around a moving focus.
#[derive(Debug)]
pub struct ChunkStreamer {
    /// Configuration
    config: WorldConfig,
    /// Terrain source
    field: BiomeField,
    /// House placement
    placer: StructurePlacer,
    /// Loaded chunks
    chunks: ActiveChunks,
    /// Evicted buffers
    pool: ChunkPool,
    /// Focus chunk of the last transition, `None` before the first update
    last_focus_chunk: Option<ChunkCoord>,
    /// Work counters (pool counters are read from the pool)
    stats: StreamingStats,
}

impl ChunkStreamer {
    /// Creates a streamer for `seed`, rejecting invalid configurations.
    pub fn new(seed: i32, config: WorldConfig) -> WorldResult<Self> {
        config.validate()?;
        info!(
            "Creating chunk streamer with seed={}, view_distance={}, unload_distance={}",
            seed, config.view_distance, config.unload_distance
        );

        Ok(Self {
            field: BiomeField::with_config(seed, &config),
            placer: StructurePlacer::new(seed, &config),
            config,
            chunks: ActiveChunks::default(),
            pool: ChunkPool::new(),
            last_focus_chunk: None,
            stats: StreamingStats::default(),
        })
    }

    /// Updates streaming for a focus position.
    ///
    /// Returns `true` when the focus entered a new chunk and the load and
    /// evict passes ran.
    pub fn on_focus_moved(&mut self, focus: Vec2, listener: &mut dyn ChunkListener) -> bool {
        self.update_focus_chunk(ChunkCoord::from_position(focus), listener)
    }

    /// Updates streaming for a focus chunk.
    pub fn update_focus_chunk(
        &mut self,
        center: ChunkCoord,
        listener: &mut dyn ChunkListener,
    ) -> bool {
        if self.last_focus_chunk == Some(center) {
            return false;
        }

        let loaded = self.load_window(center, listener);
        let evicted = self.evict_distant(center, listener);
        self.last_focus_chunk = Some(center);
        self.stats.transitions += 1;

        debug!(
            "Focus entered chunk ({}, {}): loaded {}, evicted {}, active {}",
            center.x,
            center.y,
            loaded,
            evicted,
            self.chunks.len()
        );
        true
    }

    /// Loads every missing chunk within `view_distance` of `center`.
    fn load_window(&mut self, center: ChunkCoord, listener: &mut dyn ChunkListener) -> usize {
        let mut loaded = 0;
        for coord in center.square(self.config.view_distance) {
            if self.chunks.contains_key(&coord) {
                continue;
            }

            let mut chunk = self.pool.acquire(coord);
            chunk.generate(&self.field);
            let placed = self.placer.populate(&mut chunk);
            for structure in chunk.structures() {
                listener.on_structure_placed(structure);
            }

            self.chunks.insert(coord, chunk);
            self.stats.chunks_loaded += 1;
            self.stats.structures_placed += placed as u64;
            loaded += 1;
        }
        loaded
    }

    /// Evicts every chunk farther than `unload_distance` from `center`.
    fn evict_distant(&mut self, center: ChunkCoord, listener: &mut dyn ChunkListener) -> usize {
        let threshold = u64::from(self.config.unload_distance);
        let to_evict: Vec<ChunkCoord> = self
            .chunks
            .keys()
            .filter(|coord| coord.chebyshev_distance(center) > threshold)
            .copied()
            .collect();

        for coord in &to_evict {
            if let Some(chunk) = self.chunks.remove(coord) {
                listener.on_chunk_cleared(*coord, chunk.structures());
                self.pool.release(chunk);
                self.stats.chunks_evicted += 1;
            }
        }
        to_evict.len()
    }

    /// Returns whether the tile under `position` is walkable.
    #[must_use]
    pub fn is_walkable(&self, position: Vec2) -> bool {
        self.walkability().is_walkable_position(position)
    }

    /// Returns a walkability view over the loaded chunks.
    #[must_use]
    pub fn walkability(&self) -> WalkabilityIndex<'_> {
        WalkabilityIndex::new(&self.chunks)
    }

    /// Returns the loaded chunks.
    #[must_use]
    pub fn active_chunks(&self) -> &ActiveChunks {
        &self.chunks
    }

    /// Returns a loaded chunk.
    #[must_use]
    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    /// Checks if a chunk is loaded.
    #[must_use]
    pub fn is_loaded(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    /// Returns the number of loaded chunks.
    #[must_use]
    pub fn loaded_count(&self) -> usize {
        self.chunks.len()
    }

    /// Returns the reuse pool.
    #[must_use]
    pub const fn pool(&self) -> &ChunkPool {
        &self.pool
    }

    /// Returns the focus chunk of the last transition.
    #[must_use]
    pub const fn focus_chunk(&self) -> Option<ChunkCoord> {
        self.last_focus_chunk
    }

    /// Returns the running work counters.
    #[must_use]
    pub fn stats(&self) -> StreamingStats {
        StreamingStats {
            pool_reuses: self.pool.reuses(),
            allocations: self.pool.allocations(),
            ..self.stats
        }
    }

    /// Returns the world seed.
    #[must_use]
    pub const fn seed(&self) -> i32 {
        self.field.seed()
    }

    /// Returns the biome field.
    #[must_use]
    pub const fn field(&self) -> &BiomeField {
        &self.field
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &WorldConfig {
        &self.config
    }
}
