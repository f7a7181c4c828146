//! Free list of reusable chunk buffers.

use terra_common::ChunkCoord;

use crate::chunk::Chunk;

/// Recycles evicted chunks so their tile buffers are not reallocated.
#[derive(Debug, Default)]
pub struct ChunkPool {
    /// Cleared chunks ready for reuse
    free: Vec<Chunk>,
    /// Chunks constructed because the pool was empty
    allocations: u64,
    /// Chunks handed out from the free list
    reuses: u64,
}

impl ChunkPool {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes a chunk initialized for `coord`, reusing a free buffer if any.
    pub fn acquire(&mut self, coord: ChunkCoord) -> Chunk {
        match self.free.pop() {
            Some(mut chunk) => {
                self.reuses += 1;
                chunk.initialize(coord);
                chunk
            },
            None => {
                self.allocations += 1;
                Chunk::new(coord)
            },
        }
    }

    /// Clears `chunk` and returns it to the free list.
    pub fn release(&mut self, mut chunk: Chunk) {
        chunk.clear();
        self.free.push(chunk);
    }

    /// Number of chunks waiting for reuse.
    #[must_use]
    pub fn available(&self) -> usize {
        self.free.len()
    }

    /// Iterates the pooled chunks.
    pub fn iter(&self) -> impl Iterator<Item = &Chunk> {
        self.free.iter()
    }

    /// Total chunks ever constructed by this pool.
    #[must_use]
    pub const fn allocations(&self) -> u64 {
        self.allocations
    }

    /// Total chunks handed out from the free list.
    #[must_use]
    pub const fn reuses(&self) -> u64 {
        self.reuses
    }
}
