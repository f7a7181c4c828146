//! Point walkability queries over the loaded chunks.

use glam::Vec2;
use terra_common::WorldCoord;

use crate::streaming::ActiveChunks;

/// Read-only view answering "can the focus stand here?".
///
/// Tiles outside the loaded window answer `true`: without terrain data there
/// is nothing to forbid movement.
#[derive(Debug, Clone, Copy)]
pub struct WalkabilityIndex<'a> {
    /// Loaded chunks
    chunks: &'a ActiveChunks,
}

impl<'a> WalkabilityIndex<'a> {
    /// Creates an index over `chunks`.
    #[must_use]
    pub const fn new(chunks: &'a ActiveChunks) -> Self {
        Self { chunks }
    }

    /// Returns whether the tile is walkable.
    #[must_use]
    pub fn is_walkable(&self, coord: WorldCoord) -> bool {
        let Some(chunk) = self.chunks.get(&coord.to_chunk_coord()) else {
            return true;
        };
        let origin = chunk.world_origin();
        chunk.is_walkable_at((coord.x - origin.x) as i32, (coord.y - origin.y) as i32)
    }

    /// Returns whether the tile under a continuous position is walkable.
    #[must_use]
    pub fn is_walkable_position(&self, position: Vec2) -> bool {
        self.is_walkable(WorldCoord::from_position(position))
    }
}
