//! Coordinate types for world, chunk, and local positions.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Width and height of a chunk in tiles.
pub const CHUNK_SIZE: u32 = 32;

/// Number of tiles in one chunk.
pub const CHUNK_AREA: usize = (CHUNK_SIZE * CHUNK_SIZE) as usize;

/// World coordinate in tiles (global position).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldCoord {
    /// X coordinate in world space
    pub x: i64,
    /// Y coordinate in world space
    pub y: i64,
}

impl WorldCoord {
    /// Creates a new world coordinate.
    #[must_use]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Returns the tile containing a continuous world position.
    #[must_use]
    pub fn from_position(position: Vec2) -> Self {
        Self {
            x: position.x.floor() as i64,
            y: position.y.floor() as i64,
        }
    }

    /// Converts to the chunk coordinate owning this tile.
    ///
    /// Uses floor division, so `-1` maps to chunk `-1` rather than `0`.
    /// Every tile has exactly one owning chunk.
    #[must_use]
    pub const fn to_chunk_coord(self) -> ChunkCoord {
        let size = CHUNK_SIZE as i64;
        ChunkCoord {
            x: self.x.div_euclid(size),
            y: self.y.div_euclid(size),
        }
    }

    /// Converts to local coordinate within the owning chunk.
    #[must_use]
    pub const fn to_local_coord(self) -> LocalCoord {
        let size = CHUNK_SIZE as i64;
        LocalCoord {
            x: self.x.rem_euclid(size) as u16,
            y: self.y.rem_euclid(size) as u16,
        }
    }

    /// Returns the coordinate offset by `(dx, dy)` tiles.
    #[must_use]
    pub const fn offset(self, dx: i64, dy: i64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Euclidean distance between two tiles.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        dx.hypot(dy)
    }

    /// Centre of the tile in continuous world space.
    #[must_use]
    pub fn center(self) -> Vec2 {
        Vec2::new(self.x as f32 + 0.5, self.y as f32 + 0.5)
    }
}

/// Chunk coordinate (identifies a chunk in the world grid).
///
/// Same width as [`WorldCoord`], so the whole tile range maps to chunks
/// without wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkCoord {
    /// X coordinate in chunk space
    pub x: i64,
    /// Y coordinate in chunk space
    pub y: i64,
}

impl ChunkCoord {
    /// Creates a new chunk coordinate.
    #[must_use]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Returns the chunk containing a continuous world position.
    #[must_use]
    pub fn from_position(position: Vec2) -> Self {
        WorldCoord::from_position(position).to_chunk_coord()
    }

    /// Converts to world coordinate (lowest corner of the chunk).
    ///
    /// Saturates for chunks outside the range reachable from a tile.
    #[must_use]
    pub const fn to_world_coord(self) -> WorldCoord {
        let size = CHUNK_SIZE as i64;
        WorldCoord {
            x: self.x.saturating_mul(size),
            y: self.y.saturating_mul(size),
        }
    }

    /// Chebyshev distance (max of per-axis deltas) in chunks.
    #[must_use]
    pub const fn chebyshev_distance(self, other: Self) -> u64 {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        if dx > dy {
            dx
        } else {
            dy
        }
    }

    /// Iterates every chunk in the square window of `radius` around `self`.
    ///
    /// Rows are visited bottom to top, columns left to right. Coordinates
    /// saturate at the ends of the `i64` range.
    pub fn square(self, radius: u32) -> impl Iterator<Item = ChunkCoord> {
        let r = i64::from(radius);
        (-r..=r).flat_map(move |dy| {
            (-r..=r).map(move |dx| {
                Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
            })
        })
    }
}

/// Local coordinate within a chunk (0 to CHUNK_SIZE-1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalCoord {
    /// X coordinate within chunk
    pub x: u16,
    /// Y coordinate within chunk
    pub y: u16,
}

impl LocalCoord {
    /// Creates a new local coordinate.
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Converts signed local offsets, returning `None` outside the chunk.
    #[must_use]
    pub fn checked(x: i32, y: i32) -> Option<Self> {
        let size = CHUNK_SIZE as i32;
        if (0..size).contains(&x) && (0..size).contains(&y) {
            Some(Self::new(x as u16, y as u16))
        } else {
            None
        }
    }

    /// Converts to linear index for array access.
    #[must_use]
    pub const fn to_index(self) -> usize {
        (self.y as usize) * (CHUNK_SIZE as usize) + (self.x as usize)
    }

    /// Creates from linear index.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        let size = CHUNK_SIZE as usize;
        Self {
            x: (index % size) as u16,
            y: (index / size) as u16,
        }
    }
}
