//! Chunk data structure.

use glam::Vec2;
use terra_common::{ChunkCoord, LocalCoord, StructureId, WorldCoord, CHUNK_AREA, CHUNK_SIZE};
use tracing::trace;

use crate::generation::{BiomeField, BiomeType};

/// A single generated tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRecord {
    /// Biome classification
    pub biome: BiomeType,
    /// Cached `biome.is_walkable()`
    pub walkable: bool,
    /// World position of the tile
    pub position: WorldCoord,
}

impl TileRecord {
    /// Creates a tile record, deriving walkability from the biome.
    #[must_use]
    pub const fn new(biome: BiomeType, position: WorldCoord) -> Self {
        Self {
            biome,
            walkable: biome.is_walkable(),
            position,
        }
    }
}

/// A structure placed during chunk generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructureRecord {
    /// Anchor tile
    pub position: WorldCoord,
    /// Stable identifier
    pub id: StructureId,
}

impl StructureRecord {
    /// Creates a house anchored at `position`.
    #[must_use]
    pub const fn house(position: WorldCoord) -> Self {
        Self {
            position,
            id: StructureId::house(position),
        }
    }

    /// Position a visual should be spawned at (tile centre).
    #[must_use]
    pub fn visual_position(&self) -> Vec2 {
        self.position.center()
    }
}

/// A CHUNK_SIZE x CHUNK_SIZE block of tiles plus the structures on it.
///
/// Lifecycle: `initialize` -> `generate` -> placement -> `clear`, after which
/// the buffer can be initialized again for another coordinate.
#[derive(Debug)]
pub struct Chunk {
    /// Chunk coordinate
    coord: ChunkCoord,
    /// Row-major tiles, empty until generated
    tiles: Vec<TileRecord>,
    /// Structures placed on this chunk
    structures: Vec<StructureRecord>,
    /// Whether tiles are written
    generated: bool,
    /// Whether the structure list is final
    populated: bool,
}

impl Chunk {
    /// Creates a new empty chunk.
    #[must_use]
    pub fn new(coord: ChunkCoord) -> Self {
        Self {
            coord,
            tiles: Vec::with_capacity(CHUNK_AREA),
            structures: Vec::new(),
            generated: false,
            populated: false,
        }
    }

    /// Prepares the buffer for `coord`, dropping any previous contents.
    pub fn initialize(&mut self, coord: ChunkCoord) {
        self.clear();
        self.coord = coord;
    }

    /// Returns the chunk coordinate.
    #[must_use]
    pub const fn coord(&self) -> ChunkCoord {
        self.coord
    }

    /// Returns the world coordinate of local tile (0, 0).
    #[must_use]
    pub const fn world_origin(&self) -> WorldCoord {
        self.coord.to_world_coord()
    }

    /// Returns whether the tiles have been generated.
    #[must_use]
    pub const fn is_generated(&self) -> bool {
        self.generated
    }

    /// Returns whether structure placement has run.
    #[must_use]
    pub const fn is_populated(&self) -> bool {
        self.populated
    }

    /// Fills every tile from the biome field.
    ///
    /// No-op when already generated.
    pub fn generate(&mut self, field: &BiomeField) {
        if self.generated {
            return;
        }

        let origin = self.world_origin();
        self.tiles.clear();
        for y in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                let position = origin.offset(i64::from(x), i64::from(y));
                self.tiles
                    .push(TileRecord::new(field.classify_coord(position), position));
            }
        }

        self.generated = true;
        trace!("Generated chunk ({}, {})", self.coord.x, self.coord.y);
    }

    /// Discards tiles and structures so the buffer can be reused.
    pub fn clear(&mut self) {
        self.tiles.clear();
        self.structures.clear();
        self.generated = false;
        self.populated = false;
    }

    /// Gets a tile at local coordinates.
    #[must_use]
    pub fn tile(&self, local: LocalCoord) -> Option<&TileRecord> {
        self.tiles.get(local.to_index())
    }

    /// Gets the tile at a world coordinate if it belongs to this chunk.
    #[must_use]
    pub fn tile_at_world(&self, coord: WorldCoord) -> Option<&TileRecord> {
        if coord.to_chunk_coord() != self.coord {
            return None;
        }
        self.tile(coord.to_local_coord())
    }

    /// Returns whether the local tile is walkable.
    ///
    /// Out-of-range coordinates and ungenerated chunks answer `true`.
    #[must_use]
    pub fn is_walkable_at(&self, local_x: i32, local_y: i32) -> bool {
        LocalCoord::checked(local_x, local_y)
            .and_then(|local| self.tile(local))
            .map_or(true, |tile| tile.walkable)
    }

    /// Returns a slice of all tiles.
    #[must_use]
    pub fn tiles(&self) -> &[TileRecord] {
        &self.tiles
    }

    /// Returns the placed structures in placement order.
    #[must_use]
    pub fn structures(&self) -> &[StructureRecord] {
        &self.structures
    }

    /// Appends a structure.
    pub(crate) fn push_structure(&mut self, record: StructureRecord) {
        self.structures.push(record);
    }

    /// Marks the structure list as final.
    pub(crate) fn mark_populated(&mut self) {
        self.populated = true;
    }
}
