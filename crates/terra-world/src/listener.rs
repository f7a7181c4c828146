//! Outbound notifications for the presentation layer.

use terra_common::ChunkCoord;

use crate::chunk::StructureRecord;

/// Receives structure lifecycle events while chunks stream in and out.
///
/// Calls happen synchronously inside the focus update that caused them.
pub trait ChunkListener {
    /// A structure was placed on a freshly loaded chunk.
    fn on_structure_placed(&mut self, _structure: &StructureRecord) {}

    /// A chunk is being evicted; `structures` are the ones it carried.
    fn on_chunk_cleared(&mut self, _coord: ChunkCoord, _structures: &[StructureRecord]) {}
}

/// Listener that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullListener;

impl ChunkListener for NullListener {}

/// A recorded listener event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorldEvent {
    /// See [`ChunkListener::on_structure_placed`]
    StructurePlaced(StructureRecord),
    /// See [`ChunkListener::on_chunk_cleared`]
    ChunkCleared {
        /// Evicted chunk
        coord: ChunkCoord,
        /// Structures that were on it
        structures: Vec<StructureRecord>,
    },
}

impl ChunkListener for Vec<WorldEvent> {
    fn on_structure_placed(&mut self, structure: &StructureRecord) {
        self.push(WorldEvent::StructurePlaced(*structure));
    }

    fn on_chunk_cleared(&mut self, coord: ChunkCoord, structures: &[StructureRecord]) {
        self.push(WorldEvent::ChunkCleared {
            coord,
            structures: structures.to_vec(),
        });
    }
}
