//! ID types for placed structures.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::coords::WorldCoord;

/// Kind of structure scattered over the terrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum StructureKind {
    /// A single house.
    #[default]
    House,
}

impl StructureKind {
    /// Lowercase name used in identifiers.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::House => "house",
        }
    }
}

/// Identifier of a placed structure.
///
/// Derived from kind and anchor tile, so the same structure gets the same id
/// every time its chunk is generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StructureId {
    /// Structure kind
    pub kind: StructureKind,
    /// Anchor tile
    pub anchor: WorldCoord,
}

impl StructureId {
    /// Creates a structure ID.
    #[must_use]
    pub const fn new(kind: StructureKind, anchor: WorldCoord) -> Self {
        Self { kind, anchor }
    }

    /// Creates the ID of a house anchored at `anchor`.
    #[must_use]
    pub const fn house(anchor: WorldCoord) -> Self {
        Self::new(StructureKind::House, anchor)
    }
}

impl fmt::Display for StructureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.kind.name(), self.anchor.x, self.anchor.y)
    }
}
