//! Deterministic structure placement.
//!
//! Every chunk derives its own RNG seed from the world seed and its
//! coordinate, so houses come out identical no matter in which order chunks
//! are loaded or how often they are evicted and reloaded. Spacing is only
//! enforced between houses of the same chunk; neighbours may end up closer
//! than `min_house_distance` across a chunk border.

use terra_common::{ChunkCoord, WorldCoord, CHUNK_AREA, CHUNK_SIZE};
use tracing::{debug, warn};

use crate::chunk::{Chunk, StructureRecord};
use crate::config::WorldConfig;

/// Candidates keep this many tiles away from the chunk edge.
pub const EDGE_MARGIN: i32 = 2;

/// Derives the placement seed for one chunk.
///
/// Chunk coordinates enter the hash by their low 32 bits.
#[must_use]
pub const fn chunk_seed(seed: i32, coord: ChunkCoord) -> i32 {
    seed.wrapping_mul(31)
        .wrapping_add(coord.x as i32)
        .wrapping_mul(31)
        .wrapping_add(coord.y as i32)
}

/// Scatters houses over walkable terrain of a generated chunk.
#[derive(Debug, Clone)]
pub struct StructurePlacer {
    /// World seed
    seed: i32,
    /// Upper bound of the per-chunk house draw
    max_houses: usize,
    /// Minimum spacing within one chunk
    min_distance: f64,
    /// Draws per candidate before it is dropped
    max_attempts: u32,
}

impl StructurePlacer {
    /// Creates a placer for `seed` using the placement settings of `config`.
    #[must_use]
    pub fn new(seed: i32, config: &WorldConfig) -> Self {
        Self {
            seed,
            max_houses: (CHUNK_AREA as f64 * config.house_density).floor() as usize,
            min_distance: config.min_house_distance,
            max_attempts: config.max_placement_attempts,
        }
    }

    /// Returns the largest house count a chunk can draw.
    #[must_use]
    pub const fn max_houses(&self) -> usize {
        self.max_houses
    }

    /// Places houses on `chunk` and returns how many were placed.
    ///
    /// The chunk must be generated. A chunk that was already populated is
    /// left untouched. Candidates that exhaust their attempts are dropped,
    /// so the result may be lower than the drawn count.
    pub fn populate(&self, chunk: &mut Chunk) -> usize {
        let coord = chunk.coord();
        if chunk.is_populated() {
            return 0;
        }
        if !chunk.is_generated() {
            warn!(
                "Skipping placement on ungenerated chunk ({}, {})",
                coord.x, coord.y
            );
            return 0;
        }

        let mut rng = fastrand::Rng::with_seed(u64::from(chunk_seed(self.seed, coord) as u32));
        let house_count = rng.usize(0..=self.max_houses);
        let origin = chunk.world_origin();
        let high = CHUNK_SIZE as i32 - EDGE_MARGIN;

        let mut placed: Vec<WorldCoord> = Vec::with_capacity(house_count);
        for _ in 0..house_count {
            for _ in 0..self.max_attempts {
                let local_x = rng.i32(EDGE_MARGIN..high);
                let local_y = rng.i32(EDGE_MARGIN..high);

                if !Self::footprint_walkable(chunk, local_x, local_y) {
                    continue;
                }
                let position = origin.offset(i64::from(local_x), i64::from(local_y));
                if placed
                    .iter()
                    .any(|other| position.distance(*other) < self.min_distance)
                {
                    continue;
                }

                placed.push(position);
                chunk.push_structure(StructureRecord::house(position));
                break;
            }
        }
        chunk.mark_populated();

        debug!(
            "Placed {}/{} houses in chunk ({}, {})",
            placed.len(),
            house_count,
            coord.x,
            coord.y
        );
        placed.len()
    }

    /// The tile and its eight neighbours must all be walkable.
    fn footprint_walkable(chunk: &Chunk, local_x: i32, local_y: i32) -> bool {
        (-1..=1).all(|dy| (-1..=1).all(|dx| chunk.is_walkable_at(local_x + dx, local_y + dy)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::BiomeField;

    const SEED: i32 = 12345;

    fn populated_chunk(placer: &StructurePlacer, field: &BiomeField, coord: ChunkCoord) -> Chunk {
        let mut chunk = Chunk::new(coord);
        chunk.generate(field);
        placer.populate(&mut chunk);
        chunk
    }

    #[test]
    fn test_chunk_seed_formula() {
        assert_eq!(chunk_seed(SEED, ChunkCoord::new(5, 10)), 11_863_710);
        assert_eq!(
            chunk_seed(SEED, ChunkCoord::new(5, 10)),
            chunk_seed(SEED, ChunkCoord::new(5, 10))
        );
        assert_ne!(
            chunk_seed(SEED, ChunkCoord::new(5, 10)),
            chunk_seed(SEED, ChunkCoord::new(6, 10))
        );
        assert_ne!(
            chunk_seed(SEED, ChunkCoord::new(-5, -10)),
            chunk_seed(SEED, ChunkCoord::new(5, 10))
        );
        // wraps instead of overflowing
        let _ = chunk_seed(i32::MAX, ChunkCoord::new(i64::MAX, i64::MIN));
        assert_eq!(
            chunk_seed(SEED, ChunkCoord::new(5, 10)),
            chunk_seed(SEED, ChunkCoord::new(5 + (1 << 32), 10))
        );
    }

    #[test]
    fn test_max_houses_from_density() {
        let placer = StructurePlacer::new(SEED, &WorldConfig::default());
        assert_eq!(placer.max_houses(), 51);
    }

    #[test]
    fn test_placements_are_valid() {
        let config = WorldConfig::default();
        let field = BiomeField::with_config(SEED, &config);
        let placer = StructurePlacer::new(SEED, &config);
        let mut total = 0;

        for coord in ChunkCoord::new(0, 0).square(3) {
            let chunk = populated_chunk(&placer, &field, coord);
            let houses = chunk.structures();
            assert!(houses.len() <= placer.max_houses());
            total += houses.len();

            for (i, house) in houses.iter().enumerate() {
                assert_eq!(house.position.to_chunk_coord(), coord);
                let local = house.position.to_local_coord();
                assert!((2..30).contains(&local.x) && (2..30).contains(&local.y));

                for dy in -1..=1 {
                    for dx in -1..=1 {
                        assert!(field.is_walkable(house.position.offset(dx, dy)));
                    }
                }
                for other in &houses[i + 1..] {
                    assert!(house.position.distance(other.position) >= 8.0);
                }
            }
        }
        assert!(total > 0, "no houses placed in 49 chunks");
    }

    #[test]
    fn test_placement_is_deterministic() {
        let config = WorldConfig::default();
        let field = BiomeField::with_config(SEED, &config);
        let first = StructurePlacer::new(SEED, &config);
        let second = StructurePlacer::new(SEED, &config);

        for coord in [ChunkCoord::new(0, 0), ChunkCoord::new(-3, 2), ChunkCoord::new(8, -8)] {
            let a = populated_chunk(&first, &field, coord);
            let b = populated_chunk(&second, &field, coord);
            assert_eq!(a.structures(), b.structures());
        }
    }

    #[test]
    fn test_populate_requires_generated_chunk() {
        let placer = StructurePlacer::new(SEED, &WorldConfig::default());
        let mut chunk = Chunk::new(ChunkCoord::new(0, 0));
        assert_eq!(placer.populate(&mut chunk), 0);
        assert!(!chunk.is_populated());
    }

    #[test]
    fn test_populate_twice_is_noop() {
        let config = WorldConfig::default();
        let field = BiomeField::with_config(SEED, &config);
        let placer = StructurePlacer::new(SEED, &config);

        let mut chunk = populated_chunk(&placer, &field, ChunkCoord::new(1, 0));
        let before = chunk.structures().to_vec();
        assert_eq!(placer.populate(&mut chunk), 0);
        assert_eq!(chunk.structures(), before.as_slice());
    }

    #[test]
    fn test_zero_density_places_nothing() {
        let config = WorldConfig {
            house_density: 0.0,
            ..Default::default()
        };
        let field = BiomeField::with_config(SEED, &config);
        let placer = StructurePlacer::new(SEED, &config);
        for coord in ChunkCoord::new(0, 0).square(1) {
            assert!(populated_chunk(&placer, &field, coord).structures().is_empty());
        }
    }
}
