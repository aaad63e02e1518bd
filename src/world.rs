//! Lazy chunk cache and the world-space tile surface.
//!
//! Chunks are generated the first time anything touches them and then kept
//! for the life of the world. Nothing is ever evicted.

use std::collections::HashMap;

use crate::chunk::{world_to_local, Chunk, ChunkCoord};
use crate::dungeon_gen::ChunkGenerator;
use crate::edge::{Direction, EdgeState};
use crate::rng::Seed;
use crate::tile::Tile;

pub struct World {
    seed: Seed,
    chunks: HashMap<ChunkCoord, Chunk>,
}

impl World {
    pub fn new(seed: Seed) -> Self {
        Self {
            seed,
            chunks: HashMap::new(),
        }
    }

    pub fn seed(&self) -> &Seed {
        &self.seed
    }

    /// Number of chunks generated so far.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_generated(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    /// The chunk at `coord`, generating it on first access.
    pub fn chunk(&mut self, coord: ChunkCoord) -> &Chunk {
        self.chunk_mut(coord)
    }

    fn chunk_mut(&mut self, coord: ChunkCoord) -> &mut Chunk {
        let seed = &self.seed;
        self.chunks
            .entry(coord)
            .or_insert_with(|| ChunkGenerator::generate(seed, coord).chunk)
    }

    /// The chunk at `coord` if it has already been generated.
    pub fn peek_chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    pub fn tile(&mut self, world_x: i32, world_y: i32) -> Tile {
        let (coord, lx, ly) = world_to_local(world_x, world_y);
        self.chunk(coord).tile(lx, ly)
    }

    /// Read a tile without generating anything.
    pub fn peek_tile(&self, world_x: i32, world_y: i32) -> Option<Tile> {
        let (coord, lx, ly) = world_to_local(world_x, world_y);
        self.peek_chunk(coord).map(|chunk| chunk.tile(lx, ly))
    }

    /// Overwrite a tile in its (possibly freshly generated) chunk.
    pub fn set_tile(&mut self, world_x: i32, world_y: i32, tile: Tile) {
        let (coord, lx, ly) = world_to_local(world_x, world_y);
        self.chunk_mut(coord).grid.set(lx, ly, tile);
    }

    pub fn is_passable(&mut self, world_x: i32, world_y: i32) -> bool {
        self.tile(world_x, world_y).is_passable()
    }

    /// Generate every chunk overlapping the square of tiles within `radius`
    /// of `center`. Returns how many chunks were newly generated.
    pub fn ensure_area(&mut self, center: (i32, i32), radius: i32) -> usize {
        puffin::profile_function!();

        let radius = radius.max(0);
        let min = ChunkCoord::from_world(
            center.0.saturating_sub(radius),
            center.1.saturating_sub(radius),
        );
        let max = ChunkCoord::from_world(
            center.0.saturating_add(radius),
            center.1.saturating_add(radius),
        );
        let before = self.chunks.len();
        for cy in min.y..=max.y {
            for cx in min.x..=max.x {
                self.chunk(ChunkCoord::new(cx, cy));
            }
        }
        self.chunks.len() - before
    }

    /// Resolved border state as seen from `coord`.
    pub fn edge_state(&mut self, coord: ChunkCoord, dir: Direction) -> EdgeState {
        self.chunk(coord).edge(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::CHUNK_SIZE;

    fn world() -> World {
        World::new(Seed::new("ABCDEFGH"))
    }

    #[test]
    fn test_chunks_generate_lazily() {
        let mut world = world();
        assert_eq!(world.chunk_count(), 0);
        assert_eq!(world.peek_tile(5, 5), None);
        world.tile(5, 5);
        assert_eq!(world.chunk_count(), 1);
        world.tile(-1, 5);
        assert!(world.is_generated(ChunkCoord::new(-1, 0)));
        assert_eq!(world.chunk_count(), 2);
        world.tile(6, 7);
        assert_eq!(world.chunk_count(), 2);
    }

    #[test]
    fn test_world_matches_chunk_grid() {
        let mut world = world();
        let coord = ChunkCoord::new(-2, 3);
        let fresh = ChunkGenerator::generate(world.seed(), coord).chunk;
        let (ox, oy) = coord.origin();
        for y in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                assert_eq!(world.tile(ox + x, oy + y), fresh.tile(x, y));
            }
        }
    }

    #[test]
    fn test_set_tile_mutates_in_place() {
        let mut world = world();
        world.set_tile(-40, 70, Tile::Floor);
        assert_eq!(world.tile(-40, 70), Tile::Floor);
        world.set_tile(-40, 70, Tile::Wall);
        assert!(!world.is_passable(-40, 70));
        assert_eq!(world.chunk_count(), 1);
    }

    #[test]
    fn test_ensure_area_counts_new_chunks() {
        let mut world = world();
        // Centre of chunk (0,0) with a small radius stays in one chunk.
        assert_eq!(world.ensure_area((16, 16), 5), 1);
        // Straddling the origin touches four chunks, one already present.
        assert_eq!(world.ensure_area((0, 0), 3), 3);
        assert_eq!(world.ensure_area((0, 0), 3), 0);
    }

    #[test]
    fn test_ensure_area_at_coordinate_extremes() {
        let mut world = world();
        assert_eq!(world.ensure_area((i32::MAX, i32::MIN), 10), 1);
        assert!(world.is_generated(ChunkCoord::from_world(i32::MAX, i32::MIN)));
    }

    #[test]
    fn test_edge_states_agree_through_world() {
        let mut world = world();
        let here = world.edge_state(ChunkCoord::new(0, 0), Direction::East);
        let there = world.edge_state(ChunkCoord::new(1, 0), Direction::West);
        assert_eq!(here, there);
    }
}
