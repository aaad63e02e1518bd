//! Chunk coordinates, the world/chunk transform, and the chunk itself.

use crate::constants::CHUNK_SIZE;
use crate::edge::{ChunkEdges, Direction, EdgeState};
use crate::grid::Grid;
use crate::tile::Tile;

/// Chunk coordinate (in chunks, not tiles).
///
/// Ordered by `x` then `y`; this order canonicalizes shared borders.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChunkCoord {
    pub x: i32,
    pub y: i32,
}

impl ChunkCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chunk owning a world tile. Floors toward negative infinity, so
    /// world x = -1 belongs to chunk -1, not chunk 0.
    pub const fn from_world(world_x: i32, world_y: i32) -> Self {
        Self {
            x: world_x.div_euclid(CHUNK_SIZE),
            y: world_y.div_euclid(CHUNK_SIZE),
        }
    }

    /// World position of this chunk's local (0, 0).
    pub const fn origin(self) -> (i32, i32) {
        (self.x * CHUNK_SIZE, self.y * CHUNK_SIZE)
    }

    pub const fn neighbor(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Context fragment used in RNG keys.
    pub fn key(self) -> String {
        format!("{},{}", self.x, self.y)
    }
}

/// Split a world position into its chunk and chunk-local offset.
pub fn world_to_local(world_x: i32, world_y: i32) -> (ChunkCoord, i32, i32) {
    (
        ChunkCoord::from_world(world_x, world_y),
        world_x.rem_euclid(CHUNK_SIZE),
        world_y.rem_euclid(CHUNK_SIZE),
    )
}

/// Inverse of [`world_to_local`].
pub fn local_to_world(coord: ChunkCoord, local_x: i32, local_y: i32) -> (i32, i32) {
    let (ox, oy) = coord.origin();
    (ox + local_x, oy + local_y)
}

/// A generated chunk: its tiles plus the resolved state of its four borders.
#[derive(Clone, Debug)]
pub struct Chunk {
    pub coord: ChunkCoord,
    pub grid: Grid,
    pub edges: ChunkEdges,
}

impl Chunk {
    pub fn edge(&self, dir: Direction) -> EdgeState {
        self.edges.get(dir)
    }

    /// Tile at chunk-local coordinates; out of range reads as wall.
    pub fn tile(&self, local_x: i32, local_y: i32) -> Tile {
        self.grid.get(local_x, local_y).unwrap_or(Tile::Wall)
    }
}
