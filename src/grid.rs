use std::fmt;

use crate::constants::{CHUNK_AREA, CHUNK_SIZE};
use crate::tile::Tile;

/// The tiles of one chunk, stored row-major in a single fixed-size buffer.
///
/// Coordinates are chunk-local (`0..CHUNK_SIZE`). Every accessor is
/// bounds-checked; writes outside the grid are dropped.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    tiles: Box<[Tile; CHUNK_AREA]>,
}

impl Grid {
    /// A grid of solid wall.
    pub fn new() -> Self {
        Self {
            tiles: Box::new([Tile::Wall; CHUNK_AREA]),
        }
    }

    pub fn size(&self) -> i32 {
        CHUNK_SIZE
    }

    pub fn in_bounds(x: i32, y: i32) -> bool {
        (0..CHUNK_SIZE).contains(&x) && (0..CHUNK_SIZE).contains(&y)
    }

    /// True for tiles on the outermost ring.
    pub fn is_border(x: i32, y: i32) -> bool {
        Self::in_bounds(x, y) && (x == 0 || y == 0 || x == CHUNK_SIZE - 1 || y == CHUNK_SIZE - 1)
    }

    fn index(x: i32, y: i32) -> Option<usize> {
        if !Self::in_bounds(x, y) {
            return None;
        }
        Some(y as usize * CHUNK_SIZE as usize + x as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Tile> {
        Self::index(x, y).map(|idx| self.tiles[idx])
    }

    /// Write a tile. Returns false (and writes nothing) when out of bounds.
    pub fn set(&mut self, x: i32, y: i32, tile: Tile) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.tiles[idx] = tile;
                true
            }
            None => false,
        }
    }

    /// Out-of-bounds positions count as wall.
    pub fn is_passable(&self, x: i32, y: i32) -> bool {
        self.get(x, y).map(|t| t.is_passable()).unwrap_or(false)
    }

    /// All passable positions in row-major order.
    pub fn passable_positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.tiles.iter().enumerate().filter_map(|(idx, tile)| {
            tile.is_passable().then(|| {
                let idx = idx as i32;
                (idx % CHUNK_SIZE, idx / CHUNK_SIZE)
            })
        })
    }

    pub fn passable_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_passable()).count()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles[..]
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles.chunks(CHUNK_SIZE as usize) {
            let line: String = row.iter().map(|t| t.glyph()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grid {{ passable: {} }}\n{}", self.passable_count(), self)
    }
}
