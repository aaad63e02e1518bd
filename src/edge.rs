//! Border negotiation between neighboring chunks.
//!
//! A border's state is derived from the seed and the *canonical* pair of
//! chunk coordinates it separates, so both chunks compute the same doorway
//! without ever talking to each other.
//!
//! A chunk whose four canonical rolls all come up closed gets its East
//! border forced open. That rule is part of the border computation itself:
//! the East neighbor re-derives "is my West neighbor sealed?" from the same
//! four canonical rolls, so it sees the forced doorway too.

use crate::chunk::ChunkCoord;
use crate::constants::{CHUNK_SIZE, EDGE_DOOR_MAX, EDGE_DOOR_MIN, EDGE_OPEN_CHANCE};
use crate::rng::Seed;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Chunk-space step; y grows southward.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Local position of a doorway on this border.
    pub fn door_tile(self, door_position: i32) -> (i32, i32) {
        match self {
            Direction::North => (door_position, 0),
            Direction::South => (door_position, CHUNK_SIZE - 1),
            Direction::East => (CHUNK_SIZE - 1, door_position),
            Direction::West => (0, door_position),
        }
    }

    /// The tile just inside a doorway.
    pub fn inner_tile(self, door_position: i32) -> (i32, i32) {
        let (x, y) = self.door_tile(door_position);
        let (dx, dy) = self.delta();
        (x - dx, y - dy)
    }
}

/// Which way the border line runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Between chunks side by side in x (East/West borders)
    Vertical,
    /// Between chunks stacked in y (North/South borders)
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeState {
    pub is_open: bool,
    /// Offset along the border, within `EDGE_DOOR_MIN..=EDGE_DOOR_MAX`
    pub door_position: i32,
    pub orientation: Orientation,
    /// Open only because a neighboring chunk would otherwise be sealed
    pub forced: bool,
}

/// The four borders of one chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkEdges {
    pub north: EdgeState,
    pub south: EdgeState,
    pub east: EdgeState,
    pub west: EdgeState,
}

impl ChunkEdges {
    pub fn get(&self, dir: Direction) -> EdgeState {
        match dir {
            Direction::North => self.north,
            Direction::South => self.south,
            Direction::East => self.east,
            Direction::West => self.west,
        }
    }

    pub fn open_directions(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL
            .into_iter()
            .filter(move |&dir| self.get(dir).is_open)
    }

    pub fn any_open(&self) -> bool {
        self.open_directions().next().is_some()
    }
}

/// Order two neighboring coordinates so either side produces the same key.
pub fn canonical_pair(a: ChunkCoord, b: ChunkCoord) -> (ChunkCoord, ChunkCoord) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// The border state straight from the canonical stream, before forcing.
pub fn roll_edge(seed: &Seed, coord: ChunkCoord, dir: Direction) -> EdgeState {
    let (first, second) = canonical_pair(coord, coord.neighbor(dir));
    let mut rng = seed.edge_stream(first, second);
    let is_open = rng.chance(EDGE_OPEN_CHANCE);
    let door_position = rng.range_int(EDGE_DOOR_MIN, EDGE_DOOR_MAX);
    let orientation = if first.y == second.y {
        Orientation::Vertical
    } else {
        Orientation::Horizontal
    };
    EdgeState {
        is_open,
        door_position,
        orientation,
        forced: false,
    }
}

/// True when every canonical roll around `coord` came up closed.
pub fn is_sealed(seed: &Seed, coord: ChunkCoord) -> bool {
    Direction::ALL
        .into_iter()
        .all(|dir| !roll_edge(seed, coord, dir).is_open)
}

/// Final state of one border of `coord`, identical from both sides.
pub fn negotiate_edge(seed: &Seed, coord: ChunkCoord, dir: Direction) -> EdgeState {
    let mut state = roll_edge(seed, coord, dir);
    if state.is_open {
        return state;
    }
    // The chunk on the west side of an East/West border owns the forcing.
    let west_side = match dir {
        Direction::East => Some(coord),
        Direction::West => Some(coord.neighbor(Direction::West)),
        Direction::North | Direction::South => None,
    };
    if let Some(owner) = west_side {
        if is_sealed(seed, owner) {
            state.is_open = true;
            state.forced = true;
        }
    }
    state
}

pub fn resolve_chunk_edges(seed: &Seed, coord: ChunkCoord) -> ChunkEdges {
    ChunkEdges {
        north: negotiate_edge(seed, coord, Direction::North),
        south: negotiate_edge(seed, coord, Direction::South),
        east: negotiate_edge(seed, coord, Direction::East),
        west: negotiate_edge(seed, coord, Direction::West),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed() -> Seed {
        Seed::new("ABCDEFGH")
    }

    #[test]
    fn test_opposite_round_trip() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            let (dx, dy) = dir.delta();
            let (ox, oy) = dir.opposite().delta();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }

    #[test]
    fn test_canonical_pair_is_symmetric() {
        let a = ChunkCoord::new(3, 1);
        let b = ChunkCoord::new(2, 1);
        assert_eq!(canonical_pair(a, b), canonical_pair(b, a));
        assert_eq!(canonical_pair(a, b).0, b);
    }

    #[test]
    fn test_both_sides_agree() {
        let seed = seed();
        for x in -6..6 {
            for y in -6..6 {
                let coord = ChunkCoord::new(x, y);
                for dir in Direction::ALL {
                    let here = negotiate_edge(&seed, coord, dir);
                    let there = negotiate_edge(&seed, coord.neighbor(dir), dir.opposite());
                    assert_eq!(here, there, "border {:?} {:?} disagrees", coord, dir);
                }
            }
        }
    }

    #[test]
    fn test_door_position_in_range() {
        let seed = seed();
        for x in -10..10 {
            let state = negotiate_edge(&seed, ChunkCoord::new(x, 0), Direction::North);
            assert!((EDGE_DOOR_MIN..=EDGE_DOOR_MAX).contains(&state.door_position));
        }
    }

    #[test]
    fn test_orientation_from_delta() {
        let seed = seed();
        let c = ChunkCoord::new(0, 0);
        assert_eq!(negotiate_edge(&seed, c, Direction::East).orientation, Orientation::Vertical);
        assert_eq!(negotiate_edge(&seed, c, Direction::West).orientation, Orientation::Vertical);
        assert_eq!(negotiate_edge(&seed, c, Direction::North).orientation, Orientation::Horizontal);
        assert_eq!(negotiate_edge(&seed, c, Direction::South).orientation, Orientation::Horizontal);
    }

    #[test]
    fn test_sealed_chunk_forces_east() {
        // With a 22% closed chance per border, sealed chunks turn up quickly.
        let seed = seed();
        let mut found = 0;
        'outer: for x in -200..200 {
            for y in -20..20 {
                let coord = ChunkCoord::new(x, y);
                if !is_sealed(&seed, coord) {
                    continue;
                }
                let edges = resolve_chunk_edges(&seed, coord);
                assert!(edges.east.is_open);
                assert!(edges.east.forced);
                let neighbor = resolve_chunk_edges(&seed, coord.neighbor(Direction::East));
                assert_eq!(neighbor.west, edges.east);
                found += 1;
                if found >= 3 {
                    break 'outer;
                }
            }
        }
        assert!(found > 0, "no sealed chunk in search window");
    }

    #[test]
    fn test_every_chunk_has_an_open_border() {
        let seed = Seed::new("sealed-search");
        for x in -40..40 {
            for y in -40..40 {
                let edges = resolve_chunk_edges(&seed, ChunkCoord::new(x, y));
                assert!(edges.any_open(), "chunk {x},{y} sealed");
            }
        }
    }

    #[test]
    fn test_door_tiles() {
        assert_eq!(Direction::North.door_tile(5), (5, 0));
        assert_eq!(Direction::South.door_tile(5), (5, CHUNK_SIZE - 1));
        assert_eq!(Direction::East.door_tile(5), (CHUNK_SIZE - 1, 5));
        assert_eq!(Direction::West.door_tile(5), (0, 5));
        assert_eq!(Direction::North.inner_tile(5), (5, 1));
        assert_eq!(Direction::East.inner_tile(5), (CHUNK_SIZE - 2, 5));
    }
}
