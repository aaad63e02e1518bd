use tracing::debug;

use crate::carve::{Carver, Room};
use crate::chunk::{Chunk, ChunkCoord};
use crate::connectivity::repair_connectivity;
use crate::constants::*;
use crate::edge::{resolve_chunk_edges, ChunkEdges};
use crate::grid::Grid;
use crate::rng::{DungeonRng, Seed};
use crate::tile::Tile;

/// Result of chunk generation
pub struct ChunkResult {
    pub chunk: Chunk,
    /// Rooms in carving order (anchors only matter during generation)
    pub rooms: Vec<Room>,
    /// Corridors added by connectivity repair
    pub repair_corridors: usize,
    pub flavor_doors: usize,
}

/// Builds one chunk from (seed, coordinate). The output depends on nothing else.
pub struct ChunkGenerator {
    grid: Grid,
    rng: DungeonRng,
}

impl ChunkGenerator {
    fn new(seed: &Seed, coord: ChunkCoord) -> Self {
        Self {
            grid: Grid::new(),
            rng: seed.chunk_stream(coord),
        }
    }

    pub fn generate(seed: &Seed, coord: ChunkCoord) -> ChunkResult {
        puffin::profile_function!();

        let edges = resolve_chunk_edges(seed, coord);
        let mut gen = Self::new(seed, coord);

        let rooms = {
            puffin::profile_scope!("rooms");
            gen.carve_rooms()
        };
        gen.connect_rooms(&rooms);
        gen.open_doorways(&edges, &rooms);

        let repair_corridors = repair_connectivity(&mut gen.grid, &mut gen.rng);
        // Doors go in after repair; they never carry connectivity.
        let flavor_doors = gen.place_flavor_doors();

        debug!(
            cx = coord.x,
            cy = coord.y,
            rooms = rooms.len(),
            repair_corridors,
            flavor_doors,
            "generated chunk"
        );

        ChunkResult {
            chunk: Chunk {
                coord,
                grid: gen.grid,
                edges,
            },
            rooms,
            repair_corridors,
            flavor_doors,
        }
    }

    fn carve_rooms(&mut self) -> Vec<Room> {
        let count = self.rng.range_int(ROOMS_MIN, ROOMS_MAX);
        let mut carver = Carver::new(&mut self.grid);
        (0..count).map(|_| carver.carve_room(&mut self.rng)).collect()
    }

    /// Chain rooms in carving order, sometimes closing a loop first-to-last.
    fn connect_rooms(&mut self, rooms: &[Room]) {
        let mut carver = Carver::new(&mut self.grid);
        for pair in rooms.windows(2) {
            carver.carve_corridor(&mut self.rng, pair[0].anchor, pair[1].anchor);
        }
        if rooms.len() >= 3 && self.rng.chance(LOOP_CORRIDOR_CHANCE) {
            if let (Some(first), Some(last)) = (rooms.first(), rooms.last()) {
                carver.carve_corridor(&mut self.rng, first.anchor, last.anchor);
            }
        }
    }

    /// Open each doorway on the border and run a corridor to the nearest room.
    fn open_doorways(&mut self, edges: &ChunkEdges, rooms: &[Room]) {
        for dir in edges.open_directions() {
            let state = edges.get(dir);
            let (dx, dy) = dir.door_tile(state.door_position);
            self.grid.set(dx, dy, Tile::Floor);

            let inner = dir.inner_tile(state.door_position);
            let Some(anchor) = nearest_anchor(rooms, inner) else {
                self.grid.set(inner.0, inner.1, Tile::Floor);
                continue;
            };
            Carver::new(&mut self.grid).carve_corridor(&mut self.rng, inner, anchor);
        }
    }

    /// Check if a wall tile is a good door candidate:
    /// - Must be an interior wall tile
    /// - Must have floor on two opposite sides and walls on the other two
    fn is_door_candidate(&self, x: i32, y: i32) -> bool {
        if Grid::is_border(x, y) || self.grid.get(x, y) != Some(Tile::Wall) {
            return false;
        }

        let open = |x: i32, y: i32| self.grid.is_passable(x, y);
        let north = open(x, y - 1);
        let south = open(x, y + 1);
        let east = open(x + 1, y);
        let west = open(x - 1, y);

        // Passage running north-south through the wall
        let vertical = north && south && !east && !west;
        // Passage running west-east through the wall
        let horizontal = east && west && !north && !south;

        vertical || horizontal
    }

    fn place_flavor_doors(&mut self) -> usize {
        let candidates: Vec<(i32, i32)> = (1..CHUNK_SIZE - 1)
            .flat_map(|y| (1..CHUNK_SIZE - 1).map(move |x| (x, y)))
            .filter(|&(x, y)| self.is_door_candidate(x, y))
            .collect();

        let mut placed = 0;
        for (x, y) in candidates {
            if self.rng.chance(FLAVOR_DOOR_CHANCE) {
                self.grid.set(x, y, Tile::Door);
                placed += 1;
            }
        }
        placed
    }
}

/// Anchor closest to `point` by squared distance; ties go to the earlier room.
fn nearest_anchor(rooms: &[Room], point: (i32, i32)) -> Option<(i32, i32)> {
    rooms
        .iter()
        .map(|room| room.anchor)
        .min_by_key(|&(x, y)| {
            let dx = x - point.0;
            let dy = y - point.1;
            dx * dx + dy * dy
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connectivity::is_fully_connected;
    use crate::edge::Direction;

    fn generate(seed: &str, x: i32, y: i32) -> ChunkResult {
        ChunkGenerator::generate(&Seed::new(seed), ChunkCoord::new(x, y))
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = generate("ABCDEFGH", 0, 0);
        let b = generate("ABCDEFGH", 0, 0);
        assert_eq!(a.chunk.grid, b.chunk.grid);
        assert_eq!(a.chunk.edges, b.chunk.edges);
        assert_eq!(a.rooms, b.rooms);
    }

    #[test]
    fn test_different_chunks_differ() {
        let a = generate("ABCDEFGH", 0, 0);
        let b = generate("ABCDEFGH", 1, 0);
        let c = generate("ZYXWVUTS", 0, 0);
        assert_ne!(a.chunk.grid, b.chunk.grid);
        assert_ne!(a.chunk.grid, c.chunk.grid);
    }

    #[test]
    fn test_room_count_in_range() {
        for x in -5..5 {
            let result = generate("rooms", x, 3);
            let n = result.rooms.len() as i32;
            assert!((ROOMS_MIN..=ROOMS_MAX).contains(&n));
        }
    }

    #[test]
    fn test_chunk_is_connected() {
        for x in -4..4 {
            for y in -4..4 {
                let result = generate("connected", x, y);
                assert!(
                    is_fully_connected(&result.chunk.grid),
                    "chunk {x},{y}\n{}",
                    result.chunk.grid
                );
            }
        }
    }

    #[test]
    fn test_open_borders_have_doorways() {
        for x in -4..4 {
            let chunk = generate("doors", x, -2).chunk;
            for dir in Direction::ALL {
                let state = chunk.edge(dir);
                let (dx, dy) = dir.door_tile(state.door_position);
                assert_eq!(chunk.grid.is_passable(dx, dy), state.is_open, "{dir:?}");
            }
        }
    }

    #[test]
    fn test_border_only_open_at_doorways() {
        for x in -4..4 {
            let chunk = generate("border", x, 7).chunk;
            let doorways: Vec<(i32, i32)> = chunk
                .edges
                .open_directions()
                .map(|dir| dir.door_tile(chunk.edge(dir).door_position))
                .collect();
            for i in 0..CHUNK_SIZE {
                for pos in [(i, 0), (i, CHUNK_SIZE - 1), (0, i), (CHUNK_SIZE - 1, i)] {
                    if chunk.grid.is_passable(pos.0, pos.1) {
                        assert!(doorways.contains(&pos), "stray opening at {pos:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_flavor_door_candidate_shape() {
        let seed = Seed::new("candidates");
        let mut gen = ChunkGenerator::new(&seed, ChunkCoord::new(0, 0));
        gen.grid.set(5, 4, Tile::Floor);
        gen.grid.set(5, 6, Tile::Floor);
        assert!(gen.is_door_candidate(5, 5));
        gen.grid.set(6, 5, Tile::Floor);
        assert!(!gen.is_door_candidate(5, 5));
        assert!(!gen.is_door_candidate(5, 4));
    }

    #[test]
    fn test_nearest_anchor_prefers_earlier_on_tie() {
        use crate::carve::RoomKind;
        let rooms = [
            Room { kind: RoomKind::Rectangle, anchor: (10, 10) },
            Room { kind: RoomKind::Oval, anchor: (14, 10) },
        ];
        assert_eq!(nearest_anchor(&rooms, (12, 10)), Some((10, 10)));
        assert_eq!(nearest_anchor(&rooms, (20, 10)), Some((14, 10)));
        assert_eq!(nearest_anchor(&[], (0, 0)), None);
    }
}
