//! Flood fill and the repair pass that stitches islands into one region.

use std::collections::VecDeque;

use tracing::trace;

use crate::carve::{clamp_interior, Carver};
use crate::constants::{CHUNK_AREA, CHUNK_SIZE};
use crate::grid::Grid;
use crate::rng::DungeonRng;

const NEIGHBORS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// A set of chunk-local positions, stored as a mask over the grid.
#[derive(Clone, Debug)]
pub struct Region {
    cells: Vec<bool>,
    len: usize,
}

impl Region {
    fn empty() -> Self {
        Self {
            cells: vec![false; CHUNK_AREA],
            len: 0,
        }
    }

    fn index(x: i32, y: i32) -> Option<usize> {
        Grid::in_bounds(x, y).then(|| y as usize * CHUNK_SIZE as usize + x as usize)
    }

    fn insert(&mut self, x: i32, y: i32) -> bool {
        match Self::index(x, y) {
            Some(idx) if !self.cells[idx] => {
                self.cells[idx] = true;
                self.len += 1;
                true
            }
            _ => false,
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        Self::index(x, y).map(|idx| self.cells[idx]).unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Members in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.cells.iter().enumerate().filter_map(|(idx, &member)| {
            member.then(|| {
                let idx = idx as i32;
                (idx % CHUNK_SIZE, idx / CHUNK_SIZE)
            })
        })
    }
}

/// Every passable tile 4-connected to `start`. Empty if `start` is not passable.
pub fn flood_fill(grid: &Grid, start: (i32, i32)) -> Region {
    let mut region = Region::empty();
    if !grid.is_passable(start.0, start.1) {
        return region;
    }

    let mut queue = VecDeque::new();
    region.insert(start.0, start.1);
    queue.push_back(start);

    while let Some((x, y)) = queue.pop_front() {
        for (dx, dy) in NEIGHBORS {
            let nx = x + dx;
            let ny = y + dy;
            if grid.is_passable(nx, ny) && region.insert(nx, ny) {
                queue.push_back((nx, ny));
            }
        }
    }

    region
}

/// First passable tile (row-major) outside `region`.
pub fn find_island(grid: &Grid, region: &Region) -> Option<(i32, i32)> {
    grid.passable_positions()
        .find(|&(x, y)| !region.contains(x, y))
}

/// Member of `region` closest to `point` by squared distance.
/// Ties go to the first member in row-major order.
pub fn nearest_member(region: &Region, point: (i32, i32)) -> Option<(i32, i32)> {
    let mut best: Option<((i32, i32), i32)> = None;
    for (x, y) in region.positions() {
        let dx = x - point.0;
        let dy = y - point.1;
        let dist = dx * dx + dy * dy;
        if best.map_or(true, |(_, d)| dist < d) {
            best = Some(((x, y), dist));
        }
    }
    best.map(|(pos, _)| pos)
}

/// True if every passable tile reaches every other.
pub fn is_fully_connected(grid: &Grid) -> bool {
    match grid.passable_positions().next() {
        Some(start) => flood_fill(grid, start).len() == grid.passable_count(),
        None => true,
    }
}

/// Carve corridors until the grid's passable tiles form a single region.
///
/// Returns the number of corridors carved. A corridor that fails to reach
/// the main region (an organic walk can run out of steps) is followed by a
/// bent corridor, which always joins its endpoints.
pub fn repair_connectivity(grid: &mut Grid, rng: &mut DungeonRng) -> usize {
    puffin::profile_function!();

    let Some(start) = grid.passable_positions().next() else {
        return 0;
    };
    let mut main = flood_fill(grid, start);
    let mut corridors = 0;
    let mut stalled = false;

    while let Some(island) = find_island(grid, &main) {
        let Some(target) = nearest_member(&main, island) else {
            break;
        };
        let from = (clamp_interior(island.0, 1), clamp_interior(island.1, 1));
        let to = (clamp_interior(target.0, 1), clamp_interior(target.1, 1));
        trace!(?island, ?target, stalled, "repair corridor");

        let mut carver = Carver::new(grid);
        if stalled {
            carver.carve_bent(rng, from, to, 1);
        } else {
            carver.carve_corridor(rng, from, to);
        }
        corridors += 1;

        let before = main.len();
        main = flood_fill(grid, start);
        stalled = main.len() == before;
    }

    corridors
}
