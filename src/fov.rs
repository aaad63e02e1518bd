use std::collections::HashSet;

use crate::world::World;

/// Integer line rasterizer. Yields the points after the start, up to and
/// including the end.
pub struct BresenhamLineIter {
    x: i32,
    y: i32,
    x1: i32,
    y1: i32,
    dx: i32,
    dy: i32,
    sx: i32,
    sy: i32,
    err: i32,
}

impl BresenhamLineIter {
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        Self {
            x: x0,
            y: y0,
            x1,
            y1,
            dx,
            dy,
            sx: if x0 < x1 { 1 } else { -1 },
            sy: if y0 < y1 { 1 } else { -1 },
            err: dx - dy,
        }
    }
}

impl Iterator for BresenhamLineIter {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.x == self.x1 && self.y == self.y1 {
            return None;
        }
        let e2 = 2 * self.err;
        if e2 > -self.dy {
            self.err -= self.dy;
            self.x += self.sx;
        }
        if e2 < self.dx {
            self.err += self.dx;
            self.y += self.sy;
        }
        Some((self.x, self.y))
    }
}

/// Check if there's a clear line of sight between two points.
///
/// Only tiles strictly between the two ends can block, so a wall is itself
/// visible but hides whatever lies behind it.
pub fn has_line_of_sight(world: &mut World, from: (i32, i32), to: (i32, i32)) -> bool {
    for (x, y) in BresenhamLineIter::new(from.0, from.1, to.0, to.1) {
        if (x, y) == to {
            return true;
        }
        if world.tile(x, y).blocks_vision() {
            return false;
        }
    }
    true
}

/// Field of view by per-tile line-of-sight tests over a disc.
pub struct FOV;

impl FOV {
    /// Tiles visible from `origin` within `radius` (squared-distance disc).
    ///
    /// With `fog_of_war` each tile needs a clear line of sight; without it,
    /// the whole disc is visible. Chunks under the disc (plus one tile of
    /// margin) are generated up front.
    pub fn calculate(
        world: &mut World,
        origin: (i32, i32),
        radius: i32,
        fog_of_war: bool,
    ) -> HashSet<(i32, i32)> {
        puffin::profile_function!();

        let radius = radius.max(0);
        world.ensure_area(origin, radius + 1);

        let radius_sq = radius * radius;
        let mut visible = HashSet::new();
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy > radius_sq {
                    continue;
                }
                let target = (origin.0 + dx, origin.1 + dy);
                if !fog_of_war || has_line_of_sight(world, origin, target) {
                    visible.insert(target);
                }
            }
        }
        visible
    }
}
