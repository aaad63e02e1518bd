//! Room and corridor carvers.
//!
//! Carvers only ever write floor into the chunk interior (everything but
//! the outer ring), so doorways on the border are opened exclusively by the
//! edge logic. Writes that land outside are silently dropped.

use crate::constants::*;
use crate::grid::Grid;
use crate::rng::DungeonRng;
use crate::tile::Tile;

/// A rectangle representing a room or region
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Check if a point is inside this rectangle
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoomKind {
    Rectangle,
    LShape,
    Oval,
}

/// A carved room. Only the anchor survives generation, as a corridor target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Room {
    pub kind: RoomKind,
    pub anchor: (i32, i32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CorridorStyle {
    Bent,
    Walk,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Corridor {
    pub style: CorridorStyle,
    pub width: i32,
}

/// Clamp a coordinate into the interior, leaving room for a block of `width`.
pub fn clamp_interior(v: i32, width: i32) -> i32 {
    v.clamp(1, CHUNK_SIZE - 1 - width.max(1))
}

fn in_interior(x: i32, y: i32) -> bool {
    (1..CHUNK_SIZE - 1).contains(&x) && (1..CHUNK_SIZE - 1).contains(&y)
}

/// Stamps shapes into a grid.
pub struct Carver<'a> {
    grid: &'a mut Grid,
}

impl<'a> Carver<'a> {
    pub fn new(grid: &'a mut Grid) -> Self {
        Self { grid }
    }

    fn carve_floor(&mut self, x: i32, y: i32) {
        if in_interior(x, y) {
            self.grid.set(x, y, Tile::Floor);
        }
    }

    pub fn carve_rect(&mut self, rect: &Rect) {
        for y in rect.y..rect.y + rect.height {
            for x in rect.x..rect.x + rect.width {
                self.carve_floor(x, y);
            }
        }
    }

    /// Filled ellipse: every cell with `dx²/rx² + dy²/ry² <= 1`.
    pub fn carve_oval(&mut self, cx: i32, cy: i32, rx: i32, ry: i32) {
        let rx = rx.max(1);
        let ry = ry.max(1);
        let rx2 = (rx * rx) as f64;
        let ry2 = (ry * ry) as f64;
        for dy in -ry..=ry {
            for dx in -rx..=rx {
                if (dx * dx) as f64 / rx2 + (dy * dy) as f64 / ry2 <= 1.0 {
                    self.carve_floor(cx + dx, cy + dy);
                }
            }
        }
    }

    /// Pick a room kind (biased toward rectangles) and carve it.
    pub fn carve_room(&mut self, rng: &mut DungeonRng) -> Room {
        let kind = rng
            .pick_weighted(&[
                (RoomKind::Rectangle, ROOM_KIND_WEIGHTS[0]),
                (RoomKind::LShape, ROOM_KIND_WEIGHTS[1]),
                (RoomKind::Oval, ROOM_KIND_WEIGHTS[2]),
            ])
            .unwrap_or(RoomKind::Rectangle);

        let anchor = match kind {
            RoomKind::Rectangle => self.carve_rectangle_room(rng),
            RoomKind::LShape => self.carve_l_room(rng),
            RoomKind::Oval => self.carve_oval_room(rng),
        };
        Room { kind, anchor }
    }

    fn place_rect(rng: &mut DungeonRng, width: i32, height: i32) -> Rect {
        let x = rng.range_int(ROOM_MARGIN, CHUNK_SIZE - ROOM_MARGIN - width);
        let y = rng.range_int(ROOM_MARGIN, CHUNK_SIZE - ROOM_MARGIN - height);
        Rect::new(x, y, width, height)
    }

    fn carve_rectangle_room(&mut self, rng: &mut DungeonRng) -> (i32, i32) {
        let width = rng.range_int(RECT_WIDTH.0, RECT_WIDTH.1);
        let height = rng.range_int(RECT_HEIGHT.0, RECT_HEIGHT.1);
        let rect = Self::place_rect(rng, width, height);
        self.carve_rect(&rect);
        rect.center()
    }

    fn carve_l_room(&mut self, rng: &mut DungeonRng) -> (i32, i32) {
        let width = rng.range_int(L_PRIMARY_WIDTH.0, L_PRIMARY_WIDTH.1);
        let height = rng.range_int(L_PRIMARY_HEIGHT.0, L_PRIMARY_HEIGHT.1);
        let primary = Self::place_rect(rng, width, height);

        let sw = rng.range_int(L_SECONDARY_SIZE.0, L_SECONDARY_SIZE.1);
        let sh = rng.range_int(L_SECONDARY_SIZE.0, L_SECONDARY_SIZE.1);
        let right = rng.chance(0.5);
        let down = rng.chance(0.5);
        let sx = if right {
            primary.x + primary.width - 1
        } else {
            primary.x - sw + 1
        };
        let sy = if down {
            primary.y + primary.height - 1
        } else {
            primary.y - sh + 1
        };
        let secondary = Rect::new(
            sx.clamp(ROOM_MARGIN, CHUNK_SIZE - ROOM_MARGIN - sw),
            sy.clamp(ROOM_MARGIN, CHUNK_SIZE - ROOM_MARGIN - sh),
            sw,
            sh,
        );

        self.carve_rect(&primary);
        self.carve_rect(&secondary);

        let (ax, ay) = primary.center();
        let (bx, by) = secondary.center();
        ((ax + bx) / 2, (ay + by) / 2)
    }

    fn carve_oval_room(&mut self, rng: &mut DungeonRng) -> (i32, i32) {
        let rx = rng.range_int(OVAL_RADIUS_X.0, OVAL_RADIUS_X.1);
        let ry = rng.range_int(OVAL_RADIUS_Y.0, OVAL_RADIUS_Y.1);
        let cx = rng.range_int(ROOM_MARGIN + rx, CHUNK_SIZE - 1 - ROOM_MARGIN - rx);
        let cy = rng.range_int(ROOM_MARGIN + ry, CHUNK_SIZE - 1 - ROOM_MARGIN - ry);
        self.carve_oval(cx, cy, rx, ry);
        (cx, cy)
    }

    /// Connect two points with a randomly styled corridor.
    pub fn carve_corridor(
        &mut self,
        rng: &mut DungeonRng,
        from: (i32, i32),
        to: (i32, i32),
    ) -> Corridor {
        let width = if rng.chance(CORRIDOR_WIDE_CHANCE) { 2 } else { 1 };
        if rng.chance(CORRIDOR_BENT_CHANCE) {
            self.carve_bent(rng, from, to, width);
            Corridor {
                style: CorridorStyle::Bent,
                width,
            }
        } else {
            self.carve_walk(rng, from, to, width);
            Corridor {
                style: CorridorStyle::Walk,
                width,
            }
        }
    }

    /// L- or Z-shaped corridor made of three axis-aligned segments.
    ///
    /// When both endpoints are interior, every tile of the width-1 path is
    /// carved, so the endpoints always end up joined.
    pub fn carve_bent(&mut self, rng: &mut DungeonRng, from: (i32, i32), to: (i32, i32), width: i32) {
        let horizontal_first = rng.chance(0.5);
        let offset = if rng.chance(CORRIDOR_BEND_OFFSET_CHANCE) {
            rng.range_int(-CORRIDOR_BEND_OFFSET_MAX, CORRIDOR_BEND_OFFSET_MAX)
        } else {
            0
        };

        let (x1, y1) = from;
        let (x2, y2) = to;
        if horizontal_first {
            let bend_x = clamp_interior(x2 + offset, 1);
            self.carve_h_segment(x1, bend_x, y1, width);
            self.carve_v_segment(y1, y2, bend_x, width);
            self.carve_h_segment(bend_x, x2, y2, width);
        } else {
            let bend_y = clamp_interior(y2 + offset, 1);
            self.carve_v_segment(y1, bend_y, x1, width);
            self.carve_h_segment(x1, x2, bend_y, width);
            self.carve_v_segment(bend_y, y2, x2, width);
        }
    }

    fn carve_h_segment(&mut self, x1: i32, x2: i32, y: i32, width: i32) {
        for x in x1.min(x2)..=x1.max(x2) {
            for w in 0..width {
                self.carve_floor(x, y + w);
            }
        }
    }

    fn carve_v_segment(&mut self, y1: i32, y2: i32, x: i32, width: i32) {
        for y in y1.min(y2)..=y1.max(y2) {
            for w in 0..width {
                self.carve_floor(x + w, y);
            }
        }
    }

    fn carve_block(&mut self, x: i32, y: i32, width: i32) {
        for dy in 0..width {
            for dx in 0..width {
                self.carve_floor(x + dx, y + dy);
            }
        }
    }

    /// Biased random walk from `from` toward `to`.
    ///
    /// Steps toward the target weigh three times a sideways wobble. The walk
    /// stays inside the interior and gives up after `WALK_STEP_BUDGET` steps.
    /// Returns true if it reached the target.
    pub fn carve_walk(&mut self, rng: &mut DungeonRng, from: (i32, i32), to: (i32, i32), width: i32) -> bool {
        let mut x = clamp_interior(from.0, width);
        let mut y = clamp_interior(from.1, width);
        let target = (clamp_interior(to.0, width), clamp_interior(to.1, width));

        for _ in 0..WALK_STEP_BUDGET {
            self.carve_block(x, y, width);
            if (x, y) == target {
                return true;
            }

            let dx = (target.0 - x).signum();
            let dy = (target.1 - y).signum();
            let mut steps: Vec<((i32, i32), u32)> = Vec::with_capacity(6);
            if dx != 0 {
                steps.push(((dx, 0), WALK_TOWARD_WEIGHT));
            }
            if dy != 0 {
                steps.push(((0, dy), WALK_TOWARD_WEIGHT));
            }
            if rng.chance(WALK_WOBBLE_CHANCE) {
                if dx != 0 {
                    steps.push(((0, 1), WALK_WOBBLE_WEIGHT));
                    steps.push(((0, -1), WALK_WOBBLE_WEIGHT));
                }
                if dy != 0 {
                    steps.push(((1, 0), WALK_WOBBLE_WEIGHT));
                    steps.push(((-1, 0), WALK_WOBBLE_WEIGHT));
                }
            }

            let Some((sx, sy)) = rng.pick_weighted(&steps) else {
                break;
            };
            x = clamp_interior(x + sx, width);
            y = clamp_interior(y + sy, width);
        }

        self.carve_block(x, y, width);
        (x, y) == target
    }
}
