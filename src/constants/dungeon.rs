//! Chunk generation constants.

/// Side length of a chunk in tiles
pub const CHUNK_SIZE: i32 = 32;
/// Tiles per chunk
pub const CHUNK_AREA: usize = (CHUNK_SIZE * CHUNK_SIZE) as usize;

/// Chance that a border between two chunks has a doorway
pub const EDGE_OPEN_CHANCE: f64 = 0.78;
/// Lowest door position along a border (keeps doors off the corners)
pub const EDGE_DOOR_MIN: i32 = 2;
/// Highest door position along a border
pub const EDGE_DOOR_MAX: i32 = CHUNK_SIZE - 3;

/// Fewest rooms carved into a chunk
pub const ROOMS_MIN: i32 = 2;
/// Most rooms carved into a chunk
pub const ROOMS_MAX: i32 = 4;
/// Distance rooms keep from the chunk border
pub const ROOM_MARGIN: i32 = 2;
/// Room kind weights: rectangle, L-shape, oval
pub const ROOM_KIND_WEIGHTS: [u32; 3] = [55, 25, 20];

/// Rectangle room width range (inclusive)
pub const RECT_WIDTH: (i32, i32) = (4, 9);
/// Rectangle room height range (inclusive)
pub const RECT_HEIGHT: (i32, i32) = (4, 8);
/// L-shape primary wing width range
pub const L_PRIMARY_WIDTH: (i32, i32) = (5, 9);
/// L-shape primary wing height range
pub const L_PRIMARY_HEIGHT: (i32, i32) = (4, 7);
/// L-shape secondary wing size range (both axes)
pub const L_SECONDARY_SIZE: (i32, i32) = (3, 5);
/// Oval horizontal radius range
pub const OVAL_RADIUS_X: (i32, i32) = (3, 6);
/// Oval vertical radius range
pub const OVAL_RADIUS_Y: (i32, i32) = (2, 5);

/// Chance a corridor is two tiles wide instead of one
pub const CORRIDOR_WIDE_CHANCE: f64 = 0.25;
/// Chance a corridor uses the bent style (otherwise organic walk)
pub const CORRIDOR_BENT_CHANCE: f64 = 0.72;
/// Chance a bent corridor shifts its bend off the target axis
pub const CORRIDOR_BEND_OFFSET_CHANCE: f64 = 0.35;
/// Largest bend offset in tiles
pub const CORRIDOR_BEND_OFFSET_MAX: i32 = 3;
/// Chance an organic walk step also considers sideways wobble
pub const WALK_WOBBLE_CHANCE: f64 = 0.35;
/// Weight of a step toward the target
pub const WALK_TOWARD_WEIGHT: u32 = 3;
/// Weight of a sideways wobble step
pub const WALK_WOBBLE_WEIGHT: u32 = 1;
/// Step budget for an organic walk
pub const WALK_STEP_BUDGET: u32 = 400;

/// Chance the first and last room get an extra loop corridor
pub const LOOP_CORRIDOR_CHANCE: f64 = 0.6;
/// Chance a door candidate in a wall becomes a door
pub const FLAVOR_DOOR_CHANCE: f64 = 0.55;
