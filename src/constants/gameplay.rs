//! Session constants (visibility, persistence).

/// Default view radius for the observer
pub const VIEW_RADIUS: i32 = 9;

/// Version of the persisted session record
pub const SAVE_FORMAT_VERSION: u32 = 1;
/// Most seen-tile entries written into a persisted record
pub const SEEN_EXPORT_CAP: usize = 20_000;

/// Length of generated seeds
pub const RANDOM_SEED_LEN: usize = 8;

/// Largest absolute world coordinate an observer may occupy. Leaves room for
/// the view window and chunk-origin math to stay inside i32.
pub const WORLD_COORD_LIMIT: i32 = 1 << 30;
