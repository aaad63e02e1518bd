//! Endless chunked dungeon: deterministic per-chunk generation, seamless
//! borders between neighbors, and a fog-of-war exploration session.

pub mod carve;
pub mod chunk;
pub mod config;
pub mod connectivity;
pub mod constants;
pub mod dungeon_gen;
pub mod edge;
pub mod error;
pub mod fov;
pub mod grid;
pub mod rng;
pub mod save;
pub mod session;
pub mod tile;
pub mod world;

pub use chunk::{Chunk, ChunkCoord};
pub use config::SessionConfig;
pub use edge::{Direction, EdgeState};
pub use error::{ConfigError, SaveError};
pub use rng::{DungeonRng, Seed};
pub use save::SaveState;
pub use session::{MoveResult, Session};
pub use tile::Tile;
pub use world::World;
