//! Dungeon constants organized by domain.

mod dungeon;
mod gameplay;

pub use dungeon::*;
pub use gameplay::*;
