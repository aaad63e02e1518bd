use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Wall,
    Floor,
    /// Passable like floor, drawn differently by the renderer
    Door,
}

impl Tile {
    pub fn is_passable(&self) -> bool {
        matches!(self, Tile::Floor | Tile::Door)
    }

    pub fn blocks_vision(&self) -> bool {
        matches!(self, Tile::Wall)
    }

    /// Single-character form used in debug dumps
    pub fn glyph(&self) -> char {
        match self {
            Tile::Wall => '#',
            Tile::Floor => '.',
            Tile::Door => '+',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passability() {
        assert!(!Tile::Wall.is_passable());
        assert!(Tile::Floor.is_passable());
        assert!(Tile::Door.is_passable());
    }

    #[test]
    fn test_only_walls_block_vision() {
        assert!(Tile::Wall.blocks_vision());
        assert!(!Tile::Floor.blocks_vision());
        assert!(!Tile::Door.blocks_vision());
    }

    #[test]
    fn test_default_is_wall() {
        assert_eq!(Tile::default(), Tile::Wall);
    }
}
