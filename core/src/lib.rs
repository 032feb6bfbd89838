#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use difficulty::*;
pub use display::*;
pub use error::*;
pub use game::*;
pub use generator::*;
pub use highscore::*;
pub use minefield::*;
pub use types::*;
pub use update::*;

mod cell;
mod difficulty;
mod display;
mod error;
mod game;
mod generator;
mod highscore;
mod minefield;
mod types;
mod update;

/// Board dimensions and mine count. Always satisfies `0 < mines < rows * cols`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    rows: Coord,
    cols: Coord,
    mines: CellCount,
}

impl GameConfig {
    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidSize);
        }
        if mines == 0 {
            return Err(GameError::NoMines);
        }
        if mines >= mult(rows, cols) {
            return Err(GameError::TooManyMines);
        }
        Ok(Self { rows, cols, mines })
    }

    pub const fn rows(&self) -> Coord {
        self.rows
    }

    pub const fn cols(&self) -> Coord {
        self.cols
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_accepts_classic_boards() {
        let config = GameConfig::new(16, 30, 99).unwrap();
        assert_eq!(config.total_cells(), 480);
        assert_eq!(config.safe_cells(), 381);
    }

    #[test]
    fn config_rejects_degenerate_boards() {
        assert_eq!(GameConfig::new(0, 9, 1), Err(GameError::InvalidSize));
        assert_eq!(GameConfig::new(9, 9, 0), Err(GameError::NoMines));
        assert_eq!(GameConfig::new(9, 9, 81), Err(GameError::TooManyMines));
        assert!(GameConfig::new(9, 9, 80).is_ok());
    }
}
