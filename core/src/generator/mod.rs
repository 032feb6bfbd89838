use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Produces a populated [`Minefield`] once the first cell to reveal is known.
pub trait MinefieldGenerator: core::fmt::Debug {
    fn generate(&mut self, config: GameConfig, safe: Coord2) -> Minefield;
}

/// Which cells around the first click are kept free of mines.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SafeZone {
    /// Only the clicked cell.
    Cell,
    /// The clicked cell and its neighbors, so the first click always opens a region.
    #[default]
    Neighborhood,
}
