use alloc::vec::Vec;
use ndarray::Array2;

use super::*;

/// Places mines at a predetermined set of coordinates, ignoring the first click.
///
/// Handy for replays and for exercising exact board situations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedGenerator {
    mines: Vec<Coord2>,
}

impl FixedGenerator {
    pub fn new(mines: impl Into<Vec<Coord2>>) -> Self {
        Self {
            mines: mines.into(),
        }
    }
}

impl MinefieldGenerator for FixedGenerator {
    fn generate(&mut self, config: GameConfig, _safe: Coord2) -> Minefield {
        let size = config.size();
        let mut mines: Array2<bool> = Array2::default(size.to_nd_index());
        for &coords in &self.mines {
            if in_bounds(coords, size) {
                mines[coords.to_nd_index()] = true;
            } else {
                log::warn!("dropping mine at {:?}, grid is {:?}", coords, size);
            }
        }

        let mut field = Minefield::new(config);
        field.place_mines(&mines);
        if field.mine_count() != config.mines() {
            log::warn!(
                "fixed layout has {} mines, configuration asked for {}",
                field.mine_count(),
                config.mines()
            );
        }
        field
    }
}
