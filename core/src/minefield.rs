use alloc::vec;
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a single reveal request did to the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RevealResult {
    /// Target was off the grid, already revealed or flagged.
    Ignored,
    /// Target held a mine. It is now revealed.
    MineHit(Coord2),
    /// Every cell opened by this pass, the target first.
    Revealed(Vec<Coord2>),
}

/// The grid of cells together with its mine layout.
///
/// A freshly created minefield holds no mines; they are placed once through
/// [`Minefield::place_mines`], normally by a [`MinefieldGenerator`] reacting to
/// the first reveal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Minefield {
    cells: Array2<Cell>,
    mine_count: CellCount,
    revealed_count: CellCount,
    mines_placed: bool,
}

impl Minefield {
    pub fn new(config: GameConfig) -> Self {
        Self {
            cells: Array2::default(config.size().to_nd_index()),
            mine_count: 0,
            revealed_count: 0,
            mines_placed: false,
        }
    }

    /// Builds a minefield with mines at exactly `mine_coords`.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());
        for &coords in mine_coords {
            if !in_bounds(coords, size) {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        let mut field = Self {
            cells: Array2::default(size.to_nd_index()),
            mine_count: 0,
            revealed_count: 0,
            mines_placed: false,
        };
        field.place_mines(&mine_mask);
        Ok(field)
    }

    /// Lays out mines from `mine_mask` and computes every neighbor count.
    ///
    /// Covers (flags) already on the grid are kept.
    pub fn place_mines(&mut self, mine_mask: &Array2<bool>) {
        debug_assert_eq!(mine_mask.dim(), self.cells.dim());

        let mut mine_count: CellCount = 0;
        for (cell, &mine) in self.cells.iter_mut().zip(mine_mask.iter()) {
            cell.mine = mine;
            if mine {
                mine_count += 1;
            }
        }

        let size = self.size();
        for row in 0..size.0 {
            for col in 0..size.1 {
                let coords = (row, col);
                let adjacent = neighbors_of(coords, size)
                    .filter(|&pos| mine_mask[pos.to_nd_index()])
                    .count();
                self.cells[coords.to_nd_index()].adjacent = adjacent as u8;
            }
        }

        self.mine_count = mine_count;
        self.mines_placed = true;
        log::debug!("placed {} mines on a {:?} grid", mine_count, size);
    }

    /// Copies every flag from `other` onto cells still hidden here.
    pub(crate) fn adopt_flags(&mut self, other: &Minefield) {
        for (cell, previous) in self.cells.iter_mut().zip(other.cells.iter()) {
            if previous.is_flagged() && cell.is_hidden() {
                cell.cover = Cover::Flagged;
            }
        }
    }

    pub fn size(&self) -> Coord2 {
        grid_size(&self.cells)
    }

    pub fn mines_placed(&self) -> bool {
        self.mines_placed
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    /// Number of safe cells revealed so far.
    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    /// All safe cells are revealed.
    pub fn is_cleared(&self) -> bool {
        self.mines_placed && self.revealed_count == self.safe_cell_count()
    }

    pub fn cell(&self, coords: Coord2) -> Option<&Cell> {
        if in_bounds(coords, self.size()) {
            Some(&self.cells[coords.to_nd_index()])
        } else {
            None
        }
    }

    pub fn neighbors_of(&self, coords: Coord2) -> NeighborIter {
        neighbors_of(coords, self.size())
    }

    pub fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        self.neighbors_of(coords)
            .filter(|&pos| self.cells[pos.to_nd_index()].is_flagged())
            .count() as u8
    }

    /// Coordinates of every cell matching `predicate`, in row-major order.
    pub fn coords_where(&self, predicate: impl Fn(&Cell) -> bool) -> Vec<Coord2> {
        self.cells
            .indexed_iter()
            .filter(|(_, cell)| predicate(cell))
            .map(|((row, col), _)| (row as Coord, col as Coord))
            .collect()
    }

    /// Sets or clears a flag on a hidden/flagged cell. Returns whether the cover changed.
    pub(crate) fn set_flag(&mut self, coords: Coord2, flagged: bool) -> bool {
        if !in_bounds(coords, self.size()) {
            return false;
        }
        let cell = &mut self.cells[coords.to_nd_index()];
        match (cell.cover, flagged) {
            (Cover::Hidden, true) => cell.cover = Cover::Flagged,
            (Cover::Flagged, false) => cell.cover = Cover::Hidden,
            _ => return false,
        }
        true
    }

    /// Reveals `coords`, flood filling through zero-count cells.
    ///
    /// The flood fill uses an explicit work list so its depth is bounded only
    /// by the heap. Each cell is revealed at most once, flagged cells are never
    /// opened.
    pub fn reveal(&mut self, coords: Coord2) -> RevealResult {
        let Some(cell) = self.cell(coords) else {
            return RevealResult::Ignored;
        };
        if !cell.is_hidden() {
            return RevealResult::Ignored;
        }

        if cell.is_mine() {
            self.cells[coords.to_nd_index()].cover = Cover::Revealed;
            return RevealResult::MineHit(coords);
        }

        let mut opened = Vec::new();
        let mut to_visit = vec![coords];

        while let Some(visit_coords) = to_visit.pop() {
            let cell = &mut self.cells[visit_coords.to_nd_index()];
            if !cell.is_hidden() || cell.is_mine() {
                continue;
            }

            cell.cover = Cover::Revealed;
            let adjacent = cell.adjacent;
            self.revealed_count += 1;
            opened.push(visit_coords);
            log::trace!("opened {:?}, adjacent mines: {}", visit_coords, adjacent);

            if adjacent == 0 {
                let cells = &self.cells;
                to_visit.extend(
                    neighbors_of(visit_coords, self.size())
                        .filter(|&pos| cells[pos.to_nd_index()].is_hidden()),
                );
            }
        }

        RevealResult::Revealed(opened)
    }

    /// Reveals every mine that is still hidden. Flagged mines keep their flag.
    pub fn reveal_mines(&mut self) -> Vec<Coord2> {
        let hidden_mines = self.coords_where(|cell| cell.is_mine() && cell.is_hidden());
        for &coords in &hidden_mines {
            self.cells[coords.to_nd_index()].cover = Cover::Revealed;
        }
        hidden_mines
    }

    /// Flags every mine that is still hidden.
    pub fn flag_mines(&mut self) -> Vec<Coord2> {
        let hidden_mines = self.coords_where(|cell| cell.is_mine() && cell.is_hidden());
        for &coords in &hidden_mines {
            self.cells[coords.to_nd_index()].cover = Cover::Flagged;
        }
        hidden_mines
    }
}
