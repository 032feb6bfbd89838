use serde::{Deserialize, Serialize};

/// Player-facing cover of a cell. Being a single enum, a cell can never be
/// revealed and flagged at the same time.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cover {
    #[default]
    Hidden,
    Flagged,
    Revealed,
}

/// One grid position.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) mine: bool,
    pub(crate) cover: Cover,
    /// Only meaningful when `mine` is false.
    pub(crate) adjacent: u8,
}

impl Cell {
    pub const fn is_mine(&self) -> bool {
        self.mine
    }

    pub const fn is_revealed(&self) -> bool {
        matches!(self.cover, Cover::Revealed)
    }

    pub const fn is_flagged(&self) -> bool {
        matches!(self.cover, Cover::Flagged)
    }

    pub const fn is_hidden(&self) -> bool {
        matches!(self.cover, Cover::Hidden)
    }

    pub const fn cover(&self) -> Cover {
        self.cover
    }

    pub const fn neighbor_mine_count(&self) -> u8 {
        self.adjacent
    }

    /// What a renderer is allowed to show for this cell.
    pub const fn view(&self) -> CellView {
        match (self.cover, self.mine) {
            (Cover::Hidden, _) => CellView::Hidden,
            (Cover::Flagged, _) => CellView::Flagged,
            (Cover::Revealed, true) => CellView::Mine,
            (Cover::Revealed, false) => CellView::Number(self.adjacent),
        }
    }
}

/// Visible state of a cell, as handed to rendering collaborators.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    #[default]
    Hidden,
    Flagged,
    Number(u8),
    Mine,
}

impl CellView {
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Number(_) | Self::Mine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_hides_contents_until_revealed() {
        let mut cell = Cell {
            mine: true,
            ..Default::default()
        };
        assert_eq!(cell.view(), CellView::Hidden);

        cell.cover = Cover::Flagged;
        assert_eq!(cell.view(), CellView::Flagged);

        cell.cover = Cover::Revealed;
        assert_eq!(cell.view(), CellView::Mine);
    }

    #[test]
    fn revealed_safe_cell_shows_its_count() {
        let cell = Cell {
            mine: false,
            cover: Cover::Revealed,
            adjacent: 3,
        };
        assert_eq!(cell.view(), CellView::Number(3));
        assert!(cell.view().is_revealed());
    }
}
