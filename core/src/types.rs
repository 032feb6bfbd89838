use ndarray::Array2;

/// Single coordinate axis used for row/column counts and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Grid dimensions of an ndarray as `(rows, cols)`.
pub(crate) fn grid_size<T>(grid: &Array2<T>) -> Coord2 {
    let (rows, cols) = grid.dim();
    (
        rows.try_into().unwrap_or(Coord::MAX),
        cols.try_into().unwrap_or(Coord::MAX),
    )
}

/// Whether `coords` lies inside a grid of `size`.
pub const fn in_bounds(coords: Coord2, size: Coord2) -> bool {
    coords.0 < size.0 && coords.1 < size.1
}

/// The up-to-8 in-bounds neighbors of `coords`. Corners have 3, edges 5.
///
/// Out-of-grid centers yield nothing.
pub fn neighbors_of(coords: Coord2, size: Coord2) -> NeighborIter {
    NeighborIter::new(coords, size)
}

const OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Shifts `coords` by `delta`, returning a value only when it stays on the grid.
fn offset(coords: Coord2, delta: (i8, i8), size: Coord2) -> Option<Coord2> {
    let row = coords.0.checked_add_signed(delta.0)?;
    let col = coords.1.checked_add_signed(delta.1)?;
    in_bounds((row, col), size).then_some((row, col))
}

#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    size: Coord2,
    next_offset: usize,
}

impl NeighborIter {
    fn new(center: Coord2, size: Coord2) -> Self {
        let next_offset = if in_bounds(center, size) {
            0
        } else {
            OFFSETS.len()
        };
        Self {
            center,
            size,
            next_offset,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&delta) = OFFSETS.get(self.next_offset) {
            self.next_offset += 1;
            if let Some(coords) = offset(self.center, delta, self.size) {
                return Some(coords);
            }
        }
        None
    }
}
