use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Uniform rejection sampling over grid coordinates, keeping the safe zone
/// around the first click clear. Deterministic for a given seed.
#[derive(Clone, Debug)]
pub struct RandomGenerator {
    rng: SmallRng,
    safe_zone: SafeZone,
}

impl RandomGenerator {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            safe_zone: SafeZone::default(),
        }
    }

    pub fn with_safe_zone(mut self, safe_zone: SafeZone) -> Self {
        self.safe_zone = safe_zone;
        self
    }

    fn exclusion_mask(&self, config: GameConfig, safe: Coord2) -> Array2<bool> {
        let size = config.size();
        let mut excluded: Array2<bool> = Array2::default(size.to_nd_index());
        if !in_bounds(safe, size) {
            log::warn!("safe cell {:?} is off the grid, placing mines anywhere", safe);
            return excluded;
        }

        excluded[safe.to_nd_index()] = true;
        if self.safe_zone == SafeZone::Cell {
            return excluded;
        }

        let zone = 1 + neighbors_of(safe, size).count() as CellCount;
        if config.total_cells() - zone < config.mines() {
            log::warn!(
                "{} mines do not fit outside the safe zone around {:?}, only keeping the cell itself safe",
                config.mines(),
                safe
            );
            return excluded;
        }

        for pos in neighbors_of(safe, size) {
            excluded[pos.to_nd_index()] = true;
        }
        excluded
    }
}

impl MinefieldGenerator for RandomGenerator {
    fn generate(&mut self, config: GameConfig, safe: Coord2) -> Minefield {
        let (rows, cols) = config.size();
        let excluded = self.exclusion_mask(config, safe);
        let mut mines: Array2<bool> = Array2::default(config.size().to_nd_index());

        let mut placed: CellCount = 0;
        while placed < config.mines() {
            let coords = (self.rng.random_range(0..rows), self.rng.random_range(0..cols));
            let index = coords.to_nd_index();
            if excluded[index] || mines[index] {
                continue;
            }
            mines[index] = true;
            placed += 1;
        }

        let mut field = Minefield::new(config);
        field.place_mines(&mines);
        field
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mines_of(field: &Minefield) -> alloc::vec::Vec<Coord2> {
        field.coords_where(|cell| cell.is_mine())
    }

    #[test]
    fn first_click_neighborhood_is_mine_free() {
        let config = GameConfig::new(9, 9, 10).unwrap();

        for seed in 0..200 {
            let field = RandomGenerator::from_seed(seed).generate(config, (4, 4));
            assert_eq!(field.mine_count(), 10);
            for row in 3..=5 {
                for col in 3..=5 {
                    assert!(!field.cell((row, col)).unwrap().is_mine(), "seed {seed}");
                }
            }
        }
    }

    #[test]
    fn corner_click_clamps_safe_zone() {
        let config = GameConfig::new(4, 4, 12).unwrap();

        let field = RandomGenerator::from_seed(7).generate(config, (0, 0));

        // 16 cells minus the 4-cell corner zone leaves exactly 12 spots.
        assert_eq!(field.mine_count(), 12);
        for coords in [(0, 0), (0, 1), (1, 0), (1, 1)] {
            assert!(!field.cell(coords).unwrap().is_mine());
        }
    }

    #[test]
    fn crowded_board_falls_back_to_single_safe_cell() {
        let config = GameConfig::new(3, 3, 8).unwrap();

        let field = RandomGenerator::from_seed(1).generate(config, (1, 1));

        assert_eq!(field.mine_count(), 8);
        assert!(!field.cell((1, 1)).unwrap().is_mine());
        assert_eq!(field.cell((1, 1)).unwrap().neighbor_mine_count(), 8);
    }

    #[test]
    fn single_cell_zone_only_protects_the_click() {
        let config = GameConfig::new(2, 2, 3).unwrap();

        let field = RandomGenerator::from_seed(3)
            .with_safe_zone(SafeZone::Cell)
            .generate(config, (0, 1));

        assert_eq!(mines_of(&field), [(0, 0), (1, 0), (1, 1)]);
    }

    #[test]
    fn same_seed_same_layout() {
        let config = GameConfig::new(16, 30, 99).unwrap();

        let a = RandomGenerator::from_seed(42).generate(config, (8, 15));
        let b = RandomGenerator::from_seed(42).generate(config, (8, 15));

        assert_eq!(mines_of(&a), mines_of(&b));
    }

    #[test]
    fn counts_are_exact_after_generation() {
        let config = GameConfig::new(16, 16, 40).unwrap();
        let field = RandomGenerator::from_seed(9).generate(config, (0, 0));

        for (row, col) in field.coords_where(|cell| !cell.is_mine()) {
            let expected = field
                .neighbors_of((row, col))
                .filter(|&pos| field.cell(pos).unwrap().is_mine())
                .count() as u8;
            assert_eq!(field.cell((row, col)).unwrap().neighbor_mine_count(), expected);
        }
    }
}
