use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Mine positions of a single round. Immutable once placed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineField {
    grid: GridConfig,
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineField {
    /// Samples `mine_count` distinct cells uniformly with a partial
    /// Fisher-Yates shuffle, so every subset of that size is equally likely.
    pub fn place<R: rand::Rng>(
        grid: GridConfig,
        mine_count: CellCount,
        rng: &mut R,
    ) -> Result<Self> {
        use rand::prelude::*;

        grid.validate_mine_count(mine_count)?;

        let mut cells: Vec<CellIndex> = (0..grid.total_cells()).collect();
        let picks = usize::from(mine_count);
        for i in 0..picks {
            let j = rng.random_range(i..cells.len());
            cells.swap(i, j);
        }
        cells.truncate(picks);

        Self::from_indices(grid, &cells)
    }

    pub fn from_indices(grid: GridConfig, mines: &[CellIndex]) -> Result<Self> {
        let mine_count = CellCount::try_from(mines.len()).map_err(|_| {
            ConfigError::MineCountOutOfRange {
                mines: CellCount::MAX,
                max: grid.max_mines(),
            }
        })?;
        grid.validate_mine_count(mine_count)?;

        let mut mine_mask: Array2<bool> = Array2::default(grid.to_nd_dim());
        for &index in mines {
            let coords = grid.coords_of(index)?;
            let cell = &mut mine_mask[coords.to_nd_index()];
            if *cell {
                return Err(ConfigError::DuplicateMine(index).into());
            }
            *cell = true;
        }

        Ok(Self {
            grid,
            mine_mask,
            mine_count,
        })
    }

    pub fn grid(&self) -> GridConfig {
        self.grid
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.grid.total_cells() - self.mine_count
    }

    /// Cells outside the grid never hold a mine.
    pub fn contains(&self, index: CellIndex) -> bool {
        self.grid
            .coords_of(index)
            .is_ok_and(|coords| self.mine_mask[coords.to_nd_index()])
    }

    /// Mine positions in ascending index order.
    pub fn mine_indices(&self) -> Vec<CellIndex> {
        // standard layout iterates row-major, matching linear indices
        self.mine_mask
            .iter()
            .zip(0..)
            .filter_map(|(&is_mine, index)| is_mine.then_some(index))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::vec;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn place_yields_exact_distinct_in_bounds_mines() {
        let grid = GridConfig::default();
        let mut rng = SmallRng::seed_from_u64(42);

        for mines in 1..grid.total_cells() {
            let field = MineField::place(grid, mines, &mut rng).unwrap();
            let indices = field.mine_indices();

            assert_eq!(field.mine_count(), mines);
            assert_eq!(indices.len(), usize::from(mines));
            assert!(indices.windows(2).all(|pair| pair[0] < pair[1]));
            assert!(indices.iter().all(|&index| index < grid.total_cells()));
        }
    }

    #[test]
    fn place_rejects_unwinnable_counts() {
        let grid = GridConfig::default();
        let mut rng = SmallRng::seed_from_u64(1);

        assert!(MineField::place(grid, 0, &mut rng).is_err());
        assert!(MineField::place(grid, 25, &mut rng).is_err());
    }

    #[test]
    fn same_seed_same_layout() {
        let grid = GridConfig::default();
        let first = MineField::place(grid, 5, &mut SmallRng::seed_from_u64(7)).unwrap();
        let second = MineField::place(grid, 5, &mut SmallRng::seed_from_u64(7)).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn placement_is_uniform_over_subsets() {
        // 2 mines on 4 cells: 6 possible layouts, 1000 expected hits each
        let grid = GridConfig::new(2, 2).unwrap();
        let mut rng = SmallRng::seed_from_u64(2024);
        let mut counts: BTreeMap<Vec<CellIndex>, u32> = BTreeMap::new();

        for _ in 0..6000 {
            let field = MineField::place(grid, 2, &mut rng).unwrap();
            *counts.entry(field.mine_indices()).or_default() += 1;
        }

        assert_eq!(counts.len(), 6);
        for (layout, &count) in &counts {
            assert!((850..=1150).contains(&count), "{layout:?} seen {count} times");
        }
    }

    #[test]
    fn every_cell_is_equally_likely_to_be_mined() {
        let grid = GridConfig::default();
        let mut rng = SmallRng::seed_from_u64(99);
        let mut hits = [0u32; 25];

        for _ in 0..10_000 {
            let field = MineField::place(grid, 3, &mut rng).unwrap();
            for index in field.mine_indices() {
                hits[usize::from(index)] += 1;
            }
        }

        // expected 1200 per cell
        assert!(hits.iter().all(|&count| (1000..=1400).contains(&count)), "{hits:?}");
    }

    #[test]
    fn contains_answers_membership() {
        let grid = GridConfig::default();
        let field = MineField::from_indices(grid, &[0, 12, 24]).unwrap();

        assert!(field.contains(0));
        assert!(field.contains(12));
        assert!(field.contains(24));
        assert!(!field.contains(1));
        assert!(!field.contains(25));
        assert_eq!(field.safe_cell_count(), 22);
        assert_eq!(field.mine_indices(), vec![0, 12, 24]);
    }

    #[test]
    fn from_indices_validates_layout() {
        let grid = GridConfig::default();

        assert_eq!(
            MineField::from_indices(grid, &[3, 3]),
            Err(ConfigError::DuplicateMine(3).into())
        );
        assert_eq!(
            MineField::from_indices(grid, &[30]),
            Err(GameError::InvalidCell(30))
        );
        assert!(MineField::from_indices(grid, &[]).is_err());
    }
}
