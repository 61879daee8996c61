use alloc::vec::Vec;

use super::*;

/// Hands out the same layout every round, for scripted play and tests.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMineFieldGenerator {
    mines: Vec<CellIndex>,
}

impl FixedMineFieldGenerator {
    pub fn new(mines: impl Into<Vec<CellIndex>>) -> Self {
        Self {
            mines: mines.into(),
        }
    }
}

impl MineFieldGenerator for FixedMineFieldGenerator {
    fn generate(&mut self, grid: GridConfig, mine_count: CellCount) -> Result<MineField> {
        let mine_field = MineField::from_indices(grid, &self.mines)?;
        if mine_field.mine_count() != mine_count {
            log::warn!(
                "Fixed layout mine count mismatch, actual: {}, requested: {}",
                mine_field.mine_count(),
                mine_count
            );
            return Err(ConfigError::LayoutMineCountMismatch {
                requested: mine_count,
                actual: mine_field.mine_count(),
            }
            .into());
        }
        Ok(mine_field)
    }
}
