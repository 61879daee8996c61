use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Source of fresh mine fields, one per round.
pub trait MineFieldGenerator {
    fn generate(&mut self, grid: GridConfig, mine_count: CellCount) -> Result<MineField>;
}
