#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

pub use balance::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use history::*;
pub use minefield::*;
pub use payout::*;
pub use session::*;
pub use types::*;

mod balance;
mod config;
mod engine;
mod error;
mod generator;
mod history;
mod minefield;
mod payout;
mod session;
mod types;

/// Grid dimensions, fixed for the lifetime of a session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    pub rows: Coord,
    pub cols: Coord,
}

impl GridConfig {
    pub const fn new_unchecked(rows: Coord, cols: Coord) -> Self {
        Self { rows, cols }
    }

    /// A grid must be able to hold one mine and still leave a safe cell.
    pub fn new(rows: Coord, cols: Coord) -> Result<Self> {
        let grid = Self::new_unchecked(rows, cols);
        if grid.total_cells() < 2 {
            return Err(ConfigError::InvalidGrid.into());
        }
        Ok(grid)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    pub const fn max_mines(&self) -> CellCount {
        self.total_cells().saturating_sub(1)
    }

    pub fn validate_mine_count(&self, mines: CellCount) -> Result<CellCount> {
        if (1..=self.max_mines()).contains(&mines) {
            Ok(mines)
        } else {
            Err(ConfigError::MineCountOutOfRange {
                mines,
                max: self.max_mines(),
            }
            .into())
        }
    }

    pub fn validate_index(&self, index: CellIndex) -> Result<CellIndex> {
        if index < self.total_cells() {
            Ok(index)
        } else {
            Err(GameError::InvalidCell(index))
        }
    }

    pub fn index_of(&self, (row, col): Coord2) -> Result<CellIndex> {
        if row < self.rows && col < self.cols {
            Ok(CellIndex::from(row) * CellIndex::from(self.cols) + CellIndex::from(col))
        } else {
            Err(GameError::InvalidCell(
                CellIndex::from(row)
                    .saturating_mul(CellIndex::from(self.cols))
                    .saturating_add(CellIndex::from(col)),
            ))
        }
    }

    pub fn coords_of(&self, index: CellIndex) -> Result<Coord2> {
        let index = self.validate_index(index)?;
        let cols = CellIndex::from(self.cols);
        // both quotient and remainder fit a coordinate once the index is in bounds
        Ok(((index / cols) as Coord, (index % cols) as Coord))
    }

    pub fn to_nd_dim(&self) -> [usize; 2] {
        (self.rows, self.cols).to_nd_index()
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::new_unchecked(DEFAULT_ROWS, DEFAULT_COLS)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RevealOutcome {
    Safe {
        revealed_count: CellCount,
        potential_win: Amount,
        multiplier: f64,
    },
    MineHit {
        cell: CellIndex,
        mines: Vec<CellIndex>,
    },
}

impl RevealOutcome {
    pub const fn is_safe(&self) -> bool {
        matches!(self, Self::Safe { .. })
    }

    pub const fn hit_mine(&self) -> bool {
        matches!(self, Self::MineHit { .. })
    }
}
