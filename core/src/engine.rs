use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Resolution {
    CashedOut { payout: Amount },
    HitMine { cell: CellIndex },
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RoundState {
    Idle,
    Active,
    Resolved(Resolution),
}

impl RoundState {
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    pub const fn is_resolved(self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// A resolved round is discarded by the next start, same as idle.
    pub const fn can_start(self) -> bool {
        !self.is_active()
    }
}

impl Default for RoundState {
    fn default() -> Self {
        Self::Idle
    }
}

/// One round from the placed stake to its single resolution.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Round {
    mine_field: MineField,
    revealed: Array2<bool>,
    bet: Amount,
    revealed_count: CellCount,
    multiplier: f64,
    potential_win: Amount,
    state: RoundState,
}

impl Round {
    /// The stake is expected to be settled by the caller already.
    pub fn new(bet: Amount, mine_field: MineField) -> Self {
        let grid = mine_field.grid();
        Self {
            mine_field,
            revealed: Array2::default(grid.to_nd_dim()),
            bet,
            revealed_count: 0,
            multiplier: 1.0,
            potential_win: 0,
            state: RoundState::Active,
        }
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    pub fn grid(&self) -> GridConfig {
        self.mine_field.grid()
    }

    pub fn bet(&self) -> Amount {
        self.bet
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_field.mine_count()
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn potential_win(&self) -> Amount {
        self.potential_win
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Multiplier the next safe reveal would reach, if a safe cell is left.
    pub fn next_multiplier(&self) -> Option<f64> {
        survival_multiplier(
            self.grid().total_cells(),
            self.mine_count(),
            self.revealed_count + 1,
        )
        .ok()
    }

    /// Every safe cell is open; only a cash-out remains.
    pub fn is_cleared(&self) -> bool {
        self.revealed_count == self.mine_field.safe_cell_count()
    }

    pub fn can_cash_out(&self) -> bool {
        self.is_active() && self.revealed_count > 0
    }

    pub fn is_revealed(&self, index: CellIndex) -> bool {
        self.grid()
            .coords_of(index)
            .is_ok_and(|coords| self.revealed[coords.to_nd_index()])
    }

    pub fn revealed_cells(&self) -> Vec<CellIndex> {
        self.revealed
            .iter()
            .zip(0..)
            .filter_map(|(&open, index)| open.then_some(index))
            .collect()
    }

    /// Mine positions, hidden until the round is resolved.
    pub fn exposed_mines(&self) -> Option<Vec<CellIndex>> {
        self.state
            .is_resolved()
            .then(|| self.mine_field.mine_indices())
    }

    pub fn reveal(&mut self, index: CellIndex) -> Result<RevealOutcome> {
        self.check_active()?;
        let coords = self.grid().coords_of(index)?;

        if self.revealed[coords.to_nd_index()] {
            return Err(GameError::AlreadyRevealed(index));
        }

        if self.mine_field.contains(index) {
            self.potential_win = 0;
            self.state = RoundState::Resolved(Resolution::HitMine { cell: index });
            return Ok(RevealOutcome::MineHit {
                cell: index,
                mines: self.mine_field.mine_indices(),
            });
        }

        let revealed_count = self.revealed_count + 1;
        let (total, mines) = (self.grid().total_cells(), self.mine_count());
        let multiplier = survival_multiplier(total, mines, revealed_count)?;
        let potential_win = round_payout(self.bet, total, mines, revealed_count)?;

        self.revealed[coords.to_nd_index()] = true;
        self.revealed_count = revealed_count;
        self.multiplier = multiplier;
        self.potential_win = potential_win;

        Ok(RevealOutcome::Safe {
            revealed_count,
            potential_win: self.potential_win,
            multiplier,
        })
    }

    pub fn cash_out(&mut self) -> Result<Amount> {
        self.check_active()?;
        if self.revealed_count == 0 {
            return Err(StateError::NothingRevealed.into());
        }

        let payout = self.potential_win;
        self.state = RoundState::Resolved(Resolution::CashedOut { payout });
        Ok(payout)
    }

    fn check_active(&self) -> Result<()> {
        if self.state.is_active() {
            Ok(())
        } else {
            Err(StateError::NoActiveRound.into())
        }
    }
}
