use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Player choices that seed the next round.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub bet: Amount,
    pub mine_count: CellCount,
}

/// Everything a front-end needs to draw the game, detached from the session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub grid: GridConfig,
    pub balance: Amount,
    pub selection: Selection,
    pub state: RoundState,
    pub bet: Amount,
    pub mine_count: CellCount,
    pub revealed_count: CellCount,
    pub potential_win: Amount,
    pub multiplier: f64,
    pub next_multiplier: Option<f64>,
    pub revealed: Vec<CellIndex>,
    /// Only filled in once the round is resolved.
    pub mines: Option<Vec<CellIndex>>,
    pub history: Vec<HistoryEntry>,
}

/// Balance, history, and the current round of a single player.
#[derive(Clone, Debug)]
pub struct GameSession<G = RandomMineFieldGenerator> {
    config: GameConfig,
    grid: GridConfig,
    balance: BalanceAccount,
    history: HistoryLedger,
    selection: Selection,
    round: Option<Round>,
    generator: G,
}

impl GameSession {
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::new(config, RandomMineFieldGenerator::from_seed(seed))
    }
}

impl<G: MineFieldGenerator> GameSession<G> {
    pub fn new(config: GameConfig, generator: G) -> Result<Self> {
        config.validate()?;
        let grid = config.grid()?;

        Ok(Self {
            config,
            grid,
            balance: BalanceAccount::new(config.starting_balance),
            history: HistoryLedger::new(config.history_capacity),
            selection: Selection {
                bet: config.default_bet,
                mine_count: config.default_mine_count,
            },
            round: None,
            generator,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> GridConfig {
        self.grid
    }

    pub fn balance(&self) -> Amount {
        self.balance.balance()
    }

    pub fn history(&self) -> &HistoryLedger {
        &self.history
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn round_state(&self) -> RoundState {
        self.round.as_ref().map(Round::state).unwrap_or_default()
    }

    pub fn selected_bet(&self) -> Amount {
        self.selection.bet
    }

    pub fn selected_mine_count(&self) -> CellCount {
        self.selection.mine_count
    }

    /// Stake of the current or last round, or the selection before any round.
    pub fn bet(&self) -> Amount {
        self.round.as_ref().map_or(self.selection.bet, Round::bet)
    }

    pub fn mine_count(&self) -> CellCount {
        self.round
            .as_ref()
            .map_or(self.selection.mine_count, Round::mine_count)
    }

    pub fn revealed_count(&self) -> CellCount {
        self.round.as_ref().map_or(0, Round::revealed_count)
    }

    pub fn potential_win(&self) -> Amount {
        self.round.as_ref().map_or(0, Round::potential_win)
    }

    pub fn multiplier(&self) -> f64 {
        self.round.as_ref().map_or(1.0, Round::multiplier)
    }

    /// What the next safe reveal would pay out at, for the active round or,
    /// between rounds, for the first reveal at the selected mine count.
    pub fn next_multiplier(&self) -> Option<f64> {
        match &self.round {
            Some(round) if round.is_active() => round.next_multiplier(),
            _ => survival_multiplier(self.grid.total_cells(), self.selection.mine_count, 1).ok(),
        }
    }

    pub fn is_revealed(&self, index: CellIndex) -> bool {
        self.round
            .as_ref()
            .is_some_and(|round| round.is_revealed(index))
    }

    pub fn select_bet(&mut self, bet: Amount) -> Result<Amount> {
        self.check_between_rounds()?;
        self.selection.bet = self.config.validate_bet(bet)?;
        Ok(bet)
    }

    pub fn select_mine_count(&mut self, mine_count: CellCount) -> Result<CellCount> {
        self.check_between_rounds()?;
        self.selection.mine_count = self.grid.validate_mine_count(mine_count)?;
        Ok(mine_count)
    }

    /// Stakes the whole balance, capped at the maximum bet.
    pub fn select_all_in(&mut self) -> Result<Amount> {
        self.check_between_rounds()?;
        let balance = self.balance.balance();
        if balance < self.config.min_bet {
            return Err(GameError::InsufficientBalance {
                needed: self.config.min_bet,
                available: balance,
            });
        }
        self.selection.bet = balance.min(self.config.max_bet);
        Ok(self.selection.bet)
    }

    pub fn start_selected(&mut self) -> Result<()> {
        let Selection { bet, mine_count } = self.selection;
        self.start(bet, mine_count)
    }

    pub fn start(&mut self, bet: Amount, mine_count: CellCount) -> Result<()> {
        self.check_between_rounds()?;
        self.config.validate_bet(bet)?;
        self.grid.validate_mine_count(mine_count)?;
        self.balance.ensure_covers(bet)?;

        let mine_field = self.generator.generate(self.grid, mine_count)?;
        self.balance.debit(bet)?;
        self.round = Some(Round::new(bet, mine_field));

        log::debug!(
            "round started: bet {}, mines {}, balance {}",
            bet,
            mine_count,
            self.balance.balance()
        );
        Ok(())
    }

    pub fn reveal(&mut self, index: CellIndex) -> Result<RevealOutcome> {
        let round = self
            .round
            .as_mut()
            .ok_or(GameError::InvalidState(StateError::NoActiveRound))?;
        let outcome = round.reveal(index).inspect_err(|err| {
            log::warn!("reveal of cell {} rejected: {}", index, err);
        })?;

        match &outcome {
            RevealOutcome::Safe {
                revealed_count,
                potential_win,
                ..
            } => {
                log::debug!(
                    "cell {} safe, {} revealed, potential win {}",
                    index,
                    revealed_count,
                    potential_win
                );
            }
            RevealOutcome::MineHit { .. } => {
                log::info!("mine hit at cell {}, lost {}", index, round.bet());
                self.record_resolution();
            }
        }
        Ok(outcome)
    }

    pub fn cash_out(&mut self) -> Result<Amount> {
        let round = self
            .round
            .as_mut()
            .ok_or(GameError::InvalidState(StateError::NoActiveRound))?;
        let payout = round.cash_out().inspect_err(|err| {
            log::warn!("cash out rejected: {}", err);
        })?;

        self.balance.credit(payout);
        self.record_resolution();
        log::info!(
            "cashed out {}, balance {}",
            payout,
            self.balance.balance()
        );
        Ok(payout)
    }

    pub fn reset_balance(&mut self) -> Result<Amount> {
        self.check_between_rounds()?;
        self.balance.reset(self.config.starting_balance);
        log::info!("balance reset to {}", self.config.starting_balance);
        Ok(self.config.starting_balance)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let round = self.round.as_ref();
        SessionSnapshot {
            grid: self.grid,
            balance: self.balance(),
            selection: self.selection,
            state: self.round_state(),
            bet: self.bet(),
            mine_count: self.mine_count(),
            revealed_count: self.revealed_count(),
            potential_win: self.potential_win(),
            multiplier: self.multiplier(),
            next_multiplier: self.next_multiplier(),
            revealed: round.map(Round::revealed_cells).unwrap_or_default(),
            mines: round.and_then(Round::exposed_mines),
            history: self.history.iter().copied().collect(),
        }
    }

    fn record_resolution(&mut self) {
        let entry = self
            .round
            .as_ref()
            .and_then(|round| HistoryEntry::from_resolved(round, now_millis()));
        if let Some(entry) = entry {
            self.history.record(entry);
        }
    }

    fn check_between_rounds(&self) -> Result<()> {
        if self.round_state().can_start() {
            Ok(())
        } else {
            Err(StateError::RoundInProgress.into())
        }
    }
}
