use thiserror::Error;

use crate::{Amount, CellCount, CellIndex};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Bet {bet} is outside the allowed range {min}..={max}")]
    BetOutOfRange { bet: Amount, min: Amount, max: Amount },
    #[error("Mine count {mines} is outside the allowed range 1..={max}")]
    MineCountOutOfRange { mines: CellCount, max: CellCount },
    #[error("Grid needs at least two cells")]
    InvalidGrid,
    #[error("Bet bounds must satisfy 1 <= min <= max")]
    InvalidBetBounds,
    #[error("History capacity must be at least one")]
    InvalidHistoryCapacity,
    #[error("Layout holds {actual} mines but {requested} were requested")]
    LayoutMineCountMismatch { requested: CellCount, actual: CellCount },
    #[error("Mine placed twice at cell {0}")]
    DuplicateMine(CellIndex),
    #[error("Cannot survive {revealed} reveals with only {safe} safe cells")]
    RevealsExceedSafeCells { revealed: CellCount, safe: CellCount },
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("No round is active")]
    NoActiveRound,
    #[error("Nothing revealed yet, no win to cash out")]
    NothingRevealed,
    #[error("A round is already in progress")]
    RoundInProgress,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    #[error("Not enough balance, need {needed} but only have {available}")]
    InsufficientBalance { needed: Amount, available: Amount },
    #[error("Invalid state: {0}")]
    InvalidState(#[from] StateError),
    #[error("Cell {0} was already revealed")]
    AlreadyRevealed(CellIndex),
    #[error("Cell {0} is outside the grid")]
    InvalidCell(CellIndex),
}

pub type Result<T> = core::result::Result<T, GameError>;
