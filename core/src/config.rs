use serde::{Deserialize, Serialize};

use crate::*;

pub const DEFAULT_ROWS: Coord = 5;
pub const DEFAULT_COLS: Coord = 5;
pub const DEFAULT_MINE_COUNT: CellCount = 3;
pub const DEFAULT_BET: Amount = 1;
pub const MIN_BET: Amount = 1;
pub const MAX_BET: Amount = 1000;
pub const HISTORY_CAPACITY: usize = 10;
pub const DEFAULT_STARTING_BALANCE: Amount = 100;

/// Every tunable of a session. Missing fields take their defaults when
/// deserialized, so a config file only has to name what it changes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub default_mine_count: CellCount,
    pub default_bet: Amount,
    pub min_bet: Amount,
    pub max_bet: Amount,
    pub history_capacity: usize,
    /// Balance at session start and after a reset.
    pub starting_balance: Amount,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            default_mine_count: DEFAULT_MINE_COUNT,
            default_bet: DEFAULT_BET,
            min_bet: MIN_BET,
            max_bet: MAX_BET,
            history_capacity: HISTORY_CAPACITY,
            starting_balance: DEFAULT_STARTING_BALANCE,
        }
    }
}

impl GameConfig {
    pub fn grid(&self) -> Result<GridConfig> {
        GridConfig::new(self.rows, self.cols)
    }

    pub fn validate(&self) -> Result<()> {
        let grid = self.grid()?;
        if self.min_bet == 0 || self.min_bet > self.max_bet {
            return Err(ConfigError::InvalidBetBounds.into());
        }
        if self.history_capacity == 0 {
            return Err(ConfigError::InvalidHistoryCapacity.into());
        }
        self.validate_bet(self.default_bet)?;
        grid.validate_mine_count(self.default_mine_count)?;
        Ok(())
    }

    pub fn validate_bet(&self, bet: Amount) -> Result<Amount> {
        if (self.min_bet..=self.max_bet).contains(&bet) {
            Ok(bet)
        } else {
            Err(ConfigError::BetOutOfRange {
                bet,
                min: self.min_bet,
                max: self.max_bet,
            }
            .into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = GameConfig::default();

        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.grid(), Ok(GridConfig::new_unchecked(5, 5)));
    }

    #[test]
    fn bet_bounds_are_inclusive() {
        let config = GameConfig::default();

        assert_eq!(config.validate_bet(1), Ok(1));
        assert_eq!(config.validate_bet(1000), Ok(1000));
        assert_eq!(
            config.validate_bet(1001),
            Err(ConfigError::BetOutOfRange {
                bet: 1001,
                min: 1,
                max: 1000
            }
            .into())
        );
        assert!(config.validate_bet(0).is_err());
    }

    #[test]
    fn inconsistent_configs_are_rejected() {
        let inverted = GameConfig {
            min_bet: 10,
            max_bet: 5,
            ..Default::default()
        };
        assert_eq!(
            inverted.validate(),
            Err(ConfigError::InvalidBetBounds.into())
        );

        let crowded = GameConfig {
            rows: 2,
            cols: 2,
            ..Default::default()
        };
        assert_eq!(
            crowded.validate(),
            Ok(()),
            "three mines still leave a safe cell on a 2x2 grid"
        );

        let full = GameConfig {
            rows: 2,
            cols: 1,
            default_mine_count: 2,
            ..Default::default()
        };
        assert!(full.validate().is_err());

        let forgetful = GameConfig {
            history_capacity: 0,
            ..Default::default()
        };
        assert_eq!(
            forgetful.validate(),
            Err(ConfigError::InvalidHistoryCapacity.into())
        );
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"rows": 6, "max_bet": 50}"#).unwrap();

        assert_eq!(config.rows, 6);
        assert_eq!(config.cols, DEFAULT_COLS);
        assert_eq!(config.max_bet, 50);
        assert_eq!(config.starting_balance, DEFAULT_STARTING_BALANCE);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(serde_json::from_str::<GameConfig>(r#"{"mines": 4}"#).is_err());
    }
}
