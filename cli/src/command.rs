use std::str::FromStr;

use anyhow::{Context, bail};
use minebet_core::{Amount, CellCount, CellIndex, Coord, Coord2, GridConfig};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellTarget {
    Index(CellIndex),
    Coords(Coord2),
}

impl CellTarget {
    pub fn resolve(self, grid: GridConfig) -> minebet_core::Result<CellIndex> {
        match self {
            Self::Index(index) => grid.validate_index(index),
            Self::Coords(coords) => grid.index_of(coords),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Start {
        bet: Option<Amount>,
        mines: Option<CellCount>,
    },
    Reveal(CellTarget),
    CashOut,
    Bet(Amount),
    Mines(CellCount),
    AllIn,
    Reset,
    Status,
    Ladder,
    History,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  start [bet] [mines]   place a bet and start a round
  reveal <index>        reveal a cell by linear index
  reveal <row> <col>    reveal a cell by coordinates
  cashout               take the potential win
  bet <amount>          choose the bet for the next round
  mines <count>         choose the mine count for the next round
  allin                 bet the whole balance
  reset                 reset the balance
  status                show the board
  ladder                show the multiplier for every reveal
  history               show the last rounds
  quit                  leave";

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            bail!("empty command");
        };
        let args: Vec<&str> = words.collect();

        let command = match (verb.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("start" | "s", []) => Self::Start {
                bet: None,
                mines: None,
            },
            ("start" | "s", [bet]) => Self::Start {
                bet: Some(number(bet, "bet")?),
                mines: None,
            },
            ("start" | "s", [bet, mines]) => Self::Start {
                bet: Some(number(bet, "bet")?),
                mines: Some(number(mines, "mine count")?),
            },
            ("reveal" | "r", [index]) => Self::Reveal(CellTarget::Index(number(index, "cell")?)),
            ("reveal" | "r", [row, col]) => Self::Reveal(CellTarget::Coords((
                number::<Coord>(row, "row")?,
                number::<Coord>(col, "column")?,
            ))),
            ("cashout" | "c", []) => Self::CashOut,
            ("bet", [bet]) => Self::Bet(number(bet, "bet")?),
            ("mines", [mines]) => Self::Mines(number(mines, "mine count")?),
            ("allin", []) => Self::AllIn,
            ("reset", []) => Self::Reset,
            ("status", []) => Self::Status,
            ("ladder" | "odds", []) => Self::Ladder,
            ("history" | "h", []) => Self::History,
            ("help" | "?", []) => Self::Help,
            ("quit" | "exit" | "q", []) => Self::Quit,
            (verb, _) => bail!("unknown command or arguments: {verb}"),
        };
        Ok(command)
    }
}

fn number<T: FromStr>(word: &str, what: &str) -> anyhow::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    word.parse()
        .with_context(|| format!("invalid {what}: {word:?}"))
}
