use std::fmt::Write;

use minebet_core::{
    CellIndex, HistoryEntry, Resolution, RevealOutcome, RoundState, SessionSnapshot,
    multiplier_table, round_payout,
};

const HIDDEN: char = '.';
const SAFE: char = 'o';
const MINE: char = '*';
const TRIGGERED: char = 'X';

pub fn board(snapshot: &SessionSnapshot) -> String {
    let grid = snapshot.grid;
    let triggered = match snapshot.state {
        RoundState::Resolved(Resolution::HitMine { cell }) => Some(cell),
        _ => None,
    };
    let mines = snapshot.mines.as_deref().unwrap_or_default();

    let mut out = String::from("   ");
    for col in 0..grid.cols {
        let _ = write!(out, "{col:>3}");
    }
    out.push('\n');

    for row in 0..grid.rows {
        let _ = write!(out, "{row:>3}");
        for col in 0..grid.cols {
            let index = CellIndex::from(row) * CellIndex::from(grid.cols) + CellIndex::from(col);
            let glyph = if triggered == Some(index) {
                TRIGGERED
            } else if mines.contains(&index) {
                MINE
            } else if snapshot.revealed.contains(&index) {
                SAFE
            } else {
                HIDDEN
            };
            let _ = write!(out, "{glyph:>3}");
        }
        out.push('\n');
    }
    out
}

pub fn status(snapshot: &SessionSnapshot) -> String {
    let state = match snapshot.state {
        RoundState::Idle => "idle",
        RoundState::Active => "active",
        RoundState::Resolved(Resolution::CashedOut { .. }) => "cashed out",
        RoundState::Resolved(Resolution::HitMine { .. }) => "busted",
    };
    let mut line = format!(
        "balance ${} | bet ${} | mines {} | revealed {} | win ${} ({:.2}x) | {}",
        snapshot.balance,
        snapshot.bet,
        snapshot.mine_count,
        snapshot.revealed_count,
        snapshot.potential_win,
        snapshot.multiplier,
        state,
    );
    if let Some(next) = snapshot.next_multiplier {
        let _ = write!(line, " | next {next:.2}x");
    }
    line
}

/// Multiplier and payout for every reveal count. Marks the current step of
/// an active round, otherwise prices the selected bet.
pub fn ladder(snapshot: &SessionSnapshot) -> minebet_core::Result<String> {
    let (bet, mines, reached) = if snapshot.state.is_active() {
        (snapshot.bet, snapshot.mine_count, Some(snapshot.revealed_count))
    } else {
        let selection = snapshot.selection;
        (selection.bet, selection.mine_count, None)
    };
    let total = snapshot.grid.total_cells();
    let table = multiplier_table(total, mines)?;

    let mut out = format!("{mines} mines, bet ${bet}\n");
    for (revealed, multiplier) in (0..).zip(&table).skip(1) {
        let marker = if reached == Some(revealed) { '>' } else { ' ' };
        let win = round_payout(bet, total, mines, revealed)?;
        let _ = writeln!(out, "{marker}{revealed:>4}  {multiplier:>10.2}x  ${win}");
    }
    Ok(out)
}

pub fn history_line(entry: &HistoryEntry) -> String {
    let (result, sign) = if entry.won {
        ("Won", '+')
    } else {
        ("Lost", '-')
    };
    let time = chrono::DateTime::from_timestamp_millis(entry.timestamp as i64)
        .map(|at| at.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_string());

    format!(
        "{result} {sign}${} | Bet: ${} | Mines: {} | Revealed: {} | {time}",
        entry.amount, entry.bet, entry.mine_count, entry.revealed_count,
    )
}

pub fn outcome(outcome: &RevealOutcome) -> String {
    match outcome {
        RevealOutcome::Safe {
            revealed_count,
            potential_win,
            multiplier,
        } => format!(
            "Safe! {revealed_count} revealed, potential win ${potential_win} ({multiplier:.2}x)"
        ),
        RevealOutcome::MineHit { cell, .. } => {
            format!("You hit a mine at cell {cell}! You lost your bet.")
        }
    }
}
