//! Fair-odds pricing of a round.
//!
//! Surviving `k` reveals with `m` mines hidden among `t` cells has the
//! hypergeometric probability `C(t - m, k) / C(t, k)`. The payout multiplier is
//! its inverse, so every reveal is priced at even expected value.

use alloc::vec::Vec;

use crate::*;

/// `C(n, k)` as a running product, `0` when `k > n`.
pub fn binomial(n: CellCount, k: CellCount) -> f64 {
    if k > n {
        return 0.0;
    }
    if k == 0 || k == n {
        return 1.0;
    }

    let mut result = 1.0;
    for i in 0..k {
        result = result * f64::from(n - i) / f64::from(i + 1);
    }
    result
}

/// Probability of picking `revealed` safe cells in a row by chance.
///
/// Evaluated as `∏ (safe - i) / (total - i)`, which equals the binomial ratio
/// without forming either coefficient.
pub fn survival_probability(
    total_cells: CellCount,
    mine_cells: CellCount,
    revealed: CellCount,
) -> Result<f64> {
    let safe = safe_cells(total_cells, mine_cells)?;
    if revealed > safe {
        return Err(ConfigError::RevealsExceedSafeCells { revealed, safe }.into());
    }

    let mut probability = 1.0;
    for i in 0..revealed {
        probability *= f64::from(safe - i) / f64::from(total_cells - i);
    }
    Ok(probability)
}

/// Payout multiplier after `revealed` safe reveals, never below `1`.
pub fn survival_multiplier(
    total_cells: CellCount,
    mine_cells: CellCount,
    revealed: CellCount,
) -> Result<f64> {
    if revealed == 0 {
        safe_cells(total_cells, mine_cells)?;
        return Ok(1.0);
    }

    let probability = survival_probability(total_cells, mine_cells, revealed)?;
    Ok((1.0 / probability).max(1.0))
}

/// Float noise, in ULPs of the raw product, that still counts as the next unit.
const PAYOUT_ULPS: f64 = 4.0;

/// Whole-unit payout for `bet` at `multiplier`, rounded down.
pub fn payout(bet: Amount, multiplier: f64) -> Amount {
    let raw = bet as f64 * multiplier;
    // float to int casts saturate and truncate toward zero
    let floored = raw as Amount;
    let next = floored.saturating_add(1);
    if next as f64 - raw <= raw * PAYOUT_ULPS * f64::EPSILON {
        next
    } else {
        floored
    }
}

/// Exact `floor(bet × C(total, revealed) / C(total - mines, revealed))`.
///
/// Falls back to the float multiplier once the reduced ratio no longer fits
/// in `u128`, which only happens on very large boards.
pub fn round_payout(
    bet: Amount,
    total_cells: CellCount,
    mine_cells: CellCount,
    revealed: CellCount,
) -> Result<Amount> {
    let safe = safe_cells(total_cells, mine_cells)?;
    if revealed > safe {
        return Err(ConfigError::RevealsExceedSafeCells { revealed, safe }.into());
    }

    match exact_payout(bet, total_cells, safe, revealed) {
        Some(amount) => Ok(amount),
        None => {
            log::debug!(
                "Exact payout overflowed, total: {total_cells}, mines: {mine_cells}, revealed: {revealed}"
            );
            let multiplier = survival_multiplier(total_cells, mine_cells, revealed)?;
            Ok(payout(bet, multiplier))
        }
    }
}

fn exact_payout(
    bet: Amount,
    total_cells: CellCount,
    safe: CellCount,
    revealed: CellCount,
) -> Option<Amount> {
    let (mut numer, mut denom) = (1u128, 1u128);
    for i in 0..revealed {
        numer = numer.checked_mul(u128::from(total_cells - i))?;
        denom = denom.checked_mul(u128::from(safe - i))?;
        let divisor = gcd(numer, denom);
        numer /= divisor;
        denom /= divisor;
    }

    let floored = u128::from(bet).checked_mul(numer)? / denom;
    Some(Amount::try_from(floored).unwrap_or(Amount::MAX))
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Multipliers for every reveal count from `0` to the number of safe cells.
pub fn multiplier_table(total_cells: CellCount, mine_cells: CellCount) -> Result<Vec<f64>> {
    let safe = safe_cells(total_cells, mine_cells)?;

    let mut table = Vec::with_capacity(usize::from(safe) + 1);
    table.push(1.0);

    let mut probability = 1.0;
    for i in 0..safe {
        probability *= f64::from(safe - i) / f64::from(total_cells - i);
        table.push((1.0 / probability).max(1.0));
    }
    Ok(table)
}

fn safe_cells(total_cells: CellCount, mine_cells: CellCount) -> Result<CellCount> {
    total_cells.checked_sub(mine_cells).ok_or(
        ConfigError::MineCountOutOfRange {
            mines: mine_cells,
            max: total_cells.saturating_sub(1),
        }
        .into(),
    )
}
