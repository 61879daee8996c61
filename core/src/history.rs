use alloc::collections::VecDeque;
use serde::{Deserialize, Serialize};

use crate::*;

/// Immutable record of one resolved round.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub won: bool,
    /// Payout when won, the lost stake otherwise.
    pub amount: Amount,
    pub bet: Amount,
    pub mine_count: CellCount,
    pub revealed_count: CellCount,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
}

impl HistoryEntry {
    /// `None` while the round is still being played.
    pub fn from_resolved(round: &Round, timestamp: u64) -> Option<Self> {
        let RoundState::Resolved(resolution) = round.state() else {
            return None;
        };

        let (won, amount) = match resolution {
            Resolution::CashedOut { payout } => (true, payout),
            Resolution::HitMine { .. } => (false, round.bet()),
        };
        Some(Self {
            won,
            amount,
            bet: round.bet(),
            mine_count: round.mine_count(),
            revealed_count: round.revealed_count(),
            timestamp,
        })
    }
}

/// Most-recent-first record of resolved rounds, bounded by capacity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryLedger {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl HistoryLedger {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity,
        }
    }

    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &HistoryEntry> + DoubleEndedIterator {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for HistoryLedger {
    fn default() -> Self {
        Self::new(HISTORY_CAPACITY)
    }
}

impl<'a> IntoIterator for &'a HistoryLedger {
    type Item = &'a HistoryEntry;
    type IntoIter = alloc::collections::vec_deque::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

pub(crate) fn now_millis() -> u64 {
    use web_time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    fn entry(bet: Amount) -> HistoryEntry {
        HistoryEntry {
            won: bet % 2 == 0,
            amount: bet,
            bet,
            mine_count: 3,
            revealed_count: 1,
            timestamp: bet,
        }
    }

    #[test]
    fn newest_entry_comes_first() {
        let mut ledger = HistoryLedger::default();
        ledger.record(entry(1));
        ledger.record(entry(2));

        let bets: Vec<_> = ledger.iter().map(|e| e.bet).collect();
        assert_eq!(bets, [2, 1]);
        assert_eq!(ledger.latest().map(|e| e.bet), Some(2));
    }

    #[test]
    fn eleventh_record_evicts_the_first() {
        let mut ledger = HistoryLedger::default();
        for bet in 1..=11 {
            ledger.record(entry(bet));
        }

        assert_eq!(ledger.len(), 10);
        assert_eq!(ledger.iter().next().map(|e| e.bet), Some(11));
        assert!(ledger.iter().all(|e| e.bet != 1));
        assert_eq!(ledger.iter().last().map(|e| e.bet), Some(2));
    }

    #[test]
    fn never_exceeds_capacity() {
        let mut ledger = HistoryLedger::new(3);
        for bet in 0..50 {
            ledger.record(entry(bet));
            assert!(ledger.len() <= 3);
        }
    }

    #[test]
    fn reading_is_restartable() {
        let mut ledger = HistoryLedger::default();
        ledger.record(entry(4));
        ledger.record(entry(5));

        let first: Vec<_> = ledger.iter().copied().collect();
        let second: Vec<_> = (&ledger).into_iter().copied().collect();
        assert_eq!(first, second);
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn unresolved_round_has_no_entry() {
        let field = MineField::from_indices(GridConfig::default(), &[0]).unwrap();
        let round = Round::new(5, field);

        assert_eq!(HistoryEntry::from_resolved(&round, 0), None);
    }

    #[test]
    fn clock_is_past_the_epoch() {
        assert!(now_millis() > 0);
    }
}
