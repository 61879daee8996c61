use serde::{Deserialize, Serialize};

use crate::*;

/// Player funds carried across rounds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceAccount {
    balance: Amount,
}

impl BalanceAccount {
    pub const fn new(balance: Amount) -> Self {
        Self { balance }
    }

    pub const fn balance(&self) -> Amount {
        self.balance
    }

    /// Checks that `amount` could be debited, without touching the balance.
    pub fn ensure_covers(&self, amount: Amount) -> Result<()> {
        if amount > self.balance {
            Err(GameError::InsufficientBalance {
                needed: amount,
                available: self.balance,
            })
        } else {
            Ok(())
        }
    }

    pub fn debit(&mut self, amount: Amount) -> Result<Amount> {
        self.ensure_covers(amount)?;
        self.balance -= amount;
        Ok(self.balance)
    }

    pub fn credit(&mut self, amount: Amount) -> Amount {
        self.balance = self.balance.saturating_add(amount);
        self.balance
    }

    pub fn reset(&mut self, balance: Amount) {
        self.balance = balance;
    }
}

impl Default for BalanceAccount {
    fn default() -> Self {
        Self::new(DEFAULT_STARTING_BALANCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debit_within_balance() {
        let mut account = BalanceAccount::new(100);

        assert_eq!(account.debit(50), Ok(50));
        assert_eq!(account.debit(50), Ok(0));
        assert_eq!(account.balance(), 0);
    }

    #[test]
    fn overdraft_is_rejected_without_change() {
        let mut account = BalanceAccount::new(10);

        assert_eq!(
            account.debit(11),
            Err(GameError::InsufficientBalance {
                needed: 11,
                available: 10
            })
        );
        assert_eq!(account.balance(), 10);
    }

    #[test]
    fn credit_has_no_upper_bound_but_saturates() {
        let mut account = BalanceAccount::new(Amount::MAX - 1);

        assert_eq!(account.credit(5), Amount::MAX);
    }

    #[test]
    fn reset_overwrites_unconditionally() {
        let mut account = BalanceAccount::new(3);
        account.credit(1_000);
        account.reset(100);

        assert_eq!(account.balance(), 100);
        assert_eq!(BalanceAccount::default().balance(), 100);
    }
}
