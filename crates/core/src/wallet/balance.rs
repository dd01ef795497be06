//! Two-pool wallet balance state.

use arenavault_shared::types::money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::wallet::error::WalletError;
use crate::wallet::split::FeeSplit;

/// A user's spendable money, tracked as two separate pools.
///
/// The deposit pool holds gateway-confirmed top-ups; the winnings pool holds
/// prize credits. Entry fees drain deposit first (see [`crate::wallet::split`]);
/// withdrawals drain winnings only. Both pools are always ≥ 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletBalance {
    /// Gateway-confirmed top-up money.
    pub deposit: Decimal,
    /// Prize money, the only withdrawable pool.
    pub winnings: Decimal,
}

impl WalletBalance {
    /// An empty wallet.
    pub const ZERO: Self = Self {
        deposit: Decimal::ZERO,
        winnings: Decimal::ZERO,
    };

    /// Creates a balance, validating both pools are non-negative money amounts.
    ///
    /// # Errors
    ///
    /// Returns [`WalletError::Amount`] when a pool is negative or carries
    /// sub-cent precision.
    pub fn new(deposit: Decimal, winnings: Decimal) -> Result<Self, WalletError> {
        Ok(Self {
            deposit: money::validate_non_negative(deposit)?,
            winnings: money::validate_non_negative(winnings)?,
        })
    }

    /// Total spendable amount across both pools.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.deposit + self.winnings
    }

    /// Applies an entry-fee split, returning the reduced balance.
    ///
    /// # Errors
    ///
    /// Returns [`WalletError::InsufficientFunds`] when the split asks for more
    /// than a pool holds. A split computed from this balance always fits.
    pub fn debit_split(&self, split: &FeeSplit) -> Result<Self, WalletError> {
        if split.from_deposit > self.deposit || split.from_winnings > self.winnings {
            return Err(WalletError::InsufficientFunds {
                required: split.total(),
                available: self.total(),
            });
        }
        Ok(Self {
            deposit: self.deposit - split.from_deposit,
            winnings: self.winnings - split.from_winnings,
        })
    }

    /// Credits the deposit pool.
    ///
    /// # Errors
    ///
    /// Returns [`WalletError::Amount`] unless the amount is a positive money
    /// amount.
    pub fn credit_deposit(&self, amount: Decimal) -> Result<Self, WalletError> {
        let amount = money::validate_positive(amount)?;
        Ok(Self {
            deposit: self.deposit + amount,
            winnings: self.winnings,
        })
    }

    /// Credits the winnings pool.
    ///
    /// # Errors
    ///
    /// Returns [`WalletError::Amount`] unless the amount is a positive money
    /// amount.
    pub fn credit_winnings(&self, amount: Decimal) -> Result<Self, WalletError> {
        let amount = money::validate_positive(amount)?;
        Ok(Self {
            deposit: self.deposit,
            winnings: self.winnings + amount,
        })
    }

    /// Debits the winnings pool only; deposit money is never withdrawable.
    ///
    /// # Errors
    ///
    /// Returns [`WalletError::Amount`] for non-positive amounts and
    /// [`WalletError::InsufficientWinnings`] when winnings cannot cover the
    /// amount, regardless of the deposit pool.
    pub fn debit_winnings(&self, amount: Decimal) -> Result<Self, WalletError> {
        let amount = money::validate_positive(amount)?;
        if amount > self.winnings {
            return Err(WalletError::InsufficientWinnings {
                requested: amount,
                available: self.winnings,
            });
        }
        Ok(Self {
            deposit: self.deposit,
            winnings: self.winnings - amount,
        })
    }
}

impl Default for WalletBalance {
    fn default() -> Self {
        Self::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arenavault_shared::types::money::MoneyError;
    use rust_decimal_macros::dec;

    fn balance(deposit: Decimal, winnings: Decimal) -> WalletBalance {
        WalletBalance::new(deposit, winnings).unwrap()
    }

    #[test]
    fn test_new_rejects_negative_pool() {
        let result = WalletBalance::new(dec!(-1), dec!(0));
        assert_eq!(
            result,
            Err(WalletError::Amount(MoneyError::Negative(dec!(-1))))
        );
    }

    #[test]
    fn test_new_rejects_sub_cent_precision() {
        let result = WalletBalance::new(dec!(10.001), dec!(0));
        assert_eq!(
            result,
            Err(WalletError::Amount(MoneyError::TooPrecise(dec!(10.001))))
        );
    }

    #[test]
    fn test_total_sums_both_pools() {
        assert_eq!(balance(dec!(30), dec!(20)).total(), dec!(50));
    }

    #[test]
    fn test_debit_split_reduces_both_pools() {
        let split = FeeSplit {
            from_deposit: dec!(30),
            from_winnings: dec!(10),
        };
        let after = balance(dec!(30), dec!(20)).debit_split(&split).unwrap();
        assert_eq!(after.deposit, dec!(0));
        assert_eq!(after.winnings, dec!(10));
    }

    #[test]
    fn test_debit_split_rejects_overdraw() {
        let split = FeeSplit {
            from_deposit: dec!(31),
            from_winnings: dec!(0),
        };
        let result = balance(dec!(30), dec!(20)).debit_split(&split);
        assert!(matches!(
            result,
            Err(WalletError::InsufficientFunds { .. })
        ));
    }

    #[test]
    fn test_credit_deposit_leaves_winnings_untouched() {
        let after = balance(dec!(5), dec!(7)).credit_deposit(dec!(100)).unwrap();
        assert_eq!(after.deposit, dec!(105));
        assert_eq!(after.winnings, dec!(7));
    }

    #[test]
    fn test_credit_winnings_rejects_zero() {
        let result = balance(dec!(0), dec!(0)).credit_winnings(dec!(0));
        assert_eq!(
            result,
            Err(WalletError::Amount(MoneyError::NotPositive(dec!(0))))
        );
    }

    #[test]
    fn test_debit_winnings_ignores_deposit_pool() {
        // 100 in deposit does not make 50 withdrawable
        let result = balance(dec!(100), dec!(10)).debit_winnings(dec!(50));
        assert_eq!(
            result,
            Err(WalletError::InsufficientWinnings {
                requested: dec!(50),
                available: dec!(10),
            })
        );
    }

    #[test]
    fn test_debit_winnings_happy_path() {
        let after = balance(dec!(0), dec!(75.50)).debit_winnings(dec!(25.50)).unwrap();
        assert_eq!(after.winnings, dec!(50.00));
        assert_eq!(after.deposit, dec!(0));
    }
}
