//! Entry-fee deduction policy.
//!
//! Fees drain the deposit pool first; any remainder comes out of winnings.
//! The ordering is fixed platform policy, not user-selectable.

use arenavault_shared::types::money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::wallet::balance::WalletBalance;
use crate::wallet::error::WalletError;

/// How an entry fee divides across the two wallet pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSplit {
    /// Portion drawn from the deposit pool.
    pub from_deposit: Decimal,
    /// Portion drawn from the winnings pool.
    pub from_winnings: Decimal,
}

impl FeeSplit {
    /// A split that moves no money (zero-fee tournaments).
    pub const ZERO: Self = Self {
        from_deposit: Decimal::ZERO,
        from_winnings: Decimal::ZERO,
    };

    /// Total amount the split deducts.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.from_deposit + self.from_winnings
    }

    /// True when the split moves no money.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.from_deposit.is_zero() && self.from_winnings.is_zero()
    }
}

/// Computes how an entry fee splits across a wallet's pools.
///
/// Deposit money is consumed first, in full if needed; the remainder comes
/// from winnings: `from_deposit = min(deposit, fee)`,
/// `from_winnings = fee - from_deposit`. A zero fee produces
/// [`FeeSplit::ZERO`]. Pure function; the caller applies the split.
///
/// # Errors
///
/// Returns [`WalletError::Amount`] when the fee is negative or carries
/// sub-cent precision, and [`WalletError::InsufficientFunds`] when both pools
/// together cannot cover the fee.
pub fn split_entry_fee(balance: &WalletBalance, fee: Decimal) -> Result<FeeSplit, WalletError> {
    let fee = money::validate_non_negative(fee)?;
    if fee.is_zero() {
        return Ok(FeeSplit::ZERO);
    }
    if balance.total() < fee {
        return Err(WalletError::InsufficientFunds {
            required: fee,
            available: balance.total(),
        });
    }

    let from_deposit = balance.deposit.min(fee);
    let from_winnings = fee - from_deposit;

    Ok(FeeSplit {
        from_deposit,
        from_winnings,
    })
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
    fn test_deposit_consumed_first() {
        let split = split_entry_fee(&balance(dec!(30), dec!(20)), dec!(40)).unwrap();
        assert_eq!(split.from_deposit, dec!(30));
        assert_eq!(split.from_winnings, dec!(10));
        assert_eq!(split.total(), dec!(40));
    }

    #[test]
    fn test_deposit_covers_fee_alone() {
        let split = split_entry_fee(&balance(dec!(100), dec!(50)), dec!(25)).unwrap();
        assert_eq!(split.from_deposit, dec!(25));
        assert_eq!(split.from_winnings, dec!(0));
    }

    #[test]
    fn test_winnings_only_wallet() {
        let split = split_entry_fee(&balance(dec!(0), dec!(60)), dec!(45)).unwrap();
        assert_eq!(split.from_deposit, dec!(0));
        assert_eq!(split.from_winnings, dec!(45));
    }

    #[test]
    fn test_exact_total_is_accepted() {
        let split = split_entry_fee(&balance(dec!(10), dec!(30)), dec!(40)).unwrap();
        assert_eq!(split.total(), dec!(40));
    }

    #[test]
    fn test_zero_fee_moves_nothing() {
        let split = split_entry_fee(&balance(dec!(30), dec!(20)), dec!(0)).unwrap();
        assert_eq!(split, FeeSplit::ZERO);
        assert!(split.is_zero());
    }

    #[test]
    fn test_insufficient_funds_reports_amounts() {
        let result = split_entry_fee(&balance(dec!(10), dec!(15)), dec!(40));
        assert_eq!(
            result,
            Err(WalletError::InsufficientFunds {
                required: dec!(40),
                available: dec!(25),
            })
        );
    }

    #[test]
    fn test_negative_fee_is_rejected() {
        let result = split_entry_fee(&balance(dec!(100), dec!(0)), dec!(-5));
        assert_eq!(
            result,
            Err(WalletError::Amount(MoneyError::Negative(dec!(-5))))
        );
    }

    #[test]
    fn test_sub_cent_fee_is_rejected() {
        let result = split_entry_fee(&balance(dec!(100), dec!(0)), dec!(9.999));
        assert_eq!(
            result,
            Err(WalletError::Amount(MoneyError::TooPrecise(dec!(9.999))))
        );
    }
}
