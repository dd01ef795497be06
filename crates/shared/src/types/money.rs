//! Money scale helpers with decimal precision.
//!
//! All monetary amounts are single-currency decimals carrying at most two
//! decimal places. These helpers normalize and validate amounts at the system
//! edges so the wallet core never sees drifting scales.

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Number of decimal places for monetary amounts.
pub const MONEY_SCALE: u32 = 2;

/// Errors produced when an amount fails monetary validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// The amount is negative where a non-negative value is required.
    #[error("Amount cannot be negative: {0}")]
    Negative(Decimal),
    /// The amount is zero or negative where a positive value is required.
    #[error("Amount must be positive: {0}")]
    NotPositive(Decimal),
    /// The amount carries more precision than money allows.
    #[error("Amount has more than {MONEY_SCALE} decimal places: {0}")]
    TooPrecise(Decimal),
}

/// Rounds an amount to money scale using banker's rounding.
#[must_use]
pub fn round(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointNearestEven)
}

/// Returns true when the amount fits money scale without rounding.
#[must_use]
pub fn is_money_scale(amount: Decimal) -> bool {
    amount == round(amount)
}

/// Validates a non-negative amount at money scale.
///
/// # Errors
///
/// Returns [`MoneyError::Negative`] for amounts below zero and
/// [`MoneyError::TooPrecise`] for amounts with sub-cent precision.
pub fn validate_non_negative(amount: Decimal) -> Result<Decimal, MoneyError> {
    if amount < Decimal::ZERO {
        return Err(MoneyError::Negative(amount));
    }
    if !is_money_scale(amount) {
        return Err(MoneyError::TooPrecise(amount));
    }
    Ok(amount)
}

/// Validates a strictly positive amount at money scale.
///
/// # Errors
///
/// Returns [`MoneyError::NotPositive`] for zero or negative amounts and
/// [`MoneyError::TooPrecise`] for amounts with sub-cent precision.
pub fn validate_positive(amount: Decimal) -> Result<Decimal, MoneyError> {
    if amount <= Decimal::ZERO {
        return Err(MoneyError::NotPositive(amount));
    }
    if !is_money_scale(amount) {
        return Err(MoneyError::TooPrecise(amount));
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(10.005), dec!(10.00))]
    #[case(dec!(10.015), dec!(10.02))]
    #[case(dec!(10.025), dec!(10.02))]
    #[case(dec!(99.999), dec!(100.00))]
    fn test_round_uses_bankers_rounding(#[case] input: Decimal, #[case] expected: Decimal) {
        assert_eq!(round(input), expected);
    }

    #[rstest]
    #[case(dec!(0), true)]
    #[case(dec!(10), true)]
    #[case(dec!(10.5), true)]
    #[case(dec!(10.50), true)]
    #[case(dec!(10.505), false)]
    #[case(dec!(-3.125), false)]
    fn test_is_money_scale(#[case] amount: Decimal, #[case] expected: bool) {
        assert_eq!(is_money_scale(amount), expected);
    }

    #[test]
    fn test_validate_non_negative_accepts_zero() {
        assert_eq!(validate_non_negative(dec!(0)), Ok(dec!(0)));
    }

    #[test]
    fn test_validate_non_negative_rejects_negative() {
        assert_eq!(
            validate_non_negative(dec!(-0.01)),
            Err(MoneyError::Negative(dec!(-0.01)))
        );
    }

    #[test]
    fn test_validate_positive_rejects_zero() {
        assert_eq!(
            validate_positive(dec!(0)),
            Err(MoneyError::NotPositive(dec!(0)))
        );
    }

    #[test]
    fn test_validate_positive_rejects_sub_cent() {
        assert_eq!(
            validate_positive(dec!(1.001)),
            Err(MoneyError::TooPrecise(dec!(1.001)))
        );
    }

    #[test]
    fn test_validate_positive_accepts_whole_amount() {
        assert_eq!(validate_positive(dec!(250)), Ok(dec!(250)));
    }
}
