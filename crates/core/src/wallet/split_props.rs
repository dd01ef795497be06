//! Property-based tests for the entry-fee deduction policy.

use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::wallet::balance::WalletBalance;
use crate::wallet::error::WalletError;
use crate::wallet::split::split_entry_fee;

/// Money amounts as whole cents up to 1,000,000.00.
fn money() -> impl Strategy<Value = Decimal> {
    (0i64..=100_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    // The uncovered-fee property's `prop_assume!` keeps only ~1/6 of inputs,
    // so reaching 256 cases needs more rejects than the default 1024 budget.
    #![proptest_config(ProptestConfig {
        max_global_rejects: 16384,
        ..ProptestConfig::default()
    })]

    /// Whenever the wallet covers the fee, the split is exact: deposit is
    /// drained first and the parts always sum back to the fee.
    #[test]
    fn prop_covered_fee_splits_deposit_first(
        deposit in money(),
        winnings in money(),
        fee in money(),
    ) {
        let balance = WalletBalance::new(deposit, winnings).unwrap();
        prop_assume!(balance.total() >= fee);

        let split = split_entry_fee(&balance, fee).unwrap();
        prop_assert_eq!(split.from_deposit, deposit.min(fee));
        prop_assert_eq!(split.from_winnings, fee - deposit.min(fee));
        prop_assert_eq!(split.from_deposit + split.from_winnings, fee);
    }

    /// Split parts never exceed the pool they draw from and are never negative.
    #[test]
    fn prop_split_never_overdraws_a_pool(
        deposit in money(),
        winnings in money(),
        fee in money(),
    ) {
        let balance = WalletBalance::new(deposit, winnings).unwrap();
        prop_assume!(balance.total() >= fee);

        let split = split_entry_fee(&balance, fee).unwrap();
        prop_assert!(split.from_deposit >= Decimal::ZERO);
        prop_assert!(split.from_winnings >= Decimal::ZERO);
        prop_assert!(split.from_deposit <= deposit);
        prop_assert!(split.from_winnings <= winnings);
    }

    /// Applying a computed split leaves both pools non-negative and reduces
    /// the total by exactly the fee.
    #[test]
    fn prop_applying_split_preserves_invariants(
        deposit in money(),
        winnings in money(),
        fee in money(),
    ) {
        let balance = WalletBalance::new(deposit, winnings).unwrap();
        prop_assume!(balance.total() >= fee);

        let split = split_entry_fee(&balance, fee).unwrap();
        let after = balance.debit_split(&split).unwrap();
        prop_assert!(after.deposit >= Decimal::ZERO);
        prop_assert!(after.winnings >= Decimal::ZERO);
        prop_assert_eq!(after.total(), balance.total() - fee);
    }

    /// An uncovered fee always fails with the required and available amounts,
    /// and never with any other error.
    #[test]
    fn prop_uncovered_fee_reports_insufficient_funds(
        deposit in money(),
        winnings in money(),
        fee in money(),
    ) {
        let balance = WalletBalance::new(deposit, winnings).unwrap();
        prop_assume!(balance.total() < fee);

        let result = split_entry_fee(&balance, fee);
        prop_assert_eq!(
            result,
            Err(WalletError::InsufficientFunds {
                required: fee,
                available: balance.total(),
            })
        );
    }

    /// A zero fee splits to zero against any wallet.
    #[test]
    fn prop_zero_fee_is_always_free(deposit in money(), winnings in money()) {
        let balance = WalletBalance::new(deposit, winnings).unwrap();
        let split = split_entry_fee(&balance, Decimal::ZERO).unwrap();
        prop_assert!(split.is_zero());
    }
}
