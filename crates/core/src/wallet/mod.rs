//! Wallet domain logic.
//!
//! This module implements the monetary core:
//! - Two-pool balances (deposit + winnings) with non-negative invariants
//! - The deposit-first entry-fee deduction policy
//! - Ledger entry vocabulary (kinds, dedupe references, sign conventions)
//! - Error types for wallet operations

pub mod balance;
pub mod error;
pub mod split;
pub mod types;

#[cfg(test)]
mod split_props;

pub use balance::WalletBalance;
pub use error::WalletError;
pub use split::{FeeSplit, split_entry_fee};
pub use types::{
    NewLedgerEntry, ReferenceType, TransactionKind, TransactionStatus, winning_reference,
};
