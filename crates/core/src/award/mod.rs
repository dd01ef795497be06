//! Prize payout batch contracts.
//!
//! Awarding is a partial-success batch: each winner is credited
//! independently, one failure never aborts the rest, and the per-winner
//! ledger reference makes re-running a batch safe.

pub mod error;
pub mod types;

pub use error::AwardError;
pub use types::{AwardFailure, AwardReport, WinnerInput, WinnerOutcome, WinnerResult};
