//! Winner inputs and per-winner outcomes.

use arenavault_shared::types::{LedgerEntryId, TournamentId, UserId, money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One winner line in a payout batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinnerInput {
    /// The winning user.
    pub user_id: UserId,
    /// Prize amount to credit to winnings.
    pub amount: Decimal,
    /// Final placement, 1-based.
    pub position: u32,
}

impl WinnerInput {
    /// Validates the line before any mutation.
    ///
    /// # Errors
    ///
    /// Returns [`AwardFailure::InvalidAmount`] unless the amount is a positive
    /// money amount, and [`AwardFailure::InvalidPosition`] for position 0.
    pub fn validate(&self) -> Result<(), AwardFailure> {
        if money::validate_positive(self.amount).is_err() {
            return Err(AwardFailure::InvalidAmount);
        }
        if self.position == 0 {
            return Err(AwardFailure::InvalidPosition);
        }
        Ok(())
    }
}

/// Outcome of crediting one winner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum WinnerOutcome {
    /// The prize was credited and recorded.
    Credited {
        /// Ledger entry recording the credit.
        entry_id: LedgerEntryId,
        /// Winnings balance after the credit.
        new_winnings: Decimal,
    },
    /// A previous run already credited this winner; nothing changed.
    AlreadyCredited {
        /// The prior ledger entry.
        entry_id: LedgerEntryId,
    },
    /// The credit failed; other winners are unaffected.
    Failed {
        /// Why the credit failed.
        reason: AwardFailure,
    },
}

/// Per-winner failure reasons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AwardFailure {
    /// The winner's user record does not exist.
    UserNotFound,
    /// The prize amount is not a positive money amount.
    InvalidAmount,
    /// The position is not a positive rank.
    InvalidPosition,
    /// Concurrent wallet mutations exhausted the retry budget.
    Conflict,
    /// Storage failure.
    Database(String),
}

/// Result of one winner line, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinnerResult {
    /// The winner this result describes.
    pub user_id: UserId,
    /// Placement from the input line.
    pub position: u32,
    /// Amount from the input line.
    pub amount: Decimal,
    /// What happened.
    pub outcome: WinnerOutcome,
}

impl WinnerResult {
    /// True when the winner's money is in place (credited now or previously).
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(
            self.outcome,
            WinnerOutcome::Credited { .. } | WinnerOutcome::AlreadyCredited { .. }
        )
    }
}

/// Full report of a payout batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardReport {
    /// Tournament the batch belongs to.
    pub tournament_id: TournamentId,
    /// Per-winner outcomes, in input order.
    pub results: Vec<WinnerResult>,
}

impl AwardReport {
    /// Number of winners whose money is in place.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    /// Number of winners that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn winner(amount: Decimal, position: u32) -> WinnerInput {
        WinnerInput {
            user_id: UserId::new(),
            amount,
            position,
        }
    }

    #[test]
    fn test_validate_accepts_positive_amount_and_rank() {
        assert!(winner(dec!(500), 1).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_amount() {
        assert_eq!(
            winner(dec!(0), 1).validate(),
            Err(AwardFailure::InvalidAmount)
        );
    }

    #[test]
    fn test_validate_rejects_negative_amount() {
        assert_eq!(
            winner(dec!(-10), 1).validate(),
            Err(AwardFailure::InvalidAmount)
        );
    }

    #[test]
    fn test_validate_rejects_position_zero() {
        assert_eq!(
            winner(dec!(100), 0).validate(),
            Err(AwardFailure::InvalidPosition)
        );
    }

    #[test]
    fn test_report_counts_partial_success() {
        let tournament_id = TournamentId::new();
        let results = vec![
            WinnerResult {
                user_id: UserId::new(),
                position: 1,
                amount: dec!(500),
                outcome: WinnerOutcome::Credited {
                    entry_id: LedgerEntryId::new(),
                    new_winnings: dec!(500),
                },
            },
            WinnerResult {
                user_id: UserId::new(),
                position: 2,
                amount: dec!(300),
                outcome: WinnerOutcome::Failed {
                    reason: AwardFailure::UserNotFound,
                },
            },
            WinnerResult {
                user_id: UserId::new(),
                position: 3,
                amount: dec!(200),
                outcome: WinnerOutcome::AlreadyCredited {
                    entry_id: LedgerEntryId::new(),
                },
            },
        ];
        let report = AwardReport {
            tournament_id,
            results,
        };
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
    }
}
