//! Ledger vocabulary: transaction kinds, dedupe references, sign conventions.

use arenavault_shared::types::{TournamentId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The kind of monetary event a ledger entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Gateway-confirmed top-up credited to the deposit pool.
    Deposit,
    /// Prize money credited to the winnings pool.
    Winning,
    /// Tournament entry fee debited across both pools.
    EntryFee,
    /// Cash-out debited from the winnings pool.
    Withdrawal,
}

impl TransactionKind {
    /// True for kinds that add money to the wallet.
    #[must_use]
    pub const fn is_credit(self) -> bool {
        matches!(self, Self::Deposit | Self::Winning)
    }

    /// Applies this kind's sign convention to an unsigned magnitude.
    ///
    /// Credits are recorded positive, debits negative.
    #[must_use]
    pub fn signed_amount(self, magnitude: Decimal) -> Decimal {
        if self.is_credit() { magnitude } else { -magnitude }
    }
}

/// What a ledger entry's dedupe reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceType {
    /// A tournament (entry fees and prize payouts).
    TournamentId,
    /// A payment-gateway order (deposits).
    OrderId,
    /// A withdrawal request (cash-outs).
    WithdrawalId,
}

/// Settlement state of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// Recorded but not yet settled (withdrawals awaiting payout).
    Pending,
    /// Fully settled.
    Completed,
    /// Settlement failed externally.
    Failed,
}

impl TransactionStatus {
    /// True once the entry's money movement is final.
    #[must_use]
    pub const fn is_settled(self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Input for appending one ledger entry.
///
/// Build through the kind-specific constructors so sign conventions and
/// dedupe references stay uniform across call sites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLedgerEntry {
    /// Wallet owner.
    pub user_id: UserId,
    /// Event kind.
    pub kind: TransactionKind,
    /// Signed amount (credits positive, debits negative).
    pub amount: Decimal,
    /// Human-readable line for statements.
    pub description: String,
    /// Dedupe reference (pairs with `reference_type`).
    pub reference: String,
    /// What the reference points at.
    pub reference_type: ReferenceType,
    /// Entry status at append time.
    pub status: TransactionStatus,
    /// Free-form context stored with the entry.
    pub metadata: Option<Value>,
}

impl NewLedgerEntry {
    /// A gateway-confirmed deposit credit, deduplicated by the order id.
    #[must_use]
    pub fn deposit(user_id: UserId, amount: Decimal, order_reference: impl Into<String>) -> Self {
        Self {
            user_id,
            kind: TransactionKind::Deposit,
            amount: TransactionKind::Deposit.signed_amount(amount),
            description: "Wallet deposit".to_string(),
            reference: order_reference.into(),
            reference_type: ReferenceType::OrderId,
            status: TransactionStatus::Completed,
            metadata: None,
        }
    }

    /// A tournament entry-fee debit, deduplicated by the tournament id.
    #[must_use]
    pub fn entry_fee(
        user_id: UserId,
        tournament_id: TournamentId,
        fee: Decimal,
        tournament_title: &str,
    ) -> Self {
        Self {
            user_id,
            kind: TransactionKind::EntryFee,
            amount: TransactionKind::EntryFee.signed_amount(fee),
            description: format!("Entry fee for {tournament_title}"),
            reference: tournament_id.to_string(),
            reference_type: ReferenceType::TournamentId,
            status: TransactionStatus::Completed,
            metadata: None,
        }
    }

    /// A prize credit for one winner position, deduplicated per winner.
    #[must_use]
    pub fn winning(
        user_id: UserId,
        tournament_id: TournamentId,
        position: u32,
        amount: Decimal,
        tournament_title: &str,
    ) -> Self {
        Self {
            user_id,
            kind: TransactionKind::Winning,
            amount: TransactionKind::Winning.signed_amount(amount),
            description: format!("Prize for position {position} in {tournament_title}"),
            reference: winning_reference(tournament_id, user_id, position),
            reference_type: ReferenceType::TournamentId,
            status: TransactionStatus::Completed,
            metadata: None,
        }
    }

    /// A withdrawal debit, recorded pending until external settlement.
    #[must_use]
    pub fn withdrawal(
        user_id: UserId,
        amount: Decimal,
        withdrawal_reference: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            kind: TransactionKind::Withdrawal,
            amount: TransactionKind::Withdrawal.signed_amount(amount),
            description: "Winnings withdrawal".to_string(),
            reference: withdrawal_reference.into(),
            reference_type: ReferenceType::WithdrawalId,
            status: TransactionStatus::Pending,
            metadata: None,
        }
    }

    /// Attaches free-form metadata to the entry.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Dedupe reference for one winner's payout: `tournament:user:position`.
///
/// Each position a user takes in a tournament can be paid at most once.
#[must_use]
pub fn winning_reference(tournament_id: TournamentId, user_id: UserId, position: u32) -> String {
    format!("{tournament_id}:{user_id}:{position}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_credit_kinds() {
        assert!(TransactionKind::Deposit.is_credit());
        assert!(TransactionKind::Winning.is_credit());
        assert!(!TransactionKind::EntryFee.is_credit());
        assert!(!TransactionKind::Withdrawal.is_credit());
    }

    #[test]
    fn test_signed_amount_applies_convention() {
        assert_eq!(
            TransactionKind::Deposit.signed_amount(dec!(100)),
            dec!(100)
        );
        assert_eq!(
            TransactionKind::EntryFee.signed_amount(dec!(40)),
            dec!(-40)
        );
        assert_eq!(
            TransactionKind::Withdrawal.signed_amount(dec!(75.50)),
            dec!(-75.50)
        );
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&TransactionKind::EntryFee).unwrap(),
            "\"entry_fee\""
        );
        assert_eq!(
            serde_json::to_string(&ReferenceType::TournamentId).unwrap(),
            "\"tournament_id\""
        );
    }

    #[test]
    fn test_entry_fee_constructor_negates_and_references_tournament() {
        let user = UserId::new();
        let tournament = TournamentId::new();
        let entry = NewLedgerEntry::entry_fee(user, tournament, dec!(40), "Friday Scrims");

        assert_eq!(entry.amount, dec!(-40));
        assert_eq!(entry.reference, tournament.to_string());
        assert_eq!(entry.reference_type, ReferenceType::TournamentId);
        assert_eq!(entry.status, TransactionStatus::Completed);
        assert!(entry.description.contains("Friday Scrims"));
    }

    #[test]
    fn test_winning_reference_format() {
        let user = UserId::new();
        let tournament = TournamentId::new();
        assert_eq!(
            winning_reference(tournament, user, 2),
            format!("{tournament}:{user}:2")
        );
    }

    #[test]
    fn test_winning_constructor_uses_per_winner_reference() {
        let user = UserId::new();
        let tournament = TournamentId::new();
        let entry = NewLedgerEntry::winning(user, tournament, 1, dec!(500), "Weekly Cup");

        assert_eq!(entry.amount, dec!(500));
        assert_eq!(entry.reference, winning_reference(tournament, user, 1));
    }

    #[test]
    fn test_withdrawal_starts_pending() {
        let entry = NewLedgerEntry::withdrawal(UserId::new(), dec!(200), "wd-81");
        assert_eq!(entry.status, TransactionStatus::Pending);
        assert_eq!(entry.amount, dec!(-200));
        assert_eq!(entry.reference_type, ReferenceType::WithdrawalId);
    }

    #[test]
    fn test_with_metadata() {
        let entry = NewLedgerEntry::deposit(UserId::new(), dec!(50), "order-9")
            .with_metadata(json!({"gateway": "razorpay"}));
        assert_eq!(entry.metadata, Some(json!({"gateway": "razorpay"})));
    }
}
