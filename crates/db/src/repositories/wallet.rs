//! Wallet repository: deposit confirmation, withdrawal requests, and balance
//! reads.
//!
//! Both money paths are idempotent over an external reference. A payment
//! gateway retrying a deposit callback, or a client retrying a withdrawal
//! submission, lands on the original ledger entry instead of moving money
//! twice.

use arenavault_core::wallet::{NewLedgerEntry, ReferenceType, WalletBalance, WalletError};
use arenavault_shared::types::{LedgerEntryId, UserId, money};
use rust_decimal::Decimal;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, TransactionTrait};
use serde_json::Value;
use uuid::Uuid;

use crate::entities::users;
use crate::repositories::MAX_TXN_ATTEMPTS;
use crate::repositories::ledger::{LedgerError, LedgerRepository};

/// Error types for wallet operations.
#[derive(Debug, thiserror::Error)]
pub enum WalletOperationError {
    /// User not found.
    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    /// Withdrawal amount below the configured minimum.
    #[error("Withdrawal amount {requested} is below the minimum of {minimum}")]
    BelowMinimum {
        /// The requested amount.
        requested: Decimal,
        /// The configured floor.
        minimum: Decimal,
    },

    /// A balance rule rejected the operation.
    #[error(transparent)]
    Wallet(#[from] WalletError),

    /// Concurrent wallet writes raced this call and retries were exhausted.
    #[error("Concurrent wallet update conflict, please retry")]
    TransientConflict,

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl WalletOperationError {
    /// Stable machine-readable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::BelowMinimum { .. } => "WITHDRAWAL_BELOW_MINIMUM",
            Self::Wallet(e) => e.error_code(),
            Self::TransientConflict => "TRANSIENT_CONFLICT",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// HTTP status code a transport layer should map this error to.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::BelowMinimum { .. } | Self::Wallet(_) => 400,
            Self::UserNotFound(_) => 404,
            Self::TransientConflict => 409,
            Self::Database(_) => 500,
        }
    }

    /// Whether the caller may safely retry the same call.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::TransientConflict)
    }
}

/// Outcome of a deposit confirmation.
#[derive(Debug, Clone)]
pub struct DepositReceipt {
    /// Ledger entry recording the deposit.
    pub entry_id: LedgerEntryId,
    /// False when this order reference was already confirmed.
    pub credited: bool,
    /// Deposited amount.
    pub amount: Decimal,
    /// Balance after this call.
    pub new_balance: WalletBalance,
}

/// Outcome of a withdrawal request.
#[derive(Debug, Clone)]
pub struct WithdrawalReceipt {
    /// Ledger entry recording the pending withdrawal.
    pub entry_id: LedgerEntryId,
    /// False when this withdrawal reference was already recorded.
    pub accepted: bool,
    /// Requested amount.
    pub amount: Decimal,
    /// Balance after this call.
    pub new_balance: WalletBalance,
}

/// Wallet repository for money in and money out.
#[derive(Debug, Clone)]
pub struct WalletRepository {
    db: DatabaseConnection,
    min_withdrawal: Decimal,
}

impl WalletRepository {
    /// Creates a new wallet repository.
    ///
    /// `min_withdrawal` comes from the wallet section of the application
    /// configuration.
    #[must_use]
    pub const fn new(db: DatabaseConnection, min_withdrawal: Decimal) -> Self {
        Self { db, min_withdrawal }
    }

    /// Credits a gateway-confirmed deposit into the deposit pool, once per
    /// order reference.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-positive or over-precise amount, an
    /// unknown user, or a database failure.
    pub async fn confirm_deposit(
        &self,
        user_id: UserId,
        amount: Decimal,
        order_reference: &str,
        metadata: Option<Value>,
    ) -> Result<DepositReceipt, WalletOperationError> {
        let amount = money::validate_positive(amount).map_err(WalletError::from)?;

        let mut attempt = 1;
        loop {
            match self
                .try_confirm_deposit(user_id, amount, order_reference, metadata.clone())
                .await
            {
                Err(WalletOperationError::TransientConflict) if attempt < MAX_TXN_ATTEMPTS => {
                    tracing::warn!(
                        user_id = %user_id,
                        order_reference,
                        attempt,
                        "deposit confirmation lost a version race, retrying"
                    );
                    attempt += 1;
                }
                other => return other,
            }
        }
    }

    /// Records a withdrawal request drawn from the winnings pool.
    ///
    /// Deposited money is never withdrawable. The ledger entry is recorded
    /// pending; settlement happens downstream.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-positive amount, an amount below the
    /// configured minimum, insufficient winnings, an unknown user, or a
    /// database failure.
    pub async fn request_withdrawal(
        &self,
        user_id: UserId,
        amount: Decimal,
        withdrawal_reference: &str,
    ) -> Result<WithdrawalReceipt, WalletOperationError> {
        let amount = money::validate_positive(amount).map_err(WalletError::from)?;
        if amount < self.min_withdrawal {
            return Err(WalletOperationError::BelowMinimum {
                requested: amount,
                minimum: self.min_withdrawal,
            });
        }

        let mut attempt = 1;
        loop {
            match self
                .try_request_withdrawal(user_id, amount, withdrawal_reference)
                .await
            {
                Err(WalletOperationError::TransientConflict) if attempt < MAX_TXN_ATTEMPTS => {
                    tracing::warn!(
                        user_id = %user_id,
                        withdrawal_reference,
                        attempt,
                        "withdrawal request lost a version race, retrying"
                    );
                    attempt += 1;
                }
                other => return other,
            }
        }
    }

    /// Reads a user's current balance.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown user or a database failure.
    pub async fn balance(&self, user_id: UserId) -> Result<WalletBalance, WalletOperationError> {
        let user = users::Entity::find_by_id(user_id.into_inner())
            .one(&self.db)
            .await
            .map_err(db_error)?
            .ok_or(WalletOperationError::UserNotFound(user_id.into_inner()))?;
        stored_balance(&user)
    }

    async fn try_confirm_deposit(
        &self,
        user_id: UserId,
        amount: Decimal,
        order_reference: &str,
        metadata: Option<Value>,
    ) -> Result<DepositReceipt, WalletOperationError> {
        let txn = self.db.begin().await.map_err(db_error)?;

        let user = users::Entity::find_by_id(user_id.into_inner())
            .one(&txn)
            .await
            .map_err(db_error)?
            .ok_or(WalletOperationError::UserNotFound(user_id.into_inner()))?;
        let balance = stored_balance(&user)?;

        if let Some(existing) = LedgerRepository::find_by_reference_on(
            &txn,
            user_id,
            order_reference,
            ReferenceType::OrderId,
        )
        .await
        .map_err(ledger_error)?
        {
            tracing::debug!(
                user_id = %user_id,
                order_reference,
                "deposit already confirmed, returning the original entry"
            );
            return Ok(DepositReceipt {
                entry_id: LedgerEntryId::from_uuid(existing.id),
                credited: false,
                amount: existing.amount,
                new_balance: balance,
            });
        }

        let new_balance = balance.credit_deposit(amount)?;

        let now: DateTimeWithTimeZone = chrono::Utc::now().into();
        let updated = users::Entity::update_many()
            .col_expr(users::Column::DepositBalance, Expr::value(new_balance.deposit))
            .col_expr(users::Column::WalletVersion, Expr::value(user.wallet_version + 1))
            .col_expr(users::Column::UpdatedAt, Expr::value(now))
            .filter(users::Column::Id.eq(user.id))
            .filter(users::Column::WalletVersion.eq(user.wallet_version))
            .exec(&txn)
            .await
            .map_err(db_error)?;
        if updated.rows_affected == 0 {
            return Err(WalletOperationError::TransientConflict);
        }

        let mut entry = NewLedgerEntry::deposit(user_id, amount, order_reference);
        if let Some(metadata) = metadata {
            entry = entry.with_metadata(metadata);
        }
        let append = LedgerRepository::append_on(&txn, entry)
            .await
            .map_err(ledger_error)?;

        txn.commit().await.map_err(db_error)?;

        tracing::info!(
            user_id = %user_id,
            %amount,
            order_reference,
            "deposit confirmed"
        );
        Ok(DepositReceipt {
            entry_id: LedgerEntryId::from_uuid(append.entry.id),
            credited: true,
            amount,
            new_balance,
        })
    }

    async fn try_request_withdrawal(
        &self,
        user_id: UserId,
        amount: Decimal,
        withdrawal_reference: &str,
    ) -> Result<WithdrawalReceipt, WalletOperationError> {
        let txn = self.db.begin().await.map_err(db_error)?;

        let user = users::Entity::find_by_id(user_id.into_inner())
            .one(&txn)
            .await
            .map_err(db_error)?
            .ok_or(WalletOperationError::UserNotFound(user_id.into_inner()))?;
        let balance = stored_balance(&user)?;

        if let Some(existing) = LedgerRepository::find_by_reference_on(
            &txn,
            user_id,
            withdrawal_reference,
            ReferenceType::WithdrawalId,
        )
        .await
        .map_err(ledger_error)?
        {
            tracing::debug!(
                user_id = %user_id,
                withdrawal_reference,
                "withdrawal already recorded, returning the original entry"
            );
            return Ok(WithdrawalReceipt {
                entry_id: LedgerEntryId::from_uuid(existing.id),
                accepted: false,
                amount: existing.amount.abs(),
                new_balance: balance,
            });
        }

        let new_balance = balance.debit_winnings(amount)?;

        let now: DateTimeWithTimeZone = chrono::Utc::now().into();
        let updated = users::Entity::update_many()
            .col_expr(users::Column::WinningBalance, Expr::value(new_balance.winnings))
            .col_expr(users::Column::WalletVersion, Expr::value(user.wallet_version + 1))
            .col_expr(users::Column::UpdatedAt, Expr::value(now))
            .filter(users::Column::Id.eq(user.id))
            .filter(users::Column::WalletVersion.eq(user.wallet_version))
            .exec(&txn)
            .await
            .map_err(db_error)?;
        if updated.rows_affected == 0 {
            return Err(WalletOperationError::TransientConflict);
        }

        let entry = NewLedgerEntry::withdrawal(user_id, amount, withdrawal_reference);
        let append = LedgerRepository::append_on(&txn, entry)
            .await
            .map_err(ledger_error)?;

        txn.commit().await.map_err(db_error)?;

        tracing::info!(
            user_id = %user_id,
            %amount,
            withdrawal_reference,
            "withdrawal request recorded"
        );
        Ok(WithdrawalReceipt {
            entry_id: LedgerEntryId::from_uuid(append.entry.id),
            accepted: true,
            amount,
            new_balance,
        })
    }
}

fn stored_balance(user: &users::Model) -> Result<WalletBalance, WalletOperationError> {
    WalletBalance::new(user.deposit_balance, user.winning_balance)
        .map_err(|e| WalletOperationError::Database(format!("stored balance is invalid: {e}")))
}

fn db_error(err: DbErr) -> WalletOperationError {
    WalletOperationError::Database(err.to_string())
}

fn ledger_error(err: LedgerError) -> WalletOperationError {
    match err {
        LedgerError::DuplicateReference { .. } => WalletOperationError::TransientConflict,
        LedgerError::Database(db) => WalletOperationError::Database(db.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn error_codes_are_stable() {
        let below = WalletOperationError::BelowMinimum {
            requested: dec!(10.00),
            minimum: dec!(50.00),
        };
        assert_eq!(below.error_code(), "WITHDRAWAL_BELOW_MINIMUM");
        assert_eq!(below.http_status_code(), 400);

        let not_found = WalletOperationError::UserNotFound(Uuid::nil());
        assert_eq!(not_found.error_code(), "USER_NOT_FOUND");
        assert_eq!(not_found.http_status_code(), 404);

        assert_eq!(
            WalletOperationError::TransientConflict.http_status_code(),
            409
        );
        assert!(WalletOperationError::TransientConflict.is_retryable());
        assert!(!not_found.is_retryable());
    }

    #[test]
    fn wallet_errors_pass_their_code_through() {
        let err = WalletOperationError::from(WalletError::InsufficientWinnings {
            requested: dec!(50.00),
            available: dec!(10.00),
        });
        assert_eq!(err.error_code(), "INSUFFICIENT_WINNINGS");
        assert_eq!(err.http_status_code(), 400);
    }
}
