//! Ledger repository: the append-only record of wallet money movement.
//!
//! Appends are idempotent over the (user, reference, reference type) key.
//! Replaying an append returns the stored entry instead of writing a second
//! row; the unique index backs that guarantee under concurrency.

use arenavault_core::wallet::{NewLedgerEntry, ReferenceType, TransactionKind};
use arenavault_shared::types::{LedgerEntryId, PageRequest, PageResponse, UserId};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
};
use uuid::Uuid;

use crate::entities::{sea_orm_active_enums as enums, wallet_transactions};

/// Error types for ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// An insert raced a concurrent append holding the same reference key.
    #[error("Ledger entry already exists for user {user_id} with reference {reference}")]
    DuplicateReference {
        /// The wallet owner.
        user_id: Uuid,
        /// The reference that collided.
        reference: String,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Result of an append: the stored entry and whether this call created it.
#[derive(Debug, Clone)]
pub struct LedgerAppend {
    /// The stored ledger entry.
    pub entry: wallet_transactions::Model,
    /// False when the reference key already had an entry.
    pub created: bool,
}

/// Ledger repository for appends and history reads.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    db: DatabaseConnection,
}

impl LedgerRepository {
    /// Creates a new ledger repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Appends an entry, or returns the existing entry holding the same
    /// reference key.
    ///
    /// Losing an insert race to a concurrent append is resolved here by
    /// re-reading the winner's row, so callers see the same answer either
    /// way.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub async fn append(&self, entry: NewLedgerEntry) -> Result<LedgerAppend, LedgerError> {
        match Self::append_on(&self.db, entry.clone()).await {
            Err(LedgerError::DuplicateReference { .. }) => {
                let existing = Self::find_by_reference_on(
                    &self.db,
                    entry.user_id,
                    &entry.reference,
                    entry.reference_type,
                )
                .await?
                .ok_or_else(|| {
                    DbErr::RecordNotFound(format!(
                        "ledger entry with reference {} disappeared after a duplicate insert",
                        entry.reference
                    ))
                })?;
                Ok(LedgerAppend {
                    entry: existing,
                    created: false,
                })
            }
            other => other,
        }
    }

    /// Appends an entry on an arbitrary connection, so coordinators can fold
    /// the append into their own transaction.
    ///
    /// Inside an open transaction a lost insert race surfaces as
    /// [`LedgerError::DuplicateReference`] without re-reading, because the
    /// transaction is already aborted. The caller retries its whole unit of
    /// work instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails or the reference key collides
    /// mid-flight.
    pub async fn append_on<C: ConnectionTrait>(
        conn: &C,
        entry: NewLedgerEntry,
    ) -> Result<LedgerAppend, LedgerError> {
        if let Some(existing) =
            Self::find_by_reference_on(conn, entry.user_id, &entry.reference, entry.reference_type)
                .await?
        {
            tracing::debug!(
                user_id = %entry.user_id,
                reference = %entry.reference,
                entry_id = %existing.id,
                "ledger append deduplicated against an existing entry"
            );
            return Ok(LedgerAppend {
                entry: existing,
                created: false,
            });
        }

        let now: DateTimeWithTimeZone = chrono::Utc::now().into();
        let model = wallet_transactions::ActiveModel {
            id: Set(LedgerEntryId::new().into_inner()),
            user_id: Set(entry.user_id.into_inner()),
            kind: Set(entry.kind.into()),
            amount: Set(entry.amount),
            description: Set(entry.description),
            reference: Set(entry.reference.clone()),
            reference_type: Set(entry.reference_type.into()),
            status: Set(entry.status.into()),
            metadata: Set(entry.metadata),
            created_at: Set(now),
        };

        match model.insert(conn).await {
            Ok(stored) => Ok(LedgerAppend {
                entry: stored,
                created: true,
            }),
            Err(e) if is_unique_violation(&e) => Err(LedgerError::DuplicateReference {
                user_id: entry.user_id.into_inner(),
                reference: entry.reference,
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Finds an entry by its reference key.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn find_by_reference(
        &self,
        user_id: UserId,
        reference: &str,
        reference_type: ReferenceType,
    ) -> Result<Option<wallet_transactions::Model>, LedgerError> {
        Self::find_by_reference_on(&self.db, user_id, reference, reference_type).await
    }

    /// Reference-key lookup on an arbitrary connection.
    pub(crate) async fn find_by_reference_on<C: ConnectionTrait>(
        conn: &C,
        user_id: UserId,
        reference: &str,
        reference_type: ReferenceType,
    ) -> Result<Option<wallet_transactions::Model>, LedgerError> {
        let reference_type: enums::TransactionReference = reference_type.into();
        wallet_transactions::Entity::find()
            .filter(wallet_transactions::Column::UserId.eq(user_id.into_inner()))
            .filter(wallet_transactions::Column::Reference.eq(reference))
            .filter(wallet_transactions::Column::ReferenceType.eq(reference_type))
            .one(conn)
            .await
            .map_err(Into::into)
    }

    /// Lists a user's entries newest first, optionally filtered by kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn entries_for_user(
        &self,
        user_id: UserId,
        kind: Option<TransactionKind>,
        page: &PageRequest,
    ) -> Result<PageResponse<wallet_transactions::Model>, LedgerError> {
        let mut query = wallet_transactions::Entity::find()
            .filter(wallet_transactions::Column::UserId.eq(user_id.into_inner()));

        if let Some(kind) = kind {
            let kind: enums::TransactionKind = kind.into();
            query = query.filter(wallet_transactions::Column::Kind.eq(kind));
        }

        let total = query.clone().count(&self.db).await?;
        let data = query
            .order_by_desc(wallet_transactions::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok(PageResponse::new(data, page.page, page.per_page, total))
    }
}

/// True when a database error is a unique-constraint violation.
pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
