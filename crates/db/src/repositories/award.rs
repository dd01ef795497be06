//! Award coordinator: prize payouts for completed tournaments.
//!
//! Winners are credited independently, each in its own transaction, so one
//! bad line never blocks the rest of the batch. The per-position ledger
//! reference makes whole batches safe to re-run after a partial failure.

use arenavault_core::award::{
    AwardError, AwardFailure, AwardReport, WinnerInput, WinnerOutcome, WinnerResult,
};
use arenavault_core::tournament::TournamentStatus;
use arenavault_core::wallet::{NewLedgerEntry, ReferenceType, WalletBalance, winning_reference};
use arenavault_shared::types::{LedgerEntryId, TournamentId};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, TransactionTrait};

use crate::entities::{tournaments, users};
use crate::repositories::MAX_TXN_ATTEMPTS;
use crate::repositories::ledger::{LedgerError, LedgerRepository};

/// Award coordinator.
#[derive(Debug, Clone)]
pub struct AwardRepository {
    db: DatabaseConnection,
}

impl AwardRepository {
    /// Creates a new award repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Credits a list of winners for a completed tournament.
    ///
    /// The batch reports per-winner outcomes instead of failing as a whole;
    /// a winner already paid for their position comes back as
    /// [`WinnerOutcome::AlreadyCredited`].
    ///
    /// # Errors
    ///
    /// Returns an error when the tournament is missing or not completed, or
    /// when the winner list is empty. Per-winner failures are reported in
    /// the result list, not as errors.
    pub async fn award(
        &self,
        tournament_id: TournamentId,
        winners: Vec<WinnerInput>,
    ) -> Result<AwardReport, AwardError> {
        if winners.is_empty() {
            return Err(AwardError::NoWinners);
        }

        let tournament = tournaments::Entity::find_by_id(tournament_id.into_inner())
            .one(&self.db)
            .await
            .map_err(|e| AwardError::Database(e.to_string()))?
            .ok_or(AwardError::TournamentNotFound(tournament_id.into_inner()))?;

        let status: TournamentStatus = tournament.status.clone().into();
        if status != TournamentStatus::Completed {
            return Err(AwardError::TournamentNotCompleted { status });
        }

        let mut results = Vec::with_capacity(winners.len());
        for winner in winners {
            let outcome = self.credit_winner(&tournament, &winner).await;
            if let WinnerOutcome::Failed { reason } = &outcome {
                tracing::warn!(
                    tournament_id = %tournament_id,
                    user_id = %winner.user_id,
                    position = winner.position,
                    ?reason,
                    "winner credit failed"
                );
            }
            results.push(WinnerResult {
                user_id: winner.user_id,
                position: winner.position,
                amount: winner.amount,
                outcome,
            });
        }

        let report = AwardReport {
            tournament_id,
            results,
        };
        tracing::info!(
            tournament_id = %tournament_id,
            succeeded = report.succeeded(),
            failed = report.failed(),
            "award batch finished"
        );
        Ok(report)
    }

    /// Credits one winner, retrying bounded times when a wallet race is lost.
    async fn credit_winner(
        &self,
        tournament: &tournaments::Model,
        winner: &WinnerInput,
    ) -> WinnerOutcome {
        let mut attempt = 1;
        loop {
            match self.try_credit(tournament, winner).await {
                Err(AwardFailure::Conflict) if attempt < MAX_TXN_ATTEMPTS => {
                    tracing::warn!(
                        user_id = %winner.user_id,
                        position = winner.position,
                        attempt,
                        "winner credit lost a version race, retrying"
                    );
                    attempt += 1;
                }
                Err(reason) => return WinnerOutcome::Failed { reason },
                Ok(outcome) => return outcome,
            }
        }
    }

    async fn try_credit(
        &self,
        tournament: &tournaments::Model,
        winner: &WinnerInput,
    ) -> Result<WinnerOutcome, AwardFailure> {
        winner.validate()?;

        let tournament_id = TournamentId::from_uuid(tournament.id);
        let reference = winning_reference(tournament_id, winner.user_id, winner.position);

        let txn = self.db.begin().await.map_err(db_failure)?;

        // A previous run may already have paid this position.
        if let Some(existing) = LedgerRepository::find_by_reference_on(
            &txn,
            winner.user_id,
            &reference,
            ReferenceType::TournamentId,
        )
        .await
        .map_err(ledger_failure)?
        {
            return Ok(WinnerOutcome::AlreadyCredited {
                entry_id: LedgerEntryId::from_uuid(existing.id),
            });
        }

        let user = users::Entity::find_by_id(winner.user_id.into_inner())
            .one(&txn)
            .await
            .map_err(db_failure)?
            .ok_or(AwardFailure::UserNotFound)?;

        let balance = WalletBalance::new(user.deposit_balance, user.winning_balance)
            .map_err(|e| AwardFailure::Database(format!("stored balance is invalid: {e}")))?;
        let new_balance = balance
            .credit_winnings(winner.amount)
            .map_err(|_| AwardFailure::InvalidAmount)?;

        let now: DateTimeWithTimeZone = chrono::Utc::now().into();
        let updated = users::Entity::update_many()
            .col_expr(users::Column::WinningBalance, Expr::value(new_balance.winnings))
            .col_expr(users::Column::WalletVersion, Expr::value(user.wallet_version + 1))
            .col_expr(users::Column::UpdatedAt, Expr::value(now))
            .filter(users::Column::Id.eq(user.id))
            .filter(users::Column::WalletVersion.eq(user.wallet_version))
            .exec(&txn)
            .await
            .map_err(db_failure)?;
        if updated.rows_affected == 0 {
            return Err(AwardFailure::Conflict);
        }

        let entry = NewLedgerEntry::winning(
            winner.user_id,
            tournament_id,
            winner.position,
            winner.amount,
            &tournament.title,
        );
        let append = LedgerRepository::append_on(&txn, entry)
            .await
            .map_err(ledger_failure)?;

        txn.commit().await.map_err(db_failure)?;

        Ok(WinnerOutcome::Credited {
            entry_id: LedgerEntryId::from_uuid(append.entry.id),
            new_winnings: new_balance.winnings,
        })
    }
}

fn db_failure(err: DbErr) -> AwardFailure {
    AwardFailure::Database(err.to_string())
}

fn ledger_failure(err: LedgerError) -> AwardFailure {
    match err {
        LedgerError::DuplicateReference { .. } => AwardFailure::Conflict,
        LedgerError::Database(db) => AwardFailure::Database(db.to_string()),
    }
}
