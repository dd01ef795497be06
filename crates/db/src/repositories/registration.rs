//! Registration coordinator: admission, fee deduction, ledger append, and
//! record creation as one database transaction.
//!
//! Concurrency control is optimistic. Wallet and tournament rows carry
//! version counters; every write is guarded by the version read at the start
//! of the attempt, and a lost race rolls the whole attempt back and retries
//! from a fresh snapshot. Either every step of a registration commits or
//! none of them do.

use arenavault_core::tournament::{
    EntryRequest, Occupancy, RegistrationError, TeamSelection, TeamSize, check_admission,
    team_number_for_slot, validate_entry,
};
use arenavault_core::wallet::{FeeSplit, NewLedgerEntry, WalletBalance, split_entry_fee};
use arenavault_shared::types::{
    LedgerEntryId, PageRequest, PageResponse, RegistrationId, TournamentId, UserId,
};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::entities::{registrations, sea_orm_active_enums as enums, tournaments, users};
use crate::repositories::MAX_TXN_ATTEMPTS;
use crate::repositories::ledger::{LedgerError, LedgerRepository, is_unique_violation};

/// Input for registering a user into a tournament.
#[derive(Debug, Clone)]
pub struct RegisterInput {
    /// The registering user.
    pub user_id: UserId,
    /// The target tournament.
    pub tournament_id: TournamentId,
    /// The player's in-game identity, digits only.
    pub free_fire_id: String,
    /// Team placement choice for multi-member team sizes.
    pub team_selection: Option<TeamSelection>,
    /// Explicit acceptance of the tournament terms.
    pub terms_accepted: bool,
}

/// Outcome of a successful registration.
#[derive(Debug, Clone)]
pub struct RegistrationReceipt {
    /// The created registration record.
    pub registration_id: RegistrationId,
    /// The admitted user.
    pub user_id: UserId,
    /// The tournament joined.
    pub tournament_id: TournamentId,
    /// Seat number in admission order, 1-based.
    pub slot_number: u32,
    /// Team assignment, present for multi-member team sizes.
    pub team_number: Option<u32>,
    /// How the entry fee was drawn from the two pools.
    pub split: FeeSplit,
    /// Wallet balance after the deduction.
    pub new_balance: WalletBalance,
    /// Ledger entry recording the fee, absent for free tournaments.
    pub ledger_entry_id: Option<LedgerEntryId>,
}

/// Registration coordinator.
#[derive(Debug, Clone)]
pub struct RegistrationRepository {
    db: DatabaseConnection,
}

impl RegistrationRepository {
    /// Creates a new registration repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a user into a tournament, deducting the entry fee
    /// deposit-first and recording it on the ledger, all in one transaction.
    ///
    /// Attempts that lose a version race are retried up to
    /// [`MAX_TXN_ATTEMPTS`] times from a fresh snapshot; retries turn stale
    /// conflicts back into their real rejection (already registered, full,
    /// and so on) when one applies.
    ///
    /// # Errors
    ///
    /// Returns a [`RegistrationError`] naming the first rule the request
    /// broke, or [`RegistrationError::TransientConflict`] when retries are
    /// exhausted.
    pub async fn register(
        &self,
        input: RegisterInput,
    ) -> Result<RegistrationReceipt, RegistrationError> {
        let mut attempt = 1;
        loop {
            match self.try_register(&input).await {
                Err(RegistrationError::TransientConflict) if attempt < MAX_TXN_ATTEMPTS => {
                    tracing::warn!(
                        user_id = %input.user_id,
                        tournament_id = %input.tournament_id,
                        attempt,
                        "registration lost a concurrent race, retrying"
                    );
                    attempt += 1;
                }
                Err(e) => return Err(e),
                Ok(receipt) => {
                    tracing::info!(
                        user_id = %input.user_id,
                        tournament_id = %input.tournament_id,
                        slot_number = receipt.slot_number,
                        fee_from_deposit = %receipt.split.from_deposit,
                        fee_from_winnings = %receipt.split.from_winnings,
                        "registration completed"
                    );
                    return Ok(receipt);
                }
            }
        }
    }

    /// Finds a registration by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn find_by_id(
        &self,
        id: RegistrationId,
    ) -> Result<Option<registrations::Model>, RegistrationError> {
        registrations::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(db_error)
    }

    /// Lists a tournament's registrations in seat order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_for_tournament(
        &self,
        tournament_id: TournamentId,
        page: &PageRequest,
    ) -> Result<PageResponse<registrations::Model>, RegistrationError> {
        let query = registrations::Entity::find()
            .filter(registrations::Column::TournamentId.eq(tournament_id.into_inner()));

        let total = query.clone().count(&self.db).await.map_err(db_error)?;
        let data = query
            .order_by_asc(registrations::Column::SlotNumber)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(PageResponse::new(data, page.page, page.per_page, total))
    }

    /// Lists a user's registrations newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
        page: &PageRequest,
    ) -> Result<PageResponse<registrations::Model>, RegistrationError> {
        let query = registrations::Entity::find()
            .filter(registrations::Column::UserId.eq(user_id.into_inner()));

        let total = query.clone().count(&self.db).await.map_err(db_error)?;
        let data = query
            .order_by_desc(registrations::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(PageResponse::new(data, page.page, page.per_page, total))
    }

    async fn try_register(
        &self,
        input: &RegisterInput,
    ) -> Result<RegistrationReceipt, RegistrationError> {
        let txn = self.db.begin().await.map_err(db_error)?;

        // Step 1: load both sides of the registration.
        let tournament = tournaments::Entity::find_by_id(input.tournament_id.into_inner())
            .one(&txn)
            .await
            .map_err(db_error)?
            .ok_or(RegistrationError::TournamentNotFound(
                input.tournament_id.into_inner(),
            ))?;
        let user = users::Entity::find_by_id(input.user_id.into_inner())
            .one(&txn)
            .await
            .map_err(db_error)?
            .ok_or(RegistrationError::UserNotFound(input.user_id.into_inner()))?;

        // Step 2: validate the entry form against the tournament's team size.
        let team_size: TeamSize = tournament.team_size.clone().into();
        let form = validate_entry(
            &EntryRequest {
                free_fire_id: input.free_fire_id.clone(),
                team_selection: input.team_selection,
                terms_accepted: input.terms_accepted,
            },
            team_size,
        )?;

        // Step 3: admission. A closed tournament outranks a full one.
        let status = tournament.status.clone().into();
        let occupancy = occupancy_of(&tournament)?;
        check_admission(status, occupancy)?;

        if self
            .seat_exists(&txn, input.user_id, input.tournament_id)
            .await?
        {
            return Err(RegistrationError::AlreadyRegistered);
        }
        if self
            .free_fire_id_exists(&txn, input.tournament_id, &form.free_fire_id)
            .await?
        {
            return Err(RegistrationError::FreeFireIdTaken(form.free_fire_id));
        }

        // Step 4: split the fee deposit-first and debit the wallet.
        let balance = WalletBalance::new(user.deposit_balance, user.winning_balance)
            .map_err(|e| RegistrationError::Internal(format!("stored balance is invalid: {e}")))?;
        let split = split_entry_fee(&balance, tournament.entry_fee)?;
        let new_balance = balance.debit_split(&split)?;

        let now: DateTimeWithTimeZone = chrono::Utc::now().into();

        if !split.is_zero() {
            let updated = users::Entity::update_many()
                .col_expr(users::Column::DepositBalance, Expr::value(new_balance.deposit))
                .col_expr(users::Column::WinningBalance, Expr::value(new_balance.winnings))
                .col_expr(users::Column::WalletVersion, Expr::value(user.wallet_version + 1))
                .col_expr(users::Column::UpdatedAt, Expr::value(now))
                .filter(users::Column::Id.eq(user.id))
                .filter(users::Column::WalletVersion.eq(user.wallet_version))
                .exec(&txn)
                .await
                .map_err(db_error)?;
            if updated.rows_affected == 0 {
                return Err(RegistrationError::TransientConflict);
            }
        }

        // Step 5: record the fee on the ledger. Free tournaments move no
        // money and write no entry.
        let ledger_entry_id = if split.is_zero() {
            None
        } else {
            let entry = NewLedgerEntry::entry_fee(
                input.user_id,
                input.tournament_id,
                tournament.entry_fee,
                &tournament.title,
            );
            let append = LedgerRepository::append_on(&txn, entry).await.map_err(|e| {
                tracing::error!(
                    user_id = %input.user_id,
                    tournament_id = %input.tournament_id,
                    error = %e,
                    "entry-fee ledger append failed, rolling back registration"
                );
                match e {
                    LedgerError::DuplicateReference { .. } => RegistrationError::TransientConflict,
                    LedgerError::Database(db) => RegistrationError::Database(db.to_string()),
                }
            })?;
            Some(LedgerEntryId::from_uuid(append.entry.id))
        };

        // Step 6: create the seat. The unique indexes catch races the
        // pre-checks missed; the retry reclassifies them.
        let slot_number = occupancy.registered_players + 1;
        let registration = registrations::ActiveModel {
            id: Set(RegistrationId::new().into_inner()),
            user_id: Set(user.id),
            tournament_id: Set(tournament.id),
            free_fire_id: Set(form.free_fire_id),
            team_selection: Set(form.team_selection.map(Into::into)),
            entry_fee: Set(tournament.entry_fee),
            slot_number: Set(tournament.registered_players + 1),
            status: Set(enums::RegistrationStatus::Registered),
            username: Set(user.username.clone()),
            tournament_title: Set(tournament.title.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let registration = match registration.insert(&txn).await {
            Ok(model) => model,
            Err(e) if is_unique_violation(&e) => {
                return Err(RegistrationError::TransientConflict);
            }
            Err(e) => return Err(db_error(e)),
        };

        // Step 7: take the seat out of the tournament's capacity.
        let updated = tournaments::Entity::update_many()
            .col_expr(
                tournaments::Column::RegisteredPlayers,
                Expr::value(tournament.registered_players + 1),
            )
            .col_expr(tournaments::Column::Version, Expr::value(tournament.version + 1))
            .col_expr(tournaments::Column::UpdatedAt, Expr::value(now))
            .filter(tournaments::Column::Id.eq(tournament.id))
            .filter(tournaments::Column::Version.eq(tournament.version))
            .exec(&txn)
            .await
            .map_err(db_error)?;
        if updated.rows_affected == 0 {
            return Err(RegistrationError::TransientConflict);
        }

        txn.commit().await.map_err(db_error)?;

        let team_number =
            team_size.requires_team_selection().then(|| team_number_for_slot(slot_number, team_size));
        Ok(RegistrationReceipt {
            registration_id: RegistrationId::from_uuid(registration.id),
            user_id: input.user_id,
            tournament_id: input.tournament_id,
            slot_number,
            team_number,
            split,
            new_balance,
            ledger_entry_id,
        })
    }

    async fn seat_exists(
        &self,
        txn: &DatabaseTransaction,
        user_id: UserId,
        tournament_id: TournamentId,
    ) -> Result<bool, RegistrationError> {
        let existing = registrations::Entity::find()
            .filter(registrations::Column::UserId.eq(user_id.into_inner()))
            .filter(registrations::Column::TournamentId.eq(tournament_id.into_inner()))
            .one(txn)
            .await
            .map_err(db_error)?;
        Ok(existing.is_some())
    }

    async fn free_fire_id_exists(
        &self,
        txn: &DatabaseTransaction,
        tournament_id: TournamentId,
        free_fire_id: &str,
    ) -> Result<bool, RegistrationError> {
        let existing = registrations::Entity::find()
            .filter(registrations::Column::TournamentId.eq(tournament_id.into_inner()))
            .filter(registrations::Column::FreeFireId.eq(free_fire_id))
            .one(txn)
            .await
            .map_err(db_error)?;
        Ok(existing.is_some())
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Reads a tournament row's occupancy into domain terms.
fn occupancy_of(tournament: &tournaments::Model) -> Result<Occupancy, RegistrationError> {
    let registered_players = u32::try_from(tournament.registered_players).map_err(|_| {
        RegistrationError::Internal(format!(
            "tournament {} has a negative registered_players count",
            tournament.id
        ))
    })?;
    let max_slots = u32::try_from(tournament.max_slots).map_err(|_| {
        RegistrationError::Internal(format!(
            "tournament {} has a negative max_slots",
            tournament.id
        ))
    })?;
    Ok(Occupancy {
        registered_players,
        max_slots,
    })
}

fn db_error(err: DbErr) -> RegistrationError {
    RegistrationError::Database(err.to_string())
}
