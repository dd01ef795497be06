//! Tournament repository: creation, lifecycle transitions, and catalog reads.

use arenavault_core::tournament::{TeamSize, TournamentStatus};
use arenavault_shared::types::{MoneyError, PageRequest, PageResponse, TournamentId, money};
use rust_decimal::Decimal;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveEnum, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set};
use uuid::Uuid;

use crate::entities::{sea_orm_active_enums as enums, tournaments};
use crate::repositories::MAX_TXN_ATTEMPTS;

/// Error types for tournament management.
#[derive(Debug, thiserror::Error)]
pub enum TournamentError {
    /// Tournament not found.
    #[error("Tournament not found: {0}")]
    NotFound(Uuid),

    /// A tournament needs a title.
    #[error("Tournament title must not be empty")]
    TitleRequired,

    /// Entry fee or prize pool failed monetary validation.
    #[error("Invalid amount: {0}")]
    Amount(#[from] MoneyError),

    /// Capacity must admit at least one player.
    #[error("max_slots must be at least 1, got {0}")]
    InvalidMaxSlots(u32),

    /// Capacity must divide evenly into full teams.
    #[error("max_slots {max_slots} is not a multiple of the {team_size} team size")]
    MaxSlotsNotDivisible {
        /// The requested capacity.
        max_slots: u32,
        /// The team size it must divide into.
        team_size: TeamSize,
    },

    /// The lifecycle only moves forward.
    #[error("Cannot transition tournament from {from} to {to}")]
    InvalidTransition {
        /// Current status.
        from: TournamentStatus,
        /// Requested status.
        to: TournamentStatus,
    },

    /// Concurrent updates raced this call and retries were exhausted.
    #[error("Concurrent tournament update conflict, please retry")]
    TransientConflict,

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl TournamentError {
    /// Stable machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "TOURNAMENT_NOT_FOUND",
            Self::TitleRequired => "TITLE_REQUIRED",
            Self::Amount(_) => "INVALID_AMOUNT",
            Self::InvalidMaxSlots(_) => "INVALID_MAX_SLOTS",
            Self::MaxSlotsNotDivisible { .. } => "MAX_SLOTS_NOT_DIVISIBLE",
            Self::InvalidTransition { .. } => "INVALID_STATUS_TRANSITION",
            Self::TransientConflict => "TRANSIENT_CONFLICT",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// HTTP status code a transport layer should map this error to.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::TitleRequired
            | Self::Amount(_)
            | Self::InvalidMaxSlots(_)
            | Self::MaxSlotsNotDivisible { .. }
            | Self::InvalidTransition { .. } => 400,
            Self::NotFound(_) => 404,
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

/// Input for creating a tournament.
#[derive(Debug, Clone)]
pub struct NewTournament {
    /// Display title.
    pub title: String,
    /// Optional long-form description.
    pub description: Option<String>,
    /// Fee charged per registration. Zero makes the tournament free.
    pub entry_fee: Decimal,
    /// Total prize money on offer.
    pub prize_pool: Decimal,
    /// Seat capacity.
    pub max_slots: u32,
    /// Players per team classification.
    pub team_size: TeamSize,
    /// Scheduled start time.
    pub starts_at: DateTimeWithTimeZone,
}

impl NewTournament {
    fn validate(&self) -> Result<(), TournamentError> {
        if self.title.trim().is_empty() {
            return Err(TournamentError::TitleRequired);
        }
        money::validate_non_negative(self.entry_fee)?;
        money::validate_non_negative(self.prize_pool)?;
        if self.max_slots == 0 {
            return Err(TournamentError::InvalidMaxSlots(self.max_slots));
        }
        let players = self.team_size.players_per_team();
        if self.max_slots % players != 0 {
            return Err(TournamentError::MaxSlotsNotDivisible {
                max_slots: self.max_slots,
                team_size: self.team_size,
            });
        }
        Ok(())
    }
}

/// Tournament repository for lifecycle and catalog operations.
#[derive(Debug, Clone)]
pub struct TournamentRepository {
    db: DatabaseConnection,
}

impl TournamentRepository {
    /// Creates a new tournament repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a tournament in the upcoming state with zero occupancy.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty title, negative or
    /// over-precise amounts, or a capacity that does not fill whole teams.
    pub async fn create(&self, input: NewTournament) -> Result<tournaments::Model, TournamentError> {
        input.validate()?;

        let max_slots = i32::try_from(input.max_slots)
            .map_err(|_| TournamentError::InvalidMaxSlots(input.max_slots))?;
        let now: DateTimeWithTimeZone = chrono::Utc::now().into();
        let model = tournaments::ActiveModel {
            id: Set(TournamentId::new().into_inner()),
            title: Set(input.title),
            description: Set(input.description),
            entry_fee: Set(input.entry_fee),
            prize_pool: Set(input.prize_pool),
            max_slots: Set(max_slots),
            registered_players: Set(0),
            team_size: Set(input.team_size.into()),
            status: Set(enums::TournamentStatus::Upcoming),
            starts_at: Set(input.starts_at),
            version: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
        };

        model.insert(&self.db).await.map_err(db_error)
    }

    /// Opens play: upcoming -> active. Registration closes.
    ///
    /// # Errors
    ///
    /// Returns [`TournamentError::InvalidTransition`] when the tournament is
    /// not in the upcoming state.
    pub async fn mark_active(&self, id: TournamentId) -> Result<tournaments::Model, TournamentError> {
        self.transition(id, TournamentStatus::Active).await
    }

    /// Closes out play: active -> completed. Prizes may now be awarded.
    ///
    /// # Errors
    ///
    /// Returns [`TournamentError::InvalidTransition`] when the tournament is
    /// not in the active state.
    pub async fn mark_completed(&self, id: TournamentId) -> Result<tournaments::Model, TournamentError> {
        self.transition(id, TournamentStatus::Completed).await
    }

    /// Finds a tournament by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn find_by_id(&self, id: TournamentId) -> Result<Option<tournaments::Model>, TournamentError> {
        tournaments::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(db_error)
    }

    /// Lists tournaments soonest start first, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(
        &self,
        status: Option<TournamentStatus>,
        page: &PageRequest,
    ) -> Result<PageResponse<tournaments::Model>, TournamentError> {
        let mut query = tournaments::Entity::find();
        if let Some(status) = status {
            let status: enums::TournamentStatus = status.into();
            query = query.filter(tournaments::Column::Status.eq(status));
        }

        let total = query.clone().count(&self.db).await.map_err(db_error)?;
        let data = query
            .order_by_asc(tournaments::Column::StartsAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(PageResponse::new(data, page.page, page.per_page, total))
    }

    async fn transition(
        &self,
        id: TournamentId,
        to: TournamentStatus,
    ) -> Result<tournaments::Model, TournamentError> {
        let mut attempt = 1;
        loop {
            match self.try_transition(id, to).await {
                Err(TournamentError::TransientConflict) if attempt < MAX_TXN_ATTEMPTS => {
                    tracing::warn!(
                        tournament_id = %id,
                        %to,
                        attempt,
                        "status transition lost a version race, retrying"
                    );
                    attempt += 1;
                }
                other => return other,
            }
        }
    }

    async fn try_transition(
        &self,
        id: TournamentId,
        to: TournamentStatus,
    ) -> Result<tournaments::Model, TournamentError> {
        let tournament = self
            .find_by_id(id)
            .await?
            .ok_or(TournamentError::NotFound(id.into_inner()))?;

        let from: TournamentStatus = tournament.status.clone().into();
        if !from.can_transition_to(to) {
            return Err(TournamentError::InvalidTransition { from, to });
        }

        let now: DateTimeWithTimeZone = chrono::Utc::now().into();
        let status: enums::TournamentStatus = to.into();
        let updated = tournaments::Entity::update_many()
            .col_expr(tournaments::Column::Status, status.as_enum())
            .col_expr(tournaments::Column::Version, Expr::value(tournament.version + 1))
            .col_expr(tournaments::Column::UpdatedAt, Expr::value(now))
            .filter(tournaments::Column::Id.eq(id.into_inner()))
            .filter(tournaments::Column::Version.eq(tournament.version))
            .exec(&self.db)
            .await
            .map_err(db_error)?;

        if updated.rows_affected == 0 {
            return Err(TournamentError::TransientConflict);
        }

        self.find_by_id(id)
            .await?
            .ok_or(TournamentError::NotFound(id.into_inner()))
    }
}

fn db_error(err: sea_orm::DbErr) -> TournamentError {
    TournamentError::Database(err.to_string())
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn valid_input() -> NewTournament {
        NewTournament {
            title: "Friday Night Showdown".to_string(),
            description: None,
            entry_fee: dec!(25.00),
            prize_pool: dec!(500.00),
            max_slots: 48,
            team_size: TeamSize::Squad4,
            starts_at: chrono::Utc::now().into(),
        }
    }

    #[test]
    fn accepts_a_well_formed_tournament() {
        assert!(valid_input().validate().is_ok());
    }

    #[test]
    fn rejects_blank_title() {
        let mut input = valid_input();
        input.title = "   ".to_string();
        assert!(matches!(input.validate(), Err(TournamentError::TitleRequired)));
    }

    #[test]
    fn rejects_negative_entry_fee() {
        let mut input = valid_input();
        input.entry_fee = dec!(-1.00);
        assert!(matches!(input.validate(), Err(TournamentError::Amount(_))));
    }

    #[test]
    fn rejects_over_precise_prize_pool() {
        let mut input = valid_input();
        input.prize_pool = dec!(100.001);
        assert!(matches!(input.validate(), Err(TournamentError::Amount(_))));
    }

    #[test]
    fn rejects_zero_capacity() {
        let mut input = valid_input();
        input.max_slots = 0;
        assert!(matches!(
            input.validate(),
            Err(TournamentError::InvalidMaxSlots(0))
        ));
    }

    #[test]
    fn rejects_capacity_that_leaves_a_partial_team() {
        let mut input = valid_input();
        input.max_slots = 50;
        assert!(matches!(
            input.validate(),
            Err(TournamentError::MaxSlotsNotDivisible {
                max_slots: 50,
                team_size: TeamSize::Squad4,
            })
        ));
    }

    #[test]
    fn solo_capacity_is_never_partial() {
        let mut input = valid_input();
        input.team_size = TeamSize::Solo;
        input.max_slots = 17;
        assert!(input.validate().is_ok());
    }

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(TournamentError::TitleRequired.error_code(), "TITLE_REQUIRED");
        assert_eq!(TournamentError::TransientConflict.error_code(), "TRANSIENT_CONFLICT");
        assert_eq!(TournamentError::TitleRequired.http_status_code(), 400);
        assert_eq!(TournamentError::NotFound(Uuid::nil()).http_status_code(), 404);
        assert_eq!(TournamentError::TransientConflict.http_status_code(), 409);
        assert!(TournamentError::TransientConflict.is_retryable());
        assert!(!TournamentError::TitleRequired.is_retryable());
    }
}
