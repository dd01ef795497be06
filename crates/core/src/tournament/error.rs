//! Registration error types.
//!
//! One enum carries the full registration surface, from pure validation
//! rejections through storage-level failures, so callers match on a single
//! type regardless of where in the pipeline a registration died.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::tournament::types::{TeamSize, TournamentStatus};
use crate::wallet::error::WalletError;

/// Errors that can occur while registering a player for a tournament.
#[derive(Debug, Error)]
pub enum RegistrationError {
    // ========== Lookup Errors ==========
    /// User not found.
    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    /// Tournament not found.
    #[error("Tournament not found: {0}")]
    TournamentNotFound(Uuid),

    // ========== Admission Errors ==========
    /// The tournament no longer accepts registrations.
    #[error("Tournament is not open for registration (status: {status})")]
    TournamentClosed {
        /// The status that blocked admission.
        status: TournamentStatus,
    },

    /// Every seat is taken.
    #[error("Tournament is full ({max_slots} slots)")]
    TournamentFull {
        /// The tournament's seat capacity.
        max_slots: u32,
    },

    /// The user already holds a seat in this tournament.
    #[error("User is already registered for this tournament")]
    AlreadyRegistered,

    /// The in-game identity is already used by a seat in this tournament.
    #[error("Free Fire id {0} is already registered in this tournament")]
    FreeFireIdTaken(String),

    // ========== Input Errors ==========
    /// The Free-Fire id is missing.
    #[error("Free Fire id is required")]
    FreeFireIdRequired,

    /// The Free-Fire id is not a positive integer literal.
    #[error("Free Fire id must be a positive number: {0}")]
    InvalidFreeFireId(String),

    /// Team selection missing for a multi-member team size.
    #[error("Team selection is required for {team_size} tournaments")]
    TeamSelectionRequired {
        /// The team size that demands a selection.
        team_size: TeamSize,
    },

    /// Team selection supplied for a solo tournament.
    #[error("Team selection does not apply to solo tournaments")]
    TeamSelectionNotApplicable,

    /// Terms must be explicitly accepted.
    #[error("Tournament terms must be accepted")]
    TermsNotAccepted,

    // ========== Funds Errors ==========
    /// The wallet cannot cover the entry fee.
    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientFunds {
        /// The entry fee.
        required: Decimal,
        /// The wallet's total at check time.
        available: Decimal,
    },

    // ========== Concurrency Errors ==========
    /// Concurrent mutations raced this call and retries were exhausted.
    #[error("Concurrent registration conflict, please retry")]
    TransientConflict,

    // ========== Database Errors ==========
    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RegistrationError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::TournamentNotFound(_) => "TOURNAMENT_NOT_FOUND",
            Self::TournamentClosed { .. } => "TOURNAMENT_CLOSED",
            Self::TournamentFull { .. } => "TOURNAMENT_FULL",
            Self::AlreadyRegistered => "ALREADY_REGISTERED",
            Self::FreeFireIdTaken(_) => "FREE_FIRE_ID_TAKEN",
            Self::FreeFireIdRequired => "FREE_FIRE_ID_REQUIRED",
            Self::InvalidFreeFireId(_) => "INVALID_FREE_FIRE_ID",
            Self::TeamSelectionRequired { .. } => "TEAM_SELECTION_REQUIRED",
            Self::TeamSelectionNotApplicable => "TEAM_SELECTION_NOT_APPLICABLE",
            Self::TermsNotAccepted => "TERMS_NOT_ACCEPTED",
            Self::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            Self::TransientConflict => "TRANSIENT_CONFLICT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - validation and user-correctable rejections
            Self::TournamentClosed { .. }
            | Self::TournamentFull { .. }
            | Self::AlreadyRegistered
            | Self::FreeFireIdTaken(_)
            | Self::FreeFireIdRequired
            | Self::InvalidFreeFireId(_)
            | Self::TeamSelectionRequired { .. }
            | Self::TeamSelectionNotApplicable
            | Self::TermsNotAccepted
            | Self::InsufficientFunds { .. } => 400,

            // 404 Not Found
            Self::UserNotFound(_) | Self::TournamentNotFound(_) => 404,

            // 409 Conflict - concurrency errors
            Self::TransientConflict => 409,

            // 500 Internal Server Error
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns true if this error is retryable.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::TransientConflict)
    }
}

impl From<WalletError> for RegistrationError {
    fn from(err: WalletError) -> Self {
        match err {
            WalletError::InsufficientFunds {
                required,
                available,
            } => Self::InsufficientFunds {
                required,
                available,
            },
            // Winnings-only and amount-validation failures cannot arise from a
            // fee split over stored balances; if one does, the data is bad.
            other => Self::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            RegistrationError::AlreadyRegistered.error_code(),
            "ALREADY_REGISTERED"
        );
        assert_eq!(
            RegistrationError::TournamentFull { max_slots: 48 }.error_code(),
            "TOURNAMENT_FULL"
        );
        assert_eq!(
            RegistrationError::TransientConflict.error_code(),
            "TRANSIENT_CONFLICT"
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            RegistrationError::UserNotFound(Uuid::new_v4()).http_status_code(),
            404
        );
        assert_eq!(
            RegistrationError::TermsNotAccepted.http_status_code(),
            400
        );
        assert_eq!(
            RegistrationError::TransientConflict.http_status_code(),
            409
        );
        assert_eq!(
            RegistrationError::Database("boom".to_string()).http_status_code(),
            500
        );
    }

    #[test]
    fn test_only_transient_conflict_is_retryable() {
        assert!(RegistrationError::TransientConflict.is_retryable());
        assert!(!RegistrationError::AlreadyRegistered.is_retryable());
        assert!(!RegistrationError::Database("boom".to_string()).is_retryable());
    }

    #[test]
    fn test_insufficient_funds_converts_from_wallet_error() {
        let err: RegistrationError = WalletError::InsufficientFunds {
            required: dec!(40),
            available: dec!(25),
        }
        .into();
        assert!(matches!(
            err,
            RegistrationError::InsufficientFunds {
                required,
                available,
            } if required == dec!(40) && available == dec!(25)
        ));
    }

    #[test]
    fn test_closed_message_names_status() {
        let err = RegistrationError::TournamentClosed {
            status: TournamentStatus::Active,
        };
        assert!(err.to_string().contains("active"));
    }
}
