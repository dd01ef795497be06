//! Batch-level award errors.
//!
//! Per-winner failures are data, not errors; see
//! [`crate::award::types::AwardFailure`]. This enum rejects an entire batch.

use thiserror::Error;
use uuid::Uuid;

use crate::tournament::types::TournamentStatus;

/// Errors that reject an entire payout batch.
#[derive(Debug, Error)]
pub enum AwardError {
    /// Tournament not found.
    #[error("Tournament not found: {0}")]
    TournamentNotFound(Uuid),

    /// Prizes can only be paid after the tournament completes.
    #[error("Tournament is not completed (status: {status})")]
    TournamentNotCompleted {
        /// The status that blocked the payout.
        status: TournamentStatus,
    },

    /// The winner list is empty.
    #[error("Winner list is empty")]
    NoWinners,

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl AwardError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::TournamentNotFound(_) => "TOURNAMENT_NOT_FOUND",
            Self::TournamentNotCompleted { .. } => "TOURNAMENT_NOT_COMPLETED",
            Self::NoWinners => "NO_WINNERS",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::TournamentNotCompleted { .. } | Self::NoWinners => 400,
            Self::TournamentNotFound(_) => 404,
            Self::Database(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AwardError::TournamentNotFound(Uuid::new_v4()).error_code(),
            "TOURNAMENT_NOT_FOUND"
        );
        assert_eq!(
            AwardError::TournamentNotCompleted {
                status: TournamentStatus::Active
            }
            .error_code(),
            "TOURNAMENT_NOT_COMPLETED"
        );
        assert_eq!(AwardError::NoWinners.error_code(), "NO_WINNERS");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AwardError::TournamentNotCompleted {
                status: TournamentStatus::Upcoming
            }
            .http_status_code(),
            400
        );
        assert_eq!(
            AwardError::TournamentNotFound(Uuid::new_v4()).http_status_code(),
            404
        );
        assert_eq!(
            AwardError::Database("boom".to_string()).http_status_code(),
            500
        );
    }
}
