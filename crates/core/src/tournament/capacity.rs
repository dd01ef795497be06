//! Pure admission checks against tournament state.
//!
//! These checks run on a snapshot read inside the coordinator's transaction;
//! the conditional occupancy UPDATE re-asserts them at write time, so a
//! concurrent admission can never overshoot capacity.

use crate::tournament::error::RegistrationError;
use crate::tournament::types::{Occupancy, TournamentStatus};

/// Checks whether a tournament can admit one more player.
///
/// Closed beats full: a completed tournament with no open seats reports
/// [`RegistrationError::TournamentClosed`], the more fundamental rejection.
///
/// # Errors
///
/// Returns [`RegistrationError::TournamentClosed`] when the status no longer
/// accepts registrations, and [`RegistrationError::TournamentFull`] when every
/// seat is taken.
pub fn check_admission(
    status: TournamentStatus,
    occupancy: Occupancy,
) -> Result<(), RegistrationError> {
    if !status.accepts_registrations() {
        return Err(RegistrationError::TournamentClosed { status });
    }
    if !occupancy.has_open_slot() {
        return Err(RegistrationError::TournamentFull {
            max_slots: occupancy.max_slots,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occupancy(registered: u32, max: u32) -> Occupancy {
        Occupancy {
            registered_players: registered,
            max_slots: max,
        }
    }

    #[test]
    fn test_upcoming_with_open_seat_admits() {
        assert!(check_admission(TournamentStatus::Upcoming, occupancy(10, 48)).is_ok());
    }

    #[test]
    fn test_last_seat_admits() {
        assert!(check_admission(TournamentStatus::Upcoming, occupancy(47, 48)).is_ok());
    }

    #[test]
    fn test_active_tournament_is_closed() {
        let result = check_admission(TournamentStatus::Active, occupancy(0, 48));
        assert!(matches!(
            result,
            Err(RegistrationError::TournamentClosed {
                status: TournamentStatus::Active
            })
        ));
    }

    #[test]
    fn test_completed_tournament_is_closed() {
        let result = check_admission(TournamentStatus::Completed, occupancy(0, 48));
        assert!(matches!(
            result,
            Err(RegistrationError::TournamentClosed { .. })
        ));
    }

    #[test]
    fn test_full_tournament_is_rejected() {
        let result = check_admission(TournamentStatus::Upcoming, occupancy(48, 48));
        assert!(matches!(
            result,
            Err(RegistrationError::TournamentFull { max_slots: 48 })
        ));
    }

    #[test]
    fn test_closed_wins_over_full() {
        let result = check_admission(TournamentStatus::Completed, occupancy(48, 48));
        assert!(matches!(
            result,
            Err(RegistrationError::TournamentClosed { .. })
        ));
    }
}
