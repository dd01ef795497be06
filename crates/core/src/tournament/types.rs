//! Tournament domain types.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a tournament.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    /// Published, registrations open.
    Upcoming,
    /// Matches in progress, registrations closed.
    Active,
    /// Finished; prizes may be paid.
    Completed,
}

impl TournamentStatus {
    /// True while the tournament still accepts registrations.
    #[must_use]
    pub const fn accepts_registrations(self) -> bool {
        matches!(self, Self::Upcoming)
    }

    /// True when this status may move to `next`.
    ///
    /// The lifecycle only moves forward, one step at a time.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Upcoming, Self::Active) | (Self::Active, Self::Completed)
        )
    }
}

impl std::fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Upcoming => "upcoming",
            Self::Active => "active",
            Self::Completed => "completed",
        };
        write!(f, "{s}")
    }
}

/// How many players form one team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSize {
    /// Every player for themselves.
    Solo,
    /// Teams of two.
    Duo,
    /// Teams of four.
    Squad4,
    /// Teams of six.
    Squad6,
}

impl TeamSize {
    /// Players per team for this classification.
    #[must_use]
    pub const fn players_per_team(self) -> u32 {
        match self {
            Self::Solo => 1,
            Self::Duo => 2,
            Self::Squad4 => 4,
            Self::Squad6 => 6,
        }
    }

    /// True when registration must carry a team selection.
    #[must_use]
    pub const fn requires_team_selection(self) -> bool {
        self.players_per_team() > 1
    }
}

impl std::fmt::Display for TeamSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Solo => "solo",
            Self::Duo => "duo",
            Self::Squad4 => "squad4",
            Self::Squad6 => "squad6",
        };
        write!(f, "{s}")
    }
}

/// How a player wants to be placed into a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSelection {
    /// Registering alongside a full pre-made team.
    PreMade,
    /// Filled into a team with other solo registrants.
    AutoMatch,
}

/// A tournament's seat usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupancy {
    /// Seats taken so far.
    pub registered_players: u32,
    /// Seat capacity.
    pub max_slots: u32,
}

impl Occupancy {
    /// True when at least one seat is open.
    #[must_use]
    pub const fn has_open_slot(self) -> bool {
        self.registered_players < self.max_slots
    }

    /// Seats still open.
    #[must_use]
    pub const fn remaining(self) -> u32 {
        self.max_slots.saturating_sub(self.registered_players)
    }
}

/// Raw registration input as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRequest {
    /// The player's in-game identity, digits only.
    pub free_fire_id: String,
    /// Team placement choice for multi-member team sizes.
    pub team_selection: Option<TeamSelection>,
    /// Explicit acceptance of the tournament terms.
    pub terms_accepted: bool,
}

/// A validated registration entry form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryForm {
    /// Validated in-game identity.
    pub free_fire_id: String,
    /// Team placement choice, present iff the team size requires one.
    pub team_selection: Option<TeamSelection>,
}

/// Team number assigned from admission order (1-based).
///
/// Seats fill teams in order: slots 1..=n land in team 1, the next n in
/// team 2, and so on, where n is the players-per-team count.
#[must_use]
pub const fn team_number_for_slot(slot_number: u32, team_size: TeamSize) -> u32 {
    (slot_number.saturating_sub(1) / team_size.players_per_team()) + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_upcoming_accepts_registrations() {
        assert!(TournamentStatus::Upcoming.accepts_registrations());
        assert!(!TournamentStatus::Active.accepts_registrations());
        assert!(!TournamentStatus::Completed.accepts_registrations());
    }

    #[test]
    fn test_lifecycle_moves_forward_only() {
        use TournamentStatus::{Active, Completed, Upcoming};

        assert!(Upcoming.can_transition_to(Active));
        assert!(Active.can_transition_to(Completed));

        assert!(!Upcoming.can_transition_to(Completed));
        assert!(!Active.can_transition_to(Upcoming));
        assert!(!Completed.can_transition_to(Active));
        assert!(!Completed.can_transition_to(Upcoming));
    }

    #[test]
    fn test_players_per_team() {
        assert_eq!(TeamSize::Solo.players_per_team(), 1);
        assert_eq!(TeamSize::Duo.players_per_team(), 2);
        assert_eq!(TeamSize::Squad4.players_per_team(), 4);
        assert_eq!(TeamSize::Squad6.players_per_team(), 6);
    }

    #[test]
    fn test_team_selection_required_for_multi_member_sizes() {
        assert!(!TeamSize::Solo.requires_team_selection());
        assert!(TeamSize::Duo.requires_team_selection());
        assert!(TeamSize::Squad4.requires_team_selection());
        assert!(TeamSize::Squad6.requires_team_selection());
    }

    #[test]
    fn test_occupancy_open_and_remaining() {
        let occupancy = Occupancy {
            registered_players: 47,
            max_slots: 48,
        };
        assert!(occupancy.has_open_slot());
        assert_eq!(occupancy.remaining(), 1);

        let full = Occupancy {
            registered_players: 48,
            max_slots: 48,
        };
        assert!(!full.has_open_slot());
        assert_eq!(full.remaining(), 0);
    }

    #[test]
    fn test_team_number_from_admission_order() {
        assert_eq!(team_number_for_slot(1, TeamSize::Duo), 1);
        assert_eq!(team_number_for_slot(2, TeamSize::Duo), 1);
        assert_eq!(team_number_for_slot(3, TeamSize::Duo), 2);
        assert_eq!(team_number_for_slot(9, TeamSize::Squad4), 3);
        assert_eq!(team_number_for_slot(1, TeamSize::Solo), 1);
    }

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&TournamentStatus::Upcoming).unwrap(),
            "\"upcoming\""
        );
        assert_eq!(
            serde_json::to_string(&TeamSelection::AutoMatch).unwrap(),
            "\"auto_match\""
        );
        assert_eq!(
            serde_json::to_string(&TeamSize::Squad4).unwrap(),
            "\"squad4\""
        );
    }
}
