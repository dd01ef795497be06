//! Tournament domain logic.
//!
//! This module implements the registration-side rules:
//! - Lifecycle states and occupancy arithmetic
//! - Pure admission checks (status, capacity)
//! - Registration input validation (Free-Fire id, team selection, terms)
//! - The registration error surface

pub mod capacity;
pub mod error;
pub mod types;
pub mod validation;

pub use capacity::check_admission;
pub use error::RegistrationError;
pub use types::{
    EntryForm, EntryRequest, Occupancy, TeamSelection, TeamSize, TournamentStatus,
    team_number_for_slot,
};
pub use validation::{validate_entry, validate_free_fire_id};
