//! Registration input validation.
//!
//! All conditional-required and cross-field checks happen here, before any
//! mutation. Storage constraints are race backstops, not validators.

use crate::tournament::error::RegistrationError;
use crate::tournament::types::{EntryForm, EntryRequest, TeamSize};

/// Validates one registration entry form against the tournament's team size.
///
/// # Errors
///
/// Returns the first failing check: an invalid Free-Fire id, a team selection
/// that is missing (multi-member sizes) or superfluous (solo), or terms not
/// accepted.
pub fn validate_entry(
    request: &EntryRequest,
    team_size: TeamSize,
) -> Result<EntryForm, RegistrationError> {
    let free_fire_id = validate_free_fire_id(&request.free_fire_id)?;

    let team_selection = match (team_size.requires_team_selection(), request.team_selection) {
        (true, None) => {
            return Err(RegistrationError::TeamSelectionRequired { team_size });
        }
        (false, Some(_)) => {
            return Err(RegistrationError::TeamSelectionNotApplicable);
        }
        (_, selection) => selection,
    };

    if !request.terms_accepted {
        return Err(RegistrationError::TermsNotAccepted);
    }

    Ok(EntryForm {
        free_fire_id,
        team_selection,
    })
}

/// Validates the in-game identity: digits only, positive value, no sign.
///
/// Returns the trimmed id on success.
///
/// # Errors
///
/// Returns [`RegistrationError::FreeFireIdRequired`] for empty input and
/// [`RegistrationError::InvalidFreeFireId`] for anything that is not a
/// positive integer literal fitting in a u64.
pub fn validate_free_fire_id(raw: &str) -> Result<String, RegistrationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(RegistrationError::FreeFireIdRequired);
    }
    if !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(RegistrationError::InvalidFreeFireId(trimmed.to_string()));
    }
    match trimmed.parse::<u64>() {
        Ok(0) | Err(_) => Err(RegistrationError::InvalidFreeFireId(trimmed.to_string())),
        Ok(_) => Ok(trimmed.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tournament::types::TeamSelection;
    use rstest::rstest;

    fn request(
        free_fire_id: &str,
        team_selection: Option<TeamSelection>,
        terms_accepted: bool,
    ) -> EntryRequest {
        EntryRequest {
            free_fire_id: free_fire_id.to_string(),
            team_selection,
            terms_accepted,
        }
    }

    #[rstest]
    #[case("123456789")]
    #[case("1")]
    #[case("  987654321  ")]
    #[case("18446744073709551615")] // u64::MAX
    fn test_valid_free_fire_ids(#[case] id: &str) {
        assert_eq!(validate_free_fire_id(id).unwrap(), id.trim());
    }

    #[rstest]
    #[case("abc123")]
    #[case("12 34")]
    #[case("+123")]
    #[case("-123")]
    #[case("12.5")]
    #[case("0")]
    #[case("18446744073709551616")] // u64::MAX + 1
    fn test_invalid_free_fire_ids(#[case] id: &str) {
        assert!(matches!(
            validate_free_fire_id(id),
            Err(RegistrationError::InvalidFreeFireId(_))
        ));
    }

    #[test]
    fn test_empty_free_fire_id_is_required_error() {
        assert!(matches!(
            validate_free_fire_id("   "),
            Err(RegistrationError::FreeFireIdRequired)
        ));
    }

    #[test]
    fn test_solo_entry_needs_no_team_selection() {
        let form = validate_entry(&request("123456", None, true), TeamSize::Solo).unwrap();
        assert_eq!(form.free_fire_id, "123456");
        assert_eq!(form.team_selection, None);
    }

    #[rstest]
    #[case(TeamSize::Duo)]
    #[case(TeamSize::Squad4)]
    #[case(TeamSize::Squad6)]
    fn test_multi_member_sizes_require_team_selection(#[case] team_size: TeamSize) {
        let result = validate_entry(&request("123456", None, true), team_size);
        assert!(matches!(
            result,
            Err(RegistrationError::TeamSelectionRequired { team_size: t }) if t == team_size
        ));
    }

    #[test]
    fn test_multi_member_entry_keeps_selection() {
        let form = validate_entry(
            &request("123456", Some(TeamSelection::PreMade), true),
            TeamSize::Squad4,
        )
        .unwrap();
        assert_eq!(form.team_selection, Some(TeamSelection::PreMade));
    }

    #[test]
    fn test_solo_rejects_team_selection() {
        let result = validate_entry(
            &request("123456", Some(TeamSelection::AutoMatch), true),
            TeamSize::Solo,
        );
        assert!(matches!(
            result,
            Err(RegistrationError::TeamSelectionNotApplicable)
        ));
    }

    #[test]
    fn test_terms_must_be_accepted() {
        let result = validate_entry(&request("123456", None, false), TeamSize::Solo);
        assert!(matches!(result, Err(RegistrationError::TermsNotAccepted)));
    }

    #[test]
    fn test_id_check_runs_before_terms_check() {
        let result = validate_entry(&request("bad-id", None, false), TeamSize::Solo);
        assert!(matches!(
            result,
            Err(RegistrationError::InvalidFreeFireId(_))
        ));
    }
}
