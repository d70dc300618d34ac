//! Team validation

use thiserror::Error;

pub const MIN_TEAM_NAME_LENGTH: usize = 3;
pub const MAX_TEAM_NAME_LENGTH: usize = 255;

/// Reasons a team name is rejected before any storage access
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TeamValidationError {
    #[error("team_name query required")]
    Required,

    #[error("team name is too short min length is {0}")]
    TooShort(usize),

    #[error("team name is too long max length is {0}")]
    TooLong(usize),
}

/// Validate a team name; length is counted in characters
pub fn validate_team_name(name: &str) -> Result<(), TeamValidationError> {
    if name.is_empty() {
        return Err(TeamValidationError::Required);
    }

    let length = name.chars().count();

    if length < MIN_TEAM_NAME_LENGTH {
        return Err(TeamValidationError::TooShort(MIN_TEAM_NAME_LENGTH));
    }

    if length > MAX_TEAM_NAME_LENGTH {
        return Err(TeamValidationError::TooLong(MAX_TEAM_NAME_LENGTH));
    }

    Ok(())
}
