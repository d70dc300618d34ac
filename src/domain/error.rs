use thiserror::Error;

use super::team::TeamValidationError;

/// Core domain errors
///
/// Every failure a repository or service can report falls into one of these
/// kinds. Storage-level errors are classified into them as close to the
/// failing statement as possible; services only pass them through or add
/// kinds derived from their own pre-checks.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error(transparent)]
    InvalidName(#[from] TeamValidationError),

    #[error("team is empty")]
    EmptyTeam,

    #[error("{team_name} already exists")]
    TeamExists { team_name: String },

    #[error("one or more users are already in a team")]
    MemberExists,

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Infrastructure error: {message}")]
    Infrastructure { message: String },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn team_exists(team_name: impl Into<String>) -> Self {
        Self::TeamExists {
            team_name: team_name.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        Self::Infrastructure {
            message: message.into(),
        }
    }

    /// Reported when the request context is cancelled or its deadline passes
    pub fn cancelled() -> Self {
        Self::infrastructure("operation cancelled")
    }

    /// True when the failure originates in the storage layer rather than the caller's input
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, Self::Infrastructure { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_exists_error() {
        let error = DomainError::team_exists("backend");
        assert_eq!(error.to_string(), "backend already exists");
    }

    #[test]
    fn test_member_exists_error() {
        assert_eq!(
            DomainError::MemberExists.to_string(),
            "one or more users are already in a team"
        );
    }

    #[test]
    fn test_invalid_name_is_transparent() {
        let error: DomainError = TeamValidationError::TooShort(3).into();
        assert_eq!(error.to_string(), "team name is too short min length is 3");
    }

    #[test]
    fn test_only_infrastructure_is_infrastructure() {
        assert!(DomainError::infrastructure("boom").is_infrastructure());
        assert!(DomainError::cancelled().is_infrastructure());
        assert!(!DomainError::EmptyTeam.is_infrastructure());
        assert!(!DomainError::not_found("x").is_infrastructure());
        assert!(!DomainError::MemberExists.is_infrastructure());
    }
}
