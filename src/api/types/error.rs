//! API error envelope

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Machine-readable error codes returned in every error body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidRequest,
    TeamExists,
    UserExists,
    NotFound,
    InternalError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequest => write!(f, "INVALID_REQUEST"),
            Self::TeamExists => write!(f, "TEAM_EXISTS"),
            Self::UserExists => write!(f, "USER_EXISTS"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::InternalError => write!(f, "INTERNAL_ERROR"),
        }
    }
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub code: ErrorCode,
    pub message: String,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                error: ApiErrorDetail {
                    code,
                    message: message.into(),
                },
            },
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ErrorCode::InvalidRequest, message)
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, ErrorCode::NotFound, "resource not found")
    }

    /// Internal details never leave the process; they are logged where the error is raised
    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::InternalError,
            "internal server error",
        )
    }

    pub fn code(&self) -> ErrorCode {
        self.response.error.code
    }

    pub fn message(&self) -> &str {
        &self.response.error.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation { message } => Self::bad_request(message),
            DomainError::InvalidName(reason) => Self::bad_request(reason.to_string()),
            err @ DomainError::EmptyTeam => Self::bad_request(err.to_string()),
            err @ DomainError::TeamExists { .. } => {
                Self::new(StatusCode::BAD_REQUEST, ErrorCode::TeamExists, err.to_string())
            }
            err @ DomainError::MemberExists => {
                Self::new(StatusCode::BAD_REQUEST, ErrorCode::UserExists, err.to_string())
            }
            DomainError::NotFound { .. } => Self::not_found(),
            DomainError::Infrastructure { .. } => Self::internal(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.response.error.code, self.response.error.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::team::TeamValidationError;

    #[test]
    fn test_domain_error_mapping() {
        let cases = [
            (
                DomainError::EmptyTeam,
                StatusCode::BAD_REQUEST,
                ErrorCode::InvalidRequest,
                "team is empty",
            ),
            (
                DomainError::team_exists("backend"),
                StatusCode::BAD_REQUEST,
                ErrorCode::TeamExists,
                "backend already exists",
            ),
            (
                DomainError::MemberExists,
                StatusCode::BAD_REQUEST,
                ErrorCode::UserExists,
                "one or more users are already in a team",
            ),
            (
                DomainError::InvalidName(TeamValidationError::Required),
                StatusCode::BAD_REQUEST,
                ErrorCode::InvalidRequest,
                "team_name query required",
            ),
            (
                DomainError::not_found("Team 'x' not found"),
                StatusCode::NOT_FOUND,
                ErrorCode::NotFound,
                "resource not found",
            ),
            (
                DomainError::infrastructure("connection refused on 10.0.0.7"),
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalError,
                "internal server error",
            ),
        ];

        for (domain_err, status, code, message) in cases {
            let api_err = ApiError::from(domain_err);
            assert_eq!(api_err.status, status);
            assert_eq!(api_err.code(), code);
            assert_eq!(api_err.message(), message);
        }
    }

    #[test]
    fn test_error_serialization() {
        let err = ApiError::from(DomainError::MemberExists);
        let json = serde_json::to_value(&err.response).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "error": {
                    "code": "USER_EXISTS",
                    "message": "one or more users are already in a team"
                }
            })
        );
    }

    #[test]
    fn test_error_code_display_matches_wire_format() {
        for code in [
            ErrorCode::InvalidRequest,
            ErrorCode::TeamExists,
            ErrorCode::UserExists,
            ErrorCode::NotFound,
            ErrorCode::InternalError,
        ] {
            let wire = serde_json::to_string(&code).unwrap();
            assert_eq!(wire, format!("\"{}\"", code));
        }
    }
}
