//! HTTP request and response types

pub mod error;
pub mod json;
pub mod query;
pub mod team;
pub mod validation;

pub use error::{ApiError, ApiErrorDetail, ApiErrorResponse, ErrorCode};
pub use json::{Json, ValidatedJson};
pub use query::Query;
pub use team::{AddTeamApiRequest, AddTeamResponse, GetTeamParams, TeamMemberPayload, TeamPayload};
pub use validation::format_validation_errors;
