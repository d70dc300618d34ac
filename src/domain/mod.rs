//! Domain layer - team aggregate, validation rules, repository port and errors

pub mod context;
pub mod error;
pub mod team;

pub use context::RequestContext;
pub use error::DomainError;
pub use team::{Team, TeamMember, TeamRepository};
