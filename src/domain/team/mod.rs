//! Team domain module
//!
//! A team is a unique name plus the members registered with it. Team and
//! members are created together and never modified afterwards, and a member
//! identity can belong to at most one team.

mod entity;
mod repository;
mod validation;

pub use entity::{Team, TeamMember};
pub use repository::TeamRepository;
pub use validation::{
    MAX_TEAM_NAME_LENGTH, MIN_TEAM_NAME_LENGTH, TeamValidationError, validate_team_name,
};

#[cfg(test)]
pub use repository::MockTeamRepository;
