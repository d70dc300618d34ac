//! Team repository trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::Team;
use crate::domain::{DomainError, RequestContext};

/// Persistence port for team aggregates
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Atomically store a team and all of its members.
    ///
    /// Fails with `TeamExists` when the name is taken, `MemberExists` when any
    /// member identity already belongs to a team, and `Infrastructure` for
    /// everything else. Nothing is persisted on failure.
    async fn register_team(&self, ctx: &RequestContext, team: &Team) -> Result<(), DomainError>;

    /// Load a team and its members by name.
    ///
    /// A team without member rows is reported as `NotFound`.
    async fn fetch_team(&self, ctx: &RequestContext, team_name: &str)
    -> Result<Team, DomainError>;
}
