//! Team registration service

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::domain::team::{Team, TeamRepository};
use crate::domain::{DomainError, RequestContext};

const SERVICE: &str = "team.add";

/// Registers a team together with all of its members
pub struct TeamRegistrationService<R: TeamRepository> {
    repository: Arc<R>,
}

impl<R: TeamRepository> TeamRegistrationService<R> {
    /// Create a new registration service
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Register `team` and return it unchanged on success.
    ///
    /// A team without members is rejected with `EmptyTeam` before the
    /// repository is touched; repository error kinds are passed through.
    pub async fn add_team(&self, ctx: &RequestContext, team: Team) -> Result<Team, DomainError> {
        if !team.has_members() {
            info!(
                service = SERVICE,
                request_id = %ctx.request_id(),
                team_name = %team.team_name(),
                "Rejected team without members"
            );
            return Err(DomainError::EmptyTeam);
        }

        info!(
            service = SERVICE,
            request_id = %ctx.request_id(),
            team_name = %team.team_name(),
            members = team.members().len(),
            "Registering team"
        );

        match self.repository.register_team(ctx, &team).await {
            Ok(()) => Ok(team),
            Err(err) if err.is_infrastructure() => {
                error!(
                    service = SERVICE,
                    request_id = %ctx.request_id(),
                    team_name = %team.team_name(),
                    error = %err,
                    "repo.register_team failed"
                );
                Err(err)
            }
            Err(err) => {
                warn!(
                    service = SERVICE,
                    request_id = %ctx.request_id(),
                    team_name = %team.team_name(),
                    error = %err,
                    "Team registration rejected"
                );
                Err(err)
            }
        }
    }
}
