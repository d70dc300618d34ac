//! Team lookup service

use std::sync::Arc;

use tracing::{debug, error};

use crate::domain::team::{Team, TeamRepository, validate_team_name};
use crate::domain::{DomainError, RequestContext};

const SERVICE: &str = "team.get";

/// Looks a team up by name
pub struct TeamLookupService<R: TeamRepository> {
    repository: Arc<R>,
}

impl<R: TeamRepository> TeamLookupService<R> {
    /// Create a new lookup service
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Fetch a team and its members.
    ///
    /// The name is checked for presence and length before any storage access.
    pub async fn get_team(&self, ctx: &RequestContext, team_name: &str) -> Result<Team, DomainError> {
        validate_team_name(team_name)?;

        match self.repository.fetch_team(ctx, team_name).await {
            Ok(team) => {
                debug!(
                    service = SERVICE,
                    request_id = %ctx.request_id(),
                    team_name = %team_name,
                    members = team.members().len(),
                    "Team found"
                );
                Ok(team)
            }
            Err(err) => {
                if err.is_infrastructure() {
                    error!(
                        service = SERVICE,
                        request_id = %ctx.request_id(),
                        team_name = %team_name,
                        error = %err,
                        "repo.fetch_team failed"
                    );
                } else {
                    debug!(
                        service = SERVICE,
                        request_id = %ctx.request_id(),
                        team_name = %team_name,
                        error = %err,
                        "Team lookup miss"
                    );
                }
                Err(err)
            }
        }
    }
}
