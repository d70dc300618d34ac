//! Application state for shared services

use std::sync::Arc;
use std::time::Duration;

use crate::domain::team::{Team, TeamRepository};
use crate::domain::{DomainError, RequestContext};
use crate::infrastructure::team::{TeamLookupService, TeamRegistrationService};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub team_registration: Arc<dyn TeamRegistrationServiceTrait>,
    pub team_lookup: Arc<dyn TeamLookupServiceTrait>,
    /// Deadline applied to each request's `RequestContext`
    pub request_timeout: Duration,
}

impl AppState {
    /// Build both team services on top of one shared repository
    pub fn with_repository<R: TeamRepository + 'static>(
        repository: Arc<R>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            team_registration: Arc::new(TeamRegistrationService::new(Arc::clone(&repository))),
            team_lookup: Arc::new(TeamLookupService::new(repository)),
            request_timeout,
        }
    }
}

/// Trait for team registration
#[async_trait::async_trait]
pub trait TeamRegistrationServiceTrait: Send + Sync {
    async fn add_team(&self, ctx: &RequestContext, team: Team) -> Result<Team, DomainError>;
}

/// Trait for team lookup
#[async_trait::async_trait]
pub trait TeamLookupServiceTrait: Send + Sync {
    async fn get_team(&self, ctx: &RequestContext, team_name: &str) -> Result<Team, DomainError>;
}

#[async_trait::async_trait]
impl<R: TeamRepository + 'static> TeamRegistrationServiceTrait for TeamRegistrationService<R> {
    async fn add_team(&self, ctx: &RequestContext, team: Team) -> Result<Team, DomainError> {
        TeamRegistrationService::add_team(self, ctx, team).await
    }
}

#[async_trait::async_trait]
impl<R: TeamRepository + 'static> TeamLookupServiceTrait for TeamLookupService<R> {
    async fn get_team(&self, ctx: &RequestContext, team_name: &str) -> Result<Team, DomainError> {
        TeamLookupService::get_team(self, ctx, team_name).await
    }
}
