//! In-memory team repository implementation

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::team::{Team, TeamMember, TeamRepository};
use crate::domain::{DomainError, RequestContext};

#[derive(Debug, Default)]
struct TeamStore {
    /// Members per team name, in registration order
    teams: HashMap<String, Vec<TeamMember>>,
    /// Every member identity assigned to any team
    assigned: HashSet<String>,
}

/// In-memory implementation of TeamRepository
///
/// Applies the same uniqueness rules as the relational schema: team names and
/// member identities are unique across the whole store, and a registration
/// either stores the team with all members or nothing.
#[derive(Debug, Default)]
pub struct InMemoryTeamRepository {
    store: RwLock<TeamStore>,
}

impl InMemoryTeamRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored team rows, including rows without members
    pub fn team_count(&self) -> usize {
        self.store.read().map(|store| store.teams.len()).unwrap_or(0)
    }

    /// Store a team row that has no members
    #[cfg(test)]
    pub(crate) fn insert_memberless_team(&self, team_name: &str) {
        let mut store = self.store.write().unwrap();
        store.teams.insert(team_name.to_string(), Vec::new());
    }
}

fn poisoned() -> DomainError {
    DomainError::infrastructure("team store lock poisoned")
}

#[async_trait]
impl TeamRepository for InMemoryTeamRepository {
    async fn register_team(&self, ctx: &RequestContext, team: &Team) -> Result<(), DomainError> {
        if ctx.is_cancelled() {
            return Err(DomainError::cancelled());
        }

        let mut store = self.store.write().map_err(|_| poisoned())?;

        if store.teams.contains_key(team.team_name()) {
            return Err(DomainError::team_exists(team.team_name()));
        }

        let mut incoming = HashSet::with_capacity(team.members().len());

        for member in team.members() {
            if store.assigned.contains(&member.user_id) || !incoming.insert(member.user_id.as_str()) {
                return Err(DomainError::MemberExists);
            }
        }

        store
            .assigned
            .extend(team.members().iter().map(|m| m.user_id.clone()));
        store
            .teams
            .insert(team.team_name().to_string(), team.members().to_vec());

        Ok(())
    }

    async fn fetch_team(
        &self,
        ctx: &RequestContext,
        team_name: &str,
    ) -> Result<Team, DomainError> {
        if ctx.is_cancelled() {
            return Err(DomainError::cancelled());
        }

        let store = self.store.read().map_err(|_| poisoned())?;

        match store.teams.get(team_name) {
            Some(members) if !members.is_empty() => Ok(Team::new(team_name, members.clone())),
            _ => Err(DomainError::not_found(format!("Team '{}' not found", team_name))),
        }
    }
}
