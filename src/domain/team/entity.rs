//! Team aggregate and member types

use serde::{Deserialize, Serialize};

/// A user registered as part of a team
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamMember {
    /// Caller-supplied identity, unique across all teams
    pub user_id: String,
    pub username: String,
    pub is_active: bool,
}

impl TeamMember {
    pub fn new(user_id: impl Into<String>, username: impl Into<String>, is_active: bool) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
            is_active,
        }
    }
}

/// Team aggregate: the team name together with its full member list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    team_name: String,
    members: Vec<TeamMember>,
}

impl Team {
    pub fn new(team_name: impl Into<String>, members: Vec<TeamMember>) -> Self {
        Self {
            team_name: team_name.into(),
            members,
        }
    }

    pub fn team_name(&self) -> &str {
        &self.team_name
    }

    pub fn members(&self) -> &[TeamMember] {
        &self.members
    }

    pub fn has_members(&self) -> bool {
        !self.members.is_empty()
    }

    /// Append a member, keeping insertion order
    pub fn push_member(&mut self, member: TeamMember) {
        self.members.push(member);
    }

    pub fn into_parts(self) -> (String, Vec<TeamMember>) {
        (self.team_name, self.members)
    }
}
