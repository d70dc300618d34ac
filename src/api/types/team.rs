//! Team request and response payloads

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::{Team, TeamMember};

/// Body of `POST /team/add`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddTeamApiRequest {
    #[validate(nested)]
    pub team: TeamPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TeamPayload {
    #[validate(length(min = 3, max = 255))]
    pub team_name: String,
    #[validate(nested)]
    pub members: Vec<TeamMemberPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TeamMemberPayload {
    #[validate(length(min = 2, max = 255))]
    pub user_id: String,
    #[validate(length(min = 3, max = 255))]
    pub username: String,
    pub is_active: bool,
}

/// Body of a successful `POST /team/add`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTeamResponse {
    pub team: TeamPayload,
}

/// Query of `GET /team/get`; a missing parameter reaches validation as an empty name
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetTeamParams {
    #[serde(default)]
    pub team_name: String,
}

impl From<TeamPayload> for Team {
    fn from(payload: TeamPayload) -> Self {
        Team::new(
            payload.team_name,
            payload.members.into_iter().map(TeamMember::from).collect(),
        )
    }
}

impl From<TeamMemberPayload> for TeamMember {
    fn from(payload: TeamMemberPayload) -> Self {
        TeamMember::new(payload.user_id, payload.username, payload.is_active)
    }
}

impl From<Team> for TeamPayload {
    fn from(team: Team) -> Self {
        let (team_name, members) = team.into_parts();
        Self {
            team_name,
            members: members.into_iter().map(TeamMemberPayload::from).collect(),
        }
    }
}

impl From<TeamMember> for TeamMemberPayload {
    fn from(member: TeamMember) -> Self {
        Self {
            user_id: member.user_id,
            username: member.username,
            is_active: member.is_active,
        }
    }
}
