//! Team endpoints

use axum::extract::State;
use tracing::debug;

use crate::api::middleware::RequestScope;
use crate::api::state::AppState;
use crate::api::types::{
    AddTeamApiRequest, AddTeamResponse, ApiError, GetTeamParams, Json, Query, TeamPayload,
    ValidatedJson,
};
use crate::domain::Team;

/// POST /team/add
pub async fn add_team(
    State(state): State<AppState>,
    RequestScope(ctx): RequestScope,
    ValidatedJson(request): ValidatedJson<AddTeamApiRequest>,
) -> Result<Json<AddTeamResponse>, ApiError> {
    debug!(
        request_id = %ctx.request_id(),
        team_name = %request.team.team_name,
        "Adding team"
    );

    let team = state
        .team_registration
        .add_team(&ctx, Team::from(request.team))
        .await?;

    Ok(Json(AddTeamResponse {
        team: TeamPayload::from(team),
    }))
}

/// GET /team/get?team_name=
pub async fn get_team(
    State(state): State<AppState>,
    RequestScope(ctx): RequestScope,
    Query(params): Query<GetTeamParams>,
) -> Result<Json<TeamPayload>, ApiError> {
    debug!(
        request_id = %ctx.request_id(),
        team_name = %params.team_name,
        "Getting team"
    );

    let team = state.team_lookup.get_team(&ctx, &params.team_name).await?;

    Ok(Json(TeamPayload::from(team)))
}
