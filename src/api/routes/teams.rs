use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::{json_body, require_admin, ApiError};
use crate::calculate::{draw_groups, register_team};
use crate::models::{GroupDraw, TeamEntry};
use crate::storage::TournamentStore;

#[derive(Debug, Serialize)]
pub struct TeamsResponse {
    pub teams: Vec<TeamEntry>,
    pub max_teams: usize,
}

pub async fn list_teams(State(state): State<AppState>) -> Json<TeamsResponse> {
    let snapshot = state.snapshot.read().await;
    Json(TeamsResponse {
        teams: snapshot.teams.clone(),
        max_teams: state.config.tournament.max_teams,
    })
}

#[derive(Debug, Deserialize)]
pub struct RegisterTeamRequest {
    pub name: String,
}

pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<RegisterTeamRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TeamsResponse>), ApiError> {
    require_admin(&headers, &state)?;
    let body = json_body(payload)?;

    let mut snapshot = state.snapshot.write().await;
    let teams = register_team(&snapshot.teams, &body.name, state.config.tournament.max_teams)?;
    state.store.save_teams(&teams)?;
    snapshot.teams = teams;
    tracing::info!("Registered team {:?} ({} total)", body.name.trim(), snapshot.teams.len());

    Ok((
        StatusCode::CREATED,
        Json(TeamsResponse {
            teams: snapshot.teams.clone(),
            max_teams: state.config.tournament.max_teams,
        }),
    ))
}

#[derive(Debug, Serialize)]
pub struct GroupsResponse {
    pub drawn: bool,
    pub groups: Option<GroupDraw>,
}

pub async fn list_groups(State(state): State<AppState>) -> Json<GroupsResponse> {
    let snapshot = state.snapshot.read().await;
    let groups = GroupDraw::from_entries(&snapshot.teams);
    Json(GroupsResponse {
        drawn: groups.is_some(),
        groups,
    })
}

pub async fn draw(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<GroupsResponse>, ApiError> {
    require_admin(&headers, &state)?;

    let settings = &state.config.tournament;
    let mut snapshot = state.snapshot.write().await;
    let teams = draw_groups(
        &snapshot.teams,
        settings.group_a_size,
        settings.max_teams,
        &mut rand::thread_rng(),
    )?;
    state.store.save_teams(&teams)?;
    snapshot.teams = teams;
    tracing::info!("Groups drawn");

    let groups = GroupDraw::from_entries(&snapshot.teams);
    Ok(Json(GroupsResponse {
        drawn: groups.is_some(),
        groups,
    }))
}
