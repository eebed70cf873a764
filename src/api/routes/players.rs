use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::{json_body, require_admin, ApiError};
use crate::calculate::record_player_stat;
use crate::models::PlayerStat;
use crate::storage::TournamentStore;

#[derive(Debug, Serialize)]
pub struct PlayerStatsResponse {
    pub stats: Vec<PlayerStat>,
    pub count: usize,
}

/// Raw stat rows in the order they were recorded.
pub async fn list(State(state): State<AppState>) -> Json<PlayerStatsResponse> {
    let snapshot = state.snapshot.read().await;
    Json(PlayerStatsResponse {
        stats: snapshot.player_stats.clone(),
        count: snapshot.player_stats.len(),
    })
}

#[derive(Debug, Deserialize)]
pub struct RecordStatRequest {
    pub player_name: String,
    pub team: String,
    #[serde(default)]
    pub goals: u32,
    #[serde(default)]
    pub saves: u32,
}

pub async fn record(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<RecordStatRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PlayerStat>), ApiError> {
    require_admin(&headers, &state)?;
    let body = json_body(payload)?;

    let mut snapshot = state.snapshot.write().await;
    let mut stats = record_player_stat(
        &snapshot.player_stats,
        &body.player_name,
        &body.team,
        body.goals,
        body.saves,
    )?;
    let added = stats
        .pop()
        .ok_or_else(|| ApiError::Internal("stat was not recorded".to_string()))?;

    state.store.append_player_stat(&added)?;
    stats.push(added.clone());
    snapshot.player_stats = stats;
    tracing::info!(
        "Recorded stat for {} ({}): {} goals, {} saves",
        added.player_name,
        added.team,
        added.goals,
        added.saves
    );

    Ok((StatusCode::CREATED, Json(added)))
}
