use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::{require_admin, ApiError};
use crate::storage::TournamentStore;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub tournament: String,
    pub version: &'static str,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        tournament: state.config.tournament.name.clone(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub teams: usize,
    pub matches: usize,
    pub player_stats: usize,
}

/// Re-read everything from the backing store, replacing the in-memory copy.
/// On failure the current copy is kept.
pub async fn reload(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ReloadResponse>, ApiError> {
    require_admin(&headers, &state)?;

    let loaded = state.store.load()?;
    let mut snapshot = state.snapshot.write().await;
    *snapshot = loaded;
    tracing::info!(
        "Reloaded tournament data: {} matches, {} player stats",
        snapshot.matches.len(),
        snapshot.player_stats.len()
    );

    Ok(Json(ReloadResponse {
        teams: snapshot.teams.len(),
        matches: snapshot.matches.len(),
        player_stats: snapshot.player_stats.len(),
    }))
}
