use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::{json_body, parse_group, require_admin, ApiError};
use crate::calculate::{self, generate_with, results_history, update_match};
use crate::models::{Group, GroupDraw, Match, MatchId, MatchUpdate};
use crate::storage::TournamentStore;

#[derive(Debug, Deserialize)]
pub struct FixturesParams {
    pub group: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FixturesResponse {
    pub matches: Vec<Match>,
    pub count: usize,
}

impl FixturesResponse {
    fn new(matches: Vec<Match>) -> Self {
        Self {
            count: matches.len(),
            matches,
        }
    }
}

pub async fn list_fixtures(
    State(state): State<AppState>,
    Query(params): Query<FixturesParams>,
) -> Result<Json<FixturesResponse>, ApiError> {
    let group = parse_group(params.group.as_deref())?;
    let snapshot = state.snapshot.read().await;

    let matches = snapshot
        .matches
        .iter()
        .filter(|m| group.map_or(true, |g| m.group == g))
        .cloned()
        .collect();

    Ok(Json(FixturesResponse::new(matches)))
}

pub async fn results(State(state): State<AppState>) -> Json<FixturesResponse> {
    let snapshot = state.snapshot.read().await;
    Json(FixturesResponse::new(results_history(&snapshot.matches)))
}

/// Regenerate the whole group-stage schedule from the current draw. Any
/// existing matches, results included, are discarded.
pub async fn generate(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<(StatusCode, Json<FixturesResponse>), ApiError> {
    require_admin(&headers, &state)?;

    let policy = state.config.tournament.fixture_policy();
    let mut snapshot = state.snapshot.write().await;
    let draw = GroupDraw::from_entries(&snapshot.teams)
        .ok_or_else(|| ApiError::BadRequest("groups have not been drawn yet".to_string()))?;

    let matches = generate_with(
        draw.teams(Group::A),
        draw.teams(Group::B),
        &policy,
        Local::now().date_naive(),
        &mut rand::thread_rng(),
    )?;
    state.store.save_matches(&matches)?;
    tracing::info!(
        "Generated {} fixtures (replacing {})",
        matches.len(),
        snapshot.matches.len()
    );
    snapshot.matches = matches;

    Ok((
        StatusCode::CREATED,
        Json(FixturesResponse::new(snapshot.matches.clone())),
    ))
}

pub async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<MatchId>,
    payload: Result<Json<MatchUpdate>, JsonRejection>,
) -> Result<Json<Match>, ApiError> {
    require_admin(&headers, &state)?;
    let update = json_body(payload)?;

    let mut snapshot = state.snapshot.write().await;
    if !snapshot.matches.iter().any(|m| m.id == id) {
        return Err(ApiError::NotFound(format!("match {}", id)));
    }

    let matches = update_match(&snapshot.matches, id, &update)?;
    state.store.save_matches(&matches)?;
    snapshot.matches = matches;
    tracing::info!("Updated match {}", id);

    snapshot
        .matches
        .iter()
        .find(|m| m.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("match {}", id)))
}

/// Schedule (or reschedule) the final between the two group winners.
pub async fn schedule_final(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<(StatusCode, Json<Match>), ApiError> {
    require_admin(&headers, &state)?;

    let kickoff = state.config.tournament.kickoff();
    let mut snapshot = state.snapshot.write().await;
    let matches = calculate::schedule_final(&snapshot.matches, kickoff)?;
    state.store.save_matches(&matches)?;
    snapshot.matches = matches;

    let final_match = snapshot
        .matches
        .iter()
        .find(|m| m.group == Group::Final)
        .cloned()
        .ok_or_else(|| ApiError::Internal("final was not scheduled".to_string()))?;
    tracing::info!(
        "Final scheduled: {} vs {} on {}",
        final_match.home_team,
        final_match.away_team,
        final_match.date
    );

    Ok((StatusCode::CREATED, Json(final_match)))
}
