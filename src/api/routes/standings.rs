use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::{parse_group, ApiError};
use crate::calculate::{compute, has_played};
use crate::models::{Group, StandingsRow};

#[derive(Debug, Deserialize)]
pub struct StandingsParams {
    pub group: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GroupTable {
    pub group: Group,
    /// False until a match in this group has been played.
    pub has_results: bool,
    pub rows: Vec<StandingsRow>,
}

#[derive(Debug, Serialize)]
pub struct StandingsResponse {
    pub tables: Vec<GroupTable>,
}

/// Points tables, recomputed from the match list on every request. Without
/// `?group=` both group-stage tables are returned.
pub async fn standings(
    State(state): State<AppState>,
    Query(params): Query<StandingsParams>,
) -> Result<Json<StandingsResponse>, ApiError> {
    let groups = match parse_group(params.group.as_deref())? {
        Some(group) => vec![group],
        None => Group::STAGES.to_vec(),
    };

    let snapshot = state.snapshot.read().await;
    let tables = groups
        .into_iter()
        .map(|group| GroupTable {
            group,
            has_results: has_played(&snapshot.matches, Some(group)),
            rows: compute(&snapshot.matches, Some(group)),
        })
        .collect();

    Ok(Json(StandingsResponse { tables }))
}
