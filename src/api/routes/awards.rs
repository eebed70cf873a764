use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::{self, best_defense, CalcError};
use crate::models::{Finalist, Group, PlayerTotal, StandingsRow};

/// Award payload, or an informational "no data yet" marker when nothing has
/// been played.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AwardResponse<T> {
    Ok { award: T },
    NoData { message: String },
}

impl<T> AwardResponse<T> {
    fn from_result(result: Result<T, CalcError>) -> Result<Self, ApiError> {
        match result {
            Ok(award) => Ok(AwardResponse::Ok { award }),
            Err(CalcError::EmptyData(message)) => Ok(AwardResponse::NoData { message }),
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardParams {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub players: Vec<PlayerTotal>,
}

/// Golden boot leaderboard. `limit` defaults to the configured size; `0`
/// returns everyone.
pub async fn top_scorers(
    State(state): State<AppState>,
    Query(params): Query<LeaderboardParams>,
) -> Json<LeaderboardResponse> {
    let limit = match params.limit.unwrap_or(state.config.tournament.top_scorers_limit) {
        0 => None,
        n => Some(n),
    };
    let snapshot = state.snapshot.read().await;
    Json(LeaderboardResponse {
        players: calculate::top_scorers(&snapshot.player_stats, limit),
    })
}

pub async fn top_savers(
    State(state): State<AppState>,
    Query(params): Query<LeaderboardParams>,
) -> Json<LeaderboardResponse> {
    let limit = params.limit.filter(|&n| n > 0);
    let snapshot = state.snapshot.read().await;
    Json(LeaderboardResponse {
        players: calculate::top_savers(&snapshot.player_stats, limit),
    })
}

pub async fn golden_glove(
    State(state): State<AppState>,
) -> Result<Json<AwardResponse<StandingsRow>>, ApiError> {
    let snapshot = state.snapshot.read().await;
    let award = AwardResponse::from_result(best_defense(&snapshot.matches))?;
    Ok(Json(award))
}

pub async fn finalists(
    State(state): State<AppState>,
) -> Result<Json<AwardResponse<Vec<Finalist>>>, ApiError> {
    let snapshot = state.snapshot.read().await;
    let award =
        AwardResponse::from_result(calculate::finalists(&snapshot.matches, &Group::STAGES))?;
    Ok(Json(award))
}

#[cfg(test)]
mod tests {
    use crate::api::build_router;
    use crate::api::test_support::*;
    use crate::models::{Group, Match, PlayerStat};
    use crate::storage::Snapshot;
    use axum::http::StatusCode;
    use chrono::{NaiveDate, NaiveTime};

    fn played(id: u32, group: Group, home: &str, away: &str, h: u32, a: u32) -> Match {
        Match::new(
            id,
            group,
            home.to_string(),
            away.to_string(),
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
        )
        .with_result(h, a)
    }

    fn stat(name: &str, team: &str, goals: u32, saves: u32) -> PlayerStat {
        PlayerStat::new(name.to_string(), team.to_string())
            .with_goals(goals)
            .with_saves(saves)
    }

    fn season() -> Snapshot {
        Snapshot {
            matches: vec![
                played(1, Group::A, "A1", "A2", 2, 0),
                played(2, Group::B, "B1", "B2", 1, 1),
            ],
            player_stats: vec![
                stat("X", "A1", 2, 0),
                stat("Y", "B1", 1, 0),
                stat("X", "A1", 3, 0),
                stat("Z", "B2", 1, 0),
                stat("W", "A2", 1, 0),
                stat("Keeper", "B2", 0, 5),
            ],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_top_scorers_default_limit() {
        let app = build_router(test_state(season()));
        let (status, json) = get_json(app, "/api/awards/top-scorers").await;

        assert_eq!(status, StatusCode::OK);
        let players = json["players"].as_array().unwrap();
        assert_eq!(players.len(), 3);
        assert_eq!(players[0]["player_name"], "X");
        assert_eq!(players[0]["total"], 5);
    }

    #[tokio::test]
    async fn test_top_scorers_unlimited() {
        let app = build_router(test_state(season()));
        let (_, json) = get_json(app, "/api/awards/top-scorers?limit=0").await;

        assert_eq!(json["players"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_top_savers() {
        let app = build_router(test_state(season()));
        let (_, json) = get_json(app, "/api/awards/top-savers").await;

        let players = json["players"].as_array().unwrap();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0]["player_name"], "Keeper");
    }

    #[tokio::test]
    async fn test_golden_glove() {
        let app = build_router(test_state(season()));
        let (status, json) = get_json(app, "/api/awards/golden-glove").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["award"]["team"], "A1");
        assert_eq!(json["award"]["goals_against"], 0);
    }

    #[tokio::test]
    async fn test_golden_glove_no_data() {
        let app = build_router(test_state(Snapshot::default()));
        let (status, json) = get_json(app, "/api/awards/golden-glove").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "no_data");
        assert!(json["message"].is_string());
    }

    #[tokio::test]
    async fn test_finalists() {
        let app = build_router(test_state(season()));
        let (status, json) = get_json(app, "/api/awards/finalists").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["award"][0]["team"], "A1");
        assert_eq!(json["award"][1]["group"], "B");
        assert_eq!(json["award"][1]["team"], "B1");
    }
}
