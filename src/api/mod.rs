//! REST API endpoints.
//!
//! Axum-based HTTP API for viewing standings, fixtures and awards, plus
//! password-gated operator endpoints that edit the tournament.

pub mod routes;
pub mod state;

use axum::{
    extract::rejection::JsonRejection,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::calculate::CalcError;
use crate::models::Group;
use crate::storage::StorageError;
use state::AppState;

/// Header carrying the shared admin password.
pub const ADMIN_HEADER: &str = "x-admin-password";

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("No data yet: {0}")]
    NoData(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            ApiError::NoData(_) => (StatusCode::CONFLICT, "NO_DATA"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<CalcError> for ApiError {
    fn from(e: CalcError) -> Self {
        match e {
            CalcError::Validation(msg) => ApiError::BadRequest(msg),
            CalcError::EmptyData(msg) => ApiError::NoData(msg),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        tracing::error!("Storage failure: {}", e);
        ApiError::Internal(e.to_string())
    }
}

/// Reject operator requests that do not carry the admin password.
///
/// This is a plain string comparison gate, not authentication.
pub fn require_admin(headers: &HeaderMap, state: &AppState) -> Result<(), ApiError> {
    let supplied = headers
        .get(ADMIN_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if supplied != state.config.tournament.admin_password {
        return Err(ApiError::Forbidden("admin password required".to_string()));
    }
    Ok(())
}

/// Unwrap a JSON request body. Handlers call this after `require_admin` so
/// an unauthorised caller gets 403 whatever the body looks like.
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|e| ApiError::BadRequest(e.body_text()))
}

/// Parse an optional `?group=` query value.
pub fn parse_group(raw: Option<&str>) -> Result<Option<Group>, ApiError> {
    match raw {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .parse::<Group>()
            .map(Some)
            .map_err(|e| ApiError::BadRequest(e.to_string())),
    }
}

fn cors_layer(origin: &str) -> CorsLayer {
    let base = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origin == "*" {
        return base.allow_origin(Any);
    }
    match HeaderValue::from_str(origin) {
        Ok(value) => base.allow_origin(AllowOrigin::exact(value)),
        Err(_) => {
            tracing::warn!("Invalid CORS origin {:?}, allowing any", origin);
            base.allow_origin(Any)
        }
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    use routes::{admin, awards, fixtures, players, standings, teams};

    let cors = cors_layer(&state.config.server.cors_origin);

    Router::new()
        .route("/api/health", get(admin::health))
        .route("/api/reload", post(admin::reload))
        .route("/api/teams", get(teams::list_teams).post(teams::register))
        .route("/api/groups", get(teams::list_groups))
        .route("/api/groups/draw", post(teams::draw))
        .route("/api/fixtures", get(fixtures::list_fixtures))
        .route("/api/fixtures/generate", post(fixtures::generate))
        .route("/api/matches/:id", patch(fixtures::update))
        .route("/api/results", get(fixtures::results))
        .route("/api/final", post(fixtures::schedule_final))
        .route("/api/standings", get(standings::standings))
        .route("/api/player-stats", get(players::list).post(players::record))
        .route("/api/awards/top-scorers", get(awards::top_scorers))
        .route("/api/awards/top-savers", get(awards::top_savers))
        .route("/api/awards/golden-glove", get(awards::golden_glove))
        .route("/api/awards/finalists", get(awards::finalists))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::storage::Snapshot;
    use axum::http::StatusCode;

    #[test]
    fn test_parse_group() {
        assert_eq!(parse_group(None).unwrap(), None);
        assert_eq!(parse_group(Some("")).unwrap(), None);
        assert_eq!(parse_group(Some("a")).unwrap(), Some(Group::A));
        assert!(parse_group(Some("Z")).is_err());
    }

    #[test]
    fn test_calc_error_mapping() {
        let err: ApiError = CalcError::validation("bad").into();
        assert!(matches!(err, ApiError::BadRequest(_)));

        let err: ApiError = CalcError::empty("none").into();
        assert!(matches!(err, ApiError::NoData(_)));
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let app = build_router(test_state(Snapshot::default()));
        let (status, json) = get_json(app, "/api/standings?group=Z").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
        assert!(json["error"]["message"].as_str().unwrap().contains("Unknown group"));
    }

    #[tokio::test]
    async fn test_admin_gate_rejects_wrong_password() {
        let app = build_router(test_state(Snapshot::default()));
        let (status, json) = admin_json(
            app,
            "POST",
            "/api/teams",
            "wrong",
            serde_json::json!({ "name": "Lions" }),
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json["error"]["code"], "FORBIDDEN");
    }
}
