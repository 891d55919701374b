//! REST API endpoints.
//!
//! Axum-based HTTP API: one CRUD resource per league table, plus derived
//! views (standings, game logs, transaction history, dashboard totals).

pub mod extract;
pub mod routes;
pub mod state;

use axum::{
    http::{header::InvalidHeaderValue, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};

use crate::models::{
    ChampionEntry, GameResult, LeagueMember, ScopeParseError, TeamSeasonEntry, Transaction,
};
use crate::storage::StorageError;
use routes::{crud, dashboard, games, standings, transactions};
use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::DuplicateId { .. } | StorageError::IdOutOfRange { .. } => {
                ApiError::Conflict(err.to_string())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<ScopeParseError> for ApiError {
    fn from(err: ScopeParseError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
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
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            ApiError::Internal(_) => {
                tracing::error!("{}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
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

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(crud::routes::<LeagueMember>(false))
        .merge(crud::routes::<TeamSeasonEntry>(true))
        .merge(crud::routes::<GameResult>(true))
        .merge(crud::routes::<ChampionEntry>(true))
        .merge(crud::routes::<Transaction>(true))
        .route("/gamedata/week/:week", get(games::by_week))
        .route("/api/standings", get(standings::standings))
        .route("/api/games/log", get(games::game_log))
        .route("/api/transactions/log", get(transactions::transaction_log))
        .route("/api/dashboard", get(dashboard::dashboard))
        .route("/api/health", get(dashboard::health))
        .with_state(state)
}

/// CORS policy for the configured browser origin ("*" allows any).
pub fn cors_layer(origin: &str) -> Result<CorsLayer, InvalidHeaderValue> {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origin.trim() == "*" {
        Ok(layer.allow_origin(Any))
    } else {
        Ok(layer.allow_origin(origin.trim().parse::<HeaderValue>()?))
    }
}
