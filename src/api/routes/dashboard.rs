use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::{league_totals, LeagueTotals};
use crate::storage::LeagueSnapshot;

pub async fn dashboard(State(state): State<AppState>) -> Result<Json<LeagueTotals>, ApiError> {
    let snapshot = LeagueSnapshot::load(&state.storage)?;
    Ok(Json(league_totals(
        &snapshot.team_entries,
        &snapshot.games,
        &snapshot.champions,
        &snapshot.transactions,
    )))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
