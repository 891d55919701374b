use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::extract::{Path, Query};
use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::{self, GameLogEntry};
use crate::models::{GameResult, MemberId, Season, TeamSeasonEntry};
use crate::storage::Table;

pub async fn by_week(
    State(state): State<AppState>,
    Path(week): Path<String>,
) -> Result<Json<Vec<GameResult>>, ApiError> {
    let games = Table::<GameResult>::open(&state.storage).by_week(&week)?;
    if games.is_empty() {
        return Err(ApiError::NotFound(format!(
            "No game data found for week {}",
            week
        )));
    }
    Ok(Json(games))
}

#[derive(Debug, Deserialize)]
pub struct GameLogParams {
    pub member: MemberId,
    pub year: Season,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameLogResponse {
    #[serde(rename = "leagueMemberId")]
    pub member_id: MemberId,
    #[serde(rename = "leagueMemberName")]
    pub member_name: String,
    pub year: Season,
    /// Seasons this member has games in, newest first.
    pub available_years: Vec<Season>,
    pub games: Vec<GameLogEntry>,
}

pub async fn game_log(
    State(state): State<AppState>,
    Query(params): Query<GameLogParams>,
) -> Result<Json<GameLogResponse>, ApiError> {
    let games = Table::<GameResult>::open(&state.storage).by_member(params.member)?;
    let team_entries = Table::<TeamSeasonEntry>::open(&state.storage).by_year(params.year)?;
    let names = state.names.snapshot(&state.storage).await;

    let mut available_years: Vec<Season> = games.iter().map(|g| g.year).collect();
    available_years.sort_unstable_by(|a, b| b.cmp(a));
    available_years.dedup();

    let log = calculate::game_log(&games, &team_entries, &names, params.member, params.year);

    Ok(Json(GameLogResponse {
        member_id: params.member,
        member_name: names.resolve(params.member).to_string(),
        year: params.year,
        available_years,
        games: log,
    }))
}
