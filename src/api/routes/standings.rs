use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::extract::Query;
use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::{aggregate, apply_member_names, available_years};
use crate::models::{Scope, Season, TeamSummary};
use crate::storage::LeagueSnapshot;

#[derive(Debug, Deserialize)]
pub struct StandingsParams {
    /// "all" (default) or a season year.
    pub scope: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsResponse {
    pub scope: Scope,
    pub available_years: Vec<Season>,
    pub teams: Vec<TeamSummary>,
}

pub async fn standings(
    State(state): State<AppState>,
    Query(params): Query<StandingsParams>,
) -> Result<Json<StandingsResponse>, ApiError> {
    let scope: Scope = params.scope.as_deref().unwrap_or("all").parse()?;

    let snapshot = LeagueSnapshot::load(&state.storage)?;
    let mut teams = aggregate(
        &snapshot.team_entries,
        &snapshot.games,
        &snapshot.champions,
        scope,
    );

    let names = state.names.snapshot(&state.storage).await;
    apply_member_names(&mut teams, &names);

    Ok(Json(StandingsResponse {
        scope,
        available_years: available_years(&snapshot.team_entries),
        teams,
    }))
}
