use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::api::extract::Query;
use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::{transaction_log as build_log, TransactionFilter, TransactionLogEntry};
use crate::models::{MemberId, Season, Transaction};
use crate::storage::Table;

#[derive(Debug, Default, Deserialize)]
pub struct TransactionLogParams {
    pub member: Option<MemberId>,
    pub year: Option<Season>,
}

impl From<TransactionLogParams> for TransactionFilter {
    fn from(params: TransactionLogParams) -> Self {
        Self {
            member_id: params.member,
            year: params.year,
        }
    }
}

pub async fn transaction_log(
    State(state): State<AppState>,
    Query(params): Query<TransactionLogParams>,
) -> Result<Json<Vec<TransactionLogEntry>>, ApiError> {
    let filter = TransactionFilter::from(params);
    let rows = Table::<Transaction>::open(&state.storage).list()?;
    let names = state.names.snapshot(&state.storage).await;

    let log = build_log(&rows, filter, &names);
    tracing::debug!(
        "Transaction log: {} of {} rows ({} filters)",
        log.len(),
        rows.len(),
        filter.active_count()
    );
    Ok(Json(log))
}
