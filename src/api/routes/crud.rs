//! Generic table endpoints.
//!
//! Every table gets list / get / create / update / delete; seasonal tables
//! also get year and member filters. Empty list results are reported as 404,
//! the same as a missing row.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::extract::{JsonBody, Path};
use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{MemberId, RowId, Season};
use crate::storage::{EntityType, Record, Table};

/// URL prefix for a table's resource.
pub fn base_path(entity: EntityType) -> &'static str {
    match entity {
        EntityType::LeagueMember => "/leaguemembers",
        EntityType::TeamData => "/teamdata",
        EntityType::GameData => "/gamedata",
        EntityType::Champion => "/champions",
        EntityType::Transaction => "/transactions",
    }
}

/// Routes for one table. `seasonal` adds the year and member filters.
pub fn routes<T: Record>(seasonal: bool) -> Router<AppState> {
    let base = base_path(T::ENTITY);
    let router = Router::new()
        .route(base, get(list::<T>).post(create::<T>))
        .route(
            &format!("{}/id/:id", base),
            get(get_by_id::<T>).patch(update::<T>).delete(delete::<T>),
        );

    if seasonal {
        router
            .route(&format!("{}/year/:year", base), get(by_year::<T>))
            .route(&format!("{}/member/:member_id", base), get(by_member::<T>))
    } else {
        router
    }
}

fn non_empty<T>(rows: Vec<T>, message: impl FnOnce() -> String) -> Result<Json<Vec<T>>, ApiError> {
    if rows.is_empty() {
        Err(ApiError::NotFound(message()))
    } else {
        Ok(Json(rows))
    }
}

fn missing_row<T: Record>(id: RowId) -> ApiError {
    ApiError::NotFound(format!("{} with ID {} not found", T::ENTITY.singular(), id))
}

/// Member-table writes change display names.
async fn after_write<T: Record>(state: &AppState) {
    if T::ENTITY == EntityType::LeagueMember {
        state.names.invalidate().await;
    }
}

pub async fn list<T: Record>(State(state): State<AppState>) -> Result<Json<Vec<T>>, ApiError> {
    let rows = Table::<T>::open(&state.storage).list()?;
    non_empty(rows, || format!("No {} found", T::ENTITY.plural()))
}

pub async fn get_by_id<T: Record>(
    State(state): State<AppState>,
    Path(id): Path<RowId>,
) -> Result<Json<T>, ApiError> {
    Table::<T>::open(&state.storage)
        .get(id)?
        .map(Json)
        .ok_or_else(|| missing_row::<T>(id))
}

pub async fn by_year<T: Record>(
    State(state): State<AppState>,
    Path(year): Path<Season>,
) -> Result<Json<Vec<T>>, ApiError> {
    let rows = Table::<T>::open(&state.storage).by_year(year)?;
    non_empty(rows, || {
        format!("No {} found for year {}", T::ENTITY.plural(), year)
    })
}

pub async fn by_member<T: Record>(
    State(state): State<AppState>,
    Path(member_id): Path<MemberId>,
) -> Result<Json<Vec<T>>, ApiError> {
    let rows = Table::<T>::open(&state.storage).by_member(member_id)?;
    non_empty(rows, || {
        format!(
            "No {} found for league member ID {}",
            T::ENTITY.plural(),
            member_id
        )
    })
}

pub async fn create<T: Record>(
    State(state): State<AppState>,
    JsonBody(row): JsonBody<T>,
) -> Result<impl IntoResponse, ApiError> {
    let stored = {
        let _guard = state.write_lock.lock().await;
        Table::<T>::open(&state.storage).insert(row)?
    };
    after_write::<T>(&state).await;

    tracing::info!("Created {} row {}", T::ENTITY.plural(), stored.id());
    let location = format!("{}/id/{}", base_path(T::ENTITY), stored.id());
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(stored),
    ))
}

pub async fn update<T: Record>(
    State(state): State<AppState>,
    Path(id): Path<RowId>,
    JsonBody(row): JsonBody<T>,
) -> Result<Json<T>, ApiError> {
    let updated = {
        let _guard = state.write_lock.lock().await;
        Table::<T>::open(&state.storage).update(id, row)?
    };
    let updated = updated.ok_or_else(|| missing_row::<T>(id))?;
    after_write::<T>(&state).await;

    Ok(Json(updated))
}

pub async fn delete<T: Record>(
    State(state): State<AppState>,
    Path(id): Path<RowId>,
) -> Result<StatusCode, ApiError> {
    let removed = {
        let _guard = state.write_lock.lock().await;
        Table::<T>::open(&state.storage).delete(id)?
    };
    if !removed {
        return Err(missing_row::<T>(id));
    }
    after_write::<T>(&state).await;

    tracing::info!("Deleted {} row {}", T::ENTITY.plural(), id);
    Ok(StatusCode::NO_CONTENT)
}
