//! Person handlers: list everyone, save one.

use crate::error::AppError;
use crate::model::Person;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

pub async fn list_all(State(state): State<AppState>) -> Result<Json<Vec<Person>>, AppError> {
    let people = state.gateway.list_all().await?;
    tracing::debug!(count = people.len(), "listed people");
    Ok(Json(people))
}

/// Stores the person and answers 200 with an empty body; the stored row is not echoed.
pub async fn save(
    State(state): State<AppState>,
    Json(person): Json<Person>,
) -> Result<StatusCode, AppError> {
    let created = person.is_new();
    let saved = state.gateway.save(person).await?;
    tracing::info!(id = ?saved.id, created, "saved person");
    Ok(StatusCode::OK)
}
