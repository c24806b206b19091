//! Person routes under `/person`.

use crate::handlers::person::{list_all, save};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn person_routes(state: AppState) -> Router {
    Router::new()
        .route("/person/allpeople", get(list_all))
        .route("/person/save", post(save))
        .with_state(state)
}
