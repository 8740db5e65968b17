use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/slots", get(handlers::get_slots))
        .route("/api/update_slots", post(handlers::update_slots))
        .with_state(state)
}
