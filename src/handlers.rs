use crate::errors::AppError;
use crate::models::{SlotQuery, SlotsResponse, UpdateResponse};
use crate::query::{SlotFilter, select_slots};
use crate::sources::replace_from_sources;
use crate::state::AppState;
use crate::storage::persist_data;
use crate::ui::render_index;
use axum::{
    Json,
    extract::{Query, State},
    response::Html,
};
use chrono::Local;
use std::collections::BTreeSet;
use tracing::{debug, info};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let data = state.data.lock().await;
    let slots = select_slots(&data.slots, &SlotFilter::default());
    let clubs: Vec<String> = data
        .slots
        .iter()
        .map(|slot| slot.club.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    Html(render_index(&slots, &clubs))
}

pub async fn get_slots(
    State(state): State<AppState>,
    Query(query): Query<SlotQuery>,
) -> Result<Json<SlotsResponse>, AppError> {
    let filter = SlotFilter::from_query(&query);
    let data = state.data.lock().await;
    let slots = select_slots(&data.slots, &filter);
    debug!(?filter, count = slots.len(), "slots selected");
    Ok(Json(SlotsResponse { slots }))
}

pub async fn update_slots(State(state): State<AppState>) -> Result<Json<UpdateResponse>, AppError> {
    let updated = refresh_from_sources(&state).await?;
    Ok(Json(UpdateResponse { updated }))
}

/// Rebuilds the store from the configured sources and persists it.
pub async fn refresh_from_sources(state: &AppState) -> Result<usize, AppError> {
    let mut data = state.data.lock().await;
    let now = Local::now().naive_local();
    let updated = replace_from_sources(&mut data, &state.sources, now);

    persist_data(&state.data_path, &data).await?;
    info!(updated, "slot store refreshed");

    Ok(updated)
}
