//! Event creation and browsing.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use pokerhall_core::{validation, Action, Event, EventDetail, EventLayout, NewEvent};
use serde::Deserialize;

use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath, CurrentPlayer};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateEventPayload {
    pub name: String,
    /// `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub table_count: i64,
    pub seats_per_table: i64,
}

pub async fn list_events(
    State(state): State<AppState>,
    current: CurrentPlayer,
) -> ApiResult<Json<Vec<Event>>> {
    current.require(Action::ViewEvents)?;
    Ok(Json(state.db.events().list().await?))
}

/// Create an event with its full table/seat layout (CRUPIER only).
///
/// Responds `201 Created` with the event and every table and seat.
pub async fn create_event(
    State(state): State<AppState>,
    current: CurrentPlayer,
    ApiJson(payload): ApiJson<CreateEventPayload>,
) -> ApiResult<(StatusCode, Json<EventDetail>)> {
    current.require(Action::CreateEvent)?;

    let new_event = NewEvent {
        name: validation::validate_event_name(&payload.name)?,
        date: payload.date,
        layout: EventLayout::new(payload.table_count, payload.seats_per_table)?,
    };

    let detail = state.db.events().create(&new_event).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

pub async fn get_event(
    State(state): State<AppState>,
    current: CurrentPlayer,
    ApiPath(event_id): ApiPath<String>,
) -> ApiResult<Json<EventDetail>> {
    current.require(Action::ViewEvents)?;
    Ok(Json(state.db.events().get_detail(&event_id).await?))
}
