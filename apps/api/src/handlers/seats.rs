//! Seat assignment.

use axum::extract::State;
use axum::Json;
use pokerhall_core::{Action, Seat};
use serde::Deserialize;

use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath, CurrentPlayer};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AssignSeatPayload {
    pub player_id: String,
}

/// Put a player into a free seat.
///
/// # Errors
///
/// - `404 NOT_FOUND`: unknown seat or player
/// - `409 SEAT_OCCUPIED`: the seat is taken (also when a concurrent request took it first)
/// - `409 ALREADY_SEATED`: the player already sits elsewhere in the same event
pub async fn assign_seat(
    State(state): State<AppState>,
    current: CurrentPlayer,
    ApiPath(seat_id): ApiPath<String>,
    ApiJson(payload): ApiJson<AssignSeatPayload>,
) -> ApiResult<Json<Seat>> {
    current.require(Action::AssignSeat)?;
    Ok(Json(state.db.seats().assign(&seat_id, &payload.player_id).await?))
}
