//! Player listing and the two crupier-only mutations.

use std::str::FromStr;

use axum::extract::State;
use axum::Json;
use pokerhall_core::{validation, Action, Player, Role};
use serde::Deserialize;
use tracing::info;

use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath, CurrentPlayer};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SetRolePayload {
    /// `PLAYER` or `CRUPIER`.
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct AdjustCapitalPayload {
    /// Added to the current capital; negative to subtract.
    pub delta: f64,
}

pub async fn list_players(
    State(state): State<AppState>,
    current: CurrentPlayer,
) -> ApiResult<Json<Vec<Player>>> {
    current.require(Action::ViewPlayers)?;
    Ok(Json(state.db.players().list().await?))
}

pub async fn set_role(
    State(state): State<AppState>,
    current: CurrentPlayer,
    ApiPath(player_id): ApiPath<String>,
    ApiJson(payload): ApiJson<SetRolePayload>,
) -> ApiResult<Json<Player>> {
    current.require(Action::ChangeRole)?;
    let role = Role::from_str(&payload.role)?;

    let player = state.db.players().set_role(&player_id, role).await?;
    info!(by = %current.player.id, player_id = %player.id, role = %role, "Role changed");
    Ok(Json(player))
}

pub async fn adjust_capital(
    State(state): State<AppState>,
    current: CurrentPlayer,
    ApiPath(player_id): ApiPath<String>,
    ApiJson(payload): ApiJson<AdjustCapitalPayload>,
) -> ApiResult<Json<Player>> {
    current.require(Action::AdjustCapital)?;
    validation::validate_finite("delta", payload.delta)?;

    let player = state
        .db
        .players()
        .adjust_capital(&player_id, payload.delta)
        .await?;
    info!(by = %current.player.id, player_id = %player.id, delta = payload.delta, "Capital adjusted");
    Ok(Json(player))
}
