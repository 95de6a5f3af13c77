//! Registration, login and the current-player profile.
//!
//! ```bash
//! curl -X POST http://localhost:5000/api/v1/auth/register \
//!   -H "Content-Type: application/json" \
//!   -d '{"name": "Anna", "surname": "Rossi", "age": 31, "capital": 500,
//!        "fiscal_code": "RSSNNA93", "password": "s3cret"}'
//!
//! curl -X POST http://localhost:5000/api/v1/auth/login \
//!   -H "Content-Type: application/json" \
//!   -d '{"fiscal_code": "RSSNNA93", "password": "s3cret"}'
//! ```

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use pokerhall_core::{validation, NewPlayer, Player, Role};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth::{hash_password, verify_password};
use crate::error::{ApiError, ApiResult};
use crate::extract::{ApiJson, CurrentPlayer};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterPayload {
    pub name: String,
    pub surname: String,
    pub age: i64,
    pub capital: f64,
    pub fiscal_code: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub fiscal_code: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    pub player: Player,
}

/// Register a new player. New accounts always get the PLAYER role.
///
/// # Errors
///
/// - `400 INVALID_ARGUMENT`: empty/too long names, bad fiscal code, age out of range
/// - `409 DUPLICATE_KEY`: fiscal code already registered
pub async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterPayload>,
) -> ApiResult<(StatusCode, Json<Player>)> {
    let name = validation::validate_person_name("name", &payload.name)?;
    let surname = validation::validate_person_name("surname", &payload.surname)?;
    let fiscal_code = validation::normalize_fiscal_code(&payload.fiscal_code)?;
    validation::validate_age(payload.age)?;
    validation::validate_finite("capital", payload.capital)?;
    validation::validate_password(&payload.password)?;

    let new_player = NewPlayer {
        name,
        surname,
        age: payload.age,
        capital: payload.capital,
        fiscal_code,
        role: Role::Player,
        password_hash: hash_password(&payload.password)?,
    };

    let player = state.db.players().register(&new_player).await?;
    Ok((StatusCode::CREATED, Json(player)))
}

/// Verify fiscal code and password, and issue a bearer token.
///
/// Unknown fiscal code and wrong password get the same answer.
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginPayload>,
) -> ApiResult<Json<AuthResponse>> {
    let invalid = || ApiError::unauthenticated("Invalid fiscal code or password");

    let fiscal_code = validation::normalize_fiscal_code(&payload.fiscal_code).map_err(|_| invalid())?;

    let player = match state.db.players().find_by_fiscal_code(&fiscal_code).await? {
        Some(player) if verify_password(&payload.password, &player.password_hash) => player,
        _ => {
            warn!(fiscal_code = %fiscal_code, "Failed login");
            return Err(invalid());
        }
    };

    let access_token = state.jwt.issue(&player.id)?;
    info!(player_id = %player.id, name = %player.full_name(), role = %player.role, "Player logged in");

    Ok(Json(AuthResponse {
        access_token,
        token_type: "Bearer",
        expires_in: state.jwt.lifetime_secs(),
        player,
    }))
}

/// The authenticated player's own record.
pub async fn me(current: CurrentPlayer) -> Json<Player> {
    Json(current.player)
}
