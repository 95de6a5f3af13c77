//! Request extractors.
//!
//! `CurrentPlayer` turns an `Authorization: Bearer <jwt>` header into the
//! authenticated player. The player is re-read from the database on every
//! request, so a role change takes effect on the next call and a token for
//! a player that no longer exists is rejected.
//!
//! `ApiJson`, `ApiQuery` and `ApiPath` wrap axum's extractors so that a body,
//! query string or path that fails to deserialize is answered with
//! `400 INVALID_ARGUMENT` in the usual `{code, message}` shape.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::Json;
use pokerhall_core::{access, Action, Identity, Player};
use tracing::debug;

use crate::auth::extract_bearer_token;
use crate::error::ApiError;
use crate::AppState;

/// The authenticated caller.
#[derive(Debug, Clone)]
pub struct CurrentPlayer {
    pub player: Player,
    pub identity: Identity,
}

impl CurrentPlayer {
    /// Checks the access policy for `action`.
    pub fn require(&self, action: Action) -> Result<(), ApiError> {
        access::require(Some(&self.identity), action)?;
        Ok(())
    }
}

impl FromRequestParts<AppState> for CurrentPlayer {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(extract_bearer_token)
            .ok_or_else(|| ApiError::unauthenticated("Missing bearer token"))?;

        let claims = state.jwt.validate(token)?;

        let player = state
            .db
            .players()
            .find_by_id(&claims.sub)
            .await?
            .ok_or_else(|| {
                debug!(player_id = %claims.sub, "Token for unknown player");
                ApiError::unauthenticated("Unknown player")
            })?;

        let identity = Identity::new(player.id.clone(), player.role);
        Ok(CurrentPlayer { player, identity })
    }
}

/// JSON request body.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(ApiJson(value))
    }
}

/// Query string parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    Query<T>: FromRequestParts<S, Rejection = QueryRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(ApiQuery(value))
    }
}

/// Path parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    Path<T>: FromRequestParts<S, Rejection = PathRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(ApiPath(value))
    }
}
