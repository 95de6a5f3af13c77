//! Score recording and rankings.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use pokerhall_core::{
    validation, Action, NewScore, RankingEntry, RankingMode, Score, ScoreComponents,
};
use serde::Deserialize;

use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath, ApiQuery, CurrentPlayer};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AddScorePayload {
    pub player_id: String,
    pub final_capital: f64,
    pub bluff_score: f64,
    pub win_score: f64,
    pub crupier_vote: f64,
}

#[derive(Debug, Deserialize)]
pub struct RankingQuery {
    /// `per_row` (default) or `per_player`.
    #[serde(default)]
    pub mode: RankingMode,
}

pub async fn list_scores(
    State(state): State<AppState>,
    current: CurrentPlayer,
    ApiPath(event_id): ApiPath<String>,
) -> ApiResult<Json<Vec<Score>>> {
    current.require(Action::ViewScores)?;
    state.db.events().get(&event_id).await?;
    Ok(Json(state.db.scores().list_for_event(&event_id).await?))
}

/// Append a score row for a player in an event (CRUPIER only).
pub async fn add_score(
    State(state): State<AppState>,
    current: CurrentPlayer,
    ApiPath(event_id): ApiPath<String>,
    ApiJson(payload): ApiJson<AddScorePayload>,
) -> ApiResult<(StatusCode, Json<Score>)> {
    current.require(Action::RecordScore)?;

    let components = ScoreComponents::new(
        payload.final_capital,
        payload.bluff_score,
        payload.win_score,
        payload.crupier_vote,
    );
    validation::validate_score_components(&components)?;

    let score = state
        .db
        .scores()
        .append(&NewScore {
            event_id,
            player_id: payload.player_id,
            components,
            recorded_by: current.player.id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(score)))
}

pub async fn ranking(
    State(state): State<AppState>,
    current: CurrentPlayer,
    ApiPath(event_id): ApiPath<String>,
    ApiQuery(query): ApiQuery<RankingQuery>,
) -> ApiResult<Json<Vec<RankingEntry>>> {
    current.require(Action::ViewRanking)?;
    Ok(Json(state.db.scores().rank_event(&event_id, query.mode).await?))
}
