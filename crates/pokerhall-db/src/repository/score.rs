//! # Score Repository
//!
//! The Score Ledger: append-only score recordings per (event, player), plus
//! the ranking read built on top of them.
//!
//! Rows are never updated or deleted. Recording twice for the same player
//! in the same event adds a second row; how those rows fold into a ranking
//! is decided by `RankingMode` (see `pokerhall_core::ranking`).

use chrono::Utc;
use pokerhall_core::{ranking, NewScore, RankingEntry, RankingMode, Score};
use sqlx::{SqliteExecutor, SqlitePool};
use tracing::{debug, info};

use super::generate_id;
use crate::error::{DbError, DbResult};

const SCORE_COLUMNS: &str = r#"
    id, event_id, player_id, final_capital, bluff_score,
    win_score, crupier_vote, recorded_by, recorded_at
"#;

/// Repository for score database operations.
#[derive(Debug, Clone)]
pub struct ScoreRepository {
    pool: SqlitePool,
}

impl ScoreRepository {
    /// Creates a new ScoreRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ScoreRepository { pool }
    }

    /// Appends a score recording.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - unknown event or player
    pub async fn append(&self, new_score: &NewScore) -> DbResult<Score> {
        self.ensure_exists("events", "Event", &new_score.event_id).await?;
        self.ensure_exists("players", "Player", &new_score.player_id).await?;

        let c = new_score.components;
        let score = Score {
            id: generate_id(),
            event_id: new_score.event_id.clone(),
            player_id: new_score.player_id.clone(),
            final_capital: c.final_capital,
            bluff_score: c.bluff_score,
            win_score: c.win_score,
            crupier_vote: c.crupier_vote,
            recorded_by: new_score.recorded_by.clone(),
            recorded_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO scores (
                id, event_id, player_id, final_capital, bluff_score,
                win_score, crupier_vote, recorded_by, recorded_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&score.id)
        .bind(&score.event_id)
        .bind(&score.player_id)
        .bind(score.final_capital)
        .bind(score.bluff_score)
        .bind(score.win_score)
        .bind(score.crupier_vote)
        .bind(&score.recorded_by)
        .bind(score.recorded_at)
        .execute(&self.pool)
        .await?;

        info!(
            id = %score.id,
            event_id = %score.event_id,
            player_id = %score.player_id,
            total = score.total(),
            "Score recorded"
        );

        Ok(score)
    }

    /// Lists the score rows of an event in recording order.
    pub async fn list_for_event(&self, event_id: &str) -> DbResult<Vec<Score>> {
        load_scores(&self.pool, event_id).await
    }

    /// Ranks the players of an event by total score, highest first.
    ///
    /// An event with no scores yields an empty ranking. The existence check
    /// and the ledger read share one transaction, so they see the same
    /// snapshot.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - unknown event
    pub async fn rank_event(&self, event_id: &str, mode: RankingMode) -> DbResult<Vec<RankingEntry>> {
        let mut tx = self.pool.begin().await?;

        let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM events WHERE id = ?1")
            .bind(event_id)
            .fetch_optional(&mut *tx)
            .await?;
        if found.is_none() {
            return Err(DbError::not_found("Event", event_id));
        }

        let scores = load_scores(&mut *tx, event_id).await?;
        tx.commit().await?;
        debug!(event_id = %event_id, rows = scores.len(), ?mode, "Ranking event");

        Ok(ranking::rank(&scores, mode))
    }

    async fn ensure_exists(&self, table: &str, entity: &str, id: &str) -> DbResult<()> {
        let found: Option<i64> = sqlx::query_scalar(&format!("SELECT 1 FROM {table} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match found {
            Some(_) => Ok(()),
            None => Err(DbError::not_found(entity, id)),
        }
    }
}

/// Score rows of an event in recording order.
async fn load_scores<'e, E: SqliteExecutor<'e>>(executor: E, event_id: &str) -> DbResult<Vec<Score>> {
    let scores = sqlx::query_as::<_, Score>(&format!(
        "SELECT {SCORE_COLUMNS} FROM scores WHERE event_id = ?1 ORDER BY rowid"
    ))
    .bind(event_id)
    .fetch_all(executor)
    .await?;

    Ok(scores)
}

// =============================================================================
// Unit Tests
// =============================================================================
