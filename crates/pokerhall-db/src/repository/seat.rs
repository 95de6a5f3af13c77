//! # Seat Repository
//!
//! The Seat Assignment Manager: places a player into a free seat.
//!
//! ## Assignment Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  assign(seat_id, player_id)                                             │
//! │                                                                         │
//! │  1. player exists?            no ─► NotFound(Player)                   │
//! │  2. seat exists?              no ─► NotFound(Seat)                     │
//! │  3. seat free?                no ─► SeatOccupied                       │
//! │  4. player seated in event?   yes ─► AlreadySeated                     │
//! │  5. UPDATE seats SET player_id = ?                                     │
//! │        WHERE id = ? AND player_id IS NULL        ← compare-and-set     │
//! │        │                                                                │
//! │        ├── 1 row   ─► assigned                                         │
//! │        ├── 0 rows  ─► someone won the race ─► SeatOccupied             │
//! │        └── UNIQUE(event_id, player_id) ─► AlreadySeated                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Steps 1-4 give precise errors for the common case. Step 5 is what makes
//! the rules hold under concurrency: the WHERE clause and the partial unique
//! index are checked by SQLite inside the single write, so two racing
//! requests can never both succeed.

use chrono::Utc;
use pokerhall_core::Seat;
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};

const SEAT_COLUMNS: &str = "id, table_id, event_id, seat_number, player_id, assigned_at";

/// Repository for seat database operations.
#[derive(Debug, Clone)]
pub struct SeatRepository {
    pool: SqlitePool,
}

impl SeatRepository {
    /// Creates a new SeatRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SeatRepository { pool }
    }

    /// Gets a seat by ID.
    pub async fn find_by_id(&self, id: &str) -> DbResult<Option<Seat>> {
        let seat = sqlx::query_as::<_, Seat>(&format!(
            "SELECT {SEAT_COLUMNS} FROM seats WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(seat)
    }

    /// Gets a seat by ID, failing with `NotFound` when absent.
    pub async fn get(&self, id: &str) -> DbResult<Seat> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Seat", id))
    }

    /// Gets the seat a player holds in an event, if any.
    pub async fn find_for_player_in_event(
        &self,
        player_id: &str,
        event_id: &str,
    ) -> DbResult<Option<Seat>> {
        let seat = sqlx::query_as::<_, Seat>(&format!(
            "SELECT {SEAT_COLUMNS} FROM seats WHERE event_id = ?1 AND player_id = ?2"
        ))
        .bind(event_id)
        .bind(player_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(seat)
    }

    /// Assigns a player to a free seat.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - unknown seat or player
    /// * `DbError::SeatOccupied` - the seat already has a player, including
    ///   when another request filled it first
    /// * `DbError::AlreadySeated` - the player holds another seat in the
    ///   same event
    pub async fn assign(&self, seat_id: &str, player_id: &str) -> DbResult<Seat> {
        let player_exists: Option<i64> = sqlx::query_scalar("SELECT 1 FROM players WHERE id = ?1")
            .bind(player_id)
            .fetch_optional(&self.pool)
            .await?;
        if player_exists.is_none() {
            return Err(DbError::not_found("Player", player_id));
        }

        let seat = self.get(seat_id).await?;

        if seat.is_occupied() {
            return Err(DbError::SeatOccupied {
                seat_id: seat.id,
            });
        }

        if self
            .find_for_player_in_event(player_id, &seat.event_id)
            .await?
            .is_some()
        {
            return Err(DbError::AlreadySeated {
                player_id: player_id.to_string(),
                event_id: seat.event_id,
            });
        }

        let assigned_at = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE seats
            SET player_id = ?2, assigned_at = ?3
            WHERE id = ?1 AND player_id IS NULL
            "#,
        )
        .bind(seat_id)
        .bind(player_id)
        .bind(assigned_at)
        .execute(&self.pool)
        .await;

        let rows = match result {
            Ok(done) => done.rows_affected(),
            Err(e) => {
                let err = DbError::from(e);
                if err.is_unique_violation_on("seats.player_id") {
                    debug!(seat_id = %seat_id, player_id = %player_id, "Lost seat race on player index");
                    return Err(DbError::AlreadySeated {
                        player_id: player_id.to_string(),
                        event_id: seat.event_id,
                    });
                }
                return Err(err);
            }
        };

        if rows == 0 {
            let conflict = DbError::ConflictingWrite {
                entity: "Seat".to_string(),
                id: seat_id.to_string(),
            };
            warn!(seat_id = %seat_id, player_id = %player_id, "{}", conflict);

            return match self.find_by_id(seat_id).await? {
                Some(current) if current.is_occupied() => Err(DbError::SeatOccupied {
                    seat_id: current.id,
                }),
                _ => Err(conflict),
            };
        }

        info!(
            seat_id = %seat_id,
            player_id = %player_id,
            event_id = %seat.event_id,
            "Seat assigned"
        );

        Ok(Seat {
            player_id: Some(player_id.to_string()),
            assigned_at: Some(assigned_at),
            ..seat
        })
    }

    /// Counts occupied seats in an event.
    pub async fn count_occupied(&self, event_id: &str) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM seats WHERE event_id = ?1 AND player_id IS NOT NULL",
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
