//! # Event Repository
//!
//! The Event Layout Generator: creates an event together with its complete
//! table/seat layout, and reads events back with their layout.
//!
//! ## Atomic Creation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   SINGLE TRANSACTION                                    │
//! │                                                                         │
//! │  1. INSERT INTO events (...)                                           │
//! │  2. for table in layout.plan():                                        │
//! │        INSERT INTO event_tables (...)                                  │
//! │        for seat in table.seat_numbers():                               │
//! │            INSERT INTO seats (..., player_id = NULL)                   │
//! │                                                                         │
//! │  COMMIT ← all rows become visible together, or none do                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Dropping the transaction without committing (any `?` above) rolls it
//! back, so a failure half-way leaves no orphaned tables or seats.

use chrono::Utc;
use pokerhall_core::{
    Event, EventDetail, NewEvent, SeatDetail, SeatOccupant, TableDetail,
};
use sqlx::{FromRow, Sqlite, SqlitePool, Transaction};
use tracing::{debug, info};

use super::generate_id;
use crate::error::{DbError, DbResult};

const EVENT_COLUMNS: &str = "id, name, date, table_count, seats_per_table, created_at";

/// Repository for event database operations.
#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: SqlitePool,
}

/// One seat of an event layout joined with its table and occupant.
#[derive(Debug, FromRow)]
struct LayoutRow {
    table_id: String,
    table_number: u32,
    seat_id: String,
    seat_number: u32,
    player_id: Option<String>,
    player_name: Option<String>,
    player_surname: Option<String>,
}

impl EventRepository {
    /// Creates a new EventRepository.
    pub fn new(pool: SqlitePool) -> Self {
        EventRepository { pool }
    }

    /// Creates an event and its full layout in one transaction.
    ///
    /// ## Returns
    /// The committed event with every table and seat (all seats free).
    pub async fn create(&self, new_event: &NewEvent) -> DbResult<EventDetail> {
        let layout = new_event.layout;
        let event = Event {
            id: generate_id(),
            name: new_event.name.clone(),
            date: new_event.date,
            table_count: layout.table_count(),
            seats_per_table: layout.seats_per_table(),
            created_at: Utc::now(),
        };

        debug!(
            id = %event.id,
            tables = layout.table_count(),
            seats_per_table = layout.seats_per_table(),
            "Creating event"
        );

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO events (id, name, date, table_count, seats_per_table, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&event.id)
        .bind(&event.name)
        .bind(event.date)
        .bind(event.table_count)
        .bind(event.seats_per_table)
        .bind(event.created_at)
        .execute(&mut *tx)
        .await?;

        let mut tables = Vec::with_capacity(layout.table_count() as usize);

        for plan in layout.plan() {
            let table_id = generate_id();

            sqlx::query(
                "INSERT INTO event_tables (id, event_id, table_number) VALUES (?1, ?2, ?3)",
            )
            .bind(&table_id)
            .bind(&event.id)
            .bind(plan.table_number)
            .execute(&mut *tx)
            .await?;

            let mut seats = Vec::with_capacity(plan.seats_per_table as usize);
            for seat_number in plan.seat_numbers() {
                let seat_id = generate_id();

                sqlx::query(
                    r#"
                    INSERT INTO seats (id, table_id, event_id, seat_number, player_id, assigned_at)
                    VALUES (?1, ?2, ?3, ?4, NULL, NULL)
                    "#,
                )
                .bind(&seat_id)
                .bind(&table_id)
                .bind(&event.id)
                .bind(seat_number)
                .execute(&mut *tx)
                .await?;

                seats.push(SeatDetail {
                    id: seat_id,
                    seat_number,
                    occupant: None,
                });
            }

            tables.push(TableDetail {
                id: table_id,
                table_number: plan.table_number,
                seats,
            });
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(
            id = %event.id,
            name = %event.name,
            seats = layout.total_seats(),
            "Event created"
        );

        Ok(EventDetail { event, tables })
    }

    /// Gets an event by ID (without layout).
    pub async fn find_by_id(&self, id: &str) -> DbResult<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Gets an event by ID, failing with `NotFound` when absent.
    pub async fn get(&self, id: &str) -> DbResult<Event> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Event", id))
    }

    /// Lists events by date, then creation order.
    pub async fn list(&self) -> DbResult<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events ORDER BY date, rowid"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Gets an event with its tables, seats and seat occupants.
    ///
    /// Both reads share one transaction, so they see the same snapshot.
    pub async fn get_detail(&self, id: &str) -> DbResult<EventDetail> {
        let mut tx = self.pool.begin().await?;

        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::not_found("Event", id))?;

        let rows = load_layout(&mut tx, id).await?;
        tx.commit().await?;

        Ok(EventDetail {
            event,
            tables: group_layout(rows),
        })
    }

    /// Counts events (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM events")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

async fn load_layout(tx: &mut Transaction<'_, Sqlite>, event_id: &str) -> DbResult<Vec<LayoutRow>> {
    let rows = sqlx::query_as::<_, LayoutRow>(
        r#"
        SELECT
            t.id           AS table_id,
            t.table_number AS table_number,
            s.id           AS seat_id,
            s.seat_number  AS seat_number,
            p.id           AS player_id,
            p.name         AS player_name,
            p.surname      AS player_surname
        FROM event_tables t
        INNER JOIN seats s ON s.table_id = t.id
        LEFT JOIN players p ON p.id = s.player_id
        WHERE t.event_id = ?1
        ORDER BY t.table_number, s.seat_number
        "#,
    )
    .bind(event_id)
    .fetch_all(&mut **tx)
    .await?;

    Ok(rows)
}

/// Folds ordered layout rows into tables of seats.
fn group_layout(rows: Vec<LayoutRow>) -> Vec<TableDetail> {
    let mut tables: Vec<TableDetail> = Vec::new();

    for row in rows {
        let occupant = match (row.player_id, row.player_name, row.player_surname) {
            (Some(player_id), Some(name), Some(surname)) => Some(SeatOccupant {
                player_id,
                name,
                surname,
            }),
            _ => None,
        };
        let seat = SeatDetail {
            id: row.seat_id,
            seat_number: row.seat_number,
            occupant,
        };

        match tables.last_mut() {
            Some(table) if table.id == row.table_id => table.seats.push(seat),
            _ => tables.push(TableDetail {
                id: row.table_id,
                table_number: row.table_number,
                seats: vec![seat],
            }),
        }
    }

    tables
}

// =============================================================================
// Unit Tests
// =============================================================================
