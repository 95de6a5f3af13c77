//! # Domain Types
//!
//! Core domain types used throughout Poker Hall.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐        ┌─────────────────┐                        │
//! │  │     Player      │        │      Event      │                        │
//! │  │  ─────────────  │        │  ─────────────  │                        │
//! │  │  id (UUID)      │        │  id (UUID)      │                        │
//! │  │  fiscal_code    │        │  date           │                        │
//! │  │  role           │        │  table_count    │                        │
//! │  │  capital        │        │  seats_per_table│                        │
//! │  └────────▲────────┘        └───┬─────────┬───┘                        │
//! │           │ (non-owning)    1:N │         │ 1:N                        │
//! │           │            ┌────────▼──────┐ ┌▼──────────────┐             │
//! │           │            │  TableDetail  │ │     Score     │             │
//! │           │            │  table_number │ │  4 components │             │
//! │           │            └────────┬──────┘ └───────────────┘             │
//! │           │                 1:N │                                      │
//! │           │            ┌────────▼──────┐                               │
//! │           └────────────│     Seat      │                               │
//! │                        │  seat_number  │                               │
//! │                        │  player_id?   │                               │
//! │                        └───────────────┘                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every entity is keyed by a UUID v4 string. The player additionally has a
//! business key, the fiscal code, which is unique and used to log in.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::access::Role;
use crate::layout::EventLayout;

// =============================================================================
// Player
// =============================================================================

/// A registered player (or crupier).
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Player {
    /// Unique identifier (UUID v4).
    pub id: String,

    pub name: String,

    pub surname: String,

    pub age: i64,

    /// Starting capital brought to the hall.
    pub capital: f64,

    /// National tax code, upper case. Unique across all players.
    pub fiscal_code: String,

    pub role: Role,

    /// Argon2 PHC string. Never serialized.
    #[serde(skip)]
    #[ts(skip)]
    pub password_hash: String,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Player {
    /// "Name Surname", for display.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }
}

/// Registration data for a new player, already validated and hashed.
#[derive(Debug, Clone)]
pub struct NewPlayer {
    pub name: String,
    pub surname: String,
    pub age: i64,
    pub capital: f64,
    pub fiscal_code: String,
    pub role: Role,
    pub password_hash: String,
}

// =============================================================================
// Event
// =============================================================================

/// A poker tournament with a fixed table/seat layout.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Event {
    pub id: String,
    pub name: String,
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub table_count: u32,
    pub seats_per_table: u32,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// The layout this event was created with.
    pub fn layout(&self) -> EventLayout {
        EventLayout::from_parts_unchecked(self.table_count, self.seats_per_table)
    }
}

/// Data for a new event. The layout is validated on construction.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub name: String,
    pub date: NaiveDate,
    pub layout: EventLayout,
}

// =============================================================================
// Seat
// =============================================================================

/// A numbered seat at a table.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Seat {
    pub id: String,
    pub table_id: String,
    /// Denormalized owner event, so "one seat per player per event" can be
    /// a database constraint.
    pub event_id: String,
    /// 1..=seats_per_table, unique within the table.
    pub seat_number: u32,
    pub player_id: Option<String>,
    #[ts(as = "Option<String>")]
    pub assigned_at: Option<DateTime<Utc>>,
}

impl Seat {
    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.player_id.is_some()
    }
}

// =============================================================================
// Event Detail (read model)
// =============================================================================

/// An event with its full layout, as shown on the event page.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EventDetail {
    pub event: Event,
    /// Ordered by table number.
    pub tables: Vec<TableDetail>,
}

impl EventDetail {
    /// Total number of seats across all tables.
    pub fn seat_count(&self) -> usize {
        self.tables.iter().map(|t| t.seats.len()).sum()
    }

    /// Finds a seat by table and seat number (both 1-based).
    pub fn seat_at(&self, table_number: u32, seat_number: u32) -> Option<&SeatDetail> {
        self.tables
            .iter()
            .find(|t| t.table_number == table_number)?
            .seats
            .iter()
            .find(|s| s.seat_number == seat_number)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TableDetail {
    pub id: String,
    pub table_number: u32,
    /// Ordered by seat number.
    pub seats: Vec<SeatDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SeatDetail {
    pub id: String,
    pub seat_number: u32,
    pub occupant: Option<SeatOccupant>,
}

/// Who sits in a seat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SeatOccupant {
    pub player_id: String,
    pub name: String,
    pub surname: String,
}

// =============================================================================
// Score
// =============================================================================

/// The four numeric components of one score recording.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreComponents {
    pub final_capital: f64,
    pub bluff_score: f64,
    pub win_score: f64,
    pub crupier_vote: f64,
}

impl ScoreComponents {
    pub const fn new(final_capital: f64, bluff_score: f64, win_score: f64, crupier_vote: f64) -> Self {
        ScoreComponents {
            final_capital,
            bluff_score,
            win_score,
            crupier_vote,
        }
    }

    /// Sum of the four components.
    #[inline]
    pub fn total(&self) -> f64 {
        self.final_capital + self.bluff_score + self.win_score + self.crupier_vote
    }
}

/// One row of the score ledger. Append-only.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Score {
    pub id: String,
    pub event_id: String,
    pub player_id: String,
    pub final_capital: f64,
    pub bluff_score: f64,
    pub win_score: f64,
    pub crupier_vote: f64,
    /// The crupier who recorded this row.
    pub recorded_by: String,
    #[ts(as = "String")]
    pub recorded_at: DateTime<Utc>,
}

impl Score {
    #[inline]
    pub fn components(&self) -> ScoreComponents {
        ScoreComponents::new(
            self.final_capital,
            self.bluff_score,
            self.win_score,
            self.crupier_vote,
        )
    }

    /// Total of this single row.
    #[inline]
    pub fn total(&self) -> f64 {
        self.components().total()
    }
}

/// A score recording about to be appended.
#[derive(Debug, Clone)]
pub struct NewScore {
    pub event_id: String,
    pub player_id: String,
    pub components: ScoreComponents,
    pub recorded_by: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
