//! # Repository Module
//!
//! Database repository implementations for Poker Hall.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Component → Repository                               │
//! │                                                                         │
//! │  Identity Store            ─► PlayerRepository                         │
//! │  Event Layout Generator    ─► EventRepository   (one transaction)      │
//! │  Seat Assignment Manager   ─► SeatRepository    (compare-and-set)      │
//! │  Score Ledger + Ranking    ─► ScoreRepository   (append-only)          │
//! │                                                                         │
//! │  Handler ──► db.seats().assign(seat_id, player_id) ──► SQLite          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Repositories receive already-validated input (`NewPlayer`, `NewEvent`,
//! `NewScore` from pokerhall-core); they never re-check business rules that
//! the core owns, only the ones that need the database to decide.

pub mod event;
pub mod player;
pub mod score;
pub mod seat;

/// Generates a new entity ID (UUID v4).
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
