//! # pokerhall-db: Database Layer for Poker Hall
//!
//! SQLite persistence for players, events, seats and scores, using sqlx for
//! async access.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Poker Hall Data Flow                             │
//! │                                                                         │
//! │  HTTP handler (POST /api/v1/seats/{id}/assign)                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   pokerhall-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ PlayerRepo    │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ EventRepo     │    │ 001_initial_ │  │   │
//! │  │   │ WAL, FKs on   │    │ SeatRepo      │    │   schema.sql │  │   │
//! │  │   │               │    │ ScoreRepo     │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │                     ./pokerhall.db                              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pokerhall_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("pokerhall.db")).await?;
//!
//! let detail = db.events().create(&new_event).await?;
//! let seat = db.seats().assign(&seat_id, &player_id).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::event::EventRepository;
pub use repository::player::PlayerRepository;
pub use repository::score::ScoreRepository;
pub use repository::seat::SeatRepository;
