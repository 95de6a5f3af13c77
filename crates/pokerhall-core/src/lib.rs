//! # pokerhall-core: Pure Tournament Logic for Poker Hall
//!
//! This crate holds every rule of the poker hall as pure functions with zero
//! I/O dependencies. The database layer materializes what this crate decides;
//! the HTTP layer only translates.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Poker Hall Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 HTTP API (apps/api, axum)                       │   │
//! │  │   register, login, create_event, assign_seat, add_score, ...    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ pokerhall-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐          │   │
//! │  │   │  types   │ │  layout  │ │ ranking  │ │  access  │          │   │
//! │  │   │  Player  │ │ tables × │ │ per row/ │ │ PLAYER / │          │   │
//! │  │   │  Event   │ │  seats   │ │per player│ │ CRUPIER  │          │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘          │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 pokerhall-db (Database Layer)                   │   │
//! │  │         SQLite queries, migrations, repositories                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Player, Event, Table, Seat, Score)
//! - [`layout`] - Validated table/seat layout of an event
//! - [`ranking`] - Score totals and the stable ranking
//! - [`access`] - Role-gated authorization
//! - [`validation`] - Input validation
//! - [`error`] - Domain error types and the error taxonomy
//!
//! ## Example Usage
//!
//! ```rust
//! use pokerhall_core::layout::EventLayout;
//!
//! let layout = EventLayout::new(2, 3).unwrap();
//! assert_eq!(layout.total_seats(), 6);
//!
//! let plan = layout.plan();
//! assert_eq!(plan[1].table_number, 2);
//! assert_eq!(plan[1].seat_numbers().collect::<Vec<_>>(), vec![1, 2, 3]);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod access;
pub mod error;
pub mod layout;
pub mod ranking;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use access::{Action, Identity, Role};
pub use error::{CoreError, CoreResult, ErrorKind, ValidationError};
pub use layout::EventLayout;
pub use ranking::{RankingEntry, RankingMode};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of tables a single event may request.
///
/// ## Business Reason
/// The layout is materialized row by row in one transaction; an absurd
/// request (a typo like 10000) would hold the write lock for a long time.
pub const MAX_TABLES_PER_EVENT: u32 = 1000;

/// Maximum number of seats at one table.
pub const MAX_SEATS_PER_TABLE: u32 = 100;

/// Maximum length of a player's name or surname.
pub const MAX_NAME_LEN: usize = 50;

/// Maximum length of an event name.
pub const MAX_EVENT_NAME_LEN: usize = 100;

/// Oldest age accepted at registration.
pub const MAX_PLAYER_AGE: i64 = 150;
