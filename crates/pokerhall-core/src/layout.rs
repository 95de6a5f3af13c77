//! # Event Layout
//!
//! Deterministic table/seat structure of an event.
//!
//! ## What Gets Generated
//! ```text
//! EventLayout::new(table_count: 2, seats_per_table: 3)
//!      │
//!      ▼
//! plan()
//!   ├── Table 1 ── seats 1, 2, 3
//!   └── Table 2 ── seats 1, 2, 3
//! ```
//!
//! The layout is only a value: the database layer turns the plan into rows
//! inside a single transaction, so an event is never visible with part of
//! its layout missing.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::validation::{validate_count, ValidationResult};
use crate::{MAX_SEATS_PER_TABLE, MAX_TABLES_PER_EVENT};

/// A validated table/seat layout: at least one table, at least one seat each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLayout")]
pub struct EventLayout {
    table_count: u32,
    seats_per_table: u32,
}

/// One table of the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TablePlan {
    pub table_number: u32,
    pub seats_per_table: u32,
}

impl TablePlan {
    /// Seat numbers of this table, 1-based and contiguous.
    pub fn seat_numbers(&self) -> RangeInclusive<u32> {
        1..=self.seats_per_table
    }
}

impl EventLayout {
    /// Validates the requested counts.
    ///
    /// ## Rules
    /// - `table_count` in 1..=[`MAX_TABLES_PER_EVENT`]
    /// - `seats_per_table` in 1..=[`MAX_SEATS_PER_TABLE`]
    pub fn new(table_count: i64, seats_per_table: i64) -> ValidationResult<Self> {
        let table_count = validate_count("table_count", table_count, MAX_TABLES_PER_EVENT)?;
        let seats_per_table =
            validate_count("seats_per_table", seats_per_table, MAX_SEATS_PER_TABLE)?;

        Ok(EventLayout {
            table_count,
            seats_per_table,
        })
    }

    /// Rebuilds a layout from counts already stored with an event.
    pub(crate) fn from_parts_unchecked(table_count: u32, seats_per_table: u32) -> Self {
        EventLayout {
            table_count,
            seats_per_table,
        }
    }

    #[inline]
    pub const fn table_count(&self) -> u32 {
        self.table_count
    }

    #[inline]
    pub const fn seats_per_table(&self) -> u32 {
        self.seats_per_table
    }

    #[inline]
    pub const fn total_seats(&self) -> u32 {
        self.table_count * self.seats_per_table
    }

    /// The tables to create, in table-number order.
    pub fn plan(&self) -> Vec<TablePlan> {
        (1..=self.table_count)
            .map(|table_number| TablePlan {
                table_number,
                seats_per_table: self.seats_per_table,
            })
            .collect()
    }
}

#[derive(Deserialize)]
struct RawLayout {
    table_count: i64,
    seats_per_table: i64,
}

impl TryFrom<RawLayout> for EventLayout {
    type Error = ValidationError;

    fn try_from(raw: RawLayout) -> Result<Self, Self::Error> {
        EventLayout::new(raw.table_count, raw.seats_per_table)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
