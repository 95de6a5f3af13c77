//! # Ranking Engine
//!
//! Turns the score ledger of one event into a sorted ranking.
//!
//! ## Reduction Modes
//! ```text
//! Ledger (insertion order)          PerRow (default)       PerPlayer
//! ─────────────────────────         ────────────────       ─────────────────
//! #1 P2  10 + 5 + 2 + 1 = 18        1. P2  18              1. P2  16 (2 rows)
//! #2 P1   4 + 0 + 0 + 0 =  4        2. P1   4              2. P1   4 (1 row)
//! #3 P2  -3 + 0 + 1 + 0 = -2        3. P2  -2
//! ```
//!
//! `PerRow` keeps every ledger row as its own entry, so a player recorded
//! twice appears twice. `PerPlayer` sums a player's rows into one entry.
//!
//! ## Ordering
//! Descending by total. The sort is stable: entries with equal totals keep
//! ledger insertion order (for `PerPlayer`, the position of the player's
//! first row).
//!
//! Totals that overflow `f64` saturate at `f64::MAX` / `f64::MIN`, so every
//! entry carries a finite total.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::Score;

/// How ledger rows are reduced into ranking entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RankingMode {
    /// One entry per score row.
    #[default]
    PerRow,
    /// One entry per player, components summed across rows.
    PerPlayer,
}

/// One line of the ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RankingEntry {
    /// 1-based position in the sorted output.
    pub position: u32,
    pub player_id: String,
    pub total_score: f64,
    /// Number of ledger rows folded into this entry (always 1 for `PerRow`).
    pub score_rows: u32,
}

/// Ranks the given ledger rows.
///
/// `scores` must be in insertion order; the tie-break depends on it.
pub fn rank(scores: &[Score], mode: RankingMode) -> Vec<RankingEntry> {
    let mut entries = match mode {
        RankingMode::PerRow => scores
            .iter()
            .map(|score| RankingEntry {
                position: 0,
                player_id: score.player_id.clone(),
                total_score: saturate(score.total()),
                score_rows: 1,
            })
            .collect(),
        RankingMode::PerPlayer => group_by_player(scores),
    };

    // Vec::sort_by is stable; total_cmp keeps the order total.
    entries.sort_by(|a, b| b.total_score.total_cmp(&a.total_score));

    for (index, entry) in entries.iter_mut().enumerate() {
        entry.position = index as u32 + 1;
    }

    entries
}

/// Sums rows per player, keeping players in order of first appearance.
fn group_by_player(scores: &[Score]) -> Vec<RankingEntry> {
    let mut index_of: HashMap<&str, usize> = HashMap::new();
    let mut grouped: Vec<RankingEntry> = Vec::new();

    for score in scores {
        match index_of.get(score.player_id.as_str()) {
            Some(&index) => {
                let entry = &mut grouped[index];
                entry.total_score = saturate(entry.total_score + saturate(score.total()));
                entry.score_rows += 1;
            }
            None => {
                index_of.insert(score.player_id.as_str(), grouped.len());
                grouped.push(RankingEntry {
                    position: 0,
                    player_id: score.player_id.clone(),
                    total_score: saturate(score.total()),
                    score_rows: 1,
                });
            }
        }
    }

    grouped
}

/// Clamps an overflowed total to the largest finite value of the same sign.
#[inline]
fn saturate(total: f64) -> f64 {
    total.clamp(f64::MIN, f64::MAX)
}

// =============================================================================
// Unit Tests
// =============================================================================
