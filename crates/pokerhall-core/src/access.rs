//! # Access Policy
//!
//! Role-gated authorization for every core operation.
//!
//! ## Policy Table
//! ```text
//! ┌──────────────────────────────┬──────────┬──────────┬──────────────┐
//! │ Action                       │  PLAYER  │ CRUPIER  │ no identity  │
//! ├──────────────────────────────┼──────────┼──────────┼──────────────┤
//! │ view events / players        │    ✅    │    ✅    │      ❌      │
//! │ view scores / ranking        │    ✅    │    ✅    │      ❌      │
//! │ assign seat                  │    ✅    │    ✅    │      ❌      │
//! │ create event                 │    ❌    │    ✅    │      ❌      │
//! │ record score                 │    ❌    │    ✅    │      ❌      │
//! │ change role / adjust capital │    ❌    │    ✅    │      ❌      │
//! └──────────────────────────────┴──────────┴──────────┴──────────────┘
//! ```
//!
//! The policy fails closed: a missing identity is denied everything, and a
//! role string outside {PLAYER, CRUPIER} never becomes a [`Role`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};

// =============================================================================
// Role
// =============================================================================

/// The closed set of roles a player can hold.
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "UPPERCASE")]
#[ts(export)]
pub enum Role {
    /// A registered participant.
    #[default]
    Player,
    /// The dealer: creates events and records scores.
    Crupier,
}

impl Role {
    /// Wire/database spelling of the role.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Player => "PLAYER",
            Role::Crupier => "CRUPIER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "PLAYER" => Ok(Role::Player),
            "CRUPIER" => Ok(Role::Crupier),
            _ => Err(ValidationError::NotAllowed {
                field: "role".to_string(),
                allowed: vec!["PLAYER".to_string(), "CRUPIER".to_string()],
            }),
        }
    }
}

// =============================================================================
// Action
// =============================================================================

/// Operations the access policy decides on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ViewEvents,
    ViewPlayers,
    ViewScores,
    ViewRanking,
    AssignSeat,
    CreateEvent,
    RecordScore,
    ChangeRole,
    AdjustCapital,
}

impl Action {
    /// The role an action demands beyond being authenticated, if any.
    pub const fn required_role(&self) -> Option<Role> {
        match self {
            Action::CreateEvent
            | Action::RecordScore
            | Action::ChangeRole
            | Action::AdjustCapital => Some(Role::Crupier),
            Action::ViewEvents
            | Action::ViewPlayers
            | Action::ViewScores
            | Action::ViewRanking
            | Action::AssignSeat => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Action::ViewEvents => "view events",
            Action::ViewPlayers => "view players",
            Action::ViewScores => "view scores",
            Action::ViewRanking => "view rankings",
            Action::AssignSeat => "assign seats",
            Action::CreateEvent => "create events",
            Action::RecordScore => "record scores",
            Action::ChangeRole => "change roles",
            Action::AdjustCapital => "adjust capital",
        };
        f.write_str(text)
    }
}

// =============================================================================
// Identity
// =============================================================================

/// The authenticated caller, as supplied by the credential layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub player_id: String,
    pub role: Role,
}

impl Identity {
    pub fn new(player_id: impl Into<String>, role: Role) -> Self {
        Identity {
            player_id: player_id.into(),
            role,
        }
    }
}

// =============================================================================
// Policy
// =============================================================================

/// Decides whether `identity` may perform `action`.
pub fn authorize(identity: Option<&Identity>, action: Action) -> bool {
    let Some(identity) = identity else {
        return false;
    };

    match action.required_role() {
        None => true,
        Some(required) => identity.role == required,
    }
}

/// Like [`authorize`], but as a `Result` for `?` in call sites.
pub fn require(identity: Option<&Identity>, action: Action) -> CoreResult<()> {
    if authorize(identity, action) {
        Ok(())
    } else {
        Err(CoreError::Unauthorized { action })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_ACTIONS: [Action; 9] = [
        Action::ViewEvents,
        Action::ViewPlayers,
        Action::ViewScores,
        Action::ViewRanking,
        Action::AssignSeat,
        Action::CreateEvent,
        Action::RecordScore,
        Action::ChangeRole,
        Action::AdjustCapital,
    ];

    #[test]
    fn test_crupier_may_do_everything() {
        let crupier = Identity::new("c-1", Role::Crupier);
        for action in ALL_ACTIONS {
            assert!(authorize(Some(&crupier), action), "{action}");
        }
    }

    #[test]
    fn test_player_is_denied_privileged_actions() {
        let player = Identity::new("p-1", Role::Player);

        assert!(authorize(Some(&player), Action::ViewEvents));
        assert!(authorize(Some(&player), Action::AssignSeat));
        assert!(authorize(Some(&player), Action::ViewRanking));

        assert!(!authorize(Some(&player), Action::CreateEvent));
        assert!(!authorize(Some(&player), Action::RecordScore));
        assert!(!authorize(Some(&player), Action::ChangeRole));
        assert!(!authorize(Some(&player), Action::AdjustCapital));
    }

    #[test]
    fn test_missing_identity_fails_closed() {
        for action in ALL_ACTIONS {
            assert!(!authorize(None, action));
        }
    }

    #[test]
    fn test_require_reports_action() {
        let player = Identity::new("p-1", Role::Player);
        let err = require(Some(&player), Action::RecordScore).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Unauthorized {
                action: Action::RecordScore
            }
        ));
    }

    #[test]
    fn test_role_parsing_is_closed() {
        assert_eq!("CRUPIER".parse::<Role>().unwrap(), Role::Crupier);
        assert_eq!("PLAYER".parse::<Role>().unwrap(), Role::Player);
        assert!("crupier".parse::<Role>().is_err());
        assert!("ADMIN".parse::<Role>().is_err());
        assert!(serde_json::from_str::<Role>("\"ADMIN\"").is_err());
    }

    #[test]
    fn test_role_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Role::Crupier).unwrap(), "\"CRUPIER\"");
        assert_eq!(Role::default(), Role::Player);
    }
}
