//! Team identification and field roles.
//!
//! ## TeamId
//!
//! Type-safe identifier for the two teams in a game.
//!
//! ## Role
//!
//! The four field roles. Roles come in complementary pairs: assigning one
//! team as kicking makes the opponent receiving, and likewise for
//! offense/defense. Special-teams events remap offense/defense to
//! kicking/receiving at construction time.

use serde::{Deserialize, Serialize};

/// Identifier for one of the two teams.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamId(u8);

impl TeamId {
    /// The team listed first at game creation.
    pub const HOME: TeamId = TeamId(0);
    /// The team listed second at game creation.
    pub const AWAY: TeamId = TeamId(1);

    /// Create a team ID. Panics unless `id` is 0 or 1.
    #[must_use]
    pub fn new(id: u8) -> Self {
        assert!(id < 2, "team id must be 0 or 1, got {id}");
        Self(id)
    }

    /// Raw index (0 or 1).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other team.
    #[must_use]
    pub const fn opponent(self) -> TeamId {
        TeamId(1 - self.0)
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Team {}", self.0)
    }
}

/// A field role a team can hold during a play.
///
/// `Offense`/`Defense` apply during scrimmage downs; `Kicking`/`Receiving`
/// during kick phases. Wire form is lowercase (`"offense"`, `"kicking"`, ...)
/// to match the serialized event records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Offense,
    Defense,
    Kicking,
    Receiving,
}

impl Role {
    /// The complementary role on the same pairing.
    #[must_use]
    pub const fn complement(self) -> Role {
        match self {
            Role::Offense => Role::Defense,
            Role::Defense => Role::Offense,
            Role::Kicking => Role::Receiving,
            Role::Receiving => Role::Kicking,
        }
    }

    /// Remap a scrimmage role into the special-teams frame.
    ///
    /// Offense becomes kicking and defense becomes receiving; kick-phase
    /// roles pass through unchanged.
    #[must_use]
    pub const fn to_special_teams(self) -> Role {
        match self {
            Role::Offense => Role::Kicking,
            Role::Defense => Role::Receiving,
            other => other,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Role::Offense => "offense",
            Role::Defense => "defense",
            Role::Kicking => "kicking",
            Role::Receiving => "receiving",
        };
        f.write_str(name)
    }
}
