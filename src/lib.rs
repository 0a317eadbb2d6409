//! # gridiron
//!
//! A dice-and-cards football drive simulator.
//!
//! Plays are authored as cards: the offense draws a routed path across a
//! coordinate plane, the defense scatters tacklers and fumblers over the
//! same plane. Running a play is a geometric collision scan - the first
//! defender a path segment touches decides the outcome. Kicks, returns,
//! and turnovers instead resolve through three-die outcome tables.
//!
//! ## Design Principles
//!
//! 1. **Dice up front**: every roll happens while an outcome tree is
//!    built. A finished [`events::Event`] tree is pure data that can be
//!    flattened, serialized, and replayed onto state deterministically.
//!
//! 2. **Injected randomness**: all rolls come from a seedable
//!    [`core::DiceRng`] threaded through construction, so whole drives
//!    replay bit-for-bit from a seed.
//!
//! 3. **One yard-line frame**: state keeps the ball on a 0-100 line from
//!    the current offense's perspective and flips it only at drive setup.
//!
//! ## Modules
//!
//! - `core`: team identities, roles, dice
//! - `geometry`: the card plane and zone containment
//! - `cards`: offense and defense card data
//! - `play`: card-vs-card collision evaluation
//! - `events`: outcome trees, tables, and constructors
//! - `game`: game state and the between-plays state machine

pub mod cards;
pub mod core;
pub mod events;
pub mod game;
pub mod geometry;
pub mod play;

// Re-export commonly used types
pub use crate::core::{DiceRng, DiceRngState, DiceRoll, Role, TeamId};

pub use crate::geometry::{Coord, Quad};

pub use crate::cards::{
    CardError, DefenderRole, DefenseCard, DefenseCardRecord, OffenseCard, OffenseCardRecord,
    SegmentKind,
};

pub use crate::play::{DefensePlay, OffensePlay, Play};

pub use crate::events::{
    tables::{FieldGoalChart, OutcomeTable, PendingOutcome, TableEntry},
    Event, EventRecord, PuntKind, RoleFrame,
};

pub use crate::game::{GameState, PendingSetup, Team};
