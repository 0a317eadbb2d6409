//! Core engine types: dice, teams, and roles.
//!
//! These are the building blocks shared by every other module. They carry no
//! football rules themselves; tables and events give them meaning.

pub mod rng;
pub mod team;

pub use rng::{DiceRng, DiceRngState, DiceRoll};
pub use team::{Role, TeamId};
