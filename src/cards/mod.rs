//! Play cards: offense paths and defense formations.
//!
//! ## Key Types
//!
//! - `SegmentKind`: the four typed path segments (run, pass, lateral, catch)
//! - `PathSegment` / `OffenseCard`: an ordered path across the card plane
//! - `DefenderRole` / `Defender` / `DefenseCard`: tackler and fumbler
//!   positions, kept in deterministic `(y, x)` scan order
//!
//! Cards are built from already-parsed wire records (`OffenseCardRecord`,
//! `DefenseCardRecord`); file I/O lives with the front ends, not here.
//! Malformed records - an unrecognized segment type, an empty path - fail at
//! construction with [`CardError`]. The engine never improvises around bad
//! card data.

pub mod defense;
pub mod offense;

use thiserror::Error;

pub use defense::{Defender, DefenderRole, DefenseCard, DefenseCardRecord, DefendersRecord};
pub use offense::{OffenseCard, OffenseCardRecord, PathSegment, SegmentKind, SegmentRecord};

/// Construction-time card validation failures.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CardError {
    /// A path segment's `type` field was not one of run/pass/lateral/catch.
    #[error("card `{card}`: unrecognized segment type `{kind}`")]
    UnknownSegmentKind { card: String, kind: String },

    /// An offense card must describe at least one path segment.
    #[error("card `{card}`: offense path is empty")]
    EmptyPath { card: String },
}
