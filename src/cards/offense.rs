//! Offense cards: ordered paths of typed segments.

use serde::{Deserialize, Serialize};

use crate::geometry::Coord;

use super::CardError;

/// The four kinds of path segment an offense card can carry.
///
/// The kind decides what a defender contact means during evaluation:
/// runs and catches can be tackled or fumbled, passes are batted down,
/// laterals are always live balls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Run,
    Pass,
    Lateral,
    Catch,
}

impl SegmentKind {
    /// Parse the wire form (`"run"`, `"pass"`, `"lateral"`, `"catch"`).
    pub fn parse(text: &str) -> Option<SegmentKind> {
        match text {
            "run" => Some(SegmentKind::Run),
            "pass" => Some(SegmentKind::Pass),
            "lateral" => Some(SegmentKind::Lateral),
            "catch" => Some(SegmentKind::Catch),
            _ => None,
        }
    }

    /// Wire name of this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            SegmentKind::Run => "run",
            SegmentKind::Pass => "pass",
            SegmentKind::Lateral => "lateral",
            SegmentKind::Catch => "catch",
        }
    }
}

impl std::fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One typed leg of an offense path.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PathSegment {
    pub kind: SegmentKind,
    pub start: Coord,
    pub end: Coord,
}

/// Wire record for a single path segment. The segment type arrives as an
/// open string and is validated during card construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SegmentRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub start: Coord,
    pub end: Coord,
}

/// Wire record for an offense card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OffenseCardRecord {
    pub id: String,
    pub name: String,
    pub path: Vec<SegmentRecord>,
}

/// An immutable offense play card.
///
/// The path is ordered from the line of scrimmage outward. Cards are never
/// mutated after construction; per-play offset copies are built by the play
/// module with geometry recomputed from scratch.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OffenseCard {
    id: String,
    name: String,
    path: Vec<PathSegment>,
}

impl OffenseCard {
    /// Build a card from its wire record, validating every segment type.
    pub fn from_record(record: OffenseCardRecord) -> Result<Self, CardError> {
        if record.path.is_empty() {
            return Err(CardError::EmptyPath { card: record.id });
        }

        let mut path = Vec::with_capacity(record.path.len());
        for seg in &record.path {
            let kind = SegmentKind::parse(&seg.kind).ok_or_else(|| CardError::UnknownSegmentKind {
                card: record.id.clone(),
                kind: seg.kind.clone(),
            })?;
            path.push(PathSegment {
                kind,
                start: seg.start,
                end: seg.end,
            });
        }

        Ok(Self {
            id: record.id,
            name: record.name,
            path,
        })
    }

    /// Card identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The ordered path segments.
    #[must_use]
    pub fn path(&self) -> &[PathSegment] {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(kinds: &[&str]) -> OffenseCardRecord {
        OffenseCardRecord {
            id: "off-1".to_string(),
            name: "Sweep Right".to_string(),
            path: kinds
                .iter()
                .enumerate()
                .map(|(i, kind)| SegmentRecord {
                    kind: kind.to_string(),
                    start: Coord(0.0, i as f64),
                    end: Coord(0.0, i as f64 + 1.0),
                })
                .collect(),
        }
    }

    #[test]
    fn test_build_from_record() {
        let card = OffenseCard::from_record(record(&["run", "pass", "catch"])).unwrap();

        assert_eq!(card.id(), "off-1");
        assert_eq!(card.name(), "Sweep Right");
        assert_eq!(card.path().len(), 3);
        assert_eq!(card.path()[1].kind, SegmentKind::Pass);
    }

    #[test]
    fn test_unknown_segment_kind_fails() {
        let err = OffenseCard::from_record(record(&["run", "kneel"])).unwrap_err();

        assert_eq!(
            err,
            CardError::UnknownSegmentKind {
                card: "off-1".to_string(),
                kind: "kneel".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_path_fails() {
        let err = OffenseCard::from_record(record(&[])).unwrap_err();

        assert!(matches!(err, CardError::EmptyPath { .. }));
    }

    #[test]
    fn test_record_round_trips_through_json() {
        let json = r#"{
            "id": "off-7",
            "name": "Deep Post",
            "path": [
                {"type": "pass", "start": [0.0, 0.0], "end": [2.0, 12.0]},
                {"type": "catch", "start": [2.0, 12.0], "end": [2.0, 18.0]}
            ]
        }"#;

        let record: OffenseCardRecord = serde_json::from_str(json).unwrap();
        let card = OffenseCard::from_record(record).unwrap();

        assert_eq!(card.path()[0].kind, SegmentKind::Pass);
        assert_eq!(card.path()[1].start, Coord(2.0, 12.0));
    }

    #[test]
    fn test_parse_all_kinds() {
        for (text, kind) in [
            ("run", SegmentKind::Run),
            ("pass", SegmentKind::Pass),
            ("lateral", SegmentKind::Lateral),
            ("catch", SegmentKind::Catch),
        ] {
            assert_eq!(SegmentKind::parse(text), Some(kind));
            assert_eq!(kind.name(), text);
        }
        assert_eq!(SegmentKind::parse("punt"), None);
    }
}
