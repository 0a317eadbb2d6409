//! Defense cards: tackler and fumbler positions.

use serde::{Deserialize, Serialize};

use crate::geometry::Coord;

use super::CardError;

/// What a defender does to a ball carrier on contact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefenderRole {
    Tackler,
    Fumbler,
}

/// A single defender: a role and a position on the card plane.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Defender {
    pub role: DefenderRole,
    pub coord: Coord,
}

/// Wire record for defender positions, split by role.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DefendersRecord {
    pub tacklers: Vec<Coord>,
    pub fumblers: Vec<Coord>,
}

/// Wire record for a defense card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DefenseCardRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub players: DefendersRecord,
}

/// An immutable defense play card.
///
/// Defenders are sorted by `(y, x)` - yard line first - so the contact scan
/// always finds the closest-downfield defender on a segment deterministically
/// when several defenders could intercept it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DefenseCard {
    id: String,
    name: String,
    description: Option<String>,
    tacklers: Vec<Coord>,
    fumblers: Vec<Coord>,
}

/// Sort positions by `(y, x)` with a total order on the floats.
pub(crate) fn sort_coords(coords: &mut [Coord]) {
    coords.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.total_cmp(&b.0)));
}

impl DefenseCard {
    /// Build a card from its wire record.
    ///
    /// `Result` for symmetry with the offense side; defender records carry
    /// no open-ended fields today, so construction cannot currently fail.
    pub fn from_record(record: DefenseCardRecord) -> Result<Self, CardError> {
        let mut tacklers = record.players.tacklers;
        let mut fumblers = record.players.fumblers;
        sort_coords(&mut tacklers);
        sort_coords(&mut fumblers);

        Ok(Self {
            id: record.id,
            name: record.name,
            description: record.description,
            tacklers,
            fumblers,
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

    /// Optional formation description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Tackler positions in scan order.
    #[must_use]
    pub fn tacklers(&self) -> &[Coord] {
        &self.tacklers
    }

    /// Fumbler positions in scan order.
    #[must_use]
    pub fn fumblers(&self) -> &[Coord] {
        &self.fumblers
    }

    /// All defenders, role-tagged and merged into a single `(y, x)` scan
    /// order.
    #[must_use]
    pub fn players(&self) -> Vec<Defender> {
        let mut players: Vec<Defender> = self
            .tacklers
            .iter()
            .map(|&coord| Defender {
                role: DefenderRole::Tackler,
                coord,
            })
            .chain(self.fumblers.iter().map(|&coord| Defender {
                role: DefenderRole::Fumbler,
                coord,
            }))
            .collect();

        players.sort_by(|a, b| {
            a.coord
                .1
                .total_cmp(&b.coord.1)
                .then(a.coord.0.total_cmp(&b.coord.0))
        });
        players
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> DefenseCardRecord {
        DefenseCardRecord {
            id: "def-1".to_string(),
            name: "Goal Line Stand".to_string(),
            description: Some("Stacked front".to_string()),
            players: DefendersRecord {
                tacklers: vec![Coord(3.0, 5.0), Coord(-1.0, 2.0), Coord(0.0, 2.0)],
                fumblers: vec![Coord(1.0, 4.0)],
            },
        }
    }

    #[test]
    fn test_tacklers_sorted_by_y_then_x() {
        let card = DefenseCard::from_record(record()).unwrap();

        assert_eq!(
            card.tacklers(),
            &[Coord(-1.0, 2.0), Coord(0.0, 2.0), Coord(3.0, 5.0)]
        );
    }

    #[test]
    fn test_players_merged_in_scan_order() {
        let card = DefenseCard::from_record(record()).unwrap();
        let players = card.players();

        let coords: Vec<Coord> = players.iter().map(|p| p.coord).collect();
        assert_eq!(
            coords,
            vec![
                Coord(-1.0, 2.0),
                Coord(0.0, 2.0),
                Coord(1.0, 4.0),
                Coord(3.0, 5.0)
            ]
        );
        assert_eq!(players[2].role, DefenderRole::Fumbler);
    }

    #[test]
    fn test_record_from_json() {
        let json = r#"{
            "id": "def-4",
            "name": "Prevent",
            "players": {
                "tacklers": [[0.0, 10.0], [2.0, 14.0]],
                "fumblers": []
            }
        }"#;

        let record: DefenseCardRecord = serde_json::from_str(json).unwrap();
        let card = DefenseCard::from_record(record).unwrap();

        assert_eq!(card.description(), None);
        assert_eq!(card.tacklers().len(), 2);
        assert!(card.fumblers().is_empty());
    }
}
