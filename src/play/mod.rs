//! Matching an offense card against a defense card.
//!
//! Cards are authored on a shared coordinate plane. At snap time each side
//! may slide its card horizontally by an offset; working copies of the
//! cards are built with the offsets baked in and the collision zones
//! precomputed. [`Play::run`] then scans for the first contact between a
//! path segment and a defender and turns it into an outcome event.

use crate::cards::{DefenderRole, DefenseCard, OffenseCard, SegmentKind};
use crate::core::DiceRng;
use crate::events::Event;
use crate::geometry::{catch_zone, defender_zone, path_zone, Coord, Quad};

/// A path segment with its collision geometry precomputed.
#[derive(Clone, Debug)]
pub struct PlaySegment {
    kind: SegmentKind,
    start: Coord,
    end: Coord,
    zone: Quad,
    catch: Option<Quad>,
}

impl PlaySegment {
    fn new(kind: SegmentKind, start: Coord, end: Coord) -> Self {
        // Pass and lateral targets can be jumped at the throw's end; a
        // catch segment is live at its start, where the ball arrives.
        let catch = match kind {
            SegmentKind::Pass | SegmentKind::Lateral => Some(catch_zone(end)),
            SegmentKind::Catch => Some(catch_zone(start)),
            SegmentKind::Run => None,
        };
        Self {
            kind,
            start,
            end,
            zone: path_zone(start, end),
            catch,
        }
    }

    #[must_use]
    pub fn kind(&self) -> SegmentKind {
        self.kind
    }

    #[must_use]
    pub fn start(&self) -> Coord {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> Coord {
        self.end
    }
}

/// An offense card shifted to its snap alignment.
#[derive(Clone, Debug)]
pub struct OffensePlay {
    segments: Vec<PlaySegment>,
}

impl OffensePlay {
    /// Bake `offset` into every segment and precompute the zones.
    #[must_use]
    pub fn from_card(card: &OffenseCard, offset: f64) -> Self {
        let segments = card
            .path()
            .iter()
            .map(|segment| {
                PlaySegment::new(
                    segment.kind,
                    segment.start.shifted(offset),
                    segment.end.shifted(offset),
                )
            })
            .collect();
        Self { segments }
    }

    #[must_use]
    pub fn segments(&self) -> &[PlaySegment] {
        &self.segments
    }
}

/// A defender shifted to snap alignment, with its contact zone.
#[derive(Clone, Debug)]
pub struct PlayDefender {
    role: DefenderRole,
    coord: Coord,
    zone: Quad,
}

/// A defense card shifted to its snap alignment.
#[derive(Clone, Debug)]
pub struct DefensePlay {
    defenders: Vec<PlayDefender>,
}

impl DefensePlay {
    /// Bake `offset` into every defender and precompute the zones.
    #[must_use]
    pub fn from_card(card: &DefenseCard, offset: f64) -> Self {
        let defenders = card
            .players()
            .into_iter()
            .map(|defender| {
                let coord = defender.coord.shifted(offset);
                PlayDefender {
                    role: defender.role,
                    coord,
                    zone: defender_zone(coord),
                }
            })
            .collect();
        Self { defenders }
    }

    #[must_use]
    pub fn defenders(&self) -> &[PlayDefender] {
        &self.defenders
    }
}

/// An offense/defense card pairing ready to run.
#[derive(Clone, Debug)]
pub struct Play {
    offense: OffensePlay,
    defense: DefensePlay,
}

impl Play {
    /// Pair two cards with their snap offsets.
    #[must_use]
    pub fn new(
        offense: &OffenseCard,
        defense: &DefenseCard,
        off_offset: f64,
        def_offset: f64,
    ) -> Self {
        Self {
            offense: OffensePlay::from_card(offense, off_offset),
            defense: DefensePlay::from_card(defense, def_offset),
        }
    }

    /// Run the play from an absolute yard line.
    ///
    /// Returns the scrimmage event wrapping the first-contact outcome.
    pub fn run(&self, from_yard_line: i32, rng: &mut DiceRng) -> Event {
        let (yds, result) = self.evaluate(from_yard_line, rng);
        Event::Scrimmage {
            from: from_yard_line,
            yds,
            result: Box::new(result),
        }
    }

    /// First contact wins: scan segments in path order (skipping the
    /// initial snap leg), defenders in card order, and stop at the first
    /// zone containment. No contact anywhere is a walk-in touchdown.
    fn evaluate(&self, from_yard_line: i32, rng: &mut DiceRng) -> (i32, Event) {
        for segment in self.offense.segments.iter().skip(1) {
            for defender in &self.defense.defenders {
                if !segment.zone.contains_square(&defender.zone) {
                    continue;
                }

                let play_yds = defender.coord.y().round() as i32;
                let play_end = from_yard_line + play_yds;

                if let Some(catch) = &segment.catch {
                    if catch.contains_square(&defender.zone) {
                        return (play_yds, Event::interception(play_end, rng));
                    }
                }

                return match segment.kind {
                    SegmentKind::Run | SegmentKind::Catch => {
                        if defender.role == DefenderRole::Fumbler {
                            (play_yds, Event::fumble(play_end, rng))
                        } else {
                            (play_yds, Event::tackle_at(play_end, rng))
                        }
                    }
                    SegmentKind::Lateral => (play_yds, Event::fumble(play_end, rng)),
                    SegmentKind::Pass => (0, Event::Incomplete),
                };
            }
        }

        (100 - from_yard_line, Event::touchdown(rng))
    }
}
