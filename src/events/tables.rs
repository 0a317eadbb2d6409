//! Outcome tables: three-die sums mapped to play results.
//!
//! Every kick, return, and interception resolves by rolling three dice and
//! looking the sum up in that event's table. Tables are fixed-size arrays
//! over the sums `3..=18`, so a missing entry is unrepresentable - the
//! engine can never see a roll it has no answer for.
//!
//! Entries are a closed tagged variant, [`TableEntry`]:
//! - plain yardage,
//! - simple outcomes (touchdown, touchback, goal line, fair catch),
//! - penalty specs `(basis yards, penalty distance)`,
//! - deferred [`PendingOutcome`] descriptors for outcomes that need the
//!   eventual absolute yard line before they can be built (blocked-kick
//!   safety/touchdown checks, forced-recovery fumbles, nested returns).
//!
//! [`normalize`] turns any entry into a concrete [`Event`] once the
//! reference yard line is known; [`PendingOutcome::materialize`] is the
//! second stage of the deferred ones.

use crate::core::{DiceRng, DiceRoll, Role};

use super::{Event, RoleFrame};

/// One slot of an outcome table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableEntry {
    /// The ball travels this many yards, nothing else happens.
    Yards(i32),
    /// Score, with the point-after to follow.
    Touchdown,
    /// Dead ball; receiving team starts at its own 20.
    Touchback,
    /// The kick reaches the goal line.
    GoalLine,
    /// The returner waves off the return.
    FairCatch,
    /// A flag: `basis` yards of travel plus a separate penalty walk-off.
    Penalty { basis: i32, dist: i32 },
    /// An outcome that needs the reference yard line to instantiate.
    Pending(PendingOutcome),
}

/// Deferred outcome descriptor: bound arguments now, yard line later.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PendingOutcome {
    /// A special-teams fumble `play_yds` past the reference line, with an
    /// optionally forced recovering side.
    SpecialTeamsFumble {
        play_yds: i32,
        recovered_by: Option<Role>,
    },
    /// A blocked kick resolved at the reference line.
    BlockedKick { play_yds: i32 },
    /// A punt return fielded `play_yds` past the reference line.
    PuntReturn { play_yds: i32 },
}

impl PendingOutcome {
    /// Yards of ball travel this outcome implies, known before
    /// materialization.
    #[must_use]
    pub const fn play_yds(&self) -> i32 {
        match self {
            PendingOutcome::SpecialTeamsFumble { play_yds, .. }
            | PendingOutcome::BlockedKick { play_yds }
            | PendingOutcome::PuntReturn { play_yds } => *play_yds,
        }
    }

    /// Build the concrete event now that the reference yard line is known.
    pub fn materialize(&self, reference: i32, rng: &mut DiceRng) -> Event {
        match *self {
            PendingOutcome::SpecialTeamsFumble {
                play_yds,
                recovered_by,
            } => Event::fumble_with(
                reference + play_yds,
                0,
                recovered_by,
                RoleFrame::SpecialTeams,
                rng,
            ),
            PendingOutcome::BlockedKick { play_yds } => {
                Event::blocked_kick(reference + play_yds, rng)
            }
            PendingOutcome::PuntReturn { play_yds } => {
                Event::punt_return(reference + play_yds, rng)
            }
        }
    }
}

/// A complete table over the dice sums `3..=18`.
#[derive(Clone, Copy, Debug)]
pub struct OutcomeTable {
    entries: [TableEntry; 16],
}

impl OutcomeTable {
    /// Wrap a full entry array. Index 0 is the sum 3.
    #[must_use]
    pub const fn new(entries: [TableEntry; 16]) -> Self {
        Self { entries }
    }

    /// The entry for a rolled sum.
    #[must_use]
    pub fn entry(&self, roll: DiceRoll) -> &TableEntry {
        &self.entries[(roll.total() - DiceRoll::MIN) as usize]
    }
}

/// Normalize a table entry into a concrete event.
///
/// `reference` is the absolute yard line deferred outcomes materialize
/// against; `frame` decides whether penalty sides are reported as
/// offense/defense or kicking/receiving. Callers with special handling for
/// particular entries (touchback distances, penalty detaching) match on the
/// entry first and fall back to this for the rest.
pub fn normalize(
    entry: &TableEntry,
    reference: i32,
    frame: RoleFrame,
    rng: &mut DiceRng,
) -> Event {
    match entry {
        TableEntry::Yards(yds) => Event::Stop { yds: *yds },
        TableEntry::Touchdown => Event::touchdown(rng),
        TableEntry::Touchback => Event::Touchback,
        TableEntry::GoalLine => Event::GoalLine,
        TableEntry::FairCatch => Event::FairCatch,
        TableEntry::Penalty { basis, dist } => Event::penalty(Some(*basis), *dist, frame, rng),
        TableEntry::Pending(pending) => pending.materialize(reference, rng),
    }
}

use PendingOutcome::{BlockedKick as PendBlock, PuntReturn as PendReturn, SpecialTeamsFumble};
use TableEntry::{FairCatch, GoalLine, Pending, Penalty, Touchback, Touchdown, Yards};

const fn st_fumble(play_yds: i32) -> TableEntry {
    Pending(SpecialTeamsFumble {
        play_yds,
        recovered_by: None,
    })
}

const fn st_fumble_by(play_yds: i32, recovered_by: Role) -> TableEntry {
    Pending(SpecialTeamsFumble {
        play_yds,
        recovered_by: Some(recovered_by),
    })
}

/// Interception return chart.
pub const INTERCEPTION: OutcomeTable = OutcomeTable::new([
    Touchdown,                          // 3
    Yards(30),                          // 4
    Yards(3),                           // 5
    Yards(2),                           // 6
    Yards(0),                           // 7
    Yards(6),                           // 8
    Yards(8),                           // 9
    Yards(15),                          // 10
    Yards(15),                          // 11
    Yards(5),                           // 12
    Yards(8),                           // 13
    Yards(20),                          // 14
    Touchdown,                          // 15
    Yards(25),                          // 16
    Penalty { basis: 30, dist: 15 },    // 17
    Yards(35),                          // 18
]);

/// Kickoff distance chart.
pub const KICKOFF: OutcomeTable = OutcomeTable::new([
    Touchback,                          // 3
    Touchback,                          // 4
    Touchback,                          // 5
    Penalty { basis: 10, dist: 5 },     // 6
    GoalLine,                           // 7
    GoalLine,                           // 8
    Yards(45),                          // 9
    Yards(55),                          // 10
    Yards(55),                          // 11
    Yards(50),                          // 12
    Yards(50),                          // 13
    Yards(45),                          // 14
    Yards(40),                          // 15
    Yards(35),                          // 16
    Penalty { basis: 30, dist: 15 },    // 17
    Yards(40),                          // 18
]);

/// Kickoff return chart.
pub const KICKOFF_RETURN: OutcomeTable = OutcomeTable::new([
    Touchdown,                          // 3
    Yards(70),                          // 4
    st_fumble_by(0, Role::Kicking),     // 5
    Yards(5),                           // 6
    Yards(10),                          // 7
    Yards(15),                          // 8
    Yards(25),                          // 9
    Yards(20),                          // 10
    Yards(20),                          // 11
    Yards(25),                          // 12
    Yards(10),                          // 13
    Yards(15),                          // 14
    Yards(30),                          // 15
    Yards(40),                          // 16
    Yards(50),                          // 17
    Penalty { basis: 60, dist: 15 },    // 18
]);

/// Onside kick chart. The middle sums put the ball on the ground.
pub const ONSIDE_KICK: OutcomeTable = OutcomeTable::new([
    Yards(4),                           // 3
    Yards(5),                           // 4
    Yards(6),                           // 5
    Yards(7),                           // 6
    Yards(8),                           // 7
    st_fumble(9),                       // 8
    st_fumble(10),                      // 9
    st_fumble(11),                      // 10
    st_fumble(12),                      // 11
    Yards(13),                          // 12
    Yards(14),                          // 13
    Yards(15),                          // 14
    Yards(16),                          // 15
    Yards(17),                          // 16
    Yards(18),                          // 17
    Yards(20),                          // 18
]);

/// Blocked kick bounce chart.
///
/// The sign convention is preserved exactly as printed on the source chart,
/// including its oddity: the ball always travels behind the line from the
/// kicking team's perspective, yet a kicking-team recovery reads as a gain.
pub const BLOCKED_KICK: OutcomeTable = OutcomeTable::new([
    Yards(20),                          // 3
    Yards(20),                          // 4
    Yards(15),                          // 5
    Yards(15),                          // 6
    Yards(10),                          // 7
    Yards(10),                          // 8
    Yards(5),                           // 9
    Yards(5),                           // 10
    Yards(-5),                          // 11
    Yards(-5),                          // 12
    Yards(-10),                         // 13
    Yards(-10),                         // 14
    Yards(-15),                         // 15
    Yards(-15),                         // 16
    Yards(-20),                         // 17
    Yards(-20),                         // 18
]);

/// Punt return chart.
pub const PUNT_RETURN: OutcomeTable = OutcomeTable::new([
    Touchdown,                          // 3
    FairCatch,                          // 4
    FairCatch,                          // 5
    st_fumble_by(0, Role::Kicking),     // 6
    Yards(2),                           // 7
    Yards(5),                           // 8
    Yards(9),                           // 9
    Yards(7),                           // 10
    Yards(10),                          // 11
    Yards(8),                           // 12
    Yards(10),                          // 13
    Yards(15),                          // 14
    Yards(20),                          // 15
    Yards(30),                          // 16
    Penalty { basis: 40, dist: 15 },    // 17
    Touchdown,                          // 18
]);

/// In-bounds punt distance chart.
pub const PUNT_IN_BOUNDS: OutcomeTable = OutcomeTable::new([
    Yards(20),                          // 3
    Pending(PendBlock { play_yds: 0 }), // 4
    Yards(30),                          // 5
    Penalty { basis: 35, dist: 5 },     // 6
    Yards(20),                          // 7
    Yards(25),                          // 8
    Yards(40),                          // 9
    Yards(40),                          // 10
    Yards(40),                          // 11
    Yards(40),                          // 12
    Yards(45),                          // 13
    Yards(50),                          // 14
    Yards(55),                          // 15
    Yards(60),                          // 16
    Penalty { basis: 65, dist: 15 },    // 17
    Yards(70),                          // 18
]);

/// Out-of-bounds punt distance chart.
pub const PUNT_OUT_OF_BOUNDS: OutcomeTable = OutcomeTable::new([
    Pending(PendBlock { play_yds: 0 }), // 3
    Pending(PendBlock { play_yds: 0 }), // 4
    Yards(20),                          // 5
    Penalty { basis: 25, dist: 5 },     // 6
    Yards(15),                          // 7
    Yards(15),                          // 8
    Yards(20),                          // 9
    Yards(25),                          // 10
    Yards(30),                          // 11
    Yards(35),                          // 12
    Yards(40),                          // 13
    Yards(45),                          // 14
    Yards(40),                          // 15
    Pending(PendReturn { play_yds: 40 }), // 16
    Pending(PendReturn { play_yds: 25 }), // 17
    Pending(PendReturn { play_yds: 35 }), // 18
]);

/// Safety (free-kick) punt chart.
///
/// The source game has no dedicated safety-punt chart; this is the in-bounds
/// chart with the block removed and most distances pumped by ten yards.
pub const SAFETY_PUNT: OutcomeTable = OutcomeTable::new([
    Yards(30),                          // 3
    Yards(35),                          // 4
    Yards(40),                          // 5
    Penalty { basis: 45, dist: 5 },     // 6
    Yards(30),                          // 7
    Yards(35),                          // 8
    Yards(50),                          // 9
    Yards(50),                          // 10
    Yards(50),                          // 11
    Yards(50),                          // 12
    Yards(55),                          // 13
    Yards(60),                          // 14
    Yards(60),                          // 15
    Yards(65),                          // 16
    Penalty { basis: 70, dist: 15 },    // 17
    Yards(75),                          // 18
]);

/// One yard-line bracket of a field-goal chart and the dice sums that make
/// the kick from inside it.
#[derive(Clone, Copy, Debug)]
pub struct FieldGoalBucket {
    /// Inclusive yard-line range (offense-normalized, so 91..=100 is a chip
    /// shot from inside the 10).
    pub yard_lines: (i32, i32),
    /// Inclusive dice-sum ranges that convert.
    pub good_rolls: &'static [(u8, u8)],
}

/// A field-goal probability chart: a blocked-roll band plus distance
/// buckets.
///
/// Kicks from a yard line with no bucket automatically miss - that is table
/// policy, not an error. The block band is always tested before any bucket,
/// regardless of distance.
#[derive(Clone, Copy, Debug)]
pub struct FieldGoalChart {
    blocked_rolls: (u8, u8),
    buckets: &'static [FieldGoalBucket],
}

impl FieldGoalChart {
    /// The chart from the commonly circulated 1977 printing.
    pub const STANDARD: FieldGoalChart = FieldGoalChart {
        blocked_rolls: (14, 14),
        buckets: &[
            FieldGoalBucket { yard_lines: (91, 100), good_rolls: &[(3, 11)] },
            FieldGoalBucket { yard_lines: (86, 90), good_rolls: &[(3, 10)] },
            FieldGoalBucket { yard_lines: (81, 85), good_rolls: &[(3, 9)] },
            FieldGoalBucket { yard_lines: (76, 80), good_rolls: &[(3, 8)] },
            FieldGoalBucket { yard_lines: (71, 75), good_rolls: &[(3, 7)] },
            FieldGoalBucket { yard_lines: (66, 70), good_rolls: &[(3, 6)] },
            FieldGoalBucket { yard_lines: (61, 65), good_rolls: &[(3, 5)] },
            FieldGoalBucket { yard_lines: (55, 60), good_rolls: &[(3, 4)] },
        ],
    };

    /// An alternate chart seen on another printing of the same edition.
    pub const SEVENTY_SEVEN: FieldGoalChart = FieldGoalChart {
        blocked_rolls: (15, 16),
        buckets: &[
            FieldGoalBucket { yard_lines: (95, 100), good_rolls: &[(3, 14)] },
            FieldGoalBucket { yard_lines: (90, 94), good_rolls: &[(3, 12), (14, 14), (17, 17)] },
            FieldGoalBucket { yard_lines: (85, 89), good_rolls: &[(4, 12), (17, 17)] },
            FieldGoalBucket { yard_lines: (80, 84), good_rolls: &[(3, 4), (6, 10), (12, 12), (14, 14)] },
            FieldGoalBucket { yard_lines: (75, 79), good_rolls: &[(4, 5), (7, 10), (13, 13), (17, 17)] },
            FieldGoalBucket { yard_lines: (70, 74), good_rolls: &[(4, 5), (7, 10)] },
            FieldGoalBucket { yard_lines: (65, 69), good_rolls: &[(3, 5), (7, 9)] },
            FieldGoalBucket { yard_lines: (60, 64), good_rolls: &[(3, 3), (5, 5), (7, 8)] },
        ],
    };

    /// Does this roll block the kick? Checked before any bucket lookup.
    #[must_use]
    pub fn is_blocked(&self, roll: DiceRoll) -> bool {
        let (lo, hi) = self.blocked_rolls;
        (lo..=hi).contains(&roll.total())
    }

    /// Does this roll convert a kick from `kick_from`?
    ///
    /// Returns `false` when no bucket covers `kick_from` (out of range).
    #[must_use]
    pub fn is_good(&self, kick_from: i32, roll: DiceRoll) -> bool {
        for bucket in self.buckets {
            let (lo, hi) = bucket.yard_lines;
            if (lo..=hi).contains(&kick_from) {
                return bucket
                    .good_rolls
                    .iter()
                    .any(|&(lo, hi)| (lo..=hi).contains(&roll.total()));
            }
        }
        false
    }

    /// The shortest yard line this chart has a bucket for.
    #[must_use]
    pub fn min_yard_line(&self) -> i32 {
        self.buckets
            .iter()
            .map(|bucket| bucket.yard_lines.0)
            .min()
            .unwrap_or(100)
    }
}
