//! The outcome event graph.
//!
//! Every play resolves into a tree of [`Event`] nodes: a root describing
//! what was attempted (a kickoff, a punt, a snap from scrimmage) and child
//! nodes describing what came of it, down to terminal leaves (a tackle, a
//! touchback, a score). All dice are consumed while the tree is built, so a
//! finished tree is pure data: [`Event::resolve`] walks it root-first,
//! [`Event::apply`] replays its state mutations onto a
//! [`GameState`](crate::game::GameState) in that same order, and
//! [`Event::record`] serializes any node for the wire.
//!
//! Penalty flags are carried out-of-band. When a table hands a consumer a
//! penalty, the consumer keeps the basis yardage as its ordinary outcome
//! and detaches the flag itself into a `penalty` side slot; detached flags
//! never mutate state and are surfaced through [`Event::penalties`].

mod build;
pub mod tables;

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Role, TeamId};
use crate::game::{GameState, PendingSetup};

/// Which vocabulary randomized sides are reported in.
///
/// Scrimmage events talk about the offense and the defense; kicks talk
/// about the kicking and receiving teams. The underlying mechanics are
/// identical, so the frame is a constructor parameter: it remaps the raw
/// rolled side just before it is stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoleFrame {
    Scrimmage,
    SpecialTeams,
}

impl RoleFrame {
    /// Remap a raw offense/defense side into this frame's vocabulary.
    #[must_use]
    pub fn remap(self, role: Role) -> Role {
        match self {
            RoleFrame::Scrimmage => role,
            RoleFrame::SpecialTeams => role.to_special_teams(),
        }
    }
}

/// Which punt entry point produced a punt event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PuntKind {
    /// A fourth-down punt, in or out of bounds.
    Standard,
    /// The free kick after a safety.
    Safety,
}

/// A node in the outcome tree.
///
/// Variants own their children outright; a sub-event has exactly one
/// parent and the tree is acyclic by construction. The `penalty` slots are
/// not children: they hold detached flags that are reported but never
/// resolved or applied.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// The ball travels some yards and nothing further happens. Carries
    /// table yardage and the basis yardage of detached penalties.
    Stop { yds: i32 },
    /// The carrier is brought down in bounds; the down ends.
    Tackle,
    /// A pass falls incomplete.
    Incomplete,
    /// Six points, with the try attached.
    Touchdown { pat: Box<Event> },
    /// The point-after attempt.
    PointAfter { made: bool },
    /// The result leaf of a field-goal attempt.
    FieldGoalResult { made: bool },
    /// A flag. `basis` is the yardage the play otherwise gained; it is
    /// `None` once the flag has been detached from its play.
    Penalty {
        basis: Option<i32>,
        dist: i32,
        against: Role,
    },
    /// A live ball on the ground, recovered for `yds` return yardage.
    Fumble {
        yds: i32,
        recovered_by: Role,
        result: Option<Box<Event>>,
    },
    /// Dead ball in the end zone; receiving team starts at its own 20.
    Touchback,
    /// A kick that reaches the goal line.
    GoalLine,
    /// The returner waves off the return.
    FairCatch,
    /// A kick rolls out of bounds.
    OutOfBounds,
    /// The carrier is downed in their own end zone; two points the other
    /// way.
    Safety,
    /// A pass picked off and returned `yds`.
    Interception {
        yds: i32,
        returned: Box<Event>,
        penalty: Option<Box<Event>>,
    },
    /// A kickoff travelling `yds` from `from`.
    KickOff {
        from: i32,
        yds: i32,
        result: Box<Event>,
        returned: Option<Box<Event>>,
        penalty: Option<Box<Event>>,
    },
    /// The runback after a kickoff.
    KickOffReturn {
        yds: i32,
        returned: Box<Event>,
        penalty: Option<Box<Event>>,
    },
    /// A short kick the kicking team hopes to recover.
    OnSideKick {
        from: i32,
        yds: i32,
        result: Box<Event>,
    },
    /// A kick swatted down behind the line and recovered by somebody.
    BlockedKick {
        yds: i32,
        recovered_by: Role,
        result: Option<Box<Event>>,
    },
    /// The runback after a punt.
    PuntReturn {
        yds: i32,
        returned: Box<Event>,
        penalty: Option<Box<Event>>,
    },
    /// A punt travelling `yds` from `from`.
    Punt {
        kind: PuntKind,
        from: i32,
        yds: i32,
        result: Box<Event>,
        penalty: Option<Box<Event>>,
    },
    /// A snap from scrimmage at `from` gaining `yds`.
    Scrimmage {
        from: i32,
        yds: i32,
        result: Box<Event>,
    },
    /// A field-goal attempt from `from`.
    FieldGoal { from: i32, result: Box<Event> },
}

impl Event {
    /// Wire tag for this variant.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Event::Stop { .. } => "stop",
            Event::Tackle => "tackle",
            Event::Incomplete => "incomplete",
            Event::Touchdown { .. } => "touchdown",
            Event::PointAfter { .. } => "point after",
            Event::FieldGoalResult { .. } => "field goal result",
            Event::Penalty { .. } => "penalty",
            Event::Fumble { .. } => "fumble",
            Event::Touchback => "touchback",
            Event::GoalLine => "goal line",
            Event::FairCatch => "fair catch",
            Event::OutOfBounds => "out of bounds",
            Event::Safety => "safety",
            Event::Interception { .. } => "interception",
            Event::KickOff { .. } => "kick-off",
            Event::KickOffReturn { .. } => "kick-off return",
            Event::OnSideKick { .. } => "on-side kick",
            Event::BlockedKick { .. } => "blocked kick",
            Event::PuntReturn { .. } => "punt return",
            Event::Punt {
                kind: PuntKind::Standard,
                ..
            } => "punt",
            Event::Punt {
                kind: PuntKind::Safety,
                ..
            } => "safety punt",
            Event::Scrimmage { .. } => "play from scrimmage",
            Event::FieldGoal { .. } => "field goal",
        }
    }

    /// The yardage delta this node carries, if it has one.
    #[must_use]
    pub fn yds(&self) -> Option<i32> {
        match self {
            Event::Stop { yds }
            | Event::Fumble { yds, .. }
            | Event::Interception { yds, .. }
            | Event::KickOff { yds, .. }
            | Event::KickOffReturn { yds, .. }
            | Event::OnSideKick { yds, .. }
            | Event::BlockedKick { yds, .. }
            | Event::PuntReturn { yds, .. }
            | Event::Punt { yds, .. }
            | Event::Scrimmage { yds, .. } => Some(*yds),
            Event::Penalty { basis, .. } => *basis,
            _ => None,
        }
    }

    /// The absolute yard line an initial event started from, if any.
    #[must_use]
    pub fn from_yard_line(&self) -> Option<i32> {
        match self {
            Event::KickOff { from, .. }
            | Event::OnSideKick { from, .. }
            | Event::Punt { from, .. }
            | Event::Scrimmage { from, .. }
            | Event::FieldGoal { from, .. } => Some(*from),
            _ => None,
        }
    }

    fn children(&self) -> SmallVec<[&Event; 2]> {
        let mut out = SmallVec::new();
        match self {
            Event::Touchdown { pat } => out.push(pat.as_ref()),
            Event::Fumble { result, .. } | Event::BlockedKick { result, .. } => {
                if let Some(result) = result {
                    out.push(result.as_ref());
                }
            }
            Event::Interception { returned, .. }
            | Event::KickOffReturn { returned, .. }
            | Event::PuntReturn { returned, .. } => out.push(returned.as_ref()),
            Event::KickOff {
                result, returned, ..
            } => {
                out.push(result.as_ref());
                if let Some(returned) = returned {
                    out.push(returned.as_ref());
                }
            }
            Event::OnSideKick { result, .. }
            | Event::Punt { result, .. }
            | Event::Scrimmage { result, .. }
            | Event::FieldGoal { result, .. } => out.push(result.as_ref()),
            _ => {}
        }
        out
    }

    fn penalty_slot(&self) -> Option<&Event> {
        match self {
            Event::Interception { penalty, .. }
            | Event::KickOff { penalty, .. }
            | Event::KickOffReturn { penalty, .. }
            | Event::PuntReturn { penalty, .. }
            | Event::Punt { penalty, .. } => penalty.as_deref(),
            _ => None,
        }
    }

    /// Flatten this subtree into its root-first event sequence.
    ///
    /// Every node appears, the root first and each parent before its
    /// children. Detached penalties are excluded; see
    /// [`penalties`](Event::penalties).
    #[must_use]
    pub fn resolve(&self) -> Vec<&Event> {
        let mut out = Vec::new();
        self.visit(&mut out);
        out
    }

    fn visit<'a>(&'a self, out: &mut Vec<&'a Event>) {
        out.push(self);
        for child in self.children() {
            child.visit(out);
        }
    }

    /// Every detached penalty flag in this subtree.
    #[must_use]
    pub fn penalties(&self) -> Vec<&Event> {
        let mut out = Vec::new();
        self.collect_penalties(&mut out);
        out
    }

    fn collect_penalties<'a>(&'a self, out: &mut Vec<&'a Event>) {
        if let Some(penalty) = self.penalty_slot() {
            out.push(penalty);
        }
        for child in self.children() {
            child.collect_penalties(out);
        }
    }

    /// Replay this subtree's mutations onto the game state.
    ///
    /// Mutations land in exactly the order [`resolve`](Event::resolve)
    /// lists the nodes: each node applies its own possession and position
    /// effects, then delegates to its children.
    pub fn apply(&self, game: &mut GameState) {
        match self {
            Event::Stop { .. } | Event::GoalLine => {}
            Event::Tackle | Event::Incomplete => {
                game.schedule(PendingSetup::NextPlay);
            }
            Event::Touchdown { pat } => {
                if let Some(team) = game.ball_carrier() {
                    game.add_score(team, 6);
                }
                pat.apply(game);
                game.schedule(PendingSetup::Kickoff);
            }
            Event::PointAfter { made } => {
                if *made {
                    if let Some(team) = game.ball_carrier() {
                        game.add_score(team, 1);
                    }
                }
                game.schedule(PendingSetup::Kickoff);
            }
            Event::FieldGoalResult { made } => {
                if *made {
                    if let Some(team) = game.ball_carrier() {
                        game.add_score(team, 3);
                    }
                    game.schedule(PendingSetup::Kickoff);
                } else {
                    // A missed (not blocked) kick is a turnover, out to no
                    // better than the 20.
                    game.set_ball_carrier(game.ball_carrier().map(TeamId::opponent));
                    game.set_yard_line(game.yard_line().min(80));
                    game.schedule(PendingSetup::Drive);
                }
            }
            Event::Penalty {
                basis,
                dist,
                against,
            } => {
                game.add_yards(basis.unwrap_or(0));
                match against {
                    Role::Offense | Role::Kicking => game.add_yards(-dist),
                    Role::Defense | Role::Receiving => game.add_yards(*dist),
                }
            }
            Event::Fumble {
                yds,
                recovered_by,
                result,
            } => {
                let carrier = game.role_to_team(*recovered_by);
                game.set_ball_carrier(carrier);

                if carrier == game.kicking() || carrier == game.offense() {
                    game.add_yards(*yds);
                } else if carrier == game.receiving() || carrier == game.defense() {
                    game.add_yards(-yds);
                }

                if carrier == game.offense() {
                    game.schedule(PendingSetup::NextPlay);
                } else if carrier == game.kicking()
                    || carrier == game.receiving()
                    || carrier == game.defense()
                {
                    game.schedule(PendingSetup::Drive);
                }

                if let Some(result) = result {
                    result.apply(game);
                }
            }
            Event::Touchback => {
                game.set_ball_carrier(game.receiving());
                game.set_yard_line(80);
                game.schedule(PendingSetup::Drive);
            }
            Event::FairCatch => {
                game.schedule(PendingSetup::Drive);
            }
            Event::OutOfBounds => {
                game.set_ball_carrier(game.receiving());
                game.schedule(PendingSetup::Drive);
            }
            Event::Safety => {
                if let Some(team) = game.ball_carrier() {
                    game.add_score(team.opponent(), 2);
                }
                game.schedule(PendingSetup::SafetyPunt);
            }
            Event::Interception { yds, returned, .. } => {
                game.set_ball_carrier(game.ball_carrier().map(|team| team.opponent()));
                game.add_yards(-yds);
                game.schedule(PendingSetup::Drive);
                returned.apply(game);
            }
            Event::KickOff {
                from,
                yds,
                result,
                returned,
                ..
            } => {
                game.set_ball_carrier(game.kicking());
                game.set_yard_line(from + yds);
                result.apply(game);
                if let Some(returned) = returned {
                    returned.apply(game);
                }
            }
            Event::KickOffReturn { yds, returned, .. }
            | Event::PuntReturn { yds, returned, .. } => {
                game.set_ball_carrier(game.receiving());
                game.add_yards(-yds);
                game.schedule(PendingSetup::Drive);
                returned.apply(game);
            }
            Event::OnSideKick {
                from, yds, result, ..
            } => {
                game.set_ball_carrier(game.receiving());
                game.set_yard_line(from + yds);
                game.schedule(PendingSetup::Drive);
                result.apply(game);
            }
            Event::BlockedKick {
                yds,
                recovered_by,
                result,
            } => {
                let carrier = game.role_to_team(*recovered_by);
                game.set_ball_carrier(carrier);
                game.add_yards(*yds);

                if game.last_ball_carrier() == carrier {
                    game.schedule(PendingSetup::NextPlay);
                } else {
                    game.schedule(PendingSetup::Drive);
                }

                if let Some(result) = result {
                    result.apply(game);
                }
            }
            Event::Punt {
                from, yds, result, ..
            } => {
                game.set_ball_carrier(game.kicking());
                game.set_yard_line(from + yds);
                result.apply(game);
            }
            Event::Scrimmage { from, yds, result } => {
                game.set_yard_line(from + yds);
                result.apply(game);
            }
            Event::FieldGoal { result, .. } => {
                result.apply(game);
            }
        }
    }

    /// The wire form of this single node.
    #[must_use]
    pub fn record(&self) -> EventRecord {
        let mut record = EventRecord {
            kind: self.kind().to_owned(),
            yds: self.yds(),
            from: self.from_yard_line(),
            ..EventRecord::default()
        };
        match self {
            Event::Penalty { dist, against, .. } => {
                record.penalty_yd = Some(*dist);
                record.against = Some(*against);
            }
            Event::Fumble { recovered_by, .. } | Event::BlockedKick { recovered_by, .. } => {
                record.recovered_by = Some(*recovered_by);
            }
            Event::FieldGoalResult { made } => {
                record.fg_result = Some(made_str(*made).to_owned());
            }
            Event::PointAfter { made } => {
                record.pat_result = Some(made_str(*made).to_owned());
            }
            _ => {}
        }
        record
    }

    /// The wire form of the whole resolved subtree, root first.
    #[must_use]
    pub fn records(&self) -> Vec<EventRecord> {
        self.resolve().into_iter().map(Event::record).collect()
    }
}

fn made_str(made: bool) -> &'static str {
    if made {
        "made"
    } else {
        "missed"
    }
}

/// One event node on the wire.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yds: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<i32>,
    #[serde(rename = "recoveredBy", skip_serializing_if = "Option::is_none")]
    pub recovered_by: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub against: Option<Role>,
    #[serde(rename = "penaltyYd", skip_serializing_if = "Option::is_none")]
    pub penalty_yd: Option<i32>,
    #[serde(rename = "fgResult", skip_serializing_if = "Option::is_none")]
    pub fg_result: Option<String>,
    #[serde(rename = "patResult", skip_serializing_if = "Option::is_none")]
    pub pat_result: Option<String>,
}

/// Commentary spelling of an absolute yard line.
fn yard_line_phrase(abs_yard_line: i32) -> String {
    if abs_yard_line == 50 {
        return "midfield".to_owned();
    }
    let yard_line = if abs_yard_line < 50 {
        abs_yard_line
    } else {
        100 - abs_yard_line
    };
    let shown = if yard_line == 0 {
        "goal line".to_owned()
    } else {
        yard_line.to_string()
    };
    if abs_yard_line < 50 {
        format!("their own {shown}")
    } else {
        format!("the opponent's {shown}")
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Incomplete => write!(f, "Batted down. Incomplete."),
            Event::Touchdown { .. } => write!(f, "Touchdown!"),
            Event::PointAfter { made } => {
                write!(f, "Point after is {}", if *made { "good." } else { "no good!" })
            }
            Event::FieldGoalResult { made } => {
                if *made {
                    write!(f, "It's good!")
                } else {
                    write!(f, "Missed! Turnover on downs.")
                }
            }
            Event::Fumble { recovered_by, .. } => match recovered_by {
                Role::Offense | Role::Defense => {
                    write!(f, "Fumble! Recovered by the {recovered_by}.")
                }
                Role::Kicking | Role::Receiving => {
                    write!(f, "Fumble! Recovered by the {recovered_by} team.")
                }
            },
            Event::Touchback => write!(f, "Touchback."),
            Event::FairCatch => write!(f, "A fair catch is called."),
            Event::OutOfBounds => write!(f, "Out of bounds."),
            Event::Safety => write!(f, "Safety."),
            Event::Interception { yds, .. } => {
                write!(f, "Intercepted! Returned {yds} yards.")
            }
            Event::KickOff { from, yds, .. } => write!(
                f,
                "Kicked off from {} yard line. Travels {yds} yards to {}.",
                yard_line_phrase(*from),
                yard_line_phrase(from + yds)
            ),
            Event::KickOffReturn { yds, .. } => write!(f, "Returned {yds} yards."),
            Event::OnSideKick { from, yds, .. } => write!(
                f,
                "Onside kick from {}. Travels {yds} to {}.",
                yard_line_phrase(*from),
                yard_line_phrase(from + yds)
            ),
            Event::BlockedKick {
                yds, recovered_by, ..
            } => {
                let direction = if *yds > 0 { "gain" } else { "loss" };
                write!(
                    f,
                    "Blocked! Recovered by the {recovered_by} team for a {} {direction}.",
                    yds.abs()
                )
            }
            Event::PuntReturn { yds, .. } => write!(f, "Returned {yds}."),
            Event::Punt {
                kind, from, yds, ..
            } => {
                let label = match kind {
                    PuntKind::Standard => "Punted",
                    PuntKind::Safety => "Safety punt",
                };
                write!(
                    f,
                    "{label} from {}. Travels {yds} to {}.",
                    yard_line_phrase(*from),
                    yard_line_phrase(from + yds)
                )
            }
            Event::Scrimmage { from, yds, .. } => {
                let gain = match yds {
                    0 => "no gain".to_owned(),
                    y if *y > 0 => format!("a {y} gain"),
                    y => format!("a {} loss", y.abs()),
                };
                write!(
                    f,
                    "Play from scrimmage at {} goes for {gain}.",
                    yard_line_phrase(*from)
                )
            }
            Event::FieldGoal { from, .. } => {
                write!(f, "Attempting a field goal from {}.", yard_line_phrase(*from))
            }
            other => {
                write!(f, "{}", other.kind())?;
                if let Some(yds) = other.yds() {
                    write!(f, " {yds}")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tackle() -> Box<Event> {
        Box::new(Event::Tackle)
    }

    #[test]
    fn test_resolve_is_root_first() {
        let tree = Event::Scrimmage {
            from: 30,
            yds: 12,
            result: Box::new(Event::Fumble {
                yds: 0,
                recovered_by: Role::Defense,
                result: Some(tackle()),
            }),
        };

        let flat = tree.resolve();
        assert_eq!(flat.len(), 3);
        assert_eq!(flat[0].kind(), "play from scrimmage");
        assert_eq!(flat[1].kind(), "fumble");
        assert_eq!(flat[2].kind(), "tackle");
    }

    #[test]
    fn test_resolve_never_empty() {
        assert_eq!(Event::Tackle.resolve().len(), 1);
        assert_eq!(Event::Stop { yds: 5 }.resolve().len(), 1);
        assert_eq!(Event::GoalLine.resolve().len(), 1);
    }

    #[test]
    fn test_penalties_excluded_from_resolve() {
        let tree = Event::KickOffReturn {
            yds: 60,
            returned: Box::new(Event::Stop { yds: 60 }),
            penalty: Some(Box::new(Event::Penalty {
                basis: None,
                dist: 15,
                against: Role::Receiving,
            })),
        };

        let flat = tree.resolve();
        assert!(flat.iter().all(|event| event.kind() != "penalty"));

        let flags = tree.penalties();
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].yds(), None);
    }

    #[test]
    fn test_nested_penalties_surface_through_parent() {
        let tree = Event::KickOff {
            from: 40,
            yds: 50,
            result: Box::new(Event::Stop { yds: 50 }),
            returned: Some(Box::new(Event::KickOffReturn {
                yds: 60,
                returned: Box::new(Event::Stop { yds: 60 }),
                penalty: Some(Box::new(Event::Penalty {
                    basis: None,
                    dist: 15,
                    against: Role::Kicking,
                })),
            })),
            penalty: None,
        };

        assert_eq!(tree.penalties().len(), 1);
    }

    #[test]
    fn test_record_wire_fields() {
        let record = Event::Penalty {
            basis: Some(30),
            dist: 15,
            against: Role::Defense,
        }
        .record();
        assert_eq!(record.kind, "penalty");
        assert_eq!(record.yds, Some(30));
        assert_eq!(record.penalty_yd, Some(15));
        assert_eq!(record.against, Some(Role::Defense));

        let record = Event::PointAfter { made: true }.record();
        assert_eq!(record.pat_result.as_deref(), Some("made"));
        assert_eq!(record.yds, None);
    }

    #[test]
    fn test_record_json_shape() {
        let json = serde_json::to_value(
            Event::Fumble {
                yds: 0,
                recovered_by: Role::Kicking,
                result: None,
            }
            .record(),
        )
        .unwrap();
        assert_eq!(json["type"], "fumble");
        assert_eq!(json["yds"], 0);
        assert_eq!(json["recoveredBy"], "kicking");
        assert!(json.get("against").is_none());
    }

    #[test]
    fn test_records_follow_resolve_order() {
        let tree = Event::FieldGoal {
            from: 70,
            result: Box::new(Event::FieldGoalResult { made: true }),
        };
        let records = tree.records();
        assert_eq!(records[0].kind, "field goal");
        assert_eq!(records[0].from, Some(70));
        assert_eq!(records[1].fg_result.as_deref(), Some("made"));
    }

    #[test]
    fn test_yard_line_phrase() {
        assert_eq!(yard_line_phrase(50), "midfield");
        assert_eq!(yard_line_phrase(30), "their own 30");
        assert_eq!(yard_line_phrase(70), "the opponent's 30");
        assert_eq!(yard_line_phrase(0), "their own goal line");
        assert_eq!(yard_line_phrase(100), "the opponent's goal line");
    }

    #[test]
    fn test_role_frame_remap() {
        assert_eq!(RoleFrame::Scrimmage.remap(Role::Offense), Role::Offense);
        assert_eq!(RoleFrame::SpecialTeams.remap(Role::Offense), Role::Kicking);
        assert_eq!(
            RoleFrame::SpecialTeams.remap(Role::Defense),
            Role::Receiving
        );
        assert_eq!(RoleFrame::SpecialTeams.remap(Role::Kicking), Role::Kicking);
    }
}
