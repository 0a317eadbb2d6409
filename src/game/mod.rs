//! Game state and the between-plays state machine.
//!
//! [`GameState`] owns the two teams, the dice, and the down-and-distance
//! bookkeeping. The yard line is kept in a single internal frame, 0 to
//! 100 with 0 at the current offense's own goal line; the drive setup
//! flips it whenever possession changes direction.
//!
//! Events never reconfigure the next phase directly. While a play's tree
//! applies, each terminal node schedules one of the [`PendingSetup`]
//! actions into a single slot, overwriting whatever an earlier node in
//! the cascade scheduled; after the whole tree has applied, the slot is
//! drained once. Only the final outcome of a cascade decides what comes
//! next.

use serde::{Deserialize, Serialize};

use crate::core::{DiceRng, Role, TeamId};
use crate::events::Event;
use crate::play::Play;

/// A named side with a running score.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    name: String,
    score: u32,
}

impl Team {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score: 0,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }
}

/// The deferred between-plays action. Single slot, last write wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingSetup {
    Kickoff,
    SafetyPunt,
    Drive,
    NextPlay,
}

/// Full game state plus the injected dice.
#[derive(Clone, Debug)]
pub struct GameState {
    teams: [Team; 2],
    plays_per_quarter: u32,
    rng: DiceRng,

    ball_carrier: Option<TeamId>,
    last_ball_carrier: Option<TeamId>,
    kicking: Option<TeamId>,
    offense: Option<TeamId>,

    yard_line: i32,
    down: Option<u8>,
    first_down: Option<i32>,

    pending: Option<PendingSetup>,
    play_count: u32,
}

impl GameState {
    /// A fresh game. Nothing is set up until [`coin_flip`](Self::coin_flip)
    /// or an explicit setup call decides who has the ball.
    ///
    /// `plays_per_quarter` is clamped to at least 1; the quarter is derived
    /// from the play count and needs a nonzero divisor.
    #[must_use]
    pub fn new(
        home: impl Into<String>,
        away: impl Into<String>,
        plays_per_quarter: u32,
        rng: DiceRng,
    ) -> Self {
        Self {
            teams: [Team::new(home), Team::new(away)],
            plays_per_quarter: plays_per_quarter.max(1),
            rng,
            ball_carrier: None,
            last_ball_carrier: None,
            kicking: None,
            offense: None,
            yard_line: 0,
            down: None,
            first_down: None,
            pending: None,
            play_count: 0,
        }
    }

    /// Flip for the opening kickoff. The winner kicks.
    pub fn coin_flip(&mut self) -> TeamId {
        let winner = if self.rng.coin() {
            TeamId::HOME
        } else {
            TeamId::AWAY
        };
        log::info!("coin flip: {} will kick off", self.teams[winner.index()].name());
        self.set_ball_carrier(Some(winner));
        self.setup_kickoff();
        winner
    }

    #[must_use]
    pub fn team(&self, id: TeamId) -> &Team {
        &self.teams[id.index()]
    }

    #[must_use]
    pub fn ball_carrier(&self) -> Option<TeamId> {
        self.ball_carrier
    }

    #[must_use]
    pub fn last_ball_carrier(&self) -> Option<TeamId> {
        self.last_ball_carrier
    }

    #[must_use]
    pub fn kicking(&self) -> Option<TeamId> {
        self.kicking
    }

    #[must_use]
    pub fn receiving(&self) -> Option<TeamId> {
        self.kicking.map(TeamId::opponent)
    }

    #[must_use]
    pub fn offense(&self) -> Option<TeamId> {
        self.offense
    }

    #[must_use]
    pub fn defense(&self) -> Option<TeamId> {
        self.offense.map(TeamId::opponent)
    }

    /// The team currently filling a role, if the role is cast at all.
    #[must_use]
    pub fn role_to_team(&self, role: Role) -> Option<TeamId> {
        match role {
            Role::Offense => self.offense(),
            Role::Defense => self.defense(),
            Role::Kicking => self.kicking(),
            Role::Receiving => self.receiving(),
        }
    }

    #[must_use]
    pub fn yard_line(&self) -> i32 {
        self.yard_line
    }

    #[must_use]
    pub fn down(&self) -> Option<u8> {
        self.down
    }

    #[must_use]
    pub fn first_down(&self) -> Option<i32> {
        self.first_down
    }

    #[must_use]
    pub fn play_count(&self) -> u32 {
        self.play_count
    }

    /// Current quarter, derived from the play count, capped at the 4th.
    #[must_use]
    pub fn quarter(&self) -> u32 {
        (self.play_count / self.plays_per_quarter).min(3) + 1
    }

    /// Assigning the carrier remembers who had the ball before; blocked
    /// kicks use that to tell a kicking-team recovery from a turnover.
    pub fn set_ball_carrier(&mut self, team: Option<TeamId>) {
        self.last_ball_carrier = self.ball_carrier;
        self.ball_carrier = team;
    }

    /// Casting one special-teams side derives the other as its opponent.
    pub fn set_kicking(&mut self, team: Option<TeamId>) {
        self.kicking = team;
    }

    pub fn set_receiving(&mut self, team: Option<TeamId>) {
        self.kicking = team.map(TeamId::opponent);
    }

    /// Casting one scrimmage side derives the other as its opponent.
    pub fn set_offense(&mut self, team: Option<TeamId>) {
        self.offense = team;
    }

    pub fn set_yard_line(&mut self, yard_line: i32) {
        self.yard_line = yard_line;
    }

    pub fn add_yards(&mut self, yds: i32) {
        self.yard_line += yds;
    }

    pub fn add_score(&mut self, team: TeamId, points: u32) {
        self.teams[team.index()].score += points;
        log::info!(
            "{} score {} points ({} total)",
            self.teams[team.index()].name(),
            points,
            self.teams[team.index()].score
        );
    }

    /// Schedule the between-plays action. Overwrites any earlier one.
    pub fn schedule(&mut self, setup: PendingSetup) {
        self.pending = Some(setup);
    }

    fn resolve_pending(&mut self) {
        if let Some(setup) = self.pending.take() {
            match setup {
                PendingSetup::Kickoff => self.setup_kickoff(),
                PendingSetup::SafetyPunt => self.setup_safety_punt(),
                PendingSetup::Drive => self.setup_drive(),
                PendingSetup::NextPlay => self.setup_next_play(),
            }
        }
    }

    /// Line up a kickoff: the carrier kicks from its own 40.
    pub fn setup_kickoff(&mut self) {
        if self.ball_carrier.is_some() {
            self.kicking = self.ball_carrier;
        }
        self.offense = None;
        self.down = None;
        self.first_down = None;
        self.yard_line = 40;
    }

    /// Line up the free kick after a safety, from the 20.
    pub fn setup_safety_punt(&mut self) {
        self.kicking = self.ball_carrier;
        self.offense = None;
        self.down = None;
        self.first_down = None;
        self.yard_line = 20;
    }

    /// Start a fresh drive for the current carrier: first and ten, with
    /// the yard line flipped into the new offense's frame when the
    /// direction of play reverses.
    pub fn setup_drive(&mut self) {
        if self.kicking.is_some() {
            if self.ball_carrier == self.receiving() {
                self.yard_line = 100 - self.yard_line;
            }
            self.kicking = None;
        } else {
            self.yard_line = 100 - self.yard_line;
        }
        self.offense = self.ball_carrier;
        self.down = Some(1);
        self.first_down = Some(self.yard_line + 10);
    }

    /// Advance down and distance after an in-bounds scrimmage play.
    pub fn setup_next_play(&mut self) {
        let Some(first_down) = self.first_down else {
            return;
        };
        if self.yard_line >= first_down {
            self.down = Some(1);
            self.first_down = Some(self.yard_line + 10);
        } else if self.down == Some(4) {
            // Turnover on downs.
            self.set_ball_carrier(self.defense());
            self.setup_drive();
        } else {
            self.down = self.down.map(|down| down + 1);
        }
    }

    /// Build one play's event tree, apply it, and drain the pending
    /// setup. Returns the tree; flatten it with
    /// [`Event::resolve`]/[`Event::records`] for display.
    pub fn run_with<F>(&mut self, build: F) -> Event
    where
        F: FnOnce(i32, &mut DiceRng) -> Event,
    {
        self.play_count += 1;
        let event = build(self.yard_line, &mut self.rng);
        log::debug!("play {}: {}", self.play_count, event);
        event.apply(self);
        self.resolve_pending();
        event
    }

    /// Kick off from the current spot.
    pub fn kickoff(&mut self) -> Event {
        self.run_with(Event::kickoff)
    }

    /// Attempt an onside kick from the current spot.
    pub fn onside_kick(&mut self) -> Event {
        self.run_with(Event::onside_kick)
    }

    /// Punt, keeping the ball in bounds.
    pub fn punt_in_bounds(&mut self) -> Event {
        self.run_with(Event::punt_in_bounds)
    }

    /// Punt for the sideline.
    pub fn punt_out_of_bounds(&mut self) -> Event {
        self.run_with(Event::punt_out_of_bounds)
    }

    /// Attempt a field goal from the current spot.
    pub fn field_goal(&mut self) -> Event {
        self.run_with(Event::field_goal)
    }

    /// Take the free kick after a safety.
    pub fn safety_punt(&mut self) -> Event {
        self.run_with(Event::safety_punt)
    }

    /// Snap a loaded card pairing from the current spot.
    pub fn play(&mut self, play: &Play) -> Event {
        self.run_with(|from, rng| play.run(from, rng))
    }

    /// A scoreboard-style digest of the current situation.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut out = String::new();
        if let Some(carrier) = self.ball_carrier {
            let label = if Some(carrier) == self.kicking {
                "KICKING"
            } else {
                "OFFENSE"
            };
            out.push_str(&format!("{label}: {}\n", self.team(carrier).name()));
        }
        if self.yard_line > 50 {
            out.push_str(&format!("BALL ON: opponent's {}\n", 100 - self.yard_line));
        } else {
            out.push_str(&format!("BALL ON: own {}\n", self.yard_line));
        }
        if let (Some(down), Some(first_down)) = (self.down, self.first_down) {
            out.push_str(&format!("DOWN: {down} and {}\n", first_down - self.yard_line));
        }
        out.push_str(&format!("QUARTER: {}\n", self.quarter()));
        out.push_str(&format!("PLAY: {}\n", self.play_count));
        for team in &self.teams {
            out.push_str(&format!("{}: {}\n", team.name(), team.score()));
        }
        out
    }
}
