//! Outcome-table integration tests.
//!
//! Every table must be exhaustive over the three-die sums and every entry
//! must normalize into a concrete event tree with the root-first shape
//! downstream consumers rely on.

use gridiron::events::tables::{
    normalize, FieldGoalChart, OutcomeTable, TableEntry, BLOCKED_KICK, INTERCEPTION, KICKOFF,
    KICKOFF_RETURN, ONSIDE_KICK, PUNT_IN_BOUNDS, PUNT_OUT_OF_BOUNDS, PUNT_RETURN, SAFETY_PUNT,
};
use gridiron::{DiceRng, DiceRoll, Event, RoleFrame};

use proptest::prelude::*;

fn all_tables() -> [(&'static str, &'static OutcomeTable); 9] {
    [
        ("interception", &INTERCEPTION),
        ("kickoff", &KICKOFF),
        ("kickoff return", &KICKOFF_RETURN),
        ("onside kick", &ONSIDE_KICK),
        ("blocked kick", &BLOCKED_KICK),
        ("punt return", &PUNT_RETURN),
        ("punt in bounds", &PUNT_IN_BOUNDS),
        ("punt out of bounds", &PUNT_OUT_OF_BOUNDS),
        ("safety punt", &SAFETY_PUNT),
    ]
}

proptest! {
    /// Every sum on every table normalizes into a non-empty, root-first
    /// event tree.
    #[test]
    fn prop_every_sum_normalizes(sum in 3u8..=18, seed in 0u64..512) {
        for (name, table) in all_tables() {
            let mut rng = DiceRng::new(seed);
            let entry = table.entry(DiceRoll::new(sum));
            let event = normalize(entry, 50, RoleFrame::SpecialTeams, &mut rng);

            let flat = event.resolve();
            prop_assert!(!flat.is_empty(), "{} sum {} resolved empty", name, sum);
            prop_assert_eq!(flat[0], &event, "{} sum {} is not root-first", name, sum);
        }
    }

    /// Deferred entries materialize at the reference line: the fumble or
    /// block they produce never needs a second lookup.
    #[test]
    fn prop_pending_entries_materialize(sum in 3u8..=18, seed in 0u64..512) {
        for (name, table) in all_tables() {
            if let TableEntry::Pending(pending) = table.entry(DiceRoll::new(sum)) {
                let mut rng = DiceRng::new(seed);
                let event = pending.materialize(45, &mut rng);
                prop_assert!(
                    matches!(
                        event,
                        Event::Fumble { .. }
                            | Event::BlockedKick { .. }
                            | Event::PuntReturn { .. }
                            | Event::Touchback
                            | Event::FairCatch
                    ),
                    "{} sum {} materialized {:?}",
                    name,
                    sum,
                    event
                );
            }
        }
    }

    /// A blocked field-goal roll is never simultaneously a make, from any
    /// spot on the field, on either chart.
    #[test]
    fn prop_block_band_never_makes(kick_from in 0i32..=100) {
        for chart in [&FieldGoalChart::STANDARD, &FieldGoalChart::SEVENTY_SEVEN] {
            for roll in DiceRoll::all() {
                if chart.is_blocked(roll) {
                    prop_assert!(!chart.is_good(kick_from, roll));
                }
            }
        }
    }
}

/// Table penalties always carry a basis and a walk-off distance.
#[test]
fn test_penalty_entries_are_well_formed() {
    for (name, table) in all_tables() {
        for roll in DiceRoll::all() {
            if let TableEntry::Penalty { basis, dist } = table.entry(roll) {
                assert!(*dist > 0, "{name} sum {} has no walk-off", roll.total());
                assert!(*basis >= 0, "{name} sum {} basis is negative", roll.total());
            }
        }
    }
}

/// Normalizing a plain-yardage entry produces a stop carrying those yards.
#[test]
fn test_normalize_yardage() {
    let mut rng = DiceRng::new(5);
    let event = normalize(&TableEntry::Yards(35), 50, RoleFrame::SpecialTeams, &mut rng);
    assert_eq!(event, Event::Stop { yds: 35 });
}

/// Field-goal range policy: no bucket means an automatic miss, never an
/// error.
#[test]
fn test_out_of_range_kick_always_misses() {
    let standard = FieldGoalChart::STANDARD;
    for kick_from in 0..standard.min_yard_line() {
        for roll in DiceRoll::all() {
            assert!(!standard.is_good(kick_from, roll));
        }
    }
}

/// The chip-shot bucket converts everything below the block band.
#[test]
fn test_chip_shot_conversion_window() {
    let standard = FieldGoalChart::STANDARD;
    for total in 3..=11 {
        assert!(standard.is_good(95, DiceRoll::new(total)));
    }
    for total in 12..=18 {
        assert!(!standard.is_good(95, DiceRoll::new(total)));
    }
}
