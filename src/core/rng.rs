//! Deterministic dice rolling.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **Injectable**: Every constructor that rolls dice takes `&mut DiceRng`,
//!   so games and tests can replay exact sequences
//! - **Serializable**: O(1) state capture and restore
//!
//! All randomness in the engine - the three-die outcome rolls, penalty and
//! fumble side determinations, the opening coin flip - flows through a single
//! `DiceRng`. There is no global random source.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// The sum of three six-sided dice: always in `3..=18`.
///
/// Every outcome table is keyed by this sum. The distribution is triangular,
/// so tables encode probability by how many sums map to similar outcomes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DiceRoll(u8);

impl DiceRoll {
    /// Smallest possible sum (three ones).
    pub const MIN: u8 = 3;
    /// Largest possible sum (three sixes).
    pub const MAX: u8 = 18;

    /// Create a roll from a known total.
    ///
    /// Panics if `total` is outside `3..=18`.
    #[must_use]
    pub fn new(total: u8) -> Self {
        assert!(
            (Self::MIN..=Self::MAX).contains(&total),
            "dice total must be 3..=18, got {total}"
        );
        Self(total)
    }

    /// The summed value of the three dice.
    #[must_use]
    pub const fn total(self) -> u8 {
        self.0
    }

    /// Iterate over every possible roll total.
    pub fn all() -> impl Iterator<Item = DiceRoll> {
        (Self::MIN..=Self::MAX).map(DiceRoll)
    }
}

impl std::fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Deterministic dice source.
///
/// Uses ChaCha8 for speed while maintaining high-quality randomness.
#[derive(Clone, Debug)]
pub struct DiceRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl DiceRng {
    /// Create a new dice source with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Roll a single six-sided die.
    pub fn roll_die(&mut self) -> u8 {
        self.inner.gen_range(1..=6)
    }

    /// Roll three six-sided dice and sum them.
    pub fn roll_dice(&mut self) -> DiceRoll {
        DiceRoll(self.roll_die() + self.roll_die() + self.roll_die())
    }

    /// Flip a fair coin.
    pub fn coin(&mut self) -> bool {
        self.inner.gen_bool(0.5)
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> DiceRngState {
        DiceRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &DiceRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable RNG state for checkpointing.
///
/// Uses ChaCha8 word position for O(1) serialization regardless of
/// how many rolls have been made.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = DiceRng::new(42);
        let mut rng2 = DiceRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.roll_dice(), rng2.roll_dice());
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = DiceRng::new(1);
        let mut rng2 = DiceRng::new(2);

        let seq1: Vec<_> = (0..20).map(|_| rng1.roll_dice()).collect();
        let seq2: Vec<_> = (0..20).map(|_| rng2.roll_dice()).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_roll_range() {
        let mut rng = DiceRng::new(7);
        for _ in 0..1000 {
            let roll = rng.roll_dice();
            assert!((3..=18).contains(&roll.total()));
        }
    }

    #[test]
    fn test_roll_all_totals() {
        let totals: Vec<u8> = DiceRoll::all().map(DiceRoll::total).collect();
        assert_eq!(totals.len(), 16);
        assert_eq!(totals[0], 3);
        assert_eq!(totals[15], 18);
    }

    #[test]
    #[should_panic(expected = "dice total must be 3..=18")]
    fn test_roll_out_of_range() {
        let _ = DiceRoll::new(19);
    }

    #[test]
    fn test_state_serialization() {
        let mut rng = DiceRng::new(42);

        for _ in 0..100 {
            rng.roll_dice();
        }

        let state = rng.state();
        let expected: Vec<_> = (0..10).map(|_| rng.roll_dice()).collect();

        let mut restored = DiceRng::from_state(&state);
        let actual: Vec<_> = (0..10).map(|_| restored.roll_dice()).collect();

        assert_eq!(expected, actual);
    }

    #[test]
    fn test_state_serde() {
        let state = DiceRngState {
            seed: 42,
            word_pos: 12345,
        };

        let json = serde_json::to_string(&state).unwrap();
        let deserialized: DiceRngState = serde_json::from_str(&json).unwrap();

        assert_eq!(state, deserialized);
    }
}
