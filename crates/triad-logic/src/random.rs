//! Seeded pseudo-random number generator
//!
//! Deterministic PRNG for reproducible tournaments.
//! Every match gets its own ChaCha stream, split into one lane for the
//! round-count draw and one lane per seat.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Streams reserved per match: lane 0 for the match itself, 1..=3 for seats.
const LANES_PER_MATCH: u64 = 4;

/// Seeded random number generator
///
/// Deterministic: same seed + match index = same sequence
#[derive(Clone, Debug)]
pub struct SeededRng {
    seed: u64,
    match_index: u64,
    inner: ChaCha8Rng,
}

impl SeededRng {
    /// Create a new RNG from a tournament seed and match index
    pub fn new(seed: u64, match_index: u64) -> Self {
        Self::with_lane(seed, match_index, 0)
    }

    fn with_lane(seed: u64, match_index: u64, lane: u64) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(seed);
        inner.set_stream(match_index * LANES_PER_MATCH + lane);
        Self {
            seed,
            match_index,
            inner,
        }
    }

    /// Create the independent stream a seat draws from within this match
    pub fn for_seat(&self, seat: usize) -> Self {
        debug_assert!((seat as u64) < LANES_PER_MATCH - 1, "seat {seat} out of range");
        Self::with_lane(self.seed, self.match_index, 1 + seat as u64)
    }

    /// Match index this generator was derived for
    pub fn match_index(&self) -> u64 {
        self.match_index
    }

    /// Generate next u64
    pub fn next_u64(&mut self) -> u64 {
        self.inner.gen()
    }

    /// Bernoulli draw: true with probability `p` (clamped to [0, 1])
    pub fn chance(&mut self, p: f64) -> bool {
        self.inner.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Fair coin
    pub fn coin_flip(&mut self) -> bool {
        self.chance(0.5)
    }

    /// Generate a value in range [min, max] (inclusive)
    pub fn next_inclusive(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        self.inner.gen_range(min..=max)
    }
}
