//! Match execution engine

use serde::{Deserialize, Serialize};
use crate::error::{Result, TournamentError};
use crate::payoff;
use crate::random::SeededRng;
use crate::strategy::{Move, RoundView, Strategy};

/// Players in one match
pub const SEATS: usize = 3;

/// The three strategies seated for one match, in seat order
pub type Lineup = [Box<dyn Strategy>; SEATS];

/// Result of a single round
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    pub round: u32,
    pub moves: [Move; SEATS],
    pub payoffs: [u8; SEATS],
    pub cumulative: [u32; SEATS],
}

/// Result of a complete match
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub rounds: Vec<RoundResult>,
    pub totals: [u32; SEATS],
    /// Per-seat average payoff per round
    pub scores: [f64; SEATS],
    pub round_count: u32,
}

impl MatchResult {
    /// Full move history of one seat
    pub fn history(&self, seat: usize) -> Vec<Move> {
        self.rounds.iter().map(|r| r.moves[seat]).collect()
    }
}

/// Range the round count of each match is drawn from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundConfig {
    pub min_rounds: u32,
    pub max_rounds: u32,
}

impl RoundConfig {
    /// Between 90 and 110 rounds, so no strategy can count down to a known last round
    pub fn standard() -> Self {
        Self { min_rounds: 90, max_rounds: 110 }
    }

    /// Every match lasts exactly `rounds` rounds
    pub fn fixed(rounds: u32) -> Self {
        Self { min_rounds: rounds, max_rounds: rounds }
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_rounds == 0 || self.min_rounds > self.max_rounds {
            return Err(TournamentError::InvalidRoundConfig {
                min: self.min_rounds,
                max: self.max_rounds,
            });
        }
        Ok(())
    }
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Determine how many rounds this match will have
///
/// Uniform over `[min_rounds, max_rounds]`.
pub fn determine_round_count(rng: &mut SeededRng, config: &RoundConfig) -> u32 {
    rng.next_inclusive(config.min_rounds, config.max_rounds)
}

/// Run a complete match between three strategies
///
/// # Arguments
/// * `lineup` - Freshly built strategies, one per seat
/// * `round_count` - Number of rounds to play
/// * `rng` - Match generator; each seat draws from its own stream derived from it
///
/// # Returns
/// Complete match result with round-by-round details
///
/// Seat `s` always sees its own history first, then seats `(s + 1) % 3` and
/// `(s + 2) % 3`. A strategy that reads past the end of a history panics and
/// takes the run down with it.
pub fn run_match(lineup: &mut Lineup, round_count: u32, rng: &SeededRng) -> MatchResult {
    let mut seat_rngs: [SeededRng; SEATS] = std::array::from_fn(|seat| rng.for_seat(seat));
    let mut histories: [Vec<Move>; SEATS] =
        std::array::from_fn(|_| Vec::with_capacity(round_count as usize));
    let mut rounds: Vec<RoundResult> = Vec::with_capacity(round_count as usize);
    let mut totals = [0u32; SEATS];

    for round in 0..round_count {
        // All seats decide on the same prior state
        let moves: [Move; SEATS] = std::array::from_fn(|seat| {
            let view = RoundView::new(
                round as usize,
                &histories[seat],
                &histories[(seat + 1) % SEATS],
                &histories[(seat + 2) % SEATS],
            );
            lineup[seat].select_action(&view, &mut seat_rngs[seat])
        });

        let payoffs: [u8; SEATS] = std::array::from_fn(|seat| {
            payoff(moves[seat], moves[(seat + 1) % SEATS], moves[(seat + 2) % SEATS])
        });

        for seat in 0..SEATS {
            totals[seat] += u32::from(payoffs[seat]);
            histories[seat].push(moves[seat]);
        }

        rounds.push(RoundResult {
            round,
            moves,
            payoffs,
            cumulative: totals,
        });
    }

    let scores = if round_count == 0 {
        [0.0; SEATS]
    } else {
        totals.map(|t| f64::from(t) / f64::from(round_count))
    };

    MatchResult {
        rounds,
        totals,
        scores,
        round_count,
    }
}
