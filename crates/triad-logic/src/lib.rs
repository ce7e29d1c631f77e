//! Triad Logic
//!
//! Core game logic for the Iterated Prisoner's Dilemma tournament played in
//! triples: the payoff table, the match engine, the roster of strategies and
//! the round-robin tournament over every combination of three.

mod error;
mod game;
mod pairing;
mod random;
mod roster;
mod strategy;
mod tournament;

pub mod players;

pub use error::{Result, TournamentError};
pub use game::{determine_round_count, run_match, Lineup, MatchResult, RoundConfig, RoundResult, SEATS};
pub use pairing::{calculate_match_count, generate_all_triples, get_triple_for_match, Triple};
pub use random::SeededRng;
pub use roster::{Factory, Roster, RosterEntry};
pub use strategy::{Move, RoundView, Strategy};
pub use tournament::{
    rank, run_tournament, MatchRecord, Standing, TournamentConfig, TournamentOutcome,
};

#[cfg(feature = "parallel")]
pub use tournament::run_tournament_parallel;

/// Smallest payoff any player can receive in one round
pub const PAYOFF_MIN: u8 = 0;

/// Largest payoff any player can receive in one round
pub const PAYOFF_MAX: u8 = 8;

/// Payoff matrix for the three-player Prisoner's Dilemma
///
/// Returns the payoff to `me` given both co-players' moves. The value depends
/// only on how many co-players cooperated, so swapping `first` and `second`
/// never changes it.
///
/// U(DCC) > U(CCC) > U(DDC) > U(CDC) > U(DDD) > U(CDD)
pub fn payoff(me: Move, first: Move, second: Move) -> u8 {
    let cooperators = [first, second]
        .iter()
        .filter(|m| **m == Move::Cooperate)
        .count();
    match (me, cooperators) {
        (Move::Cooperate, 2) => 6,
        (Move::Cooperate, 1) => 3,
        (Move::Cooperate, _) => 0,
        (Move::Defect, 2) => 8,
        (Move::Defect, 1) => 5,
        (Move::Defect, _) => 2,
    }
}

/// Sum of all three players' payoffs for one round
pub fn welfare(a: Move, b: Move, c: Move) -> u8 {
    payoff(a, b, c) + payoff(b, c, a) + payoff(c, a, b)
}
