//! Strategy contract and the per-round view handed to strategies

use serde::{Deserialize, Serialize};
use crate::random::SeededRng;

/// A move in the Prisoner's Dilemma
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Cooperate,
    Defect,
}

impl Move {
    /// Canonical index: 0 for cooperate, 1 for defect
    pub fn index(self) -> usize {
        match self {
            Move::Cooperate => 0,
            Move::Defect => 1,
        }
    }

    pub fn flip(self) -> Self {
        match self {
            Move::Cooperate => Move::Defect,
            Move::Defect => Move::Cooperate,
        }
    }

    pub fn is_defect(self) -> bool {
        self == Move::Defect
    }
}

/// Read-only histories for one decision.
///
/// `mine`, `first` and `second` all hold exactly `round` moves: the rounds
/// played so far, never the current one. `first` and `second` are the
/// opponents in cyclic seat order after the deciding seat.
#[derive(Clone, Copy, Debug)]
pub struct RoundView<'a> {
    pub round: usize,
    pub mine: &'a [Move],
    pub first: &'a [Move],
    pub second: &'a [Move],
}

impl<'a> RoundView<'a> {
    pub fn new(round: usize, mine: &'a [Move], first: &'a [Move], second: &'a [Move]) -> Self {
        Self { round, mine, first, second }
    }

    /// Both opponents' histories, in seat order
    pub fn opponents(&self) -> [&'a [Move]; 2] {
        [self.first, self.second]
    }

    /// Moves of all three players in the previous round, `None` at round 0
    pub fn last_round(&self) -> Option<(Move, Move, Move)> {
        let prev = self.round.checked_sub(1)?;
        Some((self.mine[prev], self.first[prev], self.second[prev]))
    }

    /// Moves of all three players `back` rounds ago (1 = previous round)
    pub fn rounds_ago(&self, back: usize) -> Option<(Move, Move, Move)> {
        if back == 0 {
            return None;
        }
        let idx = self.round.checked_sub(back)?;
        Some((self.mine[idx], self.first[idx], self.second[idx]))
    }
}

/// A decision function for one seat in one match.
///
/// A new instance is built for every match, so any state kept between calls
/// lives exactly as long as that match. All randomness must come from `rng`.
pub trait Strategy {
    fn select_action(&mut self, view: &RoundView<'_>, rng: &mut SeededRng) -> Move;
}

/// Count how many times `m` appears in `history`
pub fn count(history: &[Move], m: Move) -> usize {
    history.iter().filter(|h| **h == m).count()
}

/// Copy the last move of one opponent picked by a coin flip. Cooperates at round 0.
pub fn echo_random_opponent(view: &RoundView<'_>, rng: &mut SeededRng) -> Move {
    let Some((_, first, second)) = view.last_round() else {
        return Move::Cooperate;
    };
    if rng.coin_flip() {
        first
    } else {
        second
    }
}
