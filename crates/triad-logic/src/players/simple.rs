//! Stateless and near-stateless strategies

use crate::random::SeededRng;
use crate::strategy::{count, echo_random_opponent, Move, RoundView, Strategy};

/// Never defects.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysCooperate;

impl Strategy for AlwaysCooperate {
    fn select_action(&mut self, _view: &RoundView<'_>, _rng: &mut SeededRng) -> Move {
        Move::Cooperate
    }
}

/// Never cooperates.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysDefect;

impl Strategy for AlwaysDefect {
    fn select_action(&mut self, _view: &RoundView<'_>, _rng: &mut SeededRng) -> Move {
        Move::Defect
    }
}

/// Fair coin every round.
#[derive(Clone, Copy, Debug, Default)]
pub struct Random;

impl Strategy for Random {
    fn select_action(&mut self, _view: &RoundView<'_>, rng: &mut SeededRng) -> Move {
        if rng.coin_flip() {
            Move::Cooperate
        } else {
            Move::Defect
        }
    }
}

/// Defects only when the opponents together have defected more often than
/// they cooperated.
#[derive(Clone, Copy, Debug, Default)]
pub struct Tolerant;

impl Strategy for Tolerant {
    fn select_action(&mut self, view: &RoundView<'_>, _rng: &mut SeededRng) -> Move {
        let (defects, coops) = view
            .opponents()
            .iter()
            .fold((0, 0), |(d, c), h| {
                (d + count(h, Move::Defect), c + count(h, Move::Cooperate))
            });
        if defects > coops {
            Move::Defect
        } else {
            Move::Cooperate
        }
    }
}

/// Picks nice or nasty once per match and sticks with it.
#[derive(Clone, Copy, Debug, Default)]
pub struct Freaky {
    disposition: Option<Move>,
}

impl Strategy for Freaky {
    fn select_action(&mut self, _view: &RoundView<'_>, rng: &mut SeededRng) -> Move {
        *self.disposition.get_or_insert_with(|| {
            if rng.coin_flip() {
                Move::Cooperate
            } else {
                Move::Defect
            }
        })
    }
}

/// Tit-for-tat against one opponent chosen at random each round.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomTitForTat;

impl Strategy for RandomTitForTat {
    fn select_action(&mut self, view: &RoundView<'_>, rng: &mut SeededRng) -> Move {
        echo_random_opponent(view, rng)
    }
}
