//! Retaliation with a path back to cooperation

use crate::random::SeededRng;
use crate::strategy::{count, Move, RoundView, Strategy};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Mood {
    #[default]
    Watching,
    /// Retaliating since the given round
    Grudge { since: usize },
    /// Cooperating unconditionally for this many more rounds
    Reconciling { rounds_left: u32 },
}

/// Punishes any defection with a grudge.
///
/// It defects on the round it notices a defection and for three more rounds.
/// Then it judges the opponents on the three rounds after its first
/// retaliation, the only ones in which they could have answered it: if each
/// cooperated in at least two of them and both cooperated in the last one, it
/// makes peace with two unconditional cooperative rounds and starts watching
/// again. Otherwise the grudge is renewed.
#[derive(Clone, Copy, Debug, Default)]
pub struct Grudger {
    mood: Mood,
}

impl Grudger {
    /// Rounds judged at the end of a grudge
    pub const GRUDGE_ROUNDS: usize = 3;
    const PEACE_ROUNDS: u32 = 2;

    pub fn new() -> Self {
        Self::default()
    }

    /// Called at round `since + GRUDGE_ROUNDS + 1`
    fn opponents_repented(view: &RoundView<'_>) -> bool {
        let start = view.round - Self::GRUDGE_ROUNDS;
        let mostly_cooperative = view
            .opponents()
            .iter()
            .all(|h| count(&h[start..], Move::Cooperate) >= 2);
        let just_cooperated = matches!(
            view.last_round(),
            Some((_, Move::Cooperate, Move::Cooperate))
        );
        mostly_cooperative && just_cooperated
    }
}

impl Strategy for Grudger {
    fn select_action(&mut self, view: &RoundView<'_>, _rng: &mut SeededRng) -> Move {
        match self.mood {
            Mood::Reconciling { rounds_left } => {
                self.mood = if rounds_left > 1 {
                    Mood::Reconciling { rounds_left: rounds_left - 1 }
                } else {
                    Mood::Watching
                };
                Move::Cooperate
            }
            Mood::Grudge { since } if view.round <= since + Self::GRUDGE_ROUNDS => Move::Defect,
            Mood::Grudge { .. } => {
                if Self::opponents_repented(view) {
                    self.mood = Mood::Reconciling { rounds_left: Self::PEACE_ROUNDS - 1 };
                    Move::Cooperate
                } else {
                    self.mood = Mood::Grudge { since: view.round };
                    Move::Defect
                }
            }
            Mood::Watching => match view.last_round() {
                Some((_, first, second)) if first.is_defect() || second.is_defect() => {
                    self.mood = Mood::Grudge { since: view.round };
                    Move::Defect
                }
                _ => Move::Cooperate,
            },
        }
    }
}
