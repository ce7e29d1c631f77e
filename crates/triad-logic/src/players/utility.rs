//! Strategies that model their opponents and best-respond

use crate::random::SeededRng;
use crate::strategy::{Move, RoundView, Strategy};
use crate::payoff;

/// Fraction of rounds in which `history` cooperated, 0.5 with no evidence
fn cooperation_rate(history: &[Move]) -> f64 {
    if history.is_empty() {
        return 0.5;
    }
    let coops = history.iter().filter(|m| **m == Move::Cooperate).count();
    coops as f64 / history.len() as f64
}

/// Predict an opponent's next move from its cooperation count
fn majority_prediction(coops: usize, rounds: usize) -> Move {
    if coops > rounds / 2 {
        Move::Cooperate
    } else {
        Move::Defect
    }
}

/// The move that pays more against a known pair of opponent moves
fn best_response(first: Move, second: Move) -> Move {
    if payoff(Move::Cooperate, first, second) > payoff(Move::Defect, first, second) {
        Move::Cooperate
    } else {
        Move::Defect
    }
}

/// Expected payoff of `action` when the opponents cooperate independently
/// with probabilities `p_first` and `p_second`
fn expected_utility(action: Move, p_first: f64, p_second: f64) -> f64 {
    let outcomes = [
        (Move::Cooperate, p_first),
        (Move::Defect, 1.0 - p_first),
    ];
    let mut total = 0.0;
    for (first, pf) in outcomes {
        for (second, ps) in [(Move::Cooperate, p_second), (Move::Defect, 1.0 - p_second)] {
            total += pf * ps * f64::from(payoff(action, first, second));
        }
    }
    total
}

fn maximize_expected_utility(view: &RoundView<'_>) -> Move {
    let p_first = cooperation_rate(view.first);
    let p_second = cooperation_rate(view.second);
    if expected_utility(Move::Cooperate, p_first, p_second)
        > expected_utility(Move::Defect, p_first, p_second)
    {
        Move::Cooperate
    } else {
        Move::Defect
    }
}

/// Keeps running scores and cooperation counts for the whole table.
///
/// Two mostly-defecting opponents get near-certain defection, two
/// mostly-cooperating ones get cooperation. Against a split table it
/// best-responds to majority predictions while it outscores at least one
/// opponent, and falls back to expected utility when it is trailing both.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScoreTracker {
    seen: usize,
    /// Cumulative payoffs: own, first, second
    scores: [u32; 3],
    coops: [usize; 2],
}

impl ScoreTracker {
    pub const RETALIATION: f64 = 0.999;

    /// Fold every round not yet accounted for into the running totals
    fn absorb(&mut self, view: &RoundView<'_>) {
        for r in self.seen..view.round {
            let (me, first, second) = (view.mine[r], view.first[r], view.second[r]);
            self.scores[0] += u32::from(payoff(me, first, second));
            self.scores[1] += u32::from(payoff(first, second, me));
            self.scores[2] += u32::from(payoff(second, me, first));
            for (count, m) in self.coops.iter_mut().zip([first, second]) {
                if m == Move::Cooperate {
                    *count += 1;
                }
            }
        }
        self.seen = view.round;
    }
}

impl Strategy for ScoreTracker {
    fn select_action(&mut self, view: &RoundView<'_>, rng: &mut SeededRng) -> Move {
        let n = view.round;
        if n == 0 {
            return Move::Cooperate;
        }
        self.absorb(view);

        let half = n / 2;
        let [c1, c2] = self.coops;
        if c1 < half && c2 < half {
            return if rng.chance(Self::RETALIATION) {
                Move::Defect
            } else {
                Move::Cooperate
            };
        }
        if c1 >= half && c2 >= half {
            return Move::Cooperate;
        }

        let [mine, first, second] = self.scores;
        if mine > first || mine > second {
            best_response(majority_prediction(c1, n), majority_prediction(c2, n))
        } else {
            maximize_expected_utility(view)
        }
    }
}

/// Counts opponent defections and plays the table's majority temperament.
///
/// A split table is resolved by average score: while some opponent scores
/// below it, it best-responds to majority predictions. When no opponent scores
/// below it, ties included, it maximizes expected utility against stationary
/// cooperation estimates.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExpectedUtility {
    seen: usize,
    defects: [usize; 2],
}

impl ExpectedUtility {
    fn absorb(&mut self, view: &RoundView<'_>) {
        for (count, history) in self.defects.iter_mut().zip(view.opponents()) {
            *count += history[self.seen..view.round]
                .iter()
                .filter(|m| m.is_defect())
                .count();
        }
        self.seen = view.round;
    }

    /// Average payoff per round of each seat in the view: own, first, second
    fn average_scores(view: &RoundView<'_>) -> [f64; 3] {
        let mut totals = [0u32; 3];
        for r in 0..view.round {
            let (me, first, second) = (view.mine[r], view.first[r], view.second[r]);
            totals[0] += u32::from(payoff(me, first, second));
            totals[1] += u32::from(payoff(first, second, me));
            totals[2] += u32::from(payoff(second, me, first));
        }
        totals.map(|t| f64::from(t) / view.round as f64)
    }

    /// True when at least one opponent scores strictly below `mine`
    fn someone_trails(mine: f64, first: f64, second: f64) -> bool {
        first < mine || second < mine
    }
}

impl Strategy for ExpectedUtility {
    fn select_action(&mut self, view: &RoundView<'_>, _rng: &mut SeededRng) -> Move {
        let n = view.round;
        if n == 0 {
            return Move::Cooperate;
        }
        self.absorb(view);

        let half = n / 2;
        let [d1, d2] = self.defects;
        if d1 <= half && d2 <= half {
            return Move::Cooperate;
        }
        if d1 > half && d2 > half {
            return Move::Defect;
        }

        let [mine, first, second] = Self::average_scores(view);
        if Self::someone_trails(mine, first, second) {
            best_response(
                majority_prediction(n - d1, n),
                majority_prediction(n - d2, n),
            )
        } else {
            maximize_expected_utility(view)
        }
    }
}
