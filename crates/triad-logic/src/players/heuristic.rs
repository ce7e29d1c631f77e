//! Opening-sequence and payoff-threshold heuristics

use crate::random::SeededRng;
use crate::strategy::{count, echo_random_opponent, Move, RoundView, Strategy};
use crate::{payoff, welfare};

/// Opens D, C, C to fish for pushovers, then follows the defectors.
///
/// At round 3 it defects if either opponent cooperated on both rounds 1 and 2.
/// Afterwards it defects when the first opponent just defected and otherwise
/// copies the second opponent's last move.
#[derive(Clone, Copy, Debug, Default)]
pub struct Prober;

impl Strategy for Prober {
    fn select_action(&mut self, view: &RoundView<'_>, _rng: &mut SeededRng) -> Move {
        match view.round {
            0 => return Move::Defect,
            1 | 2 => return Move::Cooperate,
            3 => {
                let pushover = view
                    .opponents()
                    .iter()
                    .any(|h| h[1] == Move::Cooperate && h[2] == Move::Cooperate);
                if pushover {
                    return Move::Defect;
                }
            }
            _ => {}
        }

        let Some((_, first, second)) = view.last_round() else {
            return Move::Cooperate;
        };
        if first.is_defect() {
            Move::Defect
        } else {
            second
        }
    }
}

/// Cooperates for six rounds, defects for five, then steers by the welfare of
/// the round ten back.
#[derive(Clone, Copy, Debug, Default)]
pub struct Adaptive;

impl Adaptive {
    const LOOKBACK: usize = 10;
}

impl Strategy for Adaptive {
    fn select_action(&mut self, view: &RoundView<'_>, _rng: &mut SeededRng) -> Move {
        match view.round {
            0..=5 => Move::Cooperate,
            6..=10 => Move::Defect,
            _ => {
                let Some((a, b, c)) = view.rounds_ago(Self::LOOKBACK) else {
                    return Move::Cooperate;
                };
                // Integer mean payoff per player for that round
                match welfare(a, b, c) / 3 {
                    0..=2 => Move::Defect,
                    3 | 4 => Move::Cooperate,
                    5 => Move::Defect,
                    6 | 7 => Move::Cooperate,
                    _ => Move::Defect,
                }
            }
        }
    }
}

/// Tests the table for six rounds, then classifies it by its own behavior.
///
/// The test window opens with cooperation and then plays tit-for-tat
/// against a random opponent. Once it closes, zero or three own defections in
/// the window mean the table is answering in kind, so it keeps echoing;
/// anything else means it is being exploited or facing noise, so it defects.
///
/// With a re-check threshold it re-opens the window whenever the combined
/// welfare of the last six rounds falls below that threshold, checked every
/// six rounds after the window closes. The threshold is compared against the
/// raw six-round sum (36 when everyone defects, 108 when everyone cooperates),
/// not a per-round average, so a calm table keeps its classification instead
/// of reopening the window every six rounds.
#[derive(Clone, Copy, Debug, Default)]
pub struct Pavlov {
    recheck_below: Option<u32>,
    window_start: usize,
}

impl Pavlov {
    pub const WINDOW: usize = 6;

    /// Welfare over six rounds below which the rechecking variant reopens the window
    pub const RECHECK_THRESHOLD: u32 = 78;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn rechecking(threshold: u32) -> Self {
        Self {
            recheck_below: Some(threshold),
            window_start: 0,
        }
    }

    fn recent_welfare(view: &RoundView<'_>) -> u32 {
        (1..=Self::WINDOW)
            .filter_map(|back| view.rounds_ago(back))
            .map(|(a, b, c)| u32::from(welfare(a, b, c)))
            .sum()
    }
}

impl Strategy for Pavlov {
    fn select_action(&mut self, view: &RoundView<'_>, rng: &mut SeededRng) -> Move {
        if let Some(threshold) = self.recheck_below {
            let since = view.round - self.window_start;
            if since >= Self::WINDOW
                && since % Self::WINDOW == 0
                && Self::recent_welfare(view) < threshold
            {
                self.window_start = view.round;
            }
        }

        match view.round - self.window_start {
            0 => Move::Cooperate,
            offset if offset < Self::WINDOW => echo_random_opponent(view, rng),
            _ => {
                let window = &view.mine[self.window_start..self.window_start + Self::WINDOW];
                match count(window, Move::Defect) {
                    0 | 3 => echo_random_opponent(view, rng),
                    _ => Move::Defect,
                }
            }
        }
    }
}

/// Repeats its last move if it paid at least 5, otherwise switches.
#[derive(Clone, Copy, Debug, Default)]
pub struct WinStayLoseShift;

impl WinStayLoseShift {
    const SATISFIED: u8 = 5;
}

impl Strategy for WinStayLoseShift {
    fn select_action(&mut self, view: &RoundView<'_>, _rng: &mut SeededRng) -> Move {
        let Some((mine, first, second)) = view.last_round() else {
            return Move::Cooperate;
        };
        if payoff(mine, first, second) >= Self::SATISFIED {
            mine
        } else {
            mine.flip()
        }
    }
}
