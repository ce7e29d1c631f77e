//! Built-in strategies
//!
//! Each type implements [`Strategy`](crate::Strategy) and is constructed fresh
//! for every match by the roster.

mod grudger;
mod heuristic;
mod simple;
mod utility;

pub use grudger::Grudger;
pub use heuristic::{Adaptive, Pavlov, Prober, WinStayLoseShift};
pub use simple::{AlwaysCooperate, AlwaysDefect, Freaky, Random, RandomTitForTat, Tolerant};
pub use utility::{ExpectedUtility, ScoreTracker};
