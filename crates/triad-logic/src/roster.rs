//! Named registry of strategy factories

use crate::error::{Result, TournamentError};
use crate::players::{
    Adaptive, AlwaysCooperate, AlwaysDefect, ExpectedUtility, Freaky, Grudger, Pavlov, Prober,
    Random, RandomTitForTat, ScoreTracker, Tolerant, WinStayLoseShift,
};
use crate::strategy::Strategy;

/// Builds a fresh, freshly initialized strategy instance
pub type Factory = fn() -> Box<dyn Strategy>;

#[derive(Clone, Debug)]
pub struct RosterEntry {
    pub name: String,
    pub description: String,
    pub factory: Factory,
}

/// Ordered list of strategies taking part in a tournament.
///
/// The position of an entry is its roster index; standings and match triples
/// refer to strategies by that index.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    entries: Vec<RosterEntry>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a strategy; its index is the current length
    pub fn register(
        mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        factory: Factory,
    ) -> Self {
        self.entries.push(RosterEntry {
            name: name.into(),
            description: description.into(),
            factory,
        });
        self
    }

    /// The fourteen built-in strategies
    pub fn standard() -> Self {
        Self::new()
            .register("AlwaysCooperate", "Always cooperates", || Box::new(AlwaysCooperate))
            .register("AlwaysDefect", "Always defects", || Box::new(AlwaysDefect))
            .register("Random", "Fair coin every round", || Box::new(Random))
            .register(
                "Tolerant",
                "Defects when opponents defected more often than they cooperated",
                || Box::new(Tolerant),
            )
            .register(
                "Freaky",
                "Picks cooperate or defect once per match",
                || Box::new(Freaky::default()),
            )
            .register(
                "RandomTitForTat",
                "Copies the last move of a random opponent",
                || Box::new(RandomTitForTat),
            )
            .register(
                "Prober",
                "Opens D, C, C and exploits opponents that never retaliate",
                || Box::new(Prober),
            )
            .register(
                "Adaptive",
                "Scripted opening, then steers by the payoff ten rounds back",
                || Box::new(Adaptive),
            )
            .register(
                "Pavlov",
                "Six-round test of the table, then echoes or defects by its own record",
                || Box::new(Pavlov::new()),
            )
            .register(
                "WinStayLoseShift",
                "Repeats a move that paid at least 5, otherwise switches",
                || Box::new(WinStayLoseShift),
            )
            .register(
                "RecheckingPavlov",
                "Pavlov that reopens its test window when recent welfare drops",
                || Box::new(Pavlov::rechecking(Pavlov::RECHECK_THRESHOLD)),
            )
            .register(
                "Grudger",
                "Three-round grudges with reconciliation",
                || Box::new(Grudger::new()),
            )
            .register(
                "ScoreTracker",
                "Tracks scores and cooperation, retaliates against defectors",
                || Box::new(ScoreTracker::default()),
            )
            .register(
                "ExpectedUtility",
                "Majority temperament, expected utility on a split table",
                || Box::new(ExpectedUtility::default()),
            )
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|e| e.name.as_str())
    }

    /// Roster index of the entry called `name`
    pub fn find(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name)
    }

    /// Construct a new instance of the strategy at `index`
    pub fn build(&self, index: usize) -> Result<Box<dyn Strategy>> {
        let entry = self
            .entries
            .get(index)
            .ok_or(TournamentError::UnknownStrategy {
                index,
                roster_len: self.entries.len(),
            })?;
        Ok((entry.factory)())
    }

    /// Sub-roster holding the named entries in the order given
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Roster> {
        let entries = names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.find(name)
                    .map(|i| self.entries[i].clone())
                    .ok_or_else(|| TournamentError::UnknownStrategyName(name.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Roster { entries })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SeededRng;
    use crate::strategy::{Move, RoundView};

    #[test]
    fn test_standard_roster_order() {
        let roster = Roster::standard();
        let names: Vec<&str> = roster.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "AlwaysCooperate",
                "AlwaysDefect",
                "Random",
                "Tolerant",
                "Freaky",
                "RandomTitForTat",
                "Prober",
                "Adaptive",
                "Pavlov",
                "WinStayLoseShift",
                "RecheckingPavlov",
                "Grudger",
                "ScoreTracker",
                "ExpectedUtility",
            ]
        );
        assert_eq!(roster.len(), 14);
        assert!(!roster.is_empty());
    }

    #[test]
    fn test_names_are_unique() {
        let roster = Roster::standard();
        for (i, e) in roster.entries().iter().enumerate() {
            assert_eq!(roster.find(&e.name), Some(i));
            assert!(!e.description.is_empty());
        }
    }

    #[test]
    fn test_build_every_entry() {
        let roster = Roster::standard();
        let mut rng = SeededRng::new(42, 0);
        let view = RoundView::new(0, &[], &[], &[]);
        for i in 0..roster.len() {
            let mut s = roster.build(i).unwrap();
            // Every strategy must answer the opening round
            let _ = s.select_action(&view, &mut rng);
        }
    }

    #[test]
    fn test_build_unknown_index() {
        let roster = Roster::standard();
        match roster.build(14) {
            Err(TournamentError::UnknownStrategy { index, roster_len }) => {
                assert_eq!(index, 14);
                assert_eq!(roster_len, 14);
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("expected an error"),
        }
    }

    #[test]
    fn test_register_custom() {
        let roster = Roster::new()
            .register("Nice", "cooperates", || Box::new(AlwaysCooperate))
            .register("Nasty", "defects", || Box::new(AlwaysDefect));
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.name(1), Some("Nasty"));
        assert_eq!(roster.name(2), None);

        let mut rng = SeededRng::new(0, 0);
        let view = RoundView::new(0, &[], &[], &[]);
        let mut nasty = roster.build(1).unwrap();
        assert_eq!(nasty.select_action(&view, &mut rng), Move::Defect);
    }

    #[test]
    fn test_select_keeps_requested_order() {
        let roster = Roster::standard();
        let sub = roster.select(&["Grudger", "AlwaysDefect"]).unwrap();
        assert_eq!(sub.len(), 2);
        assert_eq!(sub.name(0), Some("Grudger"));
        assert_eq!(sub.name(1), Some("AlwaysDefect"));
    }

    #[test]
    fn test_select_unknown_name() {
        let roster = Roster::standard();
        let err = roster.select(&["Pavlov", "Nobody"]).unwrap_err();
        assert!(matches!(err, TournamentError::UnknownStrategyName(ref n) if n == "Nobody"));
    }

    #[test]
    fn test_empty_roster() {
        let roster = Roster::new();
        assert!(roster.is_empty());
        assert!(roster.build(0).is_err());
    }
}
