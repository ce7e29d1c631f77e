//! Round-robin tournament over every triple of roster entries

use serde::{Deserialize, Serialize};
use crate::error::{Result, TournamentError};
use crate::game::{determine_round_count, run_match, Lineup, RoundConfig, SEATS};
use crate::pairing::{calculate_match_count, generate_all_triples, Triple};
use crate::random::SeededRng;
use crate::roster::Roster;

/// Everything that determines a tournament besides the roster
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    /// Root seed; match `m` draws from `SeededRng::new(seed, m)`
    pub seed: u64,
    pub rounds: RoundConfig,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            rounds: RoundConfig::standard(),
        }
    }
}

impl TournamentConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Parse a JSON config; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.rounds.validate()?;
        Ok(config)
    }
}

/// Outcome of one match, enough to replay it
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub match_index: usize,
    pub triple: Triple,
    pub round_count: u32,
    /// Average payoff of each seat, in triple order
    pub scores: [f64; SEATS],
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub index: usize,
    pub name: String,
    /// Sum of the average scores from every seat this strategy occupied
    pub total: f64,
    pub seats: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TournamentOutcome {
    /// Best first
    pub standings: Vec<Standing>,
    /// In match-index order
    pub matches: Vec<MatchRecord>,
}

impl TournamentOutcome {
    pub fn winner(&self) -> Option<&Standing> {
        self.standings.first()
    }
}

/// Running totals indexed by roster index
struct TournamentState {
    totals: Vec<f64>,
    seats: Vec<u32>,
}

impl TournamentState {
    fn new(roster_len: usize) -> Self {
        Self {
            totals: vec![0.0; roster_len],
            seats: vec![0; roster_len],
        }
    }

    /// A strategy seated twice in one match gets both contributions
    fn record(&mut self, record: &MatchRecord) {
        let (i, j, k) = record.triple;
        for (slot, score) in [i, j, k].into_iter().zip(record.scores) {
            self.totals[slot] += score;
            self.seats[slot] += 1;
        }
    }
}

fn check_ready(roster: &Roster, config: &TournamentConfig) -> Result<()> {
    if roster.is_empty() {
        return Err(TournamentError::EmptyRoster);
    }
    config.rounds.validate()
}

/// Build fresh strategies for a triple and play it
fn play_match(
    roster: &Roster,
    config: &TournamentConfig,
    match_index: usize,
    triple: Triple,
) -> Result<MatchRecord> {
    let (i, j, k) = triple;
    let mut lineup: Lineup = [roster.build(i)?, roster.build(j)?, roster.build(k)?];

    let mut rng = SeededRng::new(config.seed, match_index as u64);
    let round_count = determine_round_count(&mut rng, &config.rounds);
    log::debug!("Match {}: {} rounds", match_index, round_count);

    let result = run_match(&mut lineup, round_count, &rng);

    Ok(MatchRecord {
        match_index,
        triple,
        round_count,
        scores: result.scores,
    })
}

fn log_match(roster: &Roster, record: &MatchRecord) {
    let (i, j, k) = record.triple;
    let name = |idx: usize| roster.name(idx).unwrap_or("?");
    log::info!(
        "Match {}: {} / {} / {} -> {:.3} : {:.3} : {:.3}",
        record.match_index,
        name(i),
        name(j),
        name(k),
        record.scores[0],
        record.scores[1],
        record.scores[2]
    );
}

fn finish(roster: &Roster, state: TournamentState, matches: Vec<MatchRecord>) -> TournamentOutcome {
    let standings = rank(&state.totals, &state.seats, roster);
    if let Some(top) = standings.first() {
        log::info!(
            "Tournament finished: {} matches, winner {} with {:.3}",
            matches.len(),
            top.name,
            top.total
        );
    }
    TournamentOutcome { standings, matches }
}

/// Run the full tournament: every triple `i <= j <= k` plays one match
///
/// Each match gets fresh strategy instances and its own generator derived from
/// `(config.seed, match_index)`, so the outcome depends only on the roster and
/// the config.
pub fn run_tournament(roster: &Roster, config: &TournamentConfig) -> Result<TournamentOutcome> {
    check_ready(roster, config)?;
    let n = roster.len();
    log::info!(
        "Starting tournament: {} strategies, {} matches, seed {}",
        n,
        calculate_match_count(n),
        config.seed
    );

    let mut state = TournamentState::new(n);
    let mut matches = Vec::with_capacity(calculate_match_count(n));
    for (match_index, triple) in generate_all_triples(n).into_iter().enumerate() {
        let record = play_match(roster, config, match_index, triple)?;
        log_match(roster, &record);
        state.record(&record);
        matches.push(record);
    }

    Ok(finish(roster, state, matches))
}

/// Same results as [`run_tournament`], with matches spread over the rayon pool
///
/// Records are collected in match order and folded afterwards, so totals are
/// bit-identical to the sequential run.
#[cfg(feature = "parallel")]
pub fn run_tournament_parallel(
    roster: &Roster,
    config: &TournamentConfig,
) -> Result<TournamentOutcome> {
    use crate::pairing::get_triple_for_match;
    use rayon::prelude::*;

    check_ready(roster, config)?;
    let n = roster.len();
    let count = calculate_match_count(n);
    log::info!(
        "Starting parallel tournament: {} strategies, {} matches, seed {}",
        n,
        count,
        config.seed
    );

    let matches = (0..count)
        .into_par_iter()
        .filter_map(|m| get_triple_for_match(n, m).map(|triple| (m, triple)))
        .map(|(m, triple)| play_match(roster, config, m, triple))
        .collect::<Result<Vec<_>>>()?;

    let mut state = TournamentState::new(n);
    for record in &matches {
        log_match(roster, record);
        state.record(record);
    }

    Ok(finish(roster, state, matches))
}

/// Order roster entries by total score, best first
///
/// The sort is stable, so exact ties keep roster order.
pub fn rank(totals: &[f64], seats: &[u32], roster: &Roster) -> Vec<Standing> {
    let mut standings: Vec<Standing> = totals
        .iter()
        .zip(seats)
        .enumerate()
        .map(|(index, (total, seats))| Standing {
            index,
            name: roster.name(index).unwrap_or_default().to_string(),
            total: *total,
            seats: *seats,
        })
        .collect();
    standings.sort_by(|a, b| b.total.total_cmp(&a.total));

    for (place, s) in standings.iter().enumerate() {
        log::debug!("{:>2}. {} {:.3}", place + 1, s.name, s.total);
    }
    standings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pairing::get_triple_for_match;
    use crate::players::{AlwaysCooperate, AlwaysDefect};

    fn nice_nasty_nice() -> Roster {
        Roster::new()
            .register("NiceA", "cooperates", || Box::new(AlwaysCooperate))
            .register("Nasty", "defects", || Box::new(AlwaysDefect))
            .register("NiceB", "cooperates", || Box::new(AlwaysCooperate))
    }

    fn fixed(rounds: u32) -> TournamentConfig {
        TournamentConfig {
            seed: 42,
            rounds: RoundConfig::fixed(rounds),
        }
    }

    fn indices(outcome: &TournamentOutcome) -> Vec<usize> {
        outcome.standings.iter().map(|s| s.index).collect()
    }

    #[test]
    fn test_defector_wins_among_cooperators() {
        let outcome = run_tournament(&nice_nasty_nice(), &fixed(100)).unwrap();

        assert_eq!(outcome.matches.len(), 10);
        assert_eq!(indices(&outcome), vec![1, 0, 2]);
        let totals: Vec<f64> = outcome.standings.iter().map(|s| s.total).collect();
        assert_eq!(totals, vec![50.0, 45.0, 45.0]);
        assert!(outcome.standings.iter().all(|s| s.seats == 10));
        assert_eq!(outcome.winner().map(|s| s.name.as_str()), Some("Nasty"));
    }

    #[test]
    fn test_match_scores_follow_seats() {
        let outcome = run_tournament(&nice_nasty_nice(), &fixed(100)).unwrap();

        let find = |t: Triple| outcome.matches.iter().find(|m| m.triple == t).unwrap();
        assert_eq!(find((0, 0, 1)).scores, [3.0, 3.0, 8.0]);
        assert_eq!(find((0, 1, 2)).scores, [3.0, 8.0, 3.0]);
        assert_eq!(find((0, 1, 1)).scores, [0.0, 5.0, 5.0]);
        assert_eq!(find((1, 1, 1)).scores, [2.0, 2.0, 2.0]);
        assert_eq!(find((0, 0, 2)).scores, [6.0, 6.0, 6.0]);
    }

    #[test]
    fn test_all_defectors() {
        let roster = Roster::new().register("Nasty", "defects", || Box::new(AlwaysDefect));
        let outcome = run_tournament(&roster, &TournamentConfig::with_seed(3)).unwrap();

        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(outcome.matches[0].scores, [2.0; 3]);
        assert_eq!(outcome.standings[0].total, 6.0);
        assert_eq!(outcome.standings[0].seats, 3);
    }

    #[test]
    fn test_totals_are_sums_of_records() {
        let roster = Roster::standard();
        let outcome = run_tournament(&roster, &TournamentConfig::with_seed(7)).unwrap();

        let mut totals = vec![0.0f64; roster.len()];
        for record in &outcome.matches {
            let (i, j, k) = record.triple;
            for (slot, score) in [i, j, k].into_iter().zip(record.scores) {
                totals[slot] += score;
            }
        }
        for s in &outcome.standings {
            assert_eq!(s.total, totals[s.index], "{}", s.name);
        }
    }

    #[test]
    fn test_records_in_match_order() {
        let roster = Roster::standard();
        let config = TournamentConfig::with_seed(11);
        let outcome = run_tournament(&roster, &config).unwrap();

        assert_eq!(outcome.matches.len(), calculate_match_count(roster.len()));
        for (m, record) in outcome.matches.iter().enumerate() {
            assert_eq!(record.match_index, m);
            assert_eq!(Some(record.triple), get_triple_for_match(roster.len(), m));
            assert!((90..=110).contains(&record.round_count));
            for score in record.scores {
                assert!((0.0..=8.0).contains(&score), "score={score}");
            }
        }
    }

    #[test]
    fn test_standings_sorted() {
        let outcome = run_tournament(&Roster::standard(), &TournamentConfig::with_seed(5)).unwrap();
        assert_eq!(outcome.standings.len(), 14);
        for w in outcome.standings.windows(2) {
            assert!(w[0].total >= w[1].total);
        }
    }

    #[test]
    fn test_deterministic_for_seed() {
        let roster = Roster::standard();
        let a = run_tournament(&roster, &TournamentConfig::with_seed(99)).unwrap();
        let b = run_tournament(&roster, &TournamentConfig::with_seed(99)).unwrap();
        assert_eq!(a, b);

        let c = run_tournament(&roster, &TournamentConfig::with_seed(100)).unwrap();
        assert_ne!(a.matches, c.matches);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_wide_match_index_keeps_its_own_stream() {
        let roster = Roster::new().register("Coin", "coin flips", || Box::new(crate::players::Random));
        let config = fixed(100);
        let wide = u32::MAX as usize + 1;

        let low = play_match(&roster, &config, 0, (0, 0, 0)).unwrap();
        let high = play_match(&roster, &config, wide, (0, 0, 0)).unwrap();
        assert_eq!(high.match_index, wide);
        assert_ne!(low.scores, high.scores);
    }

    #[test]
    fn test_rank_keeps_roster_order_on_ties() {
        let roster = Roster::standard();
        let standings = rank(&[1.0, 3.0, 3.0, 0.5], &[3, 3, 3, 3], &roster);
        let order: Vec<usize> = standings.iter().map(|s| s.index).collect();
        assert_eq!(order, vec![1, 2, 0, 3]);
        assert_eq!(standings[0].name, "AlwaysDefect");
        assert_eq!(standings[1].name, "Random");
    }

    #[test]
    fn test_empty_roster_rejected() {
        let err = run_tournament(&Roster::new(), &TournamentConfig::default()).unwrap_err();
        assert!(matches!(err, TournamentError::EmptyRoster));
    }

    #[test]
    fn test_invalid_rounds_rejected() {
        let config = TournamentConfig {
            seed: 0,
            rounds: RoundConfig { min_rounds: 20, max_rounds: 10 },
        };
        let err = run_tournament(&nice_nasty_nice(), &config).unwrap_err();
        assert!(matches!(
            err,
            TournamentError::InvalidRoundConfig { min: 20, max: 10 }
        ));
    }

    #[test]
    fn test_config_defaults() {
        let config = TournamentConfig::default();
        assert_eq!(config.seed, 0);
        assert_eq!(config.rounds, RoundConfig::standard());

        assert_eq!(TournamentConfig::from_json_str("{}").unwrap(), config);
        assert_eq!(
            TournamentConfig::from_json_str(r#"{"seed": 9}"#).unwrap(),
            TournamentConfig::with_seed(9)
        );
    }

    #[test]
    fn test_config_from_json() {
        let config = TournamentConfig::from_json_str(
            r#"{"seed": 12, "rounds": {"min_rounds": 5, "max_rounds": 8}}"#,
        )
        .unwrap();
        assert_eq!(config.seed, 12);
        assert_eq!(config.rounds, RoundConfig { min_rounds: 5, max_rounds: 8 });
    }

    #[test]
    fn test_config_errors() {
        let err = TournamentConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, TournamentError::Config(_)));

        let err = TournamentConfig::from_json_str(
            r#"{"rounds": {"min_rounds": 0, "max_rounds": 5}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, TournamentError::InvalidRoundConfig { min: 0, max: 5 }));
    }

    #[test]
    fn test_outcome_serializes() {
        let outcome = run_tournament(&nice_nasty_nice(), &fixed(10)).unwrap();
        let json = serde_json::to_string(&outcome).unwrap();
        let back: TournamentOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(back, outcome);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let roster = Roster::standard();
        let config = TournamentConfig::with_seed(2024);
        let sequential = run_tournament(&roster, &config).unwrap();
        let parallel = run_tournament_parallel(&roster, &config).unwrap();
        assert_eq!(sequential, parallel);
    }
}
