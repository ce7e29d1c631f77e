use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

use triad_logic::{run_tournament, Roster, RoundConfig, TournamentConfig, TournamentOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    /// Ranked table on stdout
    Console,
    /// Full outcome, including every match record, as JSON
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "triad-arena", version)]
#[command(about = "Run a three-player Iterated Prisoner's Dilemma tournament")]
struct Args {
    /// Tournament config JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Root seed (defaults to the config seed, or a fresh random seed)
    #[arg(long)]
    seed: Option<u64>,

    /// Shortest match length
    #[arg(long)]
    min_rounds: Option<u32>,

    /// Longest match length
    #[arg(long)]
    max_rounds: Option<u32>,

    /// Play every match for exactly this many rounds
    #[arg(long, conflicts_with_all = ["min_rounds", "max_rounds"])]
    rounds: Option<u32>,

    /// Strategies to enter (comma-separated names, default: all)
    #[arg(long, value_delimiter = ',')]
    strategies: Vec<String>,

    /// List the built-in strategies and exit
    #[arg(long)]
    list_strategies: bool,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Spread matches over all cores
    #[arg(long)]
    parallel: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let default_filter = if args.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let roster = Roster::standard();
    if args.list_strategies {
        list_strategies(&roster);
        return Ok(());
    }

    let roster = if args.strategies.is_empty() {
        roster
    } else {
        roster
            .select(&args.strategies)
            .context("Failed to select strategies")?
    };

    let file_config = match &args.config {
        Some(path) => Some(load_config(path)?),
        None => None,
    };
    let config = resolve_config(&args, file_config)?;
    log::info!("Using seed {}", config.seed);

    let outcome = if args.parallel {
        run_parallel(&roster, &config)?
    } else {
        run_tournament(&roster, &config)?
    };

    match args.report {
        ReportFormat::Console => print_standings(&outcome),
        ReportFormat::Json => {
            let json = serde_json::to_string_pretty(&outcome)
                .context("Failed to serialize tournament outcome")?;
            println!("{json}");
        }
    }
    Ok(())
}

fn load_config(path: &Path) -> Result<TournamentConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    TournamentConfig::from_json_str(&json)
        .with_context(|| format!("Invalid config {}", path.display()))
}

/// Layer command-line overrides on top of the config file
fn resolve_config(args: &Args, file_config: Option<TournamentConfig>) -> Result<TournamentConfig> {
    let mut config = file_config.unwrap_or_default();

    config.seed = match (args.seed, &args.config) {
        (Some(seed), _) => seed,
        (None, Some(_)) => config.seed,
        (None, None) => rand::random(),
    };

    if let Some(rounds) = args.rounds {
        config.rounds = RoundConfig::fixed(rounds);
    }
    if let Some(min) = args.min_rounds {
        config.rounds.min_rounds = min;
    }
    if let Some(max) = args.max_rounds {
        config.rounds.max_rounds = max;
    }
    config.rounds.validate()?;
    Ok(config)
}

#[cfg(feature = "parallel")]
fn run_parallel(roster: &Roster, config: &TournamentConfig) -> Result<TournamentOutcome> {
    Ok(triad_logic::run_tournament_parallel(roster, config)?)
}

#[cfg(not(feature = "parallel"))]
fn run_parallel(_roster: &Roster, _config: &TournamentConfig) -> Result<TournamentOutcome> {
    anyhow::bail!("--parallel needs triad-arena built with the `parallel` feature")
}

fn list_strategies(roster: &Roster) {
    println!("Available strategies:");
    for entry in roster.entries() {
        println!("  {:18} - {}", entry.name, entry.description);
    }
}

fn print_standings(outcome: &TournamentOutcome) {
    println!("{:>4}  {:<18} {:>10} {:>6} {:>8}", "Rank", "Strategy", "Total", "Seats", "Avg");
    for (place, s) in outcome.standings.iter().enumerate() {
        let avg = if s.seats == 0 { 0.0 } else { s.total / f64::from(s.seats) };
        println!(
            "{:>4}  {:<18} {:>10.3} {:>6} {:>8.3}",
            place + 1,
            s.name,
            s.total,
            s.seats,
            avg
        );
    }
    println!("{} matches played", outcome.matches.len());
}
