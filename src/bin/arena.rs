//! Arena CLI.
//!
//! Plays matches between scripted seats and writes one JSON record per
//! match.
//!
//! Usage:
//!   cargo run --release --bin arena -- [OPTIONS]

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use log::{error, info};

use skirmish::arena::{self, ArenaConfig};
use skirmish::board::TerritoryGraph;
use skirmish::config::RulesConfig;

/// Play scripted bot-vs-bot matches
#[derive(Parser, Debug)]
#[command(name = "arena")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of matches to play
    #[arg(long, default_value = "10")]
    games: usize,

    /// Automated seats per match
    #[arg(long, default_value = "3")]
    players: usize,

    /// Turns after which a match is abandoned
    #[arg(long, default_value = "500")]
    max_turns: u32,

    /// Number of parallel threads
    #[arg(long, default_value = "4")]
    threads: usize,

    /// Random seed, 0 for entropy
    #[arg(long, default_value = "0")]
    seed: u64,

    /// JSON map definition (default: built-in map)
    #[arg(long)]
    map: Option<PathBuf>,

    /// JSON rules file
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Output file path (default: stdout)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Suppress progress and summary output
    #[arg(long)]
    quiet: bool,
}

fn config(args: &Args) -> Result<ArenaConfig, Box<dyn std::error::Error>> {
    let graph = match &args.map {
        Some(path) => TerritoryGraph::load(path)?,
        None => TerritoryGraph::standard(),
    };
    let rules = match &args.rules {
        Some(path) => RulesConfig::load(path)?,
        None => RulesConfig::default(),
    };
    Ok(ArenaConfig {
        num_games: args.games,
        players: args.players,
        max_turns: args.max_turns,
        threads: args.threads,
        seed: args.seed,
        quiet: args.quiet,
        graph,
        rules,
    })
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match config(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if !config.quiet {
        info!(
            "Arena: {} games, {} players, max {} turns, {} threads",
            config.num_games, config.players, config.max_turns, config.threads
        );
    }

    let start = Instant::now();
    let records = match arena::run_matches(&config) {
        Ok(records) => records,
        Err(e) => {
            error!("cannot set up match: {e}");
            return ExitCode::FAILURE;
        }
    };

    if !config.quiet {
        info!("Completed {} games in {:.1}s", records.len(), start.elapsed().as_secs_f64());
        arena::print_summary(&records);
    }

    let written = match &args.output {
        Some(path) => File::create(path).and_then(|file| arena::write_jsonl(&records, &mut BufWriter::new(file))),
        None => arena::write_jsonl(&records, &mut BufWriter::new(io::stdout().lock())),
    };
    match written {
        Ok(()) => {
            if let (false, Some(path)) = (config.quiet, &args.output) {
                info!("Wrote {} games to {}", records.len(), path.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("failed to write output: {e}");
            ExitCode::FAILURE
        }
    }
}
