//! Skirmish -- a single territory-conquest game room over stdin/stdout.
//!
//! Reads one JSON command per line from stdin and writes one JSON event per
//! line to stdout. Logs go to stderr. Automated turns run on their own
//! schedule between commands, so stdin is read on a separate thread.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use log::{error, info, warn};

use skirmish::board::TerritoryGraph;
use skirmish::config::RulesConfig;
use skirmish::protocol::{parse_command, Event};
use skirmish::room::{Room, RoomConfig};

/// Skirmish - a territory conquest game room
#[derive(Parser, Debug)]
#[command(name = "skirmish")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON map definition (default: built-in map)
    #[arg(long)]
    map: Option<PathBuf>,

    /// JSON rules file; missing fields keep their defaults
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Delay before each automated turn, in milliseconds
    #[arg(long, default_value = "1000")]
    pacing_ms: u64,

    /// Random seed, 0 for entropy
    #[arg(long, default_value = "0")]
    seed: u64,
}

fn room_config(args: &Args) -> Result<RoomConfig, Box<dyn std::error::Error>> {
    let graph = match &args.map {
        Some(path) => TerritoryGraph::load(path)?,
        None => TerritoryGraph::standard(),
    };
    let rules = match &args.rules {
        Some(path) => RulesConfig::load(path)?,
        None => RulesConfig::default(),
    };
    Ok(RoomConfig { graph, rules, pacing: Duration::from_millis(args.pacing_ms), seed: args.seed })
}

fn emit<W: Write>(out: &mut W, events: &[Event]) -> io::Result<()> {
    for event in events {
        writeln!(out, "{}", event.to_line()?)?;
    }
    out.flush()
}

/// Runs the room loop until stdin closes and no automated turn is pending.
fn run(mut room: Room) -> io::Result<()> {
    let (tx, rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        let mut input = io::stdin().lock();
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match input.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {}
                Err(e) => {
                    error!("cannot read stdin: {e}");
                    break;
                }
            }
            let line = match std::str::from_utf8(&buf) {
                Ok(line) => line.trim_end_matches(['\r', '\n']).to_string(),
                Err(e) => {
                    warn!("skipping input line that is not UTF-8: {e}");
                    continue;
                }
            };
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut input_open = true;

    loop {
        emit(&mut out, &room.run_due(Instant::now()))?;

        let next_due = room.next_due();
        let received = match (input_open, next_due) {
            (true, Some(due)) => rx.recv_timeout(due.saturating_duration_since(Instant::now())),
            (true, None) => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
            (false, Some(due)) => {
                thread::sleep(due.saturating_duration_since(Instant::now()));
                continue;
            }
            (false, None) => break,
        };

        match received {
            Ok(line) => match parse_command(&line) {
                Ok(Some(cmd)) => emit(&mut out, &room.handle(cmd, Instant::now()))?,
                Ok(None) => {}
                Err(e) => warn!("{e}"),
            },
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                info!("input closed");
                input_open = false;
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match room_config(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match run(Room::new(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("output failed: {e}");
            ExitCode::FAILURE
        }
    }
}
