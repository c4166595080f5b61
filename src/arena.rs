//! Bot-vs-bot match generation.
//!
//! Plays complete matches between scripted seats, with no pacing, and
//! records how each one went. Matches run concurrently on a rayon pool when
//! more than one thread is configured.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use log::{info, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::board::{PlayerId, TerritoryGraph};
use crate::config::RulesConfig;
use crate::engine::{Game, Seat};
use crate::error::SetupError;
use crate::policy::{Policy, ScriptedPolicy};
use crate::rng::SeededRandom;

/// Configuration for a batch of arena matches.
#[derive(Debug, Clone)]
pub struct ArenaConfig {
    /// Number of matches to play.
    pub num_games: usize,
    /// Automated seats per match.
    pub players: usize,
    /// Turns after which an undecided match is abandoned.
    pub max_turns: u32,
    /// Number of parallel threads for concurrent matches.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Suppress per-match progress output.
    pub quiet: bool,
    pub graph: TerritoryGraph,
    pub rules: RulesConfig,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        ArenaConfig {
            num_games: 10,
            players: 3,
            max_turns: 500,
            threads: 4,
            seed: 0,
            quiet: false,
            graph: TerritoryGraph::standard(),
            rules: RulesConfig::default(),
        }
    }
}

/// Per-seat tallies for one match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatRecord {
    pub player: PlayerId,
    pub conquests: u32,
    pub cards_traded: u32,
    /// Turn on which the seat was eliminated, if it was.
    pub eliminated_on: Option<u32>,
}

impl SeatRecord {
    fn new(player: PlayerId) -> Self {
        SeatRecord { player, conquests: 0, cards_traded: 0, eliminated_on: None }
    }
}

/// The outcome of one arena match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRecord {
    pub game_id: usize,
    pub seed: u64,
    /// None if the turn limit was reached first.
    pub winner: Option<PlayerId>,
    pub turns: u32,
    pub attacks: u32,
    pub seats: Vec<SeatRecord>,
}

impl MatchRecord {
    pub fn conquests(&self) -> u32 {
        self.seats.iter().map(|s| s.conquests).sum()
    }

    pub fn cards_traded(&self) -> u32 {
        self.seats.iter().map(|s| s.cards_traded).sum()
    }
}

/// Plays a single match between scripted seats, all seeded from `seed`.
pub fn play_match(config: &ArenaConfig, game_id: usize, seed: u64) -> Result<MatchRecord, SetupError> {
    let mut seeds = SmallRng::seed_from_u64(seed);
    let seats: Vec<Seat> = (0..config.players).map(|i| Seat::automated(&format!("AI_{i}"))).collect();
    let mut policies: Vec<ScriptedPolicy> = seats.iter().map(|_| ScriptedPolicy::new(seeds.gen())).collect();
    let mut records: Vec<SeatRecord> =
        seats.iter().map(|s| SeatRecord::new(s.id.clone())).collect();

    let mut game = Game::new(
        seats,
        config.graph.clone(),
        config.rules.clone(),
        Box::new(SeededRandom::new(seeds.gen())),
    )?;

    let mut turns = 0;
    let mut attacks = 0;
    while !game.state().is_over() && turns < config.max_turns {
        turns += 1;
        let player = game.current_player().clone();
        let seat = game.state().player_order.iter().position(|p| *p == player).unwrap_or(0);

        let report = match policies[seat].take_turn(&mut game, &player) {
            Ok(report) => report,
            Err(e) => {
                warn!("game {game_id}: {player} stalled: {e}");
                break;
            }
        };
        attacks += report.attacks.len() as u32;
        records[seat].conquests += report.conquests() as u32;
        records[seat].cards_traded += report.trades * 3;
        for eliminated in report.attacks.iter().filter_map(|a| a.eliminated.as_ref()) {
            if let Some(rec) = records.iter_mut().find(|r| &r.player == eliminated) {
                rec.eliminated_on = Some(turns);
            }
        }
        if report.turn_change.is_none() && !game.state().is_over() {
            warn!("game {game_id}: {player} did not finish their turn");
            break;
        }
    }

    Ok(MatchRecord { game_id, seed, winner: game.winner().cloned(), turns, attacks, seats: records })
}

fn match_seed(config: &ArenaConfig, i: usize) -> u64 {
    if config.seed != 0 {
        config.seed.wrapping_add(i as u64)
    } else {
        SmallRng::from_entropy().gen()
    }
}

/// Runs all configured matches and returns their records in game order.
///
/// When `config.threads > 1`, matches are played concurrently using rayon.
pub fn run_matches(config: &ArenaConfig) -> Result<Vec<MatchRecord>, SetupError> {
    let completed = AtomicUsize::new(0);
    let play = |i: usize| -> Result<MatchRecord, SetupError> {
        let start = Instant::now();
        let record = play_match(config, i, match_seed(config, i))?;
        if !config.quiet {
            let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
            let outcome = match &record.winner {
                Some(w) => format!("{w} wins"),
                None => "undecided".to_string(),
            };
            info!(
                "game {}/{}: {} after {} turns ({:.2}s)",
                n,
                config.num_games,
                outcome,
                record.turns,
                start.elapsed().as_secs_f64()
            );
        }
        Ok(record)
    };

    if config.threads <= 1 {
        return (0..config.num_games).map(play).collect();
    }

    use rayon::prelude::*;
    match rayon::ThreadPoolBuilder::new().num_threads(config.threads).build() {
        Ok(pool) => pool.install(|| (0..config.num_games).into_par_iter().map(play).collect()),
        Err(e) => {
            warn!("failed to build thread pool, running sequentially: {e}");
            (0..config.num_games).map(play).collect()
        }
    }
}

/// Writes match records as JSONL (one JSON object per match, one per line).
pub fn write_jsonl<W: Write>(records: &[MatchRecord], out: &mut W) -> std::io::Result<()> {
    for record in records {
        serde_json::to_writer(&mut *out, record)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Logs a summary of arena results.
pub fn print_summary(records: &[MatchRecord]) {
    let total = records.len().max(1) as f64;
    let decided = records.iter().filter(|r| r.winner.is_some()).count();
    let turns: u32 = records.iter().map(|r| r.turns).sum();
    let conquests: u32 = records.iter().map(MatchRecord::conquests).sum();
    let traded: u32 = records.iter().map(MatchRecord::cards_traded).sum();

    info!("=== Arena Summary ===");
    info!("Games: {} ({} decided, {} undecided)", records.len(), decided, records.len() - decided);
    info!("Avg turns/game: {:.1}", turns as f64 / total);
    info!("Avg conquests/game: {:.1}", conquests as f64 / total);
    info!("Avg cards traded/game: {:.1}", traded as f64 / total);

    let mut wins: Vec<(&PlayerId, usize)> = Vec::new();
    for w in records.iter().filter_map(|r| r.winner.as_ref()) {
        match wins.iter_mut().find(|(p, _)| *p == w) {
            Some((_, n)) => *n += 1,
            None => wins.push((w, 1)),
        }
    }
    wins.sort();
    for (player, n) in wins {
        info!("  {:>6}: {} ({:.1}%)", player.as_str(), n, 100.0 * n as f64 / total);
    }
}
