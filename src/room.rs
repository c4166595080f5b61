//! A single game room: lobby, match, automated seats, and pacing.
//!
//! The room is the transport-facing driver around [`Game`]. It turns
//! inbound [`Command`]s into engine calls, reports every outcome as
//! [`Event`]s, and runs automated turns through the [`TurnScheduler`].

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use log::{info, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::board::{Phase, PlayerId, TerritoryGraph};
use crate::config::RulesConfig;
use crate::engine::{Game, Seat};
use crate::error::RoomError;
use crate::policy::{Policy, ScriptedPolicy};
use crate::protocol::{Command, Event};
use crate::rng::SeededRandom;
use crate::scheduler::TurnScheduler;

/// Static inputs for a room.
#[derive(Debug, Clone)]
pub struct RoomConfig {
    pub graph: TerritoryGraph,
    pub rules: RulesConfig,
    /// Delay before an automated turn runs.
    pub pacing: Duration,
    /// Seed for dice, deck, and policies (0 = use entropy).
    pub seed: u64,
}

impl Default for RoomConfig {
    fn default() -> Self {
        RoomConfig {
            graph: TerritoryGraph::standard(),
            rules: RulesConfig::default(),
            pacing: Duration::from_millis(1000),
            seed: 0,
        }
    }
}

pub struct Room {
    config: RoomConfig,
    lobby: Vec<Seat>,
    next_ai: usize,
    game: Option<Game>,
    policies: BTreeMap<PlayerId, Box<dyn Policy>>,
    scheduler: TurnScheduler,
    seeds: SmallRng,
    announced_winner: bool,
}

impl Room {
    pub fn new(config: RoomConfig) -> Self {
        let seeds = if config.seed != 0 { SmallRng::seed_from_u64(config.seed) } else { SmallRng::from_entropy() };
        Room {
            scheduler: TurnScheduler::new(config.pacing),
            config,
            lobby: Vec::new(),
            next_ai: 0,
            game: None,
            policies: BTreeMap::new(),
            seeds,
            announced_winner: false,
        }
    }

    pub fn lobby(&self) -> &[Seat] {
        &self.lobby
    }

    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    /// When the next automated turn falls due.
    pub fn next_due(&self) -> Option<Instant> {
        self.scheduler.next_due()
    }

    /// Applies one command. A refused command yields a single `rejected`
    /// event addressed to its sender and changes nothing.
    pub fn handle(&mut self, cmd: Command, now: Instant) -> Vec<Event> {
        let sender = cmd.sender().clone();
        let mut events = Vec::new();
        if let Err(e) = self.dispatch(cmd, &mut events) {
            warn!("rejected command from {sender}: {e}");
            return vec![Event::Rejected { to: sender, code: e.code(), reason: e.to_string() }];
        }
        self.after_mutation(now, &mut events);
        events
    }

    fn dispatch(&mut self, cmd: Command, events: &mut Vec<Event>) -> Result<(), RoomError> {
        match cmd {
            Command::JoinGame { from, name } => {
                self.require_lobby()?;
                if !self.lobby.iter().any(|s| s.id == from) {
                    info!("{from} joins the lobby");
                    self.lobby.push(Seat { id: from, name, automated: false });
                }
                events.push(self.lobby_update());
            }
            Command::AddAi { .. } => {
                self.require_lobby()?;
                let id = PlayerId::new(format!("AI_{}", self.next_ai));
                self.next_ai += 1;
                info!("{id} joins the lobby");
                self.lobby.push(Seat { id, name: None, automated: true });
                events.push(self.lobby_update());
            }
            Command::StartGame { .. } => {
                self.require_lobby()?;
                self.start(events)?;
            }
            Command::ActionReinforce { from, territory_id, amount } => {
                self.game_mut()?.reinforce(&from, &territory_id, amount)?;
                self.push_update(events);
            }
            Command::ActionAttack { from, from_id, to_id } => {
                let result = self.game_mut()?.attack(&from, &from_id, &to_id)?;
                self.push_update(events);
                events.push(Event::AttackResult(result));
            }
            Command::ActionTrade { from, card_ids } => {
                self.game_mut()?.trade_cards(&from, &card_ids)?;
                self.push_update(events);
            }
            Command::ActionEndPhase { from } => {
                let game = self.game_mut()?;
                match game.phase() {
                    Phase::Fortify => {
                        game.skip_fortify(&from)?;
                    }
                    _ => game.end_attack_phase(&from)?,
                }
                self.push_update(events);
            }
            Command::ActionFortify { from, from_id, to_id, amount } => {
                self.game_mut()?.fortify(&from, &from_id, &to_id, amount)?;
                self.push_update(events);
            }
            Command::Leave { from } => {
                if let Some(pos) = self.lobby.iter().position(|s| s.id == from) {
                    info!("{from} leaves the lobby");
                    self.lobby.remove(pos);
                }
                events.push(self.lobby_update());
            }
        }
        Ok(())
    }

    fn start(&mut self, events: &mut Vec<Event>) -> Result<(), RoomError> {
        let random = Box::new(SeededRandom::new(self.seeds.gen()));
        let game = Game::new(self.lobby.clone(), self.config.graph.clone(), self.config.rules.clone(), random)?;

        self.policies = self
            .lobby
            .iter()
            .filter(|s| s.automated)
            .map(|s| (s.id.clone(), Box::new(ScriptedPolicy::new(self.seeds.gen())) as Box<dyn Policy>))
            .collect();
        self.scheduler.clear();
        self.announced_winner = false;

        info!("match starts with {} seats", self.lobby.len());
        events.push(Event::GameStart(game.state().clone()));
        self.game = Some(game);
        Ok(())
    }

    /// Runs at most one automated turn that is due at `now`. Turns queued
    /// by that step wait for the next call, so the driver can read input
    /// and flush events in between.
    pub fn run_due(&mut self, now: Instant) -> Vec<Event> {
        let mut events = Vec::new();
        while let Some(step) = self.scheduler.pop_due(now) {
            let Some(game) = self.game.as_mut() else {
                break;
            };
            if game.state().is_over() || game.current_player() != &step.player {
                continue;
            }
            let Some(policy) = self.policies.get_mut(&step.player) else {
                warn!("no policy for automated seat {}", step.player);
                continue;
            };

            match policy.take_turn(game, &step.player) {
                Ok(report) => {
                    events.extend(report.attacks.into_iter().map(Event::AttackResult));
                    events.push(Event::GameUpdate(game.state().clone()));
                }
                Err(e) => warn!("automated turn for {} failed: {e}", step.player),
            }

            // A turn that did not pass would be queued again forever.
            if !game.state().is_over() && game.current_player() == &step.player {
                warn!("automated turn for {} did not advance; stalling", step.player);
                break;
            }
            self.after_mutation(now, &mut events);
            break;
        }
        events
    }

    fn after_mutation(&mut self, now: Instant, events: &mut Vec<Event>) {
        let Some(game) = self.game.as_ref() else {
            return;
        };
        if let Some(winner) = game.winner() {
            if !self.announced_winner {
                self.announced_winner = true;
                events.push(Event::GameOver { winner: winner.clone() });
            }
            return;
        }
        self.scheduler.observe(game, now);
    }

    fn require_lobby(&self) -> Result<(), RoomError> {
        match self.game {
            Some(_) => Err(RoomError::GameInProgress),
            None => Ok(()),
        }
    }

    fn game_mut(&mut self) -> Result<&mut Game, RoomError> {
        self.game.as_mut().ok_or(RoomError::NoGame)
    }

    fn push_update(&self, events: &mut Vec<Event>) {
        if let Some(game) = &self.game {
            events.push(Event::GameUpdate(game.state().clone()));
        }
    }

    fn lobby_update(&self) -> Event {
        Event::LobbyUpdate { players: self.lobby.clone() }
    }
}
