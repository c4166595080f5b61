//! Per-match engine instance.
//!
//! Holds the authoritative state, the hidden deck, the territory graph, the
//! rules, and the random source for one match. Every public operation first
//! checks that the match is live, that the caller is the current player, and
//! that the turn is in the required phase; then it validates the move and
//! mutates. A rejected operation returns the reason and changes nothing.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;
use serde::Serialize;

use crate::board::{
    CardId, Deck, GameState, Phase, PlayerId, PlayerState, TerritoryGraph, TerritoryId, TerritoryState,
};
use crate::config::RulesConfig;
use crate::error::{MoveError, SetupError};
use crate::resolve::{
    self, apply_exchange, apply_fortify, eliminate_if_empty, end_turn, place_reinforcements,
    reinforcement_allotment, settle_winner, validate_attack, validate_fortify, AttackResult,
    TradeOutcome, TurnChange,
};
use crate::rng::RandomSource;

/// Player colors, assigned by seat.
const COLORS: [&str; 4] = ["#ff4444", "#4444ff", "#44ff44", "#ffff44"];

/// One seat at the table, as supplied by the lobby.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Seat {
    pub id: PlayerId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "isAi")]
    pub automated: bool,
}

impl Seat {
    pub fn human(id: &str) -> Self {
        Seat { id: PlayerId::new(id), name: None, automated: false }
    }

    pub fn automated(id: &str) -> Self {
        Seat { id: PlayerId::new(id), name: None, automated: true }
    }
}

/// The rules engine for one match.
pub struct Game {
    state: GameState,
    deck: Deck,
    graph: TerritoryGraph,
    rules: RulesConfig,
    random: Box<dyn RandomSource>,
}

impl Game {
    /// Creates a match with territories dealt round-robin in id order.
    pub fn new(
        seats: Vec<Seat>,
        graph: TerritoryGraph,
        rules: RulesConfig,
        random: Box<dyn RandomSource>,
    ) -> Result<Self, SetupError> {
        check_seats(&seats, &graph)?;
        let assignment = graph
            .territories()
            .enumerate()
            .map(|(i, t)| (t.clone(), (seats[i % seats.len()].id.clone(), rules.initial_troops.max(1))))
            .collect();
        Self::with_distribution(seats, graph, rules, random, assignment)
    }

    /// Creates a match from an explicit `territory -> (owner, troops)` map.
    pub fn with_distribution(
        seats: Vec<Seat>,
        graph: TerritoryGraph,
        rules: RulesConfig,
        mut random: Box<dyn RandomSource>,
        assignment: BTreeMap<TerritoryId, (PlayerId, u32)>,
    ) -> Result<Self, SetupError> {
        check_seats(&seats, &graph)?;
        if let Some(t) = assignment.keys().find(|t| !graph.contains(t)) {
            return Err(SetupError::UnknownTerritory(t.clone()));
        }

        let mut territories = BTreeMap::new();
        for t in graph.territories() {
            let (owner, troops) = assignment.get(t).ok_or_else(|| SetupError::Unassigned(t.clone()))?;
            if !seats.iter().any(|s| &s.id == owner) {
                return Err(SetupError::UnknownOwner(owner.clone()));
            }
            if *troops == 0 {
                return Err(SetupError::EmptyGarrison(t.clone()));
            }
            territories.insert(t.clone(), TerritoryState { owner: Some(owner.clone()), troops: *troops });
        }

        let players = seats
            .iter()
            .enumerate()
            .map(|(i, seat)| {
                let name = seat.name.clone().unwrap_or_else(|| {
                    if seat.automated {
                        format!("AI Bot {i}")
                    } else {
                        format!("Player {}", i + 1)
                    }
                });
                let player = PlayerState {
                    id: seat.id.clone(),
                    name,
                    color: COLORS[i % COLORS.len()].to_string(),
                    cards: Vec::new(),
                    alive: true,
                    automated: seat.automated,
                };
                (seat.id.clone(), player)
            })
            .collect();

        let deck = Deck::standard(&graph, rules.wildcards, random.as_mut());
        let mut state = GameState {
            territories,
            players,
            player_order: seats.into_iter().map(|s| s.id).collect(),
            current_player_index: 0,
            phase: Phase::Reinforce,
            unplaced_troops: 0,
            conquered_this_turn: false,
            winner: None,
            deck_size: deck.len(),
        };

        // A seat dealt no territory is out before the first turn.
        let seated: Vec<PlayerId> = state.player_order.clone();
        for p in &seated {
            eliminate_if_empty(&mut state, p);
        }
        if !state.players.get(state.current_player()).is_some_and(|p| p.alive) {
            state.current_player_index = resolve::next_live_index(&state);
        }
        settle_winner(&mut state);
        let first = state.current_player().clone();
        state.unplaced_troops = reinforcement_allotment(&state, &graph, &rules, &first);
        state.phase = resolve::opening_phase(state.unplaced_troops);

        Ok(Game { state, deck, graph, rules, random })
    }

    /// The authoritative snapshot observers are sent.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn graph(&self) -> &TerritoryGraph {
        &self.graph
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    pub fn current_player(&self) -> &PlayerId {
        self.state.current_player()
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn winner(&self) -> Option<&PlayerId> {
        self.state.winner.as_ref()
    }

    /// True if it is an automated seat's turn in a live match.
    pub fn awaiting_automated(&self) -> bool {
        !self.state.is_over()
            && self.state.player(self.current_player()).is_some_and(|p| p.automated && p.alive)
    }

    /// Checks the match is live, `player` holds the turn, and the phase matches.
    fn require_turn(&self, player: &PlayerId, phase: Phase) -> Result<(), MoveError> {
        if self.state.is_over() {
            return Err(MoveError::GameOver);
        }
        if !self.state.players.contains_key(player) {
            return Err(MoveError::UnknownPlayer(player.clone()));
        }
        if self.state.current_player() != player {
            return Err(MoveError::NotYourTurn(player.clone()));
        }
        if self.state.phase != phase {
            return Err(MoveError::WrongPhase { expected: phase, actual: self.state.phase });
        }
        Ok(())
    }

    /// Places `amount` unplaced troops on an owned territory.
    pub fn reinforce(&mut self, player: &PlayerId, territory: &TerritoryId, amount: u32) -> Result<(), MoveError> {
        self.require_turn(player, Phase::Reinforce)?;
        place_reinforcements(&mut self.state, player, territory, amount)?;
        debug!("{player} reinforces {territory} with {amount}");
        Ok(())
    }

    /// Trades three cards for reinforcements.
    pub fn trade_cards(&mut self, player: &PlayerId, card_ids: &[CardId]) -> Result<TradeOutcome, MoveError> {
        self.require_turn(player, Phase::Reinforce)?;
        let outcome = resolve::trade_cards(
            &mut self.state,
            &mut self.deck,
            &self.rules,
            self.random.as_mut(),
            player,
            card_ids,
        )?;
        debug!("{player} trades {card_ids:?} for {} troops", outcome.pool_bonus);
        Ok(outcome)
    }

    /// Resolves one attack exchange from `from` into `to`.
    pub fn attack(&mut self, player: &PlayerId, from: &TerritoryId, to: &TerritoryId) -> Result<AttackResult, MoveError> {
        self.require_turn(player, Phase::Attack)?;
        validate_attack(&self.state, &self.graph, player, from, to)?;

        let attacker_die = self.random.roll_die();
        let defender_die = self.random.roll_die();
        let exchange = apply_exchange(&mut self.state, player, from, to, attacker_die, defender_die);

        let mut eliminated = None;
        if exchange.conquered {
            if let Some(defender) = &exchange.defender {
                if eliminate_if_empty(&mut self.state, defender) {
                    eliminated = Some(defender.clone());
                }
            }
            settle_winner(&mut self.state);
        }
        debug!(
            "{player} attacks {to} from {from}: {attacker_die} vs {defender_die}{}",
            if exchange.conquered { ", conquered" } else { "" }
        );

        Ok(AttackResult {
            attacker: player.clone(),
            from: from.clone(),
            to: to.clone(),
            attacker_die,
            defender_die,
            conquered: exchange.conquered,
            eliminated,
        })
    }

    /// Ends the attack phase and moves to fortify.
    pub fn end_attack_phase(&mut self, player: &PlayerId) -> Result<(), MoveError> {
        self.require_turn(player, Phase::Attack)?;
        self.state.phase = Phase::Fortify;
        debug!("{player} ends attacks");
        Ok(())
    }

    /// Moves troops between owned territories and ends the turn.
    pub fn fortify(
        &mut self,
        player: &PlayerId,
        from: &TerritoryId,
        to: &TerritoryId,
        amount: u32,
    ) -> Result<TurnChange, MoveError> {
        self.require_turn(player, Phase::Fortify)?;
        validate_fortify(&self.state, &self.graph, self.rules.fortify, player, from, to, amount)?;
        apply_fortify(&mut self.state, from, to, amount);
        debug!("{player} fortifies {to} from {from} with {amount}");
        Ok(self.finish_turn())
    }

    /// Ends the turn without moving troops.
    pub fn skip_fortify(&mut self, player: &PlayerId) -> Result<TurnChange, MoveError> {
        self.require_turn(player, Phase::Fortify)?;
        Ok(self.finish_turn())
    }

    fn finish_turn(&mut self) -> TurnChange {
        end_turn(&mut self.state, &mut self.deck, &self.graph, &self.rules)
    }
}

fn check_seats(seats: &[Seat], graph: &TerritoryGraph) -> Result<(), SetupError> {
    if graph.is_empty() {
        return Err(SetupError::EmptyGraph);
    }
    if seats.len() < 2 {
        return Err(SetupError::NotEnoughPlayers(seats.len()));
    }
    if seats.len() > graph.len() {
        return Err(SetupError::TooManyPlayers { players: seats.len(), territories: graph.len() });
    }
    let mut seen = BTreeSet::new();
    for s in seats {
        if !seen.insert(&s.id) {
            return Err(SetupError::DuplicateSeat(s.id.clone()));
        }
    }
    Ok(())
}
