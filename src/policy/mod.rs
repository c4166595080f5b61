//! Decision policies for automated seats.
//!
//! A policy drives a seat through the same `Game` operations a human would
//! call. It never reaches into the state directly.

pub mod scripted;

use crate::board::{PlayerId, TerritoryId};
use crate::engine::Game;
use crate::error::MoveError;
use crate::resolve::{AttackResult, TurnChange};

pub use scripted::{PolicyConfig, ScriptedPolicy};

/// Everything a policy did during one turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnReport {
    /// Number of card sets traded in.
    pub trades: u32,
    /// Where reinforcements went, and how many.
    pub placed: Option<(TerritoryId, u32)>,
    pub attacks: Vec<AttackResult>,
    /// Set once the turn has passed to the next player.
    pub turn_change: Option<TurnChange>,
}

impl TurnReport {
    pub fn conquests(&self) -> usize {
        self.attacks.iter().filter(|a| a.conquered).count()
    }
}

/// A decision-maker for one automated seat.
pub trait Policy: Send {
    /// Acts on the current phase for `player`, recording what it did.
    fn play_phase(&mut self, game: &mut Game, player: &PlayerId, report: &mut TurnReport) -> Result<(), MoveError>;

    /// Plays phases until the turn passes or the match ends.
    ///
    /// Each phase is visited at most once, so a policy that fails to advance
    /// cannot loop forever.
    fn take_turn(&mut self, game: &mut Game, player: &PlayerId) -> Result<TurnReport, MoveError> {
        let mut report = TurnReport::default();
        for _ in 0..3 {
            if game.state().is_over() || game.current_player() != player || report.turn_change.is_some() {
                break;
            }
            self.play_phase(game, player, &mut report)?;
        }
        Ok(report)
    }
}
