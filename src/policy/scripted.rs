//! Scripted, non-learning policy.
//!
//! Reinforce: trade every held set, then put the whole pool on one random
//! owned territory. Attack: up to `attack_attempts` random legal attacks,
//! stopping early when none remain. Fortify: always skip.

use log::debug;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::board::{Phase, PlayerId};
use crate::engine::Game;
use crate::error::MoveError;
use crate::movegen::{find_trade_set, random_attack, random_owned};

use super::{Policy, TurnReport};

/// Tunables for [`ScriptedPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyConfig {
    /// Upper bound on attack exchanges per turn.
    pub attack_attempts: usize,
    /// Trade held sets before placing reinforcements.
    pub trade_cards: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        PolicyConfig { attack_attempts: 10, trade_cards: true }
    }
}

pub struct ScriptedPolicy {
    rng: SmallRng,
    config: PolicyConfig,
}

impl ScriptedPolicy {
    pub fn new(seed: u64) -> Self {
        Self::with_config(PolicyConfig::default(), SmallRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::with_config(PolicyConfig::default(), SmallRng::from_entropy())
    }

    pub fn with_config(config: PolicyConfig, rng: SmallRng) -> Self {
        ScriptedPolicy { rng, config }
    }

    pub fn config(&self) -> PolicyConfig {
        self.config
    }

    fn reinforce(&mut self, game: &mut Game, player: &PlayerId, report: &mut TurnReport) -> Result<(), MoveError> {
        if self.config.trade_cards {
            while let Some(set) = game.state().player(player).and_then(|p| find_trade_set(&p.cards)) {
                game.trade_cards(player, &set)?;
                report.trades += 1;
            }
        }
        let Some(target) = random_owned(game.state(), player, &mut self.rng) else {
            return Ok(());
        };
        let pool = game.state().unplaced_troops;
        if pool > 0 {
            game.reinforce(player, &target, pool)?;
            report.placed = Some((target, pool));
        }
        Ok(())
    }

    fn attack(&mut self, game: &mut Game, player: &PlayerId, report: &mut TurnReport) -> Result<(), MoveError> {
        for _ in 0..self.config.attack_attempts {
            let Some((from, to)) = random_attack(game.state(), game.graph(), player, &mut self.rng) else {
                debug!("{player} has no legal attack left");
                break;
            };
            let result = game.attack(player, &from, &to)?;
            report.attacks.push(result);
            if game.state().is_over() {
                return Ok(());
            }
        }
        game.end_attack_phase(player)
    }
}

impl Policy for ScriptedPolicy {
    fn play_phase(&mut self, game: &mut Game, player: &PlayerId, report: &mut TurnReport) -> Result<(), MoveError> {
        match game.phase() {
            Phase::Setup => Ok(()),
            Phase::Reinforce => self.reinforce(game, player, report),
            Phase::Attack => self.attack(game, player, report),
            Phase::Fortify => {
                report.turn_change = Some(game.skip_fortify(player)?);
                Ok(())
            }
        }
    }
}
