//! Automated-turn scheduling.
//!
//! After every accepted mutation the caller shows the scheduler the match.
//! If an automated seat now holds the turn, exactly one step is queued for
//! it, due after the pacing delay. The caller pops due steps and runs the
//! seat's policy; game logic never waits on a timer.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use log::debug;

use crate::board::PlayerId;
use crate::engine::Game;

/// One pending automated turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutomatedTurn {
    pub player: PlayerId,
    pub due: Instant,
}

#[derive(Debug, Default)]
pub struct TurnScheduler {
    queue: VecDeque<AutomatedTurn>,
    pacing: Duration,
}

impl TurnScheduler {
    /// A zero pacing makes every step due immediately.
    pub fn new(pacing: Duration) -> Self {
        TurnScheduler { queue: VecDeque::new(), pacing }
    }

    pub fn pacing(&self) -> Duration {
        self.pacing
    }

    /// Queues a step for the current player if they are automated and no
    /// step is already pending for them. Returns true if a step was queued.
    pub fn observe(&mut self, game: &Game, now: Instant) -> bool {
        if !game.awaiting_automated() {
            return false;
        }
        let player = game.current_player();
        if self.queue.iter().any(|step| &step.player == player) {
            return false;
        }
        debug!("scheduling automated turn for {player}");
        self.queue.push_back(AutomatedTurn { player: player.clone(), due: now + self.pacing });
        true
    }

    /// Removes and returns the oldest step if it is due.
    pub fn pop_due(&mut self, now: Instant) -> Option<AutomatedTurn> {
        if self.queue.front().is_some_and(|step| step.due <= now) {
            self.queue.pop_front()
        } else {
            None
        }
    }

    /// When the next step falls due, if any is queued.
    pub fn next_due(&self) -> Option<Instant> {
        self.queue.front().map(|step| step.due)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
