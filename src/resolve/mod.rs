//! Rules that mutate the match state.
//!
//! Each submodule validates a move against the board before touching it, so
//! a rejected move leaves the state exactly as it was.

pub mod combat;
pub mod fortify;
pub mod phase;
pub mod reinforce;
pub mod trade;

pub use combat::{apply_exchange, validate_attack, AttackResult, Exchange};
pub use fortify::{apply_fortify, validate_fortify};
pub use phase::{eliminate_if_empty, end_turn, next_live_index, opening_phase, settle_winner, TurnChange};
pub use reinforce::{continent_bonus, place_reinforcements, reinforcement_allotment};
pub use trade::{trade_cards, validate_trade, TradeOutcome};
