//! Skirmish territory-conquest engine library.
//!
//! Exposes the board representation, rule resolution, move generation,
//! automated policies, and the room protocol for use by integration tests
//! and the binary entry points.

pub mod arena;
pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod movegen;
pub mod policy;
pub mod protocol;
pub mod resolve;
pub mod rng;
pub mod room;
pub mod scheduler;

#[cfg(test)]
mod testing;
