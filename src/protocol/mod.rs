//! JSON-lines room protocol.
//!
//! Clients send [`Command`]s, one JSON object per line; the room answers
//! with [`Event`]s in the same framing. Field names on the wire are
//! camelCase to match the state snapshot.

pub mod command;
pub mod event;

pub use command::{parse_command, Command, ParseError};
pub use event::Event;
