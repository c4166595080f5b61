//! Board representation and game-state types.
//!
//! Contains the territory graph, cards and the draw pile, and the mutable
//! match snapshot.

pub mod card;
pub mod graph;
pub mod state;

pub use card::{is_valid_set, Card, CardId, CardKind, Deck, TRADEABLE_KINDS};
pub use graph::{Continent, GraphBuilder, GraphError, TerritoryGraph, TerritoryId};
pub use state::{GameState, Phase, PlayerId, PlayerState, TerritoryState};
