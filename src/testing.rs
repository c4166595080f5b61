//! Shared fixtures for unit tests.

use std::collections::BTreeMap;

use crate::board::{GameState, Phase, PlayerId, PlayerState, TerritoryGraph, TerritoryId, TerritoryState};

/// Six territories in two triangles joined by t3-t4:
/// t1-t2-t3 / t4-t5-t6.
pub fn six_territory_graph() -> TerritoryGraph {
    TerritoryGraph::from_adjacency(&[
        ("t1", &["t2", "t3"]),
        ("t2", &["t1", "t3"]),
        ("t3", &["t1", "t2", "t4"]),
        ("t4", &["t3", "t5", "t6"]),
        ("t5", &["t4", "t6"]),
        ("t6", &["t4", "t5"]),
    ])
    .expect("fixture graph is valid")
}

/// Player `a` holds t1-t3, player `b` holds t4-t6, 3 troops each; `a` to
/// reinforce with 3.
pub fn duel_state() -> (GameState, TerritoryGraph) {
    let graph = six_territory_graph();
    let a = PlayerId::new("a");
    let b = PlayerId::new("b");

    let territories: BTreeMap<TerritoryId, TerritoryState> = graph
        .territories()
        .map(|t| {
            let owner = if ["t1", "t2", "t3"].contains(&t.as_str()) { a.clone() } else { b.clone() };
            (t.clone(), TerritoryState { owner: Some(owner), troops: 3 })
        })
        .collect();

    let players = [a.clone(), b.clone()]
        .into_iter()
        .map(|id| {
            let p = PlayerState {
                id: id.clone(),
                name: id.0.to_uppercase(),
                color: "#ffffff".into(),
                cards: Vec::new(),
                alive: true,
                automated: false,
            };
            (id, p)
        })
        .collect();

    let state = GameState {
        territories,
        players,
        player_order: vec![a, b],
        current_player_index: 0,
        phase: Phase::Reinforce,
        unplaced_troops: 3,
        conquered_this_turn: false,
        winner: None,
        deck_size: 0,
    };
    (state, graph)
}
