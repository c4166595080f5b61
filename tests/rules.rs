//! Rules scenarios run through the public library API.

use std::collections::BTreeMap;

use skirmish::board::{Card, CardId, CardKind, Deck, GameState, Phase, PlayerId, TerritoryGraph, TerritoryId};
use skirmish::config::RulesConfig;
use skirmish::engine::{Game, Seat};
use skirmish::error::MoveError;
use skirmish::policy::{Policy, ScriptedPolicy, TurnReport};
use skirmish::resolve::{reinforcement_allotment, trade_cards};
use skirmish::rng::{ScriptedRolls, SeededRandom};

fn pid(s: &str) -> PlayerId {
    PlayerId::new(s)
}

fn tid(s: &str) -> TerritoryId {
    TerritoryId::new(s)
}

/// A ring of six territories: a holds t1-t3, b holds t4-t6.
fn ring() -> TerritoryGraph {
    TerritoryGraph::from_adjacency(&[
        ("t1", &["t2", "t6"]),
        ("t2", &["t1", "t3"]),
        ("t3", &["t2", "t4"]),
        ("t4", &["t3", "t5"]),
        ("t5", &["t4", "t6"]),
        ("t6", &["t5", "t1"]),
    ])
    .unwrap()
}

fn duel_with(rolls: &[(u8, u8)], troops: &[(&str, &str, u32)]) -> Game {
    let assignment: BTreeMap<TerritoryId, (PlayerId, u32)> =
        troops.iter().map(|&(t, p, n)| (tid(t), (pid(p), n))).collect();
    Game::with_distribution(
        vec![Seat::human("a"), Seat::human("b")],
        ring(),
        RulesConfig::default(),
        Box::new(ScriptedRolls::exchanges(rolls)),
        assignment,
    )
    .unwrap()
}

const EVEN: &[(&str, &str, u32)] =
    &[("t1", "a", 3), ("t2", "a", 3), ("t3", "a", 3), ("t4", "b", 3), ("t5", "b", 3), ("t6", "b", 3)];

fn troops(game: &Game, t: &str) -> u32 {
    game.state().territory(&tid(t)).unwrap().troops
}

fn owner(game: &Game, t: &str) -> Option<PlayerId> {
    game.state().territory(&tid(t)).unwrap().owner.clone()
}

#[test]
fn reinforce_whole_pool() {
    let mut game = duel_with(&[], EVEN);
    let a = pid("a");
    let pool = game.state().unplaced_troops;
    assert_eq!(pool, 3);
    game.reinforce(&a, &tid("t2"), pool).unwrap();
    assert_eq!(troops(&game, "t2"), 6);
    assert_eq!(game.state().unplaced_troops, 0);
    assert_eq!(game.phase(), Phase::Attack);
}

#[test]
fn partial_reinforcement_stays_in_reinforce() {
    let mut game = duel_with(&[], EVEN);
    let a = pid("a");
    game.reinforce(&a, &tid("t1"), 1).unwrap();
    assert_eq!(game.phase(), Phase::Reinforce);
    assert_eq!(game.reinforce(&a, &tid("t1"), 5), Err(MoveError::NotEnoughUnplaced { requested: 5, available: 2 }));
    assert_eq!(game.reinforce(&a, &tid("t4"), 1), Err(MoveError::NotOwner(tid("t4"))));
    assert_eq!(game.reinforce(&a, &tid("t1"), 0), Err(MoveError::InvalidAmount(0)));
    game.reinforce(&a, &tid("t1"), 2).unwrap();
    assert_eq!(game.phase(), Phase::Attack);
}

#[test]
fn six_against_one_conquers() {
    let layout = &[("t1", "a", 3), ("t2", "a", 3), ("t3", "a", 4), ("t4", "b", 1), ("t5", "b", 3), ("t6", "b", 3)];
    let mut game = duel_with(&[(6, 1)], layout);
    let a = pid("a");
    game.reinforce(&a, &tid("t1"), 3).unwrap();

    let r = game.attack(&a, &tid("t3"), &tid("t4")).unwrap();
    assert_eq!((r.attacker_die, r.defender_die), (6, 1));
    assert!(r.conquered);
    assert_eq!(owner(&game, "t4"), Some(a.clone()));
    assert_eq!(troops(&game, "t4"), 1);
    assert_eq!(troops(&game, "t3"), 3);
    assert!(game.state().conquered_this_turn);
}

#[test]
fn two_against_five_loses_one() {
    let mut game = duel_with(&[(2, 5)], EVEN);
    let a = pid("a");
    game.reinforce(&a, &tid("t3"), 3).unwrap();
    let r = game.attack(&a, &tid("t3"), &tid("t4")).unwrap();
    assert!(!r.conquered);
    assert_eq!(troops(&game, "t3"), 5);
    assert_eq!(troops(&game, "t4"), 3);
    assert_eq!(owner(&game, "t4"), Some(pid("b")));
}

#[test]
fn ties_go_to_the_defender() {
    let mut game = duel_with(&[(4, 4)], EVEN);
    let a = pid("a");
    game.reinforce(&a, &tid("t3"), 3).unwrap();
    game.attack(&a, &tid("t3"), &tid("t4")).unwrap();
    assert_eq!(troops(&game, "t3"), 5);
    assert_eq!(troops(&game, "t4"), 3);
}

#[test]
fn illegal_attacks_change_nothing() {
    let layout = &[("t1", "a", 1), ("t2", "a", 3), ("t3", "a", 3), ("t4", "b", 3), ("t5", "b", 3), ("t6", "b", 3)];
    let mut game = duel_with(&[], layout);
    let a = pid("a");
    game.reinforce(&a, &tid("t2"), 3).unwrap();
    let before = game.state().clone();

    assert_eq!(game.attack(&a, &tid("t1"), &tid("t6")), Err(MoveError::InsufficientTroops { territory: tid("t1"), troops: 1 }));
    assert_eq!(game.attack(&a, &tid("t2"), &tid("t5")), Err(MoveError::NotAdjacent { from: tid("t2"), to: tid("t5") }));
    assert_eq!(game.attack(&a, &tid("t2"), &tid("t3")), Err(MoveError::OwnTerritory(tid("t3"))));
    assert_eq!(game.attack(&a, &tid("t4"), &tid("t5")), Err(MoveError::NotOwner(tid("t4"))));
    assert_eq!(game.attack(&pid("b"), &tid("t4"), &tid("t3")), Err(MoveError::NotYourTurn(pid("b"))));
    assert_eq!(game.state(), &before);
}

#[test]
fn each_exchange_costs_exactly_one_troop() {
    let mut game = Game::new(
        vec![Seat::human("a"), Seat::human("b")],
        ring(),
        RulesConfig::default(),
        Box::new(SeededRandom::new(17)),
    )
    .unwrap();
    let a = pid("a");
    // Round-robin: a holds t1, t3, t5.
    game.reinforce(&a, &tid("t3"), 3).unwrap();
    while troops(&game, "t3") >= 2 && owner(&game, "t4") == Some(pid("b")) {
        let before_src = troops(&game, "t3");
        let before_dst = troops(&game, "t4");
        let r = game.attack(&a, &tid("t3"), &tid("t4")).unwrap();
        let src_lost = before_src - troops(&game, "t3");
        if r.conquered {
            assert_eq!(before_dst, 1);
            assert_eq!(troops(&game, "t4"), 1);
            assert_eq!(src_lost, 1);
        } else if r.attacker_die > r.defender_die {
            assert_eq!((src_lost, before_dst - troops(&game, "t4")), (0, 1));
        } else {
            assert_eq!((src_lost, before_dst - troops(&game, "t4")), (1, 0));
        }
        assert!(game.state().territories.values().all(|t| t.owner.is_none() || t.troops >= 1));
    }
}

#[test]
fn phases_follow_the_turn_order() {
    let mut game = duel_with(&[], EVEN);
    let (a, b) = (pid("a"), pid("b"));
    assert!(matches!(game.end_attack_phase(&a), Err(MoveError::WrongPhase { .. })));
    game.reinforce(&a, &tid("t1"), 3).unwrap();
    assert!(matches!(game.fortify(&a, &tid("t1"), &tid("t2"), 1), Err(MoveError::WrongPhase { .. })));
    game.end_attack_phase(&a).unwrap();
    assert!(matches!(game.reinforce(&a, &tid("t1"), 1), Err(MoveError::WrongPhase { .. })));
    let change = game.skip_fortify(&a).unwrap();
    assert_eq!((change.previous, change.next), (a.clone(), b.clone()));
    assert_eq!(game.phase(), Phase::Reinforce);
    assert_eq!(game.state().unplaced_troops, 3);
    assert_eq!(game.reinforce(&a, &tid("t1"), 1), Err(MoveError::NotYourTurn(a)));
}

#[test]
fn fortify_must_leave_one_behind() {
    let mut game = duel_with(&[], EVEN);
    let a = pid("a");
    game.reinforce(&a, &tid("t1"), 3).unwrap();
    game.end_attack_phase(&a).unwrap();
    let before = game.state().clone();
    assert_eq!(
        game.fortify(&a, &tid("t1"), &tid("t2"), 6),
        Err(MoveError::InsufficientTroops { territory: tid("t1"), troops: 6 })
    );
    assert_eq!(game.state(), &before);
    game.fortify(&a, &tid("t1"), &tid("t2"), 5).unwrap();
    assert_eq!(troops(&game, "t1"), 1);
    assert_eq!(troops(&game, "t2"), 8);
}

#[test]
fn fortify_follows_owned_paths() {
    let mut game = duel_with(&[], EVEN);
    let a = pid("a");
    game.reinforce(&a, &tid("t1"), 3).unwrap();
    game.end_attack_phase(&a).unwrap();
    // t1 reaches t3 through t2; t4 belongs to b.
    assert_eq!(game.fortify(&a, &tid("t1"), &tid("t4"), 1), Err(MoveError::NotOwner(tid("t4"))));
    game.fortify(&a, &tid("t1"), &tid("t3"), 2).unwrap();
    assert_eq!(troops(&game, "t3"), 5);
}

#[test]
fn adjacent_only_fortify_rejects_multi_hop() {
    let assignment: BTreeMap<TerritoryId, (PlayerId, u32)> =
        EVEN.iter().map(|&(t, p, n)| (tid(t), (pid(p), n))).collect();
    let rules = RulesConfig { fortify: skirmish::config::FortifyReach::Adjacent, ..RulesConfig::default() };
    let mut game = Game::with_distribution(
        vec![Seat::human("a"), Seat::human("b")],
        ring(),
        rules,
        Box::new(SeededRandom::new(1)),
        assignment,
    )
    .unwrap();
    let a = pid("a");
    game.reinforce(&a, &tid("t1"), 3).unwrap();
    game.end_attack_phase(&a).unwrap();
    assert_eq!(game.fortify(&a, &tid("t1"), &tid("t3"), 1), Err(MoveError::NotAdjacent { from: tid("t1"), to: tid("t3") }));
}

fn owned_state(count: usize) -> (GameState, TerritoryGraph) {
    let ids: Vec<String> = (0..count + 1).map(|i| format!("t{i:02}")).collect();
    let mut builder = TerritoryGraph::builder();
    for id in &ids {
        builder = builder.territory(id, id, None);
    }
    let graph = builder.build().unwrap();
    let a = pid("a");
    let b = pid("b");
    let territories = ids
        .iter()
        .enumerate()
        .map(|(i, id)| {
            let who = if i < count { a.clone() } else { b.clone() };
            (tid(id), skirmish::board::TerritoryState { owner: Some(who), troops: 1 })
        })
        .collect();
    let state = GameState {
        territories,
        players: BTreeMap::new(),
        player_order: vec![a, b],
        current_player_index: 0,
        phase: Phase::Reinforce,
        unplaced_troops: 0,
        conquered_this_turn: false,
        winner: None,
        deck_size: 0,
    };
    (state, graph)
}

#[test]
fn allotment_is_max_of_three_and_a_third() {
    let rules = RulesConfig::default();
    for count in [0usize, 1, 3, 8, 9, 11, 12, 20, 42] {
        let (state, graph) = owned_state(count);
        let expected = std::cmp::max(3, (count / 3) as u32);
        assert_eq!(reinforcement_allotment(&state, &graph, &rules, &pid("a")), expected, "{count} territories");
    }
}

#[test]
fn trading_three_infantry() {
    let (mut state, _) = owned_state(3);
    let a = pid("a");
    let infantry: Vec<Card> =
        (0..3).map(|i| Card { id: CardId(i), kind: CardKind::Infantry, territory_id: None }).collect();
    let rest: Vec<Card> =
        (3..8).map(|i| Card { id: CardId(i), kind: CardKind::Cavalry, territory_id: None }).collect();
    let mut deck = Deck::from_cards(rest);
    let deck_before_award = deck.len() + infantry.len();
    state.players.insert(
        a.clone(),
        skirmish::board::PlayerState {
            id: a.clone(),
            name: "A".into(),
            color: "#ff4444".into(),
            cards: infantry,
            alive: true,
            automated: false,
        },
    );
    state.unplaced_troops = 3;

    let ids = [CardId(0), CardId(1), CardId(2)];
    let outcome =
        trade_cards(&mut state, &mut deck, &RulesConfig::default(), &mut SeededRandom::new(2), &a, &ids).unwrap();
    assert_eq!(outcome.pool_bonus, 5);
    assert_eq!(state.unplaced_troops, 8);
    let hand = &state.player(&a).unwrap().cards;
    assert!(hand.iter().all(|c| !ids.contains(&c.id)));
    assert_eq!(deck.len(), deck_before_award);
    assert_eq!(state.deck_size, deck.len());
}

#[test]
fn invalid_sets_are_refused() {
    let (mut state, _) = owned_state(3);
    let a = pid("a");
    let kinds = [CardKind::Infantry, CardKind::Infantry, CardKind::Cavalry, CardKind::Wild];
    let hand: Vec<Card> = kinds
        .iter()
        .enumerate()
        .map(|(i, &kind)| Card { id: CardId(i as u32), kind, territory_id: None })
        .collect();
    state.players.insert(
        a.clone(),
        skirmish::board::PlayerState {
            id: a.clone(),
            name: "A".into(),
            color: "#ff4444".into(),
            cards: hand,
            alive: true,
            automated: false,
        },
    );
    let mut deck = Deck::default();
    let rules = RulesConfig::default();
    let mut rng = SeededRandom::new(3);
    let before = state.clone();

    let mut trade = |ids: &[CardId]| trade_cards(&mut state, &mut deck, &rules, &mut rng, &a, ids);
    assert_eq!(trade(&[CardId(0), CardId(1), CardId(2)]), Err(MoveError::InvalidCardSet));
    assert_eq!(trade(&[CardId(0), CardId(0), CardId(2)]), Err(MoveError::DuplicateCard(CardId(0))));
    assert_eq!(trade(&[CardId(0), CardId(1)]), Err(MoveError::WrongCardCount(2)));
    assert_eq!(trade(&[CardId(0), CardId(1), CardId(9)]), Err(MoveError::CardNotHeld(CardId(9))));
    assert!(trade(&[CardId(0), CardId(1), CardId(3)]).is_ok(), "wildcard completes a pair");
    assert_eq!(state.player(&a).unwrap().cards.len(), before.player(&a).unwrap().cards.len() - 3);
}

#[test]
fn automated_seat_without_targets_ends_attack_phase() {
    // a is walled in: every border of t1 leads to a's own territory.
    let graph = TerritoryGraph::from_adjacency(&[
        ("t1", &["t2"]),
        ("t2", &["t1"]),
        ("t3", &["t4"]),
        ("t4", &["t3"]),
    ])
    .unwrap();
    let assignment: BTreeMap<TerritoryId, (PlayerId, u32)> =
        [("t1", "a"), ("t2", "a"), ("t3", "b"), ("t4", "b")].into_iter().map(|(t, p)| (tid(t), (pid(p), 2))).collect();
    let mut game = Game::with_distribution(
        vec![Seat::automated("a"), Seat::human("b")],
        graph,
        RulesConfig::default(),
        Box::new(SeededRandom::new(4)),
        assignment,
    )
    .unwrap();
    let a = pid("a");
    let mut policy = ScriptedPolicy::new(5);
    let mut report = TurnReport::default();
    policy.play_phase(&mut game, &a, &mut report).unwrap();
    assert_eq!(game.phase(), Phase::Attack);
    policy.play_phase(&mut game, &a, &mut report).unwrap();
    assert!(report.attacks.is_empty());
    assert_eq!(game.phase(), Phase::Fortify);
}

#[test]
fn last_conquest_ends_the_match() {
    let layout = &[("t1", "a", 3), ("t2", "a", 3), ("t3", "a", 3), ("t4", "a", 3), ("t5", "b", 1), ("t6", "a", 3)];
    let mut game = duel_with(&[(6, 2)], layout);
    let a = pid("a");
    game.reinforce(&a, &tid("t4"), game.state().unplaced_troops).unwrap();
    let r = game.attack(&a, &tid("t4"), &tid("t5")).unwrap();
    assert_eq!(r.eliminated, Some(pid("b")));
    assert!(!game.state().player(&pid("b")).unwrap().alive);
    assert_eq!(game.winner(), Some(&a));
    assert_eq!(game.end_attack_phase(&a), Err(MoveError::GameOver));
}
