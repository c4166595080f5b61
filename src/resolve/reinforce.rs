//! Reinforcement allotment and placement.

use crate::board::{GameState, Phase, PlayerId, TerritoryGraph, TerritoryId};
use crate::config::RulesConfig;
use crate::error::MoveError;

/// Troops `player` receives at the start of their turn.
///
/// `max(min_reinforcement, owned / territories_per_troop)`, plus continent
/// bonuses when enabled.
pub fn reinforcement_allotment(
    state: &GameState,
    graph: &TerritoryGraph,
    rules: &RulesConfig,
    player: &PlayerId,
) -> u32 {
    let owned = state.territory_count(player) as u32;
    let base = (owned / rules.territories_per_troop.max(1)).max(rules.min_reinforcement);
    if rules.continent_bonuses {
        base + continent_bonus(state, graph, player)
    } else {
        base
    }
}

/// Sum of bonuses for every continent `player` holds entirely.
pub fn continent_bonus(state: &GameState, graph: &TerritoryGraph, player: &PlayerId) -> u32 {
    graph
        .continents()
        .iter()
        .filter(|c| !c.territories.is_empty())
        .filter(|c| {
            c.territories
                .iter()
                .all(|t| state.territory(t).is_some_and(|s| s.is_owned_by(player)))
        })
        .map(|c| c.bonus)
        .sum()
}

/// Places `amount` unplaced troops on an owned territory. Emptying the pool
/// moves the turn into the attack phase.
pub fn place_reinforcements(
    state: &mut GameState,
    player: &PlayerId,
    territory: &TerritoryId,
    amount: u32,
) -> Result<(), MoveError> {
    if amount == 0 {
        return Err(MoveError::InvalidAmount(amount));
    }
    if amount > state.unplaced_troops {
        return Err(MoveError::NotEnoughUnplaced { requested: amount, available: state.unplaced_troops });
    }
    let target = state
        .territories
        .get_mut(territory)
        .ok_or_else(|| MoveError::UnknownTerritory(territory.clone()))?;
    if !target.is_owned_by(player) {
        return Err(MoveError::NotOwner(territory.clone()));
    }

    target.troops += amount;
    state.unplaced_troops -= amount;
    if state.unplaced_troops == 0 {
        state.phase = Phase::Attack;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::TerritoryState;
    use crate::testing::duel_state;

    fn give(state: &mut GameState, owner: &str, n: usize) {
        for i in 0..n {
            state
                .territories
                .insert(TerritoryId::new(format!("x{i}")), TerritoryState { owner: Some(owner.into()), troops: 1 });
        }
    }

    #[test]
    fn allotment_floor_and_division() {
        let (mut state, graph) = duel_state();
        let rules = RulesConfig::default();
        let a = PlayerId::new("a");
        // 3 territories -> max(3, 1)
        assert_eq!(reinforcement_allotment(&state, &graph, &rules, &a), 3);
        // 3 + 9 = 12 territories -> 4
        give(&mut state, "a", 9);
        assert_eq!(reinforcement_allotment(&state, &graph, &rules, &a), 4);
        // 12 + 2 = 14 territories -> floor(14/3) = 4
        state.territories.insert("y0".into(), TerritoryState { owner: Some(a.clone()), troops: 1 });
        state.territories.insert("y1".into(), TerritoryState { owner: Some(a.clone()), troops: 1 });
        assert_eq!(reinforcement_allotment(&state, &graph, &rules, &a), 4);
    }

    #[test]
    fn allotment_for_player_with_no_territories() {
        let (mut state, graph) = duel_state();
        for t in state.territories.values_mut() {
            t.owner = Some("b".into());
        }
        let rules = RulesConfig::default();
        assert_eq!(reinforcement_allotment(&state, &graph, &rules, &"a".into()), 3);
    }

    #[test]
    fn continent_bonus_only_when_enabled() {
        let graph = TerritoryGraph::standard();
        let (mut state, _) = duel_state();
        state.territories.clear();
        for t in graph.territories() {
            let owner = if ["t1", "t2"].contains(&t.as_str()) { "a" } else { "b" };
            state.territories.insert(t.clone(), TerritoryState { owner: Some(owner.into()), troops: 1 });
        }
        let a = PlayerId::new("a");
        let b = PlayerId::new("b");
        assert_eq!(continent_bonus(&state, &graph, &a), 2);
        // Midgard (3) + Pacificus (2)
        assert_eq!(continent_bonus(&state, &graph, &b), 5);

        let mut rules = RulesConfig::default();
        assert_eq!(reinforcement_allotment(&state, &graph, &rules, &a), 3);
        rules.continent_bonuses = true;
        assert_eq!(reinforcement_allotment(&state, &graph, &rules, &a), 5);
        assert_eq!(reinforcement_allotment(&state, &graph, &rules, &b), 8);
    }

    #[test]
    fn placing_whole_pool_advances_to_attack() {
        let (mut state, _) = duel_state();
        let a = PlayerId::new("a");
        place_reinforcements(&mut state, &a, &"t1".into(), 1).unwrap();
        assert_eq!(state.phase, Phase::Reinforce);
        assert_eq!(state.unplaced_troops, 2);
        place_reinforcements(&mut state, &a, &"t2".into(), 2).unwrap();
        assert_eq!(state.phase, Phase::Attack);
        assert_eq!(state.unplaced_troops, 0);
        assert_eq!(state.territory(&"t1".into()).unwrap().troops, 4);
        assert_eq!(state.territory(&"t2".into()).unwrap().troops, 5);
    }

    #[test]
    fn placement_rejections_leave_state_untouched() {
        let (mut state, _) = duel_state();
        let before = state.clone();
        let a = PlayerId::new("a");
        assert_eq!(place_reinforcements(&mut state, &a, &"t1".into(), 0), Err(MoveError::InvalidAmount(0)));
        assert!(matches!(
            place_reinforcements(&mut state, &a, &"t1".into(), 4),
            Err(MoveError::NotEnoughUnplaced { requested: 4, available: 3 })
        ));
        assert_eq!(place_reinforcements(&mut state, &a, &"t4".into(), 1), Err(MoveError::NotOwner("t4".into())));
        assert_eq!(
            place_reinforcements(&mut state, &a, &"zz".into(), 1),
            Err(MoveError::UnknownTerritory("zz".into()))
        );
        assert_eq!(state, before);
    }
}
