//! Enemy action selection.
//!
//! Greedy heuristic: finish off the weakest opposing combatant with the
//! strongest ability that is currently usable, falling back to a basic
//! attack. Deterministic on purpose, so encounter replays stay stable.

use super::CombatManager;
use super::action::CombatAction;
use crate::combatant::{CombatantId, Side};

/// Pick an action for one enemy combatant.
///
/// Targets the living party member with the lowest current HP. Among the
/// actor's abilities, the usable one with the highest base damage wins;
/// with none usable the actor falls back to [`CombatAction::attack`].
/// Returns [`CombatAction::Skip`] when the actor is missing or no target
/// is standing.
pub fn choose_enemy_action(manager: &CombatManager, actor_id: CombatantId) -> CombatAction {
    let Some(actor) = manager.combatant(actor_id) else {
        return CombatAction::Skip;
    };

    let target = manager
        .living(actor.side.opponent())
        .into_iter()
        .filter_map(|id| manager.combatant(id))
        .min_by_key(|c| c.hp())
        .map(|c| c.id);
    let Some(target) = target else {
        return CombatAction::Skip;
    };

    let best = actor
        .abilities
        .iter()
        .filter(|a| a.spec.damage > 0 && a.can_use(actor).is_ok())
        .max_by_key(|a| a.spec.damage);
    match best {
        Some(ability) => CombatAction::use_ability(ability.spec.id, target),
        None => CombatAction::attack(target),
    }
}

/// Queue an AI-chosen action for every living enemy. Call once per round
/// before stepping through the enemies' turns.
pub fn queue_enemy_actions(manager: &mut CombatManager) {
    for enemy_id in manager.living(Side::Enemy) {
        let action = choose_enemy_action(manager, enemy_id);
        manager.queue_action(enemy_id, action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{Ability, AbilityId, AbilitySpec};
    use crate::combatant::{Combatant, StatBlock, StatKind};

    fn party_member(id: u32, hp: i32) -> Combatant {
        Combatant::new(CombatantId(id), format!("hero-{id}"), Side::Party)
            .with_base_stats(StatBlock::new().with(StatKind::Hp, hp).with(StatKind::Vel, 5))
    }

    fn damage_spell(id: u32, damage: i32, mp_cost: i32) -> Ability {
        let mut spec = AbilitySpec::new(AbilityId(id), format!("spell-{id}"));
        spec.damage = damage;
        spec.mp_cost = mp_cost;
        Ability::new(spec)
    }

    #[test]
    fn test_targets_lowest_hp_party_member() {
        let mut mgr = CombatManager::new();
        mgr.start_combat(
            vec![party_member(1, 100), party_member(2, 30), party_member(3, 60)],
            vec![Combatant::new(CombatantId(4), "Ghoul", Side::Enemy)],
        );
        assert_eq!(
            choose_enemy_action(&mgr, CombatantId(4)),
            CombatAction::attack(CombatantId(2))
        );
    }

    #[test]
    fn test_prefers_strongest_usable_ability() {
        let enemy = Combatant::new(CombatantId(4), "Lich", Side::Enemy)
            .with_ability(damage_spell(1, 10, 5))
            .with_ability(damage_spell(2, 25, 999)) // unaffordable
            .with_ability(damage_spell(3, 18, 5));
        let mut mgr = CombatManager::new();
        mgr.start_combat(vec![party_member(1, 100)], vec![enemy]);
        assert_eq!(
            choose_enemy_action(&mgr, CombatantId(4)),
            CombatAction::use_ability(AbilityId(3), CombatantId(1))
        );
    }

    #[test]
    fn test_falls_back_to_attack_without_usable_abilities() {
        let enemy = Combatant::new(CombatantId(4), "Imp", Side::Enemy)
            .with_ability(damage_spell(1, 25, 999));
        let mut mgr = CombatManager::new();
        mgr.start_combat(vec![party_member(1, 100)], vec![enemy]);
        assert_eq!(
            choose_enemy_action(&mgr, CombatantId(4)),
            CombatAction::attack(CombatantId(1))
        );
    }

    #[test]
    fn test_skips_with_no_standing_target() {
        let mut downed = party_member(1, 50);
        downed.take_damage(10_000);
        let mut mgr = CombatManager::new();
        mgr.start_combat(
            vec![downed],
            vec![Combatant::new(CombatantId(4), "Ghoul", Side::Enemy)],
        );
        assert_eq!(
            choose_enemy_action(&mgr, CombatantId(4)),
            CombatAction::Skip
        );
    }

    #[test]
    fn test_queue_enemy_actions_covers_all_living_enemies() {
        let mut mgr = CombatManager::new();
        mgr.start_combat(
            vec![party_member(1, 100)],
            vec![
                Combatant::new(CombatantId(4), "Ghoul", Side::Enemy),
                Combatant::new(CombatantId(5), "Wisp", Side::Enemy),
            ],
        );
        queue_enemy_actions(&mut mgr);
        assert!(mgr.pending_action(CombatantId(4)).is_some());
        assert!(mgr.pending_action(CombatantId(5)).is_some());
        assert!(mgr.pending_action(CombatantId(1)).is_none());
    }
}
