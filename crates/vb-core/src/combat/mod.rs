//! Turn-based combat resolution.
//!
//! The [`CombatManager`] owns both rosters for the duration of one
//! encounter and drives the fixed loop: apply the current actor's status
//! ticks, execute its queued action, advance the turn pointer, sweep
//! cooldowns at round rollover, then re-evaluate termination. The driver
//! queues one [`CombatAction`] per turn and reads the returned
//! [`TurnResult`] for display; all state mutation happens inside
//! [`CombatManager::execute_turn`].

mod ability;
mod action;
pub mod ai;
mod element;
mod loot;
mod outcome;

pub use ability::{Ability, AbilityId, AbilityKind, AbilitySpec, DamageType, PartyPosition, UseBlocked};
pub use action::CombatAction;
pub use element::{Element, effectiveness, effectiveness_label, scale_damage};
pub use loot::{LootDrop, LootTableEntry, roll_loot};
pub use outcome::{ActionOutcome, TurnResult};

use core::cmp::Reverse;

use hashbrown::HashMap;

use crate::combatant::{Combatant, CombatantId, Side, StatKind, StatusEffect};
use crate::consts::{GUARD_EFFECT, MIN_DAMAGE};
use crate::rng::GameRng;

/// State machine for one encounter: Inactive → Active → Victory | Defeat.
///
/// Combatant ids must be unique across both rosters; there is no transition
/// back to Active other than calling [`CombatManager::start_combat`] again.
#[derive(Debug, Default)]
pub struct CombatManager {
    /// Party first, then enemies, in roster order.
    combatants: Vec<Combatant>,
    /// All combatant ids sorted once at combat start by VEL descending;
    /// equal VEL keeps roster order (party before enemies).
    turn_order: Vec<CombatantId>,
    current_turn: usize,
    turn_count: u32,
    combat_active: bool,
    victory: bool,
    defeat: bool,
    pending_actions: HashMap<CombatantId, CombatAction>,
}

impl CombatManager {
    /// An inactive manager; call [`CombatManager::start_combat`] to begin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin an encounter, replacing any previous state.
    pub fn start_combat(&mut self, mut party: Vec<Combatant>, mut enemies: Vec<Combatant>) {
        for member in &mut party {
            member.side = Side::Party;
        }
        for enemy in &mut enemies {
            enemy.side = Side::Enemy;
        }
        self.combatants = party;
        self.combatants.append(&mut enemies);

        debug_assert!(
            {
                let mut ids: Vec<_> = self.combatants.iter().map(|c| c.id).collect();
                ids.sort_by_key(|id| id.0);
                ids.windows(2).all(|w| w[0] != w[1])
            },
            "combatant ids must be unique across both rosters"
        );

        for combatant in &mut self.combatants {
            combatant.recalculate();
        }

        let mut order: Vec<CombatantId> = self.combatants.iter().map(|c| c.id).collect();
        // Stable sort: ties keep roster order for deterministic replay.
        order.sort_by_key(|id| {
            Reverse(
                self.combatant(*id)
                    .map(|c| c.stat(StatKind::Vel))
                    .unwrap_or(0),
            )
        });
        self.turn_order = order;

        self.current_turn = 0;
        self.turn_count = 0;
        self.combat_active = true;
        self.victory = false;
        self.defeat = false;
        self.pending_actions.clear();

        tracing::info!(
            party = self.roster(Side::Party).count(),
            enemies = self.roster(Side::Enemy).count(),
            "combat started"
        );
    }

    /// The combatant whose turn is current, if any.
    pub fn current_actor(&self) -> Option<CombatantId> {
        self.turn_order.get(self.current_turn).copied()
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.combatants.iter().find(|c| c.id == id)
    }

    pub fn combatant_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.combatants.iter_mut().find(|c| c.id == id)
    }

    /// All combatants on one side, roster order, defeated included.
    pub fn roster(&self, side: Side) -> impl Iterator<Item = &Combatant> {
        self.combatants.iter().filter(move |c| c.side == side)
    }

    /// Ids of the living combatants on one side.
    pub fn living(&self, side: Side) -> Vec<CombatantId> {
        self.roster(side)
            .filter(|c| !c.is_defeated())
            .map(|c| c.id)
            .collect()
    }

    pub fn turn_order(&self) -> &[CombatantId] {
        &self.turn_order
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn is_active(&self) -> bool {
        self.combat_active
    }

    pub fn victory(&self) -> bool {
        self.victory
    }

    pub fn defeat(&self) -> bool {
        self.defeat
    }

    /// Store or overwrite the pending action for a combatant.
    pub fn queue_action(&mut self, actor: CombatantId, action: CombatAction) {
        self.pending_actions.insert(actor, action);
    }

    pub fn pending_action(&self, actor: CombatantId) -> Option<&CombatAction> {
        self.pending_actions.get(&actor)
    }

    /// End the encounter early (a successful flee). Terminal flags stay
    /// false; actions already applied are not rolled back.
    pub fn flee(&mut self) {
        if self.combat_active {
            self.combat_active = false;
            tracing::info!("combat ended by flight");
        }
    }

    /// Resolve the current actor's turn.
    ///
    /// No-op when combat is inactive or the turn pointer is out of range.
    /// Order within the turn: status ticks on the actor (damage before
    /// heal), then the queued action if any (none queued = the actor
    /// skips), then advance; a completed round sweeps every ability
    /// cooldown down by one. Termination is evaluated last, enemies first.
    ///
    /// Executing a queued `UseAbility` does NOT re-check
    /// [`Ability::can_use`]; the driver gates before queuing. An ungated
    /// use still spends MP (clamped at zero) and starts the cooldown.
    pub fn execute_turn(&mut self) -> TurnResult {
        if !self.combat_active {
            return TurnResult::empty();
        }
        let Some(actor_id) = self.current_actor() else {
            return TurnResult::empty();
        };

        let Some(actor) = self.combatant_mut(actor_id) else {
            return TurnResult::empty();
        };
        let tick = {
            let tick = actor.status.apply_turn();
            actor.take_damage(tick.damage);
            actor.heal(tick.heal);
            // Expired effects may have carried stat modifiers.
            actor.recalculate();
            tick
        };

        let outcomes = match self.pending_actions.remove(&actor_id) {
            Some(action) => self.execute_action(actor_id, action),
            None => Vec::new(),
        };

        self.current_turn += 1;
        let mut round_completed = false;
        if self.current_turn >= self.turn_order.len() {
            self.current_turn = 0;
            self.turn_count += 1;
            round_completed = true;
            // The only cooldown decrement path: once per full round.
            for combatant in &mut self.combatants {
                for ability in &mut combatant.abilities {
                    ability.update_cooldown();
                }
            }
            tracing::debug!(round = self.turn_count, "round completed");
        }

        self.check_combat_end();

        TurnResult {
            actor: Some(actor_id),
            status_tick: tick,
            outcomes,
            round_completed,
        }
    }

    /// Total experience from defeated enemies.
    pub fn exp_reward(&self) -> u32 {
        self.roster(Side::Enemy)
            .filter(|e| e.is_defeated())
            .map(|e| e.exp_reward)
            .sum()
    }

    /// Roll each defeated enemy's drop table once.
    pub fn roll_loot(&self, rng: &mut GameRng) -> Vec<LootDrop> {
        self.roster(Side::Enemy)
            .filter(|e| e.is_defeated())
            .filter_map(|e| roll_loot(&e.loot_table, rng))
            .collect()
    }

    fn execute_action(&mut self, actor_id: CombatantId, action: CombatAction) -> Vec<ActionOutcome> {
        match action {
            CombatAction::Skip | CombatAction::UseItem { .. } => Vec::new(),
            CombatAction::Defend => {
                let Some(actor) = self.combatant_mut(actor_id) else {
                    return Vec::new();
                };
                actor.status.add(StatusEffect::guard());
                let mut outcome = ActionOutcome::new(actor_id);
                outcome.statuses.push(GUARD_EFFECT.to_string());
                vec![outcome]
            }
            CombatAction::Attack { targets } => self.execute_attack(actor_id, targets),
            CombatAction::UseAbility { ability, targets } => {
                self.execute_ability(actor_id, ability, targets)
            }
        }
    }

    fn execute_attack(
        &mut self,
        actor_id: CombatantId,
        targets: Vec<CombatantId>,
    ) -> Vec<ActionOutcome> {
        let Some(atk) = self.combatant(actor_id).map(|a| a.stat(StatKind::Atk)) else {
            return Vec::new();
        };
        let mut outcomes = Vec::new();
        for target_id in targets {
            let Some(target) = self.combatant_mut(target_id) else {
                continue;
            };
            if target.is_defeated() {
                continue;
            }
            let def = target.stat(StatKind::Def);
            let incoming = target.status.consume_incoming_multiplier();
            let damage = (((atk - def) as f32) * incoming).floor() as i32;
            let damage = damage.max(MIN_DAMAGE);
            target.take_damage(damage);

            let mut outcome = ActionOutcome::new(target_id);
            outcome.damage = damage;
            outcomes.push(outcome);
        }
        outcomes
    }

    fn execute_ability(
        &mut self,
        actor_id: CombatantId,
        ability_id: AbilityId,
        targets: Vec<CombatantId>,
    ) -> Vec<ActionOutcome> {
        // MP cost and cooldown apply unconditionally, even against zero
        // effective targets.
        let (spec, caster_stats, actor_side) = {
            let Some(actor) = self.combatant_mut(actor_id) else {
                return Vec::new();
            };
            let Some(ability) = actor.ability_mut(ability_id) else {
                tracing::debug!(?actor_id, ?ability_id, "queued ability not owned by actor");
                return Vec::new();
            };
            let cost = ability.spec.mp_cost;
            ability.trigger_cooldown();
            let spec = ability.spec.clone();
            actor.spend_mp(cost);
            (spec, actor.current_stats().clone(), actor.side)
        };

        // Explicit targets win; otherwise target_all resolves against the
        // relevant side; otherwise the ability fizzles against nobody.
        let resolved: Vec<CombatantId> = if !targets.is_empty() {
            targets
                .into_iter()
                .filter(|id| self.combatant(*id).is_some_and(|c| !c.is_defeated()))
                .collect()
        } else if spec.target_all {
            let side = match spec.kind {
                AbilityKind::Attack => actor_side.opponent(),
                AbilityKind::Support | AbilityKind::Defense => actor_side,
            };
            self.living(side)
        } else {
            Vec::new()
        };

        let mut outcomes = Vec::new();
        for target_id in resolved {
            let Some(target) = self.combatant_mut(target_id) else {
                continue;
            };
            let mut outcome = ActionOutcome::new(target_id);

            if spec.damage > 0 {
                let offense = spec.offense(&caster_stats);
                let mitigation = spec.mitigation(target.current_stats());
                let elemental = effectiveness(spec.element, target.element);
                let incoming = target.status.consume_incoming_multiplier();
                let damage = (((offense - mitigation) as f32) * elemental * incoming).floor() as i32;
                let damage = damage.max(MIN_DAMAGE);
                target.take_damage(damage);
                outcome.damage = damage;
                outcome.effectiveness = elemental;
            }

            if spec.heal > 0 {
                let amount = spec.heal_amount(&caster_stats);
                target.heal(amount);
                outcome.heal = amount;
            }

            if !spec.status_effects.is_empty() {
                for template in &spec.status_effects {
                    target.status.add(template.applied());
                    outcome.statuses.push(template.name.clone());
                }
                target.recalculate();
            }

            outcomes.push(outcome);
        }
        outcomes
    }

    /// Enemies checked first: a turn that downs the last members of both
    /// sides is a victory.
    fn check_combat_end(&mut self) {
        if !self.combat_active {
            return;
        }
        if self.living(Side::Enemy).is_empty() {
            self.victory = true;
            self.combat_active = false;
            tracing::info!(rounds = self.turn_count, "combat won");
        } else if self.living(Side::Party).is_empty() {
            self.defeat = true;
            self.combat_active = false;
            tracing::info!(rounds = self.turn_count, "combat lost");
        }
    }
}
