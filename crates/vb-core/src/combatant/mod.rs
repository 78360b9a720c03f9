//! Combatants: the stat-bearing participants of an encounter.
//!
//! A combatant owns its stat block, HP/MP pools, equipment, status effects,
//! and per-instance ability copies. The HP/MP pools are private and only
//! mutated through clamping methods, so `0 <= hp <= max_hp` and
//! `0 <= mp <= max_mp` hold after every operation.

mod equipment;
mod stats;
mod status;

pub use equipment::{EquipSlot, EquipmentPiece, EquipmentSet, GearKind, ItemId};
pub use stats::{StatBlock, StatKind};
pub use status::{StatusEffect, StatusKind, StatusManager, StatusTick};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::combat::{Ability, AbilityId, Element, LootTableEntry, PartyPosition};
use crate::consts::{DEFAULT_ATK, DEFAULT_DEF, DEFAULT_HP, DEFAULT_MAG, DEFAULT_MP, DEFAULT_VEL};

/// Unique identifier for combatant instances within one encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CombatantId(pub u32);

/// Which roster a combatant fights for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Side {
    #[default]
    Party,
    Enemy,
}

impl Side {
    pub const fn opponent(&self) -> Side {
        match self {
            Side::Party => Side::Enemy,
            Side::Enemy => Side::Party,
        }
    }
}

/// One participant in combat: player character or enemy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub side: Side,
    pub level: u8,
    pub exp: u32,
    /// Innate element, consulted as the defense element of incoming hits.
    pub element: Element,
    /// Front/middle/rear placement in the party formation, if any.
    pub position: Option<PartyPosition>,
    base_stats: StatBlock,
    /// Derived: base + equipment bonuses + status modifiers. Stale until
    /// [`Combatant::recalculate`] runs after an equipment or status change.
    current_stats: StatBlock,
    hp: i32,
    max_hp: i32,
    mp: i32,
    max_mp: i32,
    pub equipment: EquipmentSet,
    pub status: StatusManager,
    /// Per-owner ability instances. Cooldown state lives here, never on the
    /// catalog entry, so two combatants with "the same" ability do not share
    /// cooldowns.
    pub abilities: Vec<Ability>,
    /// Experience awarded when this combatant is defeated (enemies).
    pub exp_reward: u32,
    /// Declared drop table (enemies); rolled after victory.
    pub loot_table: Vec<LootTableEntry>,
}

impl Combatant {
    /// Create a combatant with the default stat line, full pools.
    pub fn new(id: CombatantId, name: impl Into<String>, side: Side) -> Self {
        let base = StatBlock::new()
            .with(StatKind::Hp, DEFAULT_HP)
            .with(StatKind::Mp, DEFAULT_MP)
            .with(StatKind::Atk, DEFAULT_ATK)
            .with(StatKind::Def, DEFAULT_DEF)
            .with(StatKind::Vel, DEFAULT_VEL)
            .with(StatKind::Mag, DEFAULT_MAG);
        let mut combatant = Self {
            id,
            name: name.into(),
            side,
            level: 1,
            exp: 0,
            element: Element::Neutral,
            position: None,
            base_stats: base.clone(),
            current_stats: base,
            hp: 0,
            max_hp: 0,
            mp: 0,
            max_mp: 0,
            equipment: EquipmentSet::new(),
            status: StatusManager::new(),
            abilities: Vec::new(),
            exp_reward: 0,
            loot_table: Vec::new(),
        };
        combatant.recalculate();
        combatant.refill();
        combatant
    }

    /// Replace the base stat line; pools are refilled to the new maxima.
    pub fn with_base_stats(mut self, stats: StatBlock) -> Self {
        self.base_stats = stats;
        self.recalculate();
        self.refill();
        self
    }

    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    pub fn with_element(mut self, element: Element) -> Self {
        self.element = element;
        self
    }

    pub fn with_position(mut self, position: PartyPosition) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_ability(mut self, ability: Ability) -> Self {
        self.abilities.push(ability);
        self
    }

    pub fn with_exp_reward(mut self, exp: u32) -> Self {
        self.exp_reward = exp;
        self
    }

    pub fn with_loot_table(mut self, table: Vec<LootTableEntry>) -> Self {
        self.loot_table = table;
        self
    }

    /// Recompute `current_stats` from base + equipment + status modifiers
    /// and re-derive the pool maxima. Current HP/MP are preserved except
    /// where the new maximum clamps them.
    ///
    /// Not automatic: must be called whenever equipment or status effects
    /// change.
    pub fn recalculate(&mut self) {
        let mut totals = self.base_stats.clone();
        totals.merge(&self.equipment.stat_bonuses());
        totals.merge(&self.status.stat_modifiers());
        self.max_hp = totals.get(StatKind::Hp).max(0);
        self.max_mp = totals.get(StatKind::Mp).max(0);
        self.hp = self.hp.clamp(0, self.max_hp);
        self.mp = self.mp.clamp(0, self.max_mp);
        self.current_stats = totals;
    }

    /// Derived stats as of the last [`Combatant::recalculate`].
    pub fn current_stats(&self) -> &StatBlock {
        &self.current_stats
    }

    /// Read one derived stat.
    pub fn stat(&self, stat: StatKind) -> i32 {
        self.current_stats.get(stat)
    }

    pub fn base_stats(&self) -> &StatBlock {
        &self.base_stats
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    pub fn max_hp(&self) -> i32 {
        self.max_hp
    }

    pub fn mp(&self) -> i32 {
        self.mp
    }

    pub fn max_mp(&self) -> i32 {
        self.max_mp
    }

    /// A combatant at zero HP is out of the fight but stays in the roster
    /// for loot and experience bookkeeping.
    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }

    /// Reduce HP, clamped at zero. Negative amounts are ignored.
    pub fn take_damage(&mut self, amount: i32) {
        if amount > 0 {
            self.hp = (self.hp - amount).max(0);
        }
    }

    /// Restore HP, clamped at the maximum. Negative amounts are ignored.
    pub fn heal(&mut self, amount: i32) {
        if amount > 0 {
            self.hp = (self.hp + amount).min(self.max_hp);
        }
    }

    /// Spend MP, clamped at zero — never goes negative even when the cost
    /// exceeds the pool.
    pub fn spend_mp(&mut self, cost: i32) {
        if cost > 0 {
            self.mp = (self.mp - cost).max(0);
        }
    }

    /// Restore MP, clamped at the maximum.
    pub fn restore_mp(&mut self, amount: i32) {
        if amount > 0 {
            self.mp = (self.mp + amount).min(self.max_mp);
        }
    }

    /// Fill both pools to their maxima.
    pub fn refill(&mut self) {
        self.hp = self.max_hp;
        self.mp = self.max_mp;
    }

    pub fn gain_exp(&mut self, amount: u32) {
        self.exp += amount;
    }

    /// Look up an owned ability instance by catalog id.
    pub fn ability(&self, id: AbilityId) -> Option<&Ability> {
        self.abilities.iter().find(|a| a.spec.id == id)
    }

    pub fn ability_mut(&mut self, id: AbilityId) -> Option<&mut Ability> {
        self.abilities.iter_mut().find(|a| a.spec.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn combatant() -> Combatant {
        Combatant::new(CombatantId(1), "Aldren", Side::Party)
    }

    #[test]
    fn test_new_combatant_has_full_pools() {
        let c = combatant();
        assert_eq!(c.hp(), DEFAULT_HP);
        assert_eq!(c.max_hp(), DEFAULT_HP);
        assert_eq!(c.mp(), DEFAULT_MP);
    }

    #[test]
    fn test_damage_and_heal_clamp() {
        let mut c = combatant();
        c.take_damage(10_000);
        assert_eq!(c.hp(), 0);
        assert!(c.is_defeated());
        c.heal(10_000);
        assert_eq!(c.hp(), c.max_hp());
    }

    #[test]
    fn test_spend_mp_never_negative() {
        let mut c = combatant();
        c.spend_mp(DEFAULT_MP + 30);
        assert_eq!(c.mp(), 0);
    }

    #[test]
    fn test_recalculate_includes_equipment_bonuses() {
        let mut c = combatant();
        c.equipment.equip(EquipmentPiece {
            id: ItemId(1),
            name: "Iron Sword".into(),
            kind: GearKind::Weapon,
            bonus_stats: StatBlock::new().with(StatKind::Atk, 5),
        });
        assert_eq!(c.stat(StatKind::Atk), DEFAULT_ATK);
        c.recalculate();
        assert_eq!(c.stat(StatKind::Atk), DEFAULT_ATK + 5);
    }

    #[test]
    fn test_recalculate_clamps_hp_to_lowered_max() {
        let mut c = combatant();
        c.equipment.equip(EquipmentPiece {
            id: ItemId(2),
            name: "Vitality Charm".into(),
            kind: GearKind::Accessory,
            bonus_stats: StatBlock::new().with(StatKind::Hp, 50),
        });
        c.recalculate();
        c.heal(50);
        assert_eq!(c.hp(), DEFAULT_HP + 50);

        // Unequipping shrinks the max; current HP clamps down with it.
        c.equipment.unequip(EquipSlot::Accessory1);
        c.recalculate();
        assert_eq!(c.max_hp(), DEFAULT_HP);
        assert_eq!(c.hp(), DEFAULT_HP);
    }

    #[test]
    fn test_status_modifiers_flow_into_current_stats() {
        let mut c = combatant();
        c.status.add(
            StatusEffect::new("Weaken", StatusKind::Debuff, 2)
                .with_stat_modifier(StatKind::Atk, -4),
        );
        c.recalculate();
        assert_eq!(c.stat(StatKind::Atk), DEFAULT_ATK - 4);

        // Expiry + recalculation restores the base value.
        c.status.apply_turn();
        c.status.apply_turn();
        c.recalculate();
        assert_eq!(c.stat(StatKind::Atk), DEFAULT_ATK);
    }

    #[test]
    fn test_combatant_snapshot_round_trips() {
        let c = combatant().with_level(3).with_element(Element::Fire);
        let json = serde_json::to_string(&c).unwrap();
        let back: Combatant = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name, "Aldren");
        assert_eq!(back.level, 3);
        assert_eq!(back.hp(), c.hp());
        assert_eq!(back.element, Element::Fire);
    }
}
