//! Timed status effects (buffs, debuffs, damage/heal over time).
//!
//! Effects are keyed by name: re-adding an effect with the same name replaces
//! the old one. Each effect ticks once per owner turn and is dropped in the
//! same pass once its remaining turns reach zero. Expiry removal happens
//! after the iteration, never while iterating.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::stats::{StatBlock, StatKind};
use crate::consts::{GUARD_EFFECT, GUARD_MULTIPLIER};

/// Classification of a status effect. Behavior is driven entirely by the
/// numeric fields; the kind only labels the effect for display and filtering.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum StatusKind {
    #[default]
    Buff,
    Debuff,
    DamageOverTime,
    HealOverTime,
}

/// A timed modifier attached to one combatant.
///
/// Also serves as the template stored on abilities; [`StatusEffect::applied`]
/// produces the fresh instance that actually gets attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEffect {
    /// Identity key within one combatant's effect list.
    pub name: String,
    #[serde(default)]
    pub kind: StatusKind,
    /// Total duration in owner turns.
    pub duration: u32,
    /// Turns left before expiry; counts down once per owner turn.
    #[serde(default)]
    pub turns_remaining: u32,
    /// Additive stat deltas while the effect is active.
    #[serde(default)]
    pub stat_modifiers: StatBlock,
    #[serde(default)]
    pub damage_per_turn: i32,
    #[serde(default)]
    pub heal_per_turn: i32,
    /// Multiplier applied to damage the owner receives (1.0 = neutral).
    #[serde(default = "neutral_multiplier")]
    pub incoming_damage_multiplier: f32,
    /// If set, the effect is removed after it mitigates one incoming hit.
    #[serde(default)]
    pub consumed_on_hit: bool,
}

fn neutral_multiplier() -> f32 {
    1.0
}

impl StatusEffect {
    /// Create an effect with no modifiers; fill in via the builder methods.
    pub fn new(name: impl Into<String>, kind: StatusKind, duration: u32) -> Self {
        Self {
            name: name.into(),
            kind,
            duration,
            turns_remaining: duration,
            stat_modifiers: StatBlock::new(),
            damage_per_turn: 0,
            heal_per_turn: 0,
            incoming_damage_multiplier: 1.0,
            consumed_on_hit: false,
        }
    }

    /// The one-shot mitigation effect behind the Defend action: halves the
    /// next incoming hit, gone after it (or at the owner's next turn).
    pub fn guard() -> Self {
        let mut effect = Self::new(GUARD_EFFECT, StatusKind::Buff, 1);
        effect.incoming_damage_multiplier = GUARD_MULTIPLIER;
        effect.consumed_on_hit = true;
        effect
    }

    pub fn with_stat_modifier(mut self, stat: StatKind, delta: i32) -> Self {
        self.stat_modifiers.add(stat, delta);
        self
    }

    pub fn with_damage_per_turn(mut self, damage: i32) -> Self {
        self.damage_per_turn = damage;
        self
    }

    pub fn with_heal_per_turn(mut self, heal: i32) -> Self {
        self.heal_per_turn = heal;
        self
    }

    /// A fresh instance with the full duration restored. Used when an
    /// ability's stored template is attached to a target.
    pub fn applied(&self) -> Self {
        let mut instance = self.clone();
        instance.turns_remaining = instance.duration;
        instance
    }
}

/// Aggregated damage and healing from one round of status ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTick {
    pub damage: i32,
    pub heal: i32,
}

/// The set of active status effects on one combatant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusManager {
    effects: Vec<StatusEffect>,
}

impl StatusManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an effect, replacing any existing effect with the same name.
    pub fn add(&mut self, effect: StatusEffect) {
        self.remove(&effect.name);
        self.effects.push(effect);
    }

    /// Remove an effect by name; no-op if absent.
    pub fn remove(&mut self, name: &str) {
        self.effects.retain(|e| e.name != name);
    }

    pub fn has(&self, name: &str) -> bool {
        self.effects.iter().any(|e| e.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.name == name)
    }

    /// Tick every active effect once: decrement remaining turns and
    /// accumulate per-turn damage and healing. Effects that reach zero are
    /// dropped in a second pass. The caller applies the returned tick to the
    /// owner's HP, damage before heal.
    pub fn apply_turn(&mut self) -> StatusTick {
        let mut tick = StatusTick::default();
        for effect in &mut self.effects {
            effect.turns_remaining = effect.turns_remaining.saturating_sub(1);
            tick.damage += effect.damage_per_turn;
            tick.heal += effect.heal_per_turn;
        }
        self.effects.retain(|e| e.turns_remaining > 0);
        tick
    }

    /// Sum of stat modifiers across all active effects.
    pub fn stat_modifiers(&self) -> StatBlock {
        let mut total = StatBlock::new();
        for effect in &self.effects {
            total.merge(&effect.stat_modifiers);
        }
        total
    }

    /// Combined multiplier for an incoming hit. Removes effects that are
    /// consumed by mitigating a hit (the Defend one-shot).
    pub fn consume_incoming_multiplier(&mut self) -> f32 {
        let multiplier = self
            .effects
            .iter()
            .map(|e| e.incoming_damage_multiplier)
            .product();
        self.effects.retain(|e| !e.consumed_on_hit);
        multiplier
    }

    /// Effects of a given classification.
    pub fn of_kind(&self, kind: StatusKind) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter().filter(move |e| e.kind == kind)
    }

    pub fn effects(&self) -> &[StatusEffect] {
        &self.effects
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }
}
