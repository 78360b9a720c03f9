//! Data-driven abilities (spells and skills).
//!
//! An [`AbilitySpec`] is the immutable catalog entry; an [`Ability`] is the
//! per-owner instance that carries mutable cooldown state. Instances are
//! value copies, so a caster's cooldown never bleeds into another combatant
//! holding the same catalog entry.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};
use thiserror::Error;

use super::element::Element;
use crate::combatant::{Combatant, StatBlock, StatKind, StatusEffect};

/// Unique identifier for ability catalog entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AbilityId(pub u32);

/// Broad classification; drives default target resolution.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum AbilityKind {
    #[default]
    Attack,
    Support,
    Defense,
}

/// Which attacker stat feeds the damage and which defender stat mitigates
/// it. Orthogonal to the element, which only selects the multiplier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum DamageType {
    /// ATK adds to damage, DEF mitigates.
    #[default]
    Physical,
    /// MAG adds to damage, MAG mitigates.
    Magical,
}

/// Party formation rows, for abilities restricted by placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum PartyPosition {
    Vanguard,
    Middle,
    Rear,
}

/// Why an ability cannot be used right now. Recoverable by design: the
/// driver shows the reason and asks for another action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UseBlocked {
    #[error("not enough MP ({have}/{need})")]
    InsufficientMp { have: i32, need: i32 },
    #[error("on cooldown ({turns} turns left)")]
    OnCooldown { turns: u32 },
    #[error("requires level {required}")]
    LevelTooLow { level: u8, required: u8 },
    #[error("must be used from the {required} position")]
    OutOfPosition { required: PartyPosition },
}

/// Immutable catalog definition of an ability.
///
/// Every field except `id` and `name` decodes with a neutral default, so a
/// partial or malformed catalog entry degrades to a harmless no-op ability
/// instead of failing to load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilitySpec {
    pub id: AbilityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub mp_cost: i32,
    /// Rounds before the ability can be used again.
    #[serde(default)]
    pub cooldown: u32,
    #[serde(default)]
    pub kind: AbilityKind,
    #[serde(default)]
    pub element: Element,
    #[serde(default)]
    pub damage: i32,
    #[serde(default)]
    pub heal: i32,
    #[serde(default)]
    pub damage_type: DamageType,
    #[serde(default)]
    pub area_of_effect: bool,
    /// When set and no explicit target is given, the ability hits every
    /// valid target on the relevant side.
    #[serde(default)]
    pub target_all: bool,
    /// Templates applied to each target on hit.
    #[serde(default)]
    pub status_effects: Vec<StatusEffect>,
    #[serde(default = "default_required_level")]
    pub required_level: u8,
    #[serde(default)]
    pub required_position: Option<PartyPosition>,
}

fn default_required_level() -> u8 {
    1
}

impl AbilitySpec {
    /// Minimal attack-kind spec; fill in the rest field by field.
    pub fn new(id: AbilityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            mp_cost: 0,
            cooldown: 0,
            kind: AbilityKind::Attack,
            element: Element::Neutral,
            damage: 0,
            heal: 0,
            damage_type: DamageType::Physical,
            area_of_effect: false,
            target_all: false,
            status_effects: Vec::new(),
            required_level: 1,
            required_position: None,
        }
    }

    /// Damage subtotal before mitigation: base damage plus the caster's
    /// offensive stat for this damage type.
    pub fn offense(&self, caster_stats: &StatBlock) -> i32 {
        let stat = match self.damage_type {
            DamageType::Physical => StatKind::Atk,
            DamageType::Magical => StatKind::Mag,
        };
        self.damage + caster_stats.get(stat)
    }

    /// The defender stat subtracted from the damage subtotal.
    pub fn mitigation(&self, target_stats: &StatBlock) -> i32 {
        let stat = match self.damage_type {
            DamageType::Physical => StatKind::Def,
            DamageType::Magical => StatKind::Mag,
        };
        target_stats.get(stat)
    }

    /// Healing applied per target: base heal plus the caster's MAG.
    pub fn heal_amount(&self, caster_stats: &StatBlock) -> i32 {
        self.heal + caster_stats.get(StatKind::Mag)
    }
}

/// A per-owner ability instance: the spec plus mutable cooldown state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ability {
    pub spec: AbilitySpec,
    /// Rounds left before the ability is usable again. Decremented exactly
    /// once per full round by the manager's rollover sweep, floored at zero.
    #[serde(default)]
    pub cooldown_remaining: u32,
}

impl Ability {
    pub fn new(spec: AbilitySpec) -> Self {
        Self {
            spec,
            cooldown_remaining: 0,
        }
    }

    /// Check whether `actor` may use this ability, returning the first
    /// failing requirement: MP, then cooldown, then level, then position.
    ///
    /// Executing the ability does NOT re-run this check; callers must gate.
    pub fn can_use(&self, actor: &Combatant) -> Result<(), UseBlocked> {
        if actor.mp() < self.spec.mp_cost {
            return Err(UseBlocked::InsufficientMp {
                have: actor.mp(),
                need: self.spec.mp_cost,
            });
        }
        if self.cooldown_remaining > 0 {
            return Err(UseBlocked::OnCooldown {
                turns: self.cooldown_remaining,
            });
        }
        if actor.level < self.spec.required_level {
            return Err(UseBlocked::LevelTooLow {
                level: actor.level,
                required: self.spec.required_level,
            });
        }
        if let (Some(required), Some(position)) = (self.spec.required_position, actor.position) {
            if required != position {
                return Err(UseBlocked::OutOfPosition { required });
            }
        }
        Ok(())
    }

    /// True when not on cooldown.
    pub fn ready(&self) -> bool {
        self.cooldown_remaining == 0
    }

    /// Start the cooldown. Called on use, unconditionally — even when the
    /// ability resolved against zero targets.
    pub fn trigger_cooldown(&mut self) {
        self.cooldown_remaining = self.spec.cooldown;
    }

    /// Round-rollover decrement, floored at zero.
    pub fn update_cooldown(&mut self) {
        self.cooldown_remaining = self.cooldown_remaining.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::{CombatantId, Side};

    fn caster() -> Combatant {
        Combatant::new(CombatantId(1), "Mage", Side::Party)
    }

    fn spec() -> AbilitySpec {
        let mut spec = AbilitySpec::new(AbilityId(1), "Fire Bolt");
        spec.mp_cost = 20;
        spec.cooldown = 2;
        spec.damage = 15;
        spec.element = Element::Fire;
        spec
    }

    #[test]
    fn test_can_use_checks_mp_first() {
        let mut ability = Ability::new(spec());
        ability.cooldown_remaining = 3;
        let mut actor = caster();
        actor.spend_mp(actor.mp()); // drain MP

        // Both MP and cooldown fail; MP is reported.
        assert_eq!(
            ability.can_use(&actor),
            Err(UseBlocked::InsufficientMp { have: 0, need: 20 })
        );
    }

    #[test]
    fn test_can_use_checks_cooldown_before_level() {
        let mut spec = spec();
        spec.required_level = 10;
        let mut ability = Ability::new(spec);
        ability.cooldown_remaining = 1;
        assert_eq!(
            ability.can_use(&caster()),
            Err(UseBlocked::OnCooldown { turns: 1 })
        );
    }

    #[test]
    fn test_can_use_checks_level() {
        let mut spec = spec();
        spec.required_level = 5;
        let ability = Ability::new(spec);
        assert_eq!(
            ability.can_use(&caster()),
            Err(UseBlocked::LevelTooLow {
                level: 1,
                required: 5
            })
        );
    }

    #[test]
    fn test_can_use_checks_position_last() {
        let mut spec = spec();
        spec.required_position = Some(PartyPosition::Rear);
        let ability = Ability::new(spec);

        // No declared position: the requirement is not enforced.
        assert_eq!(ability.can_use(&caster()), Ok(()));

        let vanguard = caster().with_position(PartyPosition::Vanguard);
        assert_eq!(
            ability.can_use(&vanguard),
            Err(UseBlocked::OutOfPosition {
                required: PartyPosition::Rear
            })
        );
    }

    #[test]
    fn test_cooldown_never_goes_negative() {
        let mut ability = Ability::new(spec());
        ability.trigger_cooldown();
        assert_eq!(ability.cooldown_remaining, 2);
        for _ in 0..5 {
            ability.update_cooldown();
        }
        assert_eq!(ability.cooldown_remaining, 0);
        assert!(ability.ready());
    }

    #[test]
    fn test_offense_uses_damage_type_stat() {
        let physical = spec(); // Physical by default
        let mut magical = spec();
        magical.damage_type = DamageType::Magical;
        let stats = StatBlock::new()
            .with(StatKind::Atk, 10)
            .with(StatKind::Mag, 30);
        assert_eq!(physical.offense(&stats), 25);
        assert_eq!(magical.offense(&stats), 45);
    }

    #[test]
    fn test_partial_catalog_entry_decodes_with_defaults() {
        let json = r#"{ "id": 7, "name": "Mystery Art" }"#;
        let spec: AbilitySpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.mp_cost, 0);
        assert_eq!(spec.damage, 0);
        assert_eq!(spec.element, Element::Neutral);
        assert_eq!(spec.required_level, 1);
        assert!(spec.status_effects.is_empty());
    }
}
