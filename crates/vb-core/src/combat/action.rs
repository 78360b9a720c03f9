//! Combat actions: the commands a driver queues for the current actor.
//!
//! A closed enum, resolved by exhaustive matching in the manager. Each
//! variant carries only the fields it needs. Actions are ephemeral — one
//! per actor per turn, consumed on execution.

use serde::{Deserialize, Serialize};

use super::ability::AbilityId;
use crate::combatant::{CombatantId, ItemId};

/// One queued command for one combatant's turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatAction {
    /// Basic physical attack: `max(1, ATK - DEF)` per target.
    Attack { targets: Vec<CombatantId> },
    /// Use an owned ability instance against explicit targets. An empty
    /// target list falls back to the ability's own targeting mode.
    UseAbility {
        ability: AbilityId,
        targets: Vec<CombatantId>,
    },
    /// Brace for the next hit: applies the one-shot Guard effect.
    Defend,
    /// Reserved: in-combat item use is not implemented and resolves to a
    /// no-op turn.
    UseItem { item: ItemId },
    /// Pass the turn.
    Skip,
}

impl CombatAction {
    /// Single-target basic attack.
    pub fn attack(target: CombatantId) -> Self {
        Self::Attack {
            targets: vec![target],
        }
    }

    /// Single-target ability use.
    pub fn use_ability(ability: AbilityId, target: CombatantId) -> Self {
        Self::UseAbility {
            ability,
            targets: vec![target],
        }
    }

    /// Ability use with targeting resolved by the ability itself
    /// (`target_all` or nothing).
    pub fn use_ability_auto(ability: AbilityId) -> Self {
        Self::UseAbility {
            ability,
            targets: Vec::new(),
        }
    }
}
