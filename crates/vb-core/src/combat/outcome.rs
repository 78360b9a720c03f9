//! Per-target and per-turn result records.
//!
//! Outcomes are informational, for the driver to display: the engine
//! mutates combatant HP/MP directly and never re-derives state from them.

use serde::{Deserialize, Serialize};

use crate::combatant::{CombatantId, StatusTick};

/// What one action did to one target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub target: CombatantId,
    /// Damage actually applied (post-floor, post-multipliers).
    pub damage: i32,
    /// Healing actually requested (HP was clamped at the maximum).
    pub heal: i32,
    /// Names of status effects inflicted on the target.
    pub statuses: Vec<String>,
    /// Elemental multiplier that went into the damage, for display.
    pub effectiveness: f32,
}

impl ActionOutcome {
    pub fn new(target: CombatantId) -> Self {
        Self {
            target,
            damage: 0,
            heal: 0,
            statuses: Vec::new(),
            effectiveness: 1.0,
        }
    }
}

/// Everything that happened during one call to
/// [`CombatManager::execute_turn`].
///
/// [`CombatManager::execute_turn`]: crate::combat::CombatManager::execute_turn
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TurnResult {
    /// Whose turn resolved; `None` when the call was a no-op.
    pub actor: Option<CombatantId>,
    /// Status-effect damage/heal applied to the actor at turn start.
    pub status_tick: StatusTick,
    /// Per-target results of the executed action; empty for a skipped turn.
    pub outcomes: Vec<ActionOutcome>,
    /// True when this turn closed out a full round.
    pub round_completed: bool,
}

impl TurnResult {
    /// The no-op result: combat inactive or no current actor.
    pub fn empty() -> Self {
        Self::default()
    }
}
