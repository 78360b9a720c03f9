//! Core engine constants.

/// Every damaging hit applies at least this much damage, regardless of
/// defense or resistances.
pub const MIN_DAMAGE: i32 = 1;

/// Default base stat line for a freshly created combatant.
pub const DEFAULT_HP: i32 = 100;
pub const DEFAULT_MP: i32 = 50;
pub const DEFAULT_ATK: i32 = 10;
pub const DEFAULT_DEF: i32 = 8;
pub const DEFAULT_VEL: i32 = 10;
pub const DEFAULT_MAG: i32 = 5;

/// Name of the one-shot status effect applied by the Defend action.
pub const GUARD_EFFECT: &str = "Guard";

/// Incoming damage multiplier while guarding.
pub const GUARD_MULTIPLIER: f32 = 0.5;
