//! Valebrand combat engine.
//!
//! Deterministic turn-based combat for a party-vs-enemies RPG: combatants
//! with derived stats, equipment and status effects, data-driven abilities
//! with elemental damage, and a [`combat::CombatManager`] that resolves one
//! queued action per turn. The engine is headless; rendering, input, and
//! persistence of anything beyond combatant definitions live in the driver.

pub mod combat;
pub mod combatant;
mod consts;
mod rng;

pub use consts::*;
pub use rng::GameRng;
