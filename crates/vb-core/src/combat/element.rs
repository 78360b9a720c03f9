//! Elemental effectiveness.
//!
//! A static attack-element × defense-element multiplier table. Pure
//! functions, no state; any pair not listed is neutral (1.0).

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Attack and defense elements.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Element {
    Fire,
    Water,
    Earth,
    Ice,
    Physical,
    #[default]
    Neutral,
}

/// Damage multiplier for an attack element against a defense element.
///
/// 2.0 = super effective, 0.5 = resisted, 1.0 = neutral. Same-element
/// attacks are resisted. Physical and Neutral are flat 1.0 both ways.
pub const fn effectiveness(attack: Element, defense: Element) -> f32 {
    use Element::*;
    match (attack, defense) {
        (Fire, Ice) => 2.0,
        (Fire, Fire) | (Fire, Earth) | (Fire, Water) => 0.5,

        (Water, Fire) => 2.0,
        (Water, Water) | (Water, Earth) | (Water, Ice) => 0.5,

        (Earth, Water) => 2.0,
        (Earth, Fire) => 1.5,
        (Earth, Earth) | (Earth, Ice) => 0.5,

        (Ice, Earth) => 2.0,
        (Ice, Water) => 1.5,
        (Ice, Ice) | (Ice, Fire) => 0.5,

        _ => 1.0,
    }
}

/// Scale a damage subtotal by the elemental multiplier.
pub fn scale_damage(base_damage: f32, attack: Element, defense: Element) -> f32 {
    base_damage * effectiveness(attack, defense)
}

/// Display label for an effectiveness multiplier.
pub fn effectiveness_label(multiplier: f32) -> &'static str {
    if multiplier >= 2.0 {
        "super effective!"
    } else if multiplier >= 1.5 {
        "very effective"
    } else if multiplier <= 0.5 {
        "not very effective"
    } else {
        "effective"
    }
}
