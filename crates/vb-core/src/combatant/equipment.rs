//! Equipment slots and stat bonuses.
//!
//! Four slots: weapon, armor, and two accessories. Equipping returns the
//! displaced piece so the caller can put it back in an inventory. Bonuses
//! feed into stat recalculation; equipping does NOT recalculate by itself.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::stats::StatBlock;

/// Unique identifier for item definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u32);

/// What kind of slot a piece of equipment goes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum GearKind {
    Weapon,
    Armor,
    Accessory,
}

/// A concrete equipment slot on a combatant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum EquipSlot {
    Weapon,
    Armor,
    Accessory1,
    Accessory2,
}

/// An equippable piece with its stat bonuses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentPiece {
    pub id: ItemId,
    pub name: String,
    pub kind: GearKind,
    #[serde(default)]
    pub bonus_stats: StatBlock,
}

/// The four equipment slots of one combatant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EquipmentSet {
    weapon: Option<EquipmentPiece>,
    armor: Option<EquipmentPiece>,
    accessory1: Option<EquipmentPiece>,
    accessory2: Option<EquipmentPiece>,
}

impl EquipmentSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Equip a piece, returning whatever it displaced.
    ///
    /// Accessories fill the first free accessory slot; when both are
    /// occupied the first one is replaced.
    pub fn equip(&mut self, piece: EquipmentPiece) -> Option<EquipmentPiece> {
        let slot = self.slot_for(&piece);
        self.slot_mut(slot).replace(piece)
    }

    /// Remove and return the piece in a slot, if any.
    pub fn unequip(&mut self, slot: EquipSlot) -> Option<EquipmentPiece> {
        self.slot_mut(slot).take()
    }

    /// The piece currently in a slot.
    pub fn equipped(&self, slot: EquipSlot) -> Option<&EquipmentPiece> {
        match slot {
            EquipSlot::Weapon => self.weapon.as_ref(),
            EquipSlot::Armor => self.armor.as_ref(),
            EquipSlot::Accessory1 => self.accessory1.as_ref(),
            EquipSlot::Accessory2 => self.accessory2.as_ref(),
        }
    }

    /// Sum of all equipped pieces' stat bonuses.
    pub fn stat_bonuses(&self) -> StatBlock {
        let mut total = StatBlock::new();
        for piece in [&self.weapon, &self.armor, &self.accessory1, &self.accessory2]
            .into_iter()
            .flatten()
        {
            total.merge(&piece.bonus_stats);
        }
        total
    }

    fn slot_for(&self, piece: &EquipmentPiece) -> EquipSlot {
        match piece.kind {
            GearKind::Weapon => EquipSlot::Weapon,
            GearKind::Armor => EquipSlot::Armor,
            GearKind::Accessory => {
                if self.accessory1.is_none() {
                    EquipSlot::Accessory1
                } else if self.accessory2.is_none() {
                    EquipSlot::Accessory2
                } else {
                    EquipSlot::Accessory1
                }
            }
        }
    }

    fn slot_mut(&mut self, slot: EquipSlot) -> &mut Option<EquipmentPiece> {
        match slot {
            EquipSlot::Weapon => &mut self.weapon,
            EquipSlot::Armor => &mut self.armor,
            EquipSlot::Accessory1 => &mut self.accessory1,
            EquipSlot::Accessory2 => &mut self.accessory2,
        }
    }
}
