//! Loot rolling over declared drop tables.
//!
//! Enemies declare weighted entries; after victory one cumulative-weight
//! draw is made per defeated enemy. A zero-weight entry never drops and an
//! empty table drops nothing — no drop rates are invented beyond what the
//! table declares.

use serde::{Deserialize, Serialize};

use crate::combatant::ItemId;
use crate::rng::GameRng;

/// One declared entry in an enemy's drop table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootTableEntry {
    pub item: ItemId,
    /// Relative draw weight; 0 means the entry can never drop.
    #[serde(default)]
    pub weight: u32,
    /// Upper bound for the rolled quantity (at least 1 when dropped).
    #[serde(default = "default_max_quantity")]
    pub max_quantity: u32,
}

fn default_max_quantity() -> u32 {
    1
}

/// An item drop produced by a loot roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootDrop {
    pub item: ItemId,
    pub quantity: u32,
}

/// Draw one entry from a table by cumulative weight.
///
/// Returns `None` for an empty table or one whose weights sum to zero.
pub fn roll_loot(table: &[LootTableEntry], rng: &mut GameRng) -> Option<LootDrop> {
    let total: u32 = table.iter().map(|e| e.weight).sum();
    if total == 0 {
        return None;
    }

    let roll = rng.rn2(total);
    let mut accumulated = 0;
    for entry in table {
        accumulated += entry.weight;
        if roll < accumulated {
            let quantity = rng.rnd(entry.max_quantity).max(1);
            return Some(LootDrop {
                item: entry.item,
                quantity,
            });
        }
    }

    None
}
