use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use vb_core::combat::{Ability, AbilityId, AbilitySpec, Element, LootTableEntry};
use vb_core::combatant::{
    Combatant, CombatantId, EquipmentPiece, GearKind, ItemId, Side, StatBlock,
};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Catalog entry not found: {0}")]
    NotFound(String),
}

/// The ability catalog: immutable specs keyed by id.
///
/// Combatants never hold references into the catalog; they get value copies
/// via [`AbilityCatalog::instantiate`] so per-owner cooldown state stays
/// independent.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AbilityCatalog {
    abilities: Vec<AbilitySpec>,
}

impl AbilityCatalog {
    pub fn new(abilities: Vec<AbilitySpec>) -> Self {
        Self { abilities }
    }

    /// Load the catalog from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(json)?;
        Ok(catalog)
    }

    pub fn get(&self, id: AbilityId) -> Result<&AbilitySpec, CatalogError> {
        self.abilities
            .iter()
            .find(|spec| spec.id == id)
            .ok_or_else(|| CatalogError::NotFound(format!("ability {}", id.0)))
    }

    /// A fresh per-owner instance of a catalog entry, cooldown cleared.
    pub fn instantiate(&self, id: AbilityId) -> Result<Ability, CatalogError> {
        Ok(Ability::new(self.get(id)?.clone()))
    }

    pub fn len(&self) -> usize {
        self.abilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.abilities.is_empty()
    }
}

/// Catalog definition of an enemy kind, spawned into [`Combatant`]s.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyTemplate {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub element: Element,
    #[serde(default = "default_level")]
    pub level: u8,
    pub stats: StatBlock,
    #[serde(default)]
    pub exp_reward: u32,
    #[serde(default)]
    pub loot_table: Vec<LootTableEntry>,
    /// Ability catalog ids this enemy fights with.
    #[serde(default)]
    pub abilities: Vec<AbilityId>,
}

fn default_level() -> u8 {
    1
}

impl EnemyTemplate {
    /// Build a live enemy combatant from this template.
    ///
    /// Ability ids missing from the catalog are skipped with a warning
    /// rather than failing the whole spawn.
    pub fn spawn(&self, id: CombatantId, abilities: &AbilityCatalog) -> Combatant {
        let mut combatant = Combatant::new(id, self.name.clone(), Side::Enemy)
            .with_base_stats(self.stats.clone())
            .with_level(self.level)
            .with_element(self.element)
            .with_exp_reward(self.exp_reward)
            .with_loot_table(self.loot_table.clone());
        for ability_id in &self.abilities {
            match abilities.instantiate(*ability_id) {
                Ok(ability) => combatant.abilities.push(ability),
                Err(err) => {
                    tracing::warn!(enemy = %self.name, %err, "skipping unknown ability");
                }
            }
        }
        combatant
    }
}

/// The enemy catalog: templates keyed by id.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct EnemyCatalog {
    enemies: Vec<EnemyTemplate>,
}

impl EnemyCatalog {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(json)?;
        Ok(catalog)
    }

    pub fn get(&self, id: u32) -> Result<&EnemyTemplate, CatalogError> {
        self.enemies
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| CatalogError::NotFound(format!("enemy {id}")))
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }
}

/// Broad item classification. Only gear categories can be equipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum::Display)]
pub enum ItemCategory {
    Weapon,
    Armor,
    Accessory,
    #[default]
    Consumable,
    KeyItem,
}

/// Catalog definition of an item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemEntry {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: ItemCategory,
    #[serde(default)]
    pub value: u32,
    /// Stat bonuses granted while equipped (gear categories only).
    #[serde(default)]
    pub bonus_stats: StatBlock,
}

impl ItemEntry {
    /// View this entry as an equippable piece, if its category is gear.
    pub fn as_equipment(&self) -> Option<EquipmentPiece> {
        let kind = match self.category {
            ItemCategory::Weapon => GearKind::Weapon,
            ItemCategory::Armor => GearKind::Armor,
            ItemCategory::Accessory => GearKind::Accessory,
            ItemCategory::Consumable | ItemCategory::KeyItem => return None,
        };
        Some(EquipmentPiece {
            id: self.id,
            name: self.name.clone(),
            kind,
            bonus_stats: self.bonus_stats.clone(),
        })
    }
}

/// The item catalog: entries keyed by id.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ItemCatalog {
    items: Vec<ItemEntry>,
}

impl ItemCatalog {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(json)?;
        Ok(catalog)
    }

    pub fn get(&self, id: ItemId) -> Result<&ItemEntry, CatalogError> {
        self.items
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| CatalogError::NotFound(format!("item {}", id.0)))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
