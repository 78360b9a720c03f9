//! Catalog loading against the shipped data files.

use std::path::PathBuf;

use vb_core::combat::{AbilityId, AbilityKind, Element, PartyPosition};
use vb_core::combatant::{CombatantId, ItemId, StatKind};
use vb_data::{AbilityCatalog, CatalogError, EnemyCatalog, ItemCatalog, ItemCategory};

fn data_path(file: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(file)
}

#[test]
fn test_shipped_ability_catalog_loads() {
    let catalog = AbilityCatalog::load_from_file(data_path("abilities.json")).unwrap();
    assert!(!catalog.is_empty());

    let fireball = catalog.get(AbilityId(1)).unwrap();
    assert_eq!(fireball.name, "Fireball");
    assert_eq!(fireball.element, Element::Fire);
    assert_eq!(fireball.mp_cost, 10);
    // Omitted fields come back as neutral defaults.
    assert_eq!(fireball.cooldown, 0);
    assert_eq!(fireball.heal, 0);
    assert_eq!(fireball.required_level, 1);
    assert!(!fireball.target_all);

    let longshot = catalog.get(AbilityId(8)).unwrap();
    assert_eq!(longshot.required_position, Some(PartyPosition::Rear));

    let war_cry = catalog.get(AbilityId(9)).unwrap();
    assert_eq!(war_cry.kind, AbilityKind::Support);
    assert_eq!(war_cry.status_effects.len(), 1);
    assert_eq!(
        war_cry.status_effects[0].stat_modifiers.get(StatKind::Atk),
        4
    );
}

#[test]
fn test_missing_ability_id_is_not_found() {
    let catalog = AbilityCatalog::load_from_file(data_path("abilities.json")).unwrap();
    assert!(matches!(
        catalog.get(AbilityId(999)),
        Err(CatalogError::NotFound(_))
    ));
}

#[test]
fn test_instantiated_abilities_have_independent_cooldowns() {
    let catalog = AbilityCatalog::load_from_file(data_path("abilities.json")).unwrap();
    let mut first = catalog.instantiate(AbilityId(3)).unwrap();
    let second = catalog.instantiate(AbilityId(3)).unwrap();

    first.trigger_cooldown();
    assert_eq!(first.cooldown_remaining, 3);
    assert_eq!(second.cooldown_remaining, 0);
}

#[test]
fn test_enemy_template_spawns_live_combatant() {
    let abilities = AbilityCatalog::load_from_file(data_path("abilities.json")).unwrap();
    let enemies = EnemyCatalog::load_from_file(data_path("enemies.json")).unwrap();

    let wolf = enemies.get(2).unwrap().spawn(CombatantId(7), &abilities);
    assert_eq!(wolf.name, "Frost Wolf");
    assert_eq!(wolf.element, Element::Ice);
    assert_eq!(wolf.level, 3);
    assert_eq!(wolf.hp(), 60);
    assert_eq!(wolf.stat(StatKind::Vel), 14);
    assert_eq!(wolf.exp_reward, 40);
    assert_eq!(wolf.abilities.len(), 1);
    assert_eq!(wolf.abilities[0].spec.id, AbilityId(2));
    assert_eq!(wolf.loot_table.len(), 1);
    assert_eq!(wolf.loot_table[0].max_quantity, 2);
}

#[test]
fn test_spawn_skips_unknown_ability_ids() {
    let abilities = AbilityCatalog::from_json_str(r#"{ "abilities": [] }"#).unwrap();
    let enemies = EnemyCatalog::load_from_file(data_path("enemies.json")).unwrap();

    // Template references ability 1, absent from the empty catalog.
    let imp = enemies.get(1).unwrap().spawn(CombatantId(1), &abilities);
    assert!(imp.abilities.is_empty());
    assert_eq!(imp.hp(), 45);
}

#[test]
fn test_item_catalog_gear_converts_to_equipment() {
    let items = ItemCatalog::load_from_file(data_path("items.json")).unwrap();

    let sword = items.get(ItemId(1)).unwrap();
    assert_eq!(sword.category, ItemCategory::Weapon);
    let piece = sword.as_equipment().unwrap();
    assert_eq!(piece.bonus_stats.get(StatKind::Atk), 5);

    // Consumables and key items are not equippable.
    assert!(items.get(ItemId(3)).unwrap().as_equipment().is_none());
    assert!(items.get(ItemId(6)).unwrap().as_equipment().is_none());

    // Category defaults to Consumable when omitted.
    assert_eq!(
        items.get(ItemId(5)).unwrap().category,
        ItemCategory::Consumable
    );
}

#[test]
fn test_malformed_json_reports_serialization_error() {
    let result = AbilityCatalog::from_json_str("{ not json");
    assert!(matches!(result, Err(CatalogError::Serialization(_))));
}

#[test]
fn test_missing_file_reports_io_error() {
    let result = ItemCatalog::load_from_file(data_path("no_such_file.json"));
    assert!(matches!(result, Err(CatalogError::Io(_))));
}
