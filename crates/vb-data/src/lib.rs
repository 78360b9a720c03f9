//! Content catalogs for the Valebrand engine.
//!
//! JSON-backed definitions of abilities, enemies, and items, loaded at
//! startup and turned into live [`vb_core`] values on demand. The engine
//! itself never touches the filesystem; everything data goes through here.

mod catalog;

pub use catalog::{
    AbilityCatalog, CatalogError, EnemyCatalog, EnemyTemplate, ItemCatalog, ItemCategory,
    ItemEntry,
};
