//! Loot items, loot tables, and the boss loot roll engine.

pub mod rolls;
pub mod tables;
pub mod types;

pub use rolls::LootRollEngine;
pub use tables::LootCatalog;
pub use types::{LootDrop, LootItem, LootTable, Rarity, SpecialEffects};
