//! The loot catalog: items plus named tables, loaded once at startup.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::{load_json_asset, CatalogError};
use crate::constants::{BASIC_BOSS_TABLE, ELITE_BOSS_TABLE};

use super::types::{LootDrop, LootItem, LootTable, Rarity, SpecialEffects};

/// Rare-and-above entries get this weight boost in the elite table.
const ELITE_RARE_WEIGHT_MULTIPLIER: f64 = 1.5;

/// On-disk shape of the loot asset file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LootAsset {
    pub items: Vec<LootItem>,
    pub tables: Vec<LootTable>,
}

/// Immutable loot catalog: all items plus the registered tables, in
/// registration order.
#[derive(Debug, Clone)]
pub struct LootCatalog {
    items: Vec<LootItem>,
    tables: Vec<LootTable>,
}

impl LootCatalog {
    pub fn from_parts(items: Vec<LootItem>, tables: Vec<LootTable>) -> Result<Self, CatalogError> {
        if items.is_empty() {
            return Err(CatalogError::Empty("loot item catalog".to_string()));
        }
        Ok(Self { items, tables })
    }

    /// Loads the catalog from a JSON asset file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let asset: LootAsset = load_json_asset(path)?;
        Self::from_parts(asset.items, asset.tables)
    }

    /// Loads from the asset file if present, otherwise seeds the built-in
    /// items and boss tables.
    pub fn load_or_seed(path: &Path) -> Self {
        match Self::load(path) {
            Ok(catalog) => catalog,
            Err(CatalogError::NotFound(_)) => Self::seed_defaults(),
            Err(e) => {
                warn!("loot catalog asset unusable ({}), using seed data", e);
                Self::seed_defaults()
            }
        }
    }

    pub fn items(&self) -> &[LootItem] {
        &self.items
    }

    pub fn tables(&self) -> &[LootTable] {
        &self.tables
    }

    pub fn item(&self, name: &str) -> Option<&LootItem> {
        self.items.iter().find(|i| i.name == name)
    }

    /// Resolves a table by name, falling back to the first registered table
    /// for unknown names. Returns `None` only when no tables exist at all.
    pub fn table_or_first(&self, name: &str) -> Option<&LootTable> {
        if let Some(table) = self.tables.iter().find(|t| t.name == name) {
            return Some(table);
        }
        if !self.tables.is_empty() {
            warn!("no loot table named '{}', using first registered table", name);
        }
        self.tables.first()
    }

    /// The built-in item roster and boss tables.
    pub fn seed_defaults() -> Self {
        let items = seed_items();

        // Basic boss table: every item weighted by its rarity.
        let basic_drops = items
            .iter()
            .map(|item| LootDrop {
                item_name: item.name.clone(),
                drop_weight: item.rarity.base_drop_weight(),
                min_quantity: 1,
                max_quantity: 1,
            })
            .collect();

        // Elite boss table: rare+ entries weighted up.
        let elite_drops = items
            .iter()
            .map(|item| {
                let mut weight = item.rarity.base_drop_weight();
                if item.rarity >= Rarity::Rare {
                    weight *= ELITE_RARE_WEIGHT_MULTIPLIER;
                }
                LootDrop {
                    item_name: item.name.clone(),
                    drop_weight: weight,
                    min_quantity: 1,
                    max_quantity: 1,
                }
            })
            .collect();

        let tables = vec![
            LootTable {
                name: BASIC_BOSS_TABLE.to_string(),
                possible_drops: basic_drops,
                guaranteed_drops: 2,
                max_random_drops: 2,
                drop_chance: 0.8,
            },
            LootTable {
                name: ELITE_BOSS_TABLE.to_string(),
                possible_drops: elite_drops,
                guaranteed_drops: 3,
                max_random_drops: 3,
                drop_chance: 1.0,
            },
        ];

        Self { items, tables }
    }
}

fn seed_items() -> Vec<LootItem> {
    vec![
        LootItem {
            health_bonus: 50,
            meta_currency_reward: 10,
            ..LootItem::new("Health Potion", "Restores 50 health", Rarity::Common)
        },
        LootItem {
            ammo_bonus: 20,
            meta_currency_reward: 15,
            ..LootItem::new("Ammo Pack", "Provides extra ammunition", Rarity::Common)
        },
        LootItem {
            damage_bonus: 15,
            speed_bonus: 0.5,
            meta_currency_reward: 25,
            ..LootItem::new("Combat Knife", "Sharp blade for close combat", Rarity::Uncommon)
        },
        LootItem {
            health_bonus: 25,
            meta_currency_reward: 30,
            ..LootItem::new("Reinforced Armor", "Provides additional protection", Rarity::Uncommon)
        },
        LootItem {
            damage_bonus: 25,
            effects: SpecialEffects {
                life_steal: true,
                ..SpecialEffects::default()
            },
            meta_currency_reward: 50,
            skill_points_reward: 1,
            ..LootItem::new("Vampiric Blade", "Steals life from enemies", Rarity::Rare)
        },
        LootItem {
            damage_bonus: 20,
            effects: SpecialEffects {
                explosive_rounds: true,
                ..SpecialEffects::default()
            },
            meta_currency_reward: 60,
            skill_points_reward: 1,
            ..LootItem::new("Explosive Rounds", "Bullets explode on impact", Rarity::Rare)
        },
        LootItem {
            damage_bonus: 40,
            ammo_bonus: 30,
            effects: SpecialEffects {
                rapid_fire: true,
                ..SpecialEffects::default()
            },
            meta_currency_reward: 100,
            skill_points_reward: 2,
            experience_reward: 50.0,
            ..LootItem::new("Plasma Rifle", "Advanced energy weapon", Rarity::Epic)
        },
        LootItem {
            health_bonus: 50,
            effects: SpecialEffects {
                shield_generator: true,
                ..SpecialEffects::default()
            },
            meta_currency_reward: 120,
            skill_points_reward: 2,
            experience_reward: 75.0,
            ..LootItem::new("Shield Generator", "Creates protective barrier", Rarity::Epic)
        },
        LootItem {
            damage_bonus: 75,
            critical_chance_bonus: 0.25,
            critical_damage_bonus: 0.5,
            effects: SpecialEffects {
                explosive_rounds: true,
                piercing_shots: true,
                ..SpecialEffects::default()
            },
            meta_currency_reward: 200,
            skill_points_reward: 5,
            experience_reward: 150.0,
            ..LootItem::new("Dragon's Breath", "Legendary weapon of destruction", Rarity::Legendary)
        },
        LootItem {
            health_bonus: 100,
            speed_bonus: 1.0,
            effects: SpecialEffects {
                shield_generator: true,
                ..SpecialEffects::default()
            },
            meta_currency_reward: 250,
            skill_points_reward: 5,
            experience_reward: 200.0,
            ..LootItem::new("Phoenix Armor", "Resurrects you once per game", Rarity::Legendary)
        },
    ]
}
