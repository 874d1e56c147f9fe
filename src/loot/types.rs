use serde::{Deserialize, Serialize};

/// Loot rarity tiers, ordered from most to least common.
///
/// Rarity is descriptive metadata; it only affects outcomes through the
/// drop weights configured per table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common = 0,
    Uncommon = 1,
    Rare = 2,
    Epic = 3,
    Legendary = 4,
}

impl Rarity {
    /// Returns the display name for this rarity tier.
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }

    /// Base drop weight used when seeding the default tables.
    pub fn base_drop_weight(&self) -> f64 {
        match self {
            Rarity::Common => 0.4,
            Rarity::Uncommon => 0.25,
            Rarity::Rare => 0.15,
            Rarity::Epic => 0.08,
            Rarity::Legendary => 0.02,
        }
    }
}

/// Boolean special-effect flags an item can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpecialEffects {
    #[serde(default)]
    pub life_steal: bool,
    #[serde(default)]
    pub explosive_rounds: bool,
    #[serde(default)]
    pub piercing_shots: bool,
    #[serde(default)]
    pub rapid_fire: bool,
    #[serde(default)]
    pub shield_generator: bool,
}

/// A loot catalog entry. Immutable once defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootItem {
    pub name: String,
    pub description: String,
    pub rarity: Rarity,

    // Stat bonuses
    #[serde(default)]
    pub damage_bonus: i32,
    #[serde(default)]
    pub health_bonus: i32,
    #[serde(default)]
    pub speed_bonus: f32,
    #[serde(default)]
    pub ammo_bonus: i32,
    #[serde(default)]
    pub critical_chance_bonus: f32,
    #[serde(default)]
    pub critical_damage_bonus: f32,

    #[serde(default)]
    pub effects: SpecialEffects,

    // Meta progression rewards
    #[serde(default)]
    pub meta_currency_reward: u64,
    #[serde(default)]
    pub skill_points_reward: u64,
    #[serde(default)]
    pub experience_reward: f64,
}

impl LootItem {
    /// A bare item with the given identity and no bonuses.
    pub fn new(name: &str, description: &str, rarity: Rarity) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            rarity,
            damage_bonus: 0,
            health_bonus: 0,
            speed_bonus: 0.0,
            ammo_bonus: 0,
            critical_chance_bonus: 0.0,
            critical_damage_bonus: 0.0,
            effects: SpecialEffects::default(),
            meta_currency_reward: 0,
            skill_points_reward: 0,
            experience_reward: 0.0,
        }
    }
}

/// One possible drop within a loot table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootDrop {
    /// Name of the item in the loot catalog.
    pub item_name: String,
    /// Relative weight for weighted selection among the table's drops.
    pub drop_weight: f64,
    #[serde(default = "default_quantity")]
    pub min_quantity: u32,
    #[serde(default = "default_quantity")]
    pub max_quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// A named collection of possible drops with guaranteed and random draw
/// counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootTable {
    pub name: String,
    pub possible_drops: Vec<LootDrop>,
    /// Independent weighted draws always performed per roll.
    pub guaranteed_drops: u32,
    /// Upper bound on the additional random draw count.
    pub max_random_drops: u32,
    /// Gate applied independently to each additional random draw.
    pub drop_chance: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_ordering() {
        assert!(Rarity::Common < Rarity::Uncommon);
        assert!(Rarity::Uncommon < Rarity::Rare);
        assert!(Rarity::Rare < Rarity::Epic);
        assert!(Rarity::Epic < Rarity::Legendary);
    }

    #[test]
    fn test_rarity_names() {
        assert_eq!(Rarity::Common.name(), "Common");
        assert_eq!(Rarity::Legendary.name(), "Legendary");
    }

    #[test]
    fn test_base_drop_weights_descend_with_rarity() {
        let tiers = [
            Rarity::Common,
            Rarity::Uncommon,
            Rarity::Rare,
            Rarity::Epic,
            Rarity::Legendary,
        ];
        for pair in tiers.windows(2) {
            assert!(pair[0].base_drop_weight() > pair[1].base_drop_weight());
        }
    }

    #[test]
    fn test_new_item_has_no_bonuses() {
        let item = LootItem::new("Trinket", "A plain trinket", Rarity::Common);
        assert_eq!(item.damage_bonus, 0);
        assert_eq!(item.meta_currency_reward, 0);
        assert!(!item.effects.life_steal);
    }

    #[test]
    fn test_drop_quantity_defaults_to_one_in_assets() {
        let json = r#"{"item_name":"Trinket","drop_weight":0.5}"#;
        let drop: LootDrop = serde_json::from_str(json).unwrap();
        assert_eq!(drop.min_quantity, 1);
        assert_eq!(drop.max_quantity, 1);
    }
}
