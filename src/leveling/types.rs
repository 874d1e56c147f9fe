use serde::{Deserialize, Serialize};

/// A named, one-time-purchasable modifier to a player stat category.
///
/// The category is a data string ("damage", "health", "reload",
/// "lifesteal") so rosters can come from assets; an unrecognized category
/// degrades to a logged warning when the skill is purchased.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub cost: u32,
    pub category: String,
    #[serde(default)]
    pub unlocked: bool,
}

impl Skill {
    pub fn new(name: &str, cost: u32, category: &str) -> Self {
        Self {
            name: name.to_string(),
            cost,
            category: category.to_string(),
            unlocked: false,
        }
    }
}

/// Multiplicative player stat modifiers built up by skill purchases.
/// All start at 1.0 (no modification).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatMultipliers {
    pub damage: f64,
    pub health: f64,
    pub reload: f64,
    pub lifesteal: f64,
}

impl Default for StatMultipliers {
    fn default() -> Self {
        Self {
            damage: 1.0,
            health: 1.0,
            reload: 1.0,
            lifesteal: 1.0,
        }
    }
}

/// The default skill roster, offered when no asset provides one.
pub fn seed_skills() -> Vec<Skill> {
    vec![
        Skill::new("Sharpened Rounds", 1, "damage"),
        Skill::new("Quick Hands", 1, "reload"),
        Skill::new("Thick Skin", 2, "health"),
        Skill::new("Leeching Rounds", 3, "lifesteal"),
    ]
}
