//! Meta-progression data structures.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::constants::{
    BOSSES_FOR_ABILITY_UNLOCK, KILLS_FOR_COSMETIC_UNLOCK, WAVES_FOR_WEAPON_UNLOCK,
};

/// Default weapon every fresh record starts with.
pub const STARTER_WEAPON: &str = "Basic Sword";
/// Default ability every fresh record starts with.
pub const STARTER_ABILITY: &str = "Quick Heal";

/// The five permanent upgrade kinds, each independently purchasable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeKind {
    Health,
    Damage,
    Speed,
    Ammo,
    Experience,
}

impl UpgradeKind {
    /// All kinds in display order.
    pub const ALL: [UpgradeKind; 5] = [
        UpgradeKind::Health,
        UpgradeKind::Damage,
        UpgradeKind::Speed,
        UpgradeKind::Ammo,
        UpgradeKind::Experience,
    ];

    /// Display name for the kind.
    pub fn name(&self) -> &'static str {
        match self {
            UpgradeKind::Health => "Health",
            UpgradeKind::Damage => "Damage",
            UpgradeKind::Speed => "Speed",
            UpgradeKind::Ammo => "Ammo",
            UpgradeKind::Experience => "Experience",
        }
    }

    /// Meta-currency cost of one purchase. Costs do not scale with
    /// purchase count.
    pub fn cost(&self) -> u64 {
        match self {
            UpgradeKind::Health => 100,
            UpgradeKind::Damage => 150,
            UpgradeKind::Speed => 200,
            UpgradeKind::Ammo => 75,
            UpgradeKind::Experience => 300,
        }
    }
}

/// Threshold configuration for the unlock rule engine.
///
/// Each counter unlocks a first feature at the base requirement and a
/// second at twice the base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnlockRules {
    pub waves_for_weapon_unlock: u32,
    pub bosses_for_ability_unlock: u64,
    pub kills_for_cosmetic_unlock: u64,
}

impl Default for UnlockRules {
    fn default() -> Self {
        Self {
            waves_for_weapon_unlock: WAVES_FOR_WEAPON_UNLOCK,
            bosses_for_ability_unlock: BOSSES_FOR_ABILITY_UNLOCK,
            kills_for_cosmetic_unlock: KILLS_FOR_COSMETIC_UNLOCK,
        }
    }
}

/// The single durable cross-session aggregate. Exactly one instance exists
/// per player; the ledger persists it after every mutating operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MetaProgressionRecord {
    // Play-session counters
    pub total_games_played: u32,
    pub total_waves_completed: u32,
    pub total_enemies_killed: u64,
    pub total_bosses_killed: u64,
    pub total_experience_gained: f64,
    pub highest_wave_reached: u32,
    pub best_game_time_secs: f64,

    // Permanent upgrades
    pub permanent_health_bonus: u32,
    pub permanent_damage_bonus: u32,
    pub permanent_speed_bonus: f64,
    pub permanent_ammo_bonus: u32,
    pub permanent_experience_bonus: f64,

    // Unlocked features
    pub unlocked_weapons: BTreeSet<String>,
    pub unlocked_abilities: BTreeSet<String>,
    pub unlocked_cosmetics: BTreeSet<String>,

    // Currency and resources
    pub meta_currency: u64,
    pub skill_points: u64,

    // Statistics
    pub enemy_kill_counts: BTreeMap<String, u64>,
    pub weapon_usage_secs: BTreeMap<String, f64>,

    /// Unix timestamp of the last successful save. Zero until first saved.
    #[serde(default)]
    pub last_saved_at: i64,
}

impl MetaProgressionRecord {
    /// A fresh record with the starter unlocks applied.
    pub fn fresh() -> Self {
        let mut record = Self::default();
        record.apply_starter_unlocks();
        record
    }

    /// Ensures the starter weapon and ability are present. Idempotent;
    /// also run on loaded records so old saves pick up the defaults.
    pub fn apply_starter_unlocks(&mut self) {
        if self.unlocked_weapons.is_empty() {
            self.unlocked_weapons.insert(STARTER_WEAPON.to_string());
        }
        if self.unlocked_abilities.is_empty() {
            self.unlocked_abilities.insert(STARTER_ABILITY.to_string());
        }
    }

    /// Kill count for a specific enemy type.
    pub fn kills_of(&self, type_name: &str) -> u64 {
        self.enemy_kill_counts.get(type_name).copied().unwrap_or(0)
    }
}
