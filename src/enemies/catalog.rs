//! The enemy catalog: loaded once at startup, never mutated afterwards.

use std::path::Path;

use rand::Rng;
use tracing::warn;

use crate::config::{load_json_asset, CatalogError};
use crate::random::pick_weighted;

use super::types::EnemyType;

/// Immutable collection of enemy types, looked up by name.
#[derive(Debug, Clone)]
pub struct EnemyCatalog {
    entries: Vec<EnemyType>,
}

impl EnemyCatalog {
    /// Builds a catalog from explicit entries.
    pub fn from_entries(entries: Vec<EnemyType>) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::Empty("enemy catalog".to_string()));
        }
        Ok(Self { entries })
    }

    /// Loads a catalog from a JSON asset file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let entries: Vec<EnemyType> = load_json_asset(path)?;
        Self::from_entries(entries)
    }

    /// Loads from the asset file if present, otherwise seeds the built-in
    /// default roster. A present-but-broken asset falls back too, with a
    /// warning.
    pub fn load_or_seed(path: &Path) -> Self {
        match Self::load(path) {
            Ok(catalog) => catalog,
            Err(CatalogError::NotFound(_)) => Self::seed_defaults(),
            Err(e) => {
                warn!("enemy catalog asset unusable ({}), using seed data", e);
                Self::seed_defaults()
            }
        }
    }

    /// The built-in enemy roster.
    pub fn seed_defaults() -> Self {
        Self {
            entries: vec![
                EnemyType {
                    name: "Basic Enemy".to_string(),
                    health: 50,
                    speed: 3.0,
                    damage: 10,
                    spawn_weight: 1.0,
                    is_boss: false,
                },
                EnemyType {
                    name: "Fast Enemy".to_string(),
                    health: 30,
                    speed: 5.0,
                    damage: 5,
                    spawn_weight: 0.7,
                    is_boss: false,
                },
                EnemyType {
                    name: "Tank Enemy".to_string(),
                    health: 100,
                    speed: 2.0,
                    damage: 15,
                    spawn_weight: 0.5,
                    is_boss: false,
                },
                EnemyType {
                    name: "Boss".to_string(),
                    health: 200,
                    speed: 2.5,
                    damage: 25,
                    spawn_weight: 0.1,
                    is_boss: true,
                },
            ],
        }
    }

    pub fn entries(&self) -> &[EnemyType] {
        &self.entries
    }

    /// Looks up an enemy type by name.
    pub fn get(&self, name: &str) -> Option<&EnemyType> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Looks up an enemy type, falling back to the first catalog entry for
    /// unknown names. Configuration errors are recoverable, never fatal.
    pub fn get_or_first(&self, name: &str) -> &EnemyType {
        self.get(name).unwrap_or_else(|| {
            warn!("unknown enemy type '{}', using first catalog entry", name);
            &self.entries[0]
        })
    }

    /// Weighted draw restricted to bosses or non-bosses.
    ///
    /// If no entry matches the boss filter, falls back to the first catalog
    /// entry regardless of its flag.
    pub fn pick_random<R: Rng>(&self, rng: &mut R, boss_only: bool) -> &EnemyType {
        let matching: Vec<&EnemyType> = self
            .entries
            .iter()
            .filter(|e| e.is_boss == boss_only)
            .collect();

        if matching.is_empty() {
            warn!(
                "no {} entries in enemy catalog, using first entry",
                if boss_only { "boss" } else { "non-boss" }
            );
            return &self.entries[0];
        }

        pick_weighted(rng, &matching, |e| e.spawn_weight).copied()
            .unwrap_or(&self.entries[0])
    }
}
