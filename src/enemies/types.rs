use serde::{Deserialize, Serialize};

/// A catalog entry describing one kind of enemy.
///
/// Entries are immutable once the catalog is built; wave specs reference
/// them by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyType {
    pub name: String,
    pub health: u32,
    pub speed: f32,
    pub damage: u32,
    /// Relative weight for weighted selection. Higher = more likely.
    pub spawn_weight: f64,
    #[serde(default)]
    pub is_boss: bool,
}
