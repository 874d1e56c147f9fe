//! Interfaces implemented by the host engine.
//!
//! The core decides *which* enemy or item and *when*; world placement,
//! instantiation, and presentation belong to the host. Collaborators are
//! injected into [`crate::session::Session`] at construction — there is no
//! ambient global lookup.

use crate::enemies::EnemyType;
use crate::loot::LootItem;

/// A world-space position supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Opaque handle to a spawned enemy, issued by the host's spawn provider.
///
/// The host reports each enemy's death exactly once via
/// [`crate::session::Session::on_enemy_defeated`] with this handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnemyHandle(pub u64);

/// Spawns and despawns enemy instances in the world.
pub trait SpawnProvider {
    /// Picks a world position for the next spawn.
    fn request_spawn_position(&mut self) -> Position;

    /// Instantiates an enemy of the given type at the given position.
    fn spawn_enemy(&mut self, enemy_type: &EnemyType, position: Position) -> EnemyHandle;

    /// Removes a live enemy from the world. Used by the wave director's
    /// hard reset; the host must not report a defeat for a despawned handle.
    fn despawn_enemy(&mut self, handle: EnemyHandle);
}

/// Presents an awarded loot item in the world (drop visuals, pickup, audio).
pub trait RewardPresenter {
    fn present_loot_item(&mut self, item: &LootItem, position: Position);
}
