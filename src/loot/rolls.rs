//! Boss loot rolls.
//!
//! A boss-kill event resolves a named table, draws guaranteed and gated
//! random drops through the shared weighted selector, hands each awarded
//! item to the reward presenter, and forwards the aggregate rewards to the
//! meta and leveling ledgers.

use rand::Rng;
use tracing::{debug, warn};

use crate::host::{Position, RewardPresenter};
use crate::leveling::SessionLeveling;
use crate::meta::MetaLedger;
use crate::random::pick_weighted;

use super::tables::LootCatalog;
use super::types::{LootItem, LootTable};

/// Rolls loot from the immutable catalog.
pub struct LootRollEngine {
    catalog: LootCatalog,
}

impl LootRollEngine {
    pub fn new(catalog: LootCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &LootCatalog {
        &self.catalog
    }

    /// Rolls boss loot and applies all side effects: presentation of each
    /// item at the kill position, currency and skill points to the meta
    /// ledger, experience to the leveling ledger.
    ///
    /// An unknown table name falls back to the first registered table; with
    /// no tables registered this is a logged no-op.
    pub fn roll_boss_loot<R: Rng>(
        &self,
        rng: &mut R,
        position: Position,
        table_name: &str,
        meta: &mut MetaLedger,
        leveling: &mut SessionLeveling,
        presenter: &mut dyn RewardPresenter,
    ) -> Vec<LootItem> {
        let Some(table) = self.catalog.table_or_first(table_name) else {
            warn!("no loot tables registered, boss drops nothing");
            return Vec::new();
        };

        let dropped = self.roll_table(rng, table);
        debug!("boss loot roll on '{}': {} items", table.name, dropped.len());

        for item in &dropped {
            presenter.present_loot_item(item, position);
        }

        let currency: u64 = dropped.iter().map(|i| i.meta_currency_reward).sum();
        let skill_points: u64 = dropped.iter().map(|i| i.skill_points_reward).sum();
        let experience: f64 = dropped.iter().map(|i| i.experience_reward).sum();

        if currency > 0 {
            meta.add_currency(currency);
        }
        if skill_points > 0 {
            meta.add_skill_points(skill_points);
        }
        if experience > 0.0 {
            leveling.add_experience(experience, meta);
        }

        dropped
    }

    /// Draws the item list for one roll of a table, without side effects.
    ///
    /// Guaranteed drops are independent draws (duplicates allowed); the
    /// additional random count is drawn in `[0, max_random_drops]` with
    /// each draw gated by an independent check against the table's drop
    /// chance.
    pub fn roll_table<R: Rng>(&self, rng: &mut R, table: &LootTable) -> Vec<LootItem> {
        let mut dropped = Vec::new();

        for _ in 0..table.guaranteed_drops {
            self.draw_one(rng, table, &mut dropped);
        }

        let random_drops = rng.gen_range(0..=table.max_random_drops);
        for _ in 0..random_drops {
            if rng.gen::<f64>() <= table.drop_chance {
                self.draw_one(rng, table, &mut dropped);
            }
        }

        dropped
    }

    fn draw_one<R: Rng>(&self, rng: &mut R, table: &LootTable, dropped: &mut Vec<LootItem>) {
        let Some(drop) = pick_weighted(rng, &table.possible_drops, |d| d.drop_weight) else {
            return;
        };
        let Some(item) = self.catalog.item(&drop.item_name) else {
            warn!(
                "loot table '{}' references unknown item '{}'",
                table.name, drop.item_name
            );
            return;
        };

        let quantity = if drop.max_quantity > drop.min_quantity {
            rng.gen_range(drop.min_quantity..=drop.max_quantity)
        } else {
            drop.min_quantity
        };
        for _ in 0..quantity.max(1) {
            dropped.push(item.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loot::types::{LootDrop, Rarity};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(1234)
    }

    fn single_item_table(guaranteed: u32, max_random: u32, drop_chance: f64) -> LootRollEngine {
        let mut item = LootItem::new("Lucky Coin", "Always shiny", Rarity::Common);
        item.meta_currency_reward = 5;

        let table = LootTable {
            name: "Coins".to_string(),
            possible_drops: vec![LootDrop {
                item_name: "Lucky Coin".to_string(),
                drop_weight: 1.0,
                min_quantity: 1,
                max_quantity: 1,
            }],
            guaranteed_drops: guaranteed,
            max_random_drops: max_random,
            drop_chance,
        };

        LootRollEngine::new(LootCatalog::from_parts(vec![item], vec![table]).unwrap())
    }

    #[test]
    fn test_guaranteed_drops_always_present() {
        let engine = single_item_table(2, 2, 0.5);
        let table = &engine.catalog().tables()[0];
        let mut rng = test_rng();

        for _ in 0..200 {
            let dropped = engine.roll_table(&mut rng, table);
            assert!(
                dropped.len() >= 2 && dropped.len() <= 4,
                "expected 2..=4 drops, got {}",
                dropped.len()
            );
            assert!(dropped.iter().all(|i| i.name == "Lucky Coin"));
        }
    }

    #[test]
    fn test_zero_drop_chance_yields_only_guaranteed() {
        let engine = single_item_table(2, 3, 0.0);
        let table = &engine.catalog().tables()[0];
        let mut rng = test_rng();

        for _ in 0..100 {
            assert_eq!(engine.roll_table(&mut rng, table).len(), 2);
        }
    }

    #[test]
    fn test_full_drop_chance_can_reach_max() {
        let engine = single_item_table(1, 3, 1.0);
        let table = &engine.catalog().tables()[0];
        let mut rng = test_rng();

        let mut saw_max = false;
        for _ in 0..200 {
            let count = engine.roll_table(&mut rng, table).len();
            assert!(count >= 1 && count <= 4);
            if count == 4 {
                saw_max = true;
            }
        }
        assert!(saw_max, "max drop count never reached in 200 rolls");
    }

    #[test]
    fn test_quantity_range_respected() {
        let item = LootItem::new("Scrap", "", Rarity::Common);
        let table = LootTable {
            name: "Scraps".to_string(),
            possible_drops: vec![LootDrop {
                item_name: "Scrap".to_string(),
                drop_weight: 1.0,
                min_quantity: 2,
                max_quantity: 4,
            }],
            guaranteed_drops: 1,
            max_random_drops: 0,
            drop_chance: 1.0,
        };
        let engine = LootRollEngine::new(LootCatalog::from_parts(vec![item], vec![table]).unwrap());
        let mut rng = test_rng();

        for _ in 0..100 {
            let count = engine
                .roll_table(&mut rng, &engine.catalog().tables()[0])
                .len();
            assert!((2..=4).contains(&count), "quantity {} out of range", count);
        }
    }

    #[test]
    fn test_seed_tables_roll_known_items() {
        let engine = LootRollEngine::new(LootCatalog::seed_defaults());
        let mut rng = test_rng();

        let table = engine.catalog().tables()[0].clone();
        for _ in 0..50 {
            for item in engine.roll_table(&mut rng, &table) {
                assert!(engine.catalog().item(&item.name).is_some());
            }
        }
    }
}
