//! The meta-progression ledger: every cross-session mutation goes through
//! here, and each one is persisted before the operation is considered
//! complete. A crash loses at most the operation in flight.

use std::mem;

use tracing::{debug, warn};

use super::persistence::ProgressStore;
use super::types::{MetaProgressionRecord, UnlockRules, UpgradeKind};

// Feature identifiers granted by the unlock rule engine.
const WEAPON_UNLOCK_TIER1: &str = "Advanced Rifle";
const WEAPON_UNLOCK_TIER2: &str = "Plasma Cannon";
const ABILITY_UNLOCK_TIER1: &str = "Shield";
const ABILITY_UNLOCK_TIER2: &str = "Time Slow";
const COSMETIC_UNLOCK_TIER1: &str = "Golden Armor";
const COSMETIC_UNLOCK_TIER2: &str = "Particle Trail";

/// A notification produced by a ledger mutation. Drained in FIFO order via
/// [`MetaLedger::take_events`].
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// A feature crossed its unlock threshold. The label carries the
    /// feature category, e.g. `"Weapon: Advanced Rifle"`.
    FeatureUnlocked { label: String },
    /// A permanent upgrade was bought.
    UpgradePurchased { kind: UpgradeKind },
}

/// Owns the durable record and the store behind it.
pub struct MetaLedger {
    record: MetaProgressionRecord,
    rules: UnlockRules,
    store: Box<dyn ProgressStore>,
    pending_events: Vec<ProgressEvent>,
}

impl MetaLedger {
    /// Loads the record from the store, or starts fresh if it is absent or
    /// unreadable. Starter unlocks are applied either way.
    pub fn new(store: Box<dyn ProgressStore>) -> Self {
        Self::with_rules(store, UnlockRules::default())
    }

    pub fn with_rules(mut store: Box<dyn ProgressStore>, rules: UnlockRules) -> Self {
        let record = match store.load() {
            Some(mut record) => {
                record.apply_starter_unlocks();
                record
            }
            None => MetaProgressionRecord::fresh(),
        };

        Self {
            record,
            rules,
            store,
            pending_events: Vec::new(),
        }
    }

    // ── Session tracking ────────────────────────────────────────

    pub fn record_game_start(&mut self) {
        self.record.total_games_played += 1;
        self.persist();
    }

    /// Records a completed wave, updating the highest-wave watermark.
    pub fn record_wave_complete(&mut self, wave_number: u32) {
        self.record.total_waves_completed += 1;
        if wave_number > self.record.highest_wave_reached {
            self.record.highest_wave_reached = wave_number;
        }
        self.check_unlocks();
        self.persist();
    }

    /// Records an enemy kill: total and per-type counters, then unlock
    /// evaluation.
    pub fn record_enemy_kill(&mut self, type_name: &str, is_boss: bool) {
        self.record.total_enemies_killed += 1;
        if is_boss {
            self.record.total_bosses_killed += 1;
        }

        *self
            .record
            .enemy_kill_counts
            .entry(type_name.to_string())
            .or_insert(0) += 1;

        self.check_unlocks();
        self.persist();
    }

    pub fn record_experience_gained(&mut self, amount: f64) {
        self.record.total_experience_gained += amount;
        self.persist();
    }

    /// Records the end of a session, keeping the longest survival time.
    pub fn record_game_end(&mut self, elapsed_secs: f64) {
        if elapsed_secs > self.record.best_game_time_secs {
            self.record.best_game_time_secs = elapsed_secs;
        }
        self.persist();
    }

    pub fn record_weapon_usage(&mut self, weapon_name: &str, secs: f64) {
        *self
            .record
            .weapon_usage_secs
            .entry(weapon_name.to_string())
            .or_insert(0.0) += secs;
        self.persist();
    }

    // ── Upgrades and currency ───────────────────────────────────

    pub fn can_purchase_upgrade(&self, kind: UpgradeKind) -> bool {
        self.record.meta_currency >= kind.cost()
    }

    /// Buys one increment of a permanent upgrade. Returns `false` with no
    /// mutation when the balance is insufficient.
    pub fn purchase_upgrade(&mut self, kind: UpgradeKind) -> bool {
        let cost = kind.cost();
        if self.record.meta_currency < cost {
            return false;
        }

        self.record.meta_currency -= cost;
        match kind {
            UpgradeKind::Health => self.record.permanent_health_bonus += 10,
            UpgradeKind::Damage => self.record.permanent_damage_bonus += 5,
            UpgradeKind::Speed => self.record.permanent_speed_bonus += 0.5,
            UpgradeKind::Ammo => self.record.permanent_ammo_bonus += 5,
            UpgradeKind::Experience => self.record.permanent_experience_bonus += 0.1,
        }

        self.pending_events
            .push(ProgressEvent::UpgradePurchased { kind });
        self.persist();
        true
    }

    pub fn add_currency(&mut self, amount: u64) {
        self.record.meta_currency += amount;
        self.persist();
    }

    pub fn add_skill_points(&mut self, amount: u64) {
        self.record.skill_points += amount;
        self.persist();
    }

    /// Replaces the record with a fresh default (starter unlocks included).
    pub fn reset_all_progress(&mut self) {
        self.record = MetaProgressionRecord::fresh();
        self.persist();
        debug!("meta progression reset to defaults");
    }

    // ── Unlock rule engine ──────────────────────────────────────

    /// Evaluates every unlock threshold. Unlocking is idempotent: content
    /// already present in a set is never re-unlocked and emits nothing.
    fn check_unlocks(&mut self) {
        let waves = self.record.total_waves_completed;
        if waves >= self.rules.waves_for_weapon_unlock {
            self.unlock_weapon(WEAPON_UNLOCK_TIER1);
        }
        if waves >= self.rules.waves_for_weapon_unlock * 2 {
            self.unlock_weapon(WEAPON_UNLOCK_TIER2);
        }

        let bosses = self.record.total_bosses_killed;
        if bosses >= self.rules.bosses_for_ability_unlock {
            self.unlock_ability(ABILITY_UNLOCK_TIER1);
        }
        if bosses >= self.rules.bosses_for_ability_unlock * 2 {
            self.unlock_ability(ABILITY_UNLOCK_TIER2);
        }

        let kills = self.record.total_enemies_killed;
        if kills >= self.rules.kills_for_cosmetic_unlock {
            self.unlock_cosmetic(COSMETIC_UNLOCK_TIER1);
        }
        if kills >= self.rules.kills_for_cosmetic_unlock * 2 {
            self.unlock_cosmetic(COSMETIC_UNLOCK_TIER2);
        }
    }

    fn unlock_weapon(&mut self, name: &str) {
        if self.record.unlocked_weapons.insert(name.to_string()) {
            self.pending_events.push(ProgressEvent::FeatureUnlocked {
                label: format!("Weapon: {}", name),
            });
        }
    }

    fn unlock_ability(&mut self, name: &str) {
        if self.record.unlocked_abilities.insert(name.to_string()) {
            self.pending_events.push(ProgressEvent::FeatureUnlocked {
                label: format!("Ability: {}", name),
            });
        }
    }

    fn unlock_cosmetic(&mut self, name: &str) {
        if self.record.unlocked_cosmetics.insert(name.to_string()) {
            self.pending_events.push(ProgressEvent::FeatureUnlocked {
                label: format!("Cosmetic: {}", name),
            });
        }
    }

    // ── Accessors ───────────────────────────────────────────────

    /// Read-only view of the record.
    pub fn record(&self) -> &MetaProgressionRecord {
        &self.record
    }

    /// Detached copy of the record.
    pub fn snapshot(&self) -> MetaProgressionRecord {
        self.record.clone()
    }

    pub fn meta_currency(&self) -> u64 {
        self.record.meta_currency
    }

    pub fn skill_points(&self) -> u64 {
        self.record.skill_points
    }

    pub fn health_bonus(&self) -> u32 {
        self.record.permanent_health_bonus
    }

    pub fn damage_bonus(&self) -> u32 {
        self.record.permanent_damage_bonus
    }

    pub fn speed_bonus(&self) -> f64 {
        self.record.permanent_speed_bonus
    }

    pub fn ammo_bonus(&self) -> u32 {
        self.record.permanent_ammo_bonus
    }

    /// Multiplicative experience bonus fraction (0.1 = +10%).
    pub fn experience_bonus(&self) -> f64 {
        self.record.permanent_experience_bonus
    }

    /// Drains pending notifications in the order they were produced.
    pub fn take_events(&mut self) -> Vec<ProgressEvent> {
        mem::take(&mut self.pending_events)
    }

    // ── Persistence ─────────────────────────────────────────────

    /// Write-through: called at the end of every mutating operation. A
    /// failed save is logged and the in-memory record stays authoritative.
    fn persist(&mut self) {
        self.record.last_saved_at = chrono::Utc::now().timestamp();
        if let Err(e) = self.store.save(&self.record) {
            warn!("failed to persist meta progression: {}", e);
        }
    }
}
