//! Session orchestration.
//!
//! A [`Session`] wires the wave director, loot roll engine, meta ledger,
//! and leveling ledger together with the host collaborators, all injected
//! at construction. The host drives it with `update(dt)` once per tick and
//! reports enemy deaths through `on_enemy_defeated`; every call returns the
//! notifications it produced, in the order they occurred.

use rand::Rng;
use tracing::warn;

use crate::constants::{BASIC_BOSS_TABLE, KILL_XP_BOSS, KILL_XP_REGULAR};
use crate::enemies::EnemyCatalog;
use crate::host::{EnemyHandle, Position, RewardPresenter, SpawnProvider};
use crate::leveling::logic::LevelEvent;
use crate::leveling::SessionLeveling;
use crate::loot::{LootCatalog, LootRollEngine, Rarity};
use crate::meta::{MetaLedger, ProgressEvent, ProgressStore, UpgradeKind};
use crate::waves::{DirectorConfig, WaveDirector, WaveEvent, WavePhase};

/// A notification produced by a session call, in occurrence order.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    WaveStarted {
        wave_number: u32,
    },
    EnemySpawned {
        handle: EnemyHandle,
        type_name: String,
        is_boss: bool,
    },
    WaveCompleted {
        wave_number: u32,
    },
    AllWavesCompleted,
    /// A loot item was awarded and handed to the reward presenter.
    LootDropped {
        item_name: String,
        rarity: Rarity,
    },
    FeatureUnlocked {
        label: String,
    },
    UpgradePurchased {
        kind: UpgradeKind,
    },
    LeveledUp {
        new_level: u32,
    },
    SkillPurchased {
        name: String,
    },
    /// The session finished, by victory (all waves cleared) or game over.
    GameEnded {
        victory: bool,
        elapsed_secs: f64,
    },
}

/// One play session: explicit dependency-injection root for the core
/// services. Construct once per session; there is no ambient global state.
pub struct Session {
    director: WaveDirector,
    loot: LootRollEngine,
    meta: MetaLedger,
    leveling: SessionLeveling,
    spawner: Box<dyn SpawnProvider>,
    presenter: Box<dyn RewardPresenter>,
    boss_loot_table: String,
    elapsed_secs: f64,
    game_active: bool,
    game_ended: bool,
}

impl Session {
    pub fn new(
        director: WaveDirector,
        loot: LootRollEngine,
        meta: MetaLedger,
        leveling: SessionLeveling,
        spawner: Box<dyn SpawnProvider>,
        presenter: Box<dyn RewardPresenter>,
    ) -> Self {
        Self {
            director,
            loot,
            meta,
            leveling,
            spawner,
            presenter,
            boss_loot_table: BASIC_BOSS_TABLE.to_string(),
            elapsed_secs: 0.0,
            game_active: false,
            game_ended: false,
        }
    }

    /// A session over the seed catalogs with default pacing.
    pub fn with_defaults(
        store: Box<dyn ProgressStore>,
        spawner: Box<dyn SpawnProvider>,
        presenter: Box<dyn RewardPresenter>,
    ) -> Self {
        Self::new(
            WaveDirector::new(EnemyCatalog::seed_defaults(), DirectorConfig::default()),
            LootRollEngine::new(LootCatalog::seed_defaults()),
            MetaLedger::new(store),
            SessionLeveling::new(),
            spawner,
            presenter,
        )
    }

    /// Which loot table boss kills roll on. Defaults to the basic table.
    pub fn set_boss_loot_table(&mut self, table_name: &str) {
        self.boss_loot_table = table_name.to_string();
    }

    // ── Game flow ───────────────────────────────────────────────

    /// Starts the session: records the game start and launches wave 1.
    pub fn begin<R: Rng>(&mut self, rng: &mut R) -> Vec<SessionEvent> {
        if self.game_active || self.game_ended {
            warn!("begin called on a session already in progress or finished");
            return Vec::new();
        }
        self.game_active = true;
        self.meta.record_game_start();

        let mut events = Vec::new();
        let wave_events = self.director.start_next_wave(rng);
        self.process_wave_events(wave_events, &mut events);
        self.drain_ledgers(&mut events);
        events
    }

    /// Advances the session by one host tick.
    pub fn update<R: Rng>(&mut self, dt_secs: f64, rng: &mut R) -> Vec<SessionEvent> {
        if self.game_active {
            self.elapsed_secs += dt_secs;
        }

        let mut events = Vec::new();
        let wave_events = self.director.update(dt_secs, rng, self.spawner.as_mut());
        self.process_wave_events(wave_events, &mut events);
        self.drain_ledgers(&mut events);
        events
    }

    /// Handles an enemy defeat reported by the host. Safe to call at any
    /// tick; handles the director does not track are ignored.
    ///
    /// Boss kills roll loot *before* the director's remaining counter is
    /// decremented, so the wave cannot complete under the loot roll.
    pub fn on_enemy_defeated<R: Rng>(
        &mut self,
        handle: EnemyHandle,
        position: Position,
        rng: &mut R,
    ) -> Vec<SessionEvent> {
        let mut events = Vec::new();

        let Some(record) = self.director.active_enemy(handle).cloned() else {
            warn!("defeat reported for unknown enemy {:?}", handle);
            return events;
        };

        self.meta.record_enemy_kill(&record.type_name, record.is_boss);

        let kill_xp = if record.is_boss {
            KILL_XP_BOSS
        } else {
            KILL_XP_REGULAR
        };
        self.leveling.add_experience(kill_xp, &mut self.meta);

        if record.is_boss {
            let dropped = self.loot.roll_boss_loot(
                rng,
                position,
                &self.boss_loot_table,
                &mut self.meta,
                &mut self.leveling,
                self.presenter.as_mut(),
            );
            for item in &dropped {
                events.push(SessionEvent::LootDropped {
                    item_name: item.name.clone(),
                    rarity: item.rarity,
                });
            }
        }

        let wave_events = self.director.notify_enemy_defeated(handle);
        self.process_wave_events(wave_events, &mut events);
        self.drain_ledgers(&mut events);
        events
    }

    /// Ends the session early: hard-stops the current wave and records the
    /// elapsed time. Used for player death and debug shortcuts.
    pub fn game_over(&mut self) -> Vec<SessionEvent> {
        self.director.stop_current_wave(self.spawner.as_mut());
        let mut events = Vec::new();
        self.finish(false, &mut events);
        self.drain_ledgers(&mut events);
        events
    }

    // ── Purchases ───────────────────────────────────────────────

    /// Buys a permanent upgrade. The notification surfaces on the next
    /// drained call.
    pub fn purchase_upgrade(&mut self, kind: UpgradeKind) -> bool {
        self.meta.purchase_upgrade(kind)
    }

    /// Buys a session skill. The notification surfaces on the next drained
    /// call.
    pub fn purchase_skill(&mut self, name: &str) -> bool {
        self.leveling.purchase_skill(name)
    }

    // ── Accessors ───────────────────────────────────────────────

    pub fn director(&self) -> &WaveDirector {
        &self.director
    }

    pub fn meta(&self) -> &MetaLedger {
        &self.meta
    }

    pub fn meta_mut(&mut self) -> &mut MetaLedger {
        &mut self.meta
    }

    pub fn leveling(&self) -> &SessionLeveling {
        &self.leveling
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    pub fn is_game_active(&self) -> bool {
        self.game_active
    }

    /// True when the director has reached its terminal phase.
    pub fn is_all_complete(&self) -> bool {
        self.director.phase() == WavePhase::AllComplete
    }

    // ── Internals ───────────────────────────────────────────────

    fn process_wave_events(&mut self, wave_events: Vec<WaveEvent>, out: &mut Vec<SessionEvent>) {
        for event in wave_events {
            match event {
                WaveEvent::WaveStarted { wave_number } => {
                    out.push(SessionEvent::WaveStarted { wave_number });
                }
                WaveEvent::EnemySpawned {
                    handle,
                    type_name,
                    is_boss,
                } => {
                    out.push(SessionEvent::EnemySpawned {
                        handle,
                        type_name,
                        is_boss,
                    });
                }
                WaveEvent::WaveCompleted { wave_number } => {
                    self.meta.record_wave_complete(wave_number);
                    out.push(SessionEvent::WaveCompleted { wave_number });
                }
                WaveEvent::AllWavesCompleted => {
                    out.push(SessionEvent::AllWavesCompleted);
                    self.finish(true, out);
                }
            }
        }
    }

    fn finish(&mut self, victory: bool, out: &mut Vec<SessionEvent>) {
        if self.game_ended {
            return;
        }
        self.game_ended = true;
        self.game_active = false;
        self.meta.record_game_end(self.elapsed_secs);
        out.push(SessionEvent::GameEnded {
            victory,
            elapsed_secs: self.elapsed_secs,
        });
    }

    /// Moves pending ledger notifications into the outgoing event list.
    /// Within each ledger the order is FIFO production order.
    fn drain_ledgers(&mut self, out: &mut Vec<SessionEvent>) {
        for event in self.meta.take_events() {
            out.push(match event {
                ProgressEvent::FeatureUnlocked { label } => {
                    SessionEvent::FeatureUnlocked { label }
                }
                ProgressEvent::UpgradePurchased { kind } => {
                    SessionEvent::UpgradePurchased { kind }
                }
            });
        }
        for event in self.leveling.take_events() {
            out.push(match event {
                LevelEvent::LeveledUp { new_level } => SessionEvent::LeveledUp { new_level },
                LevelEvent::SkillPurchased { name } => SessionEvent::SkillPurchased { name },
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::MemoryStore;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(77)
    }

    #[derive(Default)]
    struct MockSpawner {
        next_handle: u64,
    }

    impl SpawnProvider for MockSpawner {
        fn request_spawn_position(&mut self) -> Position {
            Position::default()
        }

        fn spawn_enemy(
            &mut self,
            _enemy_type: &crate::enemies::EnemyType,
            _position: Position,
        ) -> EnemyHandle {
            let handle = EnemyHandle(self.next_handle);
            self.next_handle += 1;
            handle
        }

        fn despawn_enemy(&mut self, _handle: EnemyHandle) {}
    }

    struct MockPresenter;

    impl RewardPresenter for MockPresenter {
        fn present_loot_item(&mut self, _item: &crate::loot::LootItem, _position: Position) {}
    }

    fn test_session() -> Session {
        Session::with_defaults(
            Box::new(MemoryStore::new()),
            Box::new(MockSpawner::default()),
            Box::new(MockPresenter),
        )
    }

    #[test]
    fn test_begin_records_game_start_and_launches_wave_one() {
        let mut session = test_session();
        let mut rng = test_rng();

        let events = session.begin(&mut rng);

        assert!(events.contains(&SessionEvent::WaveStarted { wave_number: 1 }));
        assert!(session.is_game_active());
        assert_eq!(session.meta().record().total_games_played, 1);
    }

    #[test]
    fn test_begin_twice_is_rejected() {
        let mut session = test_session();
        let mut rng = test_rng();

        session.begin(&mut rng);
        assert!(session.begin(&mut rng).is_empty());
        assert_eq!(session.meta().record().total_games_played, 1);
    }

    #[test]
    fn test_update_tracks_elapsed_time() {
        let mut session = test_session();
        let mut rng = test_rng();
        session.begin(&mut rng);

        for _ in 0..10 {
            session.update(0.1, &mut rng);
        }
        assert!((session.elapsed_secs() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_defeat_feeds_kill_counters_and_experience() {
        let mut session = test_session();
        let mut rng = test_rng();
        session.begin(&mut rng);

        // Tick until something spawns.
        let mut handle = None;
        for _ in 0..200 {
            let events = session.update(0.1, &mut rng);
            if let Some(SessionEvent::EnemySpawned { handle: h, .. }) = events
                .iter()
                .find(|e| matches!(e, SessionEvent::EnemySpawned { .. }))
            {
                handle = Some(*h);
                break;
            }
        }

        session.on_enemy_defeated(handle.expect("spawn occurred"), Position::default(), &mut rng);

        assert_eq!(session.meta().record().total_enemies_killed, 1);
        // Regular kill XP is 20, boosted by no bonus.
        assert!(session.leveling().experience() > 0.0);
    }

    #[test]
    fn test_unknown_defeat_is_ignored() {
        let mut session = test_session();
        let mut rng = test_rng();
        session.begin(&mut rng);

        let events = session.on_enemy_defeated(EnemyHandle(4242), Position::default(), &mut rng);
        assert!(events.is_empty());
        assert_eq!(session.meta().record().total_enemies_killed, 0);
    }

    #[test]
    fn test_game_over_ends_session_once() {
        let mut session = test_session();
        let mut rng = test_rng();
        session.begin(&mut rng);
        session.update(1.5, &mut rng);

        let events = session.game_over();
        assert!(events.iter().any(|e| matches!(
            e,
            SessionEvent::GameEnded { victory: false, .. }
        )));
        assert!(!session.is_game_active());

        // Second game over produces nothing new.
        assert!(session.game_over().is_empty());
    }

    #[test]
    fn test_purchase_wrappers_delegate() {
        let mut session = test_session();

        assert!(!session.purchase_upgrade(UpgradeKind::Health));
        session.meta_mut().add_currency(100);
        assert!(session.purchase_upgrade(UpgradeKind::Health));

        assert!(!session.purchase_skill("Quick Hands"));
    }
}
