//! Integration test: full wave cycle
//!
//! Drives a session end-to-end through the director state machine:
//! spawning, defeat callbacks, boss loot, cooldowns, and the terminal
//! all-waves-complete transition.

use holdout::enemies::EnemyCatalog;
use holdout::host::{EnemyHandle, Position, RewardPresenter, SpawnProvider};
use holdout::leveling::SessionLeveling;
use holdout::loot::{LootCatalog, LootRollEngine};
use holdout::meta::{MemoryStore, MetaLedger};
use holdout::waves::{DirectorConfig, WaveDirector};
use holdout::{Session, SessionEvent};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn test_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

#[derive(Default)]
struct StubSpawner {
    next_handle: u64,
}

impl SpawnProvider for StubSpawner {
    fn request_spawn_position(&mut self) -> Position {
        Position::new(1.0, 0.0, 1.0)
    }

    fn spawn_enemy(
        &mut self,
        _enemy_type: &holdout::enemies::EnemyType,
        _position: Position,
    ) -> EnemyHandle {
        let handle = EnemyHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }

    fn despawn_enemy(&mut self, _handle: EnemyHandle) {}
}

struct StubPresenter;

impl RewardPresenter for StubPresenter {
    fn present_loot_item(&mut self, _item: &holdout::loot::LootItem, _position: Position) {}
}

fn session_with_max_waves(max_waves: u32) -> Session {
    Session::new(
        WaveDirector::new(
            EnemyCatalog::seed_defaults(),
            DirectorConfig {
                max_waves,
                ..DirectorConfig::default()
            },
        ),
        LootRollEngine::new(LootCatalog::seed_defaults()),
        MetaLedger::new(Box::new(MemoryStore::new())),
        SessionLeveling::new(),
        Box::new(StubSpawner::default()),
        Box::new(StubPresenter),
    )
}

/// Drives the session to its terminal state, defeating every enemy the
/// moment it spawns. Returns all events in order.
fn play_to_completion(session: &mut Session, rng: &mut ChaCha8Rng) -> Vec<SessionEvent> {
    let mut all_events = session.begin(rng);

    for _ in 0..200_000 {
        let events = session.update(0.1, rng);

        let handles: Vec<EnemyHandle> = events
            .iter()
            .filter_map(|e| match e {
                SessionEvent::EnemySpawned { handle, .. } => Some(*handle),
                _ => None,
            })
            .collect();
        all_events.extend(events);

        for handle in handles {
            all_events.extend(session.on_enemy_defeated(handle, Position::default(), rng));
        }

        if session.is_all_complete() {
            break;
        }
    }

    all_events
}

// =============================================================================
// End-to-End Wave Cycle Tests
// =============================================================================

#[test]
fn test_five_wave_run_reaches_terminal_state_exactly_once() {
    let mut session = session_with_max_waves(5);
    let mut rng = test_rng(42);

    let events = play_to_completion(&mut session, &mut rng);

    assert!(session.is_all_complete(), "director should be terminal");

    let all_complete_count = events
        .iter()
        .filter(|e| matches!(e, SessionEvent::AllWavesCompleted))
        .count();
    assert_eq!(all_complete_count, 1);

    let record = session.meta().record();
    assert_eq!(record.total_waves_completed, 5);
    assert_eq!(record.highest_wave_reached, 5);
}

#[test]
fn test_wave_five_is_a_boss_wave_with_loot() {
    let mut session = session_with_max_waves(5);
    let mut rng = test_rng(7);

    let events = play_to_completion(&mut session, &mut rng);

    let record = session.meta().record();
    assert_eq!(record.total_bosses_killed, 1, "one boss wave in five waves");

    // The basic boss table guarantees two drops per roll.
    let loot_count = events
        .iter()
        .filter(|e| matches!(e, SessionEvent::LootDropped { .. }))
        .count();
    assert!(loot_count >= 2, "boss loot should include guaranteed drops");

    // Every seeded item carries a currency reward, so the boss kill must
    // have banked something.
    assert!(record.meta_currency > 0);
}

#[test]
fn test_victory_ends_game_and_records_time() {
    let mut session = session_with_max_waves(3);
    let mut rng = test_rng(11);

    let events = play_to_completion(&mut session, &mut rng);

    let ended: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            SessionEvent::GameEnded {
                victory,
                elapsed_secs,
            } => Some((*victory, *elapsed_secs)),
            _ => None,
        })
        .collect();

    assert_eq!(ended.len(), 1);
    assert!(ended[0].0, "clearing all waves is a victory");
    assert!(ended[0].1 > 0.0);
    assert!(!session.is_game_active());

    let record = session.meta().record();
    assert!(record.best_game_time_secs > 0.0);
}

#[test]
fn test_wave_numbers_progress_in_order() {
    let mut session = session_with_max_waves(4);
    let mut rng = test_rng(3);

    let events = play_to_completion(&mut session, &mut rng);

    let started: Vec<u32> = events
        .iter()
        .filter_map(|e| match e {
            SessionEvent::WaveStarted { wave_number } => Some(*wave_number),
            _ => None,
        })
        .collect();
    let completed: Vec<u32> = events
        .iter()
        .filter_map(|e| match e {
            SessionEvent::WaveCompleted { wave_number } => Some(*wave_number),
            _ => None,
        })
        .collect();

    assert_eq!(started, vec![1, 2, 3, 4]);
    assert_eq!(completed, vec![1, 2, 3, 4]);
}

#[test]
fn test_kills_accumulate_across_waves() {
    let mut session = session_with_max_waves(2);
    let mut rng = test_rng(19);

    let events = play_to_completion(&mut session, &mut rng);

    let spawned = events
        .iter()
        .filter(|e| matches!(e, SessionEvent::EnemySpawned { .. }))
        .count() as u64;

    // Every spawn was defeated, and the meta ledger saw each one.
    assert_eq!(session.meta().record().total_enemies_killed, spawned);
    assert!(spawned >= (5 + 1) + (5 + 2), "two waves of escalating size");
}

#[test]
fn test_session_experience_flows_from_kills() {
    let mut session = session_with_max_waves(1);
    let mut rng = test_rng(23);

    play_to_completion(&mut session, &mut rng);

    // Wave 1 spawns at least 6 enemies at 20 XP each; level 2 needs 100.
    assert!(session.leveling().level() >= 2);
    assert!(session.meta().record().total_experience_gained >= 120.0);
}
