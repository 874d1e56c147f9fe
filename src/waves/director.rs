//! The wave director: runs the encounter sequence as an explicit state
//! machine driven by the host tick.
//!
//! Spawn delays and the inter-wave cooldown are data (a time-keyed spawn
//! schedule and a countdown), not suspended call stacks, so
//! [`WaveDirector::stop_current_wave`] can cancel at any point without
//! leaving dangling scheduled work. Defeat notifications are the sole
//! concurrent entry point and are accepted in every phase.

use std::collections::VecDeque;

use rand::Rng;
use tracing::{debug, warn};

use crate::constants::{DEFAULT_MAX_WAVES, SPAWN_STAGGER_SECS, TIME_BETWEEN_WAVES_SECS};
use crate::enemies::EnemyCatalog;
use crate::host::{EnemyHandle, SpawnProvider};

use super::generation::generate_wave;
use super::types::{WavePhase, WaveSpec};

/// An event observable by collaborators, in the order it occurred.
#[derive(Debug, Clone, PartialEq)]
pub enum WaveEvent {
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
    /// Emitted exactly once when the wave past the configured maximum is
    /// requested.
    AllWavesCompleted,
}

/// Tunable director parameters.
#[derive(Debug, Clone)]
pub struct DirectorConfig {
    pub max_waves: u32,
    pub time_between_waves_secs: f64,
    pub spawn_stagger_secs: f64,
}

impl Default for DirectorConfig {
    fn default() -> Self {
        Self {
            max_waves: DEFAULT_MAX_WAVES,
            time_between_waves_secs: TIME_BETWEEN_WAVES_SECS,
            spawn_stagger_secs: SPAWN_STAGGER_SECS,
        }
    }
}

/// A live enemy the director is tracking until its defeat notification.
#[derive(Debug, Clone)]
pub struct ActiveEnemy {
    pub handle: EnemyHandle,
    pub type_name: String,
    pub is_boss: bool,
}

/// A spawn due at a point on the wave clock.
#[derive(Debug, Clone)]
struct ScheduledSpawn {
    at_secs: f64,
    type_name: String,
}

/// Generates and executes the wave sequence.
pub struct WaveDirector {
    config: DirectorConfig,
    catalog: EnemyCatalog,
    wave_number: u32,
    phase: WavePhase,
    /// Time elapsed within the current spawning phase.
    clock_secs: f64,
    cooldown_remaining_secs: f64,
    schedule: VecDeque<ScheduledSpawn>,
    active: Vec<ActiveEnemy>,
    enemies_remaining: u32,
    current_spec: Option<WaveSpec>,
    all_complete_emitted: bool,
}

impl WaveDirector {
    pub fn new(catalog: EnemyCatalog, config: DirectorConfig) -> Self {
        Self {
            config,
            catalog,
            wave_number: 1,
            phase: WavePhase::Idle,
            clock_secs: 0.0,
            cooldown_remaining_secs: 0.0,
            schedule: VecDeque::new(),
            active: Vec::new(),
            enemies_remaining: 0,
            current_spec: None,
            all_complete_emitted: false,
        }
    }

    // ── Accessors ───────────────────────────────────────────────

    pub fn phase(&self) -> WavePhase {
        self.phase
    }

    pub fn wave_number(&self) -> u32 {
        self.wave_number
    }

    pub fn enemies_remaining(&self) -> u32 {
        self.enemies_remaining
    }

    pub fn is_wave_active(&self) -> bool {
        matches!(self.phase, WavePhase::Spawning | WavePhase::AwaitingClear)
    }

    pub fn active_enemies(&self) -> &[ActiveEnemy] {
        &self.active
    }

    /// The tracked record for a live enemy, if the handle is known.
    pub fn active_enemy(&self, handle: EnemyHandle) -> Option<&ActiveEnemy> {
        self.active.iter().find(|e| e.handle == handle)
    }

    /// The composition of the wave currently running, if any.
    pub fn current_spec(&self) -> Option<&WaveSpec> {
        self.current_spec.as_ref()
    }

    // ── Transitions ─────────────────────────────────────────────

    /// Starts the next wave from `Idle`, or emits `AllWavesCompleted` if
    /// the wave number has passed the configured maximum.
    pub fn start_next_wave<R: Rng>(&mut self, rng: &mut R) -> Vec<WaveEvent> {
        if !matches!(self.phase, WavePhase::Idle) {
            warn!(
                "start_next_wave ignored in phase {:?} (wave {})",
                self.phase, self.wave_number
            );
            return Vec::new();
        }
        self.begin_wave(rng)
    }

    fn begin_wave<R: Rng>(&mut self, rng: &mut R) -> Vec<WaveEvent> {
        if self.wave_number > self.config.max_waves {
            self.phase = WavePhase::AllComplete;
            if self.all_complete_emitted {
                return Vec::new();
            }
            self.all_complete_emitted = true;
            return vec![WaveEvent::AllWavesCompleted];
        }

        let spec = generate_wave(rng, self.wave_number, &self.catalog);
        self.schedule = build_schedule(&spec, self.config.spawn_stagger_secs);
        self.current_spec = Some(spec);
        self.clock_secs = 0.0;
        self.enemies_remaining = 0;
        self.phase = WavePhase::Spawning;

        debug!(
            "wave {} started ({} scheduled spawns)",
            self.wave_number,
            self.schedule.len()
        );
        vec![WaveEvent::WaveStarted {
            wave_number: self.wave_number,
        }]
    }

    /// Advances the director by one host tick.
    pub fn update<R: Rng>(
        &mut self,
        dt_secs: f64,
        rng: &mut R,
        spawner: &mut dyn SpawnProvider,
    ) -> Vec<WaveEvent> {
        let mut events = Vec::new();

        match self.phase {
            WavePhase::Spawning => {
                self.clock_secs += dt_secs;

                while self
                    .schedule
                    .front()
                    .is_some_and(|next| next.at_secs <= self.clock_secs)
                {
                    if let Some(spawn) = self.schedule.pop_front() {
                        events.push(self.realize_spawn(&spawn.type_name, spawner));
                    }
                }

                if self.schedule.is_empty() {
                    if self.enemies_remaining == 0 {
                        // Everything spawned already died mid-schedule.
                        events.extend(self.complete_wave());
                    } else {
                        self.phase = WavePhase::AwaitingClear;
                    }
                }
            }
            WavePhase::Cooldown => {
                self.cooldown_remaining_secs -= dt_secs;
                if self.cooldown_remaining_secs <= 0.0 {
                    self.wave_number += 1;
                    events.extend(self.begin_wave(rng));
                }
            }
            WavePhase::Idle | WavePhase::AwaitingClear | WavePhase::AllComplete => {}
        }

        events
    }

    fn realize_spawn(&mut self, type_name: &str, spawner: &mut dyn SpawnProvider) -> WaveEvent {
        let enemy_type = self.catalog.get_or_first(type_name);
        let position = spawner.request_spawn_position();
        let handle = spawner.spawn_enemy(enemy_type, position);

        let record = ActiveEnemy {
            handle,
            type_name: enemy_type.name.clone(),
            is_boss: enemy_type.is_boss,
        };
        let event = WaveEvent::EnemySpawned {
            handle,
            type_name: record.type_name.clone(),
            is_boss: record.is_boss,
        };
        self.active.push(record);
        self.enemies_remaining += 1;
        event
    }

    /// Records an enemy defeat. Safe to call in any phase; unknown handles
    /// (already despawned or from a stopped wave) are ignored.
    pub fn notify_enemy_defeated(&mut self, handle: EnemyHandle) -> Vec<WaveEvent> {
        let Some(index) = self.active.iter().position(|e| e.handle == handle) else {
            warn!("defeat notification for untracked enemy {:?}", handle);
            return Vec::new();
        };
        self.active.swap_remove(index);
        self.enemies_remaining = self.enemies_remaining.saturating_sub(1);

        if self.phase == WavePhase::AwaitingClear && self.enemies_remaining == 0 {
            return self.complete_wave();
        }
        Vec::new()
    }

    fn complete_wave(&mut self) -> Vec<WaveEvent> {
        let completed = self.wave_number;
        self.current_spec = None;
        self.phase = WavePhase::Cooldown;
        self.cooldown_remaining_secs = self.config.time_between_waves_secs;

        debug!("wave {} complete", completed);
        vec![WaveEvent::WaveCompleted {
            wave_number: completed,
        }]
    }

    /// Hard reset: cancels the spawn schedule, force-despawns every tracked
    /// enemy, zeroes the remaining counter, and returns to `Idle`.
    pub fn stop_current_wave(&mut self, spawner: &mut dyn SpawnProvider) {
        self.schedule.clear();
        for enemy in self.active.drain(..) {
            spawner.despawn_enemy(enemy.handle);
        }
        self.enemies_remaining = 0;
        self.current_spec = None;
        self.cooldown_remaining_secs = 0.0;
        self.clock_secs = 0.0;
        self.phase = WavePhase::Idle;
    }
}

/// Flattens a wave spec into absolute spawn times. Entries realize in list
/// order: each entry's delay elapses first, then its spawns land with the
/// configured stagger between them.
fn build_schedule(spec: &WaveSpec, stagger_secs: f64) -> VecDeque<ScheduledSpawn> {
    let mut schedule = VecDeque::new();
    let mut t = 0.0;

    for entry in &spec.entries {
        t += entry.spawn_delay_secs;
        for _ in 0..entry.count {
            schedule.push_back(ScheduledSpawn {
                at_secs: t,
                type_name: entry.type_name.clone(),
            });
            t += stagger_secs;
        }
    }

    schedule
}
