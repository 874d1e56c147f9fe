use serde::{Deserialize, Serialize};

/// One spawn instruction within a wave: which enemy type, how many, and how
/// long to wait before the first of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawnEntry {
    pub type_name: String,
    pub count: u32,
    pub spawn_delay_secs: f64,
}

/// A generated wave composition. Produced fresh per wave, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveSpec {
    /// 1-based wave number.
    pub wave_number: u32,
    /// Entries realized in list order; delays accumulate sequentially.
    pub entries: Vec<EnemySpawnEntry>,
    pub is_boss_wave: bool,
    pub duration_secs: f64,
}

impl WaveSpec {
    /// Total enemies this wave will spawn.
    pub fn total_enemies(&self) -> u32 {
        self.entries.iter().map(|e| e.count).sum()
    }
}

/// Director phase. Waiting periods are explicit states driven by the host
/// tick rather than suspended call stacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavePhase {
    /// No wave running; `start_next_wave` begins the sequence.
    Idle,
    /// Draining the time-keyed spawn schedule.
    Spawning,
    /// All spawns realized; waiting on defeat notifications.
    AwaitingClear,
    /// Fixed delay before the next wave starts.
    Cooldown,
    /// Terminal: the configured maximum wave has been cleared.
    AllComplete,
}
