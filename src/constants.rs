// Wave pacing
pub const BOSS_WAVE_INTERVAL: u32 = 5;
pub const DEFAULT_MAX_WAVES: u32 = 10;
pub const TIME_BETWEEN_WAVES_SECS: f64 = 5.0;
pub const WAVE_DURATION_SECS: f64 = 60.0;
pub const SPAWN_STAGGER_SECS: f64 = 0.5;

// Wave composition bounds
pub const BOSS_WAVE_ESCORT_MIN: u32 = 3;
pub const BOSS_WAVE_ESCORT_MAX: u32 = 7;
pub const BOSS_ESCORT_DELAY_MIN_SECS: f64 = 2.0;
pub const BOSS_ESCORT_DELAY_MAX_SECS: f64 = 8.0;
pub const REGULAR_SPAWN_DELAY_MIN_SECS: f64 = 1.0;
pub const REGULAR_SPAWN_DELAY_MAX_SECS: f64 = 3.0;

// Kill rewards
pub const KILL_XP_REGULAR: f64 = 20.0;
pub const KILL_XP_BOSS: f64 = 100.0;

// Session leveling
pub const BASE_XP_TO_LEVEL: f64 = 100.0;
pub const XP_INCREMENT_PER_LEVEL: f64 = 50.0;
pub const SKILL_POINTS_PER_LEVEL: u32 = 1;

// Unlock thresholds (base requirement; second tier unlocks at 2x)
pub const WAVES_FOR_WEAPON_UNLOCK: u32 = 10;
pub const BOSSES_FOR_ABILITY_UNLOCK: u64 = 3;
pub const KILLS_FOR_COSMETIC_UNLOCK: u64 = 50;

// Save system constants
pub const SAVE_VERSION_MAGIC: u64 = 0x484F4C444F555400; // "HOLDOUT\0" in hex
pub const SAVE_FILE_NAME: &str = "progress.dat";

// Default loot table names
pub const BASIC_BOSS_TABLE: &str = "BasicBoss";
pub const ELITE_BOSS_TABLE: &str = "EliteBoss";
