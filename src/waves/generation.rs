//! Wave composition generation — a pure function of wave number, enemy
//! catalog, and RNG state.

use rand::Rng;

use crate::constants::{
    BOSS_ESCORT_DELAY_MAX_SECS, BOSS_ESCORT_DELAY_MIN_SECS, BOSS_WAVE_ESCORT_MAX,
    BOSS_WAVE_ESCORT_MIN, BOSS_WAVE_INTERVAL, REGULAR_SPAWN_DELAY_MAX_SECS,
    REGULAR_SPAWN_DELAY_MIN_SECS, WAVE_DURATION_SECS,
};
use crate::enemies::EnemyCatalog;

use super::types::{EnemySpawnEntry, WaveSpec};

/// Whether the given wave number is a boss wave.
pub fn is_boss_wave(wave_number: u32) -> bool {
    wave_number % BOSS_WAVE_INTERVAL == 0
}

/// Generates the composition for one wave.
///
/// Boss waves (every 5th) hold exactly one boss at zero delay plus 3–7
/// escorts delayed in [2,8) seconds. Regular waves hold `5+N ..= 9+2N`
/// enemies (N = wave number), each delayed in [1,3) seconds — the
/// escalation curve that drives difficulty.
pub fn generate_wave<R: Rng>(rng: &mut R, wave_number: u32, catalog: &EnemyCatalog) -> WaveSpec {
    let boss_wave = is_boss_wave(wave_number);
    let mut entries = Vec::new();

    if boss_wave {
        let boss_type = catalog.pick_random(rng, true);
        entries.push(EnemySpawnEntry {
            type_name: boss_type.name.clone(),
            count: 1,
            spawn_delay_secs: 0.0,
        });

        let escort_count = rng.gen_range(BOSS_WAVE_ESCORT_MIN..=BOSS_WAVE_ESCORT_MAX);
        for _ in 0..escort_count {
            let regular = catalog.pick_random(rng, false);
            entries.push(EnemySpawnEntry {
                type_name: regular.name.clone(),
                count: 1,
                spawn_delay_secs: rng
                    .gen_range(BOSS_ESCORT_DELAY_MIN_SECS..BOSS_ESCORT_DELAY_MAX_SECS),
            });
        }
    } else {
        let total_enemies = rng.gen_range(5 + wave_number..10 + wave_number * 2);
        for _ in 0..total_enemies {
            let enemy_type = catalog.pick_random(rng, false);
            entries.push(EnemySpawnEntry {
                type_name: enemy_type.name.clone(),
                count: 1,
                spawn_delay_secs: rng
                    .gen_range(REGULAR_SPAWN_DELAY_MIN_SECS..REGULAR_SPAWN_DELAY_MAX_SECS),
            });
        }
    }

    WaveSpec {
        wave_number,
        entries,
        is_boss_wave: boss_wave,
        duration_secs: WAVE_DURATION_SECS,
    }
}
