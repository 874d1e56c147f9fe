//! Wave composition and the wave director state machine.

pub mod director;
pub mod generation;
pub mod types;

pub use director::{ActiveEnemy, DirectorConfig, WaveDirector, WaveEvent};
pub use generation::generate_wave;
pub use types::{EnemySpawnEntry, WavePhase, WaveSpec};
