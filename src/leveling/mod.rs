//! Within-session experience, levels, skill points, and skill purchases.

pub mod logic;
pub mod types;

pub use logic::{LevelEvent, SessionLeveling};
pub use types::{Skill, StatMultipliers};
