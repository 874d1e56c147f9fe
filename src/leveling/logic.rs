//! Session leveling: experience accrual with the meta experience bonus,
//! repeated level-ups with overflow carry, and skill purchases.

use std::mem;

use tracing::warn;

use crate::constants::{BASE_XP_TO_LEVEL, SKILL_POINTS_PER_LEVEL, XP_INCREMENT_PER_LEVEL};
use crate::meta::MetaLedger;

use super::types::{seed_skills, Skill, StatMultipliers};

/// Multiplier increment applied per purchased skill in most categories.
const SKILL_MULTIPLIER_INCREMENT: f64 = 0.10;
/// Lifesteal scales gentler than the other categories.
const LIFESTEAL_MULTIPLIER_INCREMENT: f64 = 0.05;

/// A notification produced by a leveling mutation. Drained in FIFO order
/// via [`SessionLeveling::take_events`].
#[derive(Debug, Clone, PartialEq)]
pub enum LevelEvent {
    /// The player reached a new level and earned skill points.
    LeveledUp { new_level: u32 },
    /// A skill purchase succeeded.
    SkillPurchased { name: String },
}

/// Per-session leveling state. Starts fresh each session; the only durable
/// side effect is the cumulative experience forwarded to the meta ledger.
#[derive(Debug, Clone)]
pub struct SessionLeveling {
    experience: f64,
    level: u32,
    xp_to_next_level: f64,
    skill_points: u32,
    skills: Vec<Skill>,
    multipliers: StatMultipliers,
    pending_events: Vec<LevelEvent>,
}

impl Default for SessionLeveling {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionLeveling {
    /// A fresh session at level 1 with the default skill roster.
    pub fn new() -> Self {
        Self::with_skills(seed_skills())
    }

    pub fn with_skills(skills: Vec<Skill>) -> Self {
        Self {
            experience: 0.0,
            level: 1,
            xp_to_next_level: BASE_XP_TO_LEVEL,
            skill_points: 0,
            skills,
            multipliers: StatMultipliers::default(),
            pending_events: Vec::new(),
        }
    }

    /// Adds experience, applying the meta ledger's experience bonus and
    /// forwarding the bonus-applied amount to its cumulative tracking.
    ///
    /// Level-ups loop while the threshold is met, subtracting the threshold
    /// each time so a large single award carries its overflow into the next
    /// level. The `experience < xp_to_next_level` invariant holds on
    /// return.
    pub fn add_experience(&mut self, amount: f64, meta: &mut MetaLedger) {
        if amount <= 0.0 {
            return;
        }

        let final_amount = amount * (1.0 + meta.experience_bonus());
        self.experience += final_amount;
        meta.record_experience_gained(final_amount);

        while self.experience >= self.xp_to_next_level {
            self.experience -= self.xp_to_next_level;
            self.level += 1;
            self.xp_to_next_level += XP_INCREMENT_PER_LEVEL;
            self.skill_points += SKILL_POINTS_PER_LEVEL;
            self.pending_events.push(LevelEvent::LeveledUp {
                new_level: self.level,
            });
        }
    }

    /// Buys a skill by name. Succeeds only if the skill exists, is still
    /// locked, and the cost is covered by available skill points.
    pub fn purchase_skill(&mut self, name: &str) -> bool {
        let available = self.skill_points;
        let Some(skill) = self.skills.iter_mut().find(|s| s.name == name) else {
            warn!("no skill named '{}'", name);
            return false;
        };

        if skill.unlocked || skill.cost > available {
            return false;
        }

        skill.unlocked = true;
        self.skill_points -= skill.cost;
        let category = skill.category.clone();
        let skill_name = skill.name.clone();

        match category.as_str() {
            "damage" => self.multipliers.damage += SKILL_MULTIPLIER_INCREMENT,
            "health" => self.multipliers.health += SKILL_MULTIPLIER_INCREMENT,
            "reload" => self.multipliers.reload += SKILL_MULTIPLIER_INCREMENT,
            "lifesteal" => self.multipliers.lifesteal += LIFESTEAL_MULTIPLIER_INCREMENT,
            other => {
                warn!("skill '{}' has unrecognized category '{}'", skill_name, other);
            }
        }

        self.pending_events
            .push(LevelEvent::SkillPurchased { name: skill_name });
        true
    }

    // ── Accessors ───────────────────────────────────────────────

    pub fn experience(&self) -> f64 {
        self.experience
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn xp_to_next_level(&self) -> f64 {
        self.xp_to_next_level
    }

    pub fn skill_points(&self) -> u32 {
        self.skill_points
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    pub fn multipliers(&self) -> StatMultipliers {
        self.multipliers
    }

    /// Drains pending notifications in the order they were produced.
    pub fn take_events(&mut self) -> Vec<LevelEvent> {
        mem::take(&mut self.pending_events)
    }
}
