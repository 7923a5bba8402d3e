use crate::combatant::{validate_level, MAX_BASE_STAT, MAX_LEVEL, MIN_BASE_STAT};
use crate::errors::{check_range, ValidationResult};
use schema::BaseStats;
use serde::{Deserialize, Serialize};

/// Constants of the experience award and level curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionRules {
    /// Experience per level of the defeated creature.
    pub experience_per_level: u32,
    /// Bonus per level the loser is above the winner (negative when below).
    pub level_gap_step: f64,
    pub min_bonus: f64,
    pub max_bonus: f64,
    /// Floor on any single award.
    pub min_experience: u32,
}

impl Default for ProgressionRules {
    fn default() -> Self {
        Self {
            experience_per_level: 50,
            level_gap_step: 0.1,
            min_bonus: 0.5,
            max_bonus: 2.0,
            min_experience: 10,
        }
    }
}

/// What a caller applies to its creature record after a win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceOutcome {
    pub experience_gained: u32,
    pub total_experience: u32,
    pub leveled_up: bool,
    pub new_level: u8,
}

/// Battle-relevant stats of a creature at a specific level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBlock {
    pub health: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProgressionResolver {
    rules: ProgressionRules,
}

impl ProgressionResolver {
    pub fn new(rules: ProgressionRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ProgressionRules {
        &self.rules
    }

    /// Calculate experience awarded to the winner of a battle
    /// Formula: max(min_xp, floor(loser_level * 50 * clamp(1 + 0.1 * (loser - winner), 0.5, 2.0)))
    pub fn award_experience(&self, winner_level: u8, loser_level: u8) -> ValidationResult<u32> {
        let winner_level = validate_level("winner_level", winner_level)?;
        let loser_level = validate_level("loser_level", loser_level)?;

        let base = (loser_level as u32 * self.rules.experience_per_level) as f64;
        let level_gap = loser_level as f64 - winner_level as f64;
        let bonus = (1.0 + level_gap * self.rules.level_gap_step)
            .clamp(self.rules.min_bonus, self.rules.max_bonus);

        let experience = (base * bonus).floor() as u32;
        Ok(experience.max(self.rules.min_experience))
    }

    /// Awards experience for a win and checks the new total against the level curve.
    /// At most one level is gained per call; creatures at the level cap never level.
    pub fn apply_victory(
        &self,
        current_experience: u32,
        current_level: u8,
        loser_level: u8,
    ) -> ValidationResult<ExperienceOutcome> {
        let experience_gained = self.award_experience(current_level, loser_level)?;
        let total_experience = current_experience.saturating_add(experience_gained);
        let leveled_up = current_level < MAX_LEVEL && is_level_up(total_experience, current_level)?;
        let new_level = if leveled_up {
            current_level + 1
        } else {
            current_level
        };

        tracing::debug!(
            experience_gained,
            total_experience,
            current_level,
            new_level,
            "applied victory"
        );

        Ok(ExperienceOutcome {
            experience_gained,
            total_experience,
            leveled_up,
            new_level,
        })
    }
}

/// Experience award with the default rules.
pub fn award_experience(winner_level: u8, loser_level: u8) -> ValidationResult<u32> {
    ProgressionResolver::default().award_experience(winner_level, loser_level)
}

/// Experience needed to leave `level`: level^3.
pub fn experience_threshold(level: u8) -> u32 {
    (level as u32).pow(3)
}

/// A creature is ready to level up once its accumulated experience reaches level^3.
pub fn is_level_up(accumulated_experience: u32, current_level: u8) -> ValidationResult<bool> {
    let current_level = validate_level("current_level", current_level)?;
    Ok(accumulated_experience >= experience_threshold(current_level))
}

/// Calculate a stat value at a given level
/// Formula: floor(base_stat * 2 * level / 100) + level + 10
pub fn stat_at_level(base_stat: u8, level: u8) -> ValidationResult<u32> {
    let base_stat = check_range("base_stat", base_stat, MIN_BASE_STAT, MAX_BASE_STAT)?;
    let level = validate_level("level", level)? as u32;
    Ok(base_stat as u32 * 2 * level / 100 + level + 10)
}

/// Applies [`stat_at_level`] to every base stat.
pub fn stats_at_level(base_stats: &BaseStats, level: u8) -> ValidationResult<StatBlock> {
    validate_level("level", level)?;
    let mut grown = [0u32; 4];
    for (slot, (field, value)) in grown.iter_mut().zip(base_stats.named()) {
        check_range(field, value, MIN_BASE_STAT, MAX_BASE_STAT)?;
        *slot = stat_at_level(value, level)?;
    }
    let [health, attack, defense, speed] = grown;
    Ok(StatBlock {
        health,
        attack,
        defense,
        speed,
    })
}
