//! Engine configuration, loaded from RON.
//!
//! Every section defaults to the stock rules, so a config file only needs the
//! values it changes:
//!
//! ```ron
//! (
//!     capture: (legendary: 0.05),
//!     quests: (quest_expiry_days: 3),
//! )
//! ```

use crate::battle::capture::CaptureRules;
use crate::battle::damage::DamageRules;
use crate::errors::ConfigError;
use crate::progression::experience::ProgressionRules;
use crate::quests::templates::{ChallengeTemplate, QuestRules, MAX_QUEST_EXPIRY_DAYS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Where the damage random factor may be drawn from.
const RANDOM_FACTOR_BOUNDS: (f64, f64) = (0.85, 1.0);
/// Outer limits for the capture rate clamp.
const CAPTURE_RATE_BOUNDS: (f64, f64) = (0.05, 0.95);
/// No win may ever be worth less than this.
const MIN_EXPERIENCE_FLOOR: u32 = 10;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub battle: DamageRules,
    pub capture: CaptureRules,
    pub progression: ProgressionRules,
    pub quests: QuestRules,
}

impl EngineConfig {
    /// Parses and validates a RON document.
    pub fn from_ron_str(content: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = ron::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates the config file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::from_ron_str(&content)?;
        tracing::info!(path = %path.display(), "loaded engine config");
        Ok(config)
    }

    /// Rejects values that would break the resolvers' guarantees.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let battle = &self.battle;
        probability("battle.critical_chance", battle.critical_chance)?;
        at_least("battle.stab_multiplier", 1.0, battle.stab_multiplier)?;
        within(
            "battle.random_factor_min",
            RANDOM_FACTOR_BOUNDS,
            battle.random_factor_min,
        )?;
        within(
            "battle.random_factor_max",
            RANDOM_FACTOR_BOUNDS,
            battle.random_factor_max,
        )?;
        ordered(
            "battle.random_factor_max",
            battle.random_factor_min,
            battle.random_factor_max,
        )?;

        let capture = &self.capture;
        for (field, rate) in [
            ("capture.common", capture.common),
            ("capture.uncommon", capture.uncommon),
            ("capture.rare", capture.rare),
            ("capture.legendary", capture.legendary),
        ] {
            probability(field, rate)?;
        }
        // Scarcer tiers never get a better base rate.
        ordered("capture.common", capture.uncommon, capture.common)?;
        ordered("capture.uncommon", capture.rare, capture.uncommon)?;
        ordered("capture.rare", capture.legendary, capture.rare)?;
        positive("capture.health_weight", capture.health_weight)?;
        probability("capture.health_weight", capture.health_weight)?;
        within("capture.min_rate", CAPTURE_RATE_BOUNDS, capture.min_rate)?;
        within("capture.max_rate", CAPTURE_RATE_BOUNDS, capture.max_rate)?;
        ordered("capture.max_rate", capture.min_rate, capture.max_rate)?;

        let progression = &self.progression;
        if progression.experience_per_level == 0 {
            return Err(invalid("progression.experience_per_level", "must be at least 1"));
        }
        at_least("progression.level_gap_step", 0.0, progression.level_gap_step)?;
        positive("progression.min_bonus", progression.min_bonus)?;
        ordered(
            "progression.max_bonus",
            progression.min_bonus,
            progression.max_bonus,
        )?;
        if progression.min_experience < MIN_EXPERIENCE_FLOOR {
            return Err(invalid(
                "progression.min_experience",
                format!("must be at least {}", MIN_EXPERIENCE_FLOOR),
            ));
        }

        let quests = &self.quests;
        if !(1..=MAX_QUEST_EXPIRY_DAYS).contains(&quests.quest_expiry_days) {
            return Err(invalid(
                "quests.quest_expiry_days",
                format!(
                    "must be within [1, {}], got {}",
                    MAX_QUEST_EXPIRY_DAYS, quests.quest_expiry_days
                ),
            ));
        }
        challenge_pool("quests.easy_challenges", &quests.easy_challenges)?;
        challenge_pool("quests.medium_challenges", &quests.medium_challenges)?;
        challenge_pool("quests.hard_challenges", &quests.hard_challenges)?;
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn probability(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, format!("must be within [0, 1], got {}", value)))
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be positive, got {}", value)))
    }
}

fn at_least(field: &'static str, floor: f64, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= floor {
        Ok(())
    } else {
        Err(invalid(field, format!("must be at least {}, got {}", floor, value)))
    }
}

fn within(field: &'static str, (low, high): (f64, f64), value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && (low..=high).contains(&value) {
        Ok(())
    } else {
        Err(invalid(
            field,
            format!("must be within [{}, {}], got {}", low, high, value),
        ))
    }
}

fn ordered(field: &'static str, low: f64, high: f64) -> Result<(), ConfigError> {
    if high.is_finite() && low <= high {
        Ok(())
    } else {
        Err(invalid(field, format!("must be at least {}, got {}", low, high)))
    }
}

fn challenge_pool(field: &'static str, pool: &[ChallengeTemplate]) -> Result<(), ConfigError> {
    if pool.is_empty() {
        return Err(invalid(field, "pool has no challenges"));
    }
    if let Some(template) = pool.iter().find(|template| template.target == 0) {
        return Err(invalid(
            field,
            format!("`{}` has a target of 0", template.description),
        ));
    }
    Ok(())
}
