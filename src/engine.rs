use crate::battle::capture::CaptureResolver;
use crate::battle::damage::DamageResolver;
use crate::config::EngineConfig;
use crate::errors::EngineResult;
use crate::progression::experience::ProgressionResolver;
use crate::quests::tracker::QuestTracker;
use std::path::Path;

/// Every resolver, built from one [`EngineConfig`].
///
/// The engine keeps no state between calls; cloning it is how callers share it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Engine {
    damage: DamageResolver,
    capture: CaptureResolver,
    progression: ProgressionResolver,
    quests: QuestTracker,
}

impl Engine {
    pub fn from_config(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        let EngineConfig {
            battle,
            capture,
            progression,
            quests,
        } = config;
        Ok(Self {
            damage: DamageResolver::new(battle),
            capture: CaptureResolver::new(capture),
            progression: ProgressionResolver::new(progression),
            quests: QuestTracker::new(quests),
        })
    }

    /// Loads the config at `path` and builds an engine from it.
    pub fn load(path: impl AsRef<Path>) -> EngineResult<Self> {
        Self::from_config(EngineConfig::load(path)?)
    }

    pub fn damage(&self) -> &DamageResolver {
        &self.damage
    }

    pub fn capture(&self) -> &CaptureResolver {
        &self.capture
    }

    pub fn progression(&self) -> &ProgressionResolver {
        &self.progression
    }

    pub fn quests(&self) -> &QuestTracker {
        &self.quests
    }
}
