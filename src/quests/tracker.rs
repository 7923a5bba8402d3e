use crate::battle::rng::RandomSource;
use crate::narrative::NarrativeError;
use crate::quests::challenge::DailyChallenge;
use crate::quests::quest::Quest;
use crate::quests::templates::{daily_challenges, fallback_quest, quest_from_generated, QuestRules};
use chrono::{DateTime, Utc};
use schema::ObjectiveKind;

/// Quest and challenge bookkeeping built from one set of [`QuestRules`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestTracker {
    rules: QuestRules,
}

impl QuestTracker {
    pub fn new(rules: QuestRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &QuestRules {
        &self.rules
    }

    pub fn advance_quest(&self, mut quest: Quest, kind: ObjectiveKind, increment: u32) -> Quest {
        quest.advance(kind, increment);
        quest
    }

    pub fn advance_challenge(
        &self,
        mut challenge: DailyChallenge,
        increment: u32,
    ) -> DailyChallenge {
        challenge.advance(increment);
        challenge
    }

    pub fn quest_from_generated(
        &self,
        generated: Result<String, NarrativeError>,
        id: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Quest {
        quest_from_generated(generated, id, now, &self.rules)
    }

    pub fn fallback_quest(&self, id: impl Into<String>, now: DateTime<Utc>) -> Quest {
        fallback_quest(id, now, &self.rules)
    }

    pub fn daily_challenges(
        &self,
        id_prefix: &str,
        rng: &mut (impl RandomSource + ?Sized),
    ) -> Vec<DailyChallenge> {
        daily_challenges(id_prefix, &self.rules, rng)
    }
}
