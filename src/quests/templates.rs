//! Turning generated quest drafts and fixed templates into trackable quests.

use crate::battle::rng::{pick_index, RandomSource};
use crate::errors::{ValidationError, ValidationResult};
use crate::narrative::NarrativeError;
use crate::quests::challenge::DailyChallenge;
use crate::quests::quest::{Quest, QuestObjective, Reward};
use chrono::{DateTime, Duration, Utc};
use schema::ObjectiveKind;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const FALLBACK_QUEST_TITLE: &str = "Training Challenge";
pub const FALLBACK_QUEST_DESCRIPTION: &str = "Win 3 battles to prove your skills as a trainer!";
const FALLBACK_QUEST_TARGET: u32 = 3;
const FALLBACK_QUEST_TOKENS: u32 = 300;

/// Longest quest lifetime a config may ask for, roughly ten years.
pub const MAX_QUEST_EXPIRY_DAYS: u32 = 3650;

/// One entry of a daily challenge pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeTemplate {
    pub description: String,
    pub kind: ObjectiveKind,
    pub target: u32,
    pub reward_tokens: u32,
}

impl ChallengeTemplate {
    fn new(description: &str, kind: ObjectiveKind, target: u32, reward_tokens: u32) -> Self {
        Self {
            description: description.to_string(),
            kind,
            target,
            reward_tokens,
        }
    }

    pub fn instantiate(&self, id: impl Into<String>) -> DailyChallenge {
        DailyChallenge {
            id: id.into(),
            description: self.description.clone(),
            kind: self.kind,
            progress: 0,
            target: self.target,
            reward_tokens: self.reward_tokens,
        }
    }
}

/// Quest lifetime and the daily challenge pools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestRules {
    pub quest_expiry_days: u32,
    pub easy_challenges: Vec<ChallengeTemplate>,
    pub medium_challenges: Vec<ChallengeTemplate>,
    pub hard_challenges: Vec<ChallengeTemplate>,
}

impl Default for QuestRules {
    fn default() -> Self {
        use ObjectiveKind::*;
        Self {
            quest_expiry_days: 7,
            easy_challenges: vec![
                ChallengeTemplate::new("Win 1 battle", Battle, 1, 100),
                ChallengeTemplate::new("Capture 1 creature", Capture, 1, 150),
            ],
            medium_challenges: vec![
                ChallengeTemplate::new("Win 3 battles", Battle, 3, 300),
                ChallengeTemplate::new("Capture 2 creatures", Capture, 2, 400),
            ],
            hard_challenges: vec![
                ChallengeTemplate::new("Win 5 battles", Battle, 5, 500),
                ChallengeTemplate::new("Hatch 1 egg", Hatch, 1, 600),
                ChallengeTemplate::new("Capture 3 creatures", Capture, 3, 550),
            ],
        }
    }
}

impl QuestRules {
    /// The pools in the order challenges are drawn: easy, medium, hard.
    pub fn pools(&self) -> [(&'static str, &[ChallengeTemplate]); 3] {
        [
            ("easy", self.easy_challenges.as_slice()),
            ("medium", self.medium_challenges.as_slice()),
            ("hard", self.hard_challenges.as_slice()),
        ]
    }

    /// `now` plus the quest lifetime, saturating at the latest representable
    /// instant instead of overflowing.
    pub fn expires_at(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        Duration::try_days(self.quest_expiry_days as i64)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

/// The shape a text generator is prompted to return. Missing fields take the
/// fallback quest's values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestDraft {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default = "default_objective_type")]
    pub objective_type: String,
    #[serde(default = "default_objective_target")]
    pub objective_target: u32,
    #[serde(default = "default_reward_type")]
    pub reward_type: String,
    #[serde(default)]
    pub reward_amount: Option<u32>,
}

fn default_title() -> String {
    FALLBACK_QUEST_TITLE.to_string()
}

fn default_description() -> String {
    "Complete this quest to earn rewards!".to_string()
}

fn default_objective_type() -> String {
    "battle".to_string()
}

fn default_objective_target() -> u32 {
    FALLBACK_QUEST_TARGET
}

fn default_reward_type() -> String {
    "tokens".to_string()
}

impl QuestDraft {
    /// Builds a fresh quest (progress 0) from the draft.
    pub fn into_quest(
        self,
        id: impl Into<String>,
        now: DateTime<Utc>,
        rules: &QuestRules,
    ) -> ValidationResult<Quest> {
        let kind = ObjectiveKind::from_str(self.objective_type.trim())
            .map_err(|_| ValidationError::UnknownObjectiveKind(self.objective_type.clone()))?;
        let reward = parse_reward(&self.reward_type, self.reward_amount)?;

        let quest = Quest {
            id: id.into(),
            title: self.title,
            description: self.description.clone(),
            objectives: vec![QuestObjective::new(
                kind,
                self.objective_target,
                self.description,
            )],
            reward,
            expires_at: rules.expires_at(now),
        };
        quest.validate()?;
        Ok(quest)
    }
}

fn parse_reward(reward_type: &str, amount: Option<u32>) -> ValidationResult<Reward> {
    match (reward_type.trim().to_ascii_lowercase().as_str(), amount) {
        ("tokens", Some(amount)) => Ok(Reward::Tokens { amount }),
        ("pokemon" | "creature", Some(species_id)) => Ok(Reward::Creature { species_id }),
        ("egg", _) => Ok(Reward::Egg),
        ("tokens" | "pokemon" | "creature", None) => Err(ValidationError::Empty {
            field: "reward_amount",
        }),
        (other, _) => Err(ValidationError::UnknownRewardKind(other.to_string())),
    }
}

/// Pulls the JSON payload out of generated text, which may wrap it in a
/// markdown code fence.
pub fn extract_json_block(text: &str) -> &str {
    let fenced = text
        .split_once("```json")
        .or_else(|| text.split_once("```"))
        .map(|(_, rest)| rest.split_once("```").map_or(rest, |(body, _)| body));
    fenced.unwrap_or(text).trim()
}

/// Parses generated quest text into a quest, or returns the fallback quest
/// when generation failed or produced anything unusable.
pub fn quest_from_generated(
    generated: Result<String, NarrativeError>,
    id: impl Into<String>,
    now: DateTime<Utc>,
    rules: &QuestRules,
) -> Quest {
    let id = id.into();
    let text = match generated {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(error = %err, "quest generation failed, using fallback quest");
            return fallback_quest(id, now, rules);
        }
    };

    let draft: QuestDraft = match serde_json::from_str(extract_json_block(&text)) {
        Ok(draft) => draft,
        Err(err) => {
            tracing::warn!(error = %err, "generated quest is not valid JSON, using fallback quest");
            return fallback_quest(id, now, rules);
        }
    };

    match draft.into_quest(id.clone(), now, rules) {
        Ok(quest) => {
            tracing::info!(quest_id = %quest.id, title = %quest.title, "generated quest");
            quest
        }
        Err(err) => {
            tracing::warn!(error = %err, "generated quest is invalid, using fallback quest");
            fallback_quest(id, now, rules)
        }
    }
}

/// The fixed quest used whenever generation is unavailable.
pub fn fallback_quest(id: impl Into<String>, now: DateTime<Utc>, rules: &QuestRules) -> Quest {
    Quest {
        id: id.into(),
        title: FALLBACK_QUEST_TITLE.to_string(),
        description: FALLBACK_QUEST_DESCRIPTION.to_string(),
        objectives: vec![QuestObjective::new(
            ObjectiveKind::Battle,
            FALLBACK_QUEST_TARGET,
            FALLBACK_QUEST_DESCRIPTION,
        )],
        reward: Reward::Tokens {
            amount: FALLBACK_QUEST_TOKENS,
        },
        expires_at: rules.expires_at(now),
    }
}

/// Draws one challenge from each pool (easy, medium, hard), one draw per pool.
/// Challenge ids are `{id_prefix}-easy`, `{id_prefix}-medium` and `{id_prefix}-hard`.
/// Empty pools are skipped.
pub fn daily_challenges(
    id_prefix: &str,
    rules: &QuestRules,
    rng: &mut (impl RandomSource + ?Sized),
) -> Vec<DailyChallenge> {
    let challenges: Vec<DailyChallenge> = rules
        .pools()
        .into_iter()
        .filter(|(_, pool)| !pool.is_empty())
        .map(|(tier, pool)| {
            let index = pick_index(rng, "daily challenge pick", pool.len());
            pool[index].instantiate(format!("{}-{}", id_prefix, tier))
        })
        .collect();

    tracing::info!(count = challenges.len(), "generated daily challenges");
    challenges
}
