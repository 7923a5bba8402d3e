use crate::errors::{ValidationError, ValidationResult};
use chrono::{DateTime, Utc};
use schema::ObjectiveKind;
use serde::{Deserialize, Serialize};

/// A single countable sub-goal of a quest, e.g. "win 3 battles".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestObjective {
    pub kind: ObjectiveKind,
    pub target: u32,
    #[serde(default)]
    pub current: u32,
    pub description: String,
}

impl QuestObjective {
    pub fn new(kind: ObjectiveKind, target: u32, description: impl Into<String>) -> Self {
        Self {
            kind,
            target,
            current: 0,
            description: description.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.current >= self.target
    }

    pub fn remaining(&self) -> u32 {
        self.target.saturating_sub(self.current)
    }

    /// Adds up to `increment`, never past the target. Returns the amount applied.
    pub fn advance(&mut self, increment: u32) -> u32 {
        let applied = increment.min(self.remaining());
        self.current += applied;
        applied
    }

    pub fn validate(&self) -> ValidationResult<()> {
        validate_counter("objective", self.current, self.target)
    }
}

/// What finishing a quest is worth. Granting it is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Reward {
    Tokens { amount: u32 },
    Creature { species_id: u32 },
    Egg,
}

impl Reward {
    /// Human-readable reward line for quest cards.
    pub fn describe(&self) -> String {
        match self {
            Reward::Tokens { amount } => format!("{} tokens", amount),
            Reward::Creature { species_id } => {
                format!("Rare creature encounter (ID: {})", species_id)
            }
            Reward::Egg => "Egg".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    pub id: String,
    pub title: String,
    pub description: String,
    pub objectives: Vec<QuestObjective>,
    pub reward: Reward,
    pub expires_at: DateTime<Utc>,
}

impl Quest {
    /// Advances every unfinished objective of the given kind. Returns the total
    /// progress applied across objectives; 0 means the event changed nothing.
    pub fn advance(&mut self, kind: ObjectiveKind, increment: u32) -> u32 {
        let mut applied = 0;
        for objective in self
            .objectives
            .iter_mut()
            .filter(|objective| objective.kind == kind && !objective.is_complete())
        {
            applied += objective.advance(increment);
            tracing::info!(
                quest_id = %self.id,
                %kind,
                current = objective.current,
                target = objective.target,
                "quest progress"
            );
        }
        applied
    }

    /// True once every objective has reached its target. Recomputed on each call.
    pub fn is_complete(&self) -> bool {
        self.objectives.iter().all(QuestObjective::is_complete)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// (current, target) summed over all objectives.
    pub fn progress(&self) -> (u32, u32) {
        self.objectives.iter().fold((0, 0), |(current, target), objective| {
            (current + objective.current, target + objective.target)
        })
    }

    /// Rejects caller-supplied state that breaks the quest invariants.
    pub fn validate(&self) -> ValidationResult<()> {
        if self.objectives.is_empty() {
            return Err(ValidationError::Empty {
                field: "quest.objectives",
            });
        }
        self.objectives.iter().try_for_each(QuestObjective::validate)
    }
}

/// Returns `quest` with matching objectives advanced by `increment`, clamped at their targets.
pub fn advance_quest(mut quest: Quest, kind: ObjectiveKind, increment: u32) -> Quest {
    quest.advance(kind, increment);
    quest
}

pub fn is_quest_complete(quest: &Quest) -> bool {
    quest.is_complete()
}

/// Shared counter invariant: target >= 1 and current <= target.
pub(crate) fn validate_counter(
    field: &'static str,
    current: u32,
    target: u32,
) -> ValidationResult<()> {
    if target == 0 {
        return Err(ValidationError::out_of_range(field, 0.0, 1.0, u32::MAX as f64));
    }
    if current > target {
        return Err(ValidationError::ProgressExceedsTarget {
            field,
            current,
            target,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn expiry() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 1, 8, 0, 0, 0).unwrap()
    }

    fn battle_quest(target: u32) -> Quest {
        Quest {
            id: "quest-1".to_string(),
            title: "Training Challenge".to_string(),
            description: "Win battles".to_string(),
            objectives: vec![QuestObjective::new(
                ObjectiveKind::Battle,
                target,
                "Win battles",
            )],
            reward: Reward::Tokens { amount: 300 },
            expires_at: expiry(),
        }
    }

    #[test]
    fn test_three_wins_complete_the_quest() {
        let mut quest = battle_quest(3);
        for _ in 0..3 {
            assert!(!is_quest_complete(&quest));
            quest = advance_quest(quest, ObjectiveKind::Battle, 1);
        }
        assert!(is_quest_complete(&quest));

        quest = advance_quest(quest, ObjectiveKind::Battle, 1);
        assert_eq!(quest.objectives[0].current, 3);
    }

    #[test]
    fn test_large_increment_clamps() {
        let mut quest = battle_quest(3);
        assert_eq!(quest.advance(ObjectiveKind::Battle, 10), 3);
        assert_eq!(quest.objectives[0].current, 3);
        assert_eq!(quest.advance(ObjectiveKind::Battle, 10), 0);
    }

    #[test]
    fn test_only_matching_kinds_advance() {
        let mut quest = battle_quest(2);
        quest.objectives.push(QuestObjective::new(
            ObjectiveKind::Capture,
            1,
            "Capture a creature",
        ));

        quest = advance_quest(quest, ObjectiveKind::Capture, 1);
        assert_eq!(quest.objectives[0].current, 0);
        assert_eq!(quest.objectives[1].current, 1);
        assert!(!quest.is_complete());

        quest = advance_quest(quest, ObjectiveKind::Trade, 5);
        assert_eq!(quest.progress(), (1, 3));

        quest = advance_quest(quest, ObjectiveKind::Battle, 2);
        assert!(quest.is_complete());
    }

    #[test]
    fn test_zero_increment_is_a_no_op() {
        let quest = advance_quest(battle_quest(3), ObjectiveKind::Battle, 0);
        assert_eq!(quest, battle_quest(3));
    }

    #[test]
    fn test_expiry_is_inclusive() {
        let quest = battle_quest(1);
        assert!(!quest.is_expired(expiry() - chrono::Duration::seconds(1)));
        assert!(quest.is_expired(expiry()));
    }

    #[test]
    fn test_validation() {
        assert_eq!(battle_quest(3).validate(), Ok(()));

        let mut empty = battle_quest(3);
        empty.objectives.clear();
        assert_eq!(empty.validate().unwrap_err().field(), "quest.objectives");

        let mut overshot = battle_quest(3);
        overshot.objectives[0].current = 4;
        assert_eq!(
            overshot.validate(),
            Err(ValidationError::ProgressExceedsTarget {
                field: "objective",
                current: 4,
                target: 3
            })
        );

        assert_eq!(battle_quest(0).validate().unwrap_err().field(), "objective");
    }

    #[test]
    fn test_reward_descriptions() {
        assert_eq!(Reward::Tokens { amount: 300 }.describe(), "300 tokens");
        assert_eq!(
            Reward::Creature { species_id: 25 }.describe(),
            "Rare creature encounter (ID: 25)"
        );
        assert_eq!(Reward::Egg.describe(), "Egg");
    }

    #[test]
    fn test_quest_json_shape() {
        let json = serde_json::to_value(battle_quest(3)).unwrap();
        assert_eq!(json["objectives"][0]["kind"], "battle");
        assert_eq!(json["reward"]["kind"], "tokens");
        assert_eq!(json["reward"]["amount"], 300);

        let parsed: Quest = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, battle_quest(3));
    }
}
