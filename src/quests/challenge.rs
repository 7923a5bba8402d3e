use crate::errors::ValidationResult;
use crate::quests::quest::{validate_counter, Reward};
use schema::ObjectiveKind;
use serde::{Deserialize, Serialize};

/// A one-counter daily task paying a fixed token reward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyChallenge {
    pub id: String,
    pub description: String,
    pub kind: ObjectiveKind,
    #[serde(default)]
    pub progress: u32,
    pub target: u32,
    pub reward_tokens: u32,
}

impl DailyChallenge {
    /// Adds up to `increment`, never past the target. Returns the amount applied.
    pub fn advance(&mut self, increment: u32) -> u32 {
        let applied = increment.min(self.target.saturating_sub(self.progress));
        self.progress += applied;
        tracing::info!(
            challenge_id = %self.id,
            progress = self.progress,
            target = self.target,
            "challenge progress"
        );
        applied
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= self.target
    }

    pub fn reward(&self) -> Reward {
        Reward::Tokens {
            amount: self.reward_tokens,
        }
    }

    pub fn validate(&self) -> ValidationResult<()> {
        validate_counter("challenge", self.progress, self.target)
    }
}

/// Returns `challenge` with its counter advanced by `increment`, clamped at the target.
pub fn advance_challenge(mut challenge: DailyChallenge, increment: u32) -> DailyChallenge {
    challenge.advance(increment);
    challenge
}

pub fn is_challenge_complete(challenge: &DailyChallenge) -> bool {
    challenge.is_complete()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ValidationError;
    use pretty_assertions::assert_eq;

    fn capture_challenge(target: u32) -> DailyChallenge {
        DailyChallenge {
            id: "daily-easy".to_string(),
            description: format!("Capture {} creatures", target),
            kind: ObjectiveKind::Capture,
            progress: 0,
            target,
            reward_tokens: 150,
        }
    }

    #[test]
    fn test_progress_clamps_at_target() {
        let mut challenge = capture_challenge(2);
        challenge = advance_challenge(challenge, 1);
        assert!(!is_challenge_complete(&challenge));

        challenge = advance_challenge(challenge, 5);
        assert_eq!(challenge.progress, 2);
        assert!(is_challenge_complete(&challenge));

        assert_eq!(challenge.advance(1), 0);
        assert_eq!(challenge.progress, 2);
    }

    #[test]
    fn test_reward_is_tokens() {
        assert_eq!(
            capture_challenge(1).reward(),
            Reward::Tokens { amount: 150 }
        );
    }

    #[test]
    fn test_validation() {
        assert_eq!(capture_challenge(1).validate(), Ok(()));

        let mut overshot = capture_challenge(1);
        overshot.progress = 2;
        assert_eq!(
            overshot.validate(),
            Err(ValidationError::ProgressExceedsTarget {
                field: "challenge",
                current: 2,
                target: 1
            })
        );
    }
}
