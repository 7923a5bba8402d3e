//! Contract with the text-generation collaborator.
//!
//! Generated text is decoration: a provider either hands back a string or the
//! engine substitutes a fixed fallback line. Nothing the engine computes reads
//! narrative text.

use crate::battle::damage::DamageOutcome;
use crate::combatant::{Combatant, MoveDescriptor};
use schema::Element;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NarrativeError {
    #[error("narrative provider unavailable: {0}")]
    Unavailable(String),
    #[error("narrative provider timed out")]
    Timeout,
    #[error("narrative provider was rate limited")]
    RateLimited,
    #[error("narrative provider returned no text")]
    Empty,
}

/// What a provider is asked to write.
#[derive(Debug, Clone, PartialEq)]
pub enum NarrativeRequest {
    Encounter {
        creature: String,
    },
    BattleCommentary {
        attacker: String,
        defender: String,
        move_name: String,
        damage: u32,
        effectiveness: f64,
    },
    Hatching {
        creature: String,
        elements: Vec<Element>,
    },
}

impl NarrativeRequest {
    /// Commentary request for a resolved hit.
    pub fn commentary(
        attacker: &Combatant,
        defender: &Combatant,
        move_used: &MoveDescriptor,
        outcome: &DamageOutcome,
    ) -> Self {
        NarrativeRequest::BattleCommentary {
            attacker: attacker.display_name().to_string(),
            defender: defender.display_name().to_string(),
            move_name: move_used.name.clone(),
            damage: outcome.damage,
            effectiveness: outcome.effectiveness,
        }
    }

    /// The deterministic line used whenever a provider fails.
    pub fn fallback(&self) -> String {
        match self {
            NarrativeRequest::Encounter { creature } => format!("A wild {} appeared!", creature),
            NarrativeRequest::BattleCommentary {
                attacker,
                move_name,
                damage,
                ..
            } => format!("{} used {}! It dealt {} damage!", attacker, move_name, damage),
            NarrativeRequest::Hatching { creature, .. } => {
                format!("The egg hatched! It's a {}!", creature)
            }
        }
    }
}

/// A text-generation provider. Implementations own their own rate limiting
/// and timeouts; the engine only sees the final result.
pub trait NarrativeSource {
    fn generate(&self, request: &NarrativeRequest) -> Result<String, NarrativeError>;
}

/// A provider that never generates anything, so every request gets its fallback.
#[derive(Debug, Default, Clone, Copy)]
pub struct FallbackNarrator;

impl NarrativeSource for FallbackNarrator {
    fn generate(&self, _request: &NarrativeRequest) -> Result<String, NarrativeError> {
        Err(NarrativeError::Unavailable("no provider configured".to_string()))
    }
}

/// Returns generated text, or the request's fallback line if the provider
/// fails or returns only whitespace.
pub fn narrate(source: &dyn NarrativeSource, request: &NarrativeRequest) -> String {
    match source.generate(request).and_then(non_empty) {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(error = %err, "narrative generation failed, using fallback");
            request.fallback()
        }
    }
}

fn non_empty(text: String) -> Result<String, NarrativeError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(NarrativeError::Empty)
    } else {
        Ok(trimmed.to_string())
    }
}
