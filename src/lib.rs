// In: src/lib.rs

//! Creature Battle Engine
//!
//! The deterministic core of a turn-based creature-battling game: damage and
//! type-effectiveness, capture odds, experience and level growth, and quest
//! progress tracking. Callers hand in complete inputs for every call and apply
//! the returned outcomes to their own records; randomness is injected.

// --- MODULE DECLARATIONS ---
// This declares the module hierarchy for the crate.
pub mod battle;
pub mod combatant;
pub mod config;
pub mod engine;
pub mod errors;
pub mod narrative;
pub mod progression;
pub mod quests;

// --- PUBLIC API RE-EXPORTS ---
// This section defines the public-facing API of the `creature-battle` crate,
// making it easy for users to import the most important types directly.

// --- From the `schema` crate ---
// Re-export the static enums and stat blocks.
pub use schema::{BaseStats, Element, ObjectiveKind, Rarity};

// --- From this crate's modules (`src/`) ---

// Battle resolution.
pub use battle::capture::{resolve_capture, CaptureOutcome, CaptureResolver, CaptureRules};
pub use battle::damage::{resolve_damage, DamageOutcome, DamageResolver, DamageRules};
pub use battle::move_ranking::rank_moves;
pub use battle::rng::{RandomSource, ScriptedRandom, SeededRandom, ThreadRandom};

// Caller-supplied snapshots.
pub use combatant::{Combatant, MoveDescriptor};

// Progression and quests.
pub use progression::{
    award_experience, is_level_up, stat_at_level, ExperienceOutcome, ProgressionResolver,
    ProgressionRules,
};
pub use quests::{
    advance_challenge, advance_quest, is_challenge_complete, is_quest_complete, DailyChallenge,
    Quest, QuestObjective, QuestRules, QuestTracker, Reward,
};

// Collaborator contract, configuration and the engine facade.
pub use config::EngineConfig;
pub use engine::Engine;
pub use narrative::{narrate, FallbackNarrator, NarrativeError, NarrativeRequest, NarrativeSource};

// Crate-specific error and result types.
pub use errors::{ConfigError, EngineError, EngineResult, ValidationError, ValidationResult};
