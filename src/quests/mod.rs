pub mod challenge;
pub mod quest;
pub mod templates;
pub mod tracker;


pub use challenge::{advance_challenge, is_challenge_complete, DailyChallenge};
pub use quest::{advance_quest, is_quest_complete, Quest, QuestObjective, Reward};
pub use templates::{
    daily_challenges, extract_json_block, fallback_quest, quest_from_generated, ChallengeTemplate,
    QuestDraft, QuestRules,
};
pub use tracker::QuestTracker;
