pub mod experience;


pub use experience::{
    award_experience, experience_threshold, is_level_up, stat_at_level, stats_at_level,
    ExperienceOutcome, ProgressionResolver, ProgressionRules, StatBlock,
};
