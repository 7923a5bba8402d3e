// Creature Battle Schema - Shared type definitions
// This crate holds the static enums and stat blocks shared between the engine
// and anything that needs to speak its vocabulary without pulling in the engine.

// Re-export the main types
pub use creature_data::*;
pub use element::*;
pub use quest_data::*;

pub mod creature_data;
pub mod element;
pub mod quest_data;
