// Character system
//
// This module contains everything related to the two combatants:
// - Character record and its identity/facing types
// - Class catalogue with stat multipliers
// - Skill records and per-class skill templates
// - State machine states

pub mod character;
pub mod class;
pub mod skills;
pub mod state;

// Re-export commonly used types
pub use character::{Character, CharacterInstance, CollisionData, Facing, Side};
pub use class::{CharacterClass, CharacterType, ClassStats, BASE_STATS, CHARACTER_CLASSES};
pub use skills::{Skill, SkillEffect, SkillKind, SKILL_SLOTS};
pub use state::CharacterState;
