// Combat: hit resolution, basic/special attacks and skill dispatch

pub mod attacks;
pub mod hit;
pub mod skills;

pub use attacks::{basic_attack, special_attack, AttackOutcome, AttackPattern};
pub use hit::{process_hit, resolve_strike, Strike};
pub use skills::{activate, handler_for, SkillPosture};
