// Game logic: fighters, combat rules and the session driving them
//
// - `characters`: Character record, classes and skills
// - `combat`: Hit resolution, attacks and skill dispatch
// - `update`: Per-frame physics and state timers
// - `scheduler`: Deferred effects with reset protection
// - `ai`: Enemy decision making
// - `session` / `actions`: The match and the commands it accepts
// - `controls`: Player input to commands

pub mod actions;
pub mod ai;
pub mod characters;
pub mod combat;
pub mod config;
pub mod controls;
pub mod error;
pub mod events;
pub mod scheduler;
pub mod session;
pub mod update;

pub use config::ArenaConfig;
pub use error::{Refusal, UnknownClass};
pub use events::SoundCue;
pub use session::{Game, GamePhase};
