// Reasons a command can be turned down

use super::characters::CharacterState;

/// Why an action was refused.
///
/// Refusals never reach the caller of a command; the command simply leaves
/// the state untouched and the reason is logged.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum Refusal {
    #[error("no match in progress")]
    NotFighting,

    #[error("character is {0}")]
    Incapacitated(CharacterState),

    #[error("character is busy ({0})")]
    Busy(CharacterState),

    #[error("still defending")]
    Defending,

    #[error("on cooldown for another {remaining_ms:.0} ms")]
    OnCooldown { remaining_ms: f32 },

    #[error("not standing on solid ground")]
    Airborne,

    #[error("stamina depleted")]
    StaminaDepleted,

    #[error("no skill with id {0}")]
    UnknownSkill(u8),
}

/// A class name that is not one of the playable classes
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown character class: {0}")]
pub struct UnknownClass(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refusal_display() {
        assert_eq!(
            Refusal::Incapacitated(CharacterState::Stunned).to_string(),
            "character is stunned"
        );
        assert_eq!(
            Refusal::OnCooldown { remaining_ms: 1499.6 }.to_string(),
            "on cooldown for another 1500 ms"
        );
        assert_eq!(Refusal::UnknownSkill(9).to_string(), "no skill with id 9");
    }

    #[test]
    fn test_unknown_class_display() {
        let err = UnknownClass("necromancer".to_string());
        assert_eq!(err.to_string(), "unknown character class: necromancer");
    }
}
