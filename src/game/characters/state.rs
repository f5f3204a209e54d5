// Character state machine states

use std::fmt;

/// Represents the current state of a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CharacterState {
    /// Standing still
    #[default]
    Idle,
    /// Moving horizontally in the facing direction
    Running,
    /// Airborne after a jump, until landing
    Jumping,
    /// Inside the post-attack window
    Attacking,
    /// Guarding (halves incoming damage, drains stamina)
    Defending,
    /// Action-locked with a countdown
    Stunned,
    /// Knocked down at zero health
    Fallen,
    /// Getting back up after a knockdown
    Recovering,
}

impl CharacterState {
    /// Stunned, knocked down or getting up: no voluntary actions at all
    pub fn is_incapacitated(&self) -> bool {
        matches!(self, Self::Stunned | Self::Fallen | Self::Recovering)
    }

    /// Check if the character can steer horizontally
    pub fn can_move(&self) -> bool {
        !self.is_incapacitated()
    }

    /// Check if the character can start an attack or a skill
    pub fn can_attack(&self) -> bool {
        !self.is_incapacitated() && *self != Self::Attacking
    }

    /// Horizontal input only turns idle/running characters into runners
    pub fn accepts_run(&self) -> bool {
        matches!(self, Self::Idle | Self::Running)
    }

    /// Name used by logs and the presentation layer
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Jumping => "jumping",
            Self::Attacking => "attacking",
            Self::Defending => "defending",
            Self::Stunned => "stunned",
            Self::Fallen => "fallen",
            Self::Recovering => "recovering",
        }
    }
}

impl fmt::Display for CharacterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
