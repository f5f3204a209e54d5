// Control intents and their default key bindings

use winit::keyboard::KeyCode;

/// Everything the player can ask their fighter to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    // Movement
    Left,
    Right,
    Jump,

    // Combat
    Defense,
    Attack,
    SpecialAttack,

    // Skill slots
    Skill1,
    Skill2,
    Skill3,
    Skill4,
    Skill5,
}

impl Control {
    /// The five skill slots in order
    pub const SKILLS: [Control; 5] = [
        Self::Skill1,
        Self::Skill2,
        Self::Skill3,
        Self::Skill4,
        Self::Skill5,
    ];

    /// Skill id (1 to 5) triggered by this control
    pub fn skill_id(self) -> Option<u8> {
        match self {
            Self::Skill1 => Some(1),
            Self::Skill2 => Some(2),
            Self::Skill3 => Some(3),
            Self::Skill4 => Some(4),
            Self::Skill5 => Some(5),
            _ => None,
        }
    }
}

/// Default keyboard layout: arrows to move, Q/W/E to fight, digits for skills
pub fn default_bindings() -> Vec<(KeyCode, Control)> {
    vec![
        (KeyCode::ArrowLeft, Control::Left),
        (KeyCode::ArrowRight, Control::Right),
        (KeyCode::ArrowUp, Control::Jump),
        (KeyCode::KeyQ, Control::Defense),
        (KeyCode::KeyW, Control::Attack),
        (KeyCode::KeyE, Control::SpecialAttack),
        (KeyCode::Digit1, Control::Skill1),
        (KeyCode::Digit2, Control::Skill2),
        (KeyCode::Digit3, Control::Skill3),
        (KeyCode::Digit4, Control::Skill4),
        (KeyCode::Digit5, Control::Skill5),
    ]
}
