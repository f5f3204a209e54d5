// Playable classes: base stat multipliers and skill templates

use std::fmt;
use std::str::FromStr;

use super::skills::{Skill, MAGE_SKILLS, PALADIN_SKILLS, ROGUE_SKILLS, SKILL_SLOTS, WARRIOR_SKILLS};
use crate::game::error::UnknownClass;

/// The four playable classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterType {
    Warrior,
    Mage,
    Rogue,
    Paladin,
}

impl CharacterType {
    /// Every class, in selection-screen order
    pub const ALL: [CharacterType; 4] = [Self::Warrior, Self::Mage, Self::Rogue, Self::Paladin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warrior => "warrior",
            Self::Mage => "mage",
            Self::Rogue => "rogue",
            Self::Paladin => "paladin",
        }
    }

    /// Static catalogue entry for this class
    pub fn class(&self) -> &'static CharacterClass {
        match self {
            Self::Warrior => &CHARACTER_CLASSES[0],
            Self::Mage => &CHARACTER_CLASSES[1],
            Self::Rogue => &CHARACTER_CLASSES[2],
            Self::Paladin => &CHARACTER_CLASSES[3],
        }
    }
}

impl fmt::Display for CharacterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CharacterType {
    type Err = UnknownClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|class| class.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownClass(s.to_string()))
    }
}

/// Per-class multipliers applied to the shared base stats
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassStats {
    pub health_multiplier: f64,
    pub damage_multiplier: f64,
    pub stamina_multiplier: f64,
    pub speed_multiplier: f64,
    pub jump_multiplier: f64,
    pub defense_multiplier: f64,
    pub recovery_multiplier: f64,
}

/// Base values every class scales from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseStats {
    pub health: f64,
    pub stamina: f64,
    /// Stamina regained per second while not defending
    pub stamina_recharge_rate: f64,
    /// Stamina spent per second while defending
    pub stamina_defense_drain: f64,
}

pub const BASE_STATS: BaseStats = BaseStats {
    health: 100.0,
    stamina: 100.0,
    stamina_recharge_rate: 15.0,
    stamina_defense_drain: 20.0,
};

/// Read-only catalogue entry for a class
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterClass {
    pub class_type: CharacterType,
    pub name: &'static str,
    pub description: &'static str,
    pub stats: ClassStats,
    pub skills: [Skill; SKILL_SLOTS],
    pub color: &'static str,
}

pub static CHARACTER_CLASSES: [CharacterClass; 4] = [
    CharacterClass {
        class_type: CharacterType::Warrior,
        name: "Warrior",
        description: "Balanced melee fighter with dependable close-range skills.",
        stats: ClassStats {
            health_multiplier: 1.0,
            damage_multiplier: 1.0,
            stamina_multiplier: 1.0,
            speed_multiplier: 1.0,
            jump_multiplier: 1.0,
            defense_multiplier: 1.0,
            recovery_multiplier: 1.0,
        },
        skills: WARRIOR_SKILLS,
        color: "#FF5533",
    },
    CharacterClass {
        class_type: CharacterType::Mage,
        name: "Mage",
        description: "Fragile caster with powerful long-range magic.",
        stats: ClassStats {
            health_multiplier: 0.8,
            damage_multiplier: 1.3,
            stamina_multiplier: 0.9,
            speed_multiplier: 0.9,
            jump_multiplier: 0.9,
            defense_multiplier: 0.7,
            recovery_multiplier: 1.1,
        },
        skills: MAGE_SKILLS,
        color: "#3355FF",
    },
    CharacterClass {
        class_type: CharacterType::Rogue,
        name: "Rogue",
        description: "Quick and evasive, wins with speed and mobility.",
        stats: ClassStats {
            health_multiplier: 0.9,
            damage_multiplier: 0.9,
            stamina_multiplier: 1.2,
            speed_multiplier: 1.3,
            jump_multiplier: 1.2,
            defense_multiplier: 0.8,
            recovery_multiplier: 1.2,
        },
        skills: ROGUE_SKILLS,
        color: "#33FF66",
    },
    CharacterClass {
        class_type: CharacterType::Paladin,
        name: "Paladin",
        description: "Sturdy defender with shields and healing.",
        stats: ClassStats {
            health_multiplier: 1.2,
            damage_multiplier: 0.9,
            stamina_multiplier: 1.1,
            speed_multiplier: 0.9,
            jump_multiplier: 0.9,
            defense_multiplier: 1.3,
            recovery_multiplier: 1.3,
        },
        skills: PALADIN_SKILLS,
        color: "#FFDD33",
    },
];
