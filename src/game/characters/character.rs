// Character record: the full mutable state of one combatant

use std::fmt;

use glam::Vec3;

use super::class::{CharacterClass, CharacterType, BASE_STATS};
use super::skills::{Skill, SKILL_SLOTS};
use super::state::CharacterState;
use crate::core::math::{clamp, scaled_round};

/// Unique number given to every freshly built character
pub type CharacterInstance = u64;

/// Which of the two combat slots a character occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Self::Player => Self::Enemy,
            Self::Enemy => Self::Player,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::Enemy => "enemy",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction a character is facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    /// -1 for left, 1 for right
    pub fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Facing that points from `from_x` at `to_x` (right when level)
    pub fn toward(from_x: f32, to_x: f32) -> Self {
        if to_x < from_x {
            Self::Left
        } else {
            Self::Right
        }
    }
}

/// Contact tracking between the two fighters
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CollisionData {
    pub is_colliding: bool,
    /// Simulation time (ms) the current contact started
    pub collision_start_time: f32,
    /// Simulation time (ms) of the latest contact
    pub last_collision_time: f32,
    /// Length of the current contact in ms
    pub collision_duration: f32,
}

/// One combatant.
///
/// Characters are plain values: every update produces a new copy and the
/// session swaps it into its slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    // Identity
    pub side: Side,
    pub class: CharacterType,
    pub name: &'static str,
    pub color: &'static str,
    pub instance: CharacterInstance,

    // Spatial (z stays 0)
    pub position: Vec3,
    pub velocity: Vec3,
    pub direction: Facing,

    // Resources
    pub health: f32,
    pub max_health: f32,
    pub stamina: f32,
    pub max_stamina: f32,
    /// Stamina per second while not defending
    pub stamina_recharge_rate: f32,
    /// Stamina per second while defending
    pub stamina_defense_drain: f32,
    pub is_stamina_depleted: bool,
    /// Seconds left in the depletion lockout
    pub stamina_recovery_timer: f32,
    pub shield: f32,
    /// Milliseconds before the shield pool expires
    pub shield_duration: f32,

    // Behaviour
    pub state: CharacterState,
    pub is_defending: bool,
    pub is_flashing: bool,
    pub invulnerable: bool,
    /// Countdown (ms) shared by stun, knockdown and recovery
    pub stun_timer: f32,
    /// Simulation time (ms) of the last attack or skill
    pub last_attack_time: Option<f32>,

    pub skills: [Skill; SKILL_SLOTS],
    pub collision: CollisionData,
}

impl Character {
    /// Build a fresh character of the given class for a side
    pub fn from_class(
        side: Side,
        class: &CharacterClass,
        spawn: Vec3,
        instance: CharacterInstance,
    ) -> Self {
        let stats = class.stats;
        let max_health = scaled_round(BASE_STATS.health, stats.health_multiplier);
        let max_stamina = scaled_round(BASE_STATS.stamina, stats.stamina_multiplier);

        Self {
            side,
            class: class.class_type,
            name: class.name,
            color: class.color,
            instance,
            position: spawn,
            velocity: Vec3::ZERO,
            direction: match side {
                Side::Player => Facing::Right,
                Side::Enemy => Facing::Left,
            },
            health: max_health,
            max_health,
            stamina: max_stamina,
            max_stamina,
            stamina_recharge_rate: scaled_round(
                BASE_STATS.stamina_recharge_rate,
                stats.recovery_multiplier,
            ),
            stamina_defense_drain: scaled_round(
                BASE_STATS.stamina_defense_drain,
                stats.defense_multiplier,
            ),
            is_stamina_depleted: false,
            stamina_recovery_timer: 0.0,
            shield: 0.0,
            shield_duration: 0.0,
            state: CharacterState::Idle,
            is_defending: false,
            is_flashing: false,
            invulnerable: false,
            stun_timer: 0.0,
            last_attack_time: None,
            // Arrays of Copy skills are copied, never shared
            skills: class.skills,
            collision: CollisionData::default(),
        }
    }

    /// Look up a skill by its id
    pub fn skill(&self, id: u8) -> Option<&Skill> {
        self.skills.iter().find(|skill| skill.id == id)
    }

    pub fn skill_index(&self, id: u8) -> Option<usize> {
        self.skills.iter().position(|skill| skill.id == id)
    }

    pub fn health_fraction(&self) -> f32 {
        if self.max_health > 0.0 {
            self.health / self.max_health
        } else {
            0.0
        }
    }

    pub fn stamina_fraction(&self) -> f32 {
        if self.max_stamina > 0.0 {
            self.stamina / self.max_stamina
        } else {
            0.0
        }
    }

    /// Vertical velocity is exactly zero only while standing on a platform
    pub fn is_grounded(&self) -> bool {
        self.velocity.y == 0.0
    }

    pub fn horizontal_distance(&self, other: &Character) -> f32 {
        (self.position.x - other.position.x).abs()
    }

    pub fn vertical_distance(&self, other: &Character) -> f32 {
        (self.position.y - other.position.y).abs()
    }

    /// Whether `other` is strictly in front of this character
    pub fn is_facing(&self, other: &Character) -> bool {
        match self.direction {
            Facing::Right => self.position.x < other.position.x,
            Facing::Left => self.position.x > other.position.x,
        }
    }

    /// Milliseconds since the last attack, `None` if it never attacked
    pub fn since_last_attack(&self, now: f32) -> Option<f32> {
        self.last_attack_time.map(|at| now - at)
    }

    /// Copy with health and stamina pulled back into their valid ranges
    pub fn with_resources_clamped(&self) -> Self {
        Self {
            health: clamp(self.health, 0.0, self.max_health),
            stamina: clamp(self.stamina, 0.0, self.max_stamina),
            shield: self.shield.max(0.0),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh(side: Side, class: CharacterType) -> Character {
        Character::from_class(side, class.class(), Vec3::new(0.0, 1.0, 0.0), 1)
    }

    #[test]
    fn test_mage_health_is_scaled() {
        let mage = fresh(Side::Player, CharacterType::Mage);
        assert_eq!(mage.max_health, 80.0);
        assert_eq!(mage.health, 80.0);
        assert_eq!(mage.max_stamina, 90.0);
        assert_eq!(mage.stamina_recharge_rate, 17.0);
        assert_eq!(mage.stamina_defense_drain, 14.0);
    }

    #[test]
    fn test_paladin_rates_round_half_up() {
        let paladin = fresh(Side::Enemy, CharacterType::Paladin);
        assert_eq!(paladin.max_health, 120.0);
        assert_eq!(paladin.stamina_recharge_rate, 20.0);
        assert_eq!(paladin.stamina_defense_drain, 26.0);
    }

    #[test]
    fn test_sides_face_each_other() {
        assert_eq!(fresh(Side::Player, CharacterType::Warrior).direction, Facing::Right);
        assert_eq!(fresh(Side::Enemy, CharacterType::Warrior).direction, Facing::Left);
    }

    #[test]
    fn test_skills_are_independent_copies() {
        let mut first = fresh(Side::Player, CharacterType::Rogue);
        let second = fresh(Side::Enemy, CharacterType::Rogue);
        first.skills[0] = first.skills[0].used_at(500.0);
        assert_eq!(first.skills[0].last_used, Some(500.0));
        assert_eq!(second.skills[0].last_used, None);
        assert_eq!(CharacterType::Rogue.class().skills[0].last_used, None);
    }

    #[test]
    fn test_skill_lookup() {
        let warrior = fresh(Side::Player, CharacterType::Warrior);
        assert_eq!(warrior.skill(3).map(|s| s.name), Some("Triple Thrust"));
        assert_eq!(warrior.skill_index(5), Some(4));
        assert!(warrior.skill(0).is_none());
        assert!(warrior.skill(6).is_none());
    }

    #[test]
    fn test_is_facing() {
        let mut a = fresh(Side::Player, CharacterType::Warrior);
        let mut b = fresh(Side::Enemy, CharacterType::Warrior);
        a.position.x = -1.0;
        b.position.x = 1.0;
        assert!(a.is_facing(&b));
        assert!(b.is_facing(&a));
        a.direction = Facing::Left;
        assert!(!a.is_facing(&b));
    }

    #[test]
    fn test_facing_toward() {
        assert_eq!(Facing::toward(0.0, -2.0), Facing::Left);
        assert_eq!(Facing::toward(0.0, 2.0), Facing::Right);
        assert_eq!(Facing::Left.reversed(), Facing::Right);
        assert_eq!(Facing::Left.sign(), -1.0);
    }

    #[test]
    fn test_resources_clamped() {
        let mut c = fresh(Side::Player, CharacterType::Warrior);
        c.health = 130.0;
        c.stamina = -4.0;
        c.shield = -1.0;
        let clamped = c.with_resources_clamped();
        assert_eq!(clamped.health, 100.0);
        assert_eq!(clamped.stamina, 0.0);
        assert_eq!(clamped.shield, 0.0);
    }
}
