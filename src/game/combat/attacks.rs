// Basic and special attacks
//
// Every class swings differently: each one maps to an attack pattern that
// decides reach, damage and any follow-up. All patterns only hit an opponent
// standing in front of the attacker.

use crate::game::characters::{Character, CharacterState, CharacterType};
use crate::game::scheduler::{Deferred, DeferredEffect};

use super::hit::{resolve_strike, Strike, HIT_FLASH_MS};

/// Minimum time between two basic attacks
pub const BASIC_ATTACK_COOLDOWN_MS: f32 = 500.0;
/// Minimum time since the last attack before a special
pub const SPECIAL_ATTACK_COOLDOWN_MS: f32 = 1000.0;

pub const SPECIAL_ATTACK_REACH: f32 = 2.5;
pub const SPECIAL_ATTACK_DAMAGE: f32 = 15.0;

/// Delay before a sweep's shove lands
const SWEEP_KNOCKBACK_DELAY_MS: f32 = 100.0;
const SWEEP_KNOCKBACK_SPEED: f32 = 7.0;

/// Shape of a class's basic attack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackPattern {
    /// Wide horizontal slash
    Horizontal,
    /// Three quick stabs at reduced reach
    Thrust,
    /// Short overhead strike
    Vertical,
    /// Heavy swing with extra reach and a delayed shove
    Sweep,
}

impl AttackPattern {
    pub fn for_class(class: CharacterType) -> Self {
        match class {
            CharacterType::Warrior => Self::Horizontal,
            CharacterType::Rogue => Self::Thrust,
            CharacterType::Mage => Self::Vertical,
            CharacterType::Paladin => Self::Sweep,
        }
    }

    /// Nominal reach before the pattern's modifier
    pub fn base_reach(self) -> f32 {
        match self {
            Self::Horizontal => 2.2,
            Self::Thrust => 1.8,
            Self::Vertical => 1.6,
            Self::Sweep => 2.0,
        }
    }

    /// Effective reach of the attack
    pub fn reach(self) -> f32 {
        match self {
            Self::Thrust => self.base_reach() * 0.9,
            Self::Sweep => self.base_reach() * 1.2,
            Self::Horizontal | Self::Vertical => self.base_reach(),
        }
    }

    /// Damage of a connecting attack
    pub fn damage(self) -> f32 {
        match self {
            Self::Horizontal => 6.0,
            // Three hits of 3
            Self::Thrust => 3.0 * 3.0,
            Self::Vertical => 4.0,
            Self::Sweep => 7.0,
        }
    }
}

/// Result of an attack: both characters after the swing
#[derive(Debug, Clone, PartialEq)]
pub struct AttackOutcome {
    pub attacker: Character,
    pub defender: Character,
    /// The attack landed on a vulnerable opponent
    pub connected: bool,
    pub deferred: Vec<Deferred>,
}

fn in_front_within(attacker: &Character, defender: &Character, reach: f32) -> bool {
    attacker.horizontal_distance(defender) <= reach && attacker.is_facing(defender)
}

fn swung(attacker: &Character, now: f32) -> Character {
    Character {
        state: CharacterState::Attacking,
        last_attack_time: Some(now),
        ..attacker.clone()
    }
}

/// Swing the attacker's class basic attack at `defender`.
///
/// Preconditions are checked by the caller.
pub fn basic_attack(attacker: &Character, defender: &Character, now: f32) -> AttackOutcome {
    let pattern = AttackPattern::for_class(attacker.class);
    let next_attacker = swung(attacker, now);

    let landed = in_front_within(attacker, defender, pattern.reach()) && !defender.invulnerable;
    if !landed {
        return AttackOutcome {
            attacker: next_attacker,
            defender: defender.clone(),
            connected: false,
            deferred: Vec::new(),
        };
    }

    let mut deferred = vec![Deferred::on_target(HIT_FLASH_MS, DeferredEffect::ClearFlash)];
    if pattern == AttackPattern::Sweep {
        deferred.push(Deferred::on_target(
            SWEEP_KNOCKBACK_DELAY_MS,
            DeferredEffect::KnockBack {
                vx: attacker.direction.sign() * SWEEP_KNOCKBACK_SPEED,
            },
        ));
    }

    AttackOutcome {
        attacker: next_attacker,
        defender: resolve_strike(defender, &Strike::new(pattern.damage())),
        connected: true,
        deferred,
    }
}

/// Fixed-reach special attack that pierces defense
pub fn special_attack(attacker: &Character, defender: &Character, now: f32) -> AttackOutcome {
    let next_attacker = Character {
        is_flashing: true,
        ..swung(attacker, now)
    };
    let mut deferred = vec![Deferred::on_actor(HIT_FLASH_MS, DeferredEffect::ClearFlash)];

    let landed =
        in_front_within(attacker, defender, SPECIAL_ATTACK_REACH) && !defender.invulnerable;
    let next_defender = if landed {
        deferred.push(Deferred::on_target(HIT_FLASH_MS, DeferredEffect::ClearFlash));
        resolve_strike(defender, &Strike::new(SPECIAL_ATTACK_DAMAGE).ignoring_defense())
    } else {
        defender.clone()
    };

    AttackOutcome {
        attacker: next_attacker,
        defender: next_defender,
        connected: landed,
        deferred,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::characters::Side;
    use crate::game::scheduler::Recipient;
    use approx::assert_relative_eq;
    use glam::Vec3;

    fn pair(class: CharacterType, gap: f32) -> (Character, Character) {
        let attacker =
            Character::from_class(Side::Player, class.class(), Vec3::new(0.0, 0.75, 0.0), 1);
        let defender = Character::from_class(
            Side::Enemy,
            CharacterType::Warrior.class(),
            Vec3::new(gap, 0.75, 0.0),
            2,
        );
        (attacker, defender)
    }

    #[test]
    fn test_pattern_profiles() {
        assert_relative_eq!(AttackPattern::Horizontal.reach(), 2.2);
        assert_relative_eq!(AttackPattern::Thrust.reach(), 1.62, epsilon = 1e-5);
        assert_relative_eq!(AttackPattern::Sweep.reach(), 2.4, epsilon = 1e-5);
        assert_relative_eq!(AttackPattern::Thrust.damage(), 9.0);
        assert_eq!(AttackPattern::for_class(CharacterType::Mage), AttackPattern::Vertical);
    }

    #[test]
    fn test_warrior_basic_hits_in_front() {
        let (attacker, defender) = pair(CharacterType::Warrior, 2.0);
        let outcome = basic_attack(&attacker, &defender, 1000.0);
        assert!(outcome.connected);
        assert_eq!(outcome.defender.health, 94.0);
        assert_eq!(outcome.attacker.state, CharacterState::Attacking);
        assert_eq!(outcome.attacker.last_attack_time, Some(1000.0));
        assert_eq!(outcome.deferred.len(), 1);
    }

    #[test]
    fn test_basic_misses_behind() {
        let (attacker, defender) = pair(CharacterType::Warrior, -1.0);
        let outcome = basic_attack(&attacker, &defender, 0.0);
        assert!(!outcome.connected);
        assert_eq!(outcome.defender, defender);
        // The swing still happens
        assert_eq!(outcome.attacker.state, CharacterState::Attacking);
    }

    #[test]
    fn test_rogue_thrust_out_of_reduced_reach() {
        let (attacker, defender) = pair(CharacterType::Rogue, 1.7);
        assert!(!basic_attack(&attacker, &defender, 0.0).connected);
        let (attacker, defender) = pair(CharacterType::Rogue, 1.6);
        let outcome = basic_attack(&attacker, &defender, 0.0);
        assert_eq!(outcome.defender.health, 91.0);
    }

    #[test]
    fn test_paladin_sweep_schedules_shove() {
        let (attacker, defender) = pair(CharacterType::Paladin, 2.3);
        let outcome = basic_attack(&attacker, &defender, 0.0);
        assert!(outcome.connected);
        let shove = outcome
            .deferred
            .iter()
            .find(|d| matches!(d.effect, DeferredEffect::KnockBack { .. }));
        assert_eq!(
            shove.map(|d| (d.delay_ms, d.recipient, d.effect)),
            Some((100.0, Recipient::Target, DeferredEffect::KnockBack { vx: 7.0 }))
        );
    }

    #[test]
    fn test_special_ignores_defense_and_flashes_caster() {
        let (attacker, mut defender) = pair(CharacterType::Mage, 2.5);
        defender.is_defending = true;
        let outcome = special_attack(&attacker, &defender, 0.0);
        assert!(outcome.connected);
        assert_eq!(outcome.defender.health, 85.0);
        assert!(outcome.attacker.is_flashing);
        assert_eq!(outcome.deferred.len(), 2);
    }

    #[test]
    fn test_special_miss_still_flashes() {
        let (attacker, defender) = pair(CharacterType::Mage, 3.0);
        let outcome = special_attack(&attacker, &defender, 0.0);
        assert!(!outcome.connected);
        assert!(outcome.attacker.is_flashing);
        assert_eq!(outcome.deferred, vec![Deferred::on_actor(300.0, DeferredEffect::ClearFlash)]);
    }
}
