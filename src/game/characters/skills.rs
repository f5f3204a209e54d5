// Skill records and the per-class skill templates

use std::fmt;

/// Every character carries exactly this many skills, ids 1 through 5
pub const SKILL_SLOTS: usize = 5;

/// Broad category of a skill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkillKind {
    Melee,
    Ranged,
    Magic,
    Defense,
}

/// Secondary effect tag of a skill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkillEffect {
    Stun,
    Knockback,
    /// Extra damage on the confirmed hit
    Bleed,
    /// Restores the caster's health by the skill's damage value
    Heal,
    /// Offensive buffs ignore defense
    Buff,
}

/// A single skill slot.
///
/// `damage` is always a magnitude; whether it hurts the opponent or heals
/// the caster is decided by `effect`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Skill {
    /// Stable key, 1..=5
    pub id: u8,
    pub name: &'static str,
    pub description: &'static str,
    pub damage: f32,
    /// Cooldown in milliseconds
    pub cooldown: f32,
    /// Simulation time (ms) of the last activation
    pub last_used: Option<f32>,
    /// Effect/animation length in milliseconds
    pub duration: f32,
    /// Reach in world units
    pub range: f32,
    pub kind: SkillKind,
    pub effect: Option<SkillEffect>,
}

impl Skill {
    /// Check whether the cooldown has elapsed at `now` (ms)
    pub fn is_ready(&self, now: f32) -> bool {
        match self.last_used {
            Some(used) => now - used >= self.cooldown,
            None => true,
        }
    }

    /// Milliseconds until the skill can be used again
    pub fn cooldown_remaining(&self, now: f32) -> f32 {
        match self.last_used {
            Some(used) => (self.cooldown - (now - used)).max(0.0),
            None => 0.0,
        }
    }

    /// Damage this skill deals to the opponent (heals count as zero)
    pub fn offensive_damage(&self) -> f32 {
        if self.is_heal() {
            0.0
        } else {
            self.damage
        }
    }

    pub fn is_heal(&self) -> bool {
        self.effect == Some(SkillEffect::Heal)
    }

    pub fn is_defense(&self) -> bool {
        self.kind == SkillKind::Defense
    }

    /// Copy of this skill stamped as used at `now`
    pub fn used_at(self, now: f32) -> Self {
        Self {
            last_used: Some(now),
            ..self
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (#{})", self.name, self.id)
    }
}

#[allow(clippy::too_many_arguments)]
const fn skill(
    id: u8,
    name: &'static str,
    damage: f32,
    cooldown: f32,
    duration: f32,
    range: f32,
    kind: SkillKind,
    effect: Option<SkillEffect>,
    description: &'static str,
) -> Skill {
    Skill {
        id,
        name,
        description,
        damage,
        cooldown,
        last_used: None,
        duration,
        range,
        kind,
        effect,
    }
}

use SkillEffect::{Bleed, Buff, Heal, Knockback, Stun};
use SkillKind::{Defense, Magic, Melee, Ranged};

#[rustfmt::skip]
pub const WARRIOR_SKILLS: [Skill; SKILL_SLOTS] = [
    skill(1, "Dash Strike", 15.0, 4000.0, 400.0, 3.0, Melee, Some(Knockback),
        "Charges forward and slams into the opponent."),
    skill(2, "Upper Slash", 20.0, 6000.0, 600.0, 1.8, Melee, Some(Stun),
        "Rising cut that launches the opponent and stuns them."),
    skill(3, "Triple Thrust", 8.0, 8000.0, 800.0, 2.2, Melee, Some(Bleed),
        "Three quick thrusts; weak alone, strong together."),
    skill(4, "Counter Stance", 25.0, 12000.0, 1200.0, 1.5, Defense, Some(Stun),
        "Guards and punishes an opponent standing close."),
    skill(5, "Blade Storm", 40.0, 18000.0, 2000.0, 4.0, Melee, Some(Knockback),
        "Spinning blades hit in every direction."),
];

#[rustfmt::skip]
pub const MAGE_SKILLS: [Skill; SKILL_SLOTS] = [
    skill(1, "Fireball", 20.0, 5000.0, 400.0, 6.0, Magic, Some(Knockback),
        "Long range fire bolt."),
    skill(2, "Ice Arrow", 15.0, 7000.0, 500.0, 5.0, Magic, Some(Stun),
        "Piercing arrow of ice that freezes the target."),
    skill(3, "Teleport", 0.0, 9000.0, 300.0, 7.0, Magic, None,
        "Blinks far ahead."),
    skill(4, "Mana Shield", 0.0, 15000.0, 3000.0, 0.0, Defense, Some(Buff),
        "Magical barrier that blocks incoming damage for a while."),
    skill(5, "Meteor", 50.0, 20000.0, 1800.0, 8.0, Magic, Some(Knockback),
        "Calls down a meteor over a wide area."),
];

#[rustfmt::skip]
pub const ROGUE_SKILLS: [Skill; SKILL_SLOTS] = [
    skill(1, "Shadow Stab", 15.0, 3000.0, 300.0, 2.5, Melee, Some(Bleed),
        "Darts in and stabs a vital point."),
    skill(2, "Poison Dagger", 10.0, 6000.0, 500.0, 1.8, Melee, Some(Bleed),
        "Poisoned blade that keeps hurting."),
    skill(3, "Shadow Leap", 0.0, 8000.0, 400.0, 5.0, Ranged, None,
        "Leaps forward through the shadows."),
    skill(4, "Smoke Bomb", 8.0, 12000.0, 1000.0, 4.0, Ranged, Some(Stun),
        "Smoke cloud that dazes anyone nearby."),
    skill(5, "Assassinate", 45.0, 18000.0, 800.0, 2.0, Melee, Some(Knockback),
        "Hits harder the weaker the target is."),
];

#[rustfmt::skip]
pub const PALADIN_SKILLS: [Skill; SKILL_SLOTS] = [
    skill(1, "Holy Strike", 18.0, 5000.0, 600.0, 2.5, Melee, Some(Knockback),
        "Blessed sword strike at medium reach."),
    skill(2, "Hammer of Judgement", 25.0, 8000.0, 800.0, 2.0, Melee, Some(Knockback),
        "Heavy hammer blow that sends the target flying."),
    skill(3, "Divine Shield", 0.0, 10000.0, 6000.0, 0.0, Defense, Some(Buff),
        "Shield that absorbs 80 damage for six seconds."),
    skill(4, "Healing Light", 20.0, 15000.0, 1200.0, 0.0, Magic, Some(Heal),
        "Restores the caster's health."),
    skill(5, "Holy Burst", 35.0, 20000.0, 1500.0, 4.0, Magic, Some(Stun),
        "Burst of light that stuns everyone around."),
];
