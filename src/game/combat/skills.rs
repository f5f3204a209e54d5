// Skill activation through a (class, skill id) dispatch table
//
// Each handler is a pure function of the caster, its opponent, the skill and
// the current time. It returns the updated caster, the strike to land on the
// opponent (if it is in reach) and the deferred effects to schedule. Landing
// the strike and stamping the cooldown happen once, in `activate`.

use crate::game::characters::{Character, CharacterState, CharacterType, Skill, SkillEffect};
use crate::game::scheduler::{Deferred, DeferredEffect};

use super::attacks::AttackOutcome;
use super::hit::{resolve_strike, Strike, HIT_FLASH_MS};

/// Shield pool granted by the divine shield
pub const DIVINE_SHIELD_POINTS: f32 = 80.0;
/// Flash length of a heal
pub const HEAL_FLASH_MS: f32 = 500.0;

const TELEPORT_INVULNERABLE_MS: f32 = 200.0;
const SHADOW_LEAP_INVULNERABLE_MS: f32 = 400.0;

/// Stun and launch used by skills without a bespoke handler
const GENERIC_STUN_MS: f32 = 1500.0;
const GENERIC_KNOCKBACK_SPEED: f32 = 15.0;
const GENERIC_KNOCKBACK_LIFT: f32 = 5.0;
const BLEED_MULTIPLIER: f32 = 1.2;

/// Inputs of a skill handler
#[derive(Debug, Clone, Copy)]
pub struct SkillContext<'a> {
    pub caster: &'a Character,
    pub opponent: &'a Character,
    pub skill: Skill,
    pub now: f32,
}

impl SkillContext<'_> {
    fn distance(&self) -> f32 {
        self.caster.horizontal_distance(self.opponent)
    }

    /// Opponent in front of the caster within `reach`
    fn in_front(&self, reach: f32) -> bool {
        self.distance() <= reach && self.caster.is_facing(self.opponent)
    }

    /// Opponent within `reach` on either side
    fn around(&self, reach: f32) -> bool {
        self.distance() <= reach
    }

    /// +1 when the opponent is to the right of the caster, -1 otherwise
    fn away(&self) -> f32 {
        if self.caster.position.x < self.opponent.position.x {
            1.0
        } else {
            -1.0
        }
    }

    fn facing(&self) -> f32 {
        self.caster.direction.sign()
    }
}

/// Movement state a skill leaves its caster in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillPosture {
    /// Occupies the attack window
    Attacking,
    /// Guard window until `EndDefenseWindow` fires
    Defending,
    /// Resolves immediately, state untouched
    Unchanged,
}

/// What a handler wants done
#[derive(Debug, Clone, PartialEq)]
pub struct SkillOutcome {
    pub caster: Character,
    pub strike: Option<Strike>,
    pub deferred: Vec<Deferred>,
    pub posture: SkillPosture,
}

impl SkillOutcome {
    fn attack(caster: Character, strike: Option<Strike>) -> Self {
        Self {
            caster,
            strike,
            deferred: Vec::new(),
            posture: SkillPosture::Attacking,
        }
    }
}

pub type SkillHandler = fn(&SkillContext) -> SkillOutcome;

/// Pick the handler for a class's skill
pub fn handler_for(class: CharacterType, skill: &Skill) -> SkillHandler {
    use CharacterType::*;

    match (class, skill.id) {
        (Warrior, 1) => warrior_dash_strike,
        (Warrior, 2) => warrior_upper_slash,
        (Warrior, 3) => warrior_triple_thrust,
        (Warrior, 4) => warrior_counter_stance,
        (Warrior, 5) => warrior_blade_storm,

        (Mage, 1) => mage_fireball,
        (Mage, 2) => mage_ice_arrow,
        (Mage, 3) => mage_teleport,
        (Mage, 4) => defense_window,
        (Mage, 5) => mage_meteor,

        (Rogue, 1) => rogue_shadow_stab,
        (Rogue, 2) => rogue_poison_dagger,
        (Rogue, 3) => rogue_shadow_leap,
        (Rogue, 4) => rogue_smoke_bomb,
        (Rogue, 5) => rogue_assassinate,

        (Paladin, 1) => paladin_holy_strike,
        (Paladin, 2) => paladin_hammer_of_judgement,
        (Paladin, 3) => paladin_divine_shield,
        (Paladin, 4) => heal,
        (Paladin, 5) => paladin_holy_burst,

        _ => generic_handler(skill),
    }
}

/// Handler for a skill no class branch knows about
pub fn generic_handler(skill: &Skill) -> SkillHandler {
    if skill.is_heal() {
        heal
    } else if skill.is_defense() {
        defense_window
    } else {
        generic_strike
    }
}

/// Activate `caster.skills[index]` against `opponent`.
///
/// Preconditions (phase, state, cooldown) are checked by the caller. The
/// cooldown and the attack time are stamped even when the skill misses.
pub fn activate(caster: &Character, opponent: &Character, index: usize, now: f32) -> AttackOutcome {
    let skill = caster.skills[index];

    let mut stamped = caster.clone();
    stamped.skills[index] = skill.used_at(now);
    stamped.last_attack_time = Some(now);

    let ctx = SkillContext {
        caster: &stamped,
        opponent,
        skill,
        now,
    };
    let outcome = handler_for(caster.class, &skill)(&ctx);

    let mut next_caster = outcome.caster;
    match outcome.posture {
        SkillPosture::Attacking => next_caster.state = CharacterState::Attacking,
        SkillPosture::Defending => next_caster.state = CharacterState::Defending,
        SkillPosture::Unchanged => {}
    }

    let mut deferred = outcome.deferred;
    let (defender, connected) = match outcome.strike {
        Some(strike) if !opponent.invulnerable => {
            deferred.push(Deferred::on_target(HIT_FLASH_MS, DeferredEffect::ClearFlash));
            (resolve_strike(opponent, &strike), true)
        }
        _ => (opponent.clone(), false),
    };

    AttackOutcome {
        attacker: next_caster,
        defender,
        connected,
        deferred,
    }
}

// Shared handlers

/// Restore the caster's health by the skill's magnitude
fn heal(ctx: &SkillContext) -> SkillOutcome {
    let mut caster = ctx.caster.clone();
    caster.health = (caster.health + ctx.skill.damage).min(caster.max_health);
    caster.is_flashing = true;

    SkillOutcome {
        caster,
        strike: None,
        deferred: vec![Deferred::on_actor(HEAL_FLASH_MS, DeferredEffect::ClearFlash)],
        posture: SkillPosture::Unchanged,
    }
}

/// Guard and become invulnerable for the skill's duration
fn defense_window(ctx: &SkillContext) -> SkillOutcome {
    let mut caster = ctx.caster.clone();
    caster.is_defending = true;
    caster.invulnerable = true;

    SkillOutcome {
        caster,
        strike: None,
        deferred: vec![Deferred::on_actor(
            ctx.skill.duration,
            DeferredEffect::EndDefenseWindow,
        )],
        posture: SkillPosture::Defending,
    }
}

/// Range and facing check, then the effect tag shapes the strike
fn generic_strike(ctx: &SkillContext) -> SkillOutcome {
    let skill = ctx.skill;
    let strike = ctx.in_front(skill.range).then(|| {
        let strike = Strike::new(skill.damage);
        match skill.effect {
            Some(SkillEffect::Stun) => strike.with_stun(GENERIC_STUN_MS),
            Some(SkillEffect::Knockback) => strike.with_launch(
                ctx.facing() * GENERIC_KNOCKBACK_SPEED,
                GENERIC_KNOCKBACK_LIFT,
            ),
            Some(SkillEffect::Bleed) => Strike {
                damage: (skill.damage * BLEED_MULTIPLIER).floor(),
                ..strike
            },
            Some(SkillEffect::Buff) => strike.ignoring_defense(),
            Some(SkillEffect::Heal) | None => strike,
        }
    });
    SkillOutcome::attack(ctx.caster.clone(), strike)
}

/// Blink `distance` along the facing direction, briefly invulnerable
fn reposition(ctx: &SkillContext, lift: Option<f32>, invulnerable_ms: f32) -> SkillOutcome {
    let mut caster = ctx.caster.clone();
    caster.position.x += ctx.facing() * ctx.skill.range;
    if let Some(vy) = lift {
        caster.velocity.y = vy;
    }
    caster.invulnerable = true;

    SkillOutcome {
        caster,
        strike: None,
        deferred: vec![Deferred::on_actor(
            invulnerable_ms,
            DeferredEffect::ClearInvulnerable,
        )],
        posture: SkillPosture::Unchanged,
    }
}

// Warrior

fn warrior_dash_strike(ctx: &SkillContext) -> SkillOutcome {
    let mut caster = ctx.caster.clone();
    caster.velocity.x = ctx.facing() * 15.0;
    let strike = ctx
        .in_front(ctx.skill.range + 1.0)
        .then(|| Strike::new(ctx.skill.damage));
    SkillOutcome::attack(caster, strike)
}

fn warrior_upper_slash(ctx: &SkillContext) -> SkillOutcome {
    let strike = ctx.in_front(ctx.skill.range).then(|| {
        Strike::new(ctx.skill.damage)
            .with_vertical_launch(8.0)
            .with_stun(800.0)
    });
    SkillOutcome::attack(ctx.caster.clone(), strike)
}

fn warrior_triple_thrust(ctx: &SkillContext) -> SkillOutcome {
    let strike = ctx
        .in_front(ctx.skill.range)
        .then(|| Strike::new(ctx.skill.damage * 3.0).flashing());
    SkillOutcome::attack(ctx.caster.clone(), strike)
}

/// Guard window that also punishes an opponent standing close in front
fn warrior_counter_stance(ctx: &SkillContext) -> SkillOutcome {
    let mut outcome = defense_window(ctx);
    outcome.strike = ctx
        .in_front(ctx.skill.range)
        .then(|| Strike::new(ctx.skill.damage * 1.5).with_stun(1200.0));
    outcome
}

fn warrior_blade_storm(ctx: &SkillContext) -> SkillOutcome {
    let strike = ctx
        .around(ctx.skill.range)
        .then(|| Strike::new(ctx.skill.damage).with_launch(ctx.away() * 12.0, 5.0));
    SkillOutcome::attack(ctx.caster.clone(), strike)
}

// Mage

fn mage_fireball(ctx: &SkillContext) -> SkillOutcome {
    let strike = ctx
        .in_front(ctx.skill.range)
        .then(|| Strike::new(ctx.skill.damage).ignoring_defense());
    SkillOutcome::attack(ctx.caster.clone(), strike)
}

fn mage_ice_arrow(ctx: &SkillContext) -> SkillOutcome {
    let strike = ctx
        .in_front(ctx.skill.range)
        .then(|| Strike::new(ctx.skill.damage).with_stun(1000.0));
    SkillOutcome::attack(ctx.caster.clone(), strike)
}

fn mage_teleport(ctx: &SkillContext) -> SkillOutcome {
    reposition(ctx, None, TELEPORT_INVULNERABLE_MS)
}

fn mage_meteor(ctx: &SkillContext) -> SkillOutcome {
    let strike = ctx.around(ctx.skill.range).then(|| {
        Strike::new(ctx.skill.damage)
            .ignoring_defense()
            .with_launch(ctx.away() * 10.0, 8.0)
    });
    SkillOutcome::attack(ctx.caster.clone(), strike)
}

// Rogue

fn rogue_shadow_stab(ctx: &SkillContext) -> SkillOutcome {
    let mut caster = ctx.caster.clone();
    caster.velocity.x = ctx.facing() * 10.0;
    let strike = ctx
        .in_front(ctx.skill.range)
        .then(|| Strike::new(ctx.skill.damage * BLEED_MULTIPLIER));
    SkillOutcome::attack(caster, strike)
}

fn rogue_poison_dagger(ctx: &SkillContext) -> SkillOutcome {
    let strike = ctx
        .in_front(ctx.skill.range)
        .then(|| Strike::new(ctx.skill.damage * 1.5).flashing());
    SkillOutcome::attack(ctx.caster.clone(), strike)
}

fn rogue_shadow_leap(ctx: &SkillContext) -> SkillOutcome {
    reposition(ctx, Some(5.0), SHADOW_LEAP_INVULNERABLE_MS)
}

fn rogue_smoke_bomb(ctx: &SkillContext) -> SkillOutcome {
    let strike = ctx
        .around(ctx.skill.range)
        .then(|| Strike::new(ctx.skill.damage).with_stun(800.0));
    SkillOutcome::attack(ctx.caster.clone(), strike)
}

/// Hits harder the lower the opponent's health
fn rogue_assassinate(ctx: &SkillContext) -> SkillOutcome {
    let strike = ctx.in_front(ctx.skill.range).then(|| {
        let execute = 2.0 - ctx.opponent.health_fraction();
        Strike::new(ctx.skill.damage * execute).with_launch(ctx.facing() * 12.0, 6.0)
    });
    SkillOutcome::attack(ctx.caster.clone(), strike)
}

// Paladin

fn paladin_holy_strike(ctx: &SkillContext) -> SkillOutcome {
    let strike = ctx
        .in_front(ctx.skill.range)
        .then(|| Strike::new(ctx.skill.damage).with_horizontal_launch(ctx.facing() * 8.0));
    SkillOutcome::attack(ctx.caster.clone(), strike)
}

fn paladin_hammer_of_judgement(ctx: &SkillContext) -> SkillOutcome {
    let strike = ctx
        .in_front(ctx.skill.range)
        .then(|| Strike::new(ctx.skill.damage).with_launch(ctx.facing() * 15.0, 7.0));
    SkillOutcome::attack(ctx.caster.clone(), strike)
}

/// Absorbing shield pool, counted down by the physics tick
fn paladin_divine_shield(ctx: &SkillContext) -> SkillOutcome {
    let mut caster = ctx.caster.clone();
    caster.shield = DIVINE_SHIELD_POINTS;
    caster.shield_duration = ctx.skill.duration;
    caster.is_flashing = true;

    SkillOutcome {
        caster,
        strike: None,
        deferred: vec![
            Deferred::on_actor(HIT_FLASH_MS, DeferredEffect::ClearFlash),
            Deferred::on_actor(ctx.skill.duration, DeferredEffect::ExpireShield),
        ],
        posture: SkillPosture::Unchanged,
    }
}

fn paladin_holy_burst(ctx: &SkillContext) -> SkillOutcome {
    let strike = ctx.around(ctx.skill.range).then(|| {
        Strike::new(ctx.skill.damage)
            .with_stun(1200.0)
            .with_launch(ctx.away() * 8.0, 5.0)
    });
    SkillOutcome::attack(ctx.caster.clone(), strike)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::characters::{Facing, Side, SkillKind};
    use crate::game::scheduler::Recipient;
    use approx::assert_relative_eq;
    use glam::Vec3;

    fn fighter(side: Side, class: CharacterType, x: f32) -> Character {
        Character::from_class(side, class.class(), Vec3::new(x, 0.75, 0.0), 1)
    }

    fn cast(class: CharacterType, id: u8, gap: f32) -> AttackOutcome {
        let caster = fighter(Side::Player, class, 0.0);
        let opponent = fighter(Side::Enemy, CharacterType::Warrior, gap);
        let Some(index) = caster.skill_index(id) else {
            panic!("{} has no skill {}", class, id);
        };
        activate(&caster, &opponent, index, 1000.0)
    }

    #[test]
    fn test_activation_stamps_cooldown_even_on_miss() {
        let outcome = cast(CharacterType::Mage, 1, 9.0);
        assert!(!outcome.connected);
        assert_eq!(outcome.attacker.skills[0].last_used, Some(1000.0));
        assert_eq!(outcome.attacker.last_attack_time, Some(1000.0));
        assert_eq!(outcome.attacker.state, CharacterState::Attacking);
        assert_eq!(outcome.defender.health, 100.0);
    }

    #[test]
    fn test_fireball_ignores_defense() {
        let caster = fighter(Side::Player, CharacterType::Mage, 0.0);
        let mut opponent = fighter(Side::Enemy, CharacterType::Warrior, 5.0);
        opponent.is_defending = true;
        let outcome = activate(&caster, &opponent, 0, 0.0);
        assert!(outcome.connected);
        assert_eq!(outcome.defender.health, 80.0);
        assert!(outcome
            .deferred
            .contains(&Deferred::on_target(300.0, DeferredEffect::ClearFlash)));
    }

    #[test]
    fn test_dash_strike_reaches_one_unit_further() {
        let outcome = cast(CharacterType::Warrior, 1, 3.9);
        assert!(outcome.connected);
        assert_eq!(outcome.defender.health, 85.0);
        assert_relative_eq!(outcome.attacker.velocity.x, 15.0);
    }

    #[test]
    fn test_upper_slash_launches_and_stuns() {
        let outcome = cast(CharacterType::Warrior, 2, 1.5);
        assert_eq!(outcome.defender.state, CharacterState::Stunned);
        // 20 damage is not above 20% of 100, so the skill stun stands
        assert_relative_eq!(outcome.defender.stun_timer, 800.0);
        assert_relative_eq!(outcome.defender.velocity.y, 10.0);
    }

    #[test]
    fn test_counter_stance_guards_and_punishes() {
        let outcome = cast(CharacterType::Warrior, 4, 1.0);
        assert_eq!(outcome.attacker.state, CharacterState::Defending);
        assert!(outcome.attacker.is_defending);
        assert!(outcome.attacker.invulnerable);
        assert!(outcome.connected);
        // 37.5 damage, a heavy hit
        assert_relative_eq!(outcome.defender.health, 62.5);
        assert!(outcome.deferred.contains(&Deferred::on_actor(
            1200.0,
            DeferredEffect::EndDefenseWindow
        )));
    }

    #[test]
    fn test_counter_stance_without_target_only_guards() {
        let outcome = cast(CharacterType::Warrior, 4, 3.0);
        assert!(!outcome.connected);
        assert_eq!(outcome.attacker.state, CharacterState::Defending);
    }

    #[test]
    fn test_blade_storm_hits_behind() {
        let outcome = cast(CharacterType::Warrior, 5, -3.0);
        assert!(outcome.connected);
        assert_eq!(outcome.defender.health, 60.0);
        assert_eq!(outcome.defender.state, CharacterState::Stunned);
        assert_relative_eq!(outcome.defender.velocity.y, 7.0);
    }

    #[test]
    fn test_teleport_moves_without_damage() {
        let outcome = cast(CharacterType::Mage, 3, 1.0);
        assert!(!outcome.connected);
        assert_relative_eq!(outcome.attacker.position.x, 7.0);
        assert!(outcome.attacker.invulnerable);
        assert_eq!(outcome.attacker.state, CharacterState::Idle);
        assert_eq!(
            outcome.deferred,
            vec![Deferred::on_actor(200.0, DeferredEffect::ClearInvulnerable)]
        );
    }

    #[test]
    fn test_shadow_leap_lifts() {
        let outcome = cast(CharacterType::Rogue, 3, 1.0);
        assert_relative_eq!(outcome.attacker.velocity.y, 5.0);
        assert_relative_eq!(outcome.attacker.position.x, 5.0);
        assert_eq!(outcome.deferred[0].delay_ms, 400.0);
    }

    #[test]
    fn test_assassinate_scales_with_missing_health() {
        let caster = fighter(Side::Player, CharacterType::Rogue, 0.0);
        let mut opponent = fighter(Side::Enemy, CharacterType::Warrior, 1.0);
        opponent.health = 50.0;
        let outcome = activate(&caster, &opponent, 4, 0.0);
        // 45 * 1.5 = 67.5 > 50
        assert_eq!(outcome.defender.health, 0.0);
        assert_eq!(outcome.defender.state, CharacterState::Fallen);
    }

    #[test]
    fn test_divine_shield() {
        let outcome = cast(CharacterType::Paladin, 3, 5.0);
        assert_eq!(outcome.attacker.shield, 80.0);
        assert_eq!(outcome.attacker.shield_duration, 6000.0);
        assert!(outcome.attacker.is_flashing);
        assert_eq!(outcome.attacker.state, CharacterState::Idle);
        assert!(outcome
            .deferred
            .contains(&Deferred::on_actor(6000.0, DeferredEffect::ExpireShield)));
    }

    #[test]
    fn test_healing_light_clamps_to_max() {
        let mut caster = fighter(Side::Player, CharacterType::Paladin, 0.0);
        caster.health = 110.0;
        let opponent = fighter(Side::Enemy, CharacterType::Warrior, 1.0);
        let outcome = activate(&caster, &opponent, 3, 0.0);
        assert_eq!(outcome.attacker.health, 120.0);
        assert_eq!(outcome.defender, opponent);
        assert_eq!(outcome.deferred[0].recipient, Recipient::Actor);
        assert_eq!(outcome.deferred[0].delay_ms, 500.0);
    }

    #[test]
    fn test_invulnerable_opponent_is_not_struck() {
        let caster = fighter(Side::Player, CharacterType::Warrior, 0.0);
        let mut opponent = fighter(Side::Enemy, CharacterType::Warrior, 1.0);
        opponent.invulnerable = true;
        let outcome = activate(&caster, &opponent, 1, 0.0);
        assert!(!outcome.connected);
        assert_eq!(outcome.defender, opponent);
    }

    #[test]
    fn test_generic_strike_effects() {
        let caster = fighter(Side::Player, CharacterType::Warrior, 0.0);
        let opponent = fighter(Side::Enemy, CharacterType::Warrior, 1.0);
        let mut skill = caster.skills[0];
        skill.id = 9;
        skill.damage = 10.0;
        skill.range = 2.0;
        skill.kind = SkillKind::Melee;

        skill.effect = Some(SkillEffect::Bleed);
        let ctx = SkillContext { caster: &caster, opponent: &opponent, skill, now: 0.0 };
        let handler = handler_for(CharacterType::Warrior, &skill);
        assert_eq!(handler(&ctx).strike.map(|s| s.damage), Some(12.0));

        skill.effect = Some(SkillEffect::Knockback);
        let ctx = SkillContext { skill, ..ctx };
        let launch = generic_strike(&ctx).strike.map(|s| s.launch);
        assert_eq!(launch.and_then(|l| l.horizontal), Some(15.0));
        assert_eq!(launch.and_then(|l| l.vertical), Some(5.0));

        skill.effect = Some(SkillEffect::Stun);
        let ctx = SkillContext { skill, ..ctx };
        assert_eq!(generic_strike(&ctx).strike.and_then(|s| s.stun_ms), Some(1500.0));
    }

    #[test]
    fn test_generic_handler_routes_heal_and_defense() {
        let caster = fighter(Side::Player, CharacterType::Warrior, 0.0);
        let opponent = fighter(Side::Enemy, CharacterType::Warrior, 1.0);
        let mut skill = caster.skills[3];
        skill.id = 7;
        let ctx = SkillContext { caster: &caster, opponent: &opponent, skill, now: 0.0 };
        assert_eq!(generic_handler(&skill)(&ctx).posture, SkillPosture::Defending);

        skill.kind = SkillKind::Magic;
        skill.effect = Some(SkillEffect::Heal);
        let ctx = SkillContext { skill, ..ctx };
        assert_eq!(generic_handler(&skill)(&ctx).posture, SkillPosture::Unchanged);
    }

    #[test]
    fn test_facing_matters_for_directional_skills() {
        let mut caster = fighter(Side::Player, CharacterType::Mage, 0.0);
        caster.direction = Facing::Left;
        let opponent = fighter(Side::Enemy, CharacterType::Warrior, 2.0);
        let outcome = activate(&caster, &opponent, 1, 0.0);
        assert!(!outcome.connected);
    }
}
