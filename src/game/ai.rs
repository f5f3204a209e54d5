// Enemy AI: a reactive policy re-evaluated on a fixed decision interval.
//
// The brain only picks what to do; the session carries the plan out through
// the same commands the player uses, so every precondition still applies.

use log::debug;
use rand::Rng;

use super::characters::{Character, CharacterState, CharacterType, Facing};

/// Time between two decisions
pub const DECISION_INTERVAL_MS: f32 = 500.0;
/// Melee band around the enemy
pub const MELEE_REACH_X: f32 = 2.5;
pub const MELEE_REACH_Y: f32 = 1.5;
/// Time since the last attack before another melee swing
pub const MELEE_COOLDOWN_MS: f32 = 500.0;
/// Chance to use the best ready skill when one reaches the player
pub const SKILL_CHANCE: f64 = 0.7;
/// Chance to hop while standing in melee range
pub const JUMP_CHANCE: f64 = 0.1;

/// Probability of a basic attack (over a special) for each class
pub fn basic_attack_odds(class: CharacterType) -> f64 {
    match class {
        CharacterType::Warrior => 0.6,
        CharacterType::Mage => 0.3,
        CharacterType::Rogue => 0.7,
        CharacterType::Paladin => 0.5,
    }
}

/// What the enemy decided to do this round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    BasicAttack,
    SpecialAttack,
    UseSkill(u8),
    /// Close the distance
    Run,
    Jump,
    Idle,
}

/// A decision together with the facing it is made in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiPlan {
    pub facing: Facing,
    pub decision: Decision,
}

/// Highest-damage skill that is ready and reaches the player
fn best_ready_skill(enemy: &Character, distance: f32, now: f32) -> Option<u8> {
    enemy
        .skills
        .iter()
        .filter(|skill| skill.is_ready(now) && skill.offensive_damage() > 0.0)
        .filter(|skill| distance <= skill.range)
        .max_by(|a, b| a.offensive_damage().total_cmp(&b.offensive_damage()))
        .map(|skill| skill.id)
}

/// Pick the enemy's next action
pub fn decide<R: Rng + ?Sized>(
    enemy: &Character,
    player: &Character,
    now: f32,
    rng: &mut R,
) -> AiPlan {
    let facing = Facing::toward(enemy.position.x, player.position.x);
    let distance_x = enemy.horizontal_distance(player);
    let in_melee = distance_x < MELEE_REACH_X && enemy.vertical_distance(player) < MELEE_REACH_Y;

    let melee_ready = enemy
        .since_last_attack(now)
        .map_or(true, |elapsed| elapsed > MELEE_COOLDOWN_MS);

    let decision = if in_melee && melee_ready {
        if rng.gen_bool(basic_attack_odds(enemy.class)) {
            Decision::BasicAttack
        } else {
            Decision::SpecialAttack
        }
    } else if let Some(id) = best_ready_skill(enemy, distance_x, now)
        .filter(|_| rng.gen_bool(SKILL_CHANCE))
    {
        Decision::UseSkill(id)
    } else if !in_melee {
        Decision::Run
    } else if enemy.is_grounded() && rng.gen_bool(JUMP_CHANCE) {
        Decision::Jump
    } else {
        Decision::Idle
    };

    AiPlan { facing, decision }
}

/// Decision timer of the enemy
#[derive(Debug, Default)]
pub struct EnemyBrain {
    since_decision_ms: f32,
}

impl EnemyBrain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.since_decision_ms = 0.0;
    }

    /// Let `dt_ms` pass and decide when the interval is up.
    ///
    /// A busy enemy (stunned, down or mid-attack) keeps the timer running but
    /// does not decide.
    pub fn think<R: Rng + ?Sized>(
        &mut self,
        dt_ms: f32,
        enemy: &Character,
        player: &Character,
        now: f32,
        rng: &mut R,
    ) -> Option<AiPlan> {
        self.since_decision_ms += dt_ms;

        if enemy.state.is_incapacitated() || enemy.state == CharacterState::Attacking {
            return None;
        }
        if self.since_decision_ms < DECISION_INTERVAL_MS {
            return None;
        }

        self.since_decision_ms = 0.0;
        let plan = decide(enemy, player, now, rng);
        debug!("{} enemy decided {:?} facing {:?}", enemy.class, plan.decision, plan.facing);
        Some(plan)
    }
}
