// Per-frame physics and state update for the two fighters.
//
// Each character is advanced against a snapshot of its opponent taken before
// the frame, so the order in which the two sides are updated never matters.
// Timer states short-circuit the frame: a stunned, knocked down or recovering
// character only counts its timer down.

use glam::Vec3;

use crate::core::math::count_down;
use crate::engine::physics::{
    bodies_touching, resolve_platforms, separated_x, KinematicBody, Platform,
};
use crate::game::characters::{Character, CharacterState, CollisionData};
use crate::game::combat::hit::HIT_FLASH_MS;
use crate::game::config::ArenaConfig;
use crate::game::scheduler::{Deferred, DeferredEffect};

/// Attack state lasts this long after the last swing
pub const ATTACK_WINDOW_MS: f32 = 400.0;
/// Lockout after the stamina bar empties while guarding
pub const STAMINA_LOCKOUT_SECS: f32 = 2.0;
/// Stamina restored when the lockout ends
pub const STAMINA_RECOVERY_FRACTION: f32 = 0.3;
/// Length of the getting-up phase after a knockdown
pub const RECOVERY_MS: f32 = 800.0;

/// Fighters closer than this fraction of a body width are pushed apart
pub const CONTACT_WIDTH_FRACTION: f32 = 0.9;
/// Sustained contact that triggers a clinch break
pub const CLINCH_BREAK_MS: f32 = 1500.0;
const CLINCH_DAMAGE_FRACTION: f32 = 0.05;
const CLINCH_MIN_DAMAGE: f32 = 5.0;
const CLINCH_SPEED: f32 = 15.0;
const CLINCH_LIFT: f32 = 7.0;

const RING_OUT_DAMAGE_FRACTION: f32 = 0.15;
const RING_OUT_STUN_MS: f32 = 600.0;

const ATTACK_DRAG: f32 = 0.3;
const INCAPACITATED_DRAG: f32 = 0.95;
const DEFAULT_DRAG: f32 = 0.85;

/// Everything a frame needs besides the two characters
#[derive(Debug, Clone, Copy)]
pub struct TickContext<'a> {
    /// Frame time in seconds
    pub dt: f32,
    /// Simulation time in milliseconds, already advanced by `dt`
    pub now_ms: f32,
    pub platforms: &'a [Platform],
    pub config: &'a ArenaConfig,
}

impl TickContext<'_> {
    fn dt_ms(&self) -> f32 {
        self.dt * 1000.0
    }
}

/// One character after a frame
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterTick {
    pub character: Character,
    /// Effects the frame wants scheduled for this character
    pub deferred: Vec<Deferred>,
}

impl CharacterTick {
    fn settled(character: Character) -> Self {
        Self {
            character: character.with_resources_clamped(),
            deferred: Vec::new(),
        }
    }
}

/// Both characters after a frame
#[derive(Debug, Clone, PartialEq)]
pub struct PairTick {
    pub player: CharacterTick,
    pub enemy: CharacterTick,
    /// A sustained clinch was broken this frame
    pub clinch_break: bool,
}

/// Count the divine shield down, dropping the pool when time is up
fn tick_shield(character: &mut Character, dt_ms: f32) {
    if character.shield > 0.0 && character.shield_duration > 0.0 {
        character.shield_duration = count_down(character.shield_duration, dt_ms);
        if character.shield_duration <= 0.0 {
            character.shield = 0.0;
        }
    }
}

/// Outcome of the stamina bookkeeping
enum Stamina {
    /// Guarding emptied the bar; the frame ends here
    Depleted(Character),
    Updated(Character),
}

fn tick_stamina(character: &Character, dt: f32) -> Stamina {
    let mut next = character.clone();

    if character.state == CharacterState::Defending {
        next.stamina = count_down(character.stamina, character.stamina_defense_drain * dt);
        if next.stamina <= 0.0 && !character.is_stamina_depleted {
            next.stamina = 0.0;
            next.is_defending = false;
            next.is_stamina_depleted = true;
            next.stamina_recovery_timer = STAMINA_LOCKOUT_SECS;
            next.state = CharacterState::Idle;
            return Stamina::Depleted(next);
        }
    } else if !character.is_stamina_depleted {
        next.stamina = (character.stamina + character.stamina_recharge_rate * dt)
            .min(character.max_stamina);
    } else {
        next.stamina_recovery_timer = count_down(character.stamina_recovery_timer, dt);
        if next.stamina_recovery_timer <= 0.0 {
            next.is_stamina_depleted = false;
            next.stamina = character.max_stamina * STAMINA_RECOVERY_FRACTION;
        }
    }

    Stamina::Updated(next)
}

/// Count a timer state down; `None` when the character is not in one
fn tick_timer_state(character: &Character, dt_ms: f32) -> Option<Character> {
    let running_timer = character.stun_timer > 0.0;
    let mut next = character.clone();
    let remaining = character.stun_timer - dt_ms;

    match character.state {
        CharacterState::Stunned if running_timer => {
            if remaining <= 0.0 {
                next.stun_timer = 0.0;
                next.state = CharacterState::Idle;
            } else {
                next.stun_timer = remaining;
            }
        }
        CharacterState::Fallen if running_timer => {
            if remaining <= 0.0 {
                next.stun_timer = RECOVERY_MS;
                next.state = CharacterState::Recovering;
                next.invulnerable = true;
            } else {
                next.stun_timer = remaining;
            }
        }
        CharacterState::Recovering if running_timer => {
            if remaining <= 0.0 {
                next.stun_timer = 0.0;
                next.state = CharacterState::Idle;
                next.invulnerable = false;
            } else {
                next.stun_timer = remaining;
            }
        }
        _ => return None,
    }
    Some(next)
}

/// Horizontal velocity for this frame's movement state
fn steer(body: KinematicBody, character: &Character, run_speed: f32) -> KinematicBody {
    match character.state {
        CharacterState::Running => {
            body.with_horizontal_speed(character.direction.sign() * run_speed)
        }
        CharacterState::Attacking => body.with_horizontal_drag(ATTACK_DRAG),
        state if state.is_incapacitated() => body.with_horizontal_drag(INCAPACITATED_DRAG),
        _ => body.with_horizontal_drag(DEFAULT_DRAG),
    }
}

/// Track contact with the opponent and keep the two bodies apart
fn push_apart(
    character: &Character,
    body: KinematicBody,
    opponent: &Character,
    ctx: &TickContext,
) -> (KinematicBody, CollisionData) {
    let size = ctx.config.body;
    let mut body = body;
    let mut tracking = character.collision;

    let both_grounded = character.velocity.y <= 0.0 && opponent.velocity.y <= 0.0;
    let touching = bodies_touching(body.position, opponent.position, size, CONTACT_WIDTH_FRACTION);

    if touching && both_grounded {
        if tracking.is_colliding {
            tracking.collision_duration = ctx.now_ms - tracking.collision_start_time;
        } else {
            tracking.is_colliding = true;
            tracking.collision_start_time = ctx.now_ms;
            tracking.collision_duration = 0.0;
        }
        tracking.last_collision_time = ctx.now_ms;

        body.position.x = separated_x(
            body.position.x,
            opponent.position.x,
            size.width * CONTACT_WIDTH_FRACTION,
        );
        body.velocity.x *= 0.5;
    } else if tracking.is_colliding {
        tracking.is_colliding = false;
        tracking.collision_duration = 0.0;
    }

    (body, tracking)
}

/// Advance one character by a frame.
///
/// `opponent` is the other fighter as it was before this frame.
pub fn update_character(
    character: &Character,
    opponent: &Character,
    ctx: &TickContext,
) -> CharacterTick {
    let mut current = character.clone();
    tick_shield(&mut current, ctx.dt_ms());

    let knocked_down = matches!(
        current.state,
        CharacterState::Fallen | CharacterState::Recovering
    );
    // Stamina stays frozen while knocked down
    if !knocked_down {
        current = match tick_stamina(&current, ctx.dt) {
            Stamina::Depleted(next) => return CharacterTick::settled(next),
            Stamina::Updated(next) => next,
        };
    }

    if let Some(next) = tick_timer_state(&current, ctx.dt_ms()) {
        return CharacterTick::settled(next);
    }

    if current.state == CharacterState::Attacking {
        let expired = current
            .since_last_attack(ctx.now_ms)
            .map_or(true, |elapsed| elapsed > ATTACK_WINDOW_MS);
        if expired {
            current.state = CharacterState::Idle;
            return CharacterTick::settled(current);
        }
    }

    let config = ctx.config;
    let body = KinematicBody::new(current.position, current.velocity)
        .with_gravity(config.gravity, ctx.dt);
    let body = steer(body, &current, config.run_speed).integrated(ctx.dt);

    let (body, collision) = push_apart(&current, body, opponent, ctx);
    current.collision = collision;

    let contact = resolve_platforms(
        character.position,
        body,
        ctx.platforms,
        config.platform,
        config.body,
    );
    if contact.landed && current.state == CharacterState::Jumping {
        current.state = CharacterState::Idle;
    }

    let body = contact.body.clamped_to_arena(config.arena_half_width);
    current.position = body.position;
    current.velocity = body.velocity;

    let mut deferred = Vec::new();
    if current.position.y < config.fall_limit {
        let respawn = KinematicBody::respawned_at(config.respawn_point);
        current.position = respawn.position;
        current.velocity = respawn.velocity;
        current.health = (current.health
            - (current.max_health * RING_OUT_DAMAGE_FRACTION).round())
        .max(0.0);
        current.state = CharacterState::Stunned;
        current.stun_timer = RING_OUT_STUN_MS;
        current.is_defending = false;
        current.is_flashing = true;
        deferred.push(Deferred::on_actor(HIT_FLASH_MS, DeferredEffect::ClearFlash));
    }

    CharacterTick {
        character: current.with_resources_clamped(),
        deferred,
    }
}

/// Damage dealt to a fighter by a clinch break
pub fn clinch_damage(character: &Character) -> f32 {
    (character.max_health * CLINCH_DAMAGE_FRACTION)
        .floor()
        .max(CLINCH_MIN_DAMAGE)
}

/// Throw two fighters that stayed in contact too long away from each other
pub fn clinch_break(player: &Character, enemy: &Character, now_ms: f32) -> (Character, Character) {
    let player_away = if player.position.x < enemy.position.x {
        -1.0
    } else {
        1.0
    };

    let thrown = |character: &Character, away: f32| {
        let mut next = character.clone();
        next.health = (character.health - clinch_damage(character)).max(0.0);
        next.velocity = Vec3::new(away * CLINCH_SPEED, CLINCH_LIFT, 0.0);
        next.is_flashing = true;
        next.collision = CollisionData {
            last_collision_time: now_ms,
            ..CollisionData::default()
        };
        next
    };

    (thrown(player, player_away), thrown(enemy, -player_away))
}

/// Advance both fighters by a frame and break a sustained clinch
pub fn step_pair(player: &Character, enemy: &Character, ctx: &TickContext) -> PairTick {
    let mut player_tick = update_character(player, enemy, ctx);
    let mut enemy_tick = update_character(enemy, player, ctx);

    let clinched = player_tick.character.collision.collision_duration >= CLINCH_BREAK_MS
        || enemy_tick.character.collision.collision_duration >= CLINCH_BREAK_MS;

    if clinched {
        let (p, e) = clinch_break(&player_tick.character, &enemy_tick.character, ctx.now_ms);
        player_tick.character = p;
        enemy_tick.character = e;
        let flash = Deferred::on_actor(HIT_FLASH_MS, DeferredEffect::ClearFlash);
        player_tick.deferred.push(flash);
        enemy_tick.deferred.push(flash);
    }

    PairTick {
        player: player_tick,
        enemy: enemy_tick,
        clinch_break: clinched,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::characters::{CharacterType, Facing, Side};
    use crate::game::config::default_platforms;
    use approx::assert_relative_eq;

    const DT: f32 = 0.016;

    fn fighter(side: Side, x: f32) -> Character {
        Character::from_class(side, CharacterType::Warrior.class(), Vec3::new(x, 0.75, 0.0), 1)
    }

    fn far_opponent() -> Character {
        fighter(Side::Enemy, 8.0)
    }

    fn tick(character: &Character, dt: f32, now_ms: f32) -> CharacterTick {
        let platforms = default_platforms();
        let ctx = TickContext {
            dt,
            now_ms,
            platforms: &platforms,
            config: &ArenaConfig::DEFAULT,
        };
        update_character(character, &far_opponent(), &ctx)
    }

    #[test]
    fn test_landing_snaps_to_surface() {
        let mut c = fighter(Side::Player, 0.0);
        c.position.y = 0.76;
        c.velocity.y = -2.0;
        c.state = CharacterState::Jumping;

        let next = tick(&c, DT, 16.0).character;
        assert_relative_eq!(next.position.y, 0.75);
        assert_eq!(next.velocity.y, 0.0);
        assert_eq!(next.state, CharacterState::Idle);
    }

    #[test]
    fn test_standing_stays_grounded() {
        let c = fighter(Side::Player, 0.0);
        let next = tick(&c, DT, 16.0).character;
        assert_relative_eq!(next.position.y, 0.75);
        assert!(next.is_grounded());
    }

    #[test]
    fn test_spawn_height_falls_onto_platform() {
        let mut c = fighter(Side::Player, -3.0);
        c.position.y = 1.0;
        let mut now = 0.0;
        for _ in 0..60 {
            now += DT * 1000.0;
            c = tick(&c, DT, now).character;
        }
        assert_relative_eq!(c.position.y, 0.75);
        assert!(c.is_grounded());
    }

    #[test]
    fn test_running_sets_speed() {
        let mut c = fighter(Side::Player, 0.0);
        c.state = CharacterState::Running;
        c.direction = Facing::Left;
        let next = tick(&c, DT, 16.0).character;
        assert_relative_eq!(next.velocity.x, -8.0);
        assert!(next.position.x < 0.0);
    }

    #[test]
    fn test_idle_drag() {
        let mut c = fighter(Side::Player, 0.0);
        c.velocity.x = 10.0;
        let next = tick(&c, DT, 16.0).character;
        assert_relative_eq!(next.velocity.x, 8.5);
    }

    #[test]
    fn test_arena_walls() {
        let mut c = fighter(Side::Player, 9.95);
        c.velocity.x = 20.0;
        let next = tick(&c, 0.1, 100.0).character;
        assert_eq!(next.position.x, 10.0);
        assert_eq!(next.velocity.x, 0.0);
    }

    #[test]
    fn test_ring_out_respawns_with_damage() {
        let mut c = fighter(Side::Player, 0.0);
        c.position.y = -3.9;
        c.velocity.y = -5.0;
        c.is_defending = true;

        let result = tick(&c, 0.1, 100.0);
        let next = result.character;
        assert_eq!(next.position, Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(next.velocity, Vec3::ZERO);
        assert_eq!(next.health, 85.0);
        assert_eq!(next.state, CharacterState::Stunned);
        assert_eq!(next.stun_timer, 600.0);
        assert!(!next.is_defending);
        assert!(next.is_flashing);
        assert_eq!(
            result.deferred,
            vec![Deferred::on_actor(300.0, DeferredEffect::ClearFlash)]
        );
    }

    #[test]
    fn test_stun_counts_down_then_idles() {
        let mut c = fighter(Side::Player, 0.0);
        c.state = CharacterState::Stunned;
        c.stun_timer = 100.0;
        c.position.y = 3.0;

        let next = tick(&c, 0.05, 50.0).character;
        assert_relative_eq!(next.stun_timer, 50.0);
        // Timer states skip integration entirely
        assert_eq!(next.position.y, 3.0);

        let next = tick(&next, 0.05, 100.0).character;
        assert_eq!(next.state, CharacterState::Idle);
        assert_eq!(next.stun_timer, 0.0);
    }

    #[test]
    fn test_knockdown_then_recovery() {
        let mut c = fighter(Side::Player, 0.0);
        c.state = CharacterState::Fallen;
        c.stun_timer = 10.0;
        c.invulnerable = true;

        let next = tick(&c, DT, 16.0).character;
        assert_eq!(next.state, CharacterState::Recovering);
        assert_eq!(next.stun_timer, 800.0);
        assert!(next.invulnerable);

        let next = tick(&next, 0.8, 816.0).character;
        assert_eq!(next.state, CharacterState::Idle);
        assert!(!next.invulnerable);
    }

    #[test]
    fn test_attack_window_expires() {
        let mut c = fighter(Side::Player, 0.0);
        c.state = CharacterState::Attacking;
        c.last_attack_time = Some(0.0);

        assert_eq!(tick(&c, DT, 400.0).character.state, CharacterState::Attacking);
        assert_eq!(tick(&c, DT, 401.0).character.state, CharacterState::Idle);
    }

    #[test]
    fn test_guarding_until_stamina_runs_out() {
        let mut c = fighter(Side::Player, 0.0);
        c.state = CharacterState::Defending;
        c.is_defending = true;
        c.stamina = 1.0;

        let next = tick(&c, 0.1, 100.0).character;
        assert_eq!(next.stamina, 0.0);
        assert!(next.is_stamina_depleted);
        assert!(!next.is_defending);
        assert_eq!(next.state, CharacterState::Idle);
        assert_eq!(next.stamina_recovery_timer, 2.0);
    }

    #[test]
    fn test_lockout_restores_thirty_percent() {
        let mut c = fighter(Side::Player, 0.0);
        c.stamina = 0.0;
        c.is_stamina_depleted = true;
        c.stamina_recovery_timer = 0.05;

        let next = tick(&c, 0.1, 100.0).character;
        assert!(!next.is_stamina_depleted);
        assert_relative_eq!(next.stamina, 30.0);
    }

    #[test]
    fn test_stamina_regenerates_to_max() {
        let mut c = fighter(Side::Player, 0.0);
        c.stamina = 95.0;
        let next = tick(&c, 0.1, 100.0).character;
        assert_relative_eq!(next.stamina, 96.5);
        let next = tick(&next, 1.0, 1100.0).character;
        assert_eq!(next.stamina, 100.0);
    }

    #[test]
    fn test_shield_expires_with_its_duration() {
        let mut c = fighter(Side::Player, 0.0);
        c.shield = 80.0;
        c.shield_duration = 100.0;

        let next = tick(&c, 0.05, 50.0).character;
        assert_eq!(next.shield, 80.0);
        assert_relative_eq!(next.shield_duration, 50.0);

        let next = tick(&next, 0.05, 100.0).character;
        assert_eq!(next.shield, 0.0);
    }

    #[test]
    fn test_contact_pushes_apart() {
        let platforms = default_platforms();
        let ctx = TickContext {
            dt: DT,
            now_ms: 16.0,
            platforms: &platforms,
            config: &ArenaConfig::DEFAULT,
        };
        let mut player = fighter(Side::Player, -0.3);
        player.velocity.x = 2.0;
        let enemy = fighter(Side::Enemy, 0.2);

        let next = update_character(&player, &enemy, &ctx).character;
        assert_relative_eq!(next.position.x, -0.7);
        assert!(next.collision.is_colliding);
        assert_relative_eq!(next.velocity.x, 0.85);
    }

    #[test]
    fn test_sustained_contact_breaks_exactly_once() {
        let platforms = default_platforms();
        let mut player = fighter(Side::Player, -0.9);
        player.state = CharacterState::Running;
        let mut enemy = fighter(Side::Enemy, 0.0);

        let mut now = 0.0;
        let mut breaks = Vec::new();
        for _ in 0..120 {
            now += DT * 1000.0;
            let ctx = TickContext {
                dt: DT,
                now_ms: now,
                platforms: &platforms,
                config: &ArenaConfig::DEFAULT,
            };
            let result = step_pair(&player, &enemy, &ctx);
            player = result.player.character;
            enemy = result.enemy.character;
            if result.clinch_break {
                breaks.push((player.clone(), enemy.clone()));
                assert_eq!(result.player.deferred.len(), 1);
                assert_eq!(result.enemy.deferred.len(), 1);
            }
        }

        assert_eq!(breaks.len(), 1);
        let (p, e) = &breaks[0];
        assert_relative_eq!(p.velocity.x, -15.0);
        assert_relative_eq!(e.velocity.x, 15.0);
        assert_relative_eq!(p.velocity.y, 7.0);
        assert_eq!(p.health, 95.0);
        assert_eq!(e.health, 95.0);
        assert!(!p.collision.is_colliding);
        assert_eq!(p.collision.collision_duration, 0.0);
    }

    #[test]
    fn test_clinch_damage_floor() {
        let paladin = Character::from_class(
            Side::Player,
            CharacterType::Paladin.class(),
            Vec3::ZERO,
            1,
        );
        assert_eq!(clinch_damage(&paladin), 6.0);
        assert_eq!(clinch_damage(&fighter(Side::Player, 0.0)), 5.0);
    }

    #[test]
    fn test_resources_stay_in_bounds() {
        let mut c = fighter(Side::Player, 0.0);
        c.health = 100.0;
        c.stamina = 99.9;
        let mut now = 0.0;
        for step in 0..200 {
            now += DT * 1000.0;
            c.state = if step % 3 == 0 {
                CharacterState::Defending
            } else {
                CharacterState::Running
            };
            c = tick(&c, DT, now).character;
            assert!(c.health >= 0.0 && c.health <= c.max_health);
            assert!(c.stamina >= 0.0 && c.stamina <= c.max_stamina);
            assert!(c.shield >= 0.0);
        }
    }
}
