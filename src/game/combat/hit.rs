// Hit resolution: mitigation, shield absorption, knockback, stun and knockdown

use glam::Vec3;

use crate::core::math::clamp;
use crate::game::characters::{Character, CharacterState};

/// Hits above this fraction of max health stun the target
pub const HEAVY_HIT_FRACTION: f32 = 0.2;
/// Base stun of a heavy hit, plus `STUN_PER_DAMAGE` per point
pub const HEAVY_HIT_STUN_MS: f32 = 300.0;
pub const STUN_PER_DAMAGE: f32 = 5.0;

/// Horizontal knockback per point of damage
pub const KNOCKBACK_PER_DAMAGE: f32 = 0.5;
/// Upward impulse of any hit
pub const HIT_LIFT: f32 = 2.0;

/// Knockdown length at full stamina and at empty stamina
pub const KNOCKDOWN_MIN_MS: f32 = 1500.0;
pub const KNOCKDOWN_MAX_MS: f32 = 3000.0;
/// Velocity of a knocked down character
pub const KNOCKDOWN_SPEED: f32 = 15.0;
pub const KNOCKDOWN_LIFT: f32 = 8.0;

/// How long hit feedback flashes before the deferred clear
pub const HIT_FLASH_MS: f32 = 300.0;

/// Knockdown duration: the emptier the stamina, the longer the target stays down
pub fn knockdown_duration(stamina_fraction: f32) -> f32 {
    let raw = KNOCKDOWN_MIN_MS + (1.0 - stamina_fraction) * (KNOCKDOWN_MAX_MS - KNOCKDOWN_MIN_MS);
    clamp(raw.round(), KNOCKDOWN_MIN_MS, KNOCKDOWN_MAX_MS)
}

/// Apply `raw_damage` to `target` and return the result.
///
/// The caller schedules the flash clear.
pub fn process_hit(target: &Character, raw_damage: f32, ignores_defense: bool) -> Character {
    if target.invulnerable {
        return target.clone();
    }

    let damage = if target.is_defending && !ignores_defense {
        (raw_damage / 2.0).floor()
    } else {
        raw_damage
    };

    // Shield soaks first
    let absorbed = damage.min(target.shield.max(0.0));
    let carried = damage - absorbed;

    let mut hit = target.clone();
    hit.shield = target.shield - absorbed;
    hit.health = (target.health - carried).max(0.0);

    let away = -target.direction.sign();
    hit.velocity.x += away * KNOCKBACK_PER_DAMAGE * damage;
    hit.velocity.y += HIT_LIFT;

    if damage > target.max_health * HEAVY_HIT_FRACTION {
        hit.state = CharacterState::Stunned;
        hit.stun_timer = HEAVY_HIT_STUN_MS + damage * STUN_PER_DAMAGE;
        hit.is_defending = false;
    }

    if hit.health <= 0.0 {
        hit.health = 0.0;
        hit.state = CharacterState::Fallen;
        hit.stun_timer = knockdown_duration(target.stamina_fraction());
        hit.invulnerable = true;
        hit.is_defending = false;
        hit.velocity = Vec3::new(away * KNOCKDOWN_SPEED, KNOCKDOWN_LIFT, 0.0);
    }

    hit.is_flashing = true;
    hit
}

/// Velocity overrides a strike applies before the damage lands
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Launch {
    pub horizontal: Option<f32>,
    pub vertical: Option<f32>,
}

/// Everything a connecting attack or skill does to its target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Strike {
    pub damage: f32,
    pub ignores_defense: bool,
    /// Forced stun applied before the damage
    pub stun_ms: Option<f32>,
    pub launch: Launch,
    /// Flash the target even when no damage is dealt
    pub flash: bool,
}

impl Strike {
    pub fn new(damage: f32) -> Self {
        Self {
            damage,
            ignores_defense: false,
            stun_ms: None,
            launch: Launch::default(),
            flash: false,
        }
    }

    pub fn ignoring_defense(mut self) -> Self {
        self.ignores_defense = true;
        self
    }

    pub fn with_stun(mut self, stun_ms: f32) -> Self {
        self.stun_ms = Some(stun_ms);
        self
    }

    pub fn with_launch(mut self, horizontal: f32, vertical: f32) -> Self {
        self.launch = Launch {
            horizontal: Some(horizontal),
            vertical: Some(vertical),
        };
        self
    }

    pub fn with_horizontal_launch(mut self, horizontal: f32) -> Self {
        self.launch.horizontal = Some(horizontal);
        self
    }

    pub fn with_vertical_launch(mut self, vertical: f32) -> Self {
        self.launch.vertical = Some(vertical);
        self
    }

    pub fn flashing(mut self) -> Self {
        self.flash = true;
        self
    }
}

/// Land a strike on `target`: pre-hit effects first, then [`process_hit`].
///
/// An invulnerable target is returned untouched.
pub fn resolve_strike(target: &Character, strike: &Strike) -> Character {
    if target.invulnerable {
        return target.clone();
    }

    let mut primed = target.clone();
    if let Some(vx) = strike.launch.horizontal {
        primed.velocity.x = vx;
    }
    if let Some(vy) = strike.launch.vertical {
        primed.velocity.y = vy;
    }
    if let Some(stun) = strike.stun_ms {
        primed.state = CharacterState::Stunned;
        primed.stun_timer = stun;
    }
    if strike.flash {
        primed.is_flashing = true;
    }

    let mut hit = if strike.damage > 0.0 {
        process_hit(&primed, strike.damage, strike.ignores_defense)
    } else {
        primed
    };
    // The guard still halves this strike but does not survive the stun
    if strike.stun_ms.is_some() {
        hit.is_defending = false;
    }
    hit
}
