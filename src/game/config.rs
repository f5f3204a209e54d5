// Arena and movement tuning.
//
// All fighters share the same arena rules; class differences come from the
// catalogue multipliers and skills, not from these values.

use glam::Vec3;

use crate::engine::physics::{BodySize, Platform, PlatformShape};

/// Tunables for the arena, bodies and movement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArenaConfig {
    /// Downward acceleration (units/s²)
    pub gravity: f32,
    /// Horizontal walls sit at ±this value
    pub arena_half_width: f32,
    /// Shape shared by every platform
    pub platform: PlatformShape,
    /// Collision box of a fighter
    pub body: BodySize,
    /// Horizontal speed while running (units/s)
    pub run_speed: f32,
    /// Vertical velocity given by a jump
    pub jump_velocity: f32,
    /// Falling below this height counts as a ring-out
    pub fall_limit: f32,
    /// Where a ring-out puts the character back
    pub respawn_point: Vec3,
    pub player_spawn: Vec3,
    pub enemy_spawn: Vec3,
}

impl ArenaConfig {
    pub const DEFAULT: ArenaConfig = ArenaConfig {
        gravity: 20.0,
        arena_half_width: 10.0,
        platform: PlatformShape {
            width: 20.0,
            height: 0.5,
        },
        body: BodySize {
            width: 1.0,
            height: 1.0,
        },
        run_speed: 8.0,
        jump_velocity: 10.0,
        fall_limit: -4.0,
        respawn_point: Vec3::new(0.0, 2.0, 0.0),
        player_spawn: Vec3::new(-3.0, 1.0, 0.0),
        enemy_spawn: Vec3::new(3.0, 1.0, 0.0),
    };
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// The single main platform the arena ships with
pub fn default_platforms() -> Vec<Platform> {
    vec![Platform::new(Vec3::ZERO)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ArenaConfig::default();
        assert_eq!(config.gravity, 20.0);
        assert_eq!(config.platform.width, 20.0);
        assert_eq!(config.arena_half_width, 10.0);
        assert_eq!(config, ArenaConfig::DEFAULT);
    }

    #[test]
    fn test_default_layout_has_one_platform() {
        let platforms = default_platforms();
        assert_eq!(platforms.len(), 1);
        assert_eq!(platforms[0].center, Vec3::ZERO);
    }
}
