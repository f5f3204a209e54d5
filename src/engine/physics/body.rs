use glam::Vec3;

/// Axis-aligned size of a character's collision box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySize {
    pub width: f32,
    pub height: f32,
}

impl BodySize {
    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    pub fn half_height(&self) -> f32 {
        self.height / 2.0
    }
}

/// Position and velocity of a body, integrated by hand each frame.
///
/// Every method consumes the body and returns the next one so a frame can be
/// written as a pipeline of small steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicBody {
    pub position: Vec3,
    pub velocity: Vec3,
}

impl KinematicBody {
    pub fn new(position: Vec3, velocity: Vec3) -> Self {
        Self { position, velocity }
    }

    /// Accelerate downward by `gravity` for `dt` seconds
    pub fn with_gravity(mut self, gravity: f32, dt: f32) -> Self {
        self.velocity.y -= gravity * dt;
        self
    }

    /// Override the horizontal velocity
    pub fn with_horizontal_speed(mut self, vx: f32) -> Self {
        self.velocity.x = vx;
        self
    }

    /// Scale the horizontal velocity (per-frame friction)
    pub fn with_horizontal_drag(mut self, factor: f32) -> Self {
        self.velocity.x *= factor;
        self
    }

    /// Advance the position by the current velocity
    pub fn integrated(mut self, dt: f32) -> Self {
        self.position += self.velocity * dt;
        self
    }

    /// Keep the body between the arena walls, stopping it at a wall
    pub fn clamped_to_arena(mut self, half_width: f32) -> Self {
        if self.position.x < -half_width {
            self.position.x = -half_width;
            self.velocity.x = 0.0;
        } else if self.position.x > half_width {
            self.position.x = half_width;
            self.velocity.x = 0.0;
        }
        self
    }

    /// Teleport to `position` at rest
    pub fn respawned_at(position: Vec3) -> Self {
        Self::new(position, Vec3::ZERO)
    }

    pub fn feet(&self, size: BodySize) -> f32 {
        self.position.y - size.half_height()
    }

    pub fn head(&self, size: BodySize) -> f32 {
        self.position.y + size.half_height()
    }
}
