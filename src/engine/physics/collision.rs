use glam::Vec3;

use super::body::{BodySize, KinematicBody};

/// How far below a surface the feet may sink and still count as landing
pub const LANDING_TOLERANCE: f32 = 0.2;

/// Gap left under a ceiling after a head bump
const CEILING_CLEARANCE: f32 = 0.01;

/// Size shared by all platforms of an arena
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformShape {
    pub width: f32,
    pub height: f32,
}

/// A static rectangular platform, identified by its centre
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Platform {
    pub center: Vec3,
}

impl Platform {
    pub fn new(center: Vec3) -> Self {
        Self { center }
    }

    /// Height of the walkable top face
    pub fn surface(&self, shape: PlatformShape) -> f32 {
        self.center.y + shape.height / 2.0
    }

    /// Height of the underside
    pub fn bottom(&self, shape: PlatformShape) -> f32 {
        self.center.y - shape.height / 2.0
    }

    /// Whether a body centred at `x` overlaps the platform horizontally
    pub fn overlaps_horizontally(&self, x: f32, shape: PlatformShape, size: BodySize) -> bool {
        x + size.half_width() >= self.center.x - shape.width / 2.0
            && x - size.half_width() <= self.center.x + shape.width / 2.0
    }
}

/// Result of resolving a body against the platforms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformContact {
    pub body: KinematicBody,
    /// The body came down onto a surface this frame
    pub landed: bool,
}

/// Snap a moving body onto (or under) the platforms it touched this frame.
///
/// `previous` is the position before integration; a landing needs the feet to
/// have been at or above the surface last frame and to be within
/// [`LANDING_TOLERANCE`] below it now while not moving up.
pub fn resolve_platforms(
    previous: Vec3,
    body: KinematicBody,
    platforms: &[Platform],
    shape: PlatformShape,
    size: BodySize,
) -> PlatformContact {
    let mut body = body;
    let mut landed = false;
    let previous_feet = previous.y - size.half_height();

    for platform in platforms {
        if !platform.overlaps_horizontally(body.position.x, shape, size) {
            continue;
        }

        let surface = platform.surface(shape);
        let feet = body.feet(size);
        let was_above = previous_feet >= surface;
        let at_surface = feet <= surface && feet >= surface - LANDING_TOLERANCE;

        if was_above && at_surface && body.velocity.y <= 0.0 {
            body.position.y = surface + size.half_height();
            body.velocity.y = 0.0;
            landed = true;
        }

        // Head bump from below
        let head = body.head(size);
        let bottom = platform.bottom(shape);
        if head >= bottom && head <= bottom + LANDING_TOLERANCE && body.velocity.y > 0.0 {
            body.position.y = bottom - size.half_height() - CEILING_CLEARANCE;
            body.velocity.y = 0.0;
        }
    }

    PlatformContact { body, landed }
}

/// Two fighters are in contact when their boxes overlap by the given
/// fraction of a body width horizontally and by less than a body height
/// vertically.
pub fn bodies_touching(a: Vec3, b: Vec3, size: BodySize, width_fraction: f32) -> bool {
    (a.x - b.x).abs() < size.width * width_fraction && (a.y - b.y).abs() < size.height
}

/// X coordinate that puts `x` exactly `separation` away from `other_x`,
/// on the side it is already on (right of it when level).
pub fn separated_x(x: f32, other_x: f32, separation: f32) -> f32 {
    let push = if x < other_x { -1.0 } else { 1.0 };
    other_x + push * separation
}
