// Kinematic physics: hand-integrated bodies and static platforms.
//
// Fighters are simple boxes moved by velocity; there is no rigid body solver.
// Platforms only stop bodies landing from above or bumping from below.

pub mod body;
pub mod collision;

pub use body::{BodySize, KinematicBody};
pub use collision::{
    bodies_touching, resolve_platforms, separated_x, Platform, PlatformContact, PlatformShape,
    LANDING_TOLERANCE,
};
