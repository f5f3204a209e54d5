// Engine modules: frame timing, physics, input

pub mod frame_clock;
pub mod input;
pub mod physics;
