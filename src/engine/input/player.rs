// Held and edge state of the player's controls

use super::action::Control;
use std::collections::HashSet;

/// Which controls are held, and which changed during the current frame
#[derive(Debug, Default)]
pub struct ControlState {
    pressed: HashSet<Control>,
    just_pressed: HashSet<Control>,
    just_released: HashSet<Control>,
}

impl ControlState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pressed(&self, control: Control) -> bool {
        self.pressed.contains(&control)
    }

    pub fn just_pressed(&self, control: Control) -> bool {
        self.just_pressed.contains(&control)
    }

    pub fn just_released(&self, control: Control) -> bool {
        self.just_released.contains(&control)
    }

    pub fn press(&mut self, control: Control) {
        if self.pressed.insert(control) {
            self.just_pressed.insert(control);
        }
    }

    pub fn release(&mut self, control: Control) {
        if self.pressed.remove(&control) {
            self.just_released.insert(control);
        }
    }

    /// Forget this frame's edges; call once per frame after the game read them
    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }

    pub fn reset(&mut self) {
        self.pressed.clear();
        self.end_frame();
    }

    /// -1 for left, 1 for right, 0 for neither. Left wins when both are held.
    pub fn horizontal(&self) -> i8 {
        if self.is_pressed(Control::Left) {
            -1
        } else if self.is_pressed(Control::Right) {
            1
        } else {
            0
        }
    }
}
