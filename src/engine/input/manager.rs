// Input manager: turns winit keyboard events into control state

use super::action::Control;
use super::config::KeyBindings;
use super::player::ControlState;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Owns the bindings and the player's control state
#[derive(Debug)]
pub struct InputManager {
    bindings: KeyBindings,
    state: ControlState,
}

impl InputManager {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            state: ControlState::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(key) = event.physical_key {
            self.process_key(key, event.state == ElementState::Pressed, event.repeat);
        }
    }

    /// Feed one key transition; returns the control it maps to, if any
    pub fn process_key(&mut self, key: KeyCode, pressed: bool, repeat: bool) -> Option<Control> {
        let control = self.bindings.control_for(key)?;
        if pressed {
            // Auto-repeat is not a new press
            if !repeat {
                self.state.press(control);
            }
        } else {
            self.state.release(control);
        }
        Some(control)
    }

    /// Call once per frame after the game has read the state
    pub fn end_frame(&mut self) {
        self.state.end_frame();
    }

    pub fn state(&self) -> &ControlState {
        &self.state
    }

    /// Drop everything held, e.g. when the window loses focus
    pub fn reset(&mut self) {
        self.state.reset();
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(KeyBindings::with_defaults())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bound_key_presses_control() {
        let mut manager = InputManager::default();
        assert_eq!(manager.process_key(KeyCode::KeyW, true, false), Some(Control::Attack));
        assert!(manager.state().just_pressed(Control::Attack));
    }

    #[test]
    fn test_unbound_key_ignored() {
        let mut manager = InputManager::default();
        assert_eq!(manager.process_key(KeyCode::KeyZ, true, false), None);
    }

    #[test]
    fn test_repeat_does_not_press() {
        let mut manager = InputManager::default();
        manager.process_key(KeyCode::ArrowLeft, true, true);
        assert!(!manager.state().is_pressed(Control::Left));
    }

    #[test]
    fn test_frame_cycle() {
        let mut manager = InputManager::default();
        manager.process_key(KeyCode::KeyQ, true, false);
        manager.end_frame();
        assert!(manager.state().is_pressed(Control::Defense));
        assert!(!manager.state().just_pressed(Control::Defense));

        manager.process_key(KeyCode::KeyQ, false, false);
        assert!(manager.state().just_released(Control::Defense));
    }

    #[test]
    fn test_remapped_key() {
        let mut bindings = KeyBindings::with_defaults();
        bindings.bind(KeyCode::Space, Control::Jump);
        let mut manager = InputManager::new(bindings);
        manager.process_key(KeyCode::Space, true, false);
        assert!(manager.state().is_pressed(Control::Jump));
    }

    #[test]
    fn test_reset_drops_held_controls() {
        let mut manager = InputManager::default();
        manager.process_key(KeyCode::ArrowRight, true, false);
        manager.reset();
        assert_eq!(manager.state().horizontal(), 0);
    }
}
