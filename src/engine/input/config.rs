// Key binding table

use super::action::{default_bindings, Control};
use std::collections::HashMap;
use winit::keyboard::KeyCode;

/// Maps physical keys to controls
#[derive(Debug, Clone, Default)]
pub struct KeyBindings {
    bindings: HashMap<KeyCode, Control>,
}

impl KeyBindings {
    /// Empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Table pre-filled with the default layout
    pub fn with_defaults() -> Self {
        let mut bindings = Self::new();
        for (key, control) in default_bindings() {
            bindings.bind(key, control);
        }
        bindings
    }

    /// Bind a key to a control, replacing whatever the key did before
    pub fn bind(&mut self, key: KeyCode, control: Control) {
        self.bindings.insert(key, control);
    }

    pub fn control_for(&self, key: KeyCode) -> Option<Control> {
        self.bindings.get(&key).copied()
    }
}
