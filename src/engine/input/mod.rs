// Input handling system
//
// Keyboard events come in from winit and end up as a held/edge state of
// controls the game reads once per frame.
//
// ## Architecture
//
// - `action`: Control intents and the default key layout
// - `config`: Key binding table
// - `player`: Held and edge state of the controls
// - `manager`: Feeds winit events through the bindings into the state
//
// ## Usage Example
//
// ```rust
// use engine::input::{InputManager, Control};
//
// let mut input = InputManager::default();
//
// // In your event loop
// input.process_keyboard_event(&key_event);
//
// // Once per frame, after the game has read the state
// if input.state().just_pressed(Control::Attack) {
//     // swing
// }
// input.end_frame();
// ```

pub mod action;
pub mod config;
pub mod manager;
pub mod player;

// Re-export commonly used types
pub use action::Control;
pub use config::KeyBindings;
pub use manager::InputManager;
pub use player::ControlState;
