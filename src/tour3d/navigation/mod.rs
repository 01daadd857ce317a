//! Camera rig navigation
//!
//! - `state` - linear tour steps, jump targets and the command message
//! - `controller` - smoothed pan/pinch controller for touch mode
//! - `joystick` - virtual joystick and rotation finger for joystick mode
//! - `systems` - ECS systems applying all of the above to the rig
//! - `ui` - navigation bar and joystick widget

pub mod controller;
pub mod joystick;
pub mod state;
pub mod systems;
pub mod ui;

pub use controller::*;
pub use joystick::*;
pub use state::*;
pub use systems::*;
pub use ui::*;
