//! In-scene document monitor
//!
//! - `state` - the browser state machine and its command message
//! - `systems` - button handling and UI projection
//! - `ui` - the monitor panel layout

pub mod state;
pub mod systems;
pub mod ui;

pub use state::*;
pub use systems::*;
pub use ui::*;
