//! Scene systems
//!
//! - `setup`: Scene construction from `SceneConfig` (rig, room, cabinets, monitor, UI)
//! - `doors`: Visibility togglers, hinge tweens and door group toggles
//! - `proximity`: Sensor zones gating the interaction button, door panels and monitor
//! - `metadata_loader`: Background component catalog and image loading
//! - `info_panel`: Component detail panel
//! - `ui`: Shared button feedback

pub mod doors;
pub mod info_panel;
pub mod metadata_loader;
pub mod proximity;
pub mod setup;
pub mod ui;

pub use doors::*;
pub use info_panel::*;
pub use metadata_loader::*;
pub use proximity::*;
pub use setup::*;
pub use ui::*;
