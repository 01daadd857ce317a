pub mod monitor;
pub mod navigation;
pub mod systems;
pub mod types;

pub use monitor::*;
pub use navigation::*;
pub use systems::*;
pub use types::*;
