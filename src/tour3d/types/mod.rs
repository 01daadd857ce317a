//! Type definitions for the walkthrough
//!
//! This module is organized into submodules:
//! - `camera` - Camera rig, player identity and navigation mode
//! - `doors` - Door visibility togglers, hinge animators and door groups
//! - `interaction` - Proximity zones and the buttons they reveal
//! - `metadata` - Component detail panel
//! - `scene` - RON scene description
//! - `ui` - Shared UI colors and helpers

pub mod camera;
pub mod doors;
pub mod interaction;
pub mod metadata;
pub mod scene;
pub mod ui;

// Re-export all public types for convenient access
pub use camera::*;
pub use doors::*;
pub use interaction::*;
pub use metadata::*;
pub use scene::*;
pub use ui::*;
