//! Camera-related types and components
//!
//! The viewer never moves the camera directly: navigation writes the `CameraRig`
//! transform and the camera rides along as its child.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Marker component for the main 3D camera
#[derive(Component)]
pub struct MainCamera;

/// Marker for the parent transform carrying the main camera
#[derive(Component)]
pub struct CameraRig;

/// Identifies the visitor for proximity volumes.
///
/// `tag` and `layer` are matched by each zone's `PlayerFilter`.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub tag: String,
    pub layer: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            tag: "Player".to_string(),
            layer: 0,
        }
    }
}

/// Which free-look controller drives the camera rig.
#[derive(
    Resource, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum NavigationMode {
    /// On-screen joystick moves the rig, right-half drag turns it.
    #[default]
    Joystick,
    /// One finger pans, two fingers pinch-zoom, both smoothed.
    Touch,
}

/// Run condition: joystick controller active
pub fn joystick_mode_active(mode: Res<NavigationMode>) -> bool {
    *mode == NavigationMode::Joystick
}

/// Run condition: smoothed touch controller active
pub fn touch_mode_active(mode: Res<NavigationMode>) -> bool {
    *mode == NavigationMode::Touch
}
