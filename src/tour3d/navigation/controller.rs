//! Smoothed touch camera controller
//!
//! Input only moves targets; `apply` eases the rig and the camera's field of view
//! towards them every frame.

use bevy::prelude::*;

use crate::tour3d::types::TouchConfig;

/// Perspective zoom works in degrees of FOV, so pinch distances are scaled up.
pub const PERSPECTIVE_ZOOM_SCALE: f32 = 100.0;

/// Frame-rate scaled interpolation factor, clamped to `[0, 1]`.
pub fn lerp_factor(dt: f32, speed: f32) -> f32 {
    (dt * speed).clamp(0.0, 1.0)
}

/// Positive when two fingers move together (zoom out), negative when they spread.
pub fn pinch_zoom_delta(previous: (Vec2, Vec2), current: (Vec2, Vec2)) -> f32 {
    previous.0.distance(previous.1) - current.0.distance(current.1)
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PanState {
    finger: u64,
    last_position: Vec2,
}

/// Lives on the camera rig when touch navigation is selected.
#[derive(Component, Debug, Clone)]
pub struct SmoothCameraController {
    pub target_position: Vec3,
    pub target_rotation: Quat,
    /// Target field of view in degrees.
    pub target_zoom: f32,
    pub allow_control: bool,
    pub settings: TouchConfig,
    pan: Option<PanState>,
}

impl SmoothCameraController {
    pub fn new(rig: &Transform, fov_deg: f32, settings: TouchConfig) -> Self {
        Self {
            target_position: rig.translation,
            target_rotation: rig.rotation,
            target_zoom: fov_deg.clamp(settings.min_zoom, settings.max_zoom),
            allow_control: true,
            settings,
            pan: None,
        }
    }

    pub fn is_panning(&self) -> bool {
        self.pan.is_some()
    }

    /// Snap the rig to a pose and hand control to the tour until re-enabled.
    pub fn set_target(&mut self, rig: &mut Transform, position: Vec3, rotation: Quat) {
        self.allow_control = false;
        self.pan = None;
        self.target_position = position;
        self.target_rotation = rotation;
        rig.translation = position;
        rig.rotation = rotation;
    }

    pub fn enable_control(&mut self, enable: bool) {
        self.allow_control = enable;
        if !enable {
            self.pan = None;
        }
    }

    /// Feed the single panning finger. The first sample only claims the finger.
    pub fn pan(&mut self, finger: u64, position: Vec2, rig_rotation: Quat) {
        match self.pan {
            None => {
                self.pan = Some(PanState {
                    finger,
                    last_position: position,
                });
            }
            Some(ref mut state) if state.finger == finger => {
                let delta = position - state.last_position;
                state.last_position = position;
                // Window space is y-down; dragging up should move the view down.
                let speed = self.settings.pan_speed;
                let local = Vec3::new(-delta.x * speed, delta.y * speed, 0.0);
                self.target_position += rig_rotation * local;
            }
            Some(_) => {}
        }
    }

    pub fn end_pan(&mut self) {
        self.pan = None;
    }

    /// A lifted or canceled finger ends the pan only if it is the one panning.
    pub fn release_finger(&mut self, finger: u64) {
        if self.pan.as_ref().is_some_and(|state| state.finger == finger) {
            self.pan = None;
        }
    }

    /// Apply a pinch distance change (see [`pinch_zoom_delta`]).
    pub fn pinch(&mut self, delta: f32) {
        self.pan = None;
        self.zoom_by(delta * self.settings.zoom_speed * PERSPECTIVE_ZOOM_SCALE);
    }

    /// Move the target field of view by `degrees`, within the configured bounds.
    pub fn zoom_by(&mut self, degrees: f32) {
        self.target_zoom =
            (self.target_zoom + degrees).clamp(self.settings.min_zoom, self.settings.max_zoom);
    }

    /// Ease the rig and field of view towards the targets. Returns the new FOV in degrees.
    pub fn apply(&self, rig: &mut Transform, fov_deg: f32, dt: f32) -> f32 {
        let zoom_t = lerp_factor(dt, self.settings.zoom_smooth_speed);
        let pan_t = lerp_factor(dt, self.settings.pan_smooth_speed);

        rig.translation = rig.translation.lerp(self.target_position, pan_t);
        rig.rotation = rig.rotation.slerp(self.target_rotation, pan_t);
        fov_deg + (self.target_zoom - fov_deg) * zoom_t
    }
}
