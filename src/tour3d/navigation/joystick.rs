//! Virtual joystick navigation
//!
//! The left half of the screen hosts a dynamic joystick: wherever a finger lands
//! becomes the stick's center. A finger landing on the right half turns the rig.

use bevy::prelude::*;

use crate::tour3d::types::JoystickConfig;

/// Stick travel in pixels for a full deflection.
pub const JOYSTICK_RADIUS: f32 = 70.0;

/// Which pointer currently owns a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerId {
    Touch(u64),
    Mouse,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct StickDrag {
    pointer: PointerId,
    origin: Vec2,
}

/// On-screen joystick state. Axes are `(horizontal, vertical)` in `[-1, 1]`, up positive.
#[derive(Resource, Debug, Clone)]
pub struct VirtualJoystick {
    pub radius: f32,
    drag: Option<StickDrag>,
    stick: Vec2,
    keyboard: Vec2,
}

impl Default for VirtualJoystick {
    fn default() -> Self {
        Self {
            radius: JOYSTICK_RADIUS,
            drag: None,
            stick: Vec2::ZERO,
            keyboard: Vec2::ZERO,
        }
    }
}

impl VirtualJoystick {
    pub fn is_held(&self) -> bool {
        self.drag.is_some()
    }

    pub fn owner(&self) -> Option<PointerId> {
        self.drag.map(|d| d.pointer)
    }

    /// Claim the stick. Ignored while another pointer holds it.
    pub fn press(&mut self, pointer: PointerId, position: Vec2) -> bool {
        if self.drag.is_some() {
            return false;
        }
        self.drag = Some(StickDrag {
            pointer,
            origin: position,
        });
        self.stick = Vec2::ZERO;
        true
    }

    pub fn drag(&mut self, pointer: PointerId, position: Vec2) {
        let Some(drag) = self.drag else {
            return;
        };
        if drag.pointer != pointer || self.radius <= 0.0 {
            return;
        }
        let offset = (position - drag.origin) / self.radius;
        // window y grows downwards
        self.stick = Vec2::new(offset.x, -offset.y).clamp_length_max(1.0);
    }

    pub fn release(&mut self, pointer: PointerId) {
        if self.owner() == Some(pointer) {
            self.drag = None;
            self.stick = Vec2::ZERO;
        }
    }

    pub fn set_keyboard(&mut self, axes: Vec2) {
        self.keyboard = axes.clamp_length_max(1.0);
    }

    /// Current axes; a held stick wins over the keyboard.
    pub fn axes(&self) -> Vec2 {
        if self.drag.is_some() {
            self.stick
        } else {
            self.keyboard
        }
    }

    /// Knob offset from the stick center in window pixels, for drawing.
    pub fn knob_offset(&self) -> Vec2 {
        Vec2::new(self.stick.x, -self.stick.y) * self.radius
    }

    pub fn origin(&self) -> Option<Vec2> {
        self.drag.map(|d| d.origin)
    }
}

/// World-space displacement for one frame of joystick input.
///
/// Returns zero inside the deadzone. Forward/right are flattened onto the ground
/// plane so a pitched rig never climbs or sinks.
pub fn planar_move(rig_rotation: Quat, axes: Vec2, config: &JoystickConfig, dt: f32) -> Vec3 {
    if axes.x.abs() <= config.deadzone && axes.y.abs() <= config.deadzone {
        return Vec3::ZERO;
    }

    let flatten = |v: Vec3| Vec3::new(v.x, 0.0, v.z).normalize_or_zero();
    let forward = flatten(rig_rotation * Vec3::NEG_Z);
    let right = flatten(rig_rotation * Vec3::X);

    (forward * axes.y + right * axes.x) * config.move_speed * dt
}

/// Tracks the finger that turns the rig.
#[derive(Resource, Debug, Clone, Default)]
pub struct RotationTouch {
    pointer: Option<PointerId>,
}

impl RotationTouch {
    pub fn owner(&self) -> Option<PointerId> {
        self.pointer
    }

    /// Claim a new pointer if it lands on the right half of the window.
    pub fn press(&mut self, pointer: PointerId, position: Vec2, window_width: f32) -> bool {
        if self.pointer.is_some() || position.x <= window_width / 2.0 {
            return false;
        }
        self.pointer = Some(pointer);
        true
    }

    /// Yaw in degrees for a horizontal drag of `delta_x` pixels by `pointer`.
    ///
    /// Dragging right turns right, which is a negative rotation about +Y.
    pub fn yaw_degrees(&self, pointer: PointerId, delta_x: f32, rotation_speed: f32, dt: f32) -> f32 {
        if self.pointer == Some(pointer) {
            -delta_x * rotation_speed * dt
        } else {
            0.0
        }
    }

    pub fn release(&mut self, pointer: PointerId) {
        if self.pointer == Some(pointer) {
            self.pointer = None;
        }
    }
}
