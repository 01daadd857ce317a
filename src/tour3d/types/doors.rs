//! Door and cabinet types
//!
//! Two kinds of door control exist in the room:
//! - `VisibilityToggler` hides or shows a set of door meshes from a UI button
//! - `DoorAnimator` swings a hinged door between its closed and open rotation
//!
//! A `DoorGroup` bundles animators that a single interaction opens or closes together.

use bevy::prelude::*;

// ============================================================================
// Visibility Toggling
// ============================================================================

/// UI button that shows/hides a list of door entities.
#[derive(Component, Debug, Clone)]
pub struct VisibilityToggler {
    pub name: String,
    pub doors: Vec<Entity>,
    pub visible: bool,
    pub hide_label: String,
    pub show_label: String,
}

impl VisibilityToggler {
    pub fn new(name: impl Into<String>, doors: Vec<Entity>) -> Self {
        Self {
            name: name.into(),
            doors,
            visible: true,
            hide_label: "Hide Doors".to_string(),
            show_label: "Show Doors".to_string(),
        }
    }

    pub fn with_labels(mut self, hide: impl Into<String>, show: impl Into<String>) -> Self {
        self.hide_label = hide.into();
        self.show_label = show.into();
        self
    }

    /// Flip visibility, returning the new state.
    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    /// Button text for the current state: visible doors offer "hide".
    pub fn label(&self) -> &str {
        if self.visible {
            &self.hide_label
        } else {
            &self.show_label
        }
    }

    pub fn visibility(&self) -> Visibility {
        if self.visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        }
    }

    pub fn state_name(&self) -> &'static str {
        if self.visible {
            "Visible"
        } else {
            "Hidden"
        }
    }
}

// ============================================================================
// Hinged Door Animation
// ============================================================================

/// Hermite smoothstep on `[0, 1]`.
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DoorTween {
    from: Quat,
    to: Quat,
    elapsed: f32,
}

/// One frame of a running door tween.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoorFrame {
    pub rotation: Quat,
    pub finished: bool,
}

/// Hinged door driven by an open/closed flag.
///
/// Lives on the hinge pivot entity; the door mesh is a child offset from the pivot.
#[derive(Component, Debug, Clone)]
pub struct DoorAnimator {
    pub name: String,
    pub closed_rotation: Quat,
    pub open_rotation: Quat,
    /// Seconds for a full swing.
    pub duration: f32,
    open: bool,
    tween: Option<DoorTween>,
}

impl DoorAnimator {
    pub fn new(name: impl Into<String>, closed_rotation: Quat, open_rotation: Quat, duration: f32) -> Self {
        Self {
            name: name.into(),
            closed_rotation,
            open_rotation,
            duration,
            open: false,
            tween: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    pub fn target_rotation(&self) -> Quat {
        if self.open {
            self.open_rotation
        } else {
            self.closed_rotation
        }
    }

    /// Flip the door and start swinging from `current`. Interrupts a running swing.
    pub fn toggle(&mut self, current: Quat) -> bool {
        self.open = !self.open;
        self.tween = Some(DoorTween {
            from: current,
            to: self.target_rotation(),
            elapsed: 0.0,
        });
        self.open
    }

    /// Drive the door towards `open` if it is not already there.
    pub fn set_open(&mut self, open: bool, current: Quat) {
        if self.open != open {
            self.toggle(current);
        }
    }

    /// Advance the running swing by `dt` seconds.
    ///
    /// Returns `None` when idle. The finishing frame lands exactly on the target.
    pub fn advance(&mut self, dt: f32) -> Option<DoorFrame> {
        let duration = self.duration;
        let tween = self.tween.as_mut()?;

        if duration <= 0.0 || tween.elapsed >= duration {
            let rotation = tween.to;
            self.tween = None;
            return Some(DoorFrame {
                rotation,
                finished: true,
            });
        }

        let t = smoothstep(tween.elapsed / duration);
        let rotation = tween.from.slerp(tween.to, t);
        tween.elapsed += dt;

        Some(DoorFrame {
            rotation,
            finished: false,
        })
    }
}

// ============================================================================
// Door Groups
// ============================================================================

/// `true` only if there is at least one door and every door is open.
pub fn all_doors_open(states: impl IntoIterator<Item = bool>) -> bool {
    let mut any = false;
    for open in states {
        if !open {
            return false;
        }
        any = true;
    }
    any
}

/// Request to open or close a `DoorGroup` entity.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoorGroupToggle {
    pub group: Entity,
}

/// Doors opened/closed together by one interaction (a cabinet, a double door).
#[derive(Component, Debug, Clone)]
pub struct DoorGroup {
    pub name: String,
    pub doors: Vec<Entity>,
    pub open_label: String,
    pub close_label: String,
}

impl DoorGroup {
    pub fn new(name: impl Into<String>, doors: Vec<Entity>) -> Self {
        Self {
            name: name.into(),
            doors,
            open_label: "Open Cabinet".to_string(),
            close_label: "Close Cabinet".to_string(),
        }
    }

    pub fn with_labels(mut self, open: impl Into<String>, close: impl Into<String>) -> Self {
        self.open_label = open.into();
        self.close_label = close.into();
        self
    }

    /// Button text: fully open groups offer "close", anything else offers "open".
    pub fn label(&self, all_open: bool) -> &str {
        if all_open {
            &self.close_label
        } else {
            &self.open_label
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hinge() -> DoorAnimator {
        DoorAnimator::new(
            "left",
            Quat::IDENTITY,
            Quat::from_rotation_y(-std::f32::consts::FRAC_PI_2),
            1.0,
        )
    }

    #[test]
    fn test_visibility_toggler_labels() {
        let mut toggler = VisibilityToggler::new("cabinets", vec![]);
        assert!(toggler.visible);
        assert_eq!(toggler.label(), "Hide Doors");
        assert!(!toggler.toggle());
        assert_eq!(toggler.label(), "Show Doors");
        assert_eq!(toggler.visibility(), Visibility::Hidden);
        assert!(toggler.toggle());
        assert_eq!(toggler.state_name(), "Visible");
    }

    #[test]
    fn test_smoothstep_endpoints() {
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(1.0), 1.0);
        assert_eq!(smoothstep(0.5), 0.5);
        assert_eq!(smoothstep(2.0), 1.0);
        assert!(smoothstep(0.25) < 0.25);
    }

    #[test]
    fn test_door_starts_closed_and_idle() {
        let mut door = hinge();
        assert!(!door.is_open());
        assert!(door.advance(0.1).is_none());
    }

    #[test]
    fn test_door_swing_finishes_exactly_on_target() {
        let mut door = hinge();
        assert!(door.toggle(Quat::IDENTITY));

        let mut last = None;
        for _ in 0..20 {
            match door.advance(0.1) {
                Some(frame) => last = Some(frame),
                None => break,
            }
        }
        let last = last.unwrap();
        assert!(last.finished);
        assert_eq!(last.rotation, door.open_rotation);
        assert!(!door.is_animating());
    }

    #[test]
    fn test_toggle_mid_swing_restarts_from_current_rotation() {
        let mut door = hinge();
        door.toggle(Quat::IDENTITY);
        door.advance(0.5);
        let mid = door.advance(0.0).unwrap().rotation;

        assert!(!door.toggle(mid));
        let first = door.advance(0.0).unwrap();
        assert!(first.rotation.angle_between(mid) < 1e-4);
        assert_eq!(door.target_rotation(), Quat::IDENTITY);
    }

    #[test]
    fn test_zero_duration_snaps() {
        let mut door = hinge();
        door.duration = 0.0;
        door.toggle(Quat::IDENTITY);
        let frame = door.advance(0.016).unwrap();
        assert!(frame.finished);
        assert_eq!(frame.rotation, door.open_rotation);
    }

    #[test]
    fn test_set_open_is_idempotent() {
        let mut door = hinge();
        door.set_open(false, Quat::IDENTITY);
        assert!(!door.is_animating());
        door.set_open(true, Quat::IDENTITY);
        assert!(door.is_open());
        assert!(door.is_animating());
    }

    #[test]
    fn test_all_doors_open() {
        assert!(!all_doors_open([]));
        assert!(all_doors_open([true]));
        assert!(all_doors_open([true, true]));
        assert!(!all_doors_open([true, false]));
    }

    #[test]
    fn test_group_label() {
        let group = DoorGroup::new("central", vec![]).with_labels("Open Doors", "Close Doors");
        assert_eq!(group.label(false), "Open Doors");
        assert_eq!(group.label(true), "Close Doors");
    }
}
