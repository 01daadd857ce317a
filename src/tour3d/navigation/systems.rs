//! Navigation systems
//!
//! Guided moves (steps and jumps) plus the two free-look controllers.

use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll, MouseScrollUnit};
use bevy::input::touch::Touches;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::controller::*;
use super::joystick::*;
use super::state::*;
use super::ui::*;
use crate::tour3d::types::*;

/// Finger id used when the mouse stands in for a touch.
const MOUSE_FINGER: u64 = u64::MAX;
/// Field of view change per wheel line.
const WHEEL_ZOOM_DEGREES: f32 = 2.0;
const PIXELS_PER_WHEEL_LINE: f32 = 20.0;

type RigQuery<'w, 's> = Query<
    'w,
    's,
    (&'static mut Transform, Option<&'static mut SmoothCameraController>),
    With<CameraRig>,
>;

/// `true` while a pointer hovers or presses any UI button.
pub fn pointer_over_ui(interactions: &Query<&Interaction>) -> bool {
    interactions
        .iter()
        .any(|interaction| *interaction != Interaction::None)
}

/// Put the rig on a waypoint, going through the smooth controller when it has one.
fn move_rig(rigs: &mut RigQuery, waypoint: &Waypoint) {
    let Ok((mut transform, controller)) = rigs.single_mut() else {
        error!("Camera rig is missing, cannot move camera to {}", waypoint.name);
        return;
    };

    match controller {
        Some(mut controller) => {
            controller.set_target(&mut transform, waypoint.position, waypoint.rotation)
        }
        None => {
            transform.translation = waypoint.position;
            transform.rotation = waypoint.rotation;
        }
    }
}

/// Startup: place the rig on the first tour step.
pub fn start_camera_tour(mut steps: ResMut<CameraStepNavigator>, mut rigs: RigQuery) {
    match steps.start() {
        StepMove::Moved(index) => {
            if let Some(waypoint) = steps.step(index).cloned() {
                info!("Camera tour starts at step {} ({})", index, waypoint.name);
                move_rig(&mut rigs, &waypoint);
            }
        }
        _ => warn!("No camera steps configured, linear navigation will not work"),
    }
}

/// Apply queued navigation commands.
pub fn handle_navigation_commands(
    mut nav_commands: MessageReader<NavigationCommand>,
    mut steps: ResMut<CameraStepNavigator>,
    jumps: Res<JumpNavigator>,
    mut rigs: RigQuery,
) {
    for command in nav_commands.read() {
        match *command {
            NavigationCommand::NextStep => match steps.next() {
                StepMove::Moved(index) => {
                    if let Some(waypoint) = steps.step(index).cloned() {
                        move_rig(&mut rigs, &waypoint);
                        info!("Moved to next step: {} ({})", index, waypoint.name);
                    }
                }
                StepMove::AlreadyAtLast => info!("Already at the last step. Cannot go further."),
                _ => warn!("No camera steps configured"),
            },
            NavigationCommand::PreviousStep => match steps.previous() {
                StepMove::Moved(index) => {
                    if let Some(waypoint) = steps.step(index).cloned() {
                        move_rig(&mut rigs, &waypoint);
                        info!("Moved to previous step: {} ({})", index, waypoint.name);
                    }
                }
                StepMove::AlreadyAtFirst => info!("Already at the first step. Cannot go back."),
                _ => warn!("No camera steps configured"),
            },
            NavigationCommand::TeleportToStep(index) => match steps.teleport(index) {
                StepMove::Moved(index) => {
                    if let Some(waypoint) = steps.step(index).cloned() {
                        move_rig(&mut rigs, &waypoint);
                        info!("Teleported to step: {} ({})", index, waypoint.name);
                    }
                }
                _ => warn!("Attempted to teleport to an invalid step index: {}", index),
            },
            NavigationCommand::JumpToTarget(index) => {
                let Some(waypoint) = jumps.target(index).cloned() else {
                    warn!(
                        "Invalid jump target index: {}. Target count: {}",
                        index,
                        jumps.len()
                    );
                    continue;
                };
                info!("Jumping to target: {} (index {})", waypoint.name, index);
                move_rig(&mut rigs, &waypoint);
                steps.set_current(index);
            }
            NavigationCommand::EnableFreeLook => {
                for (_, controller) in rigs.iter_mut() {
                    if let Some(mut controller) = controller {
                        controller.enable_control(true);
                        info!("Free look enabled");
                    }
                }
            }
        }
    }
}

/// Forward navigation button presses.
pub fn handle_nav_button_clicks(
    buttons: Query<(&Interaction, &NavButton), Changed<Interaction>>,
    mut nav_commands: MessageWriter<NavigationCommand>,
) {
    for (interaction, button) in buttons.iter() {
        if *interaction == Interaction::Pressed {
            nav_commands.write(button.0);
        }
    }
}

const JUMP_KEYS: [KeyCode; 9] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

/// PageDown/PageUp step through the tour, 1-9 jump, F re-enables free look.
pub fn navigation_keyboard_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut nav_commands: MessageWriter<NavigationCommand>,
) {
    if keyboard.just_pressed(KeyCode::PageDown) {
        nav_commands.write(NavigationCommand::NextStep);
    }
    if keyboard.just_pressed(KeyCode::PageUp) {
        nav_commands.write(NavigationCommand::PreviousStep);
    }
    if keyboard.just_pressed(KeyCode::KeyF) {
        nav_commands.write(NavigationCommand::EnableFreeLook);
    }
    for (index, key) in JUMP_KEYS.iter().enumerate() {
        if keyboard.just_pressed(*key) {
            nav_commands.write(NavigationCommand::JumpToTarget(index));
        }
    }
}

// ============================================================================
// Touch Mode
// ============================================================================

/// One finger pans, two fingers pinch; mouse drag and wheel do the same on desktop.
#[allow(clippy::too_many_arguments)]
pub fn smooth_touch_camera(
    time: Res<Time>,
    touches: Res<Touches>,
    mouse: Res<ButtonInput<MouseButton>>,
    scroll: Res<AccumulatedMouseScroll>,
    windows: Query<&Window, With<PrimaryWindow>>,
    interactions: Query<&Interaction>,
    mut rigs: Query<(&mut Transform, &mut SmoothCameraController), With<CameraRig>>,
    mut cameras: Query<&mut Projection, With<MainCamera>>,
) {
    let Ok((mut rig, mut controller)) = rigs.single_mut() else {
        return;
    };
    if !controller.allow_control {
        return;
    }

    let over_ui = pointer_over_ui(&interactions);
    for touch in touches
        .iter_just_released()
        .chain(touches.iter_just_canceled())
    {
        controller.release_finger(touch.id());
    }
    let active: Vec<_> = touches.iter().collect();

    match active.as_slice() {
        [touch] => {
            if controller.is_panning() || !over_ui {
                controller.pan(touch.id(), touch.position(), rig.rotation);
            }
        }
        [first, second] => {
            let delta = pinch_zoom_delta(
                (first.previous_position(), second.previous_position()),
                (first.position(), second.position()),
            );
            controller.pinch(delta);
        }
        _ => {
            let cursor = windows.single().ok().and_then(|w| w.cursor_position());
            match cursor {
                Some(position)
                    if mouse.pressed(MouseButton::Left)
                        && (controller.is_panning() || !over_ui) =>
                {
                    controller.pan(MOUSE_FINGER, position, rig.rotation);
                }
                _ => controller.end_pan(),
            }
        }
    }

    if scroll.delta.y != 0.0 && !over_ui {
        let lines = match scroll.unit {
            MouseScrollUnit::Line => scroll.delta.y,
            MouseScrollUnit::Pixel => scroll.delta.y / PIXELS_PER_WHEEL_LINE,
        };
        controller.zoom_by(-lines * WHEEL_ZOOM_DEGREES);
    }

    let dt = time.delta_secs();
    match cameras.single_mut() {
        Ok(mut projection) => {
            if let Projection::Perspective(perspective) = &mut *projection {
                let fov = controller.apply(&mut rig, perspective.fov.to_degrees(), dt);
                perspective.fov = fov.to_radians();
            } else {
                controller.apply(&mut rig, controller.target_zoom, dt);
            }
        }
        Err(_) => {
            controller.apply(&mut rig, controller.target_zoom, dt);
        }
    }
}

// ============================================================================
// Joystick Mode
// ============================================================================

fn keyboard_axes(keyboard: &ButtonInput<KeyCode>) -> Vec2 {
    let mut axes = Vec2::ZERO;
    if keyboard.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]) {
        axes.y += 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]) {
        axes.y -= 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
        axes.x += 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) {
        axes.x -= 1.0;
    }
    axes
}

/// Left half drives the stick, right half turns the rig.
#[allow(clippy::too_many_arguments)]
pub fn joystick_camera(
    time: Res<Time>,
    scene: Res<SceneConfig>,
    touches: Res<Touches>,
    mouse: Res<ButtonInput<MouseButton>>,
    motion: Res<AccumulatedMouseMotion>,
    keyboard: Res<ButtonInput<KeyCode>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    interactions: Query<&Interaction>,
    mut stick: ResMut<VirtualJoystick>,
    mut rotation: ResMut<RotationTouch>,
    mut rigs: Query<&mut Transform, With<CameraRig>>,
) {
    let Ok(mut rig) = rigs.single_mut() else {
        return;
    };
    let Ok(window) = windows.single() else {
        return;
    };

    let dt = time.delta_secs();
    let width = window.width();
    let over_ui = pointer_over_ui(&interactions);
    let rotation_speed = scene.joystick.rotation_speed;

    for touch in touches.iter_just_pressed() {
        if over_ui {
            continue;
        }
        let pointer = PointerId::Touch(touch.id());
        if touch.position().x <= width / 2.0 {
            stick.press(pointer, touch.position());
        } else {
            rotation.press(pointer, touch.position(), width);
        }
    }

    let mut yaw_deg = 0.0;
    for touch in touches.iter() {
        let pointer = PointerId::Touch(touch.id());
        stick.drag(pointer, touch.position());
        yaw_deg += rotation.yaw_degrees(pointer, touch.delta().x, rotation_speed, dt);
    }

    for touch in touches
        .iter_just_released()
        .chain(touches.iter_just_canceled())
    {
        let pointer = PointerId::Touch(touch.id());
        stick.release(pointer);
        rotation.release(pointer);
    }

    if let Some(cursor) = window.cursor_position() {
        if mouse.just_pressed(MouseButton::Left) && !over_ui && cursor.x <= width / 2.0 {
            stick.press(PointerId::Mouse, cursor);
        }
        if mouse.pressed(MouseButton::Left) {
            stick.drag(PointerId::Mouse, cursor);
        }
    }
    if mouse.just_released(MouseButton::Left) {
        stick.release(PointerId::Mouse);
    }
    if mouse.pressed(MouseButton::Right) {
        yaw_deg -= motion.delta.x * rotation_speed * dt;
    }

    stick.set_keyboard(keyboard_axes(&keyboard));

    if yaw_deg != 0.0 {
        rig.rotate_y(yaw_deg.to_radians());
    }
    let step = planar_move(rig.rotation, stick.axes(), &scene.joystick, dt);
    rig.translation += step;
}

/// Draw the stick where it was grabbed.
pub fn update_joystick_widget(
    stick: Res<VirtualJoystick>,
    mut bases: Query<&mut Node, (With<JoystickBase>, Without<JoystickKnob>)>,
    mut knobs: Query<&mut Node, (With<JoystickKnob>, Without<JoystickBase>)>,
) {
    if !stick.is_changed() {
        return;
    }

    for mut base in bases.iter_mut() {
        match stick.origin() {
            Some(origin) => {
                set_displayed(&mut base, true);
                base.left = Val::Px(origin.x - stick.radius);
                base.top = Val::Px(origin.y - stick.radius);
            }
            None => set_displayed(&mut base, false),
        }
    }

    let offset = stick.knob_offset();
    for mut knob in knobs.iter_mut() {
        knob.left = Val::Px(stick.radius - JOYSTICK_KNOB_SIZE / 2.0 + offset.x);
        knob.top = Val::Px(stick.radius - JOYSTICK_KNOB_SIZE / 2.0 + offset.y);
    }
}
