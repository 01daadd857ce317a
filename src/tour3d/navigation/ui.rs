//! Navigation UI
//!
//! Bottom bar with the tour buttons and the on-screen joystick.

use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::prelude::*;

use super::joystick::JOYSTICK_RADIUS;
use super::state::*;
use crate::tour3d::types::*;

/// Button that sends a navigation command when pressed.
#[derive(Component, Debug, Clone, Copy)]
pub struct NavButton(pub NavigationCommand);

/// Joystick base, shown where the stick was grabbed
#[derive(Component)]
pub struct JoystickBase;

#[derive(Component)]
pub struct JoystickKnob;

pub const JOYSTICK_KNOB_SIZE: f32 = 44.0;

fn spawn_nav_button(parent: &mut ChildSpawnerCommands, label: &str, command: NavigationCommand) {
    parent
        .spawn((
            Button,
            button_node(Val::Auto),
            BackgroundColor(BUTTON_BG),
            HoverButton,
            NavButton(command),
        ))
        .with_children(|button| {
            button.spawn((Text::new(label), label_font(16.0), TextColor(TEXT_COLOR)));
        });
}

/// Spawn the navigation bar along the bottom edge.
pub fn spawn_navigation_bar(
    commands: &mut Commands,
    jumps: &JumpNavigator,
    mode: NavigationMode,
) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(12.0),
                left: Val::Percent(20.0),
                right: Val::Percent(20.0),
                flex_direction: FlexDirection::Row,
                flex_wrap: FlexWrap::Wrap,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                padding: UiRect::all(Val::Px(4.0)),
                ..default()
            },
            BackgroundColor(PANEL_BG),
            ZIndex(10),
        ))
        .with_children(|bar| {
            spawn_nav_button(bar, "< Previous", NavigationCommand::PreviousStep);
            spawn_nav_button(bar, "Next >", NavigationCommand::NextStep);

            for (index, target) in jumps.targets().iter().enumerate() {
                spawn_nav_button(bar, &target.name, NavigationCommand::JumpToTarget(index));
            }

            if mode == NavigationMode::Touch {
                spawn_nav_button(bar, "Free Look", NavigationCommand::EnableFreeLook);
            }
        });
}

/// Spawn the (initially hidden) dynamic joystick.
pub fn spawn_joystick_widget(commands: &mut Commands) {
    let size = JOYSTICK_RADIUS * 2.0;
    commands
        .spawn((
            Node {
                display: Display::None,
                position_type: PositionType::Absolute,
                width: Val::Px(size),
                height: Val::Px(size),
                ..default()
            },
            BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.12)),
            JoystickBase,
            ZIndex(5),
        ))
        .with_children(|base| {
            base.spawn((
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(JOYSTICK_RADIUS - JOYSTICK_KNOB_SIZE / 2.0),
                    top: Val::Px(JOYSTICK_RADIUS - JOYSTICK_KNOB_SIZE / 2.0),
                    width: Val::Px(JOYSTICK_KNOB_SIZE),
                    height: Val::Px(JOYSTICK_KNOB_SIZE),
                    ..default()
                },
                BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.45)),
                JoystickKnob,
            ));
        });
}
