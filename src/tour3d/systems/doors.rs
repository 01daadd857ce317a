//! Door systems
//!
//! Visibility togglers, hinge tweens and group toggles.

use bevy::prelude::*;

use crate::tour3d::types::*;

/// Write `label` into the `ButtonLabel` text children of a button.
pub fn set_button_label(
    children: Option<&Children>,
    labels: &mut Query<&mut Text, With<ButtonLabel>>,
    label: &str,
) {
    let Some(children) = children else {
        return;
    };
    for child in children.iter() {
        if let Ok(mut text) = labels.get_mut(child) {
            if text.0 != label {
                text.0 = label.to_string();
            }
        }
    }
}

fn apply_door_visibility(toggler: &VisibilityToggler, visibilities: &mut Query<&mut Visibility>) {
    let visibility = toggler.visibility();
    for door in &toggler.doors {
        if let Ok(mut v) = visibilities.get_mut(*door) {
            *v = visibility;
        }
    }
}

/// Startup: deactivate empty togglers, show the doors of the others.
pub fn init_visibility_togglers(
    mut commands: Commands,
    togglers: Query<(Entity, &VisibilityToggler, Option<&Children>)>,
    mut visibilities: Query<&mut Visibility>,
    mut labels: Query<&mut Text, With<ButtonLabel>>,
) {
    for (entity, toggler, children) in togglers.iter() {
        if toggler.doors.is_empty() {
            warn!(
                "Door toggler '{}' has no doors assigned and will not function",
                toggler.name
            );
            commands.entity(entity).insert(Deactivated);
            continue;
        }
        apply_door_visibility(toggler, &mut visibilities);
        set_button_label(children, &mut labels, toggler.label());
    }
}

/// Flip door visibility when a toggler button is pressed.
pub fn handle_visibility_toggler_clicks(
    mut togglers: Query<
        (&Interaction, &mut VisibilityToggler, Option<&Children>),
        (Changed<Interaction>, Without<Deactivated>),
    >,
    mut visibilities: Query<&mut Visibility>,
    mut labels: Query<&mut Text, With<ButtonLabel>>,
) {
    for (interaction, mut toggler, children) in togglers.iter_mut() {
        if *interaction != Interaction::Pressed {
            continue;
        }
        toggler.toggle();
        apply_door_visibility(&toggler, &mut visibilities);
        set_button_label(children, &mut labels, toggler.label());
        info!("{} are now: {}", toggler.name, toggler.state_name());
    }
}

/// Advance running hinge tweens.
pub fn animate_doors(time: Res<Time>, mut doors: Query<(&mut DoorAnimator, &mut Transform)>) {
    let dt = time.delta_secs();
    for (mut door, mut transform) in doors.iter_mut() {
        if !door.is_animating() {
            continue;
        }
        let Some(frame) = door.advance(dt) else {
            continue;
        };
        transform.rotation = frame.rotation;
        if frame.finished {
            info!(
                "{} door {}",
                door.name,
                if door.is_open() { "opened" } else { "closed" }
            );
        }
    }
}

/// `true` when every live door of the group is open (and there is at least one).
///
/// `is_open` returns `None` for doors that no longer exist.
pub fn group_all_open(group: &DoorGroup, is_open: impl Fn(Entity) -> Option<bool>) -> bool {
    all_doors_open(group.doors.iter().filter_map(|door| is_open(*door)))
}

/// Open a group unless it is fully open, in which case close it.
pub fn apply_door_group_toggles(
    mut toggles: MessageReader<DoorGroupToggle>,
    groups: Query<&DoorGroup>,
    mut doors: Query<(&mut DoorAnimator, &Transform)>,
) {
    for toggle in toggles.read() {
        let Ok(group) = groups.get(toggle.group) else {
            warn!("Door group {:?} no longer exists", toggle.group);
            continue;
        };

        let target = !group_all_open(group, |e| doors.get(e).ok().map(|(d, _)| d.is_open()));
        for entity in &group.doors {
            let Ok((mut door, transform)) = doors.get_mut(*entity) else {
                continue;
            };
            if door.is_open() != target {
                door.toggle(transform.rotation);
                info!(
                    "{} door toggled to {}",
                    door.name,
                    if target { "Open" } else { "Closed" }
                );
            }
        }
    }
}
