//! Proximity systems
//!
//! Rapier sensor events become zone occupancy, and occupancy drives the
//! interaction button, per-door panels and monitor access.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::doors::group_all_open;
use crate::tour3d::types::*;

/// Startup: deactivate zones that cannot work and hide everything they reveal.
#[allow(clippy::type_complexity)]
pub fn validate_proximity_zones(
    mut commands: Commands,
    zones: Query<(Entity, &ProximityZone, Has<Collider>, Has<Sensor>)>,
    groups: Query<(), With<DoorGroup>>,
    panels: Query<(), With<LocalDoorPanel>>,
    mut open_buttons: Query<(&mut OpenMonitorButton, &mut Node), Without<LocalDoorPanel>>,
    mut panel_nodes: Query<&mut Node, With<LocalDoorPanel>>,
) {
    for (entity, zone, has_collider, has_sensor) in zones.iter() {
        if !has_collider {
            error!(
                "Proximity zone '{}' is missing a collider and will not be activated",
                zone.name
            );
            commands.entity(entity).insert(Deactivated);
            continue;
        }
        if !has_sensor {
            warn!(
                "Proximity zone '{}' collider is not a sensor, detection will not work correctly",
                zone.name
            );
        }

        let valid = match &zone.action {
            ZoneAction::GlobalButton { group } => {
                let ok = groups.contains(*group);
                if !ok {
                    error!("Proximity zone '{}' references a missing door group", zone.name);
                }
                ok
            }
            ZoneAction::LocalPanel { panel, group } => {
                let ok = groups.contains(*group) && panels.contains(*panel);
                if !ok {
                    error!(
                        "Proximity zone '{}' references a missing door group or panel",
                        zone.name
                    );
                }
                ok
            }
            ZoneAction::MonitorAccess { .. } => {
                if open_buttons.is_empty() {
                    warn!("Monitor zone '{}' has no Open Monitor button", zone.name);
                }
                true
            }
        };
        if !valid {
            commands.entity(entity).insert(Deactivated);
        }
    }

    for (mut button, mut node) in open_buttons.iter_mut() {
        button.interactable = false;
        set_displayed(&mut node, false);
        debug!("Open Monitor button forced to inactive state at startup");
    }
    for mut node in panel_nodes.iter_mut() {
        set_displayed(&mut node, false);
    }
}

/// Resolve a collision pair into (zone, player) if it is one.
fn zone_and_player(
    a: Entity,
    b: Entity,
    zones: &Query<&mut ProximityZone, Without<Deactivated>>,
    players: &Query<&Player>,
) -> Option<(Entity, Entity)> {
    if zones.contains(a) && players.contains(b) {
        Some((a, b))
    } else if zones.contains(b) && players.contains(a) {
        Some((b, a))
    } else {
        None
    }
}

/// Track which zones the visitor stands in.
pub fn detect_zone_presence(
    mut collisions: MessageReader<CollisionEvent>,
    mut zones: Query<&mut ProximityZone, Without<Deactivated>>,
    players: Query<&Player>,
    mut zone_events: MessageWriter<ZoneEvent>,
) {
    for collision in collisions.read() {
        let (a, b, started) = match *collision {
            CollisionEvent::Started(a, b, _) => (a, b, true),
            CollisionEvent::Stopped(a, b, _) => (a, b, false),
        };
        let Some((zone_entity, player_entity)) = zone_and_player(a, b, &zones, &players) else {
            continue;
        };
        let (Ok(mut zone), Ok(player)) = (zones.get_mut(zone_entity), players.get(player_entity))
        else {
            continue;
        };
        if !zone.filter.matches(player) {
            continue;
        }

        if started {
            if zone.enter(player_entity) {
                zone_events.write(ZoneEvent::Entered {
                    zone: zone_entity,
                    player: player_entity,
                });
            }
        } else if zone.exit(player_entity) {
            zone_events.write(ZoneEvent::Exited {
                zone: zone_entity,
                player: player_entity,
            });
        }
    }
}

/// Show, bind, hide and unbind UI as the visitor enters and leaves zones.
pub fn apply_zone_events(
    mut zone_events: MessageReader<ZoneEvent>,
    zones: Query<&ProximityZone>,
    mut interaction_buttons: Query<(&mut InteractionButton, &mut Node), Without<LocalDoorPanel>>,
    mut panels: Query<&mut Node, With<LocalDoorPanel>>,
) {
    for event in zone_events.read() {
        let (zone_entity, entered) = match *event {
            ZoneEvent::Entered { zone, .. } => (zone, true),
            ZoneEvent::Exited { zone, .. } => (zone, false),
        };
        let Ok(zone) = zones.get(zone_entity) else {
            continue;
        };

        match &zone.action {
            ZoneAction::GlobalButton { .. } => {
                for (mut button, mut node) in interaction_buttons.iter_mut() {
                    if entered {
                        button.bound = Some(zone_entity);
                        set_displayed(&mut node, true);
                        info!("Player entered range of {}. UI shown and linked.", zone.name);
                    } else if button.bound == Some(zone_entity) {
                        button.bound = None;
                        set_displayed(&mut node, false);
                        info!("Player exited range of {}. UI hidden and unlinked.", zone.name);
                    }
                }
            }
            ZoneAction::LocalPanel { panel, .. } => {
                if let Ok(mut node) = panels.get_mut(*panel) {
                    set_displayed(&mut node, entered);
                    info!(
                        "Player {} interaction range for door: {}",
                        if entered { "entered" } else { "exited" },
                        zone.name
                    );
                }
            }
            ZoneAction::MonitorAccess { .. } => {
                info!(
                    "Player {} monitor range",
                    if entered { "entered" } else { "exited" }
                );
            }
        }
    }
}

/// The monitor may be opened only while in range and looking at it.
pub fn update_monitor_access(
    zones: Query<&ProximityZone, Without<Deactivated>>,
    players: Query<&GlobalTransform, With<Player>>,
    mut open_buttons: Query<&mut OpenMonitorButton>,
) {
    let mut allowed = false;
    for zone in zones.iter() {
        let ZoneAction::MonitorAccess {
            facing,
            max_angle_deg,
        } = zone.action
        else {
            continue;
        };
        if !zone.is_occupied() {
            continue;
        }
        allowed |= players
            .iter()
            .any(|player| is_facing(player.forward().as_vec3(), facing, max_angle_deg));
    }

    for mut button in open_buttons.iter_mut() {
        if button.interactable != allowed {
            button.interactable = allowed;
        }
    }
}

/// Despawned or deactivated zones give the shared button back.
pub fn release_removed_zones(
    mut removed: RemovedComponents<ProximityZone>,
    deactivated: Query<Entity, (Added<Deactivated>, With<ProximityZone>)>,
    mut interaction_buttons: Query<(&mut InteractionButton, &mut Node)>,
) {
    let gone: Vec<Entity> = removed.read().chain(deactivated.iter()).collect();
    if gone.is_empty() {
        return;
    }

    for (mut button, mut node) in interaction_buttons.iter_mut() {
        if button.bound.is_some_and(|zone| gone.contains(&zone)) {
            button.bound = None;
            set_displayed(&mut node, false);
            info!("Interaction zone disabled, UI hidden and unlinked");
        }
    }
}

/// The shared button toggles the door group of the zone it is bound to.
pub fn handle_interaction_button_clicks(
    buttons: Query<(&Interaction, &InteractionButton), Changed<Interaction>>,
    zones: Query<&ProximityZone, Without<Deactivated>>,
    mut toggles: MessageWriter<DoorGroupToggle>,
) {
    for (interaction, button) in buttons.iter() {
        if *interaction != Interaction::Pressed {
            continue;
        }
        let Some(zone) = button.bound.and_then(|zone| zones.get(zone).ok()) else {
            debug!("Interaction button pressed while unbound");
            continue;
        };
        if let ZoneAction::GlobalButton { group } = zone.action {
            toggles.write(DoorGroupToggle { group });
        }
    }
}

/// A per-door panel button only works while its panel is shown.
pub fn handle_local_panel_clicks(
    buttons: Query<(&Interaction, &LocalPanelButton), Changed<Interaction>>,
    panels: Query<(&LocalDoorPanel, &Node)>,
    mut toggles: MessageWriter<DoorGroupToggle>,
) {
    for (interaction, button) in buttons.iter() {
        if *interaction != Interaction::Pressed {
            continue;
        }
        let Ok((panel, node)) = panels.get(button.panel) else {
            continue;
        };
        if is_displayed(node) {
            toggles.write(DoorGroupToggle { group: panel.group });
        }
    }
}

/// Keep interaction captions in sync with the door state they control.
#[allow(clippy::type_complexity)]
pub fn refresh_interaction_labels(
    buttons: Query<(&InteractionButton, &Children)>,
    zones: Query<&ProximityZone>,
    groups: Query<&DoorGroup>,
    doors: Query<&DoorAnimator>,
    local_panels: Query<&LocalDoorPanel>,
    mut global_labels: Query<&mut Text, (With<InteractionButtonLabel>, Without<LocalPanelLabel>)>,
    mut local_labels: Query<(&LocalPanelLabel, &mut Text), Without<InteractionButtonLabel>>,
) {
    let is_open = |e: Entity| doors.get(e).ok().map(|d| d.is_open());
    let label_for = |group: Entity| -> Option<String> {
        let group = groups.get(group).ok()?;
        Some(group.label(group_all_open(group, is_open)).to_string())
    };

    for (button, children) in buttons.iter() {
        let Some(zone) = button.bound.and_then(|zone| zones.get(zone).ok()) else {
            continue;
        };
        let ZoneAction::GlobalButton { group } = zone.action else {
            continue;
        };
        let Some(label) = label_for(group) else {
            continue;
        };
        for child in children.iter() {
            if let Ok(mut text) = global_labels.get_mut(child) {
                if text.0 != label {
                    text.0 = label.clone();
                }
            }
        }
    }

    for (label, mut text) in local_labels.iter_mut() {
        let Some(caption) = local_panels
            .get(label.panel)
            .ok()
            .and_then(|panel| label_for(panel.group))
        else {
            continue;
        };
        if text.0 != caption {
            text.0 = caption;
        }
    }
}
