//! Scene setup system
//!
//! Builds the room, camera rig, cabinets, monitor and every UI panel from the
//! loaded `SceneConfig`.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::info_panel::{spawn_component_buttons, spawn_info_panel};
use crate::tour3d::monitor::{spawn_monitor_ui, MonitorBrowser};
use crate::tour3d::navigation::{
    spawn_joystick_widget, spawn_navigation_bar, JumpNavigator, SmoothCameraController,
};
use crate::tour3d::types::*;

/// Field of view the camera starts with, in degrees.
pub const DEFAULT_FOV_DEG: f32 = 60.0;
const PLAYER_RADIUS: f32 = 0.3;
const DOOR_THICKNESS: f32 = 0.04;
const WALL_HEIGHT: f32 = 3.0;

/// Door pivots of one spawned cabinet
#[derive(Debug, Clone)]
pub struct SpawnedCabinet {
    pub name: String,
    pub doors: Vec<Entity>,
    pub group: Entity,
}

fn vec3(v: [f32; 3]) -> Vec3 {
    Vec3::from_array(v)
}

fn sensor_bundle(half_extents: Vec3) -> impl Bundle {
    (
        Collider::cuboid(half_extents.x, half_extents.y, half_extents.z),
        Sensor,
        ActiveEvents::COLLISION_EVENTS,
        ActiveCollisionTypes::all(),
    )
}

/// Main setup system - spawns the whole scene
pub fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<SceneConfig>,
    mode: Res<NavigationMode>,
    jumps: Res<JumpNavigator>,
    browser: Res<MonitorBrowser>,
) {
    spawn_camera_rig(&mut commands, &config, *mode);
    spawn_room(&mut commands, &mut meshes, &mut materials, &config);

    let cabinets: Vec<SpawnedCabinet> = config
        .cabinets
        .iter()
        .map(|cabinet| spawn_cabinet(&mut commands, &mut meshes, &mut materials, cabinet))
        .collect();

    spawn_cabinet_interactions(&mut commands, &config, &cabinets);
    spawn_visibility_togglers(&mut commands, &config.togglers, &cabinets);
    spawn_monitor(&mut commands, &mut meshes, &mut materials, &config.monitor);

    spawn_navigation_bar(&mut commands, &jumps, *mode);
    if *mode == NavigationMode::Joystick {
        spawn_joystick_widget(&mut commands);
    }
    spawn_monitor_ui(&mut commands, &browser);
    spawn_component_buttons(&mut commands, &config.component_buttons);
    spawn_info_panel(&mut commands);

    info!(
        "Scene ready: {} cabinets, {} togglers, {:?} navigation",
        cabinets.len(),
        config.togglers.len(),
        *mode
    );
}

/// Camera rig: the player body the zones react to, with the camera as its child.
pub fn spawn_camera_rig(commands: &mut Commands, config: &SceneConfig, mode: NavigationMode) -> Entity {
    let transform = config
        .camera_steps
        .first()
        .map(WaypointConfig::transform)
        .unwrap_or_else(|| WaypointConfig::default().transform());

    let mut rig = commands.spawn((
        transform,
        Visibility::default(),
        CameraRig,
        Player {
            tag: config.player.tag.clone(),
            layer: config.player.layer,
        },
        RigidBody::KinematicPositionBased,
        Collider::ball(PLAYER_RADIUS),
        ActiveEvents::COLLISION_EVENTS,
        ActiveCollisionTypes::all(),
    ));

    rig.with_children(|rig| {
        rig.spawn((
            Camera3d::default(),
            Projection::Perspective(PerspectiveProjection {
                fov: DEFAULT_FOV_DEG.to_radians(),
                ..default()
            }),
            Transform::IDENTITY,
            MainCamera,
        ));
    });

    if mode == NavigationMode::Touch {
        rig.insert(SmoothCameraController::new(
            &transform,
            DEFAULT_FOV_DEG,
            config.touch.clone(),
        ));
    }

    rig.id()
}

fn spawn_room(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    config: &SceneConfig,
) {
    commands.spawn((
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 400.0,
        ..default()
    });

    let [width, depth] = config.room_size;
    let floor_mat = materials.add(StandardMaterial {
        base_color: Color::srgb(0.32, 0.33, 0.35),
        perceptual_roughness: 0.9,
        ..default()
    });
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(width, 0.1, depth))),
        MeshMaterial3d(floor_mat),
        Transform::from_xyz(0.0, -0.05, 0.0),
        Collider::cuboid(width / 2.0, 0.05, depth / 2.0),
        RigidBody::Fixed,
    ));

    let wall_mat = materials.add(StandardMaterial {
        base_color: Color::srgb(0.78, 0.79, 0.8),
        ..default()
    });
    let y = WALL_HEIGHT / 2.0;
    for (pos, size) in [
        (Vec3::new(0.0, y, -depth / 2.0), Vec3::new(width, WALL_HEIGHT, 0.1)),
        (Vec3::new(0.0, y, depth / 2.0), Vec3::new(width, WALL_HEIGHT, 0.1)),
        (Vec3::new(-width / 2.0, y, 0.0), Vec3::new(0.1, WALL_HEIGHT, depth)),
        (Vec3::new(width / 2.0, y, 0.0), Vec3::new(0.1, WALL_HEIGHT, depth)),
    ] {
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
            MeshMaterial3d(wall_mat.clone()),
            Transform::from_translation(pos),
        ));
    }
}

/// Spawn a cabinet body with hinged doors and the group that toggles them.
pub fn spawn_cabinet(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    config: &CabinetConfig,
) -> SpawnedCabinet {
    let size = vec3(config.size);
    let body_mat = materials.add(StandardMaterial {
        base_color: Color::srgb(config.color[0], config.color[1], config.color[2]),
        metallic: 0.4,
        perceptual_roughness: 0.5,
        ..default()
    });
    let door_mat = materials.add(StandardMaterial {
        base_color: Color::srgb(
            config.color[0] * 0.85,
            config.color[1] * 0.85,
            config.color[2] * 0.85,
        ),
        metallic: 0.5,
        perceptual_roughness: 0.4,
        ..default()
    });

    let cabinet = commands
        .spawn((
            Transform::from_translation(vec3(config.position))
                .with_rotation(yaw_pitch_rotation(config.yaw_deg, 0.0)),
            Visibility::default(),
            Name::new(config.name.clone()),
        ))
        .id();

    commands.entity(cabinet).with_children(|parent| {
        parent.spawn((
            Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
            MeshMaterial3d(body_mat),
            Transform::from_xyz(0.0, size.y / 2.0, 0.0),
        ));
    });

    // (side, hinge x, signed door width, outward swing sign)
    let front = size.z / 2.0 + DOOR_THICKNESS / 2.0;
    let leaves: Vec<(&str, f32, f32, f32)> = match config.doors {
        DoorLayout::Single => vec![("door", -size.x / 2.0, size.x, -1.0)],
        DoorLayout::Double => vec![
            ("left door", -size.x / 2.0, size.x / 2.0, -1.0),
            ("right door", size.x / 2.0, -size.x / 2.0, 1.0),
        ],
    };

    let swing = config.swing_deg.to_radians();
    let mut doors = Vec::with_capacity(leaves.len());
    for (side, hinge_x, door_width, sign) in leaves {
        let pivot = commands
            .spawn((
                Transform::from_xyz(hinge_x, size.y / 2.0, front),
                Visibility::default(),
                DoorAnimator::new(
                    format!("{} {}", config.name, side),
                    Quat::IDENTITY,
                    Quat::from_rotation_y(sign * swing),
                    config.swing_duration,
                ),
                ChildOf(cabinet),
            ))
            .id();
        commands.entity(pivot).with_children(|hinge| {
            hinge.spawn((
                Mesh3d(meshes.add(Cuboid::new(door_width.abs(), size.y * 0.96, DOOR_THICKNESS))),
                MeshMaterial3d(door_mat.clone()),
                Transform::from_xyz(door_width / 2.0, 0.0, 0.0),
            ));
        });
        doors.push(pivot);
    }

    let group = commands
        .spawn(
            DoorGroup::new(config.name.clone(), doors.clone())
                .with_labels(config.open_label.clone(), config.close_label.clone()),
        )
        .id();

    SpawnedCabinet {
        name: config.name.clone(),
        doors,
        group,
    }
}

/// Zones, the shared interaction button and per-door panels.
fn spawn_cabinet_interactions(
    commands: &mut Commands,
    config: &SceneConfig,
    cabinets: &[SpawnedCabinet],
) {
    let mut local_panels = 0usize;
    let mut needs_global_button = false;

    for (cabinet, spawned) in config.cabinets.iter().zip(cabinets) {
        let action = match cabinet.interaction {
            CabinetInteraction::None => continue,
            CabinetInteraction::GlobalButton => {
                needs_global_button = true;
                ZoneAction::GlobalButton {
                    group: spawned.group,
                }
            }
            CabinetInteraction::LocalPanel => {
                let panel = spawn_local_panel(commands, cabinet, spawned.group, local_panels);
                local_panels += 1;
                ZoneAction::LocalPanel {
                    panel,
                    group: spawned.group,
                }
            }
        };

        let half = vec3(cabinet.zone_half_extents);
        let rotation = yaw_pitch_rotation(cabinet.yaw_deg, 0.0);
        let center = vec3(cabinet.position) + rotation * Vec3::new(0.0, half.y, half.z);
        commands.spawn((
            Transform::from_translation(center).with_rotation(rotation),
            ProximityZone::new(cabinet.name.clone(), cabinet.filter.clone(), action),
            sensor_bundle(half),
        ));
    }

    if needs_global_button {
        commands
            .spawn((
                Button,
                Node {
                    display: Display::None,
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(84.0),
                    left: Val::Percent(50.0),
                    margin: UiRect::left(Val::Px(-90.0)),
                    ..button_node(Val::Px(180.0))
                },
                BackgroundColor(BUTTON_BG),
                HoverButton,
                InteractionButton::default(),
                ZIndex(15),
            ))
            .with_children(|b| {
                b.spawn((
                    Text::new(""),
                    label_font(18.0),
                    TextColor(TEXT_COLOR),
                    InteractionButtonLabel,
                ));
            });
    }
}

fn spawn_local_panel(commands: &mut Commands, cabinet: &CabinetConfig, group: Entity, slot: usize) -> Entity {
    let panel = commands
        .spawn((
            Node {
                display: Display::None,
                position_type: PositionType::Absolute,
                left: Val::Px(16.0),
                bottom: Val::Px(84.0 + slot as f32 * 64.0),
                flex_direction: FlexDirection::Row,
                align_items: AlignItems::Center,
                padding: UiRect::all(Val::Px(6.0)),
                ..default()
            },
            BackgroundColor(PANEL_BG),
            LocalDoorPanel { group },
            ZIndex(15),
        ))
        .id();

    let title = cabinet.name.clone();
    let caption = cabinet.open_label.clone();
    commands.entity(panel).with_children(|p| {
        p.spawn((Text::new(title), label_font(15.0), TextColor(DIM_TEXT_COLOR)));
        p.spawn((
            Button,
            button_node(Val::Auto),
            BackgroundColor(BUTTON_BG),
            HoverButton,
            LocalPanelButton { panel },
        ))
        .with_children(|b| {
            b.spawn((
                Text::new(caption),
                label_font(16.0),
                TextColor(TEXT_COLOR),
                LocalPanelLabel { panel },
            ));
        });
    });

    panel
}

/// One button per toggler, doors resolved by cabinet name.
fn spawn_visibility_togglers(
    commands: &mut Commands,
    togglers: &[TogglerConfig],
    cabinets: &[SpawnedCabinet],
) {
    if togglers.is_empty() {
        return;
    }

    let column = commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            right: Val::Px(16.0),
            bottom: Val::Px(84.0),
            flex_direction: FlexDirection::Column,
            ..default()
        })
        .id();

    for toggler in togglers {
        let mut doors = Vec::new();
        for name in &toggler.cabinets {
            match cabinets.iter().find(|c| &c.name == name) {
                Some(cabinet) => doors.extend(cabinet.doors.iter().copied()),
                None => warn!("Toggler '{}' references unknown cabinet '{}'", toggler.name, name),
            }
        }

        let component = VisibilityToggler::new(toggler.name.clone(), doors)
            .with_labels(toggler.hide_label.clone(), toggler.show_label.clone());
        let caption = component.label().to_string();
        commands
            .spawn((
                Button,
                button_node(Val::Px(160.0)),
                BackgroundColor(BUTTON_BG),
                HoverButton,
                component,
                ChildOf(column),
            ))
            .with_children(|b| {
                b.spawn((
                    Text::new(caption),
                    label_font(16.0),
                    TextColor(TEXT_COLOR),
                    ButtonLabel,
                ));
            });
    }
}

/// The monitor prop and the zone that gates the "Open Monitor" button.
fn spawn_monitor(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    config: &MonitorConfig,
) {
    let rotation = yaw_pitch_rotation(config.yaw_deg, 0.0);
    let position = vec3(config.position);

    let frame_mat = materials.add(StandardMaterial {
        base_color: Color::srgb(0.08, 0.08, 0.09),
        ..default()
    });
    let screen_mat = materials.add(StandardMaterial {
        base_color: Color::srgb(0.1, 0.2, 0.3),
        emissive: LinearRgba::rgb(0.05, 0.12, 0.2),
        ..default()
    });

    commands
        .spawn((
            Transform::from_translation(position).with_rotation(rotation),
            Visibility::default(),
            Name::new("Monitor"),
        ))
        .with_children(|monitor| {
            monitor.spawn((
                Mesh3d(meshes.add(Cuboid::new(1.6, 1.0, 0.08))),
                MeshMaterial3d(frame_mat.clone()),
                Transform::IDENTITY,
            ));
            monitor.spawn((
                Mesh3d(meshes.add(Cuboid::new(1.5, 0.9, 0.01))),
                MeshMaterial3d(screen_mat),
                Transform::from_xyz(0.0, 0.0, 0.045),
            ));
            monitor.spawn((
                Mesh3d(meshes.add(Cuboid::new(0.08, position.y, 0.08))),
                MeshMaterial3d(frame_mat),
                Transform::from_xyz(0.0, -position.y / 2.0, -0.06),
            ));
        });

    let half = vec3(config.trigger_half_extents);
    let center = position + rotation * Vec3::new(0.0, 0.0, half.z);
    commands.spawn((
        Transform::from_translation(center).with_rotation(rotation),
        ProximityZone::new(
            "Monitor",
            config.filter.clone(),
            ZoneAction::MonitorAccess {
                facing: config.facing(),
                max_angle_deg: config.max_facing_angle_deg,
            },
        ),
        sensor_bundle(half),
    ));
}
