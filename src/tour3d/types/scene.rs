//! Scene description
//!
//! The room is described in RON (`assets/scene.ron` by default). Every field has a
//! default so a partial file only overrides what it names, and `SceneConfig::default()`
//! is a complete demo room on its own.

use std::path::{Path, PathBuf};

use bevy::prelude::*;
use kiosktour_content::{LayoutConfig, DEFAULT_CLICK_COOLDOWN_SECS};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::PlayerFilter;

#[derive(Debug, Error)]
pub enum SceneConfigError {
    #[error("failed to read scene file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse scene file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Rotation from yaw/pitch in degrees (yaw around world up, then pitch).
pub fn yaw_pitch_rotation(yaw_deg: f32, pitch_deg: f32) -> Quat {
    Quat::from_euler(EulerRot::YXZ, yaw_deg.to_radians(), pitch_deg.to_radians(), 0.0)
}

/// A named camera rig pose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaypointConfig {
    pub name: String,
    pub position: [f32; 3],
    pub yaw_deg: f32,
    pub pitch_deg: f32,
}

impl Default for WaypointConfig {
    fn default() -> Self {
        Self {
            name: "Start".to_string(),
            position: [0.0, 1.6, 6.0],
            yaw_deg: 0.0,
            pitch_deg: 0.0,
        }
    }
}

impl WaypointConfig {
    pub fn new(name: &str, position: [f32; 3], yaw_deg: f32, pitch_deg: f32) -> Self {
        Self {
            name: name.to_string(),
            position,
            yaw_deg,
            pitch_deg,
        }
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(Vec3::from_array(self.position))
            .with_rotation(yaw_pitch_rotation(self.yaw_deg, self.pitch_deg))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DoorLayout {
    /// One door hinged on the left edge.
    Single,
    /// Two doors hinged on the outer edges.
    #[default]
    Double,
}

/// How the visitor opens a cabinet's doors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CabinetInteraction {
    /// Shared on-screen button, bound while in range.
    #[default]
    GlobalButton,
    /// A panel of its own, shown while in range.
    LocalPanel,
    /// Doors only react to visibility togglers.
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CabinetConfig {
    pub name: String,
    pub position: [f32; 3],
    pub yaw_deg: f32,
    /// Width, height, depth of the cabinet body.
    pub size: [f32; 3],
    pub color: [f32; 3],
    pub doors: DoorLayout,
    pub interaction: CabinetInteraction,
    pub open_label: String,
    pub close_label: String,
    /// How far each door swings open.
    pub swing_deg: f32,
    pub swing_duration: f32,
    /// Half extents of the proximity sensor, centered in front of the cabinet.
    pub zone_half_extents: [f32; 3],
    pub filter: PlayerFilter,
}

impl Default for CabinetConfig {
    fn default() -> Self {
        Self {
            name: "Cabinet".to_string(),
            position: [0.0, 0.0, 0.0],
            yaw_deg: 0.0,
            size: [1.2, 2.0, 0.6],
            color: [0.55, 0.57, 0.6],
            doors: DoorLayout::Double,
            interaction: CabinetInteraction::GlobalButton,
            open_label: "Open Cabinet".to_string(),
            close_label: "Close Cabinet".to_string(),
            swing_deg: 100.0,
            swing_duration: 1.0,
            zone_half_extents: [1.2, 1.5, 1.2],
            filter: PlayerFilter::default(),
        }
    }
}

/// A button that hides/shows the doors of the named cabinets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TogglerConfig {
    pub name: String,
    pub cabinets: Vec<String>,
    pub hide_label: String,
    pub show_label: String,
}

impl Default for TogglerConfig {
    fn default() -> Self {
        Self {
            name: "All Doors".to_string(),
            cabinets: Vec::new(),
            hide_label: "Hide Doors".to_string(),
            show_label: "Show Doors".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub position: [f32; 3],
    pub yaw_deg: f32,
    pub trigger_half_extents: [f32; 3],
    pub max_facing_angle_deg: f32,
    pub default_category: String,
    pub layout: LayoutConfig,
    pub click_cooldown_secs: f64,
    pub filter: PlayerFilter,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            position: [4.0, 1.4, -2.0],
            yaw_deg: 0.0,
            trigger_half_extents: [1.5, 1.5, 2.0],
            max_facing_angle_deg: 45.0,
            default_category: "Research Papers".to_string(),
            layout: LayoutConfig::default(),
            click_cooldown_secs: DEFAULT_CLICK_COOLDOWN_SECS,
            filter: PlayerFilter::default(),
        }
    }
}

impl MonitorConfig {
    /// Direction the visitor must look along to use the monitor (towards its screen).
    pub fn facing(&self) -> Vec3 {
        yaw_pitch_rotation(self.yaw_deg, 0.0) * Vec3::NEG_Z
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentButtonConfig {
    pub id: String,
    pub label: String,
}

impl Default for ComponentButtonConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            label: "Component".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JoystickConfig {
    pub move_speed: f32,
    /// Degrees per pixel per second of horizontal drag.
    pub rotation_speed: f32,
    pub deadzone: f32,
}

impl Default for JoystickConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            rotation_speed: 150.0,
            deadzone: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TouchConfig {
    pub pan_speed: f32,
    pub zoom_speed: f32,
    pub zoom_smooth_speed: f32,
    pub pan_smooth_speed: f32,
    /// Field of view bounds in degrees.
    pub min_zoom: f32,
    pub max_zoom: f32,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            pan_speed: 0.005,
            zoom_speed: 0.01,
            zoom_smooth_speed: 5.0,
            pan_smooth_speed: 10.0,
            min_zoom: 20.0,
            max_zoom: 75.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub tag: String,
    pub layer: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            tag: "Player".to_string(),
            layer: 0,
        }
    }
}

/// The whole room.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Floor width and depth.
    pub room_size: [f32; 2],
    pub camera_steps: Vec<WaypointConfig>,
    pub jump_targets: Vec<WaypointConfig>,
    pub cabinets: Vec<CabinetConfig>,
    pub togglers: Vec<TogglerConfig>,
    pub monitor: MonitorConfig,
    pub component_buttons: Vec<ComponentButtonConfig>,
    pub joystick: JoystickConfig,
    pub touch: TouchConfig,
    pub player: PlayerConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        let cabinet = |name: &str, x: f32, doors: DoorLayout, interaction: CabinetInteraction| {
            CabinetConfig {
                name: name.to_string(),
                position: [x, 0.0, -3.0],
                doors,
                interaction,
                ..default()
            }
        };

        Self {
            room_size: [14.0, 10.0],
            camera_steps: vec![
                WaypointConfig::new("Entrance", [0.0, 1.6, 5.0], 0.0, -5.0),
                WaypointConfig::new("Cabinet Row", [-1.5, 1.6, 0.5], 0.0, -10.0),
                WaypointConfig::new("Main Cabinet", [0.0, 1.6, -0.8], 0.0, -10.0),
                WaypointConfig::new("Monitor", [4.0, 1.6, 0.5], 0.0, -5.0),
            ],
            jump_targets: vec![
                WaypointConfig::new("Overview", [0.0, 3.0, 6.0], 0.0, -20.0),
                WaypointConfig::new("Left Cabinet", [-3.0, 1.6, -0.8], 0.0, -10.0),
                WaypointConfig::new("Main Cabinet", [0.0, 1.6, -0.8], 0.0, -10.0),
                WaypointConfig::new("Monitor", [4.0, 1.6, 0.5], 0.0, -5.0),
            ],
            cabinets: vec![
                cabinet(
                    "Left Cabinet",
                    -3.0,
                    DoorLayout::Single,
                    CabinetInteraction::LocalPanel,
                ),
                CabinetConfig {
                    open_label: "Open Doors".to_string(),
                    close_label: "Close Doors".to_string(),
                    ..cabinet(
                        "Main Cabinet",
                        0.0,
                        DoorLayout::Double,
                        CabinetInteraction::GlobalButton,
                    )
                },
                CabinetConfig {
                    filter: PlayerFilter::LayerMask(1),
                    ..cabinet(
                        "Right Cabinet",
                        2.0,
                        DoorLayout::Double,
                        CabinetInteraction::GlobalButton,
                    )
                },
            ],
            togglers: vec![TogglerConfig {
                name: "All Doors".to_string(),
                cabinets: vec![
                    "Left Cabinet".to_string(),
                    "Main Cabinet".to_string(),
                    "Right Cabinet".to_string(),
                ],
                ..default()
            }],
            monitor: MonitorConfig::default(),
            component_buttons: vec![
                ComponentButtonConfig {
                    id: "PLC-01".to_string(),
                    label: "PLC".to_string(),
                },
                ComponentButtonConfig {
                    id: "PSU-01".to_string(),
                    label: "Power Supply".to_string(),
                },
            ],
            joystick: JoystickConfig::default(),
            touch: TouchConfig::default(),
            player: PlayerConfig::default(),
        }
    }
}

impl SceneConfig {
    pub fn from_ron_str(text: &str, origin: &Path) -> Result<Self, SceneConfigError> {
        ron::from_str(text).map_err(|source| SceneConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, SceneConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| SceneConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&text, path)
    }

    /// Load `path`, falling back to the built-in room when the file is missing or broken.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => {
                info!(
                    "Loaded scene {} ({} cabinets, {} steps)",
                    path.display(),
                    config.cabinets.len(),
                    config.camera_steps.len()
                );
                config
            }
            Err(SceneConfigError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                warn!(
                    "Scene file {} not found, using the built-in room",
                    path.display()
                );
                Self::default()
            }
            Err(e) => {
                error!("{}; using the built-in room", e);
                Self::default()
            }
        }
    }

    pub fn cabinet(&self, name: &str) -> Option<&CabinetConfig> {
        self.cabinets.iter().find(|c| c.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_room_is_usable() {
        let config = SceneConfig::default();
        assert!(!config.camera_steps.is_empty());
        assert!(!config.jump_targets.is_empty());
        assert_eq!(config.monitor.default_category, "Research Papers");
        for toggler in &config.togglers {
            for name in &toggler.cabinets {
                assert!(config.cabinet(name).is_some(), "unknown cabinet {name}");
            }
        }
    }

    #[test]
    fn test_partial_ron_keeps_defaults() {
        let text = r#"(
            cabinets: [(name: "Only", doors: Single, interaction: LocalPanel)],
            joystick: (move_speed: 2.5),
        )"#;
        let config = SceneConfig::from_ron_str(text, Path::new("scene.ron")).unwrap();
        assert_eq!(config.cabinets.len(), 1);
        assert_eq!(config.cabinets[0].doors, DoorLayout::Single);
        assert_eq!(config.cabinets[0].open_label, "Open Cabinet");
        assert_eq!(config.joystick.move_speed, 2.5);
        assert_eq!(config.joystick.deadzone, 0.1);
        assert_eq!(config.touch, TouchConfig::default());
    }

    #[test]
    fn test_player_filter_in_ron() {
        let text = r#"(cabinets: [(name: "A", filter: LayerMask(8))])"#;
        let config = SceneConfig::from_ron_str(text, Path::new("scene.ron")).unwrap();
        assert_eq!(config.cabinets[0].filter, PlayerFilter::LayerMask(8));
    }

    #[test]
    fn test_parse_error_names_file() {
        let err = SceneConfig::from_ron_str("(cabinets: [", Path::new("broken.ron")).unwrap_err();
        assert!(matches!(err, SceneConfigError::Parse { .. }));
        assert!(err.to_string().contains("broken.ron"));
    }

    #[test]
    fn test_bundled_scene_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/scene.ron");
        let config = SceneConfig::load(&path).unwrap();
        assert_eq!(config.cabinets.len(), 3);
        assert_eq!(config.camera_steps.len(), 4);
        for toggler in &config.togglers {
            for name in &toggler.cabinets {
                assert!(config.cabinet(name).is_some(), "unknown cabinet {name}");
            }
        }
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let path = std::env::temp_dir().join("kiosktour-no-such-scene.ron");
        assert_eq!(SceneConfig::load_or_default(&path), SceneConfig::default());
    }

    #[test]
    fn test_monitor_facing_follows_yaw() {
        let mut monitor = MonitorConfig::default();
        assert!(monitor.facing().abs_diff_eq(Vec3::NEG_Z, 1e-5));
        monitor.yaw_deg = 90.0;
        assert!(monitor.facing().abs_diff_eq(Vec3::NEG_X, 1e-5));
    }
}
