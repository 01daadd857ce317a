// Hide console window on Windows for release builds (kiosk app).
// In debug builds, keep the console so panics/backtraces are visible.
#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use clap::Parser;
use std::path::{Path, PathBuf};

use kiosktour::tour3d::monitor::{
    apply_monitor_commands, handle_monitor_button_clicks, sync_monitor_ui,
    sync_open_monitor_button, MonitorBrowser, MonitorCommand,
};
use kiosktour::tour3d::navigation::{
    handle_nav_button_clicks, handle_navigation_commands, joystick_camera,
    navigation_keyboard_shortcuts, smooth_touch_camera, start_camera_tour,
    update_joystick_widget, CameraStepNavigator, JumpNavigator, NavigationCommand, RotationTouch,
    VirtualJoystick,
};
use kiosktour::tour3d::systems::{
    animate_doors, apply_door_group_toggles, apply_zone_events, button_hover_colors,
    detect_zone_presence, handle_component_button_clicks, handle_info_close_clicks,
    handle_interaction_button_clicks, handle_local_panel_clicks,
    handle_visibility_toggler_clicks, init_visibility_togglers, process_component_info_loads,
    refresh_interaction_labels, release_removed_zones, request_component_info, setup,
    show_component_info, update_monitor_access, validate_proximity_zones, CatalogSource,
    ComponentInfoLoader,
};
use kiosktour::tour3d::types::{
    joystick_mode_active, touch_mode_active, DoorGroupToggle, NavigationMode, SceneConfig,
    ShowComponentInfo, ZoneEvent,
};
use kiosktour_content::ComponentCatalog;

/// Kiosk Tour - interactive 3D control-cabinet walkthrough
#[derive(Parser, Debug)]
#[command(name = "kiosktour")]
#[command(
    author,
    version,
    about = "Kiosk Tour - guided 3D walkthrough of control cabinets with an in-scene document monitor"
)]
struct Cli {
    /// Asset root (MonitorContent/, ComponentMetadata/, scene file)
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// Scene description (RON), relative to the asset root
    #[arg(long, default_value = "scene.ron")]
    scene: PathBuf,

    /// Free-look controller
    #[arg(long, value_enum, default_value_t = NavigationMode::Joystick)]
    nav: NavigationMode,

    /// Component catalog path (relative to the asset root) or http(s) URL
    #[arg(long)]
    catalog: Option<String>,

    /// Window width
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Window height
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Log filter passed to the log plugin
    #[arg(long, default_value = "info,wgpu=error,naga=warn")]
    log_filter: String,
}

fn catalog_source(cli: &Cli) -> CatalogSource {
    match &cli.catalog {
        Some(value) => CatalogSource::from_arg(value, &cli.assets),
        None => CatalogSource::File(ComponentCatalog::default_path(&cli.assets)),
    }
}

fn scene_path(cli: &Cli) -> PathBuf {
    if cli.scene.is_absolute() {
        cli.scene.clone()
    } else {
        cli.assets.join(&cli.scene)
    }
}

/// Make the asset root absolute so the asset server and the on-disk content loaders
/// agree on it regardless of the working directory.
fn resolve_asset_root(cli: &mut Cli) -> Option<std::io::Error> {
    match std::path::absolute(&cli.assets) {
        Ok(path) => {
            cli.assets = path;
            None
        }
        Err(e) => Some(e),
    }
}

fn main() {
    let cli = Cli::parse();
    run_tour(cli);
}

fn run_tour(mut cli: Cli) {
    let resolve_error = resolve_asset_root(&mut cli);
    let mut app = App::new();

    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Kiosk Tour".to_string(),
                    resolution: (cli.width, cli.height).into(),
                    ..default()
                }),
                ..default()
            })
            .set(AssetPlugin {
                file_path: asset_dir_string(&cli.assets),
                ..default()
            })
            .set(bevy::log::LogPlugin {
                level: bevy::log::Level::INFO,
                filter: cli.log_filter.clone(),
                ..default()
            }),
    )
    .add_plugins(RapierPhysicsPlugin::<NoUserData>::default());

    // Plugins are up, so the log macros below reach the console.
    if let Some(e) = resolve_error {
        warn!(
            "Could not make asset root {} absolute ({}), using it as given",
            cli.assets.display(),
            e
        );
    }
    info!("Asset root: {}", cli.assets.display());
    let config = SceneConfig::load_or_default(&scene_path(&cli));
    let browser = MonitorBrowser::load(&cli.assets, &config.monitor);
    let source = catalog_source(&cli);
    info!("Component catalog: {}", source.describe());

    app.add_message::<NavigationCommand>()
        .add_message::<MonitorCommand>()
        .add_message::<ZoneEvent>()
        .add_message::<DoorGroupToggle>()
        .add_message::<ShowComponentInfo>()
        .insert_resource(cli.nav)
        .insert_resource(CameraStepNavigator::from_config(&config.camera_steps))
        .insert_resource(JumpNavigator::from_config(&config.jump_targets))
        .insert_resource(browser)
        .insert_resource(VirtualJoystick::default())
        .insert_resource(RotationTouch::default())
        .insert_resource(ComponentInfoLoader::new(source))
        .insert_resource(config)
        .add_systems(
            Startup,
            (
                setup,
                (
                    start_camera_tour,
                    init_visibility_togglers,
                    validate_proximity_zones,
                ),
            )
                .chain(),
        )
        .add_systems(
            Update,
            (
                button_hover_colors,
                // Guided navigation
                (
                    handle_nav_button_clicks,
                    navigation_keyboard_shortcuts,
                    handle_navigation_commands,
                )
                    .chain(),
                // Free look
                smooth_touch_camera.run_if(touch_mode_active),
                (joystick_camera, update_joystick_widget)
                    .chain()
                    .run_if(joystick_mode_active),
            ),
        )
        .add_systems(
            Update,
            (
                // Proximity and doors
                (
                    detect_zone_presence,
                    apply_zone_events,
                    release_removed_zones,
                    update_monitor_access,
                )
                    .chain(),
                (
                    handle_interaction_button_clicks,
                    handle_local_panel_clicks,
                    handle_visibility_toggler_clicks,
                ),
                apply_door_group_toggles,
                animate_doors,
                refresh_interaction_labels,
            )
                .chain(),
        )
        .add_systems(
            Update,
            (
                handle_monitor_button_clicks,
                apply_monitor_commands,
                sync_monitor_ui,
                sync_open_monitor_button,
            )
                .chain()
                .after(update_monitor_access),
        )
        .add_systems(
            Update,
            (
                (
                    handle_component_button_clicks,
                    request_component_info,
                    process_component_info_loads,
                    show_component_info,
                )
                    .chain(),
                handle_info_close_clicks,
            ),
        )
        .run();
}

fn asset_dir_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["kiosktour"]);
        assert_eq!(cli.assets, PathBuf::from("assets"));
        assert_eq!(cli.nav, NavigationMode::Joystick);
        assert_eq!(scene_path(&cli), PathBuf::from("assets").join("scene.ron"));
        assert_eq!(
            catalog_source(&cli),
            CatalogSource::File(PathBuf::from("assets/ComponentMetadata/cabinetData.json"))
        );
    }

    #[test]
    fn test_asset_root_is_made_absolute() {
        let mut cli = Cli::parse_from(["kiosktour", "--assets", "content"]);
        assert!(resolve_asset_root(&mut cli).is_none());
        assert!(cli.assets.is_absolute());
        assert!(cli.assets.ends_with("content"));
        assert_eq!(
            std::env::current_dir().unwrap().join("content"),
            cli.assets
        );
        assert!(scene_path(&cli).is_absolute());
        assert_eq!(
            catalog_source(&cli),
            CatalogSource::File(cli.assets.join("ComponentMetadata/cabinetData.json"))
        );
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "kiosktour",
            "--assets",
            "content",
            "--nav",
            "touch",
            "--catalog",
            "https://example.com/cabinetData.json",
        ]);
        assert_eq!(cli.nav, NavigationMode::Touch);
        assert_eq!(
            catalog_source(&cli),
            CatalogSource::Url("https://example.com/cabinetData.json".into())
        );
    }
}
