//! Monitor browser driven through buttons and commands in a headless app

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use bevy::prelude::*;

use kiosktour::tour3d::monitor::{
    apply_monitor_commands, handle_monitor_button_clicks, spawn_monitor_ui, sync_monitor_ui,
    sync_open_monitor_button, MonitorBrowser, MonitorButton, MonitorCommand, MonitorFileButton,
    MonitorFileList, MonitorPageText, MonitorPanel, MonitorScreen, MonitorScreenArea, MonitorView,
};
use kiosktour::tour3d::types::{is_displayed, MonitorConfig, OpenMonitorButton};

const INDEX: &str = r#"{ "categories": [
    { "name": "Research Papers", "files": [
        { "title": "Wiring Study", "resourcePath": "MonitorContent/Research/wiring" },
        { "title": "Empty Draft", "resourcePath": "MonitorContent/Research/draft" }
    ] },
    { "name": "ECAD Files", "folder": "ECAD", "files": [
        { "title": "Main Cabinet", "filename": "main_cabinet.pdf" }
    ] }
] }"#;

fn write_page(dir: &PathBuf, name: &str) {
    fs::create_dir_all(dir).unwrap();
    image::RgbaImage::new(4, 3).save(dir.join(name)).unwrap();
}

fn asset_root(name: &str) -> PathBuf {
    let root = std::env::temp_dir().join(format!(
        "kiosktour_monitor_{}_{}",
        name,
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&root);
    let content = root.join("MonitorContent");
    fs::create_dir_all(&content).unwrap();
    fs::write(content.join("monitorIndex.json"), INDEX).unwrap();

    let wiring = content.join("Research").join("wiring");
    write_page(&wiring, "page_001.png");
    write_page(&wiring, "page_002.png");
    write_page(&wiring, "page_003.png");
    write_page(&content.join("ECAD").join("main_cabinet"), "page_001.png");
    root
}

fn monitor_app(root: &PathBuf, interactable: bool) -> (App, Entity) {
    let mut app = App::new();
    app.init_resource::<Time>()
        .add_message::<MonitorCommand>()
        .insert_resource(MonitorBrowser::load(root, &MonitorConfig::default()))
        .add_systems(
            Update,
            (
                handle_monitor_button_clicks,
                apply_monitor_commands,
                sync_open_monitor_button,
            )
                .chain(),
        );
    let open_button = app
        .world_mut()
        .spawn((
            Button,
            Node::default(),
            MonitorButton::Open,
            OpenMonitorButton { interactable },
            Interaction::None,
        ))
        .id();
    (app, open_button)
}

fn click(app: &mut App, entity: Entity) {
    app.world_mut().entity_mut(entity).insert(Interaction::Pressed);
    app.update();
    app.world_mut().entity_mut(entity).insert(Interaction::None);
}

fn command(app: &mut App, command: MonitorCommand) {
    app.world_mut().write_message(command);
    app.update();
}

fn browser(app: &App) -> &MonitorBrowser {
    app.world().resource::<MonitorBrowser>()
}

fn page_index(app: &App) -> usize {
    browser(app).document().map(|doc| doc.pager.index()).unwrap()
}

fn advance(app: &mut App, secs: f32) {
    app.world_mut()
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f32(secs));
}

#[test]
fn test_open_requires_monitor_access() {
    let root = asset_root("access");
    let (mut app, open_button) = monitor_app(&root, false);

    click(&mut app, open_button);
    assert!(!browser(&app).is_open());
    assert!(!is_displayed(app.world().get::<Node>(open_button).unwrap()));

    app.world_mut()
        .get_mut::<OpenMonitorButton>(open_button)
        .unwrap()
        .interactable = true;
    app.update();
    assert!(is_displayed(app.world().get::<Node>(open_button).unwrap()));

    click(&mut app, open_button);
    assert_eq!(browser(&app).view(), &MonitorView::FileList);
    assert_eq!(browser(&app).current_category(), "Research Papers");

    // Hidden again while the panel is open
    assert!(!is_displayed(app.world().get::<Node>(open_button).unwrap()));
}

#[test]
fn test_file_button_opens_document() {
    let root = asset_root("file");
    let (mut app, open_button) = monitor_app(&root, true);
    click(&mut app, open_button);

    let file = app
        .world_mut()
        .spawn((
            Button,
            MonitorFileButton {
                title: "Wiring Study".into(),
                document: Some("MonitorContent/Research/wiring".into()),
            },
            Interaction::None,
        ))
        .id();
    click(&mut app, file);

    let doc = browser(&app).document().unwrap();
    assert_eq!(doc.title, "Wiring Study");
    assert_eq!(doc.pages.len(), 3);
    assert_eq!(doc.pager.label(), "1 / 3");
}

#[test]
fn test_legacy_folder_entry_resolves() {
    let root = asset_root("legacy");
    let (mut app, _) = monitor_app(&root, true);
    command(&mut app, MonitorCommand::Open);

    let category = app
        .world_mut()
        .spawn((
            Button,
            MonitorButton::Category("ECAD Files".into()),
            Interaction::None,
        ))
        .id();
    click(&mut app, category);

    let files = browser(&app).files();
    assert_eq!(files.len(), 1);
    let path = files[0].document.clone().unwrap();
    assert_eq!(path, "MonitorContent/ECAD/main_cabinet");

    command(
        &mut app,
        MonitorCommand::OpenDocument {
            title: "Main Cabinet".into(),
            path,
        },
    );
    assert_eq!(browser(&app).document().unwrap().pages.len(), 1);
}

#[test]
fn test_page_clicks_respect_cooldown() {
    let root = asset_root("cooldown");
    let (mut app, _) = monitor_app(&root, true);
    command(&mut app, MonitorCommand::Open);
    command(
        &mut app,
        MonitorCommand::OpenDocument {
            title: "Wiring Study".into(),
            path: "MonitorContent/Research/wiring".into(),
        },
    );

    // Two clicks in the same frame move once
    app.world_mut().write_message(MonitorCommand::NextPage);
    app.world_mut().write_message(MonitorCommand::NextPage);
    app.update();
    assert_eq!(page_index(&app), 1);

    advance(&mut app, 0.5);
    command(&mut app, MonitorCommand::NextPage);
    assert_eq!(page_index(&app), 2);

    // Last page: further clicks do nothing
    advance(&mut app, 0.5);
    command(&mut app, MonitorCommand::NextPage);
    assert_eq!(page_index(&app), 2);

    advance(&mut app, 0.5);
    command(&mut app, MonitorCommand::PreviousPage);
    assert_eq!(page_index(&app), 1);
}

#[test]
fn test_document_without_pages_stays_on_list() {
    let root = asset_root("empty");
    let (mut app, _) = monitor_app(&root, true);
    command(&mut app, MonitorCommand::Open);
    command(
        &mut app,
        MonitorCommand::OpenDocument {
            title: "Empty Draft".into(),
            path: "MonitorContent/Research/draft".into(),
        },
    );
    assert_eq!(browser(&app).view(), &MonitorView::FileList);
    assert_eq!(browser(&app).files().len(), 2);
}

#[test]
fn test_back_and_close() {
    let root = asset_root("back");
    let (mut app, open_button) = monitor_app(&root, true);
    command(&mut app, MonitorCommand::Open);
    command(&mut app, MonitorCommand::ShowCategory("ECAD Files".into()));
    command(
        &mut app,
        MonitorCommand::OpenDocument {
            title: "Main Cabinet".into(),
            path: "MonitorContent/ECAD/main_cabinet".into(),
        },
    );
    assert!(browser(&app).document().is_some());

    command(&mut app, MonitorCommand::BackToFileList);
    assert_eq!(browser(&app).view(), &MonitorView::FileList);
    assert_eq!(browser(&app).current_category(), "ECAD Files");

    command(&mut app, MonitorCommand::Close);
    assert!(!browser(&app).is_open());
    assert!(is_displayed(app.world().get::<Node>(open_button).unwrap()));
}

#[test]
fn test_missing_index_opens_empty() {
    let root = std::env::temp_dir().join(format!("kiosktour_monitor_none_{}", std::process::id()));
    let (mut app, _) = monitor_app(&root, true);
    assert!(browser(&app).index().is_none());

    command(&mut app, MonitorCommand::Open);
    assert!(browser(&app).is_open());
    assert!(browser(&app).files().is_empty());
}

// ============================================================================
// Panel projection
// ============================================================================

fn panel_app(root: &PathBuf) -> App {
    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins,
        AssetPlugin {
            file_path: root.to_string_lossy().into_owned(),
            ..default()
        },
    ))
    .init_asset::<Image>()
    .insert_resource(MonitorBrowser::load(root, &MonitorConfig::default()))
    .add_systems(
        Startup,
        |mut commands: Commands, browser: Res<MonitorBrowser>| {
            spawn_monitor_ui(&mut commands, &browser)
        },
    )
    .add_systems(Update, sync_monitor_ui);
    app.update();
    app
}

fn shown<F: bevy::ecs::query::QueryFilter>(app: &mut App) -> bool {
    let world = app.world_mut();
    let mut query = world.query_filtered::<&Node, F>();
    is_displayed(query.single(world).unwrap())
}

fn button_shown(app: &mut App, wanted: MonitorButton) -> bool {
    let world = app.world_mut();
    let mut query = world.query::<(&Node, &MonitorButton)>();
    query
        .iter(world)
        .find(|(_, button)| **button == wanted)
        .map(|(node, _)| is_displayed(node))
        .unwrap()
}

fn page_text(app: &mut App) -> String {
    let world = app.world_mut();
    let mut query = world.query_filtered::<&Text, With<MonitorPageText>>();
    query.single(world).unwrap().0.clone()
}

fn file_button_count(app: &mut App) -> usize {
    let world = app.world_mut();
    let mut query = world.query::<&MonitorFileButton>();
    query.iter(world).count()
}

#[test]
fn test_panel_starts_hidden_with_generated_tabs() {
    let root = asset_root("panel_hidden");
    let mut app = panel_app(&root);

    assert!(!shown::<With<MonitorPanel>>(&mut app));
    assert!(!shown::<With<MonitorFileList>>(&mut app));
    assert!(!shown::<With<MonitorScreenArea>>(&mut app));
    assert!(button_shown(&mut app, MonitorButton::Category("Research Papers".into())));
    assert!(button_shown(&mut app, MonitorButton::Category("ECAD Files".into())));
    assert_eq!(file_button_count(&mut app), 0);
}

#[test]
fn test_panel_follows_list_and_category() {
    let root = asset_root("panel_list");
    let mut app = panel_app(&root);

    app.world_mut().resource_mut::<MonitorBrowser>().open(true);
    app.update();
    assert!(shown::<With<MonitorPanel>>(&mut app));
    assert!(shown::<With<MonitorFileList>>(&mut app));
    assert!(!shown::<With<MonitorScreenArea>>(&mut app));
    assert!(!button_shown(&mut app, MonitorButton::BackToFileList));
    assert_eq!(file_button_count(&mut app), 2);

    let _ = app
        .world_mut()
        .resource_mut::<MonitorBrowser>()
        .show_category("ECAD Files");
    app.update();
    assert_eq!(file_button_count(&mut app), 1);

    app.world_mut().resource_mut::<MonitorBrowser>().close();
    app.update();
    assert!(!shown::<With<MonitorPanel>>(&mut app));
    assert_eq!(file_button_count(&mut app), 0);
}

#[test]
fn test_panel_follows_open_document() {
    let root = asset_root("panel_document");
    let mut app = panel_app(&root);

    {
        let mut browser = app.world_mut().resource_mut::<MonitorBrowser>();
        browser.open(true);
        browser
            .open_document("Wiring Study", "MonitorContent/Research/wiring")
            .unwrap();
    }
    app.update();

    assert!(!shown::<With<MonitorFileList>>(&mut app));
    assert!(shown::<With<MonitorScreenArea>>(&mut app));
    assert_eq!(page_text(&mut app), "1 / 3");
    assert!(button_shown(&mut app, MonitorButton::BackToFileList));
    assert!(!button_shown(&mut app, MonitorButton::PreviousPage));
    assert!(button_shown(&mut app, MonitorButton::NextPage));

    {
        let world = app.world_mut();
        let mut screens = world.query_filtered::<(&Node, &ImageNode), With<MonitorScreen>>();
        let (node, image) = screens.single(world).unwrap();
        let aspect = node.aspect_ratio.unwrap();
        assert!((aspect - 4.0 / 3.0).abs() < 1e-4);
        assert_ne!(image.image, Handle::<Image>::default());
    }

    app.world_mut().resource_mut::<MonitorBrowser>().next_page(1.0);
    app.update();
    assert_eq!(page_text(&mut app), "2 / 3");
    assert!(button_shown(&mut app, MonitorButton::PreviousPage));
    assert!(button_shown(&mut app, MonitorButton::NextPage));

    app.world_mut().resource_mut::<MonitorBrowser>().next_page(2.0);
    app.update();
    assert_eq!(page_text(&mut app), "3 / 3");
    assert!(!button_shown(&mut app, MonitorButton::NextPage));

    app.world_mut()
        .resource_mut::<MonitorBrowser>()
        .back_to_file_list();
    app.update();
    assert!(shown::<With<MonitorFileList>>(&mut app));
    assert!(!shown::<With<MonitorScreenArea>>(&mut app));
    assert_eq!(page_text(&mut app), "");
    assert_eq!(file_button_count(&mut app), 2);
}
