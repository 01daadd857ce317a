//! Monitor systems
//!
//! Buttons become `MonitorCommand`s, commands mutate `MonitorBrowser`, and the UI is
//! re-projected from the browser whenever it changes.

use bevy::prelude::*;
use kiosktour_content::{ScreenFit, ScreenLayout};

use super::state::*;
use super::ui::*;
use crate::tour3d::types::*;

/// Turn monitor button presses into commands.
pub fn handle_monitor_button_clicks(
    buttons: Query<(&Interaction, &MonitorButton), Changed<Interaction>>,
    files: Query<(&Interaction, &MonitorFileButton), Changed<Interaction>>,
    mut monitor_commands: MessageWriter<MonitorCommand>,
) {
    for (interaction, button) in buttons.iter() {
        if *interaction != Interaction::Pressed {
            continue;
        }
        let command = match button {
            MonitorButton::Open => MonitorCommand::Open,
            MonitorButton::Close => MonitorCommand::Close,
            MonitorButton::Category(name) => MonitorCommand::ShowCategory(name.clone()),
            MonitorButton::NextPage => MonitorCommand::NextPage,
            MonitorButton::PreviousPage => MonitorCommand::PreviousPage,
            MonitorButton::BackToFileList => MonitorCommand::BackToFileList,
        };
        monitor_commands.write(command);
    }

    for (interaction, file) in files.iter() {
        if *interaction != Interaction::Pressed {
            continue;
        }
        match &file.document {
            Some(path) => {
                monitor_commands.write(MonitorCommand::OpenDocument {
                    title: file.title.clone(),
                    path: path.clone(),
                });
            }
            None => warn!("File '{}' has no resource path or file name", file.title),
        }
    }
}

/// Apply queued monitor commands to the browser.
pub fn apply_monitor_commands(
    time: Res<Time>,
    mut monitor_commands: MessageReader<MonitorCommand>,
    mut browser: ResMut<MonitorBrowser>,
    open_buttons: Query<&OpenMonitorButton>,
) {
    let now = time.elapsed_secs_f64();

    for command in monitor_commands.read() {
        match command {
            MonitorCommand::Open => {
                let allowed = open_buttons.is_empty() || open_buttons.iter().any(|b| b.interactable);
                if browser.open(allowed) {
                    info!("Monitor opened");
                }
            }
            MonitorCommand::Close => {
                browser.close();
                info!("Monitor closed");
            }
            MonitorCommand::ShowCategory(name) => {
                let _ = browser.show_category(name);
            }
            MonitorCommand::OpenDocument { title, path } => {
                let _ = browser.open_document(title, path);
            }
            MonitorCommand::NextPage => {
                browser.next_page(now);
            }
            MonitorCommand::PreviousPage => {
                browser.previous_page(now);
            }
            MonitorCommand::BackToFileList => browser.back_to_file_list(),
        }
    }
}

/// Size the page image for the chosen layout.
///
/// Both fits keep the page's aspect ratio; they only differ in which edge of the
/// screen area bounds the image.
pub fn apply_screen_layout(node: &mut Node, layout: ScreenLayout) {
    match layout.fit {
        ScreenFit::FullSize => {
            node.width = Val::Percent(100.0);
            node.height = Val::Auto;
            node.max_width = Val::Percent(100.0);
            node.max_height = Val::Percent(100.0);
        }
        ScreenFit::Original => {
            node.width = Val::Auto;
            node.height = Val::Percent(100.0);
            node.max_width = Val::Percent(100.0);
            node.max_height = Val::Auto;
        }
    }
    node.aspect_ratio = Some(layout.aspect_ratio);
}

type MonitorNodes<'w, 's> = Query<
    'w,
    's,
    (
        &'static mut Node,
        Option<&'static mut ImageNode>,
        Has<MonitorPanel>,
        Has<MonitorFileList>,
        Has<MonitorScreenArea>,
        Has<MonitorScreen>,
        Has<MonitorPageText>,
        Option<&'static MonitorButton>,
    ),
    Or<(
        With<MonitorPanel>,
        With<MonitorFileList>,
        With<MonitorScreenArea>,
        With<MonitorScreen>,
        With<MonitorPageText>,
        With<MonitorButton>,
    )>,
>;

/// Re-project the monitor panel from the browser state.
pub fn sync_monitor_ui(
    mut commands: Commands,
    browser: Res<MonitorBrowser>,
    asset_server: Res<AssetServer>,
    mut built_generation: Local<Option<u64>>,
    mut nodes: MonitorNodes,
    mut page_texts: Query<&mut Text, With<MonitorPageText>>,
    list_content: Query<Entity, With<MonitorFileListContent>>,
) {
    if !browser.is_changed() {
        return;
    }

    let open = browser.is_open();
    let in_list = *browser.view() == MonitorView::FileList;
    let document = browser.document();

    for (mut node, image, is_panel, is_list, is_area, is_screen, is_text, button) in nodes.iter_mut() {
        if is_panel {
            set_displayed(&mut node, open);
        }
        if is_list {
            set_displayed(&mut node, in_list);
        }
        if is_area || is_text {
            set_displayed(&mut node, document.is_some());
        }
        if is_screen {
            if let Some(mut image) = image {
                match document.and_then(|doc| doc.current_page().map(|page| (doc, page))) {
                    Some((doc, page)) => {
                        debug!("Displaying page {}", doc.pager.label());
                        image.image = asset_server.load(page.asset_path.clone());
                        apply_screen_layout(&mut node, doc.layout);
                    }
                    None => image.image = Handle::default(),
                }
            }
        }
        match button {
            Some(MonitorButton::PreviousPage) => {
                set_displayed(&mut node, document.is_some_and(|d| d.pager.has_previous()))
            }
            Some(MonitorButton::NextPage) => {
                set_displayed(&mut node, document.is_some_and(|d| d.pager.has_next()))
            }
            Some(MonitorButton::BackToFileList) => set_displayed(&mut node, document.is_some()),
            _ => {}
        }
    }

    for mut text in page_texts.iter_mut() {
        text.0 = document.map(|d| d.pager.label()).unwrap_or_default();
    }

    if *built_generation != Some(browser.list_generation()) {
        *built_generation = Some(browser.list_generation());
        let files = if in_list { browser.files() } else { Vec::new() };
        for content in list_content.iter() {
            commands.entity(content).despawn_related::<Children>();
            if !files.is_empty() {
                commands
                    .entity(content)
                    .with_children(|parent| spawn_file_buttons(parent, &files));
            }
        }
    }
}

/// The open button shows only while a monitor zone allows it and the panel is closed.
pub fn sync_open_monitor_button(
    browser: Res<MonitorBrowser>,
    mut buttons: Query<(&OpenMonitorButton, &mut Node)>,
) {
    let open = browser.is_open();
    for (button, mut node) in buttons.iter_mut() {
        let shown = button.interactable && !open;
        if is_displayed(&node) != shown {
            set_displayed(&mut node, shown);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiosktour_content::LayoutConfig;

    #[test]
    fn test_landscape_page_keeps_its_aspect() {
        let mut node = Node::default();
        let layout = LayoutConfig::default().choose(Some(4.0 / 3.0));
        assert_eq!(layout.fit, ScreenFit::FullSize);

        apply_screen_layout(&mut node, layout);
        assert_eq!(node.aspect_ratio, Some(4.0 / 3.0));
        assert_eq!(node.width, Val::Percent(100.0));
        assert_eq!(node.max_height, Val::Percent(100.0));
    }

    #[test]
    fn test_portrait_page_fits_height() {
        let mut node = Node::default();
        apply_screen_layout(&mut node, LayoutConfig::default().choose(Some(0.7)));
        assert_eq!(node.aspect_ratio, Some(0.7));
        assert_eq!(node.height, Val::Percent(100.0));
        assert_eq!(node.width, Val::Auto);
    }

    #[test]
    fn test_switching_fit_resets_bounds() {
        let mut node = Node::default();
        apply_screen_layout(&mut node, LayoutConfig::default().choose(Some(1.6)));
        apply_screen_layout(&mut node, LayoutConfig::default().choose(None));
        assert_eq!(node.max_height, Val::Auto);
        assert_eq!(node.height, Val::Percent(100.0));
        assert_eq!(node.aspect_ratio, Some(1654.0 / 2339.0));
    }
}
