//! Monitor UI
//!
//! The "Open Monitor" button plus the monitor panel: category tabs, file list,
//! page screen and pager controls. Everything starts hidden.

use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::prelude::*;

use super::state::*;
use crate::tour3d::types::*;

/// Buttons on the monitor panel
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub enum MonitorButton {
    Open,
    Close,
    Category(String),
    NextPage,
    PreviousPage,
    BackToFileList,
}

/// One generated file button
#[derive(Component, Debug, Clone)]
pub struct MonitorFileButton {
    pub title: String,
    pub document: Option<String>,
}

#[derive(Component)]
pub struct MonitorPanel;

#[derive(Component)]
pub struct MonitorFileList;

/// Parent of the generated file buttons
#[derive(Component)]
pub struct MonitorFileListContent;

/// Area the page image is fitted into
#[derive(Component)]
pub struct MonitorScreenArea;

#[derive(Component)]
pub struct MonitorScreen;

#[derive(Component)]
pub struct MonitorPageText;

fn spawn_monitor_button(parent: &mut ChildSpawnerCommands, label: &str, button: MonitorButton, shown: bool) {
    let mut node = button_node(Val::Auto);
    set_displayed(&mut node, shown);
    parent
        .spawn((Button, node, BackgroundColor(BUTTON_BG), HoverButton, button))
        .with_children(|b| {
            b.spawn((Text::new(label), label_font(16.0), TextColor(TEXT_COLOR)));
        });
}

/// Spawn the open button and the (hidden) monitor panel.
pub fn spawn_monitor_ui(commands: &mut Commands, browser: &MonitorBrowser) {
    // Open button, right edge
    let mut open_node = button_node(Val::Px(160.0));
    open_node.position_type = PositionType::Absolute;
    open_node.right = Val::Px(16.0);
    open_node.top = Val::Percent(45.0);
    set_displayed(&mut open_node, false);
    commands
        .spawn((
            Button,
            open_node,
            BackgroundColor(BUTTON_BG),
            HoverButton,
            MonitorButton::Open,
            OpenMonitorButton::default(),
            ZIndex(20),
        ))
        .with_children(|b| {
            b.spawn((Text::new("Open Monitor"), label_font(18.0), TextColor(TEXT_COLOR)));
        });

    let categories = browser.category_names();

    commands
        .spawn((
            Node {
                display: Display::None,
                position_type: PositionType::Absolute,
                left: Val::Percent(12.0),
                right: Val::Percent(12.0),
                top: Val::Percent(6.0),
                bottom: Val::Percent(14.0),
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(10.0)),
                ..default()
            },
            BackgroundColor(PANEL_BG),
            MonitorPanel,
            ZIndex(30),
        ))
        .with_children(|panel| {
            // Header: category tabs and close
            panel
                .spawn(Node {
                    flex_direction: FlexDirection::Row,
                    flex_wrap: FlexWrap::Wrap,
                    align_items: AlignItems::Center,
                    ..default()
                })
                .with_children(|header| {
                    if categories.is_empty() {
                        header.spawn((
                            Text::new("Monitor content not found"),
                            label_font(16.0),
                            TextColor(DIM_TEXT_COLOR),
                        ));
                    }
                    for name in &categories {
                        spawn_monitor_button(header, name, MonitorButton::Category(name.clone()), true);
                    }
                    header.spawn(Node {
                        flex_grow: 1.0,
                        ..default()
                    });
                    spawn_monitor_button(header, "Close", MonitorButton::Close, true);
                });

            // File list
            panel
                .spawn((
                    Node {
                        display: Display::None,
                        flex_direction: FlexDirection::Column,
                        flex_grow: 1.0,
                        overflow: Overflow::scroll_y(),
                        margin: UiRect::top(Val::Px(8.0)),
                        ..default()
                    },
                    MonitorFileList,
                ))
                .with_children(|list| {
                    list.spawn((
                        Node {
                            flex_direction: FlexDirection::Column,
                            align_items: AlignItems::Stretch,
                            ..default()
                        },
                        MonitorFileListContent,
                    ));
                });

            // Page screen
            panel
                .spawn((
                    Node {
                        display: Display::None,
                        flex_grow: 1.0,
                        justify_content: JustifyContent::Center,
                        align_items: AlignItems::Center,
                        margin: UiRect::top(Val::Px(8.0)),
                        overflow: Overflow::clip(),
                        ..default()
                    },
                    MonitorScreenArea,
                ))
                .with_children(|area| {
                    area.spawn((
                        Node {
                            height: Val::Percent(100.0),
                            max_width: Val::Percent(100.0),
                            ..default()
                        },
                        ImageNode::default(),
                        MonitorScreen,
                    ));
                });

            // Footer: back, previous, page number, next
            panel
                .spawn(Node {
                    flex_direction: FlexDirection::Row,
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    margin: UiRect::top(Val::Px(6.0)),
                    ..default()
                })
                .with_children(|footer| {
                    spawn_monitor_button(footer, "Back", MonitorButton::BackToFileList, false);
                    spawn_monitor_button(footer, "< Prev", MonitorButton::PreviousPage, false);
                    footer.spawn((
                        Node {
                            display: Display::None,
                            margin: UiRect::horizontal(Val::Px(12.0)),
                            ..default()
                        },
                        Text::new(""),
                        label_font(18.0),
                        TextColor(TEXT_COLOR),
                        MonitorPageText,
                    ));
                    spawn_monitor_button(footer, "Next >", MonitorButton::NextPage, false);
                });
        });
}

/// Spawn one button per file below the list content node.
pub fn spawn_file_buttons(parent: &mut ChildSpawnerCommands, files: &[FileEntry]) {
    for file in files {
        parent
            .spawn((
                Button,
                button_node(Val::Percent(100.0)),
                BackgroundColor(BUTTON_BG),
                HoverButton,
                MonitorFileButton {
                    title: file.title.clone(),
                    document: file.document.clone(),
                },
            ))
            .with_children(|b| {
                b.spawn((Text::new(file.title.as_str()), label_font(16.0), TextColor(TEXT_COLOR)));
            });
    }
}
