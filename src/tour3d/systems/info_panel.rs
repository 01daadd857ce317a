//! Component detail panel
//!
//! Component buttons request a lookup, the loader fills `ComponentInfoLoader::ready`,
//! and `show_component_info` projects it onto the panel.

use bevy::prelude::*;

use super::metadata_loader::ComponentInfoLoader;
use crate::tour3d::types::*;

/// Spawn the hidden detail panel.
pub fn spawn_info_panel(commands: &mut Commands) {
    commands
        .spawn((
            Node {
                display: Display::None,
                position_type: PositionType::Absolute,
                right: Val::Px(16.0),
                top: Val::Px(16.0),
                width: Val::Px(360.0),
                max_height: Val::Percent(80.0),
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(12.0)),
                row_gap: Val::Px(8.0),
                overflow: Overflow::scroll_y(),
                ..default()
            },
            BackgroundColor(PANEL_BG),
            InfoPanelRoot,
            ZIndex(25),
        ))
        .with_children(|panel| {
            panel.spawn((
                Text::new(""),
                label_font(22.0),
                TextColor(TEXT_COLOR),
                InfoTitleText,
            ));
            panel.spawn((
                Node {
                    width: Val::Percent(100.0),
                    ..default()
                },
                ImageNode::default(),
                InfoPreviewImage,
            ));
            panel.spawn((
                Text::new(""),
                label_font(15.0),
                TextColor(DIM_TEXT_COLOR),
                InfoDescriptionText,
            ));
            panel
                .spawn((
                    Node {
                        display: Display::None,
                        flex_direction: FlexDirection::Column,
                        row_gap: Val::Px(4.0),
                        ..default()
                    },
                    EcadSection,
                ))
                .with_children(|section| {
                    section.spawn((Text::new("ECAD"), label_font(16.0), TextColor(TEXT_COLOR)));
                    section.spawn((
                        Node {
                            width: Val::Percent(100.0),
                            ..default()
                        },
                        ImageNode::default(),
                        EcadImage,
                    ));
                });
            panel
                .spawn((
                    Button,
                    button_node(Val::Auto),
                    BackgroundColor(BUTTON_BG),
                    HoverButton,
                    InfoCloseButton,
                ))
                .with_children(|b| {
                    b.spawn((Text::new("Close"), label_font(16.0), TextColor(TEXT_COLOR)));
                });
        });
}

/// Spawn one button per configured component.
pub fn spawn_component_buttons(commands: &mut Commands, buttons: &[ComponentButtonConfig]) {
    if buttons.is_empty() {
        return;
    }
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            left: Val::Px(16.0),
            top: Val::Px(16.0),
            flex_direction: FlexDirection::Column,
            ..default()
        })
        .with_children(|column| {
            for config in buttons {
                column
                    .spawn((
                        Button,
                        button_node(Val::Px(180.0)),
                        BackgroundColor(BUTTON_BG),
                        HoverButton,
                        ComponentButton {
                            component_id: config.id.clone(),
                        },
                    ))
                    .with_children(|b| {
                        b.spawn((
                            Text::new(config.label.as_str()),
                            label_font(16.0),
                            TextColor(TEXT_COLOR),
                        ));
                    });
            }
        });
}

pub fn handle_component_button_clicks(
    buttons: Query<(&Interaction, &ComponentButton), Changed<Interaction>>,
    mut requests: MessageWriter<ShowComponentInfo>,
) {
    for (interaction, button) in buttons.iter() {
        if *interaction != Interaction::Pressed {
            continue;
        }
        if button.component_id.trim().is_empty() {
            warn!("Component ID is not set on this button");
            continue;
        }
        requests.write(ShowComponentInfo {
            component_id: button.component_id.clone(),
        });
    }
}

pub fn handle_info_close_clicks(
    buttons: Query<&Interaction, (Changed<Interaction>, With<InfoCloseButton>)>,
    mut panels: Query<&mut Node, With<InfoPanelRoot>>,
) {
    if !buttons.iter().any(|i| *i == Interaction::Pressed) {
        return;
    }
    for mut node in panels.iter_mut() {
        set_displayed(&mut node, false);
    }
}

type InfoNodes<'w, 's> = Query<
    'w,
    's,
    (
        &'static mut Node,
        Option<&'static mut ImageNode>,
        Has<InfoPanelRoot>,
        Has<InfoPreviewImage>,
        Has<EcadSection>,
        Has<EcadImage>,
    ),
    Or<(
        With<InfoPanelRoot>,
        With<InfoPreviewImage>,
        With<EcadSection>,
        With<EcadImage>,
    )>,
>;

/// Show the most recently loaded component.
#[allow(clippy::type_complexity)]
pub fn show_component_info(
    mut loader: ResMut<ComponentInfoLoader>,
    mut nodes: InfoNodes,
    mut titles: Query<&mut Text, (With<InfoTitleText>, Without<InfoDescriptionText>)>,
    mut descriptions: Query<&mut Text, (With<InfoDescriptionText>, Without<InfoTitleText>)>,
) {
    let Some(info) = loader.ready.take() else {
        return;
    };

    for mut text in titles.iter_mut() {
        text.0 = info.name.clone();
    }
    for mut text in descriptions.iter_mut() {
        text.0 = info.description.clone();
    }

    for (mut node, image, is_root, is_preview, is_ecad_section, is_ecad_image) in nodes.iter_mut() {
        if is_root {
            set_displayed(&mut node, true);
        }
        if is_ecad_section {
            set_displayed(&mut node, info.has_ecad);
        }
        if is_preview {
            set_displayed(&mut node, info.preview.is_some());
            if let Some(mut image) = image {
                image.image = info.preview.clone().unwrap_or_default();
            }
        } else if is_ecad_image {
            set_displayed(&mut node, info.ecad.is_some());
            if let Some(mut image) = image {
                image.image = info.ecad.clone().unwrap_or_default();
            }
        }
    }

    info!("Showing component '{}' ({})", info.name, info.id);
}
