//! Component detail panel types

use bevy::prelude::*;

/// Button that opens the detail panel for one catalog entry.
#[derive(Component, Debug, Clone)]
pub struct ComponentButton {
    pub component_id: String,
}

/// Request to show a component in the detail panel.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct ShowComponentInfo {
    pub component_id: String,
}

/// Root of the detail panel
#[derive(Component)]
pub struct InfoPanelRoot;

#[derive(Component)]
pub struct InfoTitleText;

#[derive(Component)]
pub struct InfoDescriptionText;

#[derive(Component)]
pub struct InfoPreviewImage;

/// Container shown only for components with an ECAD drawing
#[derive(Component)]
pub struct EcadSection;

#[derive(Component)]
pub struct EcadImage;

#[derive(Component)]
pub struct InfoCloseButton;
