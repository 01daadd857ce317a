//! Shared button feedback

use bevy::prelude::*;

use crate::tour3d::types::*;

/// Recolor hoverable buttons on hover and press.
pub fn button_hover_colors(
    mut buttons: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<HoverButton>)>,
) {
    for (interaction, mut background) in buttons.iter_mut() {
        background.0 = match interaction {
            Interaction::Pressed => BUTTON_PRESSED,
            Interaction::Hovered => BUTTON_HOVER,
            Interaction::None => BUTTON_BG,
        };
    }
}
