//! UI components shared by the on-screen panels

use bevy::prelude::*;

pub const PANEL_BG: Color = Color::srgba(0.05, 0.07, 0.1, 0.85);
pub const BUTTON_BG: Color = Color::srgba(0.18, 0.22, 0.28, 0.9);
pub const BUTTON_HOVER: Color = Color::srgba(0.26, 0.32, 0.4, 0.95);
pub const BUTTON_PRESSED: Color = Color::srgba(0.12, 0.45, 0.7, 1.0);
pub const TEXT_COLOR: Color = Color::srgba(0.92, 0.93, 0.95, 1.0);
pub const DIM_TEXT_COLOR: Color = Color::srgba(0.7, 0.72, 0.75, 0.9);

/// Buttons that get the shared hover/press colors
#[derive(Component)]
pub struct HoverButton;

/// Text child of a button whose caption changes at runtime
#[derive(Component)]
pub struct ButtonLabel;

/// Show or hide a UI node. Hidden nodes take no layout space and receive no clicks.
pub fn set_displayed(node: &mut Node, shown: bool) {
    node.display = if shown { Display::Flex } else { Display::None };
}

pub fn is_displayed(node: &Node) -> bool {
    node.display != Display::None
}

/// Node for a standard text button.
pub fn button_node(width: Val) -> Node {
    Node {
        width,
        min_height: Val::Px(36.0),
        padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
        margin: UiRect::all(Val::Px(4.0)),
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        ..default()
    }
}

pub fn label_font(size: f32) -> TextFont {
    TextFont {
        font_size: size,
        ..default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_displayed_round_trip() {
        let mut node = Node::default();
        assert!(is_displayed(&node));
        set_displayed(&mut node, false);
        assert!(!is_displayed(&node));
        set_displayed(&mut node, true);
        assert_eq!(node.display, Display::Flex);
    }
}
