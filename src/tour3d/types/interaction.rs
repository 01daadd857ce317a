//! Proximity zones and the interaction UI they drive

use std::collections::HashSet;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::Player;

/// Which colliders count as the visitor for a zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerFilter {
    /// Match `Player::tag` exactly.
    Tag(String),
    /// Match when the player's layer bit is set in the mask.
    LayerMask(u32),
}

impl Default for PlayerFilter {
    fn default() -> Self {
        PlayerFilter::Tag("Player".to_string())
    }
}

impl PlayerFilter {
    pub fn matches(&self, player: &Player) -> bool {
        match self {
            PlayerFilter::Tag(tag) => player.tag == *tag,
            PlayerFilter::LayerMask(mask) => 1u32
                .checked_shl(player.layer)
                .is_some_and(|bit| bit & mask != 0),
        }
    }
}

/// Failed setup validation; interaction systems skip it.
#[derive(Component, Debug)]
pub struct Deactivated;

/// What happens while the visitor stands inside a zone.
#[derive(Debug, Clone, PartialEq)]
pub enum ZoneAction {
    /// Show and bind the shared interaction button to a `DoorGroup` entity.
    GlobalButton { group: Entity },
    /// Show a panel whose own button toggles a `DoorGroup` entity.
    LocalPanel { panel: Entity, group: Entity },
    /// Offer the "Open Monitor" button while the visitor looks along `facing`.
    MonitorAccess { facing: Vec3, max_angle_deg: f32 },
}

/// Sensor volume reacting to the visitor.
#[derive(Component, Debug, Clone)]
pub struct ProximityZone {
    pub name: String,
    pub filter: PlayerFilter,
    pub action: ZoneAction,
    occupants: HashSet<Entity>,
}

impl ProximityZone {
    pub fn new(name: impl Into<String>, filter: PlayerFilter, action: ZoneAction) -> Self {
        Self {
            name: name.into(),
            filter,
            action,
            occupants: HashSet::new(),
        }
    }

    /// Record `player` inside. Returns `true` when the zone just became occupied.
    pub fn enter(&mut self, player: Entity) -> bool {
        let was_empty = self.occupants.is_empty();
        self.occupants.insert(player) && was_empty
    }

    /// Record `player` outside. Returns `true` when the zone just became empty.
    pub fn exit(&mut self, player: Entity) -> bool {
        self.occupants.remove(&player) && self.occupants.is_empty()
    }

    pub fn is_occupied(&self) -> bool {
        !self.occupants.is_empty()
    }
}

/// `true` when `forward` is within `max_angle_deg` of `facing`.
///
/// Zero-length vectors never count as facing.
pub fn is_facing(forward: Vec3, facing: Vec3, max_angle_deg: f32) -> bool {
    let (Some(forward), Some(facing)) = (forward.try_normalize(), facing.try_normalize()) else {
        return false;
    };
    forward.dot(facing) >= max_angle_deg.to_radians().cos()
}

/// Emitted when the visitor enters or leaves a zone.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneEvent {
    Entered { zone: Entity, player: Entity },
    Exited { zone: Entity, player: Entity },
}

// ============================================================================
// Interaction UI
// ============================================================================

/// The single shared interaction button; `bound` is the zone currently owning it.
#[derive(Component, Debug, Default)]
pub struct InteractionButton {
    pub bound: Option<Entity>,
}

/// Text inside the shared interaction button
#[derive(Component)]
pub struct InteractionButtonLabel;

/// Per-door panel shown while the visitor is near that door.
#[derive(Component, Debug, Clone, Copy)]
pub struct LocalDoorPanel {
    pub group: Entity,
}

/// Button inside a `LocalDoorPanel`
#[derive(Component, Debug, Clone, Copy)]
pub struct LocalPanelButton {
    pub panel: Entity,
}

/// Text inside a `LocalPanelButton`
#[derive(Component, Debug, Clone, Copy)]
pub struct LocalPanelLabel {
    pub panel: Entity,
}

/// "Open Monitor" button. Only interactable while a `MonitorAccess` zone allows it.
#[derive(Component, Debug, Default)]
pub struct OpenMonitorButton {
    pub interactable: bool,
}
