//! Navigation State
//!
//! Guided tour bookkeeping: the linear step list and the free jump list.
//! Neither touches the ECS; the systems apply the resulting poses to the rig.

use bevy::prelude::*;

use crate::tour3d::types::WaypointConfig;

/// A named rig pose.
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    pub name: String,
    pub position: Vec3,
    pub rotation: Quat,
}

impl From<&WaypointConfig> for Waypoint {
    fn from(config: &WaypointConfig) -> Self {
        let transform = config.transform();
        Self {
            name: config.name.clone(),
            position: transform.translation,
            rotation: transform.rotation,
        }
    }
}

/// Outcome of a step request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepMove {
    Moved(usize),
    AlreadyAtLast,
    AlreadyAtFirst,
    Invalid(usize),
    /// No steps configured.
    Inactive,
}

/// Linear camera tour: index 0 is the start, the last index the end.
#[derive(Resource, Debug, Clone, Default)]
pub struct CameraStepNavigator {
    steps: Vec<Waypoint>,
    current: usize,
}

impl CameraStepNavigator {
    pub fn new(steps: Vec<Waypoint>) -> Self {
        Self { steps, current: 0 }
    }

    pub fn from_config(steps: &[WaypointConfig]) -> Self {
        Self::new(steps.iter().map(Waypoint::from).collect())
    }

    pub fn is_active(&self) -> bool {
        !self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn step(&self, index: usize) -> Option<&Waypoint> {
        self.steps.get(index)
    }

    pub fn current_step(&self) -> Option<&Waypoint> {
        self.steps.get(self.current)
    }

    /// Clamp the current index and return the step to start on.
    pub fn start(&mut self) -> StepMove {
        if self.steps.is_empty() {
            return StepMove::Inactive;
        }
        self.current = self.current.min(self.steps.len() - 1);
        StepMove::Moved(self.current)
    }

    pub fn next(&mut self) -> StepMove {
        if self.steps.is_empty() {
            return StepMove::Inactive;
        }
        if self.current + 1 < self.steps.len() {
            self.current += 1;
            StepMove::Moved(self.current)
        } else {
            StepMove::AlreadyAtLast
        }
    }

    pub fn previous(&mut self) -> StepMove {
        if self.steps.is_empty() {
            return StepMove::Inactive;
        }
        if self.current > 0 {
            self.current -= 1;
            StepMove::Moved(self.current)
        } else {
            StepMove::AlreadyAtFirst
        }
    }

    pub fn teleport(&mut self, index: usize) -> StepMove {
        if self.steps.is_empty() {
            return StepMove::Inactive;
        }
        if index < self.steps.len() {
            self.current = index;
            StepMove::Moved(index)
        } else {
            StepMove::Invalid(index)
        }
    }

    /// Record an externally chosen position in the tour, clamped into range. Does not move.
    pub fn set_current(&mut self, index: usize) {
        self.current = index.min(self.steps.len().saturating_sub(1));
    }
}

/// Free jump destinations, independent of the linear tour.
#[derive(Resource, Debug, Clone, Default)]
pub struct JumpNavigator {
    targets: Vec<Waypoint>,
}

impl JumpNavigator {
    pub fn new(targets: Vec<Waypoint>) -> Self {
        Self { targets }
    }

    pub fn from_config(targets: &[WaypointConfig]) -> Self {
        Self::new(targets.iter().map(Waypoint::from).collect())
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn target(&self, index: usize) -> Option<&Waypoint> {
        self.targets.get(index)
    }

    pub fn targets(&self) -> &[Waypoint] {
        &self.targets
    }
}

/// Requests from the navigation buttons and keyboard shortcuts.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationCommand {
    NextStep,
    PreviousStep,
    TeleportToStep(usize),
    JumpToTarget(usize),
    /// Hand the rig back to the touch controller after a guided move.
    EnableFreeLook,
}
