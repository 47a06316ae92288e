use super::geometry::{extent, WorkArea};
use std::fmt;

/// Upper bound for the dock height, as a percentage of the work area height
pub const DOCK_MAX_HEIGHT_PERCENT: u32 = 15;

/// Visibility state of the dock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DockState {
    #[default]
    Hidden,
    Showing,
    Shown,
    Hiding,
}

impl DockState {
    /// Showing and Hiding only resolve through an animation completion
    pub fn is_transient(&self) -> bool {
        matches!(self, DockState::Showing | DockState::Hiding)
    }
}

impl fmt::Display for DockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DockState::Hidden => "hidden",
            DockState::Showing => "showing",
            DockState::Shown => "shown",
            DockState::Hiding => "hiding",
        };
        f.write_str(name)
    }
}

/// Named animation profiles; both ease out quadratically
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EasingProfile {
    Show,
    Hide,
}

/// Geometry of the dock derived from the primary work area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DockGeometry {
    pub work_area: WorkArea,
    pub max_height: u32,
    pub height: u32,
    pub current_y: i32,
}

impl DockGeometry {
    /// Clamp the dock's preferred height to the work area budget
    pub fn new(work_area: WorkArea, preferred_height: u32) -> Self {
        let max_height = max_height_for(&work_area);
        let height = preferred_height.min(max_height);
        Self {
            work_area,
            max_height,
            height,
            current_y: work_area.bottom(),
        }
    }

    pub fn x(&self) -> i32 {
        self.work_area.x
    }

    pub fn width(&self) -> u32 {
        self.work_area.width
    }

    /// Y at which the dock sits flush with the bottom of the work area
    pub fn shown_y(&self) -> i32 {
        self.work_area.bottom().saturating_sub(extent(self.height))
    }

    /// Y at which the dock is entirely below the work area
    pub fn hidden_y(&self) -> i32 {
        self.work_area.bottom()
    }

    /// Resting Y for a settled state; transient states have no resting position
    pub fn resting_y(&self, state: DockState) -> Option<i32> {
        match state {
            DockState::Shown => Some(self.shown_y()),
            DockState::Hidden => Some(self.hidden_y()),
            DockState::Showing | DockState::Hiding => None,
        }
    }
}

fn max_height_for(work_area: &WorkArea) -> u32 {
    (work_area.height as f64 * DOCK_MAX_HEIGHT_PERCENT as f64 / 100.0).round() as u32
}
