use std::fmt;

/// Identifier of an installed application (desktop file id or similar)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AppId(pub String);

impl AppId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Window-manager id; creation order follows the numeric order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Run state of an application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Stopped,
    Starting,
    Running,
}

/// Live state of a single window at click time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSnapshot {
    pub id: WindowId,
    pub override_redirect: bool,
    pub attached_dialog: bool,
    pub has_focus: bool,
    pub can_minimize: bool,
}

impl WindowSnapshot {
    /// A regular, minimizable, unfocused top-level window
    pub fn normal(id: u64) -> Self {
        Self {
            id: WindowId(id),
            override_redirect: false,
            attached_dialog: false,
            has_focus: false,
            can_minimize: true,
        }
    }

    pub fn focused(mut self) -> Self {
        self.has_focus = true;
        self
    }

    /// Override-redirect windows and attached dialogs cannot be activated on their own
    pub fn is_activatable(&self) -> bool {
        !self.override_redirect && !self.attached_dialog
    }
}

/// Application state as queried from the window manager at click time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSnapshot {
    pub id: AppId,
    pub state: AppState,
    pub can_open_new_window: bool,
    pub windows: Vec<WindowSnapshot>,
}

impl AppSnapshot {
    /// Top-level windows of the application, oldest first
    pub fn activatable_windows(&self) -> Vec<&WindowSnapshot> {
        let mut windows: Vec<_> = self
            .windows
            .iter()
            .filter(|window| window.is_activatable())
            .collect();
        windows.sort_by_key(|window| window.id);
        windows
    }
}

/// Mouse button used for an icon click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Primary,
    Middle,
    Secondary,
}

/// Keyboard modifiers held during a click
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub control: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        control: false,
        shift: false,
        alt: false,
    };

    pub const CONTROL: Modifiers = Modifiers {
        control: true,
        shift: false,
        alt: false,
    };
}

/// Window-manager action chosen for an icon click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Start the stopped application
    LaunchAnimated,
    /// Ask the running application for an additional window
    OpenNewWindowAnimated,
    /// Minimize the application's only window, which has focus
    MinimizeFocused { window: WindowId },
    /// Focus the application's only window
    ActivateUnfocusedSingle { window: WindowId },
    /// Move focus to the next window of the application, wrapping around
    CycleToNextWindow { target: WindowId },
    /// Raise the application as a whole
    RaiseAny,
}

/// Scroll direction reported for the dock surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
    Left,
    Right,
    Smooth,
}

/// Direction to a neighbouring workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionDirection {
    Left,
    Right,
}

impl ScrollDirection {
    /// Workspace neighbour the scroll switches to, if any
    pub fn workspace_motion(&self) -> Option<MotionDirection> {
        match self {
            ScrollDirection::Down | ScrollDirection::Right => Some(MotionDirection::Right),
            ScrollDirection::Up | ScrollDirection::Left => Some(MotionDirection::Left),
            ScrollDirection::Smooth => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activatable_windows_are_filtered_and_sorted() {
        let mut dialog = WindowSnapshot::normal(2);
        dialog.attached_dialog = true;
        let mut tooltip = WindowSnapshot::normal(1);
        tooltip.override_redirect = true;

        let app = AppSnapshot {
            id: AppId::new("org.example.Editor"),
            state: AppState::Running,
            can_open_new_window: true,
            windows: vec![
                WindowSnapshot::normal(9),
                dialog,
                tooltip,
                WindowSnapshot::normal(4),
            ],
        };

        let ids: Vec<u64> = app.activatable_windows().iter().map(|w| w.id.0).collect();
        assert_eq!(ids, vec![4, 9]);
    }

    #[test]
    fn scroll_maps_to_workspace_neighbour() {
        assert_eq!(
            ScrollDirection::Down.workspace_motion(),
            Some(MotionDirection::Right)
        );
        assert_eq!(
            ScrollDirection::Left.workspace_motion(),
            Some(MotionDirection::Left)
        );
        assert_eq!(ScrollDirection::Smooth.workspace_motion(), None);
    }
}
