use crate::host::{IconClickHandler, ShellOverview, WindowSystem};
use crate::models::{Action, AppId, AppSnapshot, AppState, Modifiers, MouseButton};
use crate::Result;
use std::sync::Arc;
use tracing::debug;

/// Outcome of an icon click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivationDecision {
    /// `None` when the click needs no window-manager action
    pub action: Option<Action>,
    /// Visual launch cue on the icon; independent of the action taken
    pub play_launch_animation: bool,
    pub hide_overview: bool,
}

/// Map a click on an application icon to the window-manager action it should cause
pub fn decide(app: &AppSnapshot, button: MouseButton, modifiers: Modifiers) -> ActivationDecision {
    let running = app.state == AppState::Running;
    let open_new_window = app.can_open_new_window
        && running
        && (button == MouseButton::Middle || modifiers.control);
    let play_launch_animation = app.state == AppState::Stopped || open_new_window;

    if open_new_window {
        return ActivationDecision {
            action: Some(Action::OpenNewWindowAnimated),
            play_launch_animation,
            hide_overview: true,
        };
    }

    let windows = app.activatable_windows();
    let action = match windows.as_slice() {
        [] if app.state == AppState::Stopped => Some(Action::LaunchAnimated),
        [] => Some(Action::RaiseAny),
        [only] if only.has_focus && only.can_minimize => {
            Some(Action::MinimizeFocused { window: only.id })
        }
        [only] if !only.has_focus => Some(Action::ActivateUnfocusedSingle { window: only.id }),
        // Already the frontmost window and it cannot be minimized
        [_] => None,
        windows => match windows.iter().position(|window| window.has_focus) {
            Some(focused) => Some(Action::CycleToNextWindow {
                target: windows[(focused + 1) % windows.len()].id,
            }),
            None => Some(Action::RaiseAny),
        },
    };

    // Cycling between several windows leaves the overview as it is
    let hide_overview = windows.len() <= 1 && action.is_some();

    ActivationDecision {
        action,
        play_launch_animation,
        hide_overview,
    }
}

/// Icon click handler that applies [`decide`] against live window-manager state
pub struct ActivationDispatcher {
    windows: Arc<dyn WindowSystem>,
    overview: Arc<dyn ShellOverview>,
}

impl ActivationDispatcher {
    pub fn new(windows: Arc<dyn WindowSystem>, overview: Arc<dyn ShellOverview>) -> Self {
        Self { windows, overview }
    }

    /// Query the application afresh, decide, and perform the decision
    pub fn dispatch(
        &self,
        app: &AppId,
        button: MouseButton,
        modifiers: Modifiers,
    ) -> Result<ActivationDecision> {
        let snapshot = self.windows.application(app)?;
        let decision = decide(&snapshot, button, modifiers);
        debug!(app = %app, ?button, decision = ?decision, "Icon activated");

        if decision.play_launch_animation {
            self.windows.animate_launch(app);
        }

        match decision.action {
            Some(Action::OpenNewWindowAnimated) => self.windows.open_new_window(app),
            Some(Action::LaunchAnimated) | Some(Action::RaiseAny) => self.windows.activate_app(app),
            Some(Action::MinimizeFocused { window }) => self.windows.minimize_window(window),
            Some(Action::ActivateUnfocusedSingle { window })
            | Some(Action::CycleToNextWindow { target: window }) => {
                self.windows.activate_window(window)
            }
            None => {}
        }

        if decision.hide_overview {
            self.overview.hide();
        }

        Ok(decision)
    }
}

impl IconClickHandler for ActivationDispatcher {
    fn activate(&self, app: &AppId, button: MouseButton, modifiers: Modifiers) -> Result<()> {
        self.dispatch(app, button, modifiers).map(|_| ())
    }
}
