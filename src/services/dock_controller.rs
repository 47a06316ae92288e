use crate::config::DockBehaviorConfig;
use crate::host::{AnimationId, DockSurface, ItemId, TimerId, Timers};
use crate::models::{DockGeometry, DockState, EasingProfile, WorkArea};
use std::sync::Arc;
use tracing::debug;

/// Counters for dock visibility changes
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DockControllerMetrics {
    pub shows: u64,
    pub hides: u64,
    pub ignored_toggles: u64,
    pub refreshes: u64,
    pub deferred_refreshes: u64,
}

/// Four-state machine driving the dock surface in and out of view
pub struct DockVisibilityController {
    config: DockBehaviorConfig,
    surface: Arc<dyn DockSurface>,
    timers: Arc<dyn Timers>,
    state: DockState,
    geometry: Option<DockGeometry>,
    hovered: bool,
    menu_owner: Option<ItemId>,
    hide_timer: Option<TimerId>,
    animation: Option<AnimationId>,
    dismiss_after_show: bool,
    hide_after_show: bool,
    refreshing: bool,
    metrics: DockControllerMetrics,
}

impl DockVisibilityController {
    pub fn new(
        config: DockBehaviorConfig,
        surface: Arc<dyn DockSurface>,
        timers: Arc<dyn Timers>,
    ) -> Self {
        Self {
            config,
            surface,
            timers,
            state: DockState::Hidden,
            geometry: None,
            hovered: false,
            menu_owner: None,
            hide_timer: None,
            animation: None,
            dismiss_after_show: false,
            hide_after_show: false,
            refreshing: false,
            metrics: DockControllerMetrics::default(),
        }
    }

    pub fn state(&self) -> DockState {
        self.state
    }

    pub fn geometry(&self) -> Option<&DockGeometry> {
        self.geometry.as_ref()
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// A popup menu of one of the dock items pins the dock open
    pub fn keep_shown(&self) -> bool {
        self.menu_owner.is_some()
    }

    pub fn has_pending_hide(&self) -> bool {
        self.hide_timer.is_some()
    }

    pub fn metrics(&self) -> &DockControllerMetrics {
        &self.metrics
    }

    /// Show when hidden, hide when shown; ignored mid-animation
    pub fn toggle(&mut self) {
        match self.state {
            DockState::Hidden => self.show(),
            DockState::Shown => self.hide(),
            DockState::Showing | DockState::Hiding => {
                self.metrics.ignored_toggles += 1;
                debug!(state = %self.state, "Toggle ignored during animation");
            }
        }
    }

    pub fn show(&mut self) {
        if self.state != DockState::Hidden {
            return;
        }
        let Some(geometry) = self.geometry else {
            debug!("Show deferred until a work area is known");
            return;
        };

        self.surface.set_position(geometry.x(), geometry.hidden_y());
        self.surface.show();
        self.animation = Some(self.surface.animate_to(
            geometry.shown_y(),
            self.config.show_duration(),
            EasingProfile::Show,
        ));
        self.set_state(DockState::Showing);
        self.metrics.shows += 1;
    }

    pub fn hide(&mut self) {
        if self.state != DockState::Shown {
            return;
        }
        let Some(geometry) = self.geometry else {
            return;
        };

        self.cancel_hide_timer();
        self.animation = Some(self.surface.animate_to(
            geometry.hidden_y(),
            self.config.hide_duration(),
            EasingProfile::Hide,
        ));
        self.set_state(DockState::Hiding);
        self.metrics.hides += 1;
    }

    /// Pointer entered or left the dock surface
    pub fn on_hover_changed(&mut self, hovered: bool) {
        self.hovered = hovered;
        self.update_hide_timer();
    }

    /// A dock item's popup menu opened or closed; only the item that pinned
    /// the dock can release it
    pub fn on_item_menu_changed(&mut self, item: ItemId, opened: bool) {
        if opened {
            self.menu_owner = Some(item);
        } else if self.menu_owner == Some(item) {
            self.menu_owner = None;
        }
        self.update_hide_timer();
    }

    fn update_hide_timer(&mut self) {
        self.cancel_hide_timer();
        if !self.hovered && !self.keep_shown() {
            self.hide_timer = Some(self.timers.schedule(self.config.auto_hide_delay()));
        }
    }

    fn cancel_hide_timer(&mut self) {
        if let Some(timer) = self.hide_timer.take() {
            self.timers.cancel(timer);
        }
    }

    /// Hide-debounce expiry; returns false for timers this controller does not own
    pub fn on_timer(&mut self, timer: TimerId) -> bool {
        if self.hide_timer != Some(timer) {
            return false;
        }
        self.hide_timer = None;

        if !self.hovered && !self.keep_shown() {
            if self.state == DockState::Showing {
                // Re-checked once the dock has settled
                self.hide_after_show = true;
            } else {
                self.hide();
            }
        }
        true
    }

    /// Animation completion; each id is honoured at most once
    pub fn on_animation_complete(&mut self, animation: AnimationId) -> bool {
        if self.animation != Some(animation) {
            return false;
        }
        self.animation = None;

        match self.state {
            DockState::Showing => {
                self.set_state(DockState::Shown);
                self.snap_to_rest();
                let hide_pending = std::mem::take(&mut self.hide_after_show);
                if std::mem::take(&mut self.dismiss_after_show) {
                    self.dismiss();
                } else if hide_pending && !self.hovered && !self.keep_shown() {
                    self.hide();
                }
            }
            DockState::Hiding => {
                self.surface.hide();
                self.set_state(DockState::Hidden);
                self.snap_to_rest();
            }
            DockState::Hidden | DockState::Shown => {
                unreachable!("{} completed while {}", animation, self.state)
            }
        }
        true
    }

    /// Recompute geometry after a work-area change
    pub fn refresh(&mut self, work_area: Option<WorkArea>) {
        if self.refreshing {
            return;
        }
        self.refreshing = true;
        self.apply_work_area(work_area);
        self.refreshing = false;
    }

    fn apply_work_area(&mut self, work_area: Option<WorkArea>) {
        let Some(work_area) = work_area else {
            self.metrics.deferred_refreshes += 1;
            return;
        };

        let mut geometry =
            DockGeometry::new(work_area, self.surface.preferred_height(work_area.width));
        geometry.current_y = match geometry.resting_y(self.state) {
            Some(y) => y,
            None => self
                .geometry
                .map(|previous| previous.current_y)
                .unwrap_or_else(|| geometry.hidden_y()),
        };

        if self.geometry != Some(geometry) {
            self.surface.set_size(geometry.width(), geometry.height);
            self.surface.set_max_size(geometry.width(), geometry.max_height);
            if !self.state.is_transient() {
                self.surface.set_position(geometry.x(), geometry.current_y);
            }
            debug!(
                work_area = %work_area,
                height = geometry.height,
                max_height = geometry.max_height,
                "Dock geometry updated"
            );
            self.geometry = Some(geometry);
            self.metrics.refreshes += 1;
        }

        if !self.hovered && !self.keep_shown() {
            self.hide();
        }
    }

    /// Take the dock out of view immediately, without animating
    pub fn dismiss(&mut self) {
        match self.state {
            DockState::Hidden | DockState::Hiding => {}
            DockState::Showing => self.dismiss_after_show = true,
            DockState::Shown => {
                self.cancel_hide_timer();
                self.surface.hide();
                self.set_state(DockState::Hidden);
                self.snap_to_rest();
            }
        }
    }

    /// Cancel pending work and forget any running animation; idempotent
    pub fn teardown(&mut self) {
        self.cancel_hide_timer();
        self.animation = None;
        self.dismiss_after_show = false;
        self.hide_after_show = false;
        self.menu_owner = None;
        self.hovered = false;
        if self.state != DockState::Hidden {
            self.surface.hide();
            self.set_state(DockState::Hidden);
        }
    }

    fn snap_to_rest(&mut self) {
        let state = self.state;
        if let Some(geometry) = self.geometry.as_mut() {
            if let Some(y) = geometry.resting_y(state) {
                geometry.current_y = y;
                self.surface.set_position(geometry.x(), y);
            }
        }
    }

    fn set_state(&mut self, state: DockState) {
        debug!(from = %self.state, to = %state, "Dock state change");
        self.state = state;
    }
}
