//! In-memory host used by tests and embedders without a live shell
//!
//! Every capability trait is implemented against plain state behind a mutex.
//! Time is manual: [`InMemoryHost::advance`] moves the clock and returns the
//! timer events that became due, [`InMemoryHost::finish_animations`] completes
//! running animations. Counters for live timers, barriers and zones make
//! resource leaks visible.

use super::{
    AnimationId, AppIconHost, BarrierId, BarrierSpec, DisplayProvider, DockSurface, EdgeBarriers,
    HostEvent, IconClickHandler, ShellOverview, TimerId, Timers, WindowSystem, ZoneId,
};
use crate::models::{
    AppId, AppSnapshot, EasingProfile, Modifiers, MonitorRect, MotionDirection, MouseButton,
    Rect, WindowId, WorkArea,
};
use crate::{DockError, Result};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Side effects requested from the in-memory host, in call order
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    AnimateLaunch(AppId),
    ActivateApp(AppId),
    OpenNewWindow(AppId),
    ActivateWindow(WindowId),
    MinimizeWindow(WindowId),
    WorkspaceNeighbor(MotionDirection),
    HideOverview,
    ShowApps,
    NativeClick(AppId),
}

/// Observable state of the dock surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceState {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub max_width: u32,
    pub max_height: u32,
    pub visible: bool,
}

/// An animation started on the surface and not yet completed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunningAnimation {
    pub id: AnimationId,
    pub target_y: i32,
    pub duration: Duration,
    pub profile: EasingProfile,
}

/// The launcher's stock click behaviour, recorded instead of performed
struct NativeClickHandler {
    calls: Arc<Mutex<Vec<HostCall>>>,
}

impl IconClickHandler for NativeClickHandler {
    fn activate(&self, app: &AppId, _button: MouseButton, _modifiers: Modifiers) -> Result<()> {
        self.calls
            .lock()
            .expect("poisoned lock")
            .push(HostCall::NativeClick(app.clone()));
        Ok(())
    }
}

struct HostState {
    monitors: Vec<MonitorRect>,
    primary: usize,
    work_areas: HashMap<usize, WorkArea>,
    fullscreen: HashSet<usize>,
    button_held: bool,

    supports_barriers: bool,
    fail_barrier_creation: bool,
    barriers: HashMap<BarrierId, BarrierSpec>,
    zones: HashMap<ZoneId, Rect>,

    now: Duration,
    timers: BTreeMap<TimerId, Duration>,

    overview_visible: bool,
    should_toggle: bool,

    apps: HashMap<AppId, AppSnapshot>,

    preferred_height: u32,
    surface: SurfaceState,
    animations: Vec<RunningAnimation>,
    animations_started: usize,

    click_handler: Arc<dyn IconClickHandler>,
    next_id: u64,
}

impl HostState {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Single-object host implementing every capability trait
pub struct InMemoryHost {
    state: Mutex<HostState>,
    calls: Arc<Mutex<Vec<HostCall>>>,
}

impl Default for InMemoryHost {
    fn default() -> Self {
        Self::new(vec![MonitorRect::new(0, 0, 1920, 1080)])
    }
}

impl InMemoryHost {
    /// Host with the given monitors; the first is primary and its work area is
    /// the full monitor minus a 32 px top panel
    pub fn new(monitors: Vec<MonitorRect>) -> Self {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let native: Arc<dyn IconClickHandler> = Arc::new(NativeClickHandler {
            calls: calls.clone(),
        });

        let work_areas = monitors
            .iter()
            .enumerate()
            .map(|(index, monitor)| {
                let area = Rect::new(
                    monitor.x,
                    monitor.y + 32,
                    monitor.width,
                    monitor.height.saturating_sub(32),
                );
                (index, area)
            })
            .collect();

        Self {
            state: Mutex::new(HostState {
                monitors,
                primary: 0,
                work_areas,
                fullscreen: HashSet::new(),
                button_held: false,
                supports_barriers: true,
                fail_barrier_creation: false,
                barriers: HashMap::new(),
                zones: HashMap::new(),
                now: Duration::ZERO,
                timers: BTreeMap::new(),
                overview_visible: false,
                should_toggle: true,
                apps: HashMap::new(),
                preferred_height: 64,
                surface: SurfaceState::default(),
                animations: Vec::new(),
                animations_started: 0,
                click_handler: native,
                next_id: 0,
            }),
            calls,
        }
    }

    fn state(&self) -> MutexGuard<'_, HostState> {
        self.state.lock().expect("poisoned lock")
    }

    fn record(&self, call: HostCall) {
        self.calls.lock().expect("poisoned lock").push(call);
    }

    // Layout and pointer

    pub fn set_monitors(&self, monitors: Vec<MonitorRect>) {
        self.state().monitors = monitors;
    }

    pub fn set_work_area(&self, monitor: usize, area: Option<WorkArea>) {
        let mut state = self.state();
        match area {
            Some(area) => state.work_areas.insert(monitor, area),
            None => state.work_areas.remove(&monitor),
        };
    }

    pub fn set_fullscreen(&self, monitor: usize, fullscreen: bool) {
        let mut state = self.state();
        if fullscreen {
            state.fullscreen.insert(monitor);
        } else {
            state.fullscreen.remove(&monitor);
        }
    }

    pub fn set_button_held(&self, held: bool) {
        self.state().button_held = held;
    }

    // Barriers

    pub fn set_barrier_support(&self, supported: bool) {
        self.state().supports_barriers = supported;
    }

    /// Make barrier creation fail even though barriers are reported as supported
    pub fn set_barrier_failure(&self, fail: bool) {
        self.state().fail_barrier_creation = fail;
    }

    pub fn live_barriers(&self) -> usize {
        self.state().barriers.len()
    }

    pub fn barrier_specs(&self) -> Vec<BarrierSpec> {
        let state = self.state();
        let mut ids: Vec<_> = state.barriers.keys().copied().collect();
        ids.sort();
        ids.iter().map(|id| state.barriers[id].clone()).collect()
    }

    pub fn live_zones(&self) -> usize {
        self.state().zones.len()
    }

    /// Live reactive zones ordered by creation
    pub fn zones(&self) -> Vec<(ZoneId, Rect)> {
        let state = self.state();
        let mut zones: Vec<_> = state.zones.iter().map(|(id, area)| (*id, *area)).collect();
        zones.sort_by_key(|(id, _)| *id);
        zones
    }

    // Time

    /// Move the clock forward and return the timer events that became due, in deadline order
    pub fn advance(&self, by: Duration) -> Vec<HostEvent> {
        let mut state = self.state();
        state.now += by;
        let now = state.now;

        let mut due: Vec<(Duration, TimerId)> = state
            .timers
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(id, deadline)| (*deadline, *id))
            .collect();
        due.sort();

        for (_, id) in &due {
            state.timers.remove(id);
        }

        due.into_iter()
            .map(|(_, id)| HostEvent::TimerFired(id))
            .collect()
    }

    // Overview

    pub fn set_overview_visible(&self, visible: bool) {
        self.state().overview_visible = visible;
    }

    pub fn set_should_toggle(&self, should_toggle: bool) {
        self.state().should_toggle = should_toggle;
    }

    // Applications

    pub fn set_app(&self, app: AppSnapshot) {
        self.state().apps.insert(app.id.clone(), app);
    }

    pub fn app(&self, id: &AppId) -> Option<AppSnapshot> {
        self.state().apps.get(id).cloned()
    }

    /// Side effects recorded so far
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().expect("poisoned lock").clone()
    }

    pub fn take_calls(&self) -> Vec<HostCall> {
        std::mem::take(&mut *self.calls.lock().expect("poisoned lock"))
    }

    /// Simulate a click on a launcher icon through whichever handler is installed
    pub fn click(&self, app: &AppId, button: MouseButton, modifiers: Modifiers) -> Result<()> {
        let handler = self.state().click_handler.clone();
        handler.activate(app, button, modifiers)
    }

    // Surface

    pub fn set_preferred_height(&self, height: u32) {
        self.state().preferred_height = height;
    }

    pub fn surface(&self) -> SurfaceState {
        self.state().surface
    }

    pub fn animations_started(&self) -> usize {
        self.state().animations_started
    }

    pub fn running_animations(&self) -> Vec<RunningAnimation> {
        self.state().animations.clone()
    }

    /// Complete every running animation and return the completion events
    pub fn finish_animations(&self) -> Vec<HostEvent> {
        let mut state = self.state();
        let finished = std::mem::take(&mut state.animations);
        if let Some(last) = finished.last() {
            state.surface.y = last.target_y;
        }
        finished
            .into_iter()
            .map(|animation| HostEvent::AnimationCompleted(animation.id))
            .collect()
    }
}

impl Timers for InMemoryHost {
    fn schedule(&self, delay: Duration) -> TimerId {
        let mut state = self.state();
        let id = TimerId(state.next_id());
        let deadline = state.now + delay;
        state.timers.insert(id, deadline);
        id
    }

    fn cancel(&self, id: TimerId) -> bool {
        self.state().timers.remove(&id).is_some()
    }

    fn pending(&self) -> usize {
        self.state().timers.len()
    }
}

impl DisplayProvider for InMemoryHost {
    fn monitors(&self) -> Vec<MonitorRect> {
        self.state().monitors.clone()
    }

    fn primary_monitor(&self) -> usize {
        self.state().primary
    }

    fn work_area(&self, monitor: usize) -> Option<WorkArea> {
        self.state().work_areas.get(&monitor).copied()
    }

    fn in_fullscreen(&self, monitor: usize) -> bool {
        self.state().fullscreen.contains(&monitor)
    }

    fn primary_button_held(&self) -> bool {
        self.state().button_held
    }
}

impl EdgeBarriers for InMemoryHost {
    fn supports_pressure_barriers(&self) -> bool {
        self.state().supports_barriers
    }

    fn create_pressure_barrier(&self, spec: &BarrierSpec) -> Result<BarrierId> {
        let mut state = self.state();
        if !state.supports_barriers || state.fail_barrier_creation {
            return Err(DockError::HostError("pressure barriers unavailable".to_string()).into());
        }
        let id = BarrierId(state.next_id());
        state.barriers.insert(id, spec.clone());
        Ok(id)
    }

    fn destroy_pressure_barrier(&self, id: BarrierId) {
        self.state().barriers.remove(&id);
    }

    fn create_reactive_zone(&self, area: Rect) -> Result<ZoneId> {
        let mut state = self.state();
        let id = ZoneId(state.next_id());
        state.zones.insert(id, area);
        Ok(id)
    }

    fn destroy_reactive_zone(&self, id: ZoneId) {
        self.state().zones.remove(&id);
    }
}

impl ShellOverview for InMemoryHost {
    fn is_visible(&self) -> bool {
        self.state().overview_visible
    }

    fn should_toggle(&self) -> bool {
        self.state().should_toggle
    }

    fn hide(&self) {
        self.state().overview_visible = false;
        self.record(HostCall::HideOverview);
    }

    fn show_apps(&self) {
        self.state().overview_visible = true;
        self.record(HostCall::ShowApps);
    }
}

impl WindowSystem for InMemoryHost {
    fn application(&self, app: &AppId) -> Result<AppSnapshot> {
        self.state()
            .apps
            .get(app)
            .cloned()
            .ok_or_else(|| DockError::ApplicationNotFound(app.to_string()).into())
    }

    fn animate_launch(&self, app: &AppId) {
        self.record(HostCall::AnimateLaunch(app.clone()));
    }

    fn activate_app(&self, app: &AppId) {
        self.record(HostCall::ActivateApp(app.clone()));
    }

    fn open_new_window(&self, app: &AppId) {
        self.record(HostCall::OpenNewWindow(app.clone()));
    }

    fn activate_window(&self, window: WindowId) {
        {
            let mut state = self.state();
            for app in state.apps.values_mut() {
                for candidate in &mut app.windows {
                    candidate.has_focus = candidate.id == window;
                }
            }
        }
        self.record(HostCall::ActivateWindow(window));
    }

    fn minimize_window(&self, window: WindowId) {
        {
            let mut state = self.state();
            for app in state.apps.values_mut() {
                for candidate in app.windows.iter_mut().filter(|w| w.id == window) {
                    candidate.has_focus = false;
                }
            }
        }
        self.record(HostCall::MinimizeWindow(window));
    }

    fn activate_workspace_neighbor(&self, direction: MotionDirection) {
        self.record(HostCall::WorkspaceNeighbor(direction));
    }
}

impl DockSurface for InMemoryHost {
    fn preferred_height(&self, _for_width: u32) -> u32 {
        self.state().preferred_height
    }

    fn set_position(&self, x: i32, y: i32) {
        let mut state = self.state();
        state.surface.x = x;
        state.surface.y = y;
    }

    fn set_size(&self, width: u32, height: u32) {
        let mut state = self.state();
        state.surface.width = width;
        state.surface.height = height;
    }

    fn set_max_size(&self, width: u32, height: u32) {
        let mut state = self.state();
        state.surface.max_width = width;
        state.surface.max_height = height;
    }

    fn show(&self) {
        self.state().surface.visible = true;
    }

    fn hide(&self) {
        self.state().surface.visible = false;
    }

    fn animate_to(&self, y: i32, duration: Duration, profile: EasingProfile) -> AnimationId {
        let mut state = self.state();
        let id = AnimationId(state.next_id());
        state.animations.push(RunningAnimation {
            id,
            target_y: y,
            duration,
            profile,
        });
        state.animations_started += 1;
        id
    }
}

impl AppIconHost for InMemoryHost {
    fn replace_click_handler(
        &self,
        handler: Arc<dyn IconClickHandler>,
    ) -> Arc<dyn IconClickHandler> {
        std::mem::replace(&mut self.state().click_handler, handler)
    }
}
