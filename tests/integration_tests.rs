//! End-to-end tests driving the orchestrator against the in-memory host

use dockdash::{
    config::DockConfig,
    host::{HostCall, HostEvent, HostServices, InMemoryHost, ItemId, Timers},
    AppId, AppSnapshot, AppState, DockOrchestrator, DockState, MechanismKind, Modifiers,
    MonitorRect, MouseButton, TriggerMechanism, WindowId, WindowSnapshot,
};
use std::sync::Arc;
use std::time::Duration;

struct Dock {
    host: Arc<InMemoryHost>,
    orchestrator: DockOrchestrator,
}

impl Dock {
    fn enabled(host: InMemoryHost) -> Self {
        let host = Arc::new(host);
        let mut orchestrator =
            DockOrchestrator::new(DockConfig::default(), HostServices::in_memory(&host));
        orchestrator.enable().expect("enable");
        Self { host, orchestrator }
    }

    fn fallback() -> Self {
        let host = InMemoryHost::default();
        host.set_barrier_support(false);
        Self::enabled(host)
    }

    fn send(&mut self, event: HostEvent) {
        self.orchestrator.handle_event(event);
    }

    fn advance(&mut self, millis: u64) {
        for event in self.host.advance(Duration::from_millis(millis)) {
            self.orchestrator.handle_event(event);
        }
    }

    fn finish_animations(&mut self) {
        for event in self.host.finish_animations() {
            self.orchestrator.handle_event(event);
        }
    }

    fn zone(&self) -> dockdash::host::ZoneId {
        self.host.zones()[0].0
    }

    fn barrier(&self, monitor: usize) -> dockdash::host::BarrierId {
        match self.orchestrator.triggers().triggers()[monitor]
            .as_ref()
            .expect("trigger")
            .mechanism
        {
            TriggerMechanism::Pressure { barrier } => barrier,
            other => panic!("expected a pressure barrier, got {:?}", other),
        }
    }

    fn state(&self) -> DockState {
        self.orchestrator.controller().state()
    }
}

#[test]
fn test_dwell_on_fallback_zone_shows_then_auto_hides() {
    let mut dock = Dock::fallback();
    let zone = dock.zone();

    dock.send(HostEvent::PointerEnteredZone(zone));
    dock.advance(299);
    assert_eq!(dock.state(), DockState::Hidden);

    dock.advance(1);
    assert_eq!(dock.state(), DockState::Showing);
    dock.finish_animations();
    assert_eq!(dock.state(), DockState::Shown);
    assert_eq!(dock.host.surface().y, 1080 - 64);

    // Pointer passes over the dock and leaves again
    dock.send(HostEvent::DockHoverChanged(true));
    dock.send(HostEvent::DockHoverChanged(false));
    dock.advance(300);
    assert_eq!(dock.state(), DockState::Hiding);
    dock.finish_animations();
    assert_eq!(dock.state(), DockState::Hidden);
    assert!(!dock.host.surface().visible);
}

#[test]
fn test_rapid_enter_leave_enter_fires_once() {
    let mut dock = Dock::fallback();
    let zone = dock.zone();

    dock.send(HostEvent::PointerEnteredZone(zone));
    dock.advance(100);
    dock.send(HostEvent::PointerLeftZone(zone));
    dock.send(HostEvent::PointerEnteredZone(zone));
    dock.send(HostEvent::PointerEnteredZone(zone));
    assert_eq!(dock.orchestrator.triggers().live_timers(), 1);
    assert_eq!(dock.host.pending(), 1);

    dock.advance(299);
    assert_eq!(dock.state(), DockState::Hidden);
    dock.advance(1);
    assert_eq!(dock.state(), DockState::Showing);
    assert_eq!(dock.host.animations_started(), 1);
    assert_eq!(dock.orchestrator.triggers().metrics().gestures_emitted, 1);
}

#[test]
fn test_pressure_gesture_toggles_in_and_out() {
    let mut dock = Dock::enabled(InMemoryHost::default());
    let barrier = dock.barrier(0);

    let specs = dock.host.barrier_specs();
    assert_eq!(specs.len(), 1);
    assert_eq!((specs[0].x1, specs[0].x2, specs[0].y), (0, 1920, 1080));
    assert_eq!(specs[0].threshold, 100.0);
    assert_eq!(specs[0].timeout, Duration::from_millis(1000));

    dock.send(HostEvent::DockHoverChanged(true));
    dock.send(HostEvent::BarrierTriggered(barrier));
    // Second push while the show animation runs is dropped
    dock.send(HostEvent::BarrierTriggered(barrier));
    dock.finish_animations();
    assert_eq!(dock.state(), DockState::Shown);
    assert_eq!(dock.host.animations_started(), 1);

    dock.send(HostEvent::BarrierTriggered(barrier));
    assert_eq!(dock.state(), DockState::Hiding);
    dock.finish_animations();
    assert_eq!(dock.state(), DockState::Hidden);
}

#[test]
fn test_failed_barrier_creation_falls_back_to_zone() {
    let host = InMemoryHost::default();
    host.set_barrier_failure(true);
    let dock = Dock::enabled(host);

    let trigger = dock.orchestrator.triggers().triggers()[0]
        .as_ref()
        .expect("trigger");
    assert_eq!(trigger.kind(), MechanismKind::Fallback);
    assert_eq!(dock.host.live_barriers(), 0);
    assert_eq!(dock.host.zones()[0].1, dockdash::Rect::new(0, 1079, 1920, 1));
}

#[test]
fn test_stacked_monitors_only_arm_the_lower_edge() {
    let host = InMemoryHost::new(vec![
        MonitorRect::new(0, 0, 1920, 1080),
        MonitorRect::new(0, 1080, 1920, 1080),
    ]);
    let dock = Dock::enabled(host);

    let triggers = dock.orchestrator.triggers().triggers();
    assert_eq!(triggers.len(), 2);
    assert!(triggers[0].is_none());
    assert_eq!(triggers[1].as_ref().map(|t| t.monitor_index()), Some(1));
    assert_eq!(dock.host.live_barriers(), 1);
}

#[test]
fn test_gesture_suppressed_while_button_held_or_fullscreen() {
    let mut dock = Dock::enabled(InMemoryHost::default());
    let barrier = dock.barrier(0);

    dock.host.set_button_held(true);
    dock.send(HostEvent::BarrierTriggered(barrier));
    assert_eq!(dock.state(), DockState::Hidden);

    dock.host.set_button_held(false);
    dock.host.set_fullscreen(0, true);
    dock.send(HostEvent::BarrierTriggered(barrier));
    assert_eq!(dock.state(), DockState::Hidden);

    dock.host.set_should_toggle(false);
    dock.host.set_fullscreen(0, false);
    dock.send(HostEvent::BarrierTriggered(barrier));
    assert_eq!(dock.state(), DockState::Hidden);

    let metrics = dock.orchestrator.triggers().metrics();
    assert_eq!(metrics.suppressed_button_held, 1);
    assert_eq!(metrics.suppressed_fullscreen, 1);
    assert_eq!(metrics.suppressed_by_shell, 1);
    assert_eq!(dock.host.animations_started(), 0);
}

#[test]
fn test_work_area_change_moves_the_shown_dock() {
    let mut dock = Dock::enabled(InMemoryHost::default());
    let barrier = dock.barrier(0);
    dock.send(HostEvent::DockHoverChanged(true));
    dock.send(HostEvent::BarrierTriggered(barrier));
    dock.finish_animations();

    dock.host
        .set_work_area(0, Some(dockdash::Rect::new(0, 32, 1920, 1000)));
    dock.send(HostEvent::WorkAreasChanged);
    assert_eq!(dock.state(), DockState::Shown);
    assert_eq!(dock.host.surface().y, 1032 - 64);

    // Same inputs again: nothing moves, nothing animates
    let started = dock.host.animations_started();
    dock.send(HostEvent::WorkAreasChanged);
    assert_eq!(dock.host.animations_started(), started);
    assert_eq!(dock.orchestrator.controller().metrics().refreshes, 2);
}

#[test]
fn test_missing_work_area_defers_show() {
    let host = InMemoryHost::default();
    host.set_work_area(0, None);
    let mut dock = Dock::enabled(host);
    let barrier = dock.barrier(0);

    dock.send(HostEvent::BarrierTriggered(barrier));
    assert_eq!(dock.state(), DockState::Hidden);

    dock.host
        .set_work_area(0, Some(dockdash::Rect::new(0, 32, 1920, 1048)));
    dock.send(HostEvent::WorkAreasChanged);
    dock.send(HostEvent::BarrierTriggered(barrier));
    assert_eq!(dock.state(), DockState::Showing);
}

#[test]
fn test_menu_keeps_dock_open_until_closed() {
    let mut dock = Dock::enabled(InMemoryHost::default());
    let barrier = dock.barrier(0);
    dock.send(HostEvent::DockHoverChanged(true));
    dock.send(HostEvent::BarrierTriggered(barrier));
    dock.finish_animations();

    dock.send(HostEvent::ItemMenuChanged {
        item: ItemId(9),
        opened: true,
    });
    dock.send(HostEvent::DockHoverChanged(false));
    dock.advance(5_000);
    assert_eq!(dock.state(), DockState::Shown);

    dock.send(HostEvent::ItemMenuChanged {
        item: ItemId(9),
        opened: false,
    });
    dock.advance(300);
    assert_eq!(dock.state(), DockState::Hiding);
}

#[test]
fn test_icon_clicks_cycle_through_windows() {
    let dock = Dock::enabled(InMemoryHost::default());
    let app = AppId::new("org.example.Editor");
    dock.host.set_app(AppSnapshot {
        id: app.clone(),
        state: AppState::Running,
        can_open_new_window: true,
        windows: vec![
            WindowSnapshot::normal(1),
            WindowSnapshot::normal(2).focused(),
            WindowSnapshot::normal(3),
        ],
    });

    dock.host
        .click(&app, MouseButton::Primary, Modifiers::NONE)
        .unwrap();
    dock.host
        .click(&app, MouseButton::Primary, Modifiers::NONE)
        .unwrap();

    assert_eq!(
        dock.host.calls(),
        vec![
            HostCall::ActivateWindow(WindowId(3)),
            HostCall::ActivateWindow(WindowId(1)),
        ]
    );
}

#[test]
fn test_icon_click_on_single_window_minimizes_then_restores() {
    let dock = Dock::enabled(InMemoryHost::default());
    let app = AppId::new("org.example.Terminal");
    dock.host.set_app(AppSnapshot {
        id: app.clone(),
        state: AppState::Running,
        can_open_new_window: true,
        windows: vec![WindowSnapshot::normal(4).focused()],
    });

    dock.host
        .click(&app, MouseButton::Primary, Modifiers::NONE)
        .unwrap();
    dock.host
        .click(&app, MouseButton::Primary, Modifiers::NONE)
        .unwrap();

    assert_eq!(
        dock.host.calls(),
        vec![
            HostCall::MinimizeWindow(WindowId(4)),
            HostCall::HideOverview,
            HostCall::ActivateWindow(WindowId(4)),
            HostCall::HideOverview,
        ]
    );
}

#[test]
fn test_disable_releases_everything_and_restores_handler() {
    let mut dock = Dock::fallback();
    let zone = dock.zone();
    dock.send(HostEvent::PointerEnteredZone(zone));
    dock.advance(300);
    dock.send(HostEvent::DockHoverChanged(false));
    assert!(dock.host.pending() > 0);
    assert_eq!(dock.host.live_zones(), 1);

    dock.orchestrator.disable();
    assert_eq!(dock.host.pending(), 0);
    assert_eq!(dock.host.live_zones(), 0);
    assert_eq!(dock.host.live_barriers(), 0);
    assert_eq!(dock.state(), DockState::Hidden);

    // Completions and timers from before the teardown are inert
    dock.orchestrator.disable();
    dock.finish_animations();
    assert_eq!(dock.state(), DockState::Hidden);

    let app = AppId::new("org.example.Files");
    dock.host
        .click(&app, MouseButton::Primary, Modifiers::NONE)
        .unwrap();
    assert_eq!(dock.host.calls(), vec![HostCall::NativeClick(app)]);
}

#[test]
fn test_enable_after_disable_rebuilds() {
    let mut dock = Dock::enabled(InMemoryHost::default());
    dock.orchestrator.disable();
    assert_eq!(dock.host.live_barriers(), 0);

    dock.orchestrator.enable().unwrap();
    assert_eq!(dock.host.live_barriers(), 1);
    assert!(dock.orchestrator.is_enabled());
}
