//! Configuration loaded from disk drives the dock's timings

use dockdash::{
    config::DockConfig,
    host::{HostEvent, HostServices, InMemoryHost},
    DockOrchestrator, DockState, EasingProfile, TriggerMechanism,
};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tempfile::NamedTempFile;

fn config_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_configured_dwell_and_animation_durations() {
    let file = config_file(
        r#"
        [edge]
        fallback_timeout_ms = 450

        [dock]
        show_animation_ms = 250
        auto_hide_delay_ms = 800
        "#,
    );
    let config = DockConfig::from_file(file.path()).unwrap();

    let host = Arc::new(InMemoryHost::default());
    host.set_barrier_support(false);
    let mut orchestrator = DockOrchestrator::new(config, HostServices::in_memory(&host));
    orchestrator.enable().unwrap();

    let zone = host.zones()[0].0;
    orchestrator.handle_event(HostEvent::PointerEnteredZone(zone));
    assert!(host.advance(Duration::from_millis(449)).is_empty());
    for event in host.advance(Duration::from_millis(1)) {
        orchestrator.handle_event(event);
    }

    let animation = host.running_animations()[0];
    assert_eq!(animation.duration, Duration::from_millis(250));
    assert_eq!(animation.profile, EasingProfile::Show);

    for event in host.finish_animations() {
        orchestrator.handle_event(event);
    }
    orchestrator.handle_event(HostEvent::DockHoverChanged(false));
    assert!(host.advance(Duration::from_millis(799)).is_empty());
    for event in host.advance(Duration::from_millis(1)) {
        orchestrator.handle_event(event);
    }
    assert_eq!(orchestrator.controller().state(), DockState::Hiding);
}

#[test]
fn test_invalid_file_is_rejected_on_load() {
    let file = config_file("[edge]\npressure_threshold = -5.0\n");
    assert!(DockConfig::from_file(file.path()).is_err());
}

#[test]
fn test_invalid_config_cannot_enable() {
    let mut config = DockConfig::default();
    config.edge.pressure_threshold = -5.0;

    let host = Arc::new(InMemoryHost::default());
    let mut orchestrator = DockOrchestrator::new(config, HostServices::in_memory(&host));
    let err = orchestrator.enable().unwrap_err();
    assert!(err.to_string().contains("pressure_threshold"));
    assert!(!orchestrator.is_enabled());
    assert_eq!(host.live_barriers(), 0);
}

#[test]
fn test_hover_out_during_slow_show_still_hides() {
    let file = config_file(
        r#"
        [dock]
        show_animation_ms = 500
        auto_hide_delay_ms = 300
        "#,
    );
    let config = DockConfig::from_file(file.path()).unwrap();

    let host = Arc::new(InMemoryHost::default());
    let mut orchestrator = DockOrchestrator::new(config, HostServices::in_memory(&host));
    orchestrator.enable().unwrap();

    let barrier = match orchestrator.triggers().triggers()[0].as_ref().unwrap().mechanism {
        TriggerMechanism::Pressure { barrier } => barrier,
        other => panic!("expected a pressure barrier, got {:?}", other),
    };
    orchestrator.handle_event(HostEvent::BarrierTriggered(barrier));
    orchestrator.handle_event(HostEvent::DockHoverChanged(true));
    orchestrator.handle_event(HostEvent::DockHoverChanged(false));

    for event in host.advance(Duration::from_millis(300)) {
        orchestrator.handle_event(event);
    }
    assert_eq!(orchestrator.controller().state(), DockState::Showing);

    for event in host.finish_animations() {
        orchestrator.handle_event(event);
    }
    assert_eq!(orchestrator.controller().state(), DockState::Hiding);
    for event in host.finish_animations() {
        orchestrator.handle_event(event);
    }
    assert_eq!(orchestrator.controller().state(), DockState::Hidden);
    assert!(!host.surface().visible);
}
