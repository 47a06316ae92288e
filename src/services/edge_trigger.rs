use crate::config::EdgeTriggerConfig;
use crate::host::{
    BarrierDirection, BarrierId, BarrierSpec, DisplayProvider, EdgeBarriers, ShellOverview,
    TimerId, Timers, ZoneId,
};
use crate::models::{EdgeSpec, MonitorRect, Rect};
use crate::services::layout_resolver::MonitorLayoutResolver;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// How a trigger detects the gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MechanismKind {
    Pressure,
    Fallback,
}

/// Host objects backing a trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerMechanism {
    Pressure {
        barrier: BarrierId,
    },
    /// Dwell-time zone; `debounce` holds the single pending timer, if any
    Fallback {
        zone: ZoneId,
        debounce: Option<TimerId>,
    },
}

/// Gesture detector for one free monitor edge
#[derive(Debug, Clone)]
pub struct EdgeTrigger {
    pub monitor: MonitorRect,
    pub edge: EdgeSpec,
    pub mechanism: TriggerMechanism,
    pub suppress_while_button_held: bool,
    pub suppress_while_fullscreen: bool,
    pub pressure_threshold: f64,
}

impl EdgeTrigger {
    pub fn monitor_index(&self) -> usize {
        self.edge.monitor_index
    }

    pub fn kind(&self) -> MechanismKind {
        match self.mechanism {
            TriggerMechanism::Pressure { .. } => MechanismKind::Pressure,
            TriggerMechanism::Fallback { .. } => MechanismKind::Fallback,
        }
    }

    pub fn has_pending_timer(&self) -> bool {
        matches!(
            self.mechanism,
            TriggerMechanism::Fallback {
                debounce: Some(_),
                ..
            }
        )
    }
}

/// A completed, unsuppressed edge gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeGesture {
    pub monitor_index: usize,
}

/// Why a gesture was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suppression {
    ButtonHeld,
    Fullscreen,
    ShellRefused,
}

/// Counters for trigger activity
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EdgeTriggerMetrics {
    pub rebuilds: u64,
    pub gestures_emitted: u64,
    pub suppressed_button_held: u64,
    pub suppressed_fullscreen: u64,
    pub suppressed_by_shell: u64,
    pub barrier_fallbacks: u64,
}

/// Owns one trigger per eligible monitor edge
pub struct EdgeTriggerManager {
    config: EdgeTriggerConfig,
    resolver: MonitorLayoutResolver,
    display: Arc<dyn DisplayProvider>,
    barriers: Arc<dyn EdgeBarriers>,
    timers: Arc<dyn Timers>,
    overview: Arc<dyn ShellOverview>,
    triggers: Vec<Option<EdgeTrigger>>,
    metrics: EdgeTriggerMetrics,
}

impl EdgeTriggerManager {
    pub fn new(
        config: EdgeTriggerConfig,
        display: Arc<dyn DisplayProvider>,
        barriers: Arc<dyn EdgeBarriers>,
        timers: Arc<dyn Timers>,
        overview: Arc<dyn ShellOverview>,
    ) -> Self {
        Self {
            config,
            resolver: MonitorLayoutResolver::new(),
            display,
            barriers,
            timers,
            overview,
            triggers: Vec::new(),
            metrics: EdgeTriggerMetrics::default(),
        }
    }

    /// Replace all triggers with fresh ones for `layout`, index-aligned with it
    pub fn build(&mut self, layout: &[MonitorRect]) -> &[Option<EdgeTrigger>] {
        self.teardown();

        let edges = self.resolver.resolve_eligible_edges(layout);
        let use_barriers = self.barriers.supports_pressure_barriers();

        let triggers: Vec<Option<EdgeTrigger>> = edges
            .into_iter()
            .zip(layout)
            .map(|(edge, monitor)| {
                edge.and_then(|edge| self.create_trigger(*monitor, edge, use_barriers))
            })
            .collect();
        self.triggers = triggers;

        self.metrics.rebuilds += 1;
        info!(
            monitors = layout.len(),
            triggers = self.live_triggers(),
            pressure = use_barriers,
            "Edge triggers rebuilt"
        );

        &self.triggers
    }

    /// Release every barrier, zone and pending timer; safe to call repeatedly
    pub fn teardown(&mut self) {
        for trigger in self.triggers.drain(..).flatten() {
            match trigger.mechanism {
                TriggerMechanism::Pressure { barrier } => {
                    self.barriers.destroy_pressure_barrier(barrier);
                }
                TriggerMechanism::Fallback { zone, debounce } => {
                    if let Some(timer) = debounce {
                        self.timers.cancel(timer);
                    }
                    self.barriers.destroy_reactive_zone(zone);
                }
            }
        }
    }

    fn create_trigger(
        &mut self,
        monitor: MonitorRect,
        edge: EdgeSpec,
        use_barriers: bool,
    ) -> Option<EdgeTrigger> {
        let mechanism = if use_barriers {
            match self.create_barrier(&edge) {
                Some(barrier) => TriggerMechanism::Pressure { barrier },
                None => {
                    self.metrics.barrier_fallbacks += 1;
                    self.create_zone(&edge)?
                }
            }
        } else {
            self.create_zone(&edge)?
        };

        debug!(
            monitor = edge.monitor_index,
            x = edge.x,
            y = edge.y,
            length = edge.length,
            mechanism = ?mechanism,
            "Created edge trigger"
        );

        Some(EdgeTrigger {
            monitor,
            edge,
            mechanism,
            suppress_while_button_held: self.config.suppress_activation_while_button_held,
            suppress_while_fullscreen: self.config.suppress_activation_while_fullscreen,
            pressure_threshold: self.config.pressure_threshold,
        })
    }

    fn create_barrier(&self, edge: &EdgeSpec) -> Option<BarrierId> {
        let spec = BarrierSpec {
            x1: edge.x,
            x2: edge.end_x(),
            y: edge.y,
            direction: BarrierDirection::NegativeY,
            threshold: self.config.pressure_threshold,
            timeout: self.config.pressure_timeout(),
        };

        match self.barriers.create_pressure_barrier(&spec) {
            Ok(barrier) => Some(barrier),
            Err(err) => {
                warn!(
                    monitor = edge.monitor_index,
                    "Pressure barrier unavailable, using fallback zone: {}", err
                );
                None
            }
        }
    }

    fn create_zone(&self, edge: &EdgeSpec) -> Option<TriggerMechanism> {
        // One pixel tall, sitting on the last row of the monitor
        let area = Rect::new(edge.x, edge.y - 1, edge.length, 1);
        match self.barriers.create_reactive_zone(area) {
            Ok(zone) => Some(TriggerMechanism::Fallback {
                zone,
                debounce: None,
            }),
            Err(err) => {
                warn!(
                    monitor = edge.monitor_index,
                    "Failed to create reactive zone, edge left without trigger: {}", err
                );
                None
            }
        }
    }

    /// Pointer entered a fallback zone: start the dwell timer unless one is running
    pub fn on_pointer_enter(&mut self, zone: ZoneId) {
        let delay = self.config.fallback_timeout();
        let timers = self.timers.clone();
        if let Some(TriggerMechanism::Fallback { debounce, .. }) = self.fallback_mut(zone) {
            if debounce.is_none() {
                *debounce = Some(timers.schedule(delay));
            }
        }
    }

    /// Pointer left a fallback zone before the dwell elapsed
    pub fn on_pointer_leave(&mut self, zone: ZoneId) {
        let timers = self.timers.clone();
        if let Some(TriggerMechanism::Fallback { debounce, .. }) = self.fallback_mut(zone) {
            if let Some(timer) = debounce.take() {
                timers.cancel(timer);
            }
        }
    }

    /// Dwell timer expiry; ids not owned by any trigger are ignored
    pub fn on_timer(&mut self, timer: TimerId) -> Option<EdgeGesture> {
        let index = self.triggers.iter_mut().flatten().find_map(|trigger| {
            let monitor_index = trigger.monitor_index();
            match &mut trigger.mechanism {
                TriggerMechanism::Fallback { debounce, .. } if *debounce == Some(timer) => {
                    *debounce = None;
                    Some(monitor_index)
                }
                _ => None,
            }
        })?;
        self.handle_trigger(index)
    }

    /// Pressure threshold crossed on a barrier
    pub fn on_barrier_triggered(&mut self, barrier: BarrierId) -> Option<EdgeGesture> {
        let index = self.triggers.iter().flatten().find_map(|trigger| {
            match trigger.mechanism {
                TriggerMechanism::Pressure { barrier: owned } if owned == barrier => {
                    Some(trigger.monitor_index())
                }
                _ => None,
            }
        })?;
        self.handle_trigger(index)
    }

    fn handle_trigger(&mut self, monitor_index: usize) -> Option<EdgeGesture> {
        let trigger = self.triggers.get(monitor_index)?.as_ref()?;

        if let Some(reason) = self.suppression(trigger) {
            debug!(monitor = monitor_index, reason = ?reason, "Edge gesture suppressed");
            match reason {
                Suppression::ButtonHeld => self.metrics.suppressed_button_held += 1,
                Suppression::Fullscreen => self.metrics.suppressed_fullscreen += 1,
                Suppression::ShellRefused => self.metrics.suppressed_by_shell += 1,
            }
            return None;
        }

        self.metrics.gestures_emitted += 1;
        debug!(monitor = monitor_index, "Edge gesture");
        Some(EdgeGesture { monitor_index })
    }

    fn suppression(&self, trigger: &EdgeTrigger) -> Option<Suppression> {
        if trigger.suppress_while_button_held && self.display.primary_button_held() {
            return Some(Suppression::ButtonHeld);
        }

        if trigger.suppress_while_fullscreen
            && self.display.in_fullscreen(trigger.monitor_index())
            && !self.overview.is_visible()
        {
            return Some(Suppression::Fullscreen);
        }

        if !self.overview.should_toggle() {
            return Some(Suppression::ShellRefused);
        }

        None
    }

    fn fallback_mut(&mut self, zone: ZoneId) -> Option<&mut TriggerMechanism> {
        self.triggers
            .iter_mut()
            .flatten()
            .map(|trigger| &mut trigger.mechanism)
            .find(|mechanism| matches!(mechanism, TriggerMechanism::Fallback { zone: owned, .. } if *owned == zone))
    }

    pub fn triggers(&self) -> &[Option<EdgeTrigger>] {
        &self.triggers
    }

    pub fn live_triggers(&self) -> usize {
        self.triggers.iter().flatten().count()
    }

    /// Dwell timers currently pending across all triggers
    pub fn live_timers(&self) -> usize {
        self.triggers
            .iter()
            .flatten()
            .filter(|trigger| trigger.has_pending_timer())
            .count()
    }

    pub fn metrics(&self) -> &EdgeTriggerMetrics {
        &self.metrics
    }
}
