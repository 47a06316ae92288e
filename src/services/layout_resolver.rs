use crate::models::{EdgeSpec, MonitorRect};
use tracing::debug;

/// Decides which monitor bottom edges are free to host a trigger
#[derive(Debug, Default, Clone, Copy)]
pub struct MonitorLayoutResolver;

impl MonitorLayoutResolver {
    pub fn new() -> Self {
        Self
    }

    /// One entry per monitor, in the host's order; `None` marks a monitor
    /// whose bottom edge has another screen below it
    pub fn resolve_eligible_edges(&self, layout: &[MonitorRect]) -> Vec<Option<EdgeSpec>> {
        layout
            .iter()
            .enumerate()
            .map(|(index, monitor)| {
                if has_free_bottom_edge(index, layout) {
                    Some(EdgeSpec::for_monitor(index, monitor))
                } else {
                    debug!(monitor = index, bounds = %monitor, "Bottom edge covered by another monitor");
                    None
                }
            })
            .collect()
    }
}

/// A monitor's bottom edge is blocked when any other monitor starts at or below
/// it and shares a non-empty horizontal span with it
pub fn has_free_bottom_edge(index: usize, layout: &[MonitorRect]) -> bool {
    let Some(monitor) = layout.get(index) else {
        return false;
    };
    let bottom = monitor.bottom();

    !layout
        .iter()
        .enumerate()
        .filter(|(other_index, _)| *other_index != index)
        .any(|(_, other)| other.y >= bottom && monitor.overlaps_horizontally(other))
}
