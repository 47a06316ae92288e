use super::{AnimationId, BarrierId, ItemId, TimerId, ZoneId};
use crate::models::ScrollDirection;

/// Notifications delivered from the host to the dock, one at a time
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// Monitors were added, removed or resized
    MonitorsChanged,
    /// The shell recomputed work areas
    WorkAreasChanged,
    PointerEnteredZone(ZoneId),
    PointerLeftZone(ZoneId),
    /// A pressure barrier crossed its threshold
    BarrierTriggered(BarrierId),
    TimerFired(TimerId),
    AnimationCompleted(AnimationId),
    DockHoverChanged(bool),
    ItemMenuChanged { item: ItemId, opened: bool },
    DockScrolled(ScrollDirection),
    ShowAppsClicked,
    OverviewShown,
    StartupComplete,
}
