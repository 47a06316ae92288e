//! Host integration layer for dockdash
//!
//! The desktop shell is reached only through the capability traits below.
//! Implementations must not call back into dockdash synchronously: timer
//! expiry, animation completion, pointer crossings and other notifications
//! are delivered later as [`HostEvent`]s, one at a time.

pub mod events;
pub mod memory;

pub use events::*;
pub use memory::*;

use crate::models::{
    AppId, AppSnapshot, EasingProfile, Modifiers, MonitorRect, MotionDirection, MouseButton,
    Rect, WindowId, WorkArea,
};
use crate::Result;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

macro_rules! handle_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

handle_id!(
    /// Handle of a scheduled one-shot timer
    TimerId,
    "timer"
);
handle_id!(
    /// Handle of a pressure barrier
    BarrierId,
    "barrier"
);
handle_id!(
    /// Handle of a reactive input region
    ZoneId,
    "zone"
);
handle_id!(
    /// Handle of a running dock animation
    AnimationId,
    "animation"
);
handle_id!(
    /// Handle of a dock item that can own a popup menu
    ItemId,
    "item"
);

/// Direction in which the pointer is blocked by a barrier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarrierDirection {
    /// Blocks motion towards smaller Y, i.e. pressure pushing down onto a bottom edge
    NegativeY,
}

/// Geometry and tuning of a pressure barrier
#[derive(Debug, Clone, PartialEq)]
pub struct BarrierSpec {
    pub x1: i32,
    pub x2: i32,
    pub y: i32,
    pub direction: BarrierDirection,
    pub threshold: f64,
    pub timeout: Duration,
}

/// One-shot timers; expiry arrives as [`HostEvent::TimerFired`]
pub trait Timers: Send + Sync {
    fn schedule(&self, delay: Duration) -> TimerId;

    /// Returns false when the timer already fired or was cancelled
    fn cancel(&self, id: TimerId) -> bool;

    /// Number of timers that have neither fired nor been cancelled
    fn pending(&self) -> usize;
}

/// Monitor layout and pointer state
pub trait DisplayProvider: Send + Sync {
    /// Monitors in host enumeration order
    fn monitors(&self) -> Vec<MonitorRect>;

    fn primary_monitor(&self) -> usize;

    /// Usable area of a monitor; None while the shell has not computed it yet
    fn work_area(&self, monitor: usize) -> Option<WorkArea>;

    fn in_fullscreen(&self, monitor: usize) -> bool;

    fn primary_button_held(&self) -> bool;
}

/// Pointer barriers and reactive regions along screen edges
pub trait EdgeBarriers: Send + Sync {
    fn supports_pressure_barriers(&self) -> bool;

    fn create_pressure_barrier(&self, spec: &BarrierSpec) -> Result<BarrierId>;

    fn destroy_pressure_barrier(&self, id: BarrierId);

    fn create_reactive_zone(&self, area: Rect) -> Result<ZoneId>;

    fn destroy_reactive_zone(&self, id: ZoneId);
}

/// The shell overview that normally hosts the launcher strip
#[cfg_attr(test, mockall::automock)]
pub trait ShellOverview: Send + Sync {
    fn is_visible(&self) -> bool;

    /// Whether a hot-corner style gesture may toggle right now (no modal dialog etc.)
    fn should_toggle(&self) -> bool;

    fn hide(&self);

    fn show_apps(&self);
}

/// Window-manager queries and commands
#[cfg_attr(test, mockall::automock)]
pub trait WindowSystem: Send + Sync {
    /// Live state of an application and all its windows
    fn application(&self, app: &AppId) -> Result<AppSnapshot>;

    fn animate_launch(&self, app: &AppId);

    fn activate_app(&self, app: &AppId);

    fn open_new_window(&self, app: &AppId);

    fn activate_window(&self, window: WindowId);

    fn minimize_window(&self, window: WindowId);

    fn activate_workspace_neighbor(&self, direction: MotionDirection);
}

/// The renderable dock, driven by the visibility controller
pub trait DockSurface: Send + Sync {
    fn preferred_height(&self, for_width: u32) -> u32;

    fn set_position(&self, x: i32, y: i32);

    fn set_size(&self, width: u32, height: u32);

    fn set_max_size(&self, width: u32, height: u32);

    fn show(&self);

    fn hide(&self);

    /// Start animating the vertical position; completion arrives as
    /// [`HostEvent::AnimationCompleted`] exactly once
    fn animate_to(&self, y: i32, duration: Duration, profile: EasingProfile) -> AnimationId;
}

/// Handler invoked when a launcher icon is clicked
pub trait IconClickHandler: Send + Sync {
    fn activate(&self, app: &AppId, button: MouseButton, modifiers: Modifiers) -> Result<()>;
}

/// Slot holding the launcher's icon click handler
pub trait AppIconHost: Send + Sync {
    /// Install a handler and hand back the one it replaced
    fn replace_click_handler(
        &self,
        handler: Arc<dyn IconClickHandler>,
    ) -> Arc<dyn IconClickHandler>;
}

/// Every capability the dock consumes, injected at construction
#[derive(Clone)]
pub struct HostServices {
    pub display: Arc<dyn DisplayProvider>,
    pub barriers: Arc<dyn EdgeBarriers>,
    pub timers: Arc<dyn Timers>,
    pub overview: Arc<dyn ShellOverview>,
    pub windows: Arc<dyn WindowSystem>,
    pub surface: Arc<dyn DockSurface>,
    pub icons: Arc<dyn AppIconHost>,
}

impl HostServices {
    /// Wire every capability to the same in-memory host
    pub fn in_memory(host: &Arc<InMemoryHost>) -> Self {
        Self {
            display: host.clone(),
            barriers: host.clone(),
            timers: host.clone(),
            overview: host.clone(),
            windows: host.clone(),
            surface: host.clone(),
            icons: host.clone(),
        }
    }

    /// Same services with a different timer source
    pub fn with_timers(mut self, timers: Arc<dyn Timers>) -> Self {
        self.timers = timers;
        self
    }
}
