use std::fmt;

/// Axis-aligned screen rectangle in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Bounds of a single monitor as reported by the host
pub type MonitorRect = Rect;

/// Portion of a monitor usable for windows and the dock
pub type WorkArea = Rect;

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge
    pub fn right(&self) -> i32 {
        self.x.saturating_add(extent(self.width))
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(extent(self.height))
    }

    /// True when the horizontal spans share more than a single boundary coordinate
    pub fn overlaps_horizontally(&self, other: &Rect) -> bool {
        other.x < self.right() && other.right() > self.x
    }
}

/// Length as a signed coordinate offset, clamped to `i32::MAX`
pub(crate) fn extent(length: u32) -> i32 {
    i32::try_from(length).unwrap_or(i32::MAX)
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

/// The free bottom edge of a monitor, eligible to host a trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeSpec {
    /// Index of the owning monitor in the host's enumeration order
    pub monitor_index: usize,
    /// Left end of the activation line
    pub x: i32,
    /// Vertical position of the line (the monitor's bottom)
    pub y: i32,
    /// Horizontal extent of the line
    pub length: u32,
}

impl EdgeSpec {
    pub fn for_monitor(monitor_index: usize, monitor: &MonitorRect) -> Self {
        Self {
            monitor_index,
            x: monitor.x,
            y: monitor.bottom(),
            length: monitor.width,
        }
    }

    /// Exclusive right end of the activation line
    pub fn end_x(&self) -> i32 {
        self.x.saturating_add(extent(self.length))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_are_exclusive() {
        let rect = Rect::new(-1920, 0, 1920, 1080);
        assert_eq!(rect.right(), 0);
        assert_eq!(rect.bottom(), 1080);
    }

    #[test]
    fn oversized_extents_saturate() {
        let rect = Rect::new(i32::MAX - 10, 100, u32::MAX, 50);
        assert_eq!(rect.right(), i32::MAX);
        assert_eq!(rect.bottom(), 150);

        let tall = Rect::new(0, 1, 10, u32::MAX);
        assert_eq!(tall.bottom(), i32::MAX);

        let edge = EdgeSpec::for_monitor(0, &Rect::new(-5, 0, u32::MAX, 10));
        assert_eq!(edge.end_x(), i32::MAX - 5);
    }

    #[test]
    fn touching_spans_do_not_overlap() {
        let left = Rect::new(0, 0, 1920, 1080);
        let right = Rect::new(1920, 1080, 1280, 1024);
        assert!(!left.overlaps_horizontally(&right));
        assert!(!right.overlaps_horizontally(&left));

        let shifted = Rect::new(1919, 1080, 1280, 1024);
        assert!(left.overlaps_horizontally(&shifted));
    }

    #[test]
    fn edge_spec_follows_monitor_bottom() {
        let monitor = Rect::new(100, 200, 800, 600);
        let edge = EdgeSpec::for_monitor(2, &monitor);
        assert_eq!(edge.y, 800);
        assert_eq!(edge.x, 100);
        assert_eq!(edge.end_x(), 900);
        assert_eq!(edge.monitor_index, 2);
    }
}
