use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Complete dock configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DockConfig {
    pub edge: EdgeTriggerConfig,
    pub dock: DockBehaviorConfig,
    /// Leave the shell overview open once startup completes
    pub show_overview_at_startup: bool,
}

/// Tuning of the screen-edge triggers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeTriggerConfig {
    /// Accumulated pointer pressure needed to fire a barrier
    pub pressure_threshold: f64,
    /// Time after which accumulated pressure decays
    pub pressure_timeout_ms: u64,
    /// Dwell time on the fallback zone before it fires
    pub fallback_timeout_ms: u64,
    pub suppress_activation_while_button_held: bool,
    pub suppress_activation_while_fullscreen: bool,
}

impl Default for EdgeTriggerConfig {
    fn default() -> Self {
        Self {
            pressure_threshold: 100.0,
            pressure_timeout_ms: 1000,
            fallback_timeout_ms: 300,
            suppress_activation_while_button_held: true,
            suppress_activation_while_fullscreen: true,
        }
    }
}

impl EdgeTriggerConfig {
    pub fn pressure_timeout(&self) -> Duration {
        Duration::from_millis(self.pressure_timeout_ms)
    }

    pub fn fallback_timeout(&self) -> Duration {
        Duration::from_millis(self.fallback_timeout_ms)
    }
}

/// Timing of the dock's auto-hide behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DockBehaviorConfig {
    /// Delay between the pointer leaving the dock and the dock hiding
    pub auto_hide_delay_ms: u64,
    pub show_animation_ms: u64,
    /// Slower than showing so accidental exits feel less abrupt
    pub hide_animation_ms: u64,
}

impl Default for DockBehaviorConfig {
    fn default() -> Self {
        Self {
            auto_hide_delay_ms: 300,
            show_animation_ms: 100,
            hide_animation_ms: 200,
        }
    }
}

impl DockBehaviorConfig {
    pub fn auto_hide_delay(&self) -> Duration {
        Duration::from_millis(self.auto_hide_delay_ms)
    }

    pub fn show_duration(&self) -> Duration {
        Duration::from_millis(self.show_animation_ms)
    }

    pub fn hide_duration(&self) -> Duration {
        Duration::from_millis(self.hide_animation_ms)
    }
}

impl DockConfig {
    /// Check value ranges; returns a message per offending field
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut problems = Vec::new();

        if !self.edge.pressure_threshold.is_finite() || self.edge.pressure_threshold <= 0.0 {
            problems.push(format!(
                "edge.pressure_threshold must be positive, got {}",
                self.edge.pressure_threshold
            ));
        }

        let durations = [
            ("edge.pressure_timeout_ms", self.edge.pressure_timeout_ms),
            ("edge.fallback_timeout_ms", self.edge.fallback_timeout_ms),
            ("dock.auto_hide_delay_ms", self.dock.auto_hide_delay_ms),
            ("dock.show_animation_ms", self.dock.show_animation_ms),
            ("dock.hide_animation_ms", self.dock.hide_animation_ms),
        ];
        for (field, value) in durations {
            if value == 0 {
                problems.push(format!("{} must be greater than zero", field));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }
}
