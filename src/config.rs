//! Tunable thresholds for gesture interpretation.
//!
//! The defaults reproduce the behaviour users expect from the classic plot
//! widgets; the viewer persists overrides as JSON alongside its other settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Thresholds and limits shared by the input adapter, modules and axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Maximum number of ranges remembered for "back".
    pub history_depth: usize,
    /// Wheel ticks closer together than this are merged into one step.
    pub wheel_coalesce_ms: u64,
    /// Pointer travel (px) before an armed press becomes a drag.
    pub drag_threshold_px: i32,
    /// Distance (px) from a component edge that starts a shift-resize.
    pub edge_threshold_px: i32,
    /// Distance (px) from an edge midpoint or the center that counts as "middle".
    pub midpoint_threshold_px: i32,
    /// Distance (px) from an axis end that anchors wheel zoom at that end.
    pub wheel_edge_zone_px: i32,
    /// Width (px) of the corridor drawn around waypoint paths.
    pub pathway_width_px: i32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            history_depth: 50,
            wheel_coalesce_ms: 40,
            drag_threshold_px: 3,
            edge_threshold_px: 10,
            midpoint_threshold_px: 4,
            wheel_edge_zone_px: 20,
            pathway_width_px: 12,
        }
    }
}

impl GestureConfig {
    /// The wheel coalescing window as a duration.
    pub fn wheel_coalesce_window(&self) -> Duration {
        Duration::from_millis(self.wheel_coalesce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let cfg: GestureConfig = serde_json::from_str(r#"{"history_depth": 10}"#).unwrap();
        assert_eq!(cfg.history_depth, 10);
        assert_eq!(cfg.wheel_coalesce_ms, 40);
        assert_eq!(cfg.wheel_coalesce_window(), Duration::from_millis(40));
    }

    #[test]
    fn test_roundtrip_json() {
        let cfg = GestureConfig {
            pathway_width_px: 20,
            ..GestureConfig::default()
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: GestureConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }
}
