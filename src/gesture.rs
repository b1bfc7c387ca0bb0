//! Classification of short drags into navigation gestures, and of completed
//! boxes into X-only, Y-only or full box zooms.
//!
//! A small flick near the plot edges pages through time without a toolbar:
//! - flick leftward past the left edge: scan previous
//! - flick rightward past the right edge: scan next
//! - flick left: back, flick right: forward, flick down: zoom out
//!
//! Anything travelling 20 px or more is a real drag and is left to the
//! range/box selection logic.

use crate::geometry::{ScreenPoint, ScreenRect};

/// Below this radius a press/release pair is a click.
pub const CLICK_RADIUS: f64 = 4.0;

/// At or above this radius a drag is a selection, not a gesture.
pub const GESTURE_RADIUS: f64 = 20.0;

/// Distance from the component's left/right edge that arms scan gestures.
pub const SCAN_EDGE_PX: i32 = 10;

/// Minimum box side (px) for a dimension to count in a box zoom.
pub const MIN_BOX_SIDE: f64 = 5.0;

/// Aspect ratio below which a box is treated as X-only (above its inverse, Y-only).
pub const THIN_BOX_ASPECT: f64 = 0.2;

/// A completed drag interpreted as a navigation gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragGesture {
    /// A click; nothing to do.
    None,
    Back,
    Forward,
    ZoomOut,
    ScanPrev,
    ScanNext,
    /// A short drag matching no gesture; callers treat it as a no-op.
    Undefined,
}

/// Classifies a press/release pair.
///
/// Returns `None` when the drag is long enough to be a selection rather than a
/// gesture. `component_width` and `component_x_offset` locate the component
/// horizontally in the same frame as the points.
pub fn classify(
    p1: ScreenPoint,
    p2: ScreenPoint,
    component_width: i32,
    component_x_offset: i32,
) -> Option<DragGesture> {
    let dx = f64::from(p2.x - p1.x);
    // screen y grows downward; flip so "up" is positive
    let dy = -f64::from(p2.y - p1.y);
    let radius = dx.hypot(dy);

    if radius < CLICK_RADIUS {
        return Some(DragGesture::None);
    }
    if radius >= GESTURE_RADIUS {
        return None;
    }

    let angle = dy.atan2(dx).to_degrees();
    let x1 = p1.x - component_x_offset;
    let x2 = p2.x - component_x_offset;

    let gesture = if x1 < SCAN_EDGE_PX && x2 < 0 {
        DragGesture::ScanPrev
    } else if x1 > component_width - SCAN_EDGE_PX && x2 > component_width {
        DragGesture::ScanNext
    } else if angle.abs() > 160.0 {
        DragGesture::Back
    } else if -110.0 < angle && angle < -70.0 {
        DragGesture::ZoomOut
    } else if angle.abs() < 30.0 {
        DragGesture::Forward
    } else {
        DragGesture::Undefined
    };
    Some(gesture)
}

/// How a completed box should be applied to the plot's axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoxZoomKind {
    XOnly,
    YOnly,
    Box,
}

/// Decides whether a box drawn from `p1` to `p2` zooms X, Y or both.
///
/// `plot` is the data area; a thin box that reaches across the plot's full
/// height (or width) is forced to the single-axis interpretation.
pub fn classify_box(p1: ScreenPoint, p2: ScreenPoint, plot: ScreenRect) -> BoxZoomKind {
    let width = f64::from((p2.x - p1.x).abs());
    let height = f64::from((p2.y - p1.y).abs());
    let aspect = if width > 0.0 { height / width } else { f64::INFINITY };

    let spans_rows = p1.y.min(p2.y) <= plot.top() && p1.y.max(p2.y) >= plot.bottom() - 1;
    let spans_columns = p1.x.min(p2.x) <= plot.left() && p1.x.max(p2.x) >= plot.right() - 1;

    if spans_rows && aspect < THIN_BOX_ASPECT {
        BoxZoomKind::XOnly
    } else if spans_columns && aspect > 1.0 / THIN_BOX_ASPECT {
        BoxZoomKind::YOnly
    } else if height < MIN_BOX_SIDE || aspect < THIN_BOX_ASPECT {
        BoxZoomKind::XOnly
    } else if width < MIN_BOX_SIDE || aspect > 1.0 / THIN_BOX_ASPECT {
        BoxZoomKind::YOnly
    } else {
        BoxZoomKind::Box
    }
}
