//! Integer screen geometry shared by renderers, modules and the input adapter.
//!
//! All coordinates are canvas-local pixels with y growing downward.

use serde::{Deserialize, Serialize};

/// A pointer location in canvas-local pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: ScreenPoint) -> f64 {
        let dx = f64::from(other.x - self.x);
        let dy = f64::from(other.y - self.y);
        dx.hypot(dy)
    }
}

/// An axis-aligned pixel rectangle. `width`/`height` are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ScreenRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl ScreenRect {
    /// Creates a rectangle, clamping negative sizes to zero.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width: width.max(0),
            height: height.max(0),
        }
    }

    /// The smallest rectangle covering both points (inclusive).
    pub fn from_corners(p1: ScreenPoint, p2: ScreenPoint) -> Self {
        let x = p1.x.min(p2.x);
        let y = p1.y.min(p2.y);
        Self::new(x, y, (p1.x - p2.x).abs() + 1, (p1.y - p2.y).abs() + 1)
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn center(&self) -> ScreenPoint {
        ScreenPoint::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn contains(&self, p: ScreenPoint) -> bool {
        p.x >= self.left() && p.x < self.right() && p.y >= self.top() && p.y < self.bottom()
    }

    /// Grows the rectangle by `px` on every side.
    pub fn inflate(&self, px: i32) -> Self {
        Self::new(self.x - px, self.y - px, self.width + 2 * px, self.height + 2 * px)
    }

    /// Bounding union of two rectangles. Empty rectangles are ignored.
    pub fn union(&self, other: &ScreenRect) -> Self {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let left = self.left().min(other.left());
        let top = self.top().min(other.top());
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Self::new(left, top, right - left, bottom - top)
    }

    /// Bounding rectangle of a set of points, or `None` for an empty slice.
    pub fn bounding(points: &[ScreenPoint]) -> Option<Self> {
        let first = points.first()?;
        let mut rect = Self::from_corners(*first, *first);
        for p in &points[1..] {
            rect = rect.union(&Self::from_corners(*p, *p));
        }
        Some(rect)
    }
}
