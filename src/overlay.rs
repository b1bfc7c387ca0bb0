//! Renderer-neutral drag overlay.
//!
//! Drag renderers describe their transient feedback as a list of shapes on a
//! [`DragCanvas`]; the viewer paints them on top of the plot. Shapes carry a
//! role instead of a colour so the current theme decides the actual palette.
//!
//! Every stroke is drawn twice by the viewer: a wide translucent contrast
//! stroke underneath and the thin foreground stroke on top, which keeps the
//! feedback visible on both light and dark data.

use crate::geometry::{ScreenPoint, ScreenRect};

/// Colour role of an overlay shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayRole {
    /// Primary feedback lines.
    Foreground,
    /// Translucent fills such as a selected box interior.
    Fill,
    /// Emphasised elements: arrows, the active waypoint.
    Accent,
}

/// Stroke widths used for the two-pass contrast rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub width: f32,
    pub contrast_width: f32,
    /// Alpha of the contrast stroke, 0..=255.
    pub contrast_alpha: u8,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            width: 1.0,
            contrast_width: 3.0,
            contrast_alpha: 100,
        }
    }
}

/// One element of drag feedback.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayShape {
    Line {
        from: ScreenPoint,
        to: ScreenPoint,
        role: OverlayRole,
    },
    Rect {
        rect: ScreenRect,
        filled: bool,
        role: OverlayRole,
    },
    Polyline {
        points: Vec<ScreenPoint>,
        closed: bool,
        role: OverlayRole,
    },
    /// Arrow with its head at `to`.
    Arrow {
        from: ScreenPoint,
        to: ScreenPoint,
        role: OverlayRole,
    },
    /// Text whose top-left corner sits at `at`.
    Text {
        at: ScreenPoint,
        text: String,
        role: OverlayRole,
    },
}

/// Approximate glyph metrics used to compute text dirty regions.
pub const CHAR_WIDTH_PX: i32 = 7;
pub const LINE_HEIGHT_PX: i32 = 14;

impl OverlayShape {
    /// Screen area touched by the shape, including the contrast stroke.
    pub fn bounds(&self, style: &StrokeStyle) -> ScreenRect {
        let pad = style.contrast_width.ceil() as i32;
        match self {
            OverlayShape::Line { from, to, .. } => ScreenRect::from_corners(*from, *to).inflate(pad),
            OverlayShape::Arrow { from, to, .. } => {
                ScreenRect::from_corners(*from, *to).inflate(pad + ARROW_HEAD_PX)
            }
            OverlayShape::Rect { rect, .. } => rect.inflate(pad),
            OverlayShape::Polyline { points, .. } => ScreenRect::bounding(points)
                .map(|r| r.inflate(pad))
                .unwrap_or_default(),
            OverlayShape::Text { at, text, .. } => {
                let lines = text.lines().count().max(1) as i32;
                let longest = text.lines().map(|l| l.chars().count()).max().unwrap_or(0) as i32;
                ScreenRect::new(at.x, at.y, longest * CHAR_WIDTH_PX, lines * LINE_HEIGHT_PX)
                    .inflate(2)
            }
        }
    }
}

/// Length of the arrow head legs in pixels.
pub const ARROW_HEAD_PX: i32 = 6;

/// The retained overlay of one plot component.
#[derive(Debug, Clone, Default)]
pub struct DragCanvas {
    bounds: ScreenRect,
    shapes: Vec<OverlayShape>,
    style: StrokeStyle,
}

impl DragCanvas {
    pub fn new(bounds: ScreenRect) -> Self {
        Self {
            bounds,
            shapes: Vec::new(),
            style: StrokeStyle::default(),
        }
    }

    pub fn bounds(&self) -> ScreenRect {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: ScreenRect) {
        self.bounds = bounds;
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    pub fn shapes(&self) -> &[OverlayShape] {
        &self.shapes
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Adds a shape and returns the region it dirties.
    pub fn draw(&mut self, shape: OverlayShape) -> ScreenRect {
        let dirty = shape.bounds(&self.style);
        self.shapes.push(shape);
        dirty
    }

    /// Removes every shape touching `region`; returns the union of the removed
    /// shapes' bounds.
    pub fn clear_region(&mut self, region: ScreenRect) -> ScreenRect {
        let style = self.style;
        let mut dirty = ScreenRect::default();
        self.shapes.retain(|shape| {
            let b = shape.bounds(&style);
            let touches = b.left() < region.right()
                && region.left() < b.right()
                && b.top() < region.bottom()
                && region.top() < b.bottom();
            if touches {
                dirty = dirty.union(&b);
            }
            !touches
        });
        dirty
    }

    /// Removes every shape; returns the region they covered.
    pub fn clear(&mut self) -> ScreenRect {
        let style = self.style;
        let dirty = self
            .shapes
            .iter()
            .fold(ScreenRect::default(), |acc, s| acc.union(&s.bounds(&style)));
        self.shapes.clear();
        dirty
    }
}
