//! Axis range state and the axis view contract consumed by mouse modules.
//!
//! `DasAxis` owns the visible range of one plot axis. All mutation goes
//! through guarded range-setting operations: a computed range that is
//! non-finite, degenerate, or non-positive on a log axis is dropped without
//! touching the axis, so a wild gesture can never leave the view unusable.
//!
//! Responsibilities:
//! - Mapping between data values and device pixels (log/linear aware)
//! - Remembering previous ranges for back/forward navigation
//! - Scan (page) and zoom-out operations
//! - A mutator lock held while an interactive pan is in progress
//! - Notifying the listeners registered on this axis instance

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::datum_range::DatumRange;
use crate::divider::{maybe_round, Divider};
use crate::error::ConfigError;

/// Zoom-out endpoints in normalised coordinates of the current range.
pub const ZOOM_OUT_LO: f64 = -0.25;
pub const ZOOM_OUT_HI: f64 = 1.25;

/// Axis direction on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// What an interactive module needs from an axis.
pub trait AxisView {
    /// Data value to device pixel.
    fn transform(&self, value: f64) -> f64;

    /// Device pixel to data value.
    fn inv_transform(&self, pixel: f64) -> f64;

    fn is_log(&self) -> bool;

    fn orientation(&self) -> Orientation;

    fn is_horizontal(&self) -> bool {
        self.orientation() == Orientation::Horizontal
    }

    fn datum_range(&self) -> DatumRange;

    /// Replaces the range. Returns false when the range was rejected.
    fn set_datum_range(&mut self, range: DatumRange) -> bool;

    /// Device extent `(dmin, dmax)` along the axis direction.
    fn pixel_bounds(&self) -> (f64, f64);

    fn pixel_length(&self) -> f64 {
        let (a, b) = self.pixel_bounds();
        (b - a).abs()
    }

    /// Divider used for ticks and for rounding interactive ranges.
    fn divider(&self) -> Divider {
        Divider::for_range(&self.datum_range(), self.is_log())
    }
}

/// Where a range change came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeSource {
    /// `set_datum_range` and the operations built on it.
    Programmatic,
    /// Back/forward navigation.
    History,
    /// Intermediate steps of a locked interactive pan.
    Interactive,
}

/// Delivered to range listeners after every accepted change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeChange {
    pub old: DatumRange,
    pub new: DatumRange,
    pub source: ChangeSource,
}

/// Handle returned by [`DasAxis::add_range_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type RangeListener = Box<dyn FnMut(&RangeChange)>;

/// Bounded back/forward stacks of ranges.
///
/// Pushing a new range discards the forward stack, like browser history.
#[derive(Debug, Clone)]
pub struct RangeHistory {
    back: VecDeque<DatumRange>,
    forward: Vec<DatumRange>,
    depth: usize,
}

impl RangeHistory {
    pub fn new(depth: usize) -> Self {
        Self {
            back: VecDeque::new(),
            forward: Vec::new(),
            depth: depth.max(1),
        }
    }

    pub fn push(&mut self, range: DatumRange) {
        if self.back.back() == Some(&range) {
            return;
        }
        self.back.push_back(range);
        while self.back.len() > self.depth {
            self.back.pop_front();
        }
        self.forward.clear();
    }

    /// Steps back, remembering `current` for a later forward step.
    pub fn back(&mut self, current: DatumRange) -> Option<DatumRange> {
        let prev = self.back.pop_back()?;
        self.forward.push(current);
        Some(prev)
    }

    /// Steps forward, remembering `current` for a later back step.
    pub fn forward(&mut self, current: DatumRange) -> Option<DatumRange> {
        let next = self.forward.pop()?;
        self.back.push_back(current);
        while self.back.len() > self.depth {
            self.back.pop_front();
        }
        Some(next)
    }

    pub fn peek_back(&self) -> Option<DatumRange> {
        self.back.back().copied()
    }

    pub fn peek_forward(&self) -> Option<DatumRange> {
        self.forward.last().copied()
    }

    pub fn back_len(&self) -> usize {
        self.back.len()
    }

    pub fn forward_len(&self) -> usize {
        self.forward.len()
    }

    pub fn clear(&mut self) {
        self.back.clear();
        self.forward.clear();
    }
}

/// Value → pixel for an arbitrary range, without needing an axis instance.
pub fn value_to_pixel(
    range: &DatumRange,
    log: bool,
    orientation: Orientation,
    bounds: (f64, f64),
    value: f64,
) -> f64 {
    let norm = if log {
        range.normalize_log(value)
    } else {
        range.normalize(value)
    };
    let (dmin, dmax) = bounds;
    match orientation {
        Orientation::Horizontal => dmin + norm * (dmax - dmin),
        Orientation::Vertical => dmax - norm * (dmax - dmin),
    }
}

/// Pixel → value for an arbitrary range.
pub fn pixel_to_value(
    range: &DatumRange,
    log: bool,
    orientation: Orientation,
    bounds: (f64, f64),
    pixel: f64,
) -> f64 {
    let (dmin, dmax) = bounds;
    let span = dmax - dmin;
    let norm = match orientation {
        Orientation::Horizontal => (pixel - dmin) / span,
        Orientation::Vertical => (dmax - pixel) / span,
    };
    if log {
        let lmin = range.min().log10();
        let lmax = range.max().log10();
        10f64.powf(lmin + norm * (lmax - lmin))
    } else {
        range.min() + norm * range.width()
    }
}

/// The visible range of one plot axis.
pub struct DasAxis {
    range: DatumRange,
    log: bool,
    orientation: Orientation,
    dmin: f64,
    dmax: f64,
    history: RangeHistory,
    lock_depth: u32,
    pan_origin: Option<DatumRange>,
    /// Range the current scan run started from, and pages travelled since.
    scan_origin: Option<(DatumRange, i64)>,
    listeners: Vec<(ListenerId, RangeListener)>,
    next_listener: u64,
}

impl std::fmt::Debug for DasAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DasAxis")
            .field("range", &self.range)
            .field("log", &self.log)
            .field("orientation", &self.orientation)
            .field("dmin", &self.dmin)
            .field("dmax", &self.dmax)
            .field("lock_depth", &self.lock_depth)
            .finish_non_exhaustive()
    }
}

/// Shared, single-threaded handle; modules and the viewer hold clones.
pub type AxisHandle = Rc<RefCell<DasAxis>>;

impl DasAxis {
    /// Creates a linear axis spanning `dmin..dmax` pixels.
    pub fn new(range: DatumRange, orientation: Orientation, dmin: f64, dmax: f64) -> Self {
        Self {
            range,
            log: false,
            orientation,
            dmin,
            dmax,
            history: RangeHistory::new(50),
            lock_depth: 0,
            pan_origin: None,
            scan_origin: None,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Creates a log axis; the range must be positive.
    pub fn new_log(
        range: DatumRange,
        orientation: Orientation,
        dmin: f64,
        dmax: f64,
    ) -> Result<Self, ConfigError> {
        if !range.is_acceptable(true) {
            return Err(ConfigError::NonPositiveLogRange {
                min: range.min(),
                max: range.max(),
            });
        }
        let mut axis = Self::new(range, orientation, dmin, dmax);
        axis.log = true;
        Ok(axis)
    }

    /// Sets how many ranges "back" remembers.
    pub fn with_history_depth(mut self, depth: usize) -> Self {
        self.history = RangeHistory::new(depth);
        self
    }

    /// Wraps the axis in a shared handle.
    pub fn into_handle(self) -> AxisHandle {
        Rc::new(RefCell::new(self))
    }

    // ===== Queries =====

    pub fn history(&self) -> &RangeHistory {
        &self.history
    }

    pub fn is_locked(&self) -> bool {
        self.lock_depth > 0
    }

    /// Range covering device pixels `p1..p2` (either order), before rounding.
    pub fn range_for_pixels(&self, p1: f64, p2: f64) -> Option<DatumRange> {
        let a = self.inv_transform(p1);
        let b = self.inv_transform(p2);
        DatumRange::try_new(a.min(b), a.max(b), self.range.units())
    }

    /// Current range shifted so content moves by `dpx` pixels.
    pub fn range_panned_by(&self, base: &DatumRange, dpx: f64) -> Option<DatumRange> {
        let bounds = (self.dmin, self.dmax);
        let a = pixel_to_value(base, self.log, self.orientation, bounds, self.dmin - dpx);
        let b = pixel_to_value(base, self.log, self.orientation, bounds, self.dmax - dpx);
        DatumRange::try_new(a.min(b), a.max(b), base.units())
    }

    /// Snaps `range` to nice boundaries for this axis' pixel length.
    pub fn round(&self, range: &DatumRange) -> DatumRange {
        maybe_round(range, self.log, self.pixel_length())
    }

    // ===== Range Mutations =====

    fn commit(&mut self, range: DatumRange, record: bool, source: ChangeSource) -> bool {
        if !range.is_acceptable(self.log) {
            trace!(?range, log = self.log, "rejected unacceptable axis range");
            return false;
        }
        if range == self.range {
            return true;
        }
        let old = self.range;
        if record {
            self.history.push(old);
        }
        self.range = range;
        let change = RangeChange {
            old,
            new: range,
            source,
        };
        for (_, listener) in self.listeners.iter_mut() {
            listener(&change);
        }
        true
    }

    /// Zooms out around the center: each side grows by a quarter of the width
    /// (in log space on log axes).
    pub fn set_data_range_zoom_out(&mut self) -> bool {
        match self.range.rescale_for(self.log, ZOOM_OUT_LO, ZOOM_OUT_HI) {
            Some(range) => self.set_datum_range(range),
            None => false,
        }
    }

    /// Returns to the previous range.
    pub fn set_data_range_prev(&mut self) -> bool {
        if self.is_locked() {
            return false;
        }
        // a stored range the axis can no longer show stays where it is
        match self.history.peek_back() {
            Some(prev) if prev.is_acceptable(self.log) => {}
            _ => return false,
        }
        let current = self.range;
        match self.history.back(current) {
            Some(prev) => self.commit(prev, false, ChangeSource::History),
            None => false,
        }
    }

    /// Re-applies a range undone by [`DasAxis::set_data_range_prev`].
    pub fn set_data_range_forward(&mut self) -> bool {
        if self.is_locked() {
            return false;
        }
        match self.history.peek_forward() {
            Some(next) if next.is_acceptable(self.log) => {}
            _ => return false,
        }
        let current = self.range;
        match self.history.forward(current) {
            Some(next) => self.commit(next, false, ChangeSource::History),
            None => false,
        }
    }

    /// Pages forward by one width. No rounding is involved.
    pub fn scan_next(&mut self) -> bool {
        self.scan_by(1)
    }

    /// Pages backward by one width.
    pub fn scan_previous(&mut self) -> bool {
        self.scan_by(-1)
    }

    /// Pages are offsets from the run's starting range, so any sequence of
    /// scans that nets to zero lands on that range bit for bit.
    fn scan_by(&mut self, step: i64) -> bool {
        let (origin, pages) = match self.scan_origin {
            Some((origin, pages)) if origin.paged(pages) == Some(self.range) => (origin, pages),
            _ => (self.range, 0),
        };
        let Some(target) = origin.paged(pages + step) else {
            return false;
        };
        let changed = self.set_datum_range(target);
        if changed {
            self.scan_origin = Some((origin, pages + step));
        }
        changed
    }

    /// Zooms to the data covered by pixels `p1..p2`, snapped to nice values.
    pub fn zoom_to_pixels(&mut self, p1: f64, p2: f64) -> bool {
        match self.range_for_pixels(p1, p2) {
            Some(range) => {
                let rounded = self.round(&range);
                self.set_datum_range(rounded)
            }
            None => false,
        }
    }

    /// Switches between log and linear. Refused when the current range has a
    /// non-positive minimum.
    pub fn set_log(&mut self, log: bool) -> bool {
        if log && !self.range.is_acceptable(true) {
            return false;
        }
        self.log = log;
        true
    }

    /// Updates the device extent after a layout change.
    pub fn set_pixel_bounds(&mut self, dmin: f64, dmax: f64) {
        self.dmin = dmin;
        self.dmax = dmax;
    }

    // ===== Interactive Pan =====

    /// Takes the mutator lock for an interactive pan. While held, programmatic
    /// range changes are refused and intermediate pan steps skip history.
    pub fn mutator_lock(&mut self) {
        if self.lock_depth == 0 {
            self.pan_origin = Some(self.range);
        }
        self.lock_depth += 1;
        debug!(depth = self.lock_depth, "axis mutator lock acquired");
    }

    /// Releases the mutator lock. Releasing the outermost lock records the
    /// range from before the pan in history, once.
    pub fn unlock(&mut self) {
        if self.lock_depth == 0 {
            return;
        }
        self.lock_depth -= 1;
        if self.lock_depth == 0 {
            if let Some(origin) = self.pan_origin.take() {
                if origin != self.range {
                    self.history.push(origin);
                }
            }
            debug!("axis mutator lock released");
        }
    }

    /// Moves the range during a locked pan. Ignored when not locked.
    pub fn pan_to(&mut self, range: DatumRange) -> bool {
        if !self.is_locked() {
            return false;
        }
        self.commit(range, false, ChangeSource::Interactive)
    }

    // ===== Listeners =====

    /// Registers a callback invoked after each accepted range change.
    pub fn add_range_listener(&mut self, listener: impl FnMut(&RangeChange) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn remove_range_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }
}

impl AxisView for DasAxis {
    fn transform(&self, value: f64) -> f64 {
        value_to_pixel(&self.range, self.log, self.orientation, (self.dmin, self.dmax), value)
    }

    fn inv_transform(&self, pixel: f64) -> f64 {
        pixel_to_value(&self.range, self.log, self.orientation, (self.dmin, self.dmax), pixel)
    }

    fn is_log(&self) -> bool {
        self.log
    }

    fn orientation(&self) -> Orientation {
        self.orientation
    }

    fn datum_range(&self) -> DatumRange {
        self.range
    }

    fn set_datum_range(&mut self, range: DatumRange) -> bool {
        if self.is_locked() {
            trace!(?range, "axis locked by interactive pan; range change refused");
            return false;
        }
        self.commit(range, true, ChangeSource::Programmatic)
    }

    fn pixel_bounds(&self) -> (f64, f64) {
        (self.dmin, self.dmax)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis_0_100() -> DasAxis {
        DasAxis::new(DatumRange::numeric(0.0, 100.0).unwrap(), Orientation::Horizontal, 0.0, 200.0)
    }

    #[test]
    fn test_transform_roundtrip_linear() {
        let axis = axis_0_100();
        assert_eq!(axis.transform(50.0), 100.0);
        assert_eq!(axis.inv_transform(100.0), 50.0);
    }

    #[test]
    fn test_vertical_axis_grows_upward() {
        let axis = DasAxis::new(DatumRange::numeric(0.0, 10.0).unwrap(), Orientation::Vertical, 0.0, 100.0);
        assert_eq!(axis.transform(0.0), 100.0);
        assert_eq!(axis.transform(10.0), 0.0);
        assert_eq!(axis.inv_transform(25.0), 7.5);
    }

    #[test]
    fn test_log_transform() {
        let axis = DasAxis::new_log(DatumRange::numeric(1.0, 100.0).unwrap(), Orientation::Horizontal, 0.0, 200.0).unwrap();
        assert!((axis.transform(10.0) - 100.0).abs() < 1e-9);
        assert!((axis.inv_transform(100.0) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_log_axis_rejects_non_positive_range() {
        let mut axis = DasAxis::new_log(DatumRange::numeric(1.0, 100.0).unwrap(), Orientation::Horizontal, 0.0, 200.0).unwrap();
        let before = axis.datum_range();
        assert!(!axis.set_datum_range(DatumRange::numeric(-5.0, 10.0).unwrap()));
        assert!(!axis.set_datum_range(DatumRange::numeric(0.0, 10.0).unwrap()));
        assert_eq!(axis.datum_range(), before);
        assert_eq!(axis.history().back_len(), 0);
    }

    #[test]
    fn test_new_log_requires_positive_range() {
        let err = DasAxis::new_log(DatumRange::numeric(-1.0, 1.0).unwrap(), Orientation::Vertical, 0.0, 10.0);
        assert!(matches!(err, Err(ConfigError::NonPositiveLogRange { .. })));
    }

    #[test]
    fn test_scan_next_then_previous_restores_range() {
        let mut axis = axis_0_100();
        let original = axis.datum_range();
        assert!(axis.scan_next());
        assert_eq!(axis.datum_range(), DatumRange::numeric(100.0, 200.0).unwrap());
        assert!(axis.scan_previous());
        assert_eq!(axis.datum_range(), original);
    }

    #[test]
    fn test_rejected_history_step_leaves_stacks_alone() {
        let mut axis = DasAxis::new(DatumRange::numeric(-10.0, 100.0).unwrap(), Orientation::Vertical, 0.0, 300.0);
        assert!(axis.set_datum_range(DatumRange::numeric(1.0, 100.0).unwrap()));
        assert!(axis.set_log(true));
        assert!(!axis.set_data_range_prev());
        assert_eq!(axis.datum_range(), DatumRange::numeric(1.0, 100.0).unwrap());
        assert_eq!((axis.history().back_len(), axis.history().forward_len()), (1, 0));

        // back on a linear axis the stored range is usable again
        assert!(axis.set_log(false));
        assert!(axis.set_data_range_prev());
        assert_eq!(axis.datum_range(), DatumRange::numeric(-10.0, 100.0).unwrap());
        assert!(axis.set_data_range_forward());
        assert_eq!((axis.history().back_len(), axis.history().forward_len()), (1, 0));
    }

    #[test]
    fn test_scan_chain_is_exact() {
        let start = DatumRange::numeric(0.1, 0.7).unwrap();
        let mut axis = DasAxis::new(start, Orientation::Horizontal, 0.0, 300.0);
        for _ in 0..3 {
            assert!(axis.scan_next());
        }
        for _ in 0..3 {
            assert!(axis.scan_previous());
        }
        assert_eq!(axis.datum_range(), start);
    }

    #[test]
    fn test_zoom_out_widens_by_quarter_each_side() {
        let mut axis = axis_0_100();
        assert!(axis.set_data_range_zoom_out());
        assert_eq!(axis.datum_range(), DatumRange::numeric(-25.0, 125.0).unwrap());
    }

    #[test]
    fn test_prev_and_forward() {
        let mut axis = axis_0_100();
        axis.set_datum_range(DatumRange::numeric(10.0, 20.0).unwrap());
        axis.set_datum_range(DatumRange::numeric(12.0, 14.0).unwrap());
        assert!(axis.set_data_range_prev());
        assert_eq!(axis.datum_range(), DatumRange::numeric(10.0, 20.0).unwrap());
        assert!(axis.set_data_range_prev());
        assert_eq!(axis.datum_range(), DatumRange::numeric(0.0, 100.0).unwrap());
        assert!(!axis.set_data_range_prev());
        assert!(axis.set_data_range_forward());
        assert_eq!(axis.datum_range(), DatumRange::numeric(10.0, 20.0).unwrap());
        // a new range discards the forward stack
        axis.set_datum_range(DatumRange::numeric(50.0, 60.0).unwrap());
        assert!(!axis.set_data_range_forward());
    }

    #[test]
    fn test_history_is_bounded() {
        let mut axis = axis_0_100().with_history_depth(3);
        for i in 1..10 {
            axis.set_datum_range(DatumRange::numeric(0.0, 100.0 + i as f64).unwrap());
        }
        assert_eq!(axis.history().back_len(), 3);
    }

    #[test]
    fn test_mutator_lock_blocks_programmatic_changes() {
        let mut axis = axis_0_100();
        axis.mutator_lock();
        assert!(!axis.set_datum_range(DatumRange::numeric(5.0, 6.0).unwrap()));
        assert!(axis.pan_to(DatumRange::numeric(10.0, 110.0).unwrap()));
        assert!(axis.pan_to(DatumRange::numeric(20.0, 120.0).unwrap()));
        axis.unlock();
        assert_eq!(axis.history().back_len(), 1);
        assert!(axis.set_data_range_prev());
        assert_eq!(axis.datum_range(), DatumRange::numeric(0.0, 100.0).unwrap());
        assert!(!axis.pan_to(DatumRange::numeric(1.0, 2.0).unwrap()));
    }

    #[test]
    fn test_listeners_see_changes() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut axis = axis_0_100();
        let sink = Rc::clone(&seen);
        let id = axis.add_range_listener(move |c| sink.borrow_mut().push((c.new.min(), c.source)));
        axis.scan_next();
        axis.set_data_range_prev();
        assert_eq!(
            *seen.borrow(),
            vec![(100.0, ChangeSource::Programmatic), (0.0, ChangeSource::History)]
        );
        assert!(axis.remove_range_listener(id));
        axis.scan_next();
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_zoom_to_pixels_narrows() {
        let mut axis = axis_0_100();
        let raw = axis.range_for_pixels(20.0, 80.0).unwrap();
        assert_eq!((raw.min(), raw.max()), (10.0, 40.0));
        assert!(axis.zoom_to_pixels(80.0, 20.0));
        let r = axis.datum_range();
        assert!(r.min() >= 0.0 && r.max() <= 100.0 && r.width() < 100.0);
    }

    #[test]
    fn test_range_panned_by() {
        let axis = axis_0_100();
        let base = axis.datum_range();
        let panned = axis.range_panned_by(&base, 20.0).unwrap();
        assert_eq!((panned.min(), panned.max()), (-10.0, 90.0));
    }
}
