//! Data ranges and the arithmetic used by zoom, pan and scan operations.

use serde::{Deserialize, Serialize};

use crate::units::Units;

/// A half-open data interval `[min, max)` in the given units.
///
/// Constructed through [`DatumRange::try_new`], which enforces `min < max`
/// with finite bounds. Log axes additionally require positive bounds; that
/// check lives in [`DatumRange::is_acceptable`] because it depends on the axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatumRange {
    min: f64,
    max: f64,
    units: Units,
}

impl DatumRange {
    /// Creates a range, returning `None` for degenerate or non-finite bounds.
    pub fn try_new(min: f64, max: f64, units: Units) -> Option<Self> {
        if min.is_finite() && max.is_finite() && min < max {
            Some(Self { min, max, units })
        } else {
            None
        }
    }

    /// Creates a dimensionless range.
    pub fn numeric(min: f64, max: f64) -> Option<Self> {
        Self::try_new(min, max, Units::Dimensionless)
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn units(&self) -> Units {
        self.units
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value < self.max
    }

    /// Returns true when `other` lies entirely within this range.
    pub fn contains_range(&self, other: &DatumRange) -> bool {
        other.min >= self.min && other.max <= self.max
    }

    /// Position of `value` in this range, 0 at `min` and 1 at `max`.
    pub fn normalize(&self, value: f64) -> f64 {
        (value - self.min) / self.width()
    }

    /// Position of `value` in this range measured in log space.
    pub fn normalize_log(&self, value: f64) -> f64 {
        let lmin = self.min.log10();
        let lmax = self.max.log10();
        (value.log10() - lmin) / (lmax - lmin)
    }

    /// Linear rescale to normalised endpoints: `rescale(0.0, 1.0)` is identity,
    /// `rescale(-0.25, 1.25)` widens by a quarter of the width on each side.
    pub fn rescale(&self, lo: f64, hi: f64) -> Option<Self> {
        let w = self.width();
        Self::try_new(self.min + lo * w, self.min + hi * w, self.units)
    }

    /// Same as [`DatumRange::rescale`] but measured in log10 space.
    pub fn rescale_log(&self, lo: f64, hi: f64) -> Option<Self> {
        if self.min <= 0.0 {
            return None;
        }
        let lmin = self.min.log10();
        let lw = self.max.log10() - lmin;
        Self::try_new(
            10f64.powf(lmin + lo * lw),
            10f64.powf(lmin + hi * lw),
            self.units,
        )
    }

    /// Rescale in whichever space the axis uses.
    pub fn rescale_for(&self, log: bool, lo: f64, hi: f64) -> Option<Self> {
        if log {
            self.rescale_log(lo, hi)
        } else {
            self.rescale(lo, hi)
        }
    }

    /// The adjacent range of equal width following this one.
    pub fn next(&self) -> Self {
        let w = self.width();
        Self {
            min: self.max,
            max: self.max + w,
            units: self.units,
        }
    }

    /// The adjacent range of equal width preceding this one.
    pub fn previous(&self) -> Self {
        let w = self.width();
        Self {
            min: self.min - w,
            max: self.min,
            units: self.units,
        }
    }

    /// This range moved by `pages` whole widths; zero pages is `self` exactly.
    pub fn paged(&self, pages: i64) -> Option<Self> {
        if pages == 0 {
            return Some(*self);
        }
        let delta = pages as f64 * self.width();
        Self::try_new(self.min + delta, self.max + delta, self.units)
    }

    /// Translates by `delta` data units.
    pub fn shifted(&self, delta: f64) -> Option<Self> {
        Self::try_new(self.min + delta, self.max + delta, self.units)
    }

    /// Finite, non-degenerate, and positive when the axis is logarithmic.
    pub fn is_acceptable(&self, log: bool) -> bool {
        let finite = self.min.is_finite() && self.max.is_finite() && self.min < self.max;
        finite && (!log || self.min > 0.0)
    }

    /// Human readable form, e.g. `0 to 100`.
    pub fn describe(&self) -> String {
        format!("{} to {}", self.units.format(self.min), self.units.format(self.max))
    }
}

impl std::fmt::Display for DatumRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_new_rejects_degenerate() {
        assert!(DatumRange::numeric(1.0, 1.0).is_none());
        assert!(DatumRange::numeric(2.0, 1.0).is_none());
        assert!(DatumRange::numeric(f64::NAN, 1.0).is_none());
        assert!(DatumRange::numeric(0.0, f64::INFINITY).is_none());
        assert!(DatumRange::numeric(0.0, 1.0).is_some());
    }

    #[test]
    fn test_rescale_linear() {
        let r = DatumRange::numeric(0.0, 100.0).unwrap();
        let out = r.rescale(-0.25, 1.25).unwrap();
        assert_eq!((out.min(), out.max()), (-25.0, 125.0));
        let inner = r.rescale(0.2, 0.8).unwrap();
        assert_eq!((inner.min(), inner.max()), (20.0, 80.0));
    }

    #[test]
    fn test_rescale_log_uses_decades() {
        let r = DatumRange::numeric(1.0, 100.0).unwrap();
        let out = r.rescale_log(-0.5, 1.5).unwrap();
        assert!((out.min() - 0.1).abs() < 1e-12);
        assert!((out.max() - 1000.0).abs() < 1e-9);
        let negative = DatumRange::numeric(-1.0, 10.0).unwrap();
        assert!(negative.rescale_log(0.0, 1.0).is_none());
    }

    #[test]
    fn test_next_previous_translate_by_width() {
        let r = DatumRange::numeric(10.0, 30.0).unwrap();
        assert_eq!(r.next(), DatumRange::numeric(30.0, 50.0).unwrap());
        assert_eq!(r.previous(), DatumRange::numeric(-10.0, 10.0).unwrap());
        assert_eq!(r.next().previous(), r);
        assert_eq!(r.paged(2), DatumRange::numeric(50.0, 70.0));
        assert_eq!(r.paged(0), Some(r));
    }

    #[test]
    fn test_is_acceptable_for_log() {
        let r = DatumRange::numeric(-5.0, 5.0).unwrap();
        assert!(r.is_acceptable(false));
        assert!(!r.is_acceptable(true));
        let zero = DatumRange::numeric(0.0, 5.0).unwrap();
        assert!(!zero.is_acceptable(true));
    }
}
