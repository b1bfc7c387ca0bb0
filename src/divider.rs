//! Domain dividers: families of "nice" boundaries used for tick placement and
//! for snapping interactively computed ranges.
//!
//! A divider splits the number line into adjacent intervals. Each divider can
//! produce a finer one, so callers refine until the intervals are small enough
//! for their purpose (a tick every ~80 px, or a snap grid of 2 px).

use crate::datum_range::DatumRange;
use crate::units::Units;

/// Time steps in seconds, coarsest last.
const TIME_STEPS: [f64; 20] = [
    1.0, 2.0, 5.0, 10.0, 15.0, 30.0, 60.0, 120.0, 300.0, 600.0, 900.0, 1800.0, 3600.0,
    7200.0, 10800.0, 21600.0, 43200.0, 86400.0, 172_800.0, 604_800.0,
];

/// Upper bound on refinement steps so degenerate input cannot loop forever.
const MAX_REFINEMENTS: usize = 96;

/// Upper bound on decades walked while counting log boundaries.
const MAX_DECADES: i32 = 700;

/// Evenly spaced boundaries at `k * significand * 10^exponent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearDivider {
    significand: u8,
    exponent: i32,
}

impl LinearDivider {
    /// Creates a divider with the given significand (1, 2 or 5) and exponent.
    pub fn new(significand: u8, exponent: i32) -> Self {
        let significand = match significand {
            0..=1 => 1,
            2..=4 => 2,
            _ => 5,
        };
        Self { significand, exponent }
    }

    /// A coarse divider producing between one and ten intervals over `width`.
    pub fn for_width(width: f64) -> Self {
        let exponent = if width > 0.0 && width.is_finite() {
            width.log10().floor() as i32
        } else {
            0
        };
        Self::new(1, exponent)
    }

    /// Interval width.
    pub fn step(&self) -> f64 {
        self.boundary(1)
    }

    /// The `k`-th boundary, computed so decimal steps stay exact where possible.
    fn boundary(&self, k: i64) -> f64 {
        let units = (k * i64::from(self.significand)) as f64;
        if self.exponent >= 0 {
            units * 10f64.powi(self.exponent)
        } else {
            units / 10f64.powi(-self.exponent)
        }
    }

    /// 5 → 2 → 1 → 0.5 ...
    pub fn finer(&self) -> Self {
        match self.significand {
            5 => Self::new(2, self.exponent),
            2 => Self::new(1, self.exponent),
            _ => Self::new(5, self.exponent - 1),
        }
    }

    pub fn range_containing(&self, value: f64) -> (f64, f64) {
        let k = (value / self.step()).floor() as i64;
        let (mut lo, mut hi) = (self.boundary(k), self.boundary(k + 1));
        // floor() on a rounded quotient can land one interval off
        if value < lo {
            hi = lo;
            lo = self.boundary(k - 1);
        } else if value >= hi {
            lo = hi;
            hi = self.boundary(k + 2);
        }
        (lo, hi)
    }

    pub fn boundary_count(&self, min: f64, max: f64) -> u64 {
        let step = self.step();
        let first = (min / step).ceil();
        let last = (max / step).floor();
        if last < first {
            0
        } else {
            (last - first) as u64 + 1
        }
    }

    fn boundaries(&self, min: f64, max: f64, cap: usize) -> Vec<f64> {
        let step = self.step();
        let first = (min / step).ceil() as i64;
        let mut out = Vec::new();
        let mut k = first;
        while out.len() < cap {
            let b = self.boundary(k);
            if b > max {
                break;
            }
            if b >= min {
                out.push(b);
            }
            k += 1;
        }
        out
    }
}

/// Boundaries for logarithmic axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogDivider {
    /// Boundaries at `10^(k*step)`; the step is a whole number of decades.
    Decades(LinearDivider),
    /// Boundaries inside each decade at `10^n * (1 + k*step)` with `step <= 1`.
    Mantissa(LinearDivider),
}

impl LogDivider {
    fn for_range(range: &DatumRange) -> Self {
        let decades = range.max().log10() - range.min().log10();
        let lin = LinearDivider::for_width(decades);
        if lin.exponent < 0 {
            LogDivider::Mantissa(LinearDivider::new(1, 0))
        } else {
            LogDivider::Decades(lin)
        }
    }

    fn finer(&self) -> Self {
        match self {
            LogDivider::Decades(lin) if lin.step() <= 1.0 => {
                LogDivider::Mantissa(LinearDivider::new(1, 0))
            }
            LogDivider::Decades(lin) => {
                let next = lin.finer();
                if next.step() < 1.0 {
                    LogDivider::Decades(LinearDivider::new(1, 0))
                } else {
                    LogDivider::Decades(next)
                }
            }
            LogDivider::Mantissa(lin) => LogDivider::Mantissa(lin.finer()),
        }
    }

    /// Number of mantissa intervals in one decade.
    fn per_decade(step: f64) -> i64 {
        (9.0 / step - 1e-9).ceil() as i64
    }

    fn range_containing(&self, value: f64) -> (f64, f64) {
        match self {
            LogDivider::Decades(lin) => {
                let (lo, hi) = lin.range_containing(value.log10());
                (10f64.powf(lo), 10f64.powf(hi))
            }
            LogDivider::Mantissa(lin) => {
                let step = lin.step();
                let mut n = value.log10().floor() as i32;
                let mut base = 10f64.powi(n);
                if value < base {
                    n -= 1;
                    base = 10f64.powi(n);
                } else if value >= base * 10.0 {
                    n += 1;
                    base = 10f64.powi(n);
                }
                let m = value / base;
                let k = (((m - 1.0) / step).floor() as i64).clamp(0, Self::per_decade(step) - 1);
                let lo = base * (1.0 + k as f64 * step);
                let hi = base * (1.0 + (k + 1) as f64 * step).min(10.0);
                (lo, hi)
            }
        }
    }

    /// Per-decade index windows `(base, first_k, last_k)` of mantissa
    /// boundaries inside `[min, max]`.
    fn mantissa_windows(step: f64, min: f64, max: f64) -> impl Iterator<Item = (f64, i64, i64)> {
        let n0 = min.log10().floor() as i32;
        let n1 = (max.log10().floor() as i32).min(n0 + MAX_DECADES);
        let per = Self::per_decade(step);
        (n0..=n1).filter_map(move |n| {
            let base = 10f64.powi(n);
            let first = (((min / base - 1.0) / step).ceil() as i64).max(0);
            let last = (((max / base - 1.0) / step).floor() as i64).min(per - 1);
            (last >= first).then_some((base, first, last))
        })
    }

    fn boundary_count(&self, min: f64, max: f64) -> u64 {
        match self {
            LogDivider::Decades(lin) => lin.boundary_count(min.log10(), max.log10()),
            LogDivider::Mantissa(lin) => Self::mantissa_windows(lin.step(), min, max)
                .map(|(_, first, last)| (last - first + 1) as u64)
                .sum(),
        }
    }

    fn boundaries(&self, min: f64, max: f64, cap: usize) -> Vec<f64> {
        match self {
            LogDivider::Decades(lin) => lin
                .boundaries(min.log10(), max.log10(), cap)
                .into_iter()
                .map(|e| 10f64.powf(e))
                .collect(),
            LogDivider::Mantissa(lin) => {
                let step = lin.step();
                Self::mantissa_windows(step, min, max)
                    .flat_map(move |(base, first, last)| {
                        (first..=last).map(move |k| base * (1.0 + k as f64 * step))
                    })
                    .take(cap)
                    .collect()
            }
        }
    }
}

/// Calendar-friendly time boundaries, aligned to multiples of the step since
/// the epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeDivider {
    index: usize,
}

impl TimeDivider {
    fn for_width(width: f64) -> Option<Self> {
        let half = width / 2.0;
        TIME_STEPS
            .iter()
            .rposition(|step| *step <= half)
            .map(|index| Self { index })
    }

    pub fn step(&self) -> f64 {
        TIME_STEPS[self.index]
    }
}

/// A divider of any kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Divider {
    Linear(LinearDivider),
    Log(LogDivider),
    Time(TimeDivider),
}

impl Divider {
    /// A coarse divider suited to the range's units and the axis scale.
    pub fn for_range(range: &DatumRange, log: bool) -> Self {
        if log && range.min() > 0.0 {
            return Divider::Log(LogDivider::for_range(range));
        }
        if range.units() == Units::Seconds {
            if let Some(time) = TimeDivider::for_width(range.width()) {
                return Divider::Time(time);
            }
        }
        Divider::Linear(LinearDivider::for_width(range.width()))
    }

    /// The next finer divider. Time steps continue into decimal seconds.
    pub fn finer(&self) -> Self {
        match self {
            Divider::Linear(lin) => Divider::Linear(lin.finer()),
            Divider::Log(log) => Divider::Log(log.finer()),
            Divider::Time(time) if time.index == 0 => Divider::Linear(LinearDivider::new(5, -1)),
            Divider::Time(time) => Divider::Time(TimeDivider {
                index: time.index - 1,
            }),
        }
    }

    /// The interval `(lo, hi)` of this divider that contains `value`.
    pub fn range_containing(&self, value: f64) -> (f64, f64) {
        match self {
            Divider::Linear(lin) => lin.range_containing(value),
            Divider::Log(log) => log.range_containing(value),
            Divider::Time(time) => {
                let step = time.step();
                let lo = (value / step).floor() * step;
                (lo, lo + step)
            }
        }
    }

    /// Number of boundaries falling inside `[min, max]`.
    pub fn boundary_count(&self, min: f64, max: f64) -> u64 {
        match self {
            Divider::Linear(lin) => lin.boundary_count(min, max),
            Divider::Log(log) => log.boundary_count(min, max),
            Divider::Time(time) => {
                let step = time.step();
                let first = (min / step).ceil();
                let last = (max / step).floor();
                if last < first {
                    0
                } else {
                    (last - first) as u64 + 1
                }
            }
        }
    }

    /// Boundaries inside `[min, max]`, at most `cap` of them.
    pub fn boundaries(&self, min: f64, max: f64, cap: usize) -> Vec<f64> {
        match self {
            Divider::Linear(lin) => lin.boundaries(min, max, cap),
            Divider::Log(log) => log.boundaries(min, max, cap),
            Divider::Time(time) => {
                let step = time.step();
                let mut k = (min / step).ceil() as i64;
                let mut out = Vec::new();
                while out.len() < cap {
                    let b = k as f64 * step;
                    if b > max {
                        break;
                    }
                    out.push(b);
                    k += 1;
                }
                out
            }
        }
    }

    fn is_log(&self) -> bool {
        matches!(self, Divider::Log(_))
    }
}

/// Chooses tick positions for an axis: the finest divider that yields at most
/// `max_ticks` boundaries.
pub fn tick_values(range: &DatumRange, log: bool, max_ticks: usize) -> Vec<f64> {
    let max_ticks = max_ticks.max(2);
    let mut div = Divider::for_range(range, log);
    for _ in 0..MAX_REFINEMENTS {
        let finer = div.finer();
        if finer.boundary_count(range.min(), range.max()) as usize > max_ticks {
            break;
        }
        div = finer;
    }
    div.boundaries(range.min(), range.max(), max_ticks * 2)
}

/// Snaps an interactively computed range to nice boundaries.
///
/// The divider is refined until an interval would span no more than 2 pixels
/// on an axis `pixel_length` long, then each endpoint moves to the nearer
/// boundary of the interval containing it. The input is returned unchanged
/// when it is already invalid or when snapping would collapse it.
pub fn maybe_round(range: &DatumRange, log: bool, pixel_length: f64) -> DatumRange {
    if pixel_length < 2.0 || !range.is_acceptable(log) {
        return *range;
    }
    let (min, max) = (range.min(), range.max());
    let target = pixel_length / 2.0;
    let mut div = Divider::for_range(range, log);
    let mut refinements = 0;
    while (div.boundary_count(min, max) as f64) < target && refinements < MAX_REFINEMENTS {
        div = div.finer();
        refinements += 1;
    }

    let snap = |value: f64| {
        let (lo, hi) = div.range_containing(value);
        let t = if div.is_log() {
            (value.log10() - lo.log10()) / (hi.log10() - lo.log10())
        } else {
            (value - lo) / (hi - lo)
        };
        if t < 0.5 {
            lo
        } else {
            hi
        }
    };

    DatumRange::try_new(snap(min), snap(max), range.units())
        .filter(|r| r.is_acceptable(log))
        .unwrap_or(*range)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_finer_sequence() {
        let d = LinearDivider::new(1, 1);
        assert_eq!(d.step(), 10.0);
        assert_eq!(d.finer().step(), 5.0);
        assert_eq!(d.finer().finer().step(), 2.0);
        assert_eq!(d.finer().finer().finer().step(), 1.0);
        assert_eq!(LinearDivider::new(5, -1).step(), 0.5);
    }

    #[test]
    fn test_linear_range_containing() {
        let d = LinearDivider::new(2, 0);
        assert_eq!(d.range_containing(3.0), (2.0, 4.0));
        assert_eq!(d.range_containing(-0.5), (-2.0, 0.0));
        assert_eq!(d.boundary_count(0.5, 9.0), 4);
    }

    #[test]
    fn test_maybe_round_linear() {
        let r = DatumRange::numeric(0.3, 99.7).unwrap();
        let rounded = maybe_round(&r, false, 200.0);
        assert_eq!(rounded.min(), 0.5);
        assert_eq!(rounded.max(), 99.5);
    }

    #[test]
    fn test_maybe_round_keeps_invalid_input() {
        let r = DatumRange::numeric(-1.0, 10.0).unwrap();
        assert_eq!(maybe_round(&r, true, 200.0), r);
    }

    #[test]
    fn test_maybe_round_log_stays_positive() {
        let r = DatumRange::numeric(1.3, 870.0).unwrap();
        let rounded = maybe_round(&r, true, 300.0);
        assert!(rounded.min() > 0.0);
        assert!((rounded.min() - 1.3).abs() / 1.3 < 0.05);
        assert!((rounded.max() - 870.0).abs() / 870.0 < 0.05);
    }

    #[test]
    fn test_time_divider_snaps_to_minutes() {
        let r = DatumRange::try_new(7.0, 86_390.0, Units::Seconds).unwrap();
        let rounded = maybe_round(&r, false, 200.0);
        assert_eq!(rounded.min(), 0.0);
        assert_eq!(rounded.max(), 86_400.0);
    }

    #[test]
    fn test_log_mantissa_boundaries() {
        let d = Divider::Log(LogDivider::Mantissa(LinearDivider::new(1, 0)));
        let b = d.boundaries(1.0, 100.0, 100);
        assert_eq!(b.len(), 19);
        assert_eq!(d.range_containing(35.0), (30.0, 40.0));
    }

    #[test]
    fn test_tick_values_bounded() {
        let r = DatumRange::numeric(0.0, 100.0).unwrap();
        let ticks = tick_values(&r, false, 6);
        assert_eq!(ticks, vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
    }
}
