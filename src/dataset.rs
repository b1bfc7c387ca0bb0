//! Minimal dataset access used for crosshair readouts.
//!
//! The plot's data model is owned elsewhere; interactive code only needs a
//! nearest-sample lookup by X coordinate.

/// Nearest-index lookup over a monotonic X series.
pub trait SeriesReadout {
    /// Index of the sample whose X is closest to `x`, or `None` when empty.
    fn nearest_index(&self, x: f64) -> Option<usize>;

    /// `(x, y)` of the sample at `index`.
    fn value_at(&self, index: usize) -> Option<(f64, f64)>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Convenience: the sample nearest to `x`.
    fn nearest(&self, x: f64) -> Option<(f64, f64)> {
        self.nearest_index(x).and_then(|i| self.value_at(i))
    }
}

/// A series sampled at increasing X positions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampledSeries {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl SampledSeries {
    /// Builds a series from paired samples, sorting them by X. Non-finite X
    /// values are dropped.
    pub fn new(samples: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let mut pairs: Vec<(f64, f64)> = samples.into_iter().filter(|(x, _)| x.is_finite()).collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
        let (xs, ys) = pairs.into_iter().unzip();
        Self { xs, ys }
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Samples whose X lies in `[min, max]`, plus one neighbour on each side
    /// so a polyline reaches the plot edges.
    pub fn visible_indices(&self, min: f64, max: f64) -> std::ops::Range<usize> {
        let start = self.xs.partition_point(|x| *x < min).saturating_sub(1);
        let end = (self.xs.partition_point(|x| *x <= max) + 1).min(self.xs.len());
        start..end.max(start)
    }
}

impl SeriesReadout for SampledSeries {
    fn nearest_index(&self, x: f64) -> Option<usize> {
        if self.xs.is_empty() || !x.is_finite() {
            return None;
        }
        let i = self.xs.partition_point(|v| *v < x);
        if i == 0 {
            return Some(0);
        }
        if i == self.xs.len() {
            return Some(i - 1);
        }
        if (x - self.xs[i - 1]) <= (self.xs[i] - x) {
            Some(i - 1)
        } else {
            Some(i)
        }
    }

    fn value_at(&self, index: usize) -> Option<(f64, f64)> {
        Some((*self.xs.get(index)?, *self.ys.get(index)?))
    }

    fn len(&self) -> usize {
        self.xs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> SampledSeries {
        SampledSeries::new([(3.0, 30.0), (0.0, 0.0), (1.0, 10.0), (2.0, 20.0)])
    }

    #[test]
    fn test_samples_are_sorted() {
        assert_eq!(series().xs(), &[0.0, 1.0, 2.0, 3.0]);
        assert_eq!(series().ys(), &[0.0, 10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_nearest_index() {
        let s = series();
        assert_eq!(s.nearest_index(-5.0), Some(0));
        assert_eq!(s.nearest_index(1.4), Some(1));
        assert_eq!(s.nearest_index(1.6), Some(2));
        assert_eq!(s.nearest_index(99.0), Some(3));
        assert_eq!(s.nearest(2.1), Some((2.0, 20.0)));
        assert_eq!(SampledSeries::default().nearest_index(1.0), None);
    }

    #[test]
    fn test_visible_indices_include_neighbours() {
        let s = series();
        assert_eq!(s.visible_indices(1.5, 2.5), 1..4);
        assert_eq!(s.visible_indices(-10.0, 10.0), 0..4);
    }
}
