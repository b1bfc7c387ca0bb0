//! Series rendering as a decimated polyline.

use eframe::egui;
use rdas::{AxisView, DasAxis, SampledSeries, ScreenRect};

use crate::rendering::PanelFrame;

/// Reduces visible samples to at most a min/max pair per pixel column.
///
/// Returns runs of panel-local points; a sample that cannot be shown (zero
/// or negative on a log axis) ends the current run.
pub fn decimate(
    series: &SampledSeries,
    x_axis: &DasAxis,
    y_axis: &DasAxis,
) -> Vec<Vec<(f64, f64)>> {
    let x_range = x_axis.datum_range();
    let y_log = y_axis.is_log();
    let indices = series.visible_indices(x_range.min(), x_range.max());

    let mut runs = Vec::new();
    let mut run: Vec<(f64, f64)> = Vec::new();
    let mut column: Option<(i64, f64, f64)> = None; // (px column, min y px, max y px)

    let flush_column = |run: &mut Vec<(f64, f64)>, column: &mut Option<(i64, f64, f64)>| {
        if let Some((col, lo, hi)) = column.take() {
            let x = col as f64;
            run.push((x, lo));
            if hi != lo {
                run.push((x, hi));
            }
        }
    };

    for i in indices {
        let (x, y) = (series.xs()[i], series.ys()[i]);
        if y_log && y <= 0.0 {
            flush_column(&mut run, &mut column);
            if run.len() > 1 {
                runs.push(std::mem::take(&mut run));
            }
            run.clear();
            continue;
        }
        let px = x_axis.transform(x);
        let py = y_axis.transform(y);
        let col = px.round() as i64;
        let current = column;
        match current {
            Some((c, lo, hi)) if c == col => column = Some((c, lo.min(py), hi.max(py))),
            _ => {
                flush_column(&mut run, &mut column);
                column = Some((col, py, py));
            }
        }
    }
    flush_column(&mut run, &mut column);
    if run.len() > 1 {
        runs.push(run);
    }
    runs
}

/// Draws the series clipped to the plot area.
pub fn render_series(
    painter: &egui::Painter,
    frame: PanelFrame,
    series: &SampledSeries,
    x_axis: &DasAxis,
    y_axis: &DasAxis,
    bounds: ScreenRect,
    color: egui::Color32,
) {
    let clipped = painter.with_clip_rect(frame.to_screen_rect(bounds));
    for run in decimate(series, x_axis, y_axis) {
        let points: Vec<egui::Pos2> = run.into_iter().map(|(x, y)| frame.at(x, y)).collect();
        clipped.add(egui::Shape::line(points, egui::Stroke::new(1.25, color)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdas::{DatumRange, Orientation};

    fn axes(log: bool) -> (DasAxis, DasAxis) {
        let x = DasAxis::new(DatumRange::numeric(0.0, 10.0).unwrap(), Orientation::Horizontal, 0.0, 10.0);
        let y = if log {
            DasAxis::new_log(DatumRange::numeric(1.0, 100.0).unwrap(), Orientation::Vertical, 0.0, 100.0)
                .unwrap()
        } else {
            DasAxis::new(DatumRange::numeric(-10.0, 10.0).unwrap(), Orientation::Vertical, 0.0, 100.0)
        };
        (x, y)
    }

    #[test]
    fn test_one_min_max_pair_per_column() {
        let (x, y) = axes(false);
        // 100 samples over 10 pixel columns
        let series = SampledSeries::new((0..100).map(|i| (i as f64 / 10.0, (i % 7) as f64)));
        let runs = decimate(&series, &x, &y);
        assert_eq!(runs.len(), 1);
        assert!(runs[0].len() <= 2 * 11);
    }

    #[test]
    fn test_non_positive_breaks_log_run() {
        let (x, y) = axes(true);
        let series = SampledSeries::new(vec![
            (1.0, 10.0),
            (2.0, 20.0),
            (3.0, -1.0),
            (4.0, 10.0),
            (5.0, 30.0),
        ]);
        let runs = decimate(&series, &x, &y);
        assert_eq!(runs.len(), 2);
    }
}
