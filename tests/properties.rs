use proptest::prelude::*;
use rdas::{classify, AxisView, DasAxis, DatumRange, DragGesture, Orientation, ScreenPoint};

const WIDTH: i32 = 400;

fn center() -> ScreenPoint {
    ScreenPoint::new(200, 200)
}

/// Release point `radius` px from the center at `angle` degrees, measured
/// counter-clockwise from the positive x axis with screen y pointing down.
/// Rounding to whole pixels moves the angle by under 5 degrees at these radii.
fn flick(angle: f64, radius: f64) -> ScreenPoint {
    let (sin, cos) = angle.to_radians().sin_cos();
    ScreenPoint::new(200 + (radius * cos).round() as i32, 200 - (radius * sin).round() as i32)
}

proptest! {
    #[test]
    fn prop_short_moves_are_clicks(dx in -3i32..=3, dy in -3i32..=3) {
        prop_assume!(f64::from(dx).hypot(f64::from(dy)) < 4.0);
        let p2 = ScreenPoint::new(200 + dx, 200 + dy);
        prop_assert_eq!(classify(center(), p2, WIDTH, 0), Some(DragGesture::None));
    }

    #[test]
    fn prop_long_moves_are_selections(dx in -200i32..=200, dy in -200i32..=200) {
        prop_assume!(f64::from(dx).hypot(f64::from(dy)) >= 20.0);
        let p2 = ScreenPoint::new(200 + dx, 200 + dy);
        prop_assert_eq!(classify(center(), p2, WIDTH, 0), None);
    }

    #[test]
    fn prop_left_flicks_are_back(angle in 166.0f64..194.0, radius in 10.0f64..19.0) {
        prop_assert_eq!(classify(center(), flick(angle, radius), WIDTH, 0), Some(DragGesture::Back));
    }

    #[test]
    fn prop_down_flicks_zoom_out(angle in -104.0f64..-76.0, radius in 10.0f64..19.0) {
        prop_assert_eq!(classify(center(), flick(angle, radius), WIDTH, 0), Some(DragGesture::ZoomOut));
    }

    #[test]
    fn prop_right_flicks_are_forward(angle in -24.0f64..24.0, radius in 10.0f64..19.0) {
        prop_assert_eq!(classify(center(), flick(angle, radius), WIDTH, 0), Some(DragGesture::Forward));
    }

    #[test]
    fn prop_up_flicks_are_undefined(angle in 36.0f64..144.0, radius in 10.0f64..19.0) {
        prop_assert_eq!(classify(center(), flick(angle, radius), WIDTH, 0), Some(DragGesture::Undefined));
    }

    #[test]
    fn prop_edge_flicks_scan(dx in 5i32..15, press in 0i32..5) {
        let prev = classify(ScreenPoint::new(press, 100), ScreenPoint::new(press - dx, 100), WIDTH, 0);
        prop_assert_eq!(prev, Some(DragGesture::ScanPrev));
        let right = WIDTH - press;
        let next = classify(ScreenPoint::new(right, 100), ScreenPoint::new(right + dx, 100), WIDTH, 0);
        prop_assert_eq!(next, Some(DragGesture::ScanNext));
    }

    #[test]
    fn prop_scan_round_trip(min in -1.0e6f64..1.0e6, width in 1.0e-3f64..1.0e6, pages in 1usize..6) {
        let start = DatumRange::numeric(min, min + width).unwrap();
        let mut axis = DasAxis::new(start, Orientation::Horizontal, 0.0, 500.0);
        for _ in 0..pages {
            prop_assert!(axis.scan_next());
        }
        for _ in 0..pages {
            prop_assert!(axis.scan_previous());
        }
        prop_assert_eq!(axis.datum_range(), start);
    }
}
