use tiny_skia_pathops::line_curve_intersections::*;
use tiny_skia_pathops::*;

fn pt(x: f64, y: f64) -> Point64 {
    Point64::from_xy(x, y)
}

// y(t) = 9t(1 - t)(1 - 2t), x(t) = 3t + 3t^2 - 2t^3
fn wave() -> Curve64 {
    Cubic64::new([pt(0.0, 0.0), pt(1.0, 3.0), pt(3.0, -3.0), pt(4.0, 0.0)]).into()
}

#[test]
fn three_crossings() {
    let mut i = Intersections::new();
    horizontal_intersect(&wave(), -1.0, 5.0, 0.0, false, &mut i).unwrap();
    assert_eq!(i.len(), 3);

    let expected = [(0.0, 1.0 / 6.0), (0.5, 0.5), (1.0, 5.0 / 6.0)];
    for (index, (curve_t, line_t)) in expected.iter().enumerate() {
        assert!((i.t(0, index) - curve_t).abs() < 1e-9);
        assert!((i.t(1, index) - line_t).abs() < 1e-9);
    }
}

#[test]
fn general_line() {
    let mut i = Intersections::new();
    let line = Line64::new(pt(-1.0, 0.0), pt(5.0, 0.0));
    intersect_line(&wave(), &line, &mut i).unwrap();
    assert_eq!(i.len(), 3);
    assert!((i.t(0, 1) - 0.5).abs() < 1e-9);
    assert!(i.point(1).distance(pt(2.0, 0.0)) < 1e-9);
}

#[test]
fn vertical() {
    let mut i = Intersections::new();
    assert_eq!(vertical_intersect(&wave(), -5.0, 5.0, 2.0, false, &mut i), Ok(1));
    assert!((i.t(0, 0) - 0.5).abs() < 1e-9);
    assert!((i.t(1, 0) - 0.5).abs() < 1e-9);
}

#[test]
fn flipped_vertical() {
    let mut i = Intersections::new();
    assert_eq!(vertical_intersect(&wave(), -5.0, 5.0, 2.0, true, &mut i), Ok(1));
    assert!((i.t(1, 0) - 0.5).abs() < 1e-9);
}

#[test]
fn short_line_misses() {
    let mut i = Intersections::new();
    let line = Line64::new(pt(2.5, 0.0), pt(3.5, 0.0));
    assert_eq!(intersect_line(&wave(), &line, &mut i), Ok(0));
}
