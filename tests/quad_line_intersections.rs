use tiny_skia_pathops::line_curve_intersections::*;
use tiny_skia_pathops::*;

fn pt(x: f64, y: f64) -> Point64 {
    Point64::from_xy(x, y)
}

fn arch() -> Curve64 {
    Quad64::new([pt(0.0, 0.0), pt(2.0, 4.0), pt(4.0, 0.0)]).into()
}

fn assert_hits_y1(i: &Intersections) {
    let half = 0.5_f64.sqrt() / 2.0;
    assert_eq!(i.len(), 2);
    assert!((i.t(0, 0) - (0.5 - half)).abs() < 1e-9);
    assert!((i.t(0, 1) - (0.5 + half)).abs() < 1e-9);
    for index in 0..2 {
        let p = i.point(index);
        assert!((p.y - 1.0).abs() < 1e-9);
        assert!((i.t(1, index) - p.x / 4.0).abs() < 1e-9);
    }
}

#[test]
fn crossing_line() {
    let mut i = Intersections::new();
    let line = Line64::new(pt(0.0, 1.0), pt(4.0, 1.0));
    intersect_line(&arch(), &line, &mut i).unwrap();
    assert_hits_y1(&i);
}

#[test]
fn crossing_horizontal() {
    let mut i = Intersections::new();
    horizontal_intersect(&arch(), 0.0, 4.0, 1.0, false, &mut i).unwrap();
    assert_hits_y1(&i);
}

#[test]
fn miss() {
    let mut i = Intersections::new();
    let line = Line64::new(pt(0.0, 3.0), pt(4.0, 3.0));
    assert_eq!(intersect_line(&arch(), &line, &mut i), Ok(0));
}

#[test]
fn end_points_on_line() {
    let mut i = Intersections::new();
    let line = Line64::new(pt(0.0, 0.0), pt(4.0, 0.0));
    assert_eq!(intersect_line(&arch(), &line, &mut i), Ok(2));
    assert_eq!(i.t(0, 0), 0.0);
    assert_eq!(i.t(1, 0), 0.0);
    assert_eq!(i.t(0, 1), 1.0);
    assert_eq!(i.t(1, 1), 1.0);
}

#[test]
fn vertical_through_top() {
    let mut i = Intersections::new();
    assert_eq!(vertical_intersect(&arch(), -1.0, 3.0, 2.0, false, &mut i), Ok(1));
    assert!((i.t(0, 0) - 0.5).abs() < 1e-9);
    assert!((i.t(1, 0) - 0.75).abs() < 1e-9);
}
