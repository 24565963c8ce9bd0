use tiny_skia_pathops::curve_intersections::intersect;
use tiny_skia_pathops::*;

fn pt(x: f64, y: f64) -> Point64 {
    Point64::from_xy(x, y)
}

fn quad(p0: (f64, f64), p1: (f64, f64), p2: (f64, f64)) -> Curve64 {
    Quad64::new([pt(p0.0, p0.1), pt(p1.0, p1.1), pt(p2.0, p2.1)]).into()
}

fn assert_on_both(c1: &Curve64, c2: &Curve64, i: &Intersections) {
    for e in i.iter() {
        let p1 = c1.point_at_t(e.t[0]);
        let p2 = c2.point_at_t(e.t[1]);
        assert!(p1.distance(p2) < 1e-6, "{:?} vs {:?}", p1, p2);
        assert!(p1.distance(e.point) < 1e-6);
    }
}

#[test]
fn two_crossings() {
    // 8t - 8t^2 == 3 - 8t + 8t^2 at t = 1/4 and t = 3/4
    let c1 = quad((0.0, 0.0), (2.0, 4.0), (4.0, 0.0));
    let c2 = quad((0.0, 3.0), (2.0, -1.0), (4.0, 3.0));
    let mut i = Intersections::new();
    assert_eq!(intersect(&c1, &c2, &mut i, &IntersectOptions::default()), Ok(2));
    assert_on_both(&c1, &c2, &i);
    assert!((i.t(0, 0) - 0.25).abs() < 1e-4);
    assert!((i.t(0, 1) - 0.75).abs() < 1e-4);
    assert!((i.t(1, 0) - 0.25).abs() < 1e-4);
    assert!((i.t(1, 1) - 0.75).abs() < 1e-4);
}

#[test]
fn disjoint() {
    let c1 = quad((0.0, 0.0), (2.0, 4.0), (4.0, 0.0));
    let c2 = quad((0.0, 5.0), (2.0, 9.0), (4.0, 5.0));
    let mut i = Intersections::new();
    assert_eq!(intersect(&c1, &c2, &mut i, &IntersectOptions::default()), Ok(0));
}

#[test]
fn shared_ends() {
    let c1 = quad((0.0, 0.0), (2.0, 4.0), (4.0, 0.0));
    let c2 = quad((0.0, 0.0), (2.0, -4.0), (4.0, 0.0));
    let mut i = Intersections::new();
    assert_eq!(intersect(&c1, &c2, &mut i, &IntersectOptions::default()), Ok(2));
    assert_eq!(i.t(0, 0), 0.0);
    assert_eq!(i.t(1, 0), 0.0);
    assert_eq!(i.t(0, 1), 1.0);
    assert_eq!(i.t(1, 1), 1.0);
    assert_eq!(i.coincident_used(), 0);
}

#[test]
fn end_on_interior() {
    // c1 is y = 2x - x^2 / 2 and c2 ends on it at x = 1 from above
    let c1 = quad((0.0, 0.0), (2.0, 4.0), (4.0, 0.0));
    let c2 = quad((-1.0, -1.0), (0.0, 1.5), (1.0, 1.5));
    let mut i = Intersections::new();
    assert_eq!(intersect(&c1, &c2, &mut i, &IntersectOptions::default()), Ok(1));
    assert_on_both(&c1, &c2, &i);
    assert!((i.t(0, 0) - 0.25).abs() < 1e-9);
    assert_eq!(i.t(1, 0), 1.0);
    assert_eq!(i.point(0), pt(1.0, 1.5));

    // the same with the curves swapped
    let mut i = Intersections::new();
    assert_eq!(intersect(&c2, &c1, &mut i, &IntersectOptions::default()), Ok(1));
    assert_eq!(i.t(0, 0), 1.0);
    assert!((i.t(1, 0) - 0.25).abs() < 1e-9);
}

#[test]
fn quad_and_line() {
    let c1 = quad((0.0, 0.0), (2.0, 4.0), (4.0, 0.0));
    let c2: Curve64 = Line64::new(pt(2.0, -1.0), pt(2.0, 3.0)).into();
    let mut i = Intersections::new();
    assert_eq!(intersect(&c1, &c2, &mut i, &IntersectOptions::default()), Ok(1));
    assert!((i.t(0, 0) - 0.5).abs() < 1e-9);
    assert!((i.t(1, 0) - 0.75).abs() < 1e-9);

    // the line goes first
    let mut i = Intersections::new();
    assert_eq!(intersect(&c2, &c1, &mut i, &IntersectOptions::default()), Ok(1));
    assert!((i.t(0, 0) - 0.75).abs() < 1e-9);
    assert!((i.t(1, 0) - 0.5).abs() < 1e-9);
}

#[test]
fn straight_quad() {
    let c1 = quad((0.0, 0.0), (1.0, 1.0), (2.0, 2.0));
    let c2 = quad((0.0, 2.0), (2.0, 0.0), (4.0, -2.0));
    let mut i = Intersections::new();
    assert_eq!(intersect(&c1, &c2, &mut i, &IntersectOptions::default()), Ok(1));
    assert!((i.t(0, 0) - 0.5).abs() < 1e-9);
    assert!((i.t(1, 0) - 0.25).abs() < 1e-9);
}
