use tiny_skia_pathops::curve_intersections::intersect;
use tiny_skia_pathops::*;

fn pt(x: f64, y: f64) -> Point64 {
    Point64::from_xy(x, y)
}

fn cubic(points: [(f64, f64); 4]) -> Cubic64 {
    Cubic64::new([
        pt(points[0].0, points[0].1),
        pt(points[1].0, points[1].1),
        pt(points[2].0, points[2].1),
        pt(points[3].0, points[3].1),
    ])
}

#[test]
fn two_crossings() {
    // both share x(t), so they cross where 9t(1 - t) == 3(1 - 3t + 3t^2)
    let c1: Curve64 = cubic([(0.0, 0.0), (1.0, 3.0), (3.0, 3.0), (4.0, 0.0)]).into();
    let c2: Curve64 = cubic([(0.0, 3.0), (1.0, 0.0), (3.0, 0.0), (4.0, 3.0)]).into();
    let mut i = Intersections::new();
    assert_eq!(intersect(&c1, &c2, &mut i, &IntersectOptions::default()), Ok(2));

    let root = 3.0_f64.sqrt() / 6.0;
    let expected = [0.5 - root, 0.5 + root];
    for (index, t) in expected.iter().enumerate() {
        assert!((i.t(0, index) - t).abs() < 1e-4);
        assert!((i.t(1, index) - t).abs() < 1e-4);
        assert!(c1.point_at_t(i.t(0, index)).distance(c2.point_at_t(i.t(1, index))) < 1e-6);
    }
}

#[test]
fn quad_and_cubic() {
    let c1: Curve64 = Quad64::new([pt(0.0, 3.0), pt(2.0, -3.0), pt(4.0, 3.0)]).into();
    let c2: Curve64 = cubic([(0.0, 0.0), (1.0, 3.0), (3.0, 3.0), (4.0, 0.0)]).into();
    let mut i = Intersections::new();
    assert_eq!(intersect(&c1, &c2, &mut i, &IntersectOptions::default()), Ok(2));
    for e in i.iter() {
        assert!(c1.point_at_t(e.t[0]).distance(c2.point_at_t(e.t[1])) < 1e-6);
    }
}

#[test]
fn tangent_arches() {
    // the gap between them is 3(2t - 1)^2, so they only touch at t = 1/2
    let c1: Curve64 = cubic([(0.0, 0.0), (1.0, 2.0), (3.0, 2.0), (4.0, 0.0)]).into();
    let c2: Curve64 = cubic([(0.0, 3.0), (1.0, 1.0), (3.0, 1.0), (4.0, 3.0)]).into();
    let mut i = Intersections::new();
    assert_eq!(intersect(&c1, &c2, &mut i, &IntersectOptions::default()), Ok(1));
    assert!((i.t(0, 0) - 0.5).abs() < 1e-2);
    assert!((i.t(1, 0) - 0.5).abs() < 1e-2);
    assert!(i.point(0).distance(pt(2.0, 1.5)) < 1e-3);
}

#[test]
fn end_on_cubic() {
    let c1: Curve64 = cubic([(0.0, 0.0), (1.0, 2.0), (3.0, 2.0), (4.0, 0.0)]).into();
    let end = c1.point_at_t(0.7);
    let c2: Curve64 = Quad64::new([pt(end.x - 2.0, end.y - 2.0), pt(end.x - 1.0, end.y), end]).into();
    let mut i = Intersections::new();
    assert_eq!(intersect(&c1, &c2, &mut i, &IntersectOptions::default()), Ok(1));
    assert!((i.t(0, 0) - 0.7).abs() < 1e-6);
    assert_eq!(i.t(1, 0), 1.0);
    assert_eq!(i.point(0), end);
}

#[test]
fn overshooting_straight_cubic() {
    // runs from x = 0 past x = 3 and back to x = 2
    let c1: Curve64 = cubic([(0.0, 0.0), (10.0, 0.0), (-8.0, 0.0), (2.0, 0.0)]).into();
    let c2: Curve64 = Quad64::new([pt(1.5, -1.0), pt(3.5, 0.0), pt(1.5, 1.0)]).into();
    let mut i = Intersections::new();
    assert_eq!(intersect(&c1, &c2, &mut i, &IntersectOptions::default()), Ok(1));
    assert!((i.t(1, 0) - 0.5).abs() < 1e-6);
    assert!(i.point(0).distance(pt(2.5, 0.0)) < 1e-6);
    assert!(c1.point_at_t(i.t(0, 0)).distance(pt(2.5, 0.0)) < 1e-6);
}

#[test]
fn far_apart() {
    let c1: Curve64 = cubic([(0.0, 0.0), (1.0, 3.0), (3.0, 3.0), (4.0, 0.0)]).into();
    let c2: Curve64 = cubic([(10.0, 0.0), (11.0, 3.0), (13.0, 3.0), (14.0, 0.0)]).into();
    let mut i = Intersections::new();
    assert_eq!(intersect(&c1, &c2, &mut i, &IntersectOptions::default()), Ok(0));
}

#[test]
fn strict_clip_limit() {
    let c1: Curve64 = cubic([(0.0, 0.0), (1.0, 3.0), (3.0, 3.0), (4.0, 0.0)]).into();
    let c2: Curve64 = cubic([(0.0, 3.0), (1.0, 0.0), (3.0, 0.0), (4.0, 3.0)]).into();
    let options = IntersectOptions {
        strict_clip_limit: true,
        max_clip_calls: 2,
        ..IntersectOptions::default()
    };

    let mut i = Intersections::new();
    assert!(matches!(
        intersect(&c1, &c2, &mut i, &options),
        Err(IntersectError::ClipLimitReached(_))
    ));
}

#[test]
fn loop_parameters() {
    let c = cubic([(0.0, 0.0), (2.0, 1.0), (0.0, 1.0), (1.0, 0.0)]);
    let (s, t) = c.find_loop().unwrap();
    assert!(s < t);
    assert!(c.point_at_t(s).distance(c.point_at_t(t)) < 1e-9);
}

#[test]
fn no_loop() {
    let c = cubic([(0.0, 0.0), (1.0, 3.0), (3.0, 3.0), (4.0, 0.0)]);
    assert_eq!(c.find_loop(), None);
}

#[test]
fn inflection() {
    let c = cubic([(0.0, 0.0), (1.0, 3.0), (3.0, -3.0), (4.0, 0.0)]);
    let mut ts = [0.0; 2];
    assert_eq!(c.find_inflections(&mut ts), 1);
    assert!((ts[0] - 0.5).abs() < 1e-9);
}
