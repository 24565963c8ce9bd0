use tiny_skia_pathops::*;

fn build(path: &Path) -> Vec<Contour> {
    let mut builder = ContourBuilder::new();
    builder.push_path(path).unwrap();
    builder.finish()
}

#[test]
fn open_contour() {
    let mut pb = PathBuilder::new();
    pb.move_to(0.0, 0.0);
    pb.quad_to(5.0, 10.0, 10.0, 0.0);
    pb.cubic_to(12.0, 5.0, 15.0, 5.0, 20.0, 0.0);
    let path = pb.finish().unwrap();

    let contours = build(&path);
    assert_eq!(contours.len(), 1);
    let contour = &contours[0];
    assert!(!contour.is_closed());
    assert!(contour.contains_curves());
    assert_eq!(contour.segments().len(), 2);
    assert_eq!(contour.segments()[0].segment_type(), SegmentType::Quad);
    assert_eq!(contour.segments()[1].segment_type(), SegmentType::Cubic);
    assert_eq!(contour.segments()[1].curve().start(), Point64::from_xy(10.0, 0.0));
}

#[test]
fn sub_paths() {
    let mut pb = PathBuilder::new();
    pb.move_to(0.0, 0.0);
    pb.line_to(10.0, 0.0);
    pb.line_to(10.0, 10.0);
    pb.close();
    pb.move_to(20.0, 0.0);
    pb.line_to(30.0, 5.0);
    let path = pb.finish().unwrap();

    let contours = build(&path);
    assert_eq!(contours.len(), 2);
    assert_eq!(contours[0].segments().len(), 3);
    assert_eq!(contours[0].segments()[2].segment_type(), SegmentType::Line);
    assert_eq!(contours[1].segments().len(), 1);
    assert!(contours[1].bounds().intersects(&Rect64::from_ltrb(25.0, 0.0, 26.0, 1.0)));
}

#[test]
fn crossing_rects() {
    let mut pb = PathBuilder::new();
    pb.push_rect(Rect::from_xywh(0.0, 0.0, 10.0, 10.0).unwrap());
    let a = pb.finish().unwrap();
    let mut pb = PathBuilder::new();
    pb.push_rect(Rect::from_xywh(5.0, 5.0, 10.0, 10.0).unwrap());
    let b = pb.finish().unwrap();

    let set = find_intersections(&[&a, &b], &IntersectOptions::default()).unwrap();
    assert_eq!(set.contours().len(), 2);
    assert!(set.coincidence().is_empty());

    // the right edge of the first rect meets the top edge of the second one
    let right = &set.contours()[0].segments()[1];
    assert_eq!(right.spans().len(), 3);
    let span = &right.spans()[1];
    assert_eq!(span.t, 0.5);
    assert_eq!(span.point, Point64::from_xy(10.0, 5.0));
    assert_eq!(span.opps, vec![SpanRef { contour: 1, segment: 0, t: 0.5 }]);

    let top = set.segment(&span.opps[0]).unwrap();
    assert_eq!(top.spans()[1].opps, vec![SpanRef { contour: 0, segment: 1, t: 0.5 }]);

    // the bottom edge of the first rect meets the left edge of the second one
    let bottom = &set.contours()[0].segments()[2];
    assert_eq!(bottom.spans().len(), 3);
    assert_eq!(bottom.spans()[1].point, Point64::from_xy(5.0, 10.0));
}

#[test]
fn far_contours_stop_early() {
    let mut test = {
        let mut pb = PathBuilder::new();
        pb.push_rect(Rect::from_xywh(0.0, 0.0, 10.0, 10.0).unwrap());
        build(&pb.finish().unwrap()).remove(0)
    };
    let mut next = {
        let mut pb = PathBuilder::new();
        pb.push_rect(Rect::from_xywh(0.0, 20.0, 10.0, 10.0).unwrap());
        build(&pb.finish().unwrap()).remove(0)
    };
    let mut side = {
        let mut pb = PathBuilder::new();
        pb.push_rect(Rect::from_xywh(20.0, 0.0, 10.0, 10.0).unwrap());
        build(&pb.finish().unwrap()).remove(0)
    };

    let mut coincidence = Coincidence::new();
    let options = IntersectOptions::default();
    assert_eq!(add_intersect_ts(&mut test, Some(&mut next), &mut coincidence, &options), Ok(false));
    assert_eq!(add_intersect_ts(&mut test, Some(&mut side), &mut coincidence, &options), Ok(true));
    assert!(test.segments().iter().all(|s| s.spans().len() == 2));
}

#[test]
fn self_intersecting_polygon() {
    // a bow tie crosses itself in the middle
    let mut pb = PathBuilder::new();
    pb.move_to(0.0, 0.0);
    pb.line_to(10.0, 10.0);
    pb.line_to(10.0, 0.0);
    pb.line_to(0.0, 10.0);
    pb.close();
    let path = pb.finish().unwrap();

    let set = find_intersections(&[&path], &IntersectOptions::default()).unwrap();
    let contour = &set.contours()[0];
    assert_eq!(contour.segments().len(), 4);
    let first = &contour.segments()[0];
    let third = &contour.segments()[2];
    assert_eq!(first.spans().len(), 3);
    assert_eq!(third.spans().len(), 3);
    assert_eq!(first.spans()[1].point, Point64::from_xy(5.0, 5.0));
    assert_eq!(first.spans()[1].opps, vec![SpanRef { contour: 0, segment: 2, t: 0.5 }]);

    // adjacent segments only share their end points
    assert!(contour.segments()[1].spans().iter().all(|s| s.opps.is_empty()));
}

#[test]
fn cubic_loop() {
    let mut pb = PathBuilder::new();
    pb.move_to(0.0, 0.0);
    pb.cubic_to(2.0, 1.0, 0.0, 1.0, 1.0, 0.0);
    pb.close();
    let path = pb.finish().unwrap();

    let set = find_intersections(&[&path], &IntersectOptions::default()).unwrap();
    let cubic = &set.contours()[0].segments()[0];
    let loops: Vec<&Span> = cubic.spans().iter().filter(|s| s.is_loop).collect();
    assert_eq!(loops.len(), 2);
    assert_eq!(loops[0].opps[0].t, loops[1].t);
    assert_eq!(loops[1].opps[0].t, loops[0].t);

    let options = IntersectOptions {
        check_self: false,
        ..IntersectOptions::default()
    };
    let set = find_intersections(&[&path], &options).unwrap();
    assert!(set.contours()[0].segments()[0].spans().iter().all(|s| !s.is_loop));
}

#[test]
fn end_on_curve() {
    let mut pb = PathBuilder::new();
    pb.move_to(0.0, 0.0);
    pb.quad_to(2.0, 4.0, 4.0, 0.0);
    let a = pb.finish().unwrap();
    let mut pb = PathBuilder::new();
    pb.move_to(-1.0, -1.0);
    pb.quad_to(0.0, 1.5, 1.0, 1.5);
    let b = pb.finish().unwrap();

    let set = find_intersections(&[&a, &b], &IntersectOptions::default()).unwrap();
    let arch = set
        .contours()
        .iter()
        .flat_map(|c| c.segments())
        .find(|s| s.curve().start() == Point64::from_xy(0.0, 0.0))
        .unwrap();

    assert_eq!(arch.spans().len(), 3);
    let span = &arch.spans()[1];
    assert!((span.t - 0.25).abs() < 1e-9);
    assert_eq!(span.opps.len(), 1);
    assert_eq!(span.opps[0].t, 1.0);

    // no extra span next to the end of the other curve
    let other = set.segment(&span.opps[0]).unwrap();
    assert_eq!(other.spans().len(), 2);
    assert_eq!(other.spans()[1].t, 1.0);
}
