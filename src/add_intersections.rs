// Copyright 2012 Google Inc.
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Intersections between the segments of contours.

use tiny_skia_path::Path;

use crate::coincidence::{CoinSpan, Coincidence};
use crate::contour::{sort_contours, Contour, ContourBuilder};
use crate::curve_intersections;
use crate::intersections::Intersections;
use crate::line_curve_intersections;
use crate::path64::curve64::Curve64;
use crate::segment::{Segment, SegmentType, SpanRef};
use crate::validate;
use crate::{IntersectError, IntersectOptions};

/// Contours with their intersection spans and coincident runs.
#[derive(Clone, Debug)]
pub struct ContourSet {
    contours: Vec<Contour>,
    coincidence: Coincidence,
}

impl ContourSet {
    /// Returns contours sorted top to bottom. A contour id is its index here.
    pub fn contours(&self) -> &[Contour] {
        &self.contours
    }

    /// Returns a contour by id.
    pub fn contour(&self, id: usize) -> Option<&Contour> {
        self.contours.get(id)
    }

    /// Returns the segment a span reference points to.
    pub fn segment(&self, r: &SpanRef) -> Option<&Segment> {
        self.contour(r.contour)?.segments().get(r.segment)
    }

    /// Returns the recorded coincident runs.
    pub fn coincidence(&self) -> &Coincidence {
        &self.coincidence
    }
}

/// Finds the intersections of every segment pair of the paths' contours.
///
/// Each contour is tested against itself and against every contour below it.
/// A contour stops testing later contours once they start below its bottom.
pub fn find_intersections(paths: &[&Path], options: &IntersectOptions) -> Result<ContourSet, IntersectError> {
    let mut builder = ContourBuilder::new();
    for path in paths {
        builder.push_path(path)?;
    }

    let mut contours = builder.finish();
    sort_contours(&mut contours);
    for (id, contour) in contours.iter_mut().enumerate() {
        contour.set_id(id);
    }

    let mut coincidence = Coincidence::new();
    for index in 0..contours.len() {
        let (head, tail) = contours.split_at_mut(index + 1);
        let test = &mut head[index];
        add_intersect_ts(test, None, &mut coincidence, options)?;
        for next in tail.iter_mut() {
            if !add_intersect_ts(test, Some(next), &mut coincidence, options)? {
                break;
            }
        }
    }

    coincidence.extend_to_span_ends(&contours);
    coincidence.mark(&mut contours);
    validate::coincidence(&coincidence);

    Ok(ContourSet {
        contours,
        coincidence,
    })
}

/// Adds intersection spans between two contours, or between the segments
/// of one contour when `next` is `None`.
///
/// Returns `false` when `next` and every contour sorted after it are below `test`.
pub fn add_intersect_ts(
    test: &mut Contour,
    next: Option<&mut Contour>,
    coincidence: &mut Coincidence,
    options: &IntersectOptions,
) -> Result<bool, IntersectError> {
    let next = match next {
        Some(next) => next,
        None => {
            if options.check_self {
                add_self_intersect_ts(test, coincidence, options)?;
                validate::contour(test);
            }

            return Ok(true);
        }
    };

    let test_bounds = test.bounds();
    let next_bounds = next.bounds();
    if test_bounds.bottom < next_bounds.top {
        return Ok(false);
    }

    if !test_bounds.intersects(&next_bounds) {
        return Ok(true);
    }

    let test_id = test.id();
    let next_id = next.id();
    let mut multiple = false;
    for i in 0..test.segments().len() {
        for j in 0..next.segments().len() {
            let mut found = Intersections::new();
            if !intersect_segments(&test.segments()[i], &next.segments()[j], &mut found, options)? {
                continue;
            }

            let a = &mut test.segments_mut()[i];
            let b = &mut next.segments_mut()[j];
            multiple |= record(a, test_id, b, next_id, &found, coincidence);
        }
    }

    if multiple {
        test.set_check_multiple();
        next.set_check_multiple();
    }

    validate::contour(test);
    validate::contour(next);
    Ok(true)
}

fn add_self_intersect_ts(
    contour: &mut Contour,
    coincidence: &mut Coincidence,
    options: &IntersectOptions,
) -> Result<(), IntersectError> {
    let id = contour.id();
    let count = contour.segments().len();
    let mut multiple = false;
    for i in 0..count {
        for j in i + 1..count {
            let mut found = Intersections::new();
            let (a, b) = (&contour.segments()[i], &contour.segments()[j]);
            if !intersect_segments(a, b, &mut found, options)? {
                continue;
            }

            // adjacent segments meet at their shared end point
            let joined_next = j == i + 1 && a.curve().end() == b.curve().start();
            let joined_wrap = i == 0 && j + 1 == count && b.curve().end() == a.curve().start();
            if found.coincident_used() == 0 {
                let mut index = found.len();
                while index > 0 {
                    index -= 1;
                    let t = [found.t(0, index), found.t(1, index)];
                    if (joined_next && t == [1.0, 0.0]) || (joined_wrap && t == [0.0, 1.0]) {
                        found.remove_one(index);
                    }
                }

                if found.is_empty() {
                    continue;
                }
            }

            let (head, tail) = contour.segments_mut().split_at_mut(j);
            multiple |= record(&mut head[i], id, &mut tail[0], id, &found, coincidence);
        }
    }

    for segment in contour.segments_mut() {
        let loop_ts = match segment.curve() {
            Curve64::Cubic(ref cubic) => cubic.find_loop(),
            _ => None,
        };

        if let Some((s, t)) = loop_ts {
            log::debug!("cubic {} of contour {} loops at {} and {}", segment.index(), id, s, t);
            let pt = segment.curve().point_at_t(s);
            let is = segment.add_t(s, pt);
            let it = segment.add_t(t, pt);
            let (s, t) = (segment.spans()[is].t, segment.spans()[it].t);
            let index = segment.index();
            segment.link(is, SpanRef { contour: id, segment: index, t });
            segment.link(it, SpanRef { contour: id, segment: index, t: s });
            for span in [is, it] {
                segment.spans_mut()[span].is_loop = true;
            }
        }
    }

    if multiple {
        contour.set_check_multiple();
    }

    Ok(())
}

#[derive(Copy, Clone, Debug)]
enum AxisLine {
    Horizontal { left: f64, right: f64, y: f64, flipped: bool },
    Vertical { top: f64, bottom: f64, x: f64, flipped: bool },
}

fn axis_line(segment: &Segment) -> Option<AxisLine> {
    let line = match segment.curve() {
        Curve64::Line(ref line) => line,
        _ => return None,
    };

    let [p0, p1] = line.points;
    match segment.segment_type() {
        SegmentType::HorizontalLine => Some(AxisLine::Horizontal {
            left: p0.x.min(p1.x),
            right: p0.x.max(p1.x),
            y: p0.y,
            flipped: p0.x > p1.x,
        }),
        SegmentType::VerticalLine => Some(AxisLine::Vertical {
            top: p0.y.min(p1.y),
            bottom: p0.y.max(p1.y),
            x: p0.x,
            flipped: p0.y > p1.y,
        }),
        _ => None,
    }
}

fn intersect_axis(curve: &Curve64, axis: AxisLine, i: &mut Intersections) -> Result<usize, IntersectError> {
    match axis {
        AxisLine::Horizontal { left, right, y, flipped } => {
            line_curve_intersections::horizontal_intersect(curve, left, right, y, flipped, i)
        }
        AxisLine::Vertical { top, bottom, x, flipped } => {
            line_curve_intersections::vertical_intersect(curve, top, bottom, x, flipped, i)
        }
    }
}

// Picks a solver from the segment types. The first parameter of every
// entry is on `a`. Returns `false` when nothing was found.
fn intersect_segments(
    a: &Segment,
    b: &Segment,
    i: &mut Intersections,
    options: &IntersectOptions,
) -> Result<bool, IntersectError> {
    if !a.bounds().intersects(&b.bounds()) {
        return Ok(false);
    }

    log::trace!(
        "intersect {:?} {} with {:?} {}",
        a.segment_type(),
        a.index(),
        b.segment_type(),
        b.index()
    );

    i.set_allow_near(options.allow_near);
    if let Some(axis) = axis_line(a) {
        // the non-line side goes first
        intersect_axis(b.curve(), axis, i)?;
        i.swap_pts();
    } else if let Some(axis) = axis_line(b) {
        intersect_axis(a.curve(), axis, i)?;
    } else {
        curve_intersections::intersect(a.curve(), b.curve(), i, options)?;
    }

    validate::intersections(i);
    Ok(!i.is_empty())
}

// Adds spans for every entry on both segments and links them.
// Returns `true` when a span meets more than one other span.
fn record(
    a: &mut Segment,
    a_contour: usize,
    b: &mut Segment,
    b_contour: usize,
    found: &Intersections,
    coincidence: &mut Coincidence,
) -> bool {
    let mut multiple = false;
    let mut run: Option<([f64; 2], [f64; 2])> = None;
    for (index, e) in found.iter().enumerate() {
        let ia = a.add_t(e.t[0], e.point);
        let ib = b.add_t(e.t[1], e.point);
        let ta = a.spans()[ia].t;
        let tb = b.spans()[ib].t;
        multiple |= a.link(ia, SpanRef { contour: b_contour, segment: b.index(), t: tb });
        multiple |= b.link(ib, SpanRef { contour: a_contour, segment: a.index(), t: ta });

        if found.is_coincident(index) {
            run = match run {
                Some((start, _)) => Some((start, [ta, tb])),
                None => Some(([ta, tb], [ta, tb])),
            };
        }
    }

    if let Some((start, end)) = run {
        if start[0] != end[0] {
            coincidence.add(
                CoinSpan::new(a_contour, a.index(), start[0], end[0]),
                CoinSpan::new(b_contour, b.index(), start[1], end[1]),
            );
        }
    }

    multiple
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path64::line64::Line64;
    use crate::path64::point64::Point64;

    fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> Segment {
        Segment::new(Line64::new(Point64::from_xy(x0, y0), Point64::from_xy(x1, y1)).into(), 0)
    }

    #[test]
    fn axis_lines() {
        match axis_line(&line(4.0, 1.0, 0.0, 1.0)) {
            Some(AxisLine::Horizontal { left, right, y, flipped }) => {
                assert_eq!((left, right, y, flipped), (0.0, 4.0, 1.0, true));
            }
            other => panic!("unexpected {:?}", other),
        }

        assert!(axis_line(&line(0.0, 0.0, 1.0, 1.0)).is_none());
    }

    #[test]
    fn horizontal_goes_first() {
        let h = line(0.0, 2.0, 4.0, 2.0);
        let d = line(0.0, 0.0, 4.0, 4.0);
        let mut i = Intersections::new();
        assert_eq!(intersect_segments(&h, &d, &mut i, &IntersectOptions::default()), Ok(true));
        assert_eq!(i.len(), 1);
        assert_eq!(i.t(0, 0), 0.5);
        assert_eq!(i.t(1, 0), 0.5);
    }

    #[test]
    fn recorded_spans_link() {
        let mut a = line(0.0, 0.0, 4.0, 4.0);
        let mut b = line(0.0, 4.0, 4.0, 0.0);
        let mut i = Intersections::new();
        assert_eq!(intersect_segments(&a, &b, &mut i, &IntersectOptions::default()), Ok(true));
        let mut coincidence = Coincidence::new();
        assert!(!record(&mut a, 0, &mut b, 1, &i, &mut coincidence));
        assert_eq!(a.spans().len(), 3);
        assert_eq!(a.spans()[1].opps, vec![SpanRef { contour: 1, segment: 0, t: 0.5 }]);
        assert_eq!(b.spans()[1].opps, vec![SpanRef { contour: 0, segment: 0, t: 0.5 }]);
        assert!(coincidence.is_empty());
    }
}
