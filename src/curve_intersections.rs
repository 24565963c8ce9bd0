// Copyright 2012 Google Inc.
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Intersections of any two curves.

use arrayvec::ArrayVec;

use crate::curve_clip::{self, MAX_CLIP_PAIRS};
use crate::intersections::{Intersections, MAX_INTERSECTIONS};
use crate::line_curve_intersections::{self, axis_roots};
use crate::line_intersections;
use crate::path64::curve64::Curve64;
use crate::path64::line64::Line64;
use crate::path64::point64::{Point64, SearchAxis};
use crate::path64::Scalar64;
use crate::{IntersectError, IntersectOptions};

// Clipped results closer than this on both curves are the same intersection.
const MERGE_T_EPSILON: f64 = 1e-3;

// Interior samples used to confirm a coincident run.
const COINCIDENT_SAMPLES: usize = 3;

const ZERO_1: u8 = 1;
const ONE_1: u8 = 2;
const ZERO_2: u8 = 4;
const ONE_2: u8 = 8;

type RawPairs = ArrayVec<[f64; 2], MAX_CLIP_PAIRS>;

/// Intersects two curves.
///
/// Lines are handled by the line solvers, quads are degree-elevated to
/// cubics. A coincident run is reported as two entries marked coincident.
/// An end point of one curve that lies inside the other is always reported.
///
/// Returns the number of entries in `i`.
pub fn intersect(
    c1: &Curve64,
    c2: &Curve64,
    i: &mut Intersections,
    options: &IntersectOptions,
) -> Result<usize, IntersectError> {
    i.set_allow_near(options.allow_near);
    match (c1, c2) {
        (Curve64::Line(ref l1), Curve64::Line(ref l2)) => {
            return line_intersections::intersect_lines(l1, l2, i);
        }
        (Curve64::Line(ref l1), _) => {
            line_curve_intersections::intersect_line(c2, l1, i)?;
            i.swap_pts();
            return Ok(i.len());
        }
        (_, Curve64::Line(ref l2)) => {
            return line_curve_intersections::intersect_line(c1, l2, i);
        }
        _ => {}
    }

    i.set_max(MAX_INTERSECTIONS);
    let ends = ends_equal(c1, c2, i, options.allow_near)?;
    if c1.collapsed() || c2.collapsed() {
        return Ok(i.len());
    }

    let hits = end_hits(c1, c2);
    if let Some(run) = find_coincidence(c1, c2, &hits) {
        log::debug!(
            "coincident run {}..{} and {}..{}",
            run[0].t[0],
            run[1].t[0],
            run[0].t[1],
            run[1].t[1]
        );
        i.insert_coincident(run[0].t[0], run[0].t[1], run[0].point)?;
        i.insert_coincident(run[1].t[0], run[1].t[1], run[1].point)?;
        return Ok(i.len());
    }

    for hit in &hits {
        if hit.end & ends != 0 {
            continue;
        }

        let pair = pin_ends(c1, c2, hit.t);
        if !covered(i, pair) {
            log::trace!("end point hit at {} and {}", pair[0], pair[1]);
            i.insert(pair[0], pair[1], hit.point)?;
        }
    }

    let linear1 = c1.is_linear();
    let linear2 = c2.is_linear();
    let pairs = if linear1 || linear2 {
        linear_intersections(c1, c2, linear1, linear2)?
    } else {
        clipped_intersections(c1, c2, options)?
    };

    for pair in merge(c1, c2, &pairs)? {
        let pair = pin_ends(c1, c2, pair);
        if covered(i, pair) {
            continue;
        }

        let pt = if pair[1].zero_or_one() && !pair[0].zero_or_one() {
            c2.point_at_t(pair[1])
        } else {
            c1.point_at_t(pair[0])
        };
        i.insert(pair[0], pair[1], pt)?;
    }

    Ok(i.len())
}

// Records end points that are shared by both curves.
fn ends_equal(c1: &Curve64, c2: &Curve64, i: &mut Intersections, allow_near: bool) -> Result<u8, IntersectError> {
    let ends1 = [(0.0, c1.start(), ZERO_1), (1.0, c1.end(), ONE_1)];
    let ends2 = [(0.0, c2.start(), ZERO_2), (1.0, c2.end(), ONE_2)];

    let mut set = 0;
    for &(t1, p1, bit1) in &ends1 {
        for &(t2, p2, bit2) in &ends2 {
            if p1 == p2 {
                i.insert(t1, t2, p1)?;
                set |= bit1 | bit2;
            }
        }
    }

    if !allow_near {
        return Ok(set);
    }

    for &(t1, p1, bit1) in &ends1 {
        for &(t2, p2, bit2) in &ends2 {
            if set & (bit1 | bit2) == 0 && p1.approximately_equal(p2) {
                i.insert_near(t1, t2, p1, p2)?;
                set |= bit1 | bit2;
            }
        }
    }

    Ok(set)
}

// An entry at the end of either curve wins over a result next to it.
fn covered(i: &Intersections, pair: [f64; 2]) -> bool {
    i.iter().any(|e| {
        (e.t[0].zero_or_one() || e.t[1].zero_or_one())
            && (e.t[0] - pair[0]).abs() < MERGE_T_EPSILON
            && (e.t[1] - pair[1]).abs() < MERGE_T_EPSILON
    })
}

// Snaps parameters to the curve ends when the point matches the end in single precision.
fn pin_ends(c1: &Curve64, c2: &Curve64, pair: [f64; 2]) -> [f64; 2] {
    let pin = |c: &Curve64, t: f64| {
        if t.zero_or_one() {
            return t;
        }

        let pt = c.point_at_t(t).to_point();
        if t.approximately_equal(0.0) && pt == c.start().to_point() {
            0.0
        } else if t.approximately_equal(1.0) && pt == c.end().to_point() {
            1.0
        } else {
            t
        }
    };

    [pin(c1, pair[0]), pin(c2, pair[1])]
}

#[derive(Copy, Clone, Debug)]
struct CoinPoint {
    t: [f64; 2],
    point: Point64,
    // The `ZERO_1`..`ONE_2` bit of the end this point was found from.
    end: u8,
}

// Finds the foot of the perpendicular from `c1(t)` on `c2`, if it's at the same point.
fn perp_foot(c1: &Curve64, t: f64, c2: &Curve64) -> Option<(f64, Point64)> {
    let pt = c1.point_at_t(t);
    let (opp_t, opp_pt) = c2.perp_hit(pt, c1.dxdy_at_t(t))?;
    if pt.approximately_equal(opp_pt) {
        Some((opp_t, opp_pt))
    } else {
        None
    }
}

// Collects the end points of each curve that lie on the other curve.
fn end_hits(c1: &Curve64, c2: &Curve64) -> ArrayVec<CoinPoint, 4> {
    let mut hits: ArrayVec<CoinPoint, 4> = ArrayVec::new();
    let add = |hits: &mut ArrayVec<CoinPoint, 4>, hit: CoinPoint| {
        let dup = hits
            .iter()
            .any(|h| h.t[0].approximately_equal(hit.t[0]) && h.t[1].approximately_equal(hit.t[1]));
        if !dup {
            hits.push(hit);
        }
    };

    for &(t1, end) in &[(0.0, ZERO_1), (1.0, ONE_1)] {
        if let Some((t2, _)) = perp_foot(c1, t1, c2) {
            let point = c1.point_at_t(t1);
            add(&mut hits, CoinPoint { t: [t1, t2], point, end });
        }
    }

    for &(t2, end) in &[(0.0, ZERO_2), (1.0, ONE_2)] {
        if let Some((t1, _)) = perp_foot(c2, t2, c1) {
            let point = c2.point_at_t(t2);
            add(&mut hits, CoinPoint { t: [t1, t2], point, end });
        }
    }

    hits
}

// Detects that both curves share a locus between two end point hits.
//
// The outermost hits bound the candidate run. The run is accepted when
// interior samples lie on both curves.
fn find_coincidence(c1: &Curve64, c2: &Curve64, hits: &[CoinPoint]) -> Option<[CoinPoint; 2]> {
    if hits.len() < 2 {
        return None;
    }

    let mut candidates: ArrayVec<CoinPoint, 4> = hits.iter().copied().collect();
    candidates.sort_by(|a, b| crate::path64::cmp_f64(&a.t[0], &b.t[0]));
    let start = candidates[0];
    let end = candidates[candidates.len() - 1];
    if start.t[0].approximately_equal(end.t[0]) || start.t[1].approximately_equal(end.t[1]) {
        return None;
    }

    for n in 1..=COINCIDENT_SAMPLES {
        let t = start.t[0] + (end.t[0] - start.t[0]) * (n as f64) / (COINCIDENT_SAMPLES as f64 + 1.0);
        let (opp_t, _) = perp_foot(c1, t, c2)?;
        if !opp_t.between(start.t[1], end.t[1]) {
            return None;
        }
    }

    Some([start, end])
}

// The line through the extreme points of a straight curve, directed like the curve.
//
// Control points of a straight curve can overshoot its end points, so the
// baseline between the ends may be shorter than the curve.
fn extent_line(c: &Curve64) -> Line64 {
    let start = c.start();
    let mut dir = c.end() - start;
    if dir.x == 0.0 && dir.y == 0.0 {
        dir = c
            .points()
            .iter()
            .map(|p| *p - start)
            .fold(dir, |best, d| if d.length_squared() > best.length_squared() { d } else { best });
    }

    let b = c.bounds();
    let (mut from, mut to) = if dir.x * dir.y >= 0.0 {
        (Point64::from_xy(b.left, b.top), Point64::from_xy(b.right, b.bottom))
    } else {
        (Point64::from_xy(b.left, b.bottom), Point64::from_xy(b.right, b.top))
    };

    if (to - from).dot(dir) < 0.0 {
        core::mem::swap(&mut from, &mut to);
    }

    Line64::new(from, to)
}

// Parameters on a linear curve of a point on its line.
fn linear_t(curve: &Curve64, pt: Point64) -> Option<f64> {
    let start = curve.start();
    let end = curve.end();
    let (axis, value) = if (end.y - start.y).abs() >= (end.x - start.x).abs() {
        (SearchAxis::Y, pt.y)
    } else {
        (SearchAxis::X, pt.x)
    };

    let mut roots = [0.0; 3];
    let count = axis_roots(curve, value, axis, &mut roots);
    roots[0..count]
        .iter()
        .copied()
        .map(|t| (t, curve.point_at_t(t).distance_squared(pt)))
        .fold(None, |best: Option<(f64, f64)>, (t, d)| match best {
            Some((_, best_d)) if best_d <= d => best,
            _ => Some((t, d)),
        })
        .map(|(t, _)| t)
}

fn push_pair(pairs: &mut RawPairs, pair: [f64; 2]) -> Result<(), IntersectError> {
    pairs.try_push(pair).map_err(|_| IntersectError::TooManyIntersections)
}

// Intersects curves when one or both are straight.
fn linear_intersections(
    c1: &Curve64,
    c2: &Curve64,
    linear1: bool,
    linear2: bool,
) -> Result<RawPairs, IntersectError> {
    let mut found = Intersections::new();
    let mut pairs = RawPairs::new();

    if linear1 && linear2 {
        line_intersections::intersect_lines(&extent_line(c1), &extent_line(c2), &mut found)?;
        for e in found.iter() {
            if let (Some(t1), Some(t2)) = (linear_t(c1, e.point), linear_t(c2, e.point)) {
                push_pair(&mut pairs, [t1, t2])?;
            }
        }
    } else if linear1 {
        line_curve_intersections::intersect_line(c2, &extent_line(c1), &mut found)?;
        for e in found.iter() {
            if let Some(t1) = linear_t(c1, e.point) {
                push_pair(&mut pairs, [t1, e.t[0]])?;
            }
        }
    } else {
        line_curve_intersections::intersect_line(c1, &extent_line(c2), &mut found)?;
        for e in found.iter() {
            if let Some(t2) = linear_t(c2, e.point) {
                push_pair(&mut pairs, [e.t[0], t2])?;
            }
        }
    }

    Ok(pairs)
}

fn clipped_intersections(c1: &Curve64, c2: &Curve64, options: &IntersectOptions) -> Result<RawPairs, IntersectError> {
    let result = curve_clip::clip(&c1.to_cubic(), &c2.to_cubic(), options.max_clip_calls);
    log::trace!("clipped {} pairs in {} steps", result.pairs.len(), result.calls);
    if result.full {
        return Err(IntersectError::TooManyIntersections);
    }

    if result.limit_reached {
        if options.strict_clip_limit {
            return Err(IntersectError::ClipLimitReached(result.calls));
        }

        log::warn!(
            "curve clipping stopped after {} steps, keeping {} intersections",
            result.calls,
            result.pairs.len()
        );
    }

    Ok(result.pairs)
}

// Merges pairs that are close on both curves, keeping the one whose points
// are the closest. Exact end points are kept over interior ones.
fn merge(
    c1: &Curve64,
    c2: &Curve64,
    pairs: &[[f64; 2]],
) -> Result<ArrayVec<[f64; 2], MAX_INTERSECTIONS>, IntersectError> {
    let gap = |p: &[f64; 2]| c1.point_at_t(p[0]).distance_squared(c2.point_at_t(p[1]));
    let is_end = |p: &[f64; 2]| p[0].zero_or_one() || p[1].zero_or_one();

    let mut merged: ArrayVec<[f64; 2], MAX_INTERSECTIONS> = ArrayVec::new();
    for pair in pairs {
        let near = merged.iter().position(|m| {
            (m[0] - pair[0]).abs() < MERGE_T_EPSILON && (m[1] - pair[1]).abs() < MERGE_T_EPSILON
        });

        match near {
            Some(index) => {
                let old = merged[index];
                let better = if is_end(pair) != is_end(&old) {
                    is_end(pair)
                } else {
                    gap(pair) < gap(&old)
                };

                if better {
                    merged[index] = *pair;
                }
            }
            None => {
                merged
                    .try_push(*pair)
                    .map_err(|_| IntersectError::TooManyIntersections)?;
            }
        }
    }

    merged.sort_by(|a, b| crate::path64::cmp_f64(&a[0], &b[0]));
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path64::cubic64::Cubic64;
    use crate::path64::quad64::Quad64;

    fn pt(x: f64, y: f64) -> Point64 {
        Point64::from_xy(x, y)
    }

    #[test]
    fn merge_keeps_closest() {
        let c1 = Curve64::from(Line64::new(pt(0.0, 0.0), pt(10.0, 0.0)));
        let c2 = Curve64::from(Line64::new(pt(5.0, -5.0), pt(5.0, 5.0)));
        let merged = merge(&c1, &c2, &[[0.5001, 0.5], [0.5, 0.5], [0.2, 0.9]]).unwrap();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0], [0.2, 0.9]);
        assert_eq!(merged[1], [0.5, 0.5]);
    }

    #[test]
    fn shared_end_points() {
        let c1 = Curve64::from(Quad64::new([pt(0.0, 0.0), pt(1.0, 2.0), pt(2.0, 0.0)]));
        let c2 = Curve64::from(Quad64::new([pt(0.0, 0.0), pt(1.0, -2.0), pt(2.0, 0.0)]));
        let mut i = Intersections::new();
        let set = ends_equal(&c1, &c2, &mut i, true).unwrap();
        assert_eq!(set, ZERO_1 | ONE_1 | ZERO_2 | ONE_2);
        assert_eq!(i.len(), 2);
        let hits = end_hits(&c1, &c2);
        assert_eq!(find_coincidence(&c1, &c2, &hits).map(|_| ()), None);
    }

    #[test]
    fn coincident_halves() {
        let c = Cubic64::new([pt(0.0, 0.0), pt(1.0, 3.0), pt(3.0, 3.0), pt(4.0, 0.0)]);
        let c1 = Curve64::from(c.subdivide(0.0, 0.75));
        let c2 = Curve64::from(c.subdivide(0.25, 1.0));
        let run = find_coincidence(&c1, &c2, &end_hits(&c1, &c2)).unwrap();
        assert!(run[0].point.approximately_equal(c.point_at_t(0.25)));
        assert!(run[1].point.approximately_equal(c.point_at_t(0.75)));
        assert!(run[1].t[0].approximately_equal(1.0));
        assert!(run[0].t[1].approximately_equal(0.0));
    }

    #[test]
    fn linear_t_on_straight_quad() {
        let q = Curve64::from(Quad64::new([pt(0.0, 0.0), pt(1.0, 1.0), pt(2.0, 2.0)]));
        let t = linear_t(&q, pt(1.5, 1.5)).unwrap();
        assert!(t.approximately_equal(0.75));
    }

    #[test]
    fn merge_overflow() {
        let c1 = Curve64::from(Line64::new(pt(0.0, 0.0), pt(10.0, 0.0)));
        let c2 = Curve64::from(Line64::new(pt(5.0, -5.0), pt(5.0, 5.0)));
        let pairs: Vec<[f64; 2]> = (0..MAX_INTERSECTIONS + 1).map(|n| [0.05 * n as f64 + 0.01, 0.5]).collect();
        assert_eq!(merge(&c1, &c2, &pairs), Err(IntersectError::TooManyIntersections));
    }

    #[test]
    fn merge_collapses_raw_pairs() {
        let c1 = Curve64::from(Line64::new(pt(0.0, 0.0), pt(10.0, 0.0)));
        let c2 = Curve64::from(Line64::new(pt(5.0, -5.0), pt(5.0, 5.0)));
        let pairs: Vec<[f64; 2]> = (0..MAX_CLIP_PAIRS).map(|n| [0.5 + 1e-5 * n as f64, 0.5]).collect();
        let merged = merge(&c1, &c2, &pairs).unwrap();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0], [0.5, 0.5]);
    }

    #[test]
    fn end_on_interior() {
        let c1 = Curve64::from(Cubic64::new([pt(0.0, 0.0), pt(1.0, 2.0), pt(3.0, 2.0), pt(4.0, 0.0)]));
        let end = c1.point_at_t(0.7);
        let c2 = Curve64::from(Quad64::new([pt(end.x - 2.0, end.y - 2.0), pt(end.x - 1.0, end.y), end]));

        let hits = end_hits(&c1, &c2);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].t[1], 1.0);
        assert_eq!(hits[0].end, ONE_2);
        assert!((hits[0].t[0] - 0.7).abs() < 1e-6);

        let mut i = Intersections::new();
        intersect(&c1, &c2, &mut i, &IntersectOptions::default()).unwrap();
        assert_eq!(i.len(), 1);
        assert_eq!(i.t(1, 0), 1.0);
        assert!((i.t(0, 0) - 0.7).abs() < 1e-6);
    }

    #[test]
    fn pin_to_ends() {
        let c1 = Curve64::from(Cubic64::new([pt(0.0, 0.0), pt(1.0, 2.0), pt(3.0, 2.0), pt(4.0, 0.0)]));
        let c2 = Curve64::from(Quad64::new([pt(0.0, 3.0), pt(1.0, 1.0), pt(2.0, 1.5)]));
        assert_eq!(pin_ends(&c1, &c2, [0.5, 0.9999999999999916]), [0.5, 1.0]);
        assert_eq!(pin_ends(&c1, &c2, [1e-15, 0.5]), [0.0, 0.5]);
        assert_eq!(pin_ends(&c1, &c2, [0.999, 0.001]), [0.999, 0.001]);
    }

    #[test]
    fn extent_of_overshooting_line() {
        let c = Curve64::from(Cubic64::new([pt(0.0, 0.0), pt(10.0, 0.0), pt(-8.0, 0.0), pt(2.0, 0.0)]));
        let line = extent_line(&c);
        let b = c.bounds();
        assert!(b.left < 0.0 && b.right > 2.0);
        assert_eq!(line.points[0], pt(b.left, 0.0));
        assert_eq!(line.points[1], pt(b.right, 0.0));

        let reversed = Curve64::from(Quad64::new([pt(4.0, 0.0), pt(0.0, 4.0), pt(1.0, 3.0)]));
        let line = extent_line(&reversed);
        assert_eq!(line.points[0], pt(4.0, 0.0));
        assert!(line.points[1].x < 1.0 && line.points[1].y > 3.0);
    }

    #[test]
    fn overshooting_straight_cubic() {
        let c1 = Curve64::from(Cubic64::new([pt(0.0, 0.0), pt(10.0, 0.0), pt(-8.0, 0.0), pt(2.0, 0.0)]));
        let c2 = Curve64::from(Quad64::new([pt(1.5, -1.0), pt(3.5, 0.0), pt(1.5, 1.0)]));
        let mut i = Intersections::new();
        intersect(&c1, &c2, &mut i, &IntersectOptions::default()).unwrap();
        assert_eq!(i.len(), 1);
        assert!((i.t(1, 0) - 0.5).abs() < 1e-6);
        assert!((i.point(0).x - 2.5).abs() < 1e-6);
    }
}
