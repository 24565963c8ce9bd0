// Copyright 2012 Google Inc.
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

/*!
Cubic/cubic intersections by Bezier clipping, also known as fat line clipping.

Each step restricts one curve to the part that can be inside the fat line of
the other one. When a step doesn't remove enough of the curve, the least
converged curve is split in half. See "Bezier Clipping method" in
Sederberg, Nishita, "Curve intersection using Bezier clipping".

End point to end point intersections are not reported.

Curves that touch without crossing make clipping stall, since the fat line of
one curve only grazes the hull of the other. Such pieces are refined with a
closest approach search instead.
*/

use core::ops::Range;

use arrayvec::ArrayVec;

use crate::path64::cubic64::Cubic64;
use crate::path64::curve64::Curve64;
use crate::path64::point64::Point64;
use crate::path64::rect64::Rect64;
use crate::path64::Scalar64;

/// The maximum number of raw parameter pairs collected by a single clip.
pub const MAX_CLIP_PAIRS: usize = 16;

const MAX_RECURSION: u32 = 60;
const DOMAIN_EPSILON: f64 = 1e-12;
const CONTACT_STEPS: usize = 64;

type Hull = ArrayVec<Point64, 4>;

pub(crate) struct ClipResult {
    pub pairs: ArrayVec<[f64; 2], MAX_CLIP_PAIRS>,
    pub calls: usize,
    pub limit_reached: bool,
    /// More than `MAX_CLIP_PAIRS` distinct pairs were found.
    pub full: bool,
}

/// Finds the parameter pairs of the intersections of two cubics.
///
/// Stops after `max_calls` clipping steps. In this case `limit_reached`
/// is set and the pairs found so far are returned.
pub(crate) fn clip(curve1: &Cubic64, curve2: &Cubic64, max_calls: usize) -> ClipResult {
    let mut clipper = Clipper {
        pairs: ArrayVec::new(),
        calls: 0,
        max_calls,
        limit_reached: false,
        full: false,
    };

    let whole = 0.0..1.0;
    clipper.add_curve_intersections(curve1, curve2, &whole, &whole, false, 0);
    if clipper.pairs.is_empty() && control_bounds(curve1).intersects(&control_bounds(curve2)) {
        clipper.add_contact(curve1, curve2, &whole, &whole, false);
    }

    ClipResult {
        pairs: clipper.pairs,
        calls: clipper.calls,
        limit_reached: clipper.limit_reached,
        full: clipper.full,
    }
}

struct Clipper {
    pairs: ArrayVec<[f64; 2], MAX_CLIP_PAIRS>,
    calls: usize,
    max_calls: usize,
    limit_reached: bool,
    full: bool,
}

impl Clipper {
    // `curve1` and `curve2` are parts of the original curves over `domain1`
    // and `domain2`. `flip` means that `curve1` is a part of the second
    // original curve.
    fn add_curve_intersections(
        &mut self,
        curve1: &Cubic64,
        curve2: &Cubic64,
        domain1: &Range<f64>,
        domain2: &Range<f64>,
        flip: bool,
        mut depth: u32,
    ) {
        if self.full || self.limit_reached {
            return;
        }

        self.calls += 1;
        depth += 1;
        if self.calls >= self.max_calls {
            self.limit_reached = true;
            return;
        }

        if depth >= MAX_RECURSION {
            self.add_contact(curve1, curve2, domain1, domain2, flip);
            return;
        }

        if domain2.start == domain2.end || is_point(curve2) {
            self.add_point_curve_intersection(curve2.points[0], false, curve1, domain2, domain1, flip);
            return;
        } else if curve2.points[0] == curve2.points[3] {
            // no baseline to build a fat line from
            let halves = curve2.chop_at(0.5);
            let mid = (domain2.start + domain2.end) * 0.5;
            self.add_curve_intersections(curve1, &halves.first(), domain1, &(domain2.start..mid), flip, depth);
            self.add_curve_intersections(curve1, &halves.second(), domain1, &(mid..domain2.end), flip, depth);
            return;
        }

        // must be checked after the point test, since points are inexact
        let bounds1 = control_bounds(curve1);
        let bounds2 = control_bounds(curve2);
        if !bounds1.intersects(&bounds2) {
            return;
        }

        let (t_min_clip, t_max_clip) = match restrict_curve_to_fat_line(curve1, curve2) {
            Some(range) => range,
            None => {
                let extent = bounds1.union(&bounds2);
                let extent = extent.width().max(extent.height());
                if fat_line_gap(curve1, curve2).approximately_zero_when_compared_to(extent) {
                    self.add_contact(curve1, curve2, domain1, domain2, flip);
                }

                return;
            }
        };

        let new_domain1 = domain_value_at_t(domain1, t_min_clip)..domain_value_at_t(domain1, t_max_clip);
        log::trace!(
            "clip {:?} to {:?} against {:?}",
            domain1,
            new_domain1,
            domain2
        );

        if (domain2.end - domain2.start).max(new_domain1.end - new_domain1.start) < DOMAIN_EPSILON {
            let t1 = (new_domain1.start + new_domain1.end) * 0.5;
            let t2 = (domain2.start + domain2.end) * 0.5;
            self.add_intersection(t1, t2, flip);
            return;
        }

        let curve1 = curve1.subdivide(t_min_clip, t_max_clip);

        // the domain can become a point even when the clip range is not
        if new_domain1.start == new_domain1.end || is_point(&curve1) {
            self.add_point_curve_intersection(curve1.points[0], true, curve2, &new_domain1, domain2, flip);
            return;
        }

        if t_max_clip - t_min_clip > 0.8 {
            // not enough was clipped, split the curve that converged the least
            if new_domain1.end - new_domain1.start > domain2.end - domain2.start {
                let halves = curve1.chop_at(0.5);
                let mid = (new_domain1.start + new_domain1.end) * 0.5;
                self.add_curve_intersections(curve2, &halves.first(), domain2, &(new_domain1.start..mid), !flip, depth);
                self.add_curve_intersections(curve2, &halves.second(), domain2, &(mid..new_domain1.end), !flip, depth);
            } else {
                let halves = curve2.chop_at(0.5);
                let mid = (domain2.start + domain2.end) * 0.5;
                self.add_curve_intersections(&halves.first(), &curve1, &(domain2.start..mid), &new_domain1, !flip, depth);
                self.add_curve_intersections(&halves.second(), &curve1, &(mid..domain2.end), &new_domain1, !flip, depth);
            }
        } else if domain2.end - domain2.start >= DOMAIN_EPSILON {
            self.add_curve_intersections(curve2, &curve1, domain2, &new_domain1, !flip, depth);
        } else {
            // curve2 is tight enough already
            self.add_curve_intersections(&curve1, curve2, &new_domain1, domain2, flip, depth);
        }
    }

    fn add_point_curve_intersection(
        &mut self,
        pt: Point64,
        pt_is_curve1: bool,
        curve: &Cubic64,
        pt_domain: &Range<f64>,
        curve_domain: &Range<f64>,
        flip: bool,
    ) {
        // the point is the first curve from here on
        let flip = if pt_is_curve1 { flip } else { !flip };

        let mut t_for_min = 0.0;
        let mut min_dist_sq = f64::EPSILON;
        for i in 0..=10 {
            let t = f64::from(i) / 10.0;
            let d = pt.distance_squared(curve.point_at_t(t));
            if d < min_dist_sq {
                t_for_min = t;
                min_dist_sq = d;
            }
        }

        if min_dist_sq == f64::EPSILON {
            return;
        }

        let curve_t = domain_value_at_t(curve_domain, t_for_min);
        let pt_t = (pt_domain.start + pt_domain.end) * 0.5;
        self.add_intersection(pt_t, curve_t, flip);
    }

    fn add_contact(
        &mut self,
        curve1: &Cubic64,
        curve2: &Cubic64,
        domain1: &Range<f64>,
        domain2: &Range<f64>,
        flip: bool,
    ) {
        if let Some([s, t]) = closest_contact(curve1, curve2) {
            let t1 = domain_value_at_t(domain1, s);
            let t2 = domain_value_at_t(domain2, t);
            log::trace!("contact at {} and {}", t1, t2);
            self.add_intersection(t1, t2, flip);
        }
    }

    fn add_intersection(&mut self, t1: f64, t2: f64, flip: bool) {
        let (t1, t2) = if flip { (t2, t1) } else { (t1, t2) };

        let is_end = |t: f64| t.approximately_zero() || t.approximately_equal(1.0);
        if is_end(t1) && is_end(t2) {
            return;
        }

        // splitting at an intersection produces it twice
        if self
            .pairs
            .iter()
            .any(|p| p[0].approximately_equal(t1) && p[1].approximately_equal(t2))
        {
            return;
        }

        if self.pairs.try_push([t1, t2]).is_err() {
            self.full = true;
        }
    }
}

fn control_bounds(curve: &Cubic64) -> Rect64 {
    let mut r = Rect64::from_point(curve.points[0]);
    for p in &curve.points[1..] {
        r.add(*p);
    }

    r
}

// Minimizes the gap between `curve1` and `curve2` along the normals of `curve1`
// with a golden section search. Returns the parameters when the curves meet there.
fn closest_contact(curve1: &Cubic64, curve2: &Cubic64) -> Option<[f64; 2]> {
    let other = Curve64::from(*curve2);
    let gap = |s: f64| -> Option<(f64, f64)> {
        let pt = curve1.point_at_t(s);
        let (t, hit) = other.perp_hit(pt, curve1.dxdy_at_t(s))?;
        Some((pt.distance(hit), t))
    };
    let distance = |s: f64| gap(s).map_or(f64::MAX, |(d, _)| d);

    let ratio = (5.0_f64.sqrt() - 1.0) * 0.5;
    let (mut lo, mut hi) = (0.0, 1.0);
    let mut a = hi - ratio * (hi - lo);
    let mut b = lo + ratio * (hi - lo);
    let (mut da, mut db) = (distance(a), distance(b));
    for _ in 0..CONTACT_STEPS {
        if da < db {
            hi = b;
            b = a;
            db = da;
            a = hi - ratio * (hi - lo);
            da = distance(a);
        } else {
            lo = a;
            a = b;
            da = db;
            b = lo + ratio * (hi - lo);
            db = distance(b);
        }
    }

    let s = (lo + hi) * 0.5;
    let (_, t) = gap(s)?;
    if curve1.point_at_t(s).approximately_equal(curve2.point_at_t(t)) {
        Some([s, t])
    } else {
        None
    }
}

// How far the control points of `curve1` are outside of the fat line of `curve2`.
fn fat_line_gap(curve1: &Cubic64, curve2: &Cubic64) -> f64 {
    let (from, to) = (curve2.points[0], curve2.points[3]);
    let (d_min, d_max) = fat_line_min_max(curve2);
    let mut lo = f64::MAX;
    let mut hi = f64::MIN;
    for p in &curve1.points {
        let d = signed_distance(from, to, *p);
        lo = lo.min(d);
        hi = hi.max(d);
    }

    if lo > d_max {
        lo - d_max
    } else if hi < d_min {
        d_min - hi
    } else {
        0.0
    }
}

fn is_point(curve: &Cubic64) -> bool {
    curve.points[1..].iter().all(|p| *p == curve.points[0])
}

fn domain_value_at_t(domain: &Range<f64>, t: f64) -> f64 {
    domain.start + (domain.end - domain.start) * t
}

// Signed distance from the line through `from` and `to`.
fn signed_distance(from: Point64, to: Point64, p: Point64) -> f64 {
    let v = to - from;
    v.cross(p - from) / v.length()
}

// The offsets of the fat line of `curve` from its baseline.
fn fat_line_min_max(curve: &Cubic64) -> (f64, f64) {
    let [from, ctrl1, ctrl2, to] = curve.points;
    let d1 = signed_distance(from, to, ctrl1);
    let d2 = signed_distance(from, to, ctrl2);
    let factor = if d1 * d2 > 0.0 { 3.0 / 4.0 } else { 4.0 / 9.0 };
    (factor * d1.min(d2).min(0.0), factor * d1.max(d2).max(0.0))
}

// Returns a `curve1` parameter range outside of which `curve1` can't
// intersect the fat line of `curve2`.
fn restrict_curve_to_fat_line(curve1: &Cubic64, curve2: &Cubic64) -> Option<(f64, f64)> {
    let from = curve2.points[0];
    let to = curve2.points[3];
    let d0 = signed_distance(from, to, curve1.points[0]);
    let d1 = signed_distance(from, to, curve1.points[1]);
    let d2 = signed_distance(from, to, curve1.points[2]);
    let d3 = signed_distance(from, to, curve1.points[3]);

    let (mut top, mut bottom) = convex_hull_of_distance_curve(d0, d1, d2, d3);
    let (d_min, d_max) = fat_line_min_max(curve2);

    let t_min = walk_convex_hull_start_to_fat_line(&top, &bottom, d_min, d_max)?;
    // walk from the right corner by reversing the vertices
    top.reverse();
    bottom.reverse();
    let t_max = walk_convex_hull_start_to_fat_line(&top, &bottom, d_min, d_max)?;
    Some((t_min, t_max))
}

// The convex hull of the graph `t -> distance(curve1(t), baseline(curve2))`
// as the top and the bottom vertices, from left to right.
fn convex_hull_of_distance_curve(d0: f64, d1: f64, d2: f64, d3: f64) -> (Hull, Hull) {
    let p0 = Point64::from_xy(0.0, d0);
    let p1 = Point64::from_xy(1.0 / 3.0, d1);
    let p2 = Point64::from_xy(2.0 / 3.0, d2);
    let p3 = Point64::from_xy(1.0, d3);
    // vertical distances of p1 and p2 from the p0-p3 line
    let dist1 = d1 - (2.0 * d0 + d3) / 3.0;
    let dist2 = d2 - (d0 + 2.0 * d3) / 3.0;

    let hull = |points: &[Point64]| points.iter().copied().collect::<Hull>();

    // p1 is assumed to be on top
    let (top, bottom) = if dist1 * dist2 < 0.0 {
        // opposite sides, a quadrilateral
        (hull(&[p0, p1, p3]), hull(&[p0, p2, p3]))
    } else {
        // the same side, the hull is a triangle when one middle point is
        // at most half as far as the other one
        let (abs1, abs2) = (dist1.abs(), dist2.abs());
        if abs1 >= 2.0 * abs2 {
            (hull(&[p0, p1, p3]), hull(&[p0, p3]))
        } else if abs2 >= 2.0 * abs1 {
            (hull(&[p0, p2, p3]), hull(&[p0, p3]))
        } else {
            (hull(&[p0, p1, p2, p3]), hull(&[p0, p3]))
        }
    };

    if dist1 < 0.0 || (dist1 == 0.0 && dist2 < 0.0) {
        (bottom, top)
    } else {
        (top, bottom)
    }
}

// Walks from the first vertex, which is shared by both hull halves.
fn walk_convex_hull_start_to_fat_line(top: &[Point64], bottom: &[Point64], d_min: f64, d_max: f64) -> Option<f64> {
    let start = top[0];
    if start.y < d_min {
        walk_convex_hull_edges_to_fat_line(top, true, d_min)
    } else if start.y > d_max {
        walk_convex_hull_edges_to_fat_line(bottom, false, d_max)
    } else {
        Some(start.x)
    }
}

fn walk_convex_hull_edges_to_fat_line(vertices: &[Point64], is_top: bool, threshold: f64) -> Option<f64> {
    for edge in vertices.windows(2) {
        let (p, q) = (edge[0], edge[1]);
        if (is_top && q.y >= threshold) || (!is_top && q.y <= threshold) {
            return if q.y == threshold {
                Some(q.x)
            } else {
                Some(p.x + (threshold - p.y) * (q.x - p.x) / (q.y - p.y))
            };
        }
    }

    // the whole hull is outside
    None
}
