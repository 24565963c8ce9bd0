// Copyright 2012 Google Inc.
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use super::cubic64::{self, Cubic64};
use super::line64::Line64;
use super::point64::{Point64, SearchAxis};
use super::quad64::{self, Quad64};
use super::rect64::Rect64;
use super::{pin_t, Scalar64};
use crate::floating_point::{almost_between_ulps, almost_equal_ulps_pin};

/// A segment kind.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Verb {
    /// A straight line.
    Line,
    /// A quadratic Bezier curve.
    Quad,
    /// A cubic Bezier curve.
    Cubic,
}

/// Any supported curve.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Curve64 {
    /// A straight line.
    Line(Line64),
    /// A quadratic Bezier curve.
    Quad(Quad64),
    /// A cubic Bezier curve.
    Cubic(Cubic64),
}

impl Curve64 {
    /// Returns the curve kind.
    pub fn verb(&self) -> Verb {
        match self {
            Curve64::Line(_) => Verb::Line,
            Curve64::Quad(_) => Verb::Quad,
            Curve64::Cubic(_) => Verb::Cubic,
        }
    }

    /// Returns the end points followed by the control points, in path order.
    pub fn points(&self) -> &[Point64] {
        match self {
            Curve64::Line(ref c) => &c.points,
            Curve64::Quad(ref c) => &c.points,
            Curve64::Cubic(ref c) => &c.points,
        }
    }

    /// Returns the first point.
    pub fn start(&self) -> Point64 {
        self.points()[0]
    }

    /// Returns the last point.
    pub fn end(&self) -> Point64 {
        let points = self.points();
        points[points.len() - 1]
    }

    /// Evaluates the curve.
    pub fn point_at_t(&self, t: f64) -> Point64 {
        match self {
            Curve64::Line(ref c) => c.point_at_t(t),
            Curve64::Quad(ref c) => c.point_at_t(t),
            Curve64::Cubic(ref c) => c.point_at_t(t),
        }
    }

    /// Returns the tangent direction at `t`.
    ///
    /// Only the direction is meaningful, the length differs per curve kind.
    pub fn dxdy_at_t(&self, t: f64) -> Point64 {
        match self {
            Curve64::Line(ref c) => c.dxdy_at_t(t),
            Curve64::Quad(ref c) => c.dxdy_at_t(t),
            Curve64::Cubic(ref c) => c.dxdy_at_t(t),
        }
    }

    /// Returns the part of the curve between `t1` and `t2`.
    pub fn subdivide(&self, t1: f64, t2: f64) -> Self {
        match self {
            Curve64::Line(ref c) => Curve64::Line(c.subdivide(t1, t2)),
            Curve64::Quad(ref c) => Curve64::Quad(c.subdivide(t1, t2)),
            Curve64::Cubic(ref c) => Curve64::Cubic(c.subdivide(t1, t2)),
        }
    }

    /// Returns tight bounds, including extrema.
    pub fn bounds(&self) -> Rect64 {
        match self {
            Curve64::Line(ref c) => c.bounds(),
            Curve64::Quad(ref c) => c.bounds(),
            Curve64::Cubic(ref c) => c.bounds(),
        }
    }

    /// Checks that all points are approximately equal.
    pub fn collapsed(&self) -> bool {
        match self {
            Curve64::Line(ref c) => c.collapsed(),
            Curve64::Quad(ref c) => c.collapsed(),
            Curve64::Cubic(ref c) => c.collapsed(),
        }
    }

    /// Lines are always linear.
    pub fn is_linear(&self) -> bool {
        match self {
            Curve64::Line(_) => true,
            Curve64::Quad(ref c) => c.is_linear(),
            Curve64::Cubic(ref c) => c.is_linear(),
        }
    }

    /// Degree elevation. The parametrization is preserved.
    pub fn to_cubic(&self) -> Cubic64 {
        match self {
            Curve64::Line(ref c) => c.to_cubic(),
            Curve64::Quad(ref c) => c.to_cubic(),
            Curve64::Cubic(ref c) => *c,
        }
    }

    /// Finds the parameters where the curve crosses the infinite line through `line`.
    pub fn ray_roots(&self, line: &Line64, roots: &mut [f64; 3]) -> usize {
        let [l0, l1] = line.points;
        let adj = l1.x - l0.x;
        let opp = l1.y - l0.y;
        let across = |p: Point64| (p.y - l0.y) * adj - (p.x - l0.x) * opp;
        match self {
            Curve64::Line(ref c) => {
                let r0 = across(c.points[0]);
                let r1 = across(c.points[1]);
                quad64::roots_valid_t(0.0, r1 - r0, r0, roots)
            }
            Curve64::Quad(ref c) => {
                let r0 = across(c.points[0]);
                let r1 = across(c.points[1]);
                let r2 = across(c.points[2]);
                let a = r2 + r0 - 2.0 * r1;
                let b = r1 - r0;
                quad64::roots_valid_t(a, 2.0 * b, r0, roots)
            }
            Curve64::Cubic(ref c) => {
                let along = |p: Point64| (p.y - l0.y) * opp + (p.x - l0.x) * adj;
                let mut rotated = [Point64::zero(); 4];
                for (r, p) in rotated.iter_mut().zip(c.points.iter()) {
                    *r = Point64::from_xy(across(*p), along(*p));
                }

                let rotated = Cubic64::new(rotated);
                let src = rotated.as_f64_slice();
                let (a, b, c, d) = cubic64::coefficients(&src);
                let mut count = cubic64::roots_valid_t(a, b, c, d, roots);
                for index in 0..count {
                    if !rotated.point_at_t(roots[index]).x.approximately_zero() {
                        let mut extreme_ts = [0.0; 6];
                        let extrema = cubic64::find_extrema(&src, &mut extreme_ts);
                        count = rotated.search_roots(
                            extrema,
                            0.0,
                            SearchAxis::X,
                            &mut extreme_ts,
                            roots,
                        );
                        break;
                    }
                }

                count
            }
        }
    }

    /// Returns the parameter of the point on the curve closest to `xy`
    /// along the perpendicular to the `xy`-`opp` line, if it's within
    /// a few ULPs from `xy`.
    pub fn near_point(&self, xy: Point64, opp: Point64) -> Option<f64> {
        let points = self.points();
        let bounds = Rect64::from_points(points)?;
        if !almost_between_ulps(bounds.left, xy.x, bounds.right)
            || !almost_between_ulps(bounds.top, xy.y, bounds.bottom)
        {
            return None;
        }

        let perp = Line64::new(xy, Point64::from_xy(xy.x + opp.y - xy.y, xy.y + xy.x - opp.x));
        let (t, pt) = self.closest_ray_hit(&perp, xy)?;
        let dist = xy.distance(pt);
        let largest = bounds
            .right
            .max(bounds.bottom)
            .max(-bounds.left.min(bounds.top));
        if !almost_equal_ulps_pin(largest, largest + dist) {
            return None;
        }

        Some(pin_t(t))
    }

    /// Casts a ray from `pt` perpendicular to `dxdy` and returns the closest
    /// hit on this curve.
    pub fn perp_hit(&self, pt: Point64, dxdy: Point64) -> Option<(f64, Point64)> {
        let perp = Line64::new(pt, Point64::from_xy(pt.x + dxdy.y, pt.y - dxdy.x));
        self.closest_ray_hit(&perp, pt)
    }

    fn closest_ray_hit(&self, ray: &Line64, to: Point64) -> Option<(f64, Point64)> {
        let mut roots = [0.0; 3];
        let count = self.ray_roots(ray, &mut roots);
        let mut best: Option<(f64, Point64)> = None;
        let mut best_dist = f64::MAX;
        for t in &roots[0..count] {
            let pt = self.point_at_t(*t);
            let dist = to.distance(pt);
            if dist < best_dist {
                best_dist = dist;
                best = Some((*t, pt));
            }
        }

        best
    }
}

impl From<Line64> for Curve64 {
    fn from(c: Line64) -> Self {
        Curve64::Line(c)
    }
}

impl From<Quad64> for Curve64 {
    fn from(c: Quad64) -> Self {
        Curve64::Quad(c)
    }
}

impl From<Cubic64> for Curve64 {
    fn from(c: Cubic64) -> Self {
        Curve64::Cubic(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f64, y: f64) -> Point64 {
        Point64::from_xy(x, y)
    }

    #[test]
    fn ray_roots() {
        let quad = Curve64::from(Quad64::new([pt(0.0, 0.0), pt(1.0, 2.0), pt(2.0, 0.0)]));
        let ray = Line64::new(pt(-1.0, 0.5), pt(3.0, 0.5));
        let mut roots = [0.0; 3];
        assert_eq!(quad.ray_roots(&ray, &mut roots), 2);
        for t in &roots[0..2] {
            assert!(quad.point_at_t(*t).y.approximately_equal(0.5));
        }

        let cubic = Curve64::from(Cubic64::new([
            pt(0.0, 0.0),
            pt(0.0, 4.0),
            pt(4.0, 4.0),
            pt(4.0, 0.0),
        ]));
        let ray = Line64::new(pt(2.0, -1.0), pt(2.0, 5.0));
        assert_eq!(cubic.ray_roots(&ray, &mut roots), 1);
        assert!(roots[0].approximately_equal(0.5));
    }

    #[test]
    fn near_point() {
        let quad = Curve64::from(Quad64::new([pt(0.0, 0.0), pt(1.0, 2.0), pt(2.0, 0.0)]));
        let top = quad.point_at_t(0.5);
        assert_eq!(quad.near_point(top, pt(1.0, 10.0)), Some(0.5));
        assert_eq!(quad.near_point(pt(1.0, 0.9), pt(1.0, 10.0)), None);
        assert_eq!(quad.near_point(pt(5.0, 0.0), pt(5.0, 10.0)), None);
    }

    #[test]
    fn perp_hit() {
        let line = Curve64::from(Line64::new(pt(0.0, 0.0), pt(4.0, 0.0)));
        let (t, hit) = line.perp_hit(pt(1.0, 1.0), pt(1.0, 0.0)).unwrap();
        assert_eq!(t, 0.25);
        assert_eq!(hit, pt(1.0, 0.0));
    }

    #[test]
    fn uniform_api() {
        let line = Curve64::from(Line64::new(pt(0.0, 0.0), pt(4.0, 2.0)));
        assert_eq!(line.verb(), Verb::Line);
        assert_eq!(line.end(), pt(4.0, 2.0));
        assert!(line.is_linear());
        let cubic = line.to_cubic();
        assert!(cubic.point_at_t(0.25).approximately_equal(line.point_at_t(0.25)));
        assert_eq!(line.subdivide(0.5, 1.0).start(), pt(2.0, 1.0));
    }
}
