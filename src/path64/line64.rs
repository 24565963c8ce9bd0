// Copyright 2012 Google Inc.
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use super::cubic64::Cubic64;
use super::point64::Point64;
use super::rect64::Rect64;
use super::{pin_t, Scalar64};
use crate::floating_point::{almost_bequal_ulps, almost_between_ulps, almost_equal_ulps};

/// A line segment.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Line64 {
    /// Start and end.
    pub points: [Point64; 2],
}

impl Line64 {
    /// Creates a line between two points.
    pub fn new(p0: Point64, p1: Point64) -> Self {
        Line64 { points: [p0, p1] }
    }

    /// Evaluates the line.
    pub fn point_at_t(&self, t: f64) -> Point64 {
        if t == 0.0 {
            return self.points[0];
        }

        if t == 1.0 {
            return self.points[1];
        }

        let one_t = 1.0 - t;
        Point64::from_xy(
            one_t * self.points[0].x + t * self.points[1].x,
            one_t * self.points[0].y + t * self.points[1].y,
        )
    }

    /// The derivative is the same everywhere.
    pub fn dxdy_at_t(&self, _: f64) -> Point64 {
        self.points[1] - self.points[0]
    }

    /// Returns the part of the line between `t1` and `t2`.
    pub fn subdivide(&self, t1: f64, t2: f64) -> Self {
        Line64::new(self.point_at_t(t1), self.point_at_t(t2))
    }

    /// Returns the bounds of both ends.
    pub fn bounds(&self) -> Rect64 {
        let mut r = Rect64::from_point(self.points[0]);
        r.add(self.points[1]);
        r
    }

    /// Checks that the line has (approximately) no length.
    pub fn collapsed(&self) -> bool {
        self.points[0].approximately_equal(self.points[1])
    }

    /// Degree elevation. The parametrization is preserved.
    pub fn to_cubic(&self) -> Cubic64 {
        let [p0, p1] = self.points;
        Cubic64::new([
            p0,
            p0 + (p1 - p0) * (1.0 / 3.0),
            p0 + (p1 - p0) * (2.0 / 3.0),
            p1,
        ])
    }

    /// Mirrors the line along the diagonal, swapping the coordinates.
    pub fn transposed(&self) -> Self {
        Line64::new(self.points[0].transposed(), self.points[1].transposed())
    }

    /// Returns 0 or 1 when `xy` is exactly an end point.
    pub fn exact_point(&self, xy: Point64) -> Option<f64> {
        if xy == self.points[0] {
            Some(0.0)
        } else if xy == self.points[1] {
            Some(1.0)
        } else {
            None
        }
    }

    /// Projects `xy` on the line and returns the parameter of the foot,
    /// if `xy` is within a few ULPs from the line.
    ///
    /// The flag is set when the point is not exactly on the line
    /// in single precision.
    pub fn near_point(&self, xy: Point64) -> Option<(f64, bool)> {
        let [p0, p1] = self.points;
        if !almost_between_ulps(p0.x, xy.x, p1.x) || !almost_between_ulps(p0.y, xy.y, p1.y) {
            return None;
        }

        // project a perpendicular ray from the point to the line; find the T on the line
        let len = p1 - p0;
        let denom = len.length_squared();
        let numer = len.dot(xy - p0);
        if !numer.between(0.0, denom) {
            return None;
        }

        if denom == 0.0 {
            return Some((0.0, false));
        }

        let t = numer / denom;
        let dist = self.point_at_t(t).distance(xy);
        let largest = self.largest_coord();
        if !crate::floating_point::almost_equal_ulps_pin(largest, largest + dist) {
            return None;
        }

        let unequal = largest as f32 != (largest + dist) as f32;
        Some((pin_t(t), unequal))
    }

    /// Intersects an infinite ray through `self` with `other`, returning the
    /// parameter on `self`.
    pub fn intersect_ray(&self, other: &Line64) -> Option<f64> {
        let a = self.points[1] - self.points[0];
        let b = other.points[1] - other.points[0];
        let denom = b.cross(a);
        if denom == 0.0 {
            return None;
        }

        let ab0 = self.points[0] - other.points[0];
        let numer = ab0.cross(b);
        Some(numer / denom)
    }

    // The ordinal in the line with the largest unsigned exponent.
    fn largest_coord(&self) -> f64 {
        let [p0, p1] = self.points;
        let tiniest = p0.x.min(p0.y).min(p1.x).min(p1.y);
        let largest = p0.x.max(p0.y).max(p1.x).max(p1.y);
        largest.max(-tiniest)
    }
}

/// Returns the parameter along a horizontal line when `xy` is exactly on one of its ends.
pub fn exact_point_h(xy: Point64, left: f64, right: f64, y: f64) -> Option<f64> {
    if xy.y == y {
        if xy.x == left {
            return Some(0.0);
        }

        if xy.x == right {
            return Some(1.0);
        }
    }

    None
}

/// Returns the parameter along a horizontal line when `xy` is within a few ULPs from it.
pub fn near_point_h(xy: Point64, left: f64, right: f64, y: f64) -> Option<f64> {
    if !almost_bequal_ulps(xy.y, y) {
        return None;
    }

    if !almost_between_ulps(left, xy.x, right) {
        return None;
    }

    let t = if left == right {
        0.0
    } else {
        pin_t((xy.x - left) / (right - left))
    };
    let real_x = (1.0 - t) * left + t * right;
    let dist = Point64::from_xy(xy.x - real_x, xy.y - y).length();
    let tiniest = left.min(y).min(right);
    let largest = left.max(y).max(right).max(-tiniest);
    if !almost_equal_ulps(largest, largest + dist) {
        return None;
    }

    Some(t)
}
