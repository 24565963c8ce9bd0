// Copyright 2012 Google Inc.
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use super::cubic64::Cubic64;
use super::point64::Point64;
use super::rect64::Rect64;
use super::Scalar64;

/// A quadratic Bezier curve.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Quad64 {
    /// Start, control point and end.
    pub points: [Point64; 3],
}

impl Quad64 {
    /// Creates a quad from its points.
    pub fn new(points: [Point64; 3]) -> Self {
        Quad64 { points }
    }

    pub(crate) fn as_f64_slice(&self) -> [f64; 6] {
        [
            self.points[0].x,
            self.points[0].y,
            self.points[1].x,
            self.points[1].y,
            self.points[2].x,
            self.points[2].y,
        ]
    }

    /// Evaluates the curve.
    pub fn point_at_t(&self, t: f64) -> Point64 {
        if t == 0.0 {
            return self.points[0];
        }

        if t == 1.0 {
            return self.points[2];
        }

        let one_t = 1.0 - t;
        let a = one_t * one_t;
        let b = 2.0 * one_t * t;
        let c = t * t;
        Point64::from_xy(
            a * self.points[0].x + b * self.points[1].x + c * self.points[2].x,
            a * self.points[0].y + b * self.points[1].y + c * self.points[2].y,
        )
    }

    /// Returns the tangent direction at `t`.
    ///
    /// The vector is half the length of the derivative. When the control
    /// point sits on an end, the end to end vector is used instead.
    pub fn dxdy_at_t(&self, t: f64) -> Point64 {
        let a = t - 1.0;
        let b = 1.0 - 2.0 * t;
        let c = t;
        let mut result = Point64::from_xy(
            a * self.points[0].x + b * self.points[1].x + c * self.points[2].x,
            a * self.points[0].y + b * self.points[1].y + c * self.points[2].y,
        );

        if result.x == 0.0 && result.y == 0.0 && t.zero_or_one() {
            result = self.points[2] - self.points[0];
        }

        result
    }

    /// Returns the part of the curve between `t1` and `t2`.
    pub fn subdivide(&self, t1: f64, t2: f64) -> Self {
        if t1 == 0.0 && t2 == 1.0 {
            return *self;
        }

        let a = self.point_at_t(t1);
        let d = self.point_at_t((t1 + t2) / 2.0);
        let c = self.point_at_t(t2);
        let b = Point64::from_xy(2.0 * d.x - (a.x + c.x) / 2.0, 2.0 * d.y - (a.y + c.y) / 2.0);
        Quad64::new([a, b, c])
    }

    /// Returns tight bounds.
    pub fn bounds(&self) -> Rect64 {
        let mut r = Rect64::from_point(self.points[0]);
        r.add(self.points[2]);

        let src = self.as_f64_slice();
        let mut ts = [0.0; 2];
        let mut count = find_extrema(&src[0..], &mut ts[0..1]);
        count += find_extrema(&src[1..], &mut ts[count..]);
        for t in &ts[0..count] {
            r.add(self.point_at_t(*t));
        }

        r
    }

    /// Checks that all points are (approximately) the same.
    pub fn collapsed(&self) -> bool {
        self.points[0].approximately_equal(self.points[1])
            && self.points[0].approximately_equal(self.points[2])
    }

    /// Checks that the control point lies on the line between the ends.
    pub fn is_linear(&self) -> bool {
        let (distance, largest) = control_pt_distance(&self.points, &self.points[1..2]);
        distance.approximately_zero_when_compared_to(largest)
    }

    /// Degree elevation. The parametrization is preserved.
    pub fn to_cubic(&self) -> Cubic64 {
        let [p0, p1, p2] = self.points;
        Cubic64::new([
            p0,
            p0 + (p1 - p0) * (2.0 / 3.0),
            p2 + (p1 - p2) * (2.0 / 3.0),
            p2,
        ])
    }
}

// The largest distance of the control points from the line through the ends,
// and the coordinate with the largest magnitude.
pub(crate) fn control_pt_distance(points: &[Point64], controls: &[Point64]) -> (f64, f64) {
    let start = points[0];
    let end = points[points.len() - 1];

    let mut tiniest = f64::MAX;
    let mut largest = f64::MIN;
    for p in points {
        tiniest = tiniest.min(p.x).min(p.y);
        largest = largest.max(p.x).max(p.y);
    }
    let largest = largest.max(-tiniest);

    let base = end - start;
    let len = base.length();
    if len == 0.0 {
        return (f64::MAX, largest);
    }

    let mut distance: f64 = 0.0;
    for p in controls {
        distance = distance.max((base.cross(*p - start) / len).abs());
    }

    (distance, largest)
}

// Quad'(t) = 2(b - a) + 2t(a - 2b + c), zero at t = (a - b) / (a - 2b + c).
pub(crate) fn find_extrema(src: &[f64], t_value: &mut [f64]) -> usize {
    let a = src[0];
    let b = src[2];
    let c = src[4];
    valid_unit_divide(a - b, a - b - b + c, t_value)
}

fn valid_unit_divide(mut numer: f64, mut denom: f64, t_value: &mut [f64]) -> usize {
    if numer < 0.0 {
        numer = -numer;
        denom = -denom;
    }

    if denom == 0.0 || numer == 0.0 || numer >= denom {
        return 0;
    }

    let r = numer / denom;
    if r == 0.0 {
        // catch underflow if numer <<<< denom
        return 0;
    }

    t_value[0] = r;
    1
}

pub fn push_valid_ts(s: &[f64], real_roots: usize, t: &mut [f64]) -> usize {
    let mut found_roots = 0;
    'outer: for index in 0..real_roots {
        let mut t_value = s[index];
        if t_value.approximately_zero_or_more() && t_value.approximately_one_or_less() {
            t_value = t_value.bound(0.0, 1.0);

            for idx2 in 0..found_roots {
                if t[idx2].approximately_equal(t_value) {
                    continue 'outer;
                }
            }

            t[found_roots] = t_value;
            found_roots += 1;
        }
    }

    found_roots
}

// note: caller expects multiple results to be sorted smaller first
// note: http://en.wikipedia.org/wiki/Loss_of_significance has an interesting
//  analysis of the quadratic equation, suggesting why the following looks at
//  the sign of B -- and further suggesting that the greatest loss of precision
//  is in b squared less two a c
pub fn roots_valid_t(a: f64, b: f64, c: f64, t: &mut [f64]) -> usize {
    let mut s = [0.0; 3];
    let real_roots = roots_real(a, b, c, &mut s);
    push_valid_ts(&s, real_roots, t)
}

// Numeric Solutions (5.6) suggests to solve the quadratic by computing
//     Q = -1/2(B + sgn(B)Sqrt(B^2 - 4 A C))
// and using the roots
//     t1 = Q / A
//     t2 = C / Q
//
// this does not discard real roots <= 0 or >= 1
pub fn roots_real(a: f64, b: f64, c: f64, s: &mut [f64; 3]) -> usize {
    if a == 0.0 {
        return handle_zero(b, c, s);
    }

    let p = b / (2.0 * a);
    let q = c / a;
    if a.approximately_zero() && (p.approximately_zero_inverse() || q.approximately_zero_inverse())
    {
        return handle_zero(b, c, s);
    }

    // normal form: x^2 + px + q = 0
    let p2 = p * p;
    if !p2.almost_dequal_ulps(q) && p2 < q {
        return 0;
    }

    let mut sqrt_d = 0.0;
    if p2 > q {
        sqrt_d = (p2 - q).sqrt();
    }

    s[0] = sqrt_d - p;
    s[1] = -sqrt_d - p;
    1 + usize::from(!s[0].almost_dequal_ulps(s[1]))
}

fn handle_zero(b: f64, c: f64, s: &mut [f64; 3]) -> usize {
    if b.approximately_zero() {
        s[0] = 0.0;
        (c == 0.0) as usize
    } else {
        s[0] = -c / b;
        1
    }
}
