// Copyright 2012 Google Inc.
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

/*!
Line/quad and line/cubic intersections.

The curve is rotated so that the line lies on the x axis:

```text
r(t) = (P(t).y - L0.y) * (L1.x - L0.x) - (P(t).x - L0.x) * (L1.y - L0.y)
```

and the roots of `r(t)` are the curve parameters of the intersections.
Axis aligned lines don't need the rotation. The curve coordinate along the
other axis is solved for the line position directly.

In all results the first parameter is on the curve and the second one is on the line.
*/

use crate::intersections::Intersections;
use crate::line_intersections;
use crate::path64::cubic64::{self, Cubic64};
use crate::path64::curve64::Curve64;
use crate::path64::line64::{self, Line64};
use crate::path64::point64::{Point64, SearchAxis};
use crate::path64::quad64;
use crate::path64::{pin_t, Scalar64};
use crate::IntersectError;

/// Intersects a curve with a line segment.
pub fn intersect_line(curve: &Curve64, line: &Line64, i: &mut Intersections) -> Result<usize, IntersectError> {
    if let Curve64::Line(ref l) = curve {
        return line_intersections::intersect_lines(l, line, i);
    }

    i.set_max(max_for(curve));
    let mut lc = LineCurve {
        curve,
        line: *line,
        i,
    };
    lc.intersect()
}

/// Intersects a curve with a horizontal line from `left` to `right` at `y`.
///
/// `flipped` means that the horizontal line runs from right to left.
pub fn horizontal_intersect(
    curve: &Curve64,
    left: f64,
    right: f64,
    y: f64,
    flipped: bool,
    i: &mut Intersections,
) -> Result<usize, IntersectError> {
    if let Curve64::Line(ref l) = curve {
        return line_intersections::horizontal_intersect(l, left, right, y, flipped, i);
    }

    i.set_max(max_for(curve));
    let line = Line64::new(Point64::from_xy(left, y), Point64::from_xy(right, y));
    let mut lc = LineCurve { curve, line, i };
    lc.axis_intersect(SearchAxis::Y, y, left, right, flipped)
}

/// Intersects a curve with a vertical line from `top` to `bottom` at `x`.
///
/// `flipped` means that the vertical line runs from bottom to top.
pub fn vertical_intersect(
    curve: &Curve64,
    top: f64,
    bottom: f64,
    x: f64,
    flipped: bool,
    i: &mut Intersections,
) -> Result<usize, IntersectError> {
    if let Curve64::Line(ref l) = curve {
        return line_intersections::vertical_intersect(l, top, bottom, x, flipped, i);
    }

    i.set_max(max_for(curve));
    let line = Line64::new(Point64::from_xy(x, top), Point64::from_xy(x, bottom));
    let mut lc = LineCurve { curve, line, i };
    lc.axis_intersect(SearchAxis::X, x, top, bottom, flipped)
}

// Room for a short partial coincidence plus the discrete intersections.
fn max_for(curve: &Curve64) -> usize {
    match curve {
        Curve64::Cubic(_) => 6,
        _ => 5,
    }
}

struct LineCurve<'a> {
    curve: &'a Curve64,
    line: Line64,
    i: &'a mut Intersections,
}

impl LineCurve<'_> {
    fn intersect(&mut self) -> Result<usize, IntersectError> {
        self.add_exact_end_points()?;
        if self.i.allow_near() {
            self.add_near_end_points()?;
        }

        let mut roots = [0.0; 3];
        let count = self.curve.ray_roots(&self.line, &mut roots);
        for curve_t in &roots[0..count] {
            let line_t = self.find_line_t(*curve_t);
            if let Some((curve_t, line_t, pt)) = self.pin_ts(*curve_t, line_t, None) {
                if self.unique_answer(curve_t, pt) {
                    self.i.insert(curve_t, line_t, pt)?;
                }
            }
        }

        self.check_coincident();
        Ok(self.i.len())
    }

    // `axis` is the coordinate that is constant along the line.
    fn axis_intersect(
        &mut self,
        axis: SearchAxis,
        intercept: f64,
        start: f64,
        end: f64,
        flipped: bool,
    ) -> Result<usize, IntersectError> {
        // the horizontal helpers work for vertical lines with transposed points
        let to_h = |p: Point64| match axis {
            SearchAxis::Y => p,
            SearchAxis::X => p.transposed(),
        };

        for (curve_t, p) in self.ends() {
            if let Some(line_t) = line64::exact_point_h(to_h(p), start, end, intercept) {
                self.i.insert(curve_t, line_t, p)?;
            }
        }
        self.add_line_near_end_points()?;

        if self.i.allow_near() {
            for (curve_t, p) in self.ends() {
                if self.i.has_t(curve_t) {
                    continue;
                }

                if let Some(line_t) = line64::near_point_h(to_h(p), start, end, intercept) {
                    self.i.insert(curve_t, line_t, p)?;
                }
            }
            self.add_line_near_end_points()?;
        }

        let mut roots = [0.0; 3];
        let count = axis_roots(self.curve, intercept, axis, &mut roots);
        for curve_t in &roots[0..count] {
            let on_curve = to_h(self.curve.point_at_t(*curve_t));
            let pt = to_h(Point64::from_xy(on_curve.x, intercept));
            let line_t = (on_curve.x - start) / (end - start);
            if let Some((curve_t, line_t, pt)) = self.pin_ts(*curve_t, line_t, Some(pt)) {
                if self.unique_answer(curve_t, pt) {
                    self.i.insert(curve_t, line_t, pt)?;
                }
            }
        }

        if flipped {
            self.i.flip();
        }

        self.check_coincident();
        Ok(self.i.len())
    }

    fn ends(&self) -> [(f64, Point64); 2] {
        [(0.0, self.curve.start()), (1.0, self.curve.end())]
    }

    fn add_exact_end_points(&mut self) -> Result<(), IntersectError> {
        for (curve_t, p) in self.ends() {
            if let Some(line_t) = self.line.exact_point(p) {
                self.i.insert(curve_t, line_t, p)?;
            }
        }

        Ok(())
    }

    fn add_near_end_points(&mut self) -> Result<(), IntersectError> {
        for (curve_t, p) in self.ends() {
            if self.i.has_t(curve_t) {
                continue;
            }

            if let Some((line_t, _)) = self.line.near_point(p) {
                self.i.insert(curve_t, line_t, p)?;
            }
        }

        self.add_line_near_end_points()
    }

    fn add_line_near_end_points(&mut self) -> Result<(), IntersectError> {
        for index in 0..2 {
            let line_t = index as f64;
            if self.i.has_opp_t(line_t) {
                continue;
            }

            let p = self.line.points[index];
            let opp = self.line.points[1 - index];
            if let Some(curve_t) = self.curve.near_point(p, opp) {
                self.i.insert(curve_t, line_t, p)?;
            }
        }

        Ok(())
    }

    fn find_line_t(&self, t: f64) -> f64 {
        let xy = self.curve.point_at_t(t);
        let [l0, l1] = self.line.points;
        let dx = l1.x - l0.x;
        let dy = l1.y - l0.y;
        if dx.abs() > dy.abs() {
            (xy.x - l0.x) / dx
        } else {
            (xy.y - l0.y) / dy
        }
    }

    fn pin_ts(&self, curve_t: f64, line_t: f64, pt: Option<Point64>) -> Option<(f64, f64, Point64)> {
        if !line_t.approximately_one_or_less() || !line_t.approximately_zero_or_more() {
            return None;
        }

        let mut curve_t = pin_t(curve_t);
        let mut line_t = pin_t(line_t);
        let line_pt = self.line.point_at_t(line_t);
        let curve_pt = self.curve.point_at_t(curve_t);
        if !line_pt.roughly_equal(curve_pt) {
            return None;
        }

        let pt = match pt {
            _ if line_t == 0.0 || line_t == 1.0 => line_pt,
            None if curve_t != 0.0 && curve_t != 1.0 => line_pt,
            None => curve_pt,
            Some(pt) => pt,
        };

        // snap to the end points when they match in single precision
        let grid = pt.to_point();
        if grid == self.line.points[0].to_point() {
            line_t = 0.0;
        } else if grid == self.line.points[1].to_point() {
            line_t = 1.0;
        }

        if grid == self.curve.start().to_point() && curve_t.approximately_equal(0.0) {
            curve_t = 0.0;
        } else if grid == self.curve.end().to_point() && curve_t.approximately_equal(1.0) {
            curve_t = 1.0;
        }

        Some((curve_t, line_t, pt))
    }

    fn unique_answer(&self, curve_t: f64, pt: Point64) -> bool {
        for e in self.i.iter() {
            if e.point != pt {
                continue;
            }

            if curve_t == e.t[0] {
                return false;
            }

            // the same point midway on the curve means the same intersection
            let mid_pt = self.curve.point_at_t((e.t[0] + curve_t) / 2.0);
            if mid_pt.approximately_equal(pt) {
                return false;
            }
        }

        true
    }

    // Consecutive entries whose curve midpoint is on the line are coincident.
    fn check_coincident(&mut self) {
        let mut last = self.i.len() as isize - 1;
        let mut index = 0;
        while (index as isize) < last {
            let mid_t = (self.i.t(0, index) + self.i.t(0, index + 1)) / 2.0;
            let mid_pt = self.curve.point_at_t(mid_t);
            if self.line.near_point(mid_pt).is_none() {
                index += 1;
                continue;
            }

            if self.i.is_coincident(index) {
                self.i.remove_one(index);
                last -= 1;
            } else if self.i.is_coincident(index + 1) {
                self.i.remove_one(index + 1);
                last -= 1;
            } else {
                self.i.set_coincident(index);
                index += 1;
            }

            self.i.set_coincident(index);
        }
    }
}

// Curve parameters where the `axis` coordinate equals `intercept`.
pub(crate) fn axis_roots(curve: &Curve64, intercept: f64, axis: SearchAxis, roots: &mut [f64; 3]) -> usize {
    let offset = match axis {
        SearchAxis::X => 0,
        SearchAxis::Y => 1,
    };

    match curve {
        Curve64::Line(ref l) => {
            let src = [l.points[0].x, l.points[0].y, l.points[1].x, l.points[1].y];
            let a = src[offset];
            let b = src[2 + offset];
            quad64::roots_valid_t(0.0, b - a, a - intercept, roots)
        }
        Curve64::Quad(ref q) => {
            let src = q.as_f64_slice();
            let mut d = src[4 + offset];
            let mut e = src[2 + offset];
            let mut f = src[offset];
            d += f - 2.0 * e; // D = d - 2*e + f
            e -= f; // E = -(d - e)
            f -= intercept;
            quad64::roots_valid_t(d, 2.0 * e, f, roots)
        }
        Curve64::Cubic(ref c) => cubic_axis_roots(c, intercept, axis, roots),
    }
}

// Solves the cubic in the `axis` coordinate. When the closed form roots
// don't evaluate to the intercept, searches between the extrema instead.
fn cubic_axis_roots(cubic: &Cubic64, intercept: f64, axis: SearchAxis, roots: &mut [f64; 3]) -> usize {
    let offset = match axis {
        SearchAxis::X => 0,
        SearchAxis::Y => 1,
    };

    let src = cubic.as_f64_slice();
    let (a, b, c, mut d) = cubic64::coefficients(&src[offset..]);
    d -= intercept;
    let mut count = cubic64::roots_valid_t(a, b, c, d, roots);
    for index in 0..count {
        let calc_pt = cubic.point_at_t(roots[index]);
        if !calc_pt.axis_coord(axis).approximately_equal(intercept) {
            let mut extreme_ts = [0.0; 6];
            let extrema = cubic64::find_extrema(&src[offset..], &mut extreme_ts);
            count = cubic.search_roots(extrema, intercept, axis, &mut extreme_ts, roots);
            break;
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f64, y: f64) -> Point64 {
        Point64::from_xy(x, y)
    }

    #[test]
    fn cubic_axis() {
        let c = Cubic64::new([pt(0.0, 0.0), pt(0.0, 4.0), pt(4.0, 4.0), pt(4.0, 0.0)]);
        let mut roots = [0.0; 3];
        assert_eq!(cubic_axis_roots(&c, 2.0, SearchAxis::X, &mut roots), 1);
        assert!(roots[0].approximately_equal(0.5));

        let count = cubic_axis_roots(&c, 2.0, SearchAxis::Y, &mut roots);
        assert_eq!(count, 2);
        for t in &roots[0..count] {
            assert!(c.point_at_t(*t).y.approximately_equal(2.0));
        }

        assert_eq!(cubic_axis_roots(&c, 5.0, SearchAxis::Y, &mut roots), 0);
    }

    #[test]
    fn quad_axis() {
        let q = Curve64::Quad(quad64::Quad64::new([pt(0.0, 0.0), pt(1.0, 2.0), pt(2.0, 0.0)]));
        let mut roots = [0.0; 3];
        assert_eq!(axis_roots(&q, 1.0, SearchAxis::Y, &mut roots), 1);
        assert!(roots[0].approximately_equal(0.5));
        assert_eq!(axis_roots(&q, 1.0, SearchAxis::X, &mut roots), 1);
        assert!(roots[0].approximately_equal(0.5));
    }
}
