// Copyright 2012 Google Inc.
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Line/line intersections.

use crate::floating_point::{almost_equal_ulps, almost_equal_ulps_pin};
use crate::intersections::Intersections;
use crate::path64::line64::{self, Line64};
use crate::path64::point64::Point64;
use crate::path64::{pin_t, Scalar64};
use crate::IntersectError;

/// Intersects two line segments.
///
/// End points that lie exactly on the other line are recorded first. When
/// the lines are parallel and overlap, two entries marked as coincident
/// describe the overlap.
///
/// Returns the number of entries, which is at most 2.
pub fn intersect_lines(a: &Line64, b: &Line64, i: &mut Intersections) -> Result<usize, IntersectError> {
    // the parallel cleanup at the end keeps at most two
    i.set_max(3);

    for (ia, pa) in a.points.iter().enumerate() {
        if let Some(t) = b.exact_point(*pa) {
            i.insert(ia as f64, t, *pa)?;
        }
    }

    for (ib, pb) in b.points.iter().enumerate() {
        if let Some(t) = a.exact_point(*pb) {
            i.insert(t, ib as f64, *pb)?;
        }
    }

    // Paul Bourke's line/line formula. The slopes match when the denominator is zero.
    let a_len = a.points[1] - a.points[0];
    let b_len = b.points[1] - b.points[0];
    let ax_by = a_len.x * b_len.y;
    let ay_bx = a_len.y * b_len.x;
    // the same parallel test is used when sorting angles,
    // so that non-parallel lines are sortable
    let unparallel = if i.allow_near() {
        !almost_equal_ulps_pin(ax_by, ay_bx)
    } else {
        !ax_by.almost_dequal_ulps(ay_bx)
    };

    if unparallel && i.is_empty() {
        let ab0 = a.points[0] - b.points[0];
        let numer_a = ab0.y * b_len.x - b_len.y * ab0.x;
        let numer_b = ab0.y * a_len.x - a_len.y * ab0.x;
        let denom = ax_by - ay_bx;
        if numer_a.between(0.0, denom) && numer_b.between(0.0, denom) {
            let t = numer_a / denom;
            i.insert(t, numer_b / denom, a.point_at_t(t))?;
        }
    }

    // Both sets of end points can be near each other even when they are not
    // exactly the same. Such pairs are matched up as near end points,
    // so the lines aren't folded over each other.
    if i.allow_near() || !unparallel {
        let mut a_near_b = [None; 2];
        let mut b_near_a = [None; 2];
        let mut a_not_b = [false; 2];
        let mut b_not_a = [false; 2];
        let mut near_count = 0;
        for index in 0..2 {
            if let Some((t, unequal)) = b.near_point(a.points[index]) {
                a_near_b[index] = Some(t);
                a_not_b[index] = unequal;
                near_count += 1;
            }

            if let Some((t, unequal)) = a.near_point(b.points[index]) {
                b_near_a[index] = Some(t);
                b_not_a[index] = unequal;
                near_count += 1;
            }
        }

        if near_count > 0 {
            // skip if each segment contributes to one end point
            if near_count != 2 || a_not_b[0] == a_not_b[1] {
                for ia in 0..2 {
                    if !a_not_b[ia] {
                        continue;
                    }

                    let nearer = match a_near_b[ia] {
                        Some(t) if t > 0.5 => 1,
                        _ => 0,
                    };
                    if !b_not_a[nearer] {
                        continue;
                    }

                    debug_assert!(a.points[ia] != b.points[nearer]);
                    i.insert_near(ia as f64, nearer as f64, a.points[ia], b.points[nearer])?;
                    a_near_b[ia] = None;
                    b_near_a[nearer] = None;
                    near_count -= 2;
                }
            }

            if near_count > 0 {
                for ia in 0..2 {
                    if let Some(t) = a_near_b[ia] {
                        i.insert(ia as f64, t, a.points[ia])?;
                    }
                }

                for ib in 0..2 {
                    if let Some(t) = b_near_a[ib] {
                        i.insert(t, ib as f64, b.points[ib])?;
                    }
                }
            }
        }
    }

    i.clean_up_parallel_lines(!unparallel);
    debug_assert!(i.len() <= 2);
    Ok(i.len())
}

/// Intersects a line with a horizontal line from `left` to `right` at `y`.
///
/// The first parameter of each entry is on `line`. `flipped` means that the
/// horizontal line runs from right to left.
pub fn horizontal_intersect(
    line: &Line64,
    left: f64,
    right: f64,
    y: f64,
    flipped: bool,
    i: &mut Intersections,
) -> Result<usize, IntersectError> {
    axis_intersect(line, left, right, y, flipped, false, i)
}

/// Intersects a line with a vertical line from `top` to `bottom` at `x`.
///
/// The first parameter of each entry is on `line`. `flipped` means that the
/// vertical line runs from bottom to top.
pub fn vertical_intersect(
    line: &Line64,
    top: f64,
    bottom: f64,
    x: f64,
    flipped: bool,
    i: &mut Intersections,
) -> Result<usize, IntersectError> {
    axis_intersect(&line.transposed(), top, bottom, x, flipped, true, i)
}

// Works on a horizontal line. A vertical line is handled as a horizontal one
// with transposed coordinates, in which case the points are transposed back
// on insertion.
fn axis_intersect(
    line: &Line64,
    left: f64,
    right: f64,
    y: f64,
    flipped: bool,
    transposed: bool,
    i: &mut Intersections,
) -> Result<usize, IntersectError> {
    let restore = |p: Point64| if transposed { p.transposed() } else { p };
    let flip_t = |t: f64| if flipped { 1.0 - t } else { t };

    i.set_max(3);

    let left_pt = Point64::from_xy(left, y);
    let right_pt = Point64::from_xy(right, y);
    if let Some(t) = line.exact_point(left_pt) {
        i.insert(t, flip_t(0.0), restore(left_pt))?;
    }

    if left != right {
        if let Some(t) = line.exact_point(right_pt) {
            i.insert(t, flip_t(1.0), restore(right_pt))?;
        }

        for (index, p) in line.points.iter().enumerate() {
            if let Some(t) = line64::exact_point_h(*p, left, right, y) {
                i.insert(index as f64, flip_t(t), restore(*p))?;
            }
        }
    }

    let result = horizontal_coincident(line, y);
    if result == 1 && i.is_empty() && line.points[0].y != line.points[1].y {
        let t = pin_t((y - line.points[0].y) / (line.points[1].y - line.points[0].y));
        let x_intercept = line.points[0].x + t * (line.points[1].x - line.points[0].x);
        if x_intercept.between(left, right) {
            let axis_t = (x_intercept - left) / (right - left);
            i.insert(t, flip_t(axis_t), restore(Point64::from_xy(x_intercept, y)))?;
        }
    }

    if i.allow_near() || result == 2 {
        if let Some((t, _)) = line.near_point(left_pt) {
            i.insert(t, flip_t(0.0), restore(left_pt))?;
        }

        if left != right {
            if let Some((t, _)) = line.near_point(right_pt) {
                i.insert(t, flip_t(1.0), restore(right_pt))?;
            }

            for (index, p) in line.points.iter().enumerate() {
                if let Some(t) = line64::near_point_h(*p, left, right, y) {
                    i.insert(index as f64, flip_t(t), restore(*p))?;
                }
            }
        }
    }

    i.clean_up_parallel_lines(result == 2);
    Ok(i.len())
}

// 0: the line doesn't reach `y`, 1: it crosses `y`, 2: it lies on `y`.
fn horizontal_coincident(line: &Line64, y: f64) -> u8 {
    let mut min = line.points[0].y;
    let mut max = line.points[1].y;
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }

    if min > y || max < y {
        return 0;
    }

    if almost_equal_ulps(min, max) && max - min < (line.points[0].x - line.points[1].x).abs() {
        return 2;
    }

    1
}
