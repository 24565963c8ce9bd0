// Copyright 2012 Google Inc.
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use tiny_skia_path::Point;

use super::Scalar64;
use crate::floating_point;

#[derive(Copy, Clone, PartialEq, Debug)]
pub enum SearchAxis {
    X,
    Y,
}

/// A point (or a vector) with double precision coordinates.
#[repr(C)]
#[derive(Copy, Clone, PartialEq, Default, Debug)]
pub struct Point64 {
    #[allow(missing_docs)]
    pub x: f64,
    #[allow(missing_docs)]
    pub y: f64,
}

impl Point64 {
    /// Creates a new `Point64`.
    pub fn from_xy(x: f64, y: f64) -> Self {
        Point64 { x, y }
    }

    /// Widens a single precision point.
    pub fn from_point(p: Point) -> Self {
        Point64 {
            x: f64::from(p.x),
            y: f64::from(p.y),
        }
    }

    /// Creates a point at 0x0.
    pub fn zero() -> Self {
        Point64 { x: 0.0, y: 0.0 }
    }

    /// Narrows to a single precision point.
    pub fn to_point(&self) -> Point {
        Point::from_xy(self.x as f32, self.y as f32)
    }

    pub(crate) fn axis_coord(&self, axis: SearchAxis) -> f64 {
        match axis {
            SearchAxis::X => self.x,
            SearchAxis::Y => self.y,
        }
    }

    /// Swaps the coordinates.
    pub fn transposed(&self) -> Self {
        Point64::from_xy(self.y, self.x)
    }

    /// Checks that both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Returns the dot product with `other`.
    pub fn dot(&self, other: Point64) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Returns the cross product with `other`.
    pub fn cross(&self, other: Point64) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Returns the vector length.
    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Returns the squared vector length.
    pub fn length_squared(&self) -> f64 {
        self.dot(*self)
    }

    /// Returns the distance to another point.
    pub fn distance(&self, other: Point64) -> f64 {
        (other - *self).length()
    }

    /// Returns the squared distance to another point.
    pub fn distance_squared(&self, other: Point64) -> f64 {
        (other - *self).length_squared()
    }

    /// Checks that both coordinates are within a single precision epsilon,
    /// or, for large values, within a few ULPs of the largest coordinate.
    pub fn approximately_equal(&self, other: Point64) -> bool {
        if self.x.approximately_equal(other.x) && self.y.approximately_equal(other.y) {
            return true;
        }

        if !self.x.roughly_equal_ulps(other.x) || !self.y.roughly_equal_ulps(other.y) {
            return false;
        }

        // is the distance within ULPS tolerance?
        let largest = self.largest_coord(other);
        largest.almost_dequal_ulps(largest + self.distance(other))
    }

    /// Like `approximately_equal`, but with a tolerance an order of magnitude looser.
    pub fn roughly_equal(&self, other: Point64) -> bool {
        if self.x.roughly_equal(other.x) && self.y.roughly_equal(other.y) {
            return true;
        }

        let largest = self.largest_coord(other);
        largest.roughly_equal_ulps(largest + self.distance(other))
    }

    /// Compares points after narrowing them to single precision.
    pub fn almost_equal_ulps(&self, other: Point64) -> bool {
        let largest = self.largest_coord(other);
        floating_point::almost_equal_ulps_pin(largest, largest + self.distance(other))
    }

    // The ordinal with the largest unsigned exponent.
    fn largest_coord(&self, other: Point64) -> f64 {
        let tiniest = self.x.min(other.x).min(self.y).min(other.y);
        let largest = self.x.max(other.x).max(self.y).max(other.y);
        largest.max(-tiniest)
    }
}

impl From<Point> for Point64 {
    fn from(p: Point) -> Self {
        Point64::from_point(p)
    }
}

impl core::ops::Add for Point64 {
    type Output = Point64;

    fn add(self, other: Point64) -> Self::Output {
        Point64::from_xy(self.x + other.x, self.y + other.y)
    }
}

impl core::ops::Sub for Point64 {
    type Output = Point64;

    fn sub(self, other: Point64) -> Self::Output {
        Point64::from_xy(self.x - other.x, self.y - other.y)
    }
}

impl core::ops::Neg for Point64 {
    type Output = Point64;

    fn neg(self) -> Self::Output {
        Point64::from_xy(-self.x, -self.y)
    }
}

impl core::ops::Mul<f64> for Point64 {
    type Output = Point64;

    fn mul(self, scale: f64) -> Self::Output {
        Point64::from_xy(self.x * scale, self.y * scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ops() {
        let a = Point64::from_xy(1.0, 2.0);
        let b = Point64::from_xy(3.0, 5.0);
        assert_eq!(a + b, Point64::from_xy(4.0, 7.0));
        assert_eq!(b - a, Point64::from_xy(2.0, 3.0));
        assert_eq!(-a, Point64::from_xy(-1.0, -2.0));
        assert_eq!(a * 2.0, Point64::from_xy(2.0, 4.0));
        assert_eq!(a.dot(b), 13.0);
        assert_eq!(a.cross(b), -1.0);
        assert_eq!(Point64::from_xy(3.0, 4.0).length(), 5.0);
    }

    #[test]
    fn approximately_equal() {
        let a = Point64::from_xy(100.0, 100.0);
        assert!(a.approximately_equal(Point64::from_xy(100.0, 100.0 + 1e-9)));
        assert!(a.approximately_equal(Point64::from_xy(100.000_01, 100.0)));
        assert!(!a.approximately_equal(Point64::from_xy(100.01, 100.0)));
        assert!(a.roughly_equal(Point64::from_xy(100.000_5, 100.0)));
        assert!(!a.roughly_equal(Point64::from_xy(100.1, 100.0)));
    }
}
