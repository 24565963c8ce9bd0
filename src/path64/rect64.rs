// Copyright 2012 Google Inc.
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use super::point64::Point64;

/// A double precision bounding box.
///
/// Unlike `tiny_skia_path::Rect`, can be empty or zero-sized:
/// bounds of a horizontal line have no height.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Rect64 {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Right edge.
    pub right: f64,
    /// Bottom edge.
    pub bottom: f64,
}

impl Rect64 {
    /// Creates a rect from edges. The edges are not sorted.
    pub fn from_ltrb(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Rect64 {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Creates a rect that contains a single point.
    pub fn from_point(p: Point64) -> Self {
        Rect64::from_ltrb(p.x, p.y, p.x, p.y)
    }

    /// Creates the smallest rect that contains all points.
    ///
    /// Returns `None` for an empty slice.
    pub fn from_points(points: &[Point64]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut rect = Rect64::from_point(*first);
        for p in rest {
            rect.add(*p);
        }

        Some(rect)
    }

    /// Grows the rect to include a point.
    pub fn add(&mut self, p: Point64) {
        self.left = self.left.min(p.x);
        self.top = self.top.min(p.y);
        self.right = self.right.max(p.x);
        self.bottom = self.bottom.max(p.y);
    }

    /// Returns a rect that contains both rects.
    pub fn union(&self, other: &Rect64) -> Self {
        Rect64::from_ltrb(
            self.left.min(other.left),
            self.top.min(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
        )
    }

    /// Checks for an overlap. Touching edges and corners count.
    pub fn intersects(&self, other: &Rect64) -> bool {
        self.left <= other.right
            && other.left <= self.right
            && self.top <= other.bottom
            && other.top <= self.bottom
    }

    /// Returns `right - left`.
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Returns `bottom - top`.
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_rects_intersect() {
        let a = Rect64::from_ltrb(0.0, 0.0, 10.0, 10.0);
        let b = Rect64::from_ltrb(10.0, 10.0, 20.0, 20.0);
        let c = Rect64::from_ltrb(10.5, 0.0, 20.0, 10.0);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn zero_height() {
        let r = Rect64::from_points(&[Point64::from_xy(5.0, 1.0), Point64::from_xy(-5.0, 1.0)])
            .unwrap();
        assert_eq!(r, Rect64::from_ltrb(-5.0, 1.0, 5.0, 1.0));
        assert_eq!(r.height(), 0.0);
        assert!(r.intersects(&Rect64::from_ltrb(0.0, 0.0, 1.0, 5.0)));
    }
}
