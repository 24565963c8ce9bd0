// Copyright 2012 Google Inc.
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use tiny_skia_path::{Path, PathSegment, Point};

use crate::path64::cubic64::Cubic64;
use crate::path64::curve64::Curve64;
use crate::path64::line64::Line64;
use crate::path64::point64::Point64;
use crate::path64::quad64::Quad64;
use crate::path64::rect64::Rect64;
use crate::segment::Segment;
use crate::IntersectError;

/// A sequence of connected segments.
#[derive(Clone, PartialEq, Debug)]
pub struct Contour {
    id: usize,
    segments: Vec<Segment>,
    bounds: Rect64,
    top_segment: usize,
    contains_curves: bool,
    check_multiple: bool,
    closed: bool,
}

impl Contour {
    /// Creates a contour from connected segments.
    ///
    /// Returns `None` when there are no segments.
    pub fn new(id: usize, segments: Vec<Segment>, closed: bool) -> Option<Self> {
        let (first, rest) = segments.split_first()?;
        let mut bounds = first.bounds();
        let mut top_segment = 0;
        for (index, segment) in rest.iter().enumerate() {
            let b = segment.bounds();
            let top = segments[top_segment].bounds();
            if b.top < top.top || (b.top == top.top && b.left < top.left) {
                top_segment = index + 1;
            }

            bounds = bounds.union(&b);
        }

        let contains_curves = segments.iter().any(|s| !matches!(s.curve(), Curve64::Line(_)));

        Some(Contour {
            id,
            segments,
            bounds,
            top_segment,
            contains_curves,
            check_multiple: false,
            closed,
        })
    }

    /// Returns the contour id.
    ///
    /// Span references use it to address the contour.
    pub fn id(&self) -> usize {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: usize) {
        self.id = id;
    }

    /// Returns the segments in path order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub(crate) fn segments_mut(&mut self) -> &mut [Segment] {
        &mut self.segments
    }

    /// Returns the union of the segment bounds.
    pub fn bounds(&self) -> Rect64 {
        self.bounds
    }

    /// Returns the index of the segment with the topmost, then leftmost, bounds.
    pub fn top_segment(&self) -> usize {
        self.top_segment
    }

    /// Checks that the contour has at least one quad or cubic.
    pub fn contains_curves(&self) -> bool {
        self.contains_curves
    }

    /// Checks that some span of this contour meets more than one other span.
    pub fn check_multiple(&self) -> bool {
        self.check_multiple
    }

    pub(crate) fn set_check_multiple(&mut self) {
        self.check_multiple = true;
    }

    /// Checks that the contour was explicitly closed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

/// Orders contours by their bounds: top first, then left.
pub fn sort_contours(contours: &mut [Contour]) {
    contours.sort_by(|a, b| {
        crate::path64::cmp_f64(&a.bounds.top, &b.bounds.top)
            .then_with(|| crate::path64::cmp_f64(&a.bounds.left, &b.bounds.left))
    });
}

/// Splits paths into contours.
#[derive(Default, Debug)]
pub struct ContourBuilder {
    contours: Vec<Contour>,
    segments: Vec<Segment>,
    first: Option<Point64>,
    last: Option<Point64>,
    contour_index: usize,
}

impl ContourBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        ContourBuilder::default()
    }

    /// Adds every sub-path of a path as a contour.
    ///
    /// Zero-length segments are skipped. An explicitly closed sub-path whose
    /// last point differs from the first one gets a closing line.
    pub fn push_path(&mut self, path: &Path) -> Result<(), IntersectError> {
        for segment in path.segments() {
            match segment {
                PathSegment::MoveTo(p) => {
                    self.finish_contour(false);
                    let p = self.convert(p)?;
                    self.first = Some(p);
                    self.last = Some(p);
                }
                PathSegment::LineTo(p) => {
                    let p1 = self.convert(p)?;
                    let p0 = self.last.unwrap_or_else(Point64::zero);
                    self.push_curve(Line64::new(p0, p1).into());
                    self.last = Some(p1);
                }
                PathSegment::QuadTo(p1, p2) => {
                    let p1 = self.convert(p1)?;
                    let p2 = self.convert(p2)?;
                    let p0 = self.last.unwrap_or_else(Point64::zero);
                    self.push_curve(Quad64::new([p0, p1, p2]).into());
                    self.last = Some(p2);
                }
                PathSegment::CubicTo(p1, p2, p3) => {
                    let p1 = self.convert(p1)?;
                    let p2 = self.convert(p2)?;
                    let p3 = self.convert(p3)?;
                    let p0 = self.last.unwrap_or_else(Point64::zero);
                    self.push_curve(Cubic64::new([p0, p1, p2, p3]).into());
                    self.last = Some(p3);
                }
                PathSegment::Close => {
                    self.finish_contour(true);
                }
            }
        }

        self.finish_contour(false);
        Ok(())
    }

    /// Returns the built contours in input order.
    pub fn finish(mut self) -> Vec<Contour> {
        self.finish_contour(false);
        self.contours
    }

    fn convert(&self, p: Point) -> Result<Point64, IntersectError> {
        let p = Point64::from_point(p);
        if p.is_finite() {
            Ok(p)
        } else {
            Err(IntersectError::NonFinite {
                contour: self.contour_index,
                segment: self.segments.len(),
            })
        }
    }

    fn push_curve(&mut self, curve: Curve64) {
        let points = curve.points();
        if points.iter().all(|p| *p == points[0]) {
            log::warn!(
                "skipped a zero-length segment in contour {}",
                self.contour_index
            );
            return;
        }

        let index = self.segments.len();
        self.segments.push(Segment::new(curve, index));
    }

    fn finish_contour(&mut self, close: bool) {
        if close {
            if let (Some(first), Some(last)) = (self.first, self.last) {
                if first != last {
                    self.push_curve(Line64::new(last, first).into());
                }
            }
        }

        if self.first.is_none() && self.segments.is_empty() {
            return;
        }

        let segments = core::mem::take(&mut self.segments);
        let count = segments.len();
        if let Some(contour) = Contour::new(self.contour_index, segments, close) {
            log::debug!(
                "contour {} with {} segments",
                self.contour_index,
                count
            );
            self.contours.push(contour);
        }

        self.contour_index += 1;
        self.first = None;
        self.last = None;
    }
}
