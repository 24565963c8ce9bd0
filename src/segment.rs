// Copyright 2012 Google Inc.
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::path64::curve64::{Curve64, Verb};
use crate::path64::point64::Point64;
use crate::path64::rect64::Rect64;
use crate::path64::{pin_t, Scalar64};

/// A reference to a span on another segment.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanRef {
    /// The contour id.
    pub contour: usize,
    /// The segment index inside the contour.
    pub segment: usize,
    /// The parameter of the referenced span.
    pub t: f64,
}

/// A parameter on a segment where an intersection or an end lies.
#[derive(Clone, PartialEq, Debug)]
pub struct Span {
    /// The parameter in 0..=1.
    pub t: f64,
    /// The point at `t`.
    pub point: Point64,
    /// Spans of other segments at the same point.
    pub opps: Vec<SpanRef>,
    /// The span lies inside a coincident run.
    pub coincident: bool,
    /// The span is a cubic self-intersection.
    pub is_loop: bool,
}

impl Span {
    fn new(t: f64, point: Point64) -> Self {
        Span {
            t,
            point,
            opps: Vec::new(),
            coincident: false,
            is_loop: false,
        }
    }
}

/// A segment kind used to pick an intersection solver.
#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum SegmentType {
    HorizontalLine,
    VerticalLine,
    Line,
    Quad,
    Cubic,
}

/// A single curve of a contour with its t-sorted spans.
#[derive(Clone, PartialEq, Debug)]
pub struct Segment {
    curve: Curve64,
    bounds: Rect64,
    spans: Vec<Span>,
    index: usize,
}

impl Segment {
    /// Creates a segment with spans at both ends.
    pub fn new(curve: Curve64, index: usize) -> Self {
        let mut spans = Vec::with_capacity(4);
        spans.push(Span::new(0.0, curve.start()));
        spans.push(Span::new(1.0, curve.end()));

        Segment {
            bounds: curve.bounds(),
            curve,
            spans,
            index,
        }
    }

    /// Returns the curve kind.
    pub fn verb(&self) -> Verb {
        self.curve.verb()
    }

    /// Returns the segment geometry.
    pub fn curve(&self) -> &Curve64 {
        &self.curve
    }

    /// Returns the tight bounds of the curve.
    pub fn bounds(&self) -> Rect64 {
        self.bounds
    }

    /// Returns the segment index inside its contour.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns spans sorted by t.
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub(crate) fn spans_mut(&mut self) -> &mut [Span] {
        &mut self.spans
    }

    /// Checks that the segment is a line with equal end point `y`.
    pub fn is_horizontal(&self) -> bool {
        match self.curve {
            Curve64::Line(ref line) => line.points[0].y == line.points[1].y,
            _ => false,
        }
    }

    /// Checks that the segment is a line with equal end point `x`.
    pub fn is_vertical(&self) -> bool {
        match self.curve {
            Curve64::Line(ref line) => line.points[0].x == line.points[1].x,
            _ => false,
        }
    }

    /// Classifies the segment for solver dispatch.
    pub fn segment_type(&self) -> SegmentType {
        match self.curve {
            Curve64::Line(_) if self.is_horizontal() => SegmentType::HorizontalLine,
            Curve64::Line(_) if self.is_vertical() => SegmentType::VerticalLine,
            Curve64::Line(_) => SegmentType::Line,
            Curve64::Quad(_) => SegmentType::Quad,
            Curve64::Cubic(_) => SegmentType::Cubic,
        }
    }

    /// Adds a span and returns its index.
    ///
    /// `t` is pinned to an end when `point` is exactly that end point.
    /// An existing span is reused when it has the same `t`, or when its point
    /// is approximately `point` and the curve doesn't leave that point
    /// between the two parameters.
    pub fn add_t(&mut self, t: f64, point: Point64) -> usize {
        let t = match (point == self.curve.start(), point == self.curve.end()) {
            (true, true) => {
                if t < 0.5 {
                    0.0
                } else {
                    1.0
                }
            }
            (true, false) => 0.0,
            (false, true) => 1.0,
            (false, false) => pin_t(t),
        };

        if let Some(index) = self.spans.iter().position(|s| s.t == t) {
            return index;
        }

        let curve = &self.curve;
        let same = self.spans.iter().position(|s| {
            s.point.approximately_equal(point)
                && curve.point_at_t((s.t + t) / 2.0).approximately_equal(point)
        });
        if let Some(index) = same {
            return index;
        }

        let index = self
            .spans
            .iter()
            .position(|s| s.t > t)
            .unwrap_or(self.spans.len());
        self.spans.insert(index, Span::new(t, point));
        index
    }

    /// Links a span to a span of another segment.
    ///
    /// Returns `true` when the span now has more than one opposite span.
    pub fn link(&mut self, index: usize, opp: SpanRef) -> bool {
        let span = &mut self.spans[index];
        if !span.opps.contains(&opp) {
            span.opps.push(opp);
        }

        span.opps.len() > 1
    }

    /// Finds a span whose t is approximately `t`.
    pub fn find_t(&self, t: f64) -> Option<usize> {
        self.spans.iter().position(|s| s.t.approximately_equal(t))
    }
}
