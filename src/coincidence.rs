// Copyright 2012 Google Inc.
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Coincident runs between segments.

use crate::contour::Contour;
use crate::path64::{cmp_f64, Scalar64};
use crate::segment::Segment;

/// A parameter range of a segment.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct CoinSpan {
    /// The contour id.
    pub contour: usize,
    /// The segment index inside the contour.
    pub segment: usize,
    /// The parameter where the run starts.
    pub start_t: f64,
    /// The parameter where the run ends.
    pub end_t: f64,
}

impl CoinSpan {
    /// Creates a parameter range of a segment.
    pub fn new(contour: usize, segment: usize, start_t: f64, end_t: f64) -> Self {
        CoinSpan {
            contour,
            segment,
            start_t,
            end_t,
        }
    }

    fn key(&self) -> (usize, usize) {
        (self.contour, self.segment)
    }

    fn reversed(&self) -> Self {
        CoinSpan::new(self.contour, self.segment, self.end_t, self.start_t)
    }

    fn min_t(&self) -> f64 {
        self.start_t.min(self.end_t)
    }

    fn max_t(&self) -> f64 {
        self.start_t.max(self.end_t)
    }

    /// Checks that `t` is inside the range, ends included.
    pub fn contains(&self, t: f64) -> bool {
        t.between(self.start_t, self.end_t)
            || t.approximately_equal(self.start_t)
            || t.approximately_equal(self.end_t)
    }

    fn overlaps(&self, other: &CoinSpan) -> bool {
        self.min_t() <= other.max_t() + crate::path64::FLT_EPSILON
            && other.min_t() <= self.max_t() + crate::path64::FLT_EPSILON
    }
}

/// Two segments that share a locus over a parameter range each.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct CoincidentPair {
    /// The first range. `start_t` is always less than `end_t`.
    pub coin: CoinSpan,
    /// The matching range on the other segment.
    pub opp: CoinSpan,
    /// The ranges run in opposite directions.
    pub flipped: bool,
}

/// Recorded coincident runs.
#[derive(Clone, Default, Debug)]
pub struct Coincidence {
    pairs: Vec<CoincidentPair>,
}

impl Coincidence {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Coincidence::default()
    }

    /// Records a run.
    ///
    /// `coin.start_t` matches `opp.start_t` and `coin.end_t` matches `opp.end_t`.
    /// A run that overlaps a recorded run of the same segments is merged into it.
    pub fn add(&mut self, coin: CoinSpan, opp: CoinSpan) {
        let (mut coin, mut opp) = if coin.key() > opp.key() {
            (opp, coin)
        } else {
            (coin, opp)
        };

        if coin.start_t > coin.end_t {
            coin = coin.reversed();
            opp = opp.reversed();
        }

        let mut pair = CoincidentPair {
            coin,
            opp,
            flipped: opp.start_t > opp.end_t,
        };

        while let Some(index) = self.pairs.iter().position(|p| mergeable(p, &pair)) {
            let old = self.pairs.remove(index);
            pair = merge(&old, &pair);
        }

        log::debug!(
            "coincidence {}:{} {}..{} with {}:{} {}..{}",
            pair.coin.contour,
            pair.coin.segment,
            pair.coin.start_t,
            pair.coin.end_t,
            pair.opp.contour,
            pair.opp.segment,
            pair.opp.start_t,
            pair.opp.end_t
        );
        self.pairs.push(pair);
    }

    /// Checks that `t` of a segment is inside a run against the opposite segment.
    ///
    /// Segments are `(contour, segment)` pairs.
    pub fn contains(&self, seg: (usize, usize), opp: (usize, usize), t: f64) -> bool {
        self.pairs.iter().any(|p| {
            if p.coin.key() == seg && p.opp.key() == opp {
                p.coin.contains(t)
            } else if p.opp.key() == seg && p.coin.key() == opp {
                p.opp.contains(t)
            } else {
                false
            }
        })
    }

    /// Checks that no runs are recorded.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Returns the number of recorded runs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns an iterator over the recorded runs.
    pub fn iter(&self) -> core::slice::Iter<CoincidentPair> {
        self.pairs.iter()
    }

    /// Removes every run that refers to a segment.
    pub fn release(&mut self, contour: usize, segment: usize) {
        self.pairs
            .retain(|p| p.coin.key() != (contour, segment) && p.opp.key() != (contour, segment));
    }

    /// Moves run ends onto spans that are within tolerance of them.
    pub fn extend_to_span_ends(&mut self, contours: &[Contour]) {
        for pair in &mut self.pairs {
            for span in [&mut pair.coin, &mut pair.opp] {
                let segment = match find_segment(contours, span.contour, span.segment) {
                    Some(segment) => segment,
                    None => continue,
                };

                span.start_t = snap_t(segment, span.start_t);
                span.end_t = snap_t(segment, span.end_t);
            }
        }
    }

    /// Flags every span inside a run as coincident.
    pub fn mark(&self, contours: &mut [Contour]) {
        for pair in &self.pairs {
            for span in [&pair.coin, &pair.opp] {
                let segment = contours
                    .iter_mut()
                    .find(|c| c.id() == span.contour)
                    .and_then(|c| c.segments_mut().get_mut(span.segment));
                if let Some(segment) = segment {
                    for s in segment.spans_mut() {
                        if span.contains(s.t) {
                            s.coincident = true;
                        }
                    }
                }
            }
        }
    }
}

fn mergeable(a: &CoincidentPair, b: &CoincidentPair) -> bool {
    a.coin.key() == b.coin.key()
        && a.opp.key() == b.opp.key()
        && a.flipped == b.flipped
        && a.coin.overlaps(&b.coin)
        && a.opp.overlaps(&b.opp)
}

fn merge(a: &CoincidentPair, b: &CoincidentPair) -> CoincidentPair {
    let coin_start = a.coin.start_t.min(b.coin.start_t);
    let coin_end = a.coin.end_t.max(b.coin.end_t);
    let opp_min = a.opp.min_t().min(b.opp.min_t());
    let opp_max = a.opp.max_t().max(b.opp.max_t());
    let (opp_start, opp_end) = if a.flipped {
        (opp_max, opp_min)
    } else {
        (opp_min, opp_max)
    };

    CoincidentPair {
        coin: CoinSpan::new(a.coin.contour, a.coin.segment, coin_start, coin_end),
        opp: CoinSpan::new(a.opp.contour, a.opp.segment, opp_start, opp_end),
        flipped: a.flipped,
    }
}

fn find_segment(contours: &[Contour], contour: usize, segment: usize) -> Option<&Segment> {
    contours
        .iter()
        .find(|c| c.id() == contour)
        .and_then(|c| c.segments().get(segment))
}

// Returns the t of the span nearest to `t` when it is within tolerance.
fn snap_t(segment: &Segment, t: f64) -> f64 {
    let pt = segment.curve().point_at_t(t);
    segment
        .spans()
        .iter()
        .filter(|s| s.t.approximately_equal(t) || s.point.approximately_equal(pt))
        .map(|s| s.t)
        .min_by(|a, b| cmp_f64(&(a - t).abs(), &(b - t).abs()))
        .unwrap_or(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized() {
        let mut c = Coincidence::new();
        c.add(CoinSpan::new(1, 0, 0.8, 0.2), CoinSpan::new(0, 2, 0.1, 0.9));
        assert_eq!(c.len(), 1);
        let pair = c.iter().next().unwrap();
        assert_eq!(pair.coin, CoinSpan::new(0, 2, 0.1, 0.9));
        assert_eq!(pair.opp, CoinSpan::new(1, 0, 0.8, 0.2));
        assert!(pair.flipped);
    }

    #[test]
    fn merged() {
        let mut c = Coincidence::new();
        c.add(CoinSpan::new(0, 0, 0.0, 0.5), CoinSpan::new(1, 0, 0.5, 1.0));
        c.add(CoinSpan::new(0, 0, 0.4, 0.8), CoinSpan::new(1, 0, 0.9, 1.3));
        c.add(CoinSpan::new(0, 1, 0.4, 0.8), CoinSpan::new(1, 0, 0.9, 1.0));
        assert_eq!(c.len(), 2);
        let pair = c.iter().find(|p| p.coin.segment == 0).unwrap();
        assert_eq!(pair.coin.start_t, 0.0);
        assert_eq!(pair.coin.end_t, 0.8);
        assert_eq!(pair.opp.start_t, 0.5);
        assert_eq!(pair.opp.end_t, 1.3);
    }

    #[test]
    fn containment() {
        let mut c = Coincidence::new();
        c.add(CoinSpan::new(0, 0, 0.25, 0.75), CoinSpan::new(1, 3, 1.0, 0.0));
        assert!(c.contains((0, 0), (1, 3), 0.5));
        assert!(c.contains((1, 3), (0, 0), 0.5));
        assert!(c.contains((0, 0), (1, 3), 0.75));
        assert!(!c.contains((0, 0), (1, 3), 0.8));
        assert!(!c.contains((0, 0), (1, 2), 0.5));
    }

    #[test]
    fn released() {
        let mut c = Coincidence::new();
        c.add(CoinSpan::new(0, 0, 0.0, 1.0), CoinSpan::new(1, 0, 0.0, 1.0));
        c.add(CoinSpan::new(0, 1, 0.0, 1.0), CoinSpan::new(1, 1, 0.0, 1.0));
        c.release(1, 0);
        assert_eq!(c.len(), 1);
        c.release(0, 1);
        assert!(c.is_empty());
    }
}
