// Copyright 2012 Google Inc.
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use arrayvec::ArrayVec;

use crate::path64::point64::Point64;
use crate::path64::Scalar64;
use crate::IntersectError;

/// The maximum number of intersections a single curve pair can produce.
pub const MAX_INTERSECTIONS: usize = 13;

/// A single intersection between two curves.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Intersection {
    /// Parameters on the first and the second curve.
    pub t: [f64; 2],
    /// The intersection point.
    pub point: Point64,
}

/// An ordered set of intersections between two curves.
///
/// Entries are sorted by the parameter on the first curve. A set bit in the
/// coincident mask means that the entry starts or ends a coincident run.
#[derive(Clone, Debug)]
pub struct Intersections {
    entries: ArrayVec<Intersection, MAX_INTERSECTIONS>,
    coincident: u16,
    nearly_same: [bool; 2],
    near_points: [Point64; 2],
    max: usize,
    allow_near: bool,
    swapped: bool,
}

impl Default for Intersections {
    fn default() -> Self {
        Intersections {
            entries: ArrayVec::new(),
            coincident: 0,
            nearly_same: [false; 2],
            near_points: [Point64::zero(); 2],
            max: MAX_INTERSECTIONS,
            allow_near: true,
            swapped: false,
        }
    }
}

impl Intersections {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears everything except the `allow_near` flag.
    pub fn reset(&mut self) {
        let allow_near = self.allow_near;
        *self = Intersections::default();
        self.allow_near = allow_near;
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks that there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Limits the number of entries. Values above the capacity are ignored.
    pub fn set_max(&mut self, max: usize) {
        self.max = max.min(MAX_INTERSECTIONS);
    }

    /// Returns the entry limit.
    pub fn max(&self) -> usize {
        self.max
    }

    /// Allows near hits (a few ULPs away) to count as intersections.
    pub fn set_allow_near(&mut self, allow: bool) {
        self.allow_near = allow;
    }

    /// Checks that near end point hits are accepted.
    pub fn allow_near(&self) -> bool {
        self.allow_near
    }

    /// Toggles the order of parameters used by `insert_swap`.
    pub fn swap(&mut self) {
        self.swapped = !self.swapped;
    }

    /// Checks that the curves were passed in reverse order.
    pub fn is_swapped(&self) -> bool {
        self.swapped
    }

    /// Returns an iterator over the entries.
    pub fn iter(&self) -> core::slice::Iter<Intersection> {
        self.entries.iter()
    }

    /// Returns the entries.
    pub fn as_slice(&self) -> &[Intersection] {
        &self.entries
    }

    /// Returns the parameter on curve `side` (0 or 1) of entry `index`.
    pub fn t(&self, side: usize, index: usize) -> f64 {
        self.entries[index].t[side]
    }

    /// Returns the point of an entry.
    pub fn point(&self, index: usize) -> Point64 {
        self.entries[index].point
    }

    /// Inserts an intersection, keeping the entries sorted.
    ///
    /// Returns the index of the new entry, or `None` when the intersection
    /// is already present, or is within a coincident run, or is close to
    /// an existing one that is a better fit.
    pub fn insert(&mut self, one: f64, two: f64, pt: Point64) -> Result<Option<usize>, IntersectError> {
        if self.coincident == 0b11
            && self.entries.len() >= 2
            && one.between(self.entries[0].t[0], self.entries[1].t[0])
        {
            // don't allow a mix of coincident and non-coincident intersections
            return Ok(None);
        }

        for index in 0..self.entries.len() {
            let old = self.entries[index].t;
            if one == old[0] && two == old[1] {
                return Ok(None);
            }

            if old[0].more_roughly_equal(one) && old[1].more_roughly_equal(two) {
                if (!one.precisely_zero() || old[0].precisely_zero())
                    && (!one.precisely_equal(1.0) || old[0].precisely_equal(1.0))
                    && (!two.precisely_zero() || old[1].precisely_zero())
                    && (!two.precisely_equal(1.0) || old[1].precisely_equal(1.0))
                {
                    return Ok(None);
                }

                // an end point replaces the nearby interior one; reinserted
                // below in case it changes the order
                self.entries.remove(index);
                self.coincident = remove_bit(self.coincident, index);
                break;
            }
        }

        let index = self
            .entries
            .iter()
            .position(|e| e.t[0] > one)
            .unwrap_or(self.entries.len());

        if self.entries.len() >= self.max {
            return Err(IntersectError::TooManyIntersections);
        }

        self.entries
            .try_insert(
                index,
                Intersection {
                    t: [one, two],
                    point: pt,
                },
            )
            .map_err(|_| IntersectError::TooManyIntersections)?;
        self.coincident = insert_bit(self.coincident, index);
        Ok(Some(index))
    }

    /// Inserts an end point to end point intersection, whose points are
    /// nearly but not exactly the same.
    ///
    /// `pt1` is recorded as the intersection point and `pt2` is remembered
    /// as the matching point on the other curve.
    pub fn insert_near(
        &mut self,
        one: f64,
        two: f64,
        pt1: Point64,
        pt2: Point64,
    ) -> Result<Option<usize>, IntersectError> {
        debug_assert!(one.zero_or_one() && two.zero_or_one());
        let end = if one != 0.0 { 1 } else { 0 };
        self.nearly_same[end] = true;
        let index = self.insert(one, two, pt1)?;
        self.near_points[end] = pt2;
        Ok(index)
    }

    /// Inserts with the parameters swapped when `swap` was called.
    pub fn insert_swap(&mut self, one: f64, two: f64, pt: Point64) -> Result<Option<usize>, IntersectError> {
        if self.swapped {
            self.insert(two, one, pt)
        } else {
            self.insert(one, two, pt)
        }
    }

    /// Inserts an entry that starts or ends a coincident run.
    ///
    /// An existing entry at (nearly) the same parameters is marked instead.
    pub fn insert_coincident(
        &mut self,
        one: f64,
        two: f64,
        pt: Point64,
    ) -> Result<Option<usize>, IntersectError> {
        let (one, two) = if self.swapped { (two, one) } else { (one, two) };
        let index = match self.insert(one, two, pt)? {
            Some(index) => Some(index),
            None => self
                .entries
                .iter()
                .position(|e| e.t[0].more_roughly_equal(one) && e.t[1].more_roughly_equal(two)),
        };

        if let Some(index) = index {
            self.set_coincident(index);
        }

        Ok(index)
    }

    /// Whether the end point `end` (0 or 1) was matched by `insert_near`.
    pub fn nearly_same(&self, end: usize) -> bool {
        self.nearly_same[end]
    }

    /// The point on the other curve remembered by `insert_near`.
    pub fn near_point(&self, end: usize) -> Point64 {
        self.near_points[end]
    }

    /// Marks an entry as a coincident run end.
    pub fn set_coincident(&mut self, index: usize) {
        debug_assert!(index < self.entries.len());
        self.coincident |= 1 << index;
    }

    /// Checks that an entry is a coincident run end.
    pub fn is_coincident(&self, index: usize) -> bool {
        self.coincident & (1 << index) != 0
    }

    /// Unmarks an entry.
    pub fn clear_coincidence(&mut self, index: usize) {
        self.coincident &= !(1 << index);
    }

    /// The number of entries that start or end a coincident run.
    pub fn coincident_used(&self) -> usize {
        self.coincident.count_ones() as usize
    }

    /// Removes an entry and its coincident bit.
    pub fn remove_one(&mut self, index: usize) {
        if index >= self.entries.len() {
            return;
        }

        self.entries.remove(index);
        self.coincident = remove_bit(self.coincident, index);
    }

    /// Reverses the direction of the second curve.
    pub fn flip(&mut self) {
        for e in &mut self.entries {
            e.t[1] = 1.0 - e.t[1];
        }
    }

    /// Swaps the two curves.
    pub fn swap_pts(&mut self) {
        let mut tagged: ArrayVec<(Intersection, bool), MAX_INTERSECTIONS> = ArrayVec::new();
        for (i, e) in self.entries.iter().enumerate() {
            let swapped = Intersection {
                t: [e.t[1], e.t[0]],
                point: e.point,
            };
            tagged.push((swapped, self.is_coincident(i)));
        }

        tagged.sort_by(|a, b| crate::path64::cmp_f64(&a.0.t[0], &b.0.t[0]));

        self.entries.clear();
        self.coincident = 0;
        for (i, (e, coin)) in tagged.into_iter().enumerate() {
            self.entries.push(e);
            if coin {
                self.coincident |= 1 << i;
            }
        }
    }

    /// Leaves at most the two extreme entries of a line/line result.
    ///
    /// When the lines are not parallel and the two remaining entries don't
    /// both sit on end points, the redundant one is dropped. Two entries left
    /// afterwards describe a coincident run.
    pub fn clean_up_parallel_lines(&mut self, parallel: bool) {
        while self.entries.len() > 2 {
            self.remove_one(1);
        }

        if self.entries.len() == 2 && !parallel {
            let start_match = self.t(0, 0) == 0.0 || self.t(1, 0).zero_or_one();
            let end_match = self.t(0, 1) == 1.0 || self.t(1, 1).zero_or_one();
            if (!start_match && !end_match) || self.t(0, 0).approximately_equal(self.t(0, 1)) {
                if start_match
                    && end_match
                    && (self.t(0, 0) != 0.0 || !self.t(1, 0).zero_or_one())
                    && self.t(0, 1) == 1.0
                    && self.t(1, 1).zero_or_one()
                {
                    self.remove_one(0);
                } else {
                    self.remove_one(usize::from(end_match));
                }
            }
        }

        if self.entries.len() == 2 {
            self.coincident = 0b11;
        }
    }

    /// Checks that some entry has `t` as the parameter on the first curve.
    pub fn has_t(&self, t: f64) -> bool {
        self.entries.iter().any(|e| e.t[0] == t)
    }

    /// Checks that some entry has `t` as the parameter on the second curve.
    pub fn has_opp_t(&self, t: f64) -> bool {
        self.entries.iter().any(|e| e.t[1] == t)
    }

    /// The smallest parameter on curve `side`.
    pub fn least_t(&self, side: usize) -> Option<f64> {
        self.entries.iter().map(|e| e.t[side]).fold(None, |acc, t| match acc {
            Some(m) if m <= t => Some(m),
            _ => Some(t),
        })
    }

    /// The largest parameter on curve `side`.
    pub fn most_t(&self, side: usize) -> Option<f64> {
        self.entries.iter().map(|e| e.t[side]).fold(None, |acc, t| match acc {
            Some(m) if m >= t => Some(m),
            _ => Some(t),
        })
    }
}

// Inserts a zero bit at `index`, moving the higher bits up.
fn insert_bit(mask: u16, index: usize) -> u16 {
    let low = mask & ((1 << index) - 1);
    let high = mask & !((1 << index) - 1);
    low | (high << 1)
}

// Removes the bit at `index`, moving the higher bits down.
fn remove_bit(mask: u16, index: usize) -> u16 {
    let low = mask & ((1 << index) - 1);
    low | ((mask >> (index + 1)) << index)
}
