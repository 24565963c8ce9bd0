// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use thiserror::Error;

/// Errors that can occur while intersecting contours.
#[derive(Error, Clone, Copy, PartialEq, Debug)]
#[non_exhaustive]
pub enum IntersectError {
    /// A segment has a NaN or an infinite coordinate.
    ///
    /// `PathBuilder::finish` already rejects such paths, so this is only
    /// reachable when a `Path` is produced some other way.
    #[error("segment {segment} of contour {contour} has a non-finite coordinate")]
    NonFinite {
        /// Index of the contour in the input order.
        contour: usize,
        /// Index of the segment inside the contour.
        segment: usize,
    },

    /// An intersection record ran out of room.
    #[error("too many intersections between two segments")]
    TooManyIntersections,

    /// Curve clipping hit its call budget before converging.
    ///
    /// Only reported when `IntersectOptions::strict_clip_limit` is set.
    #[error("curve clipping did not converge within {0} steps")]
    ClipLimitReached(usize),
}
