// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

/// Intersection finding options.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct IntersectOptions {
    /// Treats points that are a few ULPs away from a curve as lying on it.
    ///
    /// Default: true
    pub allow_near: bool,

    /// Tests segments of a contour against each other and finds
    /// cubic self-intersections.
    ///
    /// Default: true
    pub check_self: bool,

    /// Fails with `IntersectError::ClipLimitReached` instead of keeping
    /// the intersections found so far when the clipping budget is exhausted.
    ///
    /// Default: false
    pub strict_clip_limit: bool,

    /// The maximum number of clipping steps per curve pair.
    ///
    /// Default: 4096
    pub max_clip_calls: usize,
}

impl Default for IntersectOptions {
    fn default() -> Self {
        IntersectOptions {
            allow_near: true,
            check_self: true,
            strict_clip_limit: false,
            max_clip_calls: 4096,
        }
    }
}
