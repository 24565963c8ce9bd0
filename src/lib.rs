// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

/*!
`tiny-skia-pathops` is the intersection part of [Skia](https://skia.org/) path ops ported to Rust.

It splits [`tiny_skia_path::Path`]s into contours, finds every intersection between
their segments and records coincident runs. Boolean operations can then be
built on top of the per-segment spans.

All computations are done in double precision.
*/

#![warn(unsafe_code)]
#![warn(missing_docs)]
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![allow(clippy::collapsible_if)]
#![allow(clippy::comparison_chain)]
#![allow(clippy::excessive_precision)]
#![allow(clippy::float_cmp)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::manual_range_contains)]
#![allow(clippy::needless_range_loop)]
#![allow(clippy::neg_cmp_op_on_partial_ord)]
#![allow(clippy::too_many_arguments)]

mod add_intersections;
mod coincidence;
mod contour;
mod curve_clip;
pub mod curve_intersections;
mod error;
mod floating_point;
mod intersections;
pub mod line_curve_intersections;
pub mod line_intersections;
mod options;
mod path64;
mod segment;
mod validate;

pub use tiny_skia_path::{Path, PathBuilder, PathSegment, Rect};

pub use add_intersections::{add_intersect_ts, find_intersections, ContourSet};
pub use coincidence::{CoinSpan, Coincidence, CoincidentPair};
pub use contour::{sort_contours, Contour, ContourBuilder};
pub use error::IntersectError;
pub use intersections::{Intersection, Intersections, MAX_INTERSECTIONS};
pub use options::IntersectOptions;
pub use path64::cubic64::{Cubic64, Cubic64Pair};
pub use path64::curve64::{Curve64, Verb};
pub use path64::line64::Line64;
pub use path64::point64::Point64;
pub use path64::quad64::Quad64;
pub use path64::rect64::Rect64;
pub use path64::{cube_root, pin_t, Scalar64};
pub use segment::{Segment, SegmentType, Span, SpanRef};
