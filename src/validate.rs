// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Internal consistency checks.
//!
//! Compiled in only with the `debug-validate` feature.

use crate::coincidence::Coincidence;
use crate::contour::Contour;
use crate::intersections::Intersections;

cfg_if::cfg_if! {
    if #[cfg(feature = "debug-validate")] {
        use crate::path64::Scalar64;

        pub(crate) fn contour(contour: &Contour) {
            for segment in contour.segments() {
                let spans = segment.spans();
                debug_assert!(spans.len() >= 2);
                debug_assert_eq!(spans.first().map(|s| s.t), Some(0.0));
                debug_assert_eq!(spans.last().map(|s| s.t), Some(1.0));
                debug_assert!(spans.windows(2).all(|w| w[0].t < w[1].t));
                for span in spans {
                    debug_assert!(span.opps.iter().all(|o| o.t.between(0.0, 1.0)));
                }
            }
        }

        pub(crate) fn intersections(i: &Intersections) {
            debug_assert!(i.len() <= i.max());
            debug_assert!(i.iter().zip(i.iter().skip(1)).all(|(a, b)| a.t[0] <= b.t[0]));
            debug_assert!((i.len()..16).all(|bit| !i.is_coincident(bit)));
        }

        pub(crate) fn coincidence(coincidence: &Coincidence) {
            for pair in coincidence.iter() {
                debug_assert!(pair.coin.start_t <= pair.coin.end_t);
                debug_assert!(pair.coin.start_t.between(0.0, 1.0));
                debug_assert!(pair.coin.end_t.between(0.0, 1.0));
                debug_assert_eq!(pair.flipped, pair.opp.start_t > pair.opp.end_t);
            }
        }
    } else {
        pub(crate) fn contour(_: &Contour) {}
        pub(crate) fn intersections(_: &Intersections) {}
        pub(crate) fn coincidence(_: &Coincidence) {}
    }
}
