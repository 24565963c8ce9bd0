// Copyright 2012 Google Inc.
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Double precision geometry used by the intersection code.

use tiny_skia_path::SCALAR_MAX;

use crate::floating_point;

pub mod cubic64;
pub mod curve64;
pub mod line64;
pub mod point64;
pub mod quad64;
pub mod rect64;

// The code below is from SkPathOpsTypes.

pub(crate) const FLT_EPSILON: f64 = f32::EPSILON as f64;
const FLT_EPSILON_HALF: f64 = FLT_EPSILON / 2.0;
const FLT_EPSILON_CUBED: f64 = FLT_EPSILON * FLT_EPSILON * FLT_EPSILON;
const FLT_EPSILON_INVERSE: f64 = 1.0 / FLT_EPSILON;
const DBL_EPSILON_ERR: f64 = f64::EPSILON * 4.0;
const ROUGH_EPSILON: f64 = FLT_EPSILON * 64.0;
const MORE_ROUGH_EPSILON: f64 = FLT_EPSILON * 256.0;

/// Tolerance predicates for `f64`.
///
/// The tolerances are tuned for values that came from `f32` path data:
/// `approximately_*` are within a float epsilon, `precisely_*` are within a
/// few double epsilons, `roughly_*` are looser still.
pub trait Scalar64 {
    /// Works just like `SkTPin`, returning `max` for NaN/inf.
    fn bound(self, min: Self, max: Self) -> Self;
    /// Returns true if `(a <= self <= b) || (a >= self >= b)`.
    fn between(self, a: f64, b: f64) -> bool;
    /// Checks against a few double precision epsilons.
    fn precisely_zero(self) -> bool;
    /// Checks that the difference is `precisely_zero`.
    fn precisely_equal(self, other: Self) -> bool;
    /// Checks against the single precision epsilon.
    fn approximately_zero(self) -> bool;
    /// Checks that `self` is not noticeably negative.
    fn approximately_zero_or_more(self) -> bool;
    /// Checks that `self` is not noticeably above one.
    fn approximately_one_or_less(self) -> bool;
    /// Checks that `self` is below the single precision epsilon.
    fn approximately_less_than_zero(self) -> bool;
    /// Checks that `self` is above one minus the single precision epsilon.
    fn approximately_greater_than_one(self) -> bool;
    /// Checks that `1 / self` would be approximately zero.
    fn approximately_zero_inverse(self) -> bool;
    /// Checks against the cubed single precision epsilon.
    fn approximately_zero_cubed(self) -> bool;
    /// Checks against half of the single precision epsilon.
    fn approximately_zero_half(self) -> bool;
    /// Returns true when `self` is negligible next to `other`.
    fn approximately_zero_when_compared_to(self, other: Self) -> bool;
    /// Use this for comparing Ts in the range of 0 to 1. For general numbers
    /// (larger and smaller) use `almost_dequal_ulps` instead.
    fn approximately_equal(self, other: Self) -> bool;
    /// Compares within half of the single precision epsilon.
    fn approximately_equal_half(self, other: Self) -> bool;
    /// Compares within 64 single precision epsilons.
    fn roughly_equal(self, other: Self) -> bool;
    /// Compares within 256 single precision epsilons.
    fn more_roughly_equal(self, other: Self) -> bool;
    /// Compares two values within 16 single precision ULPs.
    fn almost_dequal_ulps(self, other: Self) -> bool;
    /// Compares two values within 256 single precision ULPs.
    fn roughly_equal_ulps(self, other: Self) -> bool;
    /// Returns true for exactly 0 or 1.
    fn zero_or_one(self) -> bool;
}

impl Scalar64 for f64 {
    fn bound(self, min: Self, max: Self) -> Self {
        max.min(self).max(min)
    }

    fn between(self, a: f64, b: f64) -> bool {
        debug_assert!(
            ((a <= self && self <= b) || (a >= self && self >= b))
                == ((a - self) * (b - self) <= 0.0)
                || (a.precisely_zero() && self.precisely_zero() && b.precisely_zero())
                || !(a - self).is_finite()
                || !(b - self).is_finite()
        );

        (a - self) * (b - self) <= 0.0
    }

    fn precisely_zero(self) -> bool {
        self.abs() < DBL_EPSILON_ERR
    }

    fn precisely_equal(self, other: Self) -> bool {
        (self - other).precisely_zero()
    }

    fn approximately_zero(self) -> bool {
        self.abs() < FLT_EPSILON
    }

    fn approximately_zero_or_more(self) -> bool {
        self > -FLT_EPSILON
    }

    fn approximately_one_or_less(self) -> bool {
        self < 1.0 + FLT_EPSILON
    }

    fn approximately_less_than_zero(self) -> bool {
        self < FLT_EPSILON
    }

    fn approximately_greater_than_one(self) -> bool {
        self > 1.0 - FLT_EPSILON
    }

    fn approximately_zero_inverse(self) -> bool {
        self.abs() > FLT_EPSILON_INVERSE
    }

    fn approximately_zero_cubed(self) -> bool {
        self.abs() < FLT_EPSILON_CUBED
    }

    fn approximately_zero_half(self) -> bool {
        self.abs() < FLT_EPSILON_HALF
    }

    fn approximately_zero_when_compared_to(self, other: Self) -> bool {
        self == 0.0 || self.abs() < (other * FLT_EPSILON).abs()
    }

    fn approximately_equal(self, other: Self) -> bool {
        (self - other).approximately_zero()
    }

    fn approximately_equal_half(self, other: Self) -> bool {
        (self - other).approximately_zero_half()
    }

    fn roughly_equal(self, other: Self) -> bool {
        (self - other).abs() < ROUGH_EPSILON
    }

    fn more_roughly_equal(self, other: Self) -> bool {
        (self - other).abs() < MORE_ROUGH_EPSILON
    }

    fn almost_dequal_ulps(self, other: Self) -> bool {
        if self.abs() < SCALAR_MAX as f64 && other.abs() < SCALAR_MAX as f64 {
            floating_point::almost_dequal_ulps_f32(self as f32, other as f32)
        } else {
            (self - other).abs() / self.abs().max(other.abs()) < FLT_EPSILON * 16.0
        }
    }

    fn roughly_equal_ulps(self, other: Self) -> bool {
        floating_point::roughly_equal_ulps(self, other)
    }

    fn zero_or_one(self) -> bool {
        self == 0.0 || self == 1.0
    }
}

/// Clamps a parameter to the 0..=1 range.
pub fn pin_t(t: f64) -> f64 {
    if t < 0.0 {
        0.0
    } else if t > 1.0 {
        1.0
    } else {
        t
    }
}

/// Returns the real cube root, keeping the sign.
pub fn cube_root(x: f64) -> f64 {
    if x.approximately_zero_cubed() {
        return 0.0;
    }

    let result = halley_cbrt3d(x.abs());
    if x < 0.0 {
        -result
    } else {
        result
    }
}

// cube root approximation using 3 iterations of Halley's method (double)
fn halley_cbrt3d(d: f64) -> f64 {
    let mut a = cbrt_5d(d);
    a = cbrta_halleyd(a, d);
    a = cbrta_halleyd(a, d);
    cbrta_halleyd(a, d)
}

// cube root approximation using bit hack for 64-bit float
// adapted from Kahan's cbrt
fn cbrt_5d(d: f64) -> f64 {
    let b1 = 715094163;
    let mut t: f64 = 0.0;
    let pt: &mut [u32; 2] = bytemuck::cast_mut(&mut t);
    let px: [u32; 2] = bytemuck::cast(d);
    pt[1] = px[1] / 3 + b1;
    t
}

// iterative cube root approximation using Halley's method (double)
fn cbrta_halleyd(a: f64, r: f64) -> f64 {
    let a3 = a * a * a;
    a * (a3 + r + r) / (a3 + a3 + r)
}

pub(crate) fn interp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

// Skia doesn't seems to care about NaN/inf during sorting, so we don't too.
pub(crate) fn cmp_f64(a: &f64, b: &f64) -> core::cmp::Ordering {
    if a < b {
        core::cmp::Ordering::Less
    } else if a > b {
        core::cmp::Ordering::Greater
    } else {
        core::cmp::Ordering::Equal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_roots() {
        assert!((cube_root(27.0) - 3.0).abs() < 1e-12);
        assert!((cube_root(-8.0) + 2.0).abs() < 1e-12);
        assert!((cube_root(0.001) - 0.1).abs() < 1e-12);
        assert_eq!(cube_root(0.0), 0.0);
    }

    #[test]
    fn tolerances() {
        assert!(1e-8_f64.approximately_zero());
        assert!(!1e-6_f64.approximately_zero());
        assert!(1e-16_f64.precisely_zero());
        assert!(!1e-8_f64.precisely_zero());
        assert!(0.5_f64.approximately_equal(0.5 + 1e-8));
        assert!(0.5_f64.more_roughly_equal(0.5 + 1e-5));
        assert!(!0.5_f64.roughly_equal(0.5 + 1e-5));
        assert!(1.0_f64.almost_dequal_ulps(1.0 + 1e-7));
        assert!(!1.0_f64.almost_dequal_ulps(1.0001));
        assert!(0.5_f64.between(0.0, 1.0));
        assert!(0.5_f64.between(1.0, 0.0));
        assert!(!1.5_f64.between(0.0, 1.0));
        assert!(1e-8_f64.approximately_less_than_zero());
        assert!(!0.1_f64.approximately_less_than_zero());
        assert!((1.0 - 1e-8_f64).approximately_greater_than_one());
        assert!(!0.9_f64.approximately_greater_than_one());
        assert_eq!(f64::NAN.bound(0.0, 1.0), 1.0);
        assert_eq!(pin_t(-0.1), 0.0);
        assert_eq!(pin_t(1.1), 1.0);
    }
}
