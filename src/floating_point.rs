// Copyright 2012 Google Inc.
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

// ULP based comparisons from SkPathOpsTypes.
//
// All of them operate on single precision values, since the path data
// we are dealing with comes from `f32` points. Doubles are narrowed first.

const ULPS_EPSILON: i32 = 16;
const ROUGH_ULPS_EPSILON: i32 = 256;
const ROUGH_ULPS_DENORMAL_EPSILON: i32 = 1024;

/// Return the float as a 2s compliment int. Just to be used to compare floats
/// to each other or against positive float-bit-constants (like 0). This does
/// not return the int equivalent of the float, just something cheaper for
/// compares-only.
pub fn f32_as_2s_compliment(x: f32) -> i32 {
    sign_bit_to_2s_compliment(bytemuck::cast(x))
}

/// Convert a sign-bit int (i.e. float interpreted as int) into a 2s compliement
/// int. This also converts -0 (0x80000000) to 0.
fn sign_bit_to_2s_compliment(mut x: i32) -> i32 {
    if x < 0 {
        x &= 0x7FFFFFFF;
        x = -x;
    }

    x
}

fn arguments_denormalized(a: f32, b: f32, epsilon: i32) -> bool {
    let denormalized_check = f32::EPSILON * epsilon as f32 / 2.0;
    a.abs() <= denormalized_check && b.abs() <= denormalized_check
}

fn equal_ulps(a: f32, b: f32, epsilon: i32, depsilon: i32) -> bool {
    if arguments_denormalized(a, b, depsilon) {
        return true;
    }

    let a_bits = f32_as_2s_compliment(a);
    let b_bits = f32_as_2s_compliment(b);
    // Find the difference in ULPs.
    a_bits < b_bits.saturating_add(epsilon) && b_bits < a_bits.saturating_add(epsilon)
}

fn equal_ulps_pin(a: f32, b: f32, epsilon: i32, depsilon: i32) -> bool {
    if !a.is_finite() || !b.is_finite() {
        return false;
    }

    equal_ulps(a, b, epsilon, depsilon)
}

fn d_equal_ulps(a: f32, b: f32, epsilon: i32) -> bool {
    let a_bits = f32_as_2s_compliment(a);
    let b_bits = f32_as_2s_compliment(b);
    a_bits < b_bits.saturating_add(epsilon) && b_bits < a_bits.saturating_add(epsilon)
}

fn less_or_equal_ulps(a: f32, b: f32, epsilon: i32) -> bool {
    if arguments_denormalized(a, b, epsilon) {
        return a < b + f32::EPSILON * epsilon as f32;
    }

    let a_bits = f32_as_2s_compliment(a);
    let b_bits = f32_as_2s_compliment(b);
    a_bits < b_bits.saturating_add(epsilon)
}

pub fn almost_equal_ulps(a: f64, b: f64) -> bool {
    equal_ulps(a as f32, b as f32, ULPS_EPSILON, ULPS_EPSILON)
}

pub fn almost_equal_ulps_pin(a: f64, b: f64) -> bool {
    equal_ulps_pin(a as f32, b as f32, ULPS_EPSILON, ULPS_EPSILON)
}

pub fn almost_dequal_ulps_f32(a: f32, b: f32) -> bool {
    d_equal_ulps(a, b, ULPS_EPSILON)
}

pub fn roughly_equal_ulps(a: f64, b: f64) -> bool {
    equal_ulps(
        a as f32,
        b as f32,
        ROUGH_ULPS_EPSILON,
        ROUGH_ULPS_DENORMAL_EPSILON,
    )
}

// Bequal is not Dequal: the denormalized values are compared exactly.
pub fn almost_bequal_ulps(a: f64, b: f64) -> bool {
    let (a, b) = (a as f32, b as f32);
    if arguments_denormalized(a, b, ULPS_EPSILON) {
        return a == b;
    }

    d_equal_ulps(a, b, ULPS_EPSILON)
}

pub fn almost_less_or_equal_ulps(a: f64, b: f64) -> bool {
    less_or_equal_ulps(a as f32, b as f32, ULPS_EPSILON)
}

/// Returns true if `b` is between `a` and `c`, allowing a few ULPs of slop.
pub fn almost_between_ulps(a: f64, b: f64, c: f64) -> bool {
    if a <= c {
        almost_less_or_equal_ulps(a, b) && almost_less_or_equal_ulps(b, c)
    } else {
        almost_less_or_equal_ulps(b, a) && almost_less_or_equal_ulps(c, b)
    }
}
