// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [6.1.6.1 The Number Type](https://tc39.es/ecma262/#sec-ecmascript-language-types-number-type)
//!
//! Numbers are plain IEEE 754 doubles; these are the `Number::*` operations
//! the array methods rely on.

use super::JsString;

/// ### [6.1.6.1.13 Number::equal ( x, y )](https://tc39.es/ecma262/#sec-numeric-types-number-equal)
pub fn equal(x: f64, y: f64) -> bool {
    // 1. If x is NaN, return false.
    // 2. If y is NaN, return false.
    // 3. If x is y, return true.
    // 4. If x is +0𝔽 and y is -0𝔽, return true.
    // 5. If x is -0𝔽 and y is +0𝔽, return true.
    // 6. Return false.
    x == y
}

/// ### [6.1.6.1.14 Number::sameValue ( x, y )](https://tc39.es/ecma262/#sec-numeric-types-number-sameValue)
pub fn same_value(x: f64, y: f64) -> bool {
    // 1. If x is NaN and y is NaN, return true.
    if x.is_nan() && y.is_nan() {
        return true;
    }
    // 2. If x is +0𝔽 and y is -0𝔽, return false.
    // 3. If x is -0𝔽 and y is +0𝔽, return false.
    // 4. If x is y, return true.
    // 5. Return false.
    x == y && x.is_sign_negative() == y.is_sign_negative()
}

/// ### [6.1.6.1.15 Number::sameValueZero ( x, y )](https://tc39.es/ecma262/#sec-numeric-types-number-sameValueZero)
pub fn same_value_zero(x: f64, y: f64) -> bool {
    // 1. If x is NaN and y is NaN, return true.
    // 2. If x is +0𝔽 and y is -0𝔽, return true.
    // 3. If x is -0𝔽 and y is +0𝔽, return true.
    // 4. If x is y, return true.
    // 5. Return false.
    (x.is_nan() && y.is_nan()) || x == y
}

/// ### [6.1.6.1.20 Number::toString ( x, radix )](https://tc39.es/ecma262/#sec-numeric-types-number-tostring)
///
/// Radix 10 only.
pub fn to_string_radix_10(x: f64) -> JsString {
    // 2. If x is either +0𝔽 or -0𝔽, return "0".
    if x == 0.0 {
        return JsString::from_str("0");
    }
    let mut buffer = ryu_js::Buffer::new();
    JsString::from_str(buffer.format(x))
}

#[test]
fn number_to_string_matches_ecmascript() {
    assert_eq!(to_string_radix_10(1.0), "1");
    assert_eq!(to_string_radix_10(-0.0), "0");
    assert_eq!(to_string_radix_10(1.5), "1.5");
    assert_eq!(to_string_radix_10(f64::NAN), "NaN");
    assert_eq!(to_string_radix_10(f64::NEG_INFINITY), "-Infinity");
    assert_eq!(to_string_radix_10(1e21), "1e+21");
}

#[test]
fn zero_and_nan_equalities() {
    assert!(same_value_zero(0.0, -0.0));
    assert!(same_value_zero(f64::NAN, f64::NAN));
    assert!(!same_value(0.0, -0.0));
    assert!(same_value(f64::NAN, f64::NAN));
    assert!(!equal(f64::NAN, f64::NAN));
    assert!(equal(0.0, -0.0));
}
