// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ## [7.2 Testing and Comparison Operations](https://tc39.es/ecma262/#sec-testing-and-comparison-operations)

use crate::ecmascript::types::{Function, JsString, Value, number};

/// ### [7.2.2 IsArray ( argument )](https://tc39.es/ecma262/#sec-isarray)
///
/// The abstract operation IsArray takes argument argument (an ECMAScript
/// language value) and returns a Boolean. Only true Arrays qualify: an
/// array-like object with a `"length"` is not an Array.
pub(crate) fn is_array(argument: &Value) -> bool {
    // 1. If argument is not an Object, return false.
    // 2. If argument is an Array exotic object, return true.
    // 4. Return false.
    matches!(argument, Value::Array(_))
}

/// ### [7.2.3 IsCallable ( argument )](https://tc39.es/ecma262/#sec-iscallable)
///
/// The abstract operation IsCallable takes argument argument (an ECMAScript
/// language value) and returns a Boolean. It determines if argument is a
/// callable function with a [[Call]] internal method.
///
/// Returns the function itself so the caller doesn't need to match again.
pub(crate) fn is_callable(argument: &Value) -> Option<Function> {
    // 1. If argument is not an Object, return false.
    // 2. If argument has a [[Call]] internal method, return true.
    // 3. Return false.
    match argument {
        Value::Function(function) => Some(function.clone()),
        _ => None,
    }
}

pub(crate) fn is_same_type(x: &Value, y: &Value) -> bool {
    (x.is_undefined() && y.is_undefined())
        || (x.is_null() && y.is_null())
        || (x.is_boolean() && y.is_boolean())
        || (x.is_string() && y.is_string())
        || (x.is_number() && y.is_number())
        || (x.is_object() && y.is_object())
}

/// ### [7.2.11 SameValueZero ( x, y )](https://tc39.es/ecma262/#sec-samevaluezero)
///
/// The abstract operation SameValueZero takes arguments x (an ECMAScript
/// language value) and y (an ECMAScript language value) and returns a Boolean.
/// It determines whether or not the two arguments are the same value (ignoring
/// the difference between +0𝔽 and -0𝔽).
pub(crate) fn same_value_zero(x: &Value, y: &Value) -> bool {
    // 1. If Type(x) is not Type(y), return false.
    if !is_same_type(x, y) {
        return false;
    }
    // 2. If x is a Number, then
    if let (Value::Number(x), Value::Number(y)) = (x, y) {
        // a. Return Number::sameValueZero(x, y).
        return number::same_value_zero(*x, *y);
    }
    // 3. Return SameValueNonNumber(x, y).
    same_value_non_number(x, y)
}

/// ### [7.2.12 SameValueNonNumber ( x, y )](https://tc39.es/ecma262/#sec-samevaluenonnumber)
pub(crate) fn same_value_non_number(x: &Value, y: &Value) -> bool {
    // 1. Assert: Type(x) is Type(y).
    debug_assert!(is_same_type(x, y));
    match (x, y) {
        // 2. If x is either null or undefined, return true.
        (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
        // 4. If x is a String, then
        //    a. If x and y have the same length and the same code units in
        //       the same positions, return true; otherwise, return false.
        (Value::String(x), Value::String(y)) => x == y,
        // 5. If x is a Boolean, then
        (Value::Boolean(x), Value::Boolean(y)) => x == y,
        // 6. NOTE: All other ECMAScript language values are compared by identity.
        // 7. If x is y, return true; otherwise, return false.
        (x, y) if x.is_object() => x == y,
        _ => false,
    }
}

/// [7.2.13 IsLessThan ( x, y, LeftFirst )](https://tc39.es/ecma262/#sec-islessthan)
///
/// Step 3 of IsLessThan, for when both operands are Strings: compares code
/// unit by code unit, so `"B" < "a"` and `"10" < "9"`.
pub(crate) fn is_less_than_string(px: &JsString, py: &JsString) -> bool {
    // a. Let lx be the length of px.
    // b. Let ly be the length of py.
    // c. For each integer i such that 0 ≤ i < min(lx, ly), in ascending order, do
    //   i. Let cx be the numeric value of the code unit at index i within px.
    //   ii. Let cy be the numeric value of the code unit at index i within py.
    //   iii. If cx < cy, return true.
    //   iv. If cx > cy, return false.
    // d. If lx < ly, return true. Otherwise, return false.
    if let (Some(x), Some(y)) = (px.as_str(), py.as_str()) {
        // UTF-8 byte order and UTF-16 code unit order agree everywhere
        // except across the surrogate range.
        if x.is_ascii() && y.is_ascii() {
            return x < y;
        }
    }
    px.code_units().lt(py.code_units())
}

/// [7.2.15 IsStrictlyEqual ( x, y )](https://tc39.es/ecma262/#sec-isstrictlyequal)
///
/// The abstract operation IsStrictlyEqual takes arguments x (an ECMAScript
/// language value) and y (an ECMAScript language value) and returns a Boolean.
/// It provides the semantics for the === operator.
pub(crate) fn is_strictly_equal(x: &Value, y: &Value) -> bool {
    // 1. If Type(x) is not Type(y), return false.
    if !is_same_type(x, y) {
        return false;
    }
    // 2. If x is a Number, then
    if let (Value::Number(x), Value::Number(y)) = (x, y) {
        // a. Return Number::equal(x, y).
        return number::equal(*x, *y);
    }
    // 3. Return SameValueNonNumber(x, y).
    same_value_non_number(x, y)
}
