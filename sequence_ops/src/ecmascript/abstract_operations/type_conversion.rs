// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ## [7.1 Type Conversion](https://tc39.es/ecma262/#sec-type-conversion)
//!
//! Objects in this crate carry no user-defined `valueOf` or `toString`, so
//! converting one to a primitive cannot run user code. Every conversion
//! except ToObject is therefore infallible.

use num_traits::{Num, ToPrimitive};

use crate::ecmascript::{
    builtins::indexed_collections::array_objects::join_array_like,
    execution::{Agent, ExceptionType, JsResult},
    types::{JsString, Object, Value, number},
};

/// 2^53 - 1, the largest length an array-like may report.
pub(crate) const MAX_SAFE_INTEGER: f64 = 9007199254740991.0;

/// ### [7.1.2 ToBoolean ( argument )](https://tc39.es/ecma262/#sec-toboolean)
pub(crate) fn to_boolean(argument: &Value) -> bool {
    match argument {
        // 1. If argument is a Boolean, return argument.
        Value::Boolean(b) => *b,
        // 2. If argument is one of undefined, null, +0𝔽, -0𝔽, NaN, 0ℤ, or the
        //    empty String, return false.
        Value::Undefined | Value::Null => false,
        Value::Number(n) => !(*n == 0.0 || n.is_nan()),
        Value::String(s) => !s.is_empty(),
        // 4. Return true.
        Value::Object(_) | Value::Array(_) | Value::Function(_) | Value::Error(_) => true,
    }
}

/// ### [7.1.4 ToNumber ( argument )](https://tc39.es/ecma262/#sec-tonumber)
pub(crate) fn to_number(argument: &Value) -> f64 {
    match argument {
        // 1. If argument is a Number, return argument.
        Value::Number(n) => *n,
        // 3. If argument is undefined, return NaN.
        Value::Undefined => f64::NAN,
        // 4. If argument is either null or false, return +0𝔽.
        Value::Null | Value::Boolean(false) => 0.0,
        // 5. If argument is true, return 1𝔽.
        Value::Boolean(true) => 1.0,
        // 6. If argument is a String, return StringToNumber(argument).
        Value::String(s) => string_to_number(s),
        // 8. Let primValue be ? ToPrimitive(argument, number).
        // 9. Assert: primValue is not an Object.
        // 10. Return ? ToNumber(primValue).
        _ => string_to_number(&to_string(argument)),
    }
}

fn is_trimmable_whitespace(c: char) -> bool {
    // WhiteSpace and LineTerminator. Rust's White_Space includes U+0085,
    // which ECMAScript does not, and excludes U+FEFF, which it does.
    c == '\u{FEFF}' || (c.is_whitespace() && c != '\u{0085}')
}

/// ### [7.1.4.1.1 StringToNumber ( str )](https://tc39.es/ecma262/#sec-stringtonumber)
pub(crate) fn string_to_number(str: &JsString) -> f64 {
    // Lone surrogates can never be part of a StringNumericLiteral.
    let Some(str) = str.as_str() else {
        return f64::NAN;
    };
    // 1. Let literal be ParseText(str, StringNumericLiteral).
    let literal = str.trim_matches(is_trimmable_whitespace);
    // StrWhiteSpace_opt: the empty string is 0.
    if literal.is_empty() {
        return 0.0;
    }
    match literal {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    // NonDecimalIntegerLiteral: unsigned only.
    let radix_prefix = literal.get(..2).map(str::to_ascii_lowercase);
    let radix = match radix_prefix.as_deref() {
        Some("0x") => Some(16),
        Some("0o") => Some(8),
        Some("0b") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &literal[2..];
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return f64::NAN;
        }
        return <f64 as Num>::from_str_radix(digits, radix).unwrap_or(f64::NAN);
    }
    // 2. If literal is a List of errors, return NaN.
    // 3. Return the StringNumericValue of literal.
    match fast_float::parse_partial::<f64, _>(literal) {
        // fast_float also accepts "inf", "nan" and friends: only the exact
        // "Infinity" spellings handled above are valid.
        Ok((f, len)) if len == literal.len() && !f.is_nan() && !f.is_infinite() => f,
        Ok((f, len))
            if len == literal.len()
                && f.is_infinite()
                && literal.bytes().all(|b| b.is_ascii_digit() || b".eE+-".contains(&b)) =>
        {
            // Decimal literals too large for a double, like "1e400".
            f
        }
        _ => f64::NAN,
    }
}

/// ### [7.1.5 ToIntegerOrInfinity ( argument )](https://tc39.es/ecma262/#sec-tointegerorinfinity)
///
/// The abstract operation ToIntegerOrInfinity takes argument argument (an
/// ECMAScript language value) and returns an integer, +∞, or -∞. It converts
/// argument to an integer representing its Number value with fractional part
/// truncated, or to +∞ or -∞ when that Number value is infinite.
pub(crate) fn to_integer_or_infinity(argument: &Value) -> f64 {
    // 1. Let number be ? ToNumber(argument).
    let number = to_number(argument);
    // 2. If number is one of NaN, +0𝔽, or -0𝔽, return 0.
    if number.is_nan() || number == 0.0 {
        return 0.0;
    }
    // 3. If number is +∞𝔽, return +∞.
    // 4. If number is -∞𝔽, return -∞.
    if number.is_infinite() {
        return number;
    }
    // 5. Return truncate(ℝ(number)).
    // Adding +0 turns a truncated -0 into +0.
    number.trunc() + 0.0
}

/// ### [7.1.17 ToString ( argument )](https://tc39.es/ecma262/#sec-tostring)
pub(crate) fn to_string(argument: &Value) -> JsString {
    to_string_with_seen(argument, &mut Vec::new())
}

/// ToString, carrying the arrays already being stringified so that a cycle
/// renders as the empty string instead of recursing forever.
pub(crate) fn to_string_with_seen(argument: &Value, seen: &mut Vec<Object>) -> JsString {
    match argument {
        // 1. If argument is a String, return argument.
        Value::String(s) => s.clone(),
        // 3. If argument is undefined, return "undefined".
        Value::Undefined => JsString::from_str("undefined"),
        // 4. If argument is null, return "null".
        Value::Null => JsString::from_str("null"),
        // 5. If argument is true, return "true".
        // 6. If argument is false, return "false".
        Value::Boolean(b) => JsString::from_str(if *b { "true" } else { "false" }),
        // 7. If argument is a Number, return Number::toString(argument, 10).
        Value::Number(n) => number::to_string_radix_10(*n),
        // 10. Let primValue be ? ToPrimitive(argument, string).
        // 12. Return ? ToString(primValue).
        Value::Array(array) => {
            let object = Object::Array(array.clone());
            if seen.iter().any(|o| o.ptr_eq(&object)) {
                return JsString::from_str("");
            }
            join_array_like(&object, &JsString::from_str(","), seen)
        }
        Value::Object(_) => JsString::from_str("[object Object]"),
        Value::Function(function) => {
            JsString::from_string(format!("function {}() {{ [native code] }}", function.name()))
        }
        Value::Error(error) => JsString::from_string(error.to_string()),
    }
}

/// ### [7.1.20 ToLength ( argument )](https://tc39.es/ecma262/#sec-tolength)
pub(crate) fn to_length(argument: &Value) -> usize {
    // 1. Let len be ? ToIntegerOrInfinity(argument).
    let len = to_integer_or_infinity(argument);
    // 2. If len ≤ 0, return +0𝔽.
    if len <= 0.0 {
        return 0;
    }
    // 3. Return 𝔽(min(len, 2**53 - 1)).
    len.min(MAX_SAFE_INTEGER).to_usize().unwrap_or(usize::MAX)
}

/// ### [7.1.18 ToObject ( argument )](https://tc39.es/ecma262/#sec-toobject)
///
/// The abstract operation ToObject takes argument argument (an ECMAScript
/// language value) and returns either a normal completion containing an Object
/// or a throw completion. It converts argument to a value of type Object
/// according to [Table 13](https://tc39.es/ecma262/#table-toobject-conversions):
pub(crate) fn to_object(agent: &mut Agent, argument: &Value) -> JsResult<Object> {
    match argument {
        Value::Undefined => Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Cannot convert undefined to object",
        )),
        Value::Null => Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Cannot convert null to object",
        )),
        // Return a new String object whose [[StringData]] internal slot is set to argument.
        #[cfg(feature = "array-like-strings")]
        Value::String(s) => Ok(Object::String(s.clone().into())),
        // Return a new Boolean or Number object whose internal slot is set to argument.
        Value::Boolean(_) | Value::Number(_) => Ok(Object::Primitive(argument.clone())),
        #[cfg(not(feature = "array-like-strings"))]
        Value::String(_) => Ok(Object::Primitive(argument.clone())),
        Value::Object(o) => Ok(Object::Object(o.clone())),
        Value::Array(a) => Ok(Object::Array(a.clone())),
        Value::Function(f) => Ok(Object::Function(f.clone())),
        Value::Error(e) => Ok(Object::Error(e.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecmascript::builtins::Array;

    #[test]
    fn string_to_number_follows_string_numeric_literal() {
        let n = |s: &str| string_to_number(&JsString::from_str(s));
        assert_eq!(n(""), 0.0);
        assert_eq!(n("  \n"), 0.0);
        assert_eq!(n(" 42 "), 42.0);
        assert_eq!(n("-1.5e3"), -1500.0);
        assert_eq!(n(".5"), 0.5);
        assert_eq!(n("0x1F"), 31.0);
        assert_eq!(n("0b101"), 5.0);
        assert_eq!(n("0o17"), 15.0);
        assert_eq!(n("Infinity"), f64::INFINITY);
        assert_eq!(n("-Infinity"), f64::NEG_INFINITY);
        assert!(n("inf").is_nan());
        assert!(n("NaN").is_nan());
        assert!(n("12px").is_nan());
        assert!(n("-0x10").is_nan());
        assert!(n("0x").is_nan());
    }

    #[test]
    fn to_integer_or_infinity_truncates() {
        assert_eq!(to_integer_or_infinity(&Value::Number(2.9)), 2.0);
        assert_eq!(to_integer_or_infinity(&Value::Number(-2.9)), -2.0);
        assert_eq!(to_integer_or_infinity(&Value::nan()), 0.0);
        assert_eq!(to_integer_or_infinity(&Value::Undefined), 0.0);
        assert_eq!(to_integer_or_infinity(&Value::from("3")), 3.0);
        assert!(to_integer_or_infinity(&Value::Number(-0.5)).is_sign_positive());
        assert_eq!(
            to_integer_or_infinity(&Value::Number(f64::INFINITY)),
            f64::INFINITY
        );
    }

    #[test]
    fn to_length_clamps() {
        assert_eq!(to_length(&Value::Number(-5.0)), 0);
        assert_eq!(to_length(&Value::Number(3.7)), 3);
        assert_eq!(to_length(&Value::from("2")), 2);
        assert_eq!(to_length(&Value::Undefined), 0);
        assert_eq!(
            to_length(&Value::Number(f64::INFINITY)),
            MAX_SAFE_INTEGER as usize
        );
    }

    #[test]
    fn arrays_stringify_through_join() {
        let inner = Array::from_elements(vec![Some(1.0.into()), None, Some(Value::Null)]);
        let outer = Array::from_values([Value::from(inner), Value::from("x")]);
        assert_eq!(to_string(&outer.clone().into()), "1,,,x");
        outer.push(outer.clone());
        assert_eq!(to_string(&outer.into()), "1,,,x,");
        assert_eq!(to_number(&Array::from_values(["7"]).into()), 7.0);
        assert!(to_number(&Array::from_values([1.0, 2.0]).into()).is_nan());
        assert_eq!(to_number(&Array::new().into()), 0.0);
    }

    #[test]
    fn to_object_rejects_nullish() {
        let mut agent = Agent::default();
        let err = to_object(&mut agent, &Value::Undefined).unwrap_err();
        assert_eq!(err.exception_type(), Some(ExceptionType::TypeError));
        assert!(to_object(&mut agent, &Value::Null).is_err());
        assert!(matches!(
            to_object(&mut agent, &Value::Number(1.0)),
            Ok(Object::Primitive(_))
        ));
    }
}
