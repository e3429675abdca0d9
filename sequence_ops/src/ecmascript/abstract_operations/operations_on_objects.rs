// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ## [7.3 Operations on Objects](https://tc39.es/ecma262/#sec-operations-on-objects)
//!
//! Property access here is by array index only: every array method reads
//! and writes integer-keyed properties, and `"length"`.

use tracing::trace;

use crate::ecmascript::{
    builtins::ArgumentsList,
    execution::{Agent, ExceptionType, JsResult},
    types::{Function, JsString, Object, Value},
};

use super::{testing_and_comparison::is_callable, type_conversion::to_length};

/// The property key an ordinary object stores index `index` under: the
/// canonical numeric string.
fn index_key(index: usize) -> JsString {
    JsString::from_string(index.to_string())
}

/// ### [7.3.2 Get ( O, P )](https://tc39.es/ecma262/#sec-get-o-p)
///
/// The abstract operation Get takes arguments O (an Object) and P (a property
/// key) and returns either a normal completion containing an ECMAScript
/// language value or a throw completion. It is used to retrieve the value of
/// a specific property of an object.
///
/// Missing properties and holes read as `undefined`.
pub(crate) fn get(o: &Object, index: usize) -> Value {
    match o {
        Object::Array(array) => array.get(index).unwrap_or_default(),
        Object::Object(object) => object.get(index_key(index)),
        Object::String(string) => string.code_unit_at(index).into(),
        Object::Function(_) | Object::Error(_) | Object::Primitive(_) => Value::Undefined,
    }
}

/// ### [7.3.4 Set ( O, P, V, Throw )](https://tc39.es/ecma262/#sec-set-o-p-v-throw)
///
/// The abstract operation Set takes arguments O (an Object), P (a property
/// key), V (an ECMAScript language value), and Throw (a Boolean) and returns
/// either a normal completion containing UNUSED or a throw completion. It is
/// used to set the value of a specific property of an object. V is the new
/// value for the property.
///
/// Throw is always true.
pub(crate) fn set(agent: &mut Agent, o: &Object, index: usize, v: Value) -> JsResult<()> {
    // 1. Let success be ? O.[[Set]](P, V, O).
    match o {
        Object::Array(array) => array.set(index, v),
        Object::Object(object) => object.set(index_key(index), v),
        // 2. If success is false and Throw is true, throw a TypeError exception.
        Object::String(_) => {
            return Err(agent.throw_exception(
                ExceptionType::TypeError,
                format!("Cannot assign to read only property '{index}' of string"),
            ));
        }
        Object::Function(_) | Object::Error(_) | Object::Primitive(_) => {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "Could not set property.",
            ));
        }
    }
    // 3. Return UNUSED.
    Ok(())
}

/// ### [7.3.12 HasProperty ( O, P )](https://tc39.es/ecma262/#sec-hasproperty)
///
/// The abstract operation HasProperty takes arguments O (an Object) and P (a
/// property key) and returns either a normal completion containing a Boolean
/// or a throw completion. It is used to determine whether an object has a
/// property with the specified property key. The property may be either own
/// or inherited.
///
/// False exactly when `index` is a hole.
pub(crate) fn has_property(o: &Object, index: usize) -> bool {
    match o {
        Object::Array(array) => array.has(index),
        Object::Object(object) => object.has_property(index_key(index)),
        Object::String(string) => index < string.len(),
        Object::Function(_) | Object::Error(_) | Object::Primitive(_) => false,
    }
}

/// ### [7.3.14 Call ( F, V \[ , argumentsList \] )](https://tc39.es/ecma262/#sec-call)
///
/// Abstract operation Call specialized for a Function.
pub(crate) fn call_function(
    agent: &mut Agent,
    f: &Function,
    v: Value,
    arguments_list: Option<ArgumentsList>,
) -> JsResult<Value> {
    // 1. If argumentsList is not present, set argumentsList to a new empty List.
    let arguments_list = arguments_list.unwrap_or_default();
    // 3. Return ? F.[[Call]](V, argumentsList).
    f.call(agent, v, arguments_list)
}

/// ### [7.3.18 LengthOfArrayLike ( obj )](https://tc39.es/ecma262/#sec-lengthofarraylike)
///
/// The abstract operation LengthOfArrayLike takes argument obj (an Object) and
/// returns either a normal completion containing a non-negative integer or a
/// throw completion. It returns the value of the "length" property of an
/// array-like object.
pub(crate) fn length_of_array_like(obj: &Object) -> usize {
    match obj {
        // NOTE: Fast path for Array objects.
        Object::Array(array) => array.len(),
        // 1. Return ℝ(? ToLength(? Get(obj, "length"))).
        Object::Object(object) => to_length(&object.get("length")),
        Object::String(string) => string.len(),
        Object::Function(function) => usize::from(function.length()),
        Object::Error(_) | Object::Primitive(_) => 0,
    }
}

/// ### [7.3.20 Invoke ( V, P \[ , argumentsList \] )](https://tc39.es/ecma262/#sec-invoke)
///
/// The abstract operation Invoke takes arguments V (an ECMAScript language
/// value) and P (a property key) and optional argument argumentsList (a List
/// of ECMAScript language values) and returns either a normal completion
/// containing an ECMAScript language value or a throw completion. It is used
/// to call a method property of an ECMAScript language value. V serves as both
/// the lookup point for the property and the this value of the call.
///
/// Every value here inherits from `%Array.prototype%`, so that is where the
/// lookup happens.
pub(crate) fn invoke(
    agent: &mut Agent,
    v: Value,
    p: &str,
    arguments_list: &[Value],
) -> JsResult<Value> {
    trace!(method = p, argc = arguments_list.len(), "invoke");
    // 2. Let func be ? GetV(V, P).
    let func = agent.array_prototype().get(p);
    // 3. Return ? Call(func, V, argumentsList).
    let Some(func) = is_callable(&func) else {
        return Err(agent.throw_exception(
            ExceptionType::TypeError,
            format!("Array.prototype.{p} is not a function"),
        ));
    };
    call_function(agent, &func, v, Some(ArgumentsList(arguments_list)))
}
