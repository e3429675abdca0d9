// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use core::fmt;
use std::cell::RefCell;

use crate::ecmascript::builtins::{Array, ErrorObject};

use super::{Function, JsString, Object, OrdinaryObject, number};

/// ### [6.1 ECMAScript Language Types](https://tc39.es/ecma262/#sec-ecmascript-language-types)
///
/// Objects are reference types: cloning a `Value` holding an object aliases
/// the same object.
///
/// `PartialEq` is [SameValue](https://tc39.es/ecma262/#sec-samevalue):
/// `NaN` equals itself, `+0` and `-0` differ, and objects compare by identity.
#[derive(Clone, Default)]
pub enum Value {
    /// ### [6.1.1 The Undefined Type](https://tc39.es/ecma262/#sec-ecmascript-language-types-undefined-type)
    #[default]
    Undefined,

    /// ### [6.1.2 The Null Type](https://tc39.es/ecma262/#sec-ecmascript-language-types-null-type)
    Null,

    /// ### [6.1.3 The Boolean Type](https://tc39.es/ecma262/#sec-ecmascript-language-types-boolean-type)
    Boolean(bool),

    /// ### [6.1.6.1 The Number Type](https://tc39.es/ecma262/#sec-ecmascript-language-types-number-type)
    Number(f64),

    /// ### [6.1.4 The String Type](https://tc39.es/ecma262/#sec-ecmascript-language-types-string-type)
    String(JsString),

    /// ### [6.1.7 The Object Type](https://tc39.es/ecma262/#sec-object-type)
    Object(OrdinaryObject),
    Array(Array),
    Function(Function),
    Error(ErrorObject),
}

impl Value {
    pub fn from_str(str: &str) -> Self {
        Value::String(JsString::from_str(str))
    }

    pub fn from_string(str: String) -> Self {
        Value::String(JsString::from_string(str))
    }

    pub fn nan() -> Self {
        Value::Number(f64::NAN)
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(
            self,
            Value::Object(_) | Value::Array(_) | Value::Function(_) | Value::Error(_)
        )
    }

    pub fn is_nan(&self) -> bool {
        matches!(self, Value::Number(n) if n.is_nan())
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&JsString> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&OrdinaryObject> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Boolean(x), Value::Boolean(y)) => x == y,
            (Value::Number(x), Value::Number(y)) => number::same_value(*x, *y),
            (Value::String(x), Value::String(y)) => x == y,
            (Value::Object(x), Value::Object(y)) => x.ptr_eq(y),
            (Value::Array(x), Value::Array(y)) => x.ptr_eq(y),
            (Value::Function(x), Value::Function(y)) => x.ptr_eq(y),
            (Value::Error(x), Value::Error(y)) => x.ptr_eq(y),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let seen = RefCell::new(Vec::new());
        fmt::Debug::fmt(&DebugValue { value: self, seen: &seen }, f)
    }
}

/// Debug formatting that renders an array or object already being printed
/// further up as `[Circular]`.
struct DebugValue<'a> {
    value: &'a Value,
    seen: &'a RefCell<Vec<Object>>,
}

impl DebugValue<'_> {
    fn nested<'b>(&'b self, value: &'b Value) -> DebugValue<'b> {
        DebugValue {
            value,
            seen: self.seen,
        }
    }

    /// Formats `object` with `body` unless it is already on the stack.
    fn guarded(
        &self,
        f: &mut fmt::Formatter<'_>,
        object: Object,
        body: impl FnOnce(&mut fmt::Formatter<'_>) -> fmt::Result,
    ) -> fmt::Result {
        if self.seen.borrow().iter().any(|o| o.ptr_eq(&object)) {
            return f.write_str("[Circular]");
        }
        self.seen.borrow_mut().push(object);
        let result = body(f);
        self.seen.borrow_mut().pop();
        result
    }
}

impl fmt::Debug for DebugValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{}", number::to_string_radix_10(*n)),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Object(o) => self.guarded(f, Object::Object(o.clone()), |f| {
                let properties = o.sorted_properties();
                let mut map = f.debug_map();
                for (key, value) in &properties {
                    map.entry(key, &self.nested(value));
                }
                map.finish()
            }),
            Value::Array(a) => self.guarded(f, Object::Array(a.clone()), |f| {
                let elements = a.elements();
                let mut list = f.debug_list();
                for element in &elements {
                    match element {
                        Some(value) => list.entry(&self.nested(value)),
                        None => list.entry(&format_args!("<hole>")),
                    };
                }
                list.finish()
            }),
            Value::Function(func) => fmt::Debug::fmt(func, f),
            Value::Error(e) => fmt::Debug::fmt(e, f),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        // Indices and lengths stay far below 2^53.
        Value::Number(value as f64)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::from_str(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::from_string(value)
    }
}

impl From<JsString> for Value {
    fn from(value: JsString) -> Self {
        Value::String(value)
    }
}

impl From<OrdinaryObject> for Value {
    fn from(value: OrdinaryObject) -> Self {
        Value::Object(value)
    }
}

impl From<Array> for Value {
    fn from(value: Array) -> Self {
        Value::Array(value)
    }
}

impl From<Function> for Value {
    fn from(value: Function) -> Self {
        Value::Function(value)
    }
}

impl From<ErrorObject> for Value {
    fn from(value: ErrorObject) -> Self {
        Value::Error(value)
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        value.into_value()
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    /// `None` becomes `undefined`.
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Undefined, Into::into)
    }
}
