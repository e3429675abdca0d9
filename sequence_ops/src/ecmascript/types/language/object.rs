// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use core::fmt;
use std::{cell::RefCell, rc::Rc};

use ahash::RandomState;
use hashbrown::HashMap;

use crate::ecmascript::builtins::{Array, ErrorObject};

use super::{Function, JsString, Value};

#[derive(Debug, Default)]
pub(crate) struct ObjectHeapData {
    pub(crate) properties: HashMap<JsString, Value, RandomState>,
}

/// A plain object created by an object literal: string-keyed data
/// properties and nothing else.
///
/// An ordinary object with a `"length"` property and integer-keyed
/// properties is array-like, so every array method accepts it as its `this`
/// value.
#[derive(Clone, Default)]
pub struct OrdinaryObject(Rc<RefCell<ObjectHeapData>>);

impl OrdinaryObject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_properties<K, V>(properties: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<JsString>,
        V: Into<Value>,
    {
        let object = Self::new();
        for (key, value) in properties {
            object.set(key, value);
        }
        object
    }

    pub(crate) fn from_property_map(properties: HashMap<JsString, Value, RandomState>) -> Self {
        Self(Rc::new(RefCell::new(ObjectHeapData { properties })))
    }

    /// Returns the value of the property, or `undefined` if it doesn't exist.
    pub fn get(&self, key: impl Into<JsString>) -> Value {
        self.0
            .borrow()
            .properties
            .get(&key.into())
            .cloned()
            .unwrap_or_default()
    }

    pub fn set(&self, key: impl Into<JsString>, value: impl Into<Value>) {
        self.0
            .borrow_mut()
            .properties
            .insert(key.into(), value.into());
    }

    pub fn has_property(&self, key: impl Into<JsString>) -> bool {
        self.0.borrow().properties.contains_key(&key.into())
    }

    /// Returns true if the property existed.
    pub fn delete(&self, key: impl Into<JsString>) -> bool {
        self.0.borrow_mut().properties.remove(&key.into()).is_some()
    }

    /// Every property, ordered by key.
    pub(crate) fn sorted_properties(&self) -> Vec<(JsString, Value)> {
        let mut properties: Vec<_> = self
            .0
            .borrow()
            .properties
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        properties.sort_by_cached_key(|(key, _)| key.to_string_lossy().into_owned());
        properties
    }

    pub fn property_count(&self) -> usize {
        self.0.borrow().properties.len()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for OrdinaryObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&Value::Object(self.clone()), f)
    }
}

/// A String wrapper object holding the string's UTF-16 code units, decoded
/// once so that indexed access is constant time.
#[derive(Clone)]
pub struct StringObject {
    string: JsString,
    code_units: Rc<[u16]>,
}

impl StringObject {
    pub fn new(string: JsString) -> Self {
        let code_units = string.code_units().collect();
        Self { string, code_units }
    }

    pub fn string(&self) -> &JsString {
        &self.string
    }

    /// The `length` of the wrapper: the number of UTF-16 code units.
    pub fn len(&self) -> usize {
        self.code_units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code_units.is_empty()
    }

    /// The code unit at `index`, as a string of length one.
    pub fn code_unit_at(&self, index: usize) -> Option<JsString> {
        self.code_units
            .get(index)
            .map(|unit| JsString::from_code_units(&[*unit]))
    }
}

impl From<JsString> for StringObject {
    fn from(value: JsString) -> Self {
        Self::new(value)
    }
}

impl fmt::Debug for StringObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("String").field(&self.string).finish()
    }
}

/// ### [6.1.7 The Object Type](https://tc39.es/ecma262/#sec-object-type)
///
/// The result of ToObject:
/// anything the array methods can treat as an array-like.
#[derive(Debug, Clone)]
pub enum Object {
    Object(OrdinaryObject),
    Array(Array),
    Function(Function),
    Error(ErrorObject),
    /// ### [10.4.3 String Exotic Objects](https://tc39.es/ecma262/#sec-string-exotic-objects)
    ///
    /// Indexed properties are the string's UTF-16 code units, all read-only.
    String(StringObject),
    /// A Boolean or Number wrapper object. These have no indexed properties.
    Primitive(Value),
}

impl Object {
    pub fn into_value(self) -> Value {
        match self {
            Object::Object(o) => Value::Object(o),
            Object::Array(a) => Value::Array(a),
            Object::Function(f) => Value::Function(f),
            Object::Error(e) => Value::Error(e),
            Object::String(s) => Value::String(s.string),
            Object::Primitive(v) => v,
        }
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Object::Object(x), Object::Object(y)) => x.ptr_eq(y),
            (Object::Array(x), Object::Array(y)) => x.ptr_eq(y),
            (Object::Function(x), Object::Function(y)) => x.ptr_eq(y),
            (Object::Error(x), Object::Error(y)) => x.ptr_eq(y),
            _ => false,
        }
    }
}

impl TryFrom<Value> for Object {
    type Error = ();

    /// Succeeds for values that are already objects. Primitives need
    /// ToObject.
    fn try_from(value: Value) -> Result<Self, ()> {
        match value {
            Value::Object(o) => Ok(Object::Object(o)),
            Value::Array(a) => Ok(Object::Array(a)),
            Value::Function(f) => Ok(Object::Function(f)),
            Value::Error(e) => Ok(Object::Error(e)),
            _ => Err(()),
        }
    }
}

impl From<Array> for Object {
    fn from(value: Array) -> Self {
        Object::Array(value)
    }
}

impl From<OrdinaryObject> for Object {
    fn from(value: OrdinaryObject) -> Self {
        Object::Object(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_objects_index_code_units() {
        let string = StringObject::new(JsString::from_str("a😀"));
        assert_eq!(string.len(), 3);
        assert_eq!(string.code_unit_at(0), Some(JsString::from_str("a")));
        assert_eq!(string.code_unit_at(1).map(|unit| unit.utf16_len()), Some(1));
        assert_eq!(string.code_unit_at(3), None);
        assert_eq!(
            Object::String(string).into_value(),
            Value::from("a😀")
        );
    }

    #[test]
    fn cyclic_objects_debug_as_circular() {
        let object = OrdinaryObject::from_properties([("n", Value::from(1.0))]);
        object.set("self", object.clone());
        assert_eq!(format!("{object:?}"), r#"{"n": 1, "self": [Circular]}"#);
    }
}
