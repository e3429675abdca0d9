// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [9.7 Agents](https://tc39.es/ecma262/#sec-agents)

use core::fmt;

use tracing::debug;

use crate::ecmascript::{
    abstract_operations::operations_on_objects::invoke,
    builtins::{ArrayPrototype, ErrorObject},
    types::{OrdinaryObject, Value},
};

#[derive(Debug, Default, Clone, Copy)]
pub struct Options {
    /// Makes `reduce` without an initial value read index 0 as the
    /// accumulator even when it is a hole, instead of searching for the
    /// first present element. `reduceRight` is unaffected.
    pub reduce_reads_index_zero: bool,
}

pub type JsResult<T> = std::result::Result<T, JsError>;

/// A thrown ECMAScript value.
///
/// Errors raised by the array methods themselves hold an Error object;
/// errors thrown by callbacks carry whatever value the callback threw.
#[derive(Debug, Clone, PartialEq)]
pub struct JsError(pub(crate) Value);

impl JsError {
    pub fn new(value: impl Into<Value>) -> Self {
        Self(value.into())
    }

    pub fn value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// The kind of Error object thrown, or `None` if a non-Error value was
    /// thrown.
    pub fn exception_type(&self) -> Option<ExceptionType> {
        match &self.0 {
            Value::Error(error) => Some(error.kind()),
            _ => None,
        }
    }
}

impl fmt::Display for JsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::Error(error) => write!(f, "Uncaught {error}"),
            value => write!(f, "Uncaught {value:?}"),
        }
    }
}

impl std::error::Error for JsError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExceptionType {
    Error,
    RangeError,
    TypeError,
}

impl ExceptionType {
    pub fn name(self) -> &'static str {
        match self {
            ExceptionType::Error => "Error",
            ExceptionType::RangeError => "RangeError",
            ExceptionType::TypeError => "TypeError",
        }
    }
}

/// ### [9.7 Agents](https://tc39.es/ecma262/#sec-agents)
///
/// Owns the `%Array.prototype%` intrinsic and the engine options. Every
/// array method takes the agent as its first argument.
pub struct Agent {
    options: Options,
    array_prototype: OrdinaryObject,
}

impl Agent {
    pub fn new(options: Options) -> Self {
        let array_prototype = ArrayPrototype::create_intrinsic();
        debug!(
            methods = array_prototype.property_count(),
            ?options,
            "created agent"
        );
        Self {
            options,
            array_prototype,
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// `%Array.prototype%`: every array method keyed by its name.
    pub fn array_prototype(&self) -> &OrdinaryObject {
        &self.array_prototype
    }

    pub fn throw_exception_with_static_message(
        &mut self,
        kind: ExceptionType,
        message: &'static str,
    ) -> JsError {
        JsError(Value::Error(ErrorObject::new(kind, message)))
    }

    pub fn throw_exception(&mut self, kind: ExceptionType, message: String) -> JsError {
        JsError(Value::Error(ErrorObject::new(kind, message)))
    }

    /// Calls the `%Array.prototype%` method named `key` with `this_value` as
    /// the receiver.
    ///
    /// ```
    /// use sequence_ops::ecmascript::{builtins::Array, execution::Agent, types::Value};
    ///
    /// let mut agent = Agent::default();
    /// let array = Array::from_values([1.0, 2.0]);
    /// let found = agent.invoke(array.into(), "includes", &[Value::Number(2.0)]);
    /// assert_eq!(found, Ok(Value::Boolean(true)));
    /// ```
    pub fn invoke(&mut self, this_value: Value, key: &str, arguments: &[Value]) -> JsResult<Value> {
        invoke(self, this_value, key, arguments)
    }
}

impl Default for Agent {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

#[test]
fn thrown_errors_render_like_uncaught_exceptions() {
    let mut agent = Agent::default();
    let err = agent.throw_exception_with_static_message(ExceptionType::TypeError, "not callable");
    assert_eq!(err.exception_type(), Some(ExceptionType::TypeError));
    assert_eq!(err.to_string(), "Uncaught TypeError: not callable");
    let thrown = JsError::new("boom");
    assert_eq!(thrown.exception_type(), None);
    assert_eq!(thrown.into_value(), Value::from("boom"));
}
