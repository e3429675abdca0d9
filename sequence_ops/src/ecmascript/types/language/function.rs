// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use core::fmt;
use std::rc::Rc;

use crate::ecmascript::{
    builtins::{ArgumentsList, Behaviour, Builtin},
    execution::{Agent, JsResult},
};

use super::{JsString, Value};

pub(crate) struct FunctionHeapData {
    pub(crate) name: JsString,
    pub(crate) length: u8,
    pub(crate) behaviour: Behaviour,
}

/// A callable object: either one of the engine's builtins or a Rust closure
/// supplied by the embedder.
///
/// Functions are called with an explicit `this` value and an argument list;
/// a closure never sees an implicit receiver.
#[derive(Clone)]
pub struct Function(Rc<FunctionHeapData>);

impl Function {
    /// Creates a function from a closure.
    ///
    /// ```
    /// use sequence_ops::ecmascript::types::{Function, Value};
    ///
    /// let is_positive = Function::new("isPositive", 1, |_agent, _this, args| {
    ///     Ok(Value::Boolean(args.get(0).as_number().is_some_and(|n| n > 0.0)))
    /// });
    /// assert_eq!(is_positive.name(), "isPositive");
    /// ```
    pub fn new<F>(name: &str, length: u8, closure: F) -> Self
    where
        F: Fn(&mut Agent, Value, ArgumentsList) -> JsResult<Value> + 'static,
    {
        Self(Rc::new(FunctionHeapData {
            name: JsString::from_str(name),
            length,
            behaviour: Behaviour::Closure(Rc::new(closure)),
        }))
    }

    pub(crate) fn from_builtin<T: Builtin>() -> Self {
        Self(Rc::new(FunctionHeapData {
            name: JsString::from_str(T::NAME),
            length: T::LENGTH,
            behaviour: T::BEHAVIOUR,
        }))
    }

    pub fn name(&self) -> &JsString {
        &self.0.name
    }

    /// The number of arguments the function is declared to take.
    pub fn length(&self) -> u8 {
        self.0.length
    }

    /// ### [10.3.1 \[\[Call\]\] ( thisArgument, argumentsList )](https://tc39.es/ecma262/#sec-built-in-function-objects-call-thisargument-argumentslist)
    pub fn call(
        &self,
        agent: &mut Agent,
        this_argument: Value,
        arguments: ArgumentsList,
    ) -> JsResult<Value> {
        match &self.0.behaviour {
            Behaviour::Regular(func) => func(agent, this_argument, arguments),
            Behaviour::Closure(closure) => closure(agent, this_argument, arguments),
        }
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Function: {}]", self.0.name)
    }
}
