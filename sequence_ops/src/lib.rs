// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Sequence Ops
//!
//! The iteration methods of
//! [`Array.prototype`](https://tc39.es/ecma262/#sec-properties-of-the-array-prototype-object)
//! over a small, reference-counted rendition of the ECMAScript value model.
//!
//! Sequences are sparse: every index below the length either holds a
//! [`Value`](ecmascript::types::Value) or is a hole, and each method applies
//! its own hole policy. Every method is generic over
//! array-likes, so plain objects with a `"length"` property and strings can be
//! traversed as well as [`Array`](ecmascript::builtins::Array)s.
//!
//! ```
//! use sequence_ops::ecmascript::{
//!     builtins::{ArgumentsList, Array, ArrayPrototype},
//!     execution::Agent,
//!     types::{Function, Value},
//! };
//!
//! let mut agent = Agent::default();
//! let numbers = Array::from_values([3.0, 1.0, 2.0]);
//! let by_value = Function::new("byValue", 2, |_, _, args| {
//!     let (a, b) = (args.get(0), args.get(1));
//!     Ok(Value::Number(a.as_number().unwrap_or(0.0) - b.as_number().unwrap_or(0.0)))
//! });
//! ArrayPrototype::sort(&mut agent, numbers.clone().into(), ArgumentsList(&[by_value.into()]))
//!     .unwrap();
//! assert_eq!(numbers.to_vec(), vec![Value::from(1.0), Value::from(2.0), Value::from(3.0)]);
//! ```

pub mod ecmascript;
