// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # [10 Ordinary and Exotic Objects Behaviours](https://tc39.es/ecma262/#sec-ordinary-and-exotic-objects-behaviours)
//!
//! The objects with internal slots beyond a plain object's: Arrays, whose
//! elements live in a dense vector with holes, and Errors, which carry the
//! kind and message of a thrown exception. Builtin functions and the
//! `Array.prototype` methods are defined here as well.

pub(crate) mod array;
pub(crate) mod builtin_function;
pub(crate) mod error;
pub(crate) mod indexed_collections;

pub use array::Array;
pub use builtin_function::{ArgumentsList, Behaviour, Builtin, ClosureFn, RegularFn};
pub use error::ErrorObject;
pub use indexed_collections::array_objects::ArrayPrototype;
