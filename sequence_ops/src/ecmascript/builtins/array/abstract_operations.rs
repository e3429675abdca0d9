// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::ecmascript::execution::{Agent, ExceptionType, JsResult};

use super::Array;

/// The largest valid array length, 2^32 - 1.
pub(crate) const MAX_ARRAY_LENGTH: usize = u32::MAX as usize;

/// ### [10.4.2.2 ArrayCreate ( length \[ , proto \] )](https://tc39.es/ecma262/#sec-arraycreate)
///
/// The abstract operation ArrayCreate takes argument length (a non-negative
/// integer) and returns either a normal completion containing an Array
/// exotic object or a throw completion. Every slot of the new Array is a
/// hole.
pub(crate) fn array_create(agent: &mut Agent, length: usize) -> JsResult<Array> {
    // 1. If length > 2**32 - 1, throw a RangeError exception.
    if length > MAX_ARRAY_LENGTH {
        return Err(
            agent.throw_exception_with_static_message(ExceptionType::RangeError, "Invalid array length")
        );
    }
    // 3. Let A be MakeBasicObject(« [[Prototype]], [[Extensible]] »).
    // 7. Return A.
    Ok(Array::with_length(length))
}

#[test]
fn array_create_rejects_lengths_past_u32() {
    let mut agent = Agent::default();
    let array = array_create(&mut agent, 4).unwrap();
    assert_eq!(array.len(), 4);
    assert!(!array.has(0));
    let err = array_create(&mut agent, MAX_ARRAY_LENGTH + 1).unwrap_err();
    assert_eq!(err.exception_type(), Some(ExceptionType::RangeError));
}
