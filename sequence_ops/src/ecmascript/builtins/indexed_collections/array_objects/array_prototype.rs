// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use core::cmp::Ordering;

use num_traits::ToPrimitive;
use tracing::{debug, trace};
use wtf8::Wtf8Buf;

use crate::ecmascript::{
    abstract_operations::{
        operations_on_objects::{call_function, get, has_property, length_of_array_like, set},
        testing_and_comparison::{
            is_array, is_callable, is_less_than_string, is_strictly_equal, same_value_zero,
        },
        type_conversion::{
            MAX_SAFE_INTEGER, to_boolean, to_integer_or_infinity, to_number, to_object, to_string,
            to_string_with_seen,
        },
    },
    builders::ordinary_object_builder::OrdinaryObjectBuilder,
    builtins::{
        ArgumentsList, Array, Behaviour, Builtin, array::abstract_operations::array_create,
    },
    execution::{Agent, ExceptionType, JsResult},
    types::{Function, JsString, Object, OrdinaryObject, Value},
};

/// `%Array.prototype%`: the generic array methods.
///
/// Every method takes the uniform builtin signature. The receiver may be any
/// value that converts to an array-like object: an [`Array`], an ordinary
/// object with a `"length"`, or a string.
pub struct ArrayPrototype;

struct ArrayPrototypeEvery;
impl Builtin for ArrayPrototypeEvery {
    const NAME: &'static str = "every";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::every);
}
struct ArrayPrototypeFilter;
impl Builtin for ArrayPrototypeFilter {
    const NAME: &'static str = "filter";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::filter);
}
struct ArrayPrototypeFind;
impl Builtin for ArrayPrototypeFind {
    const NAME: &'static str = "find";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::find);
}
struct ArrayPrototypeFindIndex;
impl Builtin for ArrayPrototypeFindIndex {
    const NAME: &'static str = "findIndex";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::find_index);
}
struct ArrayPrototypeFindLast;
impl Builtin for ArrayPrototypeFindLast {
    const NAME: &'static str = "findLast";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::find_last);
}
struct ArrayPrototypeFindLastIndex;
impl Builtin for ArrayPrototypeFindLastIndex {
    const NAME: &'static str = "findLastIndex";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::find_last_index);
}
struct ArrayPrototypeFlat;
impl Builtin for ArrayPrototypeFlat {
    const NAME: &'static str = "flat";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::flat);
}
struct ArrayPrototypeFlatMap;
impl Builtin for ArrayPrototypeFlatMap {
    const NAME: &'static str = "flatMap";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::flat_map);
}
struct ArrayPrototypeForEach;
impl Builtin for ArrayPrototypeForEach {
    const NAME: &'static str = "forEach";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::for_each);
}
struct ArrayPrototypeIncludes;
impl Builtin for ArrayPrototypeIncludes {
    const NAME: &'static str = "includes";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::includes);
}
struct ArrayPrototypeIndexOf;
impl Builtin for ArrayPrototypeIndexOf {
    const NAME: &'static str = "indexOf";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::index_of);
}
struct ArrayPrototypeJoin;
impl Builtin for ArrayPrototypeJoin {
    const NAME: &'static str = "join";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::join);
}
struct ArrayPrototypeLastIndexOf;
impl Builtin for ArrayPrototypeLastIndexOf {
    const NAME: &'static str = "lastIndexOf";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::last_index_of);
}
struct ArrayPrototypeMap;
impl Builtin for ArrayPrototypeMap {
    const NAME: &'static str = "map";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::map);
}
struct ArrayPrototypeReduce;
impl Builtin for ArrayPrototypeReduce {
    const NAME: &'static str = "reduce";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::reduce);
}
struct ArrayPrototypeReduceRight;
impl Builtin for ArrayPrototypeReduceRight {
    const NAME: &'static str = "reduceRight";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::reduce_right);
}
struct ArrayPrototypeSome;
impl Builtin for ArrayPrototypeSome {
    const NAME: &'static str = "some";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::some);
}
struct ArrayPrototypeSort;
impl Builtin for ArrayPrototypeSort {
    const NAME: &'static str = "sort";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::sort);
}
struct ArrayPrototypeToSorted;
impl Builtin for ArrayPrototypeToSorted {
    const NAME: &'static str = "toSorted";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::to_sorted);
}
struct ArrayPrototypeToString;
impl Builtin for ArrayPrototypeToString {
    const NAME: &'static str = "toString";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::to_string);
}

impl ArrayPrototype {
    /// ### [23.1.3.6 Array.prototype.every ( callbackfn \[ , thisArg \] )](https://tc39.es/ecma262/#sec-array.prototype.every)
    ///
    /// > #### Note 1
    /// >
    /// > callbackfn should be a function that accepts three arguments and
    /// > returns a value that is coercible to a Boolean value. every calls
    /// > callbackfn once for each element present in the array, in ascending
    /// > order, until it finds one where callbackfn returns false. If such an
    /// > element is found, every immediately returns false. Otherwise, every
    /// > returns true. callbackfn is called only for elements of the array
    /// > which actually exist; it is not called for missing elements of the
    /// > array.
    /// >
    /// > every acts like the "for all" quantifier in mathematics. In
    /// > particular, for an empty array, it returns true.
    pub fn every(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        // 1. Let O be ? ToObject(this value).
        let o = to_object(agent, &this_value)?;
        // 2. Let len be ? LengthOfArrayLike(O).
        let len = length_of_array_like(&o);
        let callback_fn = arguments.get(0);
        // 3. If IsCallable(callbackfn) is false, throw a TypeError exception.
        let Some(callback_fn) = is_callable(&callback_fn) else {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "Callback is not a function",
            ));
        };
        let this_arg = arguments.get(1);
        // 4. Let k be 0.
        // 5. Repeat, while k < len,
        for k in 0..len {
            // b. Let kPresent be ? HasProperty(O, Pk).
            // c. If kPresent is true, then
            if !has_property(&o, k) {
                continue;
            }
            // i. Let kValue be ? Get(O, Pk).
            let k_value = get(&o, k);
            // ii. Let testResult be ToBoolean(? Call(callbackfn, thisArg, « kValue, 𝔽(k), O »)).
            let test_result = call_function(
                agent,
                &callback_fn,
                this_arg.clone(),
                Some(ArgumentsList(&[k_value, k.into(), o.clone().into_value()])),
            )?;
            // iii. If testResult is false, return false.
            if !to_boolean(&test_result) {
                return Ok(false.into());
            }
        }
        // 6. Return true.
        Ok(true.into())
    }

    /// ### [23.1.3.8 Array.prototype.filter ( callbackfn \[ , thisArg \] )](https://tc39.es/ecma262/#sec-array.prototype.filter)
    ///
    /// > #### Note 1
    /// >
    /// > `callbackfn` should be a function that accepts three arguments and
    /// > returns a value that is coercible to a Boolean value. **filter**
    /// > calls `callbackfn` once for each element in the array, in ascending
    /// > order, and constructs a new array of all the values for which
    /// > `callbackfn` returns **true**. `callbackfn` is called only for
    /// > elements of the array which actually exist; it is not called for
    /// > missing elements of the array.
    pub fn filter(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let callback_fn = arguments.get(0);
        let this_arg = arguments.get(1);

        // 1. Let O be ? ToObject(this value).
        let o = to_object(agent, &this_value)?;
        // 2. Let len be ? LengthOfArrayLike(O).
        let len = length_of_array_like(&o);
        // 3. If IsCallable(callbackfn) is false, throw a TypeError exception.
        let Some(callback_fn) = is_callable(&callback_fn) else {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "Callback function is not callable",
            ));
        };
        // 4. Let A be ? ArraySpeciesCreate(O, 0).
        let a = array_create(agent, 0)?;
        // 5. Let k be 0.
        // 7. Repeat, while k < len,
        for k in 0..len {
            // b. Let kPresent be ? HasProperty(O, Pk).
            // c. If kPresent is true, then
            if !has_property(&o, k) {
                continue;
            }
            // i. Let kValue be ? Get(O, Pk).
            let k_value = get(&o, k);
            // ii. Let selected be ToBoolean(? Call(callbackfn, thisArg, « kValue, 𝔽(k), O »)).
            let result = call_function(
                agent,
                &callback_fn,
                this_arg.clone(),
                Some(ArgumentsList(&[
                    k_value.clone(),
                    k.into(),
                    o.clone().into_value(),
                ])),
            )?;
            // iii. If selected is true, then
            if to_boolean(&result) {
                // 1. Perform ? CreateDataPropertyOrThrow(A, ! ToString(𝔽(to)), kValue).
                // 2. Set to to to + 1.
                a.push(k_value);
            }
        }
        // 8. Return A.
        Ok(a.into())
    }

    /// ### [23.1.3.9 Array.prototype.find ( predicate \[ , thisArg \] )](https://tc39.es/ecma262/#sec-array.prototype.find)
    ///
    /// > #### Note 1
    /// >
    /// > This method calls predicate once for each element of the array, in
    /// > ascending index order, until it finds one where predicate returns a
    /// > value that coerces to true. If such an element is found, find
    /// > immediately returns that element value. Otherwise, find returns
    /// > undefined.
    pub fn find(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        // 1. Let O be ? ToObject(this value).
        let o = to_object(agent, &this_value)?;
        // 2. Let len be ? LengthOfArrayLike(O).
        let len = length_of_array_like(&o);
        let predicate = arguments.get(0);
        let this_arg = arguments.get(1);
        // 3. Let findRec be ? FindViaPredicate(O, len, ascending, predicate, thisArg).
        let (_, value) = find_via_predicate(agent, &o, len, true, &predicate, this_arg)?;
        // 4. Return findRec.[[Value]].
        Ok(value)
    }

    /// ### [23.1.3.10 Array.prototype.findIndex ( predicate \[ , thisArg \] )](https://tc39.es/ecma262/#sec-array.prototype.findindex)
    ///
    /// > #### Note 1
    /// >
    /// > This method calls predicate once for each element of the array, in
    /// > ascending index order, until it finds one where predicate returns a
    /// > value that coerces to true. If such an element is found, findIndex
    /// > immediately returns the index of that element value. Otherwise,
    /// > findIndex returns -1.
    pub fn find_index(
        agent: &mut Agent,
        this_value: Value,
        arguments: ArgumentsList,
    ) -> JsResult<Value> {
        // 1. Let O be ? ToObject(this value).
        let o = to_object(agent, &this_value)?;
        // 2. Let len be ? LengthOfArrayLike(O).
        let len = length_of_array_like(&o);
        let predicate = arguments.get(0);
        let this_arg = arguments.get(1);
        // 3. Let findRec be ? FindViaPredicate(O, len, ascending, predicate, thisArg).
        let (index, _) = find_via_predicate(agent, &o, len, true, &predicate, this_arg)?;
        // 4. Return findRec.[[Index]].
        Ok(index_or_minus_one(index))
    }

    /// ### [23.1.3.11 Array.prototype.findLast ( predicate \[ , thisArg \] )](https://tc39.es/ecma262/#sec-array.prototype.findlast)
    pub fn find_last(
        agent: &mut Agent,
        this_value: Value,
        arguments: ArgumentsList,
    ) -> JsResult<Value> {
        // 1. Let O be ? ToObject(this value).
        let o = to_object(agent, &this_value)?;
        // 2. Let len be ? LengthOfArrayLike(O).
        let len = length_of_array_like(&o);
        let predicate = arguments.get(0);
        let this_arg = arguments.get(1);
        // 3. Let findRec be ? FindViaPredicate(O, len, descending, predicate, thisArg).
        let (_, value) = find_via_predicate(agent, &o, len, false, &predicate, this_arg)?;
        // 4. Return findRec.[[Value]].
        Ok(value)
    }

    /// ### [23.1.3.12 Array.prototype.findLastIndex ( predicate \[ , thisArg \] )](https://tc39.es/ecma262/#sec-array.prototype.findlastindex)
    pub fn find_last_index(
        agent: &mut Agent,
        this_value: Value,
        arguments: ArgumentsList,
    ) -> JsResult<Value> {
        // 1. Let O be ? ToObject(this value).
        let o = to_object(agent, &this_value)?;
        // 2. Let len be ? LengthOfArrayLike(O).
        let len = length_of_array_like(&o);
        let predicate = arguments.get(0);
        let this_arg = arguments.get(1);
        // 3. Let findRec be ? FindViaPredicate(O, len, descending, predicate, thisArg).
        let (index, _) = find_via_predicate(agent, &o, len, false, &predicate, this_arg)?;
        // 4. Return findRec.[[Index]].
        Ok(index_or_minus_one(index))
    }

    /// ### [23.1.3.13 Array.prototype.flat ( \[ depth \] )](https://tc39.es/ecma262/#sec-array.prototype.flat)
    pub fn flat(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let depth = arguments.get(0);
        // 1. Let O be ? ToObject(this value).
        let o = to_object(agent, &this_value)?;
        // 2. Let sourceLen be ? LengthOfArrayLike(O).
        let source_len = length_of_array_like(&o);
        // 3. Let depthNum be 1.
        // 4. If depth is not undefined, then
        let depth_num = if depth.is_undefined() {
            Some(1)
        } else {
            // a. Set depthNum to ? ToIntegerOrInfinity(depth).
            let depth_num = to_integer_or_infinity(&depth);
            // b. If depthNum < 0, set depthNum to 0.
            if depth_num < 0.0 {
                Some(0)
            } else {
                // +∞ is an unbounded depth.
                depth_num.to_usize()
            }
        };
        debug!(source_len, depth = ?depth_num, "flat");
        // 5. Let A be ? ArraySpeciesCreate(O, 0).
        let a = array_create(agent, 0)?;
        // 6. Perform ? FlattenIntoArray(A, O, sourceLen, 0, depthNum).
        flatten_into_array(agent, &a, &o, source_len, depth_num, None, 0)?;
        // 7. Return A.
        Ok(a.into())
    }

    /// ### [23.1.3.14 Array.prototype.flatMap ( mapperFunction \[ , thisArg \] )](https://tc39.es/ecma262/#sec-array.prototype.flatmap)
    pub fn flat_map(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let mapper_function = arguments.get(0);
        let this_arg = arguments.get(1);

        // 1. Let O be ? ToObject(this value).
        let o = to_object(agent, &this_value)?;
        // 2. Let sourceLen be ? LengthOfArrayLike(O).
        let source_len = length_of_array_like(&o);
        // 3. If IsCallable(mapperFunction) is false, throw a TypeError exception.
        let Some(mapper_function) = is_callable(&mapper_function) else {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "Mapper function is not callable",
            ));
        };
        debug!(source_len, "flatMap");
        // 4. Let A be ? ArraySpeciesCreate(O, 0).
        let a = array_create(agent, 0)?;
        // 5. Perform ? FlattenIntoArray(A, O, sourceLen, 0, 1, mapperFunction, thisArg).
        flatten_into_array(
            agent,
            &a,
            &o,
            source_len,
            Some(1),
            Some((&mapper_function, &this_arg)),
            0,
        )?;
        // 6. Return A.
        Ok(a.into())
    }

    /// ### [23.1.3.15 Array.prototype.forEach ( callbackfn \[ , thisArg \] )](https://tc39.es/ecma262/#sec-array.prototype.foreach)
    ///
    /// > #### Note 1
    /// >
    /// > callbackfn should be a function that accepts three arguments.
    /// > forEach calls callbackfn once for each element present in the
    /// > array, in ascending order. callbackfn is called only for elements
    /// > of the array which actually exist; it is not called for missing
    /// > elements of the array.
    /// >
    /// > The range of elements processed by forEach is set before the
    /// > first call to callbackfn. Elements which are appended to the
    /// > array after the call to forEach begins will not be visited by
    /// > callbackfn. If existing elements of the array are changed, their
    /// > value as passed to callbackfn will be the value at the time
    /// > forEach visits them; elements that are deleted after the call to
    /// > forEach begins and before being visited are not visited.
    pub fn for_each(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let callback_fn = arguments.get(0);
        let this_arg = arguments.get(1);

        // 1. Let O be ? ToObject(this value).
        let o = to_object(agent, &this_value)?;
        // 2. Let len be ? LengthOfArrayLike(O).
        let len = length_of_array_like(&o);
        // 3. If IsCallable(callbackfn) is false, throw a TypeError exception.
        let Some(callback_fn) = is_callable(&callback_fn) else {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "Callback function is not callable",
            ));
        };
        // 4. Let k be 0.
        // 5. Repeat, while k < len,
        for k in 0..len {
            // b. Let kPresent be ? HasProperty(O, Pk).
            // c. If kPresent is true, then
            if has_property(&o, k) {
                // i. Let kValue be ? Get(O, Pk).
                let k_value = get(&o, k);
                // ii. Perform ? Call(callbackfn, thisArg, « kValue, 𝔽(k), O »).
                call_function(
                    agent,
                    &callback_fn,
                    this_arg.clone(),
                    Some(ArgumentsList(&[k_value, k.into(), o.clone().into_value()])),
                )?;
            }
        }
        // 6. Return undefined.
        Ok(Value::Undefined)
    }

    /// ### [23.1.3.16 Array.prototype.includes ( searchElement \[ , fromIndex \] )](https://tc39.es/ecma262/#sec-array.prototype.includes)
    ///
    /// > #### Note 1
    /// >
    /// > This method compares searchElement to the elements of the array, in
    /// > ascending order, using the SameValueZero algorithm, and if found at
    /// > any position, returns true; otherwise, it returns false.
    /// >
    /// > The optional second argument fromIndex defaults to +0𝔽 (i.e. the
    /// > whole array is searched). If it is greater than or equal to the
    /// > length of the array, false is returned, i.e. the array will not be
    /// > searched. If it is less than -0𝔽, it is used as the offset from the
    /// > end of the array to compute fromIndex. If the computed index is less
    /// > than or equal to +0𝔽, the whole array will be searched.
    ///
    /// > #### Note 3
    /// >
    /// > The includes method intentionally differs from the similar indexOf
    /// > method in two ways. First, it uses the SameValueZero algorithm,
    /// > instead of IsStrictlyEqual, allowing it to detect NaN array elements.
    /// > Second, it does not skip missing array elements, instead treating
    /// > them as undefined.
    pub fn includes(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let search_element = arguments.get(0);
        let from_index = arguments.get(1);
        // 1. Let O be ? ToObject(this value).
        let o = to_object(agent, &this_value)?;
        // 2. Let len be ? LengthOfArrayLike(O).
        let len = length_of_array_like(&o);
        // 3. If len = 0, return false.
        if len == 0 {
            return Ok(false.into());
        }
        // 4. Let n be ? ToIntegerOrInfinity(fromIndex).
        let n = to_integer_or_infinity(&from_index);
        // 5. Assert: If fromIndex is undefined, then n is 0.
        debug_assert!(!from_index.is_undefined() || n == 0.0);
        // 6. If n = +∞, return false.
        // 7. Else if n = -∞, set n to 0.
        // 8. If n ≥ 0, then
        //   a. Let k be n.
        // 9. Else,
        //   a. Let k be len + n.
        //   b. If k < 0, set k to 0.
        let k = relative_index(n, len);
        // 10. Repeat, while k < len,
        for k in k..len {
            // a. Let elementK be ? Get(O, ! ToString(𝔽(k))).
            let element_k = get(&o, k);
            // b. If SameValueZero(searchElement, elementK) is true, return true.
            if same_value_zero(&search_element, &element_k) {
                return Ok(true.into());
            }
        }
        // 11. Return false.
        Ok(false.into())
    }

    /// ### [23.1.3.17 Array.prototype.indexOf ( searchElement \[ , fromIndex \] )](https://tc39.es/ecma262/#sec-array.prototype.indexof)
    ///
    /// This method compares searchElement to the elements of the array, in
    /// ascending order, using the IsStrictlyEqual algorithm, and if found
    /// at one or more indices, returns the smallest such index; otherwise,
    /// it returns -1𝔽.
    pub fn index_of(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let search_element = arguments.get(0);
        let from_index = arguments.get(1);
        // 1. Let O be ? ToObject(this value).
        let o = to_object(agent, &this_value)?;
        // 2. Let len be ? LengthOfArrayLike(O).
        let len = length_of_array_like(&o);
        // 3. If len = 0, return -1𝔽.
        if len == 0 {
            return Ok(Value::Number(-1.0));
        }
        // 4. Let n be ? ToIntegerOrInfinity(fromIndex).
        let n = to_integer_or_infinity(&from_index);
        // 6. If n = +∞, return -1𝔽.
        // 7. Else if n = -∞, set n to 0.
        let k = relative_index(n, len);
        // 10. Repeat, while k < len,
        for k in k..len {
            // a. Let kPresent be ? HasProperty(O, ! ToString(𝔽(k))).
            // b. If kPresent is true, then
            if has_property(&o, k) {
                // i. Let elementK be ? Get(O, ! ToString(𝔽(k))).
                let element_k = get(&o, k);
                // ii. If IsStrictlyEqual(searchElement, elementK) is true, return 𝔽(k).
                if is_strictly_equal(&search_element, &element_k) {
                    return Ok(k.into());
                }
            }
        }
        // 11. Return -1𝔽.
        Ok(Value::Number(-1.0))
    }

    /// ### [23.1.3.18 Array.prototype.join ( separator )](https://tc39.es/ecma262/#sec-array.prototype.join)
    ///
    /// This method converts the elements of the array to Strings, and then
    /// concatenates these Strings, separated by occurrences of the separator.
    /// If no separator is provided, a single comma is used as the separator.
    pub fn join(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let separator = arguments.get(0);
        // 1. Let O be ? ToObject(this value).
        let o = to_object(agent, &this_value)?;
        // 3. If separator is undefined, let sep be ",".
        let sep = if separator.is_undefined() {
            JsString::from_str(",")
        } else {
            // 4. Else, let sep be ? ToString(separator).
            to_string(&separator)
        };
        Ok(join_array_like(&o, &sep, &mut Vec::new()).into())
    }

    /// ### [23.1.3.20 Array.prototype.lastIndexOf ( searchElement \[ , fromIndex \] )](https://tc39.es/ecma262/#sec-array.prototype.lastindexof)
    ///
    /// > #### Note 1
    /// >
    /// > The optional second argument fromIndex defaults to the array's length
    /// > minus one (i.e. the whole array is searched). If it is greater than
    /// > or equal to the length of the array, the whole array will be
    /// > searched. If it is less than -0𝔽, it is used as the offset from the
    /// > end of the array to compute fromIndex. If the computed index is less
    /// > than or equal to +0𝔽, -1𝔽 is returned.
    pub fn last_index_of(
        agent: &mut Agent,
        this_value: Value,
        arguments: ArgumentsList,
    ) -> JsResult<Value> {
        let search_element = arguments.get(0);
        // 1. Let O be ? ToObject(this value).
        let o = to_object(agent, &this_value)?;
        // 2. Let len be ? LengthOfArrayLike(O).
        let len = length_of_array_like(&o);
        // 3. If len = 0, return -1𝔽.
        if len == 0 {
            return Ok(Value::Number(-1.0));
        }
        // 4. If fromIndex is present, let n be ? ToIntegerOrInfinity(fromIndex);
        //    else let n be len - 1.
        let last = len - 1;
        let n = if arguments.len() > 1 {
            to_integer_or_infinity(&arguments.get(1))
        } else {
            last as f64
        };
        // 5. If n = -∞, return -1𝔽.
        // 6. If n ≥ 0, then
        //   a. Let k be min(n, len - 1).
        // 7. Else,
        //   a. Let k be len + n.
        let k = if n >= 0.0 {
            n.to_usize().map_or(last, |n| n.min(last))
        } else {
            match (-n).to_usize().and_then(|back| len.checked_sub(back)) {
                Some(k) => k,
                None => return Ok(Value::Number(-1.0)),
            }
        };
        // 8. Repeat, while k ≥ 0,
        for k in (0..=k).rev() {
            // a. Let kPresent be ? HasProperty(O, ! ToString(𝔽(k))).
            // b. If kPresent is true, then
            if has_property(&o, k) {
                // i. Let elementK be ? Get(O, ! ToString(𝔽(k))).
                let element_k = get(&o, k);
                // ii. If IsStrictlyEqual(searchElement, elementK) is true, return 𝔽(k).
                if is_strictly_equal(&search_element, &element_k) {
                    return Ok(k.into());
                }
            }
        }
        // 9. Return -1𝔽.
        Ok(Value::Number(-1.0))
    }

    /// ### [23.1.3.21 Array.prototype.map ( callbackfn \[ , thisArg \] )](https://tc39.es/ecma262/#sec-array.prototype.map)
    ///
    /// > #### Note 1
    /// >
    /// > callbackfn should be a function that accepts three arguments. map
    /// > calls callbackfn once for each element in the array, in ascending
    /// > order, and constructs a new Array from the results. callbackfn is
    /// > called only for elements of the array which actually exist; it is
    /// > not called for missing elements of the array.
    ///
    /// The result has the same length as the source and a hole wherever the
    /// source has one.
    pub fn map(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let callback_fn = arguments.get(0);
        let this_arg = arguments.get(1);

        // 1. Let O be ? ToObject(this value).
        let o = to_object(agent, &this_value)?;
        // 2. Let len be ? LengthOfArrayLike(O).
        let len = length_of_array_like(&o);
        // 3. If IsCallable(callbackfn) is false, throw a TypeError exception.
        let Some(callback_fn) = is_callable(&callback_fn) else {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "Callback function is not a function",
            ));
        };
        // 4. Let A be ? ArraySpeciesCreate(O, len).
        let a = array_create(agent, len)?;
        // 5. Let k be 0.
        // 6. Repeat, while k < len,
        for k in 0..len {
            // b. Let kPresent be ? HasProperty(O, Pk).
            // c. If kPresent is true, then
            if !has_property(&o, k) {
                continue;
            }
            // i. Let kValue be ? Get(O, Pk).
            let k_value = get(&o, k);
            // ii. Let mappedValue be ? Call(callbackfn, thisArg, « kValue, 𝔽(k), O »).
            let mapped_value = call_function(
                agent,
                &callback_fn,
                this_arg.clone(),
                Some(ArgumentsList(&[k_value, k.into(), o.clone().into_value()])),
            )?;
            // iii. Perform ? CreateDataPropertyOrThrow(A, Pk, mappedValue).
            a.set(k, mapped_value);
        }
        // 7. Return A.
        Ok(a.into())
    }

    /// ### [23.1.3.24 Array.prototype.reduce ( callbackfn \[ , initialValue \] )](https://tc39.es/ecma262/#sec-array.prototype.reduce)
    ///
    /// > #### Note 1
    /// >
    /// > callbackfn should be a function that takes four arguments. reduce
    /// > calls the callback, as a function, once for each element after the
    /// > first element present in the array, in ascending order.
    /// >
    /// > callbackfn is called with four arguments: the previousValue (value
    /// > from the previous call to callbackfn), the currentValue (value of the
    /// > current element), the currentIndex, and the object being traversed.
    /// > The first time that callback is called, the previousValue and
    /// > currentValue can be one of two values. If an initialValue was
    /// > supplied in the call to reduce, then previousValue will be
    /// > initialValue and currentValue will be the first value in the array.
    /// > If no initialValue was supplied, then previousValue will be the first
    /// > value in the array and currentValue will be the second. It is a
    /// > TypeError if the array contains no elements and initialValue is not
    /// > provided.
    ///
    /// With [`Options::reduce_reads_index_zero`](crate::ecmascript::execution::Options)
    /// set, a missing initialValue is replaced by whatever index 0 holds, and
    /// a hole there reads as `undefined`.
    pub fn reduce(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let callback_fn = arguments.get(0);
        let initial_value = (arguments.len() >= 2).then(|| arguments.get(1));

        // 1. Let O be ? ToObject(this value).
        let o = to_object(agent, &this_value)?;
        // 2. Let len be ? LengthOfArrayLike(O).
        let len = length_of_array_like(&o);

        // 3. If IsCallable(callbackfn) is false, throw a TypeError exception.
        let Some(callback_fn) = is_callable(&callback_fn) else {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "Callback function is not a function",
            ));
        };

        // 4. If len = 0 and initialValue is not present, throw a TypeError exception.
        if len == 0 && initial_value.is_none() {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "Reduce of empty array with no initial value",
            ));
        }

        // 5. Let k be 0.
        let mut indices = 0..len;
        // 6. Let accumulator be undefined.
        let accumulator = match initial_value {
            // 7. If initialValue is present,
            //   a. Set accumulator to initialValue.
            Some(initial_value) => initial_value,
            None if agent.options().reduce_reads_index_zero => {
                indices.next();
                get(&o, 0)
            }
            // 8. Else,
            None => {
                // a. Let kPresent be false.
                // b. Repeat, while kPresent is false and k < len,
                //   ii. Set kPresent to ? HasProperty(O, Pk).
                //   iii. If kPresent is true, then
                //     1. Set accumulator to ? Get(O, Pk).
                //   iv. Set k to k + 1.
                // c. If kPresent is false, throw a TypeError exception.
                let Some(k) = indices.by_ref().find(|&k| has_property(&o, k)) else {
                    return Err(agent.throw_exception_with_static_message(
                        ExceptionType::TypeError,
                        "Reduce of empty array with no initial value",
                    ));
                };
                get(&o, k)
            }
        };

        // 9. Repeat, while k < len,
        reduce_over(agent, &o, &callback_fn, accumulator, indices)
    }

    /// ### [23.1.3.25 Array.prototype.reduceRight ( callbackfn \[ , initialValue \] )](https://tc39.es/ecma262/#sec-array.prototype.reduceright)
    ///
    /// > Note 1
    /// >
    /// > callbackfn should be a function that takes four arguments.
    /// > reduceRight calls the callback, as a function, once for each element
    /// > after the first element present in the array, in descending order.
    /// >
    /// > It is a TypeError if the array contains no elements and initialValue
    /// > is not provided.
    pub fn reduce_right(
        agent: &mut Agent,
        this_value: Value,
        arguments: ArgumentsList,
    ) -> JsResult<Value> {
        let callback_fn = arguments.get(0);
        let initial_value = (arguments.len() >= 2).then(|| arguments.get(1));

        // 1. Let O be ? ToObject(this value).
        let o = to_object(agent, &this_value)?;
        // 2. Let len be ? LengthOfArrayLike(O).
        let len = length_of_array_like(&o);

        // 3. If IsCallable(callbackfn) is false, throw a TypeError exception.
        let Some(callback_fn) = is_callable(&callback_fn) else {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "Callback function is not a function",
            ));
        };

        // 4. If len = 0 and initialValue is not present, throw a TypeError exception.
        if len == 0 && initial_value.is_none() {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "Reduce of empty array with no initial value",
            ));
        }

        // 5. Let k be len - 1.
        let mut indices = (0..len).rev();
        // 6. Let accumulator be undefined.
        let accumulator = match initial_value {
            // 7. If initialValue is present, then
            //   a. Set accumulator to initialValue.
            Some(initial_value) => initial_value,
            // 8. Else,
            None => {
                // a. Let kPresent be false.
                // b. Repeat, while kPresent is false and k ≥ 0,
                // c. If kPresent is false, throw a TypeError exception.
                let Some(k) = indices.by_ref().find(|&k| has_property(&o, k)) else {
                    return Err(agent.throw_exception_with_static_message(
                        ExceptionType::TypeError,
                        "Reduce of empty array with no initial value",
                    ));
                };
                get(&o, k)
            }
        };

        // 9. Repeat, while k ≥ 0,
        reduce_over(agent, &o, &callback_fn, accumulator, indices)
    }

    /// ### [23.1.3.29 Array.prototype.some ( callbackfn \[ , thisArg \] )](https://tc39.es/ecma262/#sec-array.prototype.some)
    pub fn some(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let callback_fn = arguments.get(0);
        let this_arg = arguments.get(1);

        // 1. Let O be ? ToObject(this value).
        let o = to_object(agent, &this_value)?;
        // 2. Let len be ? LengthOfArrayLike(O).
        let len = length_of_array_like(&o);
        // 3. If IsCallable(callbackfn) is false, throw a TypeError exception.
        let Some(callback_fn) = is_callable(&callback_fn) else {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "Callback function is not callable",
            ));
        };
        // 4. Let k be 0.
        // 5. Repeat, while k < len,
        for k in 0..len {
            // b. Let kPresent be ? HasProperty(O, Pk).
            // c. If kPresent is true, then
            if !has_property(&o, k) {
                continue;
            }
            // i. Let kValue be ? Get(O, Pk).
            let k_value = get(&o, k);
            // ii. Let testResult be ToBoolean(? Call(callbackfn, thisArg, « kValue, 𝔽(k), O »)).
            let test_result = call_function(
                agent,
                &callback_fn,
                this_arg.clone(),
                Some(ArgumentsList(&[k_value, k.into(), o.clone().into_value()])),
            )?;
            // iii. If testResult is true, return true.
            if to_boolean(&test_result) {
                return Ok(true.into());
            }
        }
        // 6. Return false.
        Ok(false.into())
    }

    /// ### [23.1.3.30 Array.prototype.sort ( comparator )](https://tc39.es/ecma262/#sec-array.prototype.sort)
    ///
    /// This method sorts the elements of this array. The sort is stable
    /// (that is, elements that compare equal remain in their original
    /// order). If comparator is not undefined, it should be a function that
    /// accepts two arguments x and y and returns a negative Number if x < y, a
    /// positive Number if x > y, or a zero otherwise.
    ///
    /// Holes are read as `undefined`; every `undefined` sorts to the end and
    /// is written back as a present element. Nothing is written if the
    /// comparator throws.
    ///
    /// > #### Note 3
    /// > This method is intentionally generic; it does not require that its
    /// > this value be an Array. Therefore, it can be transferred to other
    /// > kinds of objects for use as a method.
    pub fn sort(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let comparator = arguments.get(0);
        // 1. If comparator is not undefined and IsCallable(comparator) is false, throw a TypeError exception.
        let comparator = if comparator.is_undefined() {
            None
        } else if let Some(comparator) = is_callable(&comparator) {
            Some(comparator)
        } else {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "The comparison function must be either a function or undefined",
            ));
        };
        // 2. Let obj be ? ToObject(this value).
        let obj = to_object(agent, &this_value)?;
        // 3. Let len be ? LengthOfArrayLike(obj).
        let len = length_of_array_like(&obj);
        if len <= 1 {
            return Ok(obj.into_value());
        }
        debug!(len, has_comparator = comparator.is_some(), "sort");
        // 4. Let SortCompare be a new Abstract Closure with parameters (x, y)
        //     that captures comparator and performs the following steps when
        //     called:
        //       a. Return ? CompareArrayElements(x, y, comparator).
        // 5. Let sortedList be ? SortIndexedProperties(obj, len, SortCompare,
        //     read-through-holes).
        let sorted_list = sort_indexed_properties(agent, &obj, len, comparator.as_ref())?;
        // 6. Let itemCount be the number of elements in sortedList.
        // 7. Let j be 0.
        // 8. Repeat, while j < itemCount,
        for (j, item) in sorted_list.into_iter().enumerate() {
            // a. Perform ? Set(obj, ! ToString(𝔽(j)), sortedList[j], true).
            set(agent, &obj, j, item)?;
        }
        // 11. Return obj.
        Ok(obj.into_value())
    }

    /// ### [23.1.3.34 Array.prototype.toSorted ( comparator )](https://tc39.es/ecma262/#sec-array.prototype.tosorted)
    ///
    /// Like [`sort`](Self::sort), but sorts into a new Array and leaves the
    /// this value untouched.
    pub fn to_sorted(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let comparator = arguments.get(0);
        // 1. If comparator is not undefined and IsCallable(comparator) is false, throw a TypeError exception.
        let comparator = if comparator.is_undefined() {
            None
        } else if let Some(comparator) = is_callable(&comparator) {
            Some(comparator)
        } else {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "The comparison function must be either a function or undefined",
            ));
        };
        // 2. Let O be ? ToObject(this value).
        let o = to_object(agent, &this_value)?;
        // 3. Let len be ? LengthOfArrayLike(O).
        let len = length_of_array_like(&o);
        // 4. Let A be ? ArrayCreate(len).
        let a = array_create(agent, len)?;
        debug!(len, has_comparator = comparator.is_some(), "toSorted");
        // 5. Let SortCompare be a new Abstract Closure with parameters (x, y) that captures comparator and performs the following steps when called:
        //   a. Return ? CompareArrayElements(x, y, comparator).
        // 6. Let sortedList be ? SortIndexedProperties(O, len, SortCompare, read-through-holes).
        let sorted_list = sort_indexed_properties(agent, &o, len, comparator.as_ref())?;
        // 7. Let j be 0.
        // 8. Repeat, while j < len,
        for (j, item) in sorted_list.into_iter().enumerate() {
            // a. Perform ! CreateDataPropertyOrThrow(A, ! ToString(𝔽(j)), sortedList[j]).
            a.set(j, item);
        }
        // 9. Return A.
        Ok(a.into())
    }

    /// ### [23.1.3.36 Array.prototype.toString ( )](https://tc39.es/ecma262/#sec-array.prototype.tostring)
    pub fn to_string(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        // 1. Let array be ? ToObject(this value).
        // 2. Let func be ? Get(array, "join").
        // 4. Return ? Call(func, array).
        Self::join(agent, this_value, ArgumentsList::default())
    }

    /// Builds `%Array.prototype%`: one function property per method.
    pub(crate) fn create_intrinsic() -> OrdinaryObject {
        OrdinaryObjectBuilder::new()
            .with_property_capacity(20)
            .with_builtin_function_property::<ArrayPrototypeEvery>()
            .with_builtin_function_property::<ArrayPrototypeFilter>()
            .with_builtin_function_property::<ArrayPrototypeFind>()
            .with_builtin_function_property::<ArrayPrototypeFindIndex>()
            .with_builtin_function_property::<ArrayPrototypeFindLast>()
            .with_builtin_function_property::<ArrayPrototypeFindLastIndex>()
            .with_builtin_function_property::<ArrayPrototypeFlat>()
            .with_builtin_function_property::<ArrayPrototypeFlatMap>()
            .with_builtin_function_property::<ArrayPrototypeForEach>()
            .with_builtin_function_property::<ArrayPrototypeIncludes>()
            .with_builtin_function_property::<ArrayPrototypeIndexOf>()
            .with_builtin_function_property::<ArrayPrototypeJoin>()
            .with_builtin_function_property::<ArrayPrototypeLastIndexOf>()
            .with_builtin_function_property::<ArrayPrototypeMap>()
            .with_builtin_function_property::<ArrayPrototypeReduce>()
            .with_builtin_function_property::<ArrayPrototypeReduceRight>()
            .with_builtin_function_property::<ArrayPrototypeSome>()
            .with_builtin_function_property::<ArrayPrototypeSort>()
            .with_builtin_function_property::<ArrayPrototypeToSorted>()
            .with_builtin_function_property::<ArrayPrototypeToString>()
            .build()
    }
}

fn index_or_minus_one(index: Option<usize>) -> Value {
    index.map_or(Value::Number(-1.0), Value::from)
}

/// Resolves a relative `fromIndex` already passed through
/// ToIntegerOrInfinity: negative values count back from `len`, and the
/// result is clamped to `0..=len`.
fn relative_index(n: f64, len: usize) -> usize {
    if n >= 0.0 {
        // +∞ clamps to len.
        n.to_usize().map_or(len, |n| n.min(len))
    } else {
        // -∞ clamps to 0.
        (-n).to_usize().map_or(0, |back| len.saturating_sub(back))
    }
}

/// The shared loop of reduce and reduceRight: folds the present elements at
/// `indices` into `accumulator`.
fn reduce_over(
    agent: &mut Agent,
    o: &Object,
    callback_fn: &Function,
    mut accumulator: Value,
    indices: impl Iterator<Item = usize>,
) -> JsResult<Value> {
    for k in indices {
        // b. Let kPresent be ? HasProperty(O, Pk).
        // c. If kPresent is true, then
        if !has_property(o, k) {
            continue;
        }
        // i. Let kValue be ? Get(O, Pk).
        let k_value = get(o, k);
        // ii. Set accumulator to ? Call(callbackfn, undefined, « accumulator, kValue, 𝔽(k), O »).
        accumulator = call_function(
            agent,
            callback_fn,
            Value::Undefined,
            Some(ArgumentsList(&[
                accumulator,
                k_value,
                k.into(),
                o.clone().into_value(),
            ])),
        )?;
    }
    // 10. Return accumulator.
    Ok(accumulator)
}

/// ### [23.1.3.12.1 FindViaPredicate ( O, len, direction, predicate, thisArg )](https://tc39.es/ecma262/#sec-findviapredicate)
///
/// The abstract operation FindViaPredicate takes arguments O (an Object), len
/// (a non-negative integer), direction (ascending or descending), predicate
/// (an ECMAScript language value), and thisArg (an ECMAScript language value)
/// and returns either a normal completion containing a Record with fields
/// \[\[Index\]\] (an integral Number) and \[\[Value\]\] (an ECMAScript
/// language value) or a throw completion.
///
/// Holes are skipped: predicate is only called for indices that hold an
/// element.
fn find_via_predicate(
    agent: &mut Agent,
    o: &Object,
    len: usize,
    ascending: bool,
    predicate: &Value,
    this_arg: Value,
) -> JsResult<(Option<usize>, Value)> {
    // 1. If IsCallable(predicate) is false, throw a TypeError exception.
    let Some(predicate) = is_callable(predicate) else {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Predicate is not a function",
        ));
    };
    // 2. If direction is ascending, then
    //   a. Let indices be a List of the integers in the interval from 0 (inclusive) to len (exclusive), in ascending order.
    // 3. Else,
    //   a. Let indices be a List of the integers in the interval from 0 (inclusive) to len (exclusive), in descending order.
    let indices: Box<dyn Iterator<Item = usize>> = if ascending {
        Box::new(0..len)
    } else {
        Box::new((0..len).rev())
    };
    // 4. For each integer k of indices, do
    for k in indices {
        if !has_property(o, k) {
            continue;
        }
        // c. Let kValue be ? Get(O, Pk).
        let k_value = get(o, k);
        // d. Let testResult be ? Call(predicate, thisArg, « kValue, 𝔽(k), O »).
        let test_result = call_function(
            agent,
            &predicate,
            this_arg.clone(),
            Some(ArgumentsList(&[
                k_value.clone(),
                k.into(),
                o.clone().into_value(),
            ])),
        )?;
        // e. If ToBoolean(testResult) is true, return the Record { [[Index]]: 𝔽(k), [[Value]]: kValue }.
        if to_boolean(&test_result) {
            return Ok((Some(k), k_value));
        }
    }
    // 5. Return the Record { [[Index]]: -1𝔽, [[Value]]: undefined }.
    Ok((None, Value::Undefined))
}

/// How many arrays deep flattening may descend.
const MAX_FLATTEN_NESTING: usize = 512;

/// ### [23.1.3.13.1 FlattenIntoArray ( target, source, sourceLen, start, depth \[ , mapperFunction \[ , thisArg \] \] )](https://tc39.es/ecma262/#sec-flattenintoarray)
///
/// The abstract operation FlattenIntoArray takes arguments target (an Object),
/// source (an Object), sourceLen (a non-negative integer), start (a
/// non-negative integer), and depth (a non-negative integer or +∞) and
/// optional arguments mapperFunction (a function object) and thisArg (an
/// ECMAScript language value) and returns either a normal completion
/// containing a non-negative integer or a throw completion.
///
/// Elements are appended to `target`, so start is always its current length.
/// A `depth` of `None` is +∞. `nesting` counts the enclosing calls; past
/// [`MAX_FLATTEN_NESTING`] a RangeError is thrown, which is also how an
/// array that contains itself ends under an unbounded depth.
fn flatten_into_array(
    agent: &mut Agent,
    target: &Array,
    source: &Object,
    source_len: usize,
    depth: Option<usize>,
    mapper: Option<(&Function, &Value)>,
    nesting: usize,
) -> JsResult<()> {
    // 1. Assert: If mapperFunction is present, then IsCallable(mapperFunction) is true, thisArg is present, and depth is 1.
    debug_assert!(mapper.is_none() || depth == Some(1));
    // 3. Let sourceIndex be +0𝔽.
    // 4. Repeat, while ℝ(sourceIndex) < sourceLen,
    for source_index in 0..source_len {
        // b. Let exists be ? HasProperty(source, P).
        // c. If exists is true, then
        if !has_property(source, source_index) {
            continue;
        }
        // i. Let element be ? Get(source, P).
        let element = get(source, source_index);
        // ii. If mapperFunction is present, then
        let element = if let Some((mapper_function, this_arg)) = mapper {
            // 1. Set element to ? Call(mapperFunction, thisArg, « element, sourceIndex, source »).
            call_function(
                agent,
                mapper_function,
                this_arg.clone(),
                Some(ArgumentsList(&[
                    element,
                    source_index.into(),
                    source.clone().into_value(),
                ])),
            )?
        } else {
            element
        };
        // iii. Let shouldFlatten be false.
        // iv. If depth > 0, then
        //   1. Set shouldFlatten to ? IsArray(element).
        let should_flatten = depth.is_none_or(|depth| depth > 0) && is_array(&element);
        match element {
            // v. If shouldFlatten is true, then
            Value::Array(element) if should_flatten => {
                // 1. If depth = +∞, let newDepth be +∞.
                // 2. Else, let newDepth be depth - 1.
                let new_depth = depth.map(|depth| depth - 1);
                if nesting >= MAX_FLATTEN_NESTING {
                    return Err(agent.throw_exception_with_static_message(
                        ExceptionType::RangeError,
                        "Maximum call stack size exceeded",
                    ));
                }
                // 3. Let elementLen be ? LengthOfArrayLike(element).
                let element_len = element.len();
                trace!(element_len, depth = ?new_depth, "flatten nested array");
                // 4. Set targetIndex to ? FlattenIntoArray(target, element, elementLen, targetIndex, newDepth).
                flatten_into_array(
                    agent,
                    target,
                    &Object::Array(element),
                    element_len,
                    new_depth,
                    None,
                    nesting + 1,
                )?;
            }
            // vi. Else,
            element => {
                // 1. If targetIndex ≥ 2**53 - 1, throw a TypeError exception.
                if target.len() as f64 >= MAX_SAFE_INTEGER {
                    return Err(agent.throw_exception_with_static_message(
                        ExceptionType::TypeError,
                        "Target index overflowed",
                    ));
                }
                // 2. Perform ? CreateDataPropertyOrThrow(target, ! ToString(𝔽(targetIndex)), element).
                // 3. Set targetIndex to targetIndex + 1.
                target.push(element);
            }
        }
    }
    // 5. Return targetIndex.
    Ok(())
}

/// ### [23.1.3.30.1 SortIndexedProperties ( obj, len, SortCompare, holes )](https://tc39.es/ecma262/#sec-sortindexedproperties)
///
/// The abstract operation SortIndexedProperties takes arguments obj (an
/// Object), len (a non-negative integer), SortCompare (an Abstract Closure
/// with two parameters), and holes (skip-holes or read-through-holes) and
/// returns either a normal completion containing a List of ECMAScript language
/// values or a throw completion.
///
/// Holes are always read through: each one contributes an `undefined`.
///
/// An abstract closure or function comparator is a consistent comparator for a
/// set of values `S` if all of the requirements below are met for all values
/// `a`, `b`, and `c` (possibly the same value) in the set S: The notation
/// `a <C b` means `ℝ(comparator(a, b)) < 0`; `a =C b` means
/// `ℝ(comparator(a, b)) = 0`; and `a >C b` means `ℝ(comparator(a, b)) > 0`.
///
/// * Calling `comparator(a, b)` always returns the same value `v` when given a
///   specific pair of values `a` and `b` as its two arguments.
/// * `a =C a` (reflexivity)
/// * If `a =C b`, then `b =C a` (symmetry)
/// * If `a =C b` and `b =C c`, then `a =C c` (transitivity of `=C`)
/// * If `a <C b` and `b <C c`, then `a <C c` (transitivity of `<C`)
/// * If `a >C b` and `b >C c`, then `a >C c` (transitivity of `>C`)
///
/// An inconsistent comparator still yields a permutation of the items, in
/// some unspecified order.
fn sort_indexed_properties(
    agent: &mut Agent,
    obj: &Object,
    len: usize,
    comparator: Option<&Function>,
) -> JsResult<Vec<Value>> {
    // 1. Let items be a new empty List.
    // 2. Let k be 0.
    // 3. Repeat, while k < len,
    //   c. Else,
    //     i. Assert: holes is read-through-holes.
    //     ii. Let kRead be true.
    //   d. If kRead is true, then
    //     i. Let kValue be ? Get(obj, Pk).
    //     ii. Append kValue to items.
    let items = (0..len).map(|k| get(obj, k)).collect::<Vec<_>>();
    // 4. Sort items using an implementation-defined sequence of calls to
    // SortCompare. If any such call returns an abrupt completion, stop before
    // performing any further calls to SortCompare and return that Completion
    // Record.
    // 5. Return items.
    merge_sort(agent, items, comparator)
}

/// Top-down merge sort. Stable: on ties the element from the left run is
/// taken first.
fn merge_sort(
    agent: &mut Agent,
    mut items: Vec<Value>,
    comparator: Option<&Function>,
) -> JsResult<Vec<Value>> {
    if items.len() <= 1 {
        return Ok(items);
    }
    let right = items.split_off(items.len() / 2);
    let left = merge_sort(agent, items, comparator)?;
    let right = merge_sort(agent, right, comparator)?;
    merge(agent, left, right, comparator)
}

fn merge(
    agent: &mut Agent,
    left: Vec<Value>,
    right: Vec<Value>,
    comparator: Option<&Function>,
) -> JsResult<Vec<Value>> {
    let mut result = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    while let (Some(x), Some(y)) = (left.peek(), right.peek()) {
        if compare_array_elements(agent, x, y, comparator)? == Ordering::Greater {
            result.extend(right.next());
        } else {
            result.extend(left.next());
        }
    }
    result.extend(left);
    result.extend(right);
    Ok(result)
}

/// ### [23.1.3.30.2 CompareArrayElements ( x, y, comparator )](https://tc39.es/ecma262/#sec-comparearrayelements)
///
/// The abstract operation CompareArrayElements takes arguments x (an
/// ECMAScript language value), y (an ECMAScript language value), and
/// comparator (a function object or undefined) and returns either a normal
/// completion containing a Number or an abrupt completion.
fn compare_array_elements(
    agent: &mut Agent,
    x: &Value,
    y: &Value,
    comparator: Option<&Function>,
) -> JsResult<Ordering> {
    match (x.is_undefined(), y.is_undefined()) {
        // 1. If x and y are both undefined, return +0𝔽.
        (true, true) => return Ok(Ordering::Equal),
        // 2. If x is undefined, return 1𝔽.
        (true, false) => return Ok(Ordering::Greater),
        // 3. If y is undefined, return -1𝔽.
        (false, true) => return Ok(Ordering::Less),
        (false, false) => {}
    }
    // 4. If comparator is not undefined, then
    if let Some(comparator) = comparator {
        // a. Let v be ? ToNumber(? Call(comparator, undefined, « x, y »)).
        let v = call_function(
            agent,
            comparator,
            Value::Undefined,
            Some(ArgumentsList(&[x.clone(), y.clone()])),
        )?;
        let v = to_number(&v);
        // b. If v is NaN, return +0𝔽.
        // c. Return v.
        return Ok(v.partial_cmp(&0.0).unwrap_or(Ordering::Equal));
    }
    // 5. Let xString be ? ToString(x).
    let x = to_string(x);
    // 6. Let yString be ? ToString(y).
    let y = to_string(y);
    // 7. Let xSmaller be ! IsLessThan(xString, yString, true).
    // 8. If xSmaller is true, return -1𝔽.
    if is_less_than_string(&x, &y) {
        return Ok(Ordering::Less);
    }
    // 9. Let ySmaller be ! IsLessThan(yString, xString, true).
    // 10. If ySmaller is true, return 1𝔽.
    if is_less_than_string(&y, &x) {
        return Ok(Ordering::Greater);
    }
    // 11. Return +0𝔽.
    Ok(Ordering::Equal)
}

/// Steps 5 to 8 of Array.prototype.join, shared with ToString of an Array.
///
/// `seen` holds the objects currently being joined further up the stack; an
/// element that is one of them renders as the empty String.
pub(crate) fn join_array_like(o: &Object, sep: &JsString, seen: &mut Vec<Object>) -> JsString {
    // 2. Let len be ? LengthOfArrayLike(O).
    let len = length_of_array_like(o);
    seen.push(o.clone());
    // 5. Let R be the empty String.
    let mut r = Wtf8Buf::new();
    // 6. Let k be 0.
    // 7. Repeat, while k < len,
    for k in 0..len {
        // a. If k > 0, set R to the string-concatenation of R and sep.
        if k > 0 {
            r.push_wtf8(sep.as_wtf8());
        }
        // b. Let element be ? Get(O, ! ToString(𝔽(k))).
        let element = get(o, k);
        // c. If element is neither undefined nor null, then
        if !element.is_undefined() && !element.is_null() {
            // i. Let S be ? ToString(element).
            let s = to_string_with_seen(&element, seen);
            // ii. Set R to the string-concatenation of R and S.
            r.push_wtf8(s.as_wtf8());
        }
    }
    seen.pop();
    // 8. Return R.
    JsString::from_wtf8_buf(r)
}
