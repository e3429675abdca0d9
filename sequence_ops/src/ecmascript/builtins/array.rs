// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### 10.4.2 Array Exotic Objects
//!
//! https://tc39.es/ecma262/#sec-array-exotic-objects

pub(crate) mod abstract_operations;

use core::fmt;
use std::{cell::RefCell, rc::Rc};

use crate::ecmascript::types::Value;

#[derive(Debug, Default)]
pub(crate) struct ArrayHeapData {
    /// Slot `i` is `None` when index `i` is a hole. Indices past the end of
    /// the vector but below `len` are holes as well.
    pub(crate) elements: Vec<Option<Value>>,
    pub(crate) len: usize,
}

/// An Array: an ordered sequence of slots, any of which may be a hole.
///
/// A hole is an index below `length` that has no element at all, which is
/// different from an element holding `undefined`. `[1, , 3]` has a hole at
/// index 1.
///
/// Arrays are shared by reference: clones alias the same storage, so a
/// callback that mutates the array being iterated is observed by the
/// iteration.
#[derive(Clone, Default)]
pub struct Array(Rc<RefCell<ArrayHeapData>>);

impl Array {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an array of `len` holes.
    pub fn with_length(len: usize) -> Self {
        Self(Rc::new(RefCell::new(ArrayHeapData {
            elements: Vec::new(),
            len,
        })))
    }

    /// Creates an array from slots; `None` slots are holes.
    pub fn from_elements(elements: Vec<Option<Value>>) -> Self {
        let len = elements.len();
        Self(Rc::new(RefCell::new(ArrayHeapData { elements, len })))
    }

    /// Creates a hole-free array.
    ///
    /// This is equal to the [CreateArrayFromList](https://tc39.es/ecma262/#sec-createarrayfromlist)
    /// abstract operation.
    pub fn from_values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::from_elements(values.into_iter().map(|v| Some(v.into())).collect())
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if `index` holds an element, i.e. is not a hole.
    pub fn has(&self, index: usize) -> bool {
        matches!(self.0.borrow().elements.get(index), Some(Some(_)))
    }

    /// Returns `None` for holes and out-of-range indices.
    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.borrow().elements.get(index).cloned().flatten()
    }

    /// Writes an element, growing the array with holes if `index` is past
    /// the end.
    pub fn set(&self, index: usize, value: impl Into<Value>) {
        let mut data = self.0.borrow_mut();
        if index >= data.elements.len() {
            data.elements.resize(index + 1, None);
        }
        data.elements[index] = Some(value.into());
        if index >= data.len {
            data.len = index + 1;
        }
    }

    /// Turns `index` into a hole. The length is unchanged.
    pub fn delete(&self, index: usize) {
        if let Some(slot) = self.0.borrow_mut().elements.get_mut(index) {
            *slot = None;
        }
    }

    pub fn push(&self, value: impl Into<Value>) {
        let index = self.len();
        self.set(index, value);
    }

    /// Sets the length. Shrinking drops the elements past the new end.
    pub fn set_len(&self, len: usize) {
        let mut data = self.0.borrow_mut();
        data.elements.truncate(len);
        data.len = len;
    }

    /// A snapshot of every slot, holes included.
    pub fn elements(&self) -> Vec<Option<Value>> {
        let data = self.0.borrow();
        let mut elements = data.elements.clone();
        elements.resize(data.len, None);
        elements
    }

    /// A snapshot of every slot with holes read as `undefined`.
    pub fn to_vec(&self) -> Vec<Value> {
        self.elements()
            .into_iter()
            .map(Option::unwrap_or_default)
            .collect()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl FromIterator<Value> for Array {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Self::from_values(iter)
    }
}

impl fmt::Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&Value::Array(self.clone()), f)
    }
}
