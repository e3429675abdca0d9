// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use core::fmt;
use std::{borrow::Cow, rc::Rc};

use wtf8::{Wtf8, Wtf8Buf};

/// ### [6.1.4 The String Type](https://tc39.es/ecma262/#sec-ecmascript-language-types-string-type)
///
/// An immutable sequence of UTF-16 code units, stored as WTF-8 so that lone
/// surrogates survive. Cloning is cheap and shares the buffer.
#[derive(Clone, PartialEq, Hash)]
pub struct JsString(Rc<Wtf8Buf>);

impl Eq for JsString {}

impl JsString {
    pub fn from_str(str: &str) -> Self {
        Self(Rc::new(Wtf8Buf::from_str(str)))
    }

    pub fn from_string(str: String) -> Self {
        Self(Rc::new(Wtf8Buf::from_string(str)))
    }

    pub fn from_wtf8_buf(str: Wtf8Buf) -> Self {
        Self(Rc::new(str))
    }

    /// Creates a string out of arbitrary UTF-16 code units, unpaired
    /// surrogates included.
    pub fn from_code_units(units: &[u16]) -> Self {
        Self(Rc::new(Wtf8Buf::from_ill_formed_utf16(units)))
    }

    pub fn as_wtf8(&self) -> &Wtf8 {
        &self.0
    }

    /// Try to convert the string to UTF-8 and return a `&str` slice.
    ///
    /// Return `None` if the string contains surrogates.
    pub fn as_str(&self) -> Option<&str> {
        self.0.as_str()
    }

    /// Surrogates are replaced with `"\u{FFFD}"`.
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        self.0.to_string_lossy()
    }

    pub fn is_empty(&self) -> bool {
        self.0.len() == 0
    }

    /// Length in UTF-16 code units, which is the `length` JavaScript sees.
    pub fn utf16_len(&self) -> usize {
        self.code_units().count()
    }

    pub fn code_units(&self) -> impl Iterator<Item = u16> + '_ {
        self.0.to_ill_formed_utf16()
    }

    /// The code unit at `index`, as a string of length one.
    pub fn code_unit_at(&self, index: usize) -> Option<JsString> {
        self.code_units()
            .nth(index)
            .map(|unit| Self::from_code_units(&[unit]))
    }
}

impl From<&str> for JsString {
    fn from(value: &str) -> Self {
        Self::from_str(value)
    }
}

impl From<String> for JsString {
    fn from(value: String) -> Self {
        Self::from_string(value)
    }
}

impl PartialEq<str> for JsString {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for JsString {
    fn eq(&self, other: &&str) -> bool {
        self.eq(*other)
    }
}

impl fmt::Debug for JsString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.to_string_lossy())
    }
}

impl fmt::Display for JsString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

#[test]
fn code_units_count_surrogate_pairs_twice() {
    let emoji = JsString::from_str("a😀");
    assert_eq!(emoji.utf16_len(), 3);
    assert_eq!(emoji.code_unit_at(0), Some(JsString::from_str("a")));
    let high = emoji.code_unit_at(1).unwrap();
    assert_eq!(high.utf16_len(), 1);
    assert_eq!(high.as_str(), None);
    assert_eq!(emoji.code_unit_at(3), None);
}

#[test]
fn strings_compare_by_contents() {
    assert_eq!(JsString::from_str("apple"), JsString::from_string("apple".to_owned()));
    assert_eq!(JsString::from_str("apple"), "apple");
    assert_ne!(JsString::from_str("apple"), JsString::from_str("Apple"));
}
