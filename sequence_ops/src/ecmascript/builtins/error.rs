// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use core::fmt;
use std::rc::Rc;

use crate::ecmascript::{execution::ExceptionType, types::JsString};

#[derive(Debug)]
pub(crate) struct ErrorHeapData {
    pub(crate) kind: ExceptionType,
    pub(crate) message: JsString,
}

/// ### [20.5 Error Objects](https://tc39.es/ecma262/#sec-error-objects)
#[derive(Clone)]
pub struct ErrorObject(Rc<ErrorHeapData>);

impl ErrorObject {
    pub fn new(kind: ExceptionType, message: impl Into<JsString>) -> Self {
        Self(Rc::new(ErrorHeapData {
            kind,
            message: message.into(),
        }))
    }

    pub fn kind(&self) -> ExceptionType {
        self.0.kind
    }

    pub fn message(&self) -> &JsString {
        &self.0.message
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ErrorObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// ### [20.5.3.4 Error.prototype.toString ( )](https://tc39.es/ecma262/#sec-error.prototype.tostring)
impl fmt::Display for ErrorObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 9. If name is the empty String, return msg.
        // 10. If msg is the empty String, return name.
        if self.0.message.is_empty() {
            return f.write_str(self.0.kind.name());
        }
        // 11. Return the string-concatenation of name, the code unit 0x003A
        //     (COLON), the code unit 0x0020 (SPACE), and msg.
        write!(f, "{}: {}", self.0.kind.name(), self.0.message)
    }
}
