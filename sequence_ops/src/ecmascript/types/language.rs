// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

mod function;
pub mod number;
mod object;
mod string;
mod value;

pub use function::Function;
pub use object::{Object, OrdinaryObject, StringObject};
pub use string::JsString;
pub use value::Value;
