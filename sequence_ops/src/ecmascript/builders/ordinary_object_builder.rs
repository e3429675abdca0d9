// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use ahash::RandomState;
use hashbrown::HashMap;

use crate::ecmascript::{
    builtins::Builtin,
    types::{Function, JsString, OrdinaryObject, Value},
};

pub(crate) struct OrdinaryObjectBuilder {
    properties: Vec<(JsString, Value)>,
}

impl OrdinaryObjectBuilder {
    pub(crate) fn new() -> Self {
        Self {
            properties: Vec::new(),
        }
    }

    #[must_use]
    pub(crate) fn with_property_capacity(mut self, cap: usize) -> Self {
        self.properties.reserve_exact(cap);
        self
    }

    #[must_use]
    pub(crate) fn with_builtin_function_property<T: Builtin>(mut self) -> Self {
        let function = Function::from_builtin::<T>();
        self.properties
            .push((function.name().clone(), function.into()));
        self
    }

    pub(crate) fn build(self) -> OrdinaryObject {
        debug_assert!(
            {
                let mut keys = self.properties.iter().map(|(key, _)| key).collect::<Vec<_>>();
                let count = keys.len();
                keys.sort_by_key(|key| key.to_string_lossy().into_owned());
                keys.dedup();
                keys.len() == count
            },
            "duplicate property key"
        );
        let mut properties =
            HashMap::with_capacity_and_hasher(self.properties.len(), RandomState::new());
        properties.extend(self.properties);
        OrdinaryObject::from_property_map(properties)
    }
}
