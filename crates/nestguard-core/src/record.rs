//! Read access to the record that owns the validated documents
//!
//! Copyright (c) 2025 Nestguard Team
//! Licensed under the Apache-2.0 license

use serde_json::{Map, Value};

/// A record whose attributes hold JSON documents.
///
/// Validation only ever reads from a record.
pub trait Record {
    /// Raw value of a top-level attribute, if the record has it
    fn read_attribute(&self, name: &str) -> Option<&Value>;
}

impl Record for Value {
    fn read_attribute(&self, name: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(name))
    }
}

impl Record for Map<String, Value> {
    fn read_attribute(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}
