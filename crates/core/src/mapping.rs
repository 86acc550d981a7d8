//! Rewrites queryable field maps between the internal vocabulary and an
//! external record schema.

use crate::config::FieldMapping;
use std::collections::{BTreeMap, HashMap};

/// A mutable string to string map of queryables.
pub trait Queryables {
    fn keys_snapshot(&self) -> Vec<String>;
    fn value(&self, key: &str) -> Option<&str>;
    fn set(&mut self, key: &str, value: String);
}

impl Queryables for HashMap<String, String> {
    fn keys_snapshot(&self) -> Vec<String> {
        self.keys().cloned().collect()
    }

    fn value(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }

    fn set(&mut self, key: &str, value: String) {
        self.insert(key.to_string(), value);
    }
}

impl Queryables for BTreeMap<String, String> {
    fn keys_snapshot(&self) -> Vec<String> {
        self.keys().cloned().collect()
    }

    fn value(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }

    fn set(&mut self, key: &str, value: String) {
        self.insert(key.to_string(), value);
    }
}

/// For every key that is an internal identifier of `mapping`, replaces its
/// value with the external identifier.
pub fn to_external<'q, Q: Queryables>(queryables: &'q mut Q, mapping: &FieldMapping) -> &'q mut Q {
    for key in queryables.keys_snapshot() {
        match mapping.external(&key) {
            Some(external) => queryables.set(&key, external.to_string()),
            None => log::trace!("No external mapping for queryable '{}'", key),
        }
    }
    queryables
}

/// For every key that is an external identifier of `mapping`, copies the
/// value held under its internal identifier, when present.
pub fn to_internal<'q, Q: Queryables>(queryables: &'q mut Q, mapping: &FieldMapping) -> &'q mut Q {
    for key in queryables.keys_snapshot() {
        let Some(internal) = mapping.internal(&key) else {
            log::trace!("No internal mapping for queryable '{}'", key);
            continue;
        };
        match queryables.value(internal).map(str::to_string) {
            Some(value) => queryables.set(&key, value),
            None => log::trace!("Queryable '{}' has no value under '{}'", key, internal),
        }
    }
    queryables
}
