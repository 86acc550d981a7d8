//! Prefix to namespace URI resolution for name tests.

use std::collections::{BTreeMap, HashMap};

/// The namespace bound to the reserved `xml` prefix.
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Supplies the namespace URI bound to a prefix used in an expression.
pub trait NamespaceResolver {
    fn resolve(&self, prefix: &str) -> Option<&str>;

    /// Like `resolve`, with the reserved `xml` prefix always bound.
    fn resolve_or_builtin(&self, prefix: &str) -> Option<&str> {
        self.resolve(prefix)
            .or_else(|| (prefix == "xml").then_some(XML_NAMESPACE))
    }
}

impl NamespaceResolver for HashMap<String, String> {
    fn resolve(&self, prefix: &str) -> Option<&str> {
        self.get(prefix).map(String::as_str)
    }
}

impl NamespaceResolver for BTreeMap<String, String> {
    fn resolve(&self, prefix: &str) -> Option<&str> {
        self.get(prefix).map(String::as_str)
    }
}

impl NamespaceResolver for [(&str, &str)] {
    fn resolve(&self, prefix: &str) -> Option<&str> {
        self.iter().find(|(p, _)| *p == prefix).map(|(_, uri)| *uri)
    }
}

impl<const K: usize> NamespaceResolver for [(&str, &str); K] {
    fn resolve(&self, prefix: &str) -> Option<&str> {
        self.as_slice().resolve(prefix)
    }
}

/// A resolver with no bindings beyond `xml`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNamespaces;

impl NamespaceResolver for NoNamespaces {
    fn resolve(&self, _prefix: &str) -> Option<&str> {
        None
    }
}
