//! Configuration accepted by the core: the namespace registry used to resolve
//! path prefixes, and the per-schema field mappings.

use crate::error::ConfigurationError;
use metacat_xpath1::NamespaceResolver;
use once_cell::sync::{Lazy, OnceCell};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Key/value pairs of a JSON object, in the order they were written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct OrderedEntries(pub(crate) Vec<(String, String)>);

impl<'de> Deserialize<'de> for OrderedEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = OrderedEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of strings to strings")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, String>()? {
                    entries.push((key, value));
                }
                Ok(OrderedEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

impl Serialize for OrderedEntries {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

// --- Namespace registry ---

const DEFAULT_NAMESPACES: &[(&str, &str)] = &[
    ("atom", "http://www.w3.org/2005/Atom"),
    ("csw", "http://www.opengis.net/cat/csw/2.0.2"),
    ("csw30", "http://www.opengis.net/cat/csw/3.0"),
    ("dc", "http://purl.org/dc/elements/1.1/"),
    ("dct", "http://purl.org/dc/terms/"),
    ("dif", "http://gcmd.gsfc.nasa.gov/Aboutus/xml/dif/"),
    ("fgdc", "http://www.opengis.net/cat/csw/csdgm"),
    ("gco", "http://www.isotc211.org/2005/gco"),
    ("gmd", "http://www.isotc211.org/2005/gmd"),
    ("gmi", "http://www.isotc211.org/2005/gmi"),
    ("gml", "http://www.opengis.net/gml"),
    ("gml32", "http://www.opengis.net/gml/3.2"),
    ("ogc", "http://www.opengis.net/ogc"),
    ("os", "http://a9.com/-/spec/opensearch/1.1/"),
    ("ows", "http://www.opengis.net/ows"),
    ("ows20", "http://www.opengis.net/ows/2.0"),
    ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
    ("sitemap", "http://www.sitemaps.org/schemas/sitemap/0.9"),
    ("soapenv", "http://www.w3.org/2003/05/soap-envelope"),
    ("srv", "http://www.isotc211.org/2005/srv"),
    ("xlink", "http://www.w3.org/1999/xlink"),
    ("xs", "http://www.w3.org/2001/XMLSchema"),
    ("xsi", "http://www.w3.org/2001/XMLSchema-instance"),
];

static INSTALLED: OnceCell<NamespaceRegistry> = OnceCell::new();
static DEFAULT_REGISTRY: Lazy<NamespaceRegistry> = Lazy::new(NamespaceRegistry::default);

/// An ordered prefix to namespace URI map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "OrderedEntries", into = "OrderedEntries")]
pub struct NamespaceRegistry {
    entries: Vec<(String, String)>,
}

impl NamespaceRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn from_pairs<I, P, U>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (P, U)>,
        P: Into<String>,
        U: Into<String>,
    {
        let mut registry = Self::new();
        for (prefix, uri) in pairs {
            registry.insert(prefix, uri);
        }
        registry
    }

    /// Reads a JSON object of prefix to URI.
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Binds `prefix`, replacing an earlier binding in place.
    pub fn insert(&mut self, prefix: impl Into<String>, uri: impl Into<String>) {
        let prefix = prefix.into();
        let uri = uri.into();
        match self.entries.iter_mut().find(|(p, _)| *p == prefix) {
            Some(entry) => entry.1 = uri,
            None => self.entries.push((prefix, uri)),
        }
    }

    pub fn get(&self, prefix: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(p, _)| p == prefix)
            .map(|(_, uri)| uri.as_str())
    }

    /// Like [`NamespaceRegistry::get`], failing for an unregistered prefix.
    pub fn uri(&self, prefix: &str) -> Result<&str, ConfigurationError> {
        self.get(prefix)
            .ok_or_else(|| ConfigurationError::UnknownPrefix(prefix.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, u)| (p.as_str(), u.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for NamespaceRegistry {
    /// The namespaces used by the catalogue's supported record schemas.
    fn default() -> Self {
        Self::from_pairs(DEFAULT_NAMESPACES.iter().copied())
    }
}

impl From<OrderedEntries> for NamespaceRegistry {
    fn from(entries: OrderedEntries) -> Self {
        Self::from_pairs(entries.0)
    }
}

impl From<NamespaceRegistry> for OrderedEntries {
    fn from(registry: NamespaceRegistry) -> Self {
        OrderedEntries(registry.entries)
    }
}

impl NamespaceResolver for NamespaceRegistry {
    fn resolve(&self, prefix: &str) -> Option<&str> {
        self.get(prefix)
    }
}

/// Sets the process-wide registry. Only the first call succeeds.
pub fn install(registry: NamespaceRegistry) -> Result<(), ConfigurationError> {
    let count = registry.len();
    INSTALLED
        .set(registry)
        .map_err(|_| ConfigurationError::AlreadyInstalled)?;
    log::debug!("Installed namespace registry with {} prefixes", count);
    Ok(())
}

/// The installed registry, or the default one when none was installed.
pub fn global() -> &'static NamespaceRegistry {
    INSTALLED.get().unwrap_or_else(|| &*DEFAULT_REGISTRY)
}

// --- Field mappings ---

/// Internal field identifier to external identifier, for one record schema.
/// Identifiers are unique on each side and kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "OrderedEntries", into = "OrderedEntries")]
pub struct FieldMapping {
    entries: Vec<(String, String)>,
}

impl FieldMapping {
    pub fn new<I, K, V>(pairs: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut entries: Vec<(String, String)> = Vec::new();
        for (internal, external) in pairs {
            let (internal, external) = (internal.into(), external.into());
            if entries.iter().any(|(i, _)| *i == internal) {
                return Err(ConfigurationError::DuplicateMapping {
                    side: "internal",
                    identifier: internal,
                });
            }
            if entries.iter().any(|(_, e)| *e == external) {
                return Err(ConfigurationError::DuplicateMapping {
                    side: "external",
                    identifier: external,
                });
            }
            entries.push((internal, external));
        }
        Ok(Self { entries })
    }

    /// The external identifier for an internal one.
    pub fn external(&self, internal: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(i, _)| i == internal)
            .map(|(_, e)| e.as_str())
    }

    /// The first internal identifier mapped to `external`.
    pub fn internal(&self, external: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, e)| e == external)
            .map(|(i, _)| i.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(i, e)| (i.as_str(), e.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<OrderedEntries> for FieldMapping {
    type Error = ConfigurationError;

    fn try_from(entries: OrderedEntries) -> Result<Self, Self::Error> {
        Self::new(entries.0)
    }
}

impl From<FieldMapping> for OrderedEntries {
    fn from(mapping: FieldMapping) -> Self {
        OrderedEntries(mapping.entries)
    }
}

/// Field mappings keyed by typename, e.g. `csw:Record`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SchemaMappings {
    mappings: BTreeMap<String, FieldMapping>,
}

impl SchemaMappings {
    /// Reads `{"typename": {"internal": "external", ...}, ...}`.
    ///
    /// Duplicate identifiers are reported as
    /// [`ConfigurationError::DuplicateMapping`] rather than as a JSON error.
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        let raw: BTreeMap<String, OrderedEntries> = serde_json::from_str(json)?;
        let mut mappings = BTreeMap::new();
        for (typename, entries) in raw {
            mappings.insert(typename, FieldMapping::try_from(entries)?);
        }
        Ok(Self { mappings })
    }

    pub fn insert(&mut self, typename: impl Into<String>, mapping: FieldMapping) {
        self.mappings.insert(typename.into(), mapping);
    }

    pub fn get(&self, typename: &str) -> Option<&FieldMapping> {
        self.mappings.get(typename)
    }

    pub fn typenames(&self) -> impl Iterator<Item = &str> {
        self.mappings.keys().map(String::as_str)
    }
}
