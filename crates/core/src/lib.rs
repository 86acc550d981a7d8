//! # metacat-core
//!
//! Query evaluation for XML metadata records:
//! - **path**: resolve XPath expressions to field values and apply updates
//! - **fulltext**: case-insensitive search across all text and attributes
//! - **mapping**: translate queryables between internal and schema field names
//! - **config**: namespace registry and schema mappings
//! - **record**: raw-or-parsed record wrapper
//! - **util**: timestamp, version and tag conversions
//!
//! Spatial predicates live in `metacat-spatial` and are re-exported here.

// Re-export foundation and algorithm crates
pub use metacat_record as document;
pub use metacat_spatial as spatial;
pub use metacat_types as types;
pub use metacat_xpath1 as xpath;

pub mod config;
pub mod error;
pub mod fulltext;
pub mod mapping;
pub mod path;
pub mod record;
pub mod util;

pub use config::{FieldMapping, NamespaceRegistry, SchemaMappings};
pub use error::{ConfigurationError, Error, QueryError};
pub use metacat_record::Document;
pub use metacat_spatial::{Geometry, SpatialError, SpatialPredicate, bbox_to_wkt, evaluate as evaluate_spatial, query_spatial};
pub use path::{CompiledPath, ResolvedValue, UpdateInstruction, apply_updates, nspath_eval, resolve};
pub use record::Record;
