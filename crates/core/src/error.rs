//! Error types for configuration, path queries and the crate as a whole.

use metacat_record::RecordError;
use metacat_spatial::SpatialError;
use metacat_xpath1::XPathError;
use thiserror::Error;

use crate::util::ConversionError;

/// Problems with the namespace registry or schema mappings.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Namespace prefix '{0}' is not registered")]
    UnknownPrefix(String),

    #[error("Path segment '{0}' is not namespace-qualified")]
    UnqualifiedName(String),

    #[error("Duplicate {side} identifier '{identifier}' in field mapping")]
    DuplicateMapping {
        side: &'static str,
        identifier: String,
    },

    #[error("Invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("The namespace registry has already been installed")]
    AlreadyInstalled,
}

/// Failures while compiling or running a path expression against a record.
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Malformed path expression '{expression}'")]
    Parse {
        expression: String,
        #[source]
        source: XPathError,
    },

    #[error("Failed to evaluate path expression '{expression}'")]
    Evaluation {
        expression: String,
        #[source]
        source: XPathError,
    },

    #[error("Document error: {0}")]
    Document(#[from] RecordError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}

/// Unifies every error the core can return.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Spatial(#[from] SpatialError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),
}
