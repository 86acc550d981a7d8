use metacat_types::BoundsParseError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpatialError {
    #[error("Invalid spatial query predicate: {0}")]
    InvalidPredicate(String),

    #[error("WKT parse error in '{input}': {message}")]
    Wkt { input: String, message: String },

    #[error("Unsupported geometry: {0}")]
    UnsupportedGeometry(String),

    #[error("Invalid bounding box: {0}")]
    InvalidBbox(#[from] BoundsParseError),
}
