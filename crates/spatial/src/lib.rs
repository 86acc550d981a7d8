//! Spatial filtering for catalogue queries.
//!
//! Geometries are built from Well-Known-Text or from bounding boxes and are
//! compared with the OGC filter predicates (`bbox`, `intersects`, `within`,
//! `dwithin`, ...). Topology and distances come from the `geo` crate.

pub mod error;
pub mod geometry;
pub mod predicate;
pub mod wkt;

pub use error::SpatialError;
pub use geometry::{Geometry, GeometryKind};
pub use metacat_types::{Bounds, Point};
pub use predicate::{SpatialPredicate, evaluate, query_spatial};
pub use wkt::{WktShape, parse_wkt};

/// Converts a `minx,miny,maxx,maxy` string to a WKT polygon.
pub fn bbox_to_wkt(bbox: &str) -> Result<String, SpatialError> {
    let bounds: Bounds = bbox.parse()?;
    Ok(bounds.to_wkt_polygon())
}
