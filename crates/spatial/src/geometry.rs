//! Planar geometries and the DE-9IM relations between them.
//!
//! Parsed WKT shapes are converted to `geo` geometries; every topological
//! predicate reads one cell pattern of the intersection matrix `geo::Relate`
//! computes, and distances are Euclidean.

use crate::error::SpatialError;
use crate::wkt::{WktShape, parse_wkt};
use geo::dimensions::{Dimensions, HasDimensions};
use geo::{BoundingRect, Coord, Distance, Euclidean, Relate};
use metacat_types::{Bounds, Point};
use std::fmt;
use std::str::FromStr;

/// The WKT type a geometry was written as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    kind: GeometryKind,
    shape: geo::Geometry<f64>,
}

fn coord(point: Point) -> Coord<f64> {
    Coord {
        x: point.x,
        y: point.y,
    }
}

fn line_string(points: &[Point]) -> Result<geo::LineString<f64>, SpatialError> {
    if points.len() < 2 {
        return Err(SpatialError::UnsupportedGeometry(
            "linestring needs at least two points".into(),
        ));
    }
    Ok(points.iter().copied().map(coord).collect())
}

/// A ring needs four positions once closed; an open ring is closed on its
/// first point.
fn ring(points: &[Point]) -> Result<geo::LineString<f64>, SpatialError> {
    let closed_len = points.len() + usize::from(points.first() != points.last());
    if points.is_empty() || closed_len < 4 {
        return Err(SpatialError::UnsupportedGeometry(
            "polygon ring needs at least four positions".into(),
        ));
    }
    Ok(points.iter().copied().map(coord).collect())
}

fn polygon(rings: &[Vec<Point>]) -> Result<geo::Polygon<f64>, SpatialError> {
    let (exterior, interiors) = rings
        .split_first()
        .ok_or_else(|| SpatialError::UnsupportedGeometry("polygon without rings".into()))?;
    let interiors = interiors.iter().map(|r| ring(r)).collect::<Result<Vec<_>, _>>()?;
    Ok(geo::Polygon::new(ring(exterior)?, interiors))
}

impl Geometry {
    pub fn point(point: Point) -> Self {
        Self {
            kind: GeometryKind::Point,
            shape: geo::Point::from(coord(point)).into(),
        }
    }

    /// A rectangular polygon, or a segment or point when the box is degenerate.
    pub fn from_bounds(bounds: Bounds) -> Self {
        let corners = bounds.ring();
        match bounds.dimension() {
            0 => Self::point(corners[0]),
            1 => Self {
                kind: GeometryKind::LineString,
                shape: geo::LineString::from(vec![
                    coord(Point::new(bounds.min_x, bounds.min_y)),
                    coord(Point::new(bounds.max_x, bounds.max_y)),
                ])
                .into(),
            },
            _ => {
                let exterior: geo::LineString<f64> = corners.into_iter().map(coord).collect();
                Self {
                    kind: GeometryKind::Polygon,
                    shape: geo::Polygon::new(exterior, Vec::new()).into(),
                }
            }
        }
    }

    pub fn from_wkt(wkt: &str) -> Result<Self, SpatialError> {
        Self::from_shape(parse_wkt(wkt)?)
    }

    /// Builds the planar geometry for a parsed shape, rejecting linestrings
    /// and rings with too few positions.
    pub fn from_shape(shape: WktShape) -> Result<Self, SpatialError> {
        let (kind, shape): (GeometryKind, geo::Geometry<f64>) = match shape {
            WktShape::Point(p) => return Ok(Self::point(p)),
            WktShape::Envelope {
                min_x,
                max_x,
                max_y,
                min_y,
            } => return Ok(Self::from_bounds(Bounds::new(min_x, min_y, max_x, max_y))),
            WktShape::LineString(points) => (GeometryKind::LineString, line_string(&points)?.into()),
            WktShape::Polygon(rings) => (GeometryKind::Polygon, polygon(&rings)?.into()),
            WktShape::MultiPoint(points) => {
                let points: Vec<geo::Point<f64>> = points.into_iter().map(|p| coord(p).into()).collect();
                (GeometryKind::MultiPoint, geo::MultiPoint::new(points).into())
            }
            WktShape::MultiLineString(lines) => {
                let lines = lines.iter().map(|l| line_string(l)).collect::<Result<Vec<_>, _>>()?;
                (GeometryKind::MultiLineString, geo::MultiLineString::new(lines).into())
            }
            WktShape::MultiPolygon(polygons) => {
                let polygons = polygons.iter().map(|p| polygon(p)).collect::<Result<Vec<_>, _>>()?;
                (GeometryKind::MultiPolygon, geo::MultiPolygon::new(polygons).into())
            }
        };
        Ok(Self { kind, shape })
    }

    pub fn kind(&self) -> GeometryKind {
        self.kind
    }

    pub fn as_geo(&self) -> &geo::Geometry<f64> {
        &self.shape
    }

    /// The bounding box; `None` only for empty multi geometries.
    pub fn bounds(&self) -> Option<Bounds> {
        self.shape
            .bounding_rect()
            .map(|r| Bounds::new(r.min().x, r.min().y, r.max().x, r.max().y))
    }

    /// Topological dimension: 0 for points, 1 for lines, 2 for areas.
    pub fn dimension(&self) -> Option<u8> {
        match self.shape.dimensions() {
            Dimensions::Empty => None,
            Dimensions::ZeroDimensional => Some(0),
            Dimensions::OneDimensional => Some(1),
            Dimensions::TwoDimensional => Some(2),
        }
    }

    pub fn intersects(&self, other: &Geometry) -> bool {
        self.shape.relate(&other.shape).is_intersects()
    }

    pub fn disjoint(&self, other: &Geometry) -> bool {
        self.shape.relate(&other.shape).is_disjoint()
    }

    /// Same point set, regardless of vertex order or repeated vertices.
    pub fn equals(&self, other: &Geometry) -> bool {
        self.shape.relate(&other.shape).is_equal_topo()
    }

    pub fn touches(&self, other: &Geometry) -> bool {
        self.shape.relate(&other.shape).is_touches()
    }

    pub fn within(&self, other: &Geometry) -> bool {
        self.shape.relate(&other.shape).is_within()
    }

    pub fn contains(&self, other: &Geometry) -> bool {
        self.shape.relate(&other.shape).is_contains()
    }

    pub fn crosses(&self, other: &Geometry) -> bool {
        self.shape.relate(&other.shape).is_crosses()
    }

    /// Shapes that intersect without merely touching.
    pub fn overlaps(&self, other: &Geometry) -> bool {
        let matrix = self.shape.relate(&other.shape);
        matrix.is_intersects() && !matrix.is_touches()
    }

    /// Minimum Euclidean distance between the two shapes.
    pub fn distance(&self, other: &Geometry) -> f64 {
        Euclidean.distance(&self.shape, &other.shape)
    }
}

impl FromStr for Geometry {
    type Err = SpatialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_wkt(s)
    }
}

fn write_coords<'c>(f: &mut fmt::Formatter<'_>, coords: impl Iterator<Item = &'c Coord<f64>>) -> fmt::Result {
    f.write_str("(")?;
    for (i, c) in coords.enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{} {}", c.x, c.y)?;
    }
    f.write_str(")")
}

fn write_polygon(f: &mut fmt::Formatter<'_>, polygon: &geo::Polygon<f64>) -> fmt::Result {
    f.write_str("(")?;
    write_coords(f, polygon.exterior().0.iter())?;
    for hole in polygon.interiors() {
        f.write_str(", ")?;
        write_coords(f, hole.0.iter())?;
    }
    f.write_str(")")
}

/// Writes `items` as a parenthesized, comma-separated list.
fn write_list<T>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    mut write_item: impl FnMut(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
) -> fmt::Result {
    f.write_str("(")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_item(f, item)?;
    }
    f.write_str(")")
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.shape {
            geo::Geometry::Point(p) => write!(f, "POINT({} {})", p.x(), p.y()),
            geo::Geometry::LineString(line) => {
                f.write_str("LINESTRING")?;
                write_coords(f, line.0.iter())
            }
            geo::Geometry::Polygon(polygon) => {
                f.write_str("POLYGON")?;
                write_polygon(f, polygon)
            }
            geo::Geometry::MultiPoint(points) => {
                f.write_str("MULTIPOINT")?;
                write_list(f, &points.0, |f, p| write!(f, "({} {})", p.x(), p.y()))
            }
            geo::Geometry::MultiLineString(lines) => {
                f.write_str("MULTILINESTRING")?;
                write_list(f, &lines.0, |f, line| write_coords(f, line.0.iter()))
            }
            geo::Geometry::MultiPolygon(polygons) => {
                f.write_str("MULTIPOLYGON")?;
                write_list(f, &polygons.0, write_polygon)
            }
            other => write!(f, "{:?}", other),
        }
    }
}
