use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoundsParseError {
    #[error("Bounding box '{0}' must have exactly 4 comma-separated values")]
    Arity(String),

    #[error("Bounding box coordinate '{value}' is not a number")]
    Coordinate { value: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned box in planar coordinates.
///
/// Degenerate boxes are allowed: a box with zero width and zero height is a
/// point, and a box with exactly one zero extent is a line segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Builds a box from two opposite corners given in any order.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x: min_x.min(max_x),
            min_y: min_y.min(max_y),
            max_x: min_x.max(max_x),
            max_y: min_y.max(max_y),
        }
    }

    pub fn from_point(point: Point) -> Self {
        Self::new(point.x, point.y, point.x, point.y)
    }

    /// The smallest box holding every point. `None` for an empty input.
    pub fn enclosing<I: IntoIterator<Item = Point>>(points: I) -> Option<Self> {
        points.into_iter().fold(None, |acc, p| {
            Some(match acc {
                None => Self::from_point(p),
                Some(b) => Self {
                    min_x: b.min_x.min(p.x),
                    min_y: b.min_y.min(p.y),
                    max_x: b.max_x.max(p.x),
                    max_y: b.max_y.max(p.y),
                },
            })
        })
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Topological dimension: 0 for a point, 1 for a segment, 2 for an area.
    pub fn dimension(&self) -> u8 {
        u8::from(self.width() > 0.0) + u8::from(self.height() > 0.0)
    }

    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.min_x && point.x <= self.max_x && point.y >= self.min_y && point.y <= self.max_y
    }

    /// The corner ring in the order used for WKT polygons, closed on the first corner.
    pub fn ring(&self) -> [Point; 5] {
        [
            Point::new(self.min_x, self.min_y),
            Point::new(self.min_x, self.max_y),
            Point::new(self.max_x, self.max_y),
            Point::new(self.max_x, self.min_y),
            Point::new(self.min_x, self.min_y),
        ]
    }

    /// Renders the box as a closed five-point WKT polygon with two decimals.
    pub fn to_wkt_polygon(&self) -> String {
        let coords = self
            .ring()
            .iter()
            .map(|p| format!("{:.2} {:.2}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(", ");
        format!("POLYGON(({}))", coords)
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.min_x, self.min_y, self.max_x, self.max_y)
    }
}

impl FromStr for Bounds {
    type Err = BoundsParseError;

    /// Parses a `minx,miny,maxx,maxy` bounding box string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(BoundsParseError::Arity(s.to_string()));
        }
        let mut coords = [0.0f64; 4];
        for (slot, part) in coords.iter_mut().zip(&parts) {
            *slot = part.parse().map_err(|_| BoundsParseError::Coordinate {
                value: part.to_string(),
            })?;
        }
        Ok(Self::new(coords[0], coords[1], coords[2], coords[3]))
    }
}
