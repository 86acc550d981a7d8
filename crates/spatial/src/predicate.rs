//! The OGC filter spatial operators.

use crate::error::SpatialError;
use crate::geometry::Geometry;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpatialPredicate {
    /// Alias of `Intersects`.
    Bbox,
    Beyond,
    Contains,
    Crosses,
    Disjoint,
    DWithin,
    Equals,
    Intersects,
    Overlaps,
    Touches,
    Within,
}

impl SpatialPredicate {
    pub const ALL: [SpatialPredicate; 11] = [
        SpatialPredicate::Bbox,
        SpatialPredicate::Beyond,
        SpatialPredicate::Contains,
        SpatialPredicate::Crosses,
        SpatialPredicate::Disjoint,
        SpatialPredicate::DWithin,
        SpatialPredicate::Equals,
        SpatialPredicate::Intersects,
        SpatialPredicate::Overlaps,
        SpatialPredicate::Touches,
        SpatialPredicate::Within,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SpatialPredicate::Bbox => "bbox",
            SpatialPredicate::Beyond => "beyond",
            SpatialPredicate::Contains => "contains",
            SpatialPredicate::Crosses => "crosses",
            SpatialPredicate::Disjoint => "disjoint",
            SpatialPredicate::DWithin => "dwithin",
            SpatialPredicate::Equals => "equals",
            SpatialPredicate::Intersects => "intersects",
            SpatialPredicate::Overlaps => "overlaps",
            SpatialPredicate::Touches => "touches",
            SpatialPredicate::Within => "within",
        }
    }

    pub fn requires_distance(&self) -> bool {
        matches!(self, SpatialPredicate::Beyond | SpatialPredicate::DWithin)
    }
}

impl FromStr for SpatialPredicate {
    type Err = SpatialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        SpatialPredicate::ALL
            .into_iter()
            .find(|p| p.name() == lowered)
            .ok_or_else(|| SpatialError::InvalidPredicate(s.to_string()))
    }
}

impl fmt::Display for SpatialPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tests `predicate` between a record geometry `a` and a query geometry `b`.
///
/// An absent geometry never matches. Distance predicates without a finite
/// distance never match.
pub fn evaluate(
    a: Option<&Geometry>,
    b: Option<&Geometry>,
    predicate: SpatialPredicate,
    distance: Option<f64>,
) -> bool {
    let (Some(a), Some(b)) = (a, b) else {
        return false;
    };
    let distance = distance.filter(|d| d.is_finite());
    let result = match predicate {
        SpatialPredicate::Bbox | SpatialPredicate::Intersects => a.intersects(b),
        SpatialPredicate::Contains => a.contains(b),
        SpatialPredicate::Crosses => a.crosses(b),
        SpatialPredicate::Disjoint => a.disjoint(b),
        SpatialPredicate::Equals => a.equals(b),
        SpatialPredicate::Overlaps => a.overlaps(b),
        SpatialPredicate::Touches => a.touches(b),
        SpatialPredicate::Within => a.within(b),
        SpatialPredicate::Beyond => distance.is_some_and(|d| a.distance(b) > d),
        SpatialPredicate::DWithin => distance.is_some_and(|d| a.distance(b) <= d),
    };
    log::trace!("spatial {} between {} and {}: {}", predicate, a, b, result);
    result
}

/// String front end over [`evaluate`] for filters that carry WKT text.
///
/// Absent geometries short-circuit to `false` before the predicate name is
/// checked. `distance` is ignored unless it parses as a finite number; the
/// literal `"false"` is the conventional "no distance" marker.
pub fn query_spatial(
    data_wkt: Option<&str>,
    input_wkt: Option<&str>,
    predicate: &str,
    distance: Option<&str>,
) -> Result<bool, SpatialError> {
    let (Some(data_wkt), Some(input_wkt)) = (data_wkt, input_wkt) else {
        return Ok(false);
    };
    let predicate: SpatialPredicate = predicate.parse()?;
    let distance = distance
        .and_then(|d| d.trim().parse::<f64>().ok())
        .filter(|d| d.is_finite());
    if predicate.requires_distance() && distance.is_none() {
        return Ok(false);
    }

    let a = Geometry::from_wkt(data_wkt)?;
    let b = Geometry::from_wkt(input_wkt)?;
    Ok(evaluate(Some(&a), Some(&b), predicate, distance))
}
