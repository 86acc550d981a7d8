//! A `nom`-based parser for the 2-D Well-Known-Text geometries used by catalogue filters.

use crate::error::SpatialError;
use metacat_types::Point;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag_no_case,
    character::complete::{char, multispace0, multispace1},
    combinator::map,
    multi::separated_list1,
    number::complete::double,
    sequence::{delimited, preceded, separated_pair},
};

/// The raw shape described by a WKT string, before any topology checks.
#[derive(Debug, Clone, PartialEq)]
pub enum WktShape {
    Point(Point),
    LineString(Vec<Point>),
    /// Exterior ring first, then any interior rings.
    Polygon(Vec<Vec<Point>>),
    MultiPoint(Vec<Point>),
    MultiLineString(Vec<Vec<Point>>),
    MultiPolygon(Vec<Vec<Vec<Point>>>),
    /// The CQL `ENVELOPE(minx, maxx, maxy, miny)` form.
    Envelope {
        min_x: f64,
        max_x: f64,
        max_y: f64,
        min_y: f64,
    },
}

// --- Main Public Parser ---

pub fn parse_wkt(input: &str) -> Result<WktShape, SpatialError> {
    match shape(input.trim()) {
        Ok(("", shape)) => Ok(shape),
        Ok((rem, _)) => Err(SpatialError::Wkt {
            input: input.to_string(),
            message: format!("Parser did not consume all input. Remainder: '{}'", rem),
        }),
        Err(e) => Err(SpatialError::Wkt {
            input: input.to_string(),
            message: e.to_string(),
        }),
    }
}

// --- Combinators & Helpers ---

fn ws<'a, F, O, E>(inner: F) -> impl Parser<&'a str, Output = O, Error = E>
where
    F: Parser<&'a str, Output = O, Error = E>,
    E: nom::error::ParseError<&'a str>,
{
    delimited(multispace0, inner, multispace0)
}

fn parens<'a, F, O>(inner: F) -> impl Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>
where
    F: Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>,
{
    delimited(ws(char('(')), inner, ws(char(')')))
}

// --- Coordinate Parsers ---

fn point(input: &str) -> IResult<&str, Point> {
    map(separated_pair(double, multispace1, double), |(x, y)| {
        Point::new(x, y)
    })
    .parse(input)
}

fn point_list(input: &str) -> IResult<&str, Vec<Point>> {
    separated_list1(ws(char(',')), ws(point)).parse(input)
}

// --- Shape Parsers ---

fn shape(input: &str) -> IResult<&str, WktShape> {
    alt((
        multipoint_shape,
        multilinestring_shape,
        multipolygon_shape,
        point_shape,
        linestring_shape,
        polygon_shape,
        envelope_shape,
    ))
    .parse(input)
}

fn rings(input: &str) -> IResult<&str, Vec<Vec<Point>>> {
    separated_list1(ws(char(',')), parens(point_list)).parse(input)
}

fn point_shape(input: &str) -> IResult<&str, WktShape> {
    map(
        preceded(tag_no_case("POINT"), parens(ws(point))),
        WktShape::Point,
    )
    .parse(input)
}

fn linestring_shape(input: &str) -> IResult<&str, WktShape> {
    map(
        preceded(tag_no_case("LINESTRING"), parens(point_list)),
        WktShape::LineString,
    )
    .parse(input)
}

fn polygon_shape(input: &str) -> IResult<&str, WktShape> {
    map(
        preceded(
            tag_no_case("POLYGON"),
            parens(rings),
        ),
        WktShape::Polygon,
    )
    .parse(input)
}

/// Accepts both `MULTIPOINT((1 2), (3 4))` and the bare `MULTIPOINT(1 2, 3 4)`.
fn multipoint_shape(input: &str) -> IResult<&str, WktShape> {
    let wrapped = separated_list1(ws(char(',')), parens(ws(point)));
    map(
        preceded(tag_no_case("MULTIPOINT"), parens(alt((wrapped, point_list)))),
        WktShape::MultiPoint,
    )
    .parse(input)
}

fn multilinestring_shape(input: &str) -> IResult<&str, WktShape> {
    map(
        preceded(tag_no_case("MULTILINESTRING"), parens(rings)),
        WktShape::MultiLineString,
    )
    .parse(input)
}

fn multipolygon_shape(input: &str) -> IResult<&str, WktShape> {
    map(
        preceded(
            tag_no_case("MULTIPOLYGON"),
            parens(separated_list1(ws(char(',')), parens(rings))),
        ),
        WktShape::MultiPolygon,
    )
    .parse(input)
}

fn envelope_shape(input: &str) -> IResult<&str, WktShape> {
    let (i, _) = tag_no_case("ENVELOPE").parse(input)?;
    let (i, values) = parens(separated_list1(ws(char(',')), ws(double))).parse(i)?;
    match values.as_slice() {
        [min_x, max_x, max_y, min_y] => Ok((
            i,
            WktShape::Envelope {
                min_x: *min_x,
                max_x: *max_x,
                max_y: *max_y,
                min_y: *min_y,
            },
        )),
        _ => Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Count,
        ))),
    }
}
