mod common;

use common::{TestResult, init};
use metacat::{Geometry, SpatialError, SpatialPredicate, bbox_to_wkt, evaluate_spatial, query_spatial};

#[test]
fn test_bbox_polygon_format() -> TestResult {
    assert_eq!(
        bbox_to_wkt("0,0,10,10")?,
        "POLYGON((0.00 0.00, 0.00 10.00, 10.00 10.00, 10.00 0.00, 0.00 0.00))"
    );
    assert_eq!(
        bbox_to_wkt("-4.1,-3.5,12,22.2")?,
        "POLYGON((-4.10 -3.50, -4.10 22.20, 12.00 22.20, 12.00 -3.50, -4.10 -3.50))"
    );
    Ok(())
}

#[test]
fn test_record_box_against_query_boxes() -> TestResult {
    init();
    let record = bbox_to_wkt("-4.1,-3.5,12,22.2")?;
    let inside = bbox_to_wkt("0,0,1,1")?;
    let far = bbox_to_wkt("100,50,110,60")?;
    let edge = bbox_to_wkt("12,0,20,5")?;

    let check = |a: &str, b: &str, p: &str| query_spatial(Some(a), Some(b), p, None);
    assert!(check(&record, &inside, "bbox")?);
    assert!(check(&record, &inside, "contains")?);
    assert!(check(&inside, &record, "within")?);
    assert!(check(&record, &far, "disjoint")?);
    assert!(check(&record, &edge, "touches")?);
    assert!(!check(&record, &edge, "overlaps")?);
    assert!(check(&record, &edge, "intersects")?);
    assert!(check(&record, &record, "equals")?);

    assert!(query_spatial(Some(&record), Some(&far), "beyond", Some("10"))?);
    assert!(!query_spatial(Some(&record), Some(&far), "dwithin", Some("10"))?);
    assert!(!query_spatial(Some(&record), Some(&far), "beyond", Some("false"))?);
    Ok(())
}

#[test]
fn test_absent_geometry_never_matches() -> TestResult {
    let square = Geometry::from_wkt(&bbox_to_wkt("0,0,1,1")?)?;
    for predicate in SpatialPredicate::ALL {
        assert!(!evaluate_spatial(None, Some(&square), predicate, Some(1.0)));
        assert!(!evaluate_spatial(Some(&square), None, predicate, Some(1.0)));
    }
    // Absence wins over an unknown predicate name.
    assert!(!query_spatial(None, Some("POINT(0 0)"), "near", None)?);
    Ok(())
}

#[test]
fn test_unknown_predicate_is_reported() {
    let err = query_spatial(Some("POINT(0 0)"), Some("POINT(0 0)"), "near", None).unwrap_err();
    assert!(matches!(err, SpatialError::InvalidPredicate(ref name) if name == "near"));
}

#[test]
fn test_footprint_polygons_and_diagonal_lines() -> TestResult {
    init();
    let footprint = "POLYGON((2 2, 5 8, 8 2, 2 2))";
    let query = bbox_to_wkt("0,0,10,10")?;
    assert!(query_spatial(Some(footprint), Some(&query), "intersects", None)?);
    assert!(query_spatial(Some(footprint), Some(&query), "within", None)?);
    assert!(!query_spatial(Some(footprint), Some(&query), "touches", None)?);

    let track = "LINESTRING(0 0, 20 20)";
    assert!(query_spatial(Some(track), Some(&query), "crosses", None)?);
    assert!(!query_spatial(Some(track), Some(footprint), "disjoint", None)?);
    Ok(())
}
