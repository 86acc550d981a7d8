mod common;

use common::TestResult;
use metacat::{iso_to_unix, today_and_now, version_integer, xmltag_split};

#[test]
fn test_conversion_helpers() -> TestResult {
    assert_eq!(version_integer(Some("2.0.2"))?, 20002);
    assert_eq!(version_integer(Some("1.0"))?, -1);
    assert!(version_integer(Some("a.b.c")).is_err());

    let now = today_and_now();
    assert!(iso_to_unix(&now)? > iso_to_unix("2020-01-01T00:00:00Z")?);
    assert_eq!(xmltag_split("{http://www.opengis.net/cat/csw/2.0.2}Record"), "Record");
    Ok(())
}
