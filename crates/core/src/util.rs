//! Small conversions used around record processing.

use chrono::{NaiveDateTime, Utc};
use std::num::ParseIntError;
use thiserror::Error;

const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Invalid ISO-8601 timestamp '{value}'")]
    Timestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Invalid version '{value}'")]
    Version {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

/// The current UTC time as `YYYY-MM-DDTHH:MM:SSZ`.
pub fn today_and_now() -> String {
    Utc::now().format(ISO_FORMAT).to_string()
}

/// Seconds since the Unix epoch for a `YYYY-MM-DDTHH:MM:SSZ` timestamp.
pub fn iso_to_unix(value: &str) -> Result<i64, ConversionError> {
    NaiveDateTime::parse_from_str(value, ISO_FORMAT)
        .map(|dt| dt.and_utc().timestamp())
        .map_err(|source| ConversionError::Timestamp {
            value: value.to_string(),
            source,
        })
}

/// `x.y.z` as `x * 10000 + y * 100 + z`. Absent versions and versions
/// without exactly three parts give `-1`.
pub fn version_integer(version: Option<&str>) -> Result<i64, ConversionError> {
    let Some(version) = version else {
        return Ok(-1);
    };
    let parts: Vec<&str> = version.split('.').collect();
    let [x, y, z] = parts.as_slice() else {
        return Ok(-1);
    };
    let parse = |part: &str| {
        part.trim()
            .parse::<i64>()
            .map_err(|source| ConversionError::Version {
                value: version.to_string(),
                source,
            })
    };
    Ok(parse(x)? * 10000 + parse(y)? * 100 + parse(z)?)
}

/// The local part of a Clark-notation tag: `{uri}local` gives `local`.
pub fn xmltag_split(tag: &str) -> &str {
    match tag.rsplit_once('}') {
        Some((_, local)) => local,
        None => tag,
    }
}
