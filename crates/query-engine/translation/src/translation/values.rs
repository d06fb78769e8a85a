//! Coerce loosely-typed request values at the boundary.

use chrono::NaiveDate;
use percent_encoding::percent_decode_str;

use super::error::Error;
use super::request::{Amenities, Scalar};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Text fields that are empty or blank count as absent.
pub fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn present_scalar(value: Option<&Scalar>) -> Option<&Scalar> {
    match value {
        Some(Scalar::Text(s)) if s.trim().is_empty() => None,
        other => other,
    }
}

/// Coerce an optional whole number.
pub fn integer(parameter: &'static str, value: Option<&Scalar>) -> Result<Option<i64>, Error> {
    match present_scalar(value) {
        None => Ok(None),
        Some(Scalar::Number(num)) => num
            .as_i64()
            .map(Some)
            .ok_or_else(|| Error::malformed(parameter, format!("expected an integer, got {num}"))),
        Some(Scalar::Text(s)) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| Error::malformed(parameter, format!("expected an integer, got '{s}'"))),
    }
}

/// Coerce a whole number that must be present.
pub fn required_integer(parameter: &'static str, value: Option<&Scalar>) -> Result<i64, Error> {
    integer(parameter, value)?.ok_or(Error::MissingRequiredParameter(parameter))
}

/// Coerce an optional non-negative whole number that fits a page count.
pub fn count(parameter: &'static str, value: Option<&Scalar>) -> Result<Option<u32>, Error> {
    match integer(parameter, value)? {
        None => Ok(None),
        Some(n) => u32::try_from(n)
            .map(Some)
            .map_err(|_| Error::malformed(parameter, format!("expected a non-negative count, got {n}"))),
    }
}

/// Coerce an optional finite number.
pub fn number(parameter: &'static str, value: Option<&Scalar>) -> Result<Option<f64>, Error> {
    let parsed = match present_scalar(value) {
        None => return Ok(None),
        Some(Scalar::Number(num)) => num.as_f64(),
        Some(Scalar::Text(s)) => s.trim().parse::<f64>().ok(),
    };
    match parsed {
        Some(n) if n.is_finite() => Ok(Some(n)),
        _ => Err(Error::malformed(parameter, "expected a number")),
    }
}

/// Coerce an optional value to text. Numbers keep their literal form, so a
/// zip code sent as `95112` matches the stored `'95112'`.
pub fn text(value: Option<&Scalar>) -> Option<String> {
    match present_scalar(value)? {
        Scalar::Number(num) => Some(num.to_string()),
        Scalar::Text(s) => Some(s.trim().to_string()),
    }
}

/// Parse a `YYYY-MM-DD` date that must be present.
pub fn required_date(parameter: &'static str, value: Option<&str>) -> Result<NaiveDate, Error> {
    let value = present(value).ok_or(Error::MissingRequiredParameter(parameter))?;
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|err| Error::malformed(parameter, format!("expected YYYY-MM-DD, got '{value}' ({err})")))
}

/// Decode requested amenities. Blank entries are dropped.
pub fn amenities(value: Option<&Amenities>) -> Result<Vec<String>, Error> {
    let list = match value {
        None => return Ok(vec![]),
        Some(Amenities::List(list)) => list.clone(),
        Some(Amenities::Encoded(encoded)) if encoded.trim().is_empty() => return Ok(vec![]),
        Some(Amenities::Encoded(encoded)) => {
            let decoded = percent_decode_str(encoded)
                .decode_utf8()
                .map_err(|err| Error::malformed("amenities", err.to_string()))?;
            serde_json::from_str::<Vec<String>>(&decoded)
                .map_err(|err| Error::malformed("amenities", err.to_string()))?
        }
    };
    Ok(list
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect())
}
