//! Coordinate validation for loosely-typed datastore values.
//!
//! Latitude/longitude arrive as JSON numbers, numeric strings, empty
//! strings, or null depending on which table and which import produced the
//! row. A pair that cannot be placed on the map is a normal outcome and is
//! reported as `None`.

use serde_json::Value;
use tire_map_place_models::Coordinates;

/// Validates a raw latitude/longitude pair.
///
/// Returns `None` if either value is missing or unparsable, if either is
/// exactly zero (upstream feeds use `0` as a "no location" sentinel), or
/// if the pair falls outside the WGS84 domain.
#[must_use]
pub fn validate(raw_lat: &Value, raw_lon: &Value) -> Option<Coordinates> {
    let latitude = parse_coordinate(raw_lat)?;
    let longitude = parse_coordinate(raw_lon)?;

    if latitude == 0.0 || longitude == 0.0 {
        return None;
    }
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return None;
    }

    Some(Coordinates {
        latitude,
        longitude,
    })
}

/// Parses a single coordinate value into a finite `f64`.
#[must_use]
pub fn parse_coordinate(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_decimal(s),
        _ => None,
    }?;

    parsed.is_finite().then_some(parsed)
}

/// Parses a decimal string, accepting a single decimal comma
/// (`"38,0931"`) as written by Turkish-locale spreadsheets.
fn parse_decimal(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }

    trimmed.parse::<f64>().ok().or_else(|| {
        if trimmed.matches(',').count() == 1 && !trimmed.contains('.') {
            trimmed.replace(',', ".").parse().ok()
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn accepts_numbers_and_numeric_strings() {
        let coords = validate(&json!(38.09), &json!(27.75)).unwrap();
        assert!((coords.latitude - 38.09).abs() < f64::EPSILON);
        assert!((coords.longitude - 27.75).abs() < f64::EPSILON);

        let coords = validate(&json!(" 38.0931 "), &json!("27.7519")).unwrap();
        assert!((coords.latitude - 38.0931).abs() < f64::EPSILON);
        assert!((coords.longitude - 27.7519).abs() < f64::EPSILON);
    }

    #[test]
    fn accepts_decimal_comma() {
        let coords = validate(&json!("38,0931"), &json!("27,7519")).unwrap();
        assert!((coords.latitude - 38.0931).abs() < f64::EPSILON);
        assert!(validate(&json!("38,09,31"), &json!(27.75)).is_none());
    }

    #[test]
    fn rejects_zero_sentinel() {
        assert!(validate(&json!(0), &json!(0)).is_none());
        assert!(validate(&json!(38.09), &json!(0)).is_none());
        assert!(validate(&json!("0"), &json!("27.75")).is_none());
        assert!(validate(&json!(0.0), &json!(27.75)).is_none());
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(validate(&json!(95), &json!(10)).is_none());
        assert!(validate(&json!(-90.5), &json!(10)).is_none());
        assert!(validate(&json!(45), &json!(180.01)).is_none());
        assert!(validate(&json!(90), &json!(-180)).is_some());
    }

    #[test]
    fn rejects_missing_and_garbage() {
        assert!(validate(&Value::Null, &json!(27.75)).is_none());
        assert!(validate(&json!(""), &json!(27.75)).is_none());
        assert!(validate(&json!("   "), &json!(27.75)).is_none());
        assert!(validate(&json!("abc"), &json!(27.75)).is_none());
        assert!(validate(&json!("NaN"), &json!(27.75)).is_none());
        assert!(validate(&json!("inf"), &json!(27.75)).is_none());
        assert!(validate(&json!(true), &json!(27.75)).is_none());
        assert!(validate(&json!([38.0]), &json!(27.75)).is_none());
    }
}
