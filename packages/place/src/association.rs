//! Resolution of polymorphic "related IDs" fields.
//!
//! Route rows reference their stops through a single column that has been
//! written in several encodings over the years: a comma-separated string,
//! a JSON array, a bare number, or a string holding JSON. Every encoding is
//! classified once into an [`AssociationField`] and resolved to an ordered,
//! duplicate-free [`PlaceIds`]. Malformed input resolves to an empty list.

use serde_json::{Number, Value};
use tire_map_place_models::PlaceIds;

/// The recognized encodings of an association field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AssociationField<'a> {
    /// Null or missing.
    Absent,
    /// `"3, 7, 12"`
    Delimited(&'a str),
    /// A string holding JSON, e.g. `"[3, 7]"`.
    Encoded(&'a str),
    /// A JSON array of identifiers.
    List(&'a [Value]),
    /// A single numeric identifier.
    Single(&'a Number),
    /// Booleans and objects; never yields identifiers.
    Unrecognized,
}

impl<'a> AssociationField<'a> {
    /// Classifies a raw field value.
    #[must_use]
    pub fn classify(raw: Option<&'a Value>) -> Self {
        match raw {
            None | Some(Value::Null) => Self::Absent,
            Some(Value::String(s)) => {
                let trimmed = s.trim_start();
                if trimmed.starts_with('[') || trimmed.starts_with('{') {
                    Self::Encoded(s)
                } else {
                    Self::Delimited(s)
                }
            }
            Some(Value::Array(items)) => Self::List(items),
            Some(Value::Number(n)) => Self::Single(n),
            Some(Value::Bool(_) | Value::Object(_)) => Self::Unrecognized,
        }
    }

    /// Resolves the field to identifier strings.
    #[must_use]
    pub fn resolve(&self) -> PlaceIds {
        match *self {
            Self::Absent => PlaceIds::new(),
            Self::Delimited(s) => s.split(',').filter_map(text_id).collect(),
            Self::Encoded(s) => match serde_json::from_str::<Value>(s) {
                Ok(Value::Array(items)) => list_ids(&items),
                Ok(Value::Number(n)) => number_id(&n).into_iter().collect(),
                Ok(other) => {
                    log::debug!("Association field decoded to unsupported JSON: {other}");
                    PlaceIds::new()
                }
                Err(e) => {
                    log::debug!("Failed to decode association field {s:?} as JSON: {e}");
                    PlaceIds::new()
                }
            },
            Self::List(items) => list_ids(items),
            Self::Single(n) => number_id(n).into_iter().collect(),
            Self::Unrecognized => {
                log::debug!("Ignoring association field with unsupported shape");
                PlaceIds::new()
            }
        }
    }
}

/// Resolves a raw association field to an ordered, duplicate-free list of
/// identifiers.
#[must_use]
pub fn resolve(raw: Option<&Value>) -> PlaceIds {
    AssociationField::classify(raw).resolve()
}

/// Stringifies the identifier elements of a JSON array. Nulls, empty
/// strings, and nested structures are skipped.
fn list_ids(items: &[Value]) -> PlaceIds {
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => text_id(s),
            Value::Number(n) => number_id(n),
            _ => None,
        })
        .collect()
}

/// Trims a textual identifier. Integral decimal strings (`"4.0"`) are
/// rendered like the equivalent number so both encodings agree; other text
/// is kept verbatim.
pub(crate) fn text_id(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<Number>() {
        Ok(n) if n.is_f64() => integral_id(&n).or_else(|| Some(trimmed.to_string())),
        _ => Some(trimmed.to_string()),
    }
}

/// Renders a JSON number as an identifier. Integral floats (`7.0`) render
/// without a fractional part so they match integer keys.
pub(crate) fn number_id(n: &Number) -> Option<String> {
    if let Some(i) = n.as_i64() {
        return Some(i.to_string());
    }
    if let Some(u) = n.as_u64() {
        return Some(u.to_string());
    }
    if !n.as_f64()?.is_finite() {
        return None;
    }
    integral_id(n).or_else(|| Some(n.to_string()))
}

/// Renders an integral float as an integer.
fn integral_id(n: &Number) -> Option<String> {
    let f = n.as_f64()?;
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 9_007_199_254_740_992.0 {
        #[allow(clippy::cast_possible_truncation)]
        return Some((f as i64).to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn ids(raw: &Value) -> Vec<String> {
        resolve(Some(raw)).into_iter().collect()
    }

    #[test]
    fn splits_comma_strings() {
        assert_eq!(ids(&json!("3, 3, 7")), ["3", "7"]);
        assert_eq!(ids(&json!(" 12 ,, 4 , ")), ["12", "4"]);
        assert_eq!(ids(&json!("5")), ["5"]);
        assert!(ids(&json!("")).is_empty());
        assert!(ids(&json!(" , ")).is_empty());
    }

    #[test]
    fn integral_decimal_strings_match_numbers() {
        assert_eq!(ids(&json!("4.0, 4, 5.50")), ["4", "5.50"]);
        assert_eq!(ids(&json!(4.0)), ids(&json!("4.0")));
        assert_eq!(ids(&json!(["7.0", 7, "007"])), ["7", "007"]);
    }

    #[test]
    fn stringifies_lists() {
        assert_eq!(ids(&json!([1, "2", 1, 3.0])), ["1", "2", "3"]);
        assert_eq!(ids(&json!(["a", null, "", {"x": 1}, "b"])), ["a", "b"]);
    }

    #[test]
    fn wraps_single_numbers() {
        assert_eq!(ids(&json!(42)), ["42"]);
        assert_eq!(ids(&json!(42.0)), ["42"]);
    }

    #[test]
    fn decodes_json_strings() {
        assert_eq!(ids(&json!("[1,2]")), ["1", "2"]);
        assert_eq!(ids(&json!(" [\"9\", 9, 10] ")), ["9", "10"]);
    }

    #[test]
    fn malformed_and_absent_resolve_empty() {
        assert!(resolve(None).is_empty());
        assert!(ids(&Value::Null).is_empty());
        assert!(ids(&json!("[1,2")).is_empty());
        assert!(ids(&json!("{\"a\": 1}")).is_empty());
        assert!(ids(&json!({"ids": [1, 2]})).is_empty());
        assert!(ids(&json!(true)).is_empty());
    }

    #[test]
    fn classifies_shapes() {
        assert_eq!(AssociationField::classify(None), AssociationField::Absent);
        assert_eq!(
            AssociationField::classify(Some(&json!("1,2"))),
            AssociationField::Delimited("1,2")
        );
        assert_eq!(
            AssociationField::classify(Some(&json!("[1]"))),
            AssociationField::Encoded("[1]")
        );
        assert!(matches!(
            AssociationField::classify(Some(&json!(7))),
            AssociationField::Single(_)
        ));
    }
}
