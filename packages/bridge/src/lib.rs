#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Host side of the message bridge from the embedded map renderer.
//!
//! The renderer posts one kind of message, a marker click:
//!
//! ```json
//! {"type": "marker_click",
//!  "place": {"id": "7", "ad": "...", "aciklama": "...", "kategori": "...",
//!            "enlem": 38.09, "boylam": 27.75}}
//! ```
//!
//! [`parse_event`] turns a raw payload into a typed [`MapEvent`];
//! [`relay`] additionally forwards it to a [`MapEventSink`] and swallows
//! failures so that a malformed message never reaches the host screen.

use serde_json::{Map, Value};
use tire_map_place::coords;
use tire_map_place_models::{MARKER_CLICK_EVENT, MapEvent, Point};

/// Errors produced while parsing a bridge message.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// The payload is not valid JSON.
    #[error("Invalid bridge JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The payload has no string `type` field.
    #[error("Bridge message has no type")]
    MissingType,

    /// The payload's `type` is not a known event.
    #[error("Unsupported bridge message type: {0}")]
    UnsupportedType(String),

    /// A marker click without a `place` object.
    #[error("Marker click has no place payload")]
    MissingPlace,

    /// A `place` field is missing or has the wrong type.
    #[error("Malformed place payload field: {field}")]
    MalformedPlace {
        /// Name of the offending field.
        field: &'static str,
    },
}

/// Receives events relayed from the map.
pub trait MapEventSink {
    /// Called when the user taps a marker.
    fn marker_selected(&mut self, point: Point);
}

impl<F: FnMut(Point)> MapEventSink for F {
    fn marker_selected(&mut self, point: Point) {
        self(point);
    }
}

/// Parses a raw bridge payload.
///
/// # Errors
///
/// * If the payload is not JSON
/// * If the `type` field is missing or not `marker_click`
/// * If the `place` object is missing, lacks an identifier or title, or
///   has invalid coordinates
pub fn parse_event(raw: &str) -> Result<MapEvent, BridgeError> {
    let value: Value = serde_json::from_str(raw)?;

    let kind = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or(BridgeError::MissingType)?;
    if kind != MARKER_CLICK_EVENT {
        return Err(BridgeError::UnsupportedType(kind.to_string()));
    }

    let place = value
        .get("place")
        .and_then(Value::as_object)
        .ok_or(BridgeError::MissingPlace)?;

    Ok(MapEvent::MarkerClick {
        point: place_point(place)?,
    })
}

/// Parses `raw` and forwards the event to `sink`.
///
/// Failures are logged and dropped. Returns whether an event was
/// delivered.
pub fn relay(raw: &str, sink: &mut impl MapEventSink) -> bool {
    match parse_event(raw) {
        Ok(MapEvent::MarkerClick { point }) => {
            log::debug!("Marker selected: {} ({})", point.title, point.id);
            sink.marker_selected(point);
            true
        }
        Err(e) => {
            log::warn!("Ignoring bridge message: {e}");
            false
        }
    }
}

fn place_point(place: &Map<String, Value>) -> Result<Point, BridgeError> {
    let id = match place.get("id") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Some(Value::Number(n)) if n.is_i64() || n.is_u64() => n.to_string(),
        _ => return Err(BridgeError::MalformedPlace { field: "id" }),
    };

    let Some(Value::String(title)) = place.get("ad") else {
        return Err(BridgeError::MalformedPlace { field: "ad" });
    };

    let coordinates = coords::validate(
        place.get("enlem").unwrap_or(&Value::Null),
        place.get("boylam").unwrap_or(&Value::Null),
    )
    .ok_or(BridgeError::MalformedPlace {
        field: "enlem/boylam",
    })?;

    Ok(Point {
        id,
        title: title.clone(),
        description: optional_text(place, "aciklama")?,
        category: optional_text(place, "kategori")?,
        latitude: coordinates.latitude,
        longitude: coordinates.longitude,
    })
}

fn optional_text(place: &Map<String, Value>, field: &'static str) -> Result<String, BridgeError> {
    match place.get(field) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(BridgeError::MalformedPlace { field }),
    }
}
