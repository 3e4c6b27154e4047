//! Field extraction from raw datastore records.
//!
//! Different tables (and different generations of the same table) store
//! the same concept under different keys, e.g. `enlem`/`latitude`/`lat`.
//! [`RecordFields`] lists the candidate keys for every canonical field,
//! tried in order; the first key holding a present value wins.

use serde::Deserialize;
use serde_json::Value;
use tire_map_place_models::{Coordinates, Point, RawRecord};

use crate::association::{number_id, text_id};
use crate::coords;

/// Maps canonical point fields to the record keys that may hold them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RecordFields {
    /// Identifier keys.
    pub id: Vec<String>,
    /// Display name keys.
    pub title: Vec<String>,
    /// Description keys.
    pub description: Vec<String>,
    /// Category label keys.
    pub category: Vec<String>,
    /// Latitude keys.
    pub latitude: Vec<String>,
    /// Longitude keys.
    pub longitude: Vec<String>,
    /// Title used when a record has no name.
    pub default_title: String,
    /// Category given to a handed-off highlighted point without one.
    pub handoff_category: String,
    /// Category given to route stops without one.
    pub route_stop_category: String,
}

pub(crate) fn keys(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| (*s).to_string()).collect()
}

impl Default for RecordFields {
    fn default() -> Self {
        Self {
            id: keys(&["id"]),
            title: keys(&["ad", "name", "title"]),
            description: keys(&["aciklama", "description"]),
            category: keys(&["kategori", "category"]),
            latitude: keys(&["enlem", "latitude", "lat"]),
            longitude: keys(&["boylam", "longitude", "lng", "lon"]),
            default_title: "Bilinmeyen Konum".to_string(),
            handoff_category: "belediye".to_string(),
            route_stop_category: "rota".to_string(),
        }
    }
}

impl RecordFields {
    /// Extracts the record identifier. Strings and integers are accepted.
    #[must_use]
    pub fn id(&self, record: &RawRecord) -> Option<String> {
        identifier(record, &self.id)
    }

    /// Extracts the display name.
    #[must_use]
    pub fn title(&self, record: &RawRecord) -> Option<String> {
        text(record, &self.title)
    }

    /// Extracts the description.
    #[must_use]
    pub fn description(&self, record: &RawRecord) -> Option<String> {
        text(record, &self.description)
    }

    /// Extracts the raw category label.
    #[must_use]
    pub fn category(&self, record: &RawRecord) -> Option<String> {
        text(record, &self.category)
    }

    /// Extracts and validates the coordinate pair.
    #[must_use]
    ///
    /// A zero coordinate counts as missing, so the chain moves on to the
    /// next key.
    pub fn coordinates(&self, record: &RawRecord) -> Option<Coordinates> {
        let latitude = first_located(record, &self.latitude).unwrap_or(&Value::Null);
        let longitude = first_located(record, &self.longitude).unwrap_or(&Value::Null);
        coords::validate(latitude, longitude)
    }

    /// Builds a [`Point`] from a regular datastore record.
    ///
    /// Returns `None` if the record has no identifier or no valid
    /// coordinates. A missing category becomes `default_category`, or an
    /// empty label when none is given.
    #[must_use]
    pub fn point(&self, record: &RawRecord, default_category: Option<&str>) -> Option<Point> {
        let Some(id) = self.id(record) else {
            log::debug!("Skipping record without identifier: {:?}", self.title(record));
            return None;
        };
        let Some(coordinates) = self.coordinates(record) else {
            log::debug!("Skipping record {id} without valid coordinates");
            return None;
        };

        Some(self.assemble(id, record, coordinates, default_category))
    }

    /// Builds a [`Point`] from a record handed over by another screen.
    ///
    /// Handoff records often lack an identifier, in which case one is
    /// derived from the coordinates. A missing category becomes
    /// [`Self::handoff_category`].
    #[must_use]
    pub fn handoff_point(&self, record: &RawRecord) -> Option<Point> {
        let coordinates = self.coordinates(record)?;
        let id = self
            .id(record)
            .unwrap_or_else(|| synthetic_id(coordinates));

        Some(self.assemble(
            id,
            record,
            coordinates,
            Some(self.handoff_category.as_str()),
        ))
    }

    fn assemble(
        &self,
        id: String,
        record: &RawRecord,
        coordinates: Coordinates,
        default_category: Option<&str>,
    ) -> Point {
        Point {
            id,
            title: self
                .title(record)
                .unwrap_or_else(|| self.default_title.clone()),
            description: self.description(record).unwrap_or_default(),
            category: self
                .category(record)
                .or_else(|| default_category.map(String::from))
                .unwrap_or_default(),
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
        }
    }
}

/// Identifier for a point that arrived without one.
#[must_use]
pub fn synthetic_id(coordinates: Coordinates) -> String {
    format!("@{},{}", coordinates.latitude, coordinates.longitude)
}

/// Returns the first present value under `keys` as an identifier.
pub(crate) fn identifier(record: &RawRecord, keys: &[String]) -> Option<String> {
    first_present(record, keys).and_then(|value| match value {
        Value::String(s) => text_id(s),
        Value::Number(n) => number_id(n),
        _ => None,
    })
}

/// Returns the first value under `keys` that is present: not null, not a
/// blank string, and not `false`.
pub(crate) fn first_present<'a>(record: &'a RawRecord, keys: &[String]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| record.get(key))
        .find(|value| is_present(value))
}

/// Like [`first_present`], but also skips coordinates equal to zero.
fn first_located<'a>(record: &'a RawRecord, keys: &[String]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| record.get(key))
        .find(|value| is_present(value) && coords::parse_coordinate(value) != Some(0.0))
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    }
}

/// Returns the first present value under `keys` rendered as text.
pub(crate) fn text(record: &RawRecord, keys: &[String]) -> Option<String> {
    first_present(record, keys).and_then(|value| match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}
