#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Point-of-interest types shared across the Tire map system.
//!
//! Raw datastore rows arrive as [`RawRecord`]s with loosely-typed fields.
//! Everything downstream of validation works on [`Point`]s, which are
//! always geographically valid, and on the derived [`Marker`] and
//! [`Viewport`] values that feed the map document.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum_macros::{AsRefStr, Display, EnumString};

/// Marker color used when a point's category is not part of the taxonomy.
pub const DEFAULT_MARKER_COLOR: &str = "#2E5266";

/// Event type string carried by marker click messages on the bridge.
pub const MARKER_CLICK_EVENT: &str = "marker_click";

/// An externally-sourced datastore row.
///
/// Field names and value types vary between tables and between historical
/// versions of the same table, so the record is kept as an untyped JSON
/// object and read through field fallback chains.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Map<String, Value>);

impl RawRecord {
    /// Wraps a JSON value as a record. Returns `None` for anything that
    /// is not a JSON object.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Returns the raw value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

impl From<Map<String, Value>> for RawRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// A validated WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinates {
    /// Latitude in decimal degrees (-90..=90, never zero).
    pub latitude: f64,
    /// Longitude in decimal degrees (-180..=180, never zero).
    pub longitude: f64,
}

/// A single geocoded place with a category label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Point {
    /// Datastore identifier.
    pub id: String,
    /// Display name.
    pub title: String,
    /// Free-text description (may be empty).
    pub description: String,
    /// Category label exactly as stored upstream (may be empty).
    pub category: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl Point {
    /// Returns the coordinate pair of this point.
    #[must_use]
    pub const fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// An ordered, duplicate-free list of place identifiers.
///
/// Produced from association fields. First-seen order is preserved so
/// that previews ("first three stops") are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceIds(Vec<String>);

impl PlaceIds {
    /// Creates an empty identifier list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends `id` unless it is already present. Returns whether it was
    /// added.
    pub fn insert(&mut self, id: String) -> bool {
        if self.contains(&id) {
            return false;
        }
        self.0.push(id);
        true
    }

    /// Returns `true` if `id` is in the list.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|existing| existing == id)
    }

    /// Number of identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no identifiers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates identifiers in first-seen order.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    /// Returns at most the first `n` identifiers.
    #[must_use]
    pub fn first(&self, n: usize) -> &[String] {
        &self.0[..n.min(self.0.len())]
    }

    /// Returns the identifiers as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl FromIterator<String> for PlaceIds {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut ids = Self::new();
        for id in iter {
            ids.insert(id);
        }
        ids
    }
}

impl IntoIterator for PlaceIds {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PlaceIds {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Canonical point-of-interest categories offered as map filters.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum PlaceCategory {
    /// Historic buildings and sites
    #[serde(rename = "Tarihi")]
    #[strum(serialize = "Tarihi")]
    Historic,
    /// Museums, cultural centers and arts venues
    #[serde(rename = "Kültürel")]
    #[strum(serialize = "Kültürel")]
    Cultural,
    /// Restaurants, cafes and eateries
    #[serde(rename = "Yeme-İçme")]
    #[strum(serialize = "Yeme-İçme")]
    FoodAndDrink,
    /// Hotels, guesthouses and other lodging
    #[serde(rename = "Konaklama")]
    #[strum(serialize = "Konaklama")]
    Accommodation,
}

impl PlaceCategory {
    /// Returns all variants in filter-bar order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Historic,
            Self::Cultural,
            Self::FoodAndDrink,
            Self::Accommodation,
        ]
    }

    /// Marker color for this category.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Historic => "#8B4513",
            Self::Cultural => "#9C2BCB",
            Self::FoodAndDrink => "#FF5722",
            Self::Accommodation => "#1976D2",
        }
    }

    /// Hue rotation in degrees that tints the stock (blue) marker icon
    /// towards [`Self::color`].
    #[must_use]
    pub const fn hue_rotation(self) -> u16 {
        match self {
            Self::Historic => 190,
            Self::Cultural => 50,
            Self::FoodAndDrink => 268,
            Self::Accommodation => 240,
        }
    }
}

/// The category filter selected on the map screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Show every point.
    #[default]
    All,
    /// Show points belonging to a taxonomy category, including synonyms.
    Category(PlaceCategory),
    /// Show points whose canonical label equals this label exactly.
    Label(String),
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str("Tümü"),
            Self::Category(category) => write!(f, "{category}"),
            Self::Label(label) => f.write_str(label),
        }
    }
}

/// A point prepared for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// The point being drawn.
    pub point: Point,
    /// Taxonomy category the point's label resolves to, if any.
    pub category: Option<PlaceCategory>,
    /// Whether this is the emphasized, focused point.
    pub highlighted: bool,
}

impl Marker {
    /// Render color for this marker.
    #[must_use]
    pub fn color(&self) -> &'static str {
        self.category
            .map_or(DEFAULT_MARKER_COLOR, PlaceCategory::color)
    }

    /// Icon hue rotation for this marker.
    #[must_use]
    pub fn hue_rotation(&self) -> u16 {
        self.category.map_or(0, PlaceCategory::hue_rotation)
    }
}

/// The map's center coordinate and zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    /// Center latitude.
    pub center_lat: f64,
    /// Center longitude.
    pub center_lon: f64,
    /// Tile zoom level.
    pub zoom: u8,
}

/// The marker set and framing produced for one filter/highlight request.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSet {
    /// Markers in render order. The highlighted marker, if any, is first.
    pub markers: Vec<Marker>,
    /// Map framing for these markers.
    pub viewport: Viewport,
}

impl MarkerSet {
    /// Returns `true` when nothing matched the request.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Returns the highlighted marker, if one is present.
    #[must_use]
    pub fn highlighted(&self) -> Option<&Marker> {
        self.markers.iter().find(|m| m.highlighted)
    }
}

/// The `place` object of a marker click message.
///
/// Field names are a fixed contract with the embedded renderer and the
/// point-detail screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacePayload {
    /// Datastore identifier.
    pub id: String,
    /// Display name.
    pub ad: String,
    /// Description.
    pub aciklama: String,
    /// Category label.
    pub kategori: String,
    /// Latitude.
    pub enlem: f64,
    /// Longitude.
    pub boylam: f64,
}

impl From<&Point> for PlacePayload {
    fn from(point: &Point) -> Self {
        Self {
            id: point.id.clone(),
            ad: point.title.clone(),
            aciklama: point.description.clone(),
            kategori: point.category.clone(),
            enlem: point.latitude,
            boylam: point.longitude,
        }
    }
}

/// A typed event relayed from the embedded map to the host screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MapEvent {
    /// The user tapped a marker.
    MarkerClick {
        /// The point behind the tapped marker.
        point: Point,
    },
}

/// A curated route as shown on the route list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    /// Datastore identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Description, shortened for list cards.
    pub description: String,
    /// Accent color.
    pub color: String,
    /// Every stop referenced by the route, in route order.
    pub stop_ids: PlaceIds,
}

impl RouteSummary {
    /// Number of stops previewed on a route card.
    pub const PREVIEW_STOPS: usize = 3;

    /// Stop identifiers shown on the route card.
    #[must_use]
    pub fn preview_ids(&self) -> &[String] {
        self.stop_ids.first(Self::PREVIEW_STOPS)
    }
}
