//! Route records and their list-card summaries.

use serde::Deserialize;
use tire_map_place_models::{RawRecord, RouteSummary};

use crate::association;
use crate::record::{first_present, identifier, keys, text};

/// Maps canonical route fields to the record keys that may hold them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RouteFields {
    /// Identifier keys.
    pub id: Vec<String>,
    /// Route name keys.
    pub name: Vec<String>,
    /// Description keys.
    pub description: Vec<String>,
    /// Accent color keys.
    pub color: Vec<String>,
    /// Association field keys referencing the route's stops.
    pub stops: Vec<String>,
    /// Name used when a route has none.
    pub default_name: String,
    /// Description shown when a route has none.
    pub default_description: String,
    /// Accent color used when a route has none.
    pub default_color: String,
    /// Number of words kept on route cards.
    pub description_words: usize,
}

impl Default for RouteFields {
    fn default() -> Self {
        Self {
            id: keys(&["id"]),
            name: keys(&["rota_adi", "ad", "name"]),
            description: keys(&["aciklama", "description"]),
            color: keys(&["renk", "color"]),
            stops: keys(&["gezi_nok_id"]),
            default_name: "Rota".to_string(),
            default_description: "Açıklama bulunamadı".to_string(),
            default_color: "#1976D2".to_string(),
            description_words: 50,
        }
    }
}

impl RouteFields {
    /// Summarizes a route record for the route list.
    ///
    /// Returns `None` for a record without an identifier. The stop list
    /// comes from the route's association field and is empty when the
    /// field is missing or malformed.
    #[must_use]
    pub fn summarize(&self, record: &RawRecord) -> Option<RouteSummary> {
        let id = identifier(record, &self.id)?;

        let description = text(record, &self.description).map_or_else(
            || self.default_description.clone(),
            |d| truncate_words(&d, self.description_words),
        );

        Some(RouteSummary {
            name: text(record, &self.name).unwrap_or_else(|| self.default_name.clone()),
            description,
            color: text(record, &self.color).unwrap_or_else(|| self.default_color.clone()),
            stop_ids: association::resolve(first_present(record, &self.stops)),
            id,
        })
    }
}

/// Keeps the first `limit` words of `text`, appending `...` when anything
/// was cut.
#[must_use]
pub fn truncate_words(text: &str, limit: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= limit {
        return words.join(" ");
    }
    format!("{}...", words[..limit].join(" "))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record(value: serde_json::Value) -> RawRecord {
        RawRecord::from_value(value).unwrap()
    }

    #[test]
    fn summarizes_route_with_string_stops() {
        let route = RouteFields::default()
            .summarize(&record(json!({
                "id": 2,
                "rota_adi": "Tarihi Çarşı Turu",
                "aciklama": "Kısa bir yürüyüş",
                "renk": "#8B4513",
                "gezi_nok_id": "4, 5, 4, 9, 11"
            })))
            .unwrap();
        assert_eq!(route.id, "2");
        assert_eq!(route.name, "Tarihi Çarşı Turu");
        assert_eq!(route.description, "Kısa bir yürüyüş");
        assert_eq!(route.color, "#8B4513");
        assert_eq!(route.stop_ids.as_slice(), ["4", "5", "9", "11"]);
        assert_eq!(route.preview_ids(), ["4", "5", "9"]);
    }

    #[test]
    fn applies_defaults() {
        let route = RouteFields::default()
            .summarize(&record(json!({"id": "r1", "gezi_nok_id": null})))
            .unwrap();
        assert_eq!(route.name, "Rota");
        assert_eq!(route.description, "Açıklama bulunamadı");
        assert_eq!(route.color, "#1976D2");
        assert!(route.stop_ids.is_empty());
    }

    #[test]
    fn name_falls_back_to_alternate_keys() {
        let route = RouteFields::default()
            .summarize(&record(json!({"id": 1, "name": "Gezi", "gezi_nok_id": [3, 1]})))
            .unwrap();
        assert_eq!(route.name, "Gezi");
        assert_eq!(route.stop_ids.as_slice(), ["3", "1"]);
    }

    #[test]
    fn route_without_id_is_skipped() {
        assert!(
            RouteFields::default()
                .summarize(&record(json!({"rota_adi": "X"})))
                .is_none()
        );
    }

    #[test]
    fn truncates_long_descriptions() {
        let long = (1..=60).map(|i| i.to_string()).collect::<Vec<_>>().join(" ");
        let short = truncate_words(&long, 50);
        assert!(short.ends_with("50..."));
        assert_eq!(short.split_whitespace().count(), 50);
        assert_eq!(truncate_words("bir iki", 50), "bir iki");
    }
}
