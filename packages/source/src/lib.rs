#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Record sources for the Tire map.
//!
//! The map core never performs I/O itself. A [`PlaceSource`] supplies the
//! raw point and route records; [`route_stops`] implements the stop
//! loading rule shared by the route screens.

pub mod json_file;

use async_trait::async_trait;
use tire_map_place::{RecordFields, RouteFields};
use tire_map_place_models::{PlaceIds, RawRecord, RouteSummary};

pub use json_file::JsonFileSource;

/// Errors that can occur while loading records.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// I/O error (file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload is valid JSON but not a record collection.
    #[error("Unexpected record shape: {message}")]
    Shape {
        /// Description of what went wrong.
        message: String,
    },
}

/// A datastore holding point-of-interest and route records.
#[async_trait]
pub trait PlaceSource: Send + Sync {
    /// Returns a short name for log messages.
    fn name(&self) -> &str;

    /// Fetches every point-of-interest record.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the records cannot be loaded.
    async fn places(&self) -> Result<Vec<RawRecord>, SourceError>;

    /// Fetches every route record.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the records cannot be loaded.
    async fn routes(&self) -> Result<Vec<RawRecord>, SourceError>;

    /// Fetches the points whose identifier is in `ids`, in `ids` order.
    ///
    /// The default implementation filters [`Self::places`]; sources that
    /// can query by identifier should override it.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the records cannot be loaded.
    async fn places_by_id(
        &self,
        ids: &PlaceIds,
        fields: &RecordFields,
    ) -> Result<Vec<RawRecord>, SourceError> {
        let mut matched: Vec<(usize, RawRecord)> = self
            .places()
            .await?
            .into_iter()
            .filter_map(|record| {
                let id = fields.id(&record)?;
                let position = ids.iter().position(|wanted| *wanted == id)?;
                Some((position, record))
            })
            .collect();
        matched.sort_by_key(|(position, _)| *position);
        Ok(matched.into_iter().map(|(_, record)| record).collect())
    }
}

/// Loads the stop records of `route`.
///
/// Fetches exactly the referenced points when the route's association
/// field resolved to at least one identifier, and every point otherwise.
///
/// # Errors
///
/// Returns [`SourceError`] if the source fails.
pub async fn route_stops(
    source: &dyn PlaceSource,
    route: &RouteSummary,
    fields: &RecordFields,
) -> Result<Vec<RawRecord>, SourceError> {
    if route.stop_ids.is_empty() {
        log::info!(
            "Route {} lists no stops; loading all points from {}",
            route.id,
            source.name()
        );
        return source.places().await;
    }

    let stops = source.places_by_id(&route.stop_ids, fields).await?;
    if stops.len() < route.stop_ids.len() {
        log::warn!(
            "Route {} references {} stops but {} were found in {}",
            route.id,
            route.stop_ids.len(),
            stops.len(),
            source.name()
        );
    }
    Ok(stops)
}

/// Loads and summarizes every route, skipping records without an
/// identifier.
///
/// # Errors
///
/// Returns [`SourceError`] if the source fails.
pub async fn route_summaries(
    source: &dyn PlaceSource,
    fields: &RouteFields,
) -> Result<Vec<RouteSummary>, SourceError> {
    let records = source.routes().await?;
    let total = records.len();
    let summaries: Vec<RouteSummary> = records
        .iter()
        .filter_map(|record| fields.summarize(record))
        .collect();

    if summaries.len() < total {
        log::debug!(
            "Skipped {} route records without an identifier",
            total - summaries.len()
        );
    }
    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    struct MemorySource {
        places: Vec<RawRecord>,
        routes: Vec<RawRecord>,
    }

    #[async_trait]
    impl PlaceSource for MemorySource {
        fn name(&self) -> &'static str {
            "memory"
        }

        async fn places(&self) -> Result<Vec<RawRecord>, SourceError> {
            Ok(self.places.clone())
        }

        async fn routes(&self) -> Result<Vec<RawRecord>, SourceError> {
            Ok(self.routes.clone())
        }
    }

    fn source() -> MemorySource {
        let record = |value| RawRecord::from_value(value).unwrap();
        MemorySource {
            places: vec![
                record(json!({"id": 1, "ad": "Kutu Han", "enlem": 38.08, "boylam": 27.73})),
                record(json!({"id": 2, "ad": "Tire Müzesi", "enlem": 38.09, "boylam": 27.74})),
                record(json!({"id": 3, "ad": "Otel", "enlem": 38.1, "boylam": 27.75})),
            ],
            routes: vec![
                record(json!({"id": 10, "rota_adi": "Çarşı", "gezi_nok_id": "3, 1, 99"})),
                record(json!({"id": 11, "rota_adi": "Hepsi", "gezi_nok_id": "{bozuk"})),
                record(json!({"rota_adi": "Kimliksiz"})),
            ],
        }
    }

    fn ids(records: &[RawRecord]) -> Vec<String> {
        let fields = RecordFields::default();
        records.iter().filter_map(|r| fields.id(r)).collect()
    }

    #[tokio::test]
    async fn summarizes_routes() {
        let routes = route_summaries(&source(), &RouteFields::default())
            .await
            .unwrap();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].name, "Çarşı");
        assert_eq!(routes[0].stop_ids.as_slice(), ["3", "1", "99"]);
        assert!(routes[1].stop_ids.is_empty());
    }

    #[tokio::test]
    async fn loads_referenced_stops_in_route_order() {
        let source = source();
        let routes = route_summaries(&source, &RouteFields::default())
            .await
            .unwrap();
        let stops = route_stops(&source, &routes[0], &RecordFields::default())
            .await
            .unwrap();
        assert_eq!(ids(&stops), ["3", "1"]);
    }

    #[tokio::test]
    async fn falls_back_to_all_points_without_stop_ids() {
        let source = source();
        let routes = route_summaries(&source, &RouteFields::default())
            .await
            .unwrap();
        let stops = route_stops(&source, &routes[1], &RecordFields::default())
            .await
            .unwrap();
        assert_eq!(ids(&stops), ["1", "2", "3"]);
    }
}
