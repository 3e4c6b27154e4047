//! Records loaded from local JSON exports.
//!
//! Each file holds either a bare array of objects or a response envelope
//! with the array under `data`, as returned by the hosted datastore's REST
//! endpoint.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tire_map_place_models::RawRecord;

use crate::{PlaceSource, SourceError};

/// A [`PlaceSource`] backed by JSON files on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    places_path: PathBuf,
    routes_path: Option<PathBuf>,
}

impl JsonFileSource {
    /// Creates a source reading points from `places_path`.
    #[must_use]
    pub fn new(places_path: impl Into<PathBuf>) -> Self {
        Self {
            places_path: places_path.into(),
            routes_path: None,
        }
    }

    /// Also reads route records from `routes_path`.
    #[must_use]
    pub fn with_routes(mut self, routes_path: impl Into<PathBuf>) -> Self {
        self.routes_path = Some(routes_path.into());
        self
    }
}

#[async_trait]
impl PlaceSource for JsonFileSource {
    fn name(&self) -> &str {
        self.places_path.to_str().unwrap_or("json file")
    }

    async fn places(&self) -> Result<Vec<RawRecord>, SourceError> {
        load_records(&self.places_path).await
    }

    async fn routes(&self) -> Result<Vec<RawRecord>, SourceError> {
        match &self.routes_path {
            Some(path) => load_records(path).await,
            None => Ok(Vec::new()),
        }
    }
}

/// Reads a JSON record collection from `path`.
///
/// Array elements that are not objects are skipped with a warning.
///
/// # Errors
///
/// * If the file cannot be read
/// * If the file is not valid JSON
/// * If the JSON is neither an array nor an object with a `data` array
pub async fn load_records(path: &Path) -> Result<Vec<RawRecord>, SourceError> {
    let text = tokio::fs::read_to_string(path).await?;
    let records = parse_records(&text)?;
    log::info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Parses a JSON record collection.
///
/// # Errors
///
/// * If `text` is not valid JSON
/// * If the JSON is neither an array nor an object with a `data` array
pub fn parse_records(text: &str) -> Result<Vec<RawRecord>, SourceError> {
    let items = match serde_json::from_str::<Value>(text)? {
        Value::Array(items) => items,
        Value::Object(mut envelope) => match envelope.remove("data") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(SourceError::Shape {
                    message: "expected a `data` array in the response object".to_string(),
                });
            }
        },
        other => {
            return Err(SourceError::Shape {
                message: format!("expected an array of records, found {other}"),
            });
        }
    };

    let total = items.len();
    let records: Vec<RawRecord> = items.into_iter().filter_map(RawRecord::from_value).collect();
    if records.len() < total {
        log::warn!("Skipped {} non-object records", total - records.len());
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use tempfile::NamedTempFile;
    use tire_map_place::RecordFields;
    use tire_map_place_models::PlaceIds;

    use super::*;

    fn file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn parses_bare_arrays_and_envelopes() {
        assert_eq!(parse_records(r#"[{"id": 1}, {"id": 2}]"#).unwrap().len(), 2);
        assert_eq!(
            parse_records(r#"{"data": [{"id": 1}], "error": null}"#)
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn skips_non_object_elements() {
        let records = parse_records(r#"[{"id": 1}, 2, null, "x"]"#).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn rejects_other_shapes() {
        assert!(matches!(
            parse_records(r#"{"rows": []}"#),
            Err(SourceError::Shape { .. })
        ));
        assert!(matches!(parse_records("42"), Err(SourceError::Shape { .. })));
        assert!(matches!(parse_records("[{"), Err(SourceError::Json(_))));
    }

    #[tokio::test]
    async fn reads_places_and_routes_from_disk() {
        let places = file(r#"[{"id": 1, "ad": "Kutu Han"}, {"id": 2, "ad": "Müze"}]"#);
        let routes = file(r#"[{"id": 5, "gezi_nok_id": [2]}]"#);
        let source = JsonFileSource::new(places.path()).with_routes(routes.path());

        assert_eq!(source.places().await.unwrap().len(), 2);
        assert_eq!(source.routes().await.unwrap().len(), 1);

        let ids: PlaceIds = ["2".to_string()].into_iter().collect();
        let matched = source
            .places_by_id(&ids, &RecordFields::default())
            .await
            .unwrap();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].get("ad").unwrap(), "Müze");
    }

    #[tokio::test]
    async fn missing_routes_file_means_no_routes() {
        let places = file("[]");
        let source = JsonFileSource::new(places.path());
        assert!(source.routes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_places_file_is_an_io_error() {
        let source = JsonFileSource::new("/nonexistent/tire_map/places.json");
        assert!(matches!(source.places().await, Err(SourceError::Io(_))));
    }
}
