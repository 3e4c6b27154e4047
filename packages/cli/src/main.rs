#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for the Tire map.
//!
//! Builds map documents from exported point and route records, lists
//! routes, and decodes bridge messages posted by a rendered map.

mod config;

use std::io::Write as _;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tire_map_place::category::parse_filter;
use tire_map_place_models::{PlaceIds, RawRecord};
use tire_map_render::MapDocument;
use tire_map_source::{JsonFileSource, PlaceSource as _, route_stops, route_summaries};

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "tire_map", about = "Tire points-of-interest map tool")]
struct Cli {
    /// TOML file replacing the embedded configuration
    #[arg(long, global = true, env = "TIRE_MAP_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the points-of-interest map for a category
    Map {
        /// JSON file with point records
        #[arg(long)]
        places: PathBuf,
        /// Category filter (`Tümü` for every point)
        #[arg(long, default_value = "Tümü")]
        category: String,
        /// JSON object of a point to focus, e.g. one handed over from a
        /// detail screen
        #[arg(long)]
        highlight: Option<String>,
        /// Output HTML file (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Render the map of one route's stops
    Route {
        /// JSON file with route records
        #[arg(long)]
        routes: PathBuf,
        /// JSON file with point records
        #[arg(long)]
        places: PathBuf,
        /// Route identifier
        #[arg(long)]
        id: String,
        /// Output HTML file (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// List routes with a preview of their first stops
    Routes {
        /// JSON file with route records
        #[arg(long)]
        routes: PathBuf,
        /// JSON file with point records
        #[arg(long)]
        places: PathBuf,
    },
    /// Decode a bridge message posted by a rendered map
    Event {
        /// Raw message (read from stdin when omitted)
        payload: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Map {
            places,
            category,
            highlight,
            out,
        } => render_map(&config, &places, &category, highlight.as_deref(), out.as_deref()).await?,
        Commands::Route {
            routes,
            places,
            id,
            out,
        } => render_route(&config, &routes, &places, &id, out.as_deref()).await?,
        Commands::Routes { routes, places } => list_routes(&config, &routes, &places).await?,
        Commands::Event { payload } => decode_event(payload)?,
    }

    Ok(())
}

/// Builds the filtered map, focusing `highlight` when given.
async fn render_map(
    config: &AppConfig,
    places: &Path,
    category: &str,
    highlight: Option<&str>,
    out: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = JsonFileSource::new(places);
    let records = source.places().await?;

    let highlighted = highlight.map(parse_handoff).transpose()?;
    let filter = parse_filter(category);

    let set = config
        .marker_builder()
        .build(&records, &filter, highlighted.as_ref());
    if set.is_empty() {
        log::warn!("No places to show for category {filter}");
    }

    let caption = filter.to_string();
    let document = config.document_generator().generate_with_caption(
        &set.markers,
        &set.viewport,
        Some(caption.as_str()),
    );
    write_document(&document, out)
}

/// Builds the map of one route's stops.
async fn render_route(
    config: &AppConfig,
    routes: &Path,
    places: &Path,
    id: &str,
    out: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = JsonFileSource::new(places).with_routes(routes);

    let route = route_summaries(&source, &config.routes)
        .await?
        .into_iter()
        .find(|route| route.id == id)
        .ok_or_else(|| format!("Route {id} not found in {}", routes.display()))?;

    let stops = route_stops(&source, &route, &config.fields).await?;
    let set = config.marker_builder().build_route(&stops);
    if set.is_empty() {
        log::warn!("Route {} has no stops with coordinates", route.id);
    }

    let document = config.document_generator().generate_with_caption(
        &set.markers,
        &set.viewport,
        Some(route.name.as_str()),
    );
    write_document(&document, out)
}

/// Prints every route card: name, color, description and first stops.
async fn list_routes(
    config: &AppConfig,
    routes: &Path,
    places: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = JsonFileSource::new(places).with_routes(routes);
    let summaries = route_summaries(&source, &config.routes).await?;

    for route in &summaries {
        let preview: PlaceIds = route.preview_ids().iter().cloned().collect();
        let stops = source.places_by_id(&preview, &config.fields).await?;
        let names: Vec<String> = stops
            .iter()
            .map(|stop| {
                config
                    .fields
                    .title(stop)
                    .unwrap_or_else(|| config.fields.default_title.clone())
            })
            .collect();

        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{} [{}] {}", route.id, route.color, route.name)?;
        writeln!(stdout, "  {}", route.description)?;
        if names.is_empty() {
            writeln!(stdout, "  Durak yok")?;
        } else {
            writeln!(
                stdout,
                "  Duraklar ({}): {}",
                route.stop_ids.len(),
                names.join(", ")
            )?;
        }
    }

    log::info!("Listed {} routes", summaries.len());
    Ok(())
}

/// Parses a bridge message and prints the typed event.
fn decode_event(payload: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let raw = match payload {
        Some(raw) => raw,
        None => std::io::read_to_string(std::io::stdin())?,
    };

    let event = tire_map_bridge::parse_event(raw.trim())?;
    println!("{}", serde_json::to_string_pretty(&event)?);
    Ok(())
}

fn parse_handoff(raw: &str) -> Result<RawRecord, Box<dyn std::error::Error>> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    RawRecord::from_value(value).ok_or_else(|| "--highlight must be a JSON object".into())
}

fn write_document(
    document: &MapDocument,
    out: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    match out {
        Some(path) => {
            std::fs::write(path, document.as_str())?;
            log::info!("Wrote map document to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(document.as_str().as_bytes())?;
        }
    }
    Ok(())
}
