//! Map document generation.
//!
//! A [`MapDocument`] is a complete HTML page that loads Leaflet, draws the
//! base tile layer and one marker per [`Marker`], and posts a
//! `marker_click` message to the host when a marker is tapped. The page is
//! rebuilt from scratch for every marker set; there is no incremental
//! update path.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use tire_map_place_models::{MARKER_CLICK_EVENT, Marker, PlacePayload, Viewport};

/// Prefix of the script line that carries the marker data.
pub const MARKER_DATA_PREFIX: &str = "var markers = ";

/// Presentation settings for generated documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentOptions {
    /// Tile URL template with `{z}`, `{x}` and `{y}` placeholders.
    pub tile_url: String,
    /// Attribution shown in the map corner.
    pub tile_attribution: String,
    /// Highest zoom level the tile layer serves.
    pub max_zoom: u8,
    /// Leaflet stylesheet URL.
    pub leaflet_css: String,
    /// Leaflet script URL.
    pub leaflet_js: String,
    /// Page title, followed by the caption when one is given.
    pub title: String,
    /// Heading shown when no marker matched.
    pub empty_heading: String,
    /// Detail line shown when no marker matched.
    pub empty_detail: String,
    /// Heading shown when the map itself failed to load.
    pub failure_heading: String,
    /// Detail line shown when the map itself failed to load.
    pub failure_detail: String,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            tile_url: "https://tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            tile_attribution: "© OpenStreetMap contributors".to_string(),
            max_zoom: 18,
            leaflet_css: "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css".to_string(),
            leaflet_js: "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js".to_string(),
            title: "Tire Haritası".to_string(),
            empty_heading: "Bu kategoride haritada gösterilecek yer bulunamadı".to_string(),
            empty_detail:
                "Farklı bir kategori seçmeyi deneyin veya koordinat bilgilerini kontrol edin."
                    .to_string(),
            failure_heading: "Harita Yüklenemedi".to_string(),
            failure_detail: "Lütfen internet bağlantınızı kontrol edin.".to_string(),
        }
    }
}

/// A generated, self-contained map page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapDocument(String);

impl MapDocument {
    /// Returns the page markup.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the embedded marker array as JSON text.
    #[must_use]
    pub fn marker_data(&self) -> Option<&str> {
        self.0.lines().find_map(|line| {
            line.trim()
                .strip_prefix(MARKER_DATA_PREFIX)
                .and_then(|rest| rest.strip_suffix(';'))
        })
    }
}

impl std::fmt::Display for MapDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One marker as the page script sees it.
#[derive(Debug, Serialize)]
struct MarkerEntry<'a> {
    lat: f64,
    lng: f64,
    /// Tooltip underline, one of the fixed category colors.
    color: &'a str,
    hue: u16,
    highlighted: bool,
    /// Tooltip markup, already HTML-escaped.
    label: String,
    /// Click message body, forwarded to the host unchanged.
    place: PlacePayload,
}

impl<'a> From<&'a Marker> for MarkerEntry<'a> {
    fn from(marker: &'a Marker) -> Self {
        Self {
            lat: marker.point.latitude,
            lng: marker.point.longitude,
            color: marker.color(),
            hue: marker.hue_rotation(),
            highlighted: marker.highlighted,
            label: html_escape(&marker.point.title),
            place: PlacePayload::from(&marker.point),
        }
    }
}

/// Generates map documents with fixed presentation settings.
#[derive(Debug, Clone, Default)]
pub struct MapDocumentGenerator {
    options: DocumentOptions,
}

impl MapDocumentGenerator {
    /// Creates a generator with the given presentation settings.
    #[must_use]
    pub const fn new(options: DocumentOptions) -> Self {
        Self { options }
    }

    /// Renders `markers` framed by `viewport`.
    #[must_use]
    pub fn generate(&self, markers: &[Marker], viewport: &Viewport) -> MapDocument {
        self.generate_with_caption(markers, viewport, None)
    }

    /// Renders `markers` framed by `viewport`, appending `caption` (usually
    /// the active filter or route name) to the page title.
    #[must_use]
    pub fn generate_with_caption(
        &self,
        markers: &[Marker],
        viewport: &Viewport,
        caption: Option<&str>,
    ) -> MapDocument {
        let options = &self.options;
        let mut out = String::with_capacity(4096 + markers.len() * 256);

        let title = caption.map_or_else(
            || options.title.clone(),
            |caption| format!("{} - {caption}", options.title),
        );

        write_head(&mut out, options, &title);

        let _ = writeln!(out, "<body>");
        let _ = writeln!(out, r#"<div id="map"></div>"#);
        let _ = writeln!(out, "<script>");
        let _ = writeln!(out, "{MARKER_DATA_PREFIX}{};", markers_json(markers));
        write_script(&mut out, options, viewport);
        let _ = writeln!(out, "</script>");
        let _ = writeln!(out, "</body>");
        let _ = writeln!(out, "</html>");

        log::debug!(
            "Generated map document '{title}' with {} markers ({} bytes)",
            markers.len(),
            out.len()
        );

        MapDocument(out)
    }
}

/// Renders a document with the default presentation settings.
#[must_use]
pub fn generate(markers: &[Marker], viewport: &Viewport) -> MapDocument {
    MapDocumentGenerator::default().generate(markers, viewport)
}

fn write_head(out: &mut String, options: &DocumentOptions, title: &str) {
    let _ = writeln!(out, "<!DOCTYPE html>");
    let _ = writeln!(out, "<html>");
    let _ = writeln!(out, "<head>");
    let _ = writeln!(out, r#"<meta charset="utf-8" />"#);
    let _ = writeln!(
        out,
        r#"<meta name="viewport" content="width=device-width, initial-scale=1.0">"#
    );
    let _ = writeln!(out, "<title>{}</title>", html_escape(title));
    let _ = writeln!(
        out,
        r#"<link rel="stylesheet" href="{}" />"#,
        html_escape(&options.leaflet_css)
    );
    let _ = writeln!(
        out,
        r#"<script src="{}"></script>"#,
        html_escape(&options.leaflet_js)
    );
    out.push_str(STYLE);
    let _ = writeln!(out, "</head>");
}

const STYLE: &str = "<style>
body { margin: 0; padding: 0; font-family: Arial, sans-serif; }
#map { width: 100%; height: 100vh; background-color: #f0f0f0; }
.map-message {
  position: absolute; top: 50%; left: 50%; transform: translate(-50%, -50%);
  text-align: center; background: white; padding: 20px; border-radius: 8px;
  box-shadow: 0 2px 10px rgba(0,0,0,0.1); z-index: 1000;
}
</style>
";

fn write_script(out: &mut String, options: &DocumentOptions, viewport: &Viewport) {
    let _ = writeln!(out, "(function () {{");
    let _ = writeln!(out, "  function showMessage(heading, detail) {{");
    let _ = writeln!(out, "    var box = document.createElement('div');");
    let _ = writeln!(out, "    box.className = 'map-message';");
    let _ = writeln!(out, "    var h = document.createElement('h3');");
    let _ = writeln!(out, "    h.textContent = heading;");
    let _ = writeln!(out, "    var p = document.createElement('p');");
    let _ = writeln!(out, "    p.textContent = detail;");
    let _ = writeln!(out, "    box.appendChild(h);");
    let _ = writeln!(out, "    box.appendChild(p);");
    let _ = writeln!(out, "    document.body.appendChild(box);");
    let _ = writeln!(out, "  }}");
    let _ = writeln!(out, "  function send(message) {{");
    let _ = writeln!(out, "    var text = JSON.stringify(message);");
    let _ = writeln!(
        out,
        "    if (window.ReactNativeWebView && window.ReactNativeWebView.postMessage) {{"
    );
    let _ = writeln!(out, "      window.ReactNativeWebView.postMessage(text);");
    let _ = writeln!(
        out,
        "    }} else if (window.parent && window.parent !== window) {{"
    );
    let _ = writeln!(out, "      window.parent.postMessage(text, '*');");
    let _ = writeln!(out, "    }}");
    let _ = writeln!(out, "  }}");
    let _ = writeln!(out, "  try {{");
    let _ = writeln!(
        out,
        "    var map = L.map('map').setView([{}, {}], {});",
        viewport.center_lat, viewport.center_lon, viewport.zoom
    );
    let _ = writeln!(
        out,
        "    L.tileLayer({}, {{ attribution: {}, maxZoom: {} }}).addTo(map);",
        script_string(&options.tile_url),
        script_string(&options.tile_attribution),
        options.max_zoom
    );
    let _ = writeln!(out, "    markers.forEach(function (m) {{");
    let _ = writeln!(
        out,
        "      var marker = L.marker([m.lat, m.lng], {{ zIndexOffset: m.highlighted ? 1000 : 0 }}).addTo(map);"
    );
    let _ = writeln!(out, "      var icon = marker.getElement();");
    let _ = writeln!(out, "      if (icon && m.hue) {{");
    let _ = writeln!(
        out,
        "        icon.style.filter = 'hue-rotate(' + m.hue + 'deg) saturate(1.5)';"
    );
    let _ = writeln!(out, "      }}");
    let _ = writeln!(
        out,
        "      var tooltip = '<span style=\"border-bottom: 3px solid ' + m.color + '\">' + m.label + '</span>';"
    );
    let _ = writeln!(
        out,
        "      marker.bindTooltip(tooltip, {{ permanent: m.highlighted, direction: 'top' }});"
    );
    let _ = writeln!(out, "      marker.on('click', function () {{");
    let _ = writeln!(
        out,
        "        send({{ type: {}, place: m.place }});",
        script_string(MARKER_CLICK_EVENT)
    );
    let _ = writeln!(out, "      }});");
    let _ = writeln!(out, "    }});");
    let _ = writeln!(out, "    if (markers.length === 0) {{");
    let _ = writeln!(
        out,
        "      showMessage({}, {});",
        script_string(&options.empty_heading),
        script_string(&options.empty_detail)
    );
    let _ = writeln!(out, "    }}");
    let _ = writeln!(out, "  }} catch (error) {{");
    let _ = writeln!(out, "    console.error('Map error:', error);");
    let _ = writeln!(
        out,
        "    document.getElementById('map').style.display = 'none';"
    );
    let _ = writeln!(
        out,
        "    showMessage({}, {});",
        script_string(&options.failure_heading),
        script_string(&options.failure_detail)
    );
    let _ = writeln!(out, "  }}");
    let _ = writeln!(out, "}})();");
}

fn markers_json(markers: &[Marker]) -> String {
    let entries: Vec<MarkerEntry<'_>> = markers.iter().map(MarkerEntry::from).collect();
    match serde_json::to_string(&entries) {
        Ok(json) => script_escape(&json),
        Err(e) => {
            log::error!("Failed to serialize {} markers: {e}", entries.len());
            "[]".to_string()
        }
    }
}

/// Quotes `text` as a JavaScript string literal safe to embed in a script
/// element.
fn script_string(text: &str) -> String {
    script_escape(&serde_json::Value::String(text.to_string()).to_string())
}

/// Escapes characters in JSON text that would end a script element or
/// break a JavaScript string. Decoding the result yields the same value.
fn script_escape(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for ch in json.chars() {
        match ch {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            other => out.push(other),
        }
    }
    out
}

/// Escapes text for use in HTML content and attribute values.
#[must_use]
pub fn html_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
