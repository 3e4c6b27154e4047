#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Viewport framing for map point sets.
//!
//! Point counts on the Tire map are small (single digits to low tens), so
//! framing uses a handful of fixed zoom levels rather than a fitted zoom:
//! a highlighted point gets a street-scale close-up, any other non-empty
//! set is centered on the midpoint of its bounding box at town scale, and
//! an empty map falls back to the town center.

use geo::{BoundingRect, MultiPoint};
use serde::Deserialize;
use tire_map_place_models::{Coordinates, Point, Viewport};

/// Tire town center.
pub const TOWN_CENTER: Coordinates = Coordinates {
    latitude: 38.0931,
    longitude: 27.7519,
};

/// Street-scale zoom used when focusing a single highlighted point.
pub const CLOSE_ZOOM: u8 = 16;

/// Zoom that typically contains the whole town.
pub const REGIONAL_ZOOM: u8 = 13;

/// Wide zoom used when there is nothing to frame.
pub const DEFAULT_ZOOM: u8 = 10;

/// A geographic bounding box in WGS84 coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Western longitude boundary.
    pub west: f64,
    /// Southern latitude boundary.
    pub south: f64,
    /// Eastern longitude boundary.
    pub east: f64,
    /// Northern latitude boundary.
    pub north: f64,
}

impl BoundingBox {
    /// Creates a new bounding box from the given coordinates.
    #[must_use]
    pub const fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    /// Computes the box spanning the extremes of `points`.
    ///
    /// Returns `None` for an empty slice.
    #[must_use]
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let multi: MultiPoint<f64> = points
            .iter()
            .map(|p| geo::Point::new(p.longitude, p.latitude))
            .collect();

        multi
            .bounding_rect()
            .map(|rect| Self::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y))
    }

    /// Midpoint of the box extremes.
    #[must_use]
    pub fn center(&self) -> Coordinates {
        Coordinates {
            latitude: f64::midpoint(self.south, self.north),
            longitude: f64::midpoint(self.west, self.east),
        }
    }
}

/// Fixed framing constants for [`ViewportPolicy::compute`].
///
/// Deserializable so the `[viewport]` config section can move the
/// fallback center or adjust the zoom levels.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewportPolicy {
    /// Center used when there are no points.
    pub default_center: Coordinates,
    /// Zoom used when there are no points.
    pub default_zoom: u8,
    /// Zoom used for a non-empty point set without a highlight.
    pub regional_zoom: u8,
    /// Zoom used when a highlighted point is focused.
    pub close_zoom: u8,
}

impl Default for ViewportPolicy {
    fn default() -> Self {
        Self {
            default_center: TOWN_CENTER,
            default_zoom: DEFAULT_ZOOM,
            regional_zoom: REGIONAL_ZOOM,
            close_zoom: CLOSE_ZOOM,
        }
    }
}

impl ViewportPolicy {
    /// Frames `points`, focusing `highlighted` when present.
    ///
    /// The center of a non-empty set is the midpoint of its bounding box,
    /// not the centroid, so the framing does not drift towards clusters.
    #[must_use]
    pub fn compute(&self, points: &[Point], highlighted: Option<&Point>) -> Viewport {
        if let Some(target) = highlighted {
            log::debug!(
                "Focusing highlighted point {} at {},{}",
                target.id,
                target.latitude,
                target.longitude
            );
            return Viewport {
                center_lat: target.latitude,
                center_lon: target.longitude,
                zoom: self.close_zoom,
            };
        }

        match BoundingBox::from_points(points) {
            Some(bbox) => {
                let center = bbox.center();
                Viewport {
                    center_lat: center.latitude,
                    center_lon: center.longitude,
                    zoom: self.regional_zoom,
                }
            }
            None => Viewport {
                center_lat: self.default_center.latitude,
                center_lon: self.default_center.longitude,
                zoom: self.default_zoom,
            },
        }
    }
}

/// Frames `points` with the default [`ViewportPolicy`].
#[must_use]
pub fn compute_viewport(points: &[Point], highlighted: Option<&Point>) -> Viewport {
    ViewportPolicy::default().compute(points, highlighted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(id: &str, latitude: f64, longitude: f64) -> Point {
        Point {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            category: String::new(),
            latitude,
            longitude,
        }
    }

    #[test]
    fn empty_set_falls_back_to_town_center() {
        let viewport = compute_viewport(&[], None);
        assert!((viewport.center_lat - 38.0931).abs() < f64::EPSILON);
        assert!((viewport.center_lon - 27.7519).abs() < f64::EPSILON);
        assert_eq!(viewport.zoom, DEFAULT_ZOOM);
    }

    #[test]
    fn centers_on_bounding_box_midpoint() {
        let points = [point("a", 38.0, 27.0), point("b", 38.2, 27.4)];
        let viewport = compute_viewport(&points, None);
        assert!((viewport.center_lat - 38.1).abs() < 1e-9);
        assert!((viewport.center_lon - 27.2).abs() < 1e-9);
        assert_eq!(viewport.zoom, REGIONAL_ZOOM);
    }

    #[test]
    fn midpoint_ignores_point_density() {
        let points = [
            point("a", 38.0, 27.0),
            point("b", 38.0, 27.0),
            point("c", 38.0, 27.0),
            point("d", 38.2, 27.4),
        ];
        let viewport = compute_viewport(&points, None);
        assert!((viewport.center_lat - 38.1).abs() < 1e-9);
        assert!((viewport.center_lon - 27.2).abs() < 1e-9);
    }

    #[test]
    fn single_point_is_its_own_center() {
        let viewport = compute_viewport(&[point("a", 38.09, 27.75)], None);
        assert!((viewport.center_lat - 38.09).abs() < 1e-9);
        assert!((viewport.center_lon - 27.75).abs() < 1e-9);
    }

    #[test]
    fn highlighted_point_wins_with_close_zoom() {
        let points = [point("a", 38.0, 27.0), point("b", 38.2, 27.4)];
        let target = point("t", 38.087, 27.733);
        let viewport = compute_viewport(&points, Some(&target));
        assert!((viewport.center_lat - 38.087).abs() < f64::EPSILON);
        assert!((viewport.center_lon - 27.733).abs() < f64::EPSILON);
        assert_eq!(viewport.zoom, CLOSE_ZOOM);
    }

    #[test]
    fn bounding_box_spans_extremes() {
        let points = [
            point("a", 38.05, 27.80),
            point("b", 38.12, 27.70),
            point("c", 38.08, 27.75),
        ];
        let bbox = BoundingBox::from_points(&points).unwrap();
        assert!((bbox.south - 38.05).abs() < f64::EPSILON);
        assert!((bbox.north - 38.12).abs() < f64::EPSILON);
        assert!((bbox.west - 27.70).abs() < f64::EPSILON);
        assert!((bbox.east - 27.80).abs() < f64::EPSILON);
        assert!(BoundingBox::from_points(&[]).is_none());
    }

    #[test]
    fn policy_deserializes_partial_overrides() {
        let policy: ViewportPolicy = toml::from_str("regional_zoom = 12").unwrap();
        assert_eq!(policy.regional_zoom, 12);
        assert_eq!(policy.close_zoom, CLOSE_ZOOM);
        assert_eq!(policy.default_center, TOWN_CENTER);
    }
}
