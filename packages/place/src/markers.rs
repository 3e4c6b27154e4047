//! Marker set construction.
//!
//! Turns a raw record collection into the final marker list for one
//! filter/highlight request: validate coordinates, apply the category
//! filter, force-include the highlighted point, deduplicate, and frame the
//! result.

use tire_map_place_models::{CategoryFilter, Marker, MarkerSet, Point, RawRecord};
use tire_map_spatial::ViewportPolicy;

use crate::category;
use crate::record::RecordFields;

/// Builds [`MarkerSet`]s from raw records.
///
/// Holds only configuration; every call is independent of the previous
/// one.
#[derive(Debug, Clone, Default)]
pub struct MarkerSetBuilder {
    fields: RecordFields,
    viewport: ViewportPolicy,
}

impl MarkerSetBuilder {
    /// Creates a builder with explicit field mapping and framing policy.
    #[must_use]
    pub const fn new(fields: RecordFields, viewport: ViewportPolicy) -> Self {
        Self { fields, viewport }
    }

    /// Builds the markers for `filter`, always including `highlighted`.
    ///
    /// The highlighted point bypasses the category filter and is flagged
    /// on its marker. If it coincides with a filtered record (same
    /// identifier, or same title at the same coordinates) the two collapse
    /// into the highlighted marker. An empty result is valid.
    #[must_use]
    pub fn build(
        &self,
        records: &[RawRecord],
        filter: &CategoryFilter,
        highlighted: Option<&RawRecord>,
    ) -> MarkerSet {
        let highlighted = highlighted.and_then(|record| {
            let point = self.fields.handoff_point(record);
            if point.is_none() {
                log::debug!("Ignoring highlighted point without valid coordinates");
            }
            point
        });

        let mut without_coordinates = 0_usize;
        let mut filtered_out = 0_usize;
        let mut candidates = Vec::with_capacity(records.len());

        for record in records {
            let Some(point) = self.fields.point(record, None) else {
                without_coordinates += 1;
                continue;
            };
            if !category::matches(&point.category, filter) {
                log::trace!(
                    "Category mismatch for {}: {:?} vs {filter}",
                    point.title,
                    point.category
                );
                filtered_out += 1;
                continue;
            }
            candidates.push(point);
        }

        let set = self.assemble(candidates, highlighted);

        log::info!(
            "Built {} markers for filter {filter} ({without_coordinates} without coordinates, {filtered_out} filtered out)",
            set.markers.len()
        );

        set
    }

    /// Builds the markers for a route's stops.
    ///
    /// Every stop with valid coordinates is shown; stops without a
    /// category are labeled with [`RecordFields::route_stop_category`].
    #[must_use]
    pub fn build_route(&self, stops: &[RawRecord]) -> MarkerSet {
        let points = stops
            .iter()
            .filter_map(|record| {
                self.fields
                    .point(record, Some(self.fields.route_stop_category.as_str()))
            })
            .collect();

        let set = self.assemble(points, None);
        log::info!(
            "Built {} route markers from {} stops",
            set.markers.len(),
            stops.len()
        );
        set
    }

    fn assemble(&self, candidates: Vec<Point>, highlighted: Option<Point>) -> MarkerSet {
        let mut markers: Vec<Marker> = Vec::with_capacity(candidates.len() + 1);

        if let Some(target) = &highlighted {
            markers.push(marker(target.clone(), true));
        }

        for point in candidates {
            if highlighted
                .as_ref()
                .is_some_and(|target| same_place(target, &point))
            {
                continue;
            }
            if markers.iter().any(|m| m.point.id == point.id) {
                log::debug!("Dropping duplicate point {}", point.id);
                continue;
            }
            markers.push(marker(point, false));
        }

        let points: Vec<Point> = markers.iter().map(|m| m.point.clone()).collect();
        let viewport = self.viewport.compute(&points, highlighted.as_ref());

        MarkerSet { markers, viewport }
    }
}

fn marker(point: Point, highlighted: bool) -> Marker {
    Marker {
        category: category::classify(&point.category),
        point,
        highlighted,
    }
}

#[allow(clippy::float_cmp)]
fn same_place(a: &Point, b: &Point) -> bool {
    a.id == b.id || (a.title == b.title && a.latitude == b.latitude && a.longitude == b.longitude)
}

/// Builds markers with the default field mapping and framing policy.
#[must_use]
pub fn build_markers(
    records: &[RawRecord],
    filter: &CategoryFilter,
    highlighted: Option<&RawRecord>,
) -> MarkerSet {
    MarkerSetBuilder::default().build(records, filter, highlighted)
}
