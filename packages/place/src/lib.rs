#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Normalization of datastore records into map-ready points.
//!
//! Records from the remote datastore are loosely typed: coordinates may be
//! numbers or strings, association fields come in several encodings, and
//! category text is free-form. This crate turns them into validated
//! [`Point`](tire_map_place_models::Point)s and filtered
//! [`MarkerSet`](tire_map_place_models::MarkerSet)s. Nothing here performs
//! I/O or keeps state between calls.

pub mod association;
pub mod category;
pub mod coords;
pub mod markers;
pub mod record;
pub mod route;

pub use markers::{MarkerSetBuilder, build_markers};
pub use record::RecordFields;
pub use route::RouteFields;
