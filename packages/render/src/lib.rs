#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Map document rendering for the Tire map.
//!
//! [`MapDocumentGenerator`] turns a marker set into a self-contained Leaflet
//! page; [`MapSession`] keeps only the newest generated page.

pub mod document;
pub mod session;

pub use document::{DocumentOptions, MapDocument, MapDocumentGenerator, generate};
pub use session::{GenerationTicket, MapSession};
