//! Ginkgo - a palace tour backend.
//!
//! This library provides the landmark resolver, community store, and
//! outbound API clients shared by the server binary.

pub mod config;
pub mod landmarks;
pub mod models;
pub mod narrative;
pub mod store;
pub mod tour;

pub use landmarks::{LandmarkCatalog, LandmarkResolver};
pub use models::{Footprint, GeoPoint, LandmarkInfo, ResolvedLandmark};
