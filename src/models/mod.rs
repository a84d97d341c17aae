//! Core data models for the tour backend.

pub mod community;
pub mod landmark;

pub use community::{BoardStats, Comment, Post, SortOrder};
pub use landmark::{Footprint, GeoPoint, LandmarkInfo, ResolvedLandmark};
