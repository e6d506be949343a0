//! Landfall - reverse geocoding of coordinates to administrative boundaries.
//!
//! Resolves a (latitude, longitude) pair to the boundary feature containing
//! it, using ray-cast point-in-polygon tests over an ordered feature index,
//! with a byte-size-bounded LRU cache over computed results.

pub mod cache;
pub mod config;
pub mod geometry;
pub mod index;
pub mod loader;
pub mod models;
pub mod service;

pub use cache::{CacheStats, ResultCache};
pub use index::FeatureIndex;
pub use models::{LookupError, LookupMode, LookupResult, PlaceProperties};
pub use service::LookupService;
