//! Core data models for boundary lookup.

pub mod boundary;
pub mod geojson;
pub mod result;

pub use boundary::{BoundaryFeature, BoundaryProperties, Geometry, NOT_APPLICABLE_SUFFIX};
pub use geojson::{FeatureCollection, GeoFeature, GeoGeometry};
pub use result::{LookupError, LookupMode, LookupResult, PlaceProperties};
