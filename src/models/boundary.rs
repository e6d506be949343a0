//! Administrative boundary types for the lookup index.

use geo::BoundingRect;
use geo_types::{Coord, MultiPolygon, Polygon, Rect};
use serde::{Deserialize, Serialize};

/// Suffix on a raw subdivision code meaning "not applicable".
pub const NOT_APPLICABLE_SUFFIX: char = '~';

/// Boundary geometry: a single polygon or an ordered list of polygons.
///
/// Ring conventions follow GeoJSON: the exterior ring is the outer boundary,
/// interior rings are holes. Rings are implicitly closed.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Polygon(Polygon<f64>),
    MultiPolygon(MultiPolygon<f64>),
}

impl Geometry {
    pub fn bounding_rect(&self) -> Option<Rect<f64>> {
        match self {
            Geometry::Polygon(polygon) => polygon.bounding_rect(),
            Geometry::MultiPolygon(multi) => multi.bounding_rect(),
        }
    }
}

/// Administrative codes carried on each boundary feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryProperties {
    /// Continent code (e.g. "NA")
    pub continent: String,

    /// ISO 3166-1 alpha-2 country code (e.g. "US")
    pub iso_a2: String,

    /// ISO 3166-1 alpha-3 country code (e.g. "USA")
    pub iso_a3: String,

    /// UN M49 region code (e.g. "021")
    pub region: String,

    /// Raw ISO 3166-2 subdivision code. May be empty, or end with `~`
    /// meaning the feature has no applicable subdivision.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub iso_3166_2: String,
}

impl BoundaryProperties {
    /// The subdivision code, if one applies. Empty and `~`-suffixed source
    /// codes yield `None`.
    pub fn state_code(&self) -> Option<&str> {
        if self.iso_3166_2.is_empty() || self.iso_3166_2.ends_with(NOT_APPLICABLE_SUFFIX) {
            None
        } else {
            Some(&self.iso_3166_2)
        }
    }
}

/// A single boundary feature: geometry plus administrative codes.
///
/// Immutable after construction. The bounding box is computed once here and
/// reused as a cheap pre-filter during index scans.
#[derive(Debug, Clone)]
pub struct BoundaryFeature {
    pub properties: BoundaryProperties,
    pub geometry: Geometry,
    bbox: Option<Rect<f64>>,
}

impl BoundaryFeature {
    pub fn new(properties: BoundaryProperties, geometry: Geometry) -> Self {
        let bbox = geometry.bounding_rect();
        Self {
            properties,
            geometry,
            bbox,
        }
    }

    pub fn bbox(&self) -> Option<&Rect<f64>> {
        self.bbox.as_ref()
    }

    /// Cheap reject before the exact containment test. Inclusive on the box
    /// edges, so it can only discard points the geometry cannot contain.
    pub fn bbox_contains(&self, point: Coord<f64>) -> bool {
        match &self.bbox {
            Some(rect) => {
                point.x >= rect.min().x
                    && point.x <= rect.max().x
                    && point.y >= rect.min().y
                    && point.y <= rect.max().y
            }
            None => false,
        }
    }
}
