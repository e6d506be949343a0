//! Ordered boundary index with first-match linear scan.

use geo_types::Coord;
use tracing::info;

use crate::geometry::contains_point;
use crate::models::BoundaryFeature;

/// Fixed-order collection of boundary features.
///
/// Order is set once at construction and is the only tie-break between
/// overlapping boundaries: a point inside several features resolves to the
/// earliest one in the sequence. That is an ordering dependency of the
/// dataset, not a geometric guarantee.
pub struct FeatureIndex {
    features: Vec<BoundaryFeature>,
}

impl FeatureIndex {
    pub fn new(features: Vec<BoundaryFeature>) -> Self {
        info!("Indexed {} boundary features", features.len());
        Self { features }
    }

    /// Linear scan in index order, stopping at the first containing feature.
    ///
    /// The bounding-box check is a cheap reject only; it can never change
    /// which feature is selected. Cost is linear in the vertices scanned
    /// until the first match (all of them on a miss) — the result cache
    /// exists to amortize exactly this.
    pub fn locate(&self, point: Coord<f64>) -> Option<&BoundaryFeature> {
        self.features
            .iter()
            .find(|feature| feature.bbox_contains(point) && contains_point(&feature.geometry, point))
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn features(&self) -> &[BoundaryFeature] {
        &self.features
    }
}
