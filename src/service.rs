//! Lookup orchestration: validate, consult the cache, scan, build, store.

use std::sync::{Mutex, MutexGuard};

use geo_types::Coord;
use tracing::debug;

use crate::cache::{CacheKey, CacheStats, ResultCache};
use crate::index::FeatureIndex;
use crate::models::{
    BoundaryFeature, FeatureCollection, GeoFeature, GeoGeometry, LookupError, LookupMode,
    LookupResult, PlaceProperties,
};

/// Resolves coordinates to the boundary feature containing them.
///
/// Holds the read-only feature index and an optional result cache. The cache
/// handle is constructed once by the caller and injected here; there is no
/// hidden global instance. The mutex makes each compound cache sequence
/// (get-and-promote, set-evict-insert) a single critical section, so the
/// size and recency invariants hold even when the service is shared across
/// threads.
pub struct LookupService {
    index: FeatureIndex,
    cache: Option<Mutex<ResultCache>>,
}

impl LookupService {
    /// `None` disables result caching entirely; every lookup then scans.
    pub fn new(index: FeatureIndex, cache: Option<ResultCache>) -> Self {
        Self {
            index,
            cache: cache.map(Mutex::new),
        }
    }

    /// Resolve `(lat, lng)` to the first containing boundary feature.
    ///
    /// Returns `Ok(None)` when no feature contains the point — a legitimate
    /// outcome for ocean or unmapped coordinates, not an error. Non-finite
    /// coordinates yield [`LookupError::InvalidInput`] as a value; this
    /// function never panics. Misses are never cached, so a repeated miss
    /// pays the full scan cost again.
    pub fn lookup(
        &self,
        lat: f64,
        lng: f64,
        mode: LookupMode,
    ) -> Result<Option<LookupResult>, LookupError> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(LookupError::InvalidInput { lat, lng });
        }

        let key = CacheKey::new(lat, lng, mode);

        if let Some(mut cache) = self.lock_cache() {
            if let Some(hit) = cache.get(&key) {
                debug!("Cache hit for ({}, {})", lat, lng);
                return Ok(Some(hit));
            }
        }

        let point = Coord { x: lng, y: lat };
        let Some(feature) = self.index.locate(point) else {
            debug!("No boundary contains ({}, {})", lat, lng);
            return Ok(None);
        };

        debug!(
            "Lookup at ({}, {}) matched {}",
            lat, lng, feature.properties.iso_a2
        );
        let result = build_result(feature, mode);

        if let Some(mut cache) = self.lock_cache() {
            cache.set(key, result.clone());
        }

        Ok(Some(result))
    }

    /// Derived administrative codes only.
    pub fn lookup_properties(&self, lat: f64, lng: f64) -> Result<Option<LookupResult>, LookupError> {
        self.lookup(lat, lng, LookupMode::Properties)
    }

    /// The matched feature as stored, in a single-feature collection.
    pub fn lookup_raw(&self, lat: f64, lng: f64) -> Result<Option<LookupResult>, LookupError> {
        self.lookup(lat, lng, LookupMode::Raw)
    }

    /// Derived codes plus a copy of the matched geometry.
    pub fn lookup_geojson(&self, lat: f64, lng: f64) -> Result<Option<LookupResult>, LookupError> {
        self.lookup(lat, lng, LookupMode::GeoJson)
    }

    /// `None` when no cache is configured.
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.lock_cache().map(|cache| cache.stats())
    }

    pub fn clear_cache(&self) {
        if let Some(mut cache) = self.lock_cache() {
            cache.clear();
        }
    }

    pub fn index(&self) -> &FeatureIndex {
        &self.index
    }

    fn lock_cache(&self) -> Option<MutexGuard<'_, ResultCache>> {
        self.cache
            .as_ref()
            .map(|mutex| mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner()))
    }
}

/// Build the caller-facing result for a matched feature. Every shape is an
/// independent copy; nothing aliases the index.
fn build_result(feature: &BoundaryFeature, mode: LookupMode) -> LookupResult {
    match mode {
        LookupMode::Properties => LookupResult::Properties(derive_properties(feature)),
        LookupMode::Raw => {
            let properties = serde_json::to_value(&feature.properties)
                .unwrap_or(serde_json::Value::Null);
            let geometry = GeoGeometry::from(&feature.geometry);
            LookupResult::Collection(FeatureCollection::single(GeoFeature::new(
                properties, geometry,
            )))
        }
        LookupMode::GeoJson => {
            let properties = serde_json::to_value(derive_properties(feature))
                .unwrap_or(serde_json::Value::Null);
            let geometry = GeoGeometry::from(&feature.geometry);
            LookupResult::Collection(FeatureCollection::single(GeoFeature::new(
                properties, geometry,
            )))
        }
    }
}

fn derive_properties(feature: &BoundaryFeature) -> PlaceProperties {
    let props = &feature.properties;
    PlaceProperties {
        continent_code: props.continent.clone(),
        country_a2: props.iso_a2.clone(),
        country_a3: props.iso_a3.clone(),
        region_code: props.region.clone(),
        state_code: props.state_code().map(str::to_string),
    }
}
