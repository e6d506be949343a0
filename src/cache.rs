//! Byte-size-bounded LRU cache for lookup results.

use lru::LruCache;
use serde::Serialize;
use tracing::debug;

use crate::models::{LookupMode, LookupResult};

/// Cache key: the exact (lat, lng, mode) triple.
///
/// Coordinates are keyed by their f64 bit patterns — no rounding or
/// quantization, so distinct float values are distinct entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    lat_bits: u64,
    lng_bits: u64,
    mode: LookupMode,
}

impl CacheKey {
    pub fn new(lat: f64, lng: f64, mode: LookupMode) -> Self {
        Self {
            lat_bits: lat.to_bits(),
            lng_bits: lng.to_bits(),
            mode,
        }
    }
}

struct CacheEntry {
    value: LookupResult,
    size: usize,
}

/// Read-only snapshot of cache occupancy.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CacheStats {
    pub entry_count: usize,
    pub current_size: usize,
    pub capacity: usize,
    pub utilization_percent: f64,
}

/// Recency-ordered result cache bounded by approximate total byte size.
///
/// Entry sizes are serialization-length estimates; only their stable
/// relative ordering matters. `current_size` is the exact sum of stored
/// entries' estimates and exceeds `capacity` only in the single case of one
/// entry that is itself larger than the whole capacity.
pub struct ResultCache {
    entries: LruCache<CacheKey, CacheEntry>,
    capacity: usize,
    current_size: usize,
}

impl ResultCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: LruCache::unbounded(),
            capacity,
            current_size: 0,
        }
    }

    /// Promotes the entry to most-recently-used and returns an owned clone,
    /// so eviction order reflects actual usage and callers never hold
    /// references into cache state.
    pub fn get(&mut self, key: &CacheKey) -> Option<LookupResult> {
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    pub fn set(&mut self, key: CacheKey, value: LookupResult) {
        // Replacing an existing key must not double-count its size.
        if let Some(old) = self.entries.pop(&key) {
            self.current_size -= old.size;
        }

        let size = match estimated_size(&value) {
            Some(size) => size,
            None => {
                // Un-estimable values are simply not cached.
                debug!("Skipping cache store for value that could not be size-estimated");
                return;
            }
        };

        while self.current_size + size > self.capacity {
            match self.entries.pop_lru() {
                Some((_, evicted)) => {
                    self.current_size -= evicted.size;
                    debug!("Evicted LRU cache entry of {} bytes", evicted.size);
                }
                None => break,
            }
        }

        // An entry larger than the whole capacity is still admitted after
        // the loop above has emptied the cache; total size then transiently
        // exceeds capacity.
        self.entries.put(key, CacheEntry { value, size });
        self.current_size += size;
    }

    pub fn remove(&mut self, key: &CacheKey) {
        if let Some(entry) = self.entries.pop(key) {
            self.current_size -= entry.size;
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.current_size = 0;
    }

    pub fn stats(&self) -> CacheStats {
        let utilization_percent = if self.capacity == 0 {
            0.0
        } else {
            self.current_size as f64 / self.capacity as f64 * 100.0
        };
        CacheStats {
            entry_count: self.entries.len(),
            current_size: self.current_size,
            capacity: self.capacity,
            utilization_percent,
        }
    }
}

/// Serialization-length byte estimate for a result value.
fn estimated_size(value: &LookupResult) -> Option<usize> {
    serde_json::to_string(value).ok().map(|s| s.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlaceProperties;

    fn result(region: &str) -> LookupResult {
        LookupResult::Properties(PlaceProperties {
            continent_code: "NA".to_string(),
            country_a2: "US".to_string(),
            country_a3: "USA".to_string(),
            region_code: region.to_string(),
            state_code: None,
        })
    }

    fn key(n: u32) -> CacheKey {
        CacheKey::new(n as f64, -(n as f64), LookupMode::Properties)
    }

    fn entry_size() -> usize {
        serde_json::to_string(&result("021")).unwrap().len()
    }

    #[test]
    fn test_get_miss() {
        let mut cache = ResultCache::new(1024);
        assert!(cache.get(&key(1)).is_none());
    }

    #[test]
    fn test_set_and_get() {
        let mut cache = ResultCache::new(1024);
        cache.set(key(1), result("021"));
        assert_eq!(cache.get(&key(1)), Some(result("021")));
        assert_eq!(cache.stats().entry_count, 1);
        assert_eq!(cache.stats().current_size, entry_size());
    }

    #[test]
    fn test_distinct_modes_are_distinct_keys() {
        assert_ne!(
            CacheKey::new(1.0, 2.0, LookupMode::Properties),
            CacheKey::new(1.0, 2.0, LookupMode::Raw)
        );
        assert_ne!(
            CacheKey::new(1.0, 2.0, LookupMode::Properties),
            CacheKey::new(1.0000000001, 2.0, LookupMode::Properties)
        );
    }

    #[test]
    fn test_replacement_does_not_double_count() {
        let mut cache = ResultCache::new(1024);
        cache.set(key(1), result("021"));
        cache.set(key(1), result("022"));
        assert_eq!(cache.stats().entry_count, 1);
        assert_eq!(cache.stats().current_size, entry_size());
        assert_eq!(cache.get(&key(1)), Some(result("022")));
    }

    #[test]
    fn test_capacity_bound_evicts_oldest() {
        let size = entry_size();
        // Room for exactly two entries.
        let mut cache = ResultCache::new(size * 2);
        cache.set(key(1), result("021"));
        cache.set(key(2), result("021"));
        assert_eq!(cache.stats().entry_count, 2);

        cache.set(key(3), result("021"));
        assert_eq!(cache.stats().entry_count, 2);
        assert!(cache.stats().current_size <= cache.stats().capacity);
        assert!(cache.get(&key(1)).is_none());
        assert!(cache.get(&key(2)).is_some());
        assert!(cache.get(&key(3)).is_some());
    }

    #[test]
    fn test_get_promotes_to_most_recently_used() {
        let size = entry_size();
        let mut cache = ResultCache::new(size * 2);
        cache.set(key(1), result("021"));
        cache.set(key(2), result("021"));

        // Touch key 1; key 2 becomes the eviction candidate.
        assert!(cache.get(&key(1)).is_some());
        cache.set(key(3), result("021"));

        assert!(cache.get(&key(1)).is_some());
        assert!(cache.get(&key(2)).is_none());
        assert!(cache.get(&key(3)).is_some());
    }

    #[test]
    fn test_oversized_entry_admitted_alone() {
        let size = entry_size();
        let mut cache = ResultCache::new(size / 2);
        cache.set(key(1), result("021"));
        // Admitted despite exceeding capacity; it is the only entry.
        assert_eq!(cache.stats().entry_count, 1);
        assert!(cache.stats().current_size > cache.stats().capacity);

        // The next insert evicts it.
        cache.set(key(2), result("022"));
        assert_eq!(cache.stats().entry_count, 1);
        assert!(cache.get(&key(1)).is_none());
        assert!(cache.get(&key(2)).is_some());
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cache = ResultCache::new(1024);
        cache.set(key(1), result("021"));
        cache.set(key(2), result("021"));

        cache.remove(&key(1));
        assert_eq!(cache.stats().entry_count, 1);
        assert_eq!(cache.stats().current_size, entry_size());
        // Removing an absent key is a no-op.
        cache.remove(&key(1));
        assert_eq!(cache.stats().entry_count, 1);

        cache.clear();
        assert_eq!(cache.stats().entry_count, 0);
        assert_eq!(cache.stats().current_size, 0);
    }

    #[test]
    fn test_stats_utilization() {
        let size = entry_size();
        let mut cache = ResultCache::new(size * 4);
        cache.set(key(1), result("021"));
        let stats = cache.stats();
        assert_eq!(stats.capacity, size * 4);
        assert!((stats.utilization_percent - 25.0).abs() < 1.0);
    }
}
