//! Dataset loading: boundary features and companion code tables.
//!
//! The dataset directory holds one GeoJSON feature file per variant plus
//! `countries.json`, `continents.json` and `regions.json`. Everything loaded
//! here is read-only for the rest of the process; the feature order in the
//! file becomes the index scan order.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use hashbrown::HashMap;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::DatasetVariant;
use crate::index::FeatureIndex;
use crate::models::{BoundaryFeature, BoundaryProperties, FeatureCollection, GeoGeometry};

#[derive(Debug, Deserialize)]
struct RawFeature {
    properties: BoundaryProperties,
    geometry: GeoGeometry,
}

#[derive(Debug, Deserialize)]
struct RawCollection {
    features: Vec<RawFeature>,
}

/// One row of `countries.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct CountryRecord {
    pub code_a2: String,
    pub code_a3: String,
    pub name: String,
}

/// Companion lookup tables, read by code and never mutated.
pub struct CodeTables {
    dir: PathBuf,
    countries: HashMap<String, CountryRecord>,
    continents: HashMap<String, String>,
    regions: HashMap<String, String>,
}

impl CodeTables {
    pub fn load(dir: &Path) -> Result<Self> {
        let countries_raw = read_json::<Vec<CountryRecord>>(&dir.join("countries.json"))?;
        let countries = countries_raw
            .into_iter()
            .map(|record| (record.code_a2.clone(), record))
            .collect();
        let continents = read_code_map(&dir.join("continents.json"))?;
        let regions = read_code_map(&dir.join("regions.json"))?;
        Ok(Self {
            dir: dir.to_path_buf(),
            countries,
            continents,
            regions,
        })
    }

    pub fn country(&self, code_a2: &str) -> Option<&CountryRecord> {
        self.countries.get(code_a2)
    }

    pub fn continent_name(&self, code: &str) -> Option<&str> {
        self.continents.get(code).map(String::as_str)
    }

    pub fn region_name(&self, code: &str) -> Option<&str> {
        self.regions.get(code).map(String::as_str)
    }

    /// Auxiliary geometry fetch for one region, read from
    /// `regions/<CODE>.geojson` on demand. Any read or parse fault surfaces
    /// as `None`; lookups never fail because a companion file is missing.
    pub fn region_geometry(&self, code: &str) -> Option<FeatureCollection> {
        let path = self.dir.join("regions").join(format!("{code}.geojson"));
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) => {
                debug!("Region geometry for {} unavailable: {}", code, err);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(collection) => Some(collection),
            Err(err) => {
                debug!("Region geometry for {} unparseable: {}", code, err);
                None
            }
        }
    }
}

/// A loaded dataset: boundary features in file order plus code tables.
pub struct Dataset {
    pub features: Vec<BoundaryFeature>,
    pub tables: CodeTables,
}

impl Dataset {
    /// Load the variant's feature file and the companion tables. Parse
    /// faults here are hard errors; they happen at startup, never on the
    /// lookup path.
    pub fn load(dir: impl AsRef<Path>, variant: DatasetVariant) -> Result<Self> {
        let dir = dir.as_ref();
        let features_path = dir.join(variant.features_file());
        info!("Loading boundary dataset from {}", features_path.display());

        let collection = read_json::<RawCollection>(&features_path)?;
        let features: Vec<BoundaryFeature> = collection
            .features
            .into_iter()
            .map(|raw| BoundaryFeature::new(raw.properties, raw.geometry.to_geometry()))
            .collect();
        info!("Loaded {} boundary features", features.len());

        let tables = CodeTables::load(dir)?;

        let unknown = features
            .iter()
            .filter(|f| tables.country(&f.properties.iso_a2).is_none())
            .count();
        if unknown > 0 {
            warn!("{} features reference a country code missing from countries.json", unknown);
        }

        Ok(Self { features, tables })
    }

    pub fn into_parts(self) -> (FeatureIndex, CodeTables) {
        (FeatureIndex::new(self.features), self.tables)
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}

fn read_code_map(path: &Path) -> Result<HashMap<String, String>> {
    let std_map = read_json::<std::collections::HashMap<String, String>>(path)?;
    Ok(std_map.into_iter().collect())
}
