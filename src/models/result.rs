//! Public lookup surface: output modes, derived properties, result shapes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::geojson::FeatureCollection;

/// Output shape requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupMode {
    /// Derived administrative codes only.
    #[default]
    Properties,
    /// The matched feature as stored, wrapped in a single-feature collection.
    Raw,
    /// Derived codes plus a copy of the matched geometry.
    GeoJson,
}

impl std::str::FromStr for LookupMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "properties" => Ok(LookupMode::Properties),
            "raw" => Ok(LookupMode::Raw),
            "geojson" => Ok(LookupMode::GeoJson),
            other => Err(format!(
                "unknown mode '{other}' (expected properties, raw or geojson)"
            )),
        }
    }
}

/// Administrative codes derived from a matched boundary feature.
///
/// `state_code` is omitted from serialization entirely when the source
/// subdivision code is empty or carries the not-applicable sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceProperties {
    pub continent_code: String,
    pub country_a2: String,
    pub country_a3: String,
    pub region_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_code: Option<String>,
}

/// A successful lookup outcome. Stored in the result cache and handed to
/// callers as an owned value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LookupResult {
    Properties(PlaceProperties),
    Collection(FeatureCollection),
}

/// Lookup failure, returned as a value and never raised as a panic.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum LookupError {
    /// A coordinate was not a finite number. Carries both rejected inputs.
    #[error("invalid coordinate input: lat={lat}, lng={lng}")]
    InvalidInput { lat: f64, lng: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_str() {
        assert_eq!("properties".parse::<LookupMode>(), Ok(LookupMode::Properties));
        assert_eq!("raw".parse::<LookupMode>(), Ok(LookupMode::Raw));
        assert_eq!("geojson".parse::<LookupMode>(), Ok(LookupMode::GeoJson));
        assert!("bogus".parse::<LookupMode>().is_err());
    }

    #[test]
    fn test_state_code_omitted_from_json() {
        let props = PlaceProperties {
            continent_code: "NA".to_string(),
            country_a2: "US".to_string(),
            country_a3: "USA".to_string(),
            region_code: "021".to_string(),
            state_code: None,
        };
        let json = serde_json::to_value(&props).unwrap();
        assert!(json.get("state_code").is_none());
    }

    #[test]
    fn test_invalid_input_carries_both_values() {
        let err = LookupError::InvalidInput {
            lat: f64::NAN,
            lng: 10.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("NaN"));
        assert!(msg.contains("10"));
    }
}
