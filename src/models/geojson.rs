//! Wire-format GeoJSON shapes for lookup results and dataset files.
//!
//! Only the two geometry kinds the boundary dataset uses are modelled.
//! Conversions to and from the internal [`Geometry`] build fresh coordinate
//! vectors, so results handed to callers never alias indexed data.

use geo_types::{Coord, LineString, MultiPolygon, Polygon};
use serde::{Deserialize, Serialize};

use super::boundary::Geometry;

/// GeoJSON geometry object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoGeometry {
    Polygon { coordinates: Vec<Vec<[f64; 2]>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<[f64; 2]>>> },
}

impl GeoGeometry {
    pub fn to_geometry(&self) -> Geometry {
        match self {
            GeoGeometry::Polygon { coordinates } => {
                Geometry::Polygon(rings_to_polygon(coordinates))
            }
            GeoGeometry::MultiPolygon { coordinates } => Geometry::MultiPolygon(
                MultiPolygon::new(coordinates.iter().map(|rings| rings_to_polygon(rings)).collect()),
            ),
        }
    }
}

impl From<&Geometry> for GeoGeometry {
    fn from(geometry: &Geometry) -> Self {
        match geometry {
            Geometry::Polygon(polygon) => GeoGeometry::Polygon {
                coordinates: polygon_rings(polygon),
            },
            Geometry::MultiPolygon(multi) => GeoGeometry::MultiPolygon {
                coordinates: multi.0.iter().map(polygon_rings).collect(),
            },
        }
    }
}

fn ring_coords(ring: &LineString<f64>) -> Vec<[f64; 2]> {
    ring.0.iter().map(|c| [c.x, c.y]).collect()
}

fn polygon_rings(polygon: &Polygon<f64>) -> Vec<Vec<[f64; 2]>> {
    std::iter::once(ring_coords(polygon.exterior()))
        .chain(polygon.interiors().iter().map(ring_coords))
        .collect()
}

fn rings_to_polygon(rings: &[Vec<[f64; 2]>]) -> Polygon<f64> {
    let mut line_strings = rings.iter().map(|ring| {
        LineString::from(
            ring.iter()
                .map(|&[x, y]| Coord { x, y })
                .collect::<Vec<_>>(),
        )
    });
    let exterior = line_strings
        .next()
        .unwrap_or_else(|| LineString::new(vec![]));
    let interiors: Vec<_> = line_strings.collect();
    Polygon::new(exterior, interiors)
}

/// GeoJSON feature with free-form properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoFeature {
    #[serde(rename = "type")]
    pub feature_type: String,
    pub properties: serde_json::Value,
    pub geometry: GeoGeometry,
}

impl GeoFeature {
    pub fn new(properties: serde_json::Value, geometry: GeoGeometry) -> Self {
        Self {
            feature_type: "Feature".to_string(),
            properties,
            geometry,
        }
    }
}

/// GeoJSON feature collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub collection_type: String,
    pub features: Vec<GeoFeature>,
}

impl FeatureCollection {
    pub fn single(feature: GeoFeature) -> Self {
        Self {
            collection_type: "FeatureCollection".to_string(),
            features: vec![feature],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn square_with_hole() -> GeoGeometry {
        GeoGeometry::Polygon {
            coordinates: vec![
                vec![[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0], [0.0, 0.0]],
                vec![[1.0, 1.0], [3.0, 1.0], [3.0, 3.0], [1.0, 3.0], [1.0, 1.0]],
            ],
        }
    }

    #[test]
    fn test_polygon_conversion_round_trip() {
        let wire = square_with_hole();
        let internal = wire.to_geometry();
        match &internal {
            Geometry::Polygon(p) => {
                assert_eq!(p.exterior().0.len(), 5);
                assert_eq!(p.interiors().len(), 1);
            }
            _ => panic!("expected polygon"),
        }
        assert_eq!(GeoGeometry::from(&internal), wire);
    }

    #[test]
    fn test_multi_polygon_conversion_round_trip() {
        let wire = GeoGeometry::MultiPolygon {
            coordinates: vec![
                vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]],
                vec![vec![[5.0, 5.0], [6.0, 5.0], [6.0, 6.0], [5.0, 5.0]]],
            ],
        };
        let internal = wire.to_geometry();
        match &internal {
            Geometry::MultiPolygon(mp) => assert_eq!(mp.0.len(), 2),
            _ => panic!("expected multipolygon"),
        }
        assert_eq!(GeoGeometry::from(&internal), wire);
    }

    #[test]
    fn test_geometry_json_tag() {
        let json = serde_json::to_value(square_with_hole()).unwrap();
        assert_eq!(json["type"], "Polygon");
        assert!(json["coordinates"].is_array());
    }

    #[test]
    fn test_single_feature_collection_shape() {
        let collection = FeatureCollection::single(GeoFeature::new(
            json!({"iso_a2": "US"}),
            square_with_hole(),
        ));
        let json = serde_json::to_value(&collection).unwrap();
        assert_eq!(json["type"], "FeatureCollection");
        assert_eq!(json["features"][0]["type"], "Feature");
        assert_eq!(json["features"][0]["properties"]["iso_a2"], "US");
    }
}
