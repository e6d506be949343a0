//! Point-in-polygon containment tests.
//!
//! Crossing-number (ray casting) over the ring structures in
//! [`crate::models::Geometry`]. Pure functions, no side effects.

use geo_types::{Coord, LineString, Polygon};

use crate::models::Geometry;

/// Crossing-number test: cast a horizontal ray from `point` toward +x and
/// count ring edges it crosses. The point is inside iff the count is odd.
///
/// Rings are treated as implicitly closed; an explicit closing point only
/// adds a degenerate edge that can never cross the ray. The half-open
/// comparison on each edge's y-extents keeps a vertex lying exactly on the
/// ray from being counted twice.
///
/// Points exactly on an edge or vertex have implementation-defined
/// membership. Callers must not rely on either outcome there.
pub fn point_in_ring(ring: &LineString<f64>, point: Coord<f64>) -> bool {
    let coords = &ring.0;
    let n = coords.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let a = coords[i];
        let b = coords[j];
        if (a.y > point.y) != (b.y > point.y) {
            let x_cross = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Outer ring must contain the point and no hole may. Holes are only
/// evaluated after the outer test passes, and the first hole containing the
/// point short-circuits to false.
pub fn polygon_contains(polygon: &Polygon<f64>, point: Coord<f64>) -> bool {
    if !point_in_ring(polygon.exterior(), point) {
        return false;
    }
    !polygon
        .interiors()
        .iter()
        .any(|hole| point_in_ring(hole, point))
}

/// Containment for a full boundary geometry.
///
/// MultiPolygon sub-polygons are tested in list order and the first one whose
/// outer-minus-holes test succeeds decides; no aggregation across the rest.
pub fn contains_point(geometry: &Geometry, point: Coord<f64>) -> bool {
    match geometry {
        Geometry::Polygon(polygon) => polygon_contains(polygon, point),
        Geometry::MultiPolygon(multi) => {
            multi.0.iter().any(|polygon| polygon_contains(polygon, point))
        }
    }
}
