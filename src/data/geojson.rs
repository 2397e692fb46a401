//! The subset of GeoJSON the loader understands.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::models::{Point, Polygon, Ring};

#[derive(Debug, Deserialize)]
pub(crate) struct FeatureCollection {
    pub features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Feature {
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

/// Positions are kept as raw arrays so that altitude ordinates are tolerated.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub(crate) enum Geometry {
    Polygon {
        coordinates: Vec<Vec<Vec<f64>>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Vec<f64>>>>,
    },
    #[serde(other)]
    Unsupported,
}

impl Geometry {
    pub fn into_polygons(self) -> Vec<Polygon> {
        match self {
            Self::Polygon { coordinates } => to_polygon(coordinates).into_iter().collect(),
            Self::MultiPolygon { coordinates } => {
                coordinates.into_iter().filter_map(to_polygon).collect()
            }
            Self::Unsupported => Vec::new(),
        }
    }
}

fn to_polygon(rings: Vec<Vec<Vec<f64>>>) -> Option<Polygon> {
    let mut rings = rings.into_iter().map(to_ring);
    let exterior = rings.next()?;
    Some(Polygon::new(exterior, rings.collect()))
}

fn to_ring(positions: Vec<Vec<f64>>) -> Ring {
    Ring::new(
        positions
            .into_iter()
            .filter_map(|position| match position.as_slice() {
                [lon, lat, ..] => Some(Point::new(*lon, *lat)),
                _ => None,
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polygon_with_hole() {
        let geometry: Geometry = serde_json::from_str(
            r#"{
                "type": "Polygon",
                "coordinates": [
                    [[0, 0], [10, 0], [10, 10], [0, 10], [0, 0]],
                    [[4, 4], [6, 4], [6, 6], [4, 6], [4, 4]]
                ]
            }"#,
        )
        .unwrap();

        let polygons = geometry.into_polygons();
        assert_eq!(polygons.len(), 1);
        assert_eq!(polygons[0].holes().len(), 1);
        assert!(polygons[0].contains(Point::new(1.0, 1.0)));
        assert!(!polygons[0].contains(Point::new(5.0, 5.0)));
    }

    #[test]
    fn multipolygon_and_altitude() {
        let geometry: Geometry = serde_json::from_str(
            r#"{
                "type": "MultiPolygon",
                "coordinates": [
                    [[[0, 0, 5], [1, 0, 5], [1, 1, 5], [0, 0, 5]]],
                    [[[3, 3], [4, 3], [4, 4], [3, 3]]]
                ]
            }"#,
        )
        .unwrap();

        let polygons = geometry.into_polygons();
        assert_eq!(polygons.len(), 2);
        assert_eq!(polygons[0].exterior().points()[1], Point::new(1.0, 0.0));
    }

    #[test]
    fn unsupported_geometry_draws_nothing() {
        let geometry: Geometry =
            serde_json::from_str(r#"{ "type": "Point", "coordinates": [23.7, 37.9] }"#).unwrap();
        assert!(geometry.into_polygons().is_empty());
    }

    #[test]
    fn short_positions_are_skipped() {
        let geometry: Geometry = serde_json::from_str(
            r#"{ "type": "Polygon", "coordinates": [[[0, 0], [1], [1, 1], [0, 1]]] }"#,
        )
        .unwrap();
        let polygons = geometry.into_polygons();
        assert_eq!(polygons[0].exterior().points().len(), 3);
    }
}
