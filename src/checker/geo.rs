//! Minimal GeoJSON output. Coordinates are `[longitude, latitude]`.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: [f64; 2] },
    LineString { coordinates: Vec<[f64; 2]> },
}

impl Geometry {
    #[must_use]
    pub const fn point(latitude: f64, longitude: f64) -> Self {
        Self::Point {
            coordinates: [longitude, latitude],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    pub geometry: Geometry,
    pub properties: Map<String, Value>,
}

impl Feature {
    #[must_use]
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            properties: Map::new(),
        }
    }

    #[must_use]
    pub fn with_properties(mut self, properties: Map<String, Value>) -> Self {
        self.properties = properties;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    #[must_use]
    pub const fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    /// Renders the collection as a JSON value.
    ///
    /// # Errors
    /// Returns [`crate::error::QaError::Json`] if serialization fails.
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn point_feature_collection_layout() {
        let mut properties = Map::new();
        properties.insert("Mode".to_string(), json!(2));
        let collection = FeatureCollection::new(vec![
            Feature::new(Geometry::point(-35.5, 150.25)).with_properties(properties),
        ]);

        assert_eq!(
            collection.to_value().unwrap(),
            json!({
                "type": "FeatureCollection",
                "features": [{
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": [150.25, -35.5]},
                    "properties": {"Mode": 2}
                }]
            })
        );
    }

    #[test]
    fn line_string_layout() {
        let line = Geometry::LineString {
            coordinates: vec![[1.0, 2.0], [3.0, 4.0]],
        };
        assert_eq!(
            serde_json::to_value(Feature::new(line)).unwrap(),
            json!({
                "type": "Feature",
                "geometry": {"type": "LineString", "coordinates": [[1.0, 2.0], [3.0, 4.0]]},
                "properties": {}
            })
        );
    }
}
