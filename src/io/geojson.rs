use crate::cell::PinCell;
use crate::error::DigipinError;
use geojson::{Feature, FeatureCollection, JsonObject, JsonValue};

/// Trait for converting collections of [`PinCell`]s to GeoJSON.
///
/// Each cell becomes a polygon `Feature` carrying `code`, `formatted`, `domain`,
/// `lat` and `lng` properties.
pub trait PinCellsToGeoJson {
    fn to_feature_collection(&self) -> FeatureCollection;

    /// Serialises the feature collection to a JSON string.
    fn to_geojson_string(&self) -> Result<String, DigipinError> {
        serde_json::to_string(&self.to_feature_collection())
            .map_err(|e| DigipinError::IoError(e.to_string()))
    }
}

fn to_feature(cell: &PinCell) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("code".to_string(), JsonValue::from(cell.code.clone()));
    properties.insert("formatted".to_string(), JsonValue::from(cell.formatted()));
    properties.insert("domain".to_string(), JsonValue::from(cell.domain.to_string()));
    properties.insert("lat".to_string(), JsonValue::from(cell.lat()));
    properties.insert("lng".to_string(), JsonValue::from(cell.lng()));

    Feature {
        bbox: None,
        geometry: Some(geojson::Geometry::from(&cell.to_polygon())),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

impl PinCellsToGeoJson for [PinCell] {
    fn to_feature_collection(&self) -> FeatureCollection {
        FeatureCollection {
            bbox: None,
            features: self.iter().map(to_feature).collect(),
            foreign_members: None,
        }
    }
}

impl PinCellsToGeoJson for Vec<PinCell> {
    fn to_feature_collection(&self) -> FeatureCollection {
        self.as_slice().to_feature_collection()
    }
}
