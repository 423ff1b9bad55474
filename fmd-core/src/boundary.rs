//! District boundary features parsed from a GeoJSON FeatureCollection.
//!
//! The same parser handles WFS `GetFeature` responses and WMS
//! `GetFeatureInfo` responses, which GeoServer both encodes as GeoJSON.

use crate::projection::Extent;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Coordinate reference of a parsed collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataCrs {
    /// Longitude/latitude degrees (EPSG:4326, CRS84).
    LonLat,
    /// Web Mercator meters (EPSG:3857).
    WebMercator,
}

impl DataCrs {
    fn from_name(name: &str) -> Self {
        if name.contains("3857") || name.contains("900913") {
            DataCrs::WebMercator
        } else {
            DataCrs::LonLat
        }
    }
}

#[derive(Deserialize)]
struct RawCollection {
    #[serde(default)]
    features: Vec<RawFeature>,
    #[serde(default)]
    crs: Option<Value>,
}

#[derive(Deserialize)]
struct RawFeature {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    geometry: Option<Value>,
    #[serde(default)]
    properties: Option<Map<String, Value>>,
}

/// A single feature with its attributes and geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryFeature {
    pub id: Option<String>,
    pub properties: Map<String, Value>,
    /// Raw GeoJSON geometry object, `Value::Null` if the feature has none.
    pub geometry: Value,
    /// Extent of the geometry in the collection's CRS.
    pub extent: Option<Extent>,
}

impl BoundaryFeature {
    /// Attribute rendered as text. Numbers and booleans are formatted,
    /// null and nested values are skipped.
    pub fn attribute(&self, name: &str) -> Option<String> {
        value_as_text(self.properties.get(name)?)
    }

    /// Attributes as `(name, text)` pairs in key order, skipping null,
    /// empty and nested values.
    pub fn display_attributes(&self) -> Vec<(String, String)> {
        self.properties
            .iter()
            .filter_map(|(k, v)| value_as_text(v).map(|text| (k.clone(), text)))
            .collect()
    }

    /// The feature re-encoded as a GeoJSON `Feature`.
    pub fn to_geojson(&self) -> Value {
        let mut feature = Map::new();
        feature.insert("type".to_string(), Value::String("Feature".to_string()));
        if let Some(id) = &self.id {
            feature.insert("id".to_string(), Value::String(id.clone()));
        }
        feature.insert("geometry".to_string(), self.geometry.clone());
        feature.insert("properties".to_string(), Value::Object(self.properties.clone()));
        Value::Object(feature)
    }
}

fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Boundary features loaded once from the feature service.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryFeatureSet {
    pub features: Vec<BoundaryFeature>,
    pub crs: DataCrs,
}

impl BoundaryFeatureSet {
    /// Parse a GeoJSON FeatureCollection.
    pub fn from_geojson(json: &str) -> anyhow::Result<Self> {
        let raw: RawCollection = serde_json::from_str(json)?;
        let crs = raw
            .crs
            .as_ref()
            .and_then(|c| c.pointer("/properties/name"))
            .and_then(Value::as_str)
            .map(DataCrs::from_name)
            .unwrap_or(DataCrs::LonLat);

        let features = raw
            .features
            .into_iter()
            .map(|f| {
                let geometry = f.geometry.unwrap_or(Value::Null);
                BoundaryFeature {
                    id: f.id.as_ref().and_then(value_as_text),
                    properties: f.properties.unwrap_or_default(),
                    extent: geometry_extent(&geometry),
                    geometry,
                }
            })
            .collect::<Vec<_>>();

        log::debug!("boundary: parsed {} features ({:?})", features.len(), crs);
        Ok(Self { features, crs })
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// First feature whose `attribute` equals `name`.
    pub fn find(&self, attribute: &str, name: &str) -> Option<&BoundaryFeature> {
        self.features
            .iter()
            .find(|f| f.attribute(attribute).as_deref() == Some(name))
    }

    /// Distinct values of `attribute`, in document order.
    pub fn names(&self, attribute: &str) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for name in self.features.iter().filter_map(|f| f.attribute(attribute)) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// Union of all feature extents in the collection's CRS.
    pub fn extent(&self) -> Option<Extent> {
        self.features
            .iter()
            .filter_map(|f| f.extent)
            .reduce(|acc, e| acc.union(&e))
    }

    /// Convert an extent from the collection's CRS to Web Mercator.
    pub fn to_map_extent(&self, extent: &Extent) -> Extent {
        match self.crs {
            DataCrs::LonLat => extent.lon_lat_to_mercator(),
            DataCrs::WebMercator => *extent,
        }
    }

    /// The whole collection re-encoded as GeoJSON.
    pub fn to_geojson(&self) -> Value {
        serde_json::json!({
            "type": "FeatureCollection",
            "features": self.features.iter().map(BoundaryFeature::to_geojson).collect::<Vec<_>>(),
        })
    }
}

/// Extent of every position nested in a GeoJSON geometry.
pub fn geometry_extent(geometry: &Value) -> Option<Extent> {
    let mut extent: Option<Extent> = None;
    if let Some(coords) = geometry.get("coordinates") {
        visit_positions(coords, &mut extent);
    }
    if let Some(Value::Array(parts)) = geometry.get("geometries") {
        for part in parts {
            if let Some(e) = geometry_extent(part) {
                extent = Some(match extent {
                    Some(acc) => acc.union(&e),
                    None => e,
                });
            }
        }
    }
    extent
}

fn visit_positions(value: &Value, extent: &mut Option<Extent>) {
    let Value::Array(items) = value else {
        return;
    };
    if let (Some(x), Some(y)) = (
        items.first().and_then(Value::as_f64),
        items.get(1).and_then(Value::as_f64),
    ) {
        match extent {
            Some(e) => e.extend_point([x, y]),
            None => *extent = Some(Extent::from_point([x, y])),
        }
        return;
    }
    for item in items {
        visit_positions(item, extent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOUR_DISTRICTS: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "id": "4District.1",
             "geometry": {"type": "MultiPolygon", "coordinates": [[[[79.0, 19.5], [80.0, 19.5], [80.0, 20.5], [79.0, 20.5], [79.0, 19.5]]]]},
             "properties": {"District": "Chandrapur", "State": "Maharashtra", "Area_km2": 11443}},
            {"type": "Feature", "id": "4District.2",
             "geometry": {"type": "Polygon", "coordinates": [[[79.8, 19.0], [80.9, 19.0], [80.9, 20.9], [79.8, 19.0]]]},
             "properties": {"District": "Gadchiroli", "State": "Maharashtra"}},
            {"type": "Feature", "id": "4District.3",
             "geometry": {"type": "Polygon", "coordinates": [[[79.9, 21.0], [80.6, 21.0], [80.6, 21.6], [79.9, 21.0]]]},
             "properties": {"District": "Gondia", "State": "Maharashtra"}}
        ],
        "crs": {"type": "name", "properties": {"name": "urn:ogc:def:crs:EPSG::4326"}}
    }"#;

    #[test]
    fn parses_features_and_extents() {
        let set = BoundaryFeatureSet::from_geojson(FOUR_DISTRICTS).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.crs, DataCrs::LonLat);
        let chandrapur = set.find("District", "Chandrapur").unwrap();
        assert_eq!(chandrapur.id.as_deref(), Some("4District.1"));
        assert_eq!(chandrapur.extent.unwrap().to_array(), [79.0, 19.5, 80.0, 20.5]);
        assert_eq!(set.extent().unwrap().to_array(), [79.0, 19.0, 80.9, 21.6]);
    }

    #[test]
    fn lookup_is_exact_and_first_match_wins() {
        let json = r#"{"features": [
            {"geometry": null, "properties": {"District": "Gondia", "n": 1}},
            {"geometry": null, "properties": {"District": "Gondia", "n": 2}}
        ]}"#;
        let set = BoundaryFeatureSet::from_geojson(json).unwrap();
        assert_eq!(set.find("District", "Gondia").unwrap().attribute("n").as_deref(), Some("1"));
        assert!(set.find("District", "gondia").is_none());
        assert!(set.find("Name", "Gondia").is_none());
        assert_eq!(set.names("District"), vec!["Gondia".to_string()]);
    }

    #[test]
    fn detects_mercator_collections() {
        let json = r#"{"type": "FeatureCollection", "features": [],
            "crs": {"type": "name", "properties": {"name": "urn:ogc:def:crs:EPSG::3857"}}}"#;
        let set = BoundaryFeatureSet::from_geojson(json).unwrap();
        assert_eq!(set.crs, DataCrs::WebMercator);
        assert!(set.is_empty());
        assert!(set.extent().is_none());
    }

    #[test]
    fn display_attributes_skip_nulls() {
        let json = r#"{"features": [{"geometry": null,
            "properties": {"District": "Bhandara", "burned_km2": 4.5, "note": null, "flag": true}}]}"#;
        let set = BoundaryFeatureSet::from_geojson(json).unwrap();
        let attrs = set.features[0].display_attributes();
        assert_eq!(attrs.len(), 3);
        assert!(attrs.contains(&("burned_km2".to_string(), "4.5".to_string())));
    }

    #[test]
    fn geojson_round_trip_keeps_properties() {
        let set = BoundaryFeatureSet::from_geojson(FOUR_DISTRICTS).unwrap();
        let value = set.features[1].to_geojson();
        assert_eq!(value["type"], "Feature");
        assert_eq!(value["properties"]["District"], "Gadchiroli");
        assert_eq!(set.to_geojson()["features"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(BoundaryFeatureSet::from_geojson("<ServiceExceptionReport/>").is_err());
    }
}
