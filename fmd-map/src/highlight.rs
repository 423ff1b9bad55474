//! Single-feature overlay for the selected district or clicked feature.

use fmd_core::boundary::{BoundaryFeature, DataCrs};
use serde_json::Value;

/// Vector overlay holding at most one feature.
///
/// Contents are replaced wholesale, never edited in place.
#[derive(Debug, Clone)]
pub struct HighlightLayer {
    pub id: &'static str,
    pub z_index: i32,
    feature: Option<BoundaryFeature>,
    crs: DataCrs,
}

impl HighlightLayer {
    pub fn new(id: &'static str, z_index: i32) -> Self {
        Self {
            id,
            z_index,
            feature: None,
            crs: DataCrs::LonLat,
        }
    }

    pub fn clear(&mut self) {
        self.feature = None;
    }

    pub fn replace(&mut self, feature: BoundaryFeature, crs: DataCrs) {
        self.feature = Some(feature);
        self.crs = crs;
    }

    pub fn feature(&self) -> Option<&BoundaryFeature> {
        self.feature.as_ref()
    }

    pub fn crs(&self) -> DataCrs {
        self.crs
    }

    pub fn len(&self) -> usize {
        usize::from(self.feature.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.feature.is_none()
    }

    /// Contents as a FeatureCollection with zero or one feature.
    pub fn to_geojson(&self) -> Value {
        serde_json::json!({
            "type": "FeatureCollection",
            "features": self.feature.iter().map(BoundaryFeature::to_geojson).collect::<Vec<_>>(),
        })
    }
}
