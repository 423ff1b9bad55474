//! Endpoint and view configuration.
//!
//! `DashboardConfig::default()` carries the production GeoServer endpoints.
//! The dashboard app uses the defaults as-is; the CLI can overlay a JSON file.

use crate::basemap::Basemap;
use serde::{Deserialize, Serialize};

/// GeoServer WMS endpoint serving the thematic rasters.
pub const DEFAULT_WMS_URL: &str = "https://mlinfomap.org/geoserver/ForestDashboard/wms";

/// GeoServer OWS endpoint used for WFS requests.
pub const DEFAULT_WFS_URL: &str = "https://mlinfomap.org/geoserver/ForestDashboard/ows";

/// GeoServer workspace prefixed to every layer name.
pub const DEFAULT_WORKSPACE: &str = "ForestDashboard";

/// Feature type holding the district boundaries.
pub const DEFAULT_BOUNDARY_TYPE: &str = "ForestDashboard:4District";

/// Boundary attribute carrying the district name.
pub const DEFAULT_DISTRICT_ATTRIBUTE: &str = "District";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub wms_url: String,
    pub wfs_url: String,
    pub workspace: String,
    pub boundary_type_name: String,
    pub district_attribute: String,
    /// Initial view centre as `[lon, lat]`.
    pub center: [f64; 2],
    pub zoom: f64,
    /// Opacity of every thematic raster.
    pub layer_opacity: f32,
    /// Padding in pixels applied when fitting the view to a district.
    pub fit_padding: u32,
    /// Animation duration in milliseconds for viewport fits.
    pub fit_duration_ms: u32,
    pub basemap: Basemap,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            wms_url: DEFAULT_WMS_URL.to_string(),
            wfs_url: DEFAULT_WFS_URL.to_string(),
            workspace: DEFAULT_WORKSPACE.to_string(),
            boundary_type_name: DEFAULT_BOUNDARY_TYPE.to_string(),
            district_attribute: DEFAULT_DISTRICT_ATTRIBUTE.to_string(),
            center: [78.9629, 20.5937],
            zoom: 8.0,
            layer_opacity: 0.7,
            fit_padding: 40,
            fit_duration_ms: 800,
            basemap: Basemap::Osm,
        }
    }
}

impl DashboardConfig {
    /// Parse a (possibly partial) JSON config. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Qualify a bare layer name with the configured workspace.
    pub fn qualified(&self, layer: &str) -> String {
        format!("{}:{}", self.workspace, layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config =
            DashboardConfig::from_json(r#"{"wms_url": "http://localhost:8080/geoserver/wms"}"#)
                .unwrap();
        assert_eq!(config.wms_url, "http://localhost:8080/geoserver/wms");
        assert_eq!(config.wfs_url, DEFAULT_WFS_URL);
        assert_eq!(config.district_attribute, "District");
        assert_eq!(config.zoom, 8.0);
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(DashboardConfig::from_json("{not json").is_err());
    }

    #[test]
    fn qualifies_layer_names() {
        let config = DashboardConfig::default();
        assert_eq!(
            config.qualified("ForestCover_2020"),
            "ForestDashboard:ForestCover_2020"
        );
    }
}
