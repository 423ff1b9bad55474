//! OGC request builders for the GeoServer backend.
//!
//! - WMS 1.3.0 `GetMap` parameters for tiled raster sources
//! - WMS `GetFeatureInfo` for click lookups on raster layers
//! - WMS `GetLegendGraphic` for the legend panel
//! - WFS 1.0.0 `GetFeature` for the district boundaries
//!
//! All URLs are built with `url::Url` so parameter values are encoded
//! consistently.

use crate::projection::{Extent, MAP_CRS};
use serde::Serialize;
use url::Url;

pub const WMS_VERSION: &str = "1.3.0";
pub const WFS_VERSION: &str = "1.0.0";
pub const IMAGE_FORMAT: &str = "image/png";
pub const JSON_FORMAT: &str = "application/json";

/// Side of the pixel window sent with a GetFeatureInfo request.
pub const FEATURE_INFO_WINDOW_PX: u32 = 101;

/// Parameters handed to a tiled WMS source. The map engine adds
/// `BBOX`/`WIDTH`/`HEIGHT`/`CRS` per tile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileParams {
    #[serde(rename = "LAYERS")]
    pub layers: String,
    #[serde(rename = "FORMAT")]
    pub format: &'static str,
    #[serde(rename = "TRANSPARENT")]
    pub transparent: bool,
    #[serde(rename = "TILED")]
    pub tiled: bool,
    #[serde(rename = "VERSION")]
    pub version: &'static str,
}

impl TileParams {
    pub fn new(layer_name: &str) -> Self {
        Self {
            layers: layer_name.to_string(),
            format: IMAGE_FORMAT,
            transparent: true,
            tiled: true,
            version: WMS_VERSION,
        }
    }
}

/// Full GetMap URL for a single image covering `bbox` (EPSG:3857).
pub fn get_map_url(
    wms_url: &str,
    layer_name: &str,
    bbox: &Extent,
    width: u32,
    height: u32,
) -> anyhow::Result<String> {
    let url = Url::parse_with_params(
        wms_url,
        &[
            ("SERVICE", "WMS".to_string()),
            ("VERSION", WMS_VERSION.to_string()),
            ("REQUEST", "GetMap".to_string()),
            ("LAYERS", layer_name.to_string()),
            ("STYLES", String::new()),
            ("FORMAT", IMAGE_FORMAT.to_string()),
            ("TRANSPARENT", "true".to_string()),
            ("CRS", MAP_CRS.to_string()),
            ("BBOX", bbox.to_bbox_string()),
            ("WIDTH", width.to_string()),
            ("HEIGHT", height.to_string()),
        ],
    )?;
    Ok(url.into())
}

/// Legend image URL for a layer.
pub fn legend_url(wms_url: &str, layer_name: &str) -> anyhow::Result<String> {
    let url = Url::parse_with_params(
        wms_url,
        &[
            ("SERVICE", "WMS"),
            ("VERSION", WMS_VERSION),
            ("REQUEST", "GetLegendGraphic"),
            ("LAYER", layer_name),
            ("FORMAT", IMAGE_FORMAT),
        ],
    )?;
    Ok(url.into())
}

/// WFS GetFeature URL returning a GeoJSON FeatureCollection.
pub fn get_feature_url(wfs_url: &str, type_name: &str) -> anyhow::Result<String> {
    let url = Url::parse_with_params(
        wfs_url,
        &[
            ("service", "WFS"),
            ("version", WFS_VERSION),
            ("request", "GetFeature"),
            ("typeName", type_name),
            ("outputFormat", JSON_FORMAT),
        ],
    )?;
    Ok(url.into())
}

/// A GetFeatureInfo lookup at a clicked map coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureInfoRequest {
    pub layer_name: String,
    /// Clicked coordinate in EPSG:3857.
    pub coordinate: [f64; 2],
    /// View resolution in meters per pixel.
    pub resolution: f64,
}

impl FeatureInfoRequest {
    /// Pixel window centred on the clicked coordinate.
    pub fn bbox(&self) -> Extent {
        let half = self.resolution * f64::from(FEATURE_INFO_WINDOW_PX) / 2.0;
        Extent::new(
            [self.coordinate[0] - half, self.coordinate[1] - half],
            [self.coordinate[0] + half, self.coordinate[1] + half],
        )
    }

    pub fn url(&self, wms_url: &str) -> anyhow::Result<String> {
        let center_px = (FEATURE_INFO_WINDOW_PX / 2).to_string();
        let size = FEATURE_INFO_WINDOW_PX.to_string();
        let url = Url::parse_with_params(
            wms_url,
            &[
                ("SERVICE", "WMS".to_string()),
                ("VERSION", WMS_VERSION.to_string()),
                ("REQUEST", "GetFeatureInfo".to_string()),
                ("LAYERS", self.layer_name.clone()),
                ("QUERY_LAYERS", self.layer_name.clone()),
                ("STYLES", String::new()),
                ("FORMAT", IMAGE_FORMAT.to_string()),
                ("TRANSPARENT", "true".to_string()),
                ("INFO_FORMAT", JSON_FORMAT.to_string()),
                ("FEATURE_COUNT", "1".to_string()),
                ("CRS", MAP_CRS.to_string()),
                ("BBOX", self.bbox().to_bbox_string()),
                ("WIDTH", size.clone()),
                ("HEIGHT", size),
                ("I", center_px.clone()),
                ("J", center_px),
            ],
        )?;
        Ok(url.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn query(url: &str) -> HashMap<String, String> {
        Url::parse(url)
            .unwrap()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    const WMS: &str = "https://mlinfomap.org/geoserver/ForestDashboard/wms";

    #[test]
    fn get_feature_url_requests_geojson() {
        let url = get_feature_url(
            "https://mlinfomap.org/geoserver/ForestDashboard/ows",
            "ForestDashboard:4District",
        )
        .unwrap();
        let q = query(&url);
        assert!(url.starts_with("https://mlinfomap.org/geoserver/ForestDashboard/ows?"));
        assert_eq!(q["service"], "WFS");
        assert_eq!(q["version"], "1.0.0");
        assert_eq!(q["request"], "GetFeature");
        assert_eq!(q["typeName"], "ForestDashboard:4District");
        assert_eq!(q["outputFormat"], "application/json");
    }

    #[test]
    fn feature_info_window_is_centred_on_click() {
        let req = FeatureInfoRequest {
            layer_name: "ForestDashboard:MH4Dist_burned_forest_2021".to_string(),
            coordinate: [8_800_000.0, 2_300_000.0],
            resolution: 2.0,
        };
        let bbox = req.bbox();
        assert_eq!(bbox.center(), [8_800_000.0, 2_300_000.0]);
        assert_eq!(bbox.max[0] - bbox.min[0], 202.0);

        let q = query(&req.url(WMS).unwrap());
        assert_eq!(q["REQUEST"], "GetFeatureInfo");
        assert_eq!(q["QUERY_LAYERS"], "ForestDashboard:MH4Dist_burned_forest_2021");
        assert_eq!(q["INFO_FORMAT"], "application/json");
        assert_eq!(q["I"], "50");
        assert_eq!(q["J"], "50");
        assert_eq!(q["WIDTH"], "101");
        assert_eq!(q["CRS"], "EPSG:3857");
    }

    #[test]
    fn legend_and_get_map_carry_layer() {
        let legend = query(&legend_url(WMS, "ForestDashboard:ForestCover_2000").unwrap());
        assert_eq!(legend["REQUEST"], "GetLegendGraphic");
        assert_eq!(legend["LAYER"], "ForestDashboard:ForestCover_2000");

        let bbox = Extent::new([0.0, 0.0], [10.0, 10.0]);
        let map = query(&get_map_url(WMS, "ForestDashboard:ForestCover_2020", &bbox, 256, 256).unwrap());
        assert_eq!(map["LAYERS"], "ForestDashboard:ForestCover_2020");
        assert_eq!(map["BBOX"], "0,0,10,10");
        assert_eq!(map["TRANSPARENT"], "true");
    }

    #[test]
    fn invalid_base_url_is_an_error() {
        assert!(legend_url("not a url", "x").is_err());
    }

    #[test]
    fn tile_params_serialize_with_wms_names() {
        let json = serde_json::to_value(TileParams::new("ForestDashboard:ForestCover_2021")).unwrap();
        assert_eq!(json["LAYERS"], "ForestDashboard:ForestCover_2021");
        assert_eq!(json["TRANSPARENT"], true);
    }
}
