//! Static catalog of the thematic layers served by GeoServer.
//!
//! Paint order, bottom to top:
//! basemap < forest cover < encroachment < burned forest < click highlight
//! < district highlight < district boundary.
//! Within a category later years paint above earlier ones, and the fire
//! auxiliaries paint above every fire year.

use crate::config::DashboardConfig;
use crate::layer::{LayerKey, LayerTag, ThematicLayer, Year};
use serde::{Deserialize, Serialize};

pub const BASEMAP_Z: i32 = 0;
pub const CLICK_HIGHLIGHT_Z: i32 = 900;
pub const DISTRICT_HIGHLIGHT_Z: i32 = 910;
pub const BOUNDARY_Z: i32 = 1000;

/// Where a layer's data comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayerSource {
    /// Tiled WMS imagery. A layer without a name is configured but renders nothing.
    Wms { layer_name: Option<String> },
    /// Vector features fetched over WFS.
    Wfs { type_name: String },
}

impl LayerSource {
    /// Raster layers answer clicks through GetFeatureInfo.
    pub fn is_image(&self) -> bool {
        matches!(self, LayerSource::Wms { .. })
    }

    pub fn wms_layer_name(&self) -> Option<&str> {
        match self {
            LayerSource::Wms { layer_name } => layer_name.as_deref(),
            LayerSource::Wfs { .. } => None,
        }
    }
}

/// One catalog row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub key: LayerKey,
    pub title: String,
    pub source: LayerSource,
    pub z_index: i32,
    pub opacity: f32,
    /// Visibility before any selection is applied.
    pub default_visible: bool,
}

fn category_base_z(category: ThematicLayer) -> i32 {
    match category {
        ThematicLayer::ForestCover => 100,
        ThematicLayer::Encroachment => 200,
        ThematicLayer::BurnedForest => 300,
    }
}

/// Paint order of a thematic layer.
pub fn z_index_for(key: &LayerKey) -> i32 {
    let offset = match key.tag {
        LayerTag::Year(year) => i32::from(year.value()).saturating_sub(2000).clamp(0, 89),
        LayerTag::Frequency => 90,
        LayerTag::Pressure => 91,
    };
    category_base_z(key.category) + offset
}

/// Years published for a category.
pub fn years_for(category: ThematicLayer) -> Vec<Year> {
    let mut years = Vec::with_capacity(4);
    if category == ThematicLayer::ForestCover {
        years.push(Year::BASELINE);
    }
    years.extend(Year::SELECTABLE);
    years
}

fn layer_name(category: ThematicLayer, year: Year) -> String {
    match category {
        ThematicLayer::ForestCover => format!("ForestCover_{}", year),
        ThematicLayer::Encroachment => format!("MH4Dist_Encroachment_{}", year),
        ThematicLayer::BurnedForest => format!("MH4Dist_burned_forest_{}", year),
    }
}

/// Build the full thematic catalog for `config`.
///
/// The fire frequency and human pressure layers are listed without a WMS
/// layer name: GeoServer does not publish them yet.
pub fn thematic_catalog(config: &DashboardConfig) -> Vec<LayerSpec> {
    let mut specs = Vec::new();

    for category in ThematicLayer::ALL {
        for year in years_for(category) {
            let key = LayerKey::new(category, year);
            specs.push(LayerSpec {
                key,
                title: format!("{} {}", category.label(), year),
                source: LayerSource::Wms {
                    layer_name: Some(config.qualified(&layer_name(category, year))),
                },
                z_index: z_index_for(&key),
                opacity: config.layer_opacity,
                default_visible: category == ThematicLayer::ForestCover && year == Year::BASELINE,
            });
        }
    }

    for (tag, title) in [
        (LayerTag::Frequency, "Fire Frequency 2019-2023"),
        (LayerTag::Pressure, "Human Pressure (gHM)"),
    ] {
        let key = LayerKey::new(ThematicLayer::BurnedForest, tag);
        specs.push(LayerSpec {
            key,
            title: title.to_string(),
            source: LayerSource::Wms { layer_name: None },
            z_index: z_index_for(&key),
            opacity: config.layer_opacity,
            default_visible: false,
        });
    }

    specs.sort_by_key(|s| s.z_index);
    specs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_every_category_year() {
        let specs = thematic_catalog(&DashboardConfig::default());
        // forest 4 years, encroachment 3, fire 3 + 2 auxiliaries
        assert_eq!(specs.len(), 12);
        assert!(specs
            .iter()
            .any(|s| s.key == LayerKey::new(ThematicLayer::ForestCover, Year::BASELINE)));
        assert!(!specs
            .iter()
            .any(|s| s.key == LayerKey::new(ThematicLayer::Encroachment, Year::BASELINE)));
    }

    #[test]
    fn paint_order_by_category_then_year() {
        let forest_2022 = z_index_for(&LayerKey::new(ThematicLayer::ForestCover, Year(2022)));
        let enc_2020 = z_index_for(&LayerKey::new(ThematicLayer::Encroachment, Year(2020)));
        let enc_2021 = z_index_for(&LayerKey::new(ThematicLayer::Encroachment, Year(2021)));
        let fire_2022 = z_index_for(&LayerKey::new(ThematicLayer::BurnedForest, Year(2022)));
        let fire_freq = z_index_for(&LayerKey::new(ThematicLayer::BurnedForest, LayerTag::Frequency));

        assert!(forest_2022 < enc_2020);
        assert!(enc_2020 < enc_2021);
        assert!(enc_2021 < fire_2022);
        assert!(fire_2022 < fire_freq);
        assert!(fire_freq < CLICK_HIGHLIGHT_Z);
        assert!(CLICK_HIGHLIGHT_Z < DISTRICT_HIGHLIGHT_Z);
        assert!(DISTRICT_HIGHLIGHT_Z < BOUNDARY_Z);
    }

    #[test]
    fn layer_names_are_workspace_qualified() {
        let specs = thematic_catalog(&DashboardConfig::default());
        let fire_2021 = specs
            .iter()
            .find(|s| s.key == LayerKey::new(ThematicLayer::BurnedForest, Year(2021)))
            .unwrap();
        assert_eq!(
            fire_2021.source.wms_layer_name(),
            Some("ForestDashboard:MH4Dist_burned_forest_2021")
        );
        let only_baseline_on: Vec<_> = specs.iter().filter(|s| s.default_visible).collect();
        assert_eq!(only_baseline_on.len(), 1);
    }
}
