//! Layer registry.
//!
//! Built once from the static catalog when the map mounts. The set of
//! entries, their sources and their paint order never change afterwards;
//! only the `visible` flags do. Rebuilding would re-issue every tile and
//! feature request against GeoServer, so nothing in the reconciler does it.
//!
//! Lookups for keys that were never published (for example a pressure layer
//! under forest cover) return `None`/`false` rather than panicking.

use fmd_core::catalog::{self, LayerSource, BOUNDARY_Z};
use fmd_core::config::DashboardConfig;
use fmd_core::layer::{LayerKey, LayerTag, ThematicLayer};
use serde::Serialize;
use std::collections::HashMap;

/// Stable id of the district boundary layer in the map engine.
pub const BOUNDARY_LAYER_ID: &str = "boundary";

/// A thematic layer handle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerEntry {
    pub id: String,
    pub key: LayerKey,
    pub title: String,
    pub visible: bool,
    pub z_index: i32,
    pub opacity: f32,
    pub source: LayerSource,
}

impl LayerEntry {
    /// Whether a click on this layer can be answered with GetFeatureInfo.
    pub fn is_queryable(&self) -> bool {
        self.source.wms_layer_name().is_some()
    }
}

/// The vector boundary layer drawn above everything else.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundaryLayer {
    pub id: &'static str,
    pub title: &'static str,
    pub z_index: i32,
    pub source: LayerSource,
}

#[derive(Debug, Clone)]
pub struct LayerRegistry {
    /// Thematic entries in paint order, bottom first.
    entries: Vec<LayerEntry>,
    index: HashMap<LayerKey, usize>,
    boundary: BoundaryLayer,
}

impl LayerRegistry {
    /// Construct the registry from the catalog for `config`.
    pub fn build(config: &DashboardConfig) -> Self {
        let entries: Vec<LayerEntry> = catalog::thematic_catalog(config)
            .into_iter()
            .map(|spec| LayerEntry {
                id: spec.key.id(),
                key: spec.key,
                title: spec.title,
                visible: spec.default_visible,
                z_index: spec.z_index,
                opacity: spec.opacity,
                source: spec.source,
            })
            .collect();
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.key, i))
            .collect();

        log::info!("registry: built {} thematic layers", entries.len());

        Self {
            entries,
            index,
            boundary: BoundaryLayer {
                id: BOUNDARY_LAYER_ID,
                title: "District Boundary",
                z_index: BOUNDARY_Z,
                source: LayerSource::Wfs {
                    type_name: config.boundary_type_name.clone(),
                },
            },
        }
    }

    pub fn get(&self, category: ThematicLayer, tag: impl Into<LayerTag>) -> Option<&LayerEntry> {
        self.get_key(&LayerKey::new(category, tag))
    }

    pub fn get_key(&self, key: &LayerKey) -> Option<&LayerEntry> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    /// Set one entry's visibility. Returns `false`, changing nothing, if the
    /// key is not in the registry.
    pub fn set_visible(
        &mut self,
        category: ThematicLayer,
        tag: impl Into<LayerTag>,
        visible: bool,
    ) -> bool {
        self.set_key_visible(&LayerKey::new(category, tag), visible)
    }

    pub fn set_key_visible(&mut self, key: &LayerKey, visible: bool) -> bool {
        match self.index.get(key) {
            Some(&i) => {
                self.entries[i].visible = visible;
                true
            }
            None => {
                log::debug!("registry: no layer for {}", key);
                false
            }
        }
    }

    pub fn hide_all(&mut self) {
        for entry in &mut self.entries {
            entry.visible = false;
        }
    }

    /// Thematic entries in paint order, bottom first.
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &LayerEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn visible_keys(&self) -> Vec<LayerKey> {
        self.entries
            .iter()
            .filter(|e| e.visible)
            .map(|e| e.key)
            .collect()
    }

    /// Top-most visible entry that can answer a GetFeatureInfo lookup.
    pub fn topmost_queryable(&self) -> Option<&LayerEntry> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.visible && e.is_queryable())
    }

    pub fn boundary(&self) -> &BoundaryLayer {
        &self.boundary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fmd_core::layer::Year;

    fn registry() -> LayerRegistry {
        LayerRegistry::build(&DashboardConfig::default())
    }

    fn visibility(reg: &LayerRegistry) -> Vec<(LayerKey, bool)> {
        reg.entries().map(|e| (e.key, e.visible)).collect()
    }

    #[test]
    fn starts_with_only_baseline_visible() {
        let reg = registry();
        assert_eq!(reg.len(), 12);
        assert_eq!(
            reg.visible_keys(),
            vec![LayerKey::new(ThematicLayer::ForestCover, Year::BASELINE)]
        );
    }

    #[test]
    fn unknown_keys_are_no_ops() {
        let mut reg = registry();
        let before = visibility(&reg);

        assert!(reg.get(ThematicLayer::ForestCover, LayerTag::Pressure).is_none());
        assert!(reg.get(ThematicLayer::Encroachment, Year::BASELINE).is_none());
        assert!(!reg.set_visible(ThematicLayer::ForestCover, LayerTag::Pressure, true));
        assert!(!reg.set_visible(ThematicLayer::Encroachment, Year(1999), true));
        assert!(!reg.set_visible(ThematicLayer::BurnedForest, Year(2030), false));

        assert_eq!(visibility(&reg), before);
    }

    #[test]
    fn set_visible_touches_one_entry() {
        let mut reg = registry();
        assert!(reg.set_visible(ThematicLayer::Encroachment, Year(2021), true));
        let visible = reg.visible_keys();
        assert_eq!(visible.len(), 2);
        assert!(visible.contains(&LayerKey::new(ThematicLayer::Encroachment, Year(2021))));
    }

    #[test]
    fn entries_are_in_paint_order() {
        let reg = registry();
        let z: Vec<i32> = reg.entries().map(|e| e.z_index).collect();
        let mut sorted = z.clone();
        sorted.sort();
        assert_eq!(z, sorted);
        assert!(reg.boundary().z_index > *z.last().unwrap());
    }

    #[test]
    fn topmost_queryable_skips_unnamed_layers() {
        let mut reg = registry();
        reg.hide_all();
        reg.set_visible(ThematicLayer::BurnedForest, LayerTag::Frequency, true);
        assert!(reg.topmost_queryable().is_none());

        reg.set_visible(ThematicLayer::BurnedForest, Year(2020), true);
        reg.set_visible(ThematicLayer::BurnedForest, Year(2022), true);
        let top = reg.topmost_queryable().unwrap();
        assert_eq!(top.key, LayerKey::new(ThematicLayer::BurnedForest, Year(2022)));
    }
}
