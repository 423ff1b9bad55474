//! Selection state to map state.
//!
//! [`MapController`] is the only thing that flips registry visibility or
//! touches the district highlight. The UI calls [`MapController::apply_selection`]
//! whenever the layer, years or overlays change and
//! [`MapController::highlight_district`] only when the district changes, so
//! a year toggle never re-fits the view.

use crate::click::{ClickAction, ClickEvent, ClickState, FeatureInfoOutcome, Popup, RequestToken};
use crate::highlight::HighlightLayer;
use crate::registry::LayerRegistry;
use crate::viewport::{FitOptions, Viewport};
use fmd_core::boundary::BoundaryFeatureSet;
use fmd_core::catalog::DISTRICT_HIGHLIGHT_Z;
use fmd_core::config::DashboardConfig;
use fmd_core::layer::{LayerKey, LayerTag, Overlay, ThematicLayer, Year};
use fmd_core::projection::Extent;
use fmd_core::selection::SelectionState;
use serde::Serialize;

pub const DISTRICT_HIGHLIGHT_ID: &str = "district-highlight";

/// One registry entry whose visibility flipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VisibilityChange {
    pub key: LayerKey,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HighlightOutcome {
    /// No district selected; highlight emptied.
    Cleared,
    /// The district's feature is highlighted and the view fitted to
    /// `extent` (map coordinates).
    Highlighted { name: String, extent: Extent },
    /// No boundary feature with a geometry carries that name.
    NotFound,
    /// Boundaries have not arrived yet.
    NotLoaded,
}

#[derive(Debug, Clone)]
pub struct MapController {
    config: DashboardConfig,
    registry: LayerRegistry,
    boundaries: Option<BoundaryFeatureSet>,
    district_highlight: HighlightLayer,
    click: ClickState,
}

impl MapController {
    pub fn new(config: DashboardConfig) -> Self {
        let registry = LayerRegistry::build(&config);
        Self {
            config,
            registry,
            boundaries: None,
            district_highlight: HighlightLayer::new(DISTRICT_HIGHLIGHT_ID, DISTRICT_HIGHLIGHT_Z),
            click: ClickState::default(),
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn registry(&self) -> &LayerRegistry {
        &self.registry
    }

    pub fn boundaries(&self) -> Option<&BoundaryFeatureSet> {
        self.boundaries.as_ref()
    }

    pub fn district_highlight(&self) -> &HighlightLayer {
        &self.district_highlight
    }

    pub fn click_highlight(&self) -> &HighlightLayer {
        self.click.highlight()
    }

    pub fn popup(&self) -> Option<&Popup> {
        self.click.popup()
    }

    /// District names from the loaded boundaries, sorted.
    pub fn district_names(&self) -> Vec<String> {
        let mut names = self
            .boundaries
            .as_ref()
            .map(|b| b.names(&self.config.district_attribute))
            .unwrap_or_default();
        names.sort();
        names
    }

    fn fit_options(&self) -> FitOptions {
        FitOptions::from_config(&self.config)
    }

    /// Recompute thematic visibility from `selection`.
    ///
    /// Returns the entries whose flag actually changed, in paint order.
    pub fn apply_selection(&mut self, selection: &SelectionState) -> Vec<VisibilityChange> {
        let before: Vec<(LayerKey, bool)> =
            self.registry.entries().map(|e| (e.key, e.visible)).collect();

        self.registry.hide_all();

        let layer = selection.selected_layer;
        let years = selection.years();
        match layer {
            ThematicLayer::ForestCover if years.is_empty() => {
                self.registry.set_visible(layer, Year::BASELINE, true);
            }
            ThematicLayer::ForestCover | ThematicLayer::Encroachment => {
                for year in &years {
                    self.registry.set_visible(layer, *year, true);
                }
            }
            ThematicLayer::BurnedForest => {
                for year in &years {
                    self.registry.set_visible(layer, *year, true);
                }
                self.registry.set_visible(layer, LayerTag::Frequency, true);
            }
        }

        for overlay in Overlay::ALL {
            if selection.overlays.get(overlay) {
                self.registry.set_key_visible(&overlay.layer_key(), true);
            }
        }

        let changes: Vec<VisibilityChange> = self
            .registry
            .entries()
            .zip(before)
            .filter(|(entry, (_, was))| entry.visible != *was)
            .map(|(entry, _)| VisibilityChange {
                key: entry.key,
                visible: entry.visible,
            })
            .collect();

        log::debug!(
            "reconciler: {} with {} year(s), {} change(s)",
            layer,
            years.len(),
            changes.len()
        );
        changes
    }

    /// Highlight and zoom to `district`.
    ///
    /// The viewport is fitted at most once, and only on a match.
    pub fn highlight_district(
        &mut self,
        district: Option<&str>,
        viewport: &mut dyn Viewport,
    ) -> HighlightOutcome {
        self.district_highlight.clear();

        let Some(name) = district else {
            return HighlightOutcome::Cleared;
        };
        let Some(boundaries) = self.boundaries.as_ref() else {
            log::debug!("reconciler: boundaries not loaded, deferring {}", name);
            return HighlightOutcome::NotLoaded;
        };
        let Some(feature) = boundaries.find(&self.config.district_attribute, name) else {
            log::info!("reconciler: no boundary named {}", name);
            return HighlightOutcome::NotFound;
        };

        let Some(extent) = feature.extent.map(|e| boundaries.to_map_extent(&e)) else {
            log::warn!("reconciler: boundary {} has no geometry", name);
            return HighlightOutcome::NotFound;
        };
        self.district_highlight.replace(feature.clone(), boundaries.crs);
        viewport.fit_extent(extent, self.fit_options());

        HighlightOutcome::Highlighted {
            name: name.to_string(),
            extent,
        }
    }

    /// Store freshly fetched boundaries and fit the view to them once.
    ///
    /// A district chosen before the boundaries arrived is highlighted right
    /// after, so its fit wins.
    pub fn load_boundaries(
        &mut self,
        set: BoundaryFeatureSet,
        current_district: Option<&str>,
        viewport: &mut dyn Viewport,
    ) -> HighlightOutcome {
        if let Some(extent) = set.extent() {
            viewport.fit_extent(set.to_map_extent(&extent), self.fit_options());
        }
        log::info!("reconciler: loaded {} boundary features", set.len());
        self.boundaries = Some(set);
        self.highlight_district(current_district, viewport)
    }

    pub fn click(&mut self, event: ClickEvent) -> ClickAction {
        self.click.click(
            event,
            &self.registry,
            &self.config.wms_url,
            &self.config.district_attribute,
        )
    }

    pub fn complete_feature_info(&mut self, token: RequestToken, body: &str) -> FeatureInfoOutcome {
        self.click.complete_feature_info(token, body)
    }

    pub fn fail_feature_info(&mut self, token: RequestToken) -> FeatureInfoOutcome {
        self.click.fail_feature_info(token)
    }

    pub fn close_popup(&mut self) {
        self.click.close_popup();
    }
}
