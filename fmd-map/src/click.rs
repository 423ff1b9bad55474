//! Map click handling.
//!
//! A click either lands on a vector feature (the boundary layer), which is
//! answered locally, or falls through to the top-most visible WMS layer,
//! which needs a GetFeatureInfo round trip. Each round trip carries a
//! [`RequestToken`]; only the response for the latest token may touch the
//! popup, so a slow answer to an old click can never overwrite a newer one.
//! Any later click, and closing the popup, retires the pending token.

use crate::highlight::HighlightLayer;
use crate::registry::LayerRegistry;
use fmd_core::boundary::{BoundaryFeature, BoundaryFeatureSet, DataCrs};
use fmd_core::catalog::CLICK_HIGHLIGHT_Z;
use fmd_core::layer::LayerKey;
use fmd_core::ows::FeatureInfoRequest;
use serde::Serialize;

pub const CLICK_HIGHLIGHT_ID: &str = "click-highlight";

/// Sequence number of a feature-info request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RequestToken(pub u64);

/// A click reported by the rendering engine.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickEvent {
    /// Clicked coordinate in EPSG:3857.
    pub coordinate: [f64; 2],
    /// View resolution at the time of the click, meters per pixel.
    pub resolution: f64,
    /// Vector feature under the pointer, if the engine hit one.
    pub vector_hit: Option<BoundaryFeature>,
}

/// The single popup shown over the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Popup {
    pub title: String,
    pub coordinate: [f64; 2],
    pub attributes: Vec<(String, String)>,
}

/// An in-flight GetFeatureInfo lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingFeatureInfo {
    pub token: RequestToken,
    pub layer: LayerKey,
    pub url: String,
    pub request: FeatureInfoRequest,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClickAction {
    /// Popup filled directly from a vector hit.
    Popup(Popup),
    /// The caller must fetch `url` and report back with the token.
    FetchFeatureInfo(PendingFeatureInfo),
    /// Nothing under the pointer can be queried.
    Nothing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureInfoOutcome {
    /// First feature of the response is now in the popup.
    Shown,
    /// Response had no usable feature; popup unchanged.
    Empty,
    /// A newer request has been issued since; response discarded.
    Stale,
    /// Fetch failed; popup unchanged.
    Failed,
}

/// Popup, click highlight and the feature-info sequencer.
#[derive(Debug, Clone)]
pub struct ClickState {
    next_token: u64,
    latest: Option<(RequestToken, String, [f64; 2])>,
    popup: Option<Popup>,
    highlight: HighlightLayer,
}

impl Default for ClickState {
    fn default() -> Self {
        Self {
            next_token: 1,
            latest: None,
            popup: None,
            highlight: HighlightLayer::new(CLICK_HIGHLIGHT_ID, CLICK_HIGHLIGHT_Z),
        }
    }
}

impl ClickState {
    pub fn popup(&self) -> Option<&Popup> {
        self.popup.as_ref()
    }

    pub fn highlight(&self) -> &HighlightLayer {
        &self.highlight
    }

    pub fn latest_token(&self) -> Option<RequestToken> {
        self.latest.as_ref().map(|(token, _, _)| *token)
    }

    pub fn click(
        &mut self,
        event: ClickEvent,
        registry: &LayerRegistry,
        wms_url: &str,
        title_attribute: &str,
    ) -> ClickAction {
        // Any newer click supersedes an in-flight lookup.
        self.latest = None;

        if let Some(feature) = event.vector_hit {
            let title = feature
                .attribute(title_attribute)
                .unwrap_or_else(|| registry.boundary().title.to_string());
            let popup = Popup {
                title,
                coordinate: event.coordinate,
                attributes: feature.display_attributes(),
            };
            // Vector hits come from the engine's own features, already in
            // map coordinates.
            self.highlight.replace(feature, DataCrs::WebMercator);
            self.popup = Some(popup.clone());
            return ClickAction::Popup(popup);
        }

        let Some(entry) = registry.topmost_queryable() else {
            log::debug!("click: no queryable layer visible");
            return ClickAction::Nothing;
        };
        let Some(layer_name) = entry.source.wms_layer_name() else {
            return ClickAction::Nothing;
        };

        let request = FeatureInfoRequest {
            layer_name: layer_name.to_string(),
            coordinate: event.coordinate,
            resolution: event.resolution,
        };
        let url = match request.url(wms_url) {
            Ok(url) => url,
            Err(e) => {
                log::warn!("click: cannot build GetFeatureInfo url: {}", e);
                return ClickAction::Nothing;
            }
        };

        let token = RequestToken(self.next_token);
        self.next_token += 1;
        self.latest = Some((token, entry.title.clone(), event.coordinate));
        log::debug!("click: feature info #{} on {}", token.0, entry.key);

        ClickAction::FetchFeatureInfo(PendingFeatureInfo {
            token,
            layer: entry.key,
            url,
            request,
        })
    }

    pub fn complete_feature_info(&mut self, token: RequestToken, body: &str) -> FeatureInfoOutcome {
        let Some((latest, title, coordinate)) = self.latest.clone() else {
            return FeatureInfoOutcome::Stale;
        };
        if token != latest {
            log::debug!("click: dropping stale feature info #{}", token.0);
            return FeatureInfoOutcome::Stale;
        }

        let set = match BoundaryFeatureSet::from_geojson(body) {
            Ok(set) => set,
            Err(e) => {
                log::warn!("click: unreadable feature info #{}: {}", token.0, e);
                return FeatureInfoOutcome::Empty;
            }
        };
        let crs = set.crs;
        let Some(feature) = set.features.into_iter().next() else {
            return FeatureInfoOutcome::Empty;
        };

        self.popup = Some(Popup {
            title,
            coordinate,
            attributes: feature.display_attributes(),
        });
        self.highlight.replace(feature, crs);
        FeatureInfoOutcome::Shown
    }

    pub fn fail_feature_info(&mut self, token: RequestToken) -> FeatureInfoOutcome {
        if self.latest_token() != Some(token) {
            return FeatureInfoOutcome::Stale;
        }
        log::warn!("click: feature info #{} failed", token.0);
        FeatureInfoOutcome::Failed
    }

    pub fn close_popup(&mut self) {
        self.latest = None;
        self.popup = None;
        self.highlight.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fmd_core::config::DashboardConfig;
    use fmd_core::layer::{LayerTag, ThematicLayer, Year};
    use serde_json::{Map, Value};

    const WMS: &str = "https://mlinfomap.org/geoserver/ForestDashboard/wms";

    const INFO_RESPONSE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "id": "burned.1",
                "geometry": { "type": "Point", "coordinates": [8800000.0, 2300000.0] },
                "properties": { "DN": 1, "Area_km2": 0.42 }
            }
        ],
        "crs": { "type": "name", "properties": { "name": "urn:ogc:def:crs:EPSG::3857" } }
    }"#;

    const EMPTY_RESPONSE: &str = r#"{ "type": "FeatureCollection", "features": [] }"#;

    fn registry_with_fire() -> LayerRegistry {
        let mut reg = LayerRegistry::build(&DashboardConfig::default());
        reg.hide_all();
        reg.set_visible(ThematicLayer::BurnedForest, Year(2021), true);
        reg.set_visible(ThematicLayer::BurnedForest, LayerTag::Frequency, true);
        reg
    }

    fn wms_click() -> ClickEvent {
        ClickEvent {
            coordinate: [8_800_000.0, 2_300_000.0],
            resolution: 4.0,
            vector_hit: None,
        }
    }

    fn fetch(state: &mut ClickState, reg: &LayerRegistry) -> PendingFeatureInfo {
        match state.click(wms_click(), reg, WMS, "District") {
            ClickAction::FetchFeatureInfo(pending) => pending,
            other => panic!("expected a fetch, got {:?}", other),
        }
    }

    #[test]
    fn vector_hit_fills_popup_directly() {
        let mut props = Map::new();
        props.insert("District".to_string(), Value::String("Gondia".to_string()));
        let feature = BoundaryFeature {
            id: Some("4District.3".to_string()),
            properties: props,
            geometry: Value::Null,
            extent: None,
        };
        let mut state = ClickState::default();
        let action = state.click(
            ClickEvent {
                vector_hit: Some(feature),
                ..wms_click()
            },
            &registry_with_fire(),
            WMS,
            "District",
        );

        let ClickAction::Popup(popup) = action else {
            panic!("expected popup");
        };
        assert_eq!(popup.title, "Gondia");
        assert_eq!(state.popup(), Some(&popup));
        assert_eq!(state.highlight().len(), 1);
        assert_eq!(state.latest_token(), None);
    }

    #[test]
    fn queries_topmost_named_layer() {
        let reg = registry_with_fire();
        let mut state = ClickState::default();
        let pending = fetch(&mut state, &reg);
        assert_eq!(pending.layer, LayerKey::new(ThematicLayer::BurnedForest, Year(2021)));
        assert_eq!(pending.request.layer_name, "ForestDashboard:MH4Dist_burned_forest_2021");
        assert!(pending.url.contains("GetFeatureInfo"));
    }

    #[test]
    fn nothing_when_no_layer_is_queryable() {
        let mut reg = registry_with_fire();
        reg.hide_all();
        let mut state = ClickState::default();
        assert_eq!(state.click(wms_click(), &reg, WMS, "District"), ClickAction::Nothing);
    }

    #[test]
    fn tokens_increase() {
        let reg = registry_with_fire();
        let mut state = ClickState::default();
        let a = fetch(&mut state, &reg).token;
        let b = fetch(&mut state, &reg).token;
        assert!(b > a);
    }

    #[test]
    fn stale_response_is_discarded() {
        let reg = registry_with_fire();
        let mut state = ClickState::default();
        let first = fetch(&mut state, &reg).token;
        let second = fetch(&mut state, &reg).token;

        assert_eq!(
            state.complete_feature_info(first, INFO_RESPONSE),
            FeatureInfoOutcome::Stale
        );
        assert!(state.popup().is_none());
        assert!(state.highlight().is_empty());

        assert_eq!(
            state.complete_feature_info(second, INFO_RESPONSE),
            FeatureInfoOutcome::Shown
        );
        let popup = state.popup().unwrap();
        assert_eq!(popup.title, "Fire Forest 2021");
        assert!(popup.attributes.contains(&("DN".to_string(), "1".to_string())));
        assert_eq!(state.highlight().crs(), DataCrs::WebMercator);
    }

    #[test]
    fn empty_or_failed_response_keeps_popup() {
        let reg = registry_with_fire();
        let mut state = ClickState::default();
        let token = fetch(&mut state, &reg).token;
        state.complete_feature_info(token, INFO_RESPONSE);
        let shown = state.popup().cloned();

        let token = fetch(&mut state, &reg).token;
        assert_eq!(
            state.complete_feature_info(token, EMPTY_RESPONSE),
            FeatureInfoOutcome::Empty
        );
        assert_eq!(state.complete_feature_info(token, "<html>"), FeatureInfoOutcome::Empty);
        assert_eq!(state.fail_feature_info(token), FeatureInfoOutcome::Failed);
        assert_eq!(state.popup().cloned(), shown);
    }

    fn boundary_click(name: &str) -> ClickEvent {
        let mut props = Map::new();
        props.insert("District".to_string(), Value::String(name.to_string()));
        ClickEvent {
            vector_hit: Some(BoundaryFeature {
                id: None,
                properties: props,
                geometry: Value::Null,
                extent: None,
            }),
            ..wms_click()
        }
    }

    #[test]
    fn boundary_click_supersedes_pending_lookup() {
        let reg = registry_with_fire();
        let mut state = ClickState::default();
        let token = fetch(&mut state, &reg).token;
        state.click(boundary_click("Gondia"), &reg, WMS, "District");

        assert_eq!(
            state.complete_feature_info(token, INFO_RESPONSE),
            FeatureInfoOutcome::Stale
        );
        assert_eq!(state.fail_feature_info(token), FeatureInfoOutcome::Stale);
        assert_eq!(state.popup().unwrap().title, "Gondia");
        assert_eq!(
            state.highlight().feature().unwrap().attribute("District").as_deref(),
            Some("Gondia")
        );
    }

    #[test]
    fn late_response_does_not_reopen_closed_popup() {
        let reg = registry_with_fire();
        let mut state = ClickState::default();
        let token = fetch(&mut state, &reg).token;
        state.close_popup();

        assert_eq!(state.latest_token(), None);
        assert_eq!(
            state.complete_feature_info(token, INFO_RESPONSE),
            FeatureInfoOutcome::Stale
        );
        assert!(state.popup().is_none());
        assert!(state.highlight().is_empty());
    }

    #[test]
    fn unqueryable_click_supersedes_pending_lookup() {
        let mut reg = registry_with_fire();
        let mut state = ClickState::default();
        let token = fetch(&mut state, &reg).token;

        reg.hide_all();
        assert_eq!(state.click(wms_click(), &reg, WMS, "District"), ClickAction::Nothing);
        assert_eq!(
            state.complete_feature_info(token, INFO_RESPONSE),
            FeatureInfoOutcome::Stale
        );
        assert!(state.popup().is_none());
    }

    #[test]
    fn close_clears_popup_and_highlight() {
        let reg = registry_with_fire();
        let mut state = ClickState::default();
        let token = fetch(&mut state, &reg).token;
        state.complete_feature_info(token, INFO_RESPONSE);
        state.close_popup();
        assert!(state.popup().is_none());
        assert!(state.highlight().is_empty());
    }
}
