//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! The OpenLayers map lives in `assets/js/forest-map.js`, evaluated as
//! globals once the `ol` bundle has loaded. Calls made before the map exists
//! are queued on `window.__fmdQueue` and replayed in order after init, so a
//! visibility change issued during the first render is never lost.

use fmd_core::basemap::Basemap;
use fmd_core::boundary::{BoundaryFeatureSet, DataCrs};
use fmd_core::ows::TileParams;
use fmd_core::projection::Extent;
use fmd_map::{ClickEvent, FitOptions, HighlightLayer, MapController, Viewport, VisibilityChange};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

static FOREST_MAP_JS: &str = include_str!("../assets/js/forest-map.js");

/// DOM id of the map target div.
pub const MAP_TARGET_ID: &str = "forest-map";

/// OpenLayers full build, injected when the host page has not loaded it.
const OL_JS_URL: &str = "https://cdn.jsdelivr.net/npm/ol@v10.2.1/dist/ol.js";
const OL_CSS_URL: &str = "https://cdn.jsdelivr.net/npm/ol@v10.2.1/ol.css";

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('FMD JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Run `body` against the map, now if it exists, otherwise after init.
fn call_map(body: &str) {
    call_js(&format!(
        r#"
        (function() {{
            var f = function() {{ {body} }};
            window.__fmdQueue = window.__fmdQueue || [];
            if (window.__fmdMapReady) {{ f(); }} else {{ window.__fmdQueue.push(f); }}
        }})();
        "#,
    ));
}

fn js_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}

fn data_projection(crs: DataCrs) -> &'static str {
    match crs {
        DataCrs::LonLat => "EPSG:4326",
        DataCrs::WebMercator => "EPSG:3857",
    }
}

#[derive(Serialize)]
struct LayerInit<'a> {
    id: &'a str,
    /// `None` for layers GeoServer does not publish yet
    params: Option<TileParams>,
    visible: bool,
    z_index: i32,
    opacity: f32,
}

#[derive(Serialize)]
struct BoundaryInit<'a> {
    id: &'a str,
    z_index: i32,
}

#[derive(Serialize)]
struct HighlightInit<'a> {
    id: &'a str,
    z_index: i32,
    color: &'a str,
    fill: Option<&'a str>,
}

#[derive(Serialize)]
struct MapInit<'a> {
    target: &'a str,
    center: [f64; 2],
    zoom: f64,
    basemap_url: &'a str,
    wms_url: &'a str,
    layers: Vec<LayerInit<'a>>,
    boundary: BoundaryInit<'a>,
    highlights: Vec<HighlightInit<'a>>,
}

/// JSON handed to `fmdInitMap`: every registry entry, the boundary layer
/// and both highlight layers with their paint order.
pub fn map_init_json(controller: &MapController, target: &str, basemap: Basemap) -> String {
    let config = controller.config();
    let boundary = controller.registry().boundary();
    let district = controller.district_highlight();
    let click = controller.click_highlight();

    let init = MapInit {
        target,
        center: config.center,
        zoom: config.zoom,
        basemap_url: basemap.url_template(),
        wms_url: &config.wms_url,
        layers: controller
            .registry()
            .entries()
            .map(|e| LayerInit {
                id: &e.id,
                params: e.source.wms_layer_name().map(TileParams::new),
                visible: e.visible,
                z_index: e.z_index,
                opacity: e.opacity,
            })
            .collect(),
        boundary: BoundaryInit {
            id: boundary.id,
            z_index: boundary.z_index,
        },
        highlights: vec![
            HighlightInit {
                id: click.id,
                z_index: click.z_index,
                color: "#00e5ff",
                fill: Some("rgba(0, 229, 255, 0.15)"),
            },
            HighlightInit {
                id: district.id,
                z_index: district.z_index,
                color: "#ffd600",
                fill: None,
            },
        ],
    };
    serde_json::to_string(&init).unwrap_or_default()
}

/// Wait for OpenLayers and the target div, evaluate the map script at
/// global scope, build the map and drain the queued calls.
///
/// Safe to call more than once; only the first call builds the map.
pub fn init_map(init_json: &str) {
    let store_js = format!("window.__fmdMapScript = {};", js_string(FOREST_MAP_JS));
    let _ = js_sys::eval(&store_js);

    call_js(&format!(
        r#"
        (function() {{
            if (window.__fmdMapReady || window.__fmdMapPolling) {{ return; }}
            window.__fmdMapPolling = true;
            var cfg = {init_json};
            if (typeof ol === 'undefined' && !document.getElementById('fmd-ol-script')) {{
                var css = document.createElement('link');
                css.rel = 'stylesheet';
                css.href = '{OL_CSS_URL}';
                document.head.appendChild(css);
                var script = document.createElement('script');
                script.id = 'fmd-ol-script';
                script.src = '{OL_JS_URL}';
                document.head.appendChild(script);
            }}
            var poll = setInterval(function() {{
                if (typeof ol !== 'undefined' && document.getElementById(cfg.target)) {{
                    clearInterval(poll);
                    (0, eval)(window.__fmdMapScript);
                    delete window.__fmdMapScript;
                    try {{
                        fmdInitMap(cfg);
                    }} catch(e) {{ console.error('[FMD] fmdInitMap error:', e); return; }}
                    window.__fmdMapReady = true;
                    var queue = window.__fmdQueue || [];
                    window.__fmdQueue = [];
                    queue.forEach(function(f) {{
                        try {{ f(); }} catch(e) {{ console.warn('[FMD] queued call failed:', e); }}
                    }});
                    console.log('FMD map initialized');
                }}
            }}, 100);
        }})();
        "#,
    ));
}

pub fn set_layer_visibility(id: &str, visible: bool) {
    call_map(&format!("fmdSetLayerVisibility({}, {});", js_string(id), visible));
}

/// Push reconciler output to the map.
pub fn apply_visibility_changes(changes: &[VisibilityChange]) {
    for change in changes {
        set_layer_visibility(&change.key.id(), change.visible);
    }
}

pub fn set_boundary_features(set: &BoundaryFeatureSet) {
    call_map(&format!(
        "fmdSetBoundaries({}, {});",
        set.to_geojson(),
        js_string(data_projection(set.crs))
    ));
}

/// Replace the contents of a highlight layer on the map.
pub fn set_highlight(layer: &HighlightLayer) {
    call_map(&format!(
        "fmdSetHighlight({}, {}, {});",
        js_string(layer.id),
        layer.to_geojson(),
        js_string(data_projection(layer.crs()))
    ));
}

pub fn fit_extent(extent: Extent, options: FitOptions) {
    let [min_x, min_y, max_x, max_y] = extent.to_array();
    call_map(&format!(
        "fmdFitExtent([{min_x}, {min_y}, {max_x}, {max_y}], {}, {});",
        options.padding, options.duration_ms
    ));
}

pub fn set_basemap(basemap: Basemap) {
    call_map(&format!("fmdSetBasemap({});", js_string(basemap.url_template())));
}

/// Viewport backed by the OpenLayers view.
pub struct OlViewport;

impl Viewport for OlViewport {
    fn fit_extent(&mut self, extent: Extent, options: FitOptions) {
        fit_extent(extent, options);
    }
}

#[derive(Deserialize)]
struct ClickPayload {
    coordinate: [f64; 2],
    resolution: f64,
    #[serde(default)]
    hit: Option<serde_json::Value>,
}

/// Decode the JSON the map's `singleclick` handler sends.
pub fn parse_click_payload(json: &str) -> anyhow::Result<ClickEvent> {
    let payload: ClickPayload = serde_json::from_str(json)?;
    let vector_hit = match payload.hit {
        Some(feature) => {
            let collection = serde_json::json!({
                "type": "FeatureCollection",
                "features": [feature],
            });
            BoundaryFeatureSet::from_geojson(&collection.to_string())?
                .features
                .into_iter()
                .next()
        }
        None => None,
    };
    Ok(ClickEvent {
        coordinate: payload.coordinate,
        resolution: payload.resolution,
        vector_hit,
    })
}

/// Route map clicks to `on_click`. Undecodable payloads are logged and dropped.
pub fn register_click_handler(mut on_click: impl FnMut(ClickEvent) + 'static) {
    let closure = Closure::<dyn FnMut(String)>::new(move |json: String| {
        match parse_click_payload(&json) {
            Ok(event) => on_click(event),
            Err(e) => log::warn!("map click: bad payload: {}", e),
        }
    });
    if let Err(e) = js_sys::Reflect::set(
        &js_sys::global(),
        &JsValue::from_str("__fmdOnClick"),
        closure.as_ref(),
    ) {
        log::error!("map click: cannot register handler: {:?}", e);
    }
    // The handler lives as long as the page.
    closure.forget();
}

/// GET `url` and return the body text.
pub async fn fetch_text(url: &str) -> anyhow::Result<String> {
    let window = web_sys::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow::anyhow!("fetch {} failed: {:?}", url, e))?;
    let response: web_sys::Response = response
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("fetch {}: not a Response: {:?}", url, e))?;
    if !response.ok() {
        anyhow::bail!("fetch {}: HTTP {}", url, response.status());
    }
    let text = response
        .text()
        .map_err(|e| anyhow::anyhow!("fetch {}: {:?}", url, e))?;
    let text = JsFuture::from(text)
        .await
        .map_err(|e| anyhow::anyhow!("fetch {}: {:?}", url, e))?;
    text.as_string()
        .ok_or_else(|| anyhow::anyhow!("fetch {}: body is not text", url))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fmd_core::config::DashboardConfig;

    #[test]
    fn click_payload_without_hit() {
        let event =
            parse_click_payload(r#"{"coordinate":[8800000.5,2300000.0],"resolution":19.1,"hit":null}"#)
                .unwrap();
        assert_eq!(event.coordinate, [8_800_000.5, 2_300_000.0]);
        assert!(event.vector_hit.is_none());
    }

    #[test]
    fn click_payload_with_boundary_hit() {
        let json = r#"{
            "coordinate": [8900000.0, 2400000.0],
            "resolution": 38.2,
            "hit": {
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [8900000.0, 2400000.0] },
                "properties": { "District": "Gondia" }
            }
        }"#;
        let event = parse_click_payload(json).unwrap();
        let hit = event.vector_hit.unwrap();
        assert_eq!(hit.attribute("District").as_deref(), Some("Gondia"));
    }

    #[test]
    fn init_json_lists_every_layer() {
        let controller = MapController::new(DashboardConfig::default());
        let json = map_init_json(&controller, MAP_TARGET_ID, Basemap::Osm);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let layers = value["layers"].as_array().unwrap();
        assert_eq!(layers.len(), 12);
        assert_eq!(layers[0]["params"]["LAYERS"], "ForestDashboard:ForestCover_2000");
        assert!(layers.iter().any(|l| l["params"].is_null()));
        assert_eq!(value["target"], "forest-map");
        assert_eq!(value["highlights"].as_array().unwrap().len(), 2);
        assert!(value["boundary"]["z_index"].as_i64().unwrap() > 900);
    }
}
