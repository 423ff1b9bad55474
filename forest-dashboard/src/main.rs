//! Forest Monitoring Dashboard
//!
//! OpenLayers map of forest cover, encroachment and burned forest rasters
//! served by GeoServer, with the district boundary layer on top.
//!
//! Data flow:
//! 1. On mount: build the map from the layer registry, load the embedded
//!    fire statistics into SQLite and fetch the district boundaries over WFS.
//! 2. On layer/year/overlay change: reconcile registry visibility and push
//!    only the changed layers to the map.
//! 3. On district change: highlight the district and fit the view to it.
//! 4. On map click: popup from the boundary feature, or a GetFeatureInfo
//!    lookup on the top-most visible layer.

use dioxus::prelude::*;
use fmd_core::boundary::BoundaryFeatureSet;
use fmd_core::ows;
use fmd_db::Database;
use fmd_map::{ClickAction, ClickEvent, FeatureInfoOutcome};
use fmd_ui::components::{
    BasemapSelector, ErrorDisplay, FeaturePopup, Header, Legend, LoadingSpinner, MapContainer,
    StatsPanel, SubHeader,
};
use fmd_ui::js_bridge::{self, OlViewport, MAP_TARGET_ID};
use fmd_ui::state::AppState;
use futures_util::StreamExt;

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("forest-dashboard-root"))
        .launch(App);
}

async fn fetch_boundaries(wfs_url: &str, type_name: &str) -> anyhow::Result<BoundaryFeatureSet> {
    let url = ows::get_feature_url(wfs_url, type_name)?;
    let body = js_bridge::fetch_text(&url).await?;
    BoundaryFeatureSet::from_geojson(&body)
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);

    // ─── Map clicks, forwarded from the JS handler ───
    let clicks = use_coroutine(move |mut rx: UnboundedReceiver<ClickEvent>| async move {
        while let Some(event) = rx.next().await {
            let action = state.controller.write().click(event);
            match action {
                ClickAction::Popup(_) => {
                    js_bridge::set_highlight(state.controller.peek().click_highlight());
                    state.sync_popup();
                }
                ClickAction::FetchFeatureInfo(pending) => {
                    spawn(async move {
                        let outcome = match js_bridge::fetch_text(&pending.url).await {
                            Ok(body) => state
                                .controller
                                .write()
                                .complete_feature_info(pending.token, &body),
                            Err(e) => {
                                log::warn!("feature info for {}: {}", pending.layer, e);
                                state.controller.write().fail_feature_info(pending.token)
                            }
                        };
                        if outcome == FeatureInfoOutcome::Shown {
                            js_bridge::set_highlight(state.controller.peek().click_highlight());
                            state.sync_popup();
                        }
                    });
                }
                ClickAction::Nothing => {}
            }
        }
    });

    // ─── Effect 1: mount. Map, statistics database, boundaries ───
    use_effect(move || {
        let init = js_bridge::map_init_json(
            &state.controller.peek(),
            MAP_TARGET_ID,
            *state.basemap.peek(),
        );
        js_bridge::init_map(&init);
        js_bridge::register_click_handler(move |event| clicks.send(event));

        match Database::with_embedded_records() {
            Ok(db) => state.db.set(Some(db)),
            Err(e) => {
                log::error!("statistics database: {}", e);
                state
                    .error_msg
                    .set(Some(format!("Failed to load fire statistics: {}", e)));
            }
        }

        let (wfs_url, type_name) = {
            let controller = state.controller.peek();
            let config = controller.config();
            (config.wfs_url.clone(), config.boundary_type_name.clone())
        };
        spawn(async move {
            match fetch_boundaries(&wfs_url, &type_name).await {
                Ok(set) => {
                    js_bridge::set_boundary_features(&set);
                    let district = state.selection.peek().selected_district.clone();
                    state
                        .controller
                        .write()
                        .load_boundaries(set, district.as_deref(), &mut OlViewport);
                    js_bridge::set_highlight(state.controller.peek().district_highlight());
                    let names = state.controller.peek().district_names();
                    state.districts.set(names);
                }
                Err(e) => {
                    log::error!("district boundaries: {}", e);
                    state
                        .error_msg
                        .set(Some(format!("Failed to load district boundaries: {}", e)));
                }
            }
            state.loading.set(false);
        });
    });

    // ─── Effect 2: layer/years/overlays → visibility ───
    use_effect(move || {
        let selection = state.selection.read().clone();
        let changes = state.controller.write().apply_selection(&selection);
        js_bridge::apply_visibility_changes(&changes);
    });

    // ─── Effect 3: district → highlight + fit ───
    // The memo only fires when the district itself changes, so toggling a
    // year never moves the view.
    let district = use_memo(move || state.selection.read().selected_district.clone());
    use_effect(move || {
        let district = district();
        let outcome = state
            .controller
            .write()
            .highlight_district(district.as_deref(), &mut OlViewport);
        log::info!("district highlight: {:?}", outcome);
        js_bridge::set_highlight(state.controller.peek().district_highlight());
    });

    // ─── Effect 4: statistics for the selected district and years ───
    let stats_scope = use_memo(move || {
        let selection = state.selection.read();
        (selection.selected_district.clone(), selection.years())
    });
    use_effect(move || {
        let (district, years) = stats_scope();
        let Some(db) = state.db.read().clone() else {
            return;
        };
        match db.query_fire_totals(district.as_deref(), &years) {
            Ok(totals) => state.totals.set(totals),
            Err(e) => log::warn!("fire totals: {}", e),
        }
    });

    // ─── Render ───
    rsx! {
        div {
            style: "min-height: 100vh; background: #f3f4f6; font-family: system-ui, -apple-system, sans-serif;",

            Header {}
            SubHeader {}

            if let Some(err) = state.error_msg.read().as_ref() {
                ErrorDisplay {
                    message: err.clone(),
                    on_dismiss: move |_| state.error_msg.set(None),
                }
            }

            MapContainer {
                BasemapSelector {}
                if *state.loading.read() {
                    LoadingSpinner {}
                }
                StatsPanel {}
                Legend {}
                FeaturePopup {}
            }
        }
    }
}
