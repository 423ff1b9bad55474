//! Legend graphics for the visible WMS layers, topmost first.

use crate::state::AppState;
use dioxus::prelude::*;
use fmd_core::ows;

#[component]
pub fn Legend() -> Element {
    let state = use_context::<AppState>();
    let controller = state.controller.read();
    let wms_url = controller.config().wms_url.clone();

    let items: Vec<(String, String)> = controller
        .registry()
        .entries()
        .rev()
        .filter(|e| e.visible)
        .filter_map(|e| {
            let name = e.source.wms_layer_name()?;
            match ows::legend_url(&wms_url, name) {
                Ok(url) => Some((e.title.clone(), url)),
                Err(err) => {
                    log::warn!("legend: {}: {}", name, err);
                    None
                }
            }
        })
        .collect();
    drop(controller);

    if items.is_empty() {
        return rsx! {};
    }

    rsx! {
        div {
            style: "position: absolute; right: 16px; bottom: 40px; z-index: 10; max-height: 50%; overflow-y: auto; padding: 8px 10px; background: rgba(255,255,255,0.92); border-radius: 6px; box-shadow: 0 1px 4px rgba(0,0,0,0.3);",
            div { style: "font-weight: bold; margin-bottom: 4px;", "Legend" }
            for (title, url) in items {
                div {
                    key: "{title}",
                    style: "margin: 4px 0;",
                    div { style: "font-size: 12px;", "{title}" }
                    img { src: "{url}", alt: "{title}" }
                }
            }
        }
    }
}
