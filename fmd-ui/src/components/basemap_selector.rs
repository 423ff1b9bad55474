//! Basemap dropdown shown over the map's top-right corner.

use crate::js_bridge;
use crate::state::AppState;
use dioxus::prelude::*;
use fmd_core::basemap::Basemap;

#[component]
pub fn BasemapSelector() -> Element {
    let mut state = use_context::<AppState>();
    let current = (state.basemap)();

    let on_change = move |evt: Event<FormData>| match evt.value().parse::<Basemap>() {
        Ok(basemap) => {
            js_bridge::set_basemap(basemap);
            state.basemap.set(basemap);
        }
        Err(e) => log::warn!("basemap selector: {}", e),
    };

    rsx! {
        div {
            style: "position: absolute; right: 16px; top: 16px; z-index: 10; background: #eff8f9; padding: 4px 8px; border-radius: 4px; box-shadow: 0 1px 3px rgba(0,0,0,0.3);",
            select {
                style: "background: #eff8f9; border: none; padding: 4px 8px; cursor: pointer;",
                onchange: on_change,
                for basemap in Basemap::ALL {
                    option {
                        key: "{basemap.as_str()}",
                        value: "{basemap.as_str()}",
                        selected: basemap == current,
                        "{basemap.label()}"
                    }
                }
            }
        }
    }
}
