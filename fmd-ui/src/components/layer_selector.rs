//! Radio group for the thematic category.

use crate::state::AppState;
use dioxus::prelude::*;
use fmd_core::layer::ThematicLayer;

#[component]
pub fn LayerSelector() -> Element {
    let state = use_context::<AppState>();
    let current = state.selection.read().selected_layer;

    rsx! {
        div {
            style: "display: flex; gap: 12px; align-items: center;",
            for layer in ThematicLayer::ALL {
                label {
                    key: "{layer.as_str()}",
                    style: "cursor: pointer;",
                    input {
                        r#type: "radio",
                        name: "thematic-layer",
                        value: "{layer.as_str()}",
                        checked: layer == current,
                        onchange: move |evt: Event<FormData>| {
                            let mut selection = state.selection;
                            match evt.value().parse::<ThematicLayer>() {
                                Ok(layer) => selection.write().set_layer(layer),
                                Err(e) => log::warn!("layer selector: {}", e),
                            }
                        },
                    }
                    " {layer.label()}"
                }
            }
        }
    }
}
