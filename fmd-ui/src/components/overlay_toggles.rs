//! Manual fire frequency / human pressure switches.

use crate::state::AppState;
use dioxus::prelude::*;
use fmd_core::layer::Overlay;

#[component]
pub fn OverlayToggles() -> Element {
    let state = use_context::<AppState>();
    let overlays = state.selection.read().overlays;

    rsx! {
        div {
            style: "display: flex; gap: 10px; align-items: center;",
            for overlay in Overlay::ALL {
                label {
                    key: "{overlay.label()}",
                    style: "cursor: pointer;",
                    input {
                        r#type: "checkbox",
                        checked: overlays.get(overlay),
                        onchange: move |evt: Event<FormData>| {
                            let mut selection = state.selection;
                            selection.write().set_overlay(overlay, evt.checked());
                        },
                    }
                    " {overlay.label()}"
                }
            }
        }
    }
}
