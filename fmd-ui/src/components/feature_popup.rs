//! Attribute popup for the last clicked feature.

use crate::js_bridge;
use crate::state::AppState;
use dioxus::prelude::*;

#[component]
pub fn FeaturePopup() -> Element {
    let mut state = use_context::<AppState>();
    let Some(popup) = (state.popup)() else {
        return rsx! {};
    };

    let on_close = move |_| {
        state.controller.write().close_popup();
        js_bridge::set_highlight(state.controller.read().click_highlight());
        state.sync_popup();
    };

    rsx! {
        div {
            style: "position: absolute; top: 64px; right: 16px; z-index: 15; width: 280px; max-height: 60%; overflow-y: auto; background: white; border-radius: 6px; box-shadow: 0 2px 8px rgba(0,0,0,0.35);",
            div {
                style: "display: flex; justify-content: space-between; align-items: center; padding: 6px 10px; background: #0fa4af; color: white; border-radius: 6px 6px 0 0;",
                strong { "{popup.title}" }
                button {
                    style: "background: none; border: none; color: white; font-size: 18px; cursor: pointer;",
                    onclick: on_close,
                    "×"
                }
            }
            if popup.attributes.is_empty() {
                p { style: "padding: 8px 10px; margin: 0; color: #666;", "No attributes" }
            } else {
                table {
                    style: "width: 100%; border-collapse: collapse; font-size: 12px;",
                    tbody {
                        for (name, value) in popup.attributes.iter() {
                            tr {
                                key: "{name}",
                                td { style: "padding: 3px 10px; color: #555; border-bottom: 1px solid #eee;", "{name}" }
                                td { style: "padding: 3px 10px; border-bottom: 1px solid #eee;", "{value}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
