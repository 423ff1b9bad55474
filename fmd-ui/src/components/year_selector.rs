//! Year checkboxes. Each click toggles one year in or out of the selection.

use crate::state::AppState;
use dioxus::prelude::*;
use fmd_core::layer::Year;

#[component]
pub fn YearSelector() -> Element {
    let state = use_context::<AppState>();
    let selection = state.selection.read().clone();

    rsx! {
        div {
            style: "display: flex; gap: 10px; align-items: center;",
            span { style: "font-weight: bold;", "Year:" }
            for year in Year::SELECTABLE {
                label {
                    key: "{year}",
                    style: "cursor: pointer;",
                    input {
                        r#type: "checkbox",
                        checked: selection.is_year_selected(year),
                        onchange: move |_| {
                            let mut selection = state.selection;
                            selection.write().toggle_year(year);
                        },
                    }
                    " {year}"
                }
            }
        }
    }
}
