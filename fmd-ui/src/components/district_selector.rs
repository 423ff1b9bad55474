//! Dropdown for zooming to a district.

use crate::state::AppState;
use dioxus::prelude::*;

#[component]
pub fn DistrictSelector() -> Element {
    let mut state = use_context::<AppState>();
    let districts = state.districts.read().clone();
    let selected = state.selection.read().selected_district.clone().unwrap_or_default();

    let on_change = move |evt: Event<FormData>| {
        state.selection.write().set_district(Some(evt.value()));
    };

    rsx! {
        div {
            style: "display: flex; gap: 8px; align-items: center;",
            label {
                r#for: "district-select",
                style: "font-weight: bold;",
                "District: "
            }
            select {
                id: "district-select",
                disabled: districts.is_empty(),
                onchange: on_change,
                option { value: "", selected: selected.is_empty(), "All districts" }
                for name in districts.iter() {
                    option {
                        key: "{name}",
                        value: "{name}",
                        selected: *name == selected,
                        "{name}"
                    }
                }
            }
        }
    }
}
