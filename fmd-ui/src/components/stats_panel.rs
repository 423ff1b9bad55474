//! Four counters summarising the selected district and years.

use crate::state::AppState;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
struct CounterProps {
    label: &'static str,
    value: f64,
    color: &'static str,
}

#[component]
fn Counter(props: CounterProps) -> Element {
    let value = format!("{:.2}", props.value);
    rsx! {
        div {
            style: "flex: 1; min-width: 120px; padding: 8px 10px; background: white; border-left: 4px solid {props.color}; border-radius: 4px;",
            div { style: "font-size: 12px; color: #555;", "{props.label}" }
            div { style: "font-size: 20px; font-weight: bold;", "{value} km²" }
        }
    }
}

#[component]
pub fn StatsPanel() -> Element {
    let state = use_context::<AppState>();
    let totals = (state.totals)();
    let selection = state.selection.read().clone();

    let scope = selection
        .selected_district
        .clone()
        .unwrap_or_else(|| "All districts".to_string());
    let years = if selection.selected_years.is_empty() {
        "all years".to_string()
    } else {
        selection
            .years()
            .iter()
            .map(|y| y.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    };

    rsx! {
        div {
            style: "position: absolute; left: 16px; bottom: 40px; z-index: 10; width: 300px; padding: 10px; background: rgba(239,248,249,0.95); border-radius: 6px; box-shadow: 0 1px 4px rgba(0,0,0,0.3);",
            div {
                style: "font-weight: bold; margin-bottom: 6px;",
                "{scope} ({years})"
            }
            div {
                style: "display: flex; flex-wrap: wrap; gap: 6px;",
                Counter { label: "Burned Forest", value: totals.burned_km2, color: "#d84315" }
                Counter { label: "Encroachment", value: totals.encroach_km2, color: "#6d4c41" }
                Counter { label: "Fire in Biodiversity Zones", value: totals.fire_bio_km2, color: "#2e7d32" }
                Counter { label: "High Fire Risk", value: totals.fire_risk_km2, color: "#f9a825" }
            }
        }
    }
}
