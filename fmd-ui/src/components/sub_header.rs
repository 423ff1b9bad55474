//! Control bar under the title: layer, years, district and overlays.

use super::{DistrictSelector, LayerSelector, OverlayToggles, YearSelector};
use dioxus::prelude::*;

#[component]
pub fn SubHeader() -> Element {
    rsx! {
        div {
            style: "display: flex; flex-wrap: wrap; gap: 24px; align-items: center; padding: 8px 48px; background: #eff8f9; border-bottom: 1px solid #cde7ea;",
            LayerSelector {}
            YearSelector {}
            DistrictSelector {}
            OverlayToggles {}
        }
    }
}
