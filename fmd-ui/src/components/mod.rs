//! Reusable Dioxus RSX components for the forest dashboard.

mod basemap_selector;
mod district_selector;
mod error_display;
mod feature_popup;
mod header;
mod layer_selector;
mod legend;
mod loading_spinner;
mod map_container;
mod overlay_toggles;
mod stats_panel;
mod sub_header;
mod year_selector;

pub use basemap_selector::BasemapSelector;
pub use district_selector::DistrictSelector;
pub use error_display::ErrorDisplay;
pub use feature_popup::FeaturePopup;
pub use header::Header;
pub use layer_selector::LayerSelector;
pub use legend::Legend;
pub use loading_spinner::LoadingSpinner;
pub use map_container::MapContainer;
pub use overlay_toggles::OverlayToggles;
pub use stats_panel::StatsPanel;
pub use sub_header::SubHeader;
pub use year_selector::YearSelector;
