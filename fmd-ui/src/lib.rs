//! Shared Dioxus components and OpenLayers bridge for the forest dashboard.
//!
//! - `js_bridge`: Rust wrappers for the map functions in `assets/js/forest-map.js`
//! - `state`: reactive `AppState` with Dioxus Signals
//! - `components`: header, selectors, legend, popup and map container

pub mod components;
pub mod js_bridge;
pub mod state;
