//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.

use fmd_core::basemap::Basemap;
use fmd_core::config::DashboardConfig;
use fmd_core::selection::SelectionState;
use fmd_db::models::FireTotals;
use fmd_db::Database;
use fmd_map::{MapController, Popup};
use dioxus::prelude::*;

/// Shared application state for the dashboard.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Statistics database (None until loaded)
    pub db: Signal<Option<Database>>,
    /// Whether the boundaries are still loading
    pub loading: Signal<bool>,
    /// Error banner text
    pub error_msg: Signal<Option<String>>,
    /// Layer, years, district and overlay choices
    pub selection: Signal<SelectionState>,
    /// Registry, highlights and click sequencing
    pub controller: Signal<MapController>,
    /// Mirror of the controller's popup for rendering
    pub popup: Signal<Option<Popup>>,
    /// District names from the boundary layer
    pub districts: Signal<Vec<String>>,
    pub basemap: Signal<Basemap>,
    /// Statistics for the current district and years
    pub totals: Signal<FireTotals>,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_config(DashboardConfig::default())
    }

    pub fn with_config(config: DashboardConfig) -> Self {
        let basemap = config.basemap;
        Self {
            db: Signal::new(None),
            loading: Signal::new(true),
            error_msg: Signal::new(None),
            selection: Signal::new(SelectionState::new()),
            controller: Signal::new(MapController::new(config)),
            popup: Signal::new(None),
            districts: Signal::new(Vec::new()),
            basemap: Signal::new(basemap),
            totals: Signal::new(FireTotals::default()),
        }
    }

    /// Copy the controller's popup into the rendered signal.
    pub fn sync_popup(&mut self) {
        let popup = self.controller.read().popup().cloned();
        self.popup.set(popup);
    }
}
