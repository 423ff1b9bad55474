//! Selection store behind the layer, year and district controls.
//!
//! The store performs no cross-field validation. Every combination of layer,
//! years and district is representable, including an empty year set.

use crate::layer::{Overlay, ThematicLayer, Year};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Manual overrides for the fire auxiliary overlays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overlays {
    pub fire_frequency: bool,
    pub human_pressure: bool,
}

impl Overlays {
    pub fn get(&self, overlay: Overlay) -> bool {
        match overlay {
            Overlay::FireFrequency => self.fire_frequency,
            Overlay::HumanPressure => self.human_pressure,
        }
    }
}

/// Current selection of the dashboard controls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    pub selected_layer: ThematicLayer,
    pub selected_years: BTreeSet<Year>,
    pub selected_district: Option<String>,
    pub overlays: Overlays,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch the thematic layer. Years and district are kept.
    pub fn set_layer(&mut self, layer: ThematicLayer) {
        self.selected_layer = layer;
    }

    /// Replace the whole year set.
    pub fn set_years<I>(&mut self, years: I)
    where
        I: IntoIterator<Item = Year>,
    {
        self.selected_years = years.into_iter().collect();
    }

    /// Add `year` if absent, remove it if present.
    ///
    /// Returns `true` if the year is selected afterwards.
    pub fn toggle_year(&mut self, year: Year) -> bool {
        if self.selected_years.remove(&year) {
            false
        } else {
            self.selected_years.insert(year);
            true
        }
    }

    pub fn is_year_selected(&self, year: Year) -> bool {
        self.selected_years.contains(&year)
    }

    /// Replace the district. A blank name clears it.
    pub fn set_district(&mut self, district: Option<String>) {
        self.selected_district = district
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
    }

    pub fn set_overlay(&mut self, overlay: Overlay, enabled: bool) {
        match overlay {
            Overlay::FireFrequency => self.overlays.fire_frequency = enabled,
            Overlay::HumanPressure => self.overlays.human_pressure = enabled,
        }
    }

    /// Selected years in ascending order.
    pub fn years(&self) -> Vec<Year> {
        self.selected_years.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_twice_restores_original_set() {
        let mut state = SelectionState::new();
        state.set_years([Year(2020), Year(2022)]);
        let original = state.selected_years.clone();

        for year in [Year(2020), Year(2021), Year(2022)] {
            assert_eq!(state.toggle_year(year), !original.contains(&year));
            state.toggle_year(year);
            assert_eq!(state.selected_years, original);
        }
    }

    #[test]
    fn switching_layer_keeps_years_and_district() {
        let mut state = SelectionState::new();
        assert_eq!(state.selected_layer, ThematicLayer::ForestCover);
        state.toggle_year(Year(2021));
        state.set_district(Some("Chandrapur".to_string()));

        state.set_layer(ThematicLayer::Encroachment);

        assert_eq!(state.selected_layer, ThematicLayer::Encroachment);
        assert_eq!(state.years(), vec![Year(2021)]);
        assert_eq!(state.selected_district.as_deref(), Some("Chandrapur"));
    }

    #[test]
    fn set_years_replaces_whole_set() {
        let mut state = SelectionState::new();
        state.set_years([Year(2020), Year(2021)]);
        state.set_years([Year(2022)]);
        assert_eq!(state.years(), vec![Year(2022)]);
        state.set_years([]);
        assert!(state.selected_years.is_empty());
    }

    #[test]
    fn blank_district_clears_selection() {
        let mut state = SelectionState::new();
        state.set_district(Some("Gondia".to_string()));
        state.set_district(Some("   ".to_string()));
        assert_eq!(state.selected_district, None);
    }

    #[test]
    fn overlays_are_independent() {
        let mut state = SelectionState::new();
        state.set_overlay(Overlay::HumanPressure, true);
        assert!(state.overlays.get(Overlay::HumanPressure));
        assert!(!state.overlays.get(Overlay::FireFrequency));
    }
}
