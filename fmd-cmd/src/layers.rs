//! `layers`: print the registry in paint order after reconciling a selection.

use fmd_core::config::DashboardConfig;
use fmd_core::layer::{Overlay, ThematicLayer, Year};
use fmd_core::ows;
use fmd_core::projection::{lon_lat_to_mercator, resolution_for_zoom, Extent};
use fmd_core::selection::SelectionState;
use fmd_map::MapController;
use log::info;

/// Preview image size for the printed GetMap URLs.
const PREVIEW_WIDTH: u32 = 1024;
const PREVIEW_HEIGHT: u32 = 768;

/// Extent of the initial view for a `width`×`height` pixel image.
pub fn initial_view_extent(config: &DashboardConfig, width: u32, height: u32) -> Extent {
    let center = lon_lat_to_mercator(config.center);
    let resolution = resolution_for_zoom(config.zoom);
    let half_w = resolution * f64::from(width) / 2.0;
    let half_h = resolution * f64::from(height) / 2.0;
    Extent::new(
        [center[0] - half_w, center[1] - half_h],
        [center[0] + half_w, center[1] + half_h],
    )
}

pub fn build_selection(
    layer: ThematicLayer,
    years: &[Year],
    frequency: bool,
    pressure: bool,
) -> SelectionState {
    let mut selection = SelectionState::new();
    selection.set_layer(layer);
    selection.set_years(years.iter().copied());
    selection.set_overlay(Overlay::FireFrequency, frequency);
    selection.set_overlay(Overlay::HumanPressure, pressure);
    selection
}

pub fn run_layers(
    config: &DashboardConfig,
    layer: ThematicLayer,
    years: &[Year],
    frequency: bool,
    pressure: bool,
) -> anyhow::Result<()> {
    let selection = build_selection(layer, years, frequency, pressure);
    let mut controller = MapController::new(config.clone());
    let changes = controller.apply_selection(&selection);
    info!("{} visibility change(s) from the default state", changes.len());

    let view = initial_view_extent(config, PREVIEW_WIDTH, PREVIEW_HEIGHT);

    println!("{:>4}  {:<7}  {:<18}  {:<32}  WMS layer", "z", "visible", "id", "title");
    // topmost first, the way the map stacks them
    for entry in controller.registry().entries().rev() {
        println!(
            "{:>4}  {:<7}  {:<18}  {:<32}  {}",
            entry.z_index,
            if entry.visible { "yes" } else { "-" },
            entry.id,
            entry.title,
            entry.source.wms_layer_name().unwrap_or("(unpublished)")
        );
    }

    let boundary = controller.registry().boundary();
    println!(
        "{:>4}  {:<7}  {:<18}  {:<32}  {}",
        boundary.z_index, "yes", boundary.id, boundary.title, config.boundary_type_name
    );

    for entry in controller.registry().entries().filter(|e| e.visible) {
        let Some(name) = entry.source.wms_layer_name() else {
            continue;
        };
        println!();
        println!("{}", entry.title);
        println!("  GetMap: {}", ows::get_map_url(&config.wms_url, name, &view, PREVIEW_WIDTH, PREVIEW_HEIGHT)?);
        println!("  Legend: {}", ows::legend_url(&config.wms_url, name)?);
    }
    Ok(())
}
