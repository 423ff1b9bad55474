//! Subcommands that call GeoServer.

use fmd_core::client::OwsClient;
use fmd_core::config::DashboardConfig;
use fmd_core::layer::{LayerKey, ThematicLayer, Year};
use fmd_core::ows::FeatureInfoRequest;
use fmd_core::projection::{lon_lat_to_mercator, resolution_for_zoom};
use fmd_map::LayerRegistry;
use log::info;

fn client(config: DashboardConfig) -> anyhow::Result<OwsClient> {
    let http = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(60))
        .build()?;
    Ok(OwsClient::new(http, config))
}

/// `districts`: list district names with their extents.
pub async fn run_districts(config: DashboardConfig) -> anyhow::Result<()> {
    let attribute = config.district_attribute.clone();
    let client = client(config)?;
    let set = client.fetch_boundaries().await?;

    let mut rows: Vec<(String, String)> = set
        .features
        .iter()
        .map(|f| {
            let name = f
                .attribute(&attribute)
                .unwrap_or_else(|| "(unnamed)".to_string());
            let extent = f
                .extent
                .map(|e| {
                    let [a, b, c, d] = e.to_array();
                    format!("{:.4}, {:.4}, {:.4}, {:.4}", a, b, c, d)
                })
                .unwrap_or_else(|| "(no geometry)".to_string());
            (name, extent)
        })
        .collect();
    rows.sort();

    for (name, extent) in &rows {
        println!("{:<20} {}", name, extent);
    }
    if let Some(extent) = set.extent() {
        println!("{:<20} {}", "(all)", extent.to_bbox_string());
    }
    info!("{} district features", rows.len());
    Ok(())
}

/// Build the GetFeatureInfo request the map would issue for a click at
/// `lon_lat` on `layer`/`year`.
pub fn feature_info_request(
    config: &DashboardConfig,
    layer: ThematicLayer,
    year: Year,
    lon_lat: [f64; 2],
    resolution: Option<f64>,
) -> anyhow::Result<FeatureInfoRequest> {
    let registry = LayerRegistry::build(config);
    let key = LayerKey::new(layer, year);
    let entry = registry
        .get_key(&key)
        .ok_or_else(|| anyhow::anyhow!("No layer {} in the registry", key))?;
    let layer_name = entry
        .source
        .wms_layer_name()
        .ok_or_else(|| anyhow::anyhow!("Layer {} is not published", key))?;

    Ok(FeatureInfoRequest {
        layer_name: layer_name.to_string(),
        coordinate: lon_lat_to_mercator(lon_lat),
        resolution: resolution.unwrap_or_else(|| resolution_for_zoom(config.zoom)),
    })
}

/// `feature-info`: print the first feature's attributes at a position.
pub async fn run_feature_info(
    config: DashboardConfig,
    layer: ThematicLayer,
    year: Year,
    lon_lat: [f64; 2],
    resolution: Option<f64>,
) -> anyhow::Result<()> {
    let request = feature_info_request(&config, layer, year, lon_lat, resolution)?;
    println!("{}", request.url(&config.wms_url)?);

    let client = client(config)?;
    match client.fetch_feature_info(&request).await? {
        Some(feature) => {
            for (name, value) in feature.display_attributes() {
                println!("{:<24} {}", name, value);
            }
        }
        None => println!("No feature at {:.5}, {:.5}", lon_lat[0], lon_lat[1]),
    }
    Ok(())
}
