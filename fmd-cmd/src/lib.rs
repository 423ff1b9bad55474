//! Command implementations for the forest dashboard CLI.
//!
//! Offline subcommands (`layers`, `stats`) exercise the layer registry and
//! the statistics database; `districts` and `feature-info` talk to GeoServer.

use clap::{Args, Subcommand};
use fmd_core::config::DashboardConfig;
use fmd_core::layer::{ThematicLayer, Year};

pub mod layers;
pub mod remote;
pub mod stats;

/// Options shared by every subcommand.
#[derive(Args, Debug, Default)]
pub struct GlobalOpts {
    /// JSON file overriding the default dashboard configuration
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// WMS endpoint
    #[arg(long, global = true)]
    pub wms_url: Option<String>,

    /// WFS endpoint
    #[arg(long, global = true)]
    pub wfs_url: Option<String>,
}

impl GlobalOpts {
    /// Defaults, then the config file, then the URL flags.
    pub fn load_config(&self) -> anyhow::Result<DashboardConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path, e))?;
                DashboardConfig::from_json(&json)?
            }
            None => DashboardConfig::default(),
        };
        if let Some(url) = &self.wms_url {
            config.wms_url = url.clone();
        }
        if let Some(url) = &self.wfs_url {
            config.wfs_url = url.clone();
        }
        Ok(config)
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the layer registry after applying a selection
    Layers {
        /// Thematic layer: forest-cover, Encroachment or "Burned Forest"
        #[arg(short, long, default_value = "forest-cover")]
        layer: ThematicLayer,

        /// Selected year (repeatable)
        #[arg(short, long = "year")]
        years: Vec<Year>,

        /// Force the fire frequency overlay on
        #[arg(long)]
        frequency: bool,

        /// Force the human pressure overlay on
        #[arg(long)]
        pressure: bool,
    },

    /// Sum fire and encroachment statistics
    Stats {
        /// Fire records CSV (defaults to the embedded fixture)
        #[arg(short = 'f', long)]
        fire_csv: Option<String>,

        /// Restrict to one district
        #[arg(short, long)]
        district: Option<String>,

        /// Restrict to a year (repeatable; none means all years)
        #[arg(short, long = "year")]
        years: Vec<Year>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Fetch the district boundaries over WFS and list them
    Districts,

    /// Query a thematic layer at a lon/lat position
    FeatureInfo {
        #[arg(short, long)]
        layer: ThematicLayer,

        #[arg(short, long)]
        year: Year,

        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Meters per pixel; defaults to the initial view's resolution
        #[arg(short, long)]
        resolution: Option<f64>,
    },
}

pub async fn run(command: Command, opts: GlobalOpts) -> anyhow::Result<()> {
    let config = opts.load_config()?;
    match command {
        Command::Layers {
            layer,
            years,
            frequency,
            pressure,
        } => layers::run_layers(&config, layer, &years, frequency, pressure),
        Command::Stats {
            fire_csv,
            district,
            years,
            json,
        } => stats::run_stats(fire_csv.as_deref(), district.as_deref(), &years, json),
        Command::Districts => remote::run_districts(config).await,
        Command::FeatureInfo {
            layer,
            year,
            lon,
            lat,
            resolution,
        } => remote::run_feature_info(config, layer, year, [lon, lat], resolution).await,
    }
}
