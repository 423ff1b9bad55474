//! Async HTTP client for the GeoServer endpoints (native builds only).
//!
//! Requests are issued once; there is no retry. A failed boundary load
//! leaves the caller with an error to report, a failed feature-info lookup
//! leaves the popup as it was.

use crate::boundary::{BoundaryFeature, BoundaryFeatureSet};
use crate::config::DashboardConfig;
use crate::ows::{self, FeatureInfoRequest};
use log::{info, warn};
use reqwest::{Client, StatusCode};

pub struct OwsClient {
    client: Client,
    config: DashboardConfig,
}

impl OwsClient {
    pub fn new(client: Client, config: DashboardConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    async fn get_text(&self, url: &str) -> anyhow::Result<String> {
        let response = self.client.get(url).send().await?;
        if response.status() != StatusCode::OK {
            warn!("Bad response status for {}: {}", url, response.status());
            anyhow::bail!("request failed with status {}", response.status());
        }
        Ok(response.text().await?)
    }

    /// Fetch the district boundaries over WFS.
    pub async fn fetch_boundaries(&self) -> anyhow::Result<BoundaryFeatureSet> {
        let url = ows::get_feature_url(&self.config.wfs_url, &self.config.boundary_type_name)?;
        info!("Fetching boundaries from {}", url);
        let body = self.get_text(&url).await?;
        let set = BoundaryFeatureSet::from_geojson(&body)?;
        info!("Loaded {} boundary features", set.len());
        Ok(set)
    }

    /// Issue a GetFeatureInfo lookup and return the first feature, if any.
    pub async fn fetch_feature_info(
        &self,
        request: &FeatureInfoRequest,
    ) -> anyhow::Result<Option<BoundaryFeature>> {
        let url = request.url(&self.config.wms_url)?;
        info!("Fetching feature info for {}", request.layer_name);
        let body = self.get_text(&url).await?;
        let set = BoundaryFeatureSet::from_geojson(&body)?;
        Ok(set.features.into_iter().next())
    }
}
