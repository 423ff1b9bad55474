//! The seam between the reconciler and the rendering engine's view.

use fmd_core::config::DashboardConfig;
use fmd_core::projection::Extent;
use serde::Serialize;

/// How a fit animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FitOptions {
    pub padding: u32,
    pub duration_ms: u32,
}

impl FitOptions {
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self {
            padding: config.fit_padding,
            duration_ms: config.fit_duration_ms,
        }
    }
}

/// The rendering engine's view.
pub trait Viewport {
    /// Animate the view so `extent` (EPSG:3857) fills it.
    fn fit_extent(&mut self, extent: Extent, options: FitOptions);
}

/// Viewport that remembers every fit.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingViewport {
    pub fits: Vec<(Extent, FitOptions)>,
}

#[cfg(test)]
impl Viewport for RecordingViewport {
    fn fit_extent(&mut self, extent: Extent, options: FitOptions) {
        self.fits.push((extent, options));
    }
}
