//! Lon/lat and Web Mercator (EPSG:3857) helpers.

use serde::{Deserialize, Serialize};

/// Spherical Mercator radius (meters).
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Latitude limit of the Web Mercator projection.
pub const MAX_MERCATOR_LAT: f64 = 85.051_128_779_806_59;

/// Map projection used by the view and by WMS requests.
pub const MAP_CRS: &str = "EPSG:3857";

/// Resolution (meters per pixel) at zoom 0 for 256px tiles.
pub const RESOLUTION_Z0: f64 = 2.0 * std::f64::consts::PI * EARTH_RADIUS_M / 256.0;

/// Axis-aligned extent `[min_x, min_y, max_x, max_y]`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl Extent {
    pub fn new(min: [f64; 2], max: [f64; 2]) -> Self {
        Extent { min, max }
    }

    /// Degenerate extent around a single point.
    pub fn from_point(p: [f64; 2]) -> Self {
        Extent { min: p, max: p }
    }

    pub fn extend_point(&mut self, p: [f64; 2]) {
        self.min[0] = self.min[0].min(p[0]);
        self.min[1] = self.min[1].min(p[1]);
        self.max[0] = self.max[0].max(p[0]);
        self.max[1] = self.max[1].max(p[1]);
    }

    pub fn union(&self, other: &Extent) -> Extent {
        let mut out = *self;
        out.extend_point(other.min);
        out.extend_point(other.max);
        out
    }

    pub fn center(&self) -> [f64; 2] {
        [
            (self.min[0] + self.max[0]) / 2.0,
            (self.min[1] + self.max[1]) / 2.0,
        ]
    }

    pub fn to_array(&self) -> [f64; 4] {
        [self.min[0], self.min[1], self.max[0], self.max[1]]
    }

    /// Comma separated `min_x,min_y,max_x,max_y`, as used by WMS `BBOX`.
    pub fn to_bbox_string(&self) -> String {
        format!(
            "{},{},{},{}",
            self.min[0], self.min[1], self.max[0], self.max[1]
        )
    }

    /// Reproject a lon/lat extent to Web Mercator.
    pub fn lon_lat_to_mercator(&self) -> Extent {
        Extent::new(lon_lat_to_mercator(self.min), lon_lat_to_mercator(self.max))
    }
}

/// Project `[lon, lat]` in degrees to Web Mercator meters.
pub fn lon_lat_to_mercator(p: [f64; 2]) -> [f64; 2] {
    let lat = p[1].clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT);
    let x = EARTH_RADIUS_M * p[0].to_radians();
    let y = EARTH_RADIUS_M * (std::f64::consts::FRAC_PI_4 + lat.to_radians() / 2.0).tan().ln();
    [x, y]
}

/// View resolution (meters per pixel) for a zoom level.
pub fn resolution_for_zoom(zoom: f64) -> f64 {
    RESOLUTION_Z0 / 2f64.powf(zoom)
}
