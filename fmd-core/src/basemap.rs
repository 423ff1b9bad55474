//! Background tile sources offered by the basemap switcher.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Background tile source shown beneath the thematic layers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Basemap {
    /// OpenStreetMap standard tiles.
    #[default]
    Osm,
    Satellite,
    Terrain,
    Dark,
    /// Carto light tiles (labelled "white" in the selector).
    White,
}

impl Basemap {
    pub const ALL: [Basemap; 5] = [
        Basemap::Osm,
        Basemap::Satellite,
        Basemap::Terrain,
        Basemap::Dark,
        Basemap::White,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Basemap::Osm => "osm",
            Basemap::Satellite => "satellite",
            Basemap::Terrain => "terrain",
            Basemap::Dark => "dark",
            Basemap::White => "white",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Basemap::Osm => "OSM Standard",
            Basemap::Satellite => "Satellite",
            Basemap::Terrain => "Terrain",
            Basemap::Dark => "Dark",
            Basemap::White => "White",
        }
    }

    /// Slippy-map URL template with `{x}`, `{y}` and `{z}` placeholders.
    pub fn url_template(&self) -> &'static str {
        match self {
            Basemap::Osm => "https://tile.openstreetmap.org/{z}/{x}/{y}.png",
            Basemap::Satellite => "https://mt1.google.com/vt/lyrs=s&x={x}&y={y}&z={z}",
            Basemap::Terrain => "https://mt1.google.com/vt/lyrs=p&x={x}&y={y}&z={z}",
            Basemap::Dark => "https://basemaps.cartocdn.com/dark_all/{z}/{x}/{y}.png",
            Basemap::White => "https://basemaps.cartocdn.com/light_all/{z}/{x}/{y}.png",
        }
    }
}

impl fmt::Display for Basemap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Basemap {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Basemap::ALL
            .into_iter()
            .find(|b| b.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown basemap: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_carry_all_placeholders() {
        for basemap in Basemap::ALL {
            let t = basemap.url_template();
            assert!(t.contains("{x}") && t.contains("{y}") && t.contains("{z}"), "{}", t);
        }
        assert!(Basemap::Terrain.url_template().contains("lyrs=p"));
    }

    #[test]
    fn parses_selector_values() {
        for basemap in Basemap::ALL {
            assert_eq!(basemap.as_str().parse::<Basemap>(), Ok(basemap));
        }
        assert!("mars".parse::<Basemap>().is_err());
    }
}
