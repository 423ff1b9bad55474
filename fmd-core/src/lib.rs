//! Core types for the forest monitoring dashboard.
//!
//! This crate provides:
//! - `layer`: thematic layers, years and layer keys
//! - `selection`: the selection store driven by the dashboard controls
//! - `catalog`: the static layer catalog and paint order
//! - `ows`: WMS/WFS request builders for the GeoServer backend
//! - `boundary`: district boundary features parsed from GeoJSON
//! - `fire`: fire/encroachment statistics records
//! - `projection`: lon/lat and Web Mercator helpers
//! - `basemap`: alternate background tile sources
//! - `config`: endpoint and view configuration

pub mod basemap;
pub mod boundary;
pub mod catalog;
#[cfg(feature = "api")]
pub mod client;
pub mod config;
pub mod fire;
pub mod layer;
pub mod ows;
pub mod projection;
pub mod selection;
