//! Thematic layers, years and the keys that address registry entries.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the three top-level map overlays the user can pick.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ThematicLayer {
    #[default]
    #[serde(rename = "forest-cover")]
    ForestCover,
    #[serde(rename = "Encroachment")]
    Encroachment,
    #[serde(rename = "Burned Forest")]
    BurnedForest,
}

impl ThematicLayer {
    /// All thematic layers, bottom-most first.
    pub const ALL: [ThematicLayer; 3] = [
        ThematicLayer::ForestCover,
        ThematicLayer::Encroachment,
        ThematicLayer::BurnedForest,
    ];

    /// Value carried by the radio control.
    pub fn as_str(&self) -> &'static str {
        match self {
            ThematicLayer::ForestCover => "forest-cover",
            ThematicLayer::Encroachment => "Encroachment",
            ThematicLayer::BurnedForest => "Burned Forest",
        }
    }

    /// Label shown next to the radio control.
    pub fn label(&self) -> &'static str {
        match self {
            ThematicLayer::ForestCover => "Forest Cover",
            ThematicLayer::Encroachment => "Encroachment",
            ThematicLayer::BurnedForest => "Fire Forest",
        }
    }
}

impl fmt::Display for ThematicLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a thematic layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLayerError(pub String);

impl fmt::Display for ParseLayerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown thematic layer: {}", self.0)
    }
}

impl std::error::Error for ParseLayerError {}

impl FromStr for ThematicLayer {
    type Err = ParseLayerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        match lowered.as_str() {
            "forest-cover" | "forest_cover" | "forest cover" | "forest" => {
                Ok(ThematicLayer::ForestCover)
            }
            "encroachment" => Ok(ThematicLayer::Encroachment),
            "burned forest" | "burned-forest" | "burned_forest" | "fire" | "fire forest" => {
                Ok(ThematicLayer::BurnedForest)
            }
            _ => Err(ParseLayerError(s.to_string())),
        }
    }
}

/// A data year for a thematic layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Year(pub u16);

impl Year {
    /// Forest cover baseline, shown when forest cover is selected without years.
    pub const BASELINE: Year = Year(2000);

    /// Years offered by the year checkboxes.
    pub const SELECTABLE: [Year; 3] = [Year(2020), Year(2021), Year(2022)];

    pub fn value(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Year {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u16>().map(Year)
    }
}

impl From<u16> for Year {
    fn from(value: u16) -> Self {
        Year(value)
    }
}

/// Second half of a layer key: a data year or a category-wide auxiliary layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerTag {
    Year(Year),
    /// Fire frequency over the whole observation window.
    Frequency,
    /// Human pressure index.
    Pressure,
}

impl fmt::Display for LayerTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerTag::Year(year) => write!(f, "{}", year),
            LayerTag::Frequency => f.write_str("frequency"),
            LayerTag::Pressure => f.write_str("pressure"),
        }
    }
}

impl From<Year> for LayerTag {
    fn from(year: Year) -> Self {
        LayerTag::Year(year)
    }
}

/// Registry key for a thematic layer entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LayerKey {
    pub category: ThematicLayer,
    pub tag: LayerTag,
}

impl LayerKey {
    pub fn new(category: ThematicLayer, tag: impl Into<LayerTag>) -> Self {
        Self {
            category,
            tag: tag.into(),
        }
    }

    /// Stable identifier used to address the layer in the map engine.
    pub fn id(&self) -> String {
        let category = match self.category {
            ThematicLayer::ForestCover => "forest",
            ThematicLayer::Encroachment => "encroachment",
            ThematicLayer::BurnedForest => "fire",
        };
        format!("{}-{}", category, self.tag)
    }
}

impl fmt::Display for LayerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.tag)
    }
}

/// Manual checkbox overrides for the fire auxiliary overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Overlay {
    FireFrequency,
    HumanPressure,
}

impl Overlay {
    pub const ALL: [Overlay; 2] = [Overlay::FireFrequency, Overlay::HumanPressure];

    pub fn label(&self) -> &'static str {
        match self {
            Overlay::FireFrequency => "Fire Frequency",
            Overlay::HumanPressure => "Human Pressure",
        }
    }

    /// Registry key of the layer this override controls.
    pub fn layer_key(&self) -> LayerKey {
        match self {
            Overlay::FireFrequency => LayerKey::new(ThematicLayer::BurnedForest, LayerTag::Frequency),
            Overlay::HumanPressure => LayerKey::new(ThematicLayer::BurnedForest, LayerTag::Pressure),
        }
    }
}
