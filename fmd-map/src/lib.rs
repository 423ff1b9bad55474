//! Map layer composition for the forest monitoring dashboard.
//!
//! - `registry`: the layer table, built once at startup
//! - `highlight`: single-feature overlay layers
//! - `viewport`: the seam through which the rendering engine is asked to move
//! - `reconciler`: maps selection state onto registry visibility and the
//!   district highlight
//! - `click`: click-driven popups and feature-info request sequencing

pub mod click;
pub mod highlight;
pub mod reconciler;
pub mod registry;
pub mod viewport;

pub use click::{ClickAction, ClickEvent, FeatureInfoOutcome, PendingFeatureInfo, Popup, RequestToken};
pub use highlight::HighlightLayer;
pub use reconciler::{HighlightOutcome, MapController, VisibilityChange};
pub use registry::{LayerEntry, LayerRegistry};
pub use viewport::{FitOptions, Viewport};
