//! Full-width map area. OpenLayers renders into the inner div; overlays
//! passed as children are positioned above it.

use crate::js_bridge::MAP_TARGET_ID;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct MapContainerProps {
    /// CSS height of the map area
    #[props(default = "calc(100vh - 163px)".to_string())]
    pub height: String,
    pub children: Element,
}

#[component]
pub fn MapContainer(props: MapContainerProps) -> Element {
    rsx! {
        div {
            style: "position: relative; width: 100%; height: {props.height};",
            div {
                id: MAP_TARGET_ID,
                style: "width: 100%; height: 100%;",
            }
            {props.children}
            div {
                style: "position: absolute; bottom: 0; left: 50%; transform: translateX(-50%); z-index: 10; pointer-events: none; padding: 4px 20px; background: #0fa4af; color: white; font-size: 16px; font-weight: 500; border-radius: 15px 15px 0 0;",
                "Powered by ML Infomap"
            }
        }
    }
}
