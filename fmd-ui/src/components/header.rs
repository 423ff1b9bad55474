//! Title bar.

use dioxus::prelude::*;

#[component]
pub fn Header() -> Element {
    rsx! {
        header {
            style: "background: #0fa4af; color: white; box-shadow: 0 1px 3px rgba(0,0,0,0.2);",
            div {
                style: "padding: 12px 48px; display: flex; flex-direction: column;",
                h1 {
                    style: "margin: 0; font-size: 36px; font-weight: bold; letter-spacing: 0.5px;",
                    "Forest Monitoring System"
                }
                p {
                    style: "margin: 2px 0 0 0; font-size: 20px; color: #dcfce7;",
                    "Welcome to Forest Monitoring Dashboard"
                }
            }
        }
    }
}
