//! Loading indicator.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct LoadingSpinnerProps {
    #[props(default = "Loading district boundaries...".to_string())]
    pub message: String,
}

#[component]
pub fn LoadingSpinner(props: LoadingSpinnerProps) -> Element {
    rsx! {
        div {
            style: "position: absolute; top: 12px; left: 50%; transform: translateX(-50%); z-index: 20; padding: 6px 14px; background: rgba(255,255,255,0.9); border-radius: 4px; color: #666;",
            "{props.message}"
        }
    }
}
