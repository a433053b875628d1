use dioxus::prelude::*;

pub mod components;
pub mod state;

pub use components::{Chat, ChatMessage, Style};

#[component]
pub fn App() -> Element {
    state::use_chat_state();
    rsx! {
        Style {}
        Chat {}
    }
}
