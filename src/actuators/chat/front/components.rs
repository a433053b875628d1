use dioxus::prelude::*;

mod chat;
mod chat_message;

pub use chat::{Chat, OUTPUT_ID, TIMEFRAMES};
pub use chat_message::ChatMessage;

#[component]
pub fn Style() -> Element {
    rsx! {
        document::Stylesheet { href: chat::CSS }
        document::Stylesheet { href: chat_message::CSS }
    }
}
