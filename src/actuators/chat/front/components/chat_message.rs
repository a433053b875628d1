use dioxus::prelude::*;

use crate::actuators::chat::widget::{Content, MessageEntry, Role, THINKING_TEXT, render};

pub static CSS: Asset = asset!("/src/actuators/chat/front/components/chat_message.css");

#[component]
pub fn ChatMessage(entry: MessageEntry) -> Element {
    let b = classnames::classname("chat-message");
    let b = match entry.role {
        Role::User => b.attr("message").attr("user-me"),
        Role::Assistant => b.attr("message").attr("user-coach"),
    };
    let role_class = entry.role.class_name();
    let label = entry.role.label();

    let body = match entry.content {
        Content::Thinking => rsx! {
            span {
                class: "typing-indicator",
                "{THINKING_TEXT}"
            }
        },
        Content::Text(text) if entry.role == Role::Assistant => rsx! {
            div {
                class: b.el("text").to_string(),
                dangerous_inner_html: render::reply_html(&text)
            }
        },
        Content::Text(text) => rsx! {
            div {
                class: b.el("text").to_string(),
                "{text}"
            }
        },
    };

    rsx! {
        div {
            class: "{role_class} {b}",
            strong {
                class: b.el("label").to_string(),
                "{label}"
            }
            {body}
        }
    }
}
