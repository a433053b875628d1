use std::rc::Rc;

use dioxus::prelude::*;

use super::ChatMessage;
use crate::actuators::chat::{
    api::HttpTransport,
    front::state::ChatState,
    widget::{ChatWidget, is_send_key},
};
use crate::config::front::base_url;

pub static CSS: Asset = asset!("/src/actuators/chat/front/components/chat.css");

pub const OUTPUT_ID: &str = "chat-output";

pub const TIMEFRAMES: [(u32, &str); 5] = [
    (7, "Last 7 days"),
    (30, "Last 30 days"),
    (90, "Last 3 months"),
    (180, "Last 6 months"),
    (365, "Last year"),
];

type FrontWidget = ChatWidget<ChatState, HttpTransport>;

fn spawn_send(widget: Rc<FrontWidget>) {
    spawn(async move {
        widget.send().await;
    });
}

#[component]
pub fn Chat() -> Element {
    let b = classnames::classname("chat");
    let state = use_context::<ChatState>();
    let widget = use_hook(|| Rc::new(ChatWidget::new(state, HttpTransport::new(base_url()))));
    let mut input = state.input;
    let mut timeframe = state.timeframe;

    let click_widget = widget.clone();
    let handle_keydown = move |evt: KeyboardEvent| {
        if is_send_key(&evt.key().to_string(), evt.modifiers().shift()) {
            evt.prevent_default();
            spawn_send(widget.clone());
        }
    };

    let entries = state.transcript.read().entries().to_vec();

    rsx! {
        div { class: b.to_string(),
            div { id: OUTPUT_ID, class: b.el("history").to_string(),
                for (index, entry) in entries.into_iter().enumerate() {
                    ChatMessage { key: "{index}", entry: entry }
                }
            }
            div { class: b.el("input").to_string(),
                select {
                    id: "timeframe",
                    class: b.el("timeframe").to_string(),
                    value: "{timeframe}",
                    onchange: move |evt| timeframe.set(evt.value()),
                    for (days, label) in TIMEFRAMES {
                        option { value: "{days}", "{label}" }
                    }
                }
                textarea {
                    id: "chat-input",
                    class: b.el("input-field").to_string(),
                    placeholder: "Ask about your finances...",
                    value: "{input}",
                    onkeydown: handle_keydown,
                    oninput: move |evt| input.set(evt.value()),
                }
                button {
                    id: "chat-send",
                    class: b.el("send-button").to_string(),
                    onclick: move |_| spawn_send(click_widget.clone()),
                    "Send"
                }
            }
        }
    }
}
