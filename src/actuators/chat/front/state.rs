use dioxus::prelude::*;

use crate::actuators::chat::dto::DEFAULT_DAYS;
use crate::actuators::chat::widget::{ChatView, EntryId, MessageEntry, Transcript};

use super::components::OUTPUT_ID;

/// Signals behind the chat page. Copy, so every send can hold its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChatState {
    pub input: Signal<String>,
    pub timeframe: Signal<String>,
    pub transcript: Signal<Transcript>,
}

pub fn use_chat_state() -> ChatState {
    use_context_provider::<ChatState>(|| ChatState {
        input: Signal::new(String::new()),
        timeframe: Signal::new(DEFAULT_DAYS.to_string()),
        transcript: Signal::new(Transcript::new()),
    })
}

impl ChatView for ChatState {
    type Handle = EntryId;

    fn input_value(&self) -> String {
        self.input.read().clone()
    }

    fn clear_input(&self) {
        let mut input = self.input;
        input.set(String::new());
    }

    fn timeframe_value(&self) -> Option<String> {
        Some(self.timeframe.read().clone())
    }

    fn append(&self, entry: MessageEntry) -> EntryId {
        let mut transcript = self.transcript;
        transcript.with_mut(|t| t.push(entry))
    }

    fn resolve(&self, handle: &EntryId, text: &str) {
        let mut transcript = self.transcript;
        transcript.with_mut(|t| {
            t.resolve(*handle, text);
        });
    }

    fn scroll_to_bottom(&self) {
        // Runs after the pending render has reached the DOM.
        let _ = document::eval(&format!(
            r#"requestAnimationFrame(() => {{
                const output = document.getElementById("{OUTPUT_ID}");
                if (output) {{ output.scrollTop = output.scrollHeight; }}
            }});"#
        ));
    }
}
