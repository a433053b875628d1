//! Binds the chat widget to a server-rendered page.
//!
//! The page provides `#chat-send`, `#chat-input` and `#chat-output`, and
//! optionally a `#timeframe` selector. Without the first three nothing is
//! attached and nothing is reported.

use std::rc::Rc;

use tracing::Level;
use wasm_bindgen::{JsCast, prelude::*};
use web_sys::{
    Document, Element, Event, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement, KeyboardEvent,
};

use super::api::HttpTransport;
use super::widget::{
    ChatView, ChatWidget, Content, MessageEntry, Role, THINKING_TEXT, is_send_key, render,
};

pub const SEND_ID: &str = "chat-send";
pub const INPUT_ID: &str = "chat-input";
pub const OUTPUT_ID: &str = "chat-output";
pub const TIMEFRAME_ID: &str = "timeframe";

type DomWidget = ChatWidget<DomView, HttpTransport>;

#[derive(Clone)]
enum Field {
    Input(HtmlInputElement),
    TextArea(HtmlTextAreaElement),
    Select(HtmlSelectElement),
}

impl Field {
    fn from_element(element: Element) -> Option<Self> {
        element
            .dyn_into::<HtmlInputElement>()
            .map(Field::Input)
            .or_else(|element| element.dyn_into::<HtmlTextAreaElement>().map(Field::TextArea))
            .or_else(|element| element.dyn_into::<HtmlSelectElement>().map(Field::Select))
            .ok()
    }

    fn value(&self) -> String {
        match self {
            Field::Input(input) => input.value(),
            Field::TextArea(area) => area.value(),
            Field::Select(select) => select.value(),
        }
    }

    fn element(&self) -> Element {
        match self {
            Field::Input(input) => input.clone().into(),
            Field::TextArea(area) => area.clone().into(),
            Field::Select(select) => select.clone().into(),
        }
    }

    fn set_value(&self, value: &str) {
        match self {
            Field::Input(input) => input.set_value(value),
            Field::TextArea(area) => area.set_value(value),
            Field::Select(select) => select.set_value(value),
        }
    }
}

#[derive(Clone)]
pub struct DomView {
    document: Document,
    input: Field,
    output: Element,
    timeframe: Option<Field>,
}

impl DomView {
    /// Finds the chat elements, or `None` when a required one is missing.
    pub fn locate(document: &Document) -> Option<Self> {
        let input = document.get_element_by_id(INPUT_ID);
        let output = document.get_element_by_id(OUTPUT_ID);
        let (Some(input), Some(output)) = (input, output) else {
            tracing::debug!("Chat elements not found, widget not attached");
            return None;
        };
        let Some(input) = Field::from_element(input) else {
            tracing::debug!("#{} is not a text field, widget not attached", INPUT_ID);
            return None;
        };
        let timeframe = document
            .get_element_by_id(TIMEFRAME_ID)
            .and_then(Field::from_element);

        Some(Self {
            document: document.clone(),
            input,
            output,
            timeframe,
        })
    }

    fn render(&self, entry: &MessageEntry) -> Result<Element, JsValue> {
        let item = self.document.create_element("div")?;
        item.set_class_name(entry.role.class_name());

        let label = self.document.create_element("strong")?;
        label.set_text_content(Some(entry.role.label()));
        item.append_child(&label)?;
        item.append_with_str_1(" ")?;

        let content = self.document.create_element("span")?;
        match &entry.content {
            Content::Thinking => {
                content.set_class_name("typing-indicator");
                content.set_text_content(Some(THINKING_TEXT));
            }
            Content::Text(text) if entry.role == Role::Assistant => {
                content.set_inner_html(&render::reply_html(text));
            }
            Content::Text(text) => content.set_text_content(Some(text)),
        }
        item.append_child(&content)?;

        self.output.append_child(&item)?;
        Ok(content)
    }
}

impl ChatView for DomView {
    /// Content node of the entry; `None` if it could not be created.
    type Handle = Option<Element>;

    fn input_value(&self) -> String {
        self.input.value()
    }

    fn clear_input(&self) {
        self.input.set_value("");
    }

    fn timeframe_value(&self) -> Option<String> {
        self.timeframe.as_ref().map(Field::value)
    }

    fn append(&self, entry: MessageEntry) -> Option<Element> {
        self.render(&entry)
            .inspect_err(|error| tracing::error!("Failed to render chat entry: {:?}", error))
            .ok()
    }

    fn resolve(&self, handle: &Option<Element>, text: &str) {
        if let Some(content) = handle {
            content.set_class_name("");
            content.set_inner_html(&render::reply_html(text));
        }
    }

    fn scroll_to_bottom(&self) {
        self.output.set_scroll_top(self.output.scroll_height());
    }
}

fn spawn_send(widget: Rc<DomWidget>) {
    wasm_bindgen_futures::spawn_local(async move {
        widget.send().await;
    });
}

/// Looks up the chat elements and attaches listeners. Returns `false`, having
/// done nothing, when a required element is missing.
pub fn attach(document: &Document) -> Result<bool, JsValue> {
    let Some(send) = document.get_element_by_id(SEND_ID) else {
        tracing::debug!("#{} not found, widget not attached", SEND_ID);
        return Ok(false);
    };
    let Some(view) = DomView::locate(document) else {
        return Ok(false);
    };
    let input_element = view.input.element();

    let origin = document
        .location()
        .ok_or_else(|| JsValue::from_str("document has no location"))?
        .origin()?;
    let widget = Rc::new(ChatWidget::new(view, HttpTransport::new(&origin)));

    let on_click = {
        let widget = widget.clone();
        Closure::<dyn FnMut(Event)>::new(move |_event: Event| spawn_send(widget.clone()))
    };
    send.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();

    let on_keydown = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
        if is_send_key(&event.key(), event.shift_key()) {
            event.prevent_default();
            spawn_send(widget.clone());
        }
    });
    input_element.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref())?;
    on_keydown.forget();

    tracing::info!("Chat widget attached");
    Ok(true)
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // A host page may already have installed a subscriber.
    let _ = dioxus_logger::init(Level::INFO);

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if document.ready_state() == "loading" {
        let ready_document = document.clone();
        let on_ready = Closure::<dyn FnMut()>::new(move || {
            if let Err(error) = attach(&ready_document) {
                tracing::error!("Failed to attach chat widget: {:?}", error);
            }
        });
        document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())?;
        on_ready.forget();
    } else {
        attach(&document)?;
    }
    Ok(())
}
