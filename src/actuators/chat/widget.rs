//! Chat widget logic shared by every front end.
//!
//! A [`ChatWidget`] owns a [`ChatView`] (whatever draws the transcript and
//! holds the input) and a [`ChatTransport`] (whatever reaches `/chat/ask`).
//! Each call to [`ChatWidget::send`] is independent: overlapping sends are
//! allowed and each one resolves the placeholder it appended itself.

use super::dto::{ChatRequest, ChatResponse};

pub mod render;
pub mod timeframe;
pub mod transcript;

pub use timeframe::resolve_days;
pub use transcript::{Content, EntryId, MessageEntry, Role, Transcript, THINKING_TEXT};

pub const FALLBACK_REPLY: &str = "I couldn't process your request at this time.";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AskError {
    #[error("Server responded with status: {0}")]
    Status(u16),
    #[error("{0}")]
    Transport(Box<str>),
    #[error("{0}")]
    Decode(Box<str>),
}

pub fn error_reply(error: &AskError) -> String {
    format!("Sorry, I encountered an error: {error}")
}

/// Surface the widget draws on.
///
/// Methods take `&self`: views are cheap handles (signals, DOM nodes) and
/// several sends may hold the same view at once.
pub trait ChatView {
    /// Reference to an appended entry, kept by a send until it resolves.
    type Handle;

    fn input_value(&self) -> String;
    fn clear_input(&self);
    /// Raw value of the timeframe selector, `None` when there is no selector.
    fn timeframe_value(&self) -> Option<String>;
    fn append(&self, entry: MessageEntry) -> Self::Handle;
    fn resolve(&self, handle: &Self::Handle, text: &str);
    fn scroll_to_bottom(&self);
}

pub trait ChatTransport {
    async fn ask(&self, request: &ChatRequest) -> Result<ChatResponse, AskError>;
}

/// Enter sends, Shift+Enter is left to insert a newline.
pub fn is_send_key(key: &str, shift: bool) -> bool {
    key == "Enter" && !shift
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Input was empty after trimming; nothing happened.
    Ignored,
    Replied,
    Failed,
}

#[derive(Debug, Clone)]
pub struct ChatWidget<V, T> {
    view: V,
    transport: T,
}

impl<V: ChatView, T: ChatTransport> ChatWidget<V, T> {
    pub fn new(view: V, transport: T) -> Self {
        Self { view, transport }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn send(&self) -> SendOutcome {
        let message = self.view.input_value().trim().to_owned();
        if message.is_empty() {
            return SendOutcome::Ignored;
        }

        self.view.append(MessageEntry::user(message.clone()));
        let placeholder = self.view.append(MessageEntry::thinking());
        self.view.scroll_to_bottom();
        self.view.clear_input();

        let days = resolve_days(self.view.timeframe_value().as_deref());
        let request = ChatRequest::new(message, days);

        let outcome = match self.transport.ask(&request).await {
            Ok(response) => {
                self.view
                    .resolve(&placeholder, response.text().unwrap_or(FALLBACK_REPLY));
                SendOutcome::Replied
            }
            Err(error) => {
                tracing::error!("Error: {}", error);
                self.view.resolve(&placeholder, &error_reply(&error));
                SendOutcome::Failed
            }
        };

        self.view.scroll_to_bottom();
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;
    use tokio::sync::oneshot;

    /// In-memory view. Scrolling records the transcript length at the time,
    /// so "scrolled to bottom" means it matches the final length.
    #[derive(Default)]
    pub struct MemoryView {
        pub input: RefCell<String>,
        pub timeframe: Option<String>,
        pub transcript: RefCell<Transcript>,
        pub scrolled_at: Cell<Option<usize>>,
    }

    impl MemoryView {
        pub fn with_input(input: &str) -> Self {
            Self {
                input: RefCell::new(input.to_owned()),
                ..Self::default()
            }
        }

        pub fn timeframe(mut self, value: &str) -> Self {
            self.timeframe = Some(value.to_owned());
            self
        }

        pub fn set_input(&self, value: &str) {
            *self.input.borrow_mut() = value.to_owned();
        }

        pub fn texts(&self) -> Vec<String> {
            self.transcript
                .borrow()
                .entries()
                .iter()
                .map(|entry| entry.text().to_owned())
                .collect()
        }

        pub fn len(&self) -> usize {
            self.transcript.borrow().len()
        }

        pub fn is_scrolled_to_bottom(&self) -> bool {
            self.scrolled_at.get() == Some(self.len())
        }
    }

    impl ChatView for MemoryView {
        type Handle = EntryId;

        fn input_value(&self) -> String {
            self.input.borrow().clone()
        }

        fn clear_input(&self) {
            self.input.borrow_mut().clear();
        }

        fn timeframe_value(&self) -> Option<String> {
            self.timeframe.clone()
        }

        fn append(&self, entry: MessageEntry) -> EntryId {
            self.transcript.borrow_mut().push(entry)
        }

        fn resolve(&self, handle: &EntryId, text: &str) {
            self.transcript.borrow_mut().resolve(*handle, text);
        }

        fn scroll_to_bottom(&self) {
            self.scrolled_at.set(Some(self.len()));
        }
    }

    /// Answers each request with the next scripted result.
    #[derive(Default)]
    pub struct ScriptedTransport {
        pub replies: RefCell<VecDeque<Result<ChatResponse, AskError>>>,
        pub requests: RefCell<Vec<ChatRequest>>,
    }

    impl ScriptedTransport {
        pub fn new(replies: impl IntoIterator<Item = Result<ChatResponse, AskError>>) -> Self {
            Self {
                replies: RefCell::new(replies.into_iter().collect()),
                requests: RefCell::default(),
            }
        }
    }

    impl ChatTransport for ScriptedTransport {
        async fn ask(&self, request: &ChatRequest) -> Result<ChatResponse, AskError> {
            self.requests.borrow_mut().push(request.clone());
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(AskError::Transport("no scripted reply".into())))
        }
    }

    /// Holds each request open until the test answers it.
    #[derive(Default)]
    struct PendingTransport {
        pending: RefCell<VecDeque<oneshot::Receiver<Result<ChatResponse, AskError>>>>,
        requests: RefCell<Vec<ChatRequest>>,
    }

    impl ChatTransport for PendingTransport {
        async fn ask(&self, request: &ChatRequest) -> Result<ChatResponse, AskError> {
            self.requests.borrow_mut().push(request.clone());
            let receiver = self.pending.borrow_mut().pop_front().expect("unexpected request");
            receiver
                .await
                .unwrap_or_else(|_| Err(AskError::Transport("dropped".into())))
        }
    }

    async fn wait_for_entries(view: &MemoryView, count: usize) {
        while view.len() < count {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn blank_input_is_ignored() {
        for input in ["", "   ", "\n\t "] {
            let widget = ChatWidget::new(MemoryView::with_input(input), ScriptedTransport::default());
            assert_eq!(widget.send().await, SendOutcome::Ignored);
            assert_eq!(widget.view().len(), 0);
            assert!(widget.transport().requests.borrow().is_empty());
        }
    }

    #[tokio::test]
    async fn reply_replaces_placeholder() {
        let widget = ChatWidget::new(
            MemoryView::with_input("  How is my balance?  "),
            ScriptedTransport::new([Ok(ChatResponse::reply("Your balance is fine."))]),
        );
        assert_eq!(widget.send().await, SendOutcome::Replied);

        let view = widget.view();
        assert_eq!(view.texts(), vec!["How is my balance?", "Your balance is fine."]);
        assert_eq!(view.input_value(), "");
        assert!(view.is_scrolled_to_bottom());

        let requests = widget.transport().requests.borrow();
        assert_eq!(requests.as_slice(), &[ChatRequest::new("How is my balance?", 30)]);
    }

    #[tokio::test]
    async fn missing_reply_uses_fallback() {
        let widget = ChatWidget::new(
            MemoryView::with_input("hello"),
            ScriptedTransport::new([Ok(ChatResponse { reply: None }), Ok(ChatResponse::reply(""))]),
        );
        widget.send().await;
        widget.view().set_input("again");
        widget.send().await;
        assert_eq!(
            widget.view().texts(),
            vec!["hello", FALLBACK_REPLY, "again", FALLBACK_REPLY]
        );
    }

    #[tokio::test]
    async fn server_error_is_rendered() {
        let widget = ChatWidget::new(
            MemoryView::with_input("hello"),
            ScriptedTransport::new([Err(AskError::Status(500))]),
        );
        assert_eq!(widget.send().await, SendOutcome::Failed);

        let texts = widget.view().texts();
        assert_eq!(texts.len(), 2);
        assert!(texts[1].starts_with("Sorry, I encountered an error:"));
        assert!(texts[1].contains("Server responded with status: 500"));
        assert!(widget.view().is_scrolled_to_bottom());
    }

    #[tokio::test]
    async fn widget_stays_usable_after_failure() {
        let widget = ChatWidget::new(
            MemoryView::with_input("first"),
            ScriptedTransport::new([
                Err(AskError::Transport("connection refused".into())),
                Ok(ChatResponse::reply("ok")),
            ]),
        );
        widget.send().await;
        widget.view().set_input("second");
        assert_eq!(widget.send().await, SendOutcome::Replied);
        assert_eq!(
            widget.view().texts(),
            vec![
                "first",
                "Sorry, I encountered an error: connection refused",
                "second",
                "ok"
            ]
        );
    }

    #[tokio::test]
    async fn timeframe_selector_sets_days() {
        for (value, days) in [("7", 7), ("", 30), ("all", 30)] {
            let widget = ChatWidget::new(
                MemoryView::with_input("hi").timeframe(value),
                ScriptedTransport::new([Ok(ChatResponse::reply("ok"))]),
            );
            widget.send().await;
            assert_eq!(widget.transport().requests.borrow()[0].days, days);
        }
    }

    #[tokio::test]
    async fn entries_appear_before_reply_arrives() {
        let (reply, receiver) = oneshot::channel();
        let transport = PendingTransport::default();
        transport.pending.borrow_mut().push_back(receiver);
        let widget = ChatWidget::new(MemoryView::with_input("hello"), transport);

        let (outcome, ()) = tokio::join!(widget.send(), async {
            wait_for_entries(widget.view(), 2).await;
            let view = widget.view();
            assert_eq!(view.texts(), vec!["hello", THINKING_TEXT]);
            assert_eq!(view.input_value(), "");
            assert!(view.is_scrolled_to_bottom());
            reply.send(Ok(ChatResponse::reply("done"))).unwrap();
        });

        assert_eq!(outcome, SendOutcome::Replied);
        assert_eq!(widget.view().texts(), vec!["hello", "done"]);
    }

    #[tokio::test]
    async fn overlapping_sends_resolve_their_own_placeholders() {
        let (first_reply, first) = oneshot::channel();
        let (second_reply, second) = oneshot::channel();
        let transport = PendingTransport::default();
        transport.pending.borrow_mut().extend([first, second]);
        let widget = ChatWidget::new(MemoryView::with_input("first"), transport);

        let (a, b, ()) = tokio::join!(
            widget.send(),
            async {
                wait_for_entries(widget.view(), 2).await;
                widget.view().set_input("second");
                widget.send().await
            },
            async {
                wait_for_entries(widget.view(), 4).await;
                second_reply.send(Ok(ChatResponse::reply("reply two"))).unwrap();
                tokio::task::yield_now().await;
                first_reply.send(Ok(ChatResponse::reply("reply one"))).unwrap();
            }
        );

        assert_eq!((a, b), (SendOutcome::Replied, SendOutcome::Replied));
        assert_eq!(
            widget.view().texts(),
            vec!["first", "reply one", "second", "reply two"]
        );
        assert_eq!(widget.transport().requests.borrow().len(), 2);
    }

    #[tokio::test]
    async fn enter_sends_and_shift_enter_does_not() {
        let widget = ChatWidget::new(
            MemoryView::with_input("line one"),
            ScriptedTransport::new([Ok(ChatResponse::reply("ok"))]),
        );

        if is_send_key("Enter", true) {
            widget.send().await;
        }
        assert_eq!(widget.view().input_value(), "line one");
        assert!(widget.transport().requests.borrow().is_empty());

        if is_send_key("Enter", false) {
            widget.send().await;
        }
        assert_eq!(widget.transport().requests.borrow().len(), 1);
        assert_eq!(widget.view().input_value(), "");
    }

    #[test]
    fn only_plain_enter_is_a_send_key() {
        assert!(is_send_key("Enter", false));
        assert!(!is_send_key("Enter", true));
        assert!(!is_send_key("a", false));
        assert!(!is_send_key("Tab", false));
    }
}
