pub const THINKING_TEXT: &str = "Thinking...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "You:",
            Role::Assistant => "Finance AI:",
        }
    }

    pub fn class_name(self) -> &'static str {
        match self {
            Role::User => "user-message",
            Role::Assistant => "ai-message",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    /// Assistant placeholder shown while the reply is in flight.
    Thinking,
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MessageEntry {
    pub role: Role,
    pub content: Content,
}

impl MessageEntry {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: Content::Text(text.into()),
        }
    }

    pub fn thinking() -> Self {
        Self {
            role: Role::Assistant,
            content: Content::Thinking,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.role == Role::Assistant && self.content == Content::Thinking
    }

    pub fn text(&self) -> &str {
        match &self.content {
            Content::Thinking => THINKING_TEXT,
            Content::Text(text) => text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(usize);

/// Append-only log of rendered entries.
///
/// The one permitted edit is [`Transcript::resolve`], which fills in an
/// assistant placeholder; a placeholder can be resolved only once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    entries: Vec<MessageEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: MessageEntry) -> EntryId {
        self.entries.push(entry);
        EntryId(self.entries.len() - 1)
    }

    pub fn resolve(&mut self, id: EntryId, text: impl Into<String>) -> bool {
        match self.entries.get_mut(id.0) {
            Some(entry) if entry.is_placeholder() => {
                entry.content = Content::Text(text.into());
                true
            }
            _ => {
                tracing::warn!("Entry {} is not a pending placeholder", id.0);
                false
            }
        }
    }

    pub fn get(&self, id: EntryId) -> Option<&MessageEntry> {
        self.entries.get(id.0)
    }

    pub fn entries(&self) -> &[MessageEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
