use fincoach_macro::dto;

pub const DEFAULT_DAYS: u32 = 30;

#[cfg(feature = "chat-in")]
fn default_days() -> u32 {
    DEFAULT_DAYS
}

/// Body of `POST /chat/ask`.
#[dto(chat, clone, eq, request)]
pub struct ChatRequest {
    pub message: String,
    #[cfg_attr(feature = "chat-in", serde(default = "default_days"))]
    pub days: u32,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, days: u32) -> Self {
        Self {
            message: message.into(),
            days,
        }
    }
}

#[dto(chat, clone, eq, response)]
pub struct ChatResponse {
    pub reply: Option<String>,
}

impl ChatResponse {
    pub fn reply(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
        }
    }

    /// The reply to show, if the server produced a non-empty one.
    pub fn text(&self) -> Option<&str> {
        self.reply.as_deref().filter(|reply| !reply.is_empty())
    }
}

#[dto(chat, clone, eq, response)]
pub struct HttpErrorBody {
    pub error: Box<str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_reply_counts_as_missing() {
        assert_eq!(ChatResponse { reply: Some(String::new()) }.text(), None);
        assert_eq!(ChatResponse { reply: None }.text(), None);
        assert_eq!(ChatResponse::reply("ok").text(), Some("ok"));
    }

    #[cfg(feature = "chat-out")]
    #[test]
    fn request_serializes_message_and_days() {
        let body = serde_json::to_value(ChatRequest::new("How am I doing?", 7)).unwrap();
        assert_eq!(body, serde_json::json!({ "message": "How am I doing?", "days": 7 }));
    }

    #[cfg(feature = "chat-out")]
    #[test]
    fn response_without_reply_decodes() {
        let response: ChatResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.reply, None);
    }

    #[cfg(feature = "chat-in")]
    #[test]
    fn request_days_default_to_thirty() {
        let request: ChatRequest = serde_json::from_str(r#"{"message":"hi"}"#).unwrap();
        assert_eq!(request.days, DEFAULT_DAYS);
    }
}
