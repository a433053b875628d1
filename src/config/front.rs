pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Server the chat client talks to, fixed at build time by `CHAT_BASE_URL`.
pub fn base_url() -> &'static str {
    option_env!("CHAT_BASE_URL").unwrap_or(DEFAULT_BASE_URL)
}
