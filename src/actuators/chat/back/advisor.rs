use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::prompts::COACH_INSTRUCTIONS;

pub const ROLE_SYSTEM: &str = "system";
pub const ROLE_USER: &str = "user";

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Response parsing failed: {0}")]
    ParseFailed(#[from] serde_json::Error),

    #[error("Error response from API: {0}")]
    ErrorResponse(String),
}

/// Answers a fully built prompt. An empty answer is not an error.
pub trait Advisor {
    async fn advise(&self, prompt: &str) -> Result<String, AdvisorError>;
}

#[derive(Debug, Serialize)]
struct OpenAIRequest<'a> {
    model: &'a str,
    messages: [OpenAIMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
struct OpenAIMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIErrorBody {
    error: OpenAIErrorDetail,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OpenAIErrorDetail {
    Message { message: String },
    Text(String),
}

impl From<OpenAIErrorBody> for AdvisorError {
    fn from(body: OpenAIErrorBody) -> Self {
        match body.error {
            OpenAIErrorDetail::Message { message } | OpenAIErrorDetail::Text(message) => {
                AdvisorError::ErrorResponse(message)
            }
        }
    }
}

/// Advisor backed by an OpenAI-compatible `/v1/chat/completions` endpoint.
#[derive(Debug, Clone)]
pub struct OpenAIAdvisor {
    client: reqwest::Client,
    infer_url: Box<str>,
    model: Box<str>,
    api_key: Option<Box<str>>,
}

impl OpenAIAdvisor {
    pub fn new(infer_url: &str, model: &str, api_key: Option<&str>) -> Self {
        Self {
            client: reqwest::Client::new(),
            infer_url: infer_url.trim_end_matches('/').into(),
            model: model.into(),
            api_key: api_key.map(Into::into),
        }
    }

    pub fn from_env() -> Self {
        use crate::config::back_shared::{DEFAULT_MODEL, INFER_API_KEY, INFER_URL};
        Self::new(&INFER_URL, &DEFAULT_MODEL, INFER_API_KEY.as_deref())
    }
}

impl Advisor for OpenAIAdvisor {
    async fn advise(&self, prompt: &str) -> Result<String, AdvisorError> {
        let request = OpenAIRequest {
            model: &self.model,
            messages: [
                OpenAIMessage {
                    role: ROLE_SYSTEM,
                    content: COACH_INSTRUCTIONS,
                },
                OpenAIMessage {
                    role: ROLE_USER,
                    content: prompt,
                },
            ],
        };

        let mut builder = self
            .client
            .post(format!("{}/v1/chat/completions", self.infer_url))
            .json(&request);
        if let Some(api_key) = &self.api_key {
            builder = builder.bearer_auth(api_key);
        }
        let response_text = builder.send().await?.text().await?;

        // Try parsing as error response first
        if let Ok(error_response) = serde_json::from_str::<OpenAIErrorBody>(&response_text) {
            return Err(error_response.into());
        }

        let response: OpenAIResponse = serde_json::from_str(&response_text)?;
        let reply = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();
        if reply.trim().is_empty() {
            tracing::warn!("Model returned an empty reply");
        }
        Ok(reply)
    }
}
