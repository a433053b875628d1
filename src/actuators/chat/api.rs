use reqwest::Client;

use super::dto::{ChatRequest, ChatResponse};
use super::widget::{AskError, ChatTransport};

pub const ASK_PATH: &str = "/chat/ask";

impl From<reqwest::Error> for AskError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            AskError::Decode(error.to_string().into())
        } else {
            AskError::Transport(error.to_string().into())
        }
    }
}

/// Posts chat requests to a fixed `/chat/ask` endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: Box<str>,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!("{}{ASK_PATH}", base_url.trim_end_matches('/')).into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ChatTransport for HttpTransport {
    async fn ask(&self, request: &ChatRequest) -> Result<ChatResponse, AskError> {
        let response = self
            .client
            .post(&*self.endpoint)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AskError::Status(status.as_u16()));
        }

        Ok(response.json::<ChatResponse>().await?)
    }
}
