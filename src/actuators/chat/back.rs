use actix::Actor;
use anyhow::Context as _;
use sqlx::PgPool;
use std::net::SocketAddr;

pub mod actor;
pub mod advisor;
pub mod handlers;
pub mod ledger;
pub mod prompts;

use actor::ChatService;
use advisor::OpenAIAdvisor;
use ledger::PgLedger;

pub async fn serve(database_url: Box<str>, port: Option<u16>) -> anyhow::Result<()> {
    // Create database connection pool
    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    let actor = ChatService::new(PgLedger::new(pool), OpenAIAdvisor::from_env()).start();
    let router = handlers::build_router(actor);

    // Start server
    if let Some(port) = port {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        tracing::info!("Starting server on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;
        axum::serve(listener, router.into_make_service()).await?;
    } else {
        tracing::info!("Port not present, not starting the server.")
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::{Arc, Mutex};

    use super::advisor::{Advisor, AdvisorError};

    /// Advisor with a canned answer that remembers every prompt it was given.
    pub struct StubAdvisor {
        answer: Result<&'static str, &'static str>,
        prompts: Arc<Mutex<Vec<String>>>,
    }

    impl StubAdvisor {
        pub fn replying(reply: &'static str) -> Self {
            Self {
                answer: Ok(reply),
                prompts: Arc::default(),
            }
        }

        pub fn failing(error: &'static str) -> Self {
            Self {
                answer: Err(error),
                prompts: Arc::default(),
            }
        }

        pub fn recorder(&self) -> Arc<Mutex<Vec<String>>> {
            self.prompts.clone()
        }

        pub fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    impl Advisor for StubAdvisor {
        async fn advise(&self, prompt: &str) -> Result<String, AdvisorError> {
            self.prompts.lock().unwrap().push(prompt.to_owned());
            self.answer
                .map(str::to_owned)
                .map_err(|error| AdvisorError::ErrorResponse(error.to_owned()))
        }
    }
}
