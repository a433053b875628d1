use std::sync::Arc;

use actix::prelude::*;
use time::{Date, Duration, OffsetDateTime};

use super::{
    advisor::Advisor,
    ledger::Ledger,
    prompts,
};
use crate::{
    actuators::chat::dto::{ChatRequest, ChatResponse},
    service::{self, CoercibleResult},
};

pub struct ChatService<L, A> {
    ledger: Arc<L>,
    advisor: Arc<A>,
}

impl<L, A> ChatService<L, A>
where
    L: Ledger + Send + Sync + 'static,
    A: Advisor + Send + Sync + 'static,
{
    pub fn new(ledger: L, advisor: A) -> Self {
        Self {
            ledger: Arc::new(ledger),
            advisor: Arc::new(advisor),
        }
    }
}

impl<L, A> Actor for ChatService<L, A>
where
    L: Ledger + Send + Sync + 'static,
    A: Advisor + Send + Sync + 'static,
{
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        tracing::info!("Chat service started");
    }
}

#[derive(Debug)]
pub struct AskMessage(pub ChatRequest);

impl Message for AskMessage {
    type Result = service::Result<ChatResponse>;
}

impl<L, A> Handler<AskMessage> for ChatService<L, A>
where
    L: Ledger + Send + Sync + 'static,
    A: Advisor + Send + Sync + 'static,
{
    type Result = ResponseFuture<service::Result<ChatResponse>>;

    fn handle(&mut self, AskMessage(request): AskMessage, _ctx: &mut Self::Context) -> Self::Result {
        let ledger = self.ledger.clone();
        let advisor = self.advisor.clone();
        let today = OffsetDateTime::now_utc().date();
        Box::pin(async move { answer(&*ledger, &*advisor, request, today).await })
    }
}

/// Answers one question against the ledger window ending `today`.
pub async fn answer<L: Ledger, A: Advisor>(
    ledger: &L,
    advisor: &A,
    request: ChatRequest,
    today: Date,
) -> service::Result<ChatResponse> {
    let question = request.message.trim();
    if question.is_empty() {
        return Err(service::Error::BadRequest("Message cannot be empty".into()));
    }

    let since = today
        .checked_sub(Duration::days(i64::from(request.days)))
        .unwrap_or(Date::MIN);
    let snapshot = ledger.snapshot(since).await.into_service_result()?;
    tracing::debug!(
        "Answering over {} of {} transactions since {}",
        snapshot.transactions.len(),
        snapshot.total_transactions,
        since
    );

    let prompt = prompts::finance_coach(question, request.days, &snapshot);
    match advisor.advise(&prompt).await {
        Ok(reply) => Ok(ChatResponse::reply(reply)),
        Err(error) => {
            tracing::error!("Advisor error: {}", error);
            Err(service::Error::Upstream(error.to_string().into()))
        }
    }
}
