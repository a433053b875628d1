use std::sync::Arc;

use actix::Addr;
use axum::{
    Json, Router,
    extract::State,
    http::Method,
    routing::{get, post},
};
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};

use super::{
    actor::{AskMessage, ChatService},
    advisor::Advisor,
    ledger::Ledger,
};
use crate::{
    actuators::chat::dto::{ChatRequest, ChatResponse},
    service,
    service::ActixResult,
};

type ServiceState<L, A> = State<Arc<Addr<ChatService<L, A>>>>;

pub fn build_router<L, A>(service: Addr<ChatService<L, A>>) -> Router
where
    L: Ledger + Send + Sync + 'static,
    A: Advisor + Send + Sync + 'static,
{
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([http::header::CONTENT_TYPE]);

    // Build router
    Router::new()
        .route("/health", get(health_check))
        .route("/chat/ask", post(ask_handler::<L, A>))
        .layer(cors)
        .with_state(Arc::new(service))
}

pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn ask_handler<L, A>(
    State(service): ServiceState<L, A>,
    Json(request): Json<ChatRequest>,
) -> service::Result<Json<ChatResponse>>
where
    L: Ledger + Send + Sync + 'static,
    A: Advisor + Send + Sync + 'static,
{
    service
        .send(AskMessage(request))
        .await
        .into_service_result()
        .map(Json)
}
