use crate::error::{ApiError, ApiResult};
use axum::{extract::State, routing::post, Json, Router};
use folio_ai_common::SearchResult;
use folio_ai_core::{resolver, KnowledgeBase};
use std::sync::Arc;
use tracing::debug;

pub fn routes(knowledge_base: Arc<KnowledgeBase>) -> Router {
    Router::new()
        .route("/chat", post(chat_handler))
        .with_state(knowledge_base)
}

/// Accepts `{"message": "..."}` and answers from the knowledge base.
///
/// Validation happens here, not in the core: a missing, non-string or
/// whitespace-only message is rejected before any source is read.
async fn chat_handler(
    State(knowledge_base): State<Arc<KnowledgeBase>>,
    Json(body): Json<serde_json::Value>,
) -> ApiResult<Json<SearchResult>> {
    let message = body
        .get("message")
        .and_then(|value| value.as_str())
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .ok_or_else(|| ApiError::Validation("Message is required".to_string()))?;

    debug!("Received chat message: '{}'", message);

    let snapshot = knowledge_base.snapshot().await?;
    let result = resolver::resolve(message, &snapshot, knowledge_base.config());

    Ok(Json(result))
}
