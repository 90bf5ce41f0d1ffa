pub mod chat;
pub mod health;

use axum::Router;
use folio_ai_core::KnowledgeBase;
use std::sync::Arc;

pub fn create_routes(knowledge_base: Arc<KnowledgeBase>) -> Router {
    Router::new()
        .nest("/health", health::routes())
        .nest("/api", chat::routes(knowledge_base))
}

// Fallback handler for unmatched routes
pub async fn not_found_handler() -> axum::http::StatusCode {
    axum::http::StatusCode::NOT_FOUND
}
