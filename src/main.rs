use anyhow::Result;
use folio_ai_api::{ApiConfig, ApiServer};
use folio_ai_core::{CoreConfig, KnowledgeBase};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio_ai=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting portfolio assistant API...");

    // Load environment variables
    dotenv::dotenv().ok();

    let core_config = CoreConfig {
        data_dir: std::env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| CoreConfig::default().data_dir),
        owner_name: std::env::var("OWNER_NAME")
            .unwrap_or_else(|_| CoreConfig::default().owner_name),
        ..CoreConfig::default()
    };

    let knowledge_base = Arc::new(KnowledgeBase::new(core_config));

    // Warm the cache before serving so the first request doesn't pay for
    // ingestion. A failed warm-up is not fatal: the request path retries.
    match knowledge_base.snapshot().await {
        Ok(snapshot) => info!("Warmed knowledge base with {} entries", snapshot.entries.len()),
        Err(e) => error!("Knowledge base warm-up failed: {}", e),
    }

    let api_config = ApiConfig {
        host: std::env::var("HOST").unwrap_or_else(|_| ApiConfig::default().host),
        port: std::env::var("PORT")
            .ok()
            .and_then(|port| port.parse().ok())
            .unwrap_or_else(|| ApiConfig::default().port),
    };

    let server = ApiServer::new(api_config, knowledge_base);
    server
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
