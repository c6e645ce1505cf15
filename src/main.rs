use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::{info, warn};

use faq_service::api::{create_router, AppState};
use faq_service::cache::MemoryCache;
use faq_service::config::Config;
use faq_service::db::{init_database, FaqStore};
use faq_service::resolver::TranslationResolver;
use faq_service::service::FaqService;
use faq_service::translator::HttpTranslator;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("faq_service=info".parse()?),
        )
        .init();

    info!("Starting FAQ content service");

    // Load configuration from environment
    let config = Config::from_env()?;

    if config.admin_api_key.is_none() {
        warn!("No ADMIN_API_KEY configured; the admin surface is open");
    }

    // Initialize database
    let pool = init_database(Path::new(&config.database_path)).await?;
    let store = FaqStore::new(pool);
    info!("Database ready at {}", config.database_path);

    // Field-level resolution cache and short-lived response cache
    let resolver = TranslationResolver::new(
        Arc::new(MemoryCache::new()),
        Duration::from_secs(config.translation_cache_ttl_secs),
    );

    // Translation provider client
    let translator = HttpTranslator::new(
        config.translate_api_url.clone(),
        config.translate_api_key.clone(),
        Duration::from_secs(config.translate_timeout_secs),
    )?;

    let service = FaqService::new(store, resolver, Arc::new(translator));

    let state = AppState {
        service: Arc::new(service),
        response_cache: Arc::new(MemoryCache::new()),
        response_ttl: Duration::from_secs(config.response_cache_ttl_secs),
        admin_api_key: config.admin_api_key.clone(),
    };

    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
