use phytomine::config::AppConfig;
use phytomine::db::{self, Repository};
use phytomine::llm::{Extractor, GeminiExtractor, MockExtractor};
use phytomine::pubmed::PubMedClient;
use phytomine::routes;
use phytomine::services::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration
    dotenvy::dotenv().ok();
    let config = AppConfig::load()?;

    // 2. Setup logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!(version = phytomine::VERSION, "Starting phytomine");

    // 3. Database
    let conn = db::connect(&config.database).await?;
    let repo = Repository::new(conn);
    tracing::info!("Connected to database");

    // 4. Extraction client, injected at startup. The "mock" key selects the
    //    in-process extractor for keyless local runs.
    let extractor: Arc<dyn Extractor> = if config.gemini.api_key == "mock" {
        tracing::warn!("GEMINI api_key is \"mock\"; extraction returns empty results");
        Arc::new(MockExtractor::default())
    } else {
        Arc::new(GeminiExtractor::new(config.gemini.clone()))
    };

    // 5. Scraping client and app state
    let pubmed = PubMedClient::new(config.pubmed.clone());
    let state = AppState::new(repo, extractor, pubmed);

    // 6. Router and server
    let app = routes::create_router(state, config.request_timeout());
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!(%addr, "Listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
