use query_dispatcher::{
    api::start_server,
    config::Settings,
    dispatcher::Dispatcher,
    fetchers::HttpSource,
    formatter,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let api_port = settings.api_port;
    let news_count = settings.news_count;

    info!("🚀 Query Dispatcher - API Server");
    info!("📍 Port: {}", api_port);
    info!("🕒 Day/night timezone: {}", settings.timezone);
    info!("{}", formatter::GREETING);

    let source = HttpSource::new(settings)?;
    let dispatcher = Arc::new(Dispatcher::new(Arc::new(source)));

    info!("✅ Dispatcher initialized");
    info!("📡 Starting API server...");

    start_server(dispatcher, news_count, api_port).await?;

    Ok(())
}
