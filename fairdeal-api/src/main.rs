use std::net::SocketAddr;
use std::sync::Arc;

use fairdeal_api::{app, app_config::Config, AppState};
use fairdeal_offer::{OfferEvaluator, OpenAiChatGenerator};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fairdeal_api=debug,fairdeal_offer=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    tracing::info!("Starting FairDeal API on port {}", config.server.port);

    let benchmarks = Arc::new(config.benchmark_table()?);
    tracing::info!("Loaded benchmarks for {}", benchmarks.platforms().join("|"));

    match &config.generation.api_key {
        Some(key) if config.generation.has_api_key() => {
            tracing::info!("Generation credential loaded ({:?}), model {}", key, config.generation.model)
        }
        _ => tracing::warn!("OPENAI_API_KEY not set; suggestions will use the fallback template"),
    }

    let generator = OpenAiChatGenerator::new(config.generation.chat_config())?;
    let evaluator = OfferEvaluator::new(benchmarks, Arc::new(generator), config.evaluator_settings());

    let app = app(AppState::new(evaluator));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
