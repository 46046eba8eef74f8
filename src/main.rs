use anyhow::Context;
use clap::Parser;
use research_pipeline::config::{Config, SourceConfig};
use research_pipeline::pipeline::{ResearchPipeline, StreamingPipeline};
use research_pipeline::providers::{HttpResearchUpstream, OpenAiAnalysisClient, YahooQuoteClient};
use research_pipeline::reports::ReportStore;
use research_pipeline::router::{ResearchSource, build_router};
use research_pipeline::storage::{KvStore, MemoryStore, RemoteStore};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    let source_config = config.source().context("no research source configured")?;
    let http_client = reqwest::Client::new();

    // 1. Storage:
    let kv: Arc<dyn KvStore> = match &config.store_url {
        Some(store_url) => {
            tracing::info!("Using remote report store at {}", store_url);
            Arc::new(RemoteStore::with_client(http_client.clone(), store_url))
        }
        None => {
            tracing::info!("Using in-process report store");
            Arc::new(MemoryStore::new())
        }
    };
    let reports = Arc::new(ReportStore::new(kv.clone()));

    // 2. Research source:
    let source = match source_config {
        SourceConfig::Streaming { upstream_url } => {
            tracing::info!("Forwarding research to upstream {}", upstream_url);
            let upstream = Arc::new(HttpResearchUpstream::new(http_client.clone(), &upstream_url));
            ResearchSource::Streaming(StreamingPipeline::new(upstream, reports.clone()))
        }
        SourceConfig::Synchronous(openai) => {
            tracing::info!("Generating research locally with model {}", openai.model);
            let market = Arc::new(YahooQuoteClient::new(http_client.clone(), &config.quote_url));
            let analysis = Arc::new(OpenAiAnalysisClient::new(http_client.clone(), openai));
            ResearchSource::Synchronous(ResearchPipeline::new(market, analysis, reports.clone()))
        }
    };

    // 3. HTTP Router:
    let served_store = config.serve_store.then(|| kv.clone());
    if served_store.is_some() {
        tracing::info!("Serving report store at /internal/kv");
    }
    let app = build_router(source, reports, served_store);

    // 4. Start HTTP server:
    tracing::info!("HTTP server listening on {}", config.bind);
    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    axum::serve(listener, app).await?;

    Ok(())
}
