//! Orchestrator server binary
//!
//! Standalone server exposing the streaming graph executor over HTTP.

use std::net::SocketAddr;
use std::sync::Arc;

use langgraph_core::kv::{InMemoryKvClient, KvClient, RedisKvClient};
use llm::config::RemoteLlmConfig;
use llm::remote::OpenAiClient;
use orchestrator::api::routes::create_router;
use orchestrator::config::ServerConfig;
use orchestrator::graph_wiring::build_graph;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let rust_log = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt().with_env_filter(rust_log).init();

    tracing::info!("Loading server configuration from environment");
    let config = ServerConfig::from_env()?;
    if let Some(library) = &config.observability_library {
        tracing::info!("LLM observability library configured: {library}");
    }

    let kv: Arc<dyn KvClient> = match &config.redis_host {
        Some(host) => {
            tracing::info!("Connecting to Redis at {host}");
            Arc::new(RedisKvClient::connect(host).await?)
        }
        None => {
            tracing::warn!("REDIS_HOST not set, falling back to in-memory task tracking (state is lost on restart)");
            Arc::new(InMemoryKvClient::new())
        }
    };

    let llm_config = RemoteLlmConfig::new(&config.llm_api_key, &config.llm_base_url, &config.llm_model_id);
    let model = Arc::new(OpenAiClient::new(llm_config));

    let shop_gid = std::env::var("SHOP_GID").unwrap_or_else(|_| "gid://shop/placeholder".to_string());
    let graph = Arc::new(build_graph(model, shop_gid));

    let app = create_router(graph, kv);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    tracing::info!("Starting orchestrator server on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Orchestrator server shut down gracefully");
    Ok(())
}

/// Signal for graceful shutdown (Ctrl-C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL-C signal handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received CTRL-C signal, shutting down");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, shutting down");
        }
    }
}
