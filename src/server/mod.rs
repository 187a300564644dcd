use anyhow::{Context, Result};
use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::extractor::{build_provider, InfoProvider, ProviderStatus};
use crate::service::ExtractService;

pub mod routes;

/// Shared application context
#[derive(Clone)]
pub struct AppContext {
    pub service: Arc<ExtractService>,
    /// Provider availability probed at startup
    pub provider_status: ProviderStatus,
}

impl AppContext {
    pub fn new(service: ExtractService, provider_status: ProviderStatus) -> Self {
        Self {
            service: Arc::new(service),
            provider_status,
        }
    }

    /// Build the service around an already constructed provider
    pub fn with_provider(provider: Arc<dyn InfoProvider>, config: &Config) -> Self {
        let status = ProviderStatus::for_provider(provider.as_ref(), config.extractor.mode);
        Self::new(ExtractService::new(provider, config.retry.clone()), status)
    }

    /// Probe for yt-dlp and build the service from configuration.
    ///
    /// The availability checks spawn processes synchronously, so they run on
    /// the blocking pool.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let extractor = config.extractor.clone();
        let (provider, status) = tokio::task::spawn_blocking(move || build_provider(&extractor))
            .await
            .context("Provider probe task failed")?;
        Ok(Self::new(
            ExtractService::new(provider, config.retry.clone()),
            status,
        ))
    }
}

/// Create the Axum router with all routes
pub fn build_router(ctx: AppContext) -> Router {
    Router::new()
        .route("/", get(routes::home))
        .route("/health", get(routes::health))
        .route(
            "/extract",
            get(routes::extract_query).post(routes::extract_body),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

/// Bind and serve until Ctrl+C or SIGTERM
pub async fn serve(config: Config) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| {
            format!(
                "Invalid listen address {}:{}",
                config.server.host, config.server.port
            )
        })?;

    let ctx = AppContext::from_config(&config).await?;
    let app = build_router(ctx);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
