//! Sports Recommender
//!
//! Serves sport recommendations over HTTP.
//!
//! # Startup
//!
//! - **Configuration**: read from the environment (and `.env`)
//! - **Classifier**: trained once on the fixed table, or reloaded from cache
//! - **API Server**: `/`, `/health` and `/recommend`
//!
//! # Graceful Shutdown
//!
//! SIGTERM and SIGINT stop the listener and let in-flight requests finish.

use anyhow::Context;
use std::sync::Arc;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sports_recommender::{api, AppState, ClassifierArtifact, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing with structured logging
    init_tracing();

    info!("═══════════════════════════════════════════════════════════════");
    info!("  🏅 Sports Recommender v{}", env!("CARGO_PKG_VERSION"));
    info!("═══════════════════════════════════════════════════════════════");

    // Load configuration
    let config = Arc::new(Config::from_env().context("failed to load configuration")?);
    info!("✅ Configuration loaded and validated");

    // Train (or reload) the classifier off the async runtime
    info!("🌲 Preparing classifier...");
    let model_config = config.model.clone();
    let classifier = tokio::task::spawn_blocking(move || ClassifierArtifact::load_or_train(&model_config))
        .await
        .context("classifier task panicked")?
        .context("failed to prepare classifier")?;
    match classifier.holdout_accuracy() {
        Some(accuracy) => info!(
            "✅ Classifier ready: {} trees, {} training rows, holdout accuracy {:.2}",
            classifier.n_trees(),
            classifier.training_rows(),
            accuracy
        ),
        None => info!(
            "✅ Classifier ready: {} trees, {} training rows",
            classifier.n_trees(),
            classifier.training_rows()
        ),
    }

    let state = Arc::new(AppState {
        config: config.clone(),
        classifier: Arc::new(classifier),
    });

    info!("═══════════════════════════════════════════════════════════════");
    info!("  📡 API: http://{}:{}", config.api.host, config.api.port);
    info!(
        "  🔗 Health: http://{}:{}/health",
        config.api.host, config.api.port
    );
    info!("═══════════════════════════════════════════════════════════════");

    api::start_server(state, shutdown_signal())
        .await
        .context("API server failed")?;

    info!("👋 Sports Recommender stopped gracefully");
    Ok(())
}

/// Initialize structured logging with tracing
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("sports_recommender=debug,tower_http=debug,info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_ansi(std::env::var("NO_COLOR").is_err()),
        )
        .init();
}

/// Wait for shutdown signal (SIGTERM or SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("📴 Shutdown signal received");
}
