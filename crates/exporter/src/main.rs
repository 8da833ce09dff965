//! springxd-exporter entry point.

use std::process::ExitCode;

use clap::Parser;
use exporter::config::{Cli, Config, LogFormat};
use tokio::signal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Resolves on SIGINT or SIGTERM, logging which one stopped the server.
///
/// A handler that cannot be installed is logged and never fires.
async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!(error = %e, "SIGINT handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let received = tokio::select! {
        () = interrupt => "SIGINT",
        () = terminate => "SIGTERM",
    };
    tracing::info!(signal = received, "draining in-flight scrapes before exit");
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = format == LogFormat::Json;

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(|| tracing_subscriber::fmt::layer()))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    // 1. Parse arguments; clap prints usage and exits non-zero on a missing URL
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    // 2. Validate configuration
    let config = match Config::from_cli(cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    if config.test_mode {
        tracing::info!(url = %config.springxd_url, "test mode, retrieving metrics from fixtures");
    }

    // 3. Build the application
    let state = match exporter::create_default_state(&config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "failed to build HTTP client");
            return ExitCode::FAILURE;
        }
    };
    let app = exporter::create_app(state, config.fixtures_dir.as_deref());

    // 4. Start server
    let addr = config.addr();
    tracing::info!(
        %addr,
        springxd_url = %config.springxd_url,
        mode = ?config.mode,
        "listening for scrape requests"
    );

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "failed to bind address");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "server error");
        return ExitCode::FAILURE;
    }

    tracing::info!("server shut down gracefully");
    ExitCode::SUCCESS
}
