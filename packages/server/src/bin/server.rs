// Main entry point for the directory API server

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use directory_core::kernel::{migrations, PgGateway, ServerDeps};
use directory_core::server::{build_app, AppOptions};
use directory_core::Config;
use tokio::signal::ctrl_c;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,directory_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting directory API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    info!("Configuration loaded");

    // Connect to database
    info!("Connecting to database...");
    let gateway = PgGateway::connect(&config).await?;
    info!("Database connected");

    if config.run_migrations {
        info!("Running database migrations...");
        migrations::run_pending(gateway.pool()).await?;
    }

    let deps = ServerDeps::new(Arc::new(gateway), config.submission_policy);
    let app = build_app(deps, AppOptions::from_config(&config));

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    info!("Starting server on {}", addr);
    info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!(error = %e, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!(error = %e, "Failed to install signal handler");
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
}
