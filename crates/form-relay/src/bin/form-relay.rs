//! Form relay service binary.
//!
//! Standalone HTTP service that writes form submissions to Google Sheets.

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use form_relay::{server, Config};
use notify::Notifier;
use sheets::{ServiceAccountAuth, ServiceAccountKey, SheetsClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("form_relay=info".parse()?))
        .init();

    info!("Starting form relay service...");

    let config = Config::default();

    let key = ServiceAccountKey::from_file(&config.credentials_path)
        .with_context(|| format!("Failed to load credentials from {}", config.credentials_path))?;
    info!(client_email = %key.client_email, "Loaded service account key");

    let auth = ServiceAccountAuth::new(key).context("Failed to prepare service account signer")?;
    let sheets = SheetsClient::new(Arc::new(auth)).context("Failed to create Sheets client")?;

    let notifier = Notifier::from_env();
    if !notifier.has_channels() {
        info!("Summaries will not be posted to chat");
    }

    let state = server::AppState {
        config: Arc::new(config.clone()),
        sheets: Arc::new(sheets),
        notifier: Arc::new(notifier),
    };

    let app = server::build_router(state);

    // Bind and serve
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(port = config.port, "Form relay listening on /webhook");

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
