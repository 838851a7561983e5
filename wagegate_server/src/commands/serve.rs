use anyhow::{Context, Result};
use clap::Args;
use wagegate_lib::GatewayConfig;

use crate::app::create_app;
use crate::state::AppState;

#[derive(Args)]
pub struct ServeArgs {
    /// Address to bind (overrides WAGEGATE_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides WAGEGATE_PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Allowed CORS origin, or * for any (overrides WAGEGATE_ALLOWED_ORIGIN)
    #[arg(long)]
    pub allowed_origin: Option<String>,

    /// Probe every occupation for wage data while building the catalog
    #[arg(long)]
    pub validate_catalog: bool,

    /// Skip the startup build; the catalog is built on first request
    #[arg(long)]
    pub lazy_catalog: bool,
}

pub async fn run(args: &ServeArgs, mut config: GatewayConfig) -> Result<()> {
    if let Some(host) = &args.host {
        config.host = host.clone();
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(origin) = &args.allowed_origin {
        config.allowed_origin = Some(origin.clone()).filter(|o| o != "*");
    }
    if args.validate_catalog {
        config.validate_catalog = true;
    }

    let state = AppState::from_config(&config)?;
    let app = create_app(state.clone(), config.allowed_origin.as_deref())?;

    if args.lazy_catalog {
        tracing::info!("Catalog will be built on first request");
    } else {
        let startup = state.clone();
        tokio::spawn(async move { startup.initial_build().await });
    }

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(
        "Listening on http://{} (validate_catalog={}, reference_year={})",
        addr,
        config.validate_catalog,
        state.aggregator.reference_year()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
