mod app;
mod commands;
mod error;
mod handlers;
mod output;
mod state;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use wagegate_lib::GatewayConfig;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "wagegate")]
#[command(about = "Occupation wage gateway over the DataUSA API")]
struct Cli {
    /// Output format: table, markdown or json
    #[arg(long, default_value = "table", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP gateway
    Serve(commands::serve::ServeArgs),
    /// Build and print the occupation catalog
    Catalog(commands::catalog::CatalogArgs),
    /// Print the wage series for one occupation
    Wages(commands::wages::WagesArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter()?)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::parse(&cli.output);
    let config = GatewayConfig::from_env();

    match &cli.command {
        Commands::Serve(args) => commands::serve::run(args, config).await?,
        Commands::Catalog(args) => commands::catalog::run(args, &config, &format).await?,
        Commands::Wages(args) => commands::wages::run(args, &config, &format).await?,
    }

    Ok(())
}

/// `RUST_LOG` plus default levels for the gateway crates. Request spans from
/// `TraceLayer` are emitted at debug under `tower_http`.
fn env_filter() -> Result<EnvFilter> {
    Ok(EnvFilter::from_default_env()
        .add_directive("wagegate=info".parse()?)
        .add_directive("wagegate_lib=info".parse()?)
        .add_directive("datausa_api=info".parse()?)
        .add_directive("tower_http=debug".parse()?))
}
