use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use wagegate_lib::datausa_api::Client;
use wagegate_lib::{CatalogBuilder, GatewayConfig};

use crate::output::{print_occupations, OutputFormat};

#[derive(Args)]
pub struct CatalogArgs {
    /// Probe every occupation for wage data (slow: one request per occupation)
    #[arg(long)]
    pub validate: bool,

    /// Only show occupations whose label contains this text
    #[arg(long)]
    pub filter: Option<String>,
}

pub async fn run(args: &CatalogArgs, config: &GatewayConfig, format: &OutputFormat) -> Result<()> {
    let client = Arc::new(Client::new(config.client_config())?);
    let builder = CatalogBuilder::from_config(client, config)
        .with_validation(args.validate || config.validate_catalog, config.probe_delay);

    let mut occupations = builder.build().await?;
    if let Some(filter) = &args.filter {
        let needle = filter.to_lowercase();
        occupations.retain(|o| o.label.to_lowercase().contains(&needle));
    }

    print_occupations(&occupations, format);
    eprintln!("{} occupations", occupations.len());
    Ok(())
}
