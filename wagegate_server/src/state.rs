//! Shared state handed to every handler.

use std::sync::Arc;

use anyhow::Result;
use wagegate_lib::datausa_api::Client;
use wagegate_lib::{CatalogBuilder, CatalogStore, GatewayConfig, WageAggregator};

/// Cheap to clone; every field is shared.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogStore>,
    pub builder: Arc<CatalogBuilder>,
    pub aggregator: Arc<WageAggregator>,
}

impl AppState {
    /// Wires one upstream client into the catalog builder and aggregator.
    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        let client = Arc::new(Client::new(config.client_config())?);
        Ok(Self {
            catalog: Arc::new(CatalogStore::new()),
            builder: Arc::new(CatalogBuilder::from_config(client.clone(), config)),
            aggregator: Arc::new(WageAggregator::from_config(client, config)),
        })
    }

    /// Builds the catalog once and logs the outcome. A failure leaves the
    /// empty catalog in place; `/fetch-occupations` retries on demand.
    pub async fn initial_build(&self) {
        match self.catalog.rebuild(&self.builder).await {
            Ok(snapshot) => tracing::info!(
                "Initial catalog ready: {} occupations",
                snapshot.len()
            ),
            Err(e) => tracing::warn!("Initial catalog build failed: {}", e),
        }
    }
}
