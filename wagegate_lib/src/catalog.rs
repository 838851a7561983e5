//! Occupation catalog: building it from the search endpoint, optionally
//! probing every entry for wage data, and holding the result as an
//! atomically replaced snapshot.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use datausa_api::types::SearchResult;
use datausa_api::{Client, SearchQuery, WageQuery};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};

use crate::collation;
use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::throttle::Throttle;

/// One detailed occupation as offered to the front end.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct OccupationRef {
    pub id: String,
    pub label: String,
}

/// Builds the occupation list from the upstream search endpoint.
pub struct CatalogBuilder {
    client: Arc<Client>,
    query: SearchQuery,
    validate: bool,
    throttle: Throttle,
}

impl CatalogBuilder {
    /// Creates a builder with the validation pass disabled.
    pub fn new(client: Arc<Client>) -> Self {
        Self {
            client,
            query: SearchQuery::default(),
            validate: false,
            throttle: Throttle::new(Duration::from_millis(500)),
        }
    }

    pub fn from_config(client: Arc<Client>, config: &GatewayConfig) -> Self {
        Self::new(client).with_validation(config.validate_catalog, config.probe_delay)
    }

    /// Enables or disables the per-occupation wage probe and sets the pause
    /// between probes.
    pub fn with_validation(mut self, validate: bool, probe_delay: Duration) -> Self {
        self.validate = validate;
        self.throttle = Throttle::new(probe_delay);
        self
    }

    /// Fetches, filters, and sorts the occupation list. Fails only when the
    /// initial search request fails; individual probe failures drop the
    /// affected occupation.
    pub async fn build(&self) -> Result<Vec<OccupationRef>, GatewayError> {
        let resp = self.client.search_occupations(&self.query).await?;
        let fetched = resp.results.len();
        let occupations = normalize(resp.results);
        tracing::info!(
            "Fetched {} search results, {} detailed occupations",
            fetched,
            occupations.len()
        );

        if !self.validate {
            return Ok(occupations);
        }

        let mut validated = self.keep_with_wage_data(occupations).await;
        collation::sort_by_label(&mut validated, |o| o.label.as_str());
        Ok(validated)
    }

    /// Probes each occupation in turn. Strictly sequential: the upstream API
    /// throttles clients that fan these requests out.
    async fn keep_with_wage_data(&self, occupations: Vec<OccupationRef>) -> Vec<OccupationRef> {
        let total = occupations.len();
        let mut kept = Vec::with_capacity(total);
        for (i, occupation) in occupations.into_iter().enumerate() {
            self.throttle.acquire().await;
            match self
                .client
                .get_wages(&WageQuery::for_occupation(&occupation.id))
                .await
            {
                Ok(resp) if !resp.data.is_empty() => kept.push(occupation),
                Ok(_) => {
                    tracing::debug!(
                        "Dropping occupation {} ({}): no wage data",
                        occupation.id,
                        occupation.label
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        "Wage probe {}/{} failed for occupation {}, skipping: {}",
                        i + 1,
                        total,
                        occupation.id,
                        e
                    );
                }
            }
        }
        tracing::info!("Validation kept {}/{} occupations", kept.len(), total);
        kept
    }
}

/// Drops aggregate codes, collapses duplicate ids, and sorts by label.
///
/// On a duplicate id the later label wins, at the position where the id was
/// first seen.
pub fn normalize(results: Vec<SearchResult>) -> Vec<OccupationRef> {
    let mut occupations: Vec<OccupationRef> = Vec::with_capacity(results.len());
    let mut index: HashMap<String, usize> = HashMap::new();

    for result in results.into_iter().filter(|r| !r.is_aggregate()) {
        if let Some(&pos) = index.get(&result.id) {
            tracing::debug!(
                "Duplicate occupation id {}: '{}' replaces '{}'",
                result.id,
                result.name,
                occupations[pos].label
            );
            occupations[pos].label = result.name;
            continue;
        }
        index.insert(result.id.clone(), occupations.len());
        occupations.push(OccupationRef {
            id: result.id,
            label: result.name,
        });
    }

    collation::sort_by_label(&mut occupations, |o| o.label.as_str());
    occupations
}

/// An immutable, fully built catalog.
#[derive(Serialize, Debug, Clone)]
pub struct CatalogSnapshot {
    /// Incremented on every successful rebuild; 0 means never built.
    pub version: u64,
    pub built_at: Option<DateTime<Utc>>,
    pub occupations: Vec<OccupationRef>,
}

impl CatalogSnapshot {
    pub fn empty() -> Self {
        Self {
            version: 0,
            built_at: None,
            occupations: Vec::new(),
        }
    }

    pub fn is_built(&self) -> bool {
        self.version > 0
    }

    pub fn len(&self) -> usize {
        self.occupations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupations.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&OccupationRef> {
        self.occupations.iter().find(|o| o.id == id)
    }
}

/// Process-wide holder of the current catalog.
///
/// Readers take a cheap `Arc` clone of the current snapshot. A rebuild runs
/// to completion before the pointer is swapped, so readers see either the
/// old catalog or the new one, never a partial list.
pub struct CatalogStore {
    current: RwLock<Arc<CatalogSnapshot>>,
    /// Serializes rebuilds so versions stay monotonic.
    rebuild_lock: Mutex<()>,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogStore {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(CatalogSnapshot::empty())),
            rebuild_lock: Mutex::new(()),
        }
    }

    /// Returns the current snapshot.
    pub async fn snapshot(&self) -> Arc<CatalogSnapshot> {
        self.current.read().await.clone()
    }

    /// Builds a new catalog and swaps it in. On failure the previous
    /// snapshot stays in place.
    pub async fn rebuild(
        &self,
        builder: &CatalogBuilder,
    ) -> Result<Arc<CatalogSnapshot>, GatewayError> {
        let _guard = self.rebuild_lock.lock().await;
        self.rebuild_locked(builder).await
    }

    /// Builds the catalog only if it has never been built. While another
    /// build is running the current (unbuilt) snapshot is returned at once
    /// instead of waiting for it.
    pub async fn ensure_built(
        &self,
        builder: &CatalogBuilder,
    ) -> Result<Arc<CatalogSnapshot>, GatewayError> {
        let current = self.snapshot().await;
        if current.is_built() {
            return Ok(current);
        }
        let Ok(_guard) = self.rebuild_lock.try_lock() else {
            tracing::debug!(
                "Catalog build in progress, serving version {}",
                current.version
            );
            return Ok(current);
        };
        let current = self.snapshot().await;
        if current.is_built() {
            return Ok(current);
        }
        self.rebuild_locked(builder).await
    }

    async fn rebuild_locked(
        &self,
        builder: &CatalogBuilder,
    ) -> Result<Arc<CatalogSnapshot>, GatewayError> {
        let occupations = match builder.build().await {
            Ok(occupations) => occupations,
            Err(e) => {
                let previous = self.snapshot().await;
                tracing::error!(
                    "Catalog rebuild failed, keeping version {} ({} occupations): {}",
                    previous.version,
                    previous.len(),
                    e
                );
                return Err(e);
            }
        };

        let mut current = self.current.write().await;
        let next = Arc::new(CatalogSnapshot {
            version: current.version + 1,
            built_at: Some(Utc::now()),
            occupations,
        });
        *current = next.clone();
        tracing::info!(
            "Catalog version {} installed with {} occupations",
            next.version,
            next.len()
        );
        Ok(next)
    }
}
