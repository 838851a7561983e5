//! Gateway endpoints.

use axum::extract::{Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use wagegate_lib::config::parse_bool;
use wagegate_lib::{OccupationRef, SortMode, StateWageRecord, WageSeries, WageSeriesRequest};

use crate::error::ApiError;
use crate::state::AppState;

const CATALOG_ERROR: &str = "Error fetching data from the API";
const WAGES_ERROR: &str = "Error fetching specific occupation wage data from the API";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub catalog_version: u64,
    pub total_occupations: usize,
    pub built_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct OccupationList {
    pub total_occupations: usize,
    pub occupations: Vec<OccupationRef>,
}

#[derive(Debug, Serialize)]
pub struct RebuildResponse {
    pub version: u64,
    pub total_occupations: usize,
}

/// Query string of the wage endpoints. Everything is optional here so that
/// validation errors come from the library with a useful message.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WageParams {
    pub id: Option<String>,
    pub sort: Option<String>,
    pub all_years: Option<String>,
    pub state: Option<String>,
}

impl WageParams {
    fn to_request(&self) -> WageSeriesRequest {
        WageSeriesRequest {
            occupation_id: self.id.clone(),
            sort: SortMode::parse(self.sort.as_deref()),
            all_years: self
                .all_years
                .as_deref()
                .and_then(parse_bool)
                .unwrap_or(false),
            state: self.state.clone(),
        }
    }
}

/// `GET /`
pub async fn root() -> &'static str {
    "Server is running"
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let snapshot = state.catalog.snapshot().await;
    Json(HealthResponse {
        status: if snapshot.is_built() { "ready" } else { "starting" },
        catalog_version: snapshot.version,
        total_occupations: snapshot.len(),
        built_at: snapshot.built_at,
    })
}

/// `GET /fetch-occupations`
///
/// Serves the cached catalog, building it first if no build has succeeded yet.
pub async fn list_occupations(
    State(state): State<AppState>,
) -> Result<Json<OccupationList>, ApiError> {
    let snapshot = state
        .catalog
        .ensure_built(&state.builder)
        .await
        .map_err(|e| ApiError::from_gateway("list_occupations", None, CATALOG_ERROR, e))?;
    Ok(Json(OccupationList {
        total_occupations: snapshot.len(),
        occupations: snapshot.occupations.clone(),
    }))
}

/// `POST /fetch-occupations/rebuild`
pub async fn rebuild_catalog(
    State(state): State<AppState>,
) -> Result<Json<RebuildResponse>, ApiError> {
    let snapshot = state
        .catalog
        .rebuild(&state.builder)
        .await
        .map_err(|e| ApiError::from_gateway("rebuild_catalog", None, CATALOG_ERROR, e))?;
    Ok(Json(RebuildResponse {
        version: snapshot.version,
        total_occupations: snapshot.len(),
    }))
}

/// `GET /occupations?id=&sort=&allYears=&state=`
pub async fn wage_series(
    State(state): State<AppState>,
    Query(params): Query<WageParams>,
) -> Result<Json<WageSeries>, ApiError> {
    let series = state
        .aggregator
        .aggregate(&params.to_request())
        .await
        .map_err(|e| {
            ApiError::from_gateway("wage_series", params.id.as_deref(), WAGES_ERROR, e)
        })?;
    Ok(Json(series))
}

/// `GET /occupations/records?id=&sort=`
pub async fn wage_records(
    State(state): State<AppState>,
    Query(params): Query<WageParams>,
) -> Result<Json<Vec<StateWageRecord>>, ApiError> {
    let rows = state
        .aggregator
        .state_records(params.id.as_deref(), SortMode::parse(params.sort.as_deref()))
        .await
        .map_err(|e| {
            ApiError::from_gateway("wage_records", params.id.as_deref(), WAGES_ERROR, e)
        })?;
    Ok(Json(rows))
}
