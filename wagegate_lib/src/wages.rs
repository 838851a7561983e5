//! Wage series shaping: turns raw year/state wage rows into the parallel
//! arrays plotted by the front end.
//!
//! Two output modes exist. The default "states" series covers every state for
//! the reference year; the "years" series covers every year for one state.
//! Whole-dollar rounding applies to both series, while the single-year record
//! view keeps two decimals.

use std::str::FromStr;
use std::sync::Arc;

use datausa_api::types::WageRecord;
use datausa_api::{Client, WageQuery};
use serde::Serialize;

use crate::collation;
use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::validation::{is_excluded_state, validate_occupation_id, validate_state_name};

/// Ordering applied to the states series.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortMode {
    /// Ascending by state name.
    Alpha,
    /// Highest wage first.
    WageDesc,
    /// Lowest wage first.
    WageAsc,
    /// Upstream order.
    #[default]
    None,
}

impl FromStr for SortMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "alpha" => Ok(SortMode::Alpha),
            "wageDes" => Ok(SortMode::WageDesc),
            "wageAsc" => Ok(SortMode::WageAsc),
            "none" => Ok(SortMode::None),
            _ => Err(()),
        }
    }
}

impl SortMode {
    /// Parses the `sort` query parameter. Absent or unknown values leave the
    /// upstream order untouched.
    pub fn parse(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or_default()
    }
}

/// Parameters of a wage series call.
#[derive(Clone, Debug, Default)]
pub struct WageSeriesRequest {
    pub occupation_id: Option<String>,
    pub sort: SortMode,
    pub all_years: bool,
    /// Required when `all_years` is set.
    pub state: Option<String>,
}

impl WageSeriesRequest {
    pub fn for_occupation(occupation_id: &str) -> Self {
        Self {
            occupation_id: Some(occupation_id.to_string()),
            ..Self::default()
        }
    }

    pub fn with_sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_all_years(mut self, state: &str) -> Self {
        self.all_years = true;
        self.state = Some(state.to_string());
        self
    }
}

/// Shaped wage series. Serialized untagged, so the JSON is either
/// `{"wages": [...], "states": [...]}` or `{"years": [...], "wages": [...]}`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum WageSeries {
    States { wages: Vec<i64>, states: Vec<String> },
    Years { years: Vec<String>, wages: Vec<i64> },
}

/// One state's reference-year figures, unrounded.
#[derive(Debug, Clone, PartialEq)]
pub struct StateWagePoint {
    pub state: String,
    pub wage: Option<f64>,
    pub wage_moe: Option<f64>,
}

/// One year's figure for a fixed state, rounded to whole dollars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearWagePoint {
    pub year: String,
    pub wage: i64,
}

/// Two-decimal row of the single-year view.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct StateWageRecord {
    pub state: String,
    pub wage: String,
    #[serde(rename = "wageMOE")]
    pub wage_moe: String,
}

/// Absent figures count as zero.
pub fn round_whole(value: Option<f64>) -> i64 {
    value.map(|v| v.round() as i64).unwrap_or(0)
}

/// Absent figures display as "0.00".
pub fn format_cents(value: Option<f64>) -> String {
    format!("{:.2}", value.unwrap_or(0.0))
}

/// Reference-year rows, one per state, sentinel states removed, in upstream order.
pub fn state_points(records: &[WageRecord], year: &str) -> Vec<StateWagePoint> {
    records
        .iter()
        .filter(|r| r.year == year && !is_excluded_state(&r.state))
        .map(|r| StateWagePoint {
            state: r.state.clone(),
            wage: r.average_wage,
            wage_moe: r.average_wage_moe,
        })
        .collect()
}

/// Every year recorded for one occupation and state, newest match first:
/// later upstream rows come before earlier ones.
pub fn year_points(records: &[WageRecord], occupation_id: &str, state: &str) -> Vec<YearWagePoint> {
    let mut points: Vec<YearWagePoint> = records
        .iter()
        .filter(|r| !is_excluded_state(&r.state))
        .filter(|r| r.occupation_id == occupation_id && r.state == state)
        .map(|r| YearWagePoint {
            year: r.year.clone(),
            wage: round_whole(r.average_wage),
        })
        .collect();
    points.reverse();
    points
}

/// Stable sort of state rows. Wage sorts compare the unrounded figure, which
/// orders the rounded output the same way.
pub fn sort_state_points(points: &mut [StateWagePoint], sort: SortMode) {
    let wage = |p: &StateWagePoint| p.wage.unwrap_or(0.0);
    match sort {
        SortMode::Alpha => collation::sort_by_label(points, |p| p.state.as_str()),
        SortMode::WageDesc => points.sort_by(|a, b| wage(b).total_cmp(&wage(a))),
        SortMode::WageAsc => points.sort_by(|a, b| wage(a).total_cmp(&wage(b))),
        SortMode::None => {}
    }
}

/// Applies the mode selection rules to already fetched rows.
///
/// With `all_years` the years series is returned if the state has any rows;
/// otherwise, and by default, the reference-year states series.
pub fn shape_series(
    records: &[WageRecord],
    occupation_id: &str,
    sort: SortMode,
    all_years_state: Option<&str>,
    reference_year: &str,
) -> WageSeries {
    if let Some(state) = all_years_state {
        let points = year_points(records, occupation_id, state);
        if !points.is_empty() {
            let (years, wages) = points.into_iter().map(|p| (p.year, p.wage)).unzip();
            return WageSeries::Years { years, wages };
        }
        tracing::debug!(
            "No yearly rows for occupation {} in {}, using {} states series",
            occupation_id,
            state,
            reference_year
        );
    }

    let mut points = state_points(records, reference_year);
    sort_state_points(&mut points, sort);
    let (wages, states) = points
        .into_iter()
        .map(|p| (round_whole(p.wage), p.state))
        .unzip();
    WageSeries::States { wages, states }
}

/// Fetches wage rows for an occupation and shapes them.
pub struct WageAggregator {
    client: Arc<Client>,
    reference_year: String,
}

impl WageAggregator {
    pub fn new(client: Arc<Client>, reference_year: &str) -> Self {
        Self {
            client,
            reference_year: reference_year.to_string(),
        }
    }

    pub fn from_config(client: Arc<Client>, config: &GatewayConfig) -> Self {
        Self::new(client, &config.reference_year)
    }

    pub fn reference_year(&self) -> &str {
        &self.reference_year
    }

    /// Builds the wage series for one occupation. Input is validated before
    /// any upstream call is made.
    pub async fn aggregate(&self, req: &WageSeriesRequest) -> Result<WageSeries, GatewayError> {
        let occupation_id = validate_occupation_id(req.occupation_id.as_deref())?;
        let state = if req.all_years {
            let state = req.state.as_deref().ok_or_else(|| {
                GatewayError::Validation(
                    "parameter 'state' is required when 'allYears' is set".to_string(),
                )
            })?;
            Some(validate_state_name(state)?)
        } else {
            None
        };

        let records = self.fetch(&occupation_id).await?;
        Ok(shape_series(
            &records,
            &occupation_id,
            req.sort,
            state.as_deref(),
            &self.reference_year,
        ))
    }

    /// Reference-year rows with two-decimal wage and margin of error.
    pub async fn state_records(
        &self,
        occupation_id: Option<&str>,
        sort: SortMode,
    ) -> Result<Vec<StateWageRecord>, GatewayError> {
        let occupation_id = validate_occupation_id(occupation_id)?;
        let records = self.fetch(&occupation_id).await?;

        let mut points = state_points(&records, &self.reference_year);
        sort_state_points(&mut points, sort);
        Ok(points
            .into_iter()
            .map(|p| StateWageRecord {
                wage: format_cents(p.wage),
                wage_moe: format_cents(p.wage_moe),
                state: p.state,
            })
            .collect())
    }

    async fn fetch(&self, occupation_id: &str) -> Result<Vec<WageRecord>, GatewayError> {
        let resp = self
            .client
            .get_wages(&WageQuery::for_occupation(occupation_id))
            .await
            .map_err(|e| {
                tracing::error!("Wage fetch failed for occupation {}: {}", occupation_id, e);
                GatewayError::from(e)
            })?;
        if resp.data.is_empty() {
            return Err(GatewayError::NotFound(format!(
                "no wage data for occupation '{}'",
                occupation_id
            )));
        }
        Ok(resp.data)
    }
}
