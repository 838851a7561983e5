//! Wage rows returned by the data endpoint.

use serde::{Deserialize, Serialize};

use super::lenient::string_or_number;
use super::OccupationID;

/// One (year, state) wage row for a detailed occupation.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct WageRecord {
    #[serde(rename = "Year", deserialize_with = "string_or_number")]
    pub year: String,

    /// Full state name. The API also emits the sentinels `#null` and
    /// `Puerto Rico`.
    #[serde(rename = "State")]
    pub state: String,

    #[serde(rename = "Average Wage", default)]
    pub average_wage: Option<f64>,

    /// Approximate margin of error of `average_wage`.
    #[serde(rename = "Average Wage Appx MOE", default)]
    pub average_wage_moe: Option<f64>,

    #[serde(
        rename = "ID Detailed Occupation",
        default,
        deserialize_with = "string_or_number"
    )]
    pub occupation_id: OccupationID,
}
