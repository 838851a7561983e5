//! Occupation entries returned by the search endpoint.

use serde::{Deserialize, Serialize};

use super::lenient::string_or_number;

/// Detailed-occupation code (e.g. "152011"). Codes containing `X` mark
/// aggregate groups rather than detailed occupations.
pub type OccupationID = String;

/// One member of the searched dimension.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SearchResult {
    #[serde(deserialize_with = "string_or_number")]
    pub id: OccupationID,

    /// Display name of the occupation.
    pub name: String,

    #[serde(default)]
    hierarchy: Option<String>,
}

impl SearchResult {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            hierarchy: None,
        }
    }

    /// Whether the code names an aggregate group instead of a detailed occupation.
    pub fn is_aggregate(&self) -> bool {
        self.id.contains('X')
    }
}
