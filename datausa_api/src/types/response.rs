use serde::{Deserialize, Serialize};

use super::SearchResult;

/// Envelope of the legacy search endpoint.
#[derive(Serialize, Deserialize, Debug)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
}

/// Envelope of the data endpoint.
#[derive(Serialize, Deserialize, Debug)]
pub struct DataResponse<T> {
    pub data: Vec<T>,
}
