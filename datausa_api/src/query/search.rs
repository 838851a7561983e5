use url::Url;

use super::Query;

/// Query against the legacy search endpoint, listing members of one
/// dimension/hierarchy pair.
#[derive(Clone, Debug)]
pub struct SearchQuery {
    pub dimension: String,
    pub hierarchy: String,
    pub limit: u32,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            dimension: "PUMS Occupation".to_string(),
            hierarchy: "Detailed Occupation".to_string(),
            limit: 50000,
        }
    }
}

impl Query for SearchQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("dimension", &self.dimension)
            .append_pair("hierarchy", &self.hierarchy)
            .append_pair("limit", &self.limit.to_string());
        url
    }
}

impl SearchQuery {
    pub fn with_dimension(mut self, dimension: &str) -> Self {
        self.dimension = dimension.to_string();
        self
    }

    pub fn with_hierarchy(mut self, hierarchy: &str) -> Self {
        self.hierarchy = hierarchy.to_string();
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}
