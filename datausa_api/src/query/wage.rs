use url::Url;

use super::Query;

/// Query against the data endpoint for average wages of one detailed
/// occupation, drilled down by year and state.
#[derive(Clone, Debug)]
pub struct WageQuery {
    pub occupation_id: String,
    pub drilldowns: Vec<String>,
    pub measures: Vec<String>,
    /// Rows backed by fewer survey records than this are dropped upstream.
    pub min_record_count: u32,
    pub workforce_status: bool,
}

impl WageQuery {
    /// Builds the standard year/state wage query for one occupation code.
    pub fn for_occupation(occupation_id: &str) -> Self {
        Self {
            occupation_id: occupation_id.to_string(),
            drilldowns: vec!["Year".to_string(), "State".to_string()],
            measures: vec![
                "Average Wage".to_string(),
                "Average Wage Appx MOE".to_string(),
            ],
            min_record_count: 5,
            workforce_status: true,
        }
    }

    pub fn with_min_record_count(mut self, count: u32) -> Self {
        self.min_record_count = count;
        self
    }

    pub fn with_workforce_status(mut self, workforce_status: bool) -> Self {
        self.workforce_status = workforce_status;
        self
    }
}

impl Query for WageQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("drilldowns", &self.drilldowns.join(","))
            .append_pair("measures", &self.measures.join(","))
            // The API reads `Record Count>=5` as a filter, i.e. key `Record Count>`.
            .append_pair("Record Count>", &self.min_record_count.to_string())
            .append_pair("Workforce Status", &self.workforce_status.to_string())
            .append_pair("Detailed Occupation", &self.occupation_id);
        url
    }
}
