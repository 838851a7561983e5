use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use wagegate_lib::datausa_api::Client;
use wagegate_lib::{GatewayConfig, SortMode, WageAggregator, WageSeriesRequest};

use crate::output::{print_records, print_series, OutputFormat};

#[derive(Args)]
pub struct WagesArgs {
    /// Detailed occupation code (e.g. 151252)
    pub id: String,

    /// Sort: alpha, wageDes, wageAsc (default: upstream order)
    #[arg(long)]
    pub sort: Option<String>,

    /// Show every year for --state instead of one year across states
    #[arg(long, requires = "state")]
    pub all_years: bool,

    /// Full state name for --all-years (e.g. "New York")
    #[arg(long)]
    pub state: Option<String>,

    /// Show two-decimal wages with margins of error
    #[arg(long, conflicts_with = "all_years")]
    pub records: bool,

    /// Reference year for the state view (overrides WAGEGATE_REFERENCE_YEAR)
    #[arg(long)]
    pub year: Option<String>,
}

pub async fn run(args: &WagesArgs, config: &GatewayConfig, format: &OutputFormat) -> Result<()> {
    let client = Arc::new(Client::new(config.client_config())?);
    let reference_year = args.year.as_deref().unwrap_or(&config.reference_year);
    let aggregator = WageAggregator::new(client, reference_year);
    let sort = SortMode::parse(args.sort.as_deref());

    if args.records {
        let rows = aggregator.state_records(Some(&args.id), sort).await?;
        print_records(&rows, format);
        return Ok(());
    }

    let mut request = WageSeriesRequest::for_occupation(&args.id).with_sort(sort);
    if args.all_years {
        if let Some(state) = &args.state {
            request = request.with_all_years(state);
        }
    }
    let series = aggregator.aggregate(&request).await?;
    print_series(&series, format);
    Ok(())
}
