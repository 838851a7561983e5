use tabled::settings::Style;
use tabled::{Table, Tabled};
use wagegate_lib::{OccupationRef, StateWageRecord, WageSeries};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Markdown,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Self {
        match value {
            "json" => OutputFormat::Json,
            "markdown" | "md" => OutputFormat::Markdown,
            _ => OutputFormat::Table,
        }
    }
}

#[derive(Tabled)]
struct OccupationRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Occupation")]
    label: String,
}

#[derive(Tabled)]
struct SeriesRow {
    #[tabled(rename = "State / Year")]
    key: String,
    #[tabled(rename = "Average Wage")]
    wage: String,
}

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Average Wage")]
    wage: String,
    #[tabled(rename = "MOE")]
    wage_moe: String,
}

// -- Row builders --

fn build_occupation_rows(occupations: &[OccupationRef]) -> Vec<OccupationRow> {
    occupations
        .iter()
        .map(|o| OccupationRow {
            id: o.id.clone(),
            label: o.label.clone(),
        })
        .collect()
}

fn build_series_rows(series: &WageSeries) -> Vec<SeriesRow> {
    let (keys, wages) = match series {
        WageSeries::States { wages, states } => (states, wages),
        WageSeries::Years { years, wages } => (years, wages),
    };
    keys.iter()
        .zip(wages)
        .map(|(key, wage)| SeriesRow {
            key: key.clone(),
            wage: format_dollars(*wage),
        })
        .collect()
}

fn build_record_rows(records: &[StateWageRecord]) -> Vec<RecordRow> {
    records
        .iter()
        .map(|r| RecordRow {
            state: r.state.clone(),
            wage: format!("${}", r.wage),
            wage_moe: format!("${}", r.wage_moe),
        })
        .collect()
}

fn render<T: Tabled>(rows: Vec<T>, format: &OutputFormat) -> String {
    let mut table = Table::new(rows);
    if *format == OutputFormat::Markdown {
        table.with(Style::markdown());
    }
    table.to_string()
}

// -- Output --

pub fn print_occupations(occupations: &[OccupationRef], format: &OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&occupations),
        _ => println!("{}", render(build_occupation_rows(occupations), format)),
    }
}

pub fn print_series(series: &WageSeries, format: &OutputFormat) {
    match format {
        OutputFormat::Json => print_json(series),
        _ => println!("{}", render(build_series_rows(series), format)),
    }
}

pub fn print_records(records: &[StateWageRecord], format: &OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&records),
        _ => println!("{}", render(build_record_rows(records), format)),
    }
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

/// Whole dollars with thousands separators, e.g. `$158,235`.
fn format_dollars(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if value < 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_dollars() {
        assert_eq!(format_dollars(0), "$0");
        assert_eq!(format_dollars(950), "$950");
        assert_eq!(format_dollars(158235), "$158,235");
        assert_eq!(format_dollars(1_234_567), "$1,234,567");
        assert_eq!(format_dollars(-4200), "-$4,200");
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("json"), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("md"), OutputFormat::Markdown);
        assert_eq!(OutputFormat::parse("anything"), OutputFormat::Table);
    }

    #[test]
    fn test_series_rows_pair_keys_with_wages() {
        let series = WageSeries::Years {
            years: vec!["2021".into(), "2022".into()],
            wages: vec![151002, 158235],
        };
        let rows = build_series_rows(&series);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].key, "2022");
        assert_eq!(rows[1].wage, "$158,235");
    }

    #[test]
    fn test_occupation_table_has_headers() {
        let rows = build_occupation_rows(&[OccupationRef {
            id: "291141".into(),
            label: "Registered nurses".into(),
        }]);
        let rendered = render(rows, &OutputFormat::Table);
        assert!(rendered.contains("Occupation"));
        assert!(rendered.contains("Registered nurses"));
    }

    #[test]
    fn test_record_rows_markdown() {
        let rows = build_record_rows(&[StateWageRecord {
            state: "Alabama".into(),
            wage: "98450.20".into(),
            wage_moe: "0.00".into(),
        }]);
        let rendered = render(rows, &OutputFormat::Markdown);
        assert!(rendered.contains("| Alabama"));
        assert!(rendered.contains("$98450.20"));
    }
}
