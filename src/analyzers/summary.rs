use crate::analyzers::MeanAccumulator;
use crate::models::ObservationTable;
use chrono::Datelike;
use serde::Serialize;

/// Headline metrics for a filtered table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_records: usize,
    pub mean_temperature: Option<f64>,
    pub distinct_cities: usize,
    pub first_year: Option<i32>,
    pub last_year: Option<i32>,
}

pub fn summarize(table: &ObservationTable) -> DashboardSummary {
    let mut acc = MeanAccumulator::default();
    let mut first = None;
    let mut last = None;

    for row in table {
        acc.push(row.average_temperature);
        first = Some(first.map_or(row.timestamp, |d| row.timestamp.min(d)));
        last = Some(last.map_or(row.timestamp, |d| row.timestamp.max(d)));
    }

    DashboardSummary {
        total_records: table.len(),
        mean_temperature: acc.mean(),
        distinct_cities: table.distinct_cities(),
        first_year: first.map(|d| d.year()),
        last_year: last.map(|d| d.year()),
    }
}

impl DashboardSummary {
    pub fn summary(&self) -> String {
        let average = match self.mean_temperature {
            Some(t) => format!("{:.1}°C", t),
            None => "No valid measurements".to_string(),
        };

        let date_range = match (self.first_year, self.last_year) {
            (Some(first), Some(last)) => format!("{} - {}", first, last),
            _ => "n/a".to_string(),
        };

        format!(
            "Average Temperature: {}\n\
            Total Cities: {}\n\
            Date Range: {}\n\
            Records: {}",
            average, self.distinct_cities, date_range, self.total_records
        )
    }
}
