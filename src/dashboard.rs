//! One dashboard interaction: filter the session table, then compute every
//! view from the filtered rows.

use crate::analyzers::distribution::DistributionOptions;
use crate::analyzers::{
    monthly_trend, summarize, temperature_distribution, top_hottest_cities, yearly_trend,
    CityMean, DashboardSummary, MonthlyMean, TemperatureDistribution, YearlyMean,
};
use crate::config::DashboardConfig;
use crate::error::Result;
use crate::models::{Observation, ObservationTable};
use crate::processors::filter::{apply_filter, CountryFilter, YearRange};
use serde::Serialize;
use tracing::{info, warn};

/// User-chosen filter settings. Missing year bounds default to the table's
/// observed span.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardQuery {
    pub from_year: Option<i32>,
    pub to_year: Option<i32>,
    pub country: CountryFilter,
}

impl DashboardQuery {
    pub fn new(from_year: Option<i32>, to_year: Option<i32>, country: CountryFilter) -> Self {
        Self {
            from_year,
            to_year,
            country,
        }
    }

    /// Concrete year range for `table`; `None` when the table is empty and no
    /// bounds were given.
    ///
    /// A missing bound takes the table's observed span, clamped so it never
    /// crosses the bound that was given. Only two explicit bounds can be
    /// inverted.
    pub fn resolve_years(&self, table: &ObservationTable) -> Result<Option<YearRange>> {
        let span = table.year_span();

        let (start, end) = match (self.from_year, self.to_year) {
            (Some(start), Some(end)) => (Some(start), Some(end)),
            (Some(start), None) => (Some(start), span.map(|(_, hi)| hi.max(start))),
            (None, Some(end)) => (span.map(|(lo, _)| lo.min(end)), Some(end)),
            (None, None) => (span.map(|(lo, _)| lo), span.map(|(_, hi)| hi)),
        };

        match (start, end) {
            (Some(start), Some(end)) => YearRange::new(start, end).map(Some),
            _ => Ok(None),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub years: Option<YearRange>,
    pub country: String,
    pub is_empty: bool,
    pub summary: DashboardSummary,
    pub yearly_trend: Vec<YearlyMean>,
    pub distribution: TemperatureDistribution,
    pub hottest_cities: Vec<CityMean>,
    pub monthly_trend: Vec<MonthlyMean>,
    pub sample: Vec<Observation>,
}

pub struct Dashboard {
    top_cities: usize,
    sample_rows: usize,
    distribution: DistributionOptions,
}

impl Dashboard {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            top_cities: config.top_cities,
            sample_rows: config.sample_rows,
            distribution: config.distribution_options(),
        }
    }

    /// Rows of `table` selected by `query`
    pub fn filter(
        &self,
        table: &ObservationTable,
        query: &DashboardQuery,
    ) -> Result<ObservationTable> {
        let years = query.resolve_years(table)?;
        Ok(select(table, years, &query.country))
    }

    pub fn run(&self, table: &ObservationTable, query: &DashboardQuery) -> Result<DashboardView> {
        let years = query.resolve_years(table)?;
        let filtered = select(table, years, &query.country);

        if filtered.is_empty() {
            warn!(
                country = %query.country,
                from = ?query.from_year,
                to = ?query.to_year,
                "Filter matched no observations"
            );
        } else {
            info!(rows = filtered.len(), "Computing dashboard views");
        }

        Ok(DashboardView {
            years,
            country: query.country.to_string(),
            is_empty: filtered.is_empty(),
            summary: summarize(&filtered),
            yearly_trend: yearly_trend(&filtered),
            distribution: temperature_distribution(&filtered, &self.distribution),
            hottest_cities: top_hottest_cities(&filtered, self.top_cities),
            monthly_trend: monthly_trend(&filtered),
            sample: filtered.head(self.sample_rows).to_vec(),
        })
    }
}

fn select(
    table: &ObservationTable,
    years: Option<YearRange>,
    country: &CountryFilter,
) -> ObservationTable {
    match years {
        Some(years) => apply_filter(table, years, country),
        None => ObservationTable::default(),
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(&DashboardConfig::default())
    }
}
