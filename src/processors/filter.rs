use crate::error::{DashboardError, Result};
use crate::models::ObservationTable;
use crate::utils::constants::ALL_COUNTRIES;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Inclusive range of calendar years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    start: i32,
    end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Result<Self> {
        if start > end {
            return Err(DashboardError::InvalidFilter(format!(
                "Year range start {} is after end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    pub fn single(year: i32) -> Self {
        Self {
            start: year,
            end: year,
        }
    }

    /// The full year span observed in `table`, `None` for an empty table
    pub fn spanning(table: &ObservationTable) -> Option<Self> {
        table
            .year_span()
            .map(|(start, end)| Self { start, end })
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    pub fn end(&self) -> i32 {
        self.end
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.start..=self.end).contains(&year)
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Country restriction; `All` means no restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CountryFilter {
    #[default]
    All,
    Only(String),
}

impl CountryFilter {
    pub fn matches(&self, country: &str) -> bool {
        match self {
            CountryFilter::All => true,
            CountryFilter::Only(wanted) => wanted == country,
        }
    }
}

impl FromStr for CountryFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed == ALL_COUNTRIES {
            Ok(CountryFilter::All)
        } else {
            Ok(CountryFilter::Only(trimmed.to_string()))
        }
    }
}

impl From<Option<String>> for CountryFilter {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(name) => name.parse().unwrap_or_default(),
            None => CountryFilter::All,
        }
    }
}

impl fmt::Display for CountryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountryFilter::All => write!(f, "{}", ALL_COUNTRIES),
            CountryFilter::Only(name) => write!(f, "{}", name),
        }
    }
}

/// Rows with a year inside `years` and a matching country
pub fn apply_filter(
    table: &ObservationTable,
    years: YearRange,
    country: &CountryFilter,
) -> ObservationTable {
    let filtered = table.select(|row| years.contains(row.year) && country.matches(&row.country));

    debug!(
        years = %years,
        country = %country,
        matched = filtered.len(),
        total = table.len(),
        "Applied observation filter"
    );

    filtered
}
