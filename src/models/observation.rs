use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One city/date temperature measurement after cleaning.
///
/// Field order matches the exported CSV layout:
/// `dt, AverageTemperature, Latitude, Longitude, City, Country, Year, Month`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    #[serde(rename = "dt")]
    pub timestamp: NaiveDate,

    #[serde(rename = "AverageTemperature")]
    pub average_temperature: f64,

    #[serde(rename = "Latitude")]
    pub latitude: f64,

    #[serde(rename = "Longitude")]
    pub longitude: f64,

    #[serde(rename = "City")]
    pub city: Arc<str>,

    #[serde(rename = "Country")]
    pub country: Arc<str>,

    #[serde(rename = "Year")]
    pub year: i32,

    #[serde(rename = "Month")]
    pub month: u32,
}

impl Observation {
    pub fn new(
        timestamp: NaiveDate,
        average_temperature: f64,
        latitude: f64,
        longitude: f64,
        city: Arc<str>,
        country: Arc<str>,
    ) -> Self {
        Self {
            timestamp,
            average_temperature,
            latitude,
            longitude,
            city,
            country,
            year: timestamp.year(),
            month: timestamp.month(),
        }
    }

    /// True when `year`/`month` agree with `timestamp`.
    pub fn has_consistent_calendar(&self) -> bool {
        self.year == self.timestamp.year()
            && self.month == self.timestamp.month()
            && (1..=12).contains(&self.month)
    }
}
