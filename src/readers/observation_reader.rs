use crate::error::{DashboardError, Result};
use crate::models::{Observation, ObservationTable};
use crate::utils::constants::{
    COL_AVG_TEMP, COL_CITY, COL_COUNTRY, COL_DATE, COL_LATITUDE, COL_LONGITUDE, DATETIME_FORMATS,
    DATE_FORMATS, MISSING_MARKERS,
};
use crate::utils::coordinates::{parse_hemisphere_coordinate, HemisphereMode};
use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Positions of the required columns within a header row.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    date: usize,
    temperature: usize,
    latitude: usize,
    longitude: usize,
    city: usize,
    country: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| DashboardError::MissingColumn(name.to_string()))
        };

        Ok(Self {
            date: find(COL_DATE)?,
            temperature: find(COL_AVG_TEMP)?,
            latitude: find(COL_LATITUDE)?,
            longitude: find(COL_LONGITUDE)?,
            city: find(COL_CITY)?,
            country: find(COL_COUNTRY)?,
        })
    }
}

/// Shares one allocation per distinct city/country name.
#[derive(Default)]
struct NameInterner {
    names: HashMap<String, Arc<str>>,
}

impl NameInterner {
    fn intern(&mut self, name: &str) -> Arc<str> {
        if let Some(existing) = self.names.get(name) {
            return Arc::clone(existing);
        }
        let shared: Arc<str> = Arc::from(name);
        self.names.insert(name.to_string(), Arc::clone(&shared));
        shared
    }
}

pub struct ObservationReader {
    hemisphere_mode: HemisphereMode,
}

impl ObservationReader {
    pub fn new() -> Self {
        Self {
            hemisphere_mode: HemisphereMode::Strip,
        }
    }

    pub fn with_hemisphere_mode(hemisphere_mode: HemisphereMode) -> Self {
        Self { hemisphere_mode }
    }

    /// Load and clean a raw climate CSV file
    pub fn read_observations(&self, path: &Path) -> Result<ObservationTable> {
        let file = File::open(path).map_err(|source| DashboardError::DataSource {
            path: path.to_path_buf(),
            source,
        })?;

        info!(path = %path.display(), "Loading climate observations");
        self.read_from(BufReader::new(file))
    }

    /// Load and clean raw CSV content from any reader
    pub fn read_from<R: Read>(&self, reader: R) -> Result<ObservationTable> {
        let mut csv_reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
        let columns = ColumnIndex::from_headers(csv_reader.headers()?)?;

        let mut interner = NameInterner::default();
        let mut rows = Vec::new();
        let mut dropped = 0usize;
        let mut record = StringRecord::new();

        while csv_reader.read_record(&mut record)? {
            match self.parse_record(&record, &columns, &mut interner)? {
                Some(observation) => rows.push(observation),
                None => dropped += 1,
            }
        }

        info!(
            rows = rows.len(),
            dropped, "Cleaned observation table ready"
        );

        Ok(ObservationTable::new(rows))
    }

    /// Read a previously exported table as-is, without cleaning
    pub fn read_exported(&self, path: &Path) -> Result<ObservationTable> {
        let file = File::open(path).map_err(|source| DashboardError::DataSource {
            path: path.to_path_buf(),
            source,
        })?;

        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(BufReader::new(file));

        let rows = csv_reader
            .deserialize::<Observation>()
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!(path = %path.display(), rows = rows.len(), "Read exported observations");
        Ok(ObservationTable::new(rows))
    }

    /// Parse one data row; `None` means the row has no temperature and is dropped.
    /// Any spelling that parses to NaN counts as missing.
    fn parse_record(
        &self,
        record: &StringRecord,
        columns: &ColumnIndex,
        interner: &mut NameInterner,
    ) -> Result<Option<Observation>> {
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let field = |idx: usize| record.get(idx).unwrap_or("");

        let temp_str = field(columns.temperature).trim();
        if MISSING_MARKERS.contains(&temp_str) {
            return Ok(None);
        }

        let average_temperature =
            temp_str
                .parse::<f64>()
                .map_err(|_| DashboardError::TemperatureParse {
                    line,
                    value: temp_str.to_string(),
                })?;
        if average_temperature.is_nan() {
            return Ok(None);
        }

        let date_str = field(columns.date);
        let timestamp = parse_date(date_str).ok_or_else(|| DashboardError::DateParse {
            line,
            value: date_str.to_string(),
        })?;

        let latitude = parse_hemisphere_coordinate(field(columns.latitude), self.hemisphere_mode)?;
        let longitude =
            parse_hemisphere_coordinate(field(columns.longitude), self.hemisphere_mode)?;

        Ok(Some(Observation::new(
            timestamp,
            average_temperature,
            latitude,
            longitude,
            interner.intern(field(columns.city)),
            interner.intern(field(columns.country)),
        )))
    }
}

impl Default for ObservationReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a date cell in any of the accepted layouts
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.date())
        })
}
