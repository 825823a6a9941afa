use crate::error::Result;
use crate::models::ObservationTable;
use crate::utils::constants::{
    COL_AVG_TEMP, COL_CITY, COL_COUNTRY, COL_DATE, COL_LATITUDE, COL_LONGITUDE, COL_MONTH, COL_YEAR,
};
use csv::WriterBuilder;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Export column order, matching the field order of `Observation`
pub const EXPORT_COLUMNS: [&str; 8] = [
    COL_DATE,
    COL_AVG_TEMP,
    COL_LATITUDE,
    COL_LONGITUDE,
    COL_CITY,
    COL_COUNTRY,
    COL_YEAR,
    COL_MONTH,
];

#[derive(Debug, Clone)]
pub struct ExportInfo {
    pub path: PathBuf,
    pub rows: usize,
    pub file_size: u64,
}

impl ExportInfo {
    pub fn summary(&self) -> String {
        format!(
            "File: {}\n\
            Rows: {}\n\
            Size: {:.1} KB",
            self.path.display(),
            self.rows,
            self.file_size as f64 / 1024.0
        )
    }
}

/// Writes observation tables as comma-delimited, double-quote escaped CSV.
pub struct CsvExporter {
    delimiter: u8,
}

impl CsvExporter {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    /// Write the header plus one line per row; returns the row count
    pub fn write_table<W: Write>(&self, table: &ObservationTable, writer: W) -> Result<usize> {
        // Header is written by hand so an empty table still gets one
        let mut csv_writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .from_writer(writer);

        csv_writer.write_record(EXPORT_COLUMNS)?;
        for row in table {
            csv_writer.serialize(row)?;
        }
        csv_writer.flush()?;

        Ok(table.len())
    }

    pub fn to_csv_string(&self, table: &ObservationTable) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_table(table, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Write to `path`, creating parent directories as needed
    pub fn write_to_path(&self, table: &ObservationTable, path: &Path) -> Result<ExportInfo> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(path)?;
        let rows = self.write_table(table, BufWriter::new(file))?;
        let file_size = std::fs::metadata(path)?.len();

        info!(path = %path.display(), rows, file_size, "Exported filtered observations");

        Ok(ExportInfo {
            path: path.to_path_buf(),
            rows,
            file_size,
        })
    }
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new()
    }
}
