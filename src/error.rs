use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DashboardError>;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Cannot read data source {}: {source}", path.display())]
    DataSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Invalid date '{value}' on line {line}")]
    DateParse { line: u64, value: String },

    #[error("Invalid temperature '{value}' on line {line}")]
    TemperatureParse { line: u64, value: String },

    #[error("Invalid coordinate format: {0}")]
    InvalidCoordinate(String),

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification used by callers to tell a failed load apart from
/// other failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    DataSource,
    Parse,
    Other,
}

impl DashboardError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DashboardError::DataSource { .. } => ErrorKind::DataSource,
            DashboardError::Csv(e) if e.is_io_error() => ErrorKind::DataSource,
            DashboardError::Csv(_)
            | DashboardError::MissingColumn(_)
            | DashboardError::DateParse { .. }
            | DashboardError::TemperatureParse { .. }
            | DashboardError::InvalidCoordinate(_) => ErrorKind::Parse,
            _ => ErrorKind::Other,
        }
    }

    pub fn is_load_error(&self) -> bool {
        matches!(self.kind(), ErrorKind::DataSource | ErrorKind::Parse)
    }
}
