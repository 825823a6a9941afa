use crate::error::{DashboardError, Result};
use crate::models::ObservationTable;
use crate::readers::ObservationReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tracing::{debug, info};

/// Identifies one version of a data file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileIdentity {
    pub path: PathBuf,
    pub len: u64,
    pub modified: Option<SystemTime>,
}

impl FileIdentity {
    pub fn of(path: &Path) -> Result<Self> {
        let to_source_error = |source: std::io::Error| DashboardError::DataSource {
            path: path.to_path_buf(),
            source,
        };

        let canonical = path.canonicalize().map_err(to_source_error)?;
        let metadata = std::fs::metadata(&canonical).map_err(to_source_error)?;

        Ok(Self {
            path: canonical,
            len: metadata.len(),
            modified: metadata.modified().ok(),
        })
    }
}

/// Holds the cleaned table for the lifetime of a session.
///
/// The table is loaded on first use and handed out as a shared, read-only
/// `Arc`. A changed file (different path, size or mtime) triggers a reload.
pub struct SessionCache {
    reader: ObservationReader,
    entry: Option<(FileIdentity, Arc<ObservationTable>)>,
    loads: usize,
}

impl SessionCache {
    pub fn new(reader: ObservationReader) -> Self {
        Self {
            reader,
            entry: None,
            loads: 0,
        }
    }

    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<ObservationTable>> {
        let identity = FileIdentity::of(path)?;

        if let Some((cached_identity, table)) = &self.entry {
            if *cached_identity == identity {
                debug!(path = %identity.path.display(), "Using cached observation table");
                return Ok(Arc::clone(table));
            }
            info!(path = %identity.path.display(), "Data file changed, reloading");
        }

        let table = Arc::new(self.reader.read_observations(&identity.path)?);
        self.loads += 1;
        self.entry = Some((identity, Arc::clone(&table)));

        Ok(table)
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn is_loaded(&self) -> bool {
        self.entry.is_some()
    }

    /// Number of times the table has been read from disk
    pub fn load_count(&self) -> usize {
        self.loads
    }
}

impl Default for SessionCache {
    fn default() -> Self {
        Self::new(ObservationReader::new())
    }
}
