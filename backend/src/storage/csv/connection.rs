use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::StorageError;

/// Environment variable that overrides the default data directory
pub const DATA_DIR_ENV: &str = "PLANT_LEDGER_DATA_DIR";

/// CsvConnection manages the data directory and the CSV files inside it
#[derive(Clone, Debug)]
pub struct CsvConnection {
    base_directory: Arc<PathBuf>,
}

impl CsvConnection {
    /// Create a new CSV connection with a base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path).with_context(|| {
                format!("Failed to create data directory {}", base_path.display())
            })?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: Arc::new(base_path),
        })
    }

    /// Create a connection in the default data directory.
    ///
    /// Uses `$PLANT_LEDGER_DATA_DIR` when set, otherwise
    /// `~/Documents/Plant Ledger`.
    pub fn new_default() -> Result<Self> {
        Self::new(Self::default_data_directory()?)
    }

    /// Resolve the default data directory without creating it
    pub fn default_data_directory() -> Result<PathBuf> {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            let dir = dir.trim();
            if !dir.is_empty() {
                info!("Using data directory from {}: {}", DATA_DIR_ENV, dir);
                return Ok(PathBuf::from(dir));
            }
            warn!("{} is set but empty, falling back to default", DATA_DIR_ENV);
        }

        let documents_dir = dirs::document_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join("Documents")))
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;

        Ok(documents_dir.join("Plant Ledger"))
    }

    /// Get the base directory path
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Get the path of a file inside the data directory
    pub fn file_path(&self, file_name: &str) -> PathBuf {
        self.base_directory.join(file_name)
    }

    /// Ensure a CSV file exists, creating it with the given header if missing
    pub fn ensure_file_exists(&self, file_name: &str, header: &[&str]) -> Result<()> {
        let file_path = self.file_path(file_name);

        if !file_path.exists() {
            let mut writer = WriterBuilder::new().from_path(&file_path)?;
            writer.write_record(header)?;
            writer.flush()?;
            debug!("Created {} with header", file_path.display());
        }

        Ok(())
    }

    /// Read every record of a CSV file, creating the file if it is missing.
    ///
    /// A malformed row fails the whole read with its line number.
    pub fn read_records<T: DeserializeOwned>(&self, file_name: &str, header: &[&str]) -> Result<Vec<T>> {
        self.ensure_file_exists(file_name, header)?;

        let file_path = self.file_path(file_name);
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .from_path(&file_path)
            .with_context(|| format!("Failed to open {}", file_path.display()))?;

        let mut records = Vec::new();
        for result in reader.deserialize::<T>() {
            let record = result.map_err(|e| StorageError::InvalidRecord {
                file: file_name.to_string(),
                line: e.position().map(|p| p.line()).unwrap_or(0),
                reason: e.to_string(),
            })?;
            records.push(record);
        }

        debug!("Read {} records from {}", records.len(), file_name);
        Ok(records)
    }

    /// Replace the contents of a CSV file with the given records.
    ///
    /// Writes to a temp file first and renames it over the target.
    pub fn write_records<T: Serialize>(&self, file_name: &str, header: &[&str], records: &[T]) -> Result<()> {
        let file_path = self.file_path(file_name);
        let temp_path = file_path.with_extension("tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to open {}", temp_path.display()))?;

            let mut writer = WriterBuilder::new()
                .has_headers(false)
                .from_writer(BufWriter::new(file));

            writer.write_record(header)?;
            for record in records {
                writer.serialize(record)?;
            }
            writer.flush()?;
        }

        fs::rename(&temp_path, &file_path)
            .with_context(|| format!("Failed to replace {}", file_path.display()))?;

        debug!("Wrote {} records to {}", records.len(), file_name);
        Ok(())
    }
}
