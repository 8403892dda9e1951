//! Source Configuration
//!
//! Where the six raw tables live and how they are laid out. Configuration
//! is plain JSON; every field is optional and falls back to the layout of
//! the historical exports:
//!
//! ```json
//! {
//!   "data_dir": "/srv/iaq",
//!   "timestamp_column": "DateTime",
//!   "files": {
//!     "co2": "abi-rm3-carbon-dioxide-co_abi-.csv",
//!     "voc": "voc-2021.csv"
//!   }
//! }
//! ```
//!
//! Files not named in `files` keep their default names. Relative paths are
//! resolved against `data_dir`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use iaqrank_core::constants::DEFAULT_TIMESTAMP_COLUMN;
use iaqrank_core::{PrepareOptions, SensorType};
use serde::{Deserialize, Serialize};

use crate::errors::{LoadError, LoadResult};

/// File name of each sensor's export in the historical data drop
pub fn default_file_name(sensor: SensorType) -> &'static str {
    match sensor {
        SensorType::Co2 => "abi-rm3-carbon-dioxide-co_abi-.csv",
        SensorType::Humidity => "abi-rm3-humidity_abi-rm1-humid.csv",
        SensorType::Pm10 => "abi-rm3-pm-10-mass-concentrati.csv",
        SensorType::Pm25 => "abi-rm3-pm-25-mass-concentrati.csv",
        SensorType::Temperature => "abi-rm3-temperature_abi-rm1-te.csv",
        SensorType::Voc => "abi-rm3-volatile-organic-compo.csv",
    }
}

/// Location and layout of the raw tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Directory holding the CSV files
    pub data_dir: PathBuf,
    /// Header of the timestamp column
    pub timestamp_column: String,
    /// Per-sensor file overrides
    pub files: BTreeMap<SensorType, PathBuf>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            timestamp_column: DEFAULT_TIMESTAMP_COLUMN.to_string(),
            files: BTreeMap::new(),
        }
    }
}

impl SourceConfig {
    /// Default layout rooted at `dir`
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self::default().with_data_dir(dir)
    }

    /// Parse from a JSON string
    pub fn from_json_str(json: &str) -> LoadResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> LoadResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Replace the data directory
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Override the file for one sensor
    pub fn with_file(mut self, sensor: SensorType, file: impl Into<PathBuf>) -> Self {
        self.files.insert(sensor, file.into());
        self
    }

    /// Full path of the table for `sensor`
    pub fn path_for(&self, sensor: SensorType) -> PathBuf {
        let file = self
            .files
            .get(&sensor)
            .cloned()
            .unwrap_or_else(|| PathBuf::from(default_file_name(sensor)));

        if file.is_absolute() {
            file
        } else {
            self.data_dir.join(file)
        }
    }

    /// Preparation options matching this layout
    pub fn prepare_options(&self) -> PrepareOptions {
        PrepareOptions::default().with_timestamp_column(self.timestamp_column.clone())
    }
}
