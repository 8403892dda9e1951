//! CSV Table Reading
//!
//! Reads one exported sensor table into a [`RawTable`]. No interpretation
//! happens here beyond splitting records: the header row becomes the column
//! names and empty cells become missing. Parsing timestamps and numbers is
//! left to preparation so every source gets the same rules.
//!
//! ## Format
//!
//! ```csv
//! DateTime,ABI RM1,ABI RM3
//! 2021-03-01 08:00:00,412.0,455.5
//! 2021-03-01 08:15:00,,470.0
//! ```
//!
//! Rows may be shorter or longer than the header; missing trailing cells are
//! missing values and extra cells are ignored. A UTF-8 byte order mark on
//! the first header is stripped.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use iaqrank_core::{IaqResult, RawTable, SensorType, TableSource};
use log::debug;

use crate::config::SourceConfig;
use crate::errors::{LoadError, LoadResult};

/// Read a table from any CSV byte stream
pub fn read_table<R: Read>(sensor: SensorType, reader: R) -> LoadResult<RawTable> {
    let mut csv = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = csv
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                h.trim_start_matches('\u{feff}').to_string()
            } else {
                h.to_string()
            }
        })
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(LoadError::NoHeader);
    }

    let mut table = RawTable::new(sensor, headers);
    for record in csv.records() {
        let record = record?;
        table.push_row(
            record
                .iter()
                .map(|cell| if cell.is_empty() { None } else { Some(cell) }),
        );
    }

    debug!("{sensor}: read {} rows", table.len());
    Ok(table)
}

/// Read a table from a CSV file
pub fn read_table_path(sensor: SensorType, path: impl AsRef<Path>) -> LoadResult<RawTable> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_table(sensor, file)
}

/// Table source reading one CSV file per sensor from disk
#[derive(Debug, Clone, Default)]
pub struct CsvDirectory {
    config: SourceConfig,
}

impl CsvDirectory {
    /// Source laid out per `config`
    pub fn new(config: SourceConfig) -> Self {
        Self { config }
    }

    /// Source using default file names under `dir`
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self::new(SourceConfig::in_dir(dir))
    }

    /// Layout in use
    pub fn config(&self) -> &SourceConfig {
        &self.config
    }
}

impl TableSource for CsvDirectory {
    fn load(&self, sensor: SensorType) -> IaqResult<RawTable> {
        let path = self.config.path_for(sensor);
        read_table_path(sensor, &path).map_err(|err| err.into_unavailable(sensor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_headers_and_cells() {
        let data = "\u{feff}DateTime, rm1 ,rm3\n2021-03-01 08:00:00,412, 455.5\n2021-03-01 08:15:00,,470\n";
        let table = read_table(SensorType::Co2, data.as_bytes()).unwrap();

        assert_eq!(table.headers, vec!["DateTime", "rm1", "rm3"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0][2].as_deref(), Some("455.5"));
        assert_eq!(table.rows[1][1], None);
    }

    #[test]
    fn ragged_rows_are_accepted() {
        let data = "DateTime,a,b\n2021-03-01 08:00,1\n2021-03-01 08:15,1,2,3\n";
        let table = read_table(SensorType::Voc, data.as_bytes()).unwrap();
        assert_eq!(table.rows[0].len(), 2);
        assert_eq!(table.rows[1].len(), 4);
    }

    #[test]
    fn empty_input_has_no_header() {
        let err = read_table(SensorType::Voc, "".as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::NoHeader));
    }

    #[test]
    fn missing_file_is_unavailable() {
        let source = CsvDirectory::in_dir("/definitely/not/here");
        let err = source.load(SensorType::Humidity).unwrap_err();
        assert!(err.is_source_unavailable());
        assert!(err.to_string().contains("abi-rm3-humidity_abi-rm1-humid.csv"));
    }
}
