//! In-memory table source for tests, demos and replay
//!
//! ```rust
//! use iaqrank_core::{MemorySource, RawTable, SensorType, TableSource};
//!
//! let source = MemorySource::new()
//!     .with_table(RawTable::new(SensorType::Co2, ["DateTime", "rm1"])
//!         .with_row(&["2021-03-01 08:00", "410"]));
//!
//! assert!(source.load(SensorType::Co2).is_ok());
//! assert!(source.load(SensorType::Voc).is_err());
//! ```

use std::collections::BTreeMap;

use crate::errors::{IaqError, IaqResult};
use crate::sensors::SensorType;
use crate::table::RawTable;
use crate::traits::TableSource;

/// Table source backed by tables held in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    tables: BTreeMap<SensorType, RawTable>,
}

impl MemorySource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the table for its sensor
    pub fn insert(&mut self, table: RawTable) {
        self.tables.insert(table.sensor, table);
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with_table(mut self, table: RawTable) -> Self {
        self.insert(table);
        self
    }

    /// Number of tables held
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// True if no tables are held
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl TableSource for MemorySource {
    fn load(&self, sensor: SensorType) -> IaqResult<RawTable> {
        self.tables
            .get(&sensor)
            .cloned()
            .ok_or_else(|| IaqError::source_unavailable(sensor, "no table loaded"))
    }
}
