//! Shared fixtures for integration tests
//!
//! Builds raw tables shaped like the historical exports: a `DateTime`
//! column followed by one column per monitored room.

#![allow(dead_code)]

use chrono::{Duration, NaiveDate, NaiveDateTime};
use iaqrank_core::{MemorySource, RawTable, SensorType};

/// First timestamp of every generated table
pub fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2021, 3, 1)
        .and_then(|d| d.and_hms_opt(8, 0, 0))
        .expect("valid fixture date")
}

/// Table builder with 15-minute spaced rows
pub struct TableFixture {
    table: RawTable,
    next: NaiveDateTime,
}

impl TableFixture {
    /// Start a table with the given room columns
    pub fn new(sensor: SensorType, rooms: &[&str]) -> Self {
        let headers = std::iter::once("DateTime").chain(rooms.iter().copied());
        Self {
            table: RawTable::new(sensor, headers),
            next: start(),
        }
    }

    /// Append a row; `None` cells are left empty
    pub fn row(mut self, values: &[Option<f64>]) -> Self {
        let ts = self.next.format("%Y-%m-%d %H:%M:%S").to_string();
        let cells = std::iter::once(Some(ts)).chain(values.iter().map(|v| v.map(|x| x.to_string())));
        self.table.push_row(cells);
        self.next += Duration::minutes(15);
        self
    }

    /// Append fully populated rows
    pub fn rows(mut self, rows: &[&[f64]]) -> Self {
        for row in rows {
            let values: Vec<Option<f64>> = row.iter().map(|v| Some(*v)).collect();
            self = self.row(&values);
        }
        self
    }

    pub fn build(self) -> RawTable {
        self.table
    }
}

/// A single-column table holding `values`
pub fn single_column(sensor: SensorType, values: &[f64]) -> RawTable {
    let mut fixture = TableFixture::new(sensor, &["rm1"]);
    for v in values {
        fixture = fixture.row(&[Some(*v)]);
    }
    fixture.build()
}

/// Source with a plausible table for every sensor
pub fn full_source() -> MemorySource {
    MemorySource::new()
        .with_table(single_column(SensorType::Co2, &[400.0, 450.0, 500.0, 550.0, 600.0]))
        .with_table(single_column(SensorType::Humidity, &[30.0, 35.0, 40.0, 45.0]))
        .with_table(single_column(SensorType::Pm10, &[1.0, 2.0, 3.0, 4.0]))
        .with_table(single_column(SensorType::Pm25, &[2.0, 4.0, 6.0, 8.0]))
        .with_table(single_column(SensorType::Temperature, &[68.0, 70.0, 72.0, 74.0]))
        .with_table(single_column(SensorType::Voc, &[100.0, 200.0, 300.0, 400.0]))
}
