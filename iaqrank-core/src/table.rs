//! Sensor Tables
//!
//! [`RawTable`] is the boundary type every loader hands over: a header row
//! and string cells, exactly as read. [`SensorTable::parse`] turns it into
//! typed data, a timestamp per row and one numeric column per remaining
//! field, where each cell is either a value or missing.
//!
//! ## Missing cells
//!
//! Empty cells and the tokens `NaN`, `NA`, `N/A`, `null` and `None`
//! (any case) are missing. Any other text in a data column that does not
//! parse as a number makes the whole table unusable.
//!
//! ## Timestamps
//!
//! The timestamp column is a key, not data. It is parsed so malformed exports
//! are caught, but it never enters the reference distribution and row order
//! carries no meaning.
//!
//! A blank timestamp cell (or a missing token) is a missing key, not an
//! error: the row is kept if it holds data, and the all-blank `,,` rows that
//! spreadsheet exports leave at the end fall to row pruning. Text that is
//! present but not a timestamp fails the table.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::constants::cleaning::MISSING_TOKENS;
use crate::errors::{IaqError, IaqResult};
use crate::sensors::SensorType;

const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Unparsed table as read from a source
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    /// Sensor the table belongs to
    pub sensor: SensorType,
    /// Column names, in order
    pub headers: Vec<String>,
    /// Cells per row; `None` for cells absent from a short record
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    /// Create an empty table with the given headers
    pub fn new<I, S>(sensor: SensorType, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sensor,
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row of cells
    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        self.rows
            .push(cells.into_iter().map(|c| c.map(Into::into)).collect());
    }

    /// Builder-style [`push_row`](Self::push_row) for string slices.
    ///
    /// Empty strings become missing cells.
    pub fn with_row(mut self, cells: &[&str]) -> Self {
        self.push_row(
            cells
                .iter()
                .map(|c| if c.is_empty() { None } else { Some(*c) }),
        );
        self
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim() == name)
    }
}

/// One numeric field of a sensor table
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Field name from the header
    pub name: String,
    /// One entry per row, `None` where missing
    pub values: Vec<Option<f64>>,
}

impl Column {
    /// Count of missing entries
    pub fn missing(&self) -> usize {
        self.values.iter().filter(|v| v.is_none()).count()
    }

    /// Count of present entries
    pub fn present(&self) -> usize {
        self.values.len() - self.missing()
    }
}

/// Typed sensor table: timestamps plus numeric columns of equal length
#[derive(Debug, Clone, PartialEq)]
pub struct SensorTable {
    /// Sensor the table belongs to
    pub sensor: SensorType,
    /// Row keys, `None` where the cell was blank
    pub timestamps: Vec<Option<NaiveDateTime>>,
    /// Data fields
    pub columns: Vec<Column>,
}

impl SensorTable {
    /// Parse a raw table, using `timestamp_column` as the row key
    pub fn parse(raw: &RawTable, timestamp_column: &str) -> IaqResult<Self> {
        let sensor = raw.sensor;
        let ts_idx = raw
            .column_index(timestamp_column)
            .ok_or_else(|| IaqError::MissingTimestamp {
                sensor,
                column: timestamp_column.to_string(),
            })?;

        let mut timestamps = Vec::with_capacity(raw.rows.len());
        let mut columns: Vec<Column> = raw
            .headers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != ts_idx)
            .map(|(_, name)| Column {
                name: name.trim().to_string(),
                values: Vec::with_capacity(raw.rows.len()),
            })
            .collect();

        for (row_no, row) in raw.rows.iter().enumerate() {
            let ts_cell = row.get(ts_idx).and_then(|c| c.as_deref()).unwrap_or("");
            let ts = if is_missing_token(ts_cell) {
                None
            } else {
                let parsed = parse_timestamp(ts_cell).ok_or_else(|| {
                    IaqError::source_unavailable(
                        sensor,
                        format!("row {}: unparseable timestamp '{}'", row_no + 1, ts_cell),
                    )
                })?;
                Some(parsed)
            };
            timestamps.push(ts);

            let data_cells = (0..raw.headers.len()).filter(|i| *i != ts_idx);
            for (column, cell_idx) in columns.iter_mut().zip(data_cells) {
                let cell = row.get(cell_idx).and_then(|c| c.as_deref());
                let value = parse_cell(cell).map_err(|text| {
                    IaqError::source_unavailable(
                        sensor,
                        format!(
                            "row {}: column '{}' has non-numeric value '{}'",
                            row_no + 1,
                            column.name,
                            text
                        ),
                    )
                })?;
                column.values.push(value);
            }
        }

        Ok(Self {
            sensor,
            timestamps,
            columns,
        })
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.timestamps.len()
    }

    /// Names of the data columns
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

/// True if the cell text denotes a missing value
pub fn is_missing_token(text: &str) -> bool {
    let text = text.trim();
    MISSING_TOKENS
        .iter()
        .any(|token| text.eq_ignore_ascii_case(token))
}

/// Parse one data cell. `Err` carries the offending text.
fn parse_cell(cell: Option<&str>) -> Result<Option<f64>, String> {
    let Some(text) = cell else {
        return Ok(None);
    };

    if is_missing_token(text) {
        return Ok(None);
    }

    match text.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        Ok(_) => Ok(None),
        Err(_) => Err(text.trim().to_string()),
    }
}

/// Parse a timestamp in any of the export formats seen in sensor dumps
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn co2_table() -> RawTable {
        RawTable::new(SensorType::Co2, ["DateTime", "rm1", "rm3"])
            .with_row(&["2021-03-01 08:00:00", "410", "455.5"])
            .with_row(&["2021-03-01 08:15:00", "", "NaN"])
            .with_row(&["2021-03-01T08:30:00", "430", "470"])
    }

    #[test]
    fn parses_columns_and_missing_cells() {
        let table = SensorTable::parse(&co2_table(), "DateTime").unwrap();

        assert_eq!(table.row_count(), 3);
        assert_eq!(table.column_names(), vec!["rm1", "rm3"]);
        assert_eq!(table.columns[0].values, vec![Some(410.0), None, Some(430.0)]);
        assert_eq!(table.columns[1].missing(), 1);
        assert_eq!(table.columns[1].present(), 2);
    }

    #[test]
    fn missing_timestamp_column() {
        let raw = RawTable::new(SensorType::Voc, ["time", "rm1"]).with_row(&["x", "1"]);
        let err = SensorTable::parse(&raw, "DateTime").unwrap_err();
        assert!(matches!(err, IaqError::MissingTimestamp { sensor: SensorType::Voc, .. }));
    }

    #[test]
    fn bad_timestamp_fails_table() {
        let raw = RawTable::new(SensorType::Voc, ["DateTime", "rm1"])
            .with_row(&["not a date", "1"]);
        let err = SensorTable::parse(&raw, "DateTime").unwrap_err();
        assert!(err.is_source_unavailable());
    }

    #[test]
    fn blank_timestamp_is_a_missing_key() {
        let raw = RawTable::new(SensorType::Co2, ["DateTime", "rm1"])
            .with_row(&["2021-03-01 08:00", "410"])
            .with_row(&["", "420"])
            .with_row(&["NaN", ""]);
        let table = SensorTable::parse(&raw, "DateTime").unwrap();

        assert_eq!(table.row_count(), 3);
        assert!(table.timestamps[0].is_some());
        assert_eq!(table.timestamps[1], None);
        assert_eq!(table.timestamps[2], None);
        assert_eq!(table.columns[0].values, vec![Some(410.0), Some(420.0), None]);
    }

    #[test]
    fn non_numeric_cell_fails_table() {
        let raw = RawTable::new(SensorType::Pm10, ["DateTime", "rm1"])
            .with_row(&["2021-03-01 08:00:00", "offline"]);
        let err = SensorTable::parse(&raw, "DateTime").unwrap_err();
        assert!(err.to_string().contains("offline"));
    }

    #[test]
    fn short_rows_pad_with_missing() {
        let mut raw = RawTable::new(SensorType::Pm25, ["DateTime", "a", "b"]);
        raw.push_row([Some("2021-03-01 08:00"), Some("3.5")]);
        let table = SensorTable::parse(&raw, "DateTime").unwrap();
        assert_eq!(table.columns[1].values, vec![None]);
    }

    #[test]
    fn timestamp_formats() {
        for text in [
            "2021-03-01 08:00:00",
            "2021-03-01 08:00:00.250",
            "2021-03-01T08:00:00",
            "2021-03-01T08:00:00Z",
            "2021-03-01T08:00:00-05:00",
            "2021-03-01T08:00",
            "2021-03-01 08:00",
            "03/01/2021 08:00",
            "03/01/2021 08:00:00",
            "2021-03-01",
        ] {
            assert!(parse_timestamp(text).is_some(), "failed on {text}");
        }
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn missing_tokens() {
        for token in ["", " ", "NaN", "nan", "NA", "n/a", "NULL", "None"] {
            assert!(is_missing_token(token), "{token:?}");
        }
        assert!(!is_missing_token("0"));
    }
}
