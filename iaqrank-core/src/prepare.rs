//! Data Preparation
//!
//! ## Overview
//!
//! Turns one raw table per sensor into one [`ReferenceDistribution`] per
//! sensor. Each sensor is handled on its own, so a broken export for one
//! metric never costs the others their reference data.
//!
//! ## Steps
//!
//! ```text
//! RawTable ──parse──> SensorTable ──prune columns──> ──prune rows──> ──flatten──> ReferenceDistribution
//!           (timestamp    (drop sparse fields       (drop incomplete   (every kept value,
//!            required)     whole, never impute)      rows, never fill)  duplicates retained)
//! ```
//!
//! ### Column pruning
//!
//! A column is judged on its fraction of missing entries. Under the default
//! rule a column with `missing / rows >= 0.5` is dropped entirely:
//!
//! ```text
//! rows = 10, missing = 6  ->  0.6 >= 0.5  ->  dropped
//! rows = 10, missing = 5  ->  0.5 >= 0.5  ->  dropped
//! rows = 10, missing = 4  ->  0.4 <  0.5  ->  kept
//! ```
//!
//! The older export scripts used `missing > present * 0.5`, which drops at
//! a missing fraction above 1/3. It is available as
//! [`ColumnPruneRule::MissingToPresentRatio`] for reproducing those numbers.
//!
//! ### Row pruning
//!
//! After column pruning, any row still holding a missing value in a kept
//! column is removed.
//!
//! ## Usage
//!
//! ```rust
//! use iaqrank_core::{prepare, PrepareOptions, RawTable, SensorType};
//!
//! let raw = RawTable::new(SensorType::Co2, ["DateTime", "rm1", "rm2"])
//!     .with_row(&["2021-03-01 08:00:00", "410", ""])
//!     .with_row(&["2021-03-01 08:15:00", "420", ""])
//!     .with_row(&["2021-03-01 08:30:00", "", "600"]);
//!
//! let prepared = prepare(&raw, &PrepareOptions::default())?;
//! assert_eq!(prepared.report.dropped_columns, vec!["rm2".to_string()]);
//! assert_eq!(prepared.distribution.len(), 2);
//! # Ok::<(), iaqrank_core::IaqError>(())
//! ```

use log::{debug, info, warn};

use crate::constants::cleaning::{
    DEFAULT_MAX_MISSING_FRACTION, DEFAULT_TIMESTAMP_COLUMN, LEGACY_MISSING_TO_PRESENT_RATIO,
};
use crate::distribution::ReferenceDistribution;
use crate::errors::{IaqError, IaqResult};
use crate::reference::ReferenceSet;
use crate::sensors::SensorType;
use crate::table::{RawTable, SensorTable};
use crate::traits::TableSource;

/// When a column is considered too sparse to keep
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnPruneRule {
    /// Drop when `missing / rows >= limit`
    MissingFraction(f64),
    /// Drop when `missing > present * ratio`
    MissingToPresentRatio(f64),
}

impl Default for ColumnPruneRule {
    fn default() -> Self {
        Self::MissingFraction(DEFAULT_MAX_MISSING_FRACTION)
    }
}

impl ColumnPruneRule {
    /// The rule used by the historical export scripts
    pub fn legacy() -> Self {
        Self::MissingToPresentRatio(LEGACY_MISSING_TO_PRESENT_RATIO)
    }

    /// Decide whether a column with these counts is dropped
    pub fn should_drop(&self, missing: usize, present: usize) -> bool {
        let total = missing + present;
        match *self {
            Self::MissingFraction(limit) => {
                total == 0 || missing as f64 / total as f64 >= limit
            }
            Self::MissingToPresentRatio(ratio) => missing as f64 > present as f64 * ratio,
        }
    }
}

/// Options controlling preparation
#[derive(Debug, Clone, PartialEq)]
pub struct PrepareOptions {
    /// Column pruning rule
    pub prune_rule: ColumnPruneRule,
    /// Header of the timestamp column
    pub timestamp_column: String,
}

impl Default for PrepareOptions {
    fn default() -> Self {
        Self {
            prune_rule: ColumnPruneRule::default(),
            timestamp_column: DEFAULT_TIMESTAMP_COLUMN.to_string(),
        }
    }
}

impl PrepareOptions {
    /// Use a different column pruning rule
    pub fn with_prune_rule(mut self, rule: ColumnPruneRule) -> Self {
        self.prune_rule = rule;
        self
    }

    /// Use a different timestamp column header
    pub fn with_timestamp_column(mut self, column: impl Into<String>) -> Self {
        self.timestamp_column = column.into();
        self
    }
}

/// What cleaning did to one sensor table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PruneReport {
    /// Rows in the raw table
    pub rows_in: usize,
    /// Columns removed for being too sparse
    pub dropped_columns: Vec<String>,
    /// Columns that survived
    pub kept_columns: Vec<String>,
    /// Rows removed for holding a missing value
    pub dropped_rows: usize,
    /// Values in the resulting distribution
    pub samples: usize,
}

/// Cleaned result for one sensor
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedSensor {
    /// Sensor the data belongs to
    pub sensor: SensorType,
    /// Ranking population
    pub distribution: ReferenceDistribution,
    /// Cleaning summary
    pub report: PruneReport,
}

/// Drop columns the rule judges too sparse. Returns the dropped names.
pub fn prune_columns(table: &mut SensorTable, rule: ColumnPruneRule) -> Vec<String> {
    let mut dropped = Vec::new();
    table.columns.retain(|column| {
        if rule.should_drop(column.missing(), column.present()) {
            info!(
                "{}: column '{}' dropped, {} of {} values missing",
                table.sensor,
                column.name,
                column.missing(),
                column.values.len()
            );
            dropped.push(column.name.clone());
            false
        } else {
            true
        }
    });
    dropped
}

/// Drop rows with a missing value in any remaining column. Returns the count.
pub fn prune_rows(table: &mut SensorTable) -> usize {
    let rows = table.row_count();
    let keep: Vec<bool> = (0..rows)
        .map(|row| table.columns.iter().all(|c| c.values[row].is_some()))
        .collect();

    let dropped = keep.iter().filter(|k| !**k).count();
    if dropped == 0 {
        return 0;
    }

    let mut flags = keep.iter();
    table.timestamps.retain(|_| *flags.next().unwrap_or(&false));
    for column in &mut table.columns {
        let mut flags = keep.iter();
        column.values.retain(|_| *flags.next().unwrap_or(&false));
    }

    info!("{}: {} incomplete rows dropped", table.sensor, dropped);
    dropped
}

/// Collect every remaining value into one sample, column by column
pub fn flatten(table: &SensorTable) -> Vec<f64> {
    table
        .columns
        .iter()
        .flat_map(|c| c.values.iter().flatten().copied())
        .collect()
}

/// Clean an already parsed table
pub fn prepare_table(mut table: SensorTable, options: &PrepareOptions) -> PreparedSensor {
    let rows_in = table.row_count();
    let dropped_columns = prune_columns(&mut table, options.prune_rule);
    let dropped_rows = prune_rows(&mut table);
    let samples = flatten(&table);

    debug!("{}: {} reference samples", table.sensor, samples.len());

    let report = PruneReport {
        rows_in,
        dropped_columns,
        kept_columns: table.columns.iter().map(|c| c.name.clone()).collect(),
        dropped_rows,
        samples: samples.len(),
    };

    PreparedSensor {
        sensor: table.sensor,
        distribution: ReferenceDistribution::new(samples),
        report,
    }
}

/// Parse and clean one raw table
pub fn prepare(raw: &RawTable, options: &PrepareOptions) -> IaqResult<PreparedSensor> {
    let table = SensorTable::parse(raw, &options.timestamp_column)?;
    Ok(prepare_table(table, options))
}

/// Outcome of preparing every sensor
#[derive(Debug, Clone, Default)]
pub struct Preparation {
    /// Distributions for sensors that produced at least one sample
    pub references: ReferenceSet,
    /// Cleaning summaries for sensors that parsed
    pub reports: Vec<(SensorType, PruneReport)>,
    /// Sensors left out, with the reason
    pub warnings: Vec<IaqError>,
}

impl Preparation {
    /// True if no sensor has reference data
    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }
}

/// Prepare every sensor type from `source`.
///
/// Failures are recorded in [`Preparation::warnings`] and never stop the
/// remaining sensors. A sensor whose cleaning leaves no values is treated
/// as unavailable too.
pub fn prepare_all<S>(source: &S, options: &PrepareOptions) -> Preparation
where
    S: TableSource + ?Sized,
{
    let mut preparation = Preparation::default();

    for sensor in SensorType::ALL {
        let prepared = source
            .load(sensor)
            .and_then(|raw| prepare(&raw, options));

        match prepared {
            Ok(prepared) if prepared.distribution.is_empty() => {
                warn!("{sensor}: no values left after cleaning, skipping");
                preparation.reports.push((sensor, prepared.report));
                preparation
                    .warnings
                    .push(IaqError::EmptyDistribution { sensor: Some(sensor) });
            }
            Ok(prepared) => {
                preparation.reports.push((sensor, prepared.report));
                preparation.references.insert(sensor, prepared.distribution);
            }
            Err(err) => {
                warn!("{sensor}: skipped ({err})");
                preparation.warnings.push(err);
            }
        }
    }

    info!(
        "prepared {} of {} sensor types",
        preparation.references.len(),
        SensorType::ALL.len()
    );
    preparation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;
    use chrono::NaiveDate;

    fn table_with(columns: Vec<Column>) -> SensorTable {
        let rows = columns.first().map(|c| c.values.len()).unwrap_or(0);
        let base = NaiveDate::from_ymd_opt(2021, 3, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        SensorTable {
            sensor: SensorType::Co2,
            timestamps: (0..rows)
                .map(|i| Some(base + chrono::Duration::minutes(15 * i as i64)))
                .collect(),
            columns,
        }
    }

    fn column(name: &str, values: &[Option<f64>]) -> Column {
        Column {
            name: name.to_string(),
            values: values.to_vec(),
        }
    }

    #[test]
    fn sixty_percent_missing_column_is_dropped() {
        let sparse: Vec<Option<f64>> = (0..10)
            .map(|i| if i < 6 { None } else { Some(i as f64) })
            .collect();
        let full: Vec<Option<f64>> = (0..10).map(|i| Some(i as f64)).collect();
        let mut table = table_with(vec![column("sparse", &sparse), column("full", &full)]);

        let dropped = prune_columns(&mut table, ColumnPruneRule::default());

        assert_eq!(dropped, vec!["sparse".to_string()]);
        assert_eq!(table.column_names(), vec!["full"]);
    }

    #[test]
    fn threshold_boundary() {
        let rule = ColumnPruneRule::default();
        assert!(rule.should_drop(5, 5));
        assert!(!rule.should_drop(4, 6));
        assert!(rule.should_drop(0, 0));

        let legacy = ColumnPruneRule::legacy();
        // 4 missing, 6 present: 4 > 3 under the historical rule
        assert!(legacy.should_drop(4, 6));
        assert!(!legacy.should_drop(3, 6));
        assert!(!legacy.should_drop(0, 0));
    }

    #[test]
    fn rows_with_gaps_are_removed_not_filled() {
        let mut table = table_with(vec![
            column("a", &[Some(1.0), None, Some(3.0), Some(4.0)]),
            column("b", &[Some(10.0), Some(20.0), Some(30.0), None]),
        ]);

        let dropped = prune_rows(&mut table);

        assert_eq!(dropped, 2);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.columns[0].values, vec![Some(1.0), Some(3.0)]);
        assert_eq!(table.columns[1].values, vec![Some(10.0), Some(30.0)]);
    }

    #[test]
    fn flatten_keeps_duplicates() {
        let table = table_with(vec![
            column("a", &[Some(5.0), Some(5.0)]),
            column("b", &[Some(5.0), Some(7.0)]),
        ]);
        let mut values = flatten(&table);
        values.sort_by(f64::total_cmp);
        assert_eq!(values, vec![5.0, 5.0, 5.0, 7.0]);
    }

    #[test]
    fn prepare_reports_work_done() {
        let raw = RawTable::new(SensorType::Humidity, ["rm1", "DateTime", "rm2", "rm3"])
            .with_row(&["40", "2021-03-01 08:00", "", "41"])
            .with_row(&["42", "2021-03-01 08:15", "", ""])
            .with_row(&["44", "2021-03-01 08:30", "50", "45"]);

        let prepared = prepare(&raw, &PrepareOptions::default()).unwrap();

        assert_eq!(prepared.report.rows_in, 3);
        assert_eq!(prepared.report.dropped_columns, vec!["rm2".to_string()]);
        assert_eq!(prepared.report.kept_columns, vec!["rm1".to_string(), "rm3".to_string()]);
        assert_eq!(prepared.report.dropped_rows, 1);
        assert_eq!(prepared.report.samples, 4);
        assert_eq!(prepared.distribution.sorted(), &[40.0, 41.0, 44.0, 45.0]);
    }

    #[test]
    fn trailing_blank_row_is_pruned() {
        let raw = RawTable::new(SensorType::Co2, ["DateTime", "rm1", "rm2"])
            .with_row(&["2021-03-01 08:00", "410", "500"])
            .with_row(&["2021-03-01 08:15", "420", "510"])
            .with_row(&["2021-03-01 08:30", "430", "520"])
            .with_row(&["", "", ""]);

        let prepared = prepare(&raw, &PrepareOptions::default()).unwrap();

        assert!(prepared.report.dropped_columns.is_empty());
        assert_eq!(prepared.report.dropped_rows, 1);
        assert_eq!(prepared.distribution.len(), 6);
    }

    #[test]
    fn blank_timestamp_keeps_its_value() {
        let raw = RawTable::new(SensorType::Co2, ["DateTime", "rm1"])
            .with_row(&["2021-03-01 08:00", "410"])
            .with_row(&["", "420"]);

        let prepared = prepare(&raw, &PrepareOptions::default()).unwrap();

        assert_eq!(prepared.report.dropped_rows, 0);
        assert_eq!(prepared.distribution.sorted(), &[410.0, 420.0]);
    }

    #[test]
    fn custom_timestamp_column() {
        let raw = RawTable::new(SensorType::Voc, ["ts", "rm1"])
            .with_row(&["2021-03-01 08:00", "120"]);
        let options = PrepareOptions::default().with_timestamp_column("ts");
        assert_eq!(prepare(&raw, &options).unwrap().distribution.len(), 1);
    }
}
