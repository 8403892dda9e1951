//! Cleaning Report Example
//!
//! Prepares reference data from in-memory tables, including one table with
//! no timestamp column and one that cleans down to nothing, and prints what
//! cleaning did to each sensor.
//!
//! ```bash
//! cargo run -p iaqrank-core --example 02_cleaning_report
//! ```

use iaqrank_core::{prepare_all, ColumnPruneRule, MemorySource, PrepareOptions, RawTable, SensorType};

fn main() {
    let source = MemorySource::new()
        .with_table(
            RawTable::new(SensorType::Co2, ["DateTime", "rm1", "rm2", "rm3"])
                .with_row(&["2021-03-01 08:00:00", "410", "", "615"])
                .with_row(&["2021-03-01 08:15:00", "430", "", "640"])
                .with_row(&["2021-03-01 08:30:00", "455", "700", ""])
                .with_row(&["2021-03-01 08:45:00", "470", "", "655"]),
        )
        .with_table(
            RawTable::new(SensorType::Temperature, ["DateTime", "rm1"])
                .with_row(&["2021-03-01 08:00:00", "71.5"])
                .with_row(&["2021-03-01 08:15:00", "72.0"]),
        )
        .with_table(
            RawTable::new(SensorType::Humidity, ["Timestamp", "rm1"])
                .with_row(&["2021-03-01 08:00:00", "41"]),
        )
        .with_table(
            RawTable::new(SensorType::Voc, ["DateTime", "rm1"])
                .with_row(&["2021-03-01 08:00:00", "NaN"])
                .with_row(&["2021-03-01 08:15:00", ""]),
        );

    for (name, rule) in [
        ("missing fraction >= 0.5", ColumnPruneRule::default()),
        ("missing > present * 0.5", ColumnPruneRule::legacy()),
    ] {
        println!("Rule: {name}");
        let preparation = prepare_all(&source, &PrepareOptions::default().with_prune_rule(rule));

        for (sensor, report) in &preparation.reports {
            println!(
                "  {:<12} rows {:>2}  dropped columns {:?}  dropped rows {}  samples {}",
                sensor.to_string(),
                report.rows_in,
                report.dropped_columns,
                report.dropped_rows,
                report.samples
            );
        }
        for warning in &preparation.warnings {
            println!("  skipped: {warning}");
        }
        println!();
    }
}
