//! `iaqrank` -- compare an indoor air quality reading against the
//! historical building population.
//!
//! Loads the six exported sensor tables, cleans them into reference
//! distributions once, and prints where the given readings rank.
//!
//! # Environment variables
//!
//! | Variable           | Required | Default         | Description                      |
//! |--------------------|----------|-----------------|----------------------------------|
//! | `IAQRANK_DATA_DIR` | no       | `.`             | Directory holding the CSV files  |
//! | `RUST_LOG`         | no       | `iaqrank=info`  | Log filter                       |
//!
//! # Examples
//!
//! ```text
//! iaqrank compare --co2 650 --voc 220 --temperature 71
//! iaqrank --config site.json summary --json
//! iaqrank live --ticks 20 --interval-ms 500
//! ```

mod live;
mod report;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use iaqrank_core::{
    ColumnPruneRule, PercentileKind, ReadingSet, ReferenceCache, ScoreOptions, SensorType,
};
use iaqrank_loader::{CsvDirectory, SourceConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "iaqrank", version, about = "Rank indoor air quality readings against other buildings")]
struct Cli {
    /// Directory holding the exported sensor CSV files
    #[arg(long, global = true, env = "IAQRANK_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// JSON file describing the source layout
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Drop columns when missing > present * 0.5 instead of at 50% missing
    #[arg(long, global = true)]
    legacy_prune: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score readings against the reference data
    Compare(CompareArgs),
    /// Describe the reference distribution of each sensor
    Summary {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show a simulated live feed
    Live(live::LiveArgs),
}

#[derive(Args)]
struct CompareArgs {
    /// CO2 (ppm)
    #[arg(long)]
    co2: Option<f64>,
    /// Relative humidity (%)
    #[arg(long)]
    humidity: Option<f64>,
    /// PM1.0 mass concentration (µg/m³)
    #[arg(long)]
    pm10: Option<f64>,
    /// PM2.5 mass concentration (µg/m³)
    #[arg(long)]
    pm25: Option<f64>,
    /// Temperature (°F)
    #[arg(long, allow_negative_numbers = true)]
    temperature: Option<f64>,
    /// Volatile organic compounds (ppb)
    #[arg(long)]
    voc: Option<f64>,

    /// Percentile definition
    #[arg(long, value_enum, default_value_t = KindArg::Mean)]
    kind: KindArg,

    /// Apply the narrower CO2 range [300, 2000]
    #[arg(long)]
    refined_ranges: bool,

    /// Decimal places in printed percentages
    #[arg(long, default_value_t = 0)]
    precision: usize,

    /// Print JSON instead of sentences
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Mean,
    Rank,
    Weak,
    Strict,
}

impl From<KindArg> for PercentileKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Mean => PercentileKind::Mean,
            KindArg::Rank => PercentileKind::Rank,
            KindArg::Weak => PercentileKind::Weak,
            KindArg::Strict => PercentileKind::Strict,
        }
    }
}

impl CompareArgs {
    fn readings(&self) -> Result<ReadingSet> {
        let given = [
            (SensorType::Co2, self.co2),
            (SensorType::Humidity, self.humidity),
            (SensorType::Pm10, self.pm10),
            (SensorType::Pm25, self.pm25),
            (SensorType::Temperature, self.temperature),
            (SensorType::Voc, self.voc),
        ];

        let mut readings = ReadingSet::new();
        for (sensor, value) in given {
            let Some(value) = value else { continue };
            let range = if self.refined_ranges {
                sensor.refined_input_range()
            } else {
                sensor.input_range()
            };
            let value = range.check(sensor, value)?;
            readings.insert(sensor, value);
        }

        if readings.is_empty() {
            bail!("no readings given; pass at least one of --co2, --humidity, --pm10, --pm25, --temperature, --voc");
        }
        Ok(readings)
    }
}

fn source_config(cli: &Cli) -> Result<SourceConfig> {
    let mut config = match &cli.config {
        Some(path) => SourceConfig::from_json_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => SourceConfig::default(),
    };
    if let Some(dir) = &cli.data_dir {
        config = config.with_data_dir(dir);
    }
    Ok(config)
}

fn reference_cache(cli: &Cli) -> Result<ReferenceCache<CsvDirectory>> {
    let config = source_config(cli)?;
    let mut options = config.prepare_options();
    if cli.legacy_prune {
        options = options.with_prune_rule(ColumnPruneRule::legacy());
    }

    tracing::info!(data_dir = %config.data_dir.display(), "loading reference data");
    let cache = ReferenceCache::with_options(CsvDirectory::new(config), options);

    for warning in cache.warnings() {
        tracing::warn!("{warning}");
    }
    tracing::info!(
        sensors = cache.references().len(),
        "reference data ready"
    );
    Ok(cache)
}

fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Command::Compare(args) => {
            let readings = args.readings()?;
            let cache = reference_cache(&cli)?;
            let options = ScoreOptions::default().with_kind(args.kind.into());
            let comparison = cache.references().compare(&readings, &options);

            if args.json {
                println!("{}", report::comparison_json(&comparison)?);
            } else {
                println!("{}", report::render_comparison(&comparison, args.precision));
            }
        }
        Command::Summary { json } => {
            let cache = reference_cache(&cli)?;
            if *json {
                println!("{}", report::summary_json(cache.references())?);
            } else {
                println!("{}", report::render_summary(cache.references()));
            }
        }
        Command::Live(args) => live::run(args),
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "iaqrank=info,iaqrank_core=info,iaqrank_loader=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    run(Cli::parse())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("iaqrank").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn compare_collects_given_readings() {
        let cli = parse(&["compare", "--co2", "650", "--temperature", "-5"]);
        let Command::Compare(args) = &cli.command else {
            panic!("expected compare");
        };
        let readings = args.readings().unwrap();
        assert_eq!(readings.len(), 2);
        assert_eq!(readings.get(SensorType::Temperature), Some(-5.0));
    }

    #[test]
    fn refined_range_rejects_low_co2() {
        let cli = parse(&["compare", "--co2", "250", "--refined-ranges"]);
        let Command::Compare(args) = &cli.command else {
            panic!("expected compare");
        };
        assert!(args.readings().is_err());
    }

    #[test]
    fn non_numeric_reading_is_rejected_by_parser() {
        let result = Cli::try_parse_from(["iaqrank", "compare", "--voc", "lots"]);
        assert!(result.is_err());
    }

    #[test]
    fn compare_needs_a_reading() {
        let cli = parse(&["compare"]);
        let Command::Compare(args) = &cli.command else {
            panic!("expected compare");
        };
        assert!(args.readings().is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["summary", "--data-dir", "/tmp/iaq", "--legacy-prune"]);
        assert!(cli.legacy_prune);
        let config = source_config(&cli).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/iaq"));
    }
}
