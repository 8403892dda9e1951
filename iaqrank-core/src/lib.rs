//! Core engine for IAQRank
//!
//! Ranks a single indoor air quality reading against historical readings
//! from many buildings. Historical data for six sensor types is cleaned once
//! into reference distributions; each user reading is then scored by its
//! percentile within the matching distribution.
//!
//! Key properties:
//! - Each sensor is prepared independently; one broken source never
//!   costs the others their data
//! - Reference data is built once and immutable afterwards
//! - Scoring is a pure function and safe to call from any thread
//!
//! ```no_run
//! use iaqrank_core::{MemorySource, ReadingSet, ReferenceCache, ScoreOptions, SensorType};
//!
//! let cache = ReferenceCache::new(MemorySource::new());
//! let readings = ReadingSet::new().with(SensorType::Co2, 650.0);
//!
//! let comparison = cache.references().compare(&readings, &ScoreOptions::default());
//! for result in &comparison.results {
//!     println!("{}: {:.0}", result.sensor, result.score.score);
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod buffer;
pub mod compare;
pub mod constants;
pub mod distribution;
pub mod errors;
pub mod feed;
pub mod prepare;
pub mod reference;
pub mod scoring;
pub mod sensors;
pub mod source;
pub mod table;
pub mod traits;

// Public API
pub use compare::{Comparison, MetricScore, ReadingSet};
pub use distribution::{DistributionSummary, ReferenceDistribution};
pub use errors::{IaqError, IaqResult};
pub use prepare::{
    prepare, prepare_all, prepare_table, ColumnPruneRule, PrepareOptions, PreparedSensor,
    Preparation, PruneReport,
};
pub use reference::{ReferenceCache, ReferenceSet};
pub use scoring::{
    percentile_of_score, score, score_samples, score_with, Direction, PercentileKind, Score,
    ScoreOptions, Verdict,
};
pub use sensors::{InputRange, SensorType};
pub use source::MemorySource;
pub use table::{RawTable, SensorTable};
pub use traits::TableSource;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
