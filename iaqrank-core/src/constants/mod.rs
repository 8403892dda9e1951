//! Constants for IAQRank Core
//!
//! All numeric values used by preparation, scoring and the live feed are
//! defined here with their unit and origin.
//!
//! ## Organization
//!
//! - **Sensors**: valid input domains per sensor type
//! - **Cleaning**: missing-value thresholds for column pruning
//! - **Scoring**: verdict threshold and percentage scale
//! - **Feed**: plausible indoor bands for synthetic readings

/// Valid input domains for user-entered readings.
pub mod sensors;

/// Thresholds applied while cleaning raw sensor tables.
pub mod cleaning;

/// Percentile scale and verdict threshold.
pub mod scoring;

/// Bands and sizes for the synthetic live feed.
pub mod feed;

pub use cleaning::{DEFAULT_MAX_MISSING_FRACTION, DEFAULT_TIMESTAMP_COLUMN};
pub use scoring::{MEDIAN_SCORE, PERCENT_SCALE};
