//! Cleaning Thresholds

/// Fraction of missing entries at which a column is dropped.
///
/// A column with `missing / rows >= 0.5` carries no more information than
/// noise and is removed whole, never imputed.
pub const DEFAULT_MAX_MISSING_FRACTION: f64 = 0.5;

/// Ratio used by the historical pruning rule: drop when
/// `missing > present * 0.5`.
pub const LEGACY_MISSING_TO_PRESENT_RATIO: f64 = 0.5;

/// Name of the timestamp column in the exported sensor tables.
pub const DEFAULT_TIMESTAMP_COLUMN: &str = "DateTime";

/// Cell contents treated as missing (compared case-insensitively).
pub const MISSING_TOKENS: [&str; 6] = ["", "nan", "na", "n/a", "null", "none"];
