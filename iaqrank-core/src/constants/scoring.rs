//! Scoring Scale

/// Percentages run from 0 to 100.
pub const PERCENT_SCALE: f64 = 100.0;

/// Score at or above which a reading is better than the median building.
pub const MEDIAN_SCORE: f64 = 50.0;

/// Weight given to samples equal to the reading under mean-rank scoring.
pub const TIE_WEIGHT: f64 = 0.5;
