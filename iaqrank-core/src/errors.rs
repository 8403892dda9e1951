//! Error Types for Preparation and Scoring Failures
//!
//! ## Error Categories
//!
//! ### Preparation
//! - `SourceUnavailable`: a raw table could not be loaded or parsed
//! - `MissingTimestamp`: a raw table has no timestamp column
//!
//! Both are collected per sensor and never abort the other sensors.
//!
//! ### Scoring
//! - `EmptyDistribution`: nothing left to rank against after cleaning
//! - `InvalidInput`: the reading is not a finite number
//!
//! ### Input collection
//! - `OutOfRange`: a reading outside the documented domain for its sensor.
//!   Raised only by [`InputRange::check`](crate::sensors::InputRange::check);
//!   the scorer itself accepts any finite value.
//! - `UnknownSensor`: a key that is not one of the six sensor types
//!
//! ## Error Handling Strategy
//!
//! ```rust
//! use iaqrank_core::{IaqError, ReferenceDistribution, Direction, score};
//!
//! fn describe(dist: &ReferenceDistribution, value: f64) -> String {
//!     match score(dist, value, Direction::LowerIsBetter) {
//!         Ok(s) => format!("score {:.1}", s.score),
//!         Err(IaqError::EmptyDistribution { .. }) => "no reference data".to_string(),
//!         Err(IaqError::InvalidInput { reason }) => format!("bad input: {reason}"),
//!         Err(other) => other.to_string(),
//!     }
//! }
//! ```

use thiserror::Error;

use crate::sensors::SensorType;

/// Result type for preparation and scoring operations
pub type IaqResult<T> = Result<T, IaqError>;

/// Errors raised while preparing reference data or scoring a reading
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IaqError {
    /// Raw table for a sensor could not be loaded or parsed
    #[error("{sensor} source unavailable: {reason}")]
    SourceUnavailable {
        /// Sensor whose source failed
        sensor: SensorType,
        /// What went wrong
        reason: String,
    },

    /// Raw table lacks the timestamp column
    #[error("{sensor} source has no '{column}' timestamp column")]
    MissingTimestamp {
        /// Sensor whose table is missing the column
        sensor: SensorType,
        /// Name of the expected column
        column: String,
    },

    /// Nothing to rank against
    #[error("{}", empty_message(.sensor))]
    EmptyDistribution {
        /// Sensor the distribution belongs to, when known
        sensor: Option<SensorType>,
    },

    /// Reading is not a usable number
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// Why the input was rejected
        reason: String,
    },

    /// Reading outside the documented domain for its sensor
    #[error("{sensor} reading {value} outside range [{min}, {max}]")]
    OutOfRange {
        /// Sensor the reading was entered for
        sensor: SensorType,
        /// The rejected reading
        value: f64,
        /// Lower bound of the valid domain
        min: f64,
        /// Upper bound of the valid domain
        max: f64,
    },

    /// Sensor key not recognised
    #[error("unknown sensor type '{0}'")]
    UnknownSensor(String),
}

fn empty_message(sensor: &Option<SensorType>) -> String {
    match sensor {
        Some(s) => format!("{s} has no reference samples"),
        None => "reference distribution is empty".to_string(),
    }
}

impl IaqError {
    /// Build a `SourceUnavailable` error
    pub fn source_unavailable(sensor: SensorType, reason: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            sensor,
            reason: reason.into(),
        }
    }

    /// Build an `InvalidInput` error
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// True for errors that mean a sensor's reference data could not be built
    pub fn is_source_unavailable(&self) -> bool {
        matches!(
            self,
            Self::SourceUnavailable { .. } | Self::MissingTimestamp { .. }
        )
    }

    /// Sensor the error refers to, if any
    pub fn sensor(&self) -> Option<SensorType> {
        match self {
            Self::SourceUnavailable { sensor, .. }
            | Self::MissingTimestamp { sensor, .. }
            | Self::OutOfRange { sensor, .. } => Some(*sensor),
            Self::EmptyDistribution { sensor } => *sensor,
            Self::InvalidInput { .. } | Self::UnknownSensor(_) => None,
        }
    }
}
