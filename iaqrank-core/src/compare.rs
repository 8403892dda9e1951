//! Comparing a Set of User Readings
//!
//! A user submits up to one reading per sensor. Each reading is scored
//! against the matching reference distribution on its own; a sensor without
//! reference data, or a reading that cannot be scored, is left out of the
//! result and listed in [`Comparison::skipped`]. Nothing here aborts the
//! batch, and a comparison with no results at all is a normal outcome.
//!
//! ```rust
//! use iaqrank_core::{ReadingSet, ReferenceDistribution, ReferenceSet, ScoreOptions, SensorType};
//!
//! let references = ReferenceSet::new()
//!     .with(SensorType::Co2, ReferenceDistribution::new([400.0, 450.0, 500.0, 550.0, 600.0]));
//!
//! let readings = ReadingSet::new()
//!     .with(SensorType::Co2, 420.0)
//!     .with(SensorType::Voc, 150.0);
//!
//! let comparison = references.compare(&readings, &ScoreOptions::default());
//! assert_eq!(comparison.results.len(), 1);
//! assert_eq!(comparison.results[0].score.score, 80.0);
//! assert_eq!(comparison.skipped.len(), 1);
//! ```

use std::collections::BTreeMap;

use log::warn;
use serde::Serialize;

use crate::errors::{IaqError, IaqResult};
use crate::reference::ReferenceSet;
use crate::scoring::{Score, ScoreOptions, Verdict};
use crate::sensors::SensorType;

/// User readings keyed by sensor, one per sensor at most
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadingSet {
    readings: BTreeMap<SensorType, f64>,
}

impl ReadingSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reading for `sensor`, replacing any earlier one
    pub fn insert(&mut self, sensor: SensorType, value: f64) {
        self.readings.insert(sensor, value);
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with(mut self, sensor: SensorType, value: f64) -> Self {
        self.insert(sensor, value);
        self
    }

    /// Insert after checking the sensor's valid input domain
    pub fn insert_checked(&mut self, sensor: SensorType, value: f64) -> IaqResult<()> {
        let value = sensor.input_range().check(sensor, value)?;
        self.insert(sensor, value);
        Ok(())
    }

    /// Reading for `sensor`, if given
    pub fn get(&self, sensor: SensorType) -> Option<f64> {
        self.readings.get(&sensor).copied()
    }

    /// Iterate over `(sensor, value)` pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (SensorType, f64)> + '_ {
        self.readings.iter().map(|(s, v)| (*s, *v))
    }

    /// Number of readings
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// True if no readings were given
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

impl FromIterator<(SensorType, f64)> for ReadingSet {
    fn from_iter<I: IntoIterator<Item = (SensorType, f64)>>(iter: I) -> Self {
        Self {
            readings: iter.into_iter().collect(),
        }
    }
}

/// Score for one sensor reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricScore {
    /// Sensor scored
    pub sensor: SensorType,
    /// Reading as submitted
    pub value: f64,
    /// Percentile and directional score
    pub score: Score,
}

impl MetricScore {
    /// Verdict against the median building
    pub fn verdict(&self) -> Verdict {
        self.score.verdict()
    }
}

/// Outcome of one comparison request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Comparison {
    /// Scored readings, in sensor key order
    pub results: Vec<MetricScore>,
    /// Readings left out, with the reason
    pub skipped: Vec<IaqError>,
}

impl Comparison {
    /// True if nothing could be scored
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Result for `sensor`, if it was scored
    pub fn get(&self, sensor: SensorType) -> Option<&MetricScore> {
        self.results.iter().find(|r| r.sensor == sensor)
    }
}

impl ReferenceSet {
    /// Score every reading that has reference data
    pub fn compare(&self, readings: &ReadingSet, options: &ScoreOptions) -> Comparison {
        let mut comparison = Comparison::default();

        for (sensor, value) in readings.iter() {
            match self.score(sensor, value, options) {
                Ok(score) => comparison.results.push(MetricScore {
                    sensor,
                    value,
                    score,
                }),
                Err(err) => {
                    warn!("{sensor}: comparison skipped ({err})");
                    comparison.skipped.push(err);
                }
            }
        }

        comparison
    }
}
