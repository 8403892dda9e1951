//! Reference Sets and the Build-Once Cache
//!
//! ## Overview
//!
//! A [`ReferenceSet`] maps each available sensor type to its reference
//! distribution. Sensors whose data failed to load are simply absent; every
//! consumer treats absence as "unavailable" and moves on.
//!
//! ## Cache once, compute many
//!
//! Deriving distributions means reading and cleaning six tables, which is
//! far more work than any single comparison. [`ReferenceCache`] builds the
//! set lazily on first use and never again for its lifetime:
//!
//! ```text
//! first get()  ──> prepare_all(source) ──> Preparation (stored)
//! later get()  ──────────────────────────> &Preparation
//! ```
//!
//! The built set is immutable, so the cache can be shared between threads
//! and scored against concurrently without locks.
//!
//! ```rust
//! use iaqrank_core::{MemorySource, RawTable, ReferenceCache, SensorType};
//!
//! let source = MemorySource::new().with_table(
//!     RawTable::new(SensorType::Voc, ["DateTime", "rm1"])
//!         .with_row(&["2021-03-01 08:00", "120"])
//!         .with_row(&["2021-03-01 08:15", "180"]),
//! );
//!
//! let cache = ReferenceCache::new(source);
//! assert!(!cache.is_built());
//! assert!(cache.references().contains(SensorType::Voc));
//! assert!(!cache.references().contains(SensorType::Co2));
//! assert!(cache.is_built());
//! ```

use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::distribution::ReferenceDistribution;
use crate::errors::{IaqError, IaqResult};
use crate::prepare::{prepare_all, PrepareOptions, Preparation};
use crate::scoring::{score_with, Score, ScoreOptions};
use crate::sensors::SensorType;
use crate::traits::TableSource;

/// Immutable map from sensor type to reference distribution
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceSet {
    distributions: BTreeMap<SensorType, ReferenceDistribution>,
}

impl ReferenceSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, sensor: SensorType, distribution: ReferenceDistribution) {
        self.distributions.insert(sensor, distribution);
    }

    /// Builder for hand-made sets. Empty distributions are not stored.
    pub fn with(mut self, sensor: SensorType, distribution: ReferenceDistribution) -> Self {
        if !distribution.is_empty() {
            self.insert(sensor, distribution);
        }
        self
    }

    /// Distribution for `sensor`, if available
    pub fn get(&self, sensor: SensorType) -> Option<&ReferenceDistribution> {
        self.distributions.get(&sensor)
    }

    /// True if `sensor` has reference data
    pub fn contains(&self, sensor: SensorType) -> bool {
        self.distributions.contains_key(&sensor)
    }

    /// Sensors with reference data, in key order
    pub fn sensors(&self) -> impl Iterator<Item = SensorType> + '_ {
        self.distributions.keys().copied()
    }

    /// Iterate over `(sensor, distribution)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (SensorType, &ReferenceDistribution)> {
        self.distributions.iter().map(|(s, d)| (*s, d))
    }

    /// Number of sensors with reference data
    pub fn len(&self) -> usize {
        self.distributions.len()
    }

    /// True when no comparison is possible at all
    pub fn is_empty(&self) -> bool {
        self.distributions.is_empty()
    }

    /// Score one reading in the sensor's own direction
    pub fn score(&self, sensor: SensorType, value: f64, options: &ScoreOptions) -> IaqResult<Score> {
        let distribution = self
            .get(sensor)
            .ok_or(IaqError::EmptyDistribution { sensor: Some(sensor) })?;

        score_with(distribution, value, sensor.direction(), options).map_err(|err| match err {
            IaqError::EmptyDistribution { .. } => IaqError::EmptyDistribution { sensor: Some(sensor) },
            IaqError::InvalidInput { reason } => {
                IaqError::invalid_input(format!("{sensor}: {reason}"))
            }
            other => other,
        })
    }
}

/// Lazily built, never rebuilt reference data
pub struct ReferenceCache<S> {
    source: S,
    options: PrepareOptions,
    built: OnceLock<Preparation>,
}

impl<S: TableSource> ReferenceCache<S> {
    /// Cache over `source` with default preparation options
    pub fn new(source: S) -> Self {
        Self::with_options(source, PrepareOptions::default())
    }

    /// Cache over `source` with explicit preparation options
    pub fn with_options(source: S, options: PrepareOptions) -> Self {
        Self {
            source,
            options,
            built: OnceLock::new(),
        }
    }

    /// Full preparation outcome, building it on first call
    pub fn preparation(&self) -> &Preparation {
        self.built
            .get_or_init(|| prepare_all(&self.source, &self.options))
    }

    /// Reference set, building it on first call
    pub fn references(&self) -> &ReferenceSet {
        &self.preparation().references
    }

    /// Sensors skipped during the build
    pub fn warnings(&self) -> &[IaqError] {
        &self.preparation().warnings
    }

    /// True once the set has been built
    pub fn is_built(&self) -> bool {
        self.built.get().is_some()
    }
}
