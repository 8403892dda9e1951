//! Reference Distributions
//!
//! A reference distribution is the cleaned historical sample for one sensor
//! type. Row and column structure is gone; only the multiset of values is
//! kept, duplicates included, since ranks must reflect true frequencies.
//!
//! Values are stored sorted so that counting how many samples lie below or
//! at a reading is two binary searches.

use serde::Serialize;

/// Immutable, sorted sample of historical readings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceDistribution {
    sorted: Vec<f64>,
}

impl ReferenceDistribution {
    /// Build from unordered values. Non-finite values are discarded.
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        let mut sorted: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
        sorted.sort_by(f64::total_cmp);
        Self { sorted }
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    /// True if there is nothing to rank against
    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    /// Samples in ascending order
    pub fn sorted(&self) -> &[f64] {
        &self.sorted
    }

    /// Samples strictly below `value`
    pub fn count_below(&self, value: f64) -> usize {
        self.sorted.partition_point(|x| *x < value)
    }

    /// Samples at or below `value`
    pub fn count_at_or_below(&self, value: f64) -> usize {
        self.sorted.partition_point(|x| *x <= value)
    }

    /// Samples exactly equal to `value`
    pub fn count_equal(&self, value: f64) -> usize {
        self.count_at_or_below(value) - self.count_below(value)
    }

    /// Smallest sample
    pub fn min(&self) -> Option<f64> {
        self.sorted.first().copied()
    }

    /// Largest sample
    pub fn max(&self) -> Option<f64> {
        self.sorted.last().copied()
    }

    /// Descriptive statistics, `None` when empty
    pub fn summary(&self) -> Option<DistributionSummary> {
        let (min, max) = (self.min()?, self.max()?);
        let n = self.sorted.len();
        let mean = self.sorted.iter().sum::<f64>() / n as f64;
        let median = if n % 2 == 1 {
            self.sorted[n / 2]
        } else {
            (self.sorted[n / 2 - 1] + self.sorted[n / 2]) / 2.0
        };

        Some(DistributionSummary {
            count: n,
            min,
            max,
            mean,
            median,
        })
    }
}

impl FromIterator<f64> for ReferenceDistribution {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Descriptive statistics of a reference distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DistributionSummary {
    /// Number of samples
    pub count: usize,
    /// Smallest sample
    pub min: f64,
    /// Largest sample
    pub max: f64,
    /// Arithmetic mean
    pub mean: f64,
    /// Middle value (mean of the two middle values for even counts)
    pub median: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_with_ties() {
        let dist = ReferenceDistribution::new([20.0, 10.0, 10.0, 10.0]);
        assert_eq!(dist.sorted(), &[10.0, 10.0, 10.0, 20.0]);
        assert_eq!(dist.count_below(10.0), 0);
        assert_eq!(dist.count_equal(10.0), 3);
        assert_eq!(dist.count_at_or_below(15.0), 3);
        assert_eq!(dist.count_below(25.0), 4);
    }

    #[test]
    fn drops_non_finite() {
        let dist: ReferenceDistribution = [1.0, f64::NAN, f64::INFINITY, 2.0].into_iter().collect();
        assert_eq!(dist.len(), 2);
    }

    #[test]
    fn summary() {
        let dist = ReferenceDistribution::new([400.0, 450.0, 500.0, 550.0, 600.0]);
        let s = dist.summary().unwrap();
        assert_eq!(s.count, 5);
        assert_eq!(s.min, 400.0);
        assert_eq!(s.max, 600.0);
        assert_eq!(s.mean, 500.0);
        assert_eq!(s.median, 500.0);

        let even = ReferenceDistribution::new([1.0, 2.0, 3.0, 4.0]);
        assert_eq!(even.summary().unwrap().median, 2.5);

        assert!(ReferenceDistribution::default().summary().is_none());
    }
}
