//! Percentile Scoring
//!
//! ## Percentile of score
//!
//! The percentile of a reading is the share of the reference sample lying
//! below it. Samples equal to the reading count at half weight:
//!
//! ```text
//! percentile = (count_below + 0.5 * count_equal) / total * 100
//!
//! D = [10, 10, 10, 20], v = 10  ->  (0 + 1.5) / 4 * 100 = 37.5
//! ```
//!
//! Readings outside the observed range are valid and land on 0 or 100.
//! [`PercentileKind`] also offers the other three classic definitions.
//!
//! ## Direction
//!
//! | direction | metrics | score |
//! |-----------|---------|-------|
//! | `LowerIsBetter` | CO2, PM1.0, PM2.5, VOC | `100 - percentile` |
//! | `HigherIsBetter` | temperature, humidity | `percentile` |
//!
//! For the same reading the two directions are exact complements.
//!
//! ## Verdict
//!
//! A score of 50 or more beats the median building. Scores are returned at
//! full precision; rounding belongs to whoever prints them.
//!
//! ```rust
//! use iaqrank_core::{score, Direction, ReferenceDistribution, Verdict};
//!
//! let dist = ReferenceDistribution::new([400.0, 450.0, 500.0, 550.0, 600.0]);
//! let s = score(&dist, 420.0, Direction::LowerIsBetter)?;
//! assert_eq!(s.percentile, 20.0);
//! assert_eq!(s.score, 80.0);
//! assert_eq!(s.verdict(), Verdict::Better(80.0));
//! # Ok::<(), iaqrank_core::IaqError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::scoring::{MEDIAN_SCORE, PERCENT_SCALE, TIE_WEIGHT};
use crate::distribution::ReferenceDistribution;
use crate::errors::{IaqError, IaqResult};

/// Definition of percentile-of-score to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PercentileKind {
    /// Ties count at half weight
    #[default]
    Mean,
    /// Average rank of the reading among the samples
    Rank,
    /// Share of samples at or below the reading
    Weak,
    /// Share of samples strictly below the reading
    Strict,
}

/// Which end of the scale is good
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Pollutant-style metric; score is the complement of the percentile
    LowerIsBetter,
    /// Percentile is read directly as the score
    HigherIsBetter,
}

impl Direction {
    /// Map the `reverse` flag: `true` means the percentile is the score
    pub fn from_reverse(reverse: bool) -> Self {
        if reverse {
            Self::HigherIsBetter
        } else {
            Self::LowerIsBetter
        }
    }

    /// Inverse of [`from_reverse`](Self::from_reverse)
    pub fn is_reverse(self) -> bool {
        matches!(self, Self::HigherIsBetter)
    }

    fn apply(self, percentile: f64) -> f64 {
        match self {
            Self::LowerIsBetter => PERCENT_SCALE - percentile,
            Self::HigherIsBetter => percentile,
        }
    }
}

/// Comparison against the median building
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "verdict", content = "percent", rename_all = "lowercase")]
pub enum Verdict {
    /// Better than this percentage of buildings
    Better(f64),
    /// Worse than this percentage of buildings
    Worse(f64),
}

impl Verdict {
    /// Derive the verdict from a directional score
    pub fn from_score(score: f64) -> Self {
        if score >= MEDIAN_SCORE {
            Self::Better(score)
        } else {
            Self::Worse(PERCENT_SCALE - score)
        }
    }

    /// True if the reading meets or beats the median
    pub fn meets_median(&self) -> bool {
        matches!(self, Self::Better(_))
    }

    /// The percentage carried by the verdict
    pub fn percent(&self) -> f64 {
        match *self {
            Self::Better(p) | Self::Worse(p) => p,
        }
    }
}

/// Result of scoring one reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Score {
    /// Percentile of the reading in the reference sample, in [0, 100]
    pub percentile: f64,
    /// Directional goodness, in [0, 100]
    pub score: f64,
    /// Direction used
    pub direction: Direction,
}

impl Score {
    /// Verdict against the median
    pub fn verdict(&self) -> Verdict {
        Verdict::from_score(self.score)
    }

    /// Shorthand for `verdict().meets_median()`
    pub fn meets_median(&self) -> bool {
        self.score >= MEDIAN_SCORE
    }

    /// Score rounded to whole percent, for display
    pub fn rounded(&self) -> f64 {
        self.score.round()
    }
}

/// Options for scoring
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreOptions {
    /// Percentile definition
    pub kind: PercentileKind,
}

impl ScoreOptions {
    /// Use a different percentile definition
    pub fn with_kind(mut self, kind: PercentileKind) -> Self {
        self.kind = kind;
        self
    }
}

/// Percentile of `value` within `distribution`
pub fn percentile_of_score(
    distribution: &ReferenceDistribution,
    value: f64,
    kind: PercentileKind,
) -> IaqResult<f64> {
    if !value.is_finite() {
        return Err(IaqError::invalid_input("reading is not a finite number"));
    }
    if distribution.is_empty() {
        return Err(IaqError::EmptyDistribution { sensor: None });
    }

    let n = distribution.len() as f64;
    let below = distribution.count_below(value) as f64;
    let at_or_below = distribution.count_at_or_below(value) as f64;

    let percentile = match kind {
        PercentileKind::Mean => (below + TIE_WEIGHT * (at_or_below - below)) / n * PERCENT_SCALE,
        PercentileKind::Rank => {
            let bump = if at_or_below > below { 1.0 } else { 0.0 };
            (below + at_or_below + bump) * (PERCENT_SCALE / 2.0) / n
        }
        PercentileKind::Weak => at_or_below / n * PERCENT_SCALE,
        PercentileKind::Strict => below / n * PERCENT_SCALE,
    };

    Ok(percentile.clamp(0.0, PERCENT_SCALE))
}

/// Score `value` with the default mean-rank percentile
pub fn score(
    distribution: &ReferenceDistribution,
    value: f64,
    direction: Direction,
) -> IaqResult<Score> {
    score_with(distribution, value, direction, &ScoreOptions::default())
}

/// Score `value` with explicit options
pub fn score_with(
    distribution: &ReferenceDistribution,
    value: f64,
    direction: Direction,
    options: &ScoreOptions,
) -> IaqResult<Score> {
    let percentile = percentile_of_score(distribution, value, options.kind)?;
    Ok(Score {
        percentile,
        score: direction.apply(percentile),
        direction,
    })
}

/// Score against an unsorted sample, returning only the percentage.
///
/// `reverse` selects [`Direction::HigherIsBetter`].
pub fn score_samples(samples: &[f64], value: f64, reverse: bool) -> IaqResult<f64> {
    let distribution = ReferenceDistribution::new(samples.iter().copied());
    score(&distribution, value, Direction::from_reverse(reverse)).map(|s| s.score)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ppm() -> ReferenceDistribution {
        ReferenceDistribution::new([400.0, 450.0, 500.0, 550.0, 600.0])
    }

    #[test]
    fn ties_count_half() {
        let dist = ReferenceDistribution::new([10.0, 10.0, 10.0, 20.0]);
        let p = percentile_of_score(&dist, 10.0, PercentileKind::Mean).unwrap();
        assert_eq!(p, 37.5);
    }

    #[test]
    fn kinds_on_a_tied_value() {
        let dist = ppm();
        let at = |kind| percentile_of_score(&dist, 450.0, kind).unwrap();
        assert_eq!(at(PercentileKind::Strict), 20.0);
        assert_eq!(at(PercentileKind::Mean), 30.0);
        assert_eq!(at(PercentileKind::Weak), 40.0);
        assert_eq!(at(PercentileKind::Rank), 40.0);
    }

    #[test]
    fn rank_kind_between_samples() {
        let dist = ReferenceDistribution::new([1.0, 2.0, 3.0, 4.0]);
        let p = percentile_of_score(&dist, 2.5, PercentileKind::Rank).unwrap();
        assert_eq!(p, 50.0);
    }

    #[test]
    fn outside_observed_range() {
        let dist = ppm();
        assert_eq!(percentile_of_score(&dist, 1.0, PercentileKind::Mean).unwrap(), 0.0);
        assert_eq!(percentile_of_score(&dist, 9999.0, PercentileKind::Mean).unwrap(), 100.0);
        assert_eq!(score(&dist, -5.0, Direction::LowerIsBetter).unwrap().score, 100.0);
    }

    #[test]
    fn directions_are_complements() {
        let dist = ppm();
        let low = score(&dist, 520.0, Direction::LowerIsBetter).unwrap();
        let high = score(&dist, 520.0, Direction::HigherIsBetter).unwrap();
        assert_eq!(low.percentile, high.percentile);
        assert_eq!(high.score, 60.0);
        assert_eq!(low.score, 40.0);
    }

    #[test]
    fn verdict_threshold() {
        assert_eq!(Verdict::from_score(50.0), Verdict::Better(50.0));
        assert_eq!(Verdict::from_score(49.9).percent(), 100.0 - 49.9);
        assert!(!Verdict::from_score(10.0).meets_median());
        assert_eq!(Verdict::from_score(30.0), Verdict::Worse(70.0));
    }

    #[test]
    fn empty_and_invalid() {
        let empty = ReferenceDistribution::default();
        assert!(matches!(
            score(&empty, 1.0, Direction::LowerIsBetter),
            Err(IaqError::EmptyDistribution { .. })
        ));
        assert!(matches!(
            score(&ppm(), f64::NAN, Direction::LowerIsBetter),
            Err(IaqError::InvalidInput { .. })
        ));
    }

    #[test]
    fn slice_contract() {
        let samples = [600.0, 400.0, 550.0, 450.0, 500.0];
        assert_eq!(score_samples(&samples, 420.0, false).unwrap(), 80.0);
        assert_eq!(score_samples(&samples, 420.0, true).unwrap(), 20.0);
        assert!(score_samples(&[], 420.0, true).is_err());
    }

    #[test]
    fn rounding_is_left_to_the_caller() {
        let dist = ReferenceDistribution::new([1.0, 2.0, 3.0]);
        let s = score(&dist, 1.5, Direction::HigherIsBetter).unwrap();
        assert!((s.score - 100.0 / 3.0).abs() < 1e-12);
        assert_eq!(s.rounded(), 33.0);
    }
}
