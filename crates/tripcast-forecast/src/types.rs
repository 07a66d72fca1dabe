//! Data model for the forecast engine.

use serde::{Deserialize, Serialize};
use tripcast_catalog::Region;

/// One provider timepoint before normalization.
///
/// Several raw readings may share a `day_offset` (sub-day samples); the
/// normalizer folds them. Offsets are signed because providers report in
/// their own local calendar and a sample can land on "yesterday" after
/// timezone shifting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawReading {
    pub day_offset: i64,
    pub value: f64,
}

/// One region-day after normalization. Series are sorted by offset with no
/// duplicates; a missing offset means the provider had nothing for that day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayReading {
    pub day_offset: u32,
    pub value: f64,
}

/// How sub-day samples fold into a single day value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Worst-case signal: the day is as wet as its wettest sample.
    Max,
    /// Arithmetic mean, for concentrations.
    Mean,
}

/// Metric policy: aggregation plus how days are judged.
///
/// The aggregation choice is part of the contract, not an implementation
/// detail: max-vs-mean changes which days come out favorable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metric {
    /// Count-scored: a day is favorable when its value is strictly below the
    /// threshold. Absent data never counts as favorable.
    Threshold { below: f64, aggregation: Aggregation },
    /// Mean-scored, lower is better. No per-day classification; regions are
    /// ordered by their average over the window.
    LowerIsBetter { aggregation: Aggregation },
}

impl Metric {
    /// Precipitation probability in percent; clear below `threshold`.
    pub fn precip_probability(threshold: f64) -> Self {
        Metric::Threshold {
            below: threshold,
            aggregation: Aggregation::Max,
        }
    }

    /// Fine-dust concentration; no threshold, lower is better.
    pub fn pm2_5() -> Self {
        Metric::LowerIsBetter {
            aggregation: Aggregation::Mean,
        }
    }

    pub fn aggregation(&self) -> Aggregation {
        match self {
            Metric::Threshold { aggregation, .. } | Metric::LowerIsBetter { aggregation } => {
                *aggregation
            }
        }
    }

    /// Whether a day with this (possibly absent) value is favorable.
    /// Fails safe: unknown weather is never recommended.
    pub fn favorable(&self, value: Option<f64>) -> bool {
        match self {
            Metric::Threshold { below, .. } => value.is_some_and(|v| v < *below),
            Metric::LowerIsBetter { .. } => false,
        }
    }

    pub fn is_threshold(&self) -> bool {
        matches!(self, Metric::Threshold { .. })
    }
}

/// A maximal run of consecutive favorable offsets, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearInterval {
    pub start_offset: u32,
    pub end_offset: u32,
}

impl ClearInterval {
    pub fn len(&self) -> u32 {
        self.end_offset - self.start_offset + 1
    }

    /// A single clear day, rendered differently from a streak.
    pub fn is_single(&self) -> bool {
        self.start_offset == self.end_offset
    }
}

/// A region's transient score for one query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Score {
    /// Number of favorable days in the window (higher is better).
    Count(u32),
    /// Mean metric value over the window (lower is better).
    Mean(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionScore {
    pub region: Region,
    pub score: Score,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_favorable_is_strict() {
        let metric = Metric::precip_probability(10.0);
        assert!(metric.favorable(Some(9.9)));
        assert!(!metric.favorable(Some(10.0)));
        assert!(!metric.favorable(Some(60.0)));
    }

    #[test]
    fn test_absent_value_is_unfavorable() {
        let metric = Metric::precip_probability(10.0);
        assert!(!metric.favorable(None));
    }

    #[test]
    fn test_ranking_metric_classifies_no_days() {
        let metric = Metric::pm2_5();
        assert!(!metric.favorable(Some(0.1)));
        assert!(!metric.is_threshold());
    }

    #[test]
    fn test_metric_aggregations() {
        assert_eq!(
            Metric::precip_probability(10.0).aggregation(),
            Aggregation::Max
        );
        assert_eq!(Metric::pm2_5().aggregation(), Aggregation::Mean);
    }

    #[test]
    fn test_interval_len_and_single() {
        let single = ClearInterval {
            start_offset: 3,
            end_offset: 3,
        };
        assert_eq!(single.len(), 1);
        assert!(single.is_single());

        let streak = ClearInterval {
            start_offset: 3,
            end_offset: 5,
        };
        assert_eq!(streak.len(), 3);
        assert!(!streak.is_single());
    }
}
