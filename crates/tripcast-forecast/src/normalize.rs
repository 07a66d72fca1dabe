//! Fold raw provider readings into a day-indexed series.

use std::collections::BTreeMap;

use tripcast_core::window::DayRange;
use tripcast_core::RecommendError;

use crate::types::{Aggregation, DayReading, RawReading};

/// Reduce raw per-timepoint readings to at most one [`DayReading`] per offset
/// in `range`, sorted ascending with unique offsets.
///
/// Sub-day samples for the same offset fold with the metric's aggregator.
/// Offsets outside the range, negative offsets, and non-finite values are
/// dropped rather than zero-filled; a day the provider said nothing about
/// stays absent. If nothing in the range survives, the whole region has no
/// usable data and the call signals `NoData` so the ranker can exclude it.
pub fn normalize(
    raw: &[RawReading],
    range: DayRange,
    aggregation: Aggregation,
) -> Result<Vec<DayReading>, RecommendError> {
    let mut by_day: BTreeMap<u32, Vec<f64>> = BTreeMap::new();

    for reading in raw {
        if reading.day_offset < 0 {
            continue;
        }
        let offset = reading.day_offset as u32;
        if !range.contains(offset) {
            continue;
        }
        if !reading.value.is_finite() {
            tracing::debug!("Dropping non-finite reading at offset {}", offset);
            continue;
        }
        by_day.entry(offset).or_default().push(reading.value);
    }

    if by_day.is_empty() {
        return Err(RecommendError::NoData);
    }

    Ok(by_day
        .into_iter()
        .map(|(day_offset, values)| DayReading {
            day_offset,
            value: fold(aggregation, &values),
        })
        .collect())
}

fn fold(aggregation: Aggregation, values: &[f64]) -> f64 {
    match aggregation {
        Aggregation::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        Aggregation::Mean => values.iter().sum::<f64>() / values.len() as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range() -> DayRange {
        DayRange { lo: 0, hi: 6 }
    }

    fn raw(day_offset: i64, value: f64) -> RawReading {
        RawReading { day_offset, value }
    }

    #[test]
    fn test_max_folds_subday_samples() {
        // Three-hourly precipitation samples for one day: worst case wins.
        let readings = [raw(2, 10.0), raw(2, 60.0), raw(2, 30.0)];
        let series = normalize(&readings, range(), Aggregation::Max).unwrap();
        assert_eq!(series, vec![DayReading { day_offset: 2, value: 60.0 }]);
    }

    #[test]
    fn test_mean_folds_subday_samples() {
        let readings = [raw(0, 10.0), raw(0, 20.0), raw(0, 30.0)];
        let series = normalize(&readings, range(), Aggregation::Mean).unwrap();
        assert_eq!(series, vec![DayReading { day_offset: 0, value: 20.0 }]);
    }

    #[test]
    fn test_series_is_sorted_and_unique() {
        let readings = [raw(5, 1.0), raw(1, 2.0), raw(5, 3.0), raw(3, 4.0)];
        let series = normalize(&readings, range(), Aggregation::Max).unwrap();
        let offsets: Vec<u32> = series.iter().map(|r| r.day_offset).collect();
        assert_eq!(offsets, vec![1, 3, 5]);
    }

    #[test]
    fn test_out_of_range_offsets_are_dropped() {
        let readings = [raw(-1, 5.0), raw(2, 5.0), raw(9, 5.0)];
        let series = normalize(&readings, range(), Aggregation::Max).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].day_offset, 2);
    }

    #[test]
    fn test_missing_days_stay_absent() {
        let readings = [raw(0, 5.0), raw(4, 5.0)];
        let series = normalize(&readings, range(), Aggregation::Max).unwrap();
        // No zero-filling between day 0 and day 4.
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn test_all_unusable_signals_no_data() {
        let readings = [raw(10, 5.0), raw(-3, 5.0), raw(2, f64::NAN)];
        let result = normalize(&readings, range(), Aggregation::Max);
        assert!(matches!(result, Err(RecommendError::NoData)));
    }

    #[test]
    fn test_empty_input_signals_no_data() {
        assert!(matches!(
            normalize(&[], range(), Aggregation::Mean),
            Err(RecommendError::NoData)
        ));
    }
}
