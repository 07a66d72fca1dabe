//! Maximal-run detection over a day-indexed series.

use tripcast_core::window::DayRange;

use crate::types::{ClearInterval, DayReading, Metric};

/// Scan `range` left to right and return the maximal runs of consecutive
/// favorable offsets as [`ClearInterval`]s.
///
/// `series` must be sorted by offset (the normalizer's output). Offsets with
/// no reading count as unfavorable, so a gap always splits a run. The result
/// is sorted by start offset, runs are pairwise non-adjacent, and an
/// all-unfavorable series yields an empty list rather than an error.
pub fn clear_intervals(
    range: DayRange,
    series: &[DayReading],
    metric: &Metric,
) -> Vec<ClearInterval> {
    let mut intervals = Vec::new();
    let mut open: Option<u32> = None;
    let mut cursor = 0;

    for offset in range.offsets() {
        while cursor < series.len() && series[cursor].day_offset < offset {
            cursor += 1;
        }
        let value = series
            .get(cursor)
            .filter(|r| r.day_offset == offset)
            .map(|r| r.value);

        if metric.favorable(value) {
            open.get_or_insert(offset);
        } else if let Some(start_offset) = open.take() {
            intervals.push(ClearInterval {
                start_offset,
                end_offset: offset - 1,
            });
        }
    }

    if let Some(start_offset) = open {
        intervals.push(ClearInterval {
            start_offset,
            end_offset: range.hi,
        });
    }

    intervals
}
