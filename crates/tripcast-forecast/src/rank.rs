//! Region ranking over a date window.

use std::cmp::Ordering;

use tripcast_catalog::RegionCatalog;
use tripcast_core::window::DayRange;
use tripcast_core::{DateWindow, RecommendError};

use crate::normalize::normalize;
use crate::provider::ForecastProvider;
use crate::types::{DayReading, Metric, RegionScore, Score};

/// Score every catalog region over `window` and return the best `top_k`.
///
/// The window is intersected with the provider's horizon first; no overlap is
/// `OutOfHorizon`. Regions whose fetch fails or yields no usable reading are
/// excluded from the ranking, never scored as zero. Threshold metrics score by
/// favorable-day count (descending); lower-is-better metrics by mean value
/// over the days that have readings (ascending). Ties keep catalog order:
/// regions are scored in catalog order and the sort is stable.
///
/// When a threshold query finds zero favorable days anywhere, the result is
/// `NoneFavorable` rather than a meaningless ranking.
pub async fn rank_regions<P: ForecastProvider>(
    provider: &P,
    catalog: &RegionCatalog,
    window: DateWindow,
    top_k: usize,
) -> Result<Vec<RegionScore>, RecommendError> {
    let range = window.clip(provider.horizon())?;
    let metric = provider.metric();

    let mut scores: Vec<RegionScore> = Vec::new();
    for region in catalog.iter() {
        let raw = match provider.fetch_raw(region).await {
            Ok(raw) => raw,
            Err(e) => {
                // Transport trouble is this region's problem, not the query's.
                tracing::debug!("Excluding {} from ranking: {}", region.name, e);
                continue;
            }
        };
        let series = match normalize(&raw, range, metric.aggregation()) {
            Ok(series) => series,
            Err(_) => {
                tracing::debug!("No usable readings for {}", region.name);
                continue;
            }
        };
        scores.push(RegionScore {
            region: region.clone(),
            score: score_series(&series, range, &metric),
        });
    }

    tracing::info!(
        "Scored {} of {} regions over offsets [{}, {}]",
        scores.len(),
        catalog.len(),
        range.lo,
        range.hi
    );

    if scores.is_empty() {
        return Err(RecommendError::NoData);
    }

    if metric.is_threshold() {
        let best = scores
            .iter()
            .map(|s| match s.score {
                Score::Count(count) => count,
                Score::Mean(_) => 0,
            })
            .max()
            .unwrap_or(0);
        if best == 0 {
            return Err(RecommendError::NoneFavorable);
        }
    }

    // Stable sort: equal scores keep catalog insertion order.
    scores.sort_by(|a, b| compare_scores(&a.score, &b.score));
    scores.truncate(top_k);
    Ok(scores)
}

fn score_series(series: &[DayReading], range: DayRange, metric: &Metric) -> Score {
    match metric {
        Metric::Threshold { .. } => {
            let count = range
                .offsets()
                .filter(|&offset| {
                    let value = series
                        .iter()
                        .find(|r| r.day_offset == offset)
                        .map(|r| r.value);
                    metric.favorable(value)
                })
                .count() as u32;
            Score::Count(count)
        }
        // Average only over the days that actually have readings; the
        // normalizer guarantees at least one.
        Metric::LowerIsBetter { .. } => {
            let sum: f64 = series.iter().map(|r| r.value).sum();
            Score::Mean(sum / series.len() as f64)
        }
    }
}

/// Best-first ordering: higher counts win, lower means win. Mixed score kinds
/// cannot occur within one query; treat them as equal so the stable sort
/// leaves catalog order untouched.
fn compare_scores(a: &Score, b: &Score) -> Ordering {
    match (a, b) {
        (Score::Count(x), Score::Count(y)) => y.cmp(x),
        (Score::Mean(x), Score::Mean(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        _ => Ordering::Equal,
    }
}
