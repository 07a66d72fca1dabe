//! Date windows expressed as day offsets from "today".
//!
//! User-facing date text arrives as `"M.D"` or `"M.D-M.D"` in the current
//! year. The parser converts it to signed offsets; validation against the
//! provider horizon happens separately so the same window can be checked
//! against providers with different forecast depths.

use chrono::{Datelike, NaiveDate};

use crate::error::RecommendError;

/// Number of forecast-able days a provider supports (exclusive upper offset).
///
/// A configuration input, never a literal in the engine: observed values in
/// this domain range from 7 (grid forecasts) to 30 (timeline forecasts).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Horizon(u32);

impl Horizon {
    pub fn new(days: u32) -> Self {
        Self(days)
    }

    pub fn days(self) -> u32 {
        self.0
    }

    /// Whether a signed day offset falls within `[0, horizon)`.
    pub fn contains(self, offset: i64) -> bool {
        offset >= 0 && offset < i64::from(self.0)
    }
}

/// A requested span of days, inclusive on both ends, relative to today.
///
/// Offsets are signed at this stage: the user may name dates in the past or
/// beyond any horizon. Clipping resolves that against a concrete [`Horizon`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    start: i64,
    end: i64,
}

impl DateWindow {
    /// Build a window, rejecting end-before-start.
    pub fn new(start: i64, end: i64) -> Result<Self, RecommendError> {
        if end < start {
            return Err(RecommendError::Parse(
                "end date precedes start date".to_string(),
            ));
        }
        Ok(Self { start, end })
    }

    /// A one-day window. Always valid.
    pub fn single(offset: i64) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn end(&self) -> i64 {
        self.end
    }

    /// Intersect the window with `[0, horizon)`.
    ///
    /// A window wholly in the past or wholly beyond the horizon is
    /// `OutOfHorizon`; partial overlap clips silently so the engine answers
    /// with whatever forecast data actually exists.
    pub fn clip(&self, horizon: Horizon) -> Result<DayRange, RecommendError> {
        if self.end < 0 || !horizon.contains(self.start.max(0)) {
            return Err(RecommendError::OutOfHorizon);
        }
        let lo = self.start.max(0) as u32;
        let hi = self.end.min(i64::from(horizon.days()) - 1) as u32;
        if i64::from(lo) != self.start || i64::from(hi) != self.end {
            tracing::debug!(
                "Clipped window [{}, {}] to [{}, {}] for horizon {}",
                self.start,
                self.end,
                lo,
                hi,
                horizon.days()
            );
        }
        Ok(DayRange { lo, hi })
    }
}

/// A validated, horizon-clipped offset range, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRange {
    pub lo: u32,
    pub hi: u32,
}

impl DayRange {
    pub fn offsets(self) -> impl Iterator<Item = u32> {
        self.lo..=self.hi
    }

    pub fn contains(self, offset: u32) -> bool {
        offset >= self.lo && offset <= self.hi
    }

    pub fn len(self) -> u32 {
        self.hi - self.lo + 1
    }
}

/// Parse `"M.D"` or `"M.D-M.D"` date text into a window of offsets from
/// `today`. Dates are resolved in the current year, matching the prompt's
/// examples (`3.21-3.25`).
pub fn resolve_date_range(text: &str, today: NaiveDate) -> Result<DateWindow, RecommendError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(RecommendError::Parse("empty date text".to_string()));
    }

    match text.split_once('-') {
        Some((first, second)) => {
            let start = offset_of(first, today)?;
            let end = offset_of(second, today)?;
            DateWindow::new(start, end)
        }
        None => Ok(DateWindow::single(offset_of(text, today)?)),
    }
}

fn offset_of(part: &str, today: NaiveDate) -> Result<i64, RecommendError> {
    let date = parse_month_day(part.trim(), today)?;
    Ok((date - today).num_days())
}

fn parse_month_day(part: &str, today: NaiveDate) -> Result<NaiveDate, RecommendError> {
    let (month, day) = part
        .split_once('.')
        .ok_or_else(|| malformed(part))?;
    let month: u32 = month.trim().parse().map_err(|_| malformed(part))?;
    let day: u32 = day.trim().parse().map_err(|_| malformed(part))?;
    NaiveDate::from_ymd_opt(today.year(), month, day).ok_or_else(|| malformed(part))
}

fn malformed(part: &str) -> RecommendError {
    RecommendError::Parse(format!("expected M.D, got \"{part}\""))
}
