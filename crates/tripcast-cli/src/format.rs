//! Render engine results as console lines.
//!
//! The engine returns structured values only; everything user-visible is
//! assembled here.

use chrono::{Days, NaiveDate};
use tripcast_forecast::{ClearInterval, DayReading, RegionScore, Score, SunTimes};
use tripcast_search::BlogPost;

fn date_at(today: NaiveDate, offset: u32) -> NaiveDate {
    today + Days::new(u64::from(offset))
}

/// One line per clear interval, single days rendered differently from
/// streaks.
pub fn interval_lines(intervals: &[ClearInterval], today: NaiveDate) -> Vec<String> {
    intervals
        .iter()
        .map(|interval| {
            if interval.is_single() {
                format!("  - {} (single clear day)", date_at(today, interval.start_offset))
            } else {
                format!(
                    "  - {} ~ {} ({}-day clear streak)",
                    date_at(today, interval.start_offset),
                    date_at(today, interval.end_offset),
                    interval.len()
                )
            }
        })
        .collect()
}

/// Numbered ranking lines, best first.
pub fn ranking_lines(scores: &[RegionScore]) -> Vec<String> {
    scores
        .iter()
        .enumerate()
        .map(|(index, entry)| match entry.score {
            Score::Count(1) => format!("  {}. {} (1 clear day)", index + 1, entry.region.name),
            Score::Count(count) => {
                format!("  {}. {} ({} clear days)", index + 1, entry.region.name, count)
            }
            Score::Mean(mean) => format!(
                "  {}. {} (avg PM2.5 {:.1} ug/m3)",
                index + 1,
                entry.region.name,
                mean
            ),
        })
        .collect()
}

/// Lowest-value days for one region, best first.
pub fn best_day_lines(readings: &[DayReading], today: NaiveDate) -> Vec<String> {
    readings
        .iter()
        .map(|reading| {
            format!(
                "  - {}: PM2.5 {:.1} ug/m3",
                date_at(today, reading.day_offset),
                reading.value
            )
        })
        .collect()
}

pub fn sun_lines(times: &[SunTimes]) -> Vec<String> {
    times
        .iter()
        .map(|t| format!("  {}: sunrise {}, sunset {}", t.date, t.sunrise, t.sunset))
        .collect()
}

pub fn post_lines(posts: &[BlogPost]) -> Vec<String> {
    posts
        .iter()
        .enumerate()
        .flat_map(|(index, post)| {
            vec![
                format!("{}. {}", index + 1, post.title),
                format!("   link: {}", post.link),
                format!("   by {} ({})", post.blogger, post.posted),
                format!("   {}", post.summary),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tripcast_catalog::Region;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 10).unwrap()
    }

    #[test]
    fn test_single_day_and_streak_render_differently() {
        let intervals = [
            ClearInterval { start_offset: 0, end_offset: 1 },
            ClearInterval { start_offset: 3, end_offset: 3 },
        ];
        let lines = interval_lines(&intervals, today());
        assert_eq!(lines[0], "  - 2026-06-10 ~ 2026-06-11 (2-day clear streak)");
        assert_eq!(lines[1], "  - 2026-06-13 (single clear day)");
    }

    #[test]
    fn test_count_ranking_lines() {
        let scores = [
            RegionScore {
                region: Region::named("Busan"),
                score: Score::Count(4),
            },
            RegionScore {
                region: Region::named("Jeju"),
                score: Score::Count(1),
            },
        ];
        let lines = ranking_lines(&scores);
        assert_eq!(lines[0], "  1. Busan (4 clear days)");
        assert_eq!(lines[1], "  2. Jeju (1 clear day)");
    }

    #[test]
    fn test_mean_ranking_lines() {
        let scores = [RegionScore {
            region: Region::named("Jeju"),
            score: Score::Mean(8.44),
        }];
        let lines = ranking_lines(&scores);
        assert_eq!(lines[0], "  1. Jeju (avg PM2.5 8.4 ug/m3)");
    }

    #[test]
    fn test_best_day_lines() {
        let readings = [DayReading { day_offset: 2, value: 6.25 }];
        let lines = best_day_lines(&readings, today());
        assert_eq!(lines[0], "  - 2026-06-12: PM2.5 6.2 ug/m3");
    }
}
