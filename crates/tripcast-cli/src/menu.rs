//! Interactive menu loop.
//!
//! Thin I/O over the engine: every branch prompts, calls one engine
//! operation, and prints. Engine signals map to console lines; nothing here
//! aborts the process.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use chrono::{Local, NaiveDate};
use tripcast_catalog::{grid_catalog, latlon_catalog, Region, RegionCatalog, RegionTreeLoader};
use tripcast_core::window::DayRange;
use tripcast_core::{window::resolve_date_range, Config, RecommendError};
use tripcast_forecast::{
    clear_intervals, normalize, rank_regions, AirQualityForecast, ForecastProvider,
    TimelineForecast, VillageForecast,
};
use tripcast_search::BlogSearchClient;

use crate::format;

/// Which source answers precipitation queries, decided at bootstrap.
enum PrecipSource {
    /// 7-day grid feed, exact-name catalog. Needs no API key.
    Village(VillageForecast),
    /// 30-day timeline API, substring lookup against the remote catalog.
    Timeline(TimelineForecast),
}

pub struct App {
    top_k: usize,
    precip: PrecipSource,
    precip_catalog: RegionCatalog,
    air: AirQualityForecast,
    air_catalog: RegionCatalog,
    sun: TimelineForecast,
    search: BlogSearchClient,
}

impl App {
    /// Build catalogs, providers, and clients once; everything is read-only
    /// afterwards.
    pub async fn bootstrap(config: Config) -> Result<Self> {
        let threshold = config.recommend.clear_pop_threshold;

        let timeline = TimelineForecast::new(&config.timeline, threshold)?;
        let (precip, precip_catalog) = if config.timeline.api_key.is_empty() {
            (
                PrecipSource::Village(VillageForecast::new(&config.village, threshold)?),
                grid_catalog(),
            )
        } else {
            let catalog = match RegionTreeLoader::new()?.load().await {
                Ok(catalog) => catalog,
                Err(e) => {
                    tracing::warn!("Falling back to built-in regions: {}", e);
                    grid_catalog()
                }
            };
            (PrecipSource::Timeline(timeline.clone()), catalog)
        };

        Ok(Self {
            top_k: config.recommend.top_k,
            precip,
            precip_catalog,
            air: AirQualityForecast::new(&config.air)?,
            air_catalog: latlon_catalog(),
            sun: timeline,
            search: BlogSearchClient::new(&config.search)?,
        })
    }

    pub async fn run(&self) -> Result<()> {
        loop {
            println!();
            println!("========================================");
            println!("        Tripcast travel planner");
            println!("========================================");
            println!(" 1. Rain-aware recommendations");
            println!(" 2. Air-quality recommendations");
            println!(" 3. Sunrise & sunset");
            println!(" 4. Place search");
            println!(" 0. Exit");
            println!("========================================");

            match prompt("Menu > ")?.as_str() {
                "1" => self.precip_menu().await?,
                "2" => self.air_menu().await?,
                "3" => self.sun_times().await?,
                "4" => self.place_search().await?,
                "0" => {
                    println!("Goodbye!");
                    return Ok(());
                }
                _ => println!("Please pick 1-4 or 0."),
            }
        }
    }

    async fn precip_menu(&self) -> Result<()> {
        println!("\n 1) Best regions for dates   2) Clear days for a region");
        match prompt("> ")?.as_str() {
            "1" => self.precip_regions().await,
            "2" => self.precip_dates().await,
            _ => {
                println!("Please pick 1 or 2.");
                Ok(())
            }
        }
    }

    async fn precip_regions(&self) -> Result<()> {
        let text = prompt("Dates (e.g. 6.10-6.24 or 6.15) > ")?;
        let today = Local::now().date_naive();
        let window = match resolve_date_range(&text, today) {
            Ok(window) => window,
            Err(e) => return report(e),
        };

        let result = match &self.precip {
            PrecipSource::Village(provider) => {
                rank_regions(provider, &self.precip_catalog, window, self.top_k).await
            }
            PrecipSource::Timeline(provider) => {
                rank_regions(provider, &self.precip_catalog, window, self.top_k).await
            }
        };

        match result {
            Ok(scores) => {
                println!("\nMost clear days in that window:");
                for line in format::ranking_lines(&scores) {
                    println!("{line}");
                }
                Ok(())
            }
            Err(e) => report(e),
        }
    }

    async fn precip_dates(&self) -> Result<()> {
        let text = prompt("Region > ")?;
        let Some(region) = self.find_precip_region(&text) else {
            println!("Unknown region: \"{}\"", text.trim());
            if matches!(self.precip, PrecipSource::Village(_)) {
                println!("Available: {}", self.precip_catalog.names().join(", "));
            }
            return Ok(());
        };

        let today = Local::now().date_naive();
        let result = match &self.precip {
            PrecipSource::Village(provider) => clear_day_lines(provider, region, today).await,
            PrecipSource::Timeline(provider) => clear_day_lines(provider, region, today).await,
        };

        match result {
            Ok(lines) => {
                println!("\nClear days for {}:", region.name);
                for line in lines {
                    println!("{line}");
                }
                Ok(())
            }
            Err(e) => report(e),
        }
    }

    fn find_precip_region(&self, text: &str) -> Option<&Region> {
        let text = text.trim();
        match &self.precip {
            PrecipSource::Village(_) => self.precip_catalog.find_exact(text).ok(),
            PrecipSource::Timeline(_) => self.precip_catalog.find_substring(text).ok(),
        }
    }

    async fn air_menu(&self) -> Result<()> {
        println!("\n 1) Best regions for dates   2) Best days for a region");
        match prompt("> ")?.as_str() {
            "1" => self.air_regions().await,
            "2" => self.air_dates().await,
            _ => {
                println!("Please pick 1 or 2.");
                Ok(())
            }
        }
    }

    async fn air_regions(&self) -> Result<()> {
        let text = prompt("Dates (e.g. 6.10 or 6.10-6.12) > ")?;
        let today = Local::now().date_naive();
        let window = match resolve_date_range(&text, today) {
            Ok(window) => window,
            Err(e) => return report(e),
        };

        match rank_regions(&self.air, &self.air_catalog, window, self.top_k).await {
            Ok(scores) => {
                println!("\nLowest average PM2.5 in that window:");
                for line in format::ranking_lines(&scores) {
                    println!("{line}");
                }
                Ok(())
            }
            Err(e) => report(e),
        }
    }

    async fn air_dates(&self) -> Result<()> {
        let text = prompt("Region > ")?;
        let Ok(region) = self.air_catalog.find_substring(text.trim()) else {
            println!("Unknown region: \"{}\"", text.trim());
            return Ok(());
        };

        let today = Local::now().date_naive();
        match cleanest_day_lines(&self.air, region, today, self.top_k).await {
            Ok(lines) => {
                println!("\nCleanest days for {}:", region.name);
                for line in lines {
                    println!("{line}");
                }
                Ok(())
            }
            Err(e) => report(e),
        }
    }

    async fn sun_times(&self) -> Result<()> {
        let text = prompt("Region > ")?;
        let Ok(region) = self.precip_catalog.find_substring(text.trim()) else {
            println!("Unknown region: \"{}\"", text.trim());
            return Ok(());
        };

        match self.sun.sun_times(region).await {
            Ok(times) => {
                println!("\nSun times for {}:", region.name);
                for line in format::sun_lines(&times) {
                    println!("{line}");
                }
            }
            Err(e) => {
                tracing::debug!("Sun-time lookup failed: {}", e);
                println!("{}", RecommendError::NoData.user_message());
            }
        }
        Ok(())
    }

    async fn place_search(&self) -> Result<()> {
        let query = prompt("Search > ")?;
        if query.trim().is_empty() {
            println!("Please enter a search term.");
            return Ok(());
        }

        match self.search.search(query.trim()).await {
            Ok(posts) if posts.is_empty() => println!("No results."),
            Ok(posts) => {
                println!("\nResults for \"{}\":", query.trim());
                for line in format::post_lines(&posts) {
                    println!("{line}");
                }
            }
            Err(e) => {
                tracing::debug!("Blog search failed: {}", e);
                println!("Search is unavailable right now.");
            }
        }
        Ok(())
    }
}

/// Full-horizon clear intervals for one region, rendered as lines.
async fn clear_day_lines<P: ForecastProvider>(
    provider: &P,
    region: &Region,
    today: NaiveDate,
) -> Result<Vec<String>, RecommendError> {
    let range = full_range(provider);
    let raw = provider.fetch_raw(region).await.map_err(|e| {
        tracing::debug!("Fetch for {} failed: {}", region.name, e);
        RecommendError::NoData
    })?;
    let metric = provider.metric();
    let series = normalize(&raw, range, metric.aggregation())?;
    let intervals = clear_intervals(range, &series, &metric);
    if intervals.is_empty() {
        return Err(RecommendError::NoneFavorable);
    }
    Ok(format::interval_lines(&intervals, today))
}

/// The `top_k` lowest-concentration days for one region, best first.
async fn cleanest_day_lines(
    provider: &AirQualityForecast,
    region: &Region,
    today: NaiveDate,
    top_k: usize,
) -> Result<Vec<String>, RecommendError> {
    let range = full_range(provider);
    let raw = provider.fetch_raw(region).await.map_err(|e| {
        tracing::debug!("Fetch for {} failed: {}", region.name, e);
        RecommendError::NoData
    })?;
    let mut series = normalize(&raw, range, provider.metric().aggregation())?;
    series.sort_by(|a, b| a.value.partial_cmp(&b.value).unwrap_or(std::cmp::Ordering::Equal));
    series.truncate(top_k);
    Ok(format::best_day_lines(&series, today))
}

fn full_range<P: ForecastProvider>(provider: &P) -> DayRange {
    DayRange {
        lo: 0,
        hi: provider.horizon().days().saturating_sub(1),
    }
}

fn report(e: RecommendError) -> Result<()> {
    println!("{}", e.user_message());
    Ok(())
}

fn prompt(text: &str) -> Result<String> {
    print!("{text}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
