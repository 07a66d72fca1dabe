//! Timeline forecast provider: 30-day, name-addressed JSON API.
//!
//! One `days[]` entry per calendar day starting at the requested start date,
//! so the array index is the day offset. Also the source for sunrise/sunset
//! times, which ride along on the same payload.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use reqwest::Client;
use serde::Deserialize;
use tripcast_catalog::Region;
use tripcast_core::config::TimelineConfig;
use tripcast_core::window::Horizon;
use url::Url;

use crate::provider::{ForecastProvider, ProviderError};
use crate::types::{Metric, RawReading};

const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize)]
struct TimelineResponse {
    #[serde(default)]
    days: Vec<TimelineDay>,
}

#[derive(Debug, Deserialize)]
struct TimelineDay {
    datetime: String,
    precipprob: Option<f64>,
    sunrise: Option<String>,
    sunset: Option<String>,
}

/// Sunrise and sunset for one day, as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SunTimes {
    pub date: NaiveDate,
    pub sunrise: String,
    pub sunset: String,
}

#[derive(Debug, Clone)]
pub struct TimelineForecast {
    client: Arc<Client>,
    base_url: Url,
    api_key: String,
    country: String,
    horizon: Horizon,
    metric: Metric,
}

impl TimelineForecast {
    pub fn new(config: &TimelineConfig, clear_threshold: f64) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        let base_url =
            Url::parse(&config.base_url).map_err(|e| ProviderError::Config(e.to_string()))?;

        Ok(Self {
            client: Arc::new(client),
            base_url,
            api_key: config.api_key.clone(),
            country: config.country.clone(),
            horizon: Horizon::new(config.horizon_days),
            metric: Metric::precip_probability(clear_threshold),
        })
    }

    fn request_url(
        &self,
        region_name: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Url, ProviderError> {
        let location = format!("{},{}", region_name, self.country);
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ProviderError::Config("base URL cannot be a base".to_string()))?
            .push(&location)
            .push(&start.to_string())
            .push(&end.to_string());
        url.query_pairs_mut()
            .append_pair("unitGroup", "metric")
            .append_pair("include", "days")
            .append_pair("key", &self.api_key)
            .append_pair("contentType", "json");
        Ok(url)
    }

    async fn fetch_days(
        &self,
        region_name: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<TimelineDay>, ProviderError> {
        let url = self.request_url(region_name, start, end)?;
        tracing::debug!("Fetching timeline forecast for {}", region_name);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        let body: TimelineResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Payload(e.to_string()))?;
        Ok(body.days)
    }

    /// Sunrise/sunset for today and tomorrow.
    pub async fn sun_times(&self, region: &Region) -> Result<Vec<SunTimes>, ProviderError> {
        let today = Local::now().date_naive();
        let days = self
            .fetch_days(&region.name, today, today + chrono::Days::new(1))
            .await?;

        let times: Vec<SunTimes> = days
            .iter()
            .filter_map(|day| {
                let date = NaiveDate::parse_from_str(&day.datetime, "%Y-%m-%d").ok()?;
                Some(SunTimes {
                    date,
                    sunrise: day.sunrise.clone()?,
                    sunset: day.sunset.clone()?,
                })
            })
            .collect();

        if times.is_empty() {
            return Err(ProviderError::Payload(
                "no sunrise/sunset data in response".to_string(),
            ));
        }
        Ok(times)
    }
}

impl ForecastProvider for TimelineForecast {
    fn horizon(&self) -> Horizon {
        self.horizon
    }

    fn metric(&self) -> Metric {
        self.metric
    }

    async fn fetch_raw(&self, region: &Region) -> Result<Vec<RawReading>, ProviderError> {
        let today = Local::now().date_naive();
        let end = today + chrono::Days::new(u64::from(self.horizon.days().saturating_sub(1)));
        let days = self.fetch_days(&region.name, today, end).await?;

        // The API returns one entry per day from the start date, so the
        // array position is the day offset. Days without a probability are
        // left absent for the normalizer to treat as unknown.
        Ok(days
            .iter()
            .enumerate()
            .filter_map(|(index, day)| {
                day.precipprob.map(|value| RawReading {
                    day_offset: index as i64,
                    value,
                })
            })
            .collect())
    }
}
