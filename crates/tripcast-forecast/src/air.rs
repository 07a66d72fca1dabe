//! Air-quality provider: three-hourly PM2.5 forecast, geo-addressed.
//!
//! Samples arrive as epoch timestamps. They are shifted into the configured
//! local offset before bucketing into calendar days, so an evening sample
//! lands on the day a traveler would experience it, not the UTC day.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, Utc};
use reqwest::Client;
use serde::Deserialize;
use tripcast_catalog::{Coords, Region};
use tripcast_core::config::AirQualityConfig;
use tripcast_core::window::Horizon;

use crate::provider::{ForecastProvider, ProviderError};
use crate::types::{Metric, RawReading};

const REQUEST_TIMEOUT_SECS: u64 = 10;
const SECS_PER_HOUR: i32 = 3600;

#[derive(Debug, Deserialize)]
struct PollutionResponse {
    #[serde(default)]
    list: Vec<PollutionEntry>,
}

#[derive(Debug, Deserialize)]
struct PollutionEntry {
    dt: i64,
    components: PollutionComponents,
}

#[derive(Debug, Deserialize)]
struct PollutionComponents {
    pm2_5: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct AirQualityForecast {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
    horizon: Horizon,
    local_offset: FixedOffset,
    metric: Metric,
}

impl AirQualityForecast {
    pub fn new(config: &AirQualityConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        let local_offset = FixedOffset::east_opt(config.utc_offset_hours * SECS_PER_HOUR)
            .ok_or_else(|| {
                ProviderError::Config(format!(
                    "invalid UTC offset: {} hours",
                    config.utc_offset_hours
                ))
            })?;

        Ok(Self {
            client: Arc::new(client),
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            horizon: Horizon::new(config.horizon_days),
            local_offset,
            metric: Metric::pm2_5(),
        })
    }

    /// Bucket epoch-stamped samples into local-day offsets relative to the
    /// local "today". Samples without a PM2.5 component are dropped.
    fn to_readings(&self, entries: &[PollutionEntry], now: DateTime<Utc>) -> Vec<RawReading> {
        let today = now.with_timezone(&self.local_offset).date_naive();
        entries
            .iter()
            .filter_map(|entry| {
                let value = entry.components.pm2_5?;
                let stamped = DateTime::<Utc>::from_timestamp(entry.dt, 0)?;
                let local_date = stamped.with_timezone(&self.local_offset).date_naive();
                Some(RawReading {
                    day_offset: (local_date - today).num_days(),
                    value,
                })
            })
            .collect()
    }
}

impl ForecastProvider for AirQualityForecast {
    fn horizon(&self) -> Horizon {
        self.horizon
    }

    fn metric(&self) -> Metric {
        self.metric
    }

    async fn fetch_raw(&self, region: &Region) -> Result<Vec<RawReading>, ProviderError> {
        let Some(Coords::LatLon { lat, lon }) = region.coords else {
            return Err(ProviderError::Unaddressable(region.name.clone()));
        };

        tracing::debug!("Fetching air quality for {}", region.name);
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("appid", self.api_key.clone()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        let body: PollutionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Payload(e.to_string()))?;
        Ok(self.to_readings(&body.list, Utc::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> AirQualityForecast {
        let config = AirQualityConfig {
            api_key: "test-key".to_string(),
            ..AirQualityConfig::default()
        };
        AirQualityForecast::new(&config).unwrap()
    }

    fn entry(dt: i64, pm2_5: Option<f64>) -> PollutionEntry {
        PollutionEntry {
            dt,
            components: PollutionComponents { pm2_5 },
        }
    }

    const NOON_UTC: i64 = 1781092800; // 2026-06-10 12:00:00 UTC

    fn now() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(NOON_UTC, 0).unwrap()
    }

    #[test]
    fn test_samples_bucket_to_local_days() {
        let entries = [
            entry(NOON_UTC, Some(12.0)),             // local same day
            entry(NOON_UTC + 86_400, Some(30.0)),    // local tomorrow
        ];
        let readings = provider().to_readings(&entries, now());
        assert_eq!(
            readings,
            vec![
                RawReading { day_offset: 0, value: 12.0 },
                RawReading { day_offset: 1, value: 30.0 },
            ]
        );
    }

    #[test]
    fn test_late_evening_utc_sample_lands_on_next_local_day() {
        // 16:00 UTC is 01:00 the next day at +9.
        let entries = [entry(NOON_UTC + 4 * 3600, Some(5.0))];
        let readings = provider().to_readings(&entries, now());
        assert_eq!(readings[0].day_offset, 1);
    }

    #[test]
    fn test_samples_without_pm25_are_dropped() {
        let entries = [entry(NOON_UTC, None), entry(NOON_UTC, Some(8.0))];
        let readings = provider().to_readings(&entries, now());
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].value, 8.0);
    }

    #[test]
    fn test_zero_offset_config_keeps_utc_days() {
        let config = AirQualityConfig {
            api_key: "k".to_string(),
            utc_offset_hours: 0,
            ..AirQualityConfig::default()
        };
        let provider = AirQualityForecast::new(&config).unwrap();
        let entries = [entry(NOON_UTC + 4 * 3600, Some(5.0))];
        let readings = provider.to_readings(&entries, now());
        assert_eq!(readings[0].day_offset, 0);
    }
}
