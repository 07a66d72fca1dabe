//! Village forecast provider: 7-day, grid-addressed RSS feed.
//!
//! The feed is XML served with loose headers, so fields are lifted with
//! regular expressions instead of a strict parser: each `<data>` node carries
//! a `<day>` offset (0 = today) and a `<pop>` precipitation probability for
//! one three-hourly slot. Nodes that fail to parse are skipped; a day is only
//! lost if every one of its slots is bad.

use std::sync::Arc;
use std::time::Duration;

use regex::Regex;
use reqwest::Client;
use tripcast_catalog::{Coords, Region};
use tripcast_core::config::VillageConfig;
use tripcast_core::window::Horizon;

use crate::provider::{ForecastProvider, ProviderError};
use crate::types::{Metric, RawReading};

const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct VillageForecast {
    client: Arc<Client>,
    base_url: String,
    horizon: Horizon,
    metric: Metric,
    data_node: Regex,
    day_field: Regex,
    pop_field: Regex,
}

impl VillageForecast {
    pub fn new(config: &VillageConfig, clear_threshold: f64) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: config.base_url.clone(),
            horizon: Horizon::new(config.horizon_days),
            metric: Metric::precip_probability(clear_threshold),
            data_node: compile(r"(?s)<data[^>]*>(.*?)</data>")?,
            day_field: compile(r"<day>\s*(-?\d+)\s*</day>")?,
            pop_field: compile(r"<pop>\s*(\d+)\s*</pop>")?,
        })
    }

    fn parse(&self, body: &str) -> Vec<RawReading> {
        let mut readings = Vec::new();
        for node in self.data_node.captures_iter(body) {
            let inner = &node[1];
            let day = self
                .day_field
                .captures(inner)
                .and_then(|c| c[1].parse::<i64>().ok());
            let pop = self
                .pop_field
                .captures(inner)
                .and_then(|c| c[1].parse::<f64>().ok());
            match (day, pop) {
                (Some(day_offset), Some(value)) => {
                    readings.push(RawReading { day_offset, value });
                }
                _ => {
                    tracing::debug!("Skipping unparseable forecast node");
                }
            }
        }
        readings
    }
}

impl ForecastProvider for VillageForecast {
    fn horizon(&self) -> Horizon {
        self.horizon
    }

    fn metric(&self) -> Metric {
        self.metric
    }

    async fn fetch_raw(&self, region: &Region) -> Result<Vec<RawReading>, ProviderError> {
        let Some(Coords::Grid { x, y }) = region.coords else {
            return Err(ProviderError::Unaddressable(region.name.clone()));
        };

        tracing::debug!("Fetching village forecast for {} ({}, {})", region.name, x, y);
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("gridx", x), ("gridy", y)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        Ok(self.parse(&body))
    }
}

fn compile(pattern: &str) -> Result<Regex, ProviderError> {
    Regex::new(pattern).map_err(|e| ProviderError::Config(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> VillageForecast {
        VillageForecast::new(&VillageConfig::default(), 10.0).unwrap()
    }

    #[test]
    fn test_parse_extracts_day_and_pop() {
        let body = r#"<rss><body>
            <data seq="0"><day>0</day><temp>18.0</temp><pop>10</pop></data>
            <data seq="1"><day>0</day><temp>20.0</temp><pop>60</pop></data>
            <data seq="2"><day>1</day><temp>17.0</temp><pop>0</pop></data>
        </body></rss>"#;

        let readings = provider().parse(body);
        assert_eq!(
            readings,
            vec![
                RawReading { day_offset: 0, value: 10.0 },
                RawReading { day_offset: 0, value: 60.0 },
                RawReading { day_offset: 1, value: 0.0 },
            ]
        );
    }

    #[test]
    fn test_parse_spans_multiline_nodes() {
        let body = "<data>\n  <day>2</day>\n  <pop> 35 </pop>\n</data>";
        let readings = provider().parse(body);
        assert_eq!(readings, vec![RawReading { day_offset: 2, value: 35.0 }]);
    }

    #[test]
    fn test_parse_skips_broken_nodes() {
        let body = r#"
            <data><day>0</day><pop>five</pop></data>
            <data><day>1</day></data>
            <data><day>2</day><pop>20</pop></data>
        "#;
        let readings = provider().parse(body);
        assert_eq!(readings, vec![RawReading { day_offset: 2, value: 20.0 }]);
    }

    #[test]
    fn test_parse_empty_body_yields_nothing() {
        assert!(provider().parse("<rss></rss>").is_empty());
    }

    #[test]
    fn test_horizon_comes_from_config() {
        let config = VillageConfig {
            horizon_days: 3,
            ..VillageConfig::default()
        };
        let provider = VillageForecast::new(&config, 10.0).unwrap();
        assert_eq!(provider.horizon().days(), 3);
    }
}
