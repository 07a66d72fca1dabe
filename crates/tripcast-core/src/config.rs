//! Application configuration.
//!
//! Every provider endpoint, horizon, and threshold lives here so the engine
//! never hardcodes them. Defaults match the public services this tool was
//! written against; API keys come from the environment.

use serde::{Deserialize, Serialize};

/// Environment variable names for secrets.
const ENV_TIMELINE_KEY: &str = "TRIPCAST_TIMELINE_API_KEY";
const ENV_AIR_KEY: &str = "TRIPCAST_AIR_API_KEY";
const ENV_SEARCH_CLIENT_ID: &str = "TRIPCAST_SEARCH_CLIENT_ID";
const ENV_SEARCH_CLIENT_SECRET: &str = "TRIPCAST_SEARCH_CLIENT_SECRET";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Grid-addressed village forecast (7-day RSS feed)
    #[serde(default)]
    pub village: VillageConfig,

    /// Name-addressed timeline forecast (30-day JSON API)
    #[serde(default)]
    pub timeline: TimelineConfig,

    /// Air-quality forecast (PM2.5 / PM10)
    #[serde(default)]
    pub air: AirQualityConfig,

    /// Blog / point-of-interest search
    #[serde(default)]
    pub search: SearchConfig,

    /// Recommendation policy
    #[serde(default)]
    pub recommend: RecommendConfig,
}

impl Config {
    /// Defaults overlaid with API keys from the environment.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(key) = std::env::var(ENV_TIMELINE_KEY) {
            config.timeline.api_key = key;
        }
        if let Ok(key) = std::env::var(ENV_AIR_KEY) {
            config.air.api_key = key;
        }
        if let Ok(id) = std::env::var(ENV_SEARCH_CLIENT_ID) {
            config.search.client_id = id;
        }
        if let Ok(secret) = std::env::var(ENV_SEARCH_CLIENT_SECRET) {
            config.search.client_secret = secret;
        }
        config
    }

    /// Names of features that are unusable because their key is missing.
    /// Informational only; the menu still offers the working features.
    pub fn missing_keys(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.timeline.api_key.is_empty() {
            missing.push("timeline forecast");
        }
        if self.air.api_key.is_empty() {
            missing.push("air quality");
        }
        if self.search.client_id.is_empty() || self.search.client_secret.is_empty() {
            missing.push("blog search");
        }
        missing
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VillageConfig {
    pub base_url: String,
    /// Forecast depth in days
    pub horizon_days: u32,
}

impl Default for VillageConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.kma.go.kr/wid/queryDFS.jsp".to_string(),
            horizon_days: 7,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineConfig {
    pub base_url: String,
    pub api_key: String,
    pub horizon_days: u32,
    /// Country suffix appended to region names when addressing the API
    pub country: String,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            base_url:
                "https://weather.visualcrossing.com/VisualCrossingWebServices/rest/services/timeline"
                    .to_string(),
            api_key: String::new(),
            horizon_days: 30,
            country: "KR".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirQualityConfig {
    pub base_url: String,
    pub api_key: String,
    pub horizon_days: u32,
    /// Hours added to UTC timestamps before bucketing samples into local days
    pub utc_offset_hours: i32,
}

impl Default for AirQualityConfig {
    fn default() -> Self {
        Self {
            base_url: "http://api.openweathermap.org/data/2.5/air_pollution/forecast".to_string(),
            api_key: String::new(),
            horizon_days: 5,
            utc_offset_hours: 9,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub base_url: String,
    pub client_id: String,
    pub client_secret: String,
    /// Number of results per query
    pub display: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: "https://openapi.naver.com/v1/search/blog".to_string(),
            client_id: String::new(),
            client_secret: String::new(),
            display: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendConfig {
    /// Precipitation probability below this percentage counts as a clear day
    pub clear_pop_threshold: f64,
    /// Number of regions surfaced in a ranking
    pub top_k: usize,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            clear_pop_threshold: 10.0,
            top_k: 3,
        }
    }
}
