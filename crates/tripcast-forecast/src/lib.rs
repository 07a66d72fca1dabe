//! Forecast normalization and interval/ranking engine.
//!
//! Providers turn remote forecasts into raw per-timepoint readings; the
//! normalizer folds those into one reading per calendar day; the interval
//! detector finds maximal runs of favorable days; the ranker scores every
//! catalog region over a date window. The engine itself never touches HTTP.

pub mod air;
pub mod interval;
pub mod normalize;
pub mod provider;
pub mod rank;
pub mod timeline;
pub mod types;
pub mod village;

pub use air::AirQualityForecast;
pub use interval::clear_intervals;
pub use normalize::normalize;
pub use provider::{ForecastProvider, ProviderError};
pub use rank::rank_regions;
pub use timeline::{SunTimes, TimelineForecast};
pub use types::{Aggregation, ClearInterval, DayReading, Metric, RawReading, RegionScore, Score};
pub use village::VillageForecast;
