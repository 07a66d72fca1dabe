//! The provider seam.
//!
//! A provider owns transport and payload parsing for one forecast source and
//! hands the engine raw per-timepoint readings. New sources plug in here
//! without touching the normalizer, interval detector, or ranker.

use std::future::Future;

use thiserror::Error;
use tripcast_catalog::Region;
use tripcast_core::window::Horizon;

use crate::types::{Metric, RawReading};

/// Provider-local failures. The ranker converts any of these into silent
/// exclusion of the region; they never abort a whole query.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server returned status {0}")]
    Status(u16),

    #[error("Malformed payload: {0}")]
    Payload(String),

    #[error("Region \"{0}\" is not addressable by this provider")]
    Unaddressable(String),

    #[error("Provider configuration error: {0}")]
    Config(String),
}

/// A forecast source: a horizon, a metric policy, and a fetch.
pub trait ForecastProvider {
    /// Forecast depth of this source.
    fn horizon(&self) -> Horizon;

    /// Aggregation and favorability policy for this source's metric.
    fn metric(&self) -> Metric;

    /// Fetch raw readings for one region. Sub-day samples share an offset;
    /// the caller normalizes.
    fn fetch_raw(
        &self,
        region: &Region,
    ) -> impl Future<Output = Result<Vec<RawReading>, ProviderError>> + Send;
}
