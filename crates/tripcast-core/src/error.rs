//! Centralized error taxonomy for recommendation requests.
//!
//! Nothing here is fatal to the process: every variant maps to a message the
//! menu layer can print before returning to the prompt. Transport failures are
//! caught inside the provider clients and surface only as missing data.

use thiserror::Error;

/// Outcome signals for a recommendation request.
///
/// `NoData` and `NoneFavorable` are legitimate results of a well-formed query,
/// carried as errors so the ranking path can short-circuit with `?`.
#[derive(Debug, Error)]
pub enum RecommendError {
    /// Malformed user input (date text, region text). Aborts the request.
    #[error("Invalid input: {0}")]
    Parse(String),

    /// The requested window has no overlap with the forecastable days.
    #[error("Requested dates fall outside the forecast horizon")]
    OutOfHorizon,

    /// No usable forecast reading for the requested span.
    #[error("No forecast data available")]
    NoData,

    /// The query was answerable but found nothing worth recommending.
    #[error("No favorable days in the requested window")]
    NoneFavorable,
}

impl RecommendError {
    /// Returns a user-friendly message suitable for the terminal view.
    pub fn user_message(&self) -> String {
        match self {
            RecommendError::Parse(detail) => format!("Invalid input: {detail}"),
            RecommendError::OutOfHorizon => {
                "The requested dates are outside the forecast range.".to_string()
            }
            RecommendError::NoData => {
                "No forecast data is available for that request.".to_string()
            }
            RecommendError::NoneFavorable => {
                "No favorable days were found in that window.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_are_non_empty() {
        let errors = [
            RecommendError::Parse("bad date".into()),
            RecommendError::OutOfHorizon,
            RecommendError::NoData,
            RecommendError::NoneFavorable,
        ];
        for err in errors {
            assert!(!err.user_message().is_empty());
        }
    }

    #[test]
    fn test_parse_detail_propagates() {
        let err = RecommendError::Parse("expected M.D".into());
        assert!(err.user_message().contains("expected M.D"));
    }
}
