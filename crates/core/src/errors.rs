use chrono::NaiveDate;
use thiserror::Error;

/// Unified error type for the entire index-benchmark-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
///
/// Numeric no-solution outcomes are NOT errors: an unconverged IRR is
/// `IrrOutcome::Unconverged` and an undefined growth rate is `None`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Cash-flow model ─────────────────────────────────────────────
    #[error("Cash-flow series must contain at least one entry")]
    EmptyCashFlowSeries,

    #[error("Discount rate {0} is outside the model domain (must be greater than -1)")]
    InvalidRate(f64),

    #[error("Validation failed: {0}")]
    ValidationError(String),

    // ── Price data ──────────────────────────────────────────────────
    #[error("No {symbol} price available on or before {date}")]
    PriceUnavailable { symbol: String, date: NaiveDate },

    #[error("Provider error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    // ── Ingestion / Export ──────────────────────────────────────────
    #[error("Trade history parse error: {0}")]
    Ingest(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Strip query parameters from URLs embedded in the message;
        // reqwest errors often carry full request URLs.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}

impl From<csv::Error> for CoreError {
    fn from(e: csv::Error) -> Self {
        CoreError::Ingest(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Serialization(e.to_string())
    }
}
