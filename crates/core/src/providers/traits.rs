use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::price::PriceSeries;

/// Trait abstraction for historical price data sources.
///
/// The engine consumes exactly one provider per report and treats any
/// failure as fatal for the benchmark computation: there is no fallback
/// data source. Implementations exist per upstream API; if one stops
/// working, only that implementation changes.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch the daily price series for `symbol` covering `[start, end]`
    /// inclusive, ascending, with gaps only on non-trading days.
    async fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, CoreError>;
}
