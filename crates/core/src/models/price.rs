use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// A single price data point (date → price).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

/// An ordered daily price series for one symbol.
///
/// Invariants, enforced at construction: non-empty, strictly ascending by
/// date (one point per trading day in range), every price finite and
/// positive. Gaps are expected on non-trading days; lookups resolve them
/// to the latest preceding trading day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    symbol: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series from provider output. Sorts by date, collapses
    /// duplicate dates (first occurrence wins), rejects empty input and
    /// non-positive prices.
    pub fn new(symbol: impl Into<String>, mut points: Vec<PricePoint>) -> Result<Self, CoreError> {
        let symbol = symbol.into();
        if points.is_empty() {
            return Err(CoreError::ValidationError(format!(
                "Price series for {symbol} is empty"
            )));
        }
        if let Some(bad) = points.iter().find(|p| !p.price.is_finite() || p.price <= 0.0) {
            return Err(CoreError::ValidationError(format!(
                "Price series for {symbol} contains invalid price {} on {}",
                bad.price, bad.date
            )));
        }
        points.sort_by_key(|p| p.date);
        points.dedup_by_key(|p| p.date);
        Ok(Self { symbol, points })
    }

    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[must_use]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// A price series is never empty; kept for the `len()` pairing lint.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// First (earliest) point in the series.
    #[must_use]
    pub fn first(&self) -> &PricePoint {
        &self.points[0]
    }

    /// Last (latest) point in the series.
    #[must_use]
    pub fn last(&self) -> &PricePoint {
        self.points.last().expect("series is never empty")
    }

    /// The latest known price at or before `date` (binary search).
    ///
    /// Dates falling on non-trading days resolve to the previous trading
    /// day. A date before the series start is `PriceUnavailable`: the
    /// series is never extrapolated backwards.
    pub fn latest_at_or_before(&self, date: NaiveDate) -> Result<f64, CoreError> {
        match self.points.binary_search_by_key(&date, |p| p.date) {
            Ok(idx) => Ok(self.points[idx].price),
            Err(0) => Err(CoreError::PriceUnavailable {
                symbol: self.symbol.clone(),
                date,
            }),
            Err(idx) => Ok(self.points[idx - 1].price),
        }
    }
}
