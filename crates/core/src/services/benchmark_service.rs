use crate::errors::CoreError;
use crate::models::cash_flow::{CashFlow, CashFlowSeries};
use crate::models::price::PriceSeries;

/// Re-expresses an investor's trade history as "buy the benchmark
/// instead": every outflow purchases benchmark shares at that date's
/// price, and the accumulated shares are marked to market on the original
/// valuation date.
///
/// Non-final entries with a non-negative amount (recorded dividends,
/// partial sales) are dropped rather than reinvested: only outflows
/// convert into synthetic share purchases. The asymmetry mirrors the
/// lump-outflow model this comparison is built on.
pub struct BenchmarkService;

impl BenchmarkService {
    pub fn new() -> Self {
        Self
    }

    /// Build the synthetic benchmark series.
    ///
    /// The output keeps every original outflow entry verbatim, in order,
    /// and replaces the valuation with `(final_date, shares * price)`.
    /// Invested total and outflow timing are therefore preserved exactly;
    /// only the terminal value changes to reflect benchmark growth.
    ///
    /// Fails with `PriceUnavailable` if any outflow (or the valuation
    /// date) predates the price series.
    pub fn build_synthetic_series(
        &self,
        series: &CashFlowSeries,
        prices: &PriceSeries,
    ) -> Result<CashFlowSeries, CoreError> {
        let mut shares = 0.0;
        let mut flows: Vec<CashFlow> = Vec::with_capacity(series.len());

        for cf in series.trades() {
            if cf.is_outflow() {
                let price = prices.latest_at_or_before(cf.date)?;
                shares += -cf.amount / price;
                flows.push(cf.clone());
            }
        }

        let final_date = series.last_date();
        let final_value = shares * prices.latest_at_or_before(final_date)?;
        flows.push(CashFlow::new(final_date, final_value));

        log::debug!(
            "synthetic {} series: {:.6} shares, terminal value {:.2}",
            prices.symbol(),
            shares,
            final_value
        );

        CashFlowSeries::new(flows)
    }
}

impl Default for BenchmarkService {
    fn default() -> Self {
        Self::new()
    }
}
