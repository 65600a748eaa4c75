use crate::errors::CoreError;
use crate::models::cash_flow::CashFlowSeries;
use super::DAYS_PER_YEAR;

/// Time-weighted present-value model over irregular cash flows (XNPV).
///
/// Each entry is discounted back to the series' first date at an annual
/// rate, with elapsed time measured actual/365. The model is only defined
/// for rates above -1: below that, the discount factor has no real value
/// for non-integer exponents.
pub struct DiscountingService;

impl DiscountingService {
    pub fn new() -> Self {
        Self
    }

    /// Net present value of the series at annual rate `rate`:
    /// the sum of `amount / (1 + rate)^years` over every entry, where
    /// `years` is the actual/365 distance from the first entry's date.
    pub fn present_value(&self, rate: f64, series: &CashFlowSeries) -> Result<f64, CoreError> {
        if rate <= -1.0 {
            return Err(CoreError::InvalidRate(rate));
        }
        let anchor = series.first_date();
        let npv = series
            .iter()
            .map(|cf| {
                let years = (cf.date - anchor).num_days() as f64 / DAYS_PER_YEAR;
                cf.amount / (1.0 + rate).powf(years)
            })
            .sum();
        Ok(npv)
    }

    /// Present value together with its analytic derivative with respect to
    /// the rate: `d/dr [a * (1+r)^(-t)] = -t * a * (1+r)^(-t-1)`.
    /// The root finder consumes both in one pass over the series.
    pub fn present_value_with_slope(
        &self,
        rate: f64,
        series: &CashFlowSeries,
    ) -> Result<(f64, f64), CoreError> {
        if rate <= -1.0 {
            return Err(CoreError::InvalidRate(rate));
        }
        let anchor = series.first_date();
        let mut npv = 0.0;
        let mut slope = 0.0;
        for cf in series.iter() {
            let years = (cf.date - anchor).num_days() as f64 / DAYS_PER_YEAR;
            npv += cf.amount * (1.0 + rate).powf(-years);
            slope -= years * cf.amount * (1.0 + rate).powf(-years - 1.0);
        }
        Ok((npv, slope))
    }
}

impl Default for DiscountingService {
    fn default() -> Self {
        Self::new()
    }
}
