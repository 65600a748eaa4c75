use chrono::NaiveDate;

use crate::models::cash_flow::CashFlowSeries;
use super::DAYS_PER_YEAR;

/// Lump-sum compound annual growth rate calculator.
///
/// Undefined inputs (zero or reversed elapsed time, a non-positive
/// starting value, a negative value ratio) yield `None` rather than NaN,
/// so callers render "N/A" at the metric level.
pub struct GrowthService;

impl GrowthService {
    pub fn new() -> Self {
        Self
    }

    /// The constant annualized rate that grows `start_value` into
    /// `end_value` over the actual/365 span between the two dates:
    /// `(end/start)^(1/years) - 1`.
    #[must_use]
    pub fn lump_sum_cagr(
        &self,
        start_value: f64,
        end_value: f64,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Option<f64> {
        let years = (end_date - start_date).num_days() as f64 / DAYS_PER_YEAR;
        if years <= 0.0 || start_value <= 0.0 {
            return None;
        }
        let ratio = end_value / start_value;
        if !ratio.is_finite() || ratio < 0.0 {
            return None;
        }
        Some(ratio.powf(1.0 / years) - 1.0)
    }

    /// Portfolio CAGR under the lump-sum model: all invested cash treated
    /// as deployed in one transaction on the first cash-flow date, growing
    /// into the final valuation amount by the valuation date.
    #[must_use]
    pub fn portfolio_cagr(&self, series: &CashFlowSeries) -> Option<f64> {
        self.lump_sum_cagr(
            series.total_invested(),
            series.valuation().amount,
            series.first_date(),
            series.last_date(),
        )
    }
}

impl Default for GrowthService {
    fn default() -> Self {
        Self::new()
    }
}
