use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::cash_flow::CashFlowSeries;
use crate::errors::CoreError;

/// The computed comparison between a portfolio's cash-flow history and the
/// same cash deployed into a benchmark index.
///
/// Annualized rates are `None` where the underlying computation has no
/// defined answer (unconverged IRR, zero elapsed time, no invested
/// capital). Benchmark fields are `None` on a portfolio-only report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceReport {
    /// Valuation date the report was computed for
    pub as_of_date: NaiveDate,

    /// Ticker of the benchmark index the portfolio was compared against
    pub benchmark_symbol: String,

    /// Total cash invested: sum of all outflow magnitudes
    pub total_invested: f64,

    /// Annualized internal rate of return of the actual cash flows
    pub portfolio_irr: Option<f64>,

    /// IRR of the same outflows deployed into the benchmark instead
    pub benchmark_irr: Option<f64>,

    /// Lump-sum CAGR: all invested cash treated as deployed on day one
    pub portfolio_cagr: Option<f64>,

    /// Lump-sum CAGR of the benchmark itself over the same date span
    pub benchmark_cagr: Option<f64>,

    /// The cash-flow series the report was computed from, for audit
    pub cash_flows: CashFlowSeries,

    /// The synthetic benchmark series (outflows plus benchmark terminal
    /// value), when benchmark metrics were computed
    pub benchmark_flows: Option<CashFlowSeries>,
}

impl PerformanceReport {
    /// Export the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self).map_err(CoreError::from)
    }
}
