pub mod errors;
pub mod ingest;
pub mod models;
pub mod providers;
pub mod services;

use chrono::NaiveDate;
use models::{cash_flow::CashFlowSeries, report::PerformanceReport};
use providers::traits::PriceProvider;
use providers::yahoo_finance::YahooFinanceProvider;
use services::report_service::ReportService;

use errors::CoreError;

/// Ticker of the default broad-market benchmark: the S&P 500 index.
pub const BENCHMARK_SYMBOL: &str = "^GSPC";

/// Main entry point for the Index Benchmark core library.
/// Holds one price provider and the engine services; the cash-flow series
/// stays owned by the caller and is never retained beyond a call.
#[must_use]
pub struct BenchmarkAnalyzer {
    provider: Box<dyn PriceProvider>,
    report_service: ReportService,
    benchmark_symbol: String,
}

impl std::fmt::Debug for BenchmarkAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BenchmarkAnalyzer")
            .field("provider", &self.provider.name())
            .field("benchmark_symbol", &self.benchmark_symbol)
            .finish()
    }
}

impl BenchmarkAnalyzer {
    /// Create an analyzer backed by the default Yahoo Finance provider
    /// and the default S&P 500 benchmark.
    pub fn new() -> Result<Self, CoreError> {
        Ok(Self::with_provider(Box::new(YahooFinanceProvider::new()?)))
    }

    /// Create an analyzer with a caller-supplied provider (a different
    /// data source, or a mock in tests).
    pub fn with_provider(provider: Box<dyn PriceProvider>) -> Self {
        Self {
            provider,
            report_service: ReportService::new(),
            benchmark_symbol: BENCHMARK_SYMBOL.to_string(),
        }
    }

    /// The benchmark ticker reports are computed against.
    #[must_use]
    pub fn benchmark_symbol(&self) -> &str {
        &self.benchmark_symbol
    }

    /// Override the benchmark ticker (e.g. `^spx` for Stooq, or a broad
    /// ETF). Must be non-blank.
    pub fn set_benchmark_symbol(&mut self, symbol: impl Into<String>) -> Result<(), CoreError> {
        let trimmed = symbol.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(CoreError::ValidationError(
                "Benchmark symbol must not be blank".into(),
            ));
        }
        self.benchmark_symbol = trimmed;
        Ok(())
    }

    // ── Analysis ────────────────────────────────────────────────────

    /// Compute the full performance comparison for a cash-flow series.
    ///
    /// Provider failures are fatal here; catch the error and fall back to
    /// `analyze_portfolio_only` to render a partial report with benchmark
    /// columns blank.
    pub async fn analyze(&self, series: &CashFlowSeries) -> Result<PerformanceReport, CoreError> {
        self.report_service
            .generate(series, self.provider.as_ref(), &self.benchmark_symbol)
            .await
    }

    /// Compute only the metrics derivable from the cash flows themselves:
    /// invested total, portfolio IRR, portfolio CAGR. No network access;
    /// benchmark fields are `None`.
    #[must_use]
    pub fn analyze_portfolio_only(&self, series: &CashFlowSeries) -> PerformanceReport {
        self.report_service
            .portfolio_only(series, &self.benchmark_symbol)
    }

    /// Convenience: parse a Firstrade trade-history CSV, append the
    /// valuation, and compute the full report.
    pub async fn analyze_trade_history(
        &self,
        csv_text: &str,
        valuation_date: NaiveDate,
        market_value: f64,
    ) -> Result<PerformanceReport, CoreError> {
        let series = ingest::firstrade::build_series(csv_text, valuation_date, market_value)?;
        self.analyze(&series).await
    }
}
