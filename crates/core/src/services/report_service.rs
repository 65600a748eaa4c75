use std::time::Duration;

use crate::errors::CoreError;
use crate::models::cash_flow::CashFlowSeries;
use crate::models::price::PriceSeries;
use crate::models::report::PerformanceReport;
use crate::providers::traits::PriceProvider;

use super::benchmark_service::BenchmarkService;
use super::growth_service::GrowthService;
use super::irr_service::IrrService;

/// Upper bound on a single provider fetch. Elapsing it is reported as a
/// provider failure, not a hang.
const PROVIDER_TIMEOUT: Duration = Duration::from_secs(30);

/// Assembles the full performance comparison: portfolio metrics from the
/// cash flows alone, benchmark metrics from one price-series fetch.
///
/// The fetched series is reused for both the benchmark IRR and the
/// benchmark CAGR within a single report, and never cached across reports.
pub struct ReportService {
    irr: IrrService,
    growth: GrowthService,
    benchmark: BenchmarkService,
}

impl ReportService {
    pub fn new() -> Self {
        Self {
            irr: IrrService::new(),
            growth: GrowthService::new(),
            benchmark: BenchmarkService::new(),
        }
    }

    /// Compute the full report against a benchmark index.
    ///
    /// Provider failures (network, unknown symbol, empty range, timeout)
    /// and a price series that does not reach back to the first outflow
    /// are fatal here; callers that want a partial report fall back to
    /// `portfolio_only`.
    pub async fn generate(
        &self,
        series: &CashFlowSeries,
        provider: &dyn PriceProvider,
        benchmark_symbol: &str,
    ) -> Result<PerformanceReport, CoreError> {
        let mut report = self.portfolio_only(series, benchmark_symbol);

        let prices = self
            .fetch_bounded(provider, benchmark_symbol, series)
            .await?;

        let synthetic = self.benchmark.build_synthetic_series(series, &prices)?;
        report.benchmark_irr = self.irr.solve(&synthetic).rate();
        report.benchmark_cagr = self.growth.lump_sum_cagr(
            prices.first().price,
            prices.last().price,
            series.first_date(),
            series.last_date(),
        );
        report.benchmark_flows = Some(synthetic);

        log::debug!(
            "report for {} flows vs {benchmark_symbol}: portfolio irr {:?}, benchmark irr {:?}",
            series.len(),
            report.portfolio_irr,
            report.benchmark_irr
        );

        Ok(report)
    }

    /// Compute only the metrics that need no price data; every benchmark
    /// field stays `None`.
    pub fn portfolio_only(
        &self,
        series: &CashFlowSeries,
        benchmark_symbol: &str,
    ) -> PerformanceReport {
        PerformanceReport {
            as_of_date: series.last_date(),
            benchmark_symbol: benchmark_symbol.to_string(),
            total_invested: series.total_invested(),
            portfolio_irr: self.irr.solve(series).rate(),
            benchmark_irr: None,
            portfolio_cagr: self.growth.portfolio_cagr(series),
            benchmark_cagr: None,
            cash_flows: series.clone(),
            benchmark_flows: None,
        }
    }

    async fn fetch_bounded(
        &self,
        provider: &dyn PriceProvider,
        symbol: &str,
        series: &CashFlowSeries,
    ) -> Result<PriceSeries, CoreError> {
        let start = series.first_date();
        let end = series.last_date();
        log::debug!("fetching {symbol} prices {start}..{end} from {}", provider.name());

        tokio::time::timeout(PROVIDER_TIMEOUT, provider.fetch(symbol, start, end))
            .await
            .map_err(|_| CoreError::Api {
                provider: provider.name().to_string(),
                message: format!(
                    "Timed out after {}s fetching {symbol} {start}..{end}",
                    PROVIDER_TIMEOUT.as_secs()
                ),
            })?
    }
}

impl Default for ReportService {
    fn default() -> Self {
        Self::new()
    }
}
