use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::price::{PricePoint, PriceSeries};
use super::traits::PriceProvider;

const BASE_URL: &str = "https://stooq.com/q/d/l/";

/// Stooq daily-quotes provider.
///
/// - **Free**: No API key, no registration.
/// - **Coverage**: Major indices, US/EU equities, forex.
/// - **Format**: Plain CSV (`Date,Open,High,Low,Close,Volume`).
///
/// Note that Stooq uses its own index tickers: the S&P 500 is `^spx`
/// there, not Yahoo's `^GSPC`. Callers pick the symbol to match the
/// provider they configured.
pub struct StooqProvider {
    client: Client,
}

impl StooqProvider {
    pub fn new() -> Self {
        let builder = Client::builder().timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
        }
    }
}

impl Default for StooqProvider {
    fn default() -> Self {
        Self::new()
    }
}

// ── Stooq CSV row ───────────────────────────────────────────────────

#[derive(Deserialize)]
struct QuoteRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Close")]
    close: f64,
}

#[async_trait]
impl PriceProvider for StooqProvider {
    fn name(&self) -> &str {
        "Stooq"
    }

    async fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, CoreError> {
        let ticker = symbol.to_lowercase();
        let url = format!(
            "{BASE_URL}?s={ticker}&d1={}&d2={}&i=d",
            start.format("%Y%m%d"),
            end.format("%Y%m%d"),
        );

        let body = self.client.get(&url).send().await?.text().await?;

        // An unknown ticker comes back as a one-line "No data" body, not
        // an HTTP error.
        if !body.starts_with("Date,") {
            return Err(CoreError::Api {
                provider: "Stooq".into(),
                message: format!("No data returned for {symbol} in {start}..{end}"),
            });
        }

        let mut reader = csv::Reader::from_reader(body.as_bytes());
        let mut points = Vec::new();
        for row in reader.deserialize::<QuoteRow>() {
            let row = row?;
            let date = NaiveDate::parse_from_str(&row.date, "%Y-%m-%d").map_err(|e| {
                CoreError::Api {
                    provider: "Stooq".into(),
                    message: format!("Unparseable date '{}' for {symbol}: {e}", row.date),
                }
            })?;
            if date >= start && date <= end && row.close.is_finite() && row.close > 0.0 {
                points.push(PricePoint {
                    date,
                    price: row.close,
                });
            }
        }

        if points.is_empty() {
            return Err(CoreError::Api {
                provider: "Stooq".into(),
                message: format!("No quotes returned for {symbol} in {start}..{end}"),
            });
        }

        log::debug!("Stooq: {} points for {symbol}", points.len());
        PriceSeries::new(symbol, points)
    }
}
