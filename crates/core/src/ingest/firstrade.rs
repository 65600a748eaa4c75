use chrono::NaiveDate;
use serde::Deserialize;

use crate::errors::CoreError;
use crate::models::cash_flow::{CashFlow, CashFlowSeries};

/// Record type marker for executed trades in a Firstrade export.
const TRADE_RECORD_TYPE: &str = "Trade";

/// Date formats seen in Firstrade trade-history exports.
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

// ── Raw CSV row ─────────────────────────────────────────────────────

/// One row of a trade-history export, untyped. Only the columns the cash
/// flow model needs; the exporter adds many more, all ignored.
#[derive(Debug, Deserialize)]
struct HistoryRow {
    #[serde(rename = "RecordType")]
    record_type: String,
    #[serde(rename = "TradeDate")]
    trade_date: String,
    #[serde(rename = "Amount")]
    amount: String,
}

/// Parse a Firstrade trade-history CSV export into typed cash flows.
///
/// Keeps only `RecordType == "Trade"` rows. Rows whose trade date cannot
/// be parsed are skipped (with a warning), so the engine only ever sees
/// valid dates. A trade row with an unreadable amount is corrupt input
/// and fails the whole parse.
///
/// The returned flows keep the file's row order; series construction
/// sorts them.
pub fn parse_trade_history(csv_text: &str) -> Result<Vec<CashFlow>, CoreError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(csv_text.as_bytes());

    let mut flows = Vec::new();
    for (idx, row) in reader.deserialize::<HistoryRow>().enumerate() {
        let row = row?;
        if row.record_type != TRADE_RECORD_TYPE {
            continue;
        }

        let date = match parse_trade_date(&row.trade_date) {
            Some(d) => d,
            None => {
                log::warn!(
                    "skipping trade row {} with unparseable date '{}'",
                    idx + 1,
                    row.trade_date
                );
                continue;
            }
        };

        let amount: f64 = row.amount.trim().parse().map_err(|_| {
            CoreError::Ingest(format!(
                "Trade row {} has unreadable amount '{}'",
                idx + 1,
                row.amount
            ))
        })?;

        flows.push(CashFlow::new(date, amount));
    }

    Ok(flows)
}

/// Parse a trade-history export and append the caller-supplied valuation,
/// producing a series ready for the engine.
pub fn build_series(
    csv_text: &str,
    valuation_date: NaiveDate,
    market_value: f64,
) -> Result<CashFlowSeries, CoreError> {
    let trades = parse_trade_history(csv_text)?;
    CashFlowSeries::with_valuation(trades, valuation_date, market_value)
}

fn parse_trade_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}
