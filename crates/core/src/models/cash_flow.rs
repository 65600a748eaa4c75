use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// A single dated cash movement.
///
/// `amount` is signed: negative means money moved INTO the investment
/// (out of the investor's pocket), positive means money returned or a
/// terminal valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    /// Date of the movement (daily granularity, no time component)
    pub date: NaiveDate,

    /// Signed amount in the account currency
    pub amount: f64,
}

impl CashFlow {
    pub fn new(date: NaiveDate, amount: f64) -> Self {
        Self { date, amount }
    }

    /// `true` when this entry represents money invested (negative amount).
    #[must_use]
    pub fn is_outflow(&self) -> bool {
        self.amount < 0.0
    }
}

/// An ordered, non-empty sequence of cash flows.
///
/// Invariants, enforced at construction:
/// - at least one entry,
/// - sorted ascending by date (stable, so same-day entries keep their
///   input order),
/// - by convention the LAST entry is the valuation: the current holdings
///   marked to market on a chosen date. All preceding entries are actual
///   trade cash flows.
///
/// A series is immutable once built; transformations produce a new series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowSeries {
    flows: Vec<CashFlow>,
}

impl CashFlowSeries {
    /// Build a series from raw entries. Sorts by date (stable) and rejects
    /// empty input. The last entry after sorting is treated as the
    /// valuation entry.
    pub fn new(mut flows: Vec<CashFlow>) -> Result<Self, CoreError> {
        if flows.is_empty() {
            return Err(CoreError::EmptyCashFlowSeries);
        }
        flows.sort_by_key(|cf| cf.date);
        Ok(Self { flows })
    }

    /// Build a series from trade entries plus an explicit valuation.
    ///
    /// `market_value` is the current total market value of the holdings on
    /// `valuation_date`; it must be non-negative and the valuation must not
    /// predate the latest trade (the valuation entry is always last).
    pub fn with_valuation(
        trades: Vec<CashFlow>,
        valuation_date: NaiveDate,
        market_value: f64,
    ) -> Result<Self, CoreError> {
        if !market_value.is_finite() || market_value < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Market value {market_value} must be a non-negative number"
            )));
        }
        if let Some(last_trade) = trades.iter().map(|cf| cf.date).max() {
            if valuation_date < last_trade {
                return Err(CoreError::ValidationError(format!(
                    "Valuation date {valuation_date} precedes the latest trade date {last_trade}"
                )));
            }
        }
        let mut flows = trades;
        flows.push(CashFlow::new(valuation_date, market_value));
        Self::new(flows)
    }

    /// All entries, oldest first; the last one is the valuation.
    #[must_use]
    pub fn flows(&self) -> &[CashFlow] {
        &self.flows
    }

    /// The trade entries, i.e. everything except the final valuation.
    #[must_use]
    pub fn trades(&self) -> &[CashFlow] {
        &self.flows[..self.flows.len() - 1]
    }

    /// The final valuation entry.
    #[must_use]
    pub fn valuation(&self) -> &CashFlow {
        // new() guarantees at least one entry
        self.flows.last().expect("series is never empty")
    }

    /// Date of the earliest entry; the anchor for discounting.
    #[must_use]
    pub fn first_date(&self) -> NaiveDate {
        self.flows[0].date
    }

    /// Date of the final (valuation) entry.
    #[must_use]
    pub fn last_date(&self) -> NaiveDate {
        self.valuation().date
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.flows.len()
    }

    /// A series is never empty; kept so `len()` passes clippy's pairing lint.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Total cash invested: the sum of magnitudes of all negative entries.
    #[must_use]
    pub fn total_invested(&self) -> f64 {
        self.flows
            .iter()
            .filter(|cf| cf.amount < 0.0)
            .map(|cf| -cf.amount)
            .sum()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CashFlow> {
        self.flows.iter()
    }
}
