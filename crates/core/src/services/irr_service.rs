use crate::models::cash_flow::CashFlowSeries;
use super::discounting_service::DiscountingService;

/// Initial guess for the Newton iteration.
const SEED_RATE: f64 = 0.10;

/// Hard cap on Newton iterations.
const MAX_ITERATIONS: u32 = 100;

/// A root is accepted when the present value is this close to zero.
const NPV_TOLERANCE: f64 = 1e-6;

/// Secondary criterion: a step this small means the iteration has stalled
/// or landed; the landing point is accepted only if its NPV is also small.
const STEP_TOLERANCE: f64 = 1e-9;
const STALLED_NPV_TOLERANCE: f64 = 1e-4;

/// A slope this flat makes the Newton step numerically meaningless.
const MIN_SLOPE: f64 = 1e-12;

/// Outcome of an IRR solve.
///
/// Cash-flow streams with unconventional sign patterns can have zero or
/// many real rates; the solver reports whichever root the iteration finds,
/// or `Unconverged`. Callers render the no-solution case explicitly (as
/// "N/A") instead of aborting the whole report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IrrOutcome {
    /// The iteration found a rate with near-zero present value.
    Converged(f64),
    /// No root found within the iteration cap, or the iteration left the
    /// model domain.
    Unconverged,
}

impl IrrOutcome {
    /// The converged rate, or `None`.
    #[must_use]
    pub fn rate(&self) -> Option<f64> {
        match self {
            IrrOutcome::Converged(rate) => Some(*rate),
            IrrOutcome::Unconverged => None,
        }
    }

    #[must_use]
    pub fn is_converged(&self) -> bool {
        matches!(self, IrrOutcome::Converged(_))
    }
}

/// Finds the annualized rate at which the present value of a cash-flow
/// series is zero (the XIRR).
///
/// Newton's method seeded at 10%, using the analytic NPV derivative from
/// `DiscountingService`. The result is seed-dependent when the stream has
/// multiple sign changes; that ambiguity is inherent to IRR, not resolved
/// here.
pub struct IrrService {
    discounting: DiscountingService,
}

impl IrrService {
    pub fn new() -> Self {
        Self {
            discounting: DiscountingService::new(),
        }
    }

    /// Solve for the internal rate of return.
    ///
    /// Numeric failure never escalates: a flat slope, a rate driven out of
    /// the domain that cannot be pulled back, a non-finite value, or cap
    /// exhaustion all degrade to `Unconverged`.
    pub fn solve(&self, series: &CashFlowSeries) -> IrrOutcome {
        let mut rate = SEED_RATE;

        for _ in 0..MAX_ITERATIONS {
            let (npv, slope) = match self.discounting.present_value_with_slope(rate, series) {
                Ok(pair) => pair,
                // Rate left the domain despite the pull-back; give up.
                Err(_) => return IrrOutcome::Unconverged,
            };

            if !npv.is_finite() || !slope.is_finite() {
                return IrrOutcome::Unconverged;
            }
            if npv.abs() < NPV_TOLERANCE {
                return IrrOutcome::Converged(rate);
            }
            if slope.abs() < MIN_SLOPE {
                log::warn!("IRR slope vanished at rate {rate}; no solution");
                return IrrOutcome::Unconverged;
            }

            let mut next = rate - npv / slope;
            if !next.is_finite() {
                return IrrOutcome::Unconverged;
            }
            // A candidate at or below -1 is an InvalidRate condition;
            // recover locally by pulling back to the midpoint between the
            // current rate and -1 instead of evaluating it.
            if next <= -1.0 {
                next = (rate - 1.0) / 2.0;
            }

            if (next - rate).abs() < STEP_TOLERANCE {
                // Stalled or landed: accept only a genuine root.
                return match self.discounting.present_value(next, series) {
                    Ok(npv) if npv.abs() < STALLED_NPV_TOLERANCE => IrrOutcome::Converged(next),
                    _ => IrrOutcome::Unconverged,
                };
            }
            rate = next;
        }

        log::warn!("IRR did not converge within {MAX_ITERATIONS} iterations");
        IrrOutcome::Unconverged
    }
}

impl Default for IrrService {
    fn default() -> Self {
        Self::new()
    }
}
