//! Numerical summary of a completed simulation.

use super::error::DcasimError;
use super::price::PriceBasis;
use super::simulation::InvestmentHistory;
use chrono::NaiveDate;

/// Read-only snapshot of the final state of an [`InvestmentHistory`].
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total_invested: f64,
    pub total_btc_acquired: f64,
    pub final_portfolio_value: f64,
    pub total_return: f64,
    pub return_pct: f64,
    pub investment_days: usize,
    pub average_btc_price: f64,
    pub final_btc_price: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub price_basis: PriceBasis,
}

impl Summary {
    /// return_pct spread evenly over the investment days.
    pub fn average_daily_return_pct(&self) -> f64 {
        self.return_pct / self.investment_days as f64
    }

    /// Simple linear annualization of return_pct.
    pub fn annualized_return_pct(&self) -> f64 {
        self.return_pct * 365.0 / self.investment_days as f64
    }
}

/// Build the summary from the last record of a simulation run.
pub fn summarize(history: &InvestmentHistory) -> Result<Summary, DcasimError> {
    let last = history.last().ok_or(DcasimError::EmptyHistory)?;
    let first = history.first().ok_or(DcasimError::EmptyHistory)?;

    if last.cumulative_btc <= 0.0 {
        return Err(DcasimError::ZeroHoldings);
    }

    Ok(Summary {
        total_invested: last.cumulative_investment,
        total_btc_acquired: last.cumulative_btc,
        final_portfolio_value: last.portfolio_value,
        total_return: last.total_return,
        return_pct: last.return_pct,
        investment_days: history.len(),
        average_btc_price: last.cumulative_investment / last.cumulative_btc,
        final_btc_price: last.price,
        start_date: first.date,
        end_date: last.date,
        price_basis: history.basis(),
    })
}
