//! Typst table markup for the report.

use crate::domain::simulation::InvestmentHistory;
use crate::domain::summary::Summary;

/// History tables longer than this are thinned to every n-th row; the final
/// row is always kept.
const MAX_HISTORY_ROWS: usize = 30;

pub fn render_summary_table(summary: &Summary) -> String {
    let mut out = String::from("#table(\n  columns: 2,\n  align: (left, right),\n");
    out.push_str(&format!(
        "  [Investment Period], [{} to {}],\n",
        summary.start_date, summary.end_date
    ));
    out.push_str(&format!("  [Total Days], [{}],\n", summary.investment_days));
    out.push_str(&format!("  [Price Basis], [{}],\n", summary.price_basis));
    out.push_str(&format!(
        "  [Total Invested], [{}],\n",
        fmt_currency(summary.total_invested)
    ));
    out.push_str(&format!(
        "  [Bitcoin Acquired], [{:.6} BTC],\n",
        summary.total_btc_acquired
    ));
    out.push_str(&format!(
        "  [Average BTC Price], [{}],\n",
        fmt_currency(summary.average_btc_price)
    ));
    out.push_str(&format!(
        "  [Final Portfolio Value], [{}],\n",
        fmt_currency(summary.final_portfolio_value)
    ));
    out.push_str(&format!(
        "  [Total Return], [{}],\n",
        fmt_currency(summary.total_return)
    ));
    out.push_str(&format!(
        "  [Return Percentage], [{:.2}%],\n",
        summary.return_pct
    ));
    out.push_str(&format!(
        "  [Final BTC Price], [{}],\n",
        fmt_currency(summary.final_btc_price)
    ));
    out.push_str(")\n");
    out
}

pub fn render_insights_table(summary: &Summary) -> String {
    let mut out = String::from("#table(\n  columns: 2,\n  align: (left, right),\n");
    out.push_str(&format!(
        "  [Average Daily Return], [{:.4}%],\n",
        summary.average_daily_return_pct()
    ));
    out.push_str(&format!(
        "  [Annualized Return], [{:.2}%],\n",
        summary.annualized_return_pct()
    ));
    out.push_str(")\n");
    out
}

pub fn render_history_table(history: &InvestmentHistory) -> String {
    if history.is_empty() {
        return "No investment history.".to_string();
    }

    let records = history.records();
    let step = records.len().div_ceil(MAX_HISTORY_ROWS).max(1);

    let mut out = String::from(
        "#table(\n  columns: 6,\n  align: (left, right, right, right, right, right),\n",
    );
    out.push_str("  [*Date*], [*Price*], [*BTC Bought*], [*Invested*], [*Value*], [*Return*],\n");

    let last = records.len() - 1;
    for (i, r) in records.iter().enumerate() {
        if i % step != 0 && i != last {
            continue;
        }
        out.push_str(&format!(
            "  [{}], [{}], [{:.6}], [{}], [{}], [{:.2}%],\n",
            r.date,
            fmt_currency(r.price),
            r.btc_purchased,
            fmt_currency(r.cumulative_investment),
            fmt_currency(r.portfolio_value),
            r.return_pct,
        ));
    }
    out.push_str(")\n");
    out
}

pub fn fmt_currency(value: f64) -> String {
    if value >= 0.0 {
        format!("${:.2}", value)
    } else {
        format!("-${:.2}", value.abs())
    }
}
