//! SVG chart rendering for reports.
//!
//! Four charts per report: portfolio value vs. cumulative investment, return
//! percentage, BTC price, and cumulative holdings.

use crate::domain::simulation::InvestmentHistory;
use chrono::NaiveDate;

const CHART_WIDTH: f64 = 600.0;
const CHART_HEIGHT: f64 = 300.0;
const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 30.0;
const MARGIN_BOTTOM: f64 = 40.0;

struct SeriesLine {
    label: &'static str,
    color: &'static str,
    values: Vec<f64>,
}

/// Cumulative investment (blue) against portfolio value (green).
pub fn generate_growth_svg(history: &InvestmentHistory) -> String {
    if history.is_empty() {
        return String::new();
    }
    let records = history.records();
    let lines = vec![
        SeriesLine {
            label: "Total Invested",
            color: "#2563eb",
            values: records.iter().map(|r| r.cumulative_investment).collect(),
        },
        SeriesLine {
            label: "Portfolio Value",
            color: "#16a34a",
            values: records.iter().map(|r| r.portfolio_value).collect(),
        },
    ];
    let dates: Vec<NaiveDate> = records.iter().map(|r| r.date).collect();
    render_line_chart("Value ($)", &dates, &lines, false, &fmt_dollars)
}

/// Return percentage (orange) with a dashed zero line.
pub fn generate_return_svg(history: &InvestmentHistory) -> String {
    if history.is_empty() {
        return String::new();
    }
    let records = history.records();
    let lines = vec![SeriesLine {
        label: "Return",
        color: "#f59e0b",
        values: records.iter().map(|r| r.return_pct).collect(),
    }];
    let dates: Vec<NaiveDate> = records.iter().map(|r| r.date).collect();
    render_line_chart("Return (%)", &dates, &lines, true, &fmt_percent)
}

/// BTC price over the investment period (purple).
pub fn generate_price_svg(history: &InvestmentHistory) -> String {
    if history.is_empty() {
        return String::new();
    }
    let records = history.records();
    let lines = vec![SeriesLine {
        label: "BTC Price",
        color: "#9333ea",
        values: records.iter().map(|r| r.price).collect(),
    }];
    let dates: Vec<NaiveDate> = records.iter().map(|r| r.date).collect();
    render_line_chart("BTC Price ($)", &dates, &lines, false, &fmt_dollars)
}

/// Cumulative holdings (red).
pub fn generate_holdings_svg(history: &InvestmentHistory) -> String {
    if history.is_empty() {
        return String::new();
    }
    let records = history.records();
    let lines = vec![SeriesLine {
        label: "Holdings",
        color: "#dc2626",
        values: records.iter().map(|r| r.cumulative_btc).collect(),
    }];
    let dates: Vec<NaiveDate> = records.iter().map(|r| r.date).collect();
    render_line_chart("BTC Amount", &dates, &lines, false, &fmt_btc)
}

fn fmt_dollars(value: f64) -> String {
    format!("${:.0}", value)
}

fn fmt_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

fn fmt_btc(value: f64) -> String {
    format!("{:.4}", value)
}

fn render_line_chart(
    axis_label: &str,
    dates: &[NaiveDate],
    lines: &[SeriesLine],
    zero_line: bool,
    fmt_value: &dyn Fn(f64) -> String,
) -> String {
    let mut min_value = f64::INFINITY;
    let mut max_value = f64::NEG_INFINITY;
    for line in lines {
        for &v in &line.values {
            min_value = min_value.min(v);
            max_value = max_value.max(v);
        }
    }
    if zero_line {
        min_value = min_value.min(0.0);
        max_value = max_value.max(0.0);
    }
    let range = (max_value - min_value).max(1e-9);

    let plot_width = CHART_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_height = CHART_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let count = dates.len();

    let x_scale =
        |i: usize| -> f64 { MARGIN_LEFT + (i as f64 / (count - 1).max(1) as f64) * plot_width };
    let y_scale =
        |v: f64| -> f64 { MARGIN_TOP + plot_height - ((v - min_value) / range) * plot_height };

    let start_date = dates[0];
    let end_date = dates[count - 1];
    let mid_date = dates[count / 2];

    let mut svg = String::new();
    svg.push_str(&format!(
        r##"<svg width="{}" height="{}" viewBox="0 0 {} {}" xmlns="http://www.w3.org/2000/svg">"##,
        CHART_WIDTH, CHART_HEIGHT, CHART_WIDTH, CHART_HEIGHT
    ));
    svg.push_str("\n  <rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n");
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"15\" text-anchor=\"end\" font-size=\"12\" fill=\"#666\">{}</text>\n",
        CHART_WIDTH, axis_label
    ));

    // Axes
    svg.push_str(&format!(
        "  <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"#ccc\" stroke-width=\"1\"/>\n",
        MARGIN_LEFT,
        MARGIN_TOP,
        MARGIN_LEFT,
        CHART_HEIGHT - MARGIN_BOTTOM
    ));
    svg.push_str(&format!(
        "  <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"#ccc\" stroke-width=\"1\"/>\n",
        MARGIN_LEFT,
        CHART_HEIGHT - MARGIN_BOTTOM,
        CHART_WIDTH - MARGIN_RIGHT,
        CHART_HEIGHT - MARGIN_BOTTOM
    ));

    // Y-axis labels: max, mid, min
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"{}\" text-anchor=\"end\" font-size=\"10\" fill=\"#666\">{}</text>\n",
        MARGIN_LEFT - 5.0,
        MARGIN_TOP + 5.0,
        fmt_value(max_value)
    ));
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"{}\" text-anchor=\"end\" font-size=\"10\" fill=\"#666\">{}</text>\n",
        MARGIN_LEFT - 5.0,
        MARGIN_TOP + plot_height / 2.0,
        fmt_value((max_value + min_value) / 2.0)
    ));
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"{}\" text-anchor=\"end\" font-size=\"10\" fill=\"#666\">{}</text>\n",
        MARGIN_LEFT - 5.0,
        CHART_HEIGHT - MARGIN_BOTTOM - 5.0,
        fmt_value(min_value)
    ));

    // X-axis labels: first, middle, last date
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-size=\"10\" fill=\"#666\">{}</text>\n",
        MARGIN_LEFT, CHART_HEIGHT, start_date
    ));
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-size=\"10\" fill=\"#666\">{}</text>\n",
        MARGIN_LEFT + plot_width / 2.0,
        CHART_HEIGHT,
        mid_date
    ));
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-size=\"10\" fill=\"#666\">{}</text>\n",
        CHART_WIDTH - MARGIN_RIGHT,
        CHART_HEIGHT,
        end_date
    ));

    if zero_line && min_value < 0.0 && max_value > 0.0 {
        let y = y_scale(0.0);
        svg.push_str(&format!(
            "  <line x1=\"{}\" y1=\"{:.1}\" x2=\"{}\" y2=\"{:.1}\" stroke=\"#dc2626\" stroke-width=\"1\" stroke-dasharray=\"4 3\"/>\n",
            MARGIN_LEFT,
            y,
            CHART_WIDTH - MARGIN_RIGHT,
            y
        ));
    }

    for line in lines {
        let mut path_data = String::new();
        for (i, &v) in line.values.iter().enumerate() {
            let x = x_scale(i);
            let y = y_scale(v);
            if i == 0 {
                path_data.push_str(&format!("M {:.1} {:.1}", x, y));
            } else {
                path_data.push_str(&format!(" L {:.1} {:.1}", x, y));
            }
        }
        svg.push_str(&format!(
            "  <path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"2\"/>\n",
            path_data, line.color
        ));
    }

    // Legend, only when more than one series shares the plot
    if lines.len() > 1 {
        for (i, line) in lines.iter().enumerate() {
            let y = MARGIN_TOP + 14.0 * i as f64;
            svg.push_str(&format!(
                "  <rect x=\"{}\" y=\"{:.1}\" width=\"10\" height=\"10\" fill=\"{}\"/>\n",
                MARGIN_LEFT + 8.0,
                y,
                line.color
            ));
            svg.push_str(&format!(
                "  <text x=\"{}\" y=\"{:.1}\" font-size=\"10\" fill=\"#333\">{}</text>\n",
                MARGIN_LEFT + 22.0,
                y + 9.0,
                line.label
            ));
        }
    }

    svg.push_str("</svg>");
    svg
}
