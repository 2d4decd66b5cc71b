//! Built-in Typst report template.
//!
//! Markup with `{{PLACEHOLDER}}` markers resolved by the report adapter.

pub fn template() -> &'static str {
    r#"#set page(paper: "a4", margin: 2cm)
#set text(size: 10pt)

= Bitcoin Daily Investment Report

== Simulation Summary

{{SIMULATION_SUMMARY}}

== Additional Insights

{{INSIGHTS_TABLE}}

== Portfolio Value vs Total Investment

{{GROWTH_CHART_SVG}}

== Return Percentage Over Time

{{RETURN_CHART_SVG}}

== Bitcoin Price Over Investment Period

{{PRICE_CHART_SVG}}

== Cumulative Bitcoin Holdings

{{HOLDINGS_CHART_SVG}}

== Investment History

{{HISTORY_TABLE}}
"#
}
